//! texindex CLI entry point: concept indexer

use std::process::ExitCode;

use clap::Parser;

use texindex::cli::{init_logging, IndexCli, OutputFormat};
use texindex::{run_indexer, Config};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> texindex::Result<String> {
    let cli = IndexCli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let options = cli.to_options(&config);

    let report = run_indexer(&options)?;

    let top_n = options.config.top_n;
    let output = match cli.format {
        OutputFormat::Text => report.stats.render_text(top_n),
        OutputFormat::Json => report.stats.render_json(top_n),
    };

    Ok(output)
}
