//! texindex-extract CLI entry point: concept extractor

use std::process::ExitCode;

use clap::Parser;

use texindex::cli::{init_logging, ExtractCli};
use texindex::extraction::{run_extractor, Curator, Detex, TerminalCurator};
use texindex::Config;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> texindex::Result<()> {
    let cli = ExtractCli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let options = cli.to_options(&config);

    let converter = Detex::new(
        options.config.detex_command.clone(),
        options.config.detex_excluded_environments.clone(),
    );

    let mut terminal = TerminalCurator;
    let curator: Option<&mut dyn Curator> = if cli.select {
        Some(&mut terminal)
    } else {
        None
    };

    run_extractor(&options, &converter, curator)?;
    Ok(())
}
