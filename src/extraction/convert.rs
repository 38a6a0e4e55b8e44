//! LaTeX to plain text conversion and body selection

use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, TexIndexError};

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

/// Turns a LaTeX manuscript into plain text
pub trait TextConverter {
    fn convert(&self, input: &Path) -> Result<String>;
}

/// Runs the external `detex` tool
#[derive(Debug, Clone)]
pub struct Detex {
    command: String,
    excluded_environments: Vec<String>,
}

impl Detex {
    pub fn new(command: impl Into<String>, excluded_environments: Vec<String>) -> Self {
        Self {
            command: command.into(),
            excluded_environments,
        }
    }
}

impl TextConverter for Detex {
    fn convert(&self, input: &Path) -> Result<String> {
        debug!(command = %self.command, input = %input.display(), "Running converter");

        let output = Command::new(&self.command)
            .arg("-e")
            .arg(self.excluded_environments.join(","))
            .arg(input)
            .output()
            .map_err(|e| TexIndexError::Converter {
                message: format!("failed to run '{}': {}", self.command, e),
            })?;

        if !output.status.success() {
            return Err(TexIndexError::Converter {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Keep the lines from the one equal to `from` (inclusive) up to the one
/// equal to `to` (exclusive). Nothing is kept if `from` never appears.
pub fn select_body(text: &str, from: &str, to: &str) -> String {
    let mut body = String::new();
    let mut reading = false;

    for line in text.split_inclusive('\n') {
        let title = line.strip_suffix('\n').unwrap_or(line);
        if title == from {
            reading = true;
        }
        if title == to {
            break;
        }
        if reading {
            body.push_str(line);
        }
    }

    body
}

/// Collapse runs of blank lines and drop `[...]` spans
pub fn clean_text(text: &str) -> String {
    let collapsed = BLANK_LINES_RE.replace_all(text, "\n\n");
    BRACKETED_RE.replace_all(&collapsed, "").into_owned()
}
