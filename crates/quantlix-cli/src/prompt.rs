//! Interactive prompts for values left off the command line.

use crate::error::CliResult;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Source of values the user did not pass as arguments.
pub trait Prompt: fmt::Debug + Send + Sync {
    /// Read one line, echoed.
    fn text(&self, label: &str) -> CliResult<String>;

    /// Read one line with echo turned off.
    fn secret(&self, label: &str) -> CliResult<String>;
}

/// Prompts on the terminal. Labels go to stderr so stdout stays clean.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompt for Terminal {
    fn text(&self, label: &str) -> CliResult<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}: ", label)?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn secret(&self, label: &str) -> CliResult<String> {
        Ok(rpassword::prompt_password(format!("{}: ", label))?)
    }
}
