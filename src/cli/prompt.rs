//! Interactive prompts for settings not given on the command line.

use std::io::{self, BufRead, StdinLock, Write};
use std::path::PathBuf;

use console::{style, Term};

use crate::api::{parse_creator_url, CreatorRef};
use crate::config::{validate_download_directory, DownloadMode};
use crate::error::{Error, Result};

/// Asks questions on `output` and reads answers line by line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Term> {
    /// Prompt on the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), Term::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{} {} ", style("?").green().bold(), question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Aborted);
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{} {}", style("WARN").yellow().bold(), message)?;
        Ok(())
    }

    /// Ask for the creator page URL until a supported one is given.
    pub fn creator(&mut self) -> Result<CreatorRef> {
        loop {
            let answer = self.ask("Enter the artist page URL:")?;
            match parse_creator_url(&answer) {
                Ok(creator) => return Ok(creator),
                Err(e) => self.complain(&e.to_string())?,
            }
        }
    }

    /// Ask whether to download everything or just media files.
    pub fn download_mode(&mut self) -> Result<DownloadMode> {
        loop {
            let answer = self.ask(
                "Do you want to download (1) everything or (2) just media files? (Enter 1 or 2):",
            )?;
            match DownloadMode::from_menu_choice(&answer) {
                Some(mode) => return Ok(mode),
                None => self.complain("Invalid input. Please enter 1 or 2.")?,
            }
        }
    }

    /// Ask for an existing, writable download directory.
    pub fn download_directory(&mut self) -> Result<PathBuf> {
        loop {
            let answer = self.ask("Enter the directory where you want to download the files:")?;
            let dir = PathBuf::from(answer);
            match validate_download_directory(&dir) {
                Ok(()) => return Ok(dir),
                Err(_) => self.complain(
                    "Invalid directory or no write permission. Please enter a valid directory.",
                )?,
            }
        }
    }
}
