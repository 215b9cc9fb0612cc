//! Argument collection
//!
//! Builds the [`ArgumentMap`] for one API call. Sources are applied in
//! increasing precedence, later writes replacing earlier ones:
//!
//! 1. credentials from the config file
//! 2. either interactive `key=value` lines from stdin, or the command line:
//!    positional tokens, then `--name=value`, `--login`, `--password` and
//!    `--credentials` in the order they were given

use std::io::{self, BufRead, Write};

use crate::cli::args::{Args, ParameterOption};
use crate::cli::terminal::EchoGuard;
use crate::config::Config;
use crate::errors::{Result, UdrError};
use crate::input::{
    command_shortcut, expand_option, split_arg, ArgumentMap, COMMAND_KEY, LOGIN_KEY, PASSWORD_KEY,
};

/// Line that ends interactive input
pub const INTERACTIVE_TERMINATOR: &str = "EOF";

/// Source of interactively entered credentials
pub trait Prompt {
    fn login(&mut self) -> io::Result<String>;
    fn password(&mut self) -> io::Result<String>;
}

/// Prompts on the controlling terminal; the password is not echoed
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn login(&mut self) -> io::Result<String> {
        eprint!("Login   : ");
        io::stderr().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn password(&mut self) -> io::Result<String> {
        let _echo = EchoGuard::save();
        rpassword::prompt_password("Password: ")
    }
}

/// Accumulates API parameters across sources
#[derive(Debug, Default)]
pub struct Collector {
    args: ArgumentMap,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the config file's credentials
    pub fn from_config(config: &Config) -> Self {
        let mut collector = Self::new();
        config.apply_credentials(&mut collector.args);
        collector
    }

    /// Read `key=value` lines until a line reading `EOF` or end of input
    pub fn read_interactive<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line.map_err(interrupt_aware)?;
            let line = line.trim_end();
            if line == INTERACTIVE_TERMINATOR {
                break;
            }
            let (key, value) = split_arg(line)?;
            self.args.insert(key, value);
        }
        Ok(())
    }

    /// Apply positional tokens.
    ///
    /// The first token may name the command directly; every other token must
    /// be `key=value`.
    pub fn read_positionals(&mut self, tokens: &[String]) -> Result<()> {
        for (i, token) in tokens.iter().enumerate() {
            if i == 0 {
                if let Some(command) = command_shortcut(token) {
                    self.args.insert(COMMAND_KEY, command);
                    continue;
                }
            }
            let (key, value) = split_arg(token)?;
            self.args.insert(key, value);
        }
        Ok(())
    }

    /// Apply parameter-writing options in command-line order.
    ///
    /// `--name=value[;value...]` expands into one or more parameters;
    /// `-c` prompts for both credentials at its position.
    pub fn read_options(&mut self, options: &[ParameterOption], prompt: &mut dyn Prompt) -> Result<()> {
        for option in options {
            match option {
                ParameterOption::Extension { name, value } => {
                    for (key, value) in expand_option(name, value) {
                        self.args.insert(key, value);
                    }
                }
                ParameterOption::Login(login) => self.args.insert(LOGIN_KEY, login.as_str()),
                ParameterOption::Password(password) => {
                    self.args.insert(PASSWORD_KEY, password.as_str())
                }
                ParameterOption::Credentials => {
                    let login = prompt.login().map_err(interrupt_aware)?;
                    let password = prompt.password().map_err(interrupt_aware)?;
                    self.args.set_credentials(login, password);
                }
            }
        }
        Ok(())
    }

    /// Apply everything the command line supplies: positionals first, then
    /// options
    pub fn read_command_line(&mut self, args: &Args, prompt: &mut dyn Prompt) -> Result<()> {
        self.read_positionals(&args.parameters)?;
        self.read_options(&args.options, prompt)
    }

    #[cfg(test)]
    pub fn args(&self) -> &ArgumentMap {
        &self.args
    }

    pub fn finish(self) -> ArgumentMap {
        self.args
    }
}

fn interrupt_aware(e: io::Error) -> UdrError {
    if e.kind() == io::ErrorKind::Interrupted {
        UdrError::UserInterrupt
    } else {
        UdrError::Io(e)
    }
}
