//! CLI argument definitions using clap
//!
//! Besides the flags below, any `--name=value[;value...]` whose name is not a
//! known flag is an API parameter. clap cannot express open-ended long
//! options, so [`split_extension_options`] rewrites those into a hidden
//! `--api-param=name=value` flag before clap sees argv. Keeping them inside
//! clap lets [`Args::options`] list every parameter-writing option in
//! command-line order.

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// A string that redacts its value in Debug output to prevent credential leakage
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(pub String);

impl SecretString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "SecretString(\"\")")
        } else {
            write!(f, "SecretString(\"[REDACTED]\")")
        }
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl std::str::FromStr for SecretString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SecretString(s.to_string()))
    }
}

/// udrcmd - command line client for the united-domains Reselling API
#[derive(Parser, Debug, Clone)]
#[command(name = "udrcmd", version, about, long_about = None)]
#[command(after_help = "Any other --NAME=VALUE option is sent as an API parameter; \
    --NAME=V1;V2 expands to NAME0=V1, NAME1=V2.\n\
    Without parameters, KEY=VALUE lines are read from stdin until a line reading EOF.")]
pub struct Args {
    // =========================================================================
    // POSITIONAL ARGUMENTS
    // =========================================================================

    /// API command (first argument) followed by KEY=VALUE parameters
    #[arg(value_name = "PARAMETER")]
    pub parameters: Vec<String>,

    // =========================================================================
    // CREDENTIALS
    // =========================================================================

    /// Asks interactively for your username and password
    #[arg(short = 'c', long = "credentials", action = ArgAction::SetTrue)]
    pub credentials: bool,

    /// Your username (cannot be combined with -c/--credentials)
    #[arg(short = 'l', long = "login", value_name = "LOGIN")]
    pub login: Option<String>,

    /// Your password (cannot be combined with -c/--credentials)
    #[arg(short = 'p', long = "password", value_name = "PASSWORD")]
    pub password: Option<SecretString>,

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Returns raw response as it comes from the API instead of JSON
    #[arg(short = 'r', long = "raw-response", action = ArgAction::SetTrue)]
    pub raw_response: bool,

    /// Print the collected API parameters before sending the request
    #[arg(long = "print-args", action = ArgAction::SetTrue)]
    pub print_args: bool,

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Config file with API endpoint and credentials
    #[arg(long = "config", value_name = "FILE", env = "UDRCMD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// API endpoint (overrides the config file)
    #[arg(long = "url", value_name = "URL", env = "UDRCMD_URL")]
    pub url: Option<String>,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Verbose logging to stderr. Repeat for more detail
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// `name=value` pairs rewritten from unknown `--name=value` options
    #[arg(long = EXTENSION_FLAG, value_name = "NAME=VALUE", action = ArgAction::Append, hide = true)]
    pub extension_params: Vec<String>,

    /// Parameter-writing options in command-line order, filled by [`Args::parse_with_extensions`]
    #[arg(skip)]
    pub options: Vec<ParameterOption>,
}

/// Hidden flag carrying extension options through clap
const EXTENSION_FLAG: &str = "api-param";

/// A command-line option that writes API parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterOption {
    /// `--name=value[;value...]`
    Extension { name: String, value: String },
    /// `-l/--login`
    Login(String),
    /// `-p/--password`
    Password(SecretString),
    /// `-c/--credentials`, prompts at this point
    Credentials,
}

/// Log format for stderr diagnostics
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

impl Args {
    /// Parse argv, routing unknown `--name=value` options to [`Args::options`]
    pub fn parse_with_extensions<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let known = known_long_flags();
        let clap_argv = split_extension_options(argv, &known);

        let matches = Args::command().try_get_matches_from(clap_argv)?;
        let mut args = Args::from_arg_matches(&matches)?;
        args.options = args.ordered_options(&matches);
        Ok(args)
    }

    /// Collect extension, login, password and credentials options by their
    /// position on the command line
    fn ordered_options(&self, matches: &ArgMatches) -> Vec<ParameterOption> {
        let mut indexed: Vec<(usize, ParameterOption)> = Vec::new();

        if let Some(indices) = matches.indices_of("extension_params") {
            for (index, param) in indices.zip(&self.extension_params) {
                let (name, value) = param.split_once('=').unwrap_or((param.as_str(), ""));
                indexed.push((
                    index,
                    ParameterOption::Extension {
                        name: name.to_string(),
                        value: value.to_string(),
                    },
                ));
            }
        }
        // Without an index an option still applies, after everything else
        if let Some(login) = &self.login {
            let index = matches.index_of("login").unwrap_or(usize::MAX);
            indexed.push((index, ParameterOption::Login(login.clone())));
        }
        if let Some(password) = &self.password {
            let index = matches.index_of("password").unwrap_or(usize::MAX);
            indexed.push((index, ParameterOption::Password(password.clone())));
        }
        if self.credentials && matches.value_source("credentials") == Some(ValueSource::CommandLine) {
            let index = matches.index_of("credentials").unwrap_or(usize::MAX);
            indexed.push((index, ParameterOption::Credentials));
        }

        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, option)| option).collect()
    }

    /// Whether the invocation supplied any API parameters.
    ///
    /// Without them the parameters are read interactively from stdin.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty() || !self.options.is_empty() || self.raw_response
    }
}

/// Long flag names clap handles itself
fn known_long_flags() -> Vec<String> {
    Args::command()
        .get_arguments()
        .filter_map(|a| a.get_long().map(str::to_string))
        .filter(|name| name != EXTENSION_FLAG)
        .chain(["help".to_string(), "version".to_string()])
        .collect()
}

/// Rewrite `--name=value` API options into the hidden extension flag.
///
/// The program name is passed through untouched. Tokens after `--` are
/// positional. A bare `-` carries no meaning and is dropped.
pub fn split_extension_options(argv: Vec<String>, known: &[String]) -> Vec<String> {
    let mut clap_argv = Vec::with_capacity(argv.len());
    let mut options_done = false;

    for (i, token) in argv.into_iter().enumerate() {
        if i == 0 || options_done {
            clap_argv.push(token);
            continue;
        }
        if token == "--" {
            options_done = true;
            clap_argv.push(token);
            continue;
        }
        if token == "-" {
            continue;
        }
        if let Some(option) = token.strip_prefix("--") {
            if let Some((name, _)) = option.split_once('=') {
                if !known.iter().any(|k| k == name) {
                    clap_argv.push(format!("--{}={}", EXTENSION_FLAG, option));
                    continue;
                }
            }
        }
        clap_argv.push(token);
    }

    clap_argv
}

/// Rendered help text, shown when option parsing fails
pub fn help_text() -> String {
    Args::command().render_help().to_string()
}
