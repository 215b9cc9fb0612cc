//! CLI argument parsing and parameter collection

pub mod args;
pub mod collect;
pub mod terminal;

// Re-exports
pub use args::{help_text, Args, LogFormat, ParameterOption, SecretString};
pub use collect::{Collector, Prompt, TerminalPrompt};
