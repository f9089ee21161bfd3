pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AuditArgs, CliArgs, Commands, DecodeArgs, GrantArgs, LsArgs, Subjects};
pub use output::{OutputFormat, OutputFormatter};
