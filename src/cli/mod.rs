pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, ImportArgs, OutputFormatArg};
pub use output::{DetectionOutput, ImportSummary, OutputFormat, OutputFormatter};
