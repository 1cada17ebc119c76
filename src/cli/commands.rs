use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build pack detection and import for Jenkins X projects
#[derive(Parser, Debug)]
#[command(
    name = "jx-project",
    about = "Detect and apply build packs to Jenkins X projects",
    version,
    author,
    long_about = "jx-project inspects a source tree to pick a build pack from a local \
                  catalog, merges the pack's charts and files into the project, records \
                  the pack in jenkins-x.yml and replaces REPLACE_ME placeholders."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the build pack for a project",
        long_about = "Runs the detection rules against a project directory and prints the \
                      name of the matching build pack.\n\n\
                      Examples:\n  \
                      jx-project detect\n  \
                      jx-project detect /path/to/repo --packs-dir ./packs\n  \
                      jx-project detect --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Import a project by applying a build pack",
        long_about = "Detects (or takes) a build pack, merges it into the project, updates \
                      jenkins-x.yml, writes OWNERS and replaces placeholders.\n\n\
                      Examples:\n  \
                      jx-project import --org acme\n  \
                      jx-project import /path/to/repo --org acme --pack maven\n  \
                      jx-project import --org acme --lighthouse-only"
    )]
    Import(ImportArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Build pack catalog directory")]
    pub packs_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Build pack catalog directory")]
    pub packs_dir: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Use this build pack instead of detecting one")]
    pub pack: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Application name (defaults to the directory name)"
    )]
    pub app_name: Option<String>,

    #[arg(long, value_name = "ORG", help = "Git organisation")]
    pub org: String,

    #[arg(long, value_name = "HOST", help = "Git provider host")]
    pub git_host: Option<String>,

    #[arg(
        long,
        value_name = "ORG",
        help = "Docker registry organisation (defaults to the git organisation)"
    )]
    pub docker_registry_org: Option<String>,

    #[arg(
        long = "owner",
        value_name = "USER",
        help = "Approver and reviewer for a new OWNERS file (repeatable)"
    )]
    pub owners: Vec<String>,

    #[arg(long, help = "Only merge the pack's .lighthouse files")]
    pub lighthouse_only: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
