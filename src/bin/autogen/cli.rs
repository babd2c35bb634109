//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use autogen::util::ColorChoice;

/// Autogen - stamp configure scripts and generate forward headers
#[derive(Parser)]
#[command(name = "autogen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Select a product by name instead of matching the repository
    #[arg(short, long, global = true)]
    pub product: Option<String>,

    /// Repository identity to match against product markers
    #[arg(long, global = true, env = "AUTOGEN_REPO_ID")]
    pub repo_id: Option<String>,

    /// Product checkout containing `src/` (defaults to current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub source_dir: PathBuf,

    /// Directory receiving the configure scripts (defaults to current directory)
    #[arg(long, global = true, default_value = ".")]
    pub build_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stamp configure scripts and generate forward headers
    Run,

    /// Only stamp configure.sh and configure.bat
    Configure,

    /// Only regenerate the include tree
    Headers,

    /// List known products in dispatch order
    Products,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
