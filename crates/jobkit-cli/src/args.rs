use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AssetCommands, DependArgs, FixStrategyArg, LinkArgs, ListAssetsArgs, ValidateArgs,
};

/// Editor for template-backed render job assets
///
/// Jobs, steps and environments each keep an editable copy of the parameters
/// declared by their Open Job Description template. jobkit detects when those
/// copies drift from the templates, repairs them, resets single parameters to
/// their template defaults, and validates a job before submission.
#[derive(Parser)]
#[command(version, about, name = "jobkit")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/jobkit/jobkit.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory that relative template paths are resolved against
    #[arg(long, global = true, env = "OPENJD_TEMPLATES_DIRECTORY")]
    pub templates_dir: Option<PathBuf>,

    /// Reuse parsed templates until the file changes on disk
    #[arg(long, global = true)]
    pub cache_templates: bool,

    /// How `fix` repairs a parameter set
    #[arg(long, global = true, value_enum, default_value_t = FixStrategyArg::Reset)]
    pub fix_strategy: FixStrategyArg,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the jobkit CLI
///
/// - `job`, `step`, `env`: operations on one kind of asset
/// - `link`, `unlink`, `depend`: references between assets
/// - `validate`: the pre-submission gate for a job
#[derive(Subcommand)]
pub enum Commands {
    /// Manage job assets
    #[command(alias = "j")]
    Job {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Manage step assets
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Manage environment assets
    #[command(name = "env", alias = "environment")]
    Environment {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Link steps or environments to a job, or environments to a step
    Link(LinkArgs),
    /// Remove step or environment references
    Unlink(LinkArgs),
    /// Replace the steps a step depends on
    Depend(DependArgs),
    /// Check that a job and everything it references is ready for submission
    #[command(alias = "v")]
    Validate(ValidateArgs),
    /// List stored assets of every kind
    #[command(aliases = ["l", "ls"])]
    List(ListAssetsArgs),
}
