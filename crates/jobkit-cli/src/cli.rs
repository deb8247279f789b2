//! Command-line argument wrappers and the command executor.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, so `jobkit-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workbench
//! ```
//!
//! Asset commands are shared by the three asset kinds; the kind comes from
//! the parent command, so those wrappers convert with `into_params(kind)`
//! instead of `From`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jobkit_core::{
    display::{AssetSummaries, CreateResult, DeleteResult, UpdateResult},
    params::*,
    Asset, AssetKind, FixStrategy, Workbench,
};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Create an asset from a template
#[derive(Args)]
pub struct CreateAssetArgs {
    /// Name of the asset, unique per kind
    pub name: String,
    /// Template file; relative paths resolve against --templates-dir
    pub template: PathBuf,
}

impl CreateAssetArgs {
    pub fn into_params(self, kind: AssetKind) -> CreateAsset {
        CreateAsset {
            kind,
            name: self.name,
            template_path: self.template,
        }
    }
}

/// Address one asset by name
#[derive(Args)]
pub struct NameArgs {
    #[arg(help = "Name of the asset")]
    pub name: String,
}

impl NameArgs {
    pub fn into_params(self, kind: AssetKind) -> AssetRef {
        AssetRef::new(kind, self.name)
    }
}

/// Delete an asset permanently
#[derive(Args)]
pub struct DeleteAssetArgs {
    #[arg(help = "Name of the asset to permanently delete")]
    pub name: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Point an asset at a different template and reload its parameters
#[derive(Args)]
pub struct RetargetArgs {
    #[arg(help = "Name of the asset")]
    pub name: String,
    #[arg(help = "New template file")]
    pub template: PathBuf,
}

impl RetargetArgs {
    pub fn into_params(self, kind: AssetKind) -> RetargetAsset {
        RetargetAsset {
            asset: AssetRef::new(kind, self.name),
            template_path: self.template,
        }
    }
}

/// Set one parameter value
///
/// Step task parameters take their whole range as a comma separated list,
/// one entry per task.
#[derive(Args)]
pub struct SetParameterArgs {
    #[arg(help = "Name of the asset")]
    pub name: String,
    #[arg(help = "Parameter or variable name")]
    pub parameter: String,
    #[arg(help = "New value (comma separated range for step task parameters)")]
    pub value: String,
}

impl SetParameterArgs {
    pub fn into_params(self, kind: AssetKind) -> SetParameter {
        SetParameter {
            asset: AssetRef::new(kind, self.name),
            parameter: self.parameter,
            value: self.value,
        }
    }
}

/// Address one parameter of an asset
#[derive(Args)]
pub struct ParameterArgs {
    #[arg(help = "Name of the asset")]
    pub name: String,
    #[arg(help = "Parameter or variable name")]
    pub parameter: String,
}

impl ParameterArgs {
    pub fn into_params(self, kind: AssetKind) -> ParameterRef {
        ParameterRef {
            asset: AssetRef::new(kind, self.name),
            parameter: self.parameter,
        }
    }
}

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Create an asset and load its parameters from a template
    #[command(alias = "c")]
    Create(CreateAssetArgs),
    /// Show an asset and its parameters
    #[command(alias = "s")]
    Show(NameArgs),
    /// List stored assets of this kind
    #[command(aliases = ["l", "ls"])]
    List,
    /// Delete an asset permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteAssetArgs),
    /// Check an asset's parameters against its template
    Check(NameArgs),
    /// Repair an asset's parameters from its template
    Fix(NameArgs),
    /// Point an asset at another template and reload its parameters
    Retarget(RetargetArgs),
    /// Set one parameter value
    Set(SetParameterArgs),
    /// Reset one parameter to its template default
    Reset(ParameterArgs),
    /// Print the template default of one parameter
    #[command(name = "default")]
    ShowDefault(ParameterArgs),
}

/// Asset kinds that can hold references
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LinkTargetArg {
    Job,
    Step,
}

impl From<LinkTargetArg> for AssetKind {
    fn from(val: LinkTargetArg) -> Self {
        match val {
            LinkTargetArg::Job => AssetKind::Job,
            LinkTargetArg::Step => AssetKind::Step,
        }
    }
}

/// Add or remove step and environment references
#[derive(Args)]
pub struct LinkArgs {
    #[arg(value_enum, help = "Kind of the asset holding the references")]
    pub kind: LinkTargetArg,
    #[arg(help = "Name of the job or step")]
    pub name: String,
    /// Step names as a comma separated list (jobs only)
    #[arg(short, long, value_delimiter = ',')]
    pub steps: Vec<String>,
    /// Environment names as a comma separated list
    #[arg(short, long, value_delimiter = ',')]
    pub environments: Vec<String>,
}

impl LinkArgs {
    pub fn into_params(self, unlink: bool) -> LinkAssets {
        LinkAssets {
            target: AssetRef::new(self.kind.into(), self.name),
            steps: self.steps,
            environments: self.environments,
            unlink,
        }
    }
}

/// Replace the dependencies of a step
///
/// Passing no dependencies clears them. The change is rejected if it would
/// reference an unknown step or close a cycle.
#[derive(Args)]
pub struct DependArgs {
    #[arg(help = "Name of the dependent step")]
    pub step: String,
    #[arg(help = "Steps that must run first")]
    pub depends_on: Vec<String>,
}

impl From<DependArgs> for SetDependencies {
    fn from(val: DependArgs) -> Self {
        SetDependencies {
            step: val.step,
            depends_on: val.depends_on,
        }
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(help = "Name of the job to validate")]
    pub job: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AssetKindArg {
    Job,
    Step,
    Env,
}

impl From<AssetKindArg> for AssetKind {
    fn from(val: AssetKindArg) -> Self {
        match val {
            AssetKindArg::Job => AssetKind::Job,
            AssetKindArg::Step => AssetKind::Step,
            AssetKindArg::Env => AssetKind::Environment,
        }
    }
}

#[derive(Args, Default)]
pub struct ListAssetsArgs {
    /// Only list assets of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<AssetKindArg>,
}

impl From<ListAssetsArgs> for ListAssets {
    fn from(val: ListAssetsArgs) -> Self {
        ListAssets {
            kind: val.kind.map(AssetKind::from),
        }
    }
}

/// Command-line representation of the fix strategies
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FixStrategyArg {
    /// Replace the parameters with the template's
    Reset,
    /// Keep edited values whose name and type still match the template
    PreserveOverrides,
}

impl From<FixStrategyArg> for FixStrategy {
    fn from(val: FixStrategyArg) -> Self {
        match val {
            FixStrategyArg::Reset => FixStrategy::Reset,
            FixStrategyArg::PreserveOverrides => FixStrategy::PreserveOverrides,
        }
    }
}

// ============================================================================
// Command execution
// ============================================================================

/// Runs commands against a workbench and renders the results.
pub struct Cli {
    workbench: Workbench,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workbench: Workbench, renderer: TerminalRenderer) -> Self {
        Self {
            workbench,
            renderer,
        }
    }

    pub fn handle_asset_command(&mut self, kind: AssetKind, command: AssetCommands) -> Result<()> {
        use AssetCommands::*;

        match command {
            Create(args) => {
                let asset = self
                    .workbench
                    .create_asset(&args.into_params(kind))
                    .with_context(|| format!("Failed to create {kind}"))?;
                self.renderer.render(&CreateResult::new(asset).to_string())
            }
            Show(args) => {
                let asset = self.workbench.get_asset(&args.into_params(kind))?;
                self.renderer.render(&asset.to_string())
            }
            List => self.list_assets(&ListAssets { kind: Some(kind) }),
            Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Deleting {kind} '{}' is permanent; pass --confirm to proceed",
                        args.name
                    );
                }
                let asset = self
                    .workbench
                    .delete_asset(&AssetRef::new(kind, args.name))?;
                self.renderer.render(&DeleteResult::new(asset).to_string())
            }
            Check(args) => {
                let report = self.workbench.check_asset(&args.into_params(kind))?;
                self.renderer.render(&report.to_string())?;
                if !report.result.passed {
                    bail!(
                        "{kind} '{}' is not consistent with its template",
                        report.name
                    );
                }
                Ok(())
            }
            Fix(args) => {
                let report = self.workbench.fix_asset(&args.into_params(kind))?;
                self.renderer.render(&report.to_string())
            }
            Retarget(args) => {
                let params = args.into_params(kind);
                let asset = self
                    .workbench
                    .retarget_asset(&params)
                    .context("Failed to load the new template")?;
                let change = format!("Template changed to {}", params.template_path.display());
                self.render_update(asset, change)
            }
            Set(args) => {
                let params = args.into_params(kind);
                let asset = self.workbench.set_parameter(&params)?;
                let change = format!("Set '{}' to '{}'", params.parameter, params.value);
                self.render_update(asset, change)
            }
            Reset(args) => {
                let params = args.into_params(kind);
                let asset = self.workbench.reset_parameter(&params)?;
                let change = format!("Reset '{}' to its template default", params.parameter);
                self.render_update(asset, change)
            }
            ShowDefault(args) => {
                let params = args.into_params(kind);
                let value = self.workbench.default_value(&params)?;
                self.renderer
                    .render(&format!("{} = {value}\n", params.parameter))
            }
        }
    }

    pub fn link(&mut self, args: LinkArgs, unlink: bool) -> Result<()> {
        let params = args.into_params(unlink);
        let asset = self.workbench.link_assets(&params)?;

        let verb = if unlink { "Unlinked" } else { "Linked" };
        let changes = params
            .steps
            .iter()
            .map(|step| format!("{verb} step '{step}'"))
            .chain(
                params
                    .environments
                    .iter()
                    .map(|env| format!("{verb} environment '{env}'")),
            )
            .collect();
        self.renderer
            .render(&UpdateResult::with_changes(asset, changes).to_string())
    }

    pub fn set_dependencies(&mut self, args: DependArgs) -> Result<()> {
        let step = self
            .workbench
            .set_step_dependencies(&args.into())
            .context("Dependencies rejected")?;
        let change = if step.depends_on.is_empty() {
            "Cleared dependencies".to_string()
        } else {
            format!("Depends on {}", step.depends_on.join(", "))
        };
        self.render_update(Asset::Step(step), change)
    }

    pub fn validate_job(&self, args: ValidateArgs) -> Result<()> {
        let validation = self
            .workbench
            .validate_job(&args.job)
            .with_context(|| format!("Job '{}' is not ready for submission", args.job))?;
        self.renderer.render(&validation.to_string())
    }

    pub fn list_assets(&self, params: &ListAssets) -> Result<()> {
        let summaries = self.workbench.list_assets(params)?;
        debug!("Listing {} assets", summaries.len());
        self.renderer
            .render(&AssetSummaries(summaries).to_string())
    }

    fn render_update(&self, asset: Asset, change: String) -> Result<()> {
        self.renderer
            .render(&UpdateResult::with_changes(asset, vec![change]).to_string())
    }
}
