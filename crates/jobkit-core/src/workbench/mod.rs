//! High-level API for managing template-backed assets.
//!
//! [`Workbench`] ties the asset library to a template loader. Every operation
//! loads the asset from the library, works on it through an
//! [`AssetEditor`], and saves it back when it changed.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use jobkit_core::{
//!     models::AssetKind,
//!     params::{AssetRef, CreateAsset},
//!     WorkbenchBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbench = WorkbenchBuilder::new()
//!     .with_database_path(Some("/tmp/jobkit.db"))
//!     .with_templates_dir(Some("/studio/templates"))
//!     .build()?;
//!
//! workbench.create_asset(&CreateAsset {
//!     kind: AssetKind::Job,
//!     name: "Render Job".to_string(),
//!     template_path: "job.yml".into(),
//! })?;
//!
//! let report = workbench.check_asset(&AssetRef::new(AssetKind::Job, "Render Job"))?;
//! if !report.result.passed {
//!     workbench.fix_asset(&AssetRef::new(AssetKind::Job, "Render Job"))?;
//! }
//! # Ok(())
//! # }
//! ```

use log::info;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    db::Database,
    editor::AssetEditor,
    error::{JobkitError, Result},
    graph::StepGraph,
    models::{
        Asset, AssetKind, AssetSummary, ConsistencyReport, EnvironmentAsset, FixReport, JobAsset,
        JobValidation, StepAsset,
    },
    params::{
        AssetRef, CreateAsset, LinkAssets, ListAssets, ParameterRef, RetargetAsset,
        SetDependencies, SetParameter,
    },
    reconcile::{FixStrategy, ParameterShape, TemplateBacked},
    template::TemplateLoader,
};

pub mod builder;

pub use builder::WorkbenchBuilder;

#[cfg(test)]
mod tests;

/// A template-backed asset that can be stored in the library.
pub trait StoredAsset: TemplateBacked + Serialize + DeserializeOwned + Into<Asset> {}

impl<A> StoredAsset for A where A: TemplateBacked + Serialize + DeserializeOwned + Into<Asset> {}

/// Main interface for asset operations.
pub struct Workbench {
    db: Database,
    loader: Box<dyn TemplateLoader>,
    fix_strategy: FixStrategy,
}

impl Workbench {
    pub(crate) fn new(
        db: Database,
        loader: Box<dyn TemplateLoader>,
        fix_strategy: FixStrategy,
    ) -> Self {
        Self {
            db,
            loader,
            fix_strategy,
        }
    }

    pub fn loader(&self) -> &dyn TemplateLoader {
        self.loader.as_ref()
    }

    pub fn fix_strategy(&self) -> FixStrategy {
        self.fix_strategy
    }

    /// Opens an editor over `asset` using this workbench's loader.
    pub fn editor<A: TemplateBacked>(&self, asset: A) -> AssetEditor<'_, A> {
        AssetEditor::new(asset, self.loader.as_ref()).with_fix_strategy(self.fix_strategy)
    }

    /// Loads a stored asset of a statically known kind.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::AssetNotFound` if no such asset is stored.
    pub fn load<A: StoredAsset>(&self, name: &str) -> Result<A> {
        self.db
            .get_asset::<A>(name)?
            .ok_or_else(|| JobkitError::AssetNotFound {
                kind: <A::Shape as ParameterShape>::KIND,
                name: name.to_string(),
            })
    }

    /// Creates an asset and loads its parameters from the template.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::Template` if the template cannot be read and
    /// `JobkitError::AssetExists` if the name is taken for that kind.
    pub fn create_asset(&mut self, params: &CreateAsset) -> Result<Asset> {
        if params.name.trim().is_empty() {
            return Err(JobkitError::invalid_input("name", "Asset name cannot be empty"));
        }
        match params.kind {
            AssetKind::Job => self.create::<JobAsset>(JobAsset::new(&params.name, ""), params),
            AssetKind::Step => self.create::<StepAsset>(StepAsset::new(&params.name, ""), params),
            AssetKind::Environment => {
                self.create::<EnvironmentAsset>(EnvironmentAsset::new(&params.name, ""), params)
            }
        }
    }

    fn create<A: StoredAsset>(&mut self, asset: A, params: &CreateAsset) -> Result<Asset> {
        let mut editor = self.editor(asset);
        editor.try_load_from_template(&params.template_path)?;
        let asset = editor.into_asset();

        self.db.insert_asset(&asset)?;
        info!("Created {} '{}'", params.kind, params.name);
        Ok(asset.into())
    }

    pub fn get_asset(&self, asset: &AssetRef) -> Result<Asset> {
        match asset.kind {
            AssetKind::Job => self.load::<JobAsset>(&asset.name).map(Asset::from),
            AssetKind::Step => self.load::<StepAsset>(&asset.name).map(Asset::from),
            AssetKind::Environment => self.load::<EnvironmentAsset>(&asset.name).map(Asset::from),
        }
    }

    pub fn list_assets(&self, params: &ListAssets) -> Result<Vec<AssetSummary>> {
        self.db.list_assets(params.kind)
    }

    /// Deletes an asset and returns what was stored.
    pub fn delete_asset(&mut self, asset: &AssetRef) -> Result<Asset> {
        let stored = self.get_asset(asset)?;
        self.db.delete_asset(asset.kind, &asset.name)?;
        info!("Deleted {} '{}'", asset.kind, asset.name);
        Ok(stored)
    }

    /// Checks a stored asset against its template.
    pub fn check_asset(&self, asset: &AssetRef) -> Result<ConsistencyReport> {
        match asset.kind {
            AssetKind::Job => self.report::<JobAsset>(&asset.name),
            AssetKind::Step => self.report::<StepAsset>(&asset.name),
            AssetKind::Environment => self.report::<EnvironmentAsset>(&asset.name),
        }
    }

    fn report<A: StoredAsset>(&self, name: &str) -> Result<ConsistencyReport> {
        let asset = self.load::<A>(name)?;
        Ok(self.editor(asset).report())
    }

    /// Fixes a stored asset and saves the result.
    pub fn fix_asset(&mut self, asset: &AssetRef) -> Result<FixReport> {
        match asset.kind {
            AssetKind::Job => self.fix::<JobAsset>(&asset.name),
            AssetKind::Step => self.fix::<StepAsset>(&asset.name),
            AssetKind::Environment => self.fix::<EnvironmentAsset>(&asset.name),
        }
    }

    fn fix<A: StoredAsset>(&mut self, name: &str) -> Result<FixReport> {
        let asset = self.load::<A>(name)?;
        let mut editor = self.editor(asset);
        let repaired = editor.fix_consistency();
        let after = editor.report();
        let asset = editor.into_asset();

        self.db.save_asset(&asset)?;
        Ok(FixReport { repaired, after })
    }

    /// Points an asset at another template and reloads its parameters.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::Template` if the new template cannot be read;
    /// the stored asset is left untouched in that case.
    pub fn retarget_asset(&mut self, params: &RetargetAsset) -> Result<Asset> {
        let name = &params.asset.name;
        match params.asset.kind {
            AssetKind::Job => self.retarget::<JobAsset>(name, params),
            AssetKind::Step => self.retarget::<StepAsset>(name, params),
            AssetKind::Environment => self.retarget::<EnvironmentAsset>(name, params),
        }
    }

    fn retarget<A: StoredAsset>(&mut self, name: &str, params: &RetargetAsset) -> Result<Asset> {
        let asset = self.load::<A>(name)?;
        let mut editor = self.editor(asset);
        editor.try_load_from_template(&params.template_path)?;
        let asset = editor.into_asset();

        self.db.save_asset(&asset)?;
        Ok(asset.into())
    }

    /// Sets one parameter value after checking it against the declared kind.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::ParameterNotFound` if the asset has no such
    /// parameter and `JobkitError::InvalidInput` if the value does not match
    /// its kind.
    pub fn set_parameter(&mut self, params: &SetParameter) -> Result<Asset> {
        let name = &params.asset.name;
        let parameter = &params.parameter;
        let found = match params.asset.kind {
            AssetKind::Job => {
                let mut job = self.load::<JobAsset>(name)?;
                let found = job.parameters.set_value(parameter, &params.value)?;
                found.then_some(Asset::Job(job))
            }
            AssetKind::Step => {
                let mut step = self.load::<StepAsset>(name)?;
                let range = split_range(&params.value);
                let found = step.parameters.set_range(parameter, range)?;
                found.then_some(Asset::Step(step))
            }
            AssetKind::Environment => {
                let mut env = self.load::<EnvironmentAsset>(name)?;
                let found = env.variables.get(parameter).is_some();
                if found {
                    env.variables.insert(parameter.as_str(), params.value.as_str());
                }
                found.then_some(Asset::Environment(env))
            }
        };

        let asset = found.ok_or_else(|| JobkitError::ParameterNotFound {
            kind: params.asset.kind,
            asset: name.clone(),
            parameter: parameter.clone(),
        })?;
        self.save(&asset)?;
        Ok(asset)
    }

    /// Resets one parameter to its template default.
    pub fn reset_parameter(&mut self, params: &ParameterRef) -> Result<Asset> {
        let name = &params.asset.name;
        match params.asset.kind {
            AssetKind::Job => self.reset::<JobAsset>(name, &params.parameter),
            AssetKind::Step => self.reset::<StepAsset>(name, &params.parameter),
            AssetKind::Environment => self.reset::<EnvironmentAsset>(name, &params.parameter),
        }
    }

    fn reset<A: StoredAsset>(&mut self, name: &str, parameter: &str) -> Result<Asset> {
        let asset = self.load::<A>(name)?;
        let mut editor = self.editor(asset);
        editor.reset_parameter(parameter)?;
        let asset = editor.into_asset();

        self.db.save_asset(&asset)?;
        Ok(asset.into())
    }

    /// Template default of one parameter, empty if the template lacks it.
    pub fn default_value(&self, params: &ParameterRef) -> Result<String> {
        let name = &params.asset.name;
        let parameter = &params.parameter;
        Ok(match params.asset.kind {
            AssetKind::Job => self.editor(self.load::<JobAsset>(name)?).default_value(parameter),
            AssetKind::Step => self.editor(self.load::<StepAsset>(name)?).default_value(parameter),
            AssetKind::Environment => self
                .editor(self.load::<EnvironmentAsset>(name)?)
                .default_value(parameter),
        })
    }

    /// Adds or removes step and environment references.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::AssetNotFound` when linking a name that is not
    /// stored and `JobkitError::InvalidInput` when linking steps to anything
    /// but a job, or anything to an environment.
    pub fn link_assets(&mut self, params: &LinkAssets) -> Result<Asset> {
        if !params.unlink {
            for step in &params.steps {
                self.load::<StepAsset>(step)?;
            }
            for env in &params.environments {
                self.load::<EnvironmentAsset>(env)?;
            }
        }

        let name = &params.target.name;
        let asset = match params.target.kind {
            AssetKind::Job => {
                let mut job = self.load::<JobAsset>(name)?;
                update_references(&mut job.steps, &params.steps, params.unlink);
                update_references(&mut job.environments, &params.environments, params.unlink);
                Asset::Job(job)
            }
            AssetKind::Step => {
                if !params.steps.is_empty() {
                    return Err(JobkitError::invalid_input(
                        "steps",
                        "Steps can only be linked to a job; use step dependencies instead",
                    ));
                }
                let mut step = self.load::<StepAsset>(name)?;
                update_references(&mut step.environments, &params.environments, params.unlink);
                Asset::Step(step)
            }
            AssetKind::Environment => {
                return Err(JobkitError::invalid_input(
                    "target",
                    "Environments do not reference other assets",
                ));
            }
        };

        self.save(&asset)?;
        Ok(asset)
    }

    /// Replaces the dependencies of a step after validating the part of the
    /// dependency graph the step now reaches.
    ///
    /// Dangling references elsewhere in the library, such as a step that
    /// still depends on a deleted one, do not block unrelated edits.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::Dependency` if the step would reach an unknown
    /// step, depend on itself or close a cycle.
    pub fn set_step_dependencies(&mut self, params: &SetDependencies) -> Result<StepAsset> {
        let mut step = self.load::<StepAsset>(&params.step)?;
        step.depends_on = dedup(&params.depends_on);

        let mut steps = self.all_steps()?;
        match steps.iter_mut().find(|s| s.name == step.name) {
            Some(stored) => *stored = step.clone(),
            None => steps.push(step.clone()),
        }
        StepGraph::from_steps(&steps)?
            .reachable_from(&step.name)
            .validate()?;

        self.db.save_asset(&step)?;
        Ok(step)
    }

    /// Gates a job for submission.
    ///
    /// Every referenced step and environment must exist, every involved
    /// asset must pass its consistency check, and the step dependencies
    /// must form an acyclic graph within the job.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::AssetNotFound`,
    /// `JobkitError::ParametersNotConsistent` or `JobkitError::Dependency`
    /// for the first problem found.
    pub fn validate_job(&self, name: &str) -> Result<JobValidation> {
        let job = self.load::<JobAsset>(name)?;
        let steps = job
            .steps
            .iter()
            .map(|step| self.load::<StepAsset>(step))
            .collect::<Result<Vec<_>>>()?;

        let mut environments = job.environments.clone();
        for step in &steps {
            for env in &step.environments {
                if !environments.contains(env) {
                    environments.push(env.clone());
                }
            }
        }
        let environment_assets = environments
            .iter()
            .map(|env| self.load::<EnvironmentAsset>(env))
            .collect::<Result<Vec<_>>>()?;

        self.require_consistent(job.clone())?;
        for step in &steps {
            self.require_consistent(step.clone())?;
        }
        for env in environment_assets {
            self.require_consistent(env)?;
        }

        let execution_order = StepGraph::from_steps(&steps)?.validate()?;
        info!("Job '{name}' is ready for submission");

        Ok(JobValidation {
            job: job.name,
            execution_order,
            environments,
        })
    }

    fn require_consistent<A: TemplateBacked>(&self, asset: A) -> Result<()> {
        let editor = self.editor(asset);
        let result = editor.check_consistency();
        if result.passed {
            return Ok(());
        }
        let asset = editor.into_asset();
        Err(JobkitError::ParametersNotConsistent {
            kind: asset.kind(),
            name: asset.name().to_string(),
            reason: result.reason,
        })
    }

    fn all_steps(&self) -> Result<Vec<StepAsset>> {
        self.db
            .list_assets(Some(AssetKind::Step))?
            .iter()
            .map(|summary| self.load::<StepAsset>(&summary.name))
            .collect()
    }

    fn save(&mut self, asset: &Asset) -> Result<AssetSummary> {
        match asset {
            Asset::Job(job) => self.db.save_asset(job),
            Asset::Step(step) => self.db.save_asset(step),
            Asset::Environment(env) => self.db.save_asset(env),
        }
    }
}

/// Splits a comma separated range; an empty string is an empty range.
fn split_range(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|entry| entry.trim().to_string()).collect()
}

fn dedup(names: &[String]) -> Vec<String> {
    let mut unique = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    unique
}

fn update_references(references: &mut Vec<String>, names: &[String], unlink: bool) {
    if unlink {
        references.retain(|r| !names.contains(r));
    } else {
        for name in dedup(names) {
            if !references.contains(&name) {
                references.push(name);
            }
        }
    }
}
