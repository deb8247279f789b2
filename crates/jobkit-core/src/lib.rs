//! Core library for the jobkit asset editor.
//!
//! Render jobs are assembled from three kinds of data asset: jobs, steps and
//! environments. Each asset keeps an editable copy of the parameters declared
//! by an Open Job Description template on disk. Templates change
//! independently of the assets, so this crate detects when an asset's
//! parameters have drifted from its template and repairs them.
//!
//! # Architecture
//!
//! - [`template`]: reads templates into their declared parameter sets
//! - [`reconcile`]: checks and fixes a parameter set against its template,
//!   generically over the three parameter shapes
//! - [`editor`]: per-asset editing session with reset-to-default and change
//!   notification
//! - [`graph`]: step dependency validation
//! - [`db`]: SQLite storage for the asset library
//! - [`workbench`]: the high-level API used by the CLI
//! - [`display`]: markdown formatting of assets and reports
//!
//! # Quick Start
//!
//! ```rust
//! use jobkit_core::{models::JobAsset, AssetEditor, YamlTemplateLoader};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let template = dir.path().join("job.yml");
//! std::fs::write(
//!     &template,
//!     "parameterDefinitions:\n  - name: OutputDir\n    type: PATH\n    default: /renders\n",
//! )?;
//!
//! let loader = YamlTemplateLoader::new();
//! let mut editor = AssetEditor::new(JobAsset::new("Render Job", ""), &loader);
//! editor.load_from_template(&template);
//! assert!(editor.check_consistency().passed);
//!
//! // Dropping a parameter makes the asset inconsistent until it is fixed.
//! editor.set_parameters(Default::default());
//! assert!(!editor.check_consistency().passed);
//! editor.fix_consistency();
//! assert_eq!(editor.default_value("OutputDir"), "/renders");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod graph;
pub mod models;
pub mod notify;
pub mod params;
pub mod reconcile;
pub mod template;
pub mod workbench;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    AssetSummaries, CreateResult, DeleteResult, LocalDateTime, OperationStatus, UpdateResult,
};
pub use editor::AssetEditor;
pub use error::{JobkitError, Result};
pub use graph::{DependencyError, StepGraph};
pub use models::{
    Asset, AssetKind, AssetSummary, ConsistencyCheckResult, ConsistencyReport, EnvironmentAsset,
    FixReport, JobAsset, JobValidation, ParameterKind, ShapeDiff, StepAsset,
};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use params::{
    AssetRef, CreateAsset, LinkAssets, ListAssets, ParameterRef, RetargetAsset, SetDependencies,
    SetParameter,
};
pub use reconcile::{FixStrategy, ParameterShape, TemplateBacked};
pub use template::{CachedTemplateLoader, TemplateError, TemplateLoader, YamlTemplateLoader};
pub use workbench::{StoredAsset, Workbench, WorkbenchBuilder};
