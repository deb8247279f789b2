//! Data models for job, step and environment assets.
//!
//! This module contains the domain models of the jobkit system: parameter
//! definitions, the three parameter set shapes, the data assets that own them,
//! and the transient results produced by consistency checks. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep data structures apart from presentation.
//!
//! # Parameter set shapes
//!
//! | Asset | Shape | Entry |
//! |-------|-------|-------|
//! | [`JobAsset`] | [`JobParameters`] (ordered) | [`ParameterDefinition`] |
//! | [`StepAsset`] | [`StepParameters`] (ordered) | [`StepTaskParameterDefinition`] |
//! | [`EnvironmentAsset`] | [`EnvironmentVariables`] (keyed) | name → value |
//!
//! Step task ranges are positional: entry `i` is the value for task `i`.
//!
//! # Examples
//!
//! ```rust
//! use jobkit_core::models::{JobAsset, ParameterDefinition, ParameterKind};
//!
//! let mut job = JobAsset::new("Render", "templates/job.yml");
//! job.parameters.0.push(ParameterDefinition::int("Priority", 50));
//!
//! assert_eq!(job.parameters.get("Priority").unwrap().kind, ParameterKind::Int);
//! assert!(job.parameters.set_value("Priority", "75").unwrap());
//! assert!(job.parameters.set_value("Priority", "high").is_err());
//! ```

pub mod asset;
pub mod consistency;
pub mod kind;
pub mod parameter;


pub use asset::{Asset, AssetSummary, EnvironmentAsset, JobAsset, StepAsset};
pub use consistency::{
    ConsistencyCheckResult, ConsistencyReport, FixReport, JobValidation, ShapeDiff, ShapeKey,
};
pub use kind::{AssetKind, ParameterKind};
pub use parameter::{
    EnvironmentVariables, JobParameters, ParameterDefinition, ParameterValue, StepParameters,
    StepTaskParameterDefinition,
};
