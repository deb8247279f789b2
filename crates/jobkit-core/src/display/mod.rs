//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds wrapper types for collections and operation results so
//! every command produces consistent markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Result Wrappers │    │    Markdown     │
//! │ (Asset, Report) │───▶│ & Collections   │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (AssetSummaries)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use jobkit_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::{Asset, JobAsset},
//! };
//!
//! let job = Asset::from(JobAsset::new("Render Job", "job.yml"));
//! let output = UpdateResult::with_changes(job, vec!["Retargeted template".to_string()]);
//! assert!(output.to_string().contains("Changes made:"));
//!
//! let status = OperationStatus::success("Unlinked 1 asset");
//! assert_eq!(status.to_string(), "Success: Unlinked 1 asset\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::AssetSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
