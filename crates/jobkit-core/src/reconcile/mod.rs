//! Parameter consistency reconciliation.
//!
//! The checker and fixer are written once against [`ParameterShape`]; the
//! three parameter set types plug in through thin adapters in [`shapes`].
//! Data assets expose their shape through [`TemplateBacked`].

use std::path::{Path, PathBuf};

use crate::{
    models::{
        AssetKind, EnvironmentAsset, EnvironmentVariables, JobAsset, JobParameters, ParameterKind,
        StepAsset, StepParameters,
    },
    template::{TemplateError, TemplateLoader},
};

pub mod checker;
pub mod fixer;
pub mod shapes;

pub use checker::{check_consistency, diff};
pub use fixer::{fix, FixStrategy};

/// Everything a template load yields for one shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateContents<S> {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parameters: S,
}

/// A reconcilable parameter set.
pub trait ParameterShape: Clone + Default + PartialEq + std::fmt::Debug {
    /// Asset kind whose templates produce this shape.
    const KIND: AssetKind;

    /// Reads the expected set from the template at `path`.
    fn load_expected(
        loader: &dyn TemplateLoader,
        path: &Path,
    ) -> Result<TemplateContents<Self>, TemplateError>;

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Entry names, in set order.
    fn entry_names(&self) -> Vec<&str>;

    fn contains(&self, name: &str) -> bool {
        self.entry_names().contains(&name)
    }

    /// Declared kind of an entry, `None` for untyped entries or a missing name.
    fn entry_kind(&self, name: &str) -> Option<ParameterKind>;

    /// Encoded value of an entry; step ranges are joined with `,`.
    fn entry_value(&self, name: &str) -> Option<String>;

    /// Whether this set's entry `name` equals the expected entry.
    ///
    /// `true` when `expected` has no such entry.
    fn entry_is_default(&self, name: &str, expected: &Self) -> bool;

    /// Copies the expected entry into this set, or clears the value when the
    /// template lacks it. Returns `false` when this set has no such entry.
    fn reset_entry(&mut self, name: &str, expected: &Self) -> bool;

    /// Builds the template-shaped set, keeping this set's values for entries
    /// whose name and kind still match.
    fn preserve_overrides(&self, expected: Self) -> Self;
}

/// A data asset whose parameters are defined by a template file.
pub trait TemplateBacked {
    type Shape: ParameterShape;

    fn name(&self) -> &str;

    fn template_path(&self) -> &Path;

    fn set_template_path(&mut self, path: PathBuf);

    fn parameters(&self) -> &Self::Shape;

    fn parameters_mut(&mut self) -> &mut Self::Shape;

    /// Adopts a freshly loaded template.
    fn apply_template(&mut self, contents: TemplateContents<Self::Shape>) {
        *self.parameters_mut() = contents.parameters;
    }

    fn kind(&self) -> AssetKind {
        Self::Shape::KIND
    }
}

impl TemplateBacked for JobAsset {
    type Shape = JobParameters;

    fn name(&self) -> &str {
        &self.name
    }

    fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn set_template_path(&mut self, path: PathBuf) {
        self.template_path = path;
    }

    fn parameters(&self) -> &Self::Shape {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Self::Shape {
        &mut self.parameters
    }
}

impl TemplateBacked for StepAsset {
    type Shape = StepParameters;

    fn name(&self) -> &str {
        &self.name
    }

    fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn set_template_path(&mut self, path: PathBuf) {
        self.template_path = path;
    }

    fn parameters(&self) -> &Self::Shape {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut Self::Shape {
        &mut self.parameters
    }
}

impl TemplateBacked for EnvironmentAsset {
    type Shape = EnvironmentVariables;

    fn name(&self) -> &str {
        &self.name
    }

    fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn set_template_path(&mut self, path: PathBuf) {
        self.template_path = path;
    }

    fn parameters(&self) -> &Self::Shape {
        &self.variables
    }

    fn parameters_mut(&mut self) -> &mut Self::Shape {
        &mut self.variables
    }

    fn apply_template(&mut self, contents: TemplateContents<Self::Shape>) {
        if let Some(description) = contents.description {
            self.description = description;
        }
        self.variables = contents.parameters;
    }
}
