//! Parameter store for one data asset.
//!
//! [`AssetEditor`] holds an asset while it is being edited and exposes the
//! operations a detail panel needs: reading and replacing parameters,
//! (re)loading the template, checking and fixing consistency, and comparing
//! or resetting single parameters against the template default.
//!
//! Every check, fix and default lookup re-reads the template through the
//! configured [`TemplateLoader`]. A template that cannot be read counts as an
//! empty expected set; the failure is logged, never raised.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    error::{JobkitError, Result},
    models::{ConsistencyCheckResult, ConsistencyReport, ShapeDiff},
    notify::{ChangeNotifier, SubscriptionId},
    reconcile::{self, FixStrategy, ParameterShape, TemplateBacked},
    template::TemplateLoader,
};


/// Editable view over a template-backed asset.
pub struct AssetEditor<'l, A: TemplateBacked> {
    asset: A,
    loader: &'l dyn TemplateLoader,
    notifier: ChangeNotifier,
    fix_strategy: FixStrategy,
}

impl<'l, A: TemplateBacked> AssetEditor<'l, A> {
    pub fn new(asset: A, loader: &'l dyn TemplateLoader) -> Self {
        Self {
            asset,
            loader,
            notifier: ChangeNotifier::new(),
            fix_strategy: FixStrategy::default(),
        }
    }

    pub fn with_fix_strategy(mut self, strategy: FixStrategy) -> Self {
        self.fix_strategy = strategy;
        self
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn into_asset(self) -> A {
        self.asset
    }

    pub fn template_path(&self) -> &Path {
        self.asset.template_path()
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Registers an observer fired on template reload, fix and reset.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Current parameter set; empty if never loaded.
    pub fn parameters(&self) -> &A::Shape {
        self.asset.parameters()
    }

    /// Replaces the parameter set wholesale without notifying observers.
    pub fn set_parameters(&mut self, parameters: A::Shape) {
        *self.asset.parameters_mut() = parameters;
    }

    /// Points the asset at `path` and replaces its parameters with the
    /// template's.
    ///
    /// If the template cannot be read the path is still updated, the
    /// parameters are left unchanged and a warning is logged.
    pub fn load_from_template<P: AsRef<Path>>(&mut self, path: P) -> &A::Shape {
        let loaded = self.try_load_from_template(path).map(|_| ());
        if let Err(e) = loaded {
            warn!(
                "Keeping current parameters of {} '{}': {e}",
                self.asset.kind(),
                self.asset.name()
            );
        }
        self.asset.parameters()
    }

    /// Like [`load_from_template`](Self::load_from_template) but surfaces the
    /// loader error.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::Template` if the template cannot be read. The
    /// path is updated regardless.
    pub fn try_load_from_template<P: AsRef<Path>>(&mut self, path: P) -> Result<&A::Shape> {
        let path: PathBuf = path.as_ref().to_path_buf();
        self.asset.set_template_path(path.clone());

        let contents = A::Shape::load_expected(self.loader, &path)?;
        self.asset.apply_template(contents);
        self.notifier.notify();
        Ok(self.asset.parameters())
    }

    /// Re-points the template path; changing it always reloads.
    pub fn set_template_path<P: AsRef<Path>>(&mut self, path: P) -> &A::Shape {
        self.load_from_template(path)
    }

    /// Fresh read of the expected set, empty if the template is unreadable.
    pub fn expected(&self) -> A::Shape {
        match A::Shape::load_expected(self.loader, self.asset.template_path()) {
            Ok(contents) => contents.parameters,
            Err(e) => {
                warn!(
                    "Treating template of {} '{}' as empty: {e}",
                    self.asset.kind(),
                    self.asset.name()
                );
                A::Shape::default()
            }
        }
    }

    /// Compares the current parameters against the template.
    pub fn check_consistency(&self) -> ConsistencyCheckResult {
        let result = reconcile::check_consistency(self.asset.parameters(), &self.expected());
        if result.passed {
            info!(
                "{} '{}' is consistent with its template",
                self.asset.kind(),
                self.asset.name()
            );
        } else {
            warn!(
                "{} '{}' is not consistent with its template: {}",
                self.asset.kind(),
                self.asset.name(),
                result.reason
            );
        }
        result
    }

    /// Divergence between the current parameters and the template.
    pub fn diff(&self) -> ShapeDiff {
        reconcile::diff(self.asset.parameters(), &self.expected())
    }

    /// Check result, diff and non-default names from a single template read.
    pub fn report(&self) -> ConsistencyReport {
        let expected = self.expected();
        let current = self.asset.parameters();
        ConsistencyReport {
            kind: self.asset.kind(),
            name: self.asset.name().to_string(),
            result: reconcile::check_consistency(current, &expected),
            diff: reconcile::diff(current, &expected),
            non_default: non_default_names(current, &expected),
        }
    }

    /// Brings the parameters back in line with the template and notifies
    /// observers once. Returns the divergence that was repaired.
    pub fn fix_consistency(&mut self) -> ShapeDiff {
        let expected = self.expected();
        let repaired = reconcile::diff(self.asset.parameters(), &expected);
        let fixed = reconcile::fix(self.asset.parameters(), expected, self.fix_strategy);
        *self.asset.parameters_mut() = fixed;

        info!(
            "Fixed {} '{}' ({} added, {} removed, {} retyped)",
            self.asset.kind(),
            self.asset.name(),
            repaired.missing_in_asset.len(),
            repaired.missing_in_template.len(),
            repaired.kind_changed.len()
        );
        self.notifier.notify();
        repaired
    }

    /// Template default of `name`, or an empty string if the template does
    /// not declare it. Step ranges are joined with `,`.
    pub fn default_value(&self, name: &str) -> String {
        self.expected().entry_value(name).unwrap_or_default()
    }

    /// Whether `name` still holds its template default.
    ///
    /// A parameter the template no longer declares counts as default.
    pub fn is_parameter_default(&self, name: &str) -> bool {
        self.asset
            .parameters()
            .entry_is_default(name, &self.expected())
    }

    /// Resets one parameter to its template default and notifies observers.
    /// A parameter the template no longer declares is cleared instead.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::ParameterNotFound` if the current set has no
    /// parameter called `name`.
    pub fn reset_parameter(&mut self, name: &str) -> Result<()> {
        let expected = self.expected();
        if !self.asset.parameters_mut().reset_entry(name, &expected) {
            return Err(JobkitError::ParameterNotFound {
                kind: self.asset.kind(),
                asset: self.asset.name().to_string(),
                parameter: name.to_string(),
            });
        }
        self.notifier.notify();
        Ok(())
    }

    /// Names of current parameters that differ from their template default.
    pub fn non_default_parameters(&self) -> Vec<String> {
        non_default_names(self.asset.parameters(), &self.expected())
    }
}

fn non_default_names<S: ParameterShape>(current: &S, expected: &S) -> Vec<String> {
    current
        .entry_names()
        .into_iter()
        .filter(|name| !current.entry_is_default(name, expected))
        .map(str::to_string)
        .collect()
}
