//! Builder for creating and configuring Workbench instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Workbench;
use crate::{
    db::Database,
    error::{JobkitError, Result},
    reconcile::FixStrategy,
    template::{CachedTemplateLoader, TemplateLoader, YamlTemplateLoader},
};

/// Builder for creating and configuring Workbench instances.
#[derive(Debug, Clone, Default)]
pub struct WorkbenchBuilder {
    database_path: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    cache_templates: bool,
    fix_strategy: FixStrategy,
}

impl WorkbenchBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/jobkit/jobkit.db` or `~/.local/share/jobkit/jobkit.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the directory relative template paths are resolved against.
    pub fn with_templates_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.templates_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Reuses parsed templates while the file on disk is unchanged.
    pub fn with_template_cache(mut self, enabled: bool) -> Self {
        self.cache_templates = enabled;
        self
    }

    pub fn with_fix_strategy(mut self, strategy: FixStrategy) -> Self {
        self.fix_strategy = strategy;
        self
    }

    /// Builds the configured workbench.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::XdgDirectory` if no default database location
    /// can be determined, `JobkitError::FileSystem` if its directory cannot be
    /// created and `JobkitError::Database` if the library cannot be opened.
    pub fn build(self) -> Result<Workbench> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| JobkitError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        debug!("Opening asset library at {}", db_path.display());
        let db = Database::new(&db_path)?;

        let yaml = YamlTemplateLoader::new().with_templates_dir(self.templates_dir);
        let loader: Box<dyn TemplateLoader> = if self.cache_templates {
            Box::new(CachedTemplateLoader::new(yaml))
        } else {
            Box::new(yaml)
        };

        Ok(Workbench::new(db, loader, self.fix_strategy))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("jobkit")
            .place_data_file("jobkit.db")
            .map_err(|e| JobkitError::XdgDirectory(e.to_string()))
    }
}
