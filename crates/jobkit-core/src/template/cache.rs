//! Path and modification-time cache in front of a template loader.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::debug;

use super::{EnvironmentTemplate, JobTemplate, StepTemplate, TemplateError, TemplateLoader};

/// File identity a cached entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

#[derive(Debug)]
struct Entry<T> {
    stamp: Stamp,
    value: T,
}

type Slot<T> = RefCell<HashMap<PathBuf, Entry<T>>>;

/// Caches successful loads of an inner loader.
///
/// An entry is reused only while the file's modification time and length are
/// unchanged, so edits on disk are picked up by the next load. Failed loads
/// are never cached.
#[derive(Debug)]
pub struct CachedTemplateLoader<L> {
    inner: L,
    jobs: Slot<JobTemplate>,
    steps: Slot<StepTemplate>,
    environments: Slot<EnvironmentTemplate>,
}

impl<L: TemplateLoader> CachedTemplateLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            jobs: RefCell::default(),
            steps: RefCell::default(),
            environments: RefCell::default(),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Drops every cached template.
    pub fn clear(&self) {
        self.jobs.borrow_mut().clear();
        self.steps.borrow_mut().clear();
        self.environments.borrow_mut().clear();
    }

    fn stamp(&self, path: &Path) -> Result<(PathBuf, Stamp), TemplateError> {
        if path.as_os_str().is_empty() {
            return Err(TemplateError::EmptyPath);
        }
        let resolved = self.inner.resolve(path);
        let metadata = fs::metadata(&resolved).map_err(|source| TemplateError::Io {
            path: resolved.clone(),
            source,
        })?;
        let stamp = Stamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        };
        Ok((resolved, stamp))
    }

    fn cached<T: Clone>(
        &self,
        slot: &Slot<T>,
        path: &Path,
        load: impl FnOnce(&L) -> Result<T, TemplateError>,
    ) -> Result<T, TemplateError> {
        let (resolved, stamp) = self.stamp(path)?;

        if let Some(entry) = slot.borrow().get(&resolved) {
            if entry.stamp == stamp {
                debug!("Template cache hit for {}", resolved.display());
                return Ok(entry.value.clone());
            }
        }

        let value = load(&self.inner)?;
        slot.borrow_mut().insert(
            resolved,
            Entry {
                stamp,
                value: value.clone(),
            },
        );
        Ok(value)
    }
}

impl<L: TemplateLoader> TemplateLoader for CachedTemplateLoader<L> {
    fn load_job(&self, path: &Path) -> Result<JobTemplate, TemplateError> {
        self.cached(&self.jobs, path, |inner| inner.load_job(path))
    }

    fn load_step(&self, path: &Path) -> Result<StepTemplate, TemplateError> {
        self.cached(&self.steps, path, |inner| inner.load_step(path))
    }

    fn load_environment(&self, path: &Path) -> Result<EnvironmentTemplate, TemplateError> {
        self.cached(&self.environments, path, |inner| inner.load_environment(path))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.inner.resolve(path)
    }
}
