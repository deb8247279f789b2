//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::AssetSummary;

/// Newtype wrapper for displaying a listing of stored assets.
///
/// # Examples
///
/// ```rust
/// use jobkit_core::{
///     display::AssetSummaries,
///     models::{AssetKind, AssetSummary},
/// };
/// use jiff::Timestamp;
///
/// let summary = AssetSummary {
///     id: 1,
///     kind: AssetKind::Job,
///     name: "Render Job".to_string(),
///     template_path: "job.yml".to_string(),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = AssetSummaries(vec![summary]).to_string();
/// assert!(output.contains("Render Job"));
/// ```
pub struct AssetSummaries(pub Vec<AssetSummary>);

impl AssetSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&AssetSummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetSummary> {
        self.0.iter()
    }
}

impl Index<usize> for AssetSummaries {
    type Output = AssetSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for AssetSummaries {
    type Item = AssetSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AssetSummaries {
    type Item = &'a AssetSummary;
    type IntoIter = std::slice::Iter<'a, AssetSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for AssetSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No assets found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}
