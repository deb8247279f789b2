//! Step dependency graph.
//!
//! Steps name the steps they depend on. The graph is validated whenever a
//! dependency is edited and before a job is accepted for submission: every
//! dependency must name a known step, no step may depend on itself, and the
//! graph must be acyclic.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::models::StepAsset;

/// Reasons a set of step dependencies is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Step '{0}' is defined more than once")]
    DuplicateStep(String),
    #[error("Step '{0}' depends on itself")]
    SelfDependency(String),
    #[error("Step '{step}' depends on unknown step '{dependency}'")]
    UnknownStep { step: String, dependency: String },
    #[error("Dependency cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Directed graph of step names to the names they depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl StepGraph {
    /// Builds the graph from step assets keyed by name.
    ///
    /// # Errors
    ///
    /// Returns `DependencyError::DuplicateStep` if two steps share a name.
    pub fn from_steps<'a, I>(steps: I) -> Result<Self, DependencyError>
    where
        I: IntoIterator<Item = &'a StepAsset>,
    {
        let mut edges = BTreeMap::new();
        for step in steps {
            if edges
                .insert(step.name.clone(), step.depends_on.clone())
                .is_some()
            {
                return Err(DependencyError::DuplicateStep(step.name.clone()));
            }
        }
        Ok(Self { edges })
    }

    /// Subgraph holding `root` and every step it transitively depends on.
    ///
    /// Dependencies that name no step stay as edges so that
    /// [`validate`](Self::validate) still reports them.
    pub fn reachable_from(&self, root: &str) -> Self {
        let mut edges = BTreeMap::new();
        let mut pending = vec![root];
        while let Some(step) = pending.pop() {
            if edges.contains_key(step) {
                continue;
            }
            let Some(dependencies) = self.edges.get(step) else {
                continue;
            };
            pending.extend(dependencies.iter().map(String::as_str));
            edges.insert(step.to_string(), dependencies.clone());
        }
        Self { edges }
    }

    /// Checks the graph and returns an execution order in which every step
    /// comes after all of its dependencies. Independent steps are ordered by
    /// name.
    ///
    /// # Errors
    ///
    /// Returns the first `SelfDependency`, `UnknownStep` or `Cycle` found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jobkit_core::{graph::StepGraph, models::StepAsset};
    ///
    /// let mut composite = StepAsset::new("Composite", "composite.yml");
    /// composite.depends_on = vec!["Render".to_string()];
    /// let render = StepAsset::new("Render", "render.yml");
    ///
    /// let graph = StepGraph::from_steps([&composite, &render]).unwrap();
    /// assert_eq!(graph.validate().unwrap(), vec!["Render", "Composite"]);
    /// ```
    pub fn validate(&self) -> Result<Vec<String>, DependencyError> {
        for (step, dependencies) in &self.edges {
            for dependency in dependencies {
                if dependency == step {
                    return Err(DependencyError::SelfDependency(step.clone()));
                }
                if !self.edges.contains_key(dependency) {
                    return Err(DependencyError::UnknownStep {
                        step: step.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let mut marks = HashMap::new();
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(self.edges.len());
        for step in self.edges.keys() {
            self.visit(step, &mut marks, &mut path, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'g>(
        &'g self,
        step: &'g str,
        marks: &mut HashMap<&'g str, Mark>,
        path: &mut Vec<&'g str>,
        order: &mut Vec<String>,
    ) -> Result<(), DependencyError> {
        match marks.get(step) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|s| *s == step).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                cycle.push(step.to_string());
                return Err(DependencyError::Cycle { path: cycle });
            }
            None => {}
        }

        marks.insert(step, Mark::Visiting);
        path.push(step);
        for dependency in self.edges.get(step).into_iter().flatten() {
            self.visit(dependency, marks, path, order)?;
        }
        path.pop();
        marks.insert(step, Mark::Done);
        order.push(step.to_string());
        Ok(())
    }
}
