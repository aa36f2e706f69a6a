//! Install graph management using `petgraph`.
//!
//! Builds a directed acyclic graph from `install` statements and resolves
//! the order in which definition files must be built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bindery_common::error::{BinderyError, Result};
use petgraph::graph::NodeIndex;

/// A graph of definition files linked by `install` statements.
#[derive(Debug, Default)]
pub struct InstallGraph {
    graph: petgraph::Graph<PathBuf, ()>,
    nodes: BTreeMap<PathBuf, NodeIndex>,
}

impl InstallGraph {
    /// Creates an empty install graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file node, returning the existing node if already present.
    pub fn add_file(&mut self, path: &Path) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_path_buf());
        let _ = self.nodes.insert(path.to_path_buf(), idx);
        idx
    }

    /// Records that `installer` installs `installed`.
    ///
    /// The edge points from `installed` to `installer` so that topological
    /// sort yields installed files first.
    pub fn add_install(&mut self, installer: NodeIndex, installed: NodeIndex) {
        let _ = self.graph.add_edge(installed, installer, ());
    }

    /// Number of files in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if no file was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the build order: every file after all files it installs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming a file on the cycle if installs
    /// are cyclic.
    pub fn build_order(&self) -> Result<Vec<PathBuf>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let file = self
                    .graph
                    .node_weight(cycle.node_id())
                    .map_or_else(String::new, |p| p.display().to_string());
                Err(BinderyError::configuration(format!(
                    "cyclic install detected at {file}"
                )))
            }
        }
    }
}
