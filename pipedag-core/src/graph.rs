//! Directed graph over pipeline node ids.
//!
//! Vertices come from the declared nodes and from every edge endpoint, so an
//! edge pointing at an undeclared id simply introduces a new vertex. Parallel
//! arcs are kept; they never change the cycle verdict.

use crate::model::{Edge, Node};
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

pub struct PipelineGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl PipelineGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_pipeline(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_vertex(&node.id);
        }
        for edge in edges {
            graph.add_arc(&edge.source, &edge.target);
        }
        debug!(
            "Built pipeline graph: {} vertices, {} arcs",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Interns `id`, returning the existing index when already present
    pub fn add_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            trace!("Vertex already exists: {}", id);
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    pub fn add_arc(&mut self, source: &str, target: &str) {
        let from = self.add_vertex(source);
        let to = self.add_vertex(target);
        self.graph.add_edge(from, to, ());
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_arc(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    // toposort keeps its own stack, so chain length is bounded by memory only
    pub fn is_dag(&self) -> bool {
        self.graph.edge_count() == 0 || toposort(&self.graph, None).is_ok()
    }

    /// Vertex ids ordered so every arc points forward, or `None` on a cycle
    pub fn topological_order(&self) -> Option<Vec<String>> {
        match toposort(&self.graph, None) {
            Ok(order) => Some(order.into_iter().map(|idx| self.label(idx)).collect()),
            Err(cycle) => {
                debug!("Topological sort hit a cycle at {}", self.label(cycle.node_id()));
                None
            }
        }
    }

    /// Returns one cycle `[v0, .., vk]` where each vertex has an arc to the
    /// next one and `vk` has an arc back to `v0`. A self-loop yields `[v]`.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        for component in kosaraju_scc(&self.graph) {
            if component.len() == 1 {
                let v = component[0];
                if self.graph.contains_edge(v, v) {
                    return Some(vec![self.label(v)]);
                }
                continue;
            }

            let members: HashSet<NodeIndex> = component.iter().copied().collect();
            if let Some(path) = self.cycle_within(component[0], &members) {
                return Some(path.into_iter().map(|idx| self.label(idx)).collect());
            }
        }
        None
    }

    // Every vertex of a non-trivial strongly connected component lies on a
    // cycle, so walking arcs inside the component from `start` must revisit
    // some vertex; the walk from that vertex onward is the cycle.
    fn cycle_within(&self, start: NodeIndex, members: &HashSet<NodeIndex>) -> Option<Vec<NodeIndex>> {
        let mut path = Vec::new();
        let mut position: HashMap<NodeIndex, usize> = HashMap::new();
        let mut current = start;

        loop {
            if let Some(&at) = position.get(&current) {
                return Some(path.split_off(at));
            }
            position.insert(current, path.len());
            path.push(current);
            current = self
                .graph
                .neighbors(current)
                .find(|next| members.contains(next))?;
        }
    }

    fn label(&self, idx: NodeIndex) -> String {
        self.graph[idx].clone()
    }
}

impl Default for PipelineGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge endpoints that were never declared as nodes, in order of first use
pub fn dangling_references(nodes: &[Node], edges: &[Edge]) -> Vec<String> {
    let declared: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut dangling = Vec::new();

    for edge in edges {
        for endpoint in [edge.source.as_str(), edge.target.as_str()] {
            if !declared.contains(endpoint) && seen.insert(endpoint) {
                dangling.push(endpoint.to_string());
            }
        }
    }

    dangling
}
