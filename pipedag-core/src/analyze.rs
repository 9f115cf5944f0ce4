use crate::graph::PipelineGraph;
use crate::model::{Edge, Node, Pipeline};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structural summary of a pipeline.
///
/// Serialized with the field names the frontend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "num_nodes")]
    pub node_count: usize,
    #[serde(rename = "num_edges")]
    pub edge_count: usize,
    pub is_dag: bool,
}

/// Counts the declared nodes and edges and checks the edge graph for cycles.
///
/// Total over any input: dangling edge endpoints become vertices, duplicate
/// node ids collapse, and no error is ever returned.
pub fn analyze(nodes: &[Node], edges: &[Edge]) -> AnalysisResult {
    let is_dag = if edges.is_empty() {
        true
    } else {
        PipelineGraph::from_pipeline(nodes, edges).is_dag()
    };

    debug!(
        "Analyzed pipeline: {} nodes, {} edges, dag={}",
        nodes.len(),
        edges.len(),
        is_dag
    );

    AnalysisResult {
        node_count: nodes.len(),
        edge_count: edges.len(),
        is_dag,
    }
}

impl Pipeline {
    pub fn analyze(&self) -> AnalysisResult {
        analyze(&self.nodes, &self.edges)
    }
}
