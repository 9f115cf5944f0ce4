// Report generation for a single pipeline analysis

use crate::analyze::AnalysisResult;
use crate::graph::{PipelineGraph, dangling_references};
use crate::model::Pipeline;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub result: AnalysisResult,
    pub vertex_count: usize,
    pub dangling_references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topological_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
}

impl PipelineReport {
    pub fn build(pipeline: &Pipeline) -> Self {
        let result = pipeline.analyze();
        let graph = PipelineGraph::from_pipeline(&pipeline.nodes, &pipeline.edges);

        let (topological_order, cycle) = if result.is_dag {
            (graph.topological_order(), None)
        } else {
            (None, graph.find_cycle())
        };

        Self {
            result,
            vertex_count: graph.vertex_count(),
            dangling_references: dangling_references(&pipeline.nodes, &pipeline.edges),
            topological_order,
            cycle,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(generate_text_report(self)),
            ReportFormat::Json => generate_json_report(self),
        }
    }
}

pub fn generate_text_report(report: &PipelineReport) -> String {
    let rule = "━".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("{}\n", rule));
    out.push_str("                 PIPELINE ANALYSIS REPORT\n");
    out.push_str(&format!("{}\n\n", rule));

    out.push_str(&format!("Nodes:        {}\n", report.result.node_count));
    out.push_str(&format!("Edges:        {}\n", report.result.edge_count));
    out.push_str(&format!("Vertices:     {}\n", report.vertex_count));
    out.push_str(&format!(
        "DAG:          {}\n",
        if report.result.is_dag { "yes" } else { "no" }
    ));
    out.push('\n');

    if !report.dangling_references.is_empty() {
        out.push_str("Undeclared node ids referenced by edges:\n");
        for id in &report.dangling_references {
            out.push_str(&format!("  • {}\n", id));
        }
        out.push('\n');
    }

    if let Some(ref order) = report.topological_order {
        if !order.is_empty() {
            out.push_str("Execution order:\n");
            for (idx, id) in order.iter().enumerate() {
                out.push_str(&format!("  {:>3}. {}\n", idx + 1, id));
            }
            out.push('\n');
        }
    }

    if let Some(ref cycle) = report.cycle {
        out.push_str("Cycle detected:\n");
        out.push_str(&format!("  {}\n\n", format_cycle(cycle)));
    }

    out.push_str(&format!("{}\n", rule));
    out
}

pub fn generate_json_report(report: &PipelineReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "pipedag",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
            },
            "num_nodes": report.result.node_count,
            "num_edges": report.result.edge_count,
            "is_dag": report.result.is_dag,
            "vertex_count": report.vertex_count,
            "dangling_references": report.dangling_references,
            "topological_order": report.topological_order,
            "cycle": report.cycle,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// Renders a cycle as `a → b → c → a`
pub fn format_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => {
            let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
            parts.push(first);
            parts.join(" → ")
        }
        None => String::new(),
    }
}
