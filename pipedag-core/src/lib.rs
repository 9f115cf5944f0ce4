pub mod analyze;
pub mod error;
pub mod graph;
pub mod model;
pub mod report;

pub use analyze::{AnalysisResult, analyze};
pub use error::PipelineError;
pub use graph::PipelineGraph;
pub use model::{Edge, Node, Pipeline};

/// Printed to stderr so report output on stdout stays pipeable
pub fn print_banner() {
    eprintln!(
        "\n  pipedag v{}\n  pipeline graph validation\n",
        env!("CARGO_PKG_VERSION")
    );
}
