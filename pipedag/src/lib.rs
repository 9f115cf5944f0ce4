// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_pipeline_from_file,
    load_pipeline_from_source,
    server_config_from_args,
    write_report,
};

// Re-export report functionality from pipedag-core
pub use pipedag_core::report::{
    PipelineReport, ReportFormat, generate_json_report, generate_text_report,
};
