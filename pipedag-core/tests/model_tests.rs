// Tests for pipeline deserialization and loading

use pipedag_core::{Pipeline, PipelineError};
use std::io::Write;
use tempfile::NamedTempFile;

const FRONTEND_PAYLOAD: &str = r#"{
    "nodes": [
        {
            "id": "customInput-1",
            "type": "customInput",
            "position": { "x": 100.0, "y": 250.5 },
            "data": { "id": "customInput-1", "nodeType": "customInput" },
            "width": 200,
            "selected": false
        },
        {
            "id": "llm-1",
            "type": "llm",
            "position": { "x": 400, "y": 250 },
            "data": {}
        }
    ],
    "edges": [
        {
            "id": "reactflow__edge-customInput-1value-llm-1prompt",
            "source": "customInput-1",
            "target": "llm-1",
            "sourceHandle": "customInput-1-value",
            "targetHandle": null,
            "animated": true
        }
    ]
}"#;

#[test]
fn test_parse_frontend_payload() {
    let pipeline = Pipeline::from_json_str(FRONTEND_PAYLOAD).unwrap();

    assert_eq!(pipeline.nodes.len(), 2);
    assert_eq!(pipeline.nodes[0].node_type, "customInput");
    assert_eq!(pipeline.nodes[0].position.get("y"), Some(&250.5));
    assert_eq!(pipeline.nodes[1].position.get("x"), Some(&400.0));

    let edge = &pipeline.edges[0];
    assert_eq!(edge.source, "customInput-1");
    assert_eq!(edge.target, "llm-1");
    assert_eq!(edge.source_handle.as_deref(), Some("customInput-1-value"));
    assert_eq!(edge.target_handle, None);
}

#[test]
fn test_missing_handles_default_to_none() {
    let pipeline = Pipeline::from_json_str(
        r#"{"nodes": [], "edges": [{"id": "e", "source": "x", "target": "y"}]}"#,
    )
    .unwrap();
    assert_eq!(pipeline.edges[0].source_handle, None);
    assert_eq!(pipeline.edges[0].target_handle, None);
}

#[test]
fn test_malformed_json_is_syntax_error() {
    let err = Pipeline::from_json_str(r#"{"nodes": [,]}"#).unwrap_err();
    assert!(matches!(err, PipelineError::Syntax { line: 1, .. }));
}

#[test]
fn test_truncated_json_is_syntax_error() {
    let err = Pipeline::from_json_str(r#"{"nodes": ["#).unwrap_err();
    assert!(matches!(err, PipelineError::Syntax { .. }));
}

#[test]
fn test_wrong_field_type_is_shape_error() {
    let err = Pipeline::from_json_str(r#"{"nodes": "nope", "edges": []}"#).unwrap_err();
    assert!(matches!(err, PipelineError::Shape { .. }));
}

#[test]
fn test_missing_edges_is_shape_error() {
    let err = Pipeline::from_json_str(r#"{"nodes": []}"#).unwrap_err();
    match err {
        PipelineError::Shape { message, .. } => assert!(message.contains("edges")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_edge_without_target_is_shape_error() {
    let err = Pipeline::from_json_str(
        r#"{"nodes": [], "edges": [{"id": "e", "source": "x"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Shape { .. }));
}

#[test]
fn test_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(temp_file, "{}", FRONTEND_PAYLOAD)?;

    let pipeline = Pipeline::from_file(temp_file.path())?;
    let result = pipeline.analyze();

    assert_eq!(result.node_count, 2);
    assert_eq!(result.edge_count, 1);
    assert!(result.is_dag);
    Ok(())
}

#[test]
fn test_from_missing_file() {
    let err = Pipeline::from_file(std::path::Path::new("/nonexistent/pipeline.json")).unwrap_err();
    assert!(matches!(err, PipelineError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/pipeline.json"));
}

#[test]
fn test_from_reader() {
    let pipeline = Pipeline::from_reader(FRONTEND_PAYLOAD.as_bytes()).unwrap();
    assert_eq!(pipeline.edges.len(), 1);
}
