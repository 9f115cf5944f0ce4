use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read pipeline file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid pipeline at line {line}, column {column}: {message}")]
    Shape {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let (line, column) = (e.line(), e.column());
        match e.classify() {
            Category::Io => PipelineError::Io(e.into()),
            Category::Syntax | Category::Eof => PipelineError::Syntax {
                line,
                column,
                message: e.to_string(),
            },
            Category::Data => PipelineError::Shape {
                line,
                column,
                message: e.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
