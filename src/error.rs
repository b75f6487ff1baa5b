use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub extensions: Option<GraphqlErrorExtensions>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorExtensions {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("extraction failed: no match for `{field}` on {service}")]
    Extraction {
        field: &'static str,
        service: &'static str,
    },

    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("({context}): {status}")]
    Status {
        context: String,
        status: StatusCode,
    },

    #[error("`{field}` is empty; {table} requires it")]
    EmptyField {
        field: &'static str,
        table: &'static str,
    },

    #[error("unknown column `{column}` on {table}")]
    UnknownColumn { table: String, column: String },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("({context}) remote store rejected query:\n{}", format_errors(.errors))]
    Remote {
        context: String,
        errors: Vec<GraphqlError>,
    },

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

fn format_errors(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| {
            let path = e
                .extensions
                .as_ref()
                .and_then(|x| x.path.as_deref())
                .unwrap_or("-");
            format!("{}: {}", path, e.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
