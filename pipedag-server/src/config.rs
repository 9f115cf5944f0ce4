use crate::error::{Result, ServerError};
use axum::http::{HeaderValue, Method};
use std::fmt;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsPolicy {
    /// Any origin, no credentials. Intended for local development.
    #[default]
    AllowAll,
    /// Only the listed origins, credentials allowed
    Origins(Vec<String>),
}

impl CorsPolicy {
    pub fn from_origins(origins: Vec<String>) -> Self {
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::AllowAll
        } else {
            CorsPolicy::Origins(origins)
        }
    }

    pub fn layer(&self) -> Result<CorsLayer> {
        match self {
            CorsPolicy::AllowAll => Ok(CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)),
            CorsPolicy::Origins(origins) => {
                let values = origins
                    .iter()
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .map_err(|_| ServerError::InvalidOrigin(origin.clone()))
                    })
                    .collect::<Result<Vec<_>>>()?;

                // wildcards are not allowed together with credentials
                Ok(CorsLayer::new()
                    .allow_origin(AllowOrigin::list(values))
                    .allow_methods(AllowMethods::list([
                        Method::GET,
                        Method::POST,
                        Method::OPTIONS,
                    ]))
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true))
            }
        }
    }
}

impl fmt::Display for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsPolicy::AllowAll => write!(f, "all origins"),
            CorsPolicy::Origins(origins) => write!(f, "{}", origins.join(", ")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsPolicy,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cors: CorsPolicy::AllowAll,
        }
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
