use crate::error::ClientError;
use crate::routes::RootStatus;
use pipedag_core::{AnalysisResult, Pipeline};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

type Result<T> = std::result::Result<T, ClientError>;

/// Talks to a running parse endpoint the way the frontend does
pub struct ParseClient {
    client: Client,
    base: Url,
}

impl ParseClient {
    pub fn new(base: &str) -> Result<Self> {
        Self::with_timeout(base, 10)
    }

    pub fn with_timeout(base: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pipedag/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base: Self::normalize_base(Url::parse(base)?),
        })
    }

    // Endpoints are joined as relative paths, so the base must end in `/`
    // for a prefix such as `/api` to survive the join.
    fn normalize_base(mut base: Url) -> Url {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn status(&self) -> Result<RootStatus> {
        let url = self.base.join("")?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn parse(&self, pipeline: &Pipeline) -> Result<AnalysisResult> {
        let url = self.base.join("pipelines/parse")?;
        debug!(
            "POST {} ({} nodes, {} edges)",
            url,
            pipeline.nodes.len(),
            pipeline.edges.len()
        );
        let response = self.client.post(url).json(pipeline).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipedag_core::{Edge, Node};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    #[tokio::test]
    async fn test_parse_posts_pipeline() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipelines/parse"))
            .and(body_string_contains(r#""source":"a","target":"b""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "num_nodes": 2,
                "num_edges": 1,
                "is_dag": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ParseClient::new(&mock_server.uri()).unwrap();
        let pipeline = Pipeline::new(
            vec![Node::new("a"), Node::new("b")],
            vec![Edge::new("a", "b")],
        );

        let result = client.parse(&pipeline).await.unwrap();
        assert_eq!(result.node_count, 2);
        assert_eq!(result.edge_count, 1);
        assert!(result.is_dag);
    }

    #[tokio::test]
    async fn test_parse_maps_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipelines/parse"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad body"))
            .mount(&mock_server)
            .await;

        let client = ParseClient::new(&mock_server.uri()).unwrap();
        let err = client.parse(&Pipeline::default()).await.unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "bad body");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Pipeline Parser API",
                "status": "running"
            })))
            .mount(&mock_server)
            .await;

        let client = ParseClient::new(&mock_server.uri()).unwrap();
        let status = client.status().await.unwrap();
        assert_eq!(status.status, "running");
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/pipelines/parse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "num_nodes": 0,
                "num_edges": 0,
                "is_dag": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Pipeline Parser API",
                "status": "running"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        for base in [
            format!("{}/api", mock_server.uri()),
            format!("{}/api/", mock_server.uri()),
        ] {
            let client = ParseClient::new(&base).unwrap();
            assert_eq!(client.base_url().path(), "/api/");
        }

        let client = ParseClient::new(&format!("{}/api", mock_server.uri())).unwrap();
        let result = client.parse(&Pipeline::default()).await.unwrap();
        assert!(result.is_dag);
        let status = client.status().await.unwrap();
        assert_eq!(status.status, "running");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ParseClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
