use super::{SearchRequest, SearchResponseBody, SearchTransport};
use crate::error::TransportError;
use async_trait::async_trait;
use surf::Client;
use utils::endpoint::Endpoint;
use utils::surf_logging::SurfLogging;

/// [`SearchTransport`] that POSTs JSON to the search endpoint with surf
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            http: Client::new().with(SurfLogging),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponseBody, TransportError> {
        let mut response = self
            .http
            .post(self.endpoint.as_str())
            .body_json(request)
            .map_err(|e| TransportError::Http(e.to_string()))?
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_string().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.into(),
                body,
            });
        }

        response
            .body_json::<SearchResponseBody>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
