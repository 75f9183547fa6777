//! HTTP source: one GET against the archive proxy.
//!
//! The proxy answers with a JSON array of raw records. Non-2xx statuses,
//! transport failures, timeouts and malformed bodies all surface as
//! [`ArchiveError`] variants; nothing here retries.

use crate::{error::ArchiveError, source::ArchiveSource};
use bytes::Bytes;
use exo_core::RawRecord;
use http_body_util::{BodyExt, Empty};
use hyper::{header, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), timeout }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn uri(&self) -> Result<Uri, ArchiveError> {
        self.url.parse::<Uri>().map_err(|e| ArchiveError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }

    async fn get(&self, uri: Uri) -> Result<Bytes, ArchiveError> {
        let client: Client<HttpConnector, Empty<Bytes>> =
            Client::builder(TokioExecutor::new()).build_http();

        let request = Request::get(uri)
            .header(header::ACCEPT, "application/json")
            .body(Empty::new())
            .map_err(|e| ArchiveError::Transport(e.to_string()))?;

        let response = client
            .request(request)
            .await
            .map_err(|e| ArchiveError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status(status.as_u16()));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ArchiveError::Transport(e.to_string()))?;
        Ok(body.to_bytes())
    }
}

impl ArchiveSource for HttpSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ArchiveError> {
        let uri = self.uri()?;
        tracing::debug!(url = %self.url, "fetching archive");

        let body = tokio::time::timeout(self.timeout, self.get(uri))
            .await
            .map_err(|_| ArchiveError::Timeout(self.timeout))??;

        let records: Vec<RawRecord> = serde_json::from_slice(&body)?;
        tracing::info!(url = %self.url, records = records.len(), bytes = body.len(), "archive fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_is_rejected_before_any_io() {
        let err = HttpSource::new("not a url", Duration::from_secs(1))
            .fetch_records()
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidUrl { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = HttpSource::new(format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
            .fetch_records()
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Transport(_)), "got {err:?}");
    }
}
