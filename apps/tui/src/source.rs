use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use wind_overlay_core::{DataFetchError, Dataset, DatasetKey};

use crate::config::SourceConfig;

/// Static dataset host: a web origin or a directory holding the same files.
#[derive(Debug, Clone)]
pub enum DataSource {
    Http { client: Client, base_url: String },
    Directory(PathBuf),
}

impl DataSource {
    pub fn from_config(config: &SourceConfig, timeout: Duration) -> Result<Self, DataFetchError> {
        match config {
            SourceConfig::Http { base_url } => {
                let client = Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| DataFetchError::Network(e.to_string()))?;
                Ok(Self::Http {
                    client,
                    base_url: base_url.clone(),
                })
            }
            SourceConfig::Directory(dir) => Ok(Self::Directory(dir.clone())),
        }
    }

    pub fn describe(&self, key: &DatasetKey) -> String {
        match self {
            Self::Http { base_url, .. } => request_url(base_url, key),
            Self::Directory(dir) => dir.join(key.file_name()).display().to_string(),
        }
    }

    #[instrument(skip_all, fields(key = %key))]
    pub async fn fetch(&self, key: &DatasetKey) -> Result<Dataset, DataFetchError> {
        match self {
            Self::Http { client, base_url } => {
                let url = request_url(base_url, key);
                debug!(%url, "requesting dataset");

                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| DataFetchError::Network(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(DataFetchError::Status {
                        status: status.as_u16(),
                        path: key.asset_path(),
                    });
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| DataFetchError::Network(e.to_string()))?;
                Dataset::from_json(&body)
            }
            Self::Directory(dir) => {
                let path = dir.join(key.file_name());
                debug!(path = %path.display(), "reading dataset");
                let body = tokio::fs::read(&path).await?;
                Dataset::from_json(&body)
            }
        }
    }
}

pub fn request_url(base_url: &str, key: &DatasetKey) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), key.asset_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use wind_overlay_core::{Direction, Point, Speed};

    /// Serves one canned HTTP response and hands back the request line.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn http_source(base_url: String) -> DataSource {
        DataSource::from_config(&SourceConfig::Http { base_url }, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn request_url_joins_without_double_slash() {
        let key = DatasetKey::new(Speed::FiveMs, Direction::North);
        assert_eq!(
            request_url("http://localhost:5173/", &key),
            "http://localhost:5173/data/5ms_y.json"
        );
        assert_eq!(
            request_url("https://wind.example.org", &key),
            "https://wind.example.org/data/5ms_y.json"
        );
    }

    #[tokio::test]
    async fn http_fetch_requests_dataset_path() {
        let (base_url, server) =
            serve_once("HTTP/1.1 200 OK", r#"{"points":[{"x":10,"y":452,"v":2.0}]}"#).await;
        let source = http_source(base_url);

        let key = DatasetKey::new(Speed::FiveMs, Direction::North);
        let dataset = source.fetch(&key).await.unwrap();

        assert_eq!(server.await.unwrap(), "GET /data/5ms_y.json HTTP/1.1");
        assert_eq!(
            dataset.points,
            vec![Point {
                x: 10.0,
                y: 452.0,
                v: 2.0
            }]
        );
    }

    #[tokio::test]
    async fn http_non_success_is_status_error() {
        let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", "missing").await;
        let source = http_source(base_url);

        let key = DatasetKey::new(Speed::OneMs, Direction::West);
        let error = source.fetch(&key).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            error,
            DataFetchError::Status { status: 404, ref path } if path == "/data/1ms_-x.json"
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Bind then drop so the port is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let source = http_source(base_url);
        let key = DatasetKey::new(Speed::OneMs, Direction::East);
        let error = source.fetch(&key).await.unwrap_err();

        assert!(matches!(error, DataFetchError::Network(_)));
    }

    #[tokio::test]
    async fn directory_source_reads_key_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1ms_+x+y.json"),
            r#"{"points":[{"x":1.5,"y":2.5,"v":0.8}]}"#,
        )
        .unwrap();

        let source = DataSource::Directory(dir.path().to_path_buf());
        let key = DatasetKey::new(Speed::OneMs, Direction::NorthEast);
        let dataset = source.fetch(&key).await.unwrap();

        assert_eq!(dataset.len(), 1);
        assert!(source.describe(&key).ends_with("1ms_+x+y.json"));
    }

    #[tokio::test]
    async fn directory_source_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("5ms_-y.json"), "{ not json").unwrap();
        let source = DataSource::Directory(dir.path().to_path_buf());

        let missing = source
            .fetch(&DatasetKey::new(Speed::OneMs, Direction::South))
            .await
            .unwrap_err();
        assert!(matches!(missing, DataFetchError::Io(_)));

        let malformed = source
            .fetch(&DatasetKey::new(Speed::FiveMs, Direction::South))
            .await
            .unwrap_err();
        assert!(matches!(malformed, DataFetchError::Parse(_)));
    }
}
