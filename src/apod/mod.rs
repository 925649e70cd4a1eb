use std::{env, future::Future};

use reqwest::{Client as HttpClient, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::dates::DateRange;

pub mod error;
pub mod models;
pub mod result;

pub use error::Error;
pub use models::{MediaType, Picture};
pub use result::Result;

pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

pub const API_KEY_VAR: &str = "APOD_API_KEY";
pub const ENDPOINT_VAR: &str = "APOD_ENDPOINT";

macro_rules! query_params {
    ($($key:expr => $value:expr),+ $(,)?) => {
        &[
            $(($key, $value.to_string())),+
        ]
    };
}

/// Source of pictures for a date window.
pub trait Feed: Send + Sync {
    fn fetch_range(&self, range: DateRange) -> impl Future<Output = Result<Vec<Picture>>> + Send;
}

#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    api_key: String,
    endpoint: String,
}

impl Client {
    pub fn new<T: AsRef<str>>(api_key: T) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint<T: AsRef<str>, E: Into<String>>(api_key: T, endpoint: E) -> Result<Self> {
        let http = HttpClient::builder().build().map_err(|_| Error::Request)?;

        Self::with_http(http, api_key, endpoint)
    }

    pub fn with_http<T: AsRef<str>, E: Into<String>>(
        http: HttpClient,
        api_key: T,
        endpoint: E,
    ) -> Result<Self> {
        let api_key = api_key.as_ref().trim();
        if api_key.is_empty() || api_key.chars().any(char::is_whitespace) {
            return Err(Error::InvalidApiKey);
        }

        Ok(Self {
            http,
            api_key: api_key.to_owned(),
            endpoint: endpoint.into(),
        })
    }

    /// Reads the access key (and optionally the endpoint) from the environment.
    pub fn new_from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| Error::MissingApiKey)?;

        match env::var(ENDPOINT_VAR) {
            Ok(endpoint) => Self::with_endpoint(api_key, endpoint),
            Err(_) => Self::new(api_key),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_range(&self, range: DateRange) -> Result<Vec<Picture>> {
        debug!(start = %range.start_param(), end = %range.end_param(), "querying feed");

        let response = Self::send_request(self.range_request(&range)).await?;
        let pictures: Vec<Picture> = response.json().await.map_err(|err| {
            warn!(%err, "feed response was not a picture list");
            Error::InvalidResponse
        })?;

        debug!(count = pictures.len(), "feed returned pictures");

        Ok(pictures)
    }

    fn range_request(&self, range: &DateRange) -> RequestBuilder {
        self.http.get(&self.endpoint).query(query_params!(
            "api_key" => self.api_key,
            "start_date" => range.start_param(),
            "end_date" => range.end_param(),
        ))
    }

    async fn send_request(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|err| {
            warn!(%err, "feed request failed");
            Error::Request
        })?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }

        Ok(response)
    }
}

impl Feed for Client {
    fn fetch_range(&self, range: DateRange) -> impl Future<Output = Result<Vec<Picture>>> + Send {
        Client::fetch_range(self, range)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    /// Serves one canned response on loopback and hands back the request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&head).into_owned()
        });

        (format!("http://{addr}/planetary/apod"), server)
    }

    fn local_client(endpoint: String) -> Client {
        let http = HttpClient::builder().no_proxy().build().unwrap();

        Client::with_http(http, "secret", endpoint).unwrap()
    }

    #[tokio::test]
    async fn fetch_range_decodes_array_in_api_order() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"[
                {"date": "2024-03-4", "media_type": "image", "title": "Older", "url": "https://apod.nasa.gov/a.jpg", "hdurl": "https://apod.nasa.gov/a_big.jpg"},
                {"date": "2024-03-5", "media_type": "other", "title": "No link"}
            ]"#,
        )
        .await;

        let pictures = local_client(endpoint).fetch_range(range()).await.unwrap();

        let dates: Vec<_> = pictures.iter().map(Picture::date).collect();
        assert_eq!(dates, ["2024-03-4", "2024-03-5"]);
        assert_eq!(pictures[0].share_url(), "https://apod.nasa.gov/a_big.jpg");

        let head = server.await.unwrap();
        assert!(head.starts_with(
            "GET /planetary/apod?api_key=secret&start_date=2024-02-24&end_date=2024-03-5 HTTP/1.1\r\n"
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (endpoint, server) =
            serve_once("429 Too Many Requests", r#"{"error": "rate limited"}"#).await;

        let result = local_client(endpoint).fetch_range(range()).await;

        assert!(
            matches!(result, Err(Error::Status(status)) if status == StatusCode::TOO_MANY_REQUESTS)
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_array_body_is_invalid_response() {
        let (endpoint, server) = serve_once("200 OK", r#"{"code": 400, "msg": "bad date"}"#).await;

        let result = local_client(endpoint).fetch_range(range()).await;

        assert!(matches!(result, Err(Error::InvalidResponse)));
        server.await.unwrap();
    }

    fn range() -> DateRange {
        DateRange::ending_at(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 10)
    }

    #[test]
    fn rejects_blank_key() {
        assert!(matches!(Client::new("  "), Err(Error::InvalidApiKey)));
        assert!(matches!(Client::new("a b"), Err(Error::InvalidApiKey)));
    }

    #[test]
    fn range_request_carries_key_and_window() {
        let client = Client::with_endpoint("secret", "https://example.test/apod").unwrap();
        let request = client.range_request(&range()).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://example.test/apod?api_key=secret&start_date=2024-02-24&end_date=2024-03-5"
        );
    }

    #[test]
    fn default_endpoint_is_nasa() {
        let client = Client::new("DEMO_KEY").unwrap();

        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
