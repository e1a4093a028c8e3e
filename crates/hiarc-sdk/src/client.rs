//! Hiarc client implementation.

use crate::auth::{Auth, USER_KEY_HEADER};
use crate::error::SdkError;
use crate::op::EntityOp;
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Hiarc SDK client
///
/// Holds a base URL and exactly one authentication mode. Each method issues
/// a single HTTP request; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct HiarcClient {
    http: Client,
    base_url: Url,
    auth: Auth,
    as_user: Option<String>,
}

impl HiarcClient {
    /// Create a new client for `base_url`
    pub fn new(base_url: &str, auth: Auth) -> Result<Self, SdkError> {
        let parsed = Url::parse(base_url).map_err(|e| SdkError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SdkError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot hold a path".to_string(),
            });
        }

        let http = Client::builder().user_agent(Self::user_agent()).build()?;

        Ok(Self {
            http,
            base_url: parsed,
            auth,
            as_user: None,
        })
    }

    /// Send every request on behalf of `user_key`
    pub fn with_as_user(mut self, user_key: impl Into<String>) -> Self {
        self.as_user = Some(user_key.into());
        self
    }

    /// User agent sent with every request
    pub fn user_agent() -> &'static str {
        concat!("hiarc-cli/", env!("CARGO_PKG_VERSION"))
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authentication mode
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Impersonated user, if any
    pub fn as_user(&self) -> Option<&str> {
        self.as_user.as_deref()
    }

    /// Absolute URL for an operation, with path segments percent-encoded
    pub fn url_for(&self, op: &EntityOp) -> Result<Url, SdkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot hold a path".to_string(),
            })?
            .pop_if_empty()
            .extend(op.segments());

        if !op.query().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in op.query() {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Execute an operation and decode the JSON response.
    ///
    /// An empty success body decodes to `null`.
    pub async fn send<B>(&self, op: &EntityOp, body: Option<&B>) -> Result<Value, SdkError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(op)?;
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle(response).await
    }

    /// Execute an operation whose response body is not needed
    pub async fn send_unit<B>(&self, op: &EntityOp, body: Option<&B>) -> Result<(), SdkError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(op)?;
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::ApiError { status, body });
        }
        Ok(())
    }

    /// Upload a local file as multipart form data.
    ///
    /// The form carries a `request` part holding `request` as JSON and a
    /// `file` part named `file_name`, streamed from disk.
    pub async fn upload<R>(
        &self,
        op: &EntityOp,
        request: &R,
        path: &Path,
        file_name: &str,
    ) -> Result<Value, SdkError>
    where
        R: Serialize + ?Sized,
    {
        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        let request_json = serde_json::to_string(request)
            .map_err(|e| SdkError::RequestError(format!("Failed to encode request: {}", e)))?;

        let form = Form::new()
            .part("request", Part::text(request_json).mime_str("application/json")?)
            .part(
                "file",
                Part::stream_with_length(file, length).file_name(file_name.to_string()),
            );

        debug!(path = %path.display(), file_name, bytes = length, "Uploading file");
        let response = self.request(op)?.multipart(form).send().await?;
        Self::handle(response).await
    }

    /// Stream a response body into `dest`, returning the number of bytes written.
    ///
    /// `dest` is only created once the server has answered with success.
    pub async fn download_to(&self, op: &EntityOp, dest: &Path) -> Result<u64, SdkError> {
        let mut response = self.request(op)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::ApiError { status, body });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(dest = %dest.display(), bytes = written, "Download complete");
        Ok(written)
    }

    fn request(&self, op: &EntityOp) -> Result<RequestBuilder, SdkError> {
        let url = self.url_for(op)?;

        let (name, value) = self.auth.header();
        let mut value = HeaderValue::from_str(&value).map_err(|_| SdkError::InvalidHeader(name))?;
        value.set_sensitive(true);

        let mut request = self.http.request(op.method(), url).header(name, value);
        if let Some(user) = &self.as_user {
            let value = HeaderValue::from_str(user)
                .map_err(|_| SdkError::InvalidHeader(USER_KEY_HEADER))?;
            request = request.header(USER_KEY_HEADER, value);
        }

        debug!(
            method = %op.method(),
            path = %op.path(),
            auth = self.auth.mode(),
            as_user = self.as_user.as_deref().unwrap_or("-"),
            "Sending request"
        );
        Ok(request)
    }

    async fn handle(response: Response) -> Result<Value, SdkError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(SdkError::ApiError {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiarc_domain::EntityKind;

    fn client(base: &str) -> HiarcClient {
        HiarcClient::new(base, Auth::AdminKey("k".into())).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HiarcClient::new("not a url", Auth::AdminKey("k".into())).unwrap_err();
        assert!(matches!(err, SdkError::InvalidUrl { .. }));

        let err = HiarcClient::new("mailto:someone@example.com", Auth::AdminKey("k".into()))
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidUrl { .. }));
    }

    #[test]
    fn test_url_for_joins_segments() {
        let url = client("https://api.example.com")
            .url_for(&EntityOp::get(EntityKind::User, "u1"))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users/u1");
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let url = client("https://api.example.com/v1/")
            .url_for(&EntityOp::all(EntityKind::Group))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/groups/all");
    }

    #[test]
    fn test_url_for_encodes_keys() {
        let url = client("https://api.example.com")
            .url_for(&EntityOp::get(EntityKind::File, "a b/c"))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/files/a%20b%2Fc");
    }

    #[test]
    fn test_url_for_appends_query() {
        let op = EntityOp::collection_action(EntityKind::File, "directuploadurl")
            .with_query("expiresInSeconds", 120);
        let url = client("https://api.example.com").url_for(&op).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/files/directuploadurl?expiresInSeconds=120"
        );
    }

    #[test]
    fn test_as_user() {
        let client = client("https://api.example.com").with_as_user("alice");
        assert_eq!(client.as_user(), Some("alice"));
        assert_eq!(client.auth().mode(), "admin-key");
    }
}
