use std::path::Path;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};
use tokio::time::Instant;

use crate::errors::{Result, VideoIndexerError};
use crate::models::{
    index_from_value, video_from_value, PollOptions, UploadOptions, Video, VideoIndex,
};

const DEFAULT_BASE_URL: &str = "https://api.videoindexer.ai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use videoindexer::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> videoindexer::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("0123456789abcdef")
///     .account_id("11111111-2222-3333-4444-555555555555")
///     .location("eastasia")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    account_id: Option<String>,
    location: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            account_id: None,
            location: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API subscription key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the account identifier.
    pub fn account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    /// Set the service region, e.g. `trial` or `eastasia`.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Override the base URL (defaults to `https://api.videoindexer.ai`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// Any credential not set explicitly is read from the environment:
    /// `VIDEO_INDEXER_API_KEY`, `VIDEO_INDEXER_ACCOUNT_ID`, and
    /// `VIDEO_INDEXER_LOCATION`.
    ///
    /// Returns [`VideoIndexerError::Authentication`] if any of the three is
    /// still missing.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("VIDEO_INDEXER_API_KEY").ok())
            .ok_or_else(|| missing_credential("API key", "VIDEO_INDEXER_API_KEY"))?;

        let account_id = self
            .account_id
            .or_else(|| std::env::var("VIDEO_INDEXER_ACCOUNT_ID").ok())
            .ok_or_else(|| missing_credential("account id", "VIDEO_INDEXER_ACCOUNT_ID"))?;

        let location = self
            .location
            .or_else(|| std::env::var("VIDEO_INDEXER_LOCATION").ok())
            .ok_or_else(|| missing_credential("location", "VIDEO_INDEXER_LOCATION"))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(VideoIndexerError::Http)?;

        Ok(Client {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            account_id,
            location,
            http,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_credential(what: &str, var: &str) -> VideoIndexerError {
    VideoIndexerError::Authentication {
        message: format!(
            "{what} is required. Pass it to the ClientBuilder or set the {var} \
             environment variable."
        ),
    }
}

/// The Video Indexer API client.
///
/// Use [`Client::new`] for quick construction or [`ClientBuilder`] for full control.
///
/// # Example
///
/// ```no_run
/// use videoindexer::Client;
///
/// # async fn example() -> videoindexer::Result<()> {
/// let client = Client::new("0123456789abcdef", "my-account-id", "eastasia");
///
/// // Upload a video and block until the remote analysis completes
/// let index = client.index("clip.mp4", "my clip", None).await?;
/// for line in index.transcript() {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    base_url: String,
    api_key: String,
    account_id: String,
    location: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client with the given credentials and default settings.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(
        api_key: impl Into<String>,
        account_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            account_id: account_id.into(),
            location: location.into(),
            http,
        }
    }

    /// Upload a local video file and poll until the analysis completes.
    ///
    /// This is the highest-level method: it uploads the file with default
    /// [`UploadOptions`], then polls until the index reaches a terminal state.
    /// Use [`PollOptions`] to configure polling behavior and receive progress
    /// callbacks.
    ///
    /// # Errors
    ///
    /// - [`VideoIndexerError::Io`] if the file cannot be read.
    /// - [`VideoIndexerError::Timeout`] if polling exceeds the configured timeout.
    /// - [`VideoIndexerError::ProcessingFailed`] if the analysis reaches the
    ///   `Failed` state.
    pub async fn index(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        opts: Option<PollOptions>,
    ) -> Result<VideoIndex> {
        let video = self.upload(path, name, None).await?;
        let opts = opts.unwrap_or_default();
        self.wait_for_processing(&video.id, opts).await
    }

    /// Obtain a short-lived access token with edit permissions.
    ///
    /// A fresh token is requested for every privileged call; the SDK does not
    /// cache tokens or track their expiry.
    ///
    /// Returns [`VideoIndexerError::Authentication`] for any non-200 response,
    /// carrying the response body.
    pub async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/auth/{}/Accounts/{}/AccessToken",
            self.base_url, self.location, self.account_id
        );

        let response = self
            .http
            .get(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .query(&[("allowEdit", "true")])
            .send()
            .await
            .map_err(VideoIndexerError::Http)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(VideoIndexerError::Authentication { message: body });
        }

        // The token arrives as a JSON string literal, i.e. wrapped in quotes.
        Ok(strip_token_quotes(&body).to_string())
    }

    /// Upload a local video file under the given display name.
    ///
    /// Acquires a fresh access token first; if that fails, no upload request is
    /// issued. The file is sent as a `video/mp4` multipart attachment in a
    /// single request, without local size or content validation.
    pub async fn upload(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        opts: Option<UploadOptions>,
    ) -> Result<Video> {
        let token = self.access_token().await?;
        let opts = opts.unwrap_or_default();

        let path = path.as_ref();
        let file_bytes = tokio::fs::read(path).await.map_err(VideoIndexerError::Io)?;

        tracing::info!(
            path = %path.display(),
            size = file_bytes.len(),
            name,
            "uploading video"
        );

        let part = Part::bytes(file_bytes)
            .file_name(name.to_string())
            .mime_str("video/mp4")
            .map_err(VideoIndexerError::Http)?;
        let form = Form::new().part("video", part);

        let url = format!(
            "{}/{}/Accounts/{}/Videos",
            self.base_url, self.location, self.account_id
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .query(&[
                ("name", name),
                ("privacy", &opts.privacy),
                ("language", &opts.language),
                ("accessToken", &token),
            ])
            .multipart(form)
            .send()
            .await
            .map_err(VideoIndexerError::Http)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let value: serde_json::Value = response.json().await.map_err(VideoIndexerError::Http)?;
        let video = video_from_value(value);

        tracing::info!(video_id = %video.id, "video uploaded");
        Ok(video)
    }

    /// Fetch the current index of a video: its processing state and, once
    /// processed, the insights.
    ///
    /// Re-acquires a fresh access token on every call. Non-200 responses are
    /// surfaced as typed errors, never parsed as index payloads.
    pub async fn get_index(&self, video_id: &str) -> Result<VideoIndex> {
        let token = self.access_token().await?;

        let url = format!(
            "{}/{}/Accounts/{}/Videos/{}/Index",
            self.base_url, self.location, self.account_id, video_id
        );

        let response = self
            .http
            .get(&url)
            .query(&[("accessToken", token.as_str())])
            .send()
            .await
            .map_err(VideoIndexerError::Http)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let value: serde_json::Value = response.json().await.map_err(VideoIndexerError::Http)?;
        Ok(index_from_value(value))
    }

    /// Poll a video's index until processing reaches a terminal state or the
    /// timeout is exceeded.
    ///
    /// Each iteration checks, in order: fetch failure (propagated), `Processed`
    /// (returns the full index), `Failed` (error), elapsed time past the
    /// timeout (error); otherwise it sleeps for the poll interval and retries.
    /// The interval is fixed, with no backoff.
    pub async fn wait_for_processing(
        &self,
        video_id: &str,
        opts: PollOptions,
    ) -> Result<VideoIndex> {
        let deadline = Instant::now() + opts.timeout;

        loop {
            let index = self.get_index(video_id).await?;

            if let Some(ref cb) = opts.on_progress {
                cb(&index);
            }

            if index.is_processed() {
                tracing::info!(video_id, "video processing completed");
                return Ok(index);
            }

            if index.is_failed() {
                tracing::warn!(video_id, "video processing failed");
                return Err(VideoIndexerError::ProcessingFailed(format!(
                    "video {video_id} reached Failed state"
                )));
            }

            if Instant::now() >= deadline {
                tracing::warn!(video_id, "timed out waiting for video processing");
                return Err(VideoIndexerError::Timeout(opts.timeout));
            }

            tracing::info!(video_id, state = %index.state, "video still processing");
            tokio::time::sleep(opts.poll_interval).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Strip exactly one pair of surrounding quote characters, if present.
fn strip_token_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Map a non-success response to a typed error, consuming the body.
async fn error_from_response(response: reqwest::Response) -> VideoIndexerError {
    let status_code = response.status().as_u16();

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<f64>().ok());

    let text = response.text().await.unwrap_or_default();
    let parsed_body: Option<serde_json::Value> = serde_json::from_str(&text).ok();

    let message = parsed_body
        .as_ref()
        .and_then(|b| b.get("message").or_else(|| b.get("Message")))
        .and_then(|m| m.as_str())
        .unwrap_or(&text)
        .to_string();

    match status_code {
        401 => VideoIndexerError::Authentication { message },
        404 => VideoIndexerError::NotFound { message },
        429 => VideoIndexerError::RateLimit {
            message,
            retry_after,
        },
        _ => VideoIndexerError::Api {
            status_code,
            message,
            body: parsed_body,
        },
    }
}
