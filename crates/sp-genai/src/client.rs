// client.rs — ModelClient: the seam to the external generative model.
//
// The production implementation talks to a Gemini-style REST API:
// upload the document, ask for content with the file attached, then
// delete the uploaded file (best-effort). Everything downstream only
// sees the returned text, so tests swap in a canned client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::GenError;

/// An uploaded study document, as received from the HTTP layer.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One generation request: a prompt, optionally grounded in a document.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub document: Option<UploadedDocument>,
}

impl GenerateRequest {
    pub fn text_only(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            document: None,
        }
    }

    pub fn with_document(prompt: impl Into<String>, document: UploadedDocument) -> Self {
        Self {
            prompt: prompt.into(),
            document: Some(document),
        }
    }
}

/// The external generative model.
///
/// Constructed once and passed in wherever generation happens —
/// never a process-wide singleton — so tests can substitute fakes.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one generation and return the raw model text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenError>;
}

/// Gemini REST API client.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    name: String,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    async fn upload(&self, document: &UploadedDocument) -> Result<UploadedFile, GenError> {
        let url = format!("{}/upload/v1beta/files", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("x-goog-upload-protocol", "raw")
            .header("content-type", document.mime_type.clone())
            .body(document.bytes.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let upload: UploadResponse = response.json().await?;
        Ok(upload.file)
    }

    async fn delete_file(&self, name: &str) {
        let url = format!("{}/v1beta/{}", self.base_url, name);
        let result = self
            .http
            .delete(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await;
        // Orphaned uploads expire server-side; a failed delete is only
        // worth a warning.
        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(file = name, status = %response.status(), "file delete refused");
            }
            Err(e) => tracing::warn!(file = name, "file delete failed: {e}"),
            Ok(_) => {}
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, GenError> {
        let uploaded = match &request.document {
            Some(document) => Some((self.upload(document).await?, document.mime_type.clone())),
            None => None,
        };

        let mut parts = vec![json!({ "text": request.prompt })];
        if let Some((file, mime_type)) = &uploaded {
            parts.push(json!({
                "file_data": { "file_uri": file.uri, "mime_type": mime_type }
            }));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "role": "user", "parts": parts }]
            }))
            .send()
            .await;

        if let Some((file, _)) = &uploaded {
            self.delete_file(&file.name).await;
        }

        let response = response?;
        if !response.status().is_success() {
            return Err(GenError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenError::BadModelOutput("empty model response".into()));
        }
        Ok(text)
    }
}
