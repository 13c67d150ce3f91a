use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::providers::{LanguageCode, SupportedLanguage, TranslationPort};

/// Project and location a request is billed to
///
/// Kept as separate fields so the parent and model resource names are built
/// from them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLocation {
    /// Google Cloud project id
    pub project_id: String,
    /// Location id, usually "global"
    pub location: String,
}

impl ServiceLocation {
    pub fn new(project_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
        }
    }

    /// Location used when no regional model is involved
    pub fn global(project_id: impl Into<String>) -> Self {
        Self::new(project_id, "global")
    }

    /// `projects/{project}/locations/{location}`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }

    /// `projects/{project}/locations/{location}/models/{model}`; full
    /// resource names are kept as given
    pub fn model_path(&self, model: &str) -> String {
        if model.starts_with("projects/") {
            return model.to_string();
        }
        format!("{}/models/{}", self.parent(), model)
    }
}

/// translateText request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextRequest<'a> {
    /// Text items to translate; always a single chunk here
    pub contents: Vec<&'a str>,
    /// Language to produce
    pub target_language_code: &'a str,
    /// Advisory source language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language_code: Option<&'a str>,
    /// Content type of `contents`
    pub mime_type: &'a str,
    /// Full model resource name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// translateText response body
#[derive(Debug, Deserialize)]
pub struct TranslateTextResponse {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// One translated content item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[serde(default)]
    pub translated_text: String,
}

/// detectLanguage request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectLanguageRequest<'a> {
    pub content: &'a str,
    pub mime_type: &'a str,
}

/// detectLanguage response body
#[derive(Debug, Deserialize)]
pub struct DetectLanguageResponse {
    #[serde(default)]
    pub languages: Vec<DetectedLanguage>,
}

/// One detection candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLanguage {
    pub language_code: String,
    #[serde(default)]
    pub confidence: f32,
}

/// supportedLanguages response body
#[derive(Debug, Deserialize)]
pub struct SupportedLanguagesResponse {
    #[serde(default)]
    pub languages: Vec<GoogleLanguage>,
}

/// One supported language entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLanguage {
    pub language_code: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub support_target: Option<bool>,
}

/// Google error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for the Google Cloud Translation v3 REST API
pub struct GoogleTranslate {
    /// HTTP client shared by every request of a run
    client: Client,
    /// API base URL
    endpoint: String,
    /// Project and location
    location: ServiceLocation,
    /// Optional model id such as "general/nmt"
    model: Option<String>,
    /// Language for display names in the language listing
    display_language: Option<String>,
    /// OAuth bearer token
    access_token: String,
}

impl fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("endpoint", &self.endpoint)
            .field("location", &self.location)
            .field("model", &self.model)
            .field("display_language", &self.display_language)
            .finish_non_exhaustive()
    }
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(
        endpoint: impl Into<String>,
        location: ServiceLocation,
        access_token: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            location,
            model: None,
            display_language: None,
            access_token: access_token.into(),
        }
    }

    /// Use a specific model for translateText
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }

    /// Request display names in this language
    pub fn with_display_language(mut self, display_language: Option<String>) -> Self {
        self.display_language = display_language.filter(|l| !l.trim().is_empty());
        self
    }

    /// Build a client from the application configuration
    ///
    /// Without an explicit token, one is requested from the gcloud CLI's
    /// application default credentials.
    pub async fn from_config(config: &Config, access_token: Option<String>) -> Result<Self, ProviderError> {
        let token = match access_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => token,
            None => Self::gcloud_access_token().await?,
        };

        let location = ServiceLocation::new(&config.project_id, &config.service.location);
        Ok(Self::new(&config.service.endpoint, location, token, config.service.timeout_secs)
            .with_model(config.service.model.clone())
            .with_display_language(config.service.display_language.clone()))
    }

    /// Ask gcloud for an application default access token
    async fn gcloud_access_token() -> Result<String, ProviderError> {
        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "application-default", "print-access-token"])
            .output()
            .await
            .map_err(|e| ProviderError::AuthenticationError(format!(
                "no access token given and gcloud could not be run: {}", e
            )))?;

        if !output.status.success() {
            return Err(ProviderError::AuthenticationError(format!(
                "gcloud failed to print an access token: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "gcloud returned an empty access token".to_string(),
            ));
        }
        Ok(token)
    }

    /// Project and location used by this client
    pub fn location(&self) -> &ServiceLocation {
        &self.location
    }

    /// URL of a method on the parent resource, e.g. `:translateText`
    pub fn method_url(&self, suffix: &str) -> Result<Url, ProviderError> {
        let raw = format!("{}/{}{}", self.endpoint, self.location.parent(), suffix);
        Url::parse(&raw).map_err(|e| ProviderError::RequestFailed(format!("invalid URL {}: {}", raw, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("x-goog-user-project", &self.location.project_id)
    }

    /// Send a request and decode a JSON body, mapping failures to provider errors
    async fn execute<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let response = self.authorized(request).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            error!("Translation API error ({}): {}", status, message);

            if status == StatusCode::UNAUTHORIZED {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TranslationPort for GoogleTranslate {
    async fn supported_languages(&self) -> Result<Vec<SupportedLanguage>, ProviderError> {
        let mut url = self.method_url("/supportedLanguages")?;
        if let Some(display_language) = &self.display_language {
            url.query_pairs_mut().append_pair("displayLanguageCode", display_language);
        }

        let response: SupportedLanguagesResponse = self.execute(self.client.get(url)).await?;
        let languages: Vec<SupportedLanguage> = response
            .languages
            .into_iter()
            .filter(|lang| lang.support_target.unwrap_or(true))
            .map(|lang| SupportedLanguage {
                code: lang.language_code,
                display_name: lang.display_name.filter(|name| !name.is_empty()),
            })
            .collect();

        debug!("Service lists {} target languages", languages.len());
        Ok(languages)
    }

    async fn detect_language(&self, sample: &str) -> Result<LanguageCode, ProviderError> {
        let body = DetectLanguageRequest {
            content: sample,
            mime_type: crate::providers::DEFAULT_MIME_TYPE,
        };
        let url = self.method_url(":detectLanguage")?;
        let response: DetectLanguageResponse = self.execute(self.client.post(url).json(&body)).await?;

        // Candidates arrive ordered by confidence
        response
            .languages
            .into_iter()
            .next()
            .map(|lang| {
                debug!("Detected {} (confidence {:.2})", lang.language_code, lang.confidence);
                lang.language_code
            })
            .ok_or_else(|| ProviderError::ParseError("detectLanguage returned no languages".to_string()))
    }

    async fn translate_chunk(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
        mime_type: &str,
    ) -> Result<String, ProviderError> {
        let body = TranslateTextRequest {
            contents: vec![text],
            target_language_code: target_language,
            source_language_code: source_language,
            mime_type,
            model: self.model.as_deref().map(|model| self.location.model_path(model)),
        };
        let url = self.method_url(":translateText")?;
        let response: TranslateTextResponse = self.execute(self.client.post(url).json(&body)).await?;

        Ok(response
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }
}
