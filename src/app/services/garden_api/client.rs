//! HTTP client for the plant API
//!
//! One `reqwest::Client` with a cookie store is shared by every request of a
//! run. The token and CSRF values obtained at connect time are sent as
//! per-request headers.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use std::fmt;
use tracing::{debug, info, warn};
use url::Url;

use super::GardenApi;
use super::responses::{SpeciesSearch, TokenResponse};
use crate::app::models::{CollectionPayload, ImageQuery, ImageRecord};
use crate::config::ApiConfig;
use crate::constants::{
    ACCEPT_HEADER, COLLECTIONS_PATH, CSRF_COOKIE_NAME, MAX_LOGGED_BODY_BYTES, PASSWORD_ENV_VAR,
    SPECIES_PATH, TOKEN_PATH, USERNAME_ENV_VAR,
};
use crate::{Error, Result};

/// API account used to obtain a token
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `RBG_API_USERNAME` and `RBG_API_PASSWORD`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            read_env(USERNAME_ENV_VAR)?,
            read_env(PASSWORD_ENV_VAR)?,
        ))
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::configuration(format!(
            "Environment variable {} must be set",
            name
        ))),
    }
}

/// Authenticated session against one garden website
#[derive(Debug, Clone)]
pub struct GardenApiClient {
    http: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
}

impl GardenApiClient {
    /// Obtain a token and build an authenticated session.
    ///
    /// Any failure here is an [`Error::Authentication`] (or a transport
    /// error) and ends the run.
    pub async fn connect(config: &ApiConfig, credentials: &Credentials) -> Result<Self> {
        let base_url = parse_base_url(config)?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::api("Failed to build HTTP client", e))?;

        let token_url = endpoint(&base_url, TOKEN_PATH)?;
        info!("Requesting API token from {}", token_url);

        let response = http
            .post(token_url.clone())
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::api(format!("Token request to {} failed", token_url), e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = loggable_body(response)
                .await
                .map(|body| format!(": {}", body))
                .unwrap_or_default();
            return Err(Error::authentication(format!(
                "token endpoint returned {}{}",
                status, detail
            )));
        }

        let csrf_token = response
            .cookies()
            .find(|cookie| cookie.name() == CSRF_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string());

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::authentication(format!("Malformed token response: {}", e)))?;

        let headers = session_headers(&token.token, csrf_token.as_deref())?;
        debug!("Authenticated as {}", credentials.username);

        Ok(Self {
            http,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl GardenApi for GardenApiClient {
    async fn find_species(&self, query: &ImageQuery) -> Result<SpeciesSearch> {
        let url = endpoint(&self.base_url, SPECIES_PATH)?;

        let response = self
            .http
            .get(url.clone())
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| Error::api(format!("Species search at {} failed", url), e))?;

        ensure_status(response, |status| status.is_success())
            .await?
            .json()
            .await
            .map_err(|e| Error::api(format!("Malformed species search response from {}", url), e))
    }

    async fn post_collection(&self, payload: &CollectionPayload) -> Result<()> {
        let url = endpoint(&self.base_url, COLLECTIONS_PATH)?;

        let response = self
            .http
            .post(url.clone())
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::api(format!("Collection POST to {} failed", url), e))?;

        ensure_status(response, |status| status == StatusCode::CREATED).await?;
        Ok(())
    }

    async fn set_species_image(&self, species_id: u64, record: &ImageRecord) -> Result<()> {
        let url = endpoint(&self.base_url, &species_image_path(species_id))?;

        let bytes = tokio::fs::read(&record.file_path).await.map_err(|e| {
            Error::io(
                format!("Failed to read image {}", record.file_path.display()),
                e,
            )
        })?;

        let form = Form::new()
            .text("copyright_info", record.copyright.clone())
            .part("image", Part::bytes(bytes).file_name(record.file_name()));

        let response = self
            .http
            .post(url.clone())
            .headers(self.headers.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::api(format!("Image upload to {} failed", url), e))?;

        ensure_status(response, |status| status.is_success()).await?;
        Ok(())
    }
}

fn parse_base_url(config: &ApiConfig) -> Result<Url> {
    Url::parse(&config.base_url()).map_err(|e| {
        Error::configuration(format!("Invalid API target '{}': {}", config.target, e))
    })
}

/// Resolve an API path against the website root
pub fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    base_url
        .join(path)
        .map_err(|e| Error::configuration(format!("Invalid API path '{}': {}", path, e)))
}

/// Path of the set-image action for one species
pub fn species_image_path(species_id: u64) -> String {
    format!("{}{}/set-image/", SPECIES_PATH, species_id)
}

/// Headers sent with every authenticated request
pub fn session_headers(token: &str, csrf_token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    let authorization = HeaderValue::from_str(&format!("Token {}", token))
        .map_err(|_| Error::authentication("API token is not a valid header value"))?;
    headers.insert(AUTHORIZATION, authorization);

    match csrf_token {
        Some(csrf_token) => {
            let value = HeaderValue::from_str(csrf_token)
                .map_err(|_| Error::authentication("CSRF token is not a valid header value"))?;
            headers.insert(HeaderName::from_static("x-csrftoken"), value);
        }
        None => warn!("Token response set no {} cookie", CSRF_COOKIE_NAME),
    }

    Ok(headers)
}

/// Keep a response body for logging only when it is short
pub fn truncate_body(body: String) -> Option<String> {
    (body.len() < MAX_LOGGED_BODY_BYTES).then_some(body)
}

async fn loggable_body(response: Response) -> Option<String> {
    response.text().await.ok().and_then(truncate_body)
}

async fn ensure_status(
    response: Response,
    expected: impl Fn(StatusCode) -> bool,
) -> Result<Response> {
    let status = response.status();
    if expected(status) {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = loggable_body(response).await;
    Err(Error::api_status(url, status.as_u16(), body))
}
