//! Pwinty API Client Implementation
//!
//! One generic dispatch operation ([`PwintyClient::call`]) that attaches the
//! auth headers and maps the generic error statuses, plus thin endpoint
//! wrappers on top of it.
//!
//! API Docs: http://pwinty.com/api

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::domain::{FormParams, ImageSource, OrderFields, OrderStatus, PhotoRequest};
use crate::providers::http_client::HttpClient;
use crate::providers::traits::{
    ApiRequest, ApiResponse, FileUpload, ForbiddenAction, Method, PwintyError, PwintyResult,
    Transport,
};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Pwinty-REST-API-Key";

/// Header carrying the merchant ID
pub const MERCHANT_ID_HEADER: &str = "X-Pwinty-MerchantId";

const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Characters escaped when a caller-supplied ID becomes a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Vendor error body: `{"Error": {"Message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "Error")]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "Message")]
    message: Option<String>,
}

/// Pwinty API client
#[derive(Clone)]
pub struct PwintyClient {
    /// Configuration the client was built from
    config: ClientConfig,

    /// Resolved base URL, without a trailing slash
    base_url: String,

    /// Auth headers attached to every request
    headers: Vec<(&'static str, String)>,

    /// Where requests are sent
    transport: Arc<dyn Transport>,
}

impl PwintyClient {
    /// Create a sandbox client for the default API version
    pub fn new(merchant_id: impl Into<String>, api_key: impl Into<String>) -> PwintyResult<Self> {
        Self::from_config(ClientConfig::new(merchant_id, api_key))
    }

    /// Create a client from a full configuration, using the HTTP transport
    pub fn from_config(config: ClientConfig) -> PwintyResult<Self> {
        let transport = HttpClient::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> PwintyResult<Self> {
        if config.merchant_id.trim().is_empty() {
            return Err(PwintyError::InvalidConfig("merchant ID is required".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(PwintyError::InvalidConfig("API key is required".to_string()));
        }

        for (name, value) in [
            (API_KEY_HEADER, &config.api_key),
            (MERCHANT_ID_HEADER, &config.merchant_id),
        ] {
            HeaderValue::from_str(value).map_err(|_| {
                PwintyError::InvalidConfig(format!("{} is not a valid header value", name))
            })?;
        }

        let base_url = config.base_url();
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| PwintyError::InvalidConfig(format!("invalid base URL {}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PwintyError::InvalidConfig(
                "base URL must start with http:// or https://".to_string(),
            ));
        }

        let headers = vec![
            (API_KEY_HEADER, config.api_key.clone()),
            (MERCHANT_ID_HEADER, config.merchant_id.clone()),
        ];

        Ok(PwintyClient {
            config,
            base_url,
            headers,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL every request path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Auth headers sent with every request
    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send one authenticated request to `base_url + path`
    ///
    /// `params` go out as form fields; with a `file` the body becomes
    /// multipart. 401, 404, 400 and 5xx are turned into errors. Every other
    /// status, 403 included, is handed back for the caller to interpret.
    #[instrument(skip(self, params, file))]
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: FormParams,
        file: Option<FileUpload>,
    ) -> PwintyResult<ApiResponse> {
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers: self.headers.clone(),
            form: params,
            file,
        };

        let response = self.transport.send(request).await?;

        match response.status {
            401 => Err(PwintyError::AuthenticationFailed),
            404 => Err(PwintyError::NotFound),
            status if status == 400 || status >= 500 => Err(PwintyError::Api {
                status,
                message: error_message(&response.body),
            }),
            _ => Ok(response),
        }
    }

    async fn get(&self, path: &str) -> PwintyResult<Value> {
        self.call(Method::Get, path, FormParams::new(), None)
            .await?
            .into_json()
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// List all orders
    pub async fn get_orders(&self) -> PwintyResult<Value> {
        self.get("/Orders").await
    }

    /// Fetch a single order
    pub async fn get_order(&self, order_id: impl fmt::Display) -> PwintyResult<Value> {
        self.get(&format!("/Orders/{}", segment(order_id))).await
    }

    /// Create an order
    pub async fn create_order(&self, fields: &OrderFields) -> PwintyResult<Value> {
        self.call(Method::Post, "/Orders", fields.params().clone(), None)
            .await?
            .into_json()
    }

    /// Update an order that has not been submitted yet
    pub async fn update_order(
        &self,
        order_id: impl fmt::Display,
        fields: &OrderFields,
    ) -> PwintyResult<Value> {
        let path = format!("/Orders/{}", segment(order_id));
        let response = self
            .call(Method::Put, &path, fields.params().clone(), None)
            .await?;

        forbid(response, ForbiddenAction::UpdateOrder)?.into_json()
    }

    /// Move an order to another status
    pub async fn update_order_status(
        &self,
        order_id: impl fmt::Display,
        status: impl Into<OrderStatus>,
    ) -> PwintyResult<Value> {
        let path = format!("/Orders/{}/Status", segment(order_id));
        let status: OrderStatus = status.into();
        let params = FormParams::new().with("status", status.as_str());
        let response = self.call(Method::Post, &path, params, None).await?;

        forbid(response, ForbiddenAction::ChangeStatus)?.into_json()
    }

    /// Check whether an order is ready to be submitted
    pub async fn get_submission_status(&self, order_id: impl fmt::Display) -> PwintyResult<Value> {
        self.get(&format!("/Orders/{}/SubmissionStatus", segment(order_id)))
            .await
    }

    // ========================================================================
    // Countries & Catalogue
    // ========================================================================

    /// List supported countries
    pub async fn get_countries(&self) -> PwintyResult<Value> {
        self.get("/Country").await
    }

    /// Fetch the product catalogue for a country and quality level
    pub async fn get_catalogue(&self, country_code: &str, quality_level: &str) -> PwintyResult<Value> {
        self.get(&format!(
            "/Catalogue/{}/{}",
            segment(country_code),
            segment(quality_level)
        ))
        .await
    }

    // ========================================================================
    // Photos
    // ========================================================================

    /// List the photos on an order
    pub async fn get_photos(&self, order_id: impl fmt::Display) -> PwintyResult<Value> {
        self.get(&format!("/Orders/{}/Photos", segment(order_id)))
            .await
    }

    /// Fetch a single photo on an order
    pub async fn get_photo(
        &self,
        order_id: impl fmt::Display,
        photo_id: impl fmt::Display,
    ) -> PwintyResult<Value> {
        self.get(&format!(
            "/Orders/{}/Photos/{}",
            segment(order_id),
            segment(photo_id)
        ))
        .await
    }

    /// Add a photo to an order
    ///
    /// The request must name exactly one image source; this is checked
    /// before anything is sent. A local file is read in full and uploaded
    /// as the multipart `file` field.
    pub async fn add_photo(
        &self,
        order_id: impl fmt::Display,
        photo: &PhotoRequest,
    ) -> PwintyResult<Value> {
        let file = match photo.image_source()? {
            ImageSource::Url(_) => None,
            ImageSource::File(path) => Some(read_upload(path).await?),
        };

        let path = format!("/Orders/{}/Photos", segment(order_id));
        let response = self
            .call(Method::Post, &path, photo.form_params(), file)
            .await?;

        forbid(response, ForbiddenAction::AddPhoto)?.into_json()
    }

    /// Remove a photo from an order
    pub async fn delete_photo(
        &self,
        order_id: impl fmt::Display,
        photo_id: impl fmt::Display,
    ) -> PwintyResult<Value> {
        let path = format!(
            "/Orders/{}/Photos/{}",
            segment(order_id),
            segment(photo_id)
        );
        let response = self
            .call(Method::Delete, &path, FormParams::new(), None)
            .await?;

        forbid(response, ForbiddenAction::RemovePhoto)?.into_json()
    }
}

impl fmt::Debug for PwintyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PwintyClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Extract the vendor message from an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Map a 403 to the endpoint's own refusal
fn forbid(response: ApiResponse, action: ForbiddenAction) -> PwintyResult<ApiResponse> {
    if response.status == 403 {
        return Err(PwintyError::Forbidden(action));
    }
    Ok(response)
}

fn segment(value: impl fmt::Display) -> String {
    utf8_percent_encode(&value.to_string(), PATH_SEGMENT).to_string()
}

/// Read a local image into memory; the handle is closed on return
async fn read_upload(path: &Path) -> PwintyResult<FileUpload> {
    let bytes = tokio::fs::read(path).await.map_err(|source| PwintyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(FileUpload::new(file_name, bytes))
}
