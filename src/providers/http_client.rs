//! HTTP transport for the Pwinty API
//!
//! Wraps a `reqwest::Client` and turns an [`ApiRequest`] into a single HTTP
//! call. Bodies go out URL-encoded, or as multipart when a file is attached.
//! Status codes are passed back untouched.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::config::ClientConfig;
use crate::providers::traits::{
    ApiRequest, ApiResponse, FileUpload, PwintyResult, Transport,
};

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner HTTP client
    client: Client,
}

impl HttpClient {
    /// Create a transport using the timeout and user agent from `config`
    pub fn new(config: &ClientConfig) -> PwintyResult<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpClient {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured `reqwest::Client`
    pub fn from_client(client: Client) -> Self {
        HttpClient { client }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> PwintyResult<ApiResponse> {
        let ApiRequest {
            method,
            url,
            headers,
            form,
            file,
        } = request;

        let mut builder = self.client.request(method.into(), &url);

        for (name, value) in &headers {
            builder = builder.header(*name, value.as_str());
        }

        builder = match file {
            Some(upload) => {
                let mut multipart = Form::new();
                for (key, value) in form.to_pairs() {
                    multipart = multipart.text(key, value);
                }

                let part = Part::bytes(upload.bytes).file_name(upload.file_name);
                builder.multipart(multipart.part(FileUpload::FIELD_NAME, part))
            }
            None if form.is_empty() => builder,
            None => builder.form(&form.to_pairs()),
        };

        debug!(method = %method, url = %url, "Executing Pwinty request");

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, "Pwinty response received");

        Ok(ApiResponse { status, body })
    }
}
