//! Pwinty Client
//!
//! Async client for the Pwinty print-fulfillment REST API: order creation,
//! photo upload, status transitions and catalogue lookup.
//!
//! # Example
//!
//! ```rust,no_run
//! use pwinty_client::{OrderFields, PhotoRequest, PwintyClient};
//!
//! # async fn run() -> pwinty_client::PwintyResult<()> {
//! let client = PwintyClient::new("merchant-id", "api-key")?;
//!
//! client
//!     .create_order(
//!         &OrderFields::new()
//!             .recipient_name("Ada Lovelace")
//!             .country_code("GB")
//!             .quality_level("Pro"),
//!     )
//!     .await?;
//!
//! let photo = PhotoRequest::new("4x6").url("https://example.com/cat.jpg");
//! client.add_photo(1234, &photo).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod providers;

pub use config::{ClientConfig, Settings};
pub use domain::{FormParams, FormValue, OrderFields, OrderStatus, PhotoRequest, Sizing};
pub use providers::{
    ApiRequest, ApiResponse, FileUpload, ForbiddenAction, HttpClient, Method, PwintyClient,
    PwintyError, PwintyResult, Transport,
};
