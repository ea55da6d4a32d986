//! Print-fulfillment provider integration
//!
//! ```text
//!   ┌──────────────┐   ApiRequest   ┌─────────────────┐
//!   │ PwintyClient │ ─────────────▶ │ Transport trait │
//!   └──────────────┘ ◀───────────── └────────┬────────┘
//!                       ApiResponse          │
//!                                    ┌───────┴───────┐
//!                                    │  HttpClient   │ (reqwest)
//!                                    └───────────────┘
//! ```
//!
//! `PwintyClient` owns the configuration, auth headers and status mapping.
//! The transport only moves bytes.

pub mod traits;
pub mod http_client;
pub mod pwinty;

// Re-export commonly used types
pub use traits::{
    ApiRequest,
    ApiResponse,
    FileUpload,
    ForbiddenAction,
    Method,
    PwintyError,
    PwintyResult,
    Transport,
};
pub use http_client::HttpClient;
pub use pwinty::PwintyClient;
