//! Domain types and request bodies

mod form;
pub mod order;
pub mod photo;

pub use form::{FormParams, FormValue};
pub use order::{OrderFields, OrderStatus};
pub use photo::{ImageSource, PhotoRequest, Sizing};
