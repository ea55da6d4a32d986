//! Pwinty Provider Module
//!
//! Client for the Pwinty REST API: orders, photos, order status,
//! countries and catalogue.
//!
//! API Documentation: http://pwinty.com/api

mod client;

pub use client::{PwintyClient, API_KEY_HEADER, MERCHANT_ID_HEADER};
