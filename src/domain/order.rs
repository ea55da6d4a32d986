//! Order request bodies and status values

use serde::{Deserialize, Serialize};
use std::fmt;

use super::form::{FormParams, FormValue};

// ============================================================================
// Order Fields
// ============================================================================

/// Fields for creating or updating an order
///
/// Covers the documented v2 order fields. Anything else the vendor accepts
/// can be passed through [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFields {
    params: FormParams,
}

macro_rules! text_field {
    ($(#[$doc:meta])* $method:ident => $key:literal) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method(mut self, value: impl Into<String>) -> Self {
            let value: String = value.into();
            self.params.insert($key, value);
            self
        }
    };
}

impl OrderFields {
    pub fn new() -> Self {
        Self::default()
    }

    text_field!(
        /// Name of the person receiving the prints
        recipient_name => "recipientName"
    );
    text_field!(address1 => "address1");
    text_field!(address2 => "address2");
    text_field!(address_town_or_city => "addressTownOrCity");
    text_field!(state_or_county => "stateOrCounty");
    text_field!(postal_or_zip_code => "postalOrZipCode");
    text_field!(
        /// Country the order is produced in (ISO code)
        country_code => "countryCode"
    );
    text_field!(
        /// Country the order ships to (ISO code)
        destination_country_code => "destinationCountryCode"
    );
    text_field!(
        /// "Pro" or "Standard"
        quality_level => "qualityLevel"
    );
    text_field!(
        /// "InvoiceMe" or "InvoiceRecipient"
        payment => "payment"
    );
    text_field!(email => "email");
    text_field!(mobile_telephone => "mobileTelephone");
    text_field!(preferred_shipping_method => "preferredShippingMethod");

    /// Request tracked shipping
    #[must_use]
    pub fn use_tracked_shipping(mut self, tracked: bool) -> Self {
        self.params.insert("useTrackedShipping", tracked);
        self
    }

    /// Any other field, sent verbatim
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn params(&self) -> &FormParams {
        &self.params
    }

    pub fn into_params(self) -> FormParams {
        self.params
    }
}

impl From<FormParams> for OrderFields {
    fn from(params: FormParams) -> Self {
        OrderFields { params }
    }
}

// ============================================================================
// Order Status
// ============================================================================

/// Status an order can be moved to
///
/// Transitions are validated server-side; an illegal move is reported as
/// [`ForbiddenAction::ChangeStatus`](crate::ForbiddenAction::ChangeStatus).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OrderStatus {
    Cancelled,
    AwaitingPayment,
    Submitted,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::AwaitingPayment => "AwaitingPayment",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Cancelled" => OrderStatus::Cancelled,
            "AwaitingPayment" => OrderStatus::AwaitingPayment,
            "Submitted" => OrderStatus::Submitted,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}
