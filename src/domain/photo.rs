//! Photo request bodies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::form::FormParams;
use crate::providers::{PwintyError, PwintyResult};

/// Copies ordered when the request leaves it unset
pub const DEFAULT_COPIES: u32 = 1;

/// How an image is fitted to the print size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sizing {
    #[default]
    Crop,
    ShrinkToFit,
    ShrinkToExactFit,
}

impl Sizing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sizing::Crop => "Crop",
            Sizing::ShrinkToFit => "ShrinkToFit",
            Sizing::ShrinkToExactFit => "ShrinkToExactFit",
        }
    }
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the image for a photo comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Remote URL the vendor downloads
    Url(&'a str),
    /// Local file uploaded as multipart data
    File(&'a Path),
}

/// A photo to add to an order
///
/// Exactly one of [`url`](Self::url) or [`file`](Self::file) must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRequest {
    pub photo_type: String,
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub copies: Option<u32>,
    pub sizing: Option<Sizing>,
    pub price_to_user: Option<i64>,
    pub md5_hash: Option<String>,
}

impl PhotoRequest {
    /// Start a request for the given print type (e.g. "4x6")
    pub fn new(photo_type: impl Into<String>) -> Self {
        PhotoRequest {
            photo_type: photo_type.into(),
            url: None,
            file: None,
            copies: None,
            sizing: None,
            price_to_user: None,
            md5_hash: None,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    #[must_use]
    pub fn copies(mut self, copies: u32) -> Self {
        self.copies = Some(copies);
        self
    }

    #[must_use]
    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = Some(sizing);
        self
    }

    /// Amount to invoice the recipient, in the smallest currency unit
    #[must_use]
    pub fn price_to_user(mut self, price: i64) -> Self {
        self.price_to_user = Some(price);
        self
    }

    /// Hash the vendor checks the downloaded file against
    #[must_use]
    pub fn md5_hash(mut self, hash: impl Into<String>) -> Self {
        self.md5_hash = Some(hash.into());
        self
    }

    /// Resolve the image source, rejecting a missing or ambiguous one
    pub fn image_source(&self) -> PwintyResult<ImageSource<'_>> {
        match (&self.url, &self.file) {
            (None, None) => Err(PwintyError::Validation(
                "File or URL for the image is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(PwintyError::Validation(
                "Cannot use both a URL and a file".to_string(),
            )),
            (Some(url), None) => Ok(ImageSource::Url(url)),
            (None, Some(path)) => Ok(ImageSource::File(path)),
        }
    }

    /// Form fields for the request, with copies and sizing defaulted
    ///
    /// Zero copies counts as unset.
    pub fn form_params(&self) -> FormParams {
        let copies = self.copies.filter(|&c| c > 0).unwrap_or(DEFAULT_COPIES);

        let mut params = FormParams::new();
        params.insert("type", self.photo_type.as_str());
        params.insert_opt("url", self.url.as_deref());
        params.insert("copies", copies);
        params.insert("sizing", self.sizing.unwrap_or_default().as_str());
        params.insert_opt("priceToUser", self.price_to_user);
        params.insert_opt("md5Hash", self.md5_hash.as_deref());
        params
    }
}
