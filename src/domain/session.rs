//! Session context
//!
//! The immutable inputs of one refinement session: what is being advertised,
//! to whom, and how many rejected drafts are tolerated before giving up.

use serde::{Deserialize, Serialize};

use crate::error::{CopyloopError, Result};

/// Placeholder product used when the caller does not supply one
pub const DEFAULT_PRODUCT: &str = "Omega 3 Fish Oil";

/// Placeholder audience used when the caller does not supply one
pub const DEFAULT_AUDIENCE: &str = "Health-conscious Seniors";

/// Default rejection budget
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Inputs for a single session. Fields are private so a context can only be
/// built through `new`, which validates them. Deserializing goes through `new` too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionContext")]
pub struct SessionContext {
    product: String,
    audience: String,
    max_retries: u32,
}

impl SessionContext {
    /// Build a validated context. Product and audience must contain
    /// something other than whitespace.
    pub fn new(product: impl Into<String>, audience: impl Into<String>, max_retries: u32) -> Result<Self> {
        let product = product.into().trim().to_string();
        let audience = audience.into().trim().to_string();

        if product.is_empty() {
            return Err(CopyloopError::Configuration("product name must not be empty".to_string()));
        }
        if audience.is_empty() {
            return Err(CopyloopError::Configuration("target audience must not be empty".to_string()));
        }

        Ok(Self {
            product,
            audience,
            max_retries,
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Number of rejected rounds tolerated before the session gives up
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[derive(Deserialize)]
struct RawSessionContext {
    product: String,
    audience: String,
    max_retries: u32,
}

impl TryFrom<RawSessionContext> for SessionContext {
    type Error = CopyloopError;

    fn try_from(raw: RawSessionContext) -> Result<Self> {
        Self::new(raw.product, raw.audience, raw.max_retries)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}
