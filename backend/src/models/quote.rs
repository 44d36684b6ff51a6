//! Quote model
//!
//! A quote pairs a project input with the breakdown computed for it and
//! the fingerprint of the rate configuration used. Quotes are plain values;
//! storing them is left to the caller.
//!
//! A deserialized quote is checked the same way: well-formed id, valid
//! input, a breakdown whose area matches that input and a SHA256 hex
//! fingerprint.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::breakdown::CostBreakdown;
use super::project::ProjectInput;
use crate::estimator::EstimateError;

/// Prefix of every quote identifier
pub const QUOTE_ID_PREFIX: &str = "QT-";

/// Hex length of a SHA256 digest
const CONFIG_HASH_LEN: usize = 64;

/// Errors raised when a deserialized quote is inconsistent
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Quote id '{0}' is not 'QT-' followed by a UUID")]
    InvalidId(String),

    #[error("Quoted project is invalid: {0}")]
    InvalidInput(#[from] EstimateError),

    #[error("Breakdown area {breakdown_area} does not match project area {input_area}")]
    AreaMismatch { input_area: f64, breakdown_area: f64 },

    #[error("Config hash '{0}' is not a SHA256 hex digest")]
    InvalidConfigHash(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuote")]
pub struct Quote {
    /// Unique quote identifier (`QT-` + UUID)
    id: String,

    input: ProjectInput,

    breakdown: CostBreakdown,

    /// SHA256 fingerprint of the estimator config that priced this quote
    config_hash: String,
}

/// Unchecked wire form of a quote
#[derive(Deserialize)]
struct RawQuote {
    id: String,
    input: ProjectInput,
    breakdown: CostBreakdown,
    config_hash: String,
}

impl TryFrom<RawQuote> for Quote {
    type Error = QuoteError;

    fn try_from(raw: RawQuote) -> Result<Self, Self::Error> {
        let id_is_valid = raw
            .id
            .strip_prefix(QUOTE_ID_PREFIX)
            .is_some_and(|uuid| Uuid::parse_str(uuid).is_ok());
        if !id_is_valid {
            return Err(QuoteError::InvalidId(raw.id));
        }

        raw.input.validate()?;
        let input_area = raw.input.total_area();
        let breakdown_area = raw.breakdown.total_area();
        if (input_area - breakdown_area).abs() > 1e-9 * input_area.abs().max(1.0) {
            return Err(QuoteError::AreaMismatch {
                input_area,
                breakdown_area,
            });
        }

        let hash_is_valid = raw.config_hash.len() == CONFIG_HASH_LEN
            && raw
                .config_hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !hash_is_valid {
            return Err(QuoteError::InvalidConfigHash(raw.config_hash));
        }

        Ok(Self {
            id: raw.id,
            input: raw.input,
            breakdown: raw.breakdown,
            config_hash: raw.config_hash,
        })
    }
}

impl Quote {
    pub(crate) fn new(input: ProjectInput, breakdown: CostBreakdown, config_hash: String) -> Self {
        Self {
            id: format!("{}{}", QUOTE_ID_PREFIX, Uuid::new_v4().simple()),
            input,
            breakdown,
            config_hash,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Convenience accessor for the quoted total
    pub fn total_estimate(&self) -> f64 {
        self.breakdown.total_estimate()
    }
}
