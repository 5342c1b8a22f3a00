use super::types::*;
use crate::error::{Result, StarforceError};
use serde::{Deserialize, Serialize};

/// A validated calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarforceRequest {
    pub item_strength: u32,
    pub start: u32,
    pub target: u32,
    /// MVP discount fraction in [0, 1], applied up to star 15.
    pub mvp_discount: f64,
    pub flags: ModifierFlags,
}

impl StarforceRequest {
    pub fn new(
        item_strength: u32,
        start: u32,
        target: u32,
        mvp_discount: f64,
        flags: ModifierFlags,
    ) -> Result<Self> {
        let request = Self {
            item_strength,
            start,
            target,
            mvp_discount,
            flags,
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a request from raw text fields as typed by a user.
    pub fn parse(
        item_strength: &str,
        start: &str,
        target: &str,
        mvp_discount: f64,
        flags: ModifierFlags,
    ) -> Result<Self> {
        let item_strength = parse_field("item strength", item_strength)?;
        let start = parse_field("current star", start)?;
        let target = parse_field("target star", target)?;
        Self::new(item_strength, start, target, mvp_discount, flags)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target < self.start || self.target > MAX_STAR {
            return Err(StarforceError::InvalidRange {
                start: self.start,
                target: self.target,
            });
        }
        if !(0.0..=1.0).contains(&self.mvp_discount) {
            return Err(StarforceError::InvalidInput {
                field: "mvp discount",
                value: self.mvp_discount.to_string(),
            });
        }
        Ok(())
    }
}

/// Parse a non-negative integer field. Empty, signed or fractional text
/// is rejected.
pub fn parse_field(field: &'static str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StarforceError::InvalidInput {
            field,
            value: raw.to_string(),
        });
    }
    trimmed.parse().map_err(|_| StarforceError::InvalidInput {
        field,
        value: raw.to_string(),
    })
}
