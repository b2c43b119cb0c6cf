//! Coordinate and cache entry types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resolved geographic position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    /// Canonical address as reported by the provider.
    pub formatted: String,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64, formatted: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            formatted: formatted.into(),
        }
    }
}

/// Outcome recorded for an address that has been attempted.
///
/// "Never attempted" is represented by the absence of an entry, so a
/// previously failed address stays distinguishable from an unseen one.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Resolved(Coordinate),
    Unresolved,
}

impl CacheEntry {
    pub fn from_outcome(outcome: Option<Coordinate>) -> Self {
        match outcome {
            Some(c) => CacheEntry::Resolved(c),
            None => CacheEntry::Unresolved,
        }
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        match self {
            CacheEntry::Resolved(c) => Some(c),
            CacheEntry::Unresolved => None,
        }
    }

    pub fn into_coordinate(self) -> Option<Coordinate> {
        match self {
            CacheEntry::Resolved(c) => Some(c),
            CacheEntry::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CacheEntry::Resolved(_))
    }
}

/// Address → coordinate, successful resolutions only.
pub type ResultMapping = HashMap<String, Coordinate>;
