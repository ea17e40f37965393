//! Score service protocol
//!
//! Uses postcard for efficient binary serialization

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

/// Leaderboard size when the caller does not ask for one
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// Largest leaderboard the service will return
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

/// Stored best score for one device identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    pub device_id: String,
    pub top_score: u32,
    pub last_updated: u64, // ms since Unix epoch
}

// ============================================================================
// Requests (client to score service)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreRequest {
    /// Record a finished round; stored only if it beats the device's best
    Save { device_id: String, score: u32 },

    /// Best score for a device (0 if none)
    GetTop { device_id: String },

    /// Best scores across all devices, highest first
    Leaderboard { limit: u32 },
}

// ============================================================================
// Responses (score service to client)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreResponse {
    Saved { updated: bool, top_score: u32 },
    Top { top_score: u32 },
    Leaderboard { entries: Vec<UserScore> },
    Error { message: String },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl ScoreRequest {
    /// Serialize request to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize request from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl ScoreResponse {
    /// Serialize response to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize response from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

/// Clamp a requested leaderboard size into 1..=MAX_LEADERBOARD_LIMIT (0 means default)
pub fn clamp_leaderboard_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_LEADERBOARD_LIMIT
    } else {
        limit.min(MAX_LEADERBOARD_LIMIT)
    }
}
