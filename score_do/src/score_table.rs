use js_sys::Date;
use proto::*;
use serde::{Deserialize, Serialize};
use worker::*;

/// Device ids are UUID strings; anything longer is rejected
pub const MAX_DEVICE_ID_LEN: usize = 36;

/// Storage key of the ranked leaderboard
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// Storage key of one device's best score
pub fn score_key(device_id: &str) -> String {
    format!("score:{device_id}")
}

// Abstract environment (Time, Logging)
pub trait Environment {
    fn now(&self) -> u64; // ms
    fn log(&self, msg: String);
    fn error(&self, msg: String);
}

pub struct WasmEnv;

impl Environment for WasmEnv {
    fn now(&self) -> u64 {
        Date::now() as u64
    }

    fn log(&self, msg: String) {
        console_log!("{}", msg);
    }

    fn error(&self, msg: String) {
        console_error!("{}", msg);
    }
}

/// Best scores across devices, highest first, at most `MAX_LEADERBOARD_LIMIT` entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<UserScore>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a device's entry. Returns true if the board changed.
    pub fn record(&mut self, entry: UserScore) -> bool {
        let before = self.entries.clone();

        self.entries.retain(|e| e.device_id != entry.device_id);
        self.entries.push(entry);
        // Ties go to whoever got there earlier
        self.entries.sort_by(|a, b| {
            b.top_score
                .cmp(&a.top_score)
                .then(a.last_updated.cmp(&b.last_updated))
        });
        self.entries.truncate(MAX_LEADERBOARD_LIMIT as usize);

        self.entries != before
    }

    pub fn top(&self, limit: u32) -> Vec<UserScore> {
        self.entries
            .iter()
            .take(clamp_leaderboard_limit(limit) as usize)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decides score requests against whatever the caller loaded from storage
pub struct ScoreService {
    pub env: Box<dyn Environment>,
}

impl ScoreService {
    pub fn new(env: Box<dyn Environment>) -> Self {
        Self { env }
    }

    /// Reject requests naming an unusable device id
    pub fn check(&self, request: &ScoreRequest) -> std::result::Result<(), ScoreResponse> {
        let device_id = match request {
            ScoreRequest::Save { device_id, .. } | ScoreRequest::GetTop { device_id } => device_id,
            ScoreRequest::Leaderboard { .. } => return Ok(()),
        };

        if device_id.is_empty() {
            return Err(Self::invalid_device("device_id must not be empty"));
        }
        if device_id.len() > MAX_DEVICE_ID_LEN {
            self.env.error(format!(
                "DO: Rejected device_id of {} bytes",
                device_id.len()
            ));
            return Err(Self::invalid_device("device_id is too long"));
        }
        Ok(())
    }

    /// Compare `score` with the stored entry. Returns the response and the
    /// entry to write back, if it beats the stored best.
    pub fn save(
        &self,
        stored: Option<UserScore>,
        device_id: &str,
        score: u32,
    ) -> (ScoreResponse, Option<UserScore>) {
        let best = stored.as_ref().map(|e| e.top_score).unwrap_or(0);
        if score <= best {
            return (
                ScoreResponse::Saved {
                    updated: false,
                    top_score: best,
                },
                None,
            );
        }

        self.env
            .log(format!("DO: New top score {score} for device {device_id}"));
        let entry = UserScore {
            device_id: device_id.to_string(),
            top_score: score,
            last_updated: self.env.now(),
        };
        (
            ScoreResponse::Saved {
                updated: true,
                top_score: score,
            },
            Some(entry),
        )
    }

    /// Stored best; 0 if the device has never saved one
    pub fn top(&self, stored: Option<&UserScore>) -> ScoreResponse {
        ScoreResponse::Top {
            top_score: stored.map(|e| e.top_score).unwrap_or(0),
        }
    }

    pub fn leaderboard(&self, board: &Leaderboard, limit: u32) -> ScoreResponse {
        ScoreResponse::Leaderboard {
            entries: board.top(limit),
        }
    }

    fn invalid_device(message: &str) -> ScoreResponse {
        ScoreResponse::Error {
            message: message.to_string(),
        }
    }
}
