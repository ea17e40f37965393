//! Score store client
//!
//! Every call is best-effort: failures are logged and replaced by a neutral
//! value so gameplay never depends on the store being reachable.

use proto::{ScoreRequest, ScoreResponse, UserScore};

/// Create save request bytes
pub fn create_save_request(device_id: &str, score: u32) -> Result<Vec<u8>, String> {
    ScoreRequest::Save {
        device_id: device_id.to_string(),
        score,
    }
    .to_bytes()
    .map_err(|e| format!("Failed to serialize save request: {:?}", e))
}

/// Create top-score lookup bytes
pub fn create_top_request(device_id: &str) -> Result<Vec<u8>, String> {
    ScoreRequest::GetTop {
        device_id: device_id.to_string(),
    }
    .to_bytes()
    .map_err(|e| format!("Failed to serialize top score request: {:?}", e))
}

/// Create leaderboard request bytes
pub fn create_leaderboard_request(limit: u32) -> Result<Vec<u8>, String> {
    ScoreRequest::Leaderboard { limit }
        .to_bytes()
        .map_err(|e| format!("Failed to serialize leaderboard request: {:?}", e))
}

fn parse_response(bytes: &[u8]) -> Result<ScoreResponse, String> {
    match ScoreResponse::from_bytes(bytes) {
        Ok(ScoreResponse::Error { message }) => Err(format!("Score store error: {}", message)),
        Ok(response) => Ok(response),
        Err(e) => Err(format!("Failed to parse score response: {:?}", e)),
    }
}

/// Stored best after a save
pub fn parse_saved(bytes: &[u8]) -> Result<u32, String> {
    match parse_response(bytes)? {
        ScoreResponse::Saved { top_score, .. } => Ok(top_score),
        other => Err(format!("Expected Saved, got {:?}", other)),
    }
}

pub fn parse_top(bytes: &[u8]) -> Result<u32, String> {
    match parse_response(bytes)? {
        ScoreResponse::Top { top_score } => Ok(top_score),
        other => Err(format!("Expected Top, got {:?}", other)),
    }
}

pub fn parse_leaderboard(bytes: &[u8]) -> Result<Vec<UserScore>, String> {
    match parse_response(bytes)? {
        ScoreResponse::Leaderboard { entries } => Ok(entries),
        other => Err(format!("Expected Leaderboard, got {:?}", other)),
    }
}

#[cfg(target_arch = "wasm32")]
pub use remote::{RemoteScoreSink, ScoreClient};

#[cfg(target_arch = "wasm32")]
mod remote {
    use super::*;
    use game_core::ScoreSink;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    pub struct ScoreClient {
        endpoint: String,
        device_id: String,
    }

    impl ScoreClient {
        pub fn new(endpoint: &str, device_id: String) -> Self {
            Self {
                endpoint: endpoint.to_string(),
                device_id,
            }
        }

        pub fn device_id(&self) -> &str {
            &self.device_id
        }

        async fn post(&self, body: Vec<u8>) -> Result<Vec<u8>, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

            let headers = Headers::new()?;
            headers.set("Content-Type", "application/octet-stream")?;

            let init = RequestInit::new();
            init.set_method("POST");
            init.set_mode(RequestMode::SameOrigin);
            init.set_headers(&headers);
            let payload = js_sys::Uint8Array::from(body.as_slice());
            init.set_body(&payload);

            let request = Request::new_with_str_and_init(&self.endpoint, &init)?;
            let response: Response = JsFuture::from(window.fetch_with_request(&request))
                .await?
                .dyn_into()?;
            if !response.ok() {
                return Err(JsValue::from_str(&format!(
                    "Score store returned HTTP {}",
                    response.status()
                )));
            }

            let buffer = JsFuture::from(response.array_buffer()?).await?;
            Ok(js_sys::Uint8Array::new(&buffer).to_vec())
        }

        async fn exchange(&self, body: Result<Vec<u8>, String>) -> Result<Vec<u8>, String> {
            let body = body?;
            self.post(body)
                .await
                .map_err(|e| format!("Score request failed: {:?}", e))
        }

        /// Persist a finished round's score. Never fails from the caller's view.
        pub async fn save(&self, score: u32) {
            let result = self
                .exchange(create_save_request(&self.device_id, score))
                .await
                .and_then(|bytes| parse_saved(&bytes));
            if let Err(e) = result {
                web_sys::console::error_1(&format!("Error saving score: {}", e).into());
            }
        }

        /// Stored best for this device, 0 if unknown or unreachable
        pub async fn get_top(&self) -> u32 {
            let result = self
                .exchange(create_top_request(&self.device_id))
                .await
                .and_then(|bytes| parse_top(&bytes));
            result.unwrap_or_else(|e| {
                web_sys::console::error_1(&format!("Error getting top score: {}", e).into());
                0
            })
        }

        /// Best scores across devices, empty if unreachable
        pub async fn leaderboard(&self, limit: u32) -> Vec<UserScore> {
            let result = self
                .exchange(create_leaderboard_request(limit))
                .await
                .and_then(|bytes| parse_leaderboard(&bytes));
            result.unwrap_or_else(|e| {
                web_sys::console::error_1(&format!("Error getting top scores: {}", e).into());
                Vec::new()
            })
        }
    }

    /// Fire-and-forget submission of final scores
    pub struct RemoteScoreSink {
        client: Rc<ScoreClient>,
    }

    impl RemoteScoreSink {
        pub fn new(client: Rc<ScoreClient>) -> Self {
            Self { client }
        }
    }

    impl ScoreSink for RemoteScoreSink {
        fn submit(&self, score: u32) {
            if score == 0 {
                return;
            }
            let client = self.client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                client.save(score).await;
            });
        }
    }
}
