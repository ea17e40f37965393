mod score_table;


pub use score_table::{
    score_key, Environment, Leaderboard, ScoreService, WasmEnv, LEADERBOARD_KEY,
    MAX_DEVICE_ID_LEN,
};

use proto::*;
use serde::de::DeserializeOwned;
use worker::*;

#[durable_object]
pub struct ScoreBoardDO {
    state: State,
    #[allow(dead_code)]
    env: Env,
    service: ScoreService,
}

impl DurableObject for ScoreBoardDO {
    fn new(state: State, env: Env) -> Self {
        Self {
            state,
            env,
            service: ScoreService::new(Box::new(WasmEnv)),
        }
    }

    async fn fetch(&self, mut req: Request) -> Result<Response> {
        if req.method() != Method::Post {
            return Response::error("Expected POST with a score request", 405);
        }

        let body = req.bytes().await?;
        let request = match ScoreRequest::from_bytes(&body) {
            Ok(request) => request,
            Err(e) => {
                self.service
                    .env
                    .error(format!("DO: Failed to parse score request: {e:?}"));
                let response = ScoreResponse::Error {
                    message: "malformed score request".to_string(),
                };
                return Ok(Self::respond(&response)?.with_status(400));
            }
        };

        if let Err(response) = self.service.check(&request) {
            return Ok(Self::respond(&response)?.with_status(400));
        }

        let response = match self.apply(request).await {
            Ok(response) => response,
            Err(e) => {
                self.service
                    .env
                    .error(format!("DO: Score storage failed: {e:?}"));
                return Response::error("Score storage unavailable", 500);
            }
        };

        Self::respond(&response)
    }
}

impl ScoreBoardDO {
    /// Each device's best lives under its own key; the leaderboard is a
    /// separate bounded value updated only when a save changes its ranking.
    async fn apply(&self, request: ScoreRequest) -> Result<ScoreResponse> {
        let storage = self.state.storage();

        match request {
            ScoreRequest::Save { device_id, score } => {
                let key = score_key(&device_id);
                let stored = Self::load::<UserScore>(&storage, &key).await?;
                let (response, update) = self.service.save(stored, &device_id, score);

                if let Some(entry) = update {
                    storage.put(&key, &entry).await?;

                    let mut board = Self::load::<Leaderboard>(&storage, LEADERBOARD_KEY)
                        .await?
                        .unwrap_or_default();
                    if board.record(entry) {
                        storage.put(LEADERBOARD_KEY, &board).await?;
                    }
                }
                Ok(response)
            }
            ScoreRequest::GetTop { device_id } => {
                let stored = Self::load::<UserScore>(&storage, &score_key(&device_id)).await?;
                Ok(self.service.top(stored.as_ref()))
            }
            ScoreRequest::Leaderboard { limit } => {
                let board = Self::load::<Leaderboard>(&storage, LEADERBOARD_KEY)
                    .await?
                    .unwrap_or_default();
                Ok(self.service.leaderboard(&board, limit))
            }
        }
    }

    async fn load<T: DeserializeOwned>(storage: &Storage, key: &str) -> Result<Option<T>> {
        storage.get::<T>(key).await
    }

    fn respond(response: &ScoreResponse) -> Result<Response> {
        let bytes = response
            .to_bytes()
            .map_err(|e| Error::RustError(format!("Failed to serialize ScoreResponse: {e:?}")))?;
        Response::from_bytes(bytes)
    }
}
