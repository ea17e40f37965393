use proto::*;
use worker::*;

// Export the Durable Object from score_do
pub use score_do::ScoreBoardDO;

/// Every device shares one score board object
const SCORE_BOARD_NAME: &str = "global";

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: worker::Context) -> Result<Response> {
    let router = Router::new();

    router
        .get_async("/", handle_index)
        .post_async("/api/score", handle_score)
        .get_async("/api/leaderboard", handle_leaderboard)
        .run(req, env)
        .await
}

async fn handle_index(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    // In production, this would be served from static assets
    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>BRUIN PONG</title>
    <style>
        body { margin: 0; padding: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; background: #1a1a1a; color: #fff; font-family: monospace; }
        #canvas { border: 2px solid #00ff88; display: block; margin: 0 auto; background: #000; touch-action: none; }
        #ui { margin-top: 20px; text-align: center; }
        #status { margin: 10px 0; padding: 10px; background: #333; border-radius: 4px; }
        button { padding: 8px 16px; margin: 5px; font-family: monospace; font-size: 14px; background: #4a9eff; color: white; border: none; border-radius: 4px; cursor: pointer; }
        button:hover { background: #5aaeff; }
        button:disabled { background: #666; cursor: not-allowed; }
    </style>
</head>
<body>
    <h1>BRUIN PONG</h1>
    <canvas id="canvas" width="800" height="600"></canvas>
    <div id="ui">
        <div id="status">Loading WASM...</div>
        <div>Score: <span id="score">0</span> &middot; Top: <span id="top">0</span></div>
        <div>
            <button id="startBtn" disabled>Start</button>
            <button id="restartBtn" disabled>Play Again</button>
        </div>
        <div style="margin-top: 10px; font-size: 12px; color: #888;">
            Controls: W/S or Arrow Up/Down, or drag the paddle
        </div>
    </div>
    <script type="module">
        import init, { PongGame } from './pkg/client_wasm.js';

        let game = null;

        async function main() {
            try {
                await init();
                const canvas = document.getElementById('canvas');
                if (!canvas) throw new Error('Canvas not found');
                game = new PongGame(canvas, '/api/score');
                document.getElementById('startBtn').disabled = false;
                document.getElementById('startBtn').onclick = () => game.start();
                document.getElementById('restartBtn').onclick = () => game.restart();
                window.addEventListener('pagehide', () => game.stop());
                setInterval(updateUi, 100);
            } catch (error) {
                console.error('Error:', error);
                document.getElementById('status').textContent = 'Error: ' + error.message;
            }
        }

        function updateUi() {
            const state = game.state();
            document.getElementById('score').textContent = game.score();
            document.getElementById('top').textContent = game.top_score();
            document.getElementById('startBtn').disabled = state !== 'not-started';
            document.getElementById('restartBtn').disabled = state !== 'over';
            document.getElementById('status').textContent =
                state === 'over' ? 'Game over' : state === 'playing' ? 'Playing' : 'Press Start';
        }

        main();
    </script>
</body>
</html>"#;
    Response::from_html(html)
}

/// Forward a postcard-encoded score request to the score board object
async fn handle_score(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let stub = ctx
        .env
        .durable_object("SCORES")?
        .get_by_name(SCORE_BOARD_NAME)?;
    stub.fetch_with_request(req).await
}

/// Human-readable leaderboard: GET /api/leaderboard?limit=N
async fn handle_leaderboard(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let url = req.url()?;
    let limit = parse_limit(
        url.query_pairs()
            .find(|(k, _)| k == "limit")
            .map(|(_, v)| v.into_owned()),
    );

    let body = ScoreRequest::Leaderboard { limit }
        .to_bytes()
        .map_err(|e| Error::RustError(format!("Failed to serialize Leaderboard request: {e:?}")))?;

    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_body(Some(js_sys::Uint8Array::from(body.as_slice()).into()));
    let forward = Request::new_with_init("https://scores/api/score", &init)?;

    let stub = ctx
        .env
        .durable_object("SCORES")?
        .get_by_name(SCORE_BOARD_NAME)?;
    let mut upstream = stub.fetch_with_request(forward).await?;
    let bytes = upstream.bytes().await?;

    match leaderboard_json(&bytes) {
        Ok(json) => {
            let mut headers = Headers::new();
            headers.set("Content-Type", "application/json")?;
            Ok(Response::ok(json)?.with_headers(headers))
        }
        Err(e) => {
            console_error!("Leaderboard lookup failed: {}", e);
            Response::error("Leaderboard unavailable", 502)
        }
    }
}

/// `limit` query value; missing or unparsable means the default size
fn parse_limit(raw: Option<String>) -> u32 {
    let requested = raw.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(0);
    clamp_leaderboard_limit(requested)
}

/// Turn the score board's binary answer into a JSON array of entries
fn leaderboard_json(bytes: &[u8]) -> std::result::Result<String, String> {
    match ScoreResponse::from_bytes(bytes) {
        Ok(ScoreResponse::Leaderboard { entries }) => {
            serde_json::to_string(&entries).map_err(|e| format!("Failed to encode JSON: {e}"))
        }
        Ok(ScoreResponse::Error { message }) => Err(message),
        Ok(other) => Err(format!("Unexpected response: {other:?}")),
        Err(e) => Err(format!("Failed to parse ScoreResponse: {e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), DEFAULT_LEADERBOARD_LIMIT);
        assert_eq!(parse_limit(Some("5".to_string())), 5);
        assert_eq!(parse_limit(Some("abc".to_string())), DEFAULT_LEADERBOARD_LIMIT);
        assert_eq!(parse_limit(Some("100000".to_string())), MAX_LEADERBOARD_LIMIT);
    }

    #[test]
    fn test_leaderboard_json() {
        let response = ScoreResponse::Leaderboard {
            entries: vec![UserScore {
                device_id: "abc".to_string(),
                top_score: 7,
                last_updated: 42,
            }],
        };
        let json = leaderboard_json(&response.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"[{"device_id":"abc","top_score":7,"last_updated":42}]"#);
    }

    #[test]
    fn test_leaderboard_json_rejects_other_responses() {
        let response = ScoreResponse::Top { top_score: 3 };
        assert!(leaderboard_json(&response.to_bytes().unwrap()).is_err());
        assert!(leaderboard_json(&[0xff]).is_err());
    }
}
