//! Browser client for the single-player pong round
//!
//! Simulation lives in `game_core`; this crate only handles input, the frame
//! loop, drawing and talking to the score store. Everything outside `app` and
//! `renderer` is plain Rust and tested natively.

pub mod device_id;
pub mod frame_loop;
pub mod input;
pub mod score_client;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod renderer;

#[cfg(target_arch = "wasm32")]
pub use app::PongGame;
