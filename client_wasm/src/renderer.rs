//! Canvas 2D renderer. Read-only view of the round, drawn every refresh.

use game_core::Snapshot;
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "black";
const BALL_COLOR: &str = "#1c93e8";
const PADDLE_COLOR: &str = "#ffffff";

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn draw(&self, snapshot: &Snapshot) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.ctx.set_fill_style_str(PADDLE_COLOR);
        self.ctx.fill_rect(
            snapshot.paddle_x as f64,
            snapshot.paddle_y as f64,
            snapshot.paddle_width as f64,
            snapshot.paddle_height as f64,
        );

        self.ctx.set_fill_style_str(BALL_COLOR);
        self.ctx.begin_path();
        self.ctx.arc(
            snapshot.ball_x as f64,
            snapshot.ball_y as f64,
            snapshot.ball_radius as f64,
            0.0,
            TAU,
        )?;
        self.ctx.fill();

        Ok(())
    }
}
