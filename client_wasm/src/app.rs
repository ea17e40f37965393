//! Browser entry point: wires the DOM to a `Round`

use crate::device_id;
use crate::frame_loop::{AnimationFrameScheduler, FrameLoop};
use crate::input::{key_direction, to_arena, CanvasRect};
use crate::renderer::Renderer;
use crate::score_client::{RemoteScoreSink, ScoreClient};
use game_core::{Config, Round};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent};

struct Inner {
    round: Round,
    renderer: Renderer,
    frames: FrameLoop<AnimationFrameScheduler>,
    canvas: HtmlCanvasElement,
}

impl Inner {
    fn on_frame(&mut self, timestamp: f64) {
        if !self.frames.fired() {
            return;
        }

        self.round.frame(timestamp);
        if let Err(e) = self.renderer.draw(&self.round.snapshot()) {
            console::error_1(&e);
        }

        if let Err(e) = self.frames.arm() {
            console::error_1(&e.into());
        }
    }

    /// Pointer position in arena coordinates
    fn arena_point(&self, event: &PointerEvent) -> Vec2 {
        let bounds = self.canvas.get_bounding_client_rect();
        let rect = CanvasRect {
            left: bounds.left() as f32,
            top: bounds.top() as f32,
            width: bounds.width() as f32,
            height: bounds.height() as f32,
        };
        let arena = Vec2::new(self.round.config.arena_width, self.round.config.arena_height);
        to_arena(event.client_x() as f32, event.client_y() as f32, rect, arena)
    }
}

/// DOM listener that detaches itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
pub struct PongGame {
    inner: Rc<RefCell<Inner>>,
    client: Rc<ScoreClient>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PongGame {
    /// Set up a round on `canvas`, posting scores to `endpoint`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, endpoint: String) -> Result<PongGame, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let device_id = device_id::get_or_create().unwrap_or_else(|e| {
            console::warn_2(&"Device id cookie unavailable, using a session id:".into(), &e);
            device_id::generate()
        });
        let client = Rc::new(ScoreClient::new(&endpoint, device_id));

        let round = Round::new(
            Config::new(),
            random_seed()?,
            Box::new(RemoteScoreSink::new(client.clone())),
        )
        .map_err(|e| JsValue::from_str(&e))?;
        let renderer = Renderer::new(&canvas)?;
        renderer.draw(&round.snapshot())?;

        let inner = Rc::new(RefCell::new(Inner {
            round,
            renderer,
            frames: FrameLoop::new(AnimationFrameScheduler::new(window.clone())),
            canvas: canvas.clone(),
        }));

        // The scheduler lives inside `inner`, so the callback only holds a weak ref
        let weak = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().on_frame(timestamp);
            }
        });
        inner
            .borrow_mut()
            .frames
            .scheduler_mut()
            .set_callback(callback);

        let listeners = attach_listeners(&window, &canvas, &inner)?;

        let weak = Rc::downgrade(&inner);
        let loader = client.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let top = loader.get_top().await;
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().round.set_top_score(top);
            }
        });

        inner.borrow_mut().frames.arm().map_err(|e| JsValue::from_str(&e))?;
        console::log_1(&format!("Pong ready for device {}", client.device_id()).into());

        Ok(PongGame {
            inner,
            client,
            listeners,
        })
    }

    pub fn start(&self) -> bool {
        self.inner.borrow_mut().round.start()
    }

    pub fn restart(&self) -> bool {
        self.inner.borrow_mut().round.restart()
    }

    /// Tear down: cancel the pending frame and detach every listener
    pub fn stop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.frames.cancel();
        }
        self.listeners.clear();
    }

    pub fn score(&self) -> u32 {
        self.inner.borrow().round.score()
    }

    pub fn top_score(&self) -> u32 {
        self.inner.borrow().round.top_score()
    }

    /// "not-started", "playing" or "over"
    pub fn state(&self) -> String {
        self.inner.borrow().round.state().as_str().to_string()
    }

    /// Resolves to an array of `{ deviceId, topScore, lastUpdated }`, empty on failure
    pub fn leaderboard(&self, limit: u32) -> js_sys::Promise {
        let client = self.client.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let entries = js_sys::Array::new();
            for entry in client.leaderboard(limit).await {
                let obj = js_sys::Object::new();
                js_sys::Reflect::set(&obj, &"deviceId".into(), &entry.device_id.into())?;
                js_sys::Reflect::set(&obj, &"topScore".into(), &entry.top_score.into())?;
                js_sys::Reflect::set(
                    &obj,
                    &"lastUpdated".into(),
                    &JsValue::from_f64(entry.last_updated as f64),
                )?;
                entries.push(&obj);
            }
            Ok(entries.into())
        })
    }
}

impl Drop for PongGame {
    fn drop(&mut self) {
        self.stop();
    }
}

fn random_seed() -> Result<u64, JsValue> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| JsValue::from_str(&format!("Failed to seed RNG: {}", e)))?;
    Ok(u64::from_le_bytes(bytes))
}

fn attach_listeners(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    inner: &Rc<RefCell<Inner>>,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    let state = inner.clone();
    listeners.push(Listener::attach(window, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(dir) = key_direction(&event.key()) {
            event.prevent_default();
            state.borrow_mut().round.key_down(dir);
        }
    })?);

    let state = inner.clone();
    listeners.push(Listener::attach(window, "keyup", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(dir) = key_direction(&event.key()) {
            state.borrow_mut().round.key_up(dir);
        }
    })?);

    let state = inner.clone();
    listeners.push(Listener::attach(canvas, "pointerdown", move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let mut inner = state.borrow_mut();
        let point = inner.arena_point(event);
        if inner.round.pointer_down(point) {
            event.prevent_default();
            if let Err(e) = inner.canvas.set_pointer_capture(event.pointer_id()) {
                console::warn_2(
                    &"Pointer capture failed, drag ends on window pointerup:".into(),
                    &e,
                );
            }
        }
    })?);

    let state = inner.clone();
    listeners.push(Listener::attach(canvas, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let mut inner = state.borrow_mut();
        let point = inner.arena_point(event);
        inner.round.pointer_move(point.y);
    })?);

    // On the window so a release outside the canvas still ends the drag
    for kind in ["pointerup", "pointercancel"] {
        let state = inner.clone();
        listeners.push(Listener::attach(window, kind, move |_event| {
            state.borrow_mut().round.pointer_up();
        })?);
    }

    // Refreshes stop while the page is hidden; resume without a catch-up step
    if let Some(document) = window.document() {
        let state = inner.clone();
        listeners.push(Listener::attach(&document, "visibilitychange", move |_event| {
            state.borrow_mut().round.clock.rearm();
        })?);
    }

    Ok(listeners)
}
