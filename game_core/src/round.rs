//! Round controller: owns the world and drives one play-through per round.

use crate::fsm::{RoundAction, RoundFsm, RoundState};
use crate::{
    create_ball, create_paddle, step, Ball, Config, Direction, Events, FrameClock, GameRng,
    KeyState, Paddle, Score,
};
use glam::Vec2;
use hecs::{Entity, World};

/// Receives the final score of each finished round.
///
/// `submit` must return immediately. Whatever the store does with the score
/// (including failing) never feeds back into the round.
pub trait ScoreSink {
    fn submit(&self, score: u32);
}

/// Sink for offline play
pub struct NullSink;

impl ScoreSink for NullSink {
    fn submit(&self, _score: u32) {}
}

/// Read-only view for the renderer and the surrounding UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_radius: f32,
    pub paddle_x: f32,
    pub paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub score: u32,
    pub top_score: u32,
    pub state: RoundState,
}

pub struct Round {
    pub world: World,
    pub config: Config,
    pub rng: GameRng,
    pub events: Events,
    pub clock: FrameClock,
    pub score: Score,
    pub keys: KeyState,
    fsm: RoundFsm,
    ball: Entity,
    paddle: Entity,
    over_handled: bool, // termination guard, re-armed on (re)start
    sink: Box<dyn ScoreSink>,
}

impl Round {
    pub fn new(config: Config, seed: u64, sink: Box<dyn ScoreSink>) -> Result<Self, String> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);
        let ball = create_ball(&mut world, Ball::spawn(&config, &mut rng));
        let paddle = create_paddle(&mut world, &config);

        Ok(Self {
            world,
            config,
            rng,
            events: Events::new(),
            clock: FrameClock::new(),
            score: Score::new(),
            keys: KeyState::new(),
            fsm: RoundFsm::new(),
            ball,
            paddle,
            over_handled: false,
            sink,
        })
    }

    /// NotStarted -> Playing. Launches the ball toward the paddle.
    pub fn start(&mut self) -> bool {
        let result = self.fsm.transition(RoundAction::Start);
        if !result.success {
            tracing::debug!(state = ?result.from_state, "start ignored");
            return false;
        }

        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.serve();
        }
        self.over_handled = false;
        self.clock.rearm();
        tracing::info!("round started");
        true
    }

    /// Over -> Playing (or straight from a fresh round): new ball, new paddle, score 0.
    pub fn restart(&mut self) -> bool {
        if !self.fsm.can_transition(RoundAction::Restart) {
            tracing::debug!(state = ?self.fsm.state(), "restart ignored");
            return false;
        }

        self.world.clear();
        let mut ball = Ball::spawn(&self.config, &mut self.rng);
        ball.serve();
        self.ball = create_ball(&mut self.world, ball);
        self.paddle = create_paddle(&mut self.world, &self.config);

        self.score.reset();
        self.keys = KeyState::new();
        self.events.clear();
        self.over_handled = false;
        self.clock.rearm();
        self.fsm.transition(RoundAction::Restart);

        tracing::info!(top_score = self.score.top, "round restarted");
        true
    }

    /// Advance the simulation by `dt` ms. Returns the number of paddle hits.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.fsm.is_playing() {
            return 0;
        }

        let hits = step(&mut self.world, dt, &self.config, &mut self.events);
        for _ in 0..hits {
            self.score.increment();
        }

        if self.events.ball_escaped && !self.over_handled {
            self.finish();
        }

        hits
    }

    /// Drive one display refresh: turn the timestamp into dt and tick.
    ///
    /// The elapsed time is capped at `max_frame_dt` and run as ticks of at most
    /// one reference tick each, so no single step moves the ball further than
    /// its own diameter.
    pub fn frame(&mut self, timestamp: f64) -> u32 {
        let mut remaining = self.clock.advance(timestamp, self.config.max_frame_dt);
        let mut hits = 0;
        while remaining > 0.0 && self.fsm.is_playing() {
            let dt = remaining.min(self.config.reference_tick);
            hits += self.tick(dt);
            remaining -= dt;
        }
        hits
    }

    fn finish(&mut self) {
        self.over_handled = true;
        self.fsm.transition(RoundAction::Escape);

        let final_score = self.score.current;
        let new_best = self.score.record_final();
        tracing::info!(score = final_score, new_best, "round over");

        self.sink.submit(final_score);
    }

    pub fn key_down(&mut self, dir: Direction) {
        self.keys.press(dir);
        self.apply_keys();
    }

    pub fn key_up(&mut self, dir: Direction) {
        self.keys.release(dir);
        self.apply_keys();
    }

    fn apply_keys(&mut self) {
        let velocity = self.keys.direction() as f32 * self.config.paddle_speed;
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddle) {
            paddle.set_velocity(velocity);
        }
    }

    /// Start a drag if the pointer (arena coordinates) is on the paddle
    pub fn pointer_down(&mut self, point: Vec2) -> bool {
        match self.world.get::<&mut Paddle>(self.paddle) {
            Ok(mut paddle) if paddle.contains(point) => {
                paddle.start_drag(point.y);
                true
            }
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, pointer_y: f32) {
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddle) {
            paddle.update_drag(pointer_y, &self.config);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddle) {
            paddle.end_drag();
        }
    }

    /// Merge a stored top score that arrived asynchronously
    pub fn set_top_score(&mut self, top: u32) {
        self.score.merge_top(top);
    }

    pub fn state(&self) -> RoundState {
        self.fsm.state()
    }

    pub fn score(&self) -> u32 {
        self.score.current
    }

    pub fn top_score(&self) -> u32 {
        self.score.top
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|b| *b)
    }

    pub fn paddle(&self) -> Option<Paddle> {
        self.world.get::<&Paddle>(self.paddle).ok().map(|p| *p)
    }

    pub fn snapshot(&self) -> Snapshot {
        let center = self.config.arena_center();
        let (ball_x, ball_y, ball_radius) = self
            .ball()
            .map(|b| (b.pos.x, b.pos.y, b.radius))
            .unwrap_or((center.x, center.y, self.config.ball_radius));
        let (paddle_x, paddle_y) = self
            .paddle()
            .map(|p| (p.pos.x, p.pos.y))
            .unwrap_or((self.config.paddle_x(), self.config.paddle_center_y()));

        Snapshot {
            ball_x,
            ball_y,
            ball_radius,
            paddle_x,
            paddle_y,
            paddle_width: self.config.paddle_width,
            paddle_height: self.config.paddle_height,
            score: self.score.current,
            top_score: self.score.top,
            state: self.fsm.state(),
        }
    }
}
