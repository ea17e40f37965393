use crate::params::Params;
use glam::Vec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_increment: f32,
    pub ball_speed_max: f32,
    pub ball_launch_spread: f32,
    pub reference_tick: f32,
    pub max_frame_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_launch_spread: Params::BALL_LAUNCH_SPREAD,
            reference_tick: Params::REFERENCE_TICK,
            max_frame_dt: Params::MAX_FRAME_DT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// X of the paddle's left face (fixed for the whole round)
    pub fn paddle_x(&self) -> f32 {
        self.arena_width - self.paddle_margin
    }

    /// Top-left Y of a vertically centred paddle
    pub fn paddle_center_y(&self) -> f32 {
        self.arena_height / 2.0 - self.paddle_height / 2.0
    }

    /// Clamp a paddle's top edge so the whole paddle stays inside the arena
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.arena_height - self.paddle_height)
    }

    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Convert elapsed time into reference ticks (1.0 == one 60 Hz frame)
    pub fn normalize_dt(&self, dt: f32) -> f32 {
        dt / self.reference_tick
    }

    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
            ("reference_tick", self.reference_tick),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and > 0"));
            }
        }
        if !self.ball_speed_increment.is_finite() || self.ball_speed_increment < 0.0 {
            return Err("ball_speed_increment must be finite and >= 0".to_string());
        }
        if self.ball_speed_max < self.ball_speed_initial {
            return Err("ball_speed_max must be >= ball_speed_initial".to_string());
        }
        if !self.ball_launch_spread.is_finite()
            || self.ball_launch_spread < 0.0
            || self.ball_launch_spread >= std::f32::consts::FRAC_PI_2
        {
            return Err("ball_launch_spread must be in [0, PI/2)".to_string());
        }
        if self.paddle_height >= self.arena_height {
            return Err("paddle_height must be smaller than arena_height".to_string());
        }
        if self.paddle_margin < self.paddle_width || self.paddle_margin >= self.arena_width {
            return Err("paddle must fit inside the arena (paddle_width <= paddle_margin < arena_width)".to_string());
        }
        Ok(())
    }
}
