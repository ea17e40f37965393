use crate::{Config, GameRng};
use glam::Vec2;
use rand::Rng;

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32, // magnitude |vel| is only guaranteed right after increase_speed
    pub escaped: bool,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            speed,
            escaped: false,
        }
    }

    /// Ball at the arena centre with a fresh launch heading
    pub fn spawn(config: &Config, rng: &mut GameRng) -> Self {
        let mut ball = Self::new(
            config.arena_center(),
            Vec2::ZERO,
            config.ball_radius,
            config.ball_speed_initial,
        );
        ball.reset(config, rng);
        ball
    }

    /// Advance position by velocity, scaled to reference ticks
    pub fn integrate(&mut self, dt: f32, config: &Config) {
        self.pos += self.vel * config.normalize_dt(dt);
    }

    /// Bounce off the top, bottom and far (left) walls; escape past the right edge.
    ///
    /// Returns true if the ball bounced. Velocity components are forced to point
    /// away from a violated wall rather than flipped, so calling this twice in
    /// one tick leaves the same result. Only one axis changes per bounce, so
    /// |vel| is not renormalized here.
    pub fn reflect_off_walls(&mut self, config: &Config) -> bool {
        if self.escaped {
            return false;
        }

        let mut bounced = false;

        if self.pos.y - self.radius < 0.0 {
            self.vel.y = self.vel.y.abs();
            bounced = true;
        } else if self.pos.y + self.radius > config.arena_height {
            self.vel.y = -self.vel.y.abs();
            bounced = true;
        }

        // Far wall: plain mirror, there is no paddle there
        if self.pos.x - self.radius < 0.0 {
            self.vel.x = self.vel.x.abs();
            bounced = true;
        }

        // Paddle side: the ball got past the paddle
        if self.pos.x + self.radius > config.arena_width {
            self.vel = Vec2::ZERO;
            self.escaped = true;
        }

        bounced
    }

    /// Deflect off the paddle's left face on the tick of first contact.
    ///
    /// Requires the ball to move toward the paddle, its leading edge to have
    /// reached the face, its trailing edge to still be in front of the face and
    /// its vertical extent to overlap the paddle. On contact the ball is pushed
    /// back so its leading edge touches the face, vx flips and the speed grows
    /// by one increment (capped at the configured maximum).
    pub fn resolve_paddle_collision(
        &mut self,
        paddle_left: f32,
        paddle_top: f32,
        paddle_bottom: f32,
        config: &Config,
    ) -> bool {
        if self.vel.x <= 0.0 {
            return false;
        }
        if self.pos.x + self.radius < paddle_left {
            return false;
        }
        if self.pos.x - self.radius > paddle_left {
            return false;
        }
        if self.pos.y + self.radius < paddle_top || self.pos.y - self.radius > paddle_bottom {
            return false;
        }

        self.pos.x = paddle_left - self.radius;
        self.vel.x = -self.vel.x;

        if self.speed < config.ball_speed_max {
            let delta = config
                .ball_speed_increment
                .min(config.ball_speed_max - self.speed);
            self.increase_speed(delta);
        }

        true
    }

    /// Grow the speed and rescale velocity to it, keeping the heading
    pub fn increase_speed(&mut self, delta: f32) {
        self.speed += delta;
        let angle = self.vel.y.atan2(self.vel.x);
        self.vel = Vec2::new(angle.cos(), angle.sin()) * self.speed;
    }

    /// Re-centre with a fresh heading within the launch spread of the horizontal axis
    pub fn reset(&mut self, config: &Config, rng: &mut GameRng) {
        self.pos = config.arena_center();
        self.radius = config.ball_radius;
        self.speed = config.ball_speed_initial;
        self.vel = launch_velocity(self.speed, config.ball_launch_spread, rng);
        self.escaped = false;
    }

    /// Point the horizontal component at the paddle, keeping the sampled skew
    pub fn serve(&mut self) {
        if self.vel == Vec2::ZERO {
            self.vel = Vec2::new(self.speed, 0.0);
        } else {
            self.vel.x = self.vel.x.abs();
        }
    }

    /// Put a stalled, still-live ball back in motion toward the paddle.
    ///
    /// Returns true if a rescue happened.
    pub fn rescue_if_stalled(&mut self) -> bool {
        if self.escaped || self.vel != Vec2::ZERO {
            return false;
        }
        self.vel = Vec2::new(self.speed, 0.0);
        true
    }

    pub fn leading_edge(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn trailing_edge(&self) -> f32 {
        self.pos.x - self.radius
    }
}

/// Launch velocity: angle uniform in [-spread, spread], horizontal part toward the far wall
fn launch_velocity(speed: f32, spread: f32, rng: &mut GameRng) -> Vec2 {
    let angle: f32 = rng.0.gen_range(-spread..=spread);
    Vec2::new(-angle.cos() * speed, angle.sin() * speed)
}

/// Paddle component - the player's paddle on the right side of the arena
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub pos: Vec2, // top-left corner; x never changes after construction
    pub width: f32,
    pub height: f32,
    pub velocity: f32, // -speed, 0 or +speed
    pub dragging: bool,
    drag_start_y: f32,
    drag_start_pointer_y: f32,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec2::new(config.paddle_x(), config.paddle_center_y()),
            width: config.paddle_width,
            height: config.paddle_height,
            velocity: 0.0,
            dragging: false,
            drag_start_y: 0.0,
            drag_start_pointer_y: 0.0,
        }
    }

    /// Move by keyboard velocity. An active drag owns the paddle, so keys are ignored.
    pub fn integrate(&mut self, dt: f32, config: &Config) {
        if self.velocity == 0.0 || self.dragging {
            return;
        }
        self.pos.y += self.velocity * config.normalize_dt(dt);
        self.pos.y = config.clamp_paddle_y(self.pos.y);
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn start_drag(&mut self, pointer_y: f32) {
        self.dragging = true;
        self.drag_start_y = self.pos.y;
        self.drag_start_pointer_y = pointer_y;
    }

    /// Replay the pointer's offset since drag start (no snapping to the pointer)
    pub fn update_drag(&mut self, pointer_y: f32, config: &Config) {
        if !self.dragging {
            return;
        }
        let new_y = self.drag_start_y + (pointer_y - self.drag_start_pointer_y);
        self.pos.y = config.clamp_paddle_y(new_y);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Whether a point (arena coordinates) lies inside the paddle's bounding box
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}
