/// Game tuning parameters for single-player Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (origin top-left, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 30.0; // gap between paddle's left face and the right edge
    pub const PADDLE_SPEED: f32 = 8.0; // units per reference tick

    // Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_INITIAL: f32 = 5.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.5; // added on every paddle hit
    pub const BALL_SPEED_MAX: f32 = 15.0;
    pub const BALL_LAUNCH_SPREAD: f32 = std::f32::consts::FRAC_PI_6; // +/- 30 degrees

    // Timing
    pub const REFERENCE_TICK: f32 = 16.67; // one 60 Hz frame, in ms
    pub const MAX_FRAME_DT: f32 = 100.0; // longer gaps between refreshes count as a pause
}
