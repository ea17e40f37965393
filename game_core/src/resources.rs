/// Turns display-refresh timestamps into per-tick elapsed time
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    pub dt: f32,          // Elapsed time for this tick (ms)
    pub now: Option<f64>, // Last timestamp seen; None until the first frame after arming
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timestamp and return the time since the previous one, clamped
    /// to `[0, max_dt]`. The first timestamp after arming yields 0.
    pub fn advance(&mut self, timestamp: f64, max_dt: f32) -> f32 {
        self.dt = match self.now {
            Some(prev) => ((timestamp - prev) as f32).clamp(0.0, max_dt),
            None => 0.0,
        };
        self.now = Some(timestamp);
        self.dt
    }

    /// Forget the last timestamp so a paused loop does not produce one huge tick
    pub fn rearm(&mut self) {
        self.now = None;
        self.dt = 0.0;
    }
}

/// Round score tracking
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
    pub current: u32, // Deflections this round
    pub top: u32,     // Best known score for this device
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.current += 1;
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Raise the top score to at least `top` (stored value arriving asynchronously)
    pub fn merge_top(&mut self, top: u32) {
        self.top = self.top.max(top);
    }

    /// Fold the finished round into the top score. Returns true on a new best.
    pub fn record_final(&mut self) -> bool {
        if self.current > self.top {
            self.top = self.current;
            true
        } else {
            false
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub ball_escaped: bool,
    pub ball_rescued: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
        self.ball_escaped = false;
        self.ball_rescued = false;
    }
}

/// Directional keys for the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Held state of the two directional keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
        }
    }

    pub fn release(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
        }
    }

    /// -1 = up, 0 = stop, 1 = down. Both keys held cancel out.
    pub fn direction(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DT: f32 = 100.0;

    #[test]
    fn test_frame_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0, MAX_DT), 0.0);
        assert_eq!(clock.advance(1016.0, MAX_DT), 16.0);
        assert_eq!(clock.advance(1050.0, MAX_DT), 34.0);
    }

    #[test]
    fn test_frame_clock_rearm() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0, MAX_DT);
        clock.rearm();
        assert_eq!(clock.advance(9000.0, MAX_DT), 0.0, "No jump after re-arming");
    }

    #[test]
    fn test_frame_clock_caps_long_gaps() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0, MAX_DT);
        assert_eq!(clock.advance(6000.0, MAX_DT), MAX_DT, "Hidden tab resumes with one capped step");
        assert_eq!(clock.dt, MAX_DT);
        assert_eq!(clock.advance(6016.0, MAX_DT), 16.0);
    }

    #[test]
    fn test_frame_clock_ignores_backwards_time() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0, MAX_DT);
        assert_eq!(clock.advance(990.0, MAX_DT), 0.0);
    }

    #[test]
    fn test_score_increment_and_reset() {
        let mut score = Score::new();
        score.increment();
        score.increment();
        assert_eq!(score.current, 2);
        score.reset();
        assert_eq!(score.current, 0);
    }

    #[test]
    fn test_score_record_final() {
        let mut score = Score::new();
        score.merge_top(3);
        score.current = 2;
        assert!(!score.record_final());
        assert_eq!(score.top, 3);

        score.current = 5;
        assert!(score.record_final());
        assert_eq!(score.top, 5);

        score.merge_top(4);
        assert_eq!(score.top, 5, "Stale stored value never lowers the top score");
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.ball_hit_paddle = true;
        events.ball_hit_wall = true;
        events.ball_escaped = true;
        events.ball_rescued = true;

        events.clear();

        assert!(!events.ball_hit_paddle);
        assert!(!events.ball_hit_wall);
        assert!(!events.ball_escaped);
        assert!(!events.ball_rescued);
    }

    #[test]
    fn test_key_state_truth_table() {
        let mut keys = KeyState::new();
        assert_eq!(keys.direction(), 0, "Neither held");

        keys.press(Direction::Up);
        assert_eq!(keys.direction(), -1, "Only up");

        keys.press(Direction::Down);
        assert_eq!(keys.direction(), 0, "Both held");

        keys.release(Direction::Up);
        assert_eq!(keys.direction(), 1, "Only down");

        keys.release(Direction::Down);
        assert_eq!(keys.direction(), 0);
    }
}
