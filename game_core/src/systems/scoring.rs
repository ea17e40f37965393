use crate::{Ball, Events};
use hecs::World;

/// Check if the ball got past the paddle (round lost)
pub fn check_escape(world: &World, events: &mut Events) -> bool {
    let escaped = world.query::<&Ball>().iter().any(|(_e, ball)| ball.escaped);
    if escaped {
        events.ball_escaped = true;
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ball;
    use glam::Vec2;

    #[test]
    fn test_no_escape_when_ball_in_bounds() {
        let mut world = World::new();
        let mut events = Events::new();
        create_ball(&mut world, Ball::new(Vec2::new(400.0, 300.0), Vec2::new(5.0, 0.0), 8.0, 5.0));

        assert!(!check_escape(&world, &mut events));
        assert!(!events.ball_escaped);
    }

    #[test]
    fn test_escape_detected() {
        let mut world = World::new();
        let mut events = Events::new();
        let mut ball = Ball::new(Vec2::new(799.0, 300.0), Vec2::ZERO, 8.0, 5.0);
        ball.escaped = true;
        create_ball(&mut world, ball);

        assert!(check_escape(&world, &mut events));
        assert!(events.ball_escaped);
    }

    #[test]
    fn test_no_escape_without_ball() {
        let world = World::new();
        let mut events = Events::new();
        assert!(!check_escape(&world, &mut events));
    }
}
