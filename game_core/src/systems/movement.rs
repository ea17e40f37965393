use crate::{Ball, Config, Events, Paddle};
use hecs::World;

/// Apply paddle keyboard velocity
pub fn move_paddles(world: &mut World, dt: f32, config: &Config) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.integrate(dt, config);
    }
}

/// Re-launch a live ball that has somehow lost all velocity
pub fn rescue_stalled_ball(world: &mut World, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.rescue_if_stalled() {
            tracing::warn!(x = ball.pos.x, y = ball.pos.y, "ball stalled, relaunching toward paddle");
            events.ball_rescued = true;
        }
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World, dt: f32, config: &Config) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.integrate(dt, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};
    use glam::Vec2;

    #[test]
    fn test_move_paddles_applies_velocity() {
        let mut world = World::new();
        let config = Config::new();
        let entity = create_paddle(&mut world, &config);
        world.get::<&mut Paddle>(entity).unwrap().set_velocity(config.paddle_speed);

        move_paddles(&mut world, config.reference_tick, &config);

        let paddle = world.get::<&Paddle>(entity).unwrap();
        assert!((paddle.top() - (config.paddle_center_y() + config.paddle_speed)).abs() < 1e-4);
    }

    #[test]
    fn test_move_ball_zero_dt() {
        let mut world = World::new();
        let config = Config::new();
        let entity = create_ball(&mut world, Ball::new(Vec2::new(100.0, 100.0), Vec2::new(5.0, 5.0), 8.0, 5.0));

        move_ball(&mut world, 0.0, &config);

        assert_eq!(world.get::<&Ball>(entity).unwrap().pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_rescue_stalled_ball_flags_event() {
        let mut world = World::new();
        let mut events = Events::new();
        let entity = create_ball(&mut world, Ball::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 8.0, 5.0));

        rescue_stalled_ball(&mut world, &mut events);

        assert!(events.ball_rescued);
        let ball = world.get::<&Ball>(entity).unwrap();
        assert!(ball.vel.x > 0.0, "Relaunched toward the paddle");
    }
}
