use crate::{Ball, Config, Events, Paddle};
use hecs::World;

/// Bounce the ball off the arena walls (and flag an escape past the paddle side)
pub fn check_walls(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.reflect_off_walls(config) {
            events.ball_hit_wall = true;
        }
    }
}

/// Deflect the ball off the paddle face. Returns the number of deflections this tick.
pub fn check_paddle_collisions(world: &mut World, config: &Config, events: &mut Events) -> u32 {
    // Collect paddle faces first so the ball can be borrowed mutably
    let faces: Vec<(f32, f32, f32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| (p.left(), p.top(), p.bottom()))
        .collect();

    let mut hits = 0;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for &(left, top, bottom) in &faces {
            if ball.resolve_paddle_collision(left, top, bottom, config) {
                tracing::debug!(speed = ball.speed, y = ball.pos.y, "ball hit paddle");
                events.ball_hit_paddle = true;
                hits += 1;
                break;
            }
        }
    }
    hits
}
