pub mod components;
pub mod config;
pub mod fsm;
pub mod params;
pub mod resources;
pub mod round;
pub mod systems;

pub use components::*;
pub use config::*;
pub use fsm::*;
pub use params::*;
pub use resources::*;
pub use round::*;

use hecs::World;
use systems::*;

/// Run one simulation tick of `dt` ms. Returns the number of paddle deflections.
pub fn step(world: &mut World, dt: f32, config: &Config, events: &mut Events) -> u32 {
    // Clear events at start of tick
    events.clear();

    // 1. Move paddle by keyboard velocity
    move_paddles(world, dt, config);

    // 2. Relaunch a stalled ball
    rescue_stalled_ball(world, events);

    // 3. Move ball
    move_ball(world, dt, config);

    // 4. Walls (top/bottom/far), escape past the paddle side
    check_walls(world, config, events);

    // 5. Paddle face
    let hits = check_paddle_collisions(world, config, events);

    // 6. Flag the escape for the round controller
    check_escape(world, events);

    hits
}

/// Helper to create the paddle entity
pub fn create_paddle(world: &mut World, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(config),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
