//! Keyboard and pointer input handling

use game_core::Direction;
use glam::Vec2;

/// Map a `KeyboardEvent.key` value to a paddle direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

/// Client rectangle of the canvas element, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert a pointer position in client coordinates to arena coordinates.
///
/// The canvas may be displayed at a different size than its drawing buffer,
/// so the offset inside the element is scaled to the arena size.
pub fn to_arena(client_x: f32, client_y: f32, rect: CanvasRect, arena: Vec2) -> Vec2 {
    let scale_x = if rect.width > 0.0 {
        arena.x / rect.width
    } else {
        1.0
    };
    let scale_y = if rect.height > 0.0 {
        arena.y / rect.height
    } else {
        1.0
    };
    Vec2::new(
        (client_x - rect.left) * scale_x,
        (client_y - rect.top) * scale_y,
    )
}
