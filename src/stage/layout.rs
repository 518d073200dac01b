//! Screen layout for the door scene
//!
//! Everything is authored against a 1920x1080 stage and scaled uniformly to
//! fit the window. Positions are sprite centers in screen pixels.

use glam::Vec2;

use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Relative sprite scales at a scale factor of 1
const DOOR_SCALE: f32 = 0.32;
const DOOR_OPEN_SCALE: f32 = 0.32;
const DOOR_OPEN_SHADOW_SCALE: f32 = 0.33;
const HANDLE_SCALE: f32 = 0.3;
const DECORATION_SCALE: f32 = 0.15;
const TIMER_SCALE: f32 = 1.5;

/// Decoration sprites spawned per cluster
pub const DECORATIONS_PER_CLUSTER: usize = 3;

/// Uniform factor that fits the base stage into `screen`
pub fn scale_factor(screen: Vec2) -> f32 {
    (screen.x / BASE_WIDTH).min(screen.y / BASE_HEIGHT)
}

/// Position and scale of one sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub scale: f32,
}

/// Native pixel sizes of the sprites the layout depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSizes {
    pub background: Vec2,
    pub door: Vec2,
}

/// Where everything goes for one window size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub screen: Vec2,
    pub scale: f32,
    /// Top-left corner and scale of the letterboxed background
    pub background: Placement,
    pub door: Placement,
    pub door_open: Placement,
    pub door_open_shadow: Placement,
    pub handle: Placement,
    pub handle_shadow: Placement,
    pub timer: Placement,
    pub decorations: Vec<Placement>,
}

impl Layout {
    pub fn compute(screen: Vec2, textures: TextureSizes) -> Self {
        let s = scale_factor(screen);
        let base = Vec2::new(BASE_WIDTH, BASE_HEIGHT);
        let at = |dx: f32, dy: f32, scale: f32| Placement {
            pos: Vec2::new(base.x / dx, base.y / dy) * s,
            scale: scale * s,
        };

        let bg_scale = (screen.x / textures.background.x).min(screen.y / textures.background.y);
        let background = Placement {
            pos: (screen - textures.background * bg_scale) / 2.0,
            scale: bg_scale,
        };

        let door = at(1.97, 1.8, DOOR_SCALE);
        let door_width = textures.door.x * door.scale;
        let handle = Placement {
            pos: door.pos + Vec2::new(door_width * -0.04, 0.0),
            scale: HANDLE_SCALE * s,
        };
        let handle_shadow = Placement {
            pos: door.pos,
            scale: HANDLE_SCALE * s,
        };

        let timer = Placement {
            pos: Vec2::new(screen.x / 3.9, screen.y / 2.3),
            scale: TIMER_SCALE * s,
        };

        let decorations = [(2.4, 1.8), (1.87, 1.4), (2.1, 1.8)]
            .into_iter()
            .flat_map(|(dx, dy)| std::iter::repeat_n(at(dx, dy, DECORATION_SCALE), DECORATIONS_PER_CLUSTER))
            .collect();

        Self {
            screen,
            scale: s,
            background,
            door,
            door_open: at(1.3, 1.8, DOOR_OPEN_SCALE),
            door_open_shadow: at(1.28, 1.73, DOOR_OPEN_SHADOW_SCALE),
            handle,
            handle_shadow,
            timer,
            decorations,
        }
    }

    /// Convert a screen point into the handle's local frame, undoing its
    /// position, rotation and scale
    pub fn to_handle_local(&self, point: Vec2, handle_angle: f32) -> Vec2 {
        let offset = point - self.handle.pos;
        let unrotated = Vec2::from_angle(-handle_angle).rotate(offset);
        if self.handle.scale > 0.0 {
            unrotated / self.handle.scale
        } else {
            unrotated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, on_pointer_down};
    use std::f32::consts::PI;

    const TEXTURES: TextureSizes = TextureSizes {
        background: Vec2::new(1920.0, 1080.0),
        door: Vec2::new(1000.0, 1000.0),
    };

    #[test]
    fn test_scale_factor_fits_smaller_axis() {
        assert_eq!(scale_factor(Vec2::new(1920.0, 1080.0)), 1.0);
        assert_eq!(scale_factor(Vec2::new(960.0, 1080.0)), 0.5);
        assert_eq!(scale_factor(Vec2::new(3840.0, 1080.0)), 1.0);
    }

    #[test]
    fn test_background_is_centered() {
        let layout = Layout::compute(Vec2::new(3840.0, 1080.0), TEXTURES);
        assert_eq!(layout.background.scale, 1.0);
        assert_eq!(layout.background.pos, Vec2::new(960.0, 0.0));
    }

    #[test]
    fn test_handle_sits_left_of_door_center() {
        let layout = Layout::compute(Vec2::new(1920.0, 1080.0), TEXTURES);
        assert!(layout.handle.pos.x < layout.door.pos.x);
        assert_eq!(layout.handle.pos.y, layout.door.pos.y);
        assert_eq!(layout.handle_shadow.pos, layout.door.pos);
    }

    #[test]
    fn test_decoration_clusters() {
        let layout = Layout::compute(Vec2::new(1920.0, 1080.0), TEXTURES);
        assert_eq!(layout.decorations.len(), 3 * DECORATIONS_PER_CLUSTER);
        assert_eq!(layout.decorations[0], layout.decorations[2]);
        assert_ne!(layout.decorations[0], layout.decorations[3]);
    }

    #[test]
    fn test_handle_local_follows_rotation() {
        let layout = Layout::compute(Vec2::new(1920.0, 1080.0), TEXTURES);
        let right_of_handle = layout.handle.pos + Vec2::new(50.0, 0.0);

        let local = layout.to_handle_local(right_of_handle, 0.0);
        assert!((local.x - 50.0 / layout.handle.scale).abs() < 1e-3);
        assert_eq!(on_pointer_down(local.x), Direction::Clockwise);

        // Half a turn swaps the handle's halves
        let local = layout.to_handle_local(right_of_handle, PI);
        assert_eq!(on_pointer_down(local.x), Direction::CounterClockwise);
    }
}
