//! Presentation helpers
//!
//! Pure geometry and tween math used by the front ends. Nothing here touches
//! game state; it only reads commands and positions.

pub mod layout;
pub mod tween;

pub use layout::{Layout, Placement, TextureSizes, scale_factor};
pub use tween::{Pose, SequencePlayer, Tween, ease};
