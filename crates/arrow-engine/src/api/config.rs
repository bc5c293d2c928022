use serde::{Deserialize, Serialize};

use crate::api::types::KeyCode;
use crate::core::block::BlockFlags;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum ticks run for one rendered frame before dropping time (default: 10).
    pub max_steps_per_frame: u32,
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// Clear colour handed to the renderer each frame.
    pub background: [u8; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport_width: 800.0,
            viewport_height: 600.0,
            background: [30, 30, 30],
        }
    }
}

/// World-wide physics constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to every player's vertical velocity each tick (Y points down).
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: 0.5 }
    }
}

/// Construction parameters for a player, as stored in a level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite id resolved through the asset loader; `None` draws a filled rectangle.
    pub sprite: Option<String>,
    /// Width and height of the bounding rectangle.
    pub scale: [i32; 2],
    /// Initial top-left position.
    pub x: i32,
    pub y: i32,
    #[serde(alias = "walk_accelaration")]
    pub walk_acceleration: f32,
    #[serde(alias = "max_walkspeed")]
    pub max_walk_speed: f32,
    /// Vertical velocity set by a jump. Negative is up.
    #[serde(alias = "jump_accelaration")]
    pub jump_impulse: f32,
    pub autoscroll: bool,
    pub autoscroll_speed: f32,
    pub left_key: KeyCode,
    pub right_key: KeyCode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite: None,
            scale: [40, 60],
            x: 100,
            y: 100,
            walk_acceleration: 1.0,
            max_walk_speed: 5.0,
            jump_impulse: -10.0,
            autoscroll: false,
            autoscroll_speed: 2.0,
            left_key: KeyCode::LEFT,
            right_key: KeyCode::RIGHT,
        }
    }
}

/// Construction parameters for a block, as stored in a level document.
/// Callbacks are code, not data, and are attached after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub sprite: Option<String>,
    pub scale: [i32; 2],
    pub x: i32,
    pub y: i32,
    #[serde(flatten)]
    pub flags: BlockFlags,
    pub alpha: u8,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            sprite: None,
            scale: [100, 40],
            x: 0,
            y: 0,
            flags: BlockFlags::default(),
            alpha: 255,
        }
    }
}
