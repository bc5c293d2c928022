pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{BlockConfig, EngineConfig, PhysicsConfig, PlayerConfig};
pub use api::error::{EngineError, LogicWarning, Result};
pub use api::game::{Game, GameRunner};
pub use api::types::{
    AnimationId, BlockId, CameraId, FrameHandle, GameEvent, KeyCode, MoveId, PlayerId,
    SoundRequest, Target,
};
pub use assets::level::{LevelDoc, LevelSetup, SpawnedLevel};
pub use assets::registry::SpriteCache;
pub use components::animation::Animation;
pub use core::block::{Block, BlockFlags, Visual};
pub use core::blocks::BlockSet;
pub use core::commands::{Command, Commands};
pub use core::geometry::Rect;
pub use core::mover::{KeyframeMove, Movers};
pub use core::player::{Controls, Player, TickOutcome, Tunables};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::world::World;
pub use input::dispatch::EventDispatcher;
pub use input::queue::{InputEvent, InputQueue, KeyState};
pub use renderer::{AssetLoader, Camera, CameraTarget, Cameras, DrawInstance, DrawList, NoAssets, Renderer, ScreenRect};
pub use systems::animation::{tick_animations, Animator};
