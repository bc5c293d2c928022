use serde::{Deserialize, Serialize};

/// Handle to a block registered in a [`BlockSet`](crate::core::blocks::BlockSet).
/// Ids are never reused within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// Handle to a player in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

/// Handle to a camera owned by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub u32);

/// Handle to a scheduled keyframe move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveId(pub u32);

/// Handle to a registered sprite animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u32);

/// Opaque reference to a decoded sprite frame.
/// The render layer owns the pixels; the core only passes the handle around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrameHandle(pub u32);

/// Platform key code. Values follow DOM `keyCode` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const W: KeyCode = KeyCode(87);
}

/// Anything in the world that owns a rectangle: movers and animations bind to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Block(BlockId),
    Player(PlayerId),
}

impl From<BlockId> for Target {
    fn from(id: BlockId) -> Self {
        Target::Block(id)
    }
}

impl From<PlayerId> for Target {
    fn from(id: PlayerId) -> Self {
        Target::Player(id)
    }
}

/// Audio request collected for the host audio layer.
/// Decoding and playback live outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundRequest {
    /// Start a music track, replacing whatever is playing.
    Music { track: String, looped: bool },
    /// Fire a one-shot sound effect.
    Effect(String),
}

/// A gameplay event raised by level scripts for the host to read after the tick.
/// `kind` is game-defined; `a` and `b` carry payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GameEvent {
    pub kind: u32,
    pub a: f32,
    pub b: f32,
}
