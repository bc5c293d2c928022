// core/mover.rs
//
// Keyframe movers: cyclic waypoint motion for blocks and players.
// Decoupled from Block/Player internals; targets are resolved through the Scene.
//
// Usage:
//   let mut movers = Movers::new();
//   movers.schedule(platform.into(), vec![IVec2::new(0, 300), IVec2::new(200, 300)], 2)?;
//   movers.tick(&mut scene);  // once per frame, after player resolution

use glam::IVec2;

use crate::api::error::{EngineError, Result};
use crate::api::types::{MoveId, Target};
use crate::core::scene::Scene;

/// A cyclic waypoint path bound to one target.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeMove {
    pub target: Target,
    /// Top-left positions visited in order, wrapping after the last.
    pub keyframes: Vec<IVec2>,
    /// Maximum step per axis per tick.
    pub speed: i32,
    /// Index of the keyframe currently being approached.
    pub index: usize,
    pub playing: bool,
}

impl KeyframeMove {
    pub fn new(target: Target, keyframes: Vec<IVec2>, speed: i32) -> Result<Self> {
        if keyframes.is_empty() {
            return Err(EngineError::Configuration(
                "keyframe move needs at least one keyframe".into(),
            ));
        }
        if speed <= 0 {
            return Err(EngineError::Configuration(format!(
                "keyframe move speed must be positive, got {}",
                speed
            )));
        }
        Ok(Self {
            target,
            keyframes,
            speed,
            index: 0,
            playing: true,
        })
    }

    /// The keyframe currently being approached.
    pub fn active_keyframe(&self) -> IVec2 {
        self.keyframes[self.index]
    }

    /// Step `pos` toward the active keyframe, clamping each axis to `speed`.
    /// Advances to the next keyframe only on exact arrival.
    pub fn step(&mut self, pos: &mut IVec2) {
        let goal = self.active_keyframe();
        let delta = goal - *pos;
        *pos += delta.clamp(IVec2::splat(-self.speed), IVec2::splat(self.speed));
        if *pos == goal {
            self.index = (self.index + 1) % self.keyframes.len();
        }
    }
}

/// Manages all scheduled moves, applied in schedule order.
#[derive(Debug, Default)]
pub struct Movers {
    moves: Vec<(MoveId, KeyframeMove)>,
    next_id: u32,
}

impl Movers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cyclic motion for `target`. Returns a handle for later control.
    pub fn schedule(&mut self, target: Target, keyframes: Vec<IVec2>, speed: i32) -> Result<MoveId> {
        let mv = KeyframeMove::new(target, keyframes, speed)?;
        let id = MoveId(self.next_id);
        self.next_id += 1;
        self.moves.push((id, mv));
        Ok(id)
    }

    /// Remove a move by handle.
    pub fn cancel(&mut self, id: MoveId) -> bool {
        let before = self.moves.len();
        self.moves.retain(|(mid, _)| *mid != id);
        self.moves.len() != before
    }

    /// Remove all moves driving `target`.
    pub fn cancel_target(&mut self, target: Target) {
        self.moves.retain(|(_, mv)| mv.target != target);
    }

    pub fn pause(&mut self, id: MoveId) {
        if let Some(mv) = self.get_mut(id) {
            mv.playing = false;
        }
    }

    pub fn resume(&mut self, id: MoveId) {
        if let Some(mv) = self.get_mut(id) {
            mv.playing = true;
        }
    }

    pub fn get(&self, id: MoveId) -> Option<&KeyframeMove> {
        self.moves.iter().find(|(mid, _)| *mid == id).map(|(_, mv)| mv)
    }

    pub fn get_mut(&mut self, id: MoveId) -> Option<&mut KeyframeMove> {
        self.moves
            .iter_mut()
            .find(|(mid, _)| *mid == id)
            .map(|(_, mv)| mv)
    }

    /// Advance every playing move one step. Moves whose target is gone are skipped.
    pub fn tick(&mut self, scene: &mut Scene) {
        for (_, mv) in self.moves.iter_mut() {
            if !mv.playing {
                continue;
            }
            let Some(rect) = scene.rect_mut(mv.target) else {
                continue;
            };
            let mut pos = rect.pos();
            mv.step(&mut pos);
            rect.set_pos(pos);
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
