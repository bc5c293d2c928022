//! Deferred world mutations queued by callbacks.
//!
//! Callbacks run while the world is mid-iteration, so they never touch it
//! directly. They push commands here and the world applies them once the
//! current phase of the tick has finished.

use glam::Vec2;

use crate::api::types::{BlockId, CameraId, GameEvent, PlayerId, SoundRequest};

/// A single queued world mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Deregister a block (a collected pickup, a broken wall).
    Despawn(BlockId),
    /// Ask one player to jump. Ignored unless the player is grounded.
    Jump(PlayerId),
    /// Ask every player to jump.
    JumpAll,
    /// Add a velocity delta to every player.
    ForcePush(Vec2),
    /// Make a camera the active one.
    ActivateCamera(CameraId),
    /// Drop back to the identity transform.
    DeactivateCamera,
    /// Raise a game-defined event for the host.
    Emit(GameEvent),
    /// Forward an audio request to the host.
    Sound(SoundRequest),
    /// Stop the frame loop.
    Quit,
}

/// Queue of commands produced during one phase of a tick.
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn despawn(&mut self, id: BlockId) {
        self.push(Command::Despawn(id));
    }

    pub fn jump(&mut self, player: PlayerId) {
        self.push(Command::Jump(player));
    }

    pub fn jump_all(&mut self) {
        self.push(Command::JumpAll);
    }

    pub fn force_push(&mut self, velocity: Vec2) {
        self.push(Command::ForcePush(velocity));
    }

    pub fn activate_camera(&mut self, id: CameraId) {
        self.push(Command::ActivateCamera(id));
    }

    pub fn deactivate_camera(&mut self) {
        self.push(Command::DeactivateCamera);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.push(Command::Emit(event));
    }

    pub fn play_music(&mut self, track: impl Into<String>, looped: bool) {
        self.push(Command::Sound(SoundRequest::Music {
            track: track.into(),
            looped,
        }));
    }

    pub fn play_sound(&mut self, name: impl Into<String>) {
        self.push(Command::Sound(SoundRequest::Effect(name.into())));
    }

    pub fn quit(&mut self) {
        self.push(Command::Quit);
    }

    /// Whether a despawn for `id` is already queued.
    /// Collision scans skip such blocks for the rest of the phase.
    pub fn is_despawn_pending(&self, id: BlockId) -> bool {
        self.queue
            .iter()
            .any(|c| matches!(c, Command::Despawn(pending) if *pending == id))
    }

    /// Take every queued command, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn despawn_is_visible_until_drained() {
        let mut commands = Commands::new();
        commands.despawn(BlockId(3));
        assert!(commands.is_despawn_pending(BlockId(3)));
        assert!(!commands.is_despawn_pending(BlockId(4)));

        let drained = commands.drain();
        assert_eq!(drained, vec![Command::Despawn(BlockId(3))]);
        assert!(commands.is_empty());
        assert!(!commands.is_despawn_pending(BlockId(3)));
    }
}
