use crate::api::types::{BlockId, PlayerId, Target};
use crate::core::block::{Block, Visual};
use crate::core::blocks::BlockSet;
use crate::core::geometry::Rect;
use crate::core::player::Player;

/// Everything positioned in the world: the block set and the players.
/// Players are stored in a flat Vec in spawn order.
pub struct Scene {
    pub blocks: BlockSet,
    players: Vec<Player>,
    next_player: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            blocks: BlockSet::new(),
            players: Vec::with_capacity(4),
            next_player: 1,
        }
    }

    /// Add a player, assigning its id.
    pub fn spawn_player(&mut self, mut player: Player) -> PlayerId {
        let id = PlayerId(self.next_player);
        self.next_player += 1;
        player.id = id;
        self.players.push(player);
        id
    }

    /// Remove a player by id. Returns the removed player if found.
    pub fn despawn_player(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(idx))
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The first spawned player, the default camera target.
    pub fn first_player(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    /// Split borrow for the physics step: players mutably alongside the blocks.
    pub(crate) fn split_mut(&mut self) -> (&mut [Player], &mut BlockSet) {
        (&mut self.players, &mut self.blocks)
    }

    /// Rectangle of a block or player, if it still exists.
    pub fn rect(&self, target: Target) -> Option<Rect> {
        match target {
            Target::Block(id) => self.blocks.get(id).map(|b| b.rect),
            Target::Player(id) => self.player(id).map(|p| p.rect),
        }
    }

    pub fn rect_mut(&mut self, target: Target) -> Option<&mut Rect> {
        match target {
            Target::Block(id) => self.blocks.get_mut(id).map(|b| &mut b.rect),
            Target::Player(id) => self.player_mut(id).map(|p| &mut p.rect),
        }
    }

    pub fn visual_mut(&mut self, target: Target) -> Option<&mut Visual> {
        match target {
            Target::Block(id) => self.blocks.get_mut(id).map(|b| &mut b.visual),
            Target::Player(id) => self.player_mut(id).map(|p| &mut p.visual),
        }
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.players.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
