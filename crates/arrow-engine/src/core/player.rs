//! Player simulation: input, gravity, axis-separated collision, death and respawn.
//!
//! One call to [`Player::tick`] is one frame. Horizontal movement is resolved
//! against every block before vertical movement is applied, and both passes
//! scan a snapshot of block ids so callbacks may queue despawns mid-scan.

use glam::{IVec2, Vec2};

use crate::api::config::PlayerConfig;
use crate::api::error::LogicWarning;
use crate::api::types::{KeyCode, PlayerId};
use crate::core::block::Visual;
use crate::core::blocks::BlockSet;
use crate::core::commands::Commands;
use crate::core::geometry::Rect;
use crate::input::dispatch::EventDispatcher;
use crate::input::queue::KeyState;

/// Per-tick multiplier on horizontal velocity when no direction is held.
pub const HORIZONTAL_DAMPING: f32 = 0.8;
/// Distance a player is nudged per step while climbing through a ladder.
pub const LADDER_STEP: i32 = 2;
/// Ticks of suppressed movement after a respawn.
pub const DEATH_LOCK_TICKS: u32 = 1;
/// Fill for players without a sprite.
pub const PLAYER_FILL: [u8; 3] = [200, 100, 100];

/// Motion constants for one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Velocity added per tick while a direction is held.
    pub walk_acceleration: f32,
    /// Cap on horizontal walking speed.
    pub max_walk_speed: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_impulse: f32,
    /// Pin horizontal velocity to `autoscroll_speed`, ignoring input.
    pub autoscroll: bool,
    pub autoscroll_speed: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            walk_acceleration: 1.0,
            max_walk_speed: 5.0,
            jump_impulse: -10.0,
            autoscroll: false,
            autoscroll_speed: 2.0,
        }
    }
}

/// Keys that steer a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left: KeyCode,
    pub right: KeyCode,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: KeyCode::LEFT,
            right: KeyCode::RIGHT,
        }
    }
}

/// What happened during one player tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The death lock swallowed the tick.
    Locked,
    /// Normal movement and collision ran.
    Moved,
    /// The player touched a hazard and respawned.
    Died,
}

/// A controllable actor.
#[derive(Debug, Clone)]
pub struct Player {
    /// Assigned by the scene on spawn.
    pub id: PlayerId,
    pub rect: Rect,
    pub vel: Vec2,
    pub tunables: Tunables,
    pub controls: Controls,
    pub visual: Visual,
    /// Sprite id the visual was resolved from, kept for saving.
    pub sprite: Option<String>,
    /// The last vertical pass ended standing on a block.
    pub grounded: bool,
    /// Set by a death and cleared when the death lock runs out.
    pub dead: bool,
    /// Ticks left in which movement and collision are suppressed.
    pub death_timer: u32,
    /// Total deaths so far.
    pub deaths: u32,
}

impl Player {
    /// A player with default tunables at `(x, y)` with the given size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: PlayerId(0),
            rect: Rect::new(x, y, w, h),
            vel: Vec2::ZERO,
            tunables: Tunables::default(),
            controls: Controls::default(),
            visual: Visual::Fill(PLAYER_FILL),
            sprite: None,
            grounded: false,
            dead: false,
            death_timer: 0,
            deaths: 0,
        }
    }

    pub fn from_config(config: &PlayerConfig, visual: Option<Visual>) -> Self {
        let mut player = Self::new(config.x, config.y, config.scale[0], config.scale[1]);
        player.tunables = Tunables {
            walk_acceleration: config.walk_acceleration,
            max_walk_speed: config.max_walk_speed,
            jump_impulse: config.jump_impulse,
            autoscroll: config.autoscroll,
            autoscroll_speed: config.autoscroll_speed,
        };
        player.controls = Controls {
            left: config.left_key,
            right: config.right_key,
        };
        player.sprite = config.sprite.clone();
        if let Some(visual) = visual {
            player.visual = visual;
        }
        player
    }

    /// The level-data view of this player, positioned where it stands now.
    pub fn config(&self) -> PlayerConfig {
        PlayerConfig {
            sprite: self.sprite.clone(),
            scale: [self.rect.w, self.rect.h],
            x: self.rect.x,
            y: self.rect.y,
            walk_acceleration: self.tunables.walk_acceleration,
            max_walk_speed: self.tunables.max_walk_speed,
            jump_impulse: self.tunables.jump_impulse,
            autoscroll: self.tunables.autoscroll,
            autoscroll_speed: self.tunables.autoscroll_speed,
            left_key: self.controls.left,
            right_key: self.controls.right,
        }
    }

    // -- Builder pattern --

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_sprite(mut self, id: impl Into<String>, visual: Visual) -> Self {
        self.sprite = Some(id.into());
        self.visual = visual;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.death_timer > 0
    }

    /// Start a jump. Only works when grounded and outside the death lock;
    /// otherwise nothing happens and `false` is returned.
    pub fn jump(&mut self) -> bool {
        if self.death_timer > 0 {
            LogicWarning::JumpDuringDeathLock(self.id).report();
            return false;
        }
        if !self.grounded {
            LogicWarning::JumpWhileAirborne(self.id).report();
            return false;
        }
        self.vel.y = self.tunables.jump_impulse;
        self.grounded = false;
        true
    }

    /// Set horizontal velocity from the held keys for this tick.
    pub fn apply_input(&mut self, keys: &KeyState) {
        let t = self.tunables;
        if t.autoscroll {
            self.vel.x = t.autoscroll_speed;
        } else if keys.is_held(self.controls.left) {
            self.vel.x = (self.vel.x - t.walk_acceleration).max(-t.max_walk_speed);
        } else if keys.is_held(self.controls.right) {
            self.vel.x = (self.vel.x + t.walk_acceleration).min(t.max_walk_speed);
        } else {
            self.vel.x *= HORIZONTAL_DAMPING;
        }
    }

    /// Advance one frame against `blocks`.
    pub fn tick(
        &mut self,
        keys: &KeyState,
        gravity: f32,
        blocks: &mut BlockSet,
        events: &mut EventDispatcher,
        commands: &mut Commands,
    ) -> TickOutcome {
        if self.death_timer > 0 {
            self.death_timer -= 1;
            if self.death_timer == 0 {
                self.dead = false;
            }
            return TickOutcome::Locked;
        }

        self.apply_input(keys);
        self.vel.y += gravity;

        if self.resolve_horizontal(blocks, events, commands)
            || self.resolve_vertical(blocks, events, commands)
        {
            return TickOutcome::Died;
        }
        TickOutcome::Moved
    }

    /// Returns `true` if the player died.
    fn resolve_horizontal(
        &mut self,
        blocks: &mut BlockSet,
        events: &mut EventDispatcher,
        commands: &mut Commands,
    ) -> bool {
        self.rect.x += self.vel.x as i32;

        for id in blocks.ids() {
            let Some(block) = blocks.get_mut(id) else {
                continue;
            };
            if block.flags.passable
                || commands.is_despawn_pending(id)
                || !self.rect.intersects(&block.rect)
            {
                continue;
            }
            if block.flags.danger {
                self.die(blocks, events, commands);
                return true;
            }

            if self.vel.x > 0.0 {
                self.rect.set_right(block.rect.left());
            } else if self.vel.x < 0.0 {
                self.rect.set_left(block.rect.right());
            }
            self.vel.x = 0.0;

            if let Some(callback) = block.on_collide.as_mut() {
                callback(id, self, commands);
            }
        }
        false
    }

    /// Returns `true` if the player died.
    fn resolve_vertical(
        &mut self,
        blocks: &mut BlockSet,
        events: &mut EventDispatcher,
        commands: &mut Commands,
    ) -> bool {
        self.rect.y += self.vel.y as i32;
        self.grounded = false;

        for id in blocks.ids() {
            let Some(block) = blocks.get_mut(id) else {
                continue;
            };
            if block.flags.passable
                || commands.is_despawn_pending(id)
                || !self.rect.intersects(&block.rect)
            {
                continue;
            }

            // Climbing: pass through without landing, dying, or a collide event.
            if block.flags.ladder && self.vel.y < 0.0 {
                while self.rect.intersects(&block.rect) {
                    self.rect.y -= LADDER_STEP;
                }
                continue;
            }

            if block.flags.danger {
                self.die(blocks, events, commands);
                return true;
            }

            if self.vel.y > 0.0 {
                self.rect.set_bottom(block.rect.top());
                self.vel.y = 0.0;
                self.grounded = true;
            } else if self.vel.y < 0.0 {
                self.rect.set_top(block.rect.bottom());
                self.vel.y = 0.0;
            }

            if let Some(callback) = block.on_collide.as_mut() {
                callback(id, self, commands);
            }
        }
        false
    }

    /// Kill the player: freeze, move onto the spawn block, lock the next tick,
    /// and fire the death callbacks.
    pub fn die(&mut self, blocks: &BlockSet, events: &mut EventDispatcher, commands: &mut Commands) {
        self.dead = true;
        self.grounded = false;
        self.vel = Vec2::ZERO;
        if let Some(spawn) = blocks.first_spawn() {
            self.rect.set_mid_bottom(spawn.rect.mid_top());
        }
        self.death_timer = DEATH_LOCK_TICKS;
        self.deaths += 1;
        log::debug!(
            "player {} died, respawning at {:?}",
            self.id.0,
            IVec2::new(self.rect.x, self.rect.y)
        );
        events.fire_player_death(commands);
    }
}
