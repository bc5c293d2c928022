//! The simulation root: scene, movers, animations, cameras and event registry,
//! stepped one fixed tick at a time.
//!
//! Per-tick order:
//!   1. drain input (quit, pointer clicks, key-down edges)
//!   2. held-key repeats
//!   3. each player's physics and collision, in spawn order
//!   4. keyframe movers
//!   5. animations
//!
//! Callbacks never touch the world directly. They queue [`Command`]s, which
//! are applied after each phase so that despawns take effect between phases
//! and never during an iteration.

use glam::{IVec2, Vec2};

use crate::api::config::{EngineConfig, PhysicsConfig};
use crate::api::error::{LogicWarning, Result};
use crate::api::types::{
    AnimationId, BlockId, CameraId, GameEvent, MoveId, PlayerId, SoundRequest, Target,
};
use crate::components::animation::Animation;
use crate::core::block::Block;
use crate::core::commands::{Command, Commands};
use crate::core::mover::Movers;
use crate::core::player::{Player, TickOutcome};
use crate::core::scene::Scene;
use crate::input::dispatch::EventDispatcher;
use crate::input::queue::{InputEvent, InputQueue, KeyState};
use crate::renderer::camera::{Camera, Cameras};
use crate::renderer::instance::DrawList;
use crate::systems::animation::{tick_animations, Animator};
use crate::systems::render::build_draw_list;

pub struct World {
    pub scene: Scene,
    pub movers: Movers,
    pub animator: Animator,
    pub cameras: Cameras,
    pub events: EventDispatcher,
    pub physics: PhysicsConfig,
    viewport: Vec2,
    commands: Commands,
    game_events: Vec<GameEvent>,
    sounds: Vec<SoundRequest>,
    quit_requested: bool,
    tick_count: u64,
}

impl World {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            scene: Scene::new(),
            movers: Movers::new(),
            animator: Animator::new(),
            cameras: Cameras::new(),
            events: EventDispatcher::new(),
            physics: PhysicsConfig::default(),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            commands: Commands::new(),
            game_events: Vec::new(),
            sounds: Vec::new(),
            quit_requested: false,
            tick_count: 0,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Replace the world-wide physics constants. Takes effect next tick.
    pub fn set_physics(&mut self, physics: PhysicsConfig) {
        log::debug!("gravity set to {}", physics.gravity);
        self.physics = physics;
    }

    // -- Registration --

    pub fn spawn_block(&mut self, block: Block) -> BlockId {
        self.scene.blocks.register(block)
    }

    /// Remove a block along with any moves or animations driving it.
    pub fn despawn_block(&mut self, id: BlockId) -> Option<Block> {
        let block = self.scene.blocks.deregister(id)?;
        self.movers.cancel_target(Target::Block(id));
        self.animator.remove_target(Target::Block(id));
        Some(block)
    }

    pub fn spawn_player(&mut self, player: Player) -> PlayerId {
        self.scene.spawn_player(player)
    }

    pub fn despawn_player(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.scene.despawn_player(id)?;
        self.movers.cancel_target(Target::Player(id));
        self.animator.remove_target(Target::Player(id));
        Some(player)
    }

    /// Start a cyclic keyframe move for a block or player.
    pub fn schedule_move(
        &mut self,
        target: impl Into<Target>,
        keyframes: Vec<IVec2>,
        speed: i32,
    ) -> Result<MoveId> {
        self.movers.schedule(target.into(), keyframes, speed)
    }

    pub fn animate(&mut self, animation: Animation) -> AnimationId {
        self.animator.add(animation)
    }

    pub fn add_camera(&mut self, camera: Camera, activate: bool) -> CameraId {
        self.cameras.add(camera, activate)
    }

    pub fn activate_camera(&mut self, id: CameraId) -> bool {
        self.cameras.activate(id)
    }

    pub fn deactivate_camera(&mut self) {
        self.cameras.deactivate();
    }

    /// Add `velocity` to every player outside the death lock.
    pub fn force_push(&mut self, velocity: Vec2) {
        for player in self.scene.players_mut().filter(|p| !p.is_locked()) {
            player.vel += velocity;
        }
    }

    // -- Frame data --

    /// Game events emitted since the last [`World::clear_frame_data`].
    pub fn game_events(&self) -> &[GameEvent] {
        &self.game_events
    }

    /// Sound requests queued since the last [`World::clear_frame_data`].
    pub fn sounds(&self) -> &[SoundRequest] {
        &self.sounds
    }

    pub fn clear_frame_data(&mut self) {
        self.game_events.clear();
        self.sounds.clear();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // -- Stepping --

    /// Run one fixed tick. `keys` is the set of keys held this tick; `input`
    /// is drained.
    pub fn step(&mut self, keys: &KeyState, input: &mut InputQueue) {
        self.tick_count += 1;
        log::trace!(
            "tick {}: {} players, {} blocks, {} queued inputs",
            self.tick_count,
            self.scene.player_count(),
            self.scene.blocks.len(),
            input.len()
        );

        for event in input.drain() {
            match event {
                InputEvent::Quit => {
                    log::info!("quit requested");
                    self.quit_requested = true;
                }
                InputEvent::PointerDown { x, y } => {
                    self.click(Vec2::new(x, y));
                }
                InputEvent::KeyDown { key_code } => {
                    self.events.fire_key_down(key_code, &mut self.commands);
                }
            }
        }
        self.apply_commands();

        self.events.fire_held(keys, &mut self.commands);
        self.apply_commands();

        let gravity = self.physics.gravity;
        let (players, blocks) = self.scene.split_mut();
        for player in players.iter_mut() {
            let outcome = player.tick(keys, gravity, blocks, &mut self.events, &mut self.commands);
            if outcome == TickOutcome::Died {
                log::debug!("player {} died ({} total)", player.id.0, player.deaths);
            }
        }
        self.apply_commands();

        self.movers.tick(&mut self.scene);
        tick_animations(&mut self.animator, &mut self.scene);
    }

    /// Fire the click handler of every block under a screen point, in
    /// registration order. Returns how many handlers ran.
    ///
    /// The point is mapped into world space through the active camera before
    /// hit testing, so clicks land on what is drawn. With no active camera the
    /// mapping is the identity and screen and world coordinates agree.
    pub fn click(&mut self, screen_point: Vec2) -> usize {
        let point = self
            .cameras
            .screen_to_world(&self.scene, self.viewport, screen_point);
        let mut fired = 0;
        for id in self.scene.blocks.hit_test(point) {
            if self.commands.is_despawn_pending(id) {
                continue;
            }
            let Some(block) = self.scene.blocks.get_mut(id) else {
                continue;
            };
            match block.on_click.as_mut() {
                Some(callback) => {
                    callback(id, &mut self.commands);
                    fired += 1;
                }
                None => LogicWarning::ClickWithoutHandler(id).report(),
            }
        }
        self.apply_commands();
        fired
    }

    /// Fill `list` with this tick's draw instances.
    pub fn build_draw_list(&self, list: &mut DrawList) {
        build_draw_list(&self.scene, &self.cameras, self.viewport, list);
    }

    /// Queue a command from outside a callback; it is applied immediately.
    pub fn command(&mut self, command: Command) {
        self.commands.push(command);
        self.apply_commands();
    }

    fn apply_commands(&mut self) {
        for command in self.commands.drain() {
            match command {
                Command::Despawn(id) => {
                    self.despawn_block(id);
                }
                Command::Jump(id) => {
                    if let Some(player) = self.scene.player_mut(id) {
                        player.jump();
                    }
                }
                Command::JumpAll => {
                    for player in self.scene.players_mut() {
                        player.jump();
                    }
                }
                Command::ForcePush(velocity) => self.force_push(velocity),
                Command::ActivateCamera(id) => {
                    if !self.cameras.activate(id) {
                        log::warn!("cannot activate unknown camera {}", id.0);
                    }
                }
                Command::DeactivateCamera => self.cameras.deactivate(),
                Command::Emit(event) => self.game_events.push(event),
                Command::Sound(request) => self.sounds.push(request),
                Command::Quit => self.quit_requested = true,
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::KeyCode;
    use crate::renderer::camera::CameraTarget;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn world() -> World {
        World::new(&EngineConfig::default())
    }

    fn step(world: &mut World, keys: &KeyState, events: Vec<InputEvent>) {
        let mut input = InputQueue::new();
        for event in events {
            input.push(event);
        }
        world.step(keys, &mut input);
    }

    #[test]
    fn click_inside_block_fires_once() {
        let mut world = world();
        let clicks = Rc::new(Cell::new(0));
        let inner = Rc::clone(&clicks);
        world.spawn_block(
            Block::new(300, 300, 40, 40).on_click(move |_, _| inner.set(inner.get() + 1)),
        );

        step(&mut world, &KeyState::new(), vec![InputEvent::PointerDown { x: 310.0, y: 310.0 }]);
        assert_eq!(clicks.get(), 1);

        step(&mut world, &KeyState::new(), vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }]);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn click_goes_through_active_camera() {
        let mut world = world();
        let clicks = Rc::new(Cell::new(0));
        let inner = Rc::clone(&clicks);
        world.spawn_block(
            Block::new(0, 0, 20, 20).on_click(move |_, _| inner.set(inner.get() + 1)),
        );
        world.add_camera(Camera::new(CameraTarget::None), true);

        // World origin sits at the screen centre.
        assert_eq!(world.click(Vec2::new(5.0, 5.0)), 0);
        assert_eq!(world.click(Vec2::new(405.0, 305.0)), 1);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn click_handler_can_despawn_itself() {
        let mut world = world();
        let id = world.spawn_block(
            Block::new(0, 0, 10, 10).on_click(|id, commands| commands.despawn(id)),
        );
        assert_eq!(world.click(Vec2::new(1.0, 1.0)), 1);
        assert!(world.scene.block(id).is_none());
    }

    #[test]
    fn edges_run_before_repeats_before_physics() {
        let mut world = world();
        let log = Rc::new(RefCell::new(Vec::new()));

        let edge = Rc::clone(&log);
        world
            .events
            .on_key_down(KeyCode::SPACE, move |_| edge.borrow_mut().push("edge"));
        let held = Rc::clone(&log);
        world
            .events
            .on_held_repeat(KeyCode::SPACE, move |_| held.borrow_mut().push("held"));
        let touch = Rc::clone(&log);
        world.spawn_block(
            Block::new(0, 60, 100, 20).on_collide(move |_, _, _| touch.borrow_mut().push("collide")),
        );
        // Starts one pixel into the floor so the physics pass touches it.
        world.spawn_player(Player::new(0, 1, 20, 60));

        let keys: KeyState = [KeyCode::SPACE].into_iter().collect();
        step(&mut world, &keys, vec![InputEvent::KeyDown { key_code: KeyCode::SPACE }]);

        let log = log.borrow();
        assert_eq!(&log[..3], &["edge", "held", "collide"]);
    }

    #[test]
    fn jump_command_from_key_callback() {
        let mut world = world();
        world.spawn_block(Block::new(0, 100, 200, 20));
        let player = world.spawn_player(Player::new(0, 41, 20, 60));
        world.events.on_key_down(KeyCode::SPACE, |commands| commands.jump_all());

        step(&mut world, &KeyState::new(), vec![]);
        assert!(world.scene.player(player).unwrap().grounded);

        step(&mut world, &KeyState::new(), vec![InputEvent::KeyDown { key_code: KeyCode::SPACE }]);
        let p = world.scene.player(player).unwrap();
        assert!(!p.grounded);
        assert_eq!(p.vel.y, -10.0 + 0.5);
    }

    #[test]
    fn death_fires_event_once_and_respawns() {
        let mut world = world();
        world.spawn_block(Block::new(500, 500, 40, 20).spawn());
        world.spawn_block(Block::new(0, 100, 200, 20).danger());
        let player = world.spawn_player(Player::new(0, 41, 20, 60));

        let deaths = Rc::new(Cell::new(0));
        let inner = Rc::clone(&deaths);
        world.events.on_player_death(move |commands| {
            inner.set(inner.get() + 1);
            commands.emit(GameEvent { kind: 1, a: 0.0, b: 0.0 });
        });

        step(&mut world, &KeyState::new(), vec![]);
        assert_eq!(deaths.get(), 1);
        assert_eq!(world.game_events().len(), 1);
        let p = world.scene.player(player).unwrap();
        assert_eq!(p.rect.mid_bottom(), IVec2::new(520, 500));

        // Locked tick: nothing moves, no further deaths.
        step(&mut world, &KeyState::new(), vec![]);
        assert_eq!(deaths.get(), 1);
        assert_eq!(world.scene.player(player).unwrap().rect.mid_bottom(), IVec2::new(520, 500));
    }

    #[test]
    fn despawn_cancels_moves_and_animations() {
        let mut world = world();
        let id = world.spawn_block(Block::new(0, 0, 10, 10));
        world.schedule_move(id, vec![IVec2::new(50, 0)], 1).unwrap();
        assert_eq!(world.movers.len(), 1);

        world.command(Command::Despawn(id));
        assert!(world.scene.block(id).is_none());
        assert!(world.movers.is_empty());
    }

    #[test]
    fn movers_run_after_physics() {
        let mut world = world();
        let platform = world.spawn_block(Block::new(0, 100, 100, 10));
        world.schedule_move(platform, vec![IVec2::new(0, 90)], 5).unwrap();
        step(&mut world, &KeyState::new(), vec![]);
        assert_eq!(world.scene.block(platform).unwrap().rect.pos(), IVec2::new(0, 95));
    }

    #[test]
    fn force_push_adds_to_every_player() {
        let mut world = world();
        let a = world.spawn_player(Player::new(0, 0, 10, 10));
        let b = world.spawn_player(Player::new(50, 0, 10, 10));
        world.command(Command::ForcePush(Vec2::new(3.0, -2.0)));
        assert_eq!(world.scene.player(a).unwrap().vel, Vec2::new(3.0, -2.0));
        assert_eq!(world.scene.player(b).unwrap().vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn force_push_leaves_respawned_player_still() {
        let mut world = world();
        world.spawn_block(Block::new(500, 500, 40, 20).spawn());
        world.spawn_block(Block::new(0, 100, 200, 20).danger());
        let player = world.spawn_player(Player::new(0, 41, 20, 60));
        world
            .events
            .on_player_death(|commands| commands.force_push(Vec2::new(4.0, -3.0)));

        step(&mut world, &KeyState::new(), vec![]);
        let p = world.scene.player(player).unwrap();
        assert!(p.death_timer > 0);
        assert_eq!(p.vel, Vec2::ZERO);

        world.command(Command::ForcePush(Vec2::new(1.0, 0.0)));
        assert_eq!(world.scene.player(player).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn quit_event_sets_flag() {
        let mut world = world();
        step(&mut world, &KeyState::new(), vec![InputEvent::Quit]);
        assert!(world.quit_requested());
    }

    #[test]
    fn sounds_collect_until_cleared() {
        let mut world = world();
        world.events.on_key_down(KeyCode::SPACE, |commands| commands.play_sound("jump"));
        step(&mut world, &KeyState::new(), vec![InputEvent::KeyDown { key_code: KeyCode::SPACE }]);
        assert_eq!(world.sounds(), &[SoundRequest::Effect("jump".into())]);
        world.clear_frame_data();
        assert!(world.sounds().is_empty());
    }
}
