use crate::api::config::EngineConfig;
use crate::api::error::Result;
use crate::api::types::KeyCode;
use crate::core::time::FixedTimestep;
use crate::core::world::World;
use crate::input::queue::{InputEvent, InputQueue, KeyState};
use crate::renderer::instance::DrawList;
use crate::renderer::traits::Renderer;

/// The contract every game built on the engine fulfils.
pub trait Game {
    /// Engine configuration. Called once before init.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Register blocks, players, cameras and callbacks.
    fn init(&mut self, world: &mut World) -> Result<()>;

    /// Per-tick game logic, run after the world has stepped.
    fn update(&mut self, _world: &mut World) {}
}

/// Drives a [`Game`] with a fixed timestep: buffers host input, steps the
/// world, and rebuilds the draw list once per rendered frame.
pub struct GameRunner<G: Game> {
    game: G,
    world: World,
    input: InputQueue,
    keys: KeyState,
    timestep: FixedTimestep,
    draw_list: DrawList,
    config: EngineConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let mut draw_list = DrawList::with_capacity(256);
        draw_list.background = config.background;
        Self {
            world: World::new(&config),
            timestep: FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame),
            draw_list,
            game,
            input: InputQueue::new(),
            keys: KeyState::new(),
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) -> Result<()> {
        self.game.init(&mut self.world)?;
        self.initialized = true;
        log::info!(
            "game initialized: {} blocks, {} players",
            self.world.scene.blocks.len(),
            self.world.scene.player_count()
        );
        Ok(())
    }

    /// Queue a host input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// A key went down: queue the edge and mark it held.
    pub fn key_down(&mut self, key: KeyCode) {
        self.keys.press(key);
        self.input.push(InputEvent::KeyDown { key_code: key });
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    /// Run the ticks owed for `dt` seconds and rebuild the draw list.
    /// Returns how many ticks ran.
    pub fn frame(&mut self, dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }
        self.world.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let mut ran = 0;
        for _ in 0..steps {
            if self.world.quit_requested() {
                break;
            }
            self.world.step(&self.keys, &mut self.input);
            self.game.update(&mut self.world);
            ran += 1;
        }

        self.world.build_draw_list(&mut self.draw_list);
        ran
    }

    /// Hand the latest draw list to a renderer.
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.draw(&self.draw_list);
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn quit_requested(&self) -> bool {
        self.world.quit_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Block;
    use crate::core::player::Player;

    struct Demo {
        updates: u32,
    }

    impl Game for Demo {
        fn init(&mut self, world: &mut World) -> Result<()> {
            world.spawn_block(Block::new(0, 100, 200, 20));
            world.spawn_player(Player::new(0, 40, 20, 60));
            Ok(())
        }

        fn update(&mut self, _world: &mut World) {
            self.updates += 1;
        }
    }

    #[test]
    fn nothing_runs_before_init() {
        let mut runner = GameRunner::new(Demo { updates: 0 });
        assert_eq!(runner.frame(1.0 / 60.0), 0);
        assert!(runner.draw_list().is_empty());
    }

    #[test]
    fn frame_steps_and_draws() {
        let mut runner = GameRunner::new(Demo { updates: 0 });
        runner.init().unwrap();
        assert_eq!(runner.frame(1.0 / 60.0), 1);
        assert_eq!(runner.game().updates, 1);
        assert_eq!(runner.world().tick_count(), 1);
        assert_eq!(runner.draw_list().len(), 2);
        assert_eq!(runner.draw_list().background, EngineConfig::default().background);
    }

    #[test]
    fn quit_stops_stepping() {
        let mut runner = GameRunner::new(Demo { updates: 0 });
        runner.init().unwrap();
        runner.push_input(InputEvent::Quit);
        runner.frame(1.0 / 60.0);
        assert!(runner.quit_requested());
        assert_eq!(runner.frame(1.0 / 30.0), 0);
    }

    #[test]
    fn renderer_receives_draw_list() {
        struct Count(usize);
        impl Renderer for Count {
            fn draw(&mut self, list: &DrawList) {
                self.0 = list.len();
            }
        }

        let mut runner = GameRunner::new(Demo { updates: 0 });
        runner.init().unwrap();
        runner.frame(1.0 / 60.0);
        let mut renderer = Count(0);
        runner.render(&mut renderer);
        assert_eq!(renderer.0, 2);
    }
}
