use glam::Vec2;

use crate::core::scene::Scene;
use crate::renderer::camera::Cameras;
use crate::renderer::instance::{DrawInstance, DrawList};

/// Build the frame's draw list from the scene.
/// Blocks come first in registration order, then players in spawn order,
/// each mapped through the active camera.
pub fn build_draw_list(scene: &Scene, cameras: &Cameras, viewport: Vec2, list: &mut DrawList) {
    list.clear();

    for (_, block) in scene.blocks.iter() {
        let rect = cameras.world_to_screen(scene, viewport, block.rect);
        list.push(DrawInstance::new(&block.visual, rect, block.alpha));
    }

    for player in scene.players() {
        let rect = cameras.world_to_screen(scene, viewport, player.rect);
        list.push(DrawInstance::new(&player.visual, rect, u8::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Block;
    use crate::core::player::Player;
    use crate::renderer::camera::{Camera, CameraTarget};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn blocks_draw_before_players() {
        let mut scene = Scene::new();
        scene.spawn_player(Player::new(1, 1, 10, 10));
        scene.blocks.register(Block::new(2, 2, 10, 10));
        scene.blocks.register(Block::new(3, 3, 10, 10).with_alpha(51));

        let mut list = DrawList::new();
        build_draw_list(&scene, &Cameras::new(), VIEWPORT, &mut list);

        let xs: Vec<f32> = list.instances.iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 1.0]);
        assert!((list.instances[1].alpha - 0.2).abs() < 1e-6);
    }

    #[test]
    fn active_camera_transforms_everything() {
        let mut scene = Scene::new();
        let player = scene.spawn_player(Player::new(0, 0, 40, 60));
        scene.blocks.register(Block::new(100, 0, 10, 10));
        let mut cameras = Cameras::new();
        cameras.add(Camera::new(CameraTarget::Player(player)).with_zoom(2.0), true);

        let mut list = DrawList::new();
        build_draw_list(&scene, &cameras, VIEWPORT, &mut list);

        // Player centre (20, 30) sits at the viewport centre before zoom.
        let block = list.instances[0];
        assert_eq!(block.x, (100.0 - 20.0 + 400.0) * 2.0);
        assert_eq!(block.w, 20.0);
        let hero = list.instances[1];
        assert_eq!(hero.x, (0.0 - 20.0 + 400.0) * 2.0);
        assert_eq!(hero.y, (0.0 - 30.0 + 300.0) * 2.0);
    }
}
