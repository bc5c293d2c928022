use glam::Vec2;

use crate::api::types::{BlockId, CameraId, PlayerId};
use crate::core::geometry::Rect;
use crate::core::scene::Scene;

/// What a camera keeps centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraTarget {
    /// Track the world origin.
    #[default]
    None,
    Player(PlayerId),
    Block(BlockId),
}

/// A rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    /// The identity mapping of a world rectangle.
    pub fn from_world(rect: Rect) -> Self {
        Self {
            x: rect.x as f32,
            y: rect.y as f32,
            w: rect.w as f32,
            h: rect.h as f32,
        }
    }
}

/// 2D follow camera mapping world rectangles to screen rectangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub target: CameraTarget,
    /// Pixel offset added before zooming.
    pub offset: Vec2,
    /// Scale factor, applied about the screen's top-left.
    pub zoom: f32,
}

impl Camera {
    pub fn new(target: CameraTarget) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Centre of the tracked target, or the origin if it no longer exists.
    pub fn target_center(&self, scene: &Scene) -> Vec2 {
        let rect = match self.target {
            CameraTarget::None => None,
            CameraTarget::Player(id) => scene.player(id).map(|p| p.rect),
            CameraTarget::Block(id) => scene.block(id).map(|b| b.rect),
        };
        rect.map(|r| r.center().as_vec2()).unwrap_or(Vec2::ZERO)
    }

    /// `(world - target_center + viewport / 2 + offset) * zoom`, size scaled by zoom.
    pub fn apply(&self, rect: Rect, target_center: Vec2, viewport: Vec2) -> ScreenRect {
        let pos = (rect.pos().as_vec2() - target_center + viewport / 2.0 + self.offset) * self.zoom;
        let size = rect.size().as_vec2() * self.zoom;
        ScreenRect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    /// Inverse of [`Camera::apply`] for a single point.
    pub fn unapply(&self, point: Vec2, target_center: Vec2, viewport: Vec2) -> Vec2 {
        point / self.zoom - viewport / 2.0 - self.offset + target_center
    }
}

/// The world's cameras. At most one is active at a time.
#[derive(Debug, Default)]
pub struct Cameras {
    cameras: Vec<(CameraId, Camera)>,
    active: Option<CameraId>,
    next_id: u32,
}

impl Cameras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a camera, optionally making it the active one.
    pub fn add(&mut self, camera: Camera, activate: bool) -> CameraId {
        let id = CameraId(self.next_id);
        self.next_id += 1;
        self.cameras.push((id, camera));
        if activate {
            self.active = Some(id);
        }
        id
    }

    /// Make `id` the active camera. Returns `false` for unknown ids.
    pub fn activate(&mut self, id: CameraId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.active != Some(id) {
            log::debug!("camera {} activated", id.0);
        }
        self.active = Some(id);
        true
    }

    /// Fall back to the identity transform.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<CameraId> {
        self.active
    }

    pub fn active(&self) -> Option<&Camera> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.iter().find(|(cid, _)| *cid == id).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras
            .iter_mut()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c)
    }

    /// Remove a camera. Removing the active one leaves no camera active.
    pub fn remove(&mut self, id: CameraId) -> Option<Camera> {
        let idx = self.cameras.iter().position(|(cid, _)| *cid == id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        Some(self.cameras.remove(idx).1)
    }

    /// Map a world rectangle through the active camera (identity if none).
    pub fn world_to_screen(&self, scene: &Scene, viewport: Vec2, rect: Rect) -> ScreenRect {
        match self.active() {
            Some(camera) => camera.apply(rect, camera.target_center(scene), viewport),
            None => ScreenRect::from_world(rect),
        }
    }

    /// Map a screen point back into the world (identity if no camera is active).
    pub fn screen_to_world(&self, scene: &Scene, viewport: Vec2, point: Vec2) -> Vec2 {
        match self.active() {
            Some(camera) => camera.unapply(point, camera.target_center(scene), viewport),
            None => point,
        }
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::Block;
    use crate::core::player::Player;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn target_is_centred_on_screen() {
        let mut scene = Scene::new();
        let player = scene.spawn_player(Player::new(100, 100, 40, 60));
        let mut cameras = Cameras::new();
        cameras.add(Camera::new(CameraTarget::Player(player)), true);

        let rect = scene.player(player).unwrap().rect;
        let screen = cameras.world_to_screen(&scene, VIEWPORT, rect);
        // Centre (120, 130) maps to (400, 300).
        assert_eq!(screen, ScreenRect { x: 380.0, y: 270.0, w: 40.0, h: 60.0 });
    }

    #[test]
    fn offset_and_zoom() {
        let camera = Camera::new(CameraTarget::None)
            .with_offset(Vec2::new(10.0, -20.0))
            .with_zoom(2.0);
        let screen = camera.apply(Rect::new(0, 0, 50, 25), Vec2::ZERO, VIEWPORT);
        assert_eq!(screen.x, (0.0 + 400.0 + 10.0) * 2.0);
        assert_eq!(screen.y, (0.0 + 300.0 - 20.0) * 2.0);
        assert_eq!(screen.w, 100.0);
        assert_eq!(screen.h, 50.0);
    }

    #[test]
    fn unapply_inverts_apply() {
        let camera = Camera::new(CameraTarget::None)
            .with_offset(Vec2::new(15.0, 5.0))
            .with_zoom(2.0);
        let center = Vec2::new(120.0, 80.0);
        let screen = camera.apply(Rect::new(300, 200, 10, 10), center, VIEWPORT);
        let world = camera.unapply(Vec2::new(screen.x, screen.y), center, VIEWPORT);
        assert_eq!(world, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn no_active_camera_is_identity() {
        let scene = Scene::new();
        let cameras = Cameras::new();
        let screen = cameras.world_to_screen(&scene, VIEWPORT, Rect::new(5, 6, 7, 8));
        assert_eq!(screen, ScreenRect { x: 5.0, y: 6.0, w: 7.0, h: 8.0 });
    }

    #[test]
    fn only_one_camera_is_active() {
        let mut cameras = Cameras::new();
        let a = cameras.add(Camera::new(CameraTarget::None), true);
        let b = cameras.add(Camera::new(CameraTarget::None).with_zoom(3.0), true);
        assert_eq!(cameras.active_id(), Some(b));
        assert!(cameras.activate(a));
        assert_eq!(cameras.active_id(), Some(a));
        assert!(!cameras.activate(CameraId(99)));
        assert_eq!(cameras.active_id(), Some(a));

        cameras.remove(a);
        assert!(cameras.active().is_none());
    }

    #[test]
    fn missing_target_tracks_origin() {
        let mut scene = Scene::new();
        let block = scene.blocks.register(Block::new(500, 500, 10, 10));
        let camera = Camera::new(CameraTarget::Block(block));
        assert_eq!(camera.target_center(&scene), Vec2::new(505.0, 505.0));
        scene.blocks.deregister(block);
        assert_eq!(camera.target_center(&scene), Vec2::ZERO);
    }
}
