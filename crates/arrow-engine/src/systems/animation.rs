//! Animation system: ticks animations and updates target visuals.

use crate::api::types::{AnimationId, Target};
use crate::components::animation::Animation;
use crate::core::block::Visual;
use crate::core::scene::Scene;

/// Registered animations, ticked in registration order.
#[derive(Debug, Default)]
pub struct Animator {
    animations: Vec<(AnimationId, Animation)>,
    next_id: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validated animation. Returns a handle for later control.
    pub fn add(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.animations.push((id, animation));
        id
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Animation> {
        let idx = self.animations.iter().position(|(aid, _)| *aid == id)?;
        Some(self.animations.remove(idx).1)
    }

    /// Remove all animations driving `target`.
    pub fn remove_target(&mut self, target: Target) {
        self.animations.retain(|(_, a)| a.target != target);
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations
            .iter()
            .find(|(aid, _)| *aid == id)
            .map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.animations
            .iter_mut()
            .find(|(aid, _)| *aid == id)
            .map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn clear(&mut self) {
        self.animations.clear();
    }
}

/// Tick all animations and write changed frames into their targets' visuals.
///
/// Call this once per tick, after the movers.
pub fn tick_animations(animator: &mut Animator, scene: &mut Scene) {
    for (_, anim) in animator.animations.iter_mut() {
        if let Some(frame) = anim.tick() {
            if let Some(visual) = scene.visual_mut(anim.target) {
                *visual = Visual::Sprite(frame);
            }
        }
    }
}
