use bytemuck::{Pod, Zeroable};

use crate::core::block::Visual;
use crate::renderer::camera::ScreenRect;

/// Per-instance draw data handed to the render backend.
/// 8 × 4 bytes = 32 bytes stride, safe to upload as a raw buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Screen-space top-left X in pixels.
    pub x: f32,
    /// Screen-space top-left Y in pixels.
    pub y: f32,
    /// Screen-space width in pixels.
    pub w: f32,
    /// Screen-space height in pixels.
    pub h: f32,
    /// Frame handle for [`DrawInstance::KIND_SPRITE`], otherwise 0.
    pub frame: u32,
    /// Packed `0x00RRGGBB` for fills and spikes, otherwise 0.
    pub color: u32,
    /// One of the `KIND_*` constants.
    pub kind: u32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_SPRITE: u32 = 0;
    pub const KIND_FILL: u32 = 1;
    pub const KIND_SPIKE: u32 = 2;

    pub fn new(visual: &Visual, rect: ScreenRect, alpha: u8) -> Self {
        let (kind, frame, color) = match *visual {
            Visual::Sprite(handle) => (Self::KIND_SPRITE, handle.0, 0),
            Visual::Fill(rgb) => (Self::KIND_FILL, 0, pack_rgb(rgb)),
            Visual::Spike(rgb) => (Self::KIND_SPIKE, 0, pack_rgb(rgb)),
        };
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            frame,
            color,
            kind,
            alpha: alpha as f32 / 255.0,
        }
    }
}

fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Draw list for one frame, in back-to-front order.
pub struct DrawList {
    pub instances: Vec<DrawInstance>,
    /// Clear colour for the frame.
    pub background: [u8; 3],
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            background: [0, 0, 0],
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes of the instance array for buffer uploads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}
