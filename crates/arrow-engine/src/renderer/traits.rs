//! Seams to the host: the render backend and the asset loader.
//!
//! Window creation, decoding, and blitting all happen behind these traits.
//! The core only produces draw lists and asks for frame handles.

use crate::api::error::Result;
use crate::api::types::FrameHandle;
use crate::renderer::instance::DrawList;

/// A render backend. Receives one finished draw list per frame and never
/// hands pixels back to the core.
pub trait Renderer {
    fn draw(&mut self, list: &DrawList);
}

/// Resolves sprite ids (paths, atlas names) to frame handles.
pub trait AssetLoader {
    /// Fails with [`EngineError::AssetLoad`](crate::api::error::EngineError::AssetLoad)
    /// when the source is missing or cannot be decoded.
    fn load_sprite(&mut self, id: &str) -> Result<FrameHandle>;
}

/// A loader with no assets; every sprite falls back to a fill.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetLoader for NoAssets {
    fn load_sprite(&mut self, id: &str) -> Result<FrameHandle> {
        Err(crate::api::error::EngineError::AssetLoad {
            id: id.to_string(),
            reason: "no asset loader configured".into(),
        })
    }
}
