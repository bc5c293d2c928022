use std::collections::HashMap;

use crate::api::types::FrameHandle;
use crate::core::block::Visual;
use crate::renderer::traits::AssetLoader;

/// Cache of resolved sprite ids.
/// Each id is sent to the loader once; failures are cached as fallbacks too,
/// so a missing file is reported a single time.
#[derive(Debug, Default)]
pub struct SpriteCache {
    resolved: HashMap<String, Option<FrameHandle>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `id` to a sprite visual, or `fallback` if it cannot be loaded.
    pub fn resolve(&mut self, loader: &mut dyn AssetLoader, id: &str, fallback: Visual) -> Visual {
        let handle = *self
            .resolved
            .entry(id.to_string())
            .or_insert_with(|| match loader.load_sprite(id) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    log::warn!("{}; drawing a filled rectangle instead", err);
                    None
                }
            });
        handle.map(Visual::Sprite).unwrap_or(fallback)
    }

    /// Look up an id without loading it.
    pub fn get(&self, id: &str) -> Option<FrameHandle> {
        self.resolved.get(id).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
