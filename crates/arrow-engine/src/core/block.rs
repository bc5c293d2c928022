use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::api::config::BlockConfig;
use crate::api::types::{BlockId, FrameHandle};
use crate::core::commands::Commands;
use crate::core::geometry::Rect;
use crate::core::player::Player;

/// Fill for plain blocks without a sprite.
pub const BLOCK_FILL: [u8; 3] = [100, 200, 100];
/// Fill for hazard blocks without a sprite.
pub const DANGER_FILL: [u8; 3] = [200, 50, 50];

/// Called when a player is pushed out of (or lands on) a block.
pub type CollideCallback = Box<dyn FnMut(BlockId, &mut Player, &mut Commands)>;
/// Called when a pointer-down lands inside a block.
pub type ClickCallback = Box<dyn FnMut(BlockId, &mut Commands)>;

/// Gameplay flags. Always present, all off by default. Stored inline in a
/// block's level entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFlags {
    /// Kills a player on any overlap.
    pub danger: bool,
    /// Marks the respawn anchor. Only the first registered one is used.
    pub spawn: bool,
    /// Skipped by collision resolution; still clickable.
    pub passable: bool,
    /// Players moving upward pass through it.
    pub ladder: bool,
}

/// How an entity appears. Resolved by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// A decoded sprite frame.
    Sprite(FrameHandle),
    /// A solid rectangle (also the fallback for failed sprite loads).
    Fill([u8; 3]),
    /// An upward-pointing triangle filling the rectangle, for hazards.
    Spike([u8; 3]),
}

/// A static or scripted axis-aligned obstacle.
pub struct Block {
    /// Name used as the key when saving a level.
    pub tag: String,
    pub rect: Rect,
    pub visual: Visual,
    /// Sprite id the visual was resolved from, kept for saving.
    pub sprite: Option<String>,
    pub alpha: u8,
    pub flags: BlockFlags,
    pub on_collide: Option<CollideCallback>,
    pub on_click: Option<ClickCallback>,
}

impl Block {
    /// A plain solid block at `(x, y)` with the given size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            tag: String::new(),
            rect: Rect::new(x, y, w, h),
            visual: Visual::Fill(BLOCK_FILL),
            sprite: None,
            alpha: 255,
            flags: BlockFlags::default(),
            on_collide: None,
            on_click: None,
        }
    }

    /// Build from level data. `visual` comes from the sprite cache, or `None`
    /// to use the default fill for the block's flags.
    pub fn from_config(config: &BlockConfig, visual: Option<Visual>) -> Self {
        let flags = config.flags;
        Self {
            tag: String::new(),
            rect: Rect::from_pos_size(
                IVec2::new(config.x, config.y),
                IVec2::new(config.scale[0], config.scale[1]),
            ),
            visual: visual.unwrap_or_else(|| default_fill(&flags)),
            sprite: config.sprite.clone(),
            alpha: config.alpha,
            flags,
            on_collide: None,
            on_click: None,
        }
    }

    /// The level-data view of this block. Callbacks are not included.
    pub fn config(&self) -> BlockConfig {
        BlockConfig {
            sprite: self.sprite.clone(),
            scale: [self.rect.w, self.rect.h],
            x: self.rect.x,
            y: self.rect.y,
            flags: self.flags,
            alpha: self.alpha,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_flags(mut self, flags: BlockFlags) -> Self {
        let recolor = self.visual == default_fill(&self.flags);
        self.flags = flags;
        if recolor {
            self.visual = default_fill(&self.flags);
        }
        self
    }

    pub fn danger(self) -> Self {
        let flags = BlockFlags { danger: true, ..self.flags };
        self.with_flags(flags)
    }

    pub fn spawn(self) -> Self {
        let flags = BlockFlags { spawn: true, ..self.flags };
        self.with_flags(flags)
    }

    pub fn passable(self) -> Self {
        let flags = BlockFlags { passable: true, ..self.flags };
        self.with_flags(flags)
    }

    pub fn ladder(self) -> Self {
        let flags = BlockFlags { ladder: true, ..self.flags };
        self.with_flags(flags)
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    /// Attach a resolved sprite and remember its id for saving.
    pub fn with_sprite(mut self, id: impl Into<String>, visual: Visual) -> Self {
        self.sprite = Some(id.into());
        self.visual = visual;
        self
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn on_collide(
        mut self,
        callback: impl FnMut(BlockId, &mut Player, &mut Commands) + 'static,
    ) -> Self {
        self.on_collide = Some(Box::new(callback));
        self
    }

    pub fn on_click(mut self, callback: impl FnMut(BlockId, &mut Commands) + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("tag", &self.tag)
            .field("rect", &self.rect)
            .field("visual", &self.visual)
            .field("flags", &self.flags)
            .field("on_collide", &self.on_collide.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

fn default_fill(flags: &BlockFlags) -> Visual {
    if flags.danger {
        Visual::Fill(DANGER_FILL)
    } else {
        Visual::Fill(BLOCK_FILL)
    }
}
