//! Level documents: the JSON form of a world's construction parameters.
//!
//! ```json
//! {
//!   "globals": {
//!     "physics": { "gravity": 0.5 },
//!     "players": { "sprite": "hero.png", "scale": [40, 60], "x": 100, "y": 100 }
//!   },
//!   "blocks": {
//!     "floor": { "scale": [800, 40], "x": 0, "y": 560 },
//!     "start": { "scale": [40, 10], "x": 60, "y": 550, "spawn": true }
//!   }
//! }
//! ```
//!
//! `players` may be a single object or an array. Block entries keep document
//! order, which is also their registration order.

use serde::{Deserialize, Serialize};

use crate::api::config::{BlockConfig, PhysicsConfig, PlayerConfig};
use crate::api::error::Result;
use crate::api::types::{BlockId, PlayerId};
use crate::assets::registry::SpriteCache;
use crate::core::block::Block;
use crate::core::player::Player;
use crate::core::world::World;
use crate::renderer::traits::AssetLoader;

/// A parsed level document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelDoc {
    #[serde(default)]
    pub globals: Globals,
    /// Named blocks in document order.
    #[serde(default, with = "named_blocks")]
    pub blocks: Vec<(String, BlockConfig)>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Globals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsConfig>,
    #[serde(with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<PlayerConfig>,
}

impl LevelDoc {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Resolve a document's defaults into the parameters used to build a world.
pub fn load(doc: &LevelDoc) -> LevelSetup {
    LevelSetup {
        physics: doc.globals.physics.unwrap_or_default(),
        players: doc.globals.players.clone(),
        blocks: doc.blocks.clone(),
    }
}

/// Capture a world's current construction parameters. Blocks are named by
/// tag; untagged or duplicate names get a numbered name instead.
pub fn save(world: &World) -> LevelDoc {
    let mut blocks: Vec<(String, BlockConfig)> = Vec::with_capacity(world.scene.blocks.len());
    for (index, (_, block)) in world.scene.blocks.iter().enumerate() {
        let base = if block.tag.is_empty() {
            format!("block{}", index + 1)
        } else {
            block.tag.clone()
        };
        let mut name = base.clone();
        let mut suffix = 2;
        while blocks.iter().any(|(n, _)| *n == name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        blocks.push((name, block.config()));
    }

    let doc = LevelDoc {
        globals: Globals {
            physics: Some(world.physics),
            players: world.scene.players().map(|p| p.config()).collect(),
        },
        blocks,
    };
    log::info!(
        "saved level: {} blocks, {} players",
        doc.blocks.len(),
        doc.globals.players.len()
    );
    doc
}

/// Everything needed to rebuild a level, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSetup {
    pub physics: PhysicsConfig,
    pub players: Vec<PlayerConfig>,
    pub blocks: Vec<(String, BlockConfig)>,
}

/// Ids handed out while spawning a level, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnedLevel {
    pub players: Vec<PlayerId>,
    pub blocks: Vec<BlockId>,
}

impl LevelSetup {
    /// Register every block, then every player, into `world`.
    /// Sprites that fail to load fall back to filled rectangles.
    pub fn spawn_into(
        &self,
        world: &mut World,
        sprites: &mut SpriteCache,
        loader: &mut dyn AssetLoader,
    ) -> SpawnedLevel {
        world.set_physics(self.physics);

        let mut spawned = SpawnedLevel::default();
        for (name, config) in &self.blocks {
            let mut block = Block::from_config(config, None).with_tag(name.as_str());
            if let Some(id) = &config.sprite {
                block.visual = sprites.resolve(loader, id, block.visual);
            }
            spawned.blocks.push(world.spawn_block(block));
        }
        for config in &self.players {
            let mut player = Player::from_config(config, None);
            if let Some(id) = &config.sprite {
                player.visual = sprites.resolve(loader, id, player.visual);
            }
            spawned.players.push(world.spawn_player(player));
        }

        log::info!(
            "loaded level: {} blocks, {} players",
            spawned.blocks.len(),
            spawned.players.len()
        );
        spawned
    }
}

mod named_blocks {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::api::config::BlockConfig;

    pub fn serialize<S: Serializer>(
        blocks: &[(String, BlockConfig)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(blocks.len()))?;
        for (name, config) in blocks {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, BlockConfig)>, D::Error> {
        struct Ordered;

        impl<'de> Visitor<'de> for Ordered {
            type Value = Vec<(String, BlockConfig)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of block names to block parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut blocks = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, BlockConfig>()? {
                    blocks.push(entry);
                }
                Ok(blocks)
            }
        }

        deserializer.deserialize_map(Ordered)
    }
}

mod one_or_many {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::api::config::PlayerConfig;

    // Many is tried first: an empty array would otherwise parse as a
    // defaulted single player.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<PlayerConfig>),
        One(PlayerConfig),
    }

    pub fn serialize<S: Serializer>(players: &[PlayerConfig], serializer: S) -> Result<S::Ok, S::Error> {
        match players {
            [one] => one.serialize(serializer),
            many => many.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PlayerConfig>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::Many(players) => players,
            OneOrMany::One(player) => vec![player],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::EngineConfig;
    use crate::api::types::FrameHandle;
    use crate::core::block::Visual;
    use crate::renderer::traits::NoAssets;

    const LEVEL: &str = r#"{
        "globals": {
            "physics": { "gravity": 0.75 },
            "players": { "sprite": "hero.png", "scale": [30, 50], "x": 10, "y": 20,
                         "walk_accelaration": 2, "max_walkspeed": 6 }
        },
        "blocks": {
            "zeta": { "scale": [800, 40], "x": 0, "y": 560 },
            "alpha": { "scale": [40, 10], "x": 60, "y": 550, "spawn": true },
            "lava": { "scale": [100, 20], "x": 300, "y": 540, "danger": true, "sprite": "lava.png" }
        }
    }"#;

    struct OnlyHero;

    impl AssetLoader for OnlyHero {
        fn load_sprite(&mut self, id: &str) -> Result<FrameHandle> {
            match id {
                "hero.png" => Ok(FrameHandle(7)),
                _ => NoAssets.load_sprite(id),
            }
        }
    }

    #[test]
    fn blocks_keep_document_order() {
        let doc = LevelDoc::from_json(LEVEL).unwrap();
        let names: Vec<&str> = doc.blocks.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "lava"]);
    }

    #[test]
    fn single_player_object_or_array() {
        let doc = LevelDoc::from_json(LEVEL).unwrap();
        assert_eq!(doc.globals.players.len(), 1);
        assert_eq!(doc.globals.players[0].walk_acceleration, 2.0);

        let doc = LevelDoc::from_json(r#"{ "globals": { "players": [{ "x": 1 }, { "x": 2 }] } }"#).unwrap();
        assert_eq!(doc.globals.players.len(), 2);
        assert_eq!(doc.globals.players[1].x, 2);

        let doc = LevelDoc::from_json(r#"{ "globals": { "players": [] } }"#).unwrap();
        assert!(doc.globals.players.is_empty());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let doc = LevelDoc::from_json("{}").unwrap();
        let setup = load(&doc);
        assert_eq!(setup.physics, PhysicsConfig::default());
        assert!(setup.players.is_empty());
        assert!(setup.blocks.is_empty());
    }

    #[test]
    fn malformed_json_is_a_level_error() {
        let err = LevelDoc::from_json("{ \"blocks\": [").unwrap_err();
        assert!(matches!(err, crate::api::error::EngineError::Level(_)));
    }

    #[test]
    fn spawn_resolves_sprites_with_fallback() {
        let setup = load(&LevelDoc::from_json(LEVEL).unwrap());
        let mut world = World::new(&EngineConfig::default());
        let mut sprites = SpriteCache::new();
        let spawned = setup.spawn_into(&mut world, &mut sprites, &mut OnlyHero);

        assert_eq!(world.physics.gravity, 0.75);
        assert_eq!(spawned.blocks.len(), 3);
        let lava = world.scene.block(spawned.blocks[2]).unwrap();
        assert_eq!(lava.tag, "lava");
        assert!(lava.flags.danger);
        assert!(matches!(lava.visual, Visual::Fill(_)));
        assert_eq!(lava.sprite.as_deref(), Some("lava.png"));

        let hero = world.scene.player(spawned.players[0]).unwrap();
        assert_eq!(hero.visual, Visual::Sprite(FrameHandle(7)));
        assert_eq!(hero.tunables.max_walk_speed, 6.0);
    }

    #[test]
    fn save_then_load_reproduces_the_world() {
        let mut world = World::new(&EngineConfig::default());
        world.spawn_block(Block::new(0, 560, 800, 40).with_tag("floor"));
        world.spawn_block(Block::new(60, 550, 40, 10).spawn());
        world.spawn_block(Block::new(300, 540, 100, 20).danger().with_alpha(128));
        world.spawn_player(Player::new(10, 20, 30, 50));

        let json = save(&world).to_json().unwrap();
        let doc = LevelDoc::from_json(&json).unwrap();
        let names: Vec<&str> = doc.blocks.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["floor", "block2", "block3"]);

        let mut restored = World::new(&EngineConfig::default());
        load(&doc).spawn_into(&mut restored, &mut SpriteCache::new(), &mut NoAssets);

        let before: Vec<BlockConfig> = world.scene.blocks.iter().map(|(_, b)| b.config()).collect();
        let after: Vec<BlockConfig> = restored.scene.blocks.iter().map(|(_, b)| b.config()).collect();
        assert_eq!(before, after);

        let before: Vec<PlayerConfig> = world.scene.players().map(|p| p.config()).collect();
        let after: Vec<PlayerConfig> = restored.scene.players().map(|p| p.config()).collect();
        assert_eq!(before, after);
        assert_eq!(restored.physics, world.physics);
    }

    #[test]
    fn duplicate_tags_get_numbered_names() {
        let mut world = World::new(&EngineConfig::default());
        world.spawn_block(Block::new(0, 0, 10, 10).with_tag("coin"));
        world.spawn_block(Block::new(20, 0, 10, 10).with_tag("coin"));
        let doc = save(&world);
        assert_eq!(doc.blocks[0].0, "coin");
        assert_eq!(doc.blocks[1].0, "coin_2");
    }

    #[test]
    fn single_player_saves_as_object() {
        let mut world = World::new(&EngineConfig::default());
        world.spawn_player(Player::new(0, 0, 10, 10));
        let json = save(&world).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["globals"]["players"].is_object());
    }
}
