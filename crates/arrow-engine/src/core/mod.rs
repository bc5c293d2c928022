pub mod block;
pub mod blocks;
pub mod commands;
pub mod geometry;
pub mod mover;
pub mod player;
pub mod scene;
pub mod time;
pub mod world;
