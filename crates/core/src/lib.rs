pub mod active_map;
pub mod battle;
pub mod config;
pub mod content;
pub mod data;
pub mod entity;
pub mod error;
pub mod event;
pub mod game;
pub mod inventory;
pub mod item;
pub mod map;
pub mod menu;
pub mod message;
pub mod party;
pub mod rng;
pub mod shop;
pub mod skill;
pub mod stats;
pub mod status;
pub mod types;
pub mod world;

pub use config::GameConfig;
pub use error::{LoadError, LoadResult};
pub use game::Game;
pub use types::*;
pub use world::World;
