pub mod config;
pub mod geometry;
pub mod graph;
pub mod hallway;
pub mod level;
pub mod map_types;
pub mod room;
pub mod sampling;
pub mod summary;
pub mod template;

mod symmetric_map;

pub use config::{ConfigError, LevelLayoutConfig};
pub use geometry::{Point, Rect};
pub use hallway::{Direction, Hallway};
pub use level::{HallwayId, Level, RoomId};
pub use map_types::rooms::generate;
pub use room::{Room, RoomLayout, RoomType};
pub use template::{RoomTemplate, SizeRange, TemplateShape};

use serde::{Deserialize, Serialize};

/// Implement this to materialize a generated level into your own tile map.
pub trait TileEncoder {
    fn encode_tile(&mut self, point: &Point, tile: Tile);
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Tile {
    Floor,
    Wall,
    Hallway,
}
