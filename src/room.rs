use crate::{
    config::ConfigError,
    geometry::{Point, Rect},
    hallway::{Direction, Hallway, Rgb},
    level::HallwayId,
    Tile, TileEncoder,
};

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;

bitflags! {
    /// Gameplay roles a room can be tagged with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoomType: u8 {
        const DEFAULT = 1;
        const START = 1 << 1;
        const EXIT = 1 << 2;
        const BOSS = 1 << 3;
        const TREASURE = 1 << 4;
        const PRISON = 1 << 5;
        const LIBRARY = 1 << 6;
        const KITCHEN = 1 << 7;
    }
}

impl Default for RoomType {
    fn default() -> Self {
        RoomType::DEFAULT
    }
}

impl Serialize for RoomType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoomType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(RoomType::from_bits_truncate(bits))
    }
}

pub const WALL_MARKER: Rgb = Rgb::BLACK;
pub const FILL_MARKER: Rgb = Rgb::WHITE;

/// An authored room shape. Pixels are stored row-major with `y = 0` as the bottom row; the
/// layout's dimensions are the room's dimensions.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RoomLayout {
    width: i32,
    height: i32,
    pixels: Vec<Rgb>,
}

impl RoomLayout {
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Rgb>) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyLayout);
        }
        if pixels.len() != (width * height) as usize {
            return Err(ConfigError::LayoutPixelCount {
                expected: (width * height) as usize,
                actual: pixels.len(),
            });
        }

        Ok(RoomLayout {
            width,
            height,
            pixels,
        })
    }

    /// Parses text rows, top row first: `#` wall, `.` floor, and `<`, `>`, `^`, `v` for Left,
    /// Right, Top and Bottom doorways.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 {
            return Err(ConfigError::EmptyLayout);
        }

        let mut pixels = vec![FILL_MARKER; width * height];
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            if text.chars().count() != width {
                return Err(ConfigError::RaggedLayout { row });
            }
            let y = height - 1 - row;
            for (col, ch) in text.chars().enumerate() {
                pixels[y * width + col] =
                    char_to_pixel(ch).ok_or(ConfigError::UnknownLayoutPixel { ch, row, col })?;
            }
        }

        RoomLayout::from_pixels(width as i32, height as i32, pixels)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel(&self, p: &Point) -> Option<Rgb> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }

        self.pixels.get((p.y * self.width + p.x) as usize).copied()
    }

    fn is_border(&self, p: &Point) -> bool {
        p.x == 0 || p.y == 0 || p.x == self.width - 1 || p.y == self.height - 1
    }

    /// Decodes the doorway markers on the border of the layout. Markers off the border are
    /// ignored.
    pub fn doorways(&self) -> Vec<Hallway> {
        let mut doorways = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                if !self.is_border(&p) {
                    continue;
                }
                let direction = self.pixel(&p).and_then(Direction::from_marker_color);
                if let Some(direction) = direction {
                    doorways.push(Hallway::new(direction, p));
                }
            }
        }

        doorways
    }
}

fn char_to_pixel(ch: char) -> Option<Rgb> {
    match ch {
        '#' => Some(WALL_MARKER),
        '.' => Some(FILL_MARKER),
        '<' => Some(Direction::Left.marker_color()),
        '>' => Some(Direction::Right.marker_color()),
        '^' => Some(Direction::Top.marker_color()),
        'v' => Some(Direction::Bottom.marker_color()),
        _ => None,
    }
}

fn pixel_to_char(pixel: Rgb) -> char {
    match Direction::from_marker_color(pixel) {
        Some(Direction::Left) => '<',
        Some(Direction::Right) => '>',
        Some(Direction::Top) => '^',
        Some(Direction::Bottom) => 'v',
        None if pixel == WALL_MARKER => '#',
        None => '.',
    }
}

impl TryFrom<Vec<String>> for RoomLayout {
    type Error = ConfigError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        RoomLayout::from_rows(&rows)
    }
}

impl From<RoomLayout> for Vec<String> {
    fn from(layout: RoomLayout) -> Self {
        (0..layout.height)
            .rev()
            .map(|y| {
                (0..layout.width)
                    .map(|x| pixel_to_char(layout.pixels[(y * layout.width + x) as usize]))
                    .collect()
            })
            .collect()
    }
}

/// Doorway candidates along the edges of a `width` x `length` room, keeping `margin` cells clear
/// of each corner.
pub fn rectangular_doorways(width: i32, length: i32, margin: i32) -> Vec<Hallway> {
    let mut doorways = Vec::new();

    let top = length - 1;
    for x in margin..width - margin {
        doorways.push(Hallway::new(Direction::Bottom, Point::new(x, 0)));
        doorways.push(Hallway::new(Direction::Top, Point::new(x, top)));
    }

    let right = width - 1;
    for y in margin..length - margin {
        doorways.push(Hallway::new(Direction::Left, Point::new(0, y)));
        doorways.push(Hallway::new(Direction::Right, Point::new(right, y)));
    }

    doorways
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Room {
    area: Rect,
    layout: Option<RoomLayout>,
    template: usize,
    hallways: Vec<HallwayId>,
    role: RoomType,
}

impl Room {
    pub fn new(area: Rect, template: usize) -> Self {
        Room {
            area,
            layout: None,
            template,
            hallways: Vec::new(),
            role: RoomType::DEFAULT,
        }
    }

    pub fn from_layout(position: Point, layout: RoomLayout, template: usize) -> Self {
        let area = Rect::from_min_and_size(position, layout.width(), layout.height());

        Room {
            layout: Some(layout),
            ..Room::new(area, template)
        }
    }

    /// The same room moved so its origin is at `position`.
    pub fn placed_at(mut self, position: Point) -> Self {
        self.area.x = position.x;
        self.area.y = position.y;

        self
    }

    pub fn area(&self) -> &Rect {
        &self.area
    }

    pub fn layout(&self) -> Option<&RoomLayout> {
        self.layout.as_ref()
    }

    /// Index of the template this room was instantiated from.
    pub fn template(&self) -> usize {
        self.template
    }

    pub fn hallways(&self) -> &[HallwayId] {
        &self.hallways
    }

    pub fn connectedness(&self) -> usize {
        self.hallways.len()
    }

    pub fn role(&self) -> RoomType {
        self.role
    }

    pub fn has_role(&self, role: RoomType) -> bool {
        self.role.contains(role)
    }

    pub fn is_default(&self) -> bool {
        self.role == RoomType::DEFAULT
    }

    pub(crate) fn set_role(&mut self, role: RoomType) {
        self.role = role;
    }

    pub(crate) fn attach_hallway(&mut self, hallway: HallwayId) {
        self.hallways.push(hallway);
    }

    /// All doorway candidates in the room's local frame. Authored rooms use their layout markers;
    /// rectangular rooms use every edge cell at least `door_distance_from_edge` from a corner.
    pub fn calculate_all_possible_doorways(&self, door_distance_from_edge: i32) -> Vec<Hallway> {
        match self.layout.as_ref() {
            Some(layout) => layout.doorways(),
            None => rectangular_doorways(
                self.area.width,
                self.area.height,
                door_distance_from_edge,
            ),
        }
    }
}

pub fn fill_map_with_rooms<'a>(
    rooms: impl IntoIterator<Item = &'a Room>,
    encoder: &mut impl TileEncoder,
) {
    for r in rooms {
        let origin = r.area.position();
        for p in r.area.points() {
            let is_wall = r
                .layout
                .as_ref()
                .and_then(|l| l.pixel(&(p - origin)))
                .map_or(false, |pixel| pixel == WALL_MARKER);
            let tile = if is_wall { Tile::Wall } else { Tile::Floor };
            encoder.encode_tile(&p, tile);
        }
    }
}

/// Writes the corridor cells between the two doorways of each bound hallway. The doorway cells
/// themselves belong to the rooms.
pub fn fill_map_with_hallways<'a>(
    hallways: impl IntoIterator<Item = &'a Hallway>,
    encoder: &mut impl TileEncoder,
) {
    for h in hallways {
        if h.is_open() {
            continue;
        }
        let start = h.start_position_absolute();
        for p in h.area().points() {
            if p == start || Some(p) == h.end_position_absolute() {
                continue;
            }
            encoder.encode_tile(&p, Tile::Hallway);
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
