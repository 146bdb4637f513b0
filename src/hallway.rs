use crate::{
    geometry::{Point, Rect},
    level::RoomId,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Top,
    Direction::Bottom,
];

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Colour used when previewing open doorways.
    pub fn debug_color(self) -> Rgb {
        match self {
            Direction::Left => Rgb(255, 255, 0),
            Direction::Right => Rgb(0, 255, 255),
            Direction::Top => Rgb(255, 0, 255),
            Direction::Bottom => Rgb(255, 128, 0),
        }
    }

    /// Colour that marks a doorway of this direction in an authored room layout.
    pub fn marker_color(self) -> Rgb {
        match self {
            Direction::Left => Rgb(255, 0, 0),
            Direction::Right => Rgb(0, 255, 0),
            Direction::Top => Rgb(0, 0, 255),
            Direction::Bottom => Rgb(128, 0, 128),
        }
    }

    pub fn from_marker_color(color: Rgb) -> Option<Direction> {
        ALL_DIRECTIONS
            .iter()
            .copied()
            .find(|d| d.marker_color() == color)
    }
}

/// A doorway on the perimeter of its start room. Once growth consumes it, it also knows the room
/// and doorway it leads to, and from then on it is a hallway of the level.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Hallway {
    direction: Direction,
    position: Point,
    start_room: RoomId,
    start_room_origin: Point,
    end: Option<HallwayEnd>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct HallwayEnd {
    pub room: RoomId,
    /// Position of the matched doorway in the end room's local frame.
    pub position: Point,
    pub room_origin: Point,
}

impl Hallway {
    /// A doorway at `position` in the local frame of a room that isn't placed yet.
    pub fn new(direction: Direction, position: Point) -> Self {
        Hallway {
            direction,
            position,
            start_room: RoomId::default(),
            start_room_origin: Point::default(),
            end: None,
        }
    }

    pub fn with_start_room(mut self, room: RoomId, origin: Point) -> Self {
        self.start_room = room;
        self.start_room_origin = origin;

        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn start_room(&self) -> RoomId {
        self.start_room
    }

    pub fn start_position_absolute(&self) -> Point {
        self.start_room_origin + self.position
    }

    pub fn end_room(&self) -> Option<RoomId> {
        self.end.map(|e| e.room)
    }

    pub fn end_position(&self) -> Option<Point> {
        self.end.map(|e| e.position)
    }

    pub fn end_position_absolute(&self) -> Option<Point> {
        self.end.map(|e| e.room_origin + e.position)
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Connects this doorway to `end_position` of the room at `room_origin`. The end can only be
    /// set once; returns false if it was already bound.
    pub fn bind(&mut self, room: RoomId, room_origin: Point, end_position: Point) -> bool {
        if self.end.is_some() {
            return false;
        }
        self.end = Some(HallwayEnd {
            room,
            position: end_position,
            room_origin,
        });

        true
    }

    /// The cells covered by the corridor, including the doorway cell at each end.
    pub fn area(&self) -> Rect {
        let start = self.start_position_absolute();
        let end = self.end_position_absolute().unwrap_or(start);

        Rect::spanning(start, end)
    }

    /// Number of cells strictly between the two doorways.
    pub fn length(&self) -> Option<i32> {
        self.end_position_absolute().map(|end| {
            let start = self.start_position_absolute();
            (end.x - start.x).abs() + (end.y - start.y).abs() - 1
        })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_symmetric() {
        for d in ALL_DIRECTIONS.iter() {
            assert_ne!(d.opposite(), *d);
            assert_eq!(d.opposite().opposite(), *d);
        }
    }

    #[test]
    fn test_marker_colors_decode_back() {
        for d in ALL_DIRECTIONS.iter() {
            assert_eq!(Direction::from_marker_color(d.marker_color()), Some(*d));
        }
        assert_eq!(Direction::from_marker_color(Rgb::WHITE), None);
        assert_eq!(Direction::from_marker_color(Rgb::BLACK), None);
    }

    #[test]
    fn test_bind_only_once() {
        let mut h = Hallway::new(Direction::Right, Point::new(3, 1))
            .with_start_room(RoomId(0), Point::new(10, 10));
        assert!(h.is_open());
        assert_eq!(h.area(), Rect::new(13, 11, 1, 1));

        assert!(h.bind(RoomId(1), Point::new(18, 9), Point::new(0, 2)));
        assert!(!h.bind(RoomId(2), Point::new(0, 0), Point::new(0, 0)));

        assert_eq!(h.end_room(), Some(RoomId(1)));
        assert_eq!(h.end_position_absolute(), Some(Point::new(18, 11)));
        assert_eq!(h.area(), Rect::new(13, 11, 6, 1));
        assert_eq!(h.length(), Some(4));
    }
}
