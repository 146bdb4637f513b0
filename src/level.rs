use crate::{
    geometry::Rect,
    hallway::Hallway,
    room::{fill_map_with_hallways, fill_map_with_rooms, Room, RoomType},
    symmetric_map::SymmetricMap,
    TileEncoder,
};

use serde::{Deserialize, Serialize};

/// Index of a room in `Level::rooms`.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct RoomId(pub usize);

/// Index of a hallway in `Level::hallways`.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct HallwayId(pub usize);

/// The finished layout: rooms in discovery order, the hallways joining them, and the player's
/// start room once roles are assigned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Level {
    width: i32,
    length: i32,
    rooms: Vec<Room>,
    hallways: Vec<Hallway>,
    start_room: Option<RoomId>,
    #[serde(skip)]
    hallways_by_rooms: SymmetricMap<RoomId, HallwayId>,
}

impl Level {
    pub fn new(width: i32, length: i32) -> Self {
        Level {
            width,
            length,
            rooms: Vec::new(),
            hallways: Vec::new(),
            start_room: None,
            hallways_by_rooms: SymmetricMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    /// Rooms must lie inside this rectangle, one cell in from the level edge.
    pub fn interior(&self) -> Rect {
        Rect::new(1, 1, self.width - 2, self.length - 2)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn hallway(&self, id: HallwayId) -> &Hallway {
        &self.hallways[id.0]
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len()).map(RoomId)
    }

    /// `None` means there is no valid player spawn and the caller has to react to it.
    pub fn start_room(&self) -> Option<RoomId> {
        self.start_room
    }

    pub fn rooms_with(&self, role: RoomType) -> impl Iterator<Item = RoomId> + '_ {
        self.room_ids().filter(move |id| self.room(*id).has_role(role))
    }

    pub fn hallway_between(&self, a: RoomId, b: RoomId) -> Option<HallwayId> {
        self.hallways_by_rooms.get(a, b).copied()
    }

    /// Writes every room and bound hallway into `encoder`.
    pub fn encode_tiles(&self, encoder: &mut impl TileEncoder) {
        fill_map_with_rooms(&self.rooms, encoder);
        fill_map_with_hallways(&self.hallways, encoder);
    }

    pub(crate) fn next_room_id(&self) -> RoomId {
        RoomId(self.rooms.len())
    }

    pub(crate) fn add_room(&mut self, room: Room) -> RoomId {
        let id = self.next_room_id();
        self.rooms.push(room);

        id
    }

    pub(crate) fn add_hallway(&mut self, hallway: Hallway) -> HallwayId {
        let id = HallwayId(self.hallways.len());
        if let Some(end) = hallway.end_room() {
            self.hallways_by_rooms.insert(hallway.start_room(), end, id);
        }
        self.hallways.push(hallway);

        id
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.0]
    }

    /// Attaches each hallway to the connectivity list of the rooms at both of its ends.
    pub(crate) fn link_hallways(&mut self) {
        for (i, h) in self.hallways.iter().enumerate() {
            let id = HallwayId(i);
            self.rooms[h.start_room().0].attach_hallway(id);
            if let Some(end) = h.end_room() {
                self.rooms[end.0].attach_hallway(id);
            }
        }
    }

    pub(crate) fn set_start_room(&mut self, id: RoomId) {
        self.start_room = Some(id);
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
