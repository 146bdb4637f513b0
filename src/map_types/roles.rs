use crate::{
    geometry::Rect,
    level::{Level, RoomId},
    room::RoomType,
};

use rand::{seq::SliceRandom, Rng};

pub const MAX_TREASURE_ROOMS: usize = 3;

/// Each of these goes to at most one room, in shuffled order.
pub const SPECIAL_ROOMS: [RoomType; 3] = [RoomType::PRISON, RoomType::LIBRARY, RoomType::KITCHEN];

/// Tags rooms with gameplay roles based on where they sit in the room graph. Start, exit and
/// treasure rooms are taken from the leaves; the boss gets the farthest remaining room.
///
/// Levels with fewer than two leaf rooms are left untouched, so `Level::start_room` stays unset.
pub fn assign_roles<R: Rng>(level: &mut Level, rng: &mut R) {
    let mut border_rooms: Vec<RoomId> = level
        .room_ids()
        .filter(|id| level.room(*id).connectedness() == 1)
        .collect();
    if border_rooms.len() < 2 {
        log::debug!("Only {} border rooms, not assigning roles", border_rooms.len());
        return;
    }

    let start = border_rooms.remove(rng.gen_range(0, border_rooms.len()));
    level.room_mut(start).set_role(RoomType::START);
    level.set_start_room(start);
    let start_area = *level.room(start).area();

    let mut exit_index = None;
    let mut max_distance = -1;
    for (i, id) in border_rooms.iter().enumerate() {
        let distance = start_area.doubled_center_distance_sq(level.room(*id).area());
        if distance > max_distance {
            max_distance = distance;
            exit_index = Some(i);
        }
    }
    if let Some(i) = exit_index {
        let exit = border_rooms.remove(i);
        level.room_mut(exit).set_role(RoomType::EXIT);
    }

    let treasure: Vec<RoomId> = border_rooms
        .choose_multiple(rng, MAX_TREASURE_ROOMS)
        .copied()
        .collect();
    for id in treasure {
        level.room_mut(id).set_role(RoomType::TREASURE);
    }

    let mut default_rooms: Vec<RoomId> = level
        .room_ids()
        .filter(|id| level.room(*id).is_default())
        .collect();
    sort_boss_candidates(level, &start_area, &mut default_rooms);
    if !default_rooms.is_empty() {
        let boss = default_rooms.remove(0);
        level.room_mut(boss).set_role(RoomType::BOSS);
    }

    default_rooms.shuffle(rng);
    for (id, role) in default_rooms.iter().zip(SPECIAL_ROOMS.iter()) {
        level.room_mut(*id).set_role(*role);
    }

    log::debug!(
        "Assigned roles: start = {:?}, exit = {:?}, boss = {:?}",
        level.start_room(),
        level.rooms_with(RoomType::EXIT).next(),
        level.rooms_with(RoomType::BOSS).next()
    );
}

/// Orders boss candidates best first: farthest from the start room, then most hallways, then
/// largest area. The sort is stable so remaining ties keep discovery order.
fn sort_boss_candidates(level: &Level, start_area: &Rect, rooms: &mut [RoomId]) {
    rooms.sort_by(|a, b| {
        let (a, b) = (level.room(*a), level.room(*b));
        let a_distance = start_area.doubled_center_distance_sq(a.area());
        let b_distance = start_area.doubled_center_distance_sq(b.area());

        b_distance
            .cmp(&a_distance)
            .then_with(|| b.connectedness().cmp(&a.connectedness()))
            .then_with(|| b.area().area().cmp(&a.area().area()))
    });
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
    use crate::{
        geometry::Point,
        hallway::{Direction, Hallway},
        room::Room,
        sampling::small_rng,
    };

    /// Joins two rooms with a hallway. Hallway geometry is irrelevant to role assignment so every
    /// hallway uses the same doorway.
    fn connect(level: &mut Level, a: RoomId, b: RoomId) {
        let mut h = Hallway::new(Direction::Right, Point::new(0, 0))
            .with_start_room(a, level.room(a).area().position());
        h.bind(b, level.room(b).area().position(), Point::new(0, 0));
        level.add_hallway(h);
    }

    /// A hub room joined to each of `spokes`. Hallways still need linking.
    fn star_level(hub: Rect, spokes: &[Rect]) -> Level {
        let mut level = Level::new(200, 200);
        let hub_id = level.add_room(Room::new(hub, 0));
        for spoke in spokes {
            let id = level.add_room(Room::new(*spoke, 0));
            connect(&mut level, hub_id, id);
        }

        level
    }

    fn count(level: &Level, role: RoomType) -> usize {
        level.rooms_with(role).count()
    }

    #[test]
    fn test_no_roles_with_one_border_room() {
        let mut level = Level::new(50, 50);
        level.add_room(Room::new(Rect::new(10, 10, 4, 4), 0));
        level.link_hallways();
        assign_roles(&mut level, &mut small_rng(0));

        assert!(level.start_room().is_none());
        assert!(level.rooms().iter().all(|r| r.is_default()));
    }

    #[test]
    fn test_exit_is_farthest_border_room_from_start() {
        let hub = Rect::new(100, 100, 4, 4);
        let spokes = [
            Rect::new(90, 100, 4, 4),
            Rect::new(100, 80, 4, 4),
            Rect::new(140, 100, 4, 4),
        ];

        for seed in 0..10 {
            let mut level = star_level(hub, &spokes);
            level.link_hallways();
            assign_roles(&mut level, &mut small_rng(seed));

            let start = level.start_room().unwrap();
            assert!(level.room(start).has_role(RoomType::START));
            let start_area = *level.room(start).area();
            let exit = level.rooms_with(RoomType::EXIT).next().unwrap();
            let exit_distance = start_area.center_distance(level.room(exit).area());
            for id in level.room_ids().skip(1) {
                assert!(start_area.center_distance(level.room(id).area()) <= exit_distance);
            }

            // The third spoke becomes treasure and the hub, the only non-leaf, the boss.
            assert_eq!(count(&level, RoomType::TREASURE), 1);
            assert_eq!(level.rooms_with(RoomType::BOSS).next(), Some(RoomId(0)));
        }
    }

    #[test]
    fn test_role_counts_are_capped() {
        let hub = Rect::new(100, 100, 4, 4);
        let spokes: Vec<Rect> = (0..8).map(|i| Rect::new(10 + 20 * i, 10, 3, 3)).collect();
        let mut level = star_level(hub, &spokes);
        let mut prev = RoomId(1);
        for i in 0..5 {
            let id = level.add_room(Room::new(Rect::new(10, 40 + 20 * i, 3, 3), 0));
            connect(&mut level, prev, id);
            prev = id;
        }
        level.link_hallways();
        assign_roles(&mut level, &mut small_rng(8));

        assert_eq!(count(&level, RoomType::START), 1);
        assert_eq!(count(&level, RoomType::EXIT), 1);
        assert_eq!(count(&level, RoomType::TREASURE), MAX_TREASURE_ROOMS);
        assert_eq!(count(&level, RoomType::BOSS), 1);
        for role in SPECIAL_ROOMS.iter() {
            assert_eq!(count(&level, *role), 1);
        }
        for room in level.rooms() {
            assert_eq!(room.role().bits().count_ones(), 1);
        }
    }

    #[test]
    fn test_boss_order_breaks_distance_ties() {
        let mut level = Level::new(200, 200);
        let start = level.add_room(Room::new(Rect::new(50, 50, 2, 2), 0));
        // a, b and c are all 10 cells from the start; c is larger than b.
        let a = level.add_room(Room::new(Rect::new(60, 50, 2, 2), 0));
        let b = level.add_room(Room::new(Rect::new(50, 60, 2, 2), 0));
        let c = level.add_room(Room::new(Rect::new(39, 49, 4, 4), 0));
        let far = level.add_room(Room::new(Rect::new(90, 50, 2, 2), 0));
        connect(&mut level, a, b);
        connect(&mut level, b, c);
        connect(&mut level, c, start);
        level.link_hallways();

        let start_area = *level.room(start).area();
        let mut rooms = vec![a, b, c, far];
        sort_boss_candidates(&level, &start_area, &mut rooms);

        assert_eq!(rooms, vec![far, c, b, a]);
    }

    #[test]
    fn test_same_seed_same_roles() {
        let hub = Rect::new(100, 100, 4, 4);
        let spokes: Vec<Rect> = (0..6).map(|i| Rect::new(10 + 25 * i, 10, 3, 3)).collect();
        let mut a = star_level(hub, &spokes);
        a.link_hallways();
        let mut b = a.clone();
        assign_roles(&mut a, &mut small_rng(77));
        assign_roles(&mut b, &mut small_rng(77));

        assert_eq!(a, b);
    }
}
