use roomgen::{
    generate, hallway::Direction, room::RoomType, sampling::small_rng, summary::LayoutSummary,
    Level, LevelLayoutConfig, RoomLayout, RoomTemplate, SizeRange,
};

use proptest::prelude::*;

fn shrine() -> RoomTemplate {
    let layout = RoomLayout::from_rows(&["##^##", "#...#", "<...>", "#...#", "##v##"]).unwrap();

    RoomTemplate::fixed("shrine", layout, 2)
}

/// Rectangular templates no larger than `max_width` x `max_length`.
fn rect_template(max_width: i32, max_length: i32) -> impl Strategy<Value = RoomTemplate> {
    (1..=max_width, 1..6i32, 1..=max_length, 1..6i32, 1..8u32).prop_map(
        move |(w, dw, l, dl, quota)| {
            RoomTemplate::rectangular(
                "rect",
                SizeRange::new(w, (w + dw).min(max_width + 1)),
                SizeRange::new(l, (l + dl).min(max_length + 1)),
                quota,
            )
        },
    )
}

fn config() -> impl Strategy<Value = LevelLayoutConfig> {
    (3..80i32, 3..80i32)
        .prop_flat_map(|(width, length)| {
            let max_width = (width - 2).min(12);
            let max_length = (length - 2).min(12);
            (
                Just(width),
                Just(length),
                0..2i32,
                0..4i32,
                0..4i32,
                0..20usize,
                0..3i32,
                prop::collection::vec(rect_template(max_width, max_length), 1..4),
                any::<bool>(),
            )
        })
        .prop_map(
            |(width, length, margin, hall_min, hall_extra, max_rooms, spacing, mut templates, authored)| {
                if authored && width >= 7 && length >= 7 {
                    templates.push(shrine());
                }
                LevelLayoutConfig {
                    width,
                    length,
                    door_distance_from_edge: margin,
                    hallway_length_min: hall_min,
                    hallway_length_max: hall_min + hall_extra,
                    max_room_count: max_rooms,
                    min_room_distance: spacing,
                    templates,
                }
            },
        )
}

/// Direction of the doorway a hallway ends on, looked up in the end room's doorway candidates.
fn exit_direction(level: &Level, config: &LevelLayoutConfig, hallway: usize) -> Option<Direction> {
    let h = &level.hallways()[hallway];
    let end = level.room(h.end_room()?);

    end.calculate_all_possible_doorways(config.door_distance_from_edge)
        .into_iter()
        .find(|d| {
            Some(d.position()) == h.end_position() && d.direction() == h.direction().opposite()
        })
        .map(|d| d.direction())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rooms_never_crowd_each_other(config in config(), seed in any::<u64>()) {
        let level = generate(&config, &mut small_rng(seed)).unwrap();
        let rooms = level.rooms();

        for j in 1..rooms.len() {
            let padded = rooms[j].area().padded(config.min_room_distance);
            for i in 0..j {
                prop_assert!(!padded.overlaps(rooms[i].area()));
            }
            // Room j was checked against every hallway committed before its own.
            for h in &level.hallways()[..j - 1] {
                prop_assert!(!padded.overlaps(&h.area()));
            }
        }
    }

    #[test]
    fn rooms_stay_inside_level(config in config(), seed in any::<u64>()) {
        let level = generate(&config, &mut small_rng(seed)).unwrap();
        let interior = level.interior();

        for r in level.rooms() {
            prop_assert!(interior.contains(r.area()));
        }
        prop_assert!(level.rooms().len() <= config.max_room_count.max(1));
    }

    #[test]
    fn hallways_join_opposite_doorways(config in config(), seed in any::<u64>()) {
        let level = generate(&config, &mut small_rng(seed)).unwrap();

        prop_assert_eq!(level.hallways().len(), level.rooms().len() - 1);
        for (i, h) in level.hallways().iter().enumerate() {
            prop_assert!(!h.is_open());
            prop_assert_eq!(exit_direction(&level, &config, i), Some(h.direction().opposite()));

            let length = h.length().unwrap();
            prop_assert!(length >= config.hallway_length_min);
            prop_assert!(length <= config.hallway_length_max);
            let between = level.hallway_between(h.start_room(), h.end_room().unwrap());
            prop_assert_eq!(between.map(|id| id.0), Some(i));
        }

        let degree_sum: usize = level.rooms().iter().map(|r| r.connectedness()).sum();
        prop_assert_eq!(degree_sum, 2 * level.hallways().len());
    }

    #[test]
    fn same_seed_same_level(config in config(), seed in any::<u64>()) {
        let a = generate(&config, &mut small_rng(seed)).unwrap();
        let b = generate(&config, &mut small_rng(seed)).unwrap();

        prop_assert_eq!(a, b);
    }

    #[test]
    fn templates_respect_quota(config in config(), seed in any::<u64>()) {
        let level = generate(&config, &mut small_rng(seed)).unwrap();

        for (i, t) in config.templates.iter().enumerate() {
            let used = level.rooms().iter().filter(|r| r.template() == i).count();
            prop_assert!(used <= t.instance_quota as usize);
        }
    }

    #[test]
    fn roles_are_unique(config in config(), seed in any::<u64>()) {
        let level = generate(&config, &mut small_rng(seed)).unwrap();
        let count = |role| level.rooms_with(role).count();

        prop_assert!(count(RoomType::START) <= 1);
        prop_assert!(count(RoomType::EXIT) <= 1);
        prop_assert!(count(RoomType::BOSS) <= 1);
        prop_assert!(count(RoomType::TREASURE) <= 3);
        prop_assert!(count(RoomType::PRISON) <= 1);
        prop_assert!(count(RoomType::LIBRARY) <= 1);
        prop_assert!(count(RoomType::KITCHEN) <= 1);

        match level.start_room() {
            Some(start) => {
                prop_assert!(level.room(start).has_role(RoomType::START));
                prop_assert_eq!(level.room(start).connectedness(), 1);
                prop_assert_eq!(count(RoomType::EXIT), 1);
            }
            None => {
                prop_assert!(level.rooms().iter().all(|r| r.is_default()));
            }
        }
    }
}

#[test]
fn authored_rooms_keep_their_layout() {
    let config = LevelLayoutConfig {
        max_room_count: 8,
        templates: vec![
            shrine(),
            RoomTemplate::rectangular("rect", SizeRange::new(3, 6), SizeRange::new(3, 6), 8),
        ],
        ..Default::default()
    };

    for seed in 0..20 {
        let level = generate(&config, &mut small_rng(seed)).unwrap();
        for r in level.rooms() {
            if r.template() == 0 {
                let layout = r.layout().unwrap();
                assert_eq!((r.area().width, r.area().height), (5, 5));
                assert_eq!(layout.width(), 5);
            } else {
                assert!(r.layout().is_none());
            }
        }
        // Hallways into a shrine can only end on one of its four marked doorways.
        for h in level.hallways() {
            let end = level.room(h.end_room().unwrap());
            if end.template() == 0 {
                let p = h.end_position().unwrap();
                assert!([(2, 4), (0, 2), (4, 2), (2, 0)].contains(&(p.x, p.y)));
            }
        }
    }
}

#[test]
fn summary_matches_level() {
    let config = LevelLayoutConfig::default();
    let level = generate(&config, &mut small_rng(2024)).unwrap();
    let summary = LayoutSummary::of(&level);

    assert_eq!(summary.room_count, level.rooms().len());
    assert_eq!(summary.hallway_count, level.hallways().len());
}
