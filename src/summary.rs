use crate::{
    graph::{hop_distances, longest_path_in_tree, room_graph},
    level::Level,
    room::RoomType,
};

use serde::{Deserialize, Serialize};
use stats::OnlineStats;

/// Shape statistics of a finished level, mostly for logging and tuning configurations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub room_count: usize,
    pub hallway_count: usize,
    pub border_room_count: usize,
    pub max_connectedness: usize,
    pub room_area_mean: f64,
    pub room_area_stddev: f64,
    /// Rooms on the longest route through the level.
    pub longest_path: usize,
    /// Hallways between the start and exit rooms, if both were assigned.
    pub start_to_exit_hops: Option<usize>,
}

impl LayoutSummary {
    pub fn of(level: &Level) -> Self {
        let mut areas = OnlineStats::new();
        for r in level.rooms() {
            areas.add(r.area().area());
        }

        let graph = room_graph(level);
        let exit = level.rooms_with(RoomType::EXIT).next();
        let start_to_exit_hops = match (level.start_room(), exit) {
            (Some(start), Some(exit)) => hop_distances(&graph, start)[exit.0],
            _ => None,
        };

        LayoutSummary {
            room_count: level.rooms().len(),
            hallway_count: level.hallways().len(),
            border_room_count: level
                .rooms()
                .iter()
                .filter(|r| r.connectedness() == 1)
                .count(),
            max_connectedness: level
                .rooms()
                .iter()
                .map(|r| r.connectedness())
                .max()
                .unwrap_or(0),
            room_area_mean: areas.mean(),
            room_area_stddev: areas.stddev(),
            longest_path: longest_path_in_tree(&graph).len(),
            start_to_exit_hops,
        }
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
    use crate::{
        config::LevelLayoutConfig,
        map_types::rooms::generate,
        sampling::small_rng,
        template::{RoomTemplate, SizeRange},
    };

    #[test]
    fn test_summary_of_generated_level() {
        let config = LevelLayoutConfig {
            max_room_count: 12,
            templates: vec![RoomTemplate::rectangular(
                "any",
                SizeRange::new(3, 6),
                SizeRange::new(3, 6),
                12,
            )],
            ..Default::default()
        };
        let level = generate(&config, &mut small_rng(1234)).unwrap();
        let summary = LayoutSummary::of(&level);

        assert_eq!(summary.room_count, level.rooms().len());
        assert_eq!(summary.hallway_count, summary.room_count - 1);
        assert!(summary.room_area_mean >= 9.0 && summary.room_area_mean <= 25.0);
        assert!(summary.longest_path >= 1 && summary.longest_path <= summary.room_count);
        if level.start_room().is_some() {
            assert!(summary.border_room_count >= 2);
            let hops = summary.start_to_exit_hops.unwrap();
            assert!(hops >= 1 && hops < summary.longest_path);
        }
    }
}
