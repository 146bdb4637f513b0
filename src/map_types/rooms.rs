use crate::{
    config::{ConfigError, LevelLayoutConfig},
    geometry::{Point, Rect},
    hallway::{Direction, Hallway},
    level::Level,
    map_types::roles::assign_roles,
    room::Room,
    sampling::{sample_centered_origin, sample_inclusive},
    summary::LayoutSummary,
    template::TemplateInventory,
};

use rand::{seq::SliceRandom, Rng};

/// Generates a level from `config`, drawing all randomness from `rng`. The same seed and
/// configuration always produce the same level.
///
/// Only an invalid configuration is an error; running out of doorways, templates or room budget
/// just ends growth early.
pub fn generate<R: Rng>(config: &LevelLayoutConfig, rng: &mut R) -> Result<Level, ConfigError> {
    config.validate()?;
    log::debug!("Generating level layout");

    let mut generator = LayoutGenerator::new(config, &mut *rng);
    generator.add_seed_room();
    generator.add_rooms();
    let mut level = generator.into_level();

    assign_roles(&mut level, rng);
    log::debug!("Layout summary = {:?}", LayoutSummary::of(&level));

    Ok(level)
}

/// A room that passed validation, and the doorway of that room that faces the entry.
struct Candidate {
    room: Room,
    exit: Hallway,
}

/// Grows a level outward from a seed room by repeatedly attaching rooms to random open doorways.
pub struct LayoutGenerator<'a, R: Rng> {
    config: &'a LevelLayoutConfig,
    rng: R,
    level: Level,
    inventory: TemplateInventory,
    open_doorways: Vec<Hallway>,
}

impl<'a, R: Rng> LayoutGenerator<'a, R> {
    /// `config` must already be validated.
    pub fn new(config: &'a LevelLayoutConfig, rng: R) -> Self {
        LayoutGenerator {
            config,
            rng,
            level: Level::new(config.width, config.length),
            inventory: TemplateInventory::from_templates(&config.templates),
            open_doorways: Vec::new(),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Doorways not yet resolved into hallways.
    pub fn open_doorways(&self) -> &[Hallway] {
        &self.open_doorways
    }

    pub fn inventory(&self) -> &TemplateInventory {
        &self.inventory
    }

    /// Places the first room so it falls in the middle half of the level. The seed room is always
    /// created, whatever the room cap.
    pub fn add_seed_room(&mut self) {
        let slot = match self.inventory.choose_slot(&mut self.rng) {
            Some(slot) => slot,
            None => return,
        };
        let template = self.inventory.template_at(slot);
        let room = self.config.templates[template].instantiate(template, &mut self.rng);

        let area = *room.area();
        let x = sample_centered_origin(&mut self.rng, self.config.width, area.width);
        let y = sample_centered_origin(&mut self.rng, self.config.length, area.height);
        let room = room.placed_at(Point::new(x, y));
        log::debug!("Seed room = {:?}", room.area());

        self.add_room(room);
    }

    /// Runs the growth loop until the frontier is empty, the room cap is reached or the templates
    /// run out.
    pub fn add_rooms(&mut self) {
        while !self.open_doorways.is_empty()
            && self.level.rooms().len() < self.config.max_room_count
            && !self.inventory.is_empty()
        {
            let entry_index = self.rng.gen_range(0, self.open_doorways.len());
            let entry = self.open_doorways[entry_index].clone();

            match self.try_construct_room(&entry) {
                Some(candidate) => self.commit(entry_index, candidate),
                None => {
                    self.open_doorways.swap_remove(entry_index);
                }
            }
        }

        if self.open_doorways.is_empty() {
            log::debug!("Stopped growing: no open doorways left");
        } else if self.inventory.is_empty() {
            log::debug!("Stopped growing: room templates exhausted");
        } else {
            log::debug!("Stopped growing: reached {} rooms", self.level.rooms().len());
        }
    }

    /// Attaches every hallway to the rooms at its ends and hands over the level.
    pub fn into_level(mut self) -> Level {
        self.level.link_hallways();

        self.level
    }

    /// Tries to build a room whose doorway faces `entry` across a corridor of random length.
    /// Returns `None` if no template has a matching doorway or the placed room doesn't fit.
    fn try_construct_room(&mut self, entry: &Hallway) -> Option<Candidate> {
        let required = entry.direction().opposite();

        let mut untried: Vec<usize> = (0..self.inventory.len()).collect();
        let (room, exit) = loop {
            if untried.is_empty() {
                log::trace!(
                    "No template has a {:?} doorway for {:?}",
                    required,
                    entry.start_position_absolute()
                );
                return None;
            }
            let pick = self.rng.gen_range(0, untried.len());
            let template = self.inventory.template_at(untried.swap_remove(pick));
            let room = self.config.templates[template].instantiate(template, &mut self.rng);

            let exits: Vec<Hallway> = room
                .calculate_all_possible_doorways(self.config.door_distance_from_edge)
                .into_iter()
                .filter(|d| d.direction() == required)
                .collect();
            if let Some(exit) = exits.choose(&mut self.rng) {
                break (room, exit.clone());
            }
        };

        let length = sample_inclusive(
            &mut self.rng,
            self.config.hallway_length_min,
            self.config.hallway_length_max,
        );
        // A hallway longer than the level can only lead outside it.
        if length > self.level_span() {
            log::trace!("Rejected hallway of length {}: longer than the level", length);
            return None;
        }
        let area = *room.area();
        let position = calculate_room_position(
            entry,
            area.width,
            area.height,
            length,
            exit.position(),
        );
        let room = room.placed_at(position);

        if !self.is_room_candidate_valid(room.area()) {
            return None;
        }

        Some(Candidate { room, exit })
    }

    fn is_room_candidate_valid(&self, candidate: &Rect) -> bool {
        if !self.level.interior().contains(candidate) {
            log::trace!("Rejected {:?}: out of bounds", candidate);
            return false;
        }

        // Padding past the level size already covers every other room.
        let padded = candidate.padded(self.config.min_room_distance.min(self.level_span()));
        if self.level.rooms().iter().any(|r| padded.overlaps(r.area())) {
            log::trace!("Rejected {:?}: too close to a room", candidate);
            return false;
        }
        if self.level.hallways().iter().any(|h| padded.overlaps(&h.area())) {
            log::trace!("Rejected {:?}: too close to a hallway", candidate);
            return false;
        }

        true
    }

    fn level_span(&self) -> i32 {
        self.config.width.max(self.config.length)
    }

    fn commit(&mut self, entry_index: usize, candidate: Candidate) {
        let Candidate { room, exit } = candidate;
        let mut entry = self.open_doorways.swap_remove(entry_index);

        let bound = entry.bind(
            self.level.next_room_id(),
            room.area().position(),
            exit.position(),
        );
        debug_assert!(bound, "open doorway was already bound");
        log::debug!(
            "Added room {:?} through a {:?} hallway",
            room.area(),
            entry.direction()
        );

        self.add_room(room);
        self.level.add_hallway(entry);
    }

    /// Adds `room` to the level, opens all of its doorways and uses up one instance of its
    /// template.
    fn add_room(&mut self, room: Room) {
        let template = room.template();
        let origin = room.area().position();
        let doorways = room.calculate_all_possible_doorways(self.config.door_distance_from_edge);

        let id = self.level.add_room(room);
        self.open_doorways
            .extend(doorways.into_iter().map(|d| d.with_start_room(id, origin)));
        self.inventory.consume(template);
    }
}

/// Origin of a `room_width` x `room_length` room whose doorway at local `end_position` lies
/// `distance` cells past `entryway` along the entryway's direction.
pub fn calculate_room_position(
    entryway: &Hallway,
    room_width: i32,
    room_length: i32,
    distance: i32,
    end_position: Point,
) -> Point {
    let mut position = entryway.start_position_absolute();
    match entryway.direction() {
        Direction::Left => {
            position.x -= distance + room_width;
            position.y -= end_position.y;
        }
        Direction::Right => {
            position.x += distance + 1;
            position.y -= end_position.y;
        }
        Direction::Top => {
            position.x -= end_position.x;
            position.y += distance + 1;
        }
        Direction::Bottom => {
            position.x -= end_position.x;
            position.y -= distance + room_length;
        }
    }

    position
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
