use crate::{
    geometry::{Point, Rect},
    room::{Room, RoomLayout},
    sampling::sample_size,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open integer range `[min, max)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
}

impl SizeRange {
    pub fn new(min: i32, max: i32) -> Self {
        SizeRange { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min < self.max
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum TemplateShape {
    Rectangular { width: SizeRange, length: SizeRange },
    Fixed(RoomLayout),
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoomTemplate {
    #[serde(default)]
    pub name: String,
    pub shape: TemplateShape,
    pub instance_quota: u32,
}

impl RoomTemplate {
    pub fn rectangular(
        name: impl Into<String>,
        width: SizeRange,
        length: SizeRange,
        instance_quota: u32,
    ) -> Self {
        RoomTemplate {
            name: name.into(),
            shape: TemplateShape::Rectangular { width, length },
            instance_quota,
        }
    }

    pub fn fixed(name: impl Into<String>, layout: RoomLayout, instance_quota: u32) -> Self {
        RoomTemplate {
            name: name.into(),
            shape: TemplateShape::Fixed(layout),
            instance_quota,
        }
    }

    /// Makes an unplaced room (origin at zero) of a random size drawn from this template.
    /// `index` is the template's position in the configuration.
    pub fn instantiate(&self, index: usize, rng: &mut impl Rng) -> Room {
        match &self.shape {
            TemplateShape::Rectangular { width, length } => {
                let w = sample_size(rng, width);
                let l = sample_size(rng, length);
                Room::new(Rect::new(0, 0, w, l), index)
            }
            TemplateShape::Fixed(layout) => {
                Room::from_layout(Point::default(), layout.clone(), index)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct InventoryEntry {
    template: usize,
    remaining: u32,
}

/// The templates still available to a generation run, each with the number of rooms it may
/// still produce. Built fresh per run; the configuration itself is never mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TemplateInventory {
    entries: Vec<InventoryEntry>,
}

impl TemplateInventory {
    /// Templates with a zero quota are left out.
    pub fn from_templates(templates: &[RoomTemplate]) -> Self {
        let entries = templates
            .iter()
            .enumerate()
            .filter(|(_, t)| t.instance_quota > 0)
            .map(|(template, t)| InventoryEntry {
                template,
                remaining: t.instance_quota,
            })
            .collect();

        TemplateInventory { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Template index stored in `slot`.
    pub fn template_at(&self, slot: usize) -> usize {
        self.entries[slot].template
    }

    pub fn choose_slot(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(rng.gen_range(0, self.entries.len()))
        }
    }

    pub fn remaining(&self, template: usize) -> u32 {
        self.entries
            .iter()
            .find(|e| e.template == template)
            .map_or(0, |e| e.remaining)
    }

    /// Uses up one instance of `template`. Returns true iff the template is now exhausted and has
    /// been removed from the inventory.
    pub fn consume(&mut self, template: usize) -> bool {
        let slot = match self.entries.iter().position(|e| e.template == template) {
            Some(slot) => slot,
            None => return true,
        };

        let entry = &mut self.entries[slot];
        entry.remaining -= 1;
        if entry.remaining == 0 {
            self.entries.remove(slot);
            log::trace!("Template {} exhausted", template);
            true
        } else {
            false
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
