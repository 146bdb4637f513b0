use crate::template::{RoomTemplate, SizeRange, TemplateShape};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration that cannot be generated from. This is the only hard failure of the crate;
/// everything else that goes wrong during generation is an expected outcome.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level {width}x{length} has no interior for rooms")]
    LevelTooSmall { width: i32, length: i32 },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: i32 },

    #[error("hallway length range [{min}, {max}] is empty or negative")]
    InvalidHallwayRange { min: i32, max: i32 },

    #[error("template '{template}' has an invalid {axis} range [{min}, {max})")]
    InvalidSizeRange {
        template: String,
        axis: &'static str,
        min: i32,
        max: i32,
    },

    #[error(
        "template '{template}' can be up to {width}x{length}, but the level interior is only \
         {max_width}x{max_length}"
    )]
    TemplateTooLarge {
        template: String,
        width: i32,
        length: i32,
        max_width: i32,
        max_length: i32,
    },

    #[error("room layout has no pixels")]
    EmptyLayout,

    #[error("room layout expected {expected} pixels, got {actual}")]
    LayoutPixelCount { expected: usize, actual: usize },

    #[error("room layout row {row} has a different width than the first row")]
    RaggedLayout { row: usize },

    #[error("unknown room layout pixel '{ch}' at row {row}, column {col}")]
    UnknownLayoutPixel { ch: char, row: usize, col: usize },

    #[error("no room template has a remaining instance quota")]
    EmptyInventory,

    #[error("failed to parse level layout config: {0}")]
    Parse(#[from] ron::Error),
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LevelLayoutConfig {
    pub width: i32,
    pub length: i32,
    pub door_distance_from_edge: i32,
    pub hallway_length_min: i32,
    pub hallway_length_max: i32,
    pub max_room_count: usize,
    pub min_room_distance: i32,
    pub templates: Vec<RoomTemplate>,
}

impl Default for LevelLayoutConfig {
    fn default() -> Self {
        LevelLayoutConfig {
            width: 64,
            length: 64,
            door_distance_from_edge: 1,
            hallway_length_min: 3,
            hallway_length_max: 7,
            max_room_count: 10,
            min_room_distance: 1,
            templates: vec![RoomTemplate::rectangular(
                "default",
                SizeRange::new(3, 5),
                SizeRange::new(3, 5),
                10,
            )],
        }
    }
}

impl LevelLayoutConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: LevelLayoutConfig = ron::de::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.length < 3 {
            return Err(ConfigError::LevelTooSmall {
                width: self.width,
                length: self.length,
            });
        }
        check_not_negative("door_distance_from_edge", self.door_distance_from_edge)?;
        check_not_negative("min_room_distance", self.min_room_distance)?;
        if self.hallway_length_min < 0 || self.hallway_length_min > self.hallway_length_max {
            return Err(ConfigError::InvalidHallwayRange {
                min: self.hallway_length_min,
                max: self.hallway_length_max,
            });
        }

        for t in self.templates.iter() {
            let (width, length) = match &t.shape {
                TemplateShape::Rectangular { width, length } => {
                    check_size_range(&t.name, "width", width)?;
                    check_size_range(&t.name, "length", length)?;
                    (width.max - 1, length.max - 1)
                }
                TemplateShape::Fixed(layout) => (layout.width(), layout.height()),
            };
            if width > self.width - 2 || length > self.length - 2 {
                return Err(ConfigError::TemplateTooLarge {
                    template: t.name.clone(),
                    width,
                    length,
                    max_width: self.width - 2,
                    max_length: self.length - 2,
                });
            }
        }
        if self.templates.iter().all(|t| t.instance_quota == 0) {
            return Err(ConfigError::EmptyInventory);
        }

        Ok(())
    }
}

fn check_not_negative(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value < 0 {
        Err(ConfigError::NegativeValue { field, value })
    } else {
        Ok(())
    }
}

fn check_size_range(
    template: &str,
    axis: &'static str,
    range: &SizeRange,
) -> Result<(), ConfigError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSizeRange {
            template: template.to_string(),
            axis,
            min: range.min,
            max: range.max,
        })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
