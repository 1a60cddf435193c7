//! Static catalog of robot parts.
//!
//! Every selectable option belongs to exactly one [`Category`] and carries a
//! description and the file name of its picture in the asset directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown {category} option: {key:?}")]
    NotFound { category: Category, key: String },
}

/// The three independent customization axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    RobotType,
    PowerSource,
    Function,
}

impl Category {
    /// All categories, in the order they are shown and described.
    pub const ALL: [Category; 3] = [Category::RobotType, Category::PowerSource, Category::Function];

    /// Label shown next to the selector
    pub fn prompt(self) -> &'static str {
        match self {
            Category::RobotType => "Select Robot Type:",
            Category::PowerSource => "Select Power Source:",
            Category::Function => "Select Functionality:",
        }
    }

    /// Short name used in summaries
    pub fn name(self) -> &'static str {
        match self {
            Category::RobotType => "Type",
            Category::PowerSource => "Power Source",
            Category::Function => "Specialty",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::RobotType => 0,
            Category::PowerSource => 1,
            Category::Function => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single selectable value within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RobotOption {
    pub category: Category,
    pub key: &'static str,
    pub description: &'static str,
    pub asset: &'static str,
}

impl RobotOption {
    /// `"<key>: <description>"`, the form used in composed descriptions
    pub fn description_line(&self) -> String {
        format!("{}: {}", self.key, self.description)
    }

    /// Where this option's picture lives inside `assets_dir`
    pub fn asset_path(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.asset)
    }
}

const fn option(
    category: Category,
    key: &'static str,
    description: &'static str,
    asset: &'static str,
) -> RobotOption {
    RobotOption { category, key, description, asset }
}

static ROBOT_TYPES: [RobotOption; 3] = [
    option(
        Category::RobotType,
        "Drone",
        "A lightweight flying robot, commonly used for surveillance and deliveries.",
        "drone.png",
    ),
    option(
        Category::RobotType,
        "Humanoid",
        "A robot designed to resemble a human, used for AI interactions and assistance.",
        "humanoid.png",
    ),
    option(
        Category::RobotType,
        "Quadruped",
        "A four-legged robot, often used for terrain exploration and heavy-duty tasks.",
        "quadruped.png",
    ),
];

static POWER_SOURCES: [RobotOption; 3] = [
    option(
        Category::PowerSource,
        "Electric",
        "Fast charging but consumes a lot of energy.",
        "electric.png",
    ),
    option(
        Category::PowerSource,
        "Solar",
        "Eco-friendly but only works efficiently in daylight.",
        "solar.png",
    ),
    option(
        Category::PowerSource,
        "Hybrid",
        "A balance between efficiency and power usage.",
        "hybrid.png",
    ),
];

static FUNCTIONS: [RobotOption; 3] = [
    option(
        Category::Function,
        "AI Assistant",
        "This robot is designed for intelligent interactions, capable of learning and adapting.",
        "ai_assistant.png",
    ),
    option(
        Category::Function,
        "Heavy Lifter",
        "Built for strength, this robot is ideal for carrying heavy loads.",
        "heavy_lifter.png",
    ),
    option(
        Category::Function,
        "Security",
        "Equipped with sensors and monitoring tools, this robot ensures safety and surveillance.",
        "security.png",
    ),
];

/// Options of a category, in selector order
pub fn options(category: Category) -> &'static [RobotOption] {
    match category {
        Category::RobotType => &ROBOT_TYPES,
        Category::PowerSource => &POWER_SOURCES,
        Category::Function => &FUNCTIONS,
    }
}

/// Display keys of a category, in selector order
pub fn keys(category: Category) -> impl Iterator<Item = &'static str> {
    options(category).iter().map(|o| o.key)
}

pub fn lookup(category: Category, key: &str) -> Result<&'static RobotOption, CatalogError> {
    options(category)
        .iter()
        .find(|o| o.key == key)
        .ok_or_else(|| CatalogError::NotFound {
            category,
            key: key.to_string(),
        })
}
