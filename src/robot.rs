//! Composing a robot out of the current selection.
//!
//! Everything here is a pure function of the [`Selection`]: no caching, no
//! hidden state, so the UI can call it as often as it likes.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::{self, CatalogError, Category, RobotOption};

/// Shown instead of a description while any slot is still empty
pub const INCOMPLETE_MESSAGE: &str = "Please select all options to build your robot.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("missing components: {}", names(.missing))]
    Incomplete { missing: Vec<Category> },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn names(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The user's current choice, one optional key per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    slots: [Option<String>; 3],
}

impl Selection {
    /// Build a selection from raw selector values; empty strings are empty slots
    pub fn from_keys(robot_type: &str, power: &str, function: &str) -> Self {
        Self::default()
            .with(Category::RobotType, Some(robot_type))
            .with(Category::PowerSource, Some(power))
            .with(Category::Function, Some(function))
    }

    /// A copy of this selection with one slot replaced
    pub fn with(&self, category: Category, key: Option<&str>) -> Self {
        let mut next = self.clone();
        next.slots[category.index()] = key.filter(|k| !k.is_empty()).map(str::to_string);
        next
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.slots[category.index()].as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }
}

/// A fully specified robot: one option per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltRobot {
    pub robot_type: &'static RobotOption,
    pub power: &'static RobotOption,
    pub function: &'static RobotOption,
}

impl BuiltRobot {
    pub fn from_selection(selection: &Selection) -> Result<Self, ComposeError> {
        let (Some(robot_type), Some(power), Some(function)) = (
            selection.get(Category::RobotType),
            selection.get(Category::PowerSource),
            selection.get(Category::Function),
        ) else {
            return Err(ComposeError::Incomplete {
                missing: selection.missing(),
            });
        };

        Ok(Self {
            robot_type: catalog::lookup(Category::RobotType, robot_type)?,
            power: catalog::lookup(Category::PowerSource, power)?,
            function: catalog::lookup(Category::Function, function)?,
        })
    }

    pub fn parts(&self) -> [&'static RobotOption; 3] {
        [self.robot_type, self.power, self.function]
    }

    /// Description lines of each part, type first
    pub fn description(&self) -> String {
        self.parts()
            .iter()
            .map(|o| o.description_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn summary(&self) -> String {
        self.parts()
            .iter()
            .map(|o| format!("{}: {}", o.category.name(), o.key))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One sentence naming the parts, ending with what the specialty does
    pub fn headline(&self) -> String {
        format!(
            "Your {} runs on {} and specializes in {}.",
            self.robot_type.key,
            self.power.key,
            self.function.description_line().trim_end_matches('.')
        )
    }
}

/// Full description of the selected robot, or [`INCOMPLETE_MESSAGE`].
pub fn describe(selection: &Selection) -> Result<String, CatalogError> {
    match BuiltRobot::from_selection(selection) {
        Ok(robot) => Ok(robot.description()),
        Err(ComposeError::Incomplete { .. }) => Ok(INCOMPLETE_MESSAGE.to_string()),
        Err(ComposeError::Catalog(e)) => Err(e),
    }
}

/// Picture path per slot, `None` for empty slots and unknown keys.
pub fn images_for(selection: &Selection, assets_dir: &Path) -> [Option<PathBuf>; 3] {
    Category::ALL.map(|category| {
        let key = selection.get(category)?;
        catalog::lookup(category, key)
            .ok()
            .map(|o| o.asset_path(assets_dir))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_complete() -> Vec<Selection> {
        let mut out = Vec::new();
        for t in catalog::keys(Category::RobotType) {
            for p in catalog::keys(Category::PowerSource) {
                for f in catalog::keys(Category::Function) {
                    out.push(Selection::from_keys(t, p, f));
                }
            }
        }
        out
    }

    #[test]
    fn test_describe_contains_parts_in_order() {
        for selection in all_complete() {
            let text = describe(&selection).unwrap();
            assert!(!text.is_empty());

            let mut last = 0;
            for category in Category::ALL {
                let key = selection.get(category).unwrap();
                let part = catalog::lookup(category, key).unwrap();
                let pos = text[last..]
                    .find(part.description)
                    .map(|p| p + last)
                    .unwrap_or_else(|| panic!("{} missing or out of order", key));
                last = pos + part.description.len();
            }
        }
    }

    #[test]
    fn test_describe_drone_solar_security() {
        let selection = Selection::from_keys("Drone", "Solar", "Security");
        let text = describe(&selection).unwrap();

        let flying = text.find("flying robot").unwrap();
        let daylight = text.find("daylight").unwrap();
        // The drone text mentions surveillance too, take the security one
        let surveillance = text.rfind("surveillance").unwrap();
        assert!(flying < daylight && daylight < surveillance);
        assert!(text.starts_with("Drone: "));
    }

    #[test]
    fn test_describe_incomplete() {
        let selection = Selection::from_keys("", "Electric", "");
        assert_eq!(describe(&selection).unwrap(), INCOMPLETE_MESSAGE);

        let partial = [
            Selection::default(),
            Selection::from_keys("Drone", "", ""),
            Selection::from_keys("Drone", "Solar", ""),
            Selection::from_keys("", "Solar", "Security"),
        ];
        for selection in partial {
            assert_eq!(describe(&selection).unwrap(), INCOMPLETE_MESSAGE);
        }
    }

    #[test]
    fn test_describe_is_idempotent() {
        let selection = Selection::from_keys("Quadruped", "Hybrid", "Heavy Lifter");
        assert_eq!(describe(&selection), describe(&selection));
    }

    #[test]
    fn test_describe_unknown_key() {
        let selection = Selection::from_keys("Toaster", "Solar", "Security");
        assert_eq!(
            describe(&selection),
            Err(CatalogError::NotFound {
                category: Category::RobotType,
                key: "Toaster".to_string(),
            })
        );
    }

    #[test]
    fn test_incomplete_lists_missing() {
        let selection = Selection::from_keys("", "Electric", "");
        let err = BuiltRobot::from_selection(&selection).unwrap_err();
        assert_eq!(
            err,
            ComposeError::Incomplete {
                missing: vec![Category::RobotType, Category::Function],
            }
        );
        assert_eq!(err.to_string(), "missing components: Type, Specialty");
    }

    #[test]
    fn test_images_count_matches_slots() {
        let dir = Path::new("images");
        let cases = [
            (Selection::default(), 0),
            (Selection::from_keys("", "Electric", ""), 1),
            (Selection::from_keys("Humanoid", "", "Security"), 2),
            (Selection::from_keys("Drone", "Solar", "Security"), 3),
        ];
        for (selection, expected) in cases {
            let images = images_for(&selection, dir);
            assert_eq!(images.iter().flatten().count(), expected);
        }

        let images = images_for(&Selection::from_keys("", "Electric", ""), dir);
        assert_eq!(images[1], Some(PathBuf::from("images/electric.png")));
    }

    #[test]
    fn test_images_unknown_key() {
        let images = images_for(&Selection::from_keys("Toaster", "Solar", ""), Path::new("a"));
        assert_eq!(images, [None, Some(PathBuf::from("a/solar.png")), None]);
    }

    #[test]
    fn test_selection_with_replaces() {
        let first = Selection::from_keys("Drone", "Solar", "Security");
        let second = first.with(Category::PowerSource, Some("Hybrid"));
        assert_eq!(first.get(Category::PowerSource), Some("Solar"));
        assert_eq!(second.get(Category::PowerSource), Some("Hybrid"));

        let cleared = second.with(Category::RobotType, None);
        assert!(!cleared.is_complete());
        assert_eq!(cleared.missing(), vec![Category::RobotType]);
    }

    #[test]
    fn test_summary_and_headline() {
        let robot =
            BuiltRobot::from_selection(&Selection::from_keys("Humanoid", "Electric", "AI Assistant"))
                .unwrap();
        assert_eq!(
            robot.summary(),
            "Type: Humanoid\nPower Source: Electric\nSpecialty: AI Assistant"
        );
        assert_eq!(
            robot.headline(),
            "Your Humanoid runs on Electric and specializes in AI Assistant: This robot is \
             designed for intelligent interactions, capable of learning and adapting."
        );
    }
}
