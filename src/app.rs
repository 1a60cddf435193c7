use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::Instant;

use crate::assets::{AssetLoader, ImageAsset};
use crate::catalog::{self, Category};
use crate::config::AppConfig;
use crate::robot::{self, BuiltRobot, Selection, INCOMPLETE_MESSAGE};

/// Seconds a status message stays in the info line
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Selector(Category),
    Build,
    Clear,
}

/// Focus order: the three selectors top to bottom, then the buttons
pub const FIELDS: [Field; 5] = [
    Field::Selector(Category::RobotType),
    Field::Selector(Category::PowerSource),
    Field::Selector(Category::Function),
    Field::Build,
    Field::Clear,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Picker(Category), // Dropdown list for one selector
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
}

pub struct App {
    pub focus: usize,
    pub popup: Popup,
    pub picker_selected: usize,

    // Current selector values
    pub selection: Selection,

    // Display region
    pub headline: Option<String>,
    pub description: String,
    pub images: [Option<ImageAsset>; 3],

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_kind: StatusKind,
    pub status_message_time: Option<Instant>,

    pub assets_dir: PathBuf,
    loader: AssetLoader,
    notifications: bool,
}

impl App {
    pub fn new(config: &AppConfig, assets_dir: PathBuf) -> Self {
        tracing::info!("Loading part pictures from {}", assets_dir.display());

        Self {
            focus: 0,
            popup: Popup::None,
            picker_selected: 0,

            selection: Selection::default(),

            headline: None,
            description: String::new(),
            images: [None, None, None],

            status_message: None,
            status_kind: StatusKind::Info,
            status_message_time: None,

            assets_dir,
            loader: AssetLoader::new(config.image_size),
            notifications: config.notifications,
        }
    }

    pub fn field(&self) -> Field {
        FIELDS[self.focus]
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_kind = StatusKind::Info;
        self.status_message_time = Some(Instant::now());
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.set_status(msg);
        self.status_kind = StatusKind::Warning;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        match self.popup {
            Popup::None => self.handle_normal_key(key),
            Popup::Picker(category) => {
                self.handle_picker_key(category, key);
                Ok(())
            }
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Focus navigation
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                self.focus = (self.focus + 1) % FIELDS.len();
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.focus = self.focus.checked_sub(1).unwrap_or(FIELDS.len() - 1);
            }

            // Cycle the focused selector in place
            KeyCode::Right => self.cycle(true),
            KeyCode::Left => self.cycle(false),

            KeyCode::Enter | KeyCode::Char(' ') => match self.field() {
                Field::Selector(category) => self.open_picker(category),
                Field::Build => self.build()?,
                Field::Clear => self.clear(),
            },

            KeyCode::Char('b') => self.build()?,
            KeyCode::Char('c') => self.clear(),

            // Empty the focused selector
            KeyCode::Delete | KeyCode::Backspace => {
                if let Field::Selector(category) = self.field() {
                    self.select(category, None);
                }
            }

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_picker_key(&mut self, category: Category, key: KeyEvent) {
        let count = catalog::options(category).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.picker_selected = (self.picker_selected + 1) % count;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.picker_selected = self.picker_selected.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let key = catalog::options(category)[self.picker_selected].key;
                self.select(category, Some(key));
                self.popup = Popup::None;
            }
            KeyCode::Esc | KeyCode::Char('q') => self.popup = Popup::None,
            _ => {}
        }
    }

    fn open_picker(&mut self, category: Category) {
        self.picker_selected = self.option_index(category).unwrap_or(0);
        self.popup = Popup::Picker(category);
    }

    /// Position of the current value of `category` in its selector
    pub fn option_index(&self, category: Category) -> Option<usize> {
        let key = self.selection.get(category)?;
        catalog::keys(category).position(|k| k == key)
    }

    fn cycle(&mut self, forward: bool) {
        let Field::Selector(category) = self.field() else {
            return;
        };
        let options = catalog::options(category);
        let next = match (self.option_index(category), forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => i.checked_sub(1).unwrap_or(options.len() - 1),
        };
        self.select(category, Some(options[next].key));
    }

    /// Replace one selector value and refresh the pictures
    pub fn select(&mut self, category: Category, key: Option<&str>) {
        self.selection = self.selection.with(category, key);
        tracing::debug!("{} = {:?}", category, key);
        self.refresh_images();
    }

    fn refresh_images(&mut self) {
        let paths = robot::images_for(&self.selection, &self.assets_dir);
        for (slot, path) in self.images.iter_mut().zip(paths) {
            *slot = path.map(|p| self.loader.load(&p));
        }
    }

    pub fn build(&mut self) -> Result<()> {
        let robot = match BuiltRobot::from_selection(&self.selection) {
            Ok(robot) => robot,
            Err(robot::ComposeError::Incomplete { missing }) => {
                tracing::info!("Build refused, missing {:?}", missing);
                self.headline = None;
                self.description = INCOMPLETE_MESSAGE.to_string();
                self.set_warning(INCOMPLETE_MESSAGE);
                return Ok(());
            }
            Err(e) => {
                self.headline = None;
                self.description.clear();
                return Err(e.into());
            }
        };

        let headline = robot.headline();
        tracing::info!("Built robot: {}", robot.summary().replace('\n', ", "));

        self.description = robot.description();
        self.headline = Some(headline.clone());
        self.refresh_images();
        self.set_status("Robot built");

        if self.notifications {
            if let Err(e) = notify("Robot Garage", &headline) {
                tracing::warn!("Notification failed: {}", e);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.selection.is_empty() {
            tracing::info!("Clearing selection");
        }
        self.selection = Selection::default();
        self.headline = None;
        self.description.clear();
        self.images = [None, None, None];
        self.set_status("Cleared");
    }

    pub fn tick(&mut self) {
        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("applications-engineering")
        .show()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&AppConfig::default(), PathBuf::from("/nonexistent/robot-garage"))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code)).unwrap();
    }

    #[test]
    fn test_build_incomplete_warns() {
        let mut app = app();
        app.select(Category::PowerSource, Some("Electric"));
        app.build().unwrap();

        assert_eq!(app.description, INCOMPLETE_MESSAGE);
        assert_eq!(app.headline, None);
        assert_eq!(app.status_kind, StatusKind::Warning);
        assert_eq!(app.status_message.as_deref(), Some(INCOMPLETE_MESSAGE));
    }

    #[test]
    fn test_build_complete() {
        let mut app = app();
        app.select(Category::RobotType, Some("Drone"));
        app.select(Category::PowerSource, Some("Solar"));
        app.select(Category::Function, Some("Security"));
        app.build().unwrap();

        assert!(app.description.contains("flying robot"));
        assert_eq!(
            app.headline.as_deref(),
            Some(
                "Your Drone runs on Solar and specializes in Security: Equipped with sensors \
                 and monitoring tools, this robot ensures safety and surveillance."
            )
        );
        // Assets dir doesn't exist, every slot shows the placeholder
        assert!(app.images.iter().all(|i| i.as_ref().is_some_and(ImageAsset::is_placeholder)));
    }

    #[test]
    fn test_build_unknown_key_leaves_display_blank() {
        let mut app = app();
        app.selection = Selection::from_keys("Toaster", "Solar", "Security");
        app.description = "stale".to_string();

        assert!(app.build().is_err());
        assert!(app.description.is_empty());
        assert_eq!(app.headline, None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut app = app();
        app.selection = Selection::from_keys("Humanoid", "Hybrid", "AI Assistant");
        app.build().unwrap();
        press(&mut app, KeyCode::Char('c'));

        assert!(app.selection.is_empty());
        assert!(app.description.is_empty());
        assert_eq!(app.headline, None);
        assert!(app.images.iter().all(Option::is_none));
    }

    #[test]
    fn test_selection_updates_images() {
        let mut app = app();
        app.select(Category::Function, Some("Heavy Lifter"));
        assert!(app.images[0].is_none());
        assert!(app.images[1].is_none());
        assert!(app.images[2].is_some());

        app.select(Category::Function, None);
        assert!(app.images[2].is_none());
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.field(), Field::Clear);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.field(), Field::Selector(Category::RobotType));
    }

    #[test]
    fn test_cycle_selector() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection.get(Category::RobotType), Some("Drone"));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selection.get(Category::RobotType), Some("Quadruped"));

        // Only the arrow keys cycle, 'l' is not bound
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.selection.get(Category::RobotType), Some("Quadruped"));

        // Buttons don't cycle anything
        app.focus = 3;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selection.get(Category::RobotType), Some("Quadruped"));
    }

    #[test]
    fn test_picker_flow() {
        let mut app = app();
        app.focus = 1;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup, Popup::Picker(Category::PowerSource));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.selection.get(Category::PowerSource), Some("Solar"));

        // Reopening starts on the current value, Esc keeps it
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.picker_selected, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.selection.get(Category::PowerSource), Some("Solar"));
    }

    #[test]
    fn test_build_button() {
        let mut app = app();
        app.selection = Selection::from_keys("Quadruped", "Electric", "Heavy Lifter");
        app.focus = 3;
        press(&mut app, KeyCode::Enter);
        assert!(app.description.starts_with("Quadruped: "));
    }
}
