mod app;
mod assets;
mod catalog;
mod config;
mod logging;
mod robot;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

use app::{App, Popup};
use catalog::Category;
use config::AppConfig;
use robot::{BuiltRobot, ComposeError, Selection};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "robot-garage")]
#[command(version)]
#[command(about = "Build your custom robot: pick a type, a power source and a specialty")]
struct Args {
    /// Directory containing the part pictures
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Config file (defaults to ~/.config/robot-garage/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every available part and exit
    #[arg(short, long)]
    list: bool,

    /// Build a robot from the given parts without starting the UI
    #[arg(short, long)]
    build: bool,

    /// Robot type (Drone, Humanoid, Quadruped)
    #[arg(long = "robot-type", default_value = "")]
    robot_type: String,

    /// Power source (Electric, Solar, Hybrid)
    #[arg(long, default_value = "")]
    power: String,

    /// Specialty (AI Assistant, Heavy Lifter, Security)
    #[arg(long, default_value = "")]
    function: String,

    /// Output as JSON (with --list or --build)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Headless commands log to stderr, the TUI to a file
    logging::init(!(args.list || args.build));

    let config = AppConfig::load(args.config.as_deref())?;
    let assets_dir = config.assets_dir(args.assets.as_deref());

    // Handle CLI-only commands
    if args.list {
        return print_catalog(args.json);
    }

    if args.build {
        let selection = Selection::from_keys(&args.robot_type, &args.power, &args.function);
        return print_build(&selection, &assets_dir, args.json);
    }

    ui::init_theme(Theme::load(&config.theme));
    run_tui(App::new(&config, assets_dir))
}

/// Every option, in category then selector order
fn catalog_json() -> Result<serde_json::Value> {
    let options: Vec<_> = Category::ALL
        .iter()
        .flat_map(|c| catalog::options(*c))
        .collect();
    Ok(serde_json::to_value(options)?)
}

fn print_catalog(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&catalog_json()?)?);
        return Ok(());
    }

    for category in Category::ALL {
        println!("{}", category.prompt());
        for option in catalog::options(category) {
            println!("  {:<14} {}", option.key, option.description);
        }
    }
    Ok(())
}

/// Robot for a headless build, `None` while parts are missing
fn compose(selection: &Selection) -> Result<Option<BuiltRobot>> {
    match BuiltRobot::from_selection(selection) {
        Ok(robot) => Ok(Some(robot)),
        Err(ComposeError::Incomplete { missing }) => {
            tracing::warn!("Missing components: {:?}", missing);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn build_json(selection: &Selection, assets_dir: &Path) -> Result<serde_json::Value> {
    let description = robot::describe(selection)?;
    let robot = compose(selection)?;

    Ok(serde_json::json!({
        "complete": robot.is_some(),
        "headline": robot.as_ref().map(BuiltRobot::headline),
        "summary": robot.as_ref().map(BuiltRobot::summary),
        "description": description,
        "images": robot::images_for(selection, assets_dir),
    }))
}

fn print_build(selection: &Selection, assets_dir: &Path, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&build_json(selection, assets_dir)?)?);
        return Ok(());
    }

    let description = robot::describe(selection)?;
    let robot = compose(selection)?;

    if let Some(robot) = robot {
        println!("{}\n", robot.headline());
        println!("{}\n", robot.summary());
    }
    println!("{}", description);
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                tracing::warn!("{:#}", e);
                                app.set_warning(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}
