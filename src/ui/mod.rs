mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup, StatusKind, FIELDS};
use crate::catalog::{self, Category};
use crate::theme::Theme;
use components::PixelArt;

// Resolved once at startup from the config overrides
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn build_color() -> Color { theme().build }
fn clear_color() -> Color { theme().clear }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg() -> Color { theme().bg }
fn panel() -> Color { theme().panel }
fn bg_selected() -> Color { theme().bg_selected }
fn inactive() -> Color { theme().inactive }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(bg())), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Title
            Constraint::Length(5), // Selectors
            Constraint::Length(3), // Buttons
            Constraint::Min(6),    // Pictures
            Constraint::Length(6), // Description
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_title(f, chunks[1]);
    draw_selectors(f, app, chunks[2]);
    draw_buttons(f, app, chunks[3]);
    draw_pictures(f, app, chunks[4]);
    draw_description(f, app, chunks[5]);
    draw_footer(f, chunks[6]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Picker(category) => draw_picker(f, app, category),
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => {
            let color = match app.status_kind {
                StatusKind::Warning => warning(),
                StatusKind::Info => build_color(),
            };
            let icon = match app.status_kind {
                StatusKind::Warning => "⚠ ",
                StatusKind::Info => "",
            };
            Line::from(Span::styled(format!("{}{}", icon, status), Style::default().fg(color)))
        }
        None => Line::from(Span::styled("Ready", Style::default().fg(text_dim()))),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Robot Garage",
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(inactive())));

    f.render_widget(title, area);
}

fn draw_selectors(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .margin(1)
        .split(area);

    for (category, row) in Category::ALL.into_iter().zip(rows.iter()) {
        let focused = app.field() == Field::Selector(category);
        let value = app.selection.get(category);

        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text())
        };
        let (value_text, value_style) = match value {
            Some(v) => (v, Style::default().fg(text())),
            None => ("—", Style::default().fg(text_dim())),
        };
        let box_style = if focused {
            value_style.bg(bg_selected())
        } else {
            value_style
        };

        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(accent())),
            Span::styled(format!("{:<24}", category.prompt()), label_style),
            Span::styled("◀ ", Style::default().fg(if focused { accent() } else { inactive() })),
            Span::styled(format!("{:^14}", value_text), box_style),
            Span::styled(" ▶", Style::default().fg(if focused { accent() } else { inactive() })),
        ]);

        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), *row);
    }
}

fn draw_buttons(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(18),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    let button = |label: &str, field: Field, color: Color| {
        let focused = app.field() == field;
        let style = if focused {
            Style::default().fg(bg()).bg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Span::styled(label.to_string(), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if focused { color } else { inactive() })),
            )
    };

    // Dim the build button until every selector has a value
    let build = if app.selection.is_complete() { build_color() } else { text_dim() };
    f.render_widget(button("(b) Build Robot", Field::Build, build), chunks[1]);
    f.render_widget(button("(c) Clear", Field::Clear, clear_color()), chunks[3]);
}

fn draw_pictures(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()))
        .style(Style::default().bg(panel()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    for (image, column) in app.images.iter().zip(columns.iter()) {
        // Empty slots stay blank
        let Some(image) = image else { continue };

        let (w, h) = PixelArt::size(image);
        let w = w.min(column.width);
        let h = h.min(column.height);
        let centered = Rect::new(
            column.x + (column.width - w) / 2,
            column.y + (column.height - h) / 2,
            w,
            h,
        );
        f.render_widget(PixelArt::new(image, panel()), centered);
    }
}

fn draw_description(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(ref headline) = app.headline {
        lines.push(Line::from(Span::styled(
            headline.as_str(),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )));
    }
    for line in app.description.lines() {
        lines.push(Line::from(Span::styled(line, Style::default().fg(text()))));
    }

    let description = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(description, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(accent()));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(text_dim()));

    let footer = Paragraph::new(Line::from(vec![
        key("Tab"), hint(" move  "),
        key("←/→"), hint(" change  "),
        key("Enter"), hint(" pick  "),
        key("b"), hint(" build  "),
        key("c"), hint(" clear  "),
        key("?"), hint(" help  "),
        key("q"), hint(" quit"),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_picker(f: &mut Frame, app: &App, category: Category) {
    let options = catalog::options(category);
    let height = options.len() as u16 + 2;
    let area = f.area();
    let popup_area = centered_fixed(36, height, area);

    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = options
        .iter()
        .map(|o| {
            let current = app.selection.get(category) == Some(o.key);
            let mark = if current { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(accent())),
                Span::styled(o.key, Style::default().fg(text())),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", category.prompt()), Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent()))
                .style(Style::default().bg(bg())),
        )
        .highlight_style(Style::default().bg(bg_selected()).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(app.picker_selected));
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn draw_help_popup(f: &mut Frame) {
    let popup_area = centered_fixed(56, 18, f.area());

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        entry("Tab/↑/↓", "Move between selectors and buttons"),
        entry("←/→", "Change the focused selector"),
        entry("Enter", "Open the option list / press button"),
        entry("Del", "Empty the focused selector"),
        Line::from(""),
        section("═══ Garage ═══"),
        entry("b", "Build the robot"),
        entry("c", "Clear all selections"),
        Line::from(""),
        section("═══ Command Line ═══"),
        entry("--list", "Print every part"),
        entry("--build", "Build without the UI (--json)"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Robot Garage Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent()))
                .style(Style::default().bg(bg())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

/// Fixed-size rect centered in `r`, clamped to fit
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_empty_form() {
        let app = App::new(&AppConfig::default(), PathBuf::from("/nonexistent"));
        let screen = render(&app);
        assert!(screen.contains("Robot Garage"));
        assert!(screen.contains("Select Power Source:"));
        assert!(screen.contains("Build Robot"));
    }

    #[test]
    fn test_draw_built_robot() {
        let mut app = App::new(&AppConfig::default(), PathBuf::from("/nonexistent"));
        app.selection = crate::robot::Selection::from_keys("Drone", "Solar", "Security");
        app.build().unwrap();
        let screen = render(&app);
        assert!(screen.contains("Your Drone runs on Solar and"));
    }

    #[test]
    fn test_draw_picker_on_tiny_terminal() {
        let mut app = App::new(&AppConfig::default(), PathBuf::from("/nonexistent"));
        app.popup = Popup::Picker(Category::Function);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }

    #[test]
    fn test_focus_order_covers_buttons() {
        assert!(FIELDS.contains(&Field::Build));
        assert!(FIELDS.contains(&Field::Clear));
    }
}
