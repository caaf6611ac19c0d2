//! Interactive data table demo.
//!
//! Run with `cargo run --example table`. Keys:
//!
//! - `j`/`k`/arrows: move the cursor
//! - `Space`: toggle the cursor row's selection
//! - `Ctrl+A`: select/deselect all
//! - `2`/`3`/`4`: toggle sort by name/region/cpu
//! - `l`: toggle the loading state
//! - `e`: toggle an empty dataset
//! - `q`/`Esc`: quit

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use serde_json::{json, Value};

use griddle::{logging, Column, DataTable, Theme};

#[derive(Debug, Parser)]
#[command(about = "Interactive demo of the griddle data table")]
struct Args {
    /// Event poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_rate: u64,

    /// Path to a TOML theme file.
    #[arg(long)]
    theme: Option<PathBuf>,
}

fn sample_rows() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "api-1", "region": "eu-west", "cpu": 42.5, "status": "up"}),
        json!({"id": 2, "name": "api-2", "region": "us-east", "cpu": 12.0, "status": "up"}),
        json!({"id": 3, "name": "worker-1", "region": "eu-west", "cpu": 88.1, "status": "degraded"}),
        json!({"id": 4, "name": "worker-2", "region": "ap-south", "cpu": 7.3, "status": "up"}),
        json!({"id": 5, "name": "cache-1", "region": "us-east", "cpu": 63.9, "status": "down"}),
        json!({"id": 6, "name": "cache-2", "region": "eu-west", "cpu": 63.9, "status": "up"}),
    ]
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::new("id", "ID").width(Constraint::Length(4)),
        Column::new("name", "Name").sortable(true),
        Column::new("region", "Region").sortable(true),
        Column::new("cpu", "CPU %")
            .sortable(true)
            .width(Constraint::Length(8)),
        Column::new("status", "Status").render_with(|value, _row| {
            let color = match value.to_string().as_str() {
                "up" => Color::Green,
                "degraded" => Color::Yellow,
                _ => Color::Red,
            };
            Line::from(Span::styled(value.to_string(), Style::default().fg(color)))
        }),
    ]
}

fn draw(frame: &mut Frame, table: &mut DataTable<Value>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(frame.area());

    table.render(frame, chunks[0], true);

    let help = Paragraph::new(format!(
        " j/k move · Space select · Ctrl+A all · 2-4 sort · l loading · e empty · q quit · {} selected",
        table.selected_count()
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init("griddle-demo")?;

    let theme = match &args.theme {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };

    let mut table = DataTable::new("Servers", columns())
        .selectable(true)
        .empty_message("No servers match")
        .with_theme(theme);
    table.set_rows(sample_rows());
    table.on_select(|rows| {
        tracing::info!(selected = rows.len(), "selection changed");
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(args.tick_rate);
    let mut emptied = false;
    loop {
        terminal.draw(|frame| draw(frame, &mut table))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('l') => table.set_loading(!table.is_loading()),
            KeyCode::Char('e') => {
                emptied = !emptied;
                table.set_rows(if emptied { Vec::new() } else { sample_rows() });
            }
            _ => {
                table.handle_input(key);
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    logging::shutdown("griddle-demo");
    Ok(())
}
