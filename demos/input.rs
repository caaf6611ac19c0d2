//! Text input demo: a small login form.
//!
//! Run with `cargo run --example input`. `Tab` switches fields, `Enter`
//! submits, `Esc` quits.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};

use griddle::{logging, TextInput};

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Username,
    Password,
}

struct Form {
    username: TextInput,
    password: TextInput,
    focus: Field,
    submitted: Option<String>,
}

impl Form {
    fn new() -> Self {
        Self {
            username: TextInput::new().placeholder("user@example.com"),
            password: TextInput::masked(),
            focus: Field::Username,
            submitted: None,
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}

fn draw(frame: &mut Frame, form: &Form) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(frame.area());

    form.username
        .render_labeled(frame, chunks[0], "Username", form.focus == Field::Username);
    form.password
        .render_labeled(frame, chunks[1], "Password", form.focus == Field::Password);

    let status = match &form.submitted {
        Some(user) => format!(" submitted as {}", user),
        None => " Tab switch · Enter submit · Esc quit".to_string(),
    };
    let footer = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);
}

fn main() -> Result<()> {
    logging::init("griddle-demo")?;

    let mut form = Form::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| draw(frame, &form))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Tab => {
                form.focus = match form.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::Enter => {
                form.submitted = Some(form.username.value().to_string());
            }
            _ => {
                form.focused_input().handle_input(key);
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    logging::shutdown("griddle-demo");
    Ok(())
}
