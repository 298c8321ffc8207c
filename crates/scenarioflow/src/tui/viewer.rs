//! Scenario progress viewer

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use scenarioflow_cloud::DeploymentState;
use scenarioflow_engine::{
    EngineError, Key, Message, Phase, Renderer, ScenarioView, StepState,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use super::terminal::{Tui, restore_terminal, setup_terminal};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Forwards terminal events to the message loop from a background thread
struct InputForwarder {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl InputForwarder {
    fn spawn(sender: UnboundedSender<Message>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        tracing::warn!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }

                let message = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Message::input(map_key(key.code, key.modifiers))
                    }
                    Ok(Event::Resize(width, height)) => Message::resize(width, height),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                };

                if sender.send(message).is_err() {
                    break;
                }
            }
        });

        Self { stop, handle }
    }

    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            tracing::warn!("Input thread panicked");
        }
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    }
}

/// Full-screen renderer
pub struct TuiRenderer {
    terminal: Option<Tui>,
    input: Option<InputForwarder>,
}

impl TuiRenderer {
    pub fn new(sender: UnboundedSender<Message>) -> io::Result<Self> {
        let terminal = setup_terminal()?;
        Ok(Self {
            terminal: Some(terminal),
            input: Some(InputForwarder::spawn(sender)),
        })
    }

    fn draw(&mut self, view: &ScenarioView) -> scenarioflow_engine::Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal
                .draw(|f| draw_ui(f, view))
                .map_err(|e| EngineError::Render(e.to_string()))?;
        }
        Ok(())
    }

    fn wait_for_exit_key() -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(());
            }
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if let Some(input) = self.input.take() {
            input.stop();
        }
        if let Some(mut terminal) = self.terminal.take() {
            restore_terminal(&mut terminal)?;
        }
        Ok(())
    }
}

impl Renderer for TuiRenderer {
    fn render(&mut self, view: &ScenarioView) -> scenarioflow_engine::Result<()> {
        self.draw(view)
    }

    fn finish(&mut self, view: &ScenarioView) -> scenarioflow_engine::Result<()> {
        if let Some(input) = self.input.take() {
            input.stop();
        }

        if view.phase != Phase::Cancelled {
            self.draw(view)?;
            Self::wait_for_exit_key()?;
        }
        self.restore()?;
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn draw_ui(frame: &mut Frame, view: &ScenarioView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], view);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    draw_steps(frame, body[0], view);
    draw_transcript(frame, body[1], view);

    draw_footer(frame, chunks[2], view);
}

fn status_style(status: DeploymentState) -> Style {
    match status {
        DeploymentState::NotStarted => Style::default().fg(Color::Gray),
        DeploymentState::Running => Style::default().fg(Color::Yellow),
        DeploymentState::Succeeded => Style::default().fg(Color::Green),
        DeploymentState::Failed => Style::default().fg(Color::Red),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let title = Line::from(vec![
        Span::styled(
            view.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            view.status.to_string(),
            status_style(view.status).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/{} blocks", view.completed_blocks, view.total_blocks),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_steps(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let items: Vec<ListItem> = view
        .steps
        .iter()
        .map(|step| {
            let (marker, style) = match step.state {
                StepState::Succeeded => ("✓", Style::default().fg(Color::Green)),
                StepState::Failed => ("✗", Style::default().fg(Color::Red)),
                StepState::Running => (
                    "▶",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                StepState::Pending => ("·", Style::default().fg(Color::Gray)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(step.name.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("Steps (current: {})", view.current_step))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let mut lines = Vec::new();
    for (index, entry) in view.command_lines.iter().enumerate() {
        let style = if index % 2 == 0 {
            Style::default().fg(Color::Cyan)
        } else if view.phase == Phase::Aborted && index + 1 == view.command_lines.len() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        for text in entry.trim_end().lines() {
            lines.push(Line::from(Span::styled(text.to_string(), style)));
        }
    }

    // Keep the newest lines in view
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Output").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let (text, style) = match (&view.error, view.is_finished()) {
        (Some(error), _) => (
            format!("✗ {}", error.lines().next().unwrap_or_default()),
            Style::default().fg(Color::Red),
        ),
        (None, true) => (
            "Press any key to exit".to_string(),
            Style::default().fg(Color::Gray),
        ),
        (None, false) => (
            "q/Esc/Ctrl-C: quit".to_string(),
            Style::default().fg(Color::Gray),
        ),
    };

    let footer = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
