//! Full-screen report viewer

use super::theme::DEFAULT_THEME;
use crate::debug::Pause;
use crate::render::GlyphSet;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Scrollable view over one report
pub struct Viewer<'a> {
    lines: Vec<&'a str>,
    /// First visible line
    scroll: usize,
    /// Visible lines in the last drawn frame
    page: usize,
    done: bool,
}

impl<'a> Viewer<'a> {
    pub fn new(report: &'a str) -> Self {
        Viewer {
            lines: report.lines().collect(),
            scroll: 0,
            page: 1,
            done: false,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Draw until the operator continues
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.done {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let report_area = chunks[0];
        let status_area = chunks[1];

        // Account for borders, min 1
        self.page = report_area.height.saturating_sub(2).max(1) as usize;
        let max_scroll = self.lines.len().saturating_sub(self.page);
        self.scroll = self.scroll.min(max_scroll);

        let block = Block::default()
            .title(" Breakpoint ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            )
            .padding(Padding::new(1, 0, 0, 0));

        let text: Vec<Line> = self.lines.iter().map(|line| style_line(line)).collect();
        let paragraph = Paragraph::new(text)
            .block(block)
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, report_area);

        let status = Paragraph::new(format!(
            " ↑/↓ PgUp/PgDn scroll | Enter continue | line {}/{}",
            (self.scroll + 1).min(self.lines.len()),
            self.lines.len()
        ))
        .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(status, status_area);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let max_scroll = self.lines.len().saturating_sub(1);
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.done = true;
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(max_scroll),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.page),
            KeyCode::PageDown => self.scroll = (self.scroll + self.page).min(max_scroll),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = max_scroll,
            _ => {}
        }
    }
}

/// Style one report line
///
/// Section headers are highlighted, connector rows tinted, and the label of
/// a `label = value` line coloured separately from its value.
pub fn style_line(line: &str) -> Line<'static> {
    let trimmed = line.trim();

    if trimmed.starts_with('[') && (trimmed.ends_with(']') || trimmed.starts_with("[Debug]")) {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if !trimmed.is_empty() && line.chars().all(|c| c == ' ' || GlyphSet::is_connector(c)) {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.connector),
        ));
    }

    match line.split_once(" = ") {
        Some((label, value)) if !label.contains(' ') => Line::from(vec![
            Span::styled(label.to_string(), Style::default().fg(DEFAULT_THEME.type_name)),
            Span::raw(" = "),
            Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        _ => Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        )),
    }
}

/// Pause that shows a report in the viewer until the operator continues
#[derive(Debug, Clone)]
pub struct ViewerPause {
    report: String,
}

impl ViewerPause {
    pub fn new(report: impl Into<String>) -> Self {
        ViewerPause {
            report: report.into(),
        }
    }
}

impl Pause for ViewerPause {
    fn wait_for_continue(&self) -> io::Result<()> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = Viewer::new(&self.report).run(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const REPORT: &str = "[Debug] at app::run() [src/app.rs:7]\n\n[Variables]\npair = Pair{ a: &1, b: & }\n                │      │\n                └──────┘\n";

    fn press(viewer: &mut Viewer, code: KeyCode) {
        viewer.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_style_line_kinds() {
        let header = style_line("[Variables]");
        assert_eq!(header.spans[0].style.fg, Some(DEFAULT_THEME.primary));

        let connector = style_line("       └──┴──┘");
        assert_eq!(connector.spans[0].style.fg, Some(DEFAULT_THEME.connector));

        let labeled = style_line("pair = Pair{ a: 1 }");
        assert_eq!(labeled.spans.len(), 3);
        assert_eq!(labeled.spans[0].content, "pair");
        assert_eq!(labeled.spans[0].style.fg, Some(DEFAULT_THEME.type_name));
    }

    #[test]
    fn test_keys_scroll_and_continue() {
        let mut viewer = Viewer::new(REPORT);
        press(&mut viewer, KeyCode::Down);
        press(&mut viewer, KeyCode::Down);
        assert_eq!(viewer.scroll(), 2);
        press(&mut viewer, KeyCode::Up);
        assert_eq!(viewer.scroll(), 1);
        press(&mut viewer, KeyCode::End);
        assert_eq!(viewer.scroll(), 5);
        press(&mut viewer, KeyCode::Home);
        assert_eq!(viewer.scroll(), 0);

        assert!(!viewer.is_done());
        press(&mut viewer, KeyCode::Enter);
        assert!(viewer.is_done());
    }

    #[test]
    fn test_render_shows_report() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut viewer = Viewer::new(REPORT);
        terminal.draw(|f| viewer.render(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("[Variables]"));
        assert!(screen.contains("Breakpoint"));
        assert!(screen.contains("└──────┘"));
    }
}
