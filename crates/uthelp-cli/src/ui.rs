use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use tracing::debug;
use tracing::info;

use uthelp_core::controller::MenuController;
use uthelp_core::keys::MenuKey;
use uthelp_core::reducer::MenuEffect;
use uthelp_core::state::{EntryKind, MenuMode, ScriptOutcome};
use uthelp_exec::contracts::{ScriptInvocation, ScriptReport, ScriptStatus};
use uthelp_exec::executor::ScriptExecutor;

use crate::signals;

const CURSOR_ICON: &str = "👉";
const KEY_HINTS: &str = "↑/↓ move  →/Enter open  ←/Backspace back  Esc exit";
const CONTINUE_BANNER: &str = " Press Keyboard to go back to the menu... ";
const EXIT_PROMPT: &str = "Are you sure you want to exit? (y/n)";
const MENU_PADDING: u16 = 10;
const MIN_SIDE_PANEL: u16 = 20;
const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(200);

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run<E: ScriptExecutor>(mut controller: MenuController, executor: E) -> io::Result<()> {
    signals::install_termination_handlers()?;
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard; // Ensures the cursor comes back on every exit path, panics included

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut controller, &executor)
}

fn menu_key(key: KeyEvent) -> MenuKey {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return MenuKey::Interrupt;
    }
    match key.code {
        KeyCode::Up => MenuKey::Up,
        KeyCode::Down => MenuKey::Down,
        KeyCode::Left => MenuKey::Left,
        KeyCode::Right => MenuKey::Right,
        KeyCode::Enter => MenuKey::Enter,
        KeyCode::Backspace => MenuKey::Backspace,
        KeyCode::Esc => MenuKey::Escape,
        KeyCode::Char(c) => MenuKey::Char(c),
        _ => MenuKey::Other,
    }
}

fn outcome_from_report(report: ScriptReport) -> ScriptOutcome {
    match report.status {
        ScriptStatus::Succeeded => ScriptOutcome::Completed {
            output: report.stdout,
        },
        ScriptStatus::Diagnostics | ScriptStatus::Failed => ScriptOutcome::Failed {
            message: report.message.unwrap_or_else(|| {
                format!("Error: {} {}", report.path.display(), report.status.label())
            }),
        },
    }
}

/// Blocks until the next terminal event. `None` means a termination
/// signal arrived first.
fn next_event() -> io::Result<Option<Event>> {
    loop {
        if signals::termination_requested() {
            return Ok(None);
        }
        if event::poll(SIGNAL_POLL_INTERVAL)? {
            return event::read().map(Some);
        }
    }
}

/// Drops key presses that piled up while a script held the terminal.
fn drain_pending_events() -> io::Result<usize> {
    let mut dropped = 0;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    Ok(dropped)
}

fn run_app<B: Backend, E: ScriptExecutor>(
    terminal: &mut Terminal<B>,
    controller: &mut MenuController,
    executor: &E,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, controller))?;

        let Some(event) = next_event()? else {
            info!("termination signal received, restoring terminal");
            return Ok(());
        };
        let key = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        for effect in controller.handle_key(menu_key(key)) {
            match effect {
                MenuEffect::RunScript { label, path } => {
                    // Processing banner stays up while the child runs.
                    terminal.draw(|f| ui(f, controller))?;
                    let report = executor.execute(&ScriptInvocation { path, label });
                    let dropped = drain_pending_events()?;
                    if dropped > 0 {
                        debug!(dropped, "discarded input queued during script run");
                    }
                    controller.finish_script(outcome_from_report(report));
                }
                MenuEffect::Exit => return Ok(()),
                MenuEffect::RequestFrame | MenuEffect::LoadDirectory { .. } => {}
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame, controller: &MenuController) {
    let area = f.area();
    f.render_widget(Clear, area);

    match &controller.state().mode {
        MenuMode::Navigating => render_menu(f, area, controller),
        MenuMode::AwaitingExitConfirmation => {
            f.render_widget(Paragraph::new(EXIT_PROMPT), area);
        }
        MenuMode::AwaitingScriptCompletion { label, .. } => {
            render_run(f, area, controller, label, None);
        }
        MenuMode::ShowingOutput { label, output } => {
            render_run(f, area, controller, label, Some(output));
        }
    }
}

fn breadcrumb_line(controller: &MenuController) -> Line<'static> {
    Line::from(format!("  {}", controller.breadcrumb()))
        .style(Style::default().add_modifier(Modifier::BOLD))
}

fn banner_style() -> Style {
    Style::default().bg(Color::Green).fg(Color::Black)
}

fn entry_lines(controller: &MenuController) -> Vec<Line<'static>> {
    let state = controller.state();
    let mut lines = Vec::with_capacity(state.entries.len() + 2);
    for (index, entry) in state.entries.iter().enumerate() {
        let text = entry.display_text();
        let line = if index == state.selected {
            Line::from(Span::styled(
                format!(" {CURSOR_ICON}   {text}"),
                Style::default().fg(Color::Green),
            ))
        } else {
            let style = match entry.kind {
                EntryKind::GoBack => Style::default().fg(Color::DarkGray),
                EntryKind::Exit => Style::default().fg(Color::Red),
                EntryKind::Directory | EntryKind::Script => Style::default(),
            };
            Line::from(Span::styled(format!("      {text}"), style))
        };

        if entry.kind == EntryKind::Exit {
            lines.push(Line::default());
        }
        lines.push(line);
        if entry.kind == EntryKind::GoBack {
            lines.push(Line::default());
        }
    }
    lines
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn render_menu(f: &mut ratatui::Frame, area: Rect, controller: &MenuController) {
    let state = controller.state();
    let status_height = state
        .status
        .as_deref()
        .map(|s| wrapped_height(s, area.width).clamp(1, 6))
        .unwrap_or(0);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(status_height),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(breadcrumb_line(controller)), rows[0]);

    let lines = entry_lines(controller);
    let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    let menu_width = u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(MENU_PADDING);

    let body = rows[1];
    let side_width = body
        .width
        .saturating_sub(menu_width.saturating_add(4))
        .min(state.config.description_width);
    let (menu_area, description_area) = if side_width >= MIN_SIDE_PANEL {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(menu_width.saturating_add(2)),
                Constraint::Length(side_width + 4),
                Constraint::Min(0),
            ])
            .split(body);
        (cols[0], cols[1])
    } else {
        let menu_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let stacked = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(menu_height.saturating_add(1)), Constraint::Min(0)])
            .split(body);
        (stacked[0], stacked[1])
    };

    f.render_widget(Paragraph::new(lines), menu_area);
    render_description(f, description_area, &controller.description());

    if let Some(status) = state.status.as_deref() {
        let p = Paragraph::new(status.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false });
        f.render_widget(p, rows[2]);
    }

    render_footer(f, rows[3]);
}

fn render_description(f: &mut ratatui::Frame, area: Rect, description: &str) {
    if area.width < 6 || area.height < 3 {
        return;
    }
    let inner_width = area.width.saturating_sub(4);
    let needed = wrapped_height(description, inner_width).saturating_add(3);
    let area = Rect {
        height: needed.min(area.height),
        ..area
    };

    let mut text = vec![Line::from(Span::styled(
        "Description:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    text.extend(description.lines().map(|line| Line::from(line.to_string())));

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(ratatui::widgets::Padding::horizontal(1));
    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn render_footer(f: &mut ratatui::Frame, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(area);
    f.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(format!("uthelp v{}", env!("CARGO_PKG_VERSION")))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        cols[1],
    );
}

fn render_run(
    f: &mut ratatui::Frame,
    area: Rect,
    controller: &MenuController,
    label: &str,
    output: Option<&String>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(breadcrumb_line(controller)), rows[0]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" Processing -{label} "),
            banner_style(),
        ))),
        rows[1],
    );

    let Some(output) = output else {
        return;
    };

    // Keep the tail when the output is taller than the screen.
    let height = usize::from(rows[2].height);
    let lines: Vec<&str> = output.lines().collect();
    let visible = &lines[lines.len().saturating_sub(height)..];
    let body: Vec<Line> = visible.iter().map(|line| Line::from(line.to_string())).collect();
    f.render_widget(Paragraph::new(body), rows[2]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(CONTINUE_BANNER, banner_style()))),
        rows[3],
    );
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use uthelp_core::config::MenuConfig;

    use super::*;

    fn render_to_string(controller: &MenuController, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| ui(frame, controller)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            text.push('\n');
        }
        text
    }

    fn fixture() -> (tempfile::TempDir, MenuController) {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("helloTool.sh"), "# Say hello\necho hello\n").unwrap();
        fs::create_dir(dir.path().join("backup")).unwrap();
        fs::write(dir.path().join("backup").join("readme.md"), "Backup tools\n").unwrap();
        let controller = MenuController::open(MenuConfig::new(dir.path())).expect("open");
        (dir, controller)
    }

    #[test]
    fn menu_shows_breadcrumb_entries_and_description() {
        let (_dir, mut controller) = fixture();
        controller.handle_key(MenuKey::Down);
        let screen = render_to_string(&controller, 120, 20);

        assert!(screen.contains("Utilities"));
        assert!(screen.contains("Backup (backup)"));
        assert!(screen.contains("Hello Tool (helloTool.sh)"));
        assert!(screen.contains("[ Exit Program (ESC) ]"));
        assert!(screen.contains("Description:"));
        assert!(screen.contains("Say hello"));
    }

    #[test]
    fn narrow_terminal_stacks_description_below() {
        let (_dir, controller) = fixture();
        let screen = render_to_string(&controller, 50, 24);
        assert!(screen.contains("Backup tools"));
    }

    #[test]
    fn confirmation_replaces_the_menu() {
        let (_dir, mut controller) = fixture();
        controller.handle_key(MenuKey::Escape);
        let screen = render_to_string(&controller, 80, 10);
        assert!(screen.contains(EXIT_PROMPT));
        assert!(!screen.contains("Utilities"));
    }

    #[test]
    fn finished_script_shows_output_and_continue_banner() {
        let (dir, mut controller) = fixture();
        controller.handle_key(MenuKey::Down);
        let effects = controller.handle_key(MenuKey::Enter);
        assert!(effects.iter().any(|e| matches!(
            e,
            MenuEffect::RunScript { path, .. } if *path == dir.path().join("helloTool.sh")
        )));
        let running = render_to_string(&controller, 80, 10);
        assert!(running.contains(" Processing -🔧"));
        assert!(running.contains("Hello Tool (helloTool.sh)"));

        controller.finish_script(ScriptOutcome::Completed {
            output: "hello\n".to_string(),
        });
        let screen = render_to_string(&controller, 80, 10);
        assert!(screen.contains("hello"));
        assert!(screen.contains(CONTINUE_BANNER.trim()));
    }

    #[test]
    fn failure_status_is_shown_on_the_menu() {
        let (_dir, mut controller) = fixture();
        controller.handle_key(MenuKey::Down);
        controller.handle_key(MenuKey::Enter);
        controller.finish_script(outcome_from_report(ScriptReport {
            path: PathBuf::from("helloTool.sh"),
            status: ScriptStatus::Diagnostics,
            stdout: "partial\n".to_string(),
            stderr: "bad flag\n".to_string(),
            message: Some("Stderr: bad flag".to_string()),
            exit_code: Some(0),
        }));
        assert_eq!(controller.state().mode, MenuMode::Navigating);
        assert!(render_to_string(&controller, 100, 16).contains("Stderr: bad flag"));
    }

    #[test]
    fn ctrl_c_maps_to_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(menu_key(key), MenuKey::Interrupt);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(menu_key(key), MenuKey::Char('c'));
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(menu_key(key), MenuKey::Escape);
    }
}
