use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::*;

use agentdash_core::format::EMPTY_PROJECTS_PLACEHOLDER;
use agentdash_core::log_buffer::WAITING_PLACEHOLDER;
use agentdash_core::{ConnectionStatus, Dashboard, FeedView, ProjectCard, ProjectsView};

use crate::client::DashboardApi;
use crate::config::DashboardConfig;
use crate::display::{connection_indicator, kind_indicator, parse_hex_color, state_indicator};
use crate::poll_loop::{run_poll_loop, shared, shutdown_signal, spawn_refresh, spawn_status_poll};
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Terminal cleanup guard
// ---------------------------------------------------------------------------

/// RAII guard that restores the terminal to its normal state when dropped.
/// This ensures cleanup happens even on panic or early `?` returns.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

/// Interaction state that is not part of the dashboard itself.
struct App {
    /// Highlighted project card.
    selected: usize,
    should_quit: bool,
    /// Revision of the last drawn view; `None` forces a redraw.
    drawn_revision: Option<u64>,
}

impl App {
    fn new() -> Self {
        Self {
            selected: 0,
            should_quit: false,
            drawn_revision: None,
        }
    }

    /// Move selection down (j / Down).
    fn next(&mut self, card_count: usize) {
        if card_count > 0 {
            self.selected = (self.selected + 1).min(card_count - 1);
            self.drawn_revision = None;
        }
    }

    /// Move selection up (k / Up).
    fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.drawn_revision = None;
    }

    /// Clamp the selection after the project list changed size.
    fn clamp(&mut self, card_count: usize) {
        if card_count == 0 {
            self.selected = 0;
        } else if self.selected >= card_count {
            self.selected = card_count - 1;
        }
    }
}

fn cards(view: &DashboardView) -> &[ProjectCard] {
    match &view.projects {
        Some(ProjectsView::Cards(cards)) => cards,
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the full-screen dashboard until `q`, Ctrl+C or SIGTERM.
pub async fn run_tui<A>(api: Arc<A>, config: DashboardConfig) -> anyhow::Result<()>
where
    A: DashboardApi + 'static,
{
    // 1. Dashboard context + initial render into the view model
    let now = Local::now();
    let dashboard = shared(Dashboard::new(DashboardView::new(), config.max_logs, now));
    dashboard.lock().await.start(now);

    // 2. Background poll loop
    let poll_handle = tokio::spawn({
        let api = Arc::clone(&api);
        let dashboard = Arc::clone(&dashboard);
        let config = config.clone();
        async move { run_poll_loop(api, dashboard, &config).await }
    });

    // 3. Setup terminal; TerminalGuard ensures cleanup on panic or early return.
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    // 4. Main loop
    loop {
        let view = dashboard.lock().await.renderer().clone();
        app.clamp(cards(&view).len());

        if app.drawn_revision != Some(view.revision) {
            terminal.draw(|frame| render(frame, &view, &app))?;
            app.drawn_revision = Some(view.revision);
        }

        if app.should_quit {
            break;
        }

        tokio::select! {
            // Short timeout for crossterm event polling so we remain responsive.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) => match (key.code, key.modifiers) {
                            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                                app.should_quit = true;
                            }
                            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                                app.should_quit = true;
                            }
                            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
                                app.next(cards(&view).len());
                            }
                            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
                                app.previous();
                            }
                            (KeyCode::Char('r'), _) => {
                                // Manual refresh, same path as the timers
                                spawn_status_poll(&api, &dashboard).await;
                                spawn_refresh(&api, &dashboard);
                            }
                            _ => {}
                        },
                        Event::Resize(_, _) => app.drawn_revision = None,
                        _ => {}
                    }
                }
            }
            () = &mut shutdown => {
                app.should_quit = true;
            }
        }
    }

    poll_handle.abort();

    // 5. Cleanup terminal; TerminalGuard handles raw mode and alternate screen.
    terminal.show_cursor()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn token_color(token: &str) -> Color {
    parse_hex_color(token).map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b))
}

fn connection_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Live => Color::Green,
        ConnectionStatus::Offline => Color::Red,
        ConnectionStatus::Connecting => Color::DarkGray,
    }
}

fn kind_color(kind: &str) -> Color {
    match kind {
        "error" => Color::Red,
        "success" => Color::Green,
        _ => Color::Reset,
    }
}

fn header_line(view: &DashboardView) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(state) = view.state {
        let color = token_color(state.color);
        spans.push(Span::styled(
            format!(" {} ", state_indicator(state.id)),
            Style::default().fg(color),
        ));
        spans.push(Span::styled(
            state.label.to_string(),
            Style::default().fg(color).bold(),
        ));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("{} {}", connection_indicator(view.connection), view.connection),
        Style::default().fg(connection_color(view.connection)),
    ));
    Line::from(spans)
}

fn feed_items(feed: &FeedView) -> Vec<ListItem<'static>> {
    match feed {
        FeedView::Waiting => vec![ListItem::new(Span::styled(
            WAITING_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).italic(),
        ))],
        FeedView::Entries(entries) => entries
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", e.time), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{} ", kind_indicator(&e.kind)),
                        Style::default().fg(kind_color(&e.kind)),
                    ),
                    Span::raw(e.message.clone()),
                ]))
            })
            .collect(),
    }
}

fn project_items(projects: Option<&ProjectsView>) -> Vec<ListItem<'static>> {
    match projects {
        None => Vec::new(),
        Some(ProjectsView::Empty) => vec![ListItem::new(Span::styled(
            EMPTY_PROJECTS_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))],
        Some(ProjectsView::Cards(cards)) => cards
            .iter()
            .map(|card| {
                let mut lines = vec![Line::from(Span::styled(
                    card.name.clone(),
                    Style::default().bold(),
                ))];
                if !card.description.is_empty() {
                    lines.push(Line::from(card.description.clone()));
                }
                if !card.tags.is_empty() {
                    lines.push(Line::from(Span::styled(
                        card.tags.join(" \u{b7} "),
                        Style::default().fg(Color::Cyan),
                    )));
                }
                ListItem::new(lines)
            })
            .collect(),
    }
}

fn footer_line(view: &DashboardView, app: &App) -> String {
    let mut parts: Vec<String> = [&view.activity.activity, &view.activity.last_action]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();
    if let Some(card) = cards(view).get(app.selected).filter(|c| c.has_repo()) {
        parts.push(card.link.clone());
    }
    parts.push(view.wall_clock.clone());
    parts.push("j/k: select | r: refresh | q: quit".to_string());
    format!(" {}", parts.join(" | "))
}

/// Render the full TUI frame.
fn render(frame: &mut Frame, view: &DashboardView, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + state
            Constraint::Length(3), // Stats
            Constraint::Min(5),    // Feed + projects
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    // Title
    let title = Paragraph::new(header_line(view)).block(
        Block::default()
            .title(" AGENTDASH ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, chunks[0]);

    // Stats
    let stat_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    let missing = agentdash_core::format::MISSING_STAT.to_string();
    let (projects, commits, loc) = match &view.stats {
        Some(s) => (s.projects.clone(), s.commits.clone(), s.loc.clone()),
        None => (missing.clone(), missing.clone(), missing),
    };
    for (i, (label, value)) in [
        (" Projects ", projects),
        (" Commits ", commits),
        (" Lines ", loc),
        (" Uptime ", view.uptime.clone()),
    ]
    .into_iter()
    .enumerate()
    {
        let widget = Paragraph::new(value)
            .bold()
            .block(Block::default().title(label).borders(Borders::ALL));
        frame.render_widget(widget, stat_cols[i]);
    }

    // Feed + projects
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let feed = List::new(feed_items(&view.feed))
        .block(Block::default().borders(Borders::ALL).title(" Activity "));
    frame.render_widget(feed, body[0]);

    let projects = List::new(project_items(view.projects.as_ref()))
        .block(Block::default().borders(Borders::ALL).title(" Projects "))
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default();
    if !cards(view).is_empty() {
        list_state.select(Some(app.selected));
    }
    frame.render_stateful_widget(projects, body[1], &mut list_state);

    // Footer
    let footer = Paragraph::new(footer_line(view, app))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
