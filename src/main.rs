use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use athlete_tally::config::Settings;
use athlete_tally::matcher::{LeagueLabel, LeagueTally};
use athlete_tally::roster::{League, Roster, load_roster};
use athlete_tally::state::{AppState, FinalSummary, Focus, Report, TimerPhase};
use athlete_tally::summary_export::{SummaryInput, export_summary};
use athlete_tally::timer::{Countdown, MAX_LIMIT_MINUTES, format_remaining};

struct App {
    state: AppState,
    roster: Roster,
    settings: Settings,
    should_quit: bool,
}

impl App {
    fn new(roster: Roster, settings: Settings) -> Self {
        let mut state = AppState::new(Countdown::new(settings.timer_minutes));
        state.push_log(format!(
            "[INFO] Loaded {} athletes from {}",
            roster.len(),
            settings.roster_path.display()
        ));
        Self {
            state,
            roster,
            settings,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }
        match self.state.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => {
                    self.state.submit_input();
                }
                KeyCode::Backspace => {
                    self.state.input.pop();
                }
                KeyCode::Tab | KeyCode::Esc => self.state.toggle_focus(),
                KeyCode::Char(c) => self.state.input.push(c),
                _ => {}
            },
            Focus::Timer => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Tab | KeyCode::Esc | KeyCode::Char('i') => self.state.toggle_focus(),
                KeyCode::Char('-') | KeyCode::Left => self.state.countdown.step_limit(-1),
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                    self.state.countdown.step_limit(1)
                }
                KeyCode::Char('[') => self.state.countdown.step_limit(-10),
                KeyCode::Char(']') => self.state.countdown.step_limit(10),
                KeyCode::Char('s') | KeyCode::Enter => self.state.start_timer(Local::now()),
                KeyCode::Char('?') => self.state.help_overlay = true,
                _ => {}
            },
        }
    }

    fn on_tick(&mut self) {
        if !self.state.tick(Local::now(), &self.roster) {
            return;
        }
        let Some(FinalSummary {
            time_limit_minutes,
            report: Some(report),
        }) = self.state.final_summary.clone()
        else {
            self.state.push_log("[INFO] No data to create summary");
            return;
        };
        let path = self.settings.summary_path.clone();
        let input = SummaryInput {
            time_limit_minutes,
            report: &report,
        };
        match export_summary(&path, &input) {
            Ok(done) => {
                self.state.export.path = Some(path.display().to_string());
                self.state.export.message = format!(
                    "{} athletes, {} leagues",
                    done.athletes, done.leagues
                );
                self.state
                    .push_log(format!("[INFO] Summary written to {}", path.display()));
            }
            Err(err) => {
                self.state.export.message = err.to_string();
                self.state.push_log(format!("[WARN] Summary export failed: {err}"));
            }
        }
    }
}

fn main() -> Result<()> {
    let settings = Settings::load();
    let roster = load_roster(&settings.roster_path)
        .with_context(|| format!("unable to load roster {}", settings.roster_path.display()))?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("failed to create terminal backend")?;

    let mut app = App::new(roster, settings);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        app.on_tick();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let report = app.state.report(&app.roster);

    let header = Paragraph::new(header_text(&app.state, report.as_ref()))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[1]);

    render_main(frame, columns[0], app, report.as_ref());
    render_side(frame, columns[1], app);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState, report: Option<&Report>) -> String {
    let line1 = "  ATHLETE TALLY".to_string();
    let line2 = match report {
        Some(r) => format!(
            "  Total athletes entered: {} | We could verify {}, or {}% athletes in the list",
            r.total,
            r.classification.verified.len(),
            r.percent_verified
        ),
        None => format!("  Total athletes entered: {}", state.entries.len()),
    };
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    match state.focus {
        Focus::Input => "Enter Add | Backspace Delete | Tab Timer | Ctrl+C Quit".to_string(),
        Focus::Timer => {
            "-/+ Minute | [/] 10 Minutes | s Start | Tab Input | ? Help | q Quit".to_string()
        }
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn render_main(frame: &mut Frame, area: Rect, app: &App, report: Option<&Report>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(9),
        ])
        .split(area);

    let entered = Paragraph::new(entered_text(&app.state))
        .block(Block::default().title("Entered Athletes").borders(Borders::ALL));
    frame.render_widget(entered, rows[0]);

    let input = Paragraph::new(format!("{}_", app.state.input)).block(focused_block(
        "Enter an athlete's name",
        app.state.focus == Focus::Input,
    ));
    frame.render_widget(input, rows[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let verified = Paragraph::new(verified_text(report))
        .block(Block::default().title("Verified athletes").borders(Borders::ALL));
    frame.render_widget(verified, lists[0]);

    let unverified = Paragraph::new(unverified_text(report))
        .block(Block::default().title("Unverified athletes").borders(Borders::ALL));
    frame.render_widget(unverified, lists[1]);

    let chart_block = Block::default()
        .title("Athlete Counts by League")
        .borders(Borders::ALL);
    match report {
        Some(r) => frame.render_widget(league_bar_chart(&r.tally).block(chart_block), rows[3]),
        None => {
            let empty = Paragraph::new("No athletes entered yet")
                .style(Style::default().fg(Color::DarkGray))
                .block(chart_block);
            frame.render_widget(empty, rows[3]);
        }
    }
}

fn entered_text(state: &AppState) -> String {
    if state.entries.is_empty() {
        return "Type a name below and press Enter".to_string();
    }
    state
        .entries
        .as_slice()
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("{}. {name}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn verified_text(report: Option<&Report>) -> String {
    let Some(report) = report else {
        return String::new();
    };
    report
        .classification
        .verified
        .iter()
        .map(|name| format!("{:<6} {}", name.league.label(), name.input_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unverified_text(report: Option<&Report>) -> String {
    let Some(report) = report else {
        return String::new();
    };
    report
        .classification
        .unverified
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("{}. {}", idx + 1, name.input_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn league_color(label: LeagueLabel) -> Color {
    match label {
        LeagueLabel::League(League::Nfl) => Color::Blue,
        LeagueLabel::League(League::Nba) => Color::Red,
        LeagueLabel::League(League::Mlb) => Color::Green,
        LeagueLabel::League(League::Wnba) => Color::Magenta,
        LeagueLabel::Unverified => Color::Gray,
    }
}

fn league_bar_chart(tally: &LeagueTally) -> BarChart<'static> {
    let bars = tally
        .sorted_desc()
        .into_iter()
        .map(|(label, count)| {
            Bar::default()
                .value(count as u64)
                .label(Line::from(label.label()))
                .style(Style::default().fg(league_color(label)))
                .value_style(Style::default().fg(Color::Black).bg(league_color(label)))
        })
        .collect::<Vec<_>>();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(0)
}

fn render_side(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(6),
            Constraint::Length(6),
        ])
        .split(area);

    let timer = Paragraph::new(timer_text(&app.state))
        .block(focused_block("Timer", app.state.focus == Focus::Timer));
    frame.render_widget(timer, rows[0]);

    let summary = Paragraph::new(summary_text(&app.state))
        .block(Block::default().title("Final Summary").borders(Borders::ALL));
    frame.render_widget(summary, rows[1]);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[2]);
}

fn timer_text(state: &AppState) -> Text<'static> {
    let now = Local::now();
    let minutes = state.countdown.limit_minutes;
    let slider = slider_line(minutes, 16);
    let status_style = Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD);
    let status = match state.timer_phase(now) {
        TimerPhase::Idle => Line::from("Press s to start"),
        TimerPhase::Running => {
            let left = state
                .countdown
                .remaining(now)
                .unwrap_or_else(chrono::Duration::zero);
            Line::styled(format!("Time remaining: {}", format_remaining(left)), status_style)
        }
        TimerPhase::Expired => Line::styled("Time's up!", status_style),
    };
    Text::from(vec![
        Line::from(format!("Set Timer (minutes): {minutes}")),
        Line::from(slider),
        Line::from(""),
        status,
    ])
}

fn slider_line(minutes: u32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = (minutes as usize * width) / MAX_LIMIT_MINUTES as usize;
    let mut line = String::with_capacity(width + 2);
    line.push('[');
    for i in 0..width {
        line.push(if i < filled { '=' } else { ' ' });
    }
    line.push(']');
    line
}

fn summary_text(state: &AppState) -> String {
    let Some(summary) = &state.final_summary else {
        return "Revealed when the timer runs out".to_string();
    };
    let Some(report) = &summary.report else {
        return "No data to create summary".to_string();
    };
    let mut lines = vec![
        format!("Time Limit: {} minutes", summary.time_limit_minutes),
        format!("Total Athletes: {}", report.total),
        String::new(),
    ];
    for (label, count) in report.tally.sorted_desc() {
        lines.push(format!("{:<10} {count}", label.label()));
    }
    if let Some(path) = &state.export.path {
        lines.push(String::new());
        lines.push(format!("Saved: {path}"));
    } else if !state.export.message.is_empty() {
        lines.push(String::new());
        lines.push(format!("Export failed: {}", state.export.message));
    }
    lines.join("\n")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(4)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Athlete Tally - Help",
        "",
        "Input panel:",
        "  type         Athlete name",
        "  Enter        Add to the list",
        "  Backspace    Delete a character",
        "  Tab / Esc    Timer panel",
        "",
        "Timer panel:",
        "  - / +        Adjust by one minute",
        "  [ / ]        Adjust by ten minutes",
        "  s / Enter    Start or restart",
        "  Tab / i      Input panel",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Ctrl+C quits from anywhere.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
