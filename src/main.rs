use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use regroup::app::{App, AppScreen, SETTINGS_FIELD_COUNT};
use regroup::config::Config;
use regroup::engine::problem::{Difficulty, Operation};
use regroup::event::{AppEvent, EventHandler};
use regroup::ui;
use regroup::ui::components::dashboard::Dashboard;
use regroup::ui::components::problem_area::ProblemArea;
use regroup::ui::components::stats_sidebar::StatsSidebar;
use regroup::ui::components::tips::TipsPanel;
use regroup::ui::layout::{AppLayout, pack_hint_lines};
use regroup::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "regroup",
    version,
    about = "Terminal tutor for addition and subtraction with regrouping"
)]
struct Cli {
    #[arg(short, long, help = "Digits per operand (2, 3 or 4)")]
    difficulty: Option<u32>,

    #[arg(short, long, value_enum, help = "Operation to practice")]
    operation: Option<Operation>,

    #[arg(long, help = "Show carry and borrow marks above the columns")]
    hints: bool,

    #[arg(long, help = "Seed for a reproducible problem sequence")]
    seed: Option<u64>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Print the session summary as JSON on exit")]
    summary_json: bool,
}

/// Logs go to `<data_dir>/regroup/regroup.log`; the terminal belongs to the UI.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("regroup")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("regroup.log"))
    else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::default()
    });

    if let Some(digits) = cli.difficulty {
        config.difficulty = Difficulty::try_from(digits)?;
    }
    if let Some(op) = cli.operation {
        config.operation = op;
    }
    if cli.hints {
        config.show_hints = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if Theme::load(&config.theme).is_none() {
        config.validate(&Theme::available_themes());
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(&cli)?;
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let summary = app.summary();
    tracing::info!(
        score = summary.stats.score_count,
        attempts = summary.stats.attempt_count,
        best_streak = summary.stats.best_streak,
        "session ended"
    );

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.message = None;

    match app.screen {
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit_or_advance(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Left => app.session.cursor_left(),
        KeyCode::Right => app.session.cursor_right(),
        KeyCode::Char('n') => app.new_problem(),
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char('h') => app.toggle_hints(),
        KeyCode::Char('o') => app.toggle_operation(),
        KeyCode::Char('[') => app.set_difficulty(app.config.difficulty.easier()),
        KeyCode::Char(']') => app.set_difficulty(app.config.difficulty.harder()),
        KeyCode::Char('s') => app.go_to_summary(),
        KeyCode::Char('c') => app.go_to_settings(),
        // Everything else goes through digit validation so the user sees why it was refused.
        KeyCode::Char(ch) => app.type_digit(ch),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('s') => app.go_to_practice(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            if let Err(err) = app.config.save() {
                tracing::warn!(%err, "failed to save config");
            }
            app.apply_settings();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELD_COUNT {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Summary => render_summary(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let session = &app.session;

    let hints: &[&str] = if session.attempt.submitted {
        &[
            "[Enter] Next",
            "[r] Retry",
            "[h] Hints",
            "[o] Operation",
            "[[/]] Difficulty",
            "[s] Summary",
            "[c] Settings",
            "[q] Quit",
        ]
    } else {
        &[
            "[0-9] Digit",
            "[Enter] Check",
            "[Bksp] Delete",
            "[\u{2190}/\u{2192}] Move",
            "[n] New",
            "[h] Hints",
            "[o] Operation",
            "[[/]] Difficulty",
            "[s] Summary",
            "[c] Settings",
            "[q] Quit",
        ]
    };
    let footer_lines = pack_hint_lines(hints, area.width as usize);
    let app_layout = AppLayout::new(area, footer_lines.len() as u16);
    let tier = app_layout.tier;

    let title = format!(
        " {} {} Practice ",
        app.config.difficulty.label(),
        app.config.operation.label()
    );
    let info = if tier.show_sidebar() {
        String::new()
    } else {
        format!(
            " Score {}/{} | Streak {} ",
            session.stats.score_count, session.stats.attempt_count, session.stats.current_streak
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let show_tips = tier.show_tips(area.height);
    let mut constraints = vec![Constraint::Min(10)];
    if show_tips {
        constraints.push(Constraint::Length(7));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let problem_area = ProblemArea::new(
        session.problem(),
        session.trace(),
        &session.attempt,
        app.config.show_hints,
        app.theme,
    )
    .message(app.message.as_deref());
    frame.render_widget(problem_area, main_layout[0]);

    if show_tips {
        frame.render_widget(
            TipsPanel::new(session.problem().operation(), app.theme),
            main_layout[1],
        );
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(&session.stats, session.history.back(), app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    let footer = Paragraph::new(
        footer_lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, app_layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let summary = app.summary();
    let centered = ui::layout::centered_rect(60, 80, area);
    frame.render_widget(Dashboard::new(&summary, app.theme), centered);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields = app.settings_fields();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.hint()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
