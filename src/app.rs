use crate::config::Config;
use crate::engine::problem::Difficulty;
use crate::generator::RandomProblemGenerator;
use crate::session::practice::PracticeSession;
use crate::session::result::SessionSummary;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Practice,
    Summary,
    Settings,
}

/// Difficulty, operation, hints, entry order, theme.
pub const SETTINGS_FIELD_COUNT: usize = 5;

pub struct App {
    pub screen: AppScreen,
    pub session: PracticeSession<RandomProblemGenerator>,
    pub theme: &'static Theme,
    pub config: Config,
    /// Last rejected action, cleared on the next key.
    pub message: Option<String>,
    pub settings_selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let generator = match config.seed {
            Some(seed) => RandomProblemGenerator::seeded(seed),
            None => RandomProblemGenerator::from_entropy(),
        };
        let session = PracticeSession::new(
            generator,
            config.difficulty,
            config.operation,
            config.entry_order,
        );

        tracing::info!(
            difficulty = config.difficulty.as_str(),
            operation = config.operation.as_str(),
            seed = ?config.seed,
            "session started"
        );

        Self {
            screen: AppScreen::Practice,
            session,
            theme,
            config,
            message: None,
            settings_selected: 0,
            should_quit: false,
        }
    }

    pub fn type_digit(&mut self, ch: char) {
        if let Err(err) = self.session.enter_digit(ch) {
            self.message = Some(err.to_string());
        }
    }

    pub fn backspace(&mut self) {
        self.session.backspace();
    }

    /// Enter submits the row, or moves on once a verdict is showing.
    pub fn submit_or_advance(&mut self) {
        if self.session.attempt.submitted {
            self.session.new_problem();
            return;
        }
        if let Err(err) = self.session.submit() {
            self.message = Some(err.to_string());
        }
    }

    pub fn new_problem(&mut self) {
        self.session.new_problem();
    }

    pub fn retry(&mut self) {
        self.session.retry();
    }

    pub fn toggle_hints(&mut self) {
        self.config.show_hints = !self.config.show_hints;
    }

    pub fn toggle_operation(&mut self) {
        self.config.operation = self.config.operation.toggle();
        self.session.set_operation(self.config.operation);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.session.set_difficulty(difficulty);
    }

    pub fn summary(&self) -> SessionSummary {
        self.session.summary()
    }

    pub fn go_to_practice(&mut self) {
        self.screen = AppScreen::Practice;
    }

    pub fn go_to_summary(&mut self) {
        self.screen = AppScreen::Summary;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    /// Pushes settings edits into the running session.
    pub fn apply_settings(&mut self) {
        self.session.set_entry_order(self.config.entry_order);
        self.session.set_difficulty(self.config.difficulty);
        self.session.set_operation(self.config.operation);
        self.screen = AppScreen::Practice;
    }

    pub fn settings_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Difficulty", self.config.difficulty.label().to_string()),
            ("Operation", self.config.operation.label().to_string()),
            (
                "Carry/Borrow Hints",
                if self.config.show_hints { "on" } else { "off" }.to_string(),
            ),
            ("Entry Order", self.config.entry_order.label().to_string()),
            ("Theme", self.config.theme.clone()),
        ]
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                let all = Difficulty::ALL;
                let idx = all
                    .iter()
                    .position(|&d| d == self.config.difficulty)
                    .unwrap_or(0);
                self.config.difficulty = all[(idx + 1) % all.len()];
            }
            1 => self.config.operation = self.config.operation.toggle(),
            2 => self.config.show_hints = !self.config.show_hints,
            3 => self.config.entry_order = self.config.entry_order.toggle(),
            4 => self.cycle_theme(true),
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                let all = Difficulty::ALL;
                let idx = all
                    .iter()
                    .position(|&d| d == self.config.difficulty)
                    .unwrap_or(0);
                let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
                self.config.difficulty = all[prev];
            }
            1 => self.config.operation = self.config.operation.toggle(),
            2 => self.config.show_hints = !self.config.show_hints,
            3 => self.config.entry_order = self.config.entry_order.toggle(),
            4 => self.cycle_theme(false),
            _ => {}
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let themes = Theme::available_themes();
        if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
            let next = if forward {
                (idx + 1) % themes.len()
            } else if idx == 0 {
                themes.len() - 1
            } else {
                idx - 1
            };
            self.config.theme = themes[next].clone();
        } else if let Some(first) = themes.first() {
            self.config.theme = first.clone();
        }
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::problem::Operation;
    use crate::session::attempt::EntryOrder;

    fn test_app() -> App {
        App::new(Config {
            seed: Some(42),
            ..Config::default()
        })
    }

    fn type_correct_answer(app: &mut App) {
        let answer = app.session.trace().correct_answer.to_string();
        // Ones-first entry: feed digits from the right.
        for ch in answer.chars().rev() {
            app.type_digit(ch);
        }
    }

    #[test]
    fn test_enter_submits_then_advances() {
        let mut app = test_app();
        type_correct_answer(&mut app);
        app.submit_or_advance();
        assert!(app.session.attempt.submitted);
        assert_eq!(app.session.stats.score_count, 1);

        app.submit_or_advance();
        assert!(!app.session.attempt.submitted);
        assert!(!app.session.attempt.has_input());
        assert_eq!(app.session.stats.attempt_count, 1);
    }

    #[test]
    fn test_empty_submit_sets_message() {
        let mut app = test_app();
        app.submit_or_advance();
        assert!(app.message.is_some());
        assert!(!app.session.attempt.submitted);
        assert_eq!(app.session.stats.attempt_count, 0);
    }

    #[test]
    fn test_non_digit_sets_message() {
        let mut app = test_app();
        app.type_digit('z');
        assert_eq!(app.message.as_deref(), Some("'z' is not a digit"));
    }

    #[test]
    fn test_toggle_operation_updates_config_and_session() {
        let mut app = test_app();
        app.toggle_operation();
        assert_eq!(app.config.operation, Operation::Subtraction);
        assert_eq!(app.session.problem().operation(), Operation::Subtraction);
    }

    #[test]
    fn test_settings_apply_on_leave() {
        let mut app = test_app();
        app.go_to_settings();
        app.settings_cycle_forward(); // 3-digit -> 4-digit
        app.settings_selected = 3;
        app.settings_cycle_forward();
        assert_eq!(app.session.difficulty, Difficulty::ThreeDigit);

        app.apply_settings();
        assert_eq!(app.screen, AppScreen::Practice);
        assert_eq!(app.session.difficulty, Difficulty::FourDigit);
        assert_eq!(app.session.entry_order, EntryOrder::LeftToRight);
    }

    #[test]
    fn test_settings_difficulty_wraps_backward() {
        let mut app = test_app();
        app.config.difficulty = Difficulty::TwoDigit;
        app.settings_cycle_backward();
        assert_eq!(app.config.difficulty, Difficulty::FourDigit);
    }

    #[test]
    fn test_theme_cycles_through_bundled() {
        let mut app = test_app();
        app.settings_selected = 4;
        let before = app.config.theme.clone();
        app.settings_cycle_forward();
        assert_ne!(app.config.theme, before);
        assert_eq!(app.theme.name, app.config.theme);
    }
}
