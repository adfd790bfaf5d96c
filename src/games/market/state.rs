//! Market Runner state. Pure data; rules live in `logic.rs`.

use super::catalog::{mode_for_level, shelves_for_mode, GameMode, Shelf};
use super::checkout::Checkout;
use super::countdown::Countdown;
use super::levels::{level_by_id, LevelConfig};
use super::order::OrderSheet;
use super::progress::{CompletionOutcome, ProgressRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    LevelSelect,
    /// "My Market": upgrade tiers.
    Market,
    Settings,
    Play,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayPhase {
    /// Order card, before the clock starts.
    Overview,
    Collect,
    Checkout,
    Result,
    /// The requested level has no definition.
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Error }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Info }
    }
}

/// One attempt at one level.
pub struct PlaySession {
    pub level_id: u32,
    pub level: Option<&'static LevelConfig>,
    pub mode: GameMode,
    pub phase: PlayPhase,
    pub order: OrderSheet,
    pub shelves: Vec<Shelf>,
    pub active_shelf: usize,
    pub countdown: Countdown,
    pub checkout: Checkout,
    /// Set once when the level ends.
    pub outcome: Option<CompletionOutcome>,
    pub failure_reason: Option<String>,
    pub feedback: Option<Feedback>,
}

impl PlaySession {
    pub fn new(level_id: u32) -> Self {
        let level = level_by_id(level_id);
        let mode = mode_for_level(level_id);
        let shelves = shelves_for_mode(mode);
        let order = level.map(|l| OrderSheet::from_items(l.items)).unwrap_or_default();
        let active_shelf = order.default_shelf_index(&shelves);

        Self {
            level_id,
            level,
            mode,
            phase: if level.is_some() { PlayPhase::Overview } else { PlayPhase::NotFound },
            order,
            shelves,
            active_shelf,
            countdown: Countdown::new(level.and_then(|l| l.time_limit)),
            checkout: Checkout::new(Vec::new()),
            outcome: None,
            failure_reason: None,
            feedback: None,
        }
    }

    pub fn shelf(&self) -> Option<&Shelf> {
        self.shelves.get(self.active_shelf)
    }
}

pub struct MarketState {
    pub progress: ProgressRecord,
    pub screen: Screen,
    pub play: Option<PlaySession>,
    /// Message line for the menu screens.
    pub feedback: Option<Feedback>,
    /// Settings: the next reset press erases progress.
    pub confirm_reset: bool,
    /// Progress was reset; the stored copy should be removed.
    pub pending_wipe: bool,
}

impl MarketState {
    pub fn new(progress: ProgressRecord) -> Self {
        Self {
            progress,
            screen: Screen::MainMenu,
            play: None,
            feedback: None,
            confirm_reset: false,
            pending_wipe: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::market::catalog::Category;

    #[test]
    fn new_session_opens_on_order_card() {
        let s = PlaySession::new(1);
        assert_eq!(s.phase, PlayPhase::Overview);
        assert_eq!(s.mode, GameMode::Bakkal);
        assert_eq!(s.order.total_required(), 2);
        assert_eq!(s.shelf().map(|sh| sh.category), Some(Category::Dairy));
        assert_eq!(s.countdown.limit, None);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn unknown_level_is_not_found() {
        let s = PlaySession::new(21);
        assert_eq!(s.phase, PlayPhase::NotFound);
        assert!(s.level.is_none());
        assert!(s.order.lines.is_empty());
        assert_eq!(s.mode, GameMode::Market);
    }

    #[test]
    fn timed_level_gets_its_clock() {
        let s = PlaySession::new(3);
        assert_eq!(s.countdown.limit, Some(120));
        assert!(!s.countdown.is_running());
    }

    #[test]
    fn state_starts_on_main_menu() {
        let st = MarketState::new(ProgressRecord::default());
        assert_eq!(st.screen, Screen::MainMenu);
        assert!(st.play.is_none());
        assert!(!st.confirm_reset);
    }
}
