/// Market Runner: collect a customer's order from the shelves, ring it up
/// at the till, and grow the corner shop into a supermarket.

pub mod actions;
pub mod catalog;
pub mod checkout;
pub mod countdown;
pub mod levels;
pub mod logic;
pub mod order;
pub mod progress;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use save::{default_backend, KeyValueStore, ProgressStore};
use state::{MarketState, PlayPhase, Screen};

pub struct MarketGame {
    pub state: MarketState,
    store: ProgressStore,
}

impl MarketGame {
    pub fn new() -> Self {
        Self::with_backend(default_backend())
    }

    pub fn with_backend(backend: Box<dyn KeyValueStore>) -> Self {
        let mut store = ProgressStore::new(backend);
        let progress = store.load();
        Self {
            state: MarketState::new(progress),
            store,
        }
    }

    fn persist(&mut self) {
        if self.state.pending_wipe {
            self.state.pending_wipe = false;
            self.store.wipe();
            return;
        }
        self.store.save(&self.state.progress);
    }

    fn phase(&self) -> Option<PlayPhase> {
        self.state.play.as_ref().map(|p| p.phase)
    }

    fn handle_key(&mut self, key: char) -> bool {
        let screen = self.state.screen;
        match screen {
            Screen::MainMenu => match key {
                '1' => self.handle_click(MENU_PLAY),
                '2' => self.handle_click(MENU_MARKET),
                '3' => self.handle_click(MENU_SETTINGS),
                _ => false,
            },
            Screen::LevelSelect => match key {
                '-' | 'q' => self.handle_click(BACK),
                c => match row_index(c) {
                    Some(i) => self.handle_click(LEVEL_BASE + i as u16 + 1),
                    None => false,
                },
            },
            Screen::Market => match key {
                '-' | 'q' => self.handle_click(BACK),
                _ => false,
            },
            Screen::Settings => match key {
                '1' => self.handle_click(TOGGLE_MUSIC),
                '2' => self.handle_click(TOGGLE_SFX),
                '3' => self.handle_click(RESET_PROGRESS),
                '-' | 'q' => self.handle_click(BACK),
                _ => false,
            },
            Screen::Play => self.handle_play_key(key),
        }
    }

    fn handle_play_key(&mut self, key: char) -> bool {
        let Some(phase) = self.phase() else {
            return false;
        };
        match (phase, key) {
            (PlayPhase::Overview, '1') => self.handle_click(START_LEVEL),
            (PlayPhase::Overview, '-' | 'q') => self.handle_click(QUIT_LEVEL),

            (PlayPhase::Collect, '0') => self.handle_click(CHECKOUT),
            (PlayPhase::Collect, '-' | 'q') => self.handle_click(QUIT_LEVEL),
            (PlayPhase::Collect, '1'..='9') => {
                let index = (key as u8 - b'1') as u16;
                self.handle_click(SHELF_TAB_BASE + index)
            }
            (PlayPhase::Collect, c) => match row_index(c) {
                Some(i) => self.handle_click(SHELF_ITEM_BASE + i as u16),
                None => false,
            },

            (PlayPhase::Checkout, '1' | ' ') => self.handle_click(TILL_ADVANCE),

            (PlayPhase::Result, '1') => self.handle_click(RESULT_NEXT),
            (PlayPhase::Result, '2') => self.handle_click(RESULT_RETRY),
            (PlayPhase::Result, '3' | '-' | 'q') => self.handle_click(RESULT_LEVELS),

            (PlayPhase::NotFound, '1' | '-' | 'q') => self.handle_click(RESULT_LEVELS),
            _ => false,
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        let s = &mut self.state;
        match id {
            MENU_PLAY => {
                logic::open_screen(s, Screen::LevelSelect);
                true
            }
            MENU_MARKET => {
                logic::open_screen(s, Screen::Market);
                true
            }
            MENU_SETTINGS => {
                logic::open_screen(s, Screen::Settings);
                true
            }
            BACK => {
                logic::open_screen(s, Screen::MainMenu);
                true
            }
            TOGGLE_MUSIC => {
                logic::toggle_music(s);
                true
            }
            TOGGLE_SFX => {
                logic::toggle_sfx(s);
                true
            }
            RESET_PROGRESS => {
                logic::request_reset(s);
                true
            }
            START_LEVEL => logic::begin_collect(s),
            CHECKOUT => logic::request_checkout(s),
            QUIT_LEVEL | RESULT_LEVELS => {
                logic::quit_level(s);
                true
            }
            TILL_ADVANCE => logic::advance_checkout(s),
            RESULT_NEXT => logic::result_next(s),
            RESULT_RETRY => logic::result_retry(s),
            id if id > LEVEL_BASE && id < START_LEVEL => {
                // A refused locked level still shows its message.
                logic::select_level(s, (id - LEVEL_BASE) as u32);
                true
            }
            id if (SHELF_TAB_BASE..SHELF_ITEM_BASE).contains(&id) => {
                logic::select_shelf(s, (id - SHELF_TAB_BASE) as usize)
            }
            id if (SHELF_ITEM_BASE..ORDER_LINE_BASE).contains(&id) => {
                logic::pick_item(s, (id - SHELF_ITEM_BASE) as usize)
            }
            id if (ORDER_LINE_BASE..RESULT_NEXT).contains(&id) => {
                logic::locate_order_line(s, (id - ORDER_LINE_BASE) as usize)
            }
            _ => false,
        }
    }
}

impl Game for MarketGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match *event {
            InputEvent::Key(c) => self.handle_key(c),
            InputEvent::Click(id) => self.handle_click(id),
        };
        if consumed {
            self.persist();
        }
        consumed
    }

    fn tick(&mut self, delta_ticks: u32) {
        if logic::tick(&mut self.state, delta_ticks) {
            self.persist();
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
