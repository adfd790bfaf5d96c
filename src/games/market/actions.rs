//! Semantic action IDs for Market Runner click targets, plus the keyboard
//! letters that mirror list rows.

// ── Menus ───────────────────────────────────────────────────────
pub const MENU_PLAY: u16 = 1;
pub const MENU_MARKET: u16 = 2;
pub const MENU_SETTINGS: u16 = 3;
pub const BACK: u16 = 9;

// ── Level select (base + level id) ──────────────────────────────
pub const LEVEL_BASE: u16 = 100;

// ── Play ────────────────────────────────────────────────────────
pub const START_LEVEL: u16 = 200;
pub const CHECKOUT: u16 = 201;
pub const QUIT_LEVEL: u16 = 202;
pub const TILL_ADVANCE: u16 = 203;
pub const SHELF_TAB_BASE: u16 = 210;
pub const SHELF_ITEM_BASE: u16 = 230;
pub const ORDER_LINE_BASE: u16 = 260;

// ── Result / not found ──────────────────────────────────────────
pub const RESULT_NEXT: u16 = 300;
pub const RESULT_RETRY: u16 = 301;
pub const RESULT_LEVELS: u16 = 302;

// ── Settings ────────────────────────────────────────────────────
pub const TOGGLE_MUSIC: u16 = 400;
pub const TOGGLE_SFX: u16 = 401;
pub const RESET_PROGRESS: u16 = 402;

/// Row letters. `q` is missing: it always means back.
const ROW_KEYS: &[u8] = b"abcdefghijklmnoprstuvwxyz";

pub fn row_key(index: usize) -> Option<char> {
    ROW_KEYS.get(index).map(|&b| b as char)
}

pub fn row_index(key: char) -> Option<usize> {
    ROW_KEYS.iter().position(|&b| b as char == key)
}
