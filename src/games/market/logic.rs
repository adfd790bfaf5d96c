//! Market Runner rules. Every function takes the state, applies one player
//! action, and reports whether anything changed.

use super::catalog::variant_name;
use super::checkout::{Checkout, CheckoutStep};
use super::levels::Reward;
use super::order::{shelf_for_key, CollectResult, RejectReason};
use super::progress::{self, LevelCompletion};
use super::state::{Feedback, MarketState, PlayPhase, PlaySession, Screen};

pub const TIME_UP: &str = "Time's up!";

// ── Navigation ─────────────────────────────────────────────────

pub fn open_screen(state: &mut MarketState, screen: Screen) {
    state.screen = screen;
    state.feedback = None;
    state.confirm_reset = false;
}

/// Start (or restart) a level. Locked levels are refused.
pub fn select_level(state: &mut MarketState, level_id: u32) -> bool {
    if !state.progress.is_unlocked(level_id) {
        state.feedback = Some(Feedback::error(format!("Level {} is still locked.", level_id)));
        return false;
    }

    let session = PlaySession::new(level_id);
    if session.level.is_some() {
        progress::start_level(&mut state.progress, level_id);
    } else {
        progress::reset_active_level(&mut state.progress);
    }
    state.play = Some(session);
    state.screen = Screen::Play;
    state.feedback = None;
    true
}

/// Leave the level without a result.
pub fn quit_level(state: &mut MarketState) {
    progress::reset_active_level(&mut state.progress);
    state.play = None;
    open_screen(state, Screen::LevelSelect);
}

// ── Collect ────────────────────────────────────────────────────

pub fn begin_collect(state: &mut MarketState) -> bool {
    let Some(play) = state.play.as_mut() else {
        return false;
    };
    if play.phase != PlayPhase::Overview {
        return false;
    }
    play.phase = PlayPhase::Collect;
    play.countdown.start();
    play.feedback = None;
    true
}

pub fn select_shelf(state: &mut MarketState, index: usize) -> bool {
    let Some(play) = collecting(state) else {
        return false;
    };
    if index >= play.shelves.len() {
        return false;
    }
    play.active_shelf = index;
    true
}

/// Take the `index`-th item of the active shelf.
pub fn pick_item(state: &mut MarketState, index: usize) -> bool {
    let Some(play) = collecting(state) else {
        return false;
    };
    let Some(variant) = play.shelf().and_then(|s| s.variants.get(index)) else {
        return false;
    };
    let key = variant.key;
    let name = variant.display_name.clone();

    play.feedback = Some(match play.order.try_collect(key) {
        CollectResult::Accepted { .. } if play.order.is_complete() => {
            play.countdown.pause();
            Feedback::success("Everything is in the basket! Head to the checkout.")
        }
        CollectResult::Accepted { remaining: 0 } => {
            Feedback::success(format!("{} added. That's all of those.", name))
        }
        CollectResult::Accepted { remaining } => {
            Feedback::success(format!("{} added, {} more to go.", name, remaining))
        }
        CollectResult::Rejected(RejectReason::NotInOrder) => {
            Feedback::error("That item is not on the order!")
        }
        CollectResult::Rejected(RejectReason::QuotaMet) => {
            Feedback::error("You already have enough of that!")
        }
    });
    true
}

/// Point the player at the shelf carrying an order line.
pub fn locate_order_line(state: &mut MarketState, line: usize) -> bool {
    let Some(play) = state.play.as_mut() else {
        return false;
    };
    match play.phase {
        PlayPhase::Overview => {
            play.feedback = Some(Feedback::info("Tap Start to begin shopping first."));
            true
        }
        PlayPhase::Collect => {
            let Some(key) = play.order.lines.get(line).map(|l| l.key) else {
                return false;
            };
            if let Some(idx) = shelf_for_key(&play.shelves, &key) {
                play.active_shelf = idx;
                play.feedback = Some(Feedback::info(format!(
                    "{} is on the {} shelf.",
                    variant_name(&key),
                    play.shelves[idx].title()
                )));
            }
            true
        }
        _ => false,
    }
}

// ── Checkout ───────────────────────────────────────────────────

pub fn request_checkout(state: &mut MarketState) -> bool {
    let Some(play) = state.play.as_mut() else {
        return false;
    };
    match play.phase {
        PlayPhase::Overview => {
            play.feedback = Some(Feedback::info("Tap Start to begin shopping first."));
            true
        }
        PlayPhase::Collect if !play.order.is_complete() => {
            play.feedback = Some(Feedback::error(format!(
                "Collect everything on the order first ({}/{}).",
                play.order.total_collected(),
                play.order.total_required()
            )));
            true
        }
        PlayPhase::Collect => {
            play.countdown.pause();
            play.checkout = Checkout::new(play.order.checkout_queue());
            play.phase = PlayPhase::Checkout;
            play.feedback = None;
            true
        }
        _ => false,
    }
}

/// One press at the till: scan or pack the next item.
pub fn advance_checkout(state: &mut MarketState) -> bool {
    let Some(play) = state.play.as_mut() else {
        return false;
    };
    if play.phase != PlayPhase::Checkout {
        return false;
    }

    match play.checkout.advance() {
        CheckoutStep::Scanned(key) => {
            play.feedback = Some(Feedback::info(format!("Beep! {} scanned.", variant_name(&key))));
        }
        CheckoutStep::ScanFinished(key) => {
            play.feedback = Some(Feedback::success(format!(
                "Beep! {} scanned. Now pack the box.",
                variant_name(&key)
            )));
        }
        CheckoutStep::Packed(key) => {
            play.feedback = Some(Feedback::info(format!("{} packed.", variant_name(&key))));
        }
        CheckoutStep::PackFinished => finish_level(state, true, None),
        CheckoutStep::Idle => return false,
    }
    true
}

// ── Level end ──────────────────────────────────────────────────

/// Record the result of the current level. Runs at most once per session.
pub fn finish_level(state: &mut MarketState, success: bool, reason: Option<&str>) {
    let Some(play) = state.play.as_mut() else {
        return;
    };
    if play.outcome.is_some() {
        return;
    }
    let reward = play.level.map_or(Reward { coins: 0, xp: 0 }, |l| l.reward);

    let outcome = progress::complete_level(
        &mut state.progress,
        LevelCompletion {
            level_id: play.level_id,
            coins_earned: reward.coins,
            xp_earned: reward.xp,
            success,
        },
    );
    play.countdown.pause();
    play.outcome = Some(outcome);
    play.failure_reason = reason.map(str::to_string);
    play.feedback = None;
    play.phase = PlayPhase::Result;
}

/// Advance the level clock. Returns `true` if the level just timed out.
pub fn tick(state: &mut MarketState, delta_ticks: u32) -> bool {
    if state.screen != Screen::Play {
        return false;
    }
    let expired = match state.play.as_mut() {
        Some(play) if play.phase == PlayPhase::Collect && !play.order.is_complete() => {
            play.countdown.tick(delta_ticks)
        }
        _ => false,
    };
    if expired {
        finish_level(state, false, Some(TIME_UP));
    }
    expired
}

pub fn result_next(state: &mut MarketState) -> bool {
    let Some(play) = state.play.as_ref() else {
        return false;
    };
    let Some(outcome) = play.outcome.as_ref() else {
        return false;
    };
    let next = play.level_id.saturating_add(1);
    if outcome.success && state.progress.is_unlocked(next) {
        select_level(state, next)
    } else {
        quit_level(state);
        true
    }
}

pub fn result_retry(state: &mut MarketState) -> bool {
    match state.play.as_ref() {
        Some(play) if play.outcome.is_some() => {
            let id = play.level_id;
            select_level(state, id)
        }
        _ => false,
    }
}

// ── Settings ───────────────────────────────────────────────────

pub fn toggle_music(state: &mut MarketState) {
    state.confirm_reset = false;
    progress::toggle_music(&mut state.progress);
}

pub fn toggle_sfx(state: &mut MarketState) {
    state.confirm_reset = false;
    progress::toggle_sfx(&mut state.progress);
}

/// First press arms, second press erases.
pub fn request_reset(state: &mut MarketState) {
    if !state.confirm_reset {
        state.confirm_reset = true;
        state.feedback = Some(Feedback::error("Press reset again to erase all progress."));
        return;
    }
    progress::reset_progress(&mut state.progress);
    state.confirm_reset = false;
    state.pending_wipe = true;
    state.play = None;
    state.feedback = Some(Feedback::info("Progress erased. Fresh start!"));
}

fn collecting(state: &mut MarketState) -> Option<&mut PlaySession> {
    state.play.as_mut().filter(|p| p.phase == PlayPhase::Collect)
}
