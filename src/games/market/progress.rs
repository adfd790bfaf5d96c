//! Player progress: coins, XP, market level, unlocked and completed levels.
//!
//! All mutation goes through the reducer functions here. They never fail;
//! the caller persists the record afterwards.

use std::collections::BTreeSet;

use super::catalog::{mode_for_level, GameMode};

/// XP needed to leave each market level, indexed by level.
pub const XP_THRESHOLDS: [u32; 8] = [0, 100, 250, 450, 700, 1000, 1300, 1650];

/// Extra XP per market level past the end of [`XP_THRESHOLDS`].
pub const XP_STEP_BEYOND_TABLE: u32 = 250;

const LAST_TABULATED: u32 = XP_THRESHOLDS.len() as u32 - 1;

/// XP at which market level `level` is left behind (and `level + 1` reached).
pub fn xp_threshold(level: u32) -> u32 {
    if level <= LAST_TABULATED {
        return XP_THRESHOLDS[level as usize];
    }
    XP_THRESHOLDS[LAST_TABULATED as usize]
        .saturating_add((level - LAST_TABULATED).saturating_mul(XP_STEP_BEYOND_TABLE))
}

/// Highest market level. Its threshold saturates at `u32::MAX`, so XP that
/// saturates there cannot move past it.
pub const MAX_MARKET_LEVEL: u32 = LAST_TABULATED
    + 1
    + (u32::MAX - XP_THRESHOLDS[LAST_TABULATED as usize]) / XP_STEP_BEYOND_TABLE;

/// Largest market level whose entry threshold `xp` has reached.
pub(super) fn market_level_for_xp(xp: u32) -> u32 {
    let last = XP_THRESHOLDS[LAST_TABULATED as usize];
    if xp >= last {
        let level = (LAST_TABULATED + 1).saturating_add((xp - last) / XP_STEP_BEYOND_TABLE);
        return level.min(MAX_MARKET_LEVEL);
    }
    // Level L is entered at threshold(L - 1).
    XP_THRESHOLDS.iter().take_while(|&&t| xp >= t).count() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioSettings {
    pub music: bool,
    pub sfx: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { music: true, sfx: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressRecord {
    pub coins: u32,
    pub xp: u32,
    pub market_level: u32,
    pub unlocked_levels: BTreeSet<u32>,
    pub completed_levels: BTreeSet<u32>,
    pub audio: AudioSettings,
    /// Session-only: the level being played.
    pub active_level: Option<u32>,
    /// Session-only: shelf assortment for the active level.
    pub game_mode: Option<GameMode>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            coins: 0,
            xp: 0,
            market_level: 1,
            unlocked_levels: BTreeSet::from([1]),
            completed_levels: BTreeSet::new(),
            audio: AudioSettings::default(),
            active_level: None,
            game_mode: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStatus {
    Locked,
    Open,
    Completed,
}

impl ProgressRecord {
    pub fn is_unlocked(&self, level_id: u32) -> bool {
        self.unlocked_levels.contains(&level_id)
    }

    pub fn level_status(&self, level_id: u32) -> LevelStatus {
        if self.completed_levels.contains(&level_id) {
            LevelStatus::Completed
        } else if self.is_unlocked(level_id) {
            LevelStatus::Open
        } else {
            LevelStatus::Locked
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCompletion {
    pub level_id: u32,
    pub coins_earned: u32,
    pub xp_earned: u32,
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionOutcome {
    pub level_id: u32,
    pub success: bool,
    pub coins_earned: u32,
    pub xp_earned: u32,
    pub total_coins: u32,
    pub total_xp: u32,
    pub market_level: u32,
    pub leveled_up: bool,
    pub levels_gained: u32,
    /// Ascending.
    pub unlocked_levels: Vec<u32>,
}

/// Apply a finished level. Failure changes nothing but the session pointer.
pub fn complete_level(record: &mut ProgressRecord, completion: LevelCompletion) -> CompletionOutcome {
    let before_level = record.market_level;
    let (coins_earned, xp_earned) = if completion.success {
        (completion.coins_earned, completion.xp_earned)
    } else {
        (0, 0)
    };

    if completion.success {
        let id = completion.level_id;
        record.coins = record.coins.saturating_add(coins_earned);
        record.xp = record.xp.saturating_add(xp_earned);
        record.unlocked_levels.insert(id);
        record.unlocked_levels.insert(id.saturating_add(1));
        record.completed_levels.insert(id);
        record.market_level = record.market_level.max(market_level_for_xp(record.xp));
    }

    reset_active_level(record);

    let levels_gained = record.market_level - before_level;
    CompletionOutcome {
        level_id: completion.level_id,
        success: completion.success,
        coins_earned,
        xp_earned,
        total_coins: record.coins,
        total_xp: record.xp,
        market_level: record.market_level,
        leveled_up: levels_gained > 0,
        levels_gained,
        unlocked_levels: record.unlocked_levels.iter().copied().collect(),
    }
}

pub fn start_level(record: &mut ProgressRecord, level_id: u32) {
    record.active_level = Some(level_id);
    record.game_mode = Some(mode_for_level(level_id));
}

pub fn reset_active_level(record: &mut ProgressRecord) {
    record.active_level = None;
    record.game_mode = None;
}

pub fn next_xp_threshold(record: &ProgressRecord) -> u32 {
    xp_threshold(record.market_level)
}

/// Fraction of the way from the current level's entry XP to the next
/// threshold, in `0.0..=1.0`.
pub fn xp_progress(record: &ProgressRecord) -> f64 {
    let level = record.market_level;
    let prev = if level > 1 { xp_threshold(level - 1) } else { 0 };
    let next = xp_threshold(level);
    if next <= prev {
        return 1.0;
    }
    let into = record.xp.saturating_sub(prev) as f64;
    (into / (next - prev) as f64).clamp(0.0, 1.0)
}

pub fn toggle_music(record: &mut ProgressRecord) {
    record.audio.music = !record.audio.music;
}

pub fn toggle_sfx(record: &mut ProgressRecord) {
    record.audio.sfx = !record.audio.sfx;
}

pub fn reset_progress(record: &mut ProgressRecord) {
    *record = ProgressRecord::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(level_id: u32, coins: u32, xp: u32) -> LevelCompletion {
        LevelCompletion { level_id, coins_earned: coins, xp_earned: xp, success: true }
    }

    fn lose(level_id: u32, coins: u32, xp: u32) -> LevelCompletion {
        LevelCompletion { level_id, coins_earned: coins, xp_earned: xp, success: false }
    }

    #[test]
    fn fresh_record() {
        let r = ProgressRecord::default();
        assert_eq!(r.market_level, 1);
        assert!(r.is_unlocked(1));
        assert!(!r.is_unlocked(2));
        assert_eq!(r.level_status(1), LevelStatus::Open);
        assert_eq!(r.level_status(2), LevelStatus::Locked);
        assert!(r.audio.music && r.audio.sfx);
    }

    #[test]
    fn thresholds_table_then_linear() {
        assert_eq!(xp_threshold(0), 0);
        assert_eq!(xp_threshold(1), 100);
        assert_eq!(xp_threshold(7), 1650);
        assert_eq!(xp_threshold(8), 1900);
        assert_eq!(xp_threshold(10), 2400);
        assert_eq!(xp_threshold(u32::MAX), u32::MAX);
    }

    #[test]
    fn market_level_stops_at_the_saturated_threshold() {
        assert_eq!(market_level_for_xp(u32::MAX), MAX_MARKET_LEVEL);
        assert_eq!(xp_threshold(MAX_MARKET_LEVEL), u32::MAX);
        assert!(xp_threshold(MAX_MARKET_LEVEL - 1) < u32::MAX);

        let xp = u32::MAX - 1;
        let level = market_level_for_xp(xp);
        assert!(xp < xp_threshold(level));
        assert!(xp >= xp_threshold(level - 1));
    }

    #[test]
    fn level_for_xp_matches_thresholds() {
        assert_eq!(market_level_for_xp(0), 1);
        assert_eq!(market_level_for_xp(99), 1);
        assert_eq!(market_level_for_xp(100), 2);
        assert_eq!(market_level_for_xp(1649), 7);
        assert_eq!(market_level_for_xp(1650), 8);
        assert_eq!(market_level_for_xp(1899), 8);
        assert_eq!(market_level_for_xp(1900), 9);
        for level in 1..40 {
            let entry = if level == 1 { 0 } else { xp_threshold(level - 1) };
            assert_eq!(market_level_for_xp(entry), level);
            assert_eq!(market_level_for_xp(xp_threshold(level) - 1), level);
        }
    }

    #[test]
    fn first_level_rewards() {
        let mut r = ProgressRecord::default();
        let out = complete_level(&mut r, win(1, 15, 20));
        assert_eq!(r.coins, 15);
        assert_eq!(r.xp, 20);
        assert!(r.is_unlocked(1) && r.is_unlocked(2));
        assert!(r.completed_levels.contains(&1));
        assert_eq!(out.unlocked_levels, vec![1, 2]);
        assert!(!out.leveled_up);
        assert_eq!(out.levels_gained, 0);
        assert_eq!(r.level_status(1), LevelStatus::Completed);
    }

    #[test]
    fn hundred_xp_reaches_level_two() {
        let mut r = ProgressRecord::default();
        let out = complete_level(&mut r, win(1, 0, 100));
        assert_eq!(out.market_level, 2);
        assert!(out.leveled_up);
        assert_eq!(out.levels_gained, 1);
    }

    #[test]
    fn big_award_crosses_several_thresholds() {
        let mut r = ProgressRecord::default();
        let out = complete_level(&mut r, win(3, 0, 1700));
        assert_eq!(out.market_level, 8);
        assert!(out.leveled_up);
        assert_eq!(out.levels_gained, 7);
    }

    #[test]
    fn stepping_through_each_threshold_levels_up_each_time() {
        let mut r = ProgressRecord::default();
        let mut prev = 0;
        for (i, &t) in XP_THRESHOLDS.iter().enumerate().skip(1) {
            let out = complete_level(&mut r, win(1, 0, t - prev));
            prev = t;
            assert_eq!(out.market_level, i as u32 + 1);
            assert_eq!(out.levels_gained, 1);
        }
    }

    #[test]
    fn failure_reports_zero_and_changes_nothing() {
        let mut r = ProgressRecord::default();
        complete_level(&mut r, win(1, 15, 20));
        start_level(&mut r, 2);
        let before = r.clone();

        let out = complete_level(&mut r, lose(2, 999, 999));
        assert!(!out.success);
        assert_eq!(out.coins_earned, 0);
        assert_eq!(out.xp_earned, 0);
        assert_eq!(out.total_coins, before.coins);
        assert_eq!(r.completed_levels, before.completed_levels);
        assert_eq!(r.unlocked_levels, before.unlocked_levels);
        assert_eq!(r.active_level, None);
        assert_eq!(r.game_mode, None);
    }

    #[test]
    fn totals_saturate() {
        let mut r = ProgressRecord { coins: u32::MAX - 1, xp: u32::MAX - 1, ..Default::default() };
        let out = complete_level(&mut r, win(5, 10, 10));
        assert_eq!(out.total_coins, u32::MAX);
        assert_eq!(out.total_xp, u32::MAX);
        assert!(out.market_level > 8);
    }

    #[test]
    fn completing_last_id_does_not_overflow() {
        let mut r = ProgressRecord::default();
        complete_level(&mut r, win(u32::MAX, 0, 0));
        assert!(r.is_unlocked(u32::MAX));
    }

    #[test]
    fn start_and_reset_active_level() {
        let mut r = ProgressRecord::default();
        start_level(&mut r, 25);
        assert_eq!(r.active_level, Some(25));
        assert_eq!(r.game_mode, Some(GameMode::Market));
        reset_active_level(&mut r);
        assert_eq!(r.active_level, None);
        assert_eq!(r.game_mode, None);
    }

    #[test]
    fn xp_bar() {
        let mut r = ProgressRecord::default();
        assert_eq!(next_xp_threshold(&r), 100);
        assert_eq!(xp_progress(&r), 0.0);

        r.xp = 50;
        assert!((xp_progress(&r) - 0.5).abs() < 1e-9);

        r.xp = 175;
        r.market_level = 2;
        assert_eq!(next_xp_threshold(&r), 250);
        assert!((xp_progress(&r) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn audio_toggles() {
        let mut r = ProgressRecord::default();
        toggle_music(&mut r);
        assert!(!r.audio.music);
        assert!(r.audio.sfx);
        toggle_sfx(&mut r);
        toggle_music(&mut r);
        assert!(r.audio.music);
        assert!(!r.audio.sfx);
    }

    #[test]
    fn reset_restores_default() {
        let mut r = ProgressRecord::default();
        complete_level(&mut r, win(1, 15, 200));
        toggle_sfx(&mut r);
        reset_progress(&mut r);
        assert_eq!(r, ProgressRecord::default());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_completion() -> impl Strategy<Value = LevelCompletion> {
        (1u32..60, 0u32..500, 0u32..2_000, any::<bool>()).prop_map(
            |(level_id, coins_earned, xp_earned, success)| LevelCompletion {
                level_id,
                coins_earned,
                xp_earned,
                success,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_progress_never_goes_backwards(events in prop::collection::vec(arb_completion(), 0..30)) {
            let mut r = ProgressRecord::default();
            for event in events {
                let before = r.clone();
                complete_level(&mut r, event);
                prop_assert!(r.coins >= before.coins);
                prop_assert!(r.xp >= before.xp);
                prop_assert!(r.market_level >= before.market_level);
                prop_assert!(r.unlocked_levels.is_superset(&before.unlocked_levels));
                prop_assert!(r.completed_levels.is_superset(&before.completed_levels));
                prop_assert!(r.is_unlocked(1));
            }
        }

        #[test]
        fn prop_failure_is_a_no_op(
            warmup in prop::collection::vec(arb_completion(), 0..10),
            level_id in 1u32..60,
            coins in any::<u32>(),
            xp in any::<u32>(),
        ) {
            let mut r = ProgressRecord::default();
            for event in warmup {
                complete_level(&mut r, event);
            }
            let before = r.clone();
            let out = complete_level(&mut r, LevelCompletion {
                level_id,
                coins_earned: coins,
                xp_earned: xp,
                success: false,
            });
            prop_assert_eq!(&r, &before);
            prop_assert!(!out.leveled_up);
            prop_assert_eq!(out.coins_earned, 0);
        }

        #[test]
        fn prop_success_unlocks_neighbour(event in arb_completion()) {
            let mut r = ProgressRecord::default();
            let out = complete_level(&mut r, LevelCompletion { success: true, ..event });
            prop_assert!(r.is_unlocked(event.level_id));
            prop_assert!(r.is_unlocked(event.level_id + 1));
            prop_assert!(out.unlocked_levels.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_market_level_matches_xp(xp in 0u32..100_000) {
            let mut r = ProgressRecord::default();
            complete_level(&mut r, LevelCompletion {
                level_id: 1,
                coins_earned: 0,
                xp_earned: xp,
                success: true,
            });
            let level = r.market_level;
            let entry = if level > 1 { xp_threshold(level - 1) } else { 0 };
            prop_assert!(xp >= entry);
            prop_assert!(xp < xp_threshold(level));
        }

        #[test]
        fn prop_xp_progress_in_unit_range(xp in any::<u32>(), level in 1u32..50) {
            let r = ProgressRecord { xp, market_level: level, ..Default::default() };
            let p = xp_progress(&r);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
