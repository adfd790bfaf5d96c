//! Market Runner rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{panel_borders, ClickableList, TabBar};

use super::actions::*;
use super::catalog::variant_name;
use super::checkout::CheckoutStage;
use super::levels::{levels_by_customer, CustomerType, UpgradeTier, LEVELS, UPGRADE_TIERS};
use super::progress::{next_xp_threshold, xp_progress, LevelStatus, ProgressRecord};
use super::state::{Feedback, MarketState, PlayPhase, PlaySession, Screen, Tone};

pub fn render(
    state: &MarketState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match (state.screen, state.play.as_ref()) {
        (Screen::MainMenu, _) => render_main_menu(state, f, area, click_state),
        (Screen::LevelSelect, _) => render_level_select(state, f, area, click_state),
        (Screen::Market, _) => render_my_market(state, f, area, click_state),
        (Screen::Settings, _) => render_settings(state, f, area, click_state),
        (Screen::Play, Some(play)) => match play.phase {
            PlayPhase::Overview => render_overview(play, f, area, click_state),
            PlayPhase::Collect => render_collect(play, f, area, click_state),
            PlayPhase::Checkout => render_checkout(play, f, area, click_state),
            PlayPhase::Result => render_result(state, play, f, area, click_state),
            PlayPhase::NotFound => render_not_found(play, f, area, click_state),
        },
        (Screen::Play, None) => render_main_menu(state, f, area, click_state),
    }
}

// ── Shared pieces ──────────────────────────────────────────────────────

fn hint(key: &str, label: impl Into<String>, enabled: bool) -> Line<'static> {
    let label_color = if enabled { Color::White } else { Color::DarkGray };
    Line::from(vec![
        Span::styled(
            format!(" [{}] ", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.into(), Style::default().fg(label_color)),
    ])
}

fn feedback_line(feedback: Option<&Feedback>) -> Line<'static> {
    let Some(fb) = feedback else {
        return Line::from("");
    };
    let (mark, color) = match fb.tone {
        Tone::Success => ("✓", Color::Green),
        Tone::Error => ("✗", Color::Red),
        Tone::Info => ("›", Color::Cyan),
    };
    Line::from(Span::styled(format!(" {} {}", mark, fb.text), Style::default().fg(color)))
}

fn panel<'a>(title: impl Into<String>, color: Color, narrow: bool) -> Block<'a> {
    Block::default()
        .borders(panel_borders(narrow))
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title.into(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
}

fn current_tier(progress: &ProgressRecord) -> &'static UpgradeTier {
    UPGRADE_TIERS
        .iter()
        .rev()
        .find(|t| progress.market_level >= t.level)
        .unwrap_or(&UPGRADE_TIERS[0])
}

/// Draw `cl` inside `block`, wrapping long lines. Targets follow the wrap.
fn render_wrapped_list(
    cl: ClickableList<'_>,
    block: Block<'_>,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let inner = block.inner(area);
    cl.register_targets(
        area,
        cs,
        inner.y.saturating_sub(area.y),
        area.bottom().saturating_sub(inner.bottom()),
        0,
        inner.width,
    );
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Draw `cl` inside `block`, clickable rows included.
fn render_list(
    cl: ClickableList<'_>,
    block: Block<'_>,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    cl.register_targets_with_block(area, &block, cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Main menu ──────────────────────────────────────────────────────────

fn render_main_menu(
    state: &MarketState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(area);

    let p = &state.progress;
    let bar_width = if narrow { 16 } else { 30 };
    let header = vec![
        Line::from(vec![
            Span::styled(" Coins ", Style::default().fg(Color::Gray)),
            Span::styled(
                p.coins.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   XP ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", p.xp, next_xp_threshold(p)),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Market level ", Style::default().fg(Color::Gray)),
            Span::styled(
                p.market_level.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", current_tier(p).name),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(bar(xp_progress(p), bar_width), Style::default().fg(Color::Magenta)),
            Span::styled(
                format!(" {:.0}%", xp_progress(p) * 100.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!(" Levels completed: {}/{}", p.completed_levels.len(), LEVELS.len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let title = if narrow { " Market Runner " } else { " Market Runner · shop, scan, pack! " };
    let block = panel(title, Color::Green, narrow);
    f.render_widget(Paragraph::new(header).block(block), chunks[0]);

    let mut cl = ClickableList::new();
    cl.push_clickable(hint("1", "Play", true), MENU_PLAY);
    cl.push_clickable(hint("2", "My Market", true), MENU_MARKET);
    cl.push_clickable(hint("3", "Settings", true), MENU_SETTINGS);
    cl.push(Line::from(""));
    cl.push(feedback_line(state.feedback.as_ref()));

    let mut cs = click_state.borrow_mut();
    render_list(cl, panel(" Menu ", Color::Yellow, narrow), f, chunks[1], &mut cs);
}

// ── Level select ───────────────────────────────────────────────────────

fn render_level_select(
    state: &MarketState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();
    cl.push(feedback_line(state.feedback.as_ref()));

    for (i, level) in LEVELS.iter().enumerate() {
        let key = row_key(i).unwrap_or(' ').to_string();
        let status = state.progress.level_status(level.id);
        let (mark, color) = match status {
            LevelStatus::Completed => ("✓", Color::Green),
            LevelStatus::Open => ("▶", Color::White),
            LevelStatus::Locked => ("·", Color::DarkGray),
        };
        let clock = match level.time_limit {
            Some(secs) => format!("{}s", secs),
            None => "relaxed".to_string(),
        };
        let detail = if narrow {
            format!("{} {:>2} {}", mark, level.id, clock)
        } else {
            format!(
                "{} Level {:>2}  {:<16} {:>7}  {} coins",
                mark,
                level.id,
                level.customer.label(),
                clock,
                level.reward.coins
            )
        };
        let mut line = hint(&key, detail, status != LevelStatus::Locked);
        line.spans[1].style = Style::default().fg(color);
        cl.push_clickable(line, LEVEL_BASE + level.id as u16);
    }

    cl.push(Line::from(""));
    cl.push_clickable(hint("-", "Back", true), BACK);

    let mut cs = click_state.borrow_mut();
    render_list(cl, panel(" Pick a level ", Color::Cyan, narrow), f, area, &mut cs);
}

// ── My Market ──────────────────────────────────────────────────────────

fn render_my_market(
    state: &MarketState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" Market level {}", state.progress.market_level),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for customer in [CustomerType::WalkIn, CustomerType::Online] {
        let (done, total) = levels_by_customer(customer).fold((0, 0), |(d, t), l| {
            (d + state.progress.completed_levels.contains(&l.id) as u32, t + 1)
        });
        cl.push(Line::from(Span::styled(
            format!(" {}s served: {}/{}", customer.label(), done, total),
            Style::default().fg(Color::Gray),
        )));
    }
    cl.push(Line::from(""));

    for tier in UPGRADE_TIERS.iter() {
        let unlocked = state.progress.market_level >= tier.level;
        let (mark, color) = if unlocked {
            ("★", Color::Yellow)
        } else {
            ("☆", Color::DarkGray)
        };
        cl.push(Line::from(vec![
            Span::styled(format!(" {} ", mark), Style::default().fg(color)),
            Span::styled(
                format!("Lv{} {}", tier.level, tier.name),
                Style::default().fg(if unlocked { Color::White } else { Color::DarkGray }),
            ),
        ]));
        cl.push(Line::from(Span::styled(
            format!("     {}", tier.description),
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.push(Line::from(""));
    cl.push_clickable(hint("-", "Back", true), BACK);

    let mut cs = click_state.borrow_mut();
    render_list(cl, panel(" My Market ", Color::Yellow, narrow), f, area, &mut cs);
}

// ── Settings ───────────────────────────────────────────────────────────

fn on_off(on: bool) -> &'static str {
    if on {
        "On"
    } else {
        "Off"
    }
}

fn render_settings(
    state: &MarketState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let audio = state.progress.audio;
    let mut cl = ClickableList::new();
    cl.push_clickable(hint("1", format!("Music: {}", on_off(audio.music)), true), TOGGLE_MUSIC);
    cl.push_clickable(
        hint("2", format!("Sound effects: {}", on_off(audio.sfx)), true),
        TOGGLE_SFX,
    );
    let reset_label = if state.confirm_reset {
        "Really erase everything? Press again"
    } else {
        "Reset progress"
    };
    let mut reset = hint("3", reset_label, true);
    if state.confirm_reset {
        reset.spans[1].style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    }
    cl.push_clickable(reset, RESET_PROGRESS);
    cl.push(Line::from(""));
    cl.push(feedback_line(state.feedback.as_ref()));
    cl.push(Line::from(""));
    cl.push_clickable(hint("-", "Back", true), BACK);

    let mut cs = click_state.borrow_mut();
    render_list(cl, panel(" Settings ", Color::Blue, narrow), f, area, &mut cs);
}

// ── Play: order card ───────────────────────────────────────────────────

fn order_lines(play: &PlaySession, cl: &mut ClickableList<'static>, show_progress: bool) {
    for (i, line) in play.order.lines.iter().enumerate() {
        let name = variant_name(&line.key);
        let text = if show_progress {
            let mark = if line.is_done() { "✓" } else { "○" };
            format!(" {} {} {}/{}", mark, name, line.collected, line.required)
        } else {
            format!(" • {} ×{}", name, line.required)
        };
        let color = if show_progress && line.is_done() { Color::Green } else { Color::White };
        cl.push_clickable(
            Line::from(Span::styled(text, Style::default().fg(color))),
            ORDER_LINE_BASE + i as u16,
        );
    }
}

fn render_overview(
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let Some(level) = play.level else {
        return;
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" {}", level.customer.label()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(" Order:", Style::default().fg(Color::Gray))));
    order_lines(play, &mut cl, false);
    cl.push(Line::from(""));

    let clock = match play.countdown.display() {
        Some(t) => format!(" Time limit: {}", t),
        None => " Relaxed mode, no clock.".to_string(),
    };
    cl.push(Line::from(Span::styled(clock, Style::default().fg(Color::White))));
    cl.push(Line::from(vec![
        Span::styled(" Reward: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} coins", level.reward.coins),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!(" · {} XP", level.reward.xp),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" Shop: {}", play.mode.label()),
        Style::default().fg(Color::DarkGray),
    )));
    if level.unlocks_online_orders {
        cl.push(Line::from(Span::styled(
            " Finish this one to start taking online orders!",
            Style::default().fg(Color::Green),
        )));
    }
    for tip in level.tips {
        cl.push(Line::from(Span::styled(
            format!(" Tip: {}", tip),
            Style::default().fg(Color::LightBlue),
        )));
    }
    cl.push(feedback_line(play.feedback.as_ref()));
    cl.push(Line::from(""));
    cl.push_clickable(hint("1", "Start shopping", true), START_LEVEL);
    cl.push_clickable(hint("-", "Back to levels", true), QUIT_LEVEL);

    let block = panel(format!(" Level {} ", play.level_id), Color::Green, narrow);
    let mut cs = click_state.borrow_mut();
    render_wrapped_list(cl, block, f, area, &mut cs);
}

// ── Play: shelves ──────────────────────────────────────────────────────

fn render_collect(
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut order = ClickableList::new();
    order_lines(play, &mut order, true);
    // Narrow: the order panel sits under the shelf at full width.
    let order_height = order.visual_height(area.width) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status
            Constraint::Length(3), // shelf tabs
            Constraint::Min(5),    // shelf (+ order on wide)
            Constraint::Length(if narrow { order_height } else { 0 }),
            Constraint::Length(4), // feedback + actions
        ])
        .split(area);

    render_status(play, f, chunks[0], narrow);

    let mut cs = click_state.borrow_mut();
    render_shelf_tabs(play, f, chunks[1], narrow, &mut cs);

    if narrow {
        render_shelf(play, f, chunks[2], narrow, &mut cs);
        render_order(play, order, f, chunks[3], narrow, &mut cs);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        render_shelf(play, f, cols[0], narrow, &mut cs);
        render_order(play, order, f, cols[1], narrow, &mut cs);
    }

    let mut cl = ClickableList::new();
    cl.push(feedback_line(play.feedback.as_ref()));
    cl.push_clickable(
        hint("0", "Checkout", play.order.is_complete()),
        CHECKOUT,
    );
    cl.push_clickable(hint("-", "Quit level", true), QUIT_LEVEL);
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    render_list(cl, block, f, chunks[4], &mut cs);
}

fn render_status(play: &PlaySession, f: &mut Frame, area: Rect, narrow: bool) {
    let mut spans = vec![Span::styled(
        format!(" Level {} ", play.level_id),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(t) = play.countdown.display() {
        let style = if play.countdown.is_expired() {
            Style::default().fg(Color::Red)
        } else if !play.countdown.is_running() {
            Style::default().fg(Color::DarkGray)
        } else if play.countdown.is_critical() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" ⏱ {} ", t), style));
    }
    spans.push(Span::styled(
        format!(
            " Basket {}/{}",
            play.order.total_collected(),
            play.order.total_required()
        ),
        Style::default().fg(Color::Yellow),
    ));

    let widget = Paragraph::new(Line::from(spans))
        .block(panel("", Color::DarkGray, narrow));
    f.render_widget(widget, area);
}

fn render_shelf_tabs(
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    narrow: bool,
    cs: &mut ClickState,
) {
    let mut tabs = TabBar::new("│");
    for (i, shelf) in play.shelves.iter().enumerate() {
        let label = if narrow {
            format!("{}{}", i + 1, shelf.category.icon())
        } else {
            format!("{} {} {}", i + 1, shelf.category.icon(), shelf.category.short_title())
        };
        let wanted = shelf.variants.iter().any(|v| play.order.is_wanted(&v.key));
        let cleared = shelf.variants.iter().any(|v| play.order.is_done(&v.key));
        let base = if wanted {
            Color::Green
        } else if cleared {
            Color::Cyan
        } else {
            Color::Gray
        };
        let style = if i == play.active_shelf {
            Style::default().fg(Color::Black).bg(base).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(base)
        };
        tabs = tabs.tab(label, style, SHELF_TAB_BASE + i as u16);
    }
    tabs.block(
        Block::default()
            .borders(panel_borders(narrow))
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .render(f, area, cs);
}

fn render_shelf(play: &PlaySession, f: &mut Frame, area: Rect, narrow: bool, cs: &mut ClickState) {
    let Some(shelf) = play.shelf() else {
        return;
    };
    let highlight = play.order.highlight_keys();
    let done = play.order.done_keys();
    let mut cl = ClickableList::new();
    for (i, variant) in shelf.variants.iter().enumerate() {
        let Some(key) = row_key(i) else {
            break;
        };
        let mut line = hint(&key.to_string(), variant.display_name.clone(), true);
        if let Some(badge) = variant.badge {
            line.spans.push(Span::styled(
                format!(" ({})", badge),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let remaining = play.order.remaining(&variant.key);
        if highlight.contains(&variant.key) {
            line.spans.push(Span::styled(
                format!("  ◀ need {}", remaining),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        } else if done.contains(&variant.key) {
            line.spans.push(Span::styled("  ✓", Style::default().fg(Color::DarkGray)));
        }
        cl.push_clickable(line, SHELF_ITEM_BASE + i as u16);
    }

    let title = format!(" {} {} ", shelf.category.icon(), shelf.title());
    render_list(cl, panel(title, Color::Green, narrow), f, area, cs);
}

fn render_order(
    play: &PlaySession,
    cl: ClickableList<'_>,
    f: &mut Frame,
    area: Rect,
    narrow: bool,
    cs: &mut ClickState,
) {
    let title = format!(
        " Order {}/{} ",
        play.order.total_collected(),
        play.order.total_required()
    );
    render_wrapped_list(cl, panel(title, Color::Yellow, narrow), f, area, cs);
}

// ── Play: till ─────────────────────────────────────────────────────────

fn render_checkout(
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let c = &play.checkout;
    let total = c.queue.len();
    let (stage, done, action) = match c.stage {
        CheckoutStage::Scan => ("Scanning", c.scanned, "Scan item"),
        CheckoutStage::Pack => ("Packing", c.packed, "Pack item"),
        CheckoutStage::Done => ("Done", total, "Finish"),
    };
    let action_enabled = !c.is_done();
    let fraction = if total == 0 { 1.0 } else { done as f64 / total as f64 };

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!(" {} {}/{}", stage, done, total),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" {}", bar(fraction, if narrow { 20 } else { 32 })),
        Style::default().fg(Color::Cyan),
    )));
    if let Some(next) = c.current() {
        cl.push(Line::from(vec![
            Span::styled(" Next: ", Style::default().fg(Color::Gray)),
            Span::styled(variant_name(&next), Style::default().fg(Color::White)),
        ]));
    }
    cl.push(Line::from(""));

    for (i, key) in c.queue.iter().enumerate() {
        let (mark, color) = if i < c.packed {
            ("▣", Color::Green)
        } else if i < c.scanned {
            ("✓", Color::Cyan)
        } else {
            ("·", Color::DarkGray)
        };
        cl.push(Line::from(Span::styled(
            format!("  {} {}", mark, variant_name(key)),
            Style::default().fg(color),
        )));
    }

    cl.push(Line::from(""));
    cl.push(feedback_line(play.feedback.as_ref()));
    cl.push_clickable(hint("1", action, action_enabled), TILL_ADVANCE);

    let mut cs = click_state.borrow_mut();
    let title = format!(" Till · Level {} ", play.level_id);
    render_list(cl, panel(title, Color::Cyan, narrow), f, area, &mut cs);
}

// ── Play: result ───────────────────────────────────────────────────────

fn render_result(
    state: &MarketState,
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let Some(out) = play.outcome.as_ref() else {
        return;
    };

    let mut cl = ClickableList::new();
    let (headline, color) = if out.success {
        (" Order delivered!", Color::Green)
    } else {
        (" Level failed", Color::Red)
    };
    cl.push(Line::from(Span::styled(
        headline,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    if let Some(reason) = play.failure_reason.as_deref() {
        cl.push(Line::from(Span::styled(
            format!(" {}", reason),
            Style::default().fg(Color::Red),
        )));
    }
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled(
            format!(" +{} coins", out.coins_earned),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  +{} XP", out.xp_earned),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" Total: {} coins · {} XP", out.total_coins, out.total_xp),
        Style::default().fg(Color::Gray),
    )));

    let mut level_line = vec![Span::styled(
        format!(" Market level {}", out.market_level),
        Style::default().fg(Color::Cyan),
    )];
    if out.leveled_up {
        level_line.push(Span::styled(
            format!("  ★ LEVEL UP! +{}", out.levels_gained),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    cl.push(Line::from(level_line));

    let unlocked: Vec<String> = out.unlocked_levels.iter().map(u32::to_string).collect();
    cl.push(Line::from(Span::styled(
        format!(" Unlocked: {}", unlocked.join(", ")),
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));

    let has_next = out.success && state.progress.is_unlocked(play.level_id.saturating_add(1));
    let next_label = if has_next { "Next level" } else { "Back to levels" };
    cl.push_clickable(hint("1", next_label, true), RESULT_NEXT);
    cl.push_clickable(hint("2", "Retry", true), RESULT_RETRY);
    cl.push_clickable(hint("3", "Level select", true), RESULT_LEVELS);

    let mut cs = click_state.borrow_mut();
    let title = format!(" Level {} ", play.level_id);
    render_list(cl, panel(title, color, narrow), f, area, &mut cs);
}

fn render_not_found(
    play: &PlaySession,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!(" Level {} could not be found.", play.level_id),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        " More shops are on the way!",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(hint("1", "Back to level select", true), RESULT_LEVELS);

    let mut cs = click_state.borrow_mut();
    let block = panel(" Not found ", Color::Red, narrow).title_alignment(Alignment::Center);
    render_list(cl, block, f, area, &mut cs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::market::progress::ProgressRecord;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(1.0, 4), "████");
        assert_eq!(bar(7.0, 2), "██");
    }

    #[test]
    fn tier_follows_market_level() {
        let mut p = ProgressRecord::default();
        assert_eq!(current_tier(&p).name, "Corner Shop");
        p.market_level = 3;
        assert_eq!(current_tier(&p).level, 3);
        p.market_level = 12;
        assert_eq!(current_tier(&p).level, 5);
    }

    #[test]
    fn hint_line_shape() {
        let line = hint("1", "Play", true);
        assert_eq!(line.spans[0].content, " [1] ");
        assert_eq!(line.spans[1].content, "Play");
        assert_eq!(line.spans[1].style.fg, Some(Color::White));
        assert_eq!(hint("0", "Checkout", false).spans[1].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn feedback_marks_by_tone() {
        let fb = Feedback::error("nope");
        assert_eq!(feedback_line(Some(&fb)).spans[0].content, " ✗ nope");
        assert_eq!(feedback_line(None).width(), 0);
    }
}
