//! Clickable UI components.
//!
//! Each component renders and registers its click targets in one call, so
//! the rows a player sees and the rows they can tap never drift apart.
//!
//! - [`TabBar`]: one-line tab strip (shelf tabs).
//! - [`ClickableList`]: vertical list with per-line click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal tab strip.
///
/// ```ignore
/// TabBar::new("│")
///     .tab("♣ Fruit & Veg", active_style, SHELF_TAB_BASE)
///     .tab("◎ Dairy", idle_style, SHELF_TAB_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the strip in a [`Block`]; targets follow `Block::inner()`.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let tab_widths = tab_widths(&self.tabs);

        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for column accuracy, outer rows for tap tolerance.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

fn tab_widths(tabs: &[(String, Style, u16)]) -> Vec<(u16, u16)> {
    tabs.iter()
        .map(|(label, _, action_id)| {
            let padded = format!(" {} ", label);
            (Line::from(padded.as_str()).width() as u16, *action_id)
        })
        .collect()
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions.
///
/// Mark lines clickable as you push them, then call one of the
/// `register_targets*` methods after layout. Inserting a line above a
/// clickable one moves its target along with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Order"));
/// cl.push_clickable(Line::from(" [a] Milk ×2"), ITEM_BASE);
/// cl.register_targets_with_block(area, &block, &mut cs);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Rows the lines occupy when wrapped to `width`, as ratatui lays them out.
    pub fn visual_height(&self, width: u16) -> u16 {
        if width == 0 {
            return self.lines.len() as u16;
        }
        let paragraph = Paragraph::new(self.lines.clone()).wrap(Wrap { trim: false });
        paragraph.line_count(width) as u16
    }

    /// Register targets for a list drawn inside `block`, unwrapped and unscrolled.
    ///
    /// Offsets come from the block's borders. Horizontal borders don't
    /// shrink the tap area; each target spans the full outer width.
    pub fn register_targets_with_block(&self, area: Rect, block: &Block, cs: &mut ClickState) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, 0, 0);
    }

    /// Register targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders or padding.
    /// * `scroll`: vertical scroll in visual rows.
    /// * `inner_width`: wrap width, or `0` when the paragraph does not wrap
    ///   (one logical line per row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        if inner_width == 0 {
            for &(line_idx, action_id) in &self.actions {
                if line_idx < scroll {
                    continue;
                }
                let row = content_y + (line_idx - scroll);
                if row < content_end {
                    cs.add_row_target(area, row, action_id);
                }
            }
            return;
        }

        let w = inner_width as usize;
        let mut starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            starts.push(cumulative);
            let lw = line.width();
            let h = if lw <= w { 1 } else { lw.div_ceil(w) as u16 };
            heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            for r in 0..heights[li] {
                let vr = starts[li] + r;
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

/// Borders for a panel: full box on wide layouts, top and bottom rules on
/// phones so no columns are lost.
pub fn panel_borders(narrow: bool) -> Borders {
    if narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_widths_include_padding() {
        let tabs = vec![
            ("Dairy".to_string(), Style::default(), 30),
            ("♣ Fruit".to_string(), Style::default(), 31),
        ];
        assert_eq!(tab_widths(&tabs), vec![(7, 30), (9, 31)]);
    }

    #[test]
    fn header_lines_are_not_clickable() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Order for level 3"));
        cl.push_clickable(Line::from(" [a] Milk"), 10);
        cl.push_clickable(Line::from(" [b] Bread"), 11);
        cl.push(Line::from(" Reward: 22 coins"));

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn scrolled_out_lines_are_skipped() {
        let mut cl = ClickableList::new();
        for i in 0..4 {
            cl.push_clickable(Line::from(format!("level {}", i + 1)), 100 + i);
        }

        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
    }

    #[test]
    fn long_shelf_is_clipped_by_bottom_border() {
        let mut cl = ClickableList::new();
        for i in 0..20u16 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i);
        }

        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 1), Some(50));
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn block_offsets_follow_borders() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from(" [1] Play"), 1);
        cl.push_clickable(Line::from(" [2] My Market"), 2);

        let area = Rect::new(0, 4, 40, 6);
        let mut cs = ClickState::new();
        let block = Block::default().borders(Borders::ALL);
        cl.register_targets_with_block(area, &block, &mut cs);
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(0, 6), Some(2));

        let mut cs = ClickState::new();
        let bare = Block::default();
        cl.register_targets_with_block(area, &bare, &mut cs);
        assert_eq!(cs.hit_test(0, 4), Some(1));
        assert_eq!(cs.hit_test(0, 5), Some(2));
    }

    #[test]
    fn wrapped_line_is_clickable_on_every_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 4), Some(42));
        assert_eq!(cs.hit_test(5, 5), None);
    }

    #[test]
    fn wrapped_with_scroll() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("12345678901234567890"), 10);
        cl.push_clickable(Line::from("item1"), 11);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 1, 10);

        assert_eq!(cs.hit_test(5, 0), Some(10));
        assert_eq!(cs.hit_test(5, 1), Some(11));
    }

    #[test]
    fn visual_height_counts_wrapped_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("short"));
        cl.push(Line::from("a line that is definitely wider than ten"));
        assert!(cl.visual_height(10) >= 3);
        assert_eq!(cl.visual_height(80), 2);
        assert_eq!(cl.visual_height(0), 2);
    }

    #[test]
    fn narrow_panels_drop_side_borders() {
        assert_eq!(panel_borders(true), Borders::TOP | Borders::BOTTOM);
        assert_eq!(panel_borders(false), Borders::ALL);
    }
}
