//! Input plumbing shared by the shell and the game: normalized events,
//! click-target registry, and pixel-to-cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse, and touch input collapsed into two shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press. Esc arrives as `'q'`, Backspace as `'-'`.
    Key(char),
    /// A tap on a registered target, identified by its action ID.
    Click(u16),
}

/// A tappable screen region, in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the terminal size the DOM
/// grid was laid out with. Shared between the draw loop and the mouse hook.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width, one-row target. Rows outside `area` are dropped.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register targets for a one-line tab strip (shelf tabs).
    ///
    /// `tab_widths` holds `(display_width, action_id)` for each padded label.
    /// Each tab claims its label plus half of the separators around it; the
    /// first and last tabs stretch to the strip's edges so there are no dead
    /// columns between tabs.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (width, action_id) = tab_widths[i];
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = starts[i] + width;
                end + (starts[i + 1] - end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Resolve a cell to an action. Targets registered later sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Phones in portrait get the narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel offset from the grid's top edge to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel offset from the grid's left edge to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_row_target() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 4, 40, 1), 101);
        cs.add_click_target(Rect::new(0, 5, 40, 1), 102);

        assert_eq!(cs.hit_test(3, 4), Some(101));
        assert_eq!(cs.hit_test(39, 5), Some(102));
        assert_eq!(cs.hit_test(40, 5), None);
        assert_eq!(cs.hit_test(3, 6), None);
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        // Whole order panel jumps to a shelf; the checkout button sits on top.
        cs.add_click_target(Rect::new(0, 10, 50, 4), 1);
        cs.add_click_target(Rect::new(30, 12, 10, 1), 2);

        assert_eq!(cs.hit_test(35, 12), Some(2));
        assert_eq!(cs.hit_test(5, 12), Some(1));
    }

    #[test]
    fn row_target_outside_area_is_dropped() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 8, 30, 3);
        cs.add_row_target(area, 7, 9);
        cs.add_row_target(area, 11, 9);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 10, 9);
        assert_eq!(cs.hit_test(2, 10), Some(9));
        assert_eq!(cs.hit_test(1, 10), None);
    }

    #[test]
    fn clear_forgets_previous_frame() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn shelf_tabs_cover_strip_without_gaps() {
        // " Produce " (9) | " Dairy " (7) | " Drinks " (8), separator "│" (1)
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(9, 200), (7, 201), (8, 202)], 1, 1, 3, 40, 1);
        assert_eq!(cs.targets.len(), 3);

        assert_eq!(cs.hit_test(1, 3), Some(200));
        assert_eq!(cs.hit_test(9, 3), Some(200));
        assert_eq!(cs.hit_test(10, 3), Some(201)); // separator belongs to the next tab
        assert_eq!(cs.hit_test(17, 3), Some(201));
        assert_eq!(cs.hit_test(18, 3), Some(202));
        assert_eq!(cs.hit_test(40, 3), Some(202)); // last tab runs to the edge
        assert_eq!(cs.hit_test(0, 3), None); // left of the strip's x offset
    }

    #[test]
    fn tab_registration_with_nothing_to_register() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 1, 0, 0, 40, 1);
        cs.register_tab_targets(&[(5, 1)], 1, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_breakpoint() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_conversion_inside_grid() {
        // 40 rows at 15px each
        assert_eq!(pixel_y_to_row(0.0, 600.0, 40), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 600.0, 40), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 600.0, 40), Some(1));
        assert_eq!(pixel_y_to_row(599.0, 600.0, 40), Some(39));
        assert_eq!(pixel_x_to_col(395.0, 400.0, 40), Some(39));
    }

    #[test]
    fn pixel_conversion_rejects_outside_or_degenerate() {
        assert_eq!(pixel_y_to_row(600.0, 600.0, 40), None);
        assert_eq!(pixel_y_to_row(-0.5, 600.0, 40), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 40), None);
        assert_eq!(pixel_x_to_col(10.0, 400.0, 0), None);
    }

    #[test]
    fn tap_in_cell_centre_hits_its_row() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        cs.add_click_target(Rect::new(0, 21, 37, 1), 7);

        let grid_height = 50.0 * 15.0;
        let row = pixel_y_to_row(21.0 * 15.0 + 7.5, grid_height, cs.terminal_rows);
        assert_eq!(row, Some(21));
        assert_eq!(cs.hit_test(12, 21), Some(7));
    }
}
