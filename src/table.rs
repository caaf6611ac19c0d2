//! Generic data table widget.
//!
//! [`DataTable`] displays a sequence of rows through a set of column
//! descriptors, with sortable headers, checkbox selection and three
//! mutually exclusive visual states:
//!
//! 1. **Loading**: a fixed-count skeleton placeholder, shown whenever the
//!    loading flag is set, regardless of data.
//! 2. **Empty**: a configurable message, shown when there is no data.
//! 3. **Populated**: header plus one row per entry of the sorted view.
//!
//! The state is derived from `(loading, rows.len())` on every render; there
//! is no stored state to fall out of sync.
//!
//! Selection changes are reported synchronously through an optional
//! callback, which always receives the selected subset of the *current*
//! data in its original order.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::{debug, trace};

use crate::column::Column;
use crate::row::TableRow;
use crate::selection::SelectionSet;
use crate::sort::{display_order, SortState};
use crate::theme::Theme;

/// Number of placeholder rows in the loading skeleton.
pub const SKELETON_ROW_COUNT: usize = 5;

/// Message shown by the empty state when none is configured.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Cell filler for skeleton rows.
const SKELETON_CELL: &str = "░░░░░░░░";

/// Handler invoked with the selected row subset after every selection
/// change.
pub type SelectionHandler<R> = Box<dyn FnMut(&[&R])>;

/// The visual state a render will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Loading skeleton; suppresses the other states.
    Loading,
    /// No data to show.
    Empty,
    /// Header and body rows.
    Populated,
}

/// A sortable, selectable table over rows of type `R`.
pub struct DataTable<R> {
    title: String,
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    sort: SortState,
    selection: SelectionSet,
    loading: bool,
    selectable: bool,
    empty_message: String,
    /// Cursor position within the *display* (sorted) order.
    cursor: usize,
    table_state: TableState,
    theme: Theme,
    on_select: Option<SelectionHandler<R>>,
}

impl<R: TableRow> DataTable<R> {
    /// Create an empty table with the given title and columns.
    pub fn new(title: impl Into<String>, columns: Vec<Column<R>>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            sort: SortState::new(),
            selection: SelectionSet::new(),
            loading: false,
            selectable: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            cursor: 0,
            table_state,
            theme: Theme::default(),
            on_select: None,
        }
    }

    /// Enable the checkbox selection column.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Override the empty-state message.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Use a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Install the selection handler.
    ///
    /// Invoked synchronously, once per selection change, in interaction
    /// order, with the selected subset of the current rows in their
    /// original order.
    pub fn on_select(&mut self, handler: impl FnMut(&[&R]) + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    /// Replace the displayed rows.
    ///
    /// Selected identities still present in the new data stay selected;
    /// the rest are dropped. Sort state is kept as-is.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.selection.reconcile(&self.rows);
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.table_state.select(Some(self.cursor));
        debug!(rows = self.rows.len(), "rows replaced");
    }

    /// The current rows, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Check the loading flag.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The visual state the next render will produce.
    pub fn view_state(&self) -> ViewState {
        if self.loading {
            ViewState::Loading
        } else if self.rows.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    /// The current sort configuration.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// The display permutation: row indices in their rendered order.
    pub fn display_order(&self) -> Vec<usize> {
        display_order(&self.rows, &self.sort)
    }

    /// Toggle sorting by the column with key `key`.
    ///
    /// Same key flips the direction, a different key takes over ascending.
    /// Unknown or non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable());
        if sortable {
            self.sort.toggle(key);
        }
    }

    /// Select or deselect every current row.
    pub fn select_all(&mut self, checked: bool) {
        self.selection.select_all(&self.rows, checked);
        self.notify_selection();
    }

    /// Set the selection state of the row at a display position.
    pub fn set_row_selected(&mut self, position: usize, checked: bool) {
        let order = self.display_order();
        let Some(&index) = order.get(position) else {
            return;
        };
        self.selection.set(self.rows[index].identity(), checked);
        self.notify_selection();
    }

    /// Flip the selection state of the row at a display position.
    pub fn toggle_row(&mut self, position: usize) {
        let order = self.display_order();
        let Some(&index) = order.get(position) else {
            return;
        };
        self.selection.toggle(&self.rows[index].identity());
        self.notify_selection();
    }

    /// Flip the selection state of the cursor row.
    pub fn toggle_current(&mut self) {
        self.toggle_row(self.cursor);
    }

    /// Check whether a row is selected.
    pub fn is_row_selected(&self, row: &R) -> bool {
        self.selection.is_selected(&row.identity())
    }

    /// Check whether the row at a display position is selected.
    pub fn is_selected_at(&self, position: usize) -> bool {
        self.display_order()
            .get(position)
            .map_or(false, |&index| self.is_row_selected(&self.rows[index]))
    }

    /// The selected subset of the current rows, in input order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.selection.selected_rows(&self.rows)
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// The cursor's display position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.table_state.select(Some(self.cursor));
        }
    }

    /// Move the cursor down one row.
    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.cursor < self.rows.len() - 1 {
            self.cursor += 1;
            self.table_state.select(Some(self.cursor));
        }
    }

    /// Move the cursor to the first row.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
        self.table_state.select(Some(0));
    }

    /// Move the cursor to the last row.
    pub fn move_to_end(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = self.rows.len() - 1;
            self.table_state.select(Some(self.cursor));
        }
    }

    /// Handle keyboard input.
    ///
    /// Navigation with j/k or arrows, Space toggles the cursor row,
    /// Ctrl+A toggles select-all, digits 1-9 toggle sort on the n-th
    /// column. Only the populated state reacts to input.
    ///
    /// Returns true if the input was handled.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if self.view_state() != ViewState::Populated {
            return false;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                true
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                true
            }
            (KeyCode::Home, _) => {
                self.move_to_start();
                true
            }
            (KeyCode::End, _) => {
                self.move_to_end();
                true
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) if self.selectable => {
                self.toggle_current();
                true
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) if self.selectable => {
                let all = self.selection.all_selected(&self.rows);
                self.select_all(!all);
                true
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                let index = c as usize - '1' as usize;
                match self.columns.get(index) {
                    Some(column) if column.is_sortable() => {
                        let key = column.key().to_string();
                        self.sort.toggle(&key);
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Recompute the selected subset and hand it to the handler.
    fn notify_selection(&mut self) {
        let subset = self.selection.selected_rows(&self.rows);
        trace!(selected = subset.len(), "selection changed");
        if let Some(handler) = self.on_select.as_mut() {
            handler(&subset);
        }
    }

    /// Render the table into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        match self.view_state() {
            ViewState::Loading => self.render_loading(frame, area, focused),
            ViewState::Empty => self.render_empty(frame, area, focused),
            ViewState::Populated => self.render_populated(frame, area, focused),
        }
    }

    /// Surrounding block, with the selection count in the title.
    fn block(&self, focused: bool) -> Block<'static> {
        let border_style = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.border)
        };
        let title = if self.selectable && !self.selection.is_empty() {
            format!(" {} ({}) ", self.title, self.selection.len())
        } else {
            format!(" {} ", self.title)
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let skeleton = Style::default().fg(self.theme.skeleton);
        let rows: Vec<Row> = (0..SKELETON_ROW_COUNT)
            .map(|_| {
                let cells: Vec<Cell> = self
                    .columns
                    .iter()
                    .map(|_| Cell::from(Span::styled(SKELETON_CELL, skeleton)))
                    .collect();
                Row::new(cells)
            })
            .collect();
        let widths: Vec<Constraint> = self.columns.iter().map(|c| c.width_hint()).collect();
        let table = Table::new(rows, widths).block(self.block(focused));
        frame.render_widget(table, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let paragraph = Paragraph::new(self.empty_message.clone())
            .style(Style::default().fg(self.theme.muted))
            .alignment(Alignment::Center)
            .block(self.block(focused));
        frame.render_widget(paragraph, area);
    }

    fn render_populated(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let order = self.display_order();

        let mut header_cells: Vec<Cell> = Vec::new();
        if self.selectable {
            let mark = if self.selection.all_selected(&self.rows) {
                "[x]"
            } else {
                "[ ]"
            };
            header_cells.push(Cell::from(mark.to_string()));
        }
        for column in &self.columns {
            let mut title_style = Style::default()
                .fg(self.theme.header)
                .add_modifier(Modifier::BOLD);
            if column.is_sortable() {
                title_style = title_style.add_modifier(Modifier::UNDERLINED);
            }
            let mut spans = vec![Span::styled(column.title().to_string(), title_style)];
            if self.sort.is_sorted_by(column.key()) {
                spans.push(Span::raw(" "));
                spans.push(Span::raw(self.sort.direction().indicator()));
            }
            header_cells.push(Cell::from(Line::from(spans)));
        }
        let header = Row::new(header_cells).height(1);

        let body: Vec<Row> = order
            .iter()
            .map(|&index| {
                let row = &self.rows[index];
                let mut cells: Vec<Cell> = Vec::new();
                if self.selectable {
                    let cell = if self.is_row_selected(row) {
                        Cell::from(Span::styled(
                            "[x]",
                            Style::default().fg(self.theme.selected),
                        ))
                    } else {
                        Cell::from("[ ]".to_string())
                    };
                    cells.push(cell);
                }
                for column in &self.columns {
                    cells.push(Cell::from(column.cell_line(row)));
                }
                Row::new(cells)
            })
            .collect();

        let mut widths: Vec<Constraint> = Vec::new();
        if self.selectable {
            widths.push(Constraint::Length(3));
        }
        widths.extend(self.columns.iter().map(|c| c.width_hint()));

        let table = Table::new(body, widths)
            .header(header)
            .block(self.block(focused));

        if focused {
            let table = table
                .highlight_style(
                    Style::default()
                        .bg(self.theme.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            self.cursor = self.cursor.min(order.len().saturating_sub(1));
            self.table_state.select(Some(self.cursor));
            frame.render_stateful_widget(table, area, &mut self.table_state);
        } else {
            frame.render_widget(table, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::{json, Value};

    type Payloads = Rc<RefCell<Vec<Vec<String>>>>;

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("id", "ID").width(Constraint::Length(4)),
            Column::new("name", "Name").sortable(true),
        ]
    }

    fn sample_rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "B"}),
            json!({"id": 2, "name": "A"}),
        ]
    }

    fn sample_table() -> DataTable<Value> {
        let mut table = DataTable::new("Items", columns()).selectable(true);
        table.set_rows(sample_rows());
        table
    }

    /// Record every callback payload as a list of row identities.
    fn capture(table: &mut DataTable<Value>) -> Payloads {
        let seen: Payloads = Rc::default();
        let sink = Rc::clone(&seen);
        table.on_select(move |rows| {
            sink.borrow_mut()
                .push(rows.iter().map(|r| r.identity()).collect());
        });
        seen
    }

    fn render_to_text(table: &mut DataTable<Value>, focused: bool) -> String {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.render(frame, area, focused);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            if i > 0 && i % width == 0 {
                text.push('\n');
            }
            text.push_str(cell.symbol());
        }
        text
    }

    #[test]
    fn test_view_state_priority() {
        let mut table = sample_table();
        assert_eq!(table.view_state(), ViewState::Populated);

        // Loading wins over populated data.
        table.set_loading(true);
        assert_eq!(table.view_state(), ViewState::Loading);

        // Loading wins over empty data too.
        table.set_rows(Vec::new());
        assert_eq!(table.view_state(), ViewState::Loading);

        table.set_loading(false);
        assert_eq!(table.view_state(), ViewState::Empty);
    }

    #[test]
    fn test_loading_renders_five_skeleton_rows() {
        let mut table = sample_table();
        table.set_loading(true);
        let text = render_to_text(&mut table, false);
        let skeleton_lines = text.lines().filter(|l| l.contains("░")).count();
        assert_eq!(skeleton_lines, SKELETON_ROW_COUNT);
        // No header or data leaks through.
        assert!(!text.contains("Name"));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn test_empty_state_default_message() {
        let mut table = DataTable::<Value>::new("Items", columns());
        let text = render_to_text(&mut table, false);
        assert!(text.contains("No data available"));
    }

    #[test]
    fn test_empty_state_custom_message() {
        let mut table =
            DataTable::<Value>::new("Items", columns()).empty_message("Nothing here yet");
        let text = render_to_text(&mut table, false);
        assert!(text.contains("Nothing here yet"));
        assert!(!text.contains("No data available"));
    }

    #[test]
    fn test_populated_renders_sorted_rows_and_indicator() {
        let mut table = sample_table();
        table.toggle_sort("name");
        let text = render_to_text(&mut table, false);
        assert!(text.contains("Name ▲"));
        // "A" row renders above "B" row.
        let a_at = text.find('A').unwrap();
        let b_at = text.find('B').unwrap();
        assert!(a_at < b_at);
    }

    #[test]
    fn test_toggle_sort_ignores_non_sortable_column() {
        let mut table = sample_table();
        table.toggle_sort("id");
        assert_eq!(table.sort_state().key(), None);
        table.toggle_sort("bogus");
        assert_eq!(table.sort_state().key(), None);
    }

    #[test]
    fn test_select_all_then_none_payloads() {
        let mut table = sample_table();
        let seen = capture(&mut table);

        table.select_all(true);
        table.select_all(false);

        let payloads = seen.borrow();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0], vec!["1".to_string(), "2".to_string()]);
        assert!(payloads[1].is_empty());
    }

    #[test]
    fn test_toggle_order_does_not_affect_payload_order() {
        let mut table = DataTable::new("Items", columns()).selectable(true);
        table.set_rows(vec![
            json!({"id": 1, "name": "a"}),
            json!({"id": 2, "name": "b"}),
            json!({"id": 3, "name": "c"}),
        ]);
        let seen = capture(&mut table);

        // Toggle positions 2 then 0; payload stays in original order.
        table.toggle_row(2);
        table.toggle_row(0);

        let payloads = seen.borrow();
        assert_eq!(
            payloads.last().unwrap(),
            &vec!["1".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_selection_scenario_in_descending_view() {
        let mut table = sample_table();
        let seen = capture(&mut table);

        table.toggle_sort("name");
        assert_eq!(table.display_order(), vec![1, 0]);
        table.toggle_sort("name");
        assert_eq!(table.display_order(), vec![0, 1]);

        // Display position 0 in the descending view is id 1 ("B").
        table.set_row_selected(0, true);
        assert_eq!(seen.borrow().last().unwrap(), &vec!["1".to_string()]);
        let selected = table.selected_rows();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["name"], "B");
    }

    #[test]
    fn test_is_selected_at_tracks_display_position() {
        let mut table = sample_table();
        table.set_row_selected(0, true); // id 1 ("B"), unsorted view
        assert!(table.is_selected_at(0));
        // Ascending by name puts "A" first; the selected row moves to
        // display position 1.
        table.toggle_sort("name");
        assert!(!table.is_selected_at(0));
        assert!(table.is_selected_at(1));
        assert!(!table.is_selected_at(99));
    }

    #[test]
    fn test_selection_follows_rows_across_resort() {
        let mut table = sample_table();
        table.set_row_selected(0, true); // id 1
        table.toggle_sort("name"); // reorders the view
        let selected = table.selected_rows();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].identity(), "1");
    }

    #[test]
    fn test_set_rows_reconciles_selection() {
        let mut table = sample_table();
        table.select_all(true);
        table.set_rows(vec![json!({"id": 2, "name": "A"}), json!({"id": 9, "name": "Z"})]);
        let selected = table.selected_rows();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].identity(), "2");
    }

    #[test]
    fn test_out_of_range_position_is_ignored() {
        let mut table = sample_table();
        let seen = capture(&mut table);
        table.toggle_row(99);
        table.set_row_selected(99, true);
        assert!(seen.borrow().is_empty());
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_missing_handler_is_noop() {
        let mut table = sample_table();
        table.select_all(true);
        assert_eq!(table.selected_count(), 2);
    }

    #[test]
    fn test_handle_input_navigation_and_toggle() {
        let mut table = sample_table();

        assert!(table.handle_input(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert_eq!(table.cursor(), 1);
        assert!(table.handle_input(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert_eq!(table.cursor(), 0);

        assert!(table.handle_input(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(table.selected_count(), 1);

        assert!(table.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert_eq!(table.selected_count(), 2);
        assert!(table.handle_input(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_handle_input_digit_sorts_column() {
        let mut table = sample_table();
        // Column 2 ("name") is sortable, column 1 ("id") is not.
        assert!(table.handle_input(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE)));
        assert!(table.sort_state().is_sorted_by("name"));
        assert!(!table.handle_input(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_input_ignored_while_loading() {
        let mut table = sample_table();
        table.set_loading(true);
        assert!(!table.handle_input(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(table.selected_count(), 0);
    }

    #[test]
    fn test_space_ignored_when_not_selectable() {
        let mut table = DataTable::new("Items", columns());
        table.set_rows(sample_rows());
        assert!(!table.handle_input(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn test_cursor_clamped_on_shrinking_rows() {
        let mut table = sample_table();
        table.move_to_end();
        assert_eq!(table.cursor(), 1);
        table.set_rows(vec![json!({"id": 1, "name": "B"})]);
        assert_eq!(table.cursor(), 0);
    }
}
