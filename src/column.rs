//! Column descriptors.
//!
//! A column names the row field it displays, its header label, whether it
//! participates in sorting, an optional width hint, and an optional custom
//! cell renderer. Descriptor order is display order.

use ratatui::layout::Constraint;
use ratatui::text::Line;

use crate::row::{CellValue, TableRow};

/// Custom cell renderer: receives the extracted value and the whole row,
/// returns the styled line to display.
pub type CellRenderer<R> = Box<dyn Fn(&CellValue, &R) -> Line<'static>>;

/// Describes how one row field is displayed.
pub struct Column<R> {
    key: String,
    title: String,
    sortable: bool,
    width: Option<Constraint>,
    render: Option<CellRenderer<R>>,
}

impl<R: TableRow> Column<R> {
    /// Create a column displaying field `key` under header `title`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            width: None,
            render: None,
        }
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Fix the column width. Columns without a hint share leftover space.
    pub fn width(mut self, width: Constraint) -> Self {
        self.width = Some(width);
        self
    }

    /// Install a custom cell renderer.
    pub fn render_with(mut self, render: impl Fn(&CellValue, &R) -> Line<'static> + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// The row field this column displays.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether this column can sort.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The width hint, defaulting to an equal share of leftover space.
    pub fn width_hint(&self) -> Constraint {
        self.width.unwrap_or(Constraint::Fill(1))
    }

    /// Produce the display line for `row`'s cell in this column.
    ///
    /// Uses the custom renderer when installed, else the value's default
    /// string form (null renders empty).
    pub fn cell_line(&self, row: &R) -> Line<'static> {
        let value = row.field(&self.key);
        match &self.render {
            Some(render) => render(&value, row),
            None => Line::raw(value.to_string()),
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};
    use ratatui::text::Span;
    use serde_json::{json, Value};

    #[test]
    fn test_builder_defaults() {
        let col: Column<Value> = Column::new("name", "Name");
        assert_eq!(col.key(), "name");
        assert_eq!(col.title(), "Name");
        assert!(!col.is_sortable());
        assert_eq!(col.width_hint(), Constraint::Fill(1));
    }

    #[test]
    fn test_builder_options() {
        let col: Column<Value> = Column::new("cpu", "CPU")
            .sortable(true)
            .width(Constraint::Length(6));
        assert!(col.is_sortable());
        assert_eq!(col.width_hint(), Constraint::Length(6));
    }

    #[test]
    fn test_default_cell_rendering() {
        let col: Column<Value> = Column::new("name", "Name");
        let line = col.cell_line(&json!({"name": "api-1"}));
        assert_eq!(line.to_string(), "api-1");
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let col: Column<Value> = Column::new("nope", "Nope");
        let line = col.cell_line(&json!({"name": "api-1"}));
        assert_eq!(line.to_string(), "");
    }

    #[test]
    fn test_custom_renderer_receives_value_and_row() {
        let col: Column<Value> = Column::new("status", "Status").render_with(|value, row: &Value| {
            let color = if value.to_string() == "up" {
                Color::Green
            } else {
                Color::Red
            };
            let label = format!("{} ({})", value, row.field("name"));
            Line::from(Span::styled(label, Style::default().fg(color)))
        });
        let line = col.cell_line(&json!({"name": "api-1", "status": "up"}));
        assert_eq!(line.to_string(), "up (api-1)");
    }
}
