//! Sortable, selectable data-table and text-input widgets for [ratatui].
//!
//! The centerpiece is [`DataTable`]: a table generic over its row type,
//! with stable column sorting, identity-keyed checkbox selection and
//! derived loading/empty/populated visual states. [`TextInput`] is a
//! single-line editor with masking and placeholder support. Both draw
//! with colors from a [`Theme`], loadable from TOML.
//!
//! ```no_run
//! use griddle::{Column, DataTable};
//! use serde_json::json;
//!
//! let mut table = DataTable::new(
//!     "Servers",
//!     vec![
//!         Column::new("name", "Name").sortable(true),
//!         Column::new("region", "Region"),
//!     ],
//! )
//! .selectable(true);
//!
//! table.set_rows(vec![
//!     json!({"id": 1, "name": "api-1", "region": "eu-west"}),
//!     json!({"id": 2, "name": "api-2", "region": "us-east"}),
//! ]);
//! table.on_select(|rows| println!("{} selected", rows.len()));
//! table.toggle_sort("name");
//! ```
//!
//! [ratatui]: https://docs.rs/ratatui

pub mod column;
pub mod input;
pub mod logging;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod theme;

pub use column::{CellRenderer, Column};
pub use input::TextInput;
pub use row::{CellValue, TableRow};
pub use selection::SelectionSet;
pub use sort::{SortDirection, SortState};
pub use table::{
    DataTable, SelectionHandler, ViewState, DEFAULT_EMPTY_MESSAGE, SKELETON_ROW_COUNT,
};
pub use theme::{Theme, ThemeError};
