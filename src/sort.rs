//! Sort state and ordering derivation.
//!
//! Sorting never rearranges the caller's data. [`display_order`] derives a
//! permutation of row indices; the widget renders through it, so callers
//! holding the original sequence always see it untouched.

use std::cmp::Ordering;

use tracing::debug;

use crate::row::TableRow;

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Natural order for the field's value type.
    #[default]
    Ascending,
    /// Inverse of the natural order.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown in the header of the active sort column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The currently active sort key and direction.
///
/// Activating the active key again flips the direction; activating a
/// different key replaces it and starts ascending. That is the entire
/// transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Create an inactive sort state (passthrough ordering).
    pub fn new() -> Self {
        Self::default()
    }

    /// The active sort key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The current direction. Meaningful only while a key is active.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Check whether `key` is the active sort key.
    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// Activate `key`: flip direction if already active, else sort by it
    /// ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.is_sorted_by(key) {
            self.direction = self.direction.reversed();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
        debug!(key, direction = ?self.direction, "sort toggled");
    }

    /// Deactivate sorting, restoring passthrough order.
    pub fn clear(&mut self) {
        self.key = None;
        self.direction = SortDirection::Ascending;
    }
}

/// Derive the display permutation for `rows` under `sort`.
///
/// With no active key this is the identity permutation. Otherwise indices
/// are ordered by comparing the keyed field pairwise; the sort is stable,
/// so equal fields keep their input order in both directions.
pub fn display_order<R: TableRow>(rows: &[R], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(key) = sort.key() else {
        return order;
    };
    order.sort_by(|&a, &b| {
        let ord = rows[a].field(key).compare(&rows[b].field(key));
        match sort.direction() {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}

/// Compare two rows by a single field, ascending.
///
/// Exposed for hosts that sort their own data up front instead of going
/// through the widget.
pub fn compare_by_field<R: TableRow>(a: &R, b: &R, key: &str) -> Ordering {
    a.field(key).compare(&b.field(key))
}
