//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Printed instead of an empty table.
pub const NO_RESULTS: &str = "No matching records.";

/// Render rows with rounded borders and a centered header.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Like [`format_table`], with a "Showing N of M <noun>" line underneath when
/// the rows are a subset of a larger collection.
pub fn format_table_of<T: Tabled>(rows: &[T], total: usize, noun: &str) -> String {
    let table = format_table(rows);
    if rows.len() == total {
        table
    } else {
        format!("{}\nShowing {} of {} {}", table, rows.len(), total, noun)
    }
}
