//! Table formatter.

use prettytable::{Cell, Row, Table};

/// Render rows as a table. The first row is the header and is set in bold.
pub fn format(rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    let mut rows = rows.iter();

    if let Some(header) = rows.next() {
        table.set_titles(Row::new(
            header.iter().map(|title| Cell::new(title).style_spec("b")).collect(),
        ));
    }
    for row in rows {
        table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
    }

    table.to_string()
}
