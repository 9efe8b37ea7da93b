//! Reply markup for the chat endpoint

use std::fmt::Write;

use crate::inventory::{Cell, Field, Table};

/// Reply for an empty or missing message
pub const EMPTY_MESSAGE_REPLY: &str = "Please type something!";

/// Reply when a query matches no listings
pub const NO_MATCH_REPLY: &str = "No matching phones found in Excel!";

/// Heading placed before a result table
pub const RESULTS_PREAMBLE: &str = "<b>Here are the best results Sir 😎:</b><br><br>";

const TABLE_CLASSES: &str = "dataframe table table-dark table-hover table-bordered";

/// Reply for a resolved query: the no-match notice or the result table
pub fn results_reply(results: &Table) -> String {
    if results.is_empty() {
        return NO_MATCH_REPLY.to_string();
    }
    format!("{}{}", RESULTS_PREAMBLE, render_table(results))
}

/// Render a table as HTML, one `<th>` per column and no index column
pub fn render_table(table: &Table) -> String {
    let link_column = table.column_of(Field::Link);
    let mut html = String::new();

    let _ = writeln!(html, "<table border=\"1\" class=\"{}\">", TABLE_CLASSES);
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for column in table.columns() {
        let _ = writeln!(html, "      <th>{}</th>", escape_html(column));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in table.rows() {
        html.push_str("    <tr>\n");
        for (idx, cell) in row.cells().iter().enumerate() {
            let content = if Some(idx) == link_column {
                link_button(cell)
            } else {
                escape_html(&cell.to_string())
            };
            let _ = writeln!(html, "      <td>{}</td>", content);
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Button-styled anchor for a link cell; blank links render empty
fn link_button(cell: &Cell) -> String {
    match cell.as_text() {
        Some(url) if !url.trim().is_empty() => format!(
            "<a href=\"{}\" target=\"_blank\" class=\"btn btn-warning btn-sm\">Open</a>",
            escape_html(&url)
        ),
        _ => String::new(),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::phones;

    #[test]
    fn test_empty_results_reply() {
        assert_eq!(results_reply(&Table::empty()), NO_MATCH_REPLY);
    }

    #[test]
    fn test_results_reply_has_preamble_and_table() {
        let table = phones(&[("Redmi 12", "₹9,999", Some(4.1), "")]);
        let reply = results_reply(&table);

        assert!(reply.starts_with(RESULTS_PREAMBLE));
        assert!(reply.contains("<table border=\"1\" class=\"dataframe table table-dark table-hover table-bordered\">"));
        assert!(reply.contains("<th>Name</th>"));
        assert!(reply.contains("<td>Redmi 12</td>"));
        assert!(reply.contains("<td>9999.0</td>"));
        assert!(reply.contains("<td>4.1</td>"));
        assert!(reply.ends_with("</table>"));
    }

    #[test]
    fn test_link_cells_become_buttons() {
        let table = phones(&[
            ("With Link", "1", None, "https://shop.example/p?id=1&ref=2"),
            ("Without Link", "2", None, ""),
        ]);
        let html = render_table(&table);

        assert!(html.contains(
            "<td><a href=\"https://shop.example/p?id=1&amp;ref=2\" target=\"_blank\" class=\"btn btn-warning btn-sm\">Open</a></td>"
        ));
        assert_eq!(html.matches("Open</a>").count(), 1);
        assert!(html.contains("<td></td>"));
    }

    #[test]
    fn test_blank_link_text_renders_empty() {
        assert_eq!(link_button(&Cell::Text("   ".to_string())), "");
        assert_eq!(link_button(&Cell::Empty), "");
    }

    #[test]
    fn test_missing_values_render_as_nan() {
        let table = phones(&[("Mystery", "N/A", None, "")]);
        let html = render_table(&table);
        assert_eq!(html.matches("<td>NaN</td>").count(), 2);
    }

    #[test]
    fn test_text_is_escaped() {
        let table = phones(&[("<script>alert(1)</script>", "1", None, "")]);
        let html = render_table(&table);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
