//! FILENAME: core/pivot-table/src/html.rs
//! HTML markup for a table view.
//!
//! Emits a `pvtTable` element using the class names pivot UIs style
//! against. Label cells become `<th>`, value and total cells `<td>`.

use std::fmt::Write;

use crate::view::{TableView, ViewCell};

impl TableView {
    /// Renders the view as an HTML table.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table class=\"pvtTable\">");

        out.push_str("<thead>");
        for row in &self.header_rows {
            write_row(&mut out, row);
        }
        out.push_str("</thead><tbody>");
        for row in &self.body_rows {
            write_row(&mut out, row);
        }
        out.push_str("</tbody></table>");
        out
    }
}

fn write_row(out: &mut String, cells: &[ViewCell]) {
    out.push_str("<tr>");
    for cell in cells {
        write_cell(out, cell);
    }
    out.push_str("</tr>");
}

fn write_cell(out: &mut String, cell: &ViewCell) {
    let tag = if cell.cell_type.is_header() { "th" } else { "td" };

    out.push('<');
    out.push_str(tag);
    if let Some(class) = cell.cell_type.css_class() {
        let _ = write!(out, " class=\"{}\"", class);
    }
    if cell.row_span != 1 {
        let _ = write!(out, " rowspan=\"{}\"", cell.row_span);
    }
    if cell.col_span != 1 {
        let _ = write!(out, " colspan=\"{}\"", cell.col_span);
    }
    if let Some(color) = cell.color {
        let _ = write!(out, " style=\"background-color: {}\"", color.to_css());
    }
    out.push('>');
    out.push_str(&escape(&cell.text));
    let _ = write!(out, "</{}>", tag);
}

fn escape(text: &str) -> String {
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
