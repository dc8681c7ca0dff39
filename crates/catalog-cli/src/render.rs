//! Text rendering of the catalog forest and of matching rows.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use catalog_filter::FilterSession;
use catalog_model::{FlatRecord, HierarchyNode};

/// Options for [`render_tree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeStyle {
    /// Append each node's id so it can be passed to `--select` / `--expand`.
    pub show_ids: bool,
}

/// Render the visible part of the session's forest as an indented tree.
///
/// Collapsed nodes show `[+]`, expanded ones `[-]`, leaves `-`. The selected
/// node is marked with `*`.
pub fn render_tree(session: &FilterSession, style: TreeStyle) -> String {
    let mut lines = Vec::new();
    for root in session.forest() {
        render_node(session, root, 0, style, &mut lines);
    }
    lines.join("\n")
}

fn render_node(
    session: &FilterSession,
    node: &HierarchyNode,
    depth: usize,
    style: TreeStyle,
    lines: &mut Vec<String>,
) {
    let expanded = session.is_expanded(&node.id);
    let marker = match (node.is_leaf(), expanded) {
        (true, _) => "-",
        (false, true) => "[-]",
        (false, false) => "[+]",
    };
    let mut line = format!("{}{marker} {}", "    ".repeat(depth), node.name);
    if session.is_selected(node) {
        line.push_str(" *");
    }
    if style.show_ids {
        line.push_str(&format!("  ({})", node.id));
    }
    lines.push(line);

    if expanded {
        for child in &node.children {
            render_node(session, child, depth + 1, style, lines);
        }
    }
}

/// Build a table of catalog rows.
pub fn records_table(records: &[FlatRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product ID"),
        header_cell("Product"),
        header_cell("Category"),
        header_cell("Subcategory"),
        header_cell("Class"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for record in records {
        table.add_row(vec![
            Cell::new(record.product_id()),
            Cell::new(record.product_name()),
            Cell::new(record.category()),
            optional_cell(record.subcategory()),
            optional_cell(record.class()),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}
