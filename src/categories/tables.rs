//! Tables: one row per line, cells split on `|`, first row is the header

use std::sync::Arc;

use super::variant;
use crate::core::block::{escape, BlockKind};
use crate::core::fields::{items, join_lines, join_parts, parts, BlockFields};
use crate::core::markup::Element;
use crate::core::BlockRecord;

pub const TABLE_KINDS: &[&str] = &["table-basic", "table-striped", "table-comparison"];

pub struct TableKind {
    name: &'static str,
}

impl TableKind {
    fn rows(text: &str) -> Vec<Vec<String>> {
        items(text, 0)
            .iter()
            .map(|row| parts(row).into_iter().map(str::to_string).collect())
            .collect()
    }
}

impl BlockKind for TableKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tag(&self) -> &'static str {
        "table"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Table { rows: Self::rows(text) }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Table { rows } => {
                let lines: Vec<String> = rows.iter().map(|cells| join_parts(cells)).collect();
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let rows = Self::rows(&record.text);
        let mut html = format!("  <table class=\"ef-table ef-{}\">\n", self.name);

        let mut rows = rows.iter();
        if let Some(header) = rows.next() {
            html.push_str("    <thead>\n      <tr>\n");
            for cell in header {
                html.push_str(&format!("        <th>{}</th>\n", escape(cell.trim())));
            }
            html.push_str("      </tr>\n    </thead>\n    <tbody>\n");
            for row in rows {
                html.push_str("      <tr>\n");
                for cell in row {
                    html.push_str(&format!("        <td>{}</td>\n", escape(cell.trim())));
                }
                html.push_str("      </tr>\n");
            }
            html.push_str("    </tbody>\n");
        }

        html.push_str("  </table>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let mut lines = Vec::new();

        let header: Vec<String> = el
            .first_tag("thead")
            .map(|thead| thead.all_tag("th").iter().map(|th| th.text()).collect())
            .unwrap_or_default();
        if !header.is_empty() {
            lines.push(join_parts(&header));
        }

        if let Some(tbody) = el.first_tag("tbody") {
            for tr in tbody.all_tag("tr") {
                let cells: Vec<String> = tr.all_tag("td").iter().map(|td| td.text()).collect();
                lines.push(join_parts(&cells));
            }
        }

        self.record(join_lines(&lines))
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    TABLE_KINDS
        .iter()
        .map(|&name| Arc::new(TableKind { name }) as Arc<dyn BlockKind>)
        .collect()
}

/// A bare `ef-table` is a basic table.
pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("table") && el.has_class("ef-table") {
        variant(el, TABLE_KINDS).or(Some("table-basic"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    #[test]
    fn test_table_rows_and_cells() {
        let kind = TableKind { name: "table-comparison" };
        let BlockFields::Table { rows } = kind.decode("Feature|Basic|Pro\nPrice|$9|$29") else {
            panic!("wrong shape");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Feature", "Basic", "Pro"]);
        assert_eq!(rows[1], vec!["Price", "$9", "$29"]);
    }

    #[test]
    fn test_table_reimport() {
        let kind = TableKind { name: "table-striped" };
        let record = kind.record("Plan|Seats\nTeam|10\nOrg|100".into());
        assert_eq!(record.tag, "table");

        let html = kind.render(&record);
        let fragment = Fragment::parse(&html).unwrap();
        let el = fragment.elements().next().unwrap();
        assert_eq!(detect(el), Some("table-striped"));
        assert_eq!(kind.import(el), record);
    }

    #[test]
    fn test_empty_table_renders_bare_element() {
        let kind = TableKind { name: "table-basic" };
        let html = kind.render(&kind.record(String::new()));
        assert_eq!(html, "  <table class=\"ef-table ef-table-basic\">\n  </table>\n");
    }

    #[test]
    fn test_cells_escaped() {
        let kind = TableKind { name: "table-basic" };
        let html = kind.render(&kind.record("<b>|x".into()));
        assert!(html.contains("&lt;b&gt;"));
    }
}
