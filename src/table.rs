//! Pipe tables: consecutive lines starting with `|`.

use crate::block::line_len;
use crate::event::Align;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Align>,
    /// Whether the first row sits above a delimiter row.
    pub header: bool,
    /// Every row padded or cut to the column count.
    pub rows: Vec<Vec<String>>,
}

/// Reads a table at the start of `src`. Returns the table and the bytes it covers.
pub fn parse(src: &str) -> Option<(Table, usize)> {
    let mut pos = 0;
    let mut rows = Vec::new();
    let mut columns = None;

    while src[pos..].starts_with('|') {
        let len = line_len(&src[pos..]);
        let cells = split_row(&src[pos..pos + len]);
        pos += len;
        if rows.len() == 1 && columns.is_none() {
            if let Some(aligns) = delimiter_row(&cells) {
                columns = Some(aligns);
                continue;
            }
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return None;
    }
    let header = columns.is_some();
    let columns = columns.unwrap_or_else(|| {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        vec![Align::Left; width]
    });
    for row in &mut rows {
        row.resize(columns.len(), String::new());
    }
    Some((
        Table {
            columns,
            header,
            rows,
        },
        pos,
    ))
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim_end_matches(['\n', '\r']).trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn delimiter_row(cells: &[String]) -> Option<Vec<Align>> {
    cells
        .iter()
        .map(|cell| {
            let left = cell.starts_with(':');
            let right = cell.ends_with(':') && cell.len() > 1;
            let dashes = cell.trim_matches(':');
            if dashes.is_empty() || !dashes.bytes().all(|b| b == b'-') {
                return None;
            }
            Some(match (left, right) {
                (true, true) => Align::Center,
                (false, true) => Align::Right,
                _ => Align::Left,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_table_with_alignment() {
        let src = "| Name | Size |\n|:-----|----:|\n| a | 1 |\n| b |\nafter\n";
        let (table, consumed) = parse(src).expect("table");
        assert!(table.header);
        assert_eq!(table.columns, vec![Align::Left, Align::Right]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Name".to_string(), "Size".to_string()],
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), String::new()],
            ]
        );
        assert_eq!(&src[consumed..], "after\n");
    }

    #[test]
    fn centered_columns() {
        let (table, _) = parse("| x |\n| :-: |\n").expect("table");
        assert_eq!(table.columns, vec![Align::Center]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn table_without_delimiter_has_no_header() {
        let (table, consumed) = parse("| a | b |\n| c |").expect("table");
        assert!(!table.header);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[1], vec!["c".to_string(), String::new()]);
        assert_eq!(consumed, 15);
    }

    #[test]
    fn not_a_table() {
        assert_eq!(parse("text | pipe\n"), None);
    }
}
