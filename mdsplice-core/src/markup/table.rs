//! Pipe-table line helpers
//!
//! A table is a header line, a separator line (`| --- | :-: |`) and any number of data lines.
//! These helpers only look at single lines; the block parser decides where a table starts and
//! ends.

/// Whether a line can take part in a table.
pub fn has_pipe(line: &str) -> bool {
    line.contains('|')
}

/// Header cells: the non-empty pipe-delimited segments of the line, trimmed.
pub fn header_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a data line into trimmed cells, ignoring one leading and one trailing pipe.
///
/// Interior empty cells are kept so that columns stay aligned.
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    line.split('|').map(|s| s.trim().to_string()).collect()
}

/// Whether a line is a separator row: pipe-bearing, and every cell consists only of hyphens and
/// colons with at least one hyphen.
pub fn is_separator(line: &str) -> bool {
    if !has_pipe(line) {
        return false;
    }
    split_row(line).iter().all(|cell| {
        !cell.is_empty()
            && cell.contains('-')
            && cell.chars().all(|c| c == '-' || c == ':')
    })
}

/// Pad or truncate a row to `columns` cells.
pub fn fit_row(mut cells: Vec<String>, columns: usize) -> Vec<String> {
    cells.truncate(columns);
    cells.resize(columns, String::new());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_cells_drop_empty_segments() {
        assert_eq!(
            header_cells("| Threads |  | Time (s) |"),
            vec!["Threads".to_string(), "Time (s)".to_string()]
        );
        assert_eq!(header_cells("a | b"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn split_row_keeps_interior_empty_cells() {
        assert_eq!(
            split_row("| 1 |  | 3 |"),
            vec!["1".to_string(), String::new(), "3".to_string()]
        );
    }

    #[test]
    fn separator_detection() {
        assert!(is_separator("|---|---|"));
        assert!(is_separator("| :--- | :---: | ---: |"));
        assert!(is_separator("--- | ---"));
        assert!(!is_separator("---"));
        assert!(!is_separator("| a | b |"));
        assert!(!is_separator("| :: | --- |"));
        assert!(!is_separator("|---||"));
    }

    #[test]
    fn fit_row_pads_and_truncates() {
        let short = fit_row(vec!["a".to_string()], 3);
        assert_eq!(short, vec!["a".to_string(), String::new(), String::new()]);

        let long = fit_row(vec!["a".into(), "b".into(), "c".into()], 2);
        assert_eq!(long, vec!["a".to_string(), "b".to_string()]);
    }
}
