//! Block parser
//!
//! A single forward pass over the source lines with at most one line of lookahead (to confirm a
//! table separator). Rules are tried in a fixed priority order:
//!
//! | Priority | Line shape                                   | Block                  |
//! |----------|----------------------------------------------|------------------------|
//! | 1        | `#`..`####+` followed by whitespace          | `Heading` (level 1-3)  |
//! | 2        | `---` (three or more hyphens)                | `HorizontalRule`       |
//! | 3        | ```` ``` ```` fence, optional info string     | `Code` until the fence |
//! | 4        | `![alt](path)`                               | `Image`                |
//! | 5        | pipe line followed by a separator line       | `Table`                |
//! | 6        | `- `, `* ` or `<digits>. `                   | `Bullet` / `Numbered`  |
//! | 7        | whitespace only                              | `Blank`                |
//! | 8        | anything else                                | `Paragraph` (verbatim) |
//!
//! Paragraph lines are never merged: every non-special line becomes its own paragraph.

use super::table::{fit_row, has_pipe, header_cells, is_separator, split_row};
use super::{Block, CodeBlock, Heading, HeadingLevel, ImageRef, ParseOptions, TableBlock};
use once_cell::sync::Lazy;
use regex::Regex;

static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{3,}\s*$").unwrap());
static IMAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)\s*$").unwrap());
static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());
static FIRST_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^## 1\.").unwrap());

const FENCE: &str = "```";

/// Parse a whole source text with default options.
pub fn parse_source(source: &str) -> Vec<Block> {
    parse_source_with_options(source, &ParseOptions::default())
}

/// Parse a whole source text. Lines end at `\n`; a trailing `\r` is dropped.
pub fn parse_source_with_options(source: &str, options: &ParseOptions) -> Vec<Block> {
    let lines: Vec<&str> = source.lines().collect();
    parse_blocks_with_options(&lines, options)
}

/// Parse source lines with default options.
pub fn parse_blocks(lines: &[&str]) -> Vec<Block> {
    parse_blocks_with_options(lines, &ParseOptions::default())
}

/// Parse source lines into blocks. Total: every input produces a block sequence.
pub fn parse_blocks_with_options(lines: &[&str], options: &ParseOptions) -> Vec<Block> {
    let lines = if options.skip_front_matter {
        skip_front_matter(lines)
    } else {
        lines
    };
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(heading) = parse_heading(line, options) {
            blocks.push(Block::Heading(heading));
            i += 1;
        } else if HORIZONTAL_RULE.is_match(line) {
            blocks.push(Block::HorizontalRule);
            i += 1;
        } else if let Some(language) = fence_info(line) {
            let (code, consumed) = collect_code(&lines[i + 1..], language);
            blocks.push(Block::Code(code));
            i += 1 + consumed;
        } else if let Some(image) = parse_image(line) {
            blocks.push(Block::Image(image));
            i += 1;
        } else if is_table_header(line) && lines.get(i + 1).is_some_and(|next| is_separator(next)) {
            let (table, consumed) = collect_table(line, &lines[i + 2..]);
            blocks.push(Block::Table(table));
            i += 2 + consumed;
        } else if let Some(text) = bullet_text(line) {
            blocks.push(Block::Bullet { text });
            i += 1;
        } else if let Some(text) = numbered_text(line) {
            blocks.push(Block::Numbered { text });
            i += 1;
        } else if line.trim().is_empty() {
            blocks.push(Block::Blank);
            i += 1;
        } else {
            blocks.push(Block::Paragraph {
                text: line.to_string(),
            });
            i += 1;
        }
    }

    log::debug!("parsed {} lines into {} blocks", lines.len(), blocks.len());
    blocks
}

/// The lines from the first `## 1.` heading on, or all of them when there is none.
fn skip_front_matter<'a, 'b>(lines: &'a [&'b str]) -> &'a [&'b str] {
    match lines.iter().position(|line| FIRST_SECTION.is_match(line)) {
        Some(start) => {
            log::debug!("skipping {start} lines of front matter");
            &lines[start..]
        }
        None => lines,
    }
}

// A header needs at least one non-empty cell, otherwise the table would have no columns.
fn is_table_header(line: &str) -> bool {
    has_pipe(line) && !header_cells(line).is_empty()
}

fn parse_heading(line: &str, options: &ParseOptions) -> Option<Heading> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim().to_string();
    let appendix = options.is_appendix_heading(&text);
    Some(Heading {
        level: HeadingLevel::from_marker_len(hashes),
        text,
        appendix,
    })
}

/// The info string of an opening fence, or `None` if the line is not a fence.
fn fence_info(line: &str) -> Option<Option<String>> {
    let info = line.trim_start().strip_prefix(FENCE)?.trim();
    Some((!info.is_empty()).then(|| info.to_string()))
}

fn is_closing_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Consume code lines up to and including the closing fence. A missing fence takes the rest of
/// the input. Returns the block and the number of lines consumed after the opening fence.
fn collect_code(lines: &[&str], language: Option<String>) -> (CodeBlock, usize) {
    let body_len = lines
        .iter()
        .position(|line| is_closing_fence(line))
        .unwrap_or(lines.len());
    let closed = body_len < lines.len();

    let code = CodeBlock {
        language,
        lines: lines[..body_len].iter().map(|l| l.to_string()).collect(),
    };
    (code, body_len + usize::from(closed))
}

fn parse_image(line: &str) -> Option<ImageRef> {
    let captures = IMAGE_LINE.captures(line.trim_start())?;
    Some(ImageRef {
        alt: captures[1].to_string(),
        path: captures[2].trim().to_string(),
    })
}

/// Build a table from the header line and the lines following the separator. Returns the table
/// and the number of data lines consumed.
fn collect_table(header_line: &str, rest: &[&str]) -> (TableBlock, usize) {
    let header = header_cells(header_line);
    let columns = header.len();
    let rows: Vec<Vec<String>> = rest
        .iter()
        .take_while(|line| has_pipe(line))
        .map(|line| fit_row(split_row(line), columns))
        .collect();
    let consumed = rows.len();
    (TableBlock { header, rows }, consumed)
}

fn bullet_text(line: &str) -> Option<String> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(|text| text.trim().to_string())
}

fn numbered_text(line: &str) -> Option<String> {
    let marker = NUMBERED_MARKER.find(line)?;
    Some(line[marker.end()..].trim().to_string())
}
