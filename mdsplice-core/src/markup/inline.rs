//! Inline tokenizer
//!
//! Splits the text of one block into styled runs. Three delimiter pairs are recognised, tried in
//! this order at every position, scanning left to right:
//!
//! - `**strong**`
//! - `*emphasis*` (at least one character between the stars, so a lone `*` stays literal)
//! - `` `monospace` ``
//!
//! Styles never nest and there is no escaping. A delimiter without a partner on the same block is
//! plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static INLINE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*|\*[^*]+\*|`[^`]+`").unwrap());

/// The style of a run. Styles are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineStyle {
    #[default]
    Plain,
    Strong,
    Emphasis,
    Monospace,
}

/// A contiguous styled span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub content: String,
    pub style: InlineStyle,
}

impl Run {
    pub fn new(content: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, InlineStyle::Plain)
    }

    pub fn bold(&self) -> bool {
        self.style == InlineStyle::Strong
    }

    pub fn italic(&self) -> bool {
        self.style == InlineStyle::Emphasis
    }

    pub fn monospace(&self) -> bool {
        self.style == InlineStyle::Monospace
    }
}

/// Tokenize a block's text into runs. Empty text yields no runs.
pub fn tokenize(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut last = 0;

    for span in INLINE_SPAN.find_iter(text) {
        if span.start() > last {
            runs.push(Run::plain(&text[last..span.start()]));
        }
        runs.push(styled_run(span.as_str()));
        last = span.end();
    }

    if last < text.len() {
        runs.push(Run::plain(&text[last..]));
    }
    runs
}

fn styled_run(token: &str) -> Run {
    if let Some(inner) = token
        .strip_prefix("**")
        .and_then(|t| t.strip_suffix("**"))
    {
        Run::new(inner, InlineStyle::Strong)
    } else if let Some(inner) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        Run::new(inner, InlineStyle::Monospace)
    } else {
        let inner = token
            .strip_prefix('*')
            .and_then(|t| t.strip_suffix('*'))
            .unwrap_or(token);
        Run::new(inner, InlineStyle::Emphasis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_inside_sentence() {
        assert_eq!(
            tokenize("Hello **world**."),
            vec![
                Run::plain("Hello "),
                Run::new("world", InlineStyle::Strong),
                Run::plain("."),
            ]
        );
    }

    #[test]
    fn all_three_styles() {
        assert_eq!(
            tokenize("*fast* `mpirun -n 4` **wins**"),
            vec![
                Run::new("fast", InlineStyle::Emphasis),
                Run::plain(" "),
                Run::new("mpirun -n 4", InlineStyle::Monospace),
                Run::plain(" "),
                Run::new("wins", InlineStyle::Strong),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_run_and_stable() {
        let first = tokenize("no delimiters here");
        let second = tokenize("no delimiters here");
        assert_eq!(first, vec![Run::plain("no delimiters here")]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_has_no_runs() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn lone_star_is_literal() {
        assert_eq!(tokenize("a * b"), vec![Run::plain("a * b")]);
        assert_eq!(tokenize("**"), vec![Run::plain("**")]);
    }

    #[test]
    fn unclosed_delimiters_stay_literal() {
        assert_eq!(
            tokenize("open **bold and `code"),
            vec![Run::plain("open **bold and `code")]
        );
    }

    #[test]
    fn star_inside_monospace_is_kept() {
        assert_eq!(
            tokenize("`a*b`"),
            vec![Run::new("a*b", InlineStyle::Monospace)]
        );
    }

    #[test]
    fn style_flags_are_exclusive() {
        let run = Run::new("x", InlineStyle::Strong);
        assert!(run.bold());
        assert!(!run.italic());
        assert!(!run.monospace());
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        assert_eq!(
            tokenize("Время **выполнения** в `с`"),
            vec![
                Run::plain("Время "),
                Run::new("выполнения", InlineStyle::Strong),
                Run::plain(" в "),
                Run::new("с", InlineStyle::Monospace),
            ]
        );
    }
}
