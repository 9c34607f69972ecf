//! Light markup used by command output
//!
//! Lines starting with `# ` are headings and lines starting with `- ` are
//! bullets. Within a line, `**text**` is strong. Everything else is literal.

/// A run of text with uniform styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub strong: bool,
}

/// One parsed line of markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLine<'a> {
    Heading(Vec<Span<'a>>),
    Bullet(Vec<Span<'a>>),
    Text(Vec<Span<'a>>),
    Blank,
}

/// Parse `source` line by line
pub fn parse(source: &str) -> Vec<MarkupLine<'_>> {
    source.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> MarkupLine<'_> {
    if line.trim().is_empty() {
        MarkupLine::Blank
    } else if let Some(rest) = line.strip_prefix("# ") {
        MarkupLine::Heading(spans(rest))
    } else if let Some(rest) = line.strip_prefix("- ") {
        MarkupLine::Bullet(spans(rest))
    } else {
        MarkupLine::Text(spans(line))
    }
}

/// Split `text` on `**` markers. An unmatched trailing marker is literal.
pub fn spans(text: &str) -> Vec<Span<'_>> {
    let markers: Vec<usize> = text.match_indices("**").map(|(i, _)| i).collect();
    let usable = markers.len() - markers.len() % 2;

    let mut spans = Vec::new();
    let mut start = 0;
    for pair in markers[..usable].chunks(2) {
        let (open, close) = (pair[0], pair[1]);
        if open > start {
            spans.push(Span {
                text: &text[start..open],
                strong: false,
            });
        }
        if close > open + 2 {
            spans.push(Span {
                text: &text[open + 2..close],
                strong: true,
            });
        }
        start = close + 2;
    }
    if start < text.len() {
        spans.push(Span {
            text: &text[start..],
            strong: false,
        });
    }
    spans
}
