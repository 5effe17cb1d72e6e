//! Stage-direction lexer.
//!
//! Recognises `*...*` stage directions and `(...)` parenthetical asides
//! as spans distinct from literal text. Unclosed markers are treated as
//! literal characters — a stray asterisk must not eat the rest of the
//! roast.

/// One lexed span of roast text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Literal text to be spoken.
    Text(String),
    /// A `*...*` stage direction (delimiters stripped).
    Stage(String),
    /// A `(...)` aside (delimiters stripped).
    Aside(String),
}

/// Lex roast text into spans.
pub fn lex(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let close = match c {
            '*' => Some('*'),
            '(' => Some(')'),
            _ => None,
        };
        if let Some(close) = close {
            if let Some(end) = find_close(&chars, i + 1, close) {
                if !text.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut text)));
                }
                let inner: String = chars[i + 1..end].iter().collect();
                let span = if c == '*' {
                    Span::Stage(inner.trim().to_string())
                } else {
                    Span::Aside(inner.trim().to_string())
                };
                spans.push(span);
                i = end + 1;
                continue;
            }
        }
        text.push(c);
        i += 1;
    }
    if !text.is_empty() {
        spans.push(Span::Text(text));
    }
    spans
}

/// Find the closing delimiter at or after `from`, staying on one line.
///
/// Directions never span lines in practice; refusing to match across a
/// newline keeps a dangling `*` from swallowing a paragraph.
fn find_close(chars: &[char], from: usize, close: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            c if c == close => return Some(i),
            '\n' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Spoken text only: concatenated literal spans with directions and
/// asides removed, whitespace collapsed.
pub fn strip_directions(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for span in lex(input) {
        if let Span::Text(text) = span {
            out.push_str(&text);
        }
    }
    collapse_whitespace(&out)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
