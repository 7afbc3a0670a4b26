//! at-rule prelude scanner
//!
//! finds `@media` and `@custom-media` headers in stylesheet text and feeds
//! them through [`MinMax::transform`]. this is not a CSS parser: it only
//! tracks comments and strings well enough to locate at-rule names and the
//! parameter text up to the next `{` or `;` (or the `}` of an enclosing
//! block).

use crate::media::{AtRule, MinMax, Rewrite, AT_RULE_NAMES};

/// one rewritten at-rule prelude
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChange {
    /// 1-based line of the `@`
    pub line: usize,
    pub name: String,
    pub before: String,
    pub after: String,
    pub rewrites: Vec<Rewrite>,
}

/// stylesheet text after rewriting, plus what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub css: String,
    pub changes: Vec<RuleChange>,
}

impl Processed {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// number of individual range expressions rewritten
    pub fn rewrite_count(&self) -> usize {
        self.changes.iter().map(|c| c.rewrites.len()).sum()
    }
}

/// an at-rule prelude lifted out of the source text
struct Prelude<'a> {
    name: &'a str,
    params: String,
}

impl AtRule for Prelude<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn params(&self) -> &str {
        &self.params
    }

    fn set_params(&mut self, params: String) {
        self.params = params;
    }
}

/// rewrite every media prelude in `css`
///
/// text outside rewritten preludes is copied through untouched
pub fn process(css: &str, engine: &MinMax) -> Processed {
    let bytes = css.as_bytes();
    let mut out = String::with_capacity(css.len());
    let mut changes = Vec::new();
    let mut copied = 0;
    let mut lines = LineCounter::default();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'\\' => i += 2,
            b'@' if starts_rule(bytes, i) => {
                let name_start = i + 1;
                let name_end = scan_ident(bytes, name_start);
                let name = &css[name_start..name_end];

                if !AT_RULE_NAMES.iter().any(|n| name.eq_ignore_ascii_case(n)) {
                    i = name_end;
                    continue;
                }

                let prelude_end = find_prelude_end(bytes, name_end);
                let raw = &css[name_end..prelude_end];
                let params = raw.trim();

                if !params.is_empty() {
                    let params_start = name_end + (raw.len() - raw.trim_start().len());
                    let params_end = params_start + params.len();

                    let mut rule = Prelude {
                        name,
                        params: params.to_string(),
                    };
                    let rewrites = engine.transform(&mut rule);

                    if !rewrites.is_empty() {
                        out.push_str(&css[copied..params_start]);
                        out.push_str(&rule.params);
                        copied = params_end;

                        changes.push(RuleChange {
                            line: lines.line_at(css, i),
                            name: name.to_string(),
                            before: params.to_string(),
                            after: rule.params,
                            rewrites,
                        });
                    }
                }

                i = prelude_end;
            }
            _ => i += 1,
        }
    }

    out.push_str(&css[copied..]);

    Processed { css: out, changes }
}

/// an `@` only opens a rule at a statement boundary, not inside `url(a@b)`
fn starts_rule(bytes: &[u8], at: usize) -> bool {
    match at.checked_sub(1).map(|p| bytes[p]) {
        None => true,
        Some(prev) => prev.is_ascii_whitespace() || matches!(prev, b'{' | b'}' | b';' | b'/'),
    }
}

fn scan_ident(bytes: &[u8], start: usize) -> usize {
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-' || **b == b'_')
        .count();
    start + len
}

/// index after the closing `*/`, or end of input
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    let body = start + 2;
    bytes[body..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |p| body + p + 2)
}

/// index after the closing quote; unterminated strings stop at a newline
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }

    bytes.len()
}

/// index of the `{` or `;` ending a prelude, or of the `}` closing the
/// enclosing block when the prelude is unterminated; end of input otherwise
fn find_prelude_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'{' | b';' | b'}' => return i,
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }

    bytes.len()
}

/// incremental line numbering; positions must be queried in order
#[derive(Default)]
struct LineCounter {
    pos: usize,
    newlines: usize,
}

impl LineCounter {
    fn line_at(&mut self, text: &str, pos: usize) -> usize {
        self.newlines += text.as_bytes()[self.pos..pos]
            .iter()
            .filter(|b| **b == b'\n')
            .count();
        self.pos = pos;
        self.newlines + 1
    }
}
