//! rewrite configuration: custom value recognizer and calc() switch

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// recognizer for non-standard values such as `var(--bp)` or `$tablet`
///
/// holds both the compiled recognizer (with its own flags) and the bare
/// pattern body, which is spliced into the range grammars
#[derive(Debug, Clone)]
pub struct CustomValue {
    body: String,
    regex: Regex,
}

impl CustomValue {
    /// parse either a `/body/flags` literal or a bare pattern
    ///
    /// flags `i`, `m` and `s` map onto the regex builder; `g`, `u` and `y`
    /// carry no meaning for a recognizer and are accepted but ignored
    pub fn parse(pattern: &str) -> Result<Self> {
        match split_literal(pattern) {
            Some((body, flags)) => Self::build(pattern, body, flags),
            None => Self::build(pattern, pattern, ""),
        }
    }

    fn build(pattern: &str, body: &str, flags: &str) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::EmptyCustomValue);
        }

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'y' => {}
                other => {
                    return Err(Error::CustomValueFlag {
                        pattern: pattern.to_string(),
                        flag: other,
                    })
                }
            }
        }

        let regex = builder.build().map_err(|source| Error::CustomValuePattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            body: body.to_string(),
            regex,
        })
    }

    /// pattern body without delimiters or flags
    pub fn body(&self) -> &str {
        &self.body
    }

    /// unanchored search, so `var(--x)` also matches inside `-var(--x)`
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// split `/body/flags` at the first and last slash
fn split_literal(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    Some((&rest[..end], &rest[end + 1..]))
}

/// options fixed for the lifetime of one rewriter
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// values matching this are treated as opaque and offset symbolically
    pub custom_value: Option<CustomValue>,
    /// wrap exclusive custom bounds in `calc()` using the feature's unit
    pub use_calc: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_value(mut self, custom_value: CustomValue) -> Self {
        self.custom_value = Some(custom_value);
        self
    }

    pub fn with_calc(mut self, use_calc: bool) -> Self {
        self.use_calc = use_calc;
        self
    }
}
