//! rule transformer: runs both grammars over one rule's parameters

use log::{debug, trace, warn};
use regex::Captures;

use super::options::Options;
use super::pattern::Grammar;
use super::rewrite::create_query;
use super::types::{Comparison, Feature, RangeExpression, Rewrite};
use crate::error::Result;

/// at-rules whose parameters hold media queries
pub const AT_RULE_NAMES: [&str; 2] = ["media", "custom-media"];

/// the view of a stylesheet at-rule the rewriter needs
///
/// implemented by whatever walks the stylesheet; see
/// [`crate::stylesheet`] for the built-in prelude scanner
pub trait AtRule {
    fn name(&self) -> &str;
    fn params(&self) -> &str;
    fn set_params(&mut self, params: String);
}

/// result of rewriting one parameter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// no `<` or `>` anywhere, grammars were not run
    Skipped,
    /// grammars ran but nothing was rewritten
    Unchanged,
    Rewritten {
        params: String,
        rewrites: Vec<Rewrite>,
    },
}

impl Outcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, Outcome::Rewritten { .. })
    }

    /// rewritten text, or `original` when nothing changed
    pub fn params_or<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            Outcome::Rewritten { params, .. } => params,
            _ => original,
        }
    }

    pub fn rewrites(&self) -> &[Rewrite] {
        match self {
            Outcome::Rewritten { rewrites, .. } => rewrites,
            _ => &[],
        }
    }
}

/// compiled rewriter for one set of [`Options`]
///
/// holds no mutable state, so one instance can serve any number of rules
/// and threads
#[derive(Debug, Clone)]
pub struct MinMax {
    grammar: Grammar,
    options: Options,
}

impl MinMax {
    pub fn new(options: Options) -> Result<Self> {
        let grammar = Grammar::compile(options.custom_value.as_ref())?;
        Ok(Self { grammar, options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// rewrite a `media` or `custom-media` rule in place
    ///
    /// other at-rules are ignored; returns what was replaced
    pub fn transform(&self, rule: &mut dyn AtRule) -> Vec<Rewrite> {
        if !AT_RULE_NAMES
            .iter()
            .any(|name| rule.name().eq_ignore_ascii_case(name))
        {
            return Vec::new();
        }

        match self.transform_params(rule.params()) {
            Outcome::Rewritten { params, rewrites } => {
                rule.set_params(params);
                rewrites
            }
            Outcome::Skipped | Outcome::Unchanged => Vec::new(),
        }
    }

    /// rewrite every range expression in `params`
    ///
    /// double comparisons go first so their halves are never seen by the
    /// single grammar
    pub fn transform_params(&self, params: &str) -> Outcome {
        if !params.contains('<') && !params.contains('>') {
            trace!("no range syntax in '{}'", params);
            return Outcome::Skipped;
        }

        let mut rewrites = Vec::new();

        let after_double = self.grammar.double().replace_all(params, |caps: &Captures| {
            record(&mut rewrites, &caps[0], self.rewrite_double(caps))
        });

        let after_single = self
            .grammar
            .single()
            .replace_all(&after_double, |caps: &Captures| {
                record(&mut rewrites, &caps[0], self.rewrite_single(caps))
            });

        if rewrites.is_empty() {
            Outcome::Unchanged
        } else {
            Outcome::Rewritten {
                params: after_single.into_owned(),
                rewrites,
            }
        }
    }

    fn rewrite_single(&self, caps: &Captures) -> Option<String> {
        let feature = known_feature(group(caps, "feature"), &caps[0])?;
        let comparison = Comparison::parse(group(caps, "op"))?;
        let value = non_empty(group(caps, "value"), &caps[0])?;

        let expr = RangeExpression::new(
            feature,
            comparison,
            !group(caps, "eq").is_empty(),
            value,
        );

        Some(create_query(&expr, &self.options))
    }

    fn rewrite_double(&self, caps: &Captures) -> Option<String> {
        let feature = known_feature(group(caps, "feature"), &caps[0])?;
        let left_op = Comparison::parse(group(caps, "left_op"))?;
        let right_op = Comparison::parse(group(caps, "right_op"))?;

        if left_op != right_op {
            debug!("mixed-direction range left unchanged: {}", &caps[0]);
            return None;
        }

        let left = non_empty(group(caps, "left"), &caps[0])?;
        let right = non_empty(group(caps, "right"), &caps[0])?;
        let left_eq = !group(caps, "left_eq").is_empty();
        let right_eq = !group(caps, "right_eq").is_empty();

        // `a < f < b` reads low to high, `a > f > b` high to low; each
        // equality flag stays with the value it is written next to
        let (min, min_inclusive, max, max_inclusive) = match left_op {
            Comparison::Less => (left, left_eq, right, right_eq),
            Comparison::Greater => (right, right_eq, left, left_eq),
        };

        let lower = RangeExpression::new(feature, Comparison::Greater, min_inclusive, min);
        let upper = RangeExpression::new(feature, Comparison::Less, max_inclusive, max);

        Some(format!(
            "{} and {}",
            create_query(&lower, &self.options),
            create_query(&upper, &self.options)
        ))
    }
}

/// push a rewrite record and return the text to splice in
fn record(rewrites: &mut Vec<Rewrite>, original: &str, replacement: Option<String>) -> String {
    match replacement {
        Some(replacement) => {
            trace!("rewrote '{}' -> '{}'", original, replacement);
            rewrites.push(Rewrite {
                original: original.to_string(),
                replacement: replacement.clone(),
            });
            replacement
        }
        None => original.to_string(),
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn known_feature(name: &str, matched: &str) -> Option<Feature> {
    let feature = Feature::parse(name);

    if feature.is_none() {
        match Feature::suggest(name) {
            Some(suggestion) => warn!(
                "unknown media feature '{}' in '{}' left unchanged (did you mean '{}'?)",
                name, matched, suggestion
            ),
            None => debug!("unknown media feature '{}' left unchanged", name),
        }
    }

    feature
}

fn non_empty<'t>(value: &'t str, matched: &str) -> Option<&'t str> {
    if value.trim().is_empty() {
        debug!("range without a value left unchanged: {}", matched);
        None
    } else {
        Some(value)
    }
}
