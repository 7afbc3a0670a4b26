//! range grammar compiler
//!
//! builds the single (`(width >= 300px)`) and double
//! (`(500px <= width <= 1200px)`) comparison matchers from one value grammar,
//! optionally widened with a custom value pattern

use regex::{Regex, RegexBuilder};

use super::options::CustomValue;
use crate::error::Result;

/// plain numbers, decimals, unit suffixes and `a/b` ratios
pub const VALUE_TEMPLATE: &str = r"-?[0-9]*\.?(?:\s*/?\s*)?[0-9]+[a-z]*";

/// `(<mf-name> <|> [=] <mf-value>)`
const SINGLE_TEMPLATE: &str =
    r"\(\s*(?P<feature>[a-z-]+?)\s*(?P<op>[<>])(?P<eq>=?)\s*(?P<value>{value})\s*\)";

/// `(<mf-value> <|> [=] <mf-name> <|> [=] <mf-value>)`
const DOUBLE_TEMPLATE: &str = concat!(
    r"\(\s*(?P<left>{value})\s*(?P<left_op><|>)(?P<left_eq>=?)",
    r"\s*(?P<feature>[a-z-]+)",
    r"\s*(?P<right_op><|>)(?P<right_eq>=?)\s*(?P<right>{value})\s*\)"
);

/// value alternatives, standard grammar first
///
/// each alternative is optional so the value group always participates
pub fn value_template(custom: Option<&CustomValue>) -> String {
    std::iter::once(VALUE_TEMPLATE)
        .chain(custom.map(CustomValue::body))
        .filter(|template| !template.is_empty())
        .map(|template| format!("(?:{})?", template))
        .collect::<Vec<_>>()
        .join("|")
}

/// both compiled matchers for one configuration
#[derive(Debug, Clone)]
pub struct Grammar {
    single: Regex,
    double: Regex,
}

impl Grammar {
    pub fn compile(custom: Option<&CustomValue>) -> Result<Self> {
        let value = value_template(custom);

        Ok(Self {
            single: build(&SINGLE_TEMPLATE.replace("{value}", &value))?,
            double: build(&DOUBLE_TEMPLATE.replace("{value}", &value))?,
        })
    }

    /// matcher for `(feature op value)`
    pub fn single(&self) -> &Regex {
        &self.single
    }

    /// matcher for `(value op feature op value)`
    pub fn double(&self) -> &Regex {
        &self.double
    }
}

fn build(pattern: &str) -> Result<Regex> {
    let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
    Ok(regex)
}
