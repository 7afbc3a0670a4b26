use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::media::{CustomValue, Options};

/// keys accepted at the top level of the config file
pub const KNOWN_KEYS: [&str; 5] = [
    "customValueRegExp",
    "customValueRegexp",
    "custom_value_regexp",
    "useCalc",
    "use_calc",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// recognizer for custom values, `/body/flags` or a bare pattern
    #[serde(
        rename = "customValueRegExp",
        alias = "customValueRegexp",
        alias = "custom_value_regexp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_value_regexp: Option<String>,

    /// express exclusive custom bounds with calc()
    #[serde(rename = "useCalc", alias = "use_calc", default)]
    pub use_calc: bool,
}

impl Config {
    /// sample configuration recognizing CSS custom properties
    pub fn with_examples() -> Self {
        Self {
            custom_value_regexp: Some(r"/var\(--[a-z0-9-]+\)/i".to_string()),
            use_calc: true,
        }
    }

    /// compile into rewriter options
    pub fn to_options(&self) -> Result<Options, Error> {
        let mut options = Options::new().with_calc(self.use_calc);

        if let Some(pattern) = &self.custom_value_regexp {
            options = options.with_custom_value(CustomValue::parse(pattern)?);
        }

        Ok(options)
    }
}
