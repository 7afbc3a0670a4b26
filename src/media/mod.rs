//! media query range syntax rewriter
//!
//! rewrites comparison-style media features into min-/max- features:
//! - single comparisons: `(width >= 300px)` -> `(min-width: 300px)`
//! - double comparisons: `(500px < width <= 1200px)` ->
//!   `(min-width: 501px) and (max-width: 1200px)`
//! - exclusive bounds are nudged to the nearest inclusive value
//! - custom values (e.g. `var(--bp)`) via a caller-supplied recognizer
//!
//! anything unrecognized is left exactly as written.

mod options;
mod pattern;
mod rewrite;
mod transform;
mod types;

pub use options::{CustomValue, Options};
pub use pattern::{value_template, Grammar, VALUE_TEMPLATE};
pub use rewrite::{create_query, STEP};
pub use transform::{AtRule, MinMax, Outcome, AT_RULE_NAMES};
pub use types::{Bound, Comparison, Feature, RangeExpression, Rewrite};
