//! rewrite media query range syntax into min-/max- media features
//!
//! ```
//! use media_minmax::{MinMax, Options};
//!
//! let engine = MinMax::new(Options::default()).unwrap();
//! let outcome = engine.transform_params("(500px < width <= 1200px)");
//! assert_eq!(
//!     outcome.params_or(""),
//!     "(min-width: 501px) and (max-width: 1200px)"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod stylesheet;

pub use error::Error;
pub use media::{
    create_query, AtRule, Bound, Comparison, CustomValue, Feature, MinMax, Options, Outcome,
    RangeExpression, Rewrite,
};
