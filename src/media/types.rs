//! core types for the media range rewriter

use std::fmt;

use strsim::levenshtein;

/// media features that have min-/max- forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Width,
    Height,
    DeviceWidth,
    DeviceHeight,
    AspectRatio,
    DeviceAspectRatio,
    Color,
    ColorIndex,
    Monochrome,
    Resolution,
}

/// max edit distance for a feature name to count as a likely typo
const SUGGESTION_DISTANCE: usize = 2;

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::Width,
        Feature::Height,
        Feature::DeviceWidth,
        Feature::DeviceHeight,
        Feature::AspectRatio,
        Feature::DeviceAspectRatio,
        Feature::Color,
        Feature::ColorIndex,
        Feature::Monochrome,
        Feature::Resolution,
    ];

    /// name as written in a media query
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Width => "width",
            Feature::Height => "height",
            Feature::DeviceWidth => "device-width",
            Feature::DeviceHeight => "device-height",
            Feature::AspectRatio => "aspect-ratio",
            Feature::DeviceAspectRatio => "device-aspect-ratio",
            Feature::Color => "color",
            Feature::ColorIndex => "color-index",
            Feature::Monochrome => "monochrome",
            Feature::Resolution => "resolution",
        }
    }

    /// canonical unit suffix, empty for ratios and counts
    pub fn unit(&self) -> &'static str {
        match self {
            Feature::Width | Feature::Height | Feature::DeviceWidth | Feature::DeviceHeight => {
                "px"
            }
            Feature::Resolution => "dpi",
            Feature::AspectRatio
            | Feature::DeviceAspectRatio
            | Feature::Color
            | Feature::ColorIndex
            | Feature::Monochrome => "",
        }
    }

    /// look up a feature by its exact (lowercase) name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// closest known feature to an unrecognized name, if it looks like a typo
    pub fn suggest(name: &str) -> Option<Self> {
        let name_lower = name.to_lowercase();

        Self::ALL
            .iter()
            .map(|f| (*f, levenshtein(&name_lower, f.name())))
            .filter(|(_, distance)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(_, distance)| *distance)
            .map(|(f, _)| f)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// which end of a range a min-/max- feature expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn prefix(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
        }
    }
}

/// direction of a range comparison; the `=` part is carried separately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>` or `>=`
    Greater,
    /// `<` or `<=`
    Less,
}

impl Comparison {
    /// parse the operator character captured by the grammars
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ">" => Some(Comparison::Greater),
            "<" => Some(Comparison::Less),
            _ => None,
        }
    }

    /// +1 for `>`, -1 for `<`
    pub fn sign(&self) -> i32 {
        match self {
            Comparison::Greater => 1,
            Comparison::Less => -1,
        }
    }

    /// `feature > v` is a lower bound, `feature < v` an upper bound
    pub fn bound(&self) -> Bound {
        match self {
            Comparison::Greater => Bound::Min,
            Comparison::Less => Bound::Max,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Greater => write!(f, ">"),
            Comparison::Less => write!(f, "<"),
        }
    }
}

/// a single `feature <op> value` comparison lifted out of a regex match
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression<'a> {
    pub feature: Feature,
    pub comparison: Comparison,
    /// true for `<=` / `>=`
    pub inclusive: bool,
    /// raw value text: a number with optional unit, or a custom value
    pub value: &'a str,
}

impl<'a> RangeExpression<'a> {
    pub fn new(feature: Feature, comparison: Comparison, inclusive: bool, value: &'a str) -> Self {
        Self {
            feature,
            comparison,
            inclusive,
            value,
        }
    }
}

impl fmt::Display for RangeExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {}{} {})",
            self.feature,
            self.comparison,
            if self.inclusive { "=" } else { "" },
            self.value
        )
    }
}

/// one replaced span of parameter text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: String,
    pub replacement: String,
}
