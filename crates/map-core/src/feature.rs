use std::{borrow::Cow, fmt::Display, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use strum::{AsRefStr, EnumIter, EnumString};

use crate::formatting::{format_list, is_or_are, pluralize};

static WHITEBOARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("W").unwrap());
static BLACKBOARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("B").unwrap());

/// The value of a flag feature that means the room has the thing.
const FLAG_SET: &str = "Y";

/// One raw attribute of a room, like `projectors: "Y"` or `capacity: 42`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: FeatureValue,
}

impl Feature {
    /// Creates a feature with a text value.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Feature {
        Feature {
            name: name.into(),
            value: FeatureValue::Text(value.into()),
        }
    }

    /// Creates a feature with a numeric value.
    pub fn number(name: impl Into<String>, value: f64) -> Feature {
        Feature {
            name: name.into(),
            value: FeatureValue::Number(value),
        }
    }
}

/// The raw value of a feature, as it appears in the room data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

impl FeatureValue {
    /// The value as text. Numbers are formatted the same way they're displayed.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FeatureValue::Text(s) => Cow::Borrowed(s),
            FeatureValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// The value as a number, if it is one or if it's text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Text(s) => s.trim().parse().ok(),
            FeatureValue::Number(n) => Some(*n),
        }
    }

    /// Whether this is a flag value that's turned on.
    pub fn is_flag_set(&self) -> bool {
        matches!(self, FeatureValue::Text(s) if s == FLAG_SET)
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_text().fmt(f)
    }
}

/// The kinds of features that have display rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, strum::Display,
)]
#[strum(serialize_all = "camelCase")]
pub enum FeatureKind {
    Exclusive,
    Capacity,
    Projectors,
    Boards,
    RearrangableFurniture,
    Computers,
    Outlets,
    Lab,
}

/// An identifier for the icon to show next to a feature.
///
/// These are opaque to this crate; it's up to whatever draws the room card to map them to actual icons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum IconToken {
    GraduationCap,
    Users,
    Video,
    Magic,
    Couch,
    Desktop,
    Plug,
    Flask,
}

/// The displayable part of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSnippet {
    pub icon: IconToken,
    pub text: String,
}

/// Everything needed to show a feature in a feature list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDisplay {
    pub visible: bool,
    pub icon: IconToken,
    pub text: String,
}

/// A feature name with no display rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeatureError {
    pub name: String,
}

impl Display for UnknownFeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no display rule for feature {:?}", self.name)
    }
}

impl std::error::Error for UnknownFeatureError {}

/// Decides whether a feature is worth showing, and how to show it.
pub trait FeatureRule: Send + Sync {
    /// Determines whether a feature with the provided value should be displayed.
    fn show(&self, value: &FeatureValue) -> bool;

    /// Produces the icon and text for a feature with the provided value.
    fn render(&self, value: &FeatureValue) -> FeatureSnippet;
}

/// Who usually gets to use the room. Always shown.
pub struct ExclusiveRule;

impl FeatureRule for ExclusiveRule {
    fn show(&self, _: &FeatureValue) -> bool {
        true
    }

    fn render(&self, value: &FeatureValue) -> FeatureSnippet {
        let text = match value {
            FeatureValue::Text(users) if !users.is_empty() => format!("Typically used by {users}"),
            _ => "Anyone can use this room".to_string(),
        };

        FeatureSnippet {
            icon: IconToken::GraduationCap,
            text,
        }
    }
}

/// How many people fit in the room. Always shown.
pub struct CapacityRule;

impl FeatureRule for CapacityRule {
    fn show(&self, _: &FeatureValue) -> bool {
        true
    }

    fn render(&self, value: &FeatureValue) -> FeatureSnippet {
        FeatureSnippet {
            icon: IconToken::Users,
            text: format!("Room for {value} people"),
        }
    }
}

/// A yes/no feature with a fixed label, shown only when set.
pub struct FlagRule {
    pub icon: IconToken,
    pub label: &'static str,
}

impl FeatureRule for FlagRule {
    fn show(&self, value: &FeatureValue) -> bool {
        value.is_flag_set()
    }

    fn render(&self, _: &FeatureValue) -> FeatureSnippet {
        FeatureSnippet {
            icon: self.icon,
            text: self.label.to_string(),
        }
    }
}

/// Whiteboards and blackboards, encoded as one letter per board (`W` or `B`). Other characters are ignored.
pub struct BoardsRule;

impl BoardsRule {
    /// Counts the whiteboards and blackboards in the provided value.
    fn count(value: &FeatureValue) -> (usize, usize) {
        let boards = value.as_text();
        (
            WHITEBOARD_PATTERN.find_iter(&boards).count(),
            BLACKBOARD_PATTERN.find_iter(&boards).count(),
        )
    }
}

impl FeatureRule for BoardsRule {
    fn show(&self, value: &FeatureValue) -> bool {
        let (whiteboards, blackboards) = BoardsRule::count(value);
        whiteboards > 0 || blackboards > 0
    }

    fn render(&self, value: &FeatureValue) -> FeatureSnippet {
        let (whiteboards, blackboards) = BoardsRule::count(value);

        let clauses = [
            (whiteboards, "whiteboard", "whiteboards"),
            (blackboards, "blackboard", "blackboards"),
        ]
        .into_iter()
        .filter(|(count, _, _)| *count > 0)
        .map(|(count, singular, plural)| format!("{count} {}", pluralize(count, singular, plural)))
        .collect::<Vec<String>>();

        // with only one kind of board, the verb agrees with how many of that kind there are
        let verb = if clauses.len() == 1 {
            is_or_are(whiteboards + blackboards)
        } else {
            is_or_are(clauses.len())
        };

        FeatureSnippet {
            icon: IconToken::Magic,
            text: format!("{} {verb} available", format_list(&clauses)),
        }
    }
}

/// How many computers are in the room. Shown only if there's at least one.
pub struct ComputersRule;

impl FeatureRule for ComputersRule {
    fn show(&self, value: &FeatureValue) -> bool {
        value.as_number().is_some_and(|n| n > 0.0)
    }

    fn render(&self, value: &FeatureValue) -> FeatureSnippet {
        FeatureSnippet {
            icon: IconToken::Desktop,
            text: format!("{value} computer(s) are available"),
        }
    }
}
