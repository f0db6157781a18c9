use std::{collections::HashMap, sync::LazyLock};

use strum::IntoEnumIterator;

use crate::feature::{
    BoardsRule, CapacityRule, ComputersRule, ExclusiveRule, Feature, FeatureDisplay, FeatureKind,
    FeatureRule, FeatureSnippet, FlagRule, IconToken, UnknownFeatureError,
};

static STANDARD_CATALOG: LazyLock<FeatureRuleCatalog> = LazyLock::new(FeatureRuleCatalog::new);

/// Map of feature kinds to the rules for displaying them.
pub struct FeatureRuleCatalog {
    rules: HashMap<FeatureKind, Box<dyn FeatureRule>>,
}

impl Default for FeatureRuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureRuleCatalog {
    /// Creates the default catalog of rules, with a rule for every kind of feature.
    pub fn new() -> FeatureRuleCatalog {
        FeatureRuleCatalog {
            rules: FeatureKind::iter()
                .map(|kind| (kind, default_rule(kind)))
                .collect(),
        }
    }

    /// The shared default catalog.
    pub fn standard() -> &'static FeatureRuleCatalog {
        &STANDARD_CATALOG
    }

    /// Sets the rule for the provided kind of feature.
    pub fn set(&mut self, kind: FeatureKind, rule: Box<dyn FeatureRule>) {
        self.rules.insert(kind, rule);
    }

    /// Finds the rule for the feature with the provided name.
    pub fn rule_for(&self, name: &str) -> Result<&dyn FeatureRule, UnknownFeatureError> {
        name.parse::<FeatureKind>()
            .ok()
            .and_then(|kind| self.rules.get(&kind))
            .map(|rule| &**rule)
            .ok_or_else(|| UnknownFeatureError {
                name: name.to_string(),
            })
    }

    /// Determines whether the provided feature should be displayed.
    pub fn is_visible(&self, feature: &Feature) -> Result<bool, UnknownFeatureError> {
        Ok(self.rule_for(&feature.name)?.show(&feature.value))
    }

    /// Produces the icon and text for the provided feature.
    pub fn render(&self, feature: &Feature) -> Result<FeatureSnippet, UnknownFeatureError> {
        Ok(self.rule_for(&feature.name)?.render(&feature.value))
    }

    /// Determines both whether and how to display the provided feature.
    pub fn describe(&self, feature: &Feature) -> Result<FeatureDisplay, UnknownFeatureError> {
        let rule = self.rule_for(&feature.name)?;
        let snippet = rule.render(&feature.value);

        Ok(FeatureDisplay {
            visible: rule.show(&feature.value),
            icon: snippet.icon,
            text: snippet.text,
        })
    }
}

/// The built-in rule for a kind of feature.
fn default_rule(kind: FeatureKind) -> Box<dyn FeatureRule> {
    match kind {
        FeatureKind::Exclusive => Box::new(ExclusiveRule),
        FeatureKind::Capacity => Box::new(CapacityRule),
        FeatureKind::Projectors => Box::new(FlagRule {
            icon: IconToken::Video,
            label: "Includes a projector",
        }),
        FeatureKind::Boards => Box::new(BoardsRule),
        FeatureKind::RearrangableFurniture => Box::new(FlagRule {
            icon: IconToken::Couch,
            label: "Furniture is rearrangable",
        }),
        FeatureKind::Computers => Box::new(ComputersRule),
        FeatureKind::Outlets => Box::new(FlagRule {
            icon: IconToken::Plug,
            label: "Includes outlets",
        }),
        FeatureKind::Lab => Box::new(FlagRule {
            icon: IconToken::Flask,
            label: "Can be used as a lab",
        }),
    }
}

/// Determines whether the provided feature should be displayed, using the standard rules.
pub fn is_visible(feature: &Feature) -> Result<bool, UnknownFeatureError> {
    FeatureRuleCatalog::standard().is_visible(feature)
}

/// Produces the icon and text for the provided feature, using the standard rules.
pub fn render(feature: &Feature) -> Result<FeatureSnippet, UnknownFeatureError> {
    FeatureRuleCatalog::standard().render(feature)
}

#[cfg(test)]
mod tests {
    use crate::feature::FeatureValue;

    use super::*;

    #[test]
    fn every_kind_has_a_rule() {
        let catalog = FeatureRuleCatalog::new();
        for kind in FeatureKind::iter() {
            assert!(catalog.rule_for(kind.as_ref()).is_ok(), "no rule for {kind}");
        }
    }

    #[test]
    fn projectors() {
        let no = Feature::text("projectors", "N");
        let yes = Feature::text("projectors", "Y");

        assert_eq!(Ok(false), is_visible(&no));
        assert_eq!(Ok(true), is_visible(&yes));
        assert_eq!(
            Ok(FeatureSnippet {
                icon: IconToken::Video,
                text: "Includes a projector".to_string()
            }),
            render(&yes)
        );
    }

    #[test]
    fn boards() {
        let some = Feature::text("boards", "WWB");
        let none = Feature::text("boards", "");

        assert_eq!(Ok(true), is_visible(&some));
        assert!(render(&some)
            .unwrap()
            .text
            .contains("2 whiteboards and 1 blackboard"));
        assert_eq!(Ok(false), is_visible(&none));
    }

    #[test]
    fn flags_with_static_labels() {
        for (name, icon, label) in [
            (
                "rearrangableFurniture",
                IconToken::Couch,
                "Furniture is rearrangable",
            ),
            ("outlets", IconToken::Plug, "Includes outlets"),
            ("lab", IconToken::Flask, "Can be used as a lab"),
        ] {
            assert_eq!(Ok(true), is_visible(&Feature::text(name, "Y")));
            assert_eq!(Ok(false), is_visible(&Feature::text(name, "N")));
            assert_eq!(
                Ok(FeatureSnippet {
                    icon,
                    text: label.to_string()
                }),
                render(&Feature::text(name, "Y"))
            );
        }
    }

    #[test]
    fn unknown_feature() {
        let jacuzzi = Feature::text("jacuzzi", "Y");
        let expected = UnknownFeatureError {
            name: "jacuzzi".to_string(),
        };

        assert_eq!(Err(expected.clone()), is_visible(&jacuzzi));
        assert_eq!(Err(expected.clone()), render(&jacuzzi));
        assert_eq!(
            Err(expected),
            FeatureRuleCatalog::standard().describe(&jacuzzi)
        );
    }

    #[test]
    fn feature_names_are_case_sensitive() {
        assert!(is_visible(&Feature::text("Projectors", "Y")).is_err());
    }

    #[test]
    fn repeated_calls_agree() {
        let features = [
            Feature::text("exclusive", ""),
            Feature::number("capacity", 30.0),
            Feature::text("boards", "WB"),
            Feature::number("computers", 0.0),
        ];

        for feature in &features {
            assert_eq!(is_visible(feature), is_visible(feature));
            assert_eq!(render(feature), render(feature));
        }
    }

    #[test]
    fn describe_hidden_feature() {
        let display = FeatureRuleCatalog::standard()
            .describe(&Feature::number("computers", 0.0))
            .unwrap();

        assert!(!display.visible);
        assert_eq!(IconToken::Desktop, display.icon);
    }

    #[test]
    fn custom_rule() {
        struct NeverShown;

        impl FeatureRule for NeverShown {
            fn show(&self, _: &FeatureValue) -> bool {
                false
            }

            fn render(&self, _: &FeatureValue) -> FeatureSnippet {
                FeatureSnippet {
                    icon: IconToken::Users,
                    text: "hidden".to_string(),
                }
            }
        }

        let mut catalog = FeatureRuleCatalog::new();
        catalog.set(FeatureKind::Capacity, Box::new(NeverShown));

        assert_eq!(
            Ok(false),
            catalog.is_visible(&Feature::number("capacity", 10.0))
        );
        assert_eq!(Ok(true), is_visible(&Feature::number("capacity", 10.0)));
    }
}
