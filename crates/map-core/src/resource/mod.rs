mod feature_rule_catalog;
pub use feature_rule_catalog::is_visible;
pub use feature_rule_catalog::render;
pub use feature_rule_catalog::FeatureRuleCatalog;

mod map_options;
pub use map_options::MapOptions;
