mod feature;
pub use feature::BoardsRule;
pub use feature::CapacityRule;
pub use feature::ComputersRule;
pub use feature::ExclusiveRule;
pub use feature::Feature;
pub use feature::FeatureDisplay;
pub use feature::FeatureKind;
pub use feature::FeatureRule;
pub use feature::FeatureSnippet;
pub use feature::FeatureValue;
pub use feature::FlagRule;
pub use feature::IconToken;
pub use feature::UnknownFeatureError;

mod formatting;
pub use formatting::format_list;

mod geometry;
pub use geometry::compute_position;
pub use geometry::BoundingBox;
pub use geometry::TooltipPosition;
pub use geometry::TooltipSize;

mod hover;
pub use hover::HoverEvent;
pub use hover::HoverState;
pub use hover::TooltipChange;

mod input_parser;
pub use input_parser::parse_hover_event;
pub use input_parser::InputParseError;

mod resource;
pub use resource::*;

mod room;
pub use room::Room;
pub use room::RoomCollection;
pub use room::Thumbnail;

mod room_card;
pub use room_card::RoomCardDescription;
pub use room_card::RoomCardHeader;

mod room_map;
pub use room_map::MapDescriptor;
pub use room_map::MapLoadError;
pub use room_map::RoomMap;

mod session;
pub use session::MapSession;
pub use session::ViewUpdate;

mod viewer_identity;
pub use viewer_identity::asset_url;
pub use viewer_identity::resolve_identity;
pub use viewer_identity::shared_identity;
pub use viewer_identity::IdentityProbe;
pub use viewer_identity::ViewerIdentity;
