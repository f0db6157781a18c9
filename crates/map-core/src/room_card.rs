use log::warn;

use crate::{
    feature::{FeatureDisplay, UnknownFeatureError},
    resource::FeatureRuleCatalog,
    room::Room,
    viewer_identity::{asset_url, ViewerIdentity},
};

/// Everything shown on the card for a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCardDescription {
    pub header: RoomCardHeader,
    /// A sentence describing the room, if it has any details.
    pub description: Option<String>,
    /// Where to load the room's preview picture from, if it has one.
    pub thumbnail: Option<String>,
    /// The features worth showing, in the order the room lists them.
    pub features: Vec<FeatureDisplay>,
}

/// The title part of a room card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCardHeader {
    pub nickname: Option<String>,
    pub building: String,
    pub name: String,
}

impl RoomCardDescription {
    /// Creates the card for the provided room.
    ///
    /// Features without a display rule are logged and left off the card.
    pub fn from_room(
        room: &Room,
        catalog: &FeatureRuleCatalog,
        identity: Option<ViewerIdentity>,
    ) -> RoomCardDescription {
        let features = room
            .features
            .iter()
            .filter_map(|feature| match catalog.describe(feature) {
                Ok(display) => Some(display),
                Err(e) => {
                    warn!("Skipping feature of {}: {e}", room.name);
                    None
                }
            })
            .filter(|display| display.visible)
            .collect();

        RoomCardDescription::with_features(room, identity, features)
    }

    /// Creates the card for the provided room, failing if any of its features has no display rule.
    pub fn try_from_room(
        room: &Room,
        catalog: &FeatureRuleCatalog,
        identity: Option<ViewerIdentity>,
    ) -> Result<RoomCardDescription, UnknownFeatureError> {
        let mut features = Vec::new();
        for feature in &room.features {
            let display = catalog.describe(feature)?;
            if display.visible {
                features.push(display);
            }
        }

        Ok(RoomCardDescription::with_features(room, identity, features))
    }

    fn with_features(
        room: &Room,
        identity: Option<ViewerIdentity>,
        features: Vec<FeatureDisplay>,
    ) -> RoomCardDescription {
        let description = if room.details.is_empty() {
            None
        } else {
            Some(format!("This room includes {}", room.details))
        };

        RoomCardDescription {
            header: RoomCardHeader {
                nickname: room.nickname.clone().filter(|n| !n.is_empty()),
                building: room.building.clone(),
                name: room.name.clone(),
            },
            description,
            thumbnail: room
                .thumbnails
                .first()
                .map(|thumbnail| asset_url(&thumbnail.source, identity)),
            features,
        }
    }
}
