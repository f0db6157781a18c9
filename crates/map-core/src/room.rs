use std::collections::HashMap;

use serde::Deserialize;

use crate::feature::Feature;

/// Rooms keyed by their identifier on the map.
pub type RoomCollection = HashMap<String, Room>;

/// A physical space on the map, along with the things worth knowing about it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    /// The building the room is in.
    pub building: String,
    /// The room's name or number within its building.
    pub name: String,
    /// What people usually call the room, if anything.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Free-form details, finishing the sentence "This room includes ...".
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A picture of a room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    /// Where to load the picture from.
    pub source: String,
}
