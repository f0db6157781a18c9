use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    sync::LazyLock,
};

use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::room::RoomCollection;

static SVG_ROOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b").unwrap());
static ELEMENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sid\s*=\s*["']([^"']+)["']"#).unwrap());

/// The prefix of the ID of the shape for a room on the map.
const ROOM_SHAPE_PREFIX: &str = "room-";

/// A floor plan image, as supplied by whatever loads the map data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapDescriptor {
    /// Style properties for the element containing the map.
    #[serde(default)]
    pub style: HashMap<String, Value>,
    /// SVG markup containing a shape for each room.
    pub source: String,
}

/// An error while loading a map.
#[derive(Debug, PartialEq, Eq)]
pub enum MapLoadError {
    /// The map source has no SVG image in it.
    NoSvg,
    /// The map source has more than one SVG image in it. The number of images is included.
    MultipleSvgs(usize),
}

impl Display for MapLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapLoadError::NoSvg => write!(f, "map source contains no SVG image"),
            MapLoadError::MultipleSvgs(n) => {
                write!(f, "map source contains {n} SVG images, expected 1")
            }
        }
    }
}

impl std::error::Error for MapLoadError {}

/// A loaded map, with each room's shape on it registered.
#[derive(Debug, Clone)]
pub struct RoomMap {
    pub style: HashMap<String, Value>,
    pub source: String,
    /// Shape IDs to the keys of the rooms they're for.
    shapes: HashMap<String, String>,
}

impl RoomMap {
    /// Loads the provided map, registering the shape for each of the provided rooms.
    ///
    /// Rooms without a shape on the map are logged and left unregistered.
    pub fn load(
        descriptor: MapDescriptor,
        rooms: &RoomCollection,
    ) -> Result<RoomMap, MapLoadError> {
        match SVG_ROOT_PATTERN.find_iter(&descriptor.source).count() {
            0 => return Err(MapLoadError::NoSvg),
            1 => (),
            n => return Err(MapLoadError::MultipleSvgs(n)),
        }

        let element_ids = ELEMENT_ID_PATTERN
            .captures_iter(&descriptor.source)
            .map(|captures| captures[1].to_string())
            .collect::<HashSet<String>>();

        let mut shapes = HashMap::new();
        for key in rooms.keys().sorted() {
            let shape_id = RoomMap::shape_id(key);
            if element_ids.contains(&shape_id) {
                debug!("Registered shape {shape_id:?} for room {key:?}");
                shapes.insert(shape_id, key.clone());
            } else {
                warn!("Room {key:?} has no shape on the map (expected an element with ID {shape_id:?})");
            }
        }

        Ok(RoomMap {
            style: descriptor.style,
            source: descriptor.source,
            shapes,
        })
    }

    /// The ID of the shape on the map for the room with the provided key.
    pub fn shape_id(room_key: &str) -> String {
        format!("{ROOM_SHAPE_PREFIX}{room_key}")
    }

    /// Finds the key of the room the shape with the provided ID is for, if it's registered.
    pub fn room_for_shape(&self, shape_id: &str) -> Option<&str> {
        self.shapes.get(shape_id).map(String::as_str)
    }

    /// Determines whether the room with the provided key has a registered shape.
    pub fn is_registered(&self, room_key: &str) -> bool {
        self.shapes.contains_key(&RoomMap::shape_id(room_key))
    }

    /// The keys of all the rooms with registered shapes, in order.
    pub fn registered_rooms(&self) -> Vec<&str> {
        self.shapes.values().map(String::as_str).sorted().collect()
    }
}
