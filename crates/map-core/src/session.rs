use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use flume::{Receiver, RecvTimeoutError, Sender};
use log::{debug, trace, warn};

use crate::{
    geometry::TooltipPosition,
    hover::{HoverEvent, HoverState, TooltipChange},
    input_parser::parse_hover_event,
    resource::{FeatureRuleCatalog, MapOptions},
    room::RoomCollection,
    room_card::RoomCardDescription,
    room_map::RoomMap,
    viewer_identity::ViewerIdentity,
};

/// An update to what a viewer should see.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Show the card for a room at a position, replacing any card already shown.
    Show {
        room: String,
        card: Box<RoomCardDescription>,
        position: TooltipPosition,
    },
    /// Move the card that's already shown.
    Move(TooltipPosition),
    /// Stop showing the card.
    Hide,
    /// Some input couldn't be handled.
    Error(String),
}

/// A map with its rooms, which any number of viewers can hover around on.
pub struct MapSession {
    rooms: Arc<RoomCollection>,
    map: Arc<RoomMap>,
    options: MapOptions,
    identity: Option<ViewerIdentity>,
}

impl MapSession {
    /// Creates a session for the provided map and rooms.
    pub fn new(
        rooms: RoomCollection,
        map: RoomMap,
        options: MapOptions,
        identity: Option<ViewerIdentity>,
    ) -> MapSession {
        MapSession {
            rooms: Arc::new(rooms),
            map: Arc::new(map),
            options,
            identity,
        }
    }

    /// The map being viewed.
    pub fn map(&self) -> &RoomMap {
        &self.map
    }

    /// Adds a viewer to the session.
    ///
    /// Lines of hover input go in through the returned sender, and updates for the viewer come out of the returned
    /// receiver. The viewer is removed once the sender is dropped.
    pub fn add_viewer(&self, viewer_name: String) -> (Sender<String>, Receiver<ViewUpdate>) {
        let (input_sender, input_receiver) = flume::unbounded::<String>();
        let (update_sender, update_receiver) = flume::unbounded::<ViewUpdate>();

        let mut viewer = Viewer {
            hover: HoverState::new(&self.options),
            rooms: Arc::clone(&self.rooms),
            map: Arc::clone(&self.map),
            identity: self.identity,
            update_sender,
            settle_delay: self.options.settle_delay,
            settle_deadline: None,
        };

        thread::Builder::new()
            .name(format!("hover input for {viewer_name}"))
            .spawn(move || viewer.run(input_receiver))
            .unwrap_or_else(|e| panic!("failed to spawn thread for viewer {viewer_name}: {e}"));

        (input_sender, update_receiver)
    }
}

/// The hover state of a single viewer.
struct Viewer {
    hover: HoverState,
    rooms: Arc<RoomCollection>,
    map: Arc<RoomMap>,
    identity: Option<ViewerIdentity>,
    update_sender: Sender<ViewUpdate>,
    settle_delay: Duration,
    /// When to settle the hover state. Only moved when the pointer goes on or off of the room or the tooltip.
    settle_deadline: Option<Instant>,
}

impl Viewer {
    /// Handles input until the input sender is dropped.
    fn run(&mut self, input_receiver: Receiver<String>) {
        loop {
            let received = match self.settle_deadline {
                Some(deadline) if Instant::now() >= deadline => Err(RecvTimeoutError::Timeout),
                Some(deadline) => input_receiver.recv_deadline(deadline),
                None => input_receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            let keep_going = match received {
                Ok(input) => self.handle_input(&input),
                Err(RecvTimeoutError::Timeout) => {
                    self.settle_deadline = None;
                    let change = self.hover.settle();
                    self.send_change(change)
                }
                Err(RecvTimeoutError::Disconnected) => false,
            };

            if !keep_going {
                debug!("Stopping hover input handling");
                break;
            }
        }
    }

    /// Handles a line of input. Returns false if updates can't be sent anymore.
    fn handle_input(&mut self, input: &str) -> bool {
        trace!("Raw hover input: {input:?}");
        let event = match parse_hover_event(input) {
            Ok(event) => event,
            Err(e) => return self.send(ViewUpdate::Error(e.to_string())),
        };
        debug!("Parsed hover event: {event:?}");

        if let HoverEvent::EnterRoom { room, .. } = &event {
            if !self.map.is_registered(room) {
                warn!("Hovered room {room:?} isn't on the map");
                return self.send(ViewUpdate::Error(format!("there's no room called {room:?}")));
            }
        }

        let change = self.hover.apply(event);
        if self.hover.take_activity_change() {
            self.settle_deadline = Some(Instant::now() + self.settle_delay);
        }
        self.send_change(change)
    }

    fn send_change(&self, change: Option<TooltipChange>) -> bool {
        let update = match change {
            Some(TooltipChange::Show { room, position }) => match self.rooms.get(&room) {
                Some(found_room) => ViewUpdate::Show {
                    card: Box::new(RoomCardDescription::from_room(
                        found_room,
                        FeatureRuleCatalog::standard(),
                        self.identity,
                    )),
                    room,
                    position,
                },
                None => ViewUpdate::Error(format!("there's no room called {room:?}")),
            },
            Some(TooltipChange::Move(position)) => ViewUpdate::Move(position),
            Some(TooltipChange::Hide) => ViewUpdate::Hide,
            None => return true,
        };

        self.send(update)
    }

    fn send(&self, update: ViewUpdate) -> bool {
        debug!("Sending view update: {update:?}");
        self.update_sender.send(update).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{
        feature::Feature,
        room::{Room, Thumbnail},
        room_map::MapDescriptor,
    };

    use super::*;

    const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

    fn build_session() -> MapSession {
        build_session_with_delay(Duration::from_millis(10))
    }

    fn build_session_with_delay(settle_delay: Duration) -> MapSession {
        let rooms: RoomCollection = [(
            "a101".to_string(),
            Room {
                building: "Arts".to_string(),
                name: "101".to_string(),
                nickname: None,
                details: "a piano".to_string(),
                thumbnails: vec![Thumbnail {
                    source: "https://example.com/a101.jpg".to_string(),
                }],
                features: vec![Feature::number("capacity", 12.0)],
            },
        )]
        .into();
        let map = RoomMap::load(
            MapDescriptor {
                style: HashMap::new(),
                source: r#"<svg><rect id="room-a101"/></svg>"#.to_string(),
            },
            &rooms,
        )
        .unwrap();
        let options = MapOptions {
            settle_delay,
            ..MapOptions::default()
        };

        MapSession::new(rooms, map, options, Some(ViewerIdentity(2)))
    }

    fn receive(receiver: &Receiver<ViewUpdate>) -> ViewUpdate {
        receiver.recv_timeout(RECEIVE_TIMEOUT).unwrap()
    }

    #[test]
    fn hover_shows_then_hides_card() {
        let session = build_session();
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        sender.send("enter a101 500 600 20 10".to_string()).unwrap();
        match receive(&receiver) {
            ViewUpdate::Show {
                room,
                card,
                position,
            } => {
                assert_eq!("a101", room);
                assert_eq!(
                    Some("https://example.com/a101.jpg?authuser=2".to_string()),
                    card.thumbnail
                );
                assert_eq!(
                    TooltipPosition {
                        left: 418.75,
                        top: 275.0
                    },
                    position
                );
            }
            other => panic!("expected a card to be shown, got {other:?}"),
        }

        sender.send("resize 800 300".to_string()).unwrap();
        assert_eq!(
            ViewUpdate::Move(TooltipPosition {
                left: 400.0,
                top: 300.0
            }),
            receive(&receiver)
        );

        sender.send("leave".to_string()).unwrap();
        assert_eq!(ViewUpdate::Hide, receive(&receiver));
    }

    #[test]
    fn steady_resizes_do_not_hold_off_showing() {
        let session = build_session_with_delay(Duration::from_millis(50));
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        sender.send("enter a101 500 600 20 10".to_string()).unwrap();
        let stop_at = Instant::now() + Duration::from_millis(600);
        while Instant::now() < stop_at {
            sender.send("resize 650 325".to_string()).unwrap();
            thread::sleep(Duration::from_millis(20));
        }

        assert!(receiver
            .try_iter()
            .any(|update| matches!(update, ViewUpdate::Show { .. })));
    }

    #[test]
    fn steady_bad_input_does_not_hold_off_hiding() {
        let session = build_session_with_delay(Duration::from_millis(50));
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        sender.send("enter a101 500 600 20 10".to_string()).unwrap();
        assert!(matches!(receive(&receiver), ViewUpdate::Show { .. }));

        sender.send("leave".to_string()).unwrap();
        let stop_at = Instant::now() + Duration::from_millis(600);
        while Instant::now() < stop_at {
            sender.send("wiggle".to_string()).unwrap();
            thread::sleep(Duration::from_millis(20));
        }

        assert!(receiver
            .try_iter()
            .any(|update| update == ViewUpdate::Hide));
    }

    #[test]
    fn bad_input_is_reported() {
        let session = build_session();
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        sender.send("dance".to_string()).unwrap();
        assert!(matches!(receive(&receiver), ViewUpdate::Error(_)));
    }

    #[test]
    fn unknown_room_is_reported() {
        let session = build_session();
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        sender.send("enter z999 1 2 3 4".to_string()).unwrap();
        assert_eq!(
            ViewUpdate::Error("there's no room called \"z999\"".to_string()),
            receive(&receiver)
        );
    }

    #[test]
    fn viewer_stops_when_sender_dropped() {
        let session = build_session();
        let (sender, receiver) = session.add_viewer("test viewer".to_string());

        drop(sender);
        assert!(receiver.recv_timeout(RECEIVE_TIMEOUT).is_err());
    }
}
