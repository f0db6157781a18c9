use log::debug;

use crate::{
    geometry::{compute_position, BoundingBox, TooltipPosition, TooltipSize},
    resource::MapOptions,
};

/// Something the pointer did, or something that happened to the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    /// The pointer moved onto the shape for a room.
    EnterRoom {
        room: String,
        bounding_box: BoundingBox,
    },
    /// The pointer moved off of the shape for the current room.
    LeaveRoom,
    /// The pointer moved onto the tooltip.
    EnterTooltip,
    /// The pointer moved off of the tooltip.
    LeaveTooltip,
    /// The tooltip finished laying out its contents and has a new size.
    TooltipResized(TooltipSize),
}

/// A change to make to the tooltip on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipChange {
    /// Show the card for a room at a position, replacing anything already shown.
    Show {
        room: String,
        position: TooltipPosition,
    },
    /// Move the tooltip that's already shown.
    Move(TooltipPosition),
    /// Stop showing the tooltip.
    Hide,
}

/// Tracks what the pointer is over, and whether and where the tooltip should be shown.
///
/// Changes to whether the tooltip is shown only take effect when `settle` is called, which the owner should do a bit
/// after the last activity change (see `take_activity_change`). That way the pointer can move off of a room and onto
/// its tooltip without the tooltip flickering away in between.
#[derive(Debug, Clone)]
pub struct HoverState {
    current_room: Option<String>,
    bounding_box: BoundingBox,
    tooltip_size: TooltipSize,
    room_active: bool,
    tooltip_active: bool,
    shown: bool,
    position: Option<TooltipPosition>,
    settle_pending: bool,
    /// Set whenever the pointer moves on or off of the room or the tooltip, until `take_activity_change` is called.
    activity_changed: bool,
}

impl HoverState {
    /// Creates a state with nothing hovered and the tooltip hidden.
    pub fn new(options: &MapOptions) -> HoverState {
        HoverState {
            current_room: None,
            bounding_box: BoundingBox::default(),
            tooltip_size: options.tooltip_size,
            room_active: false,
            tooltip_active: false,
            shown: false,
            position: None,
            settle_pending: false,
            activity_changed: false,
        }
    }

    /// Whether the tooltip is currently shown.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether there are changes waiting for `settle` to be called.
    pub fn is_settle_pending(&self) -> bool {
        self.settle_pending
    }

    /// Whether the pointer has moved on or off of the room or the tooltip since this was last called.
    ///
    /// Only these changes should restart the wait before `settle` is called; resizes and repositioning don't.
    pub fn take_activity_change(&mut self) -> bool {
        std::mem::take(&mut self.activity_changed)
    }

    /// The key of the room most recently hovered.
    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    /// Where the tooltip is, if it's shown.
    pub fn position(&self) -> Option<TooltipPosition> {
        self.position
    }

    /// Applies an event, returning any change that has to be made to the tooltip right away.
    pub fn apply(&mut self, event: HoverEvent) -> Option<TooltipChange> {
        match event {
            HoverEvent::EnterRoom { room, bounding_box } => {
                let room_changed = self.current_room.as_deref() != Some(room.as_str());
                self.current_room = Some(room);
                self.bounding_box = bounding_box;
                self.set_room_active(true);

                if !self.shown {
                    None
                } else if room_changed {
                    self.show()
                } else {
                    self.reposition()
                }
            }
            HoverEvent::LeaveRoom => {
                self.set_room_active(false);
                None
            }
            HoverEvent::EnterTooltip => {
                if self.shown {
                    self.set_tooltip_active(true);
                } else {
                    debug!("Ignoring pointer entering a hidden tooltip");
                }
                None
            }
            HoverEvent::LeaveTooltip => {
                self.set_tooltip_active(false);
                None
            }
            HoverEvent::TooltipResized(size) => {
                self.tooltip_size = size;
                if self.shown {
                    self.reposition()
                } else {
                    None
                }
            }
        }
    }

    /// Shows or hides the tooltip based on what the pointer is over now.
    pub fn settle(&mut self) -> Option<TooltipChange> {
        self.settle_pending = false;

        let should_show = self.room_active || self.tooltip_active;
        if should_show == self.shown {
            return None;
        }

        if should_show {
            self.show()
        } else {
            self.shown = false;
            self.tooltip_active = false;
            self.position = None;
            Some(TooltipChange::Hide)
        }
    }

    fn set_room_active(&mut self, active: bool) {
        self.room_active = active;
        self.settle_pending = true;
        self.activity_changed = true;
    }

    fn set_tooltip_active(&mut self, active: bool) {
        self.tooltip_active = active;
        self.settle_pending = true;
        self.activity_changed = true;
    }

    fn show(&mut self) -> Option<TooltipChange> {
        let room = self.current_room.clone()?;
        let position = compute_position(&self.bounding_box, &self.tooltip_size);
        self.shown = true;
        self.position = Some(position);

        Some(TooltipChange::Show { room, position })
    }

    fn reposition(&mut self) -> Option<TooltipChange> {
        let position = compute_position(&self.bounding_box, &self.tooltip_size);
        if self
            .position
            .is_some_and(|old_position| old_position.approx_eq(&position))
        {
            return None;
        }

        self.position = Some(position);
        Some(TooltipChange::Move(position))
    }
}
