use std::time::Duration;

use crate::TooltipSize;

/// The size the tooltip is assumed to be until it reports its real size.
pub const DEFAULT_TOOLTIP_SIZE: TooltipSize = TooltipSize {
    width: 650.0,
    height: 325.0,
};

/// How long hover events have to stop coming in before the tooltip is shown or hidden.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// The size to position the tooltip with before it has been measured.
    pub tooltip_size: TooltipSize,
    /// How long after the pointer last moves on or off of a room or the tooltip before the tooltip's visibility
    /// changes.
    ///
    /// This is what lets the pointer move from a room shape onto the tooltip without the tooltip disappearing.
    pub settle_delay: Duration,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            tooltip_size: DEFAULT_TOOLTIP_SIZE,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}
