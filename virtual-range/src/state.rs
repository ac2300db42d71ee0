use crate::ScrollDirection;

/// Offset changes of at most this many units report no direction.
pub const DIRECTION_DEADBAND: u64 = 1;

/// Last observed scroll offset and the direction derived from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
    pub direction: Option<ScrollDirection>,
}

impl ScrollState {
    /// Records a new offset and returns the direction of travel.
    ///
    /// A decrease of more than [`DIRECTION_DEADBAND`] is `Forward`, an increase of more than
    /// that is `Backward`, anything smaller is `None`. The offset is stored either way.
    pub fn advance(&mut self, offset: u64) -> Option<ScrollDirection> {
        let direction = if offset.saturating_add(DIRECTION_DEADBAND) < self.offset {
            Some(ScrollDirection::Forward)
        } else if offset > self.offset.saturating_add(DIRECTION_DEADBAND) {
            Some(ScrollDirection::Backward)
        } else {
            None
        };
        self.offset = offset;
        self.direction = direction;
        direction
    }

    pub fn is_forward(&self) -> bool {
        self.direction == Some(ScrollDirection::Forward)
    }

    pub fn is_backward(&self) -> bool {
        self.direction == Some(ScrollDirection::Backward)
    }
}
