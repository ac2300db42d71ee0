use crate::{Axis, Measurement};

/// What a rendering layer must expose for a tracker to be driven against it.
///
/// The tracker never touches platform objects; a DOM binding, a TUI pane or a test fake all
/// implement this trait. Every readout is taken along `axis` (heights and `top` for
/// vertical lists, widths and `left` for horizontal ones). Sizes are whole units: round
/// sub-pixel values with [`Measurement::from_subpixel`].
pub trait ScrollHost {
    /// Reports the currently rendered items in index order.
    fn for_each_rendered(&self, axis: Axis, f: &mut dyn FnMut(Measurement));

    /// Size of the viewport.
    fn client_size(&self, axis: Axis) -> u32;

    /// Current scroll position of the container.
    fn scroll_offset(&self, axis: Axis) -> u64;

    /// Total scrollable extent of the container.
    fn scroll_extent(&self, axis: Axis) -> u64;

    fn set_scroll_offset(&mut self, axis: Axis, offset: u64);

    /// `false` when the list container has zero width or height.
    fn is_container_visible(&self) -> bool;

    /// Distance from the scroll container's origin to the list's leading edge.
    fn leading_offset(&self, _axis: Axis) -> u64 {
        0
    }
}
