//! Box-selection drag state machine with aspect-ratio locking.

use mandelviz_core::PixelBox;

/// A pointer position in centered pixel space (the space mesh vertices live
/// in, origin at the middle of the canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The two overlay rectangles a drag produces each frame.
///
/// `raw` follows the pointer exactly; `locked` is the aspect-corrected box
/// that an ended drag would zoom to. A host typically draws both so the user
/// sees where the zoom will actually land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOverlay {
    pub raw: PixelBox,
    pub locked: PixelBox,
}

/// Drag state machine: Idle until `begin`, Dragging until `finish` or
/// `cancel`.
///
/// The aspect lock keeps the selection at the canvas ratio (height/width
/// = 2/3) so a zoom never distorts the view. One dimension follows the
/// pointer and the other is derived: when the dragged box is taller than
/// 3:2 the width is derived from the height, otherwise the height is
/// derived from the width, with the drag direction choosing which way the
/// derived corner extends.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxSelection {
    start: Option<PointerPos>,
}

impl BoxSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Start a drag at `pos`. A drag already in progress is restarted.
    pub fn begin(&mut self, pos: PointerPos) {
        self.start = Some(pos);
    }

    /// Update the drag with the current pointer position and get the two
    /// overlay boxes. Returns `None` when no drag is in progress.
    pub fn update(&self, current: PointerPos) -> Option<SelectionOverlay> {
        let start = self.start?;
        let locked_corner = locked_corner(start, current);
        Some(SelectionOverlay {
            raw: PixelBox::from_corners(start.x, start.y, current.x, current.y),
            locked: PixelBox::from_corners(start.x, start.y, locked_corner.x, locked_corner.y),
        })
    }

    /// End the drag and return the aspect-locked selection box.
    pub fn finish(&mut self, current: PointerPos) -> Option<PixelBox> {
        let overlay = self.update(current)?;
        self.start = None;
        Some(overlay.locked)
    }

    /// Abandon the drag without producing a selection.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

/// Aspect-corrected opposite corner for a drag from `start` to `current`.
fn locked_corner(start: PointerPos, current: PointerPos) -> PointerPos {
    let width = (current.x - start.x).abs();
    let height = (current.y - start.y).abs();
    let sign_x = if current.x > start.x { 1.0 } else { -1.0 };
    let sign_y = if current.y > start.y { 1.0 } else { -1.0 };

    // A zero-width drag divides to infinity and lands in the first branch,
    // deriving the width from the height.
    if height / width > 3.0 / 2.0 {
        PointerPos::new(start.x + sign_x * height * 3.0 / 2.0, current.y)
    } else {
        PointerPos::new(current.x, start.y + sign_y * width * 2.0 / 3.0)
    }
}
