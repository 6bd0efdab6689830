//! Undo/redo stacks over viewport snapshots.

use tracing::debug;

use mandelviz_core::Viewport;

/// Two-stack view history.
///
/// The undo stack always holds at least one entry (the initial view), so the
/// user can never navigate to a state that predates the first render. Values
/// are copies of the viewport at commit time, never references into live
/// session state.
#[derive(Debug, Clone)]
pub struct ViewHistory {
    undo: Vec<Viewport>,
    redo: Vec<Viewport>,
}

impl ViewHistory {
    pub fn new(initial: Viewport) -> Self {
        Self {
            undo: vec![initial],
            redo: Vec::new(),
        }
    }

    /// The viewport on top of the undo stack.
    pub fn current(&self) -> Viewport {
        // The stack floor guarantees at least one entry.
        self.undo[self.undo.len() - 1]
    }

    /// Record a freshly committed view. Any redo tail is invalidated.
    pub fn record(&mut self, viewport: Viewport) {
        self.undo.push(viewport);
        if !self.redo.is_empty() {
            debug!(dropped = self.redo.len(), "New zoom clears redo stack");
            self.redo.clear();
        }
    }

    /// Step back one view. Returns the view to restore, or `None` when
    /// already at the initial view (the floor entry is never popped).
    pub fn undo(&mut self) -> Option<Viewport> {
        if self.undo.len() < 2 {
            return None;
        }
        if let Some(top) = self.undo.pop() {
            self.redo.push(top);
        }
        Some(self.current())
    }

    /// Step forward one view. Returns the view to restore, or `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<Viewport> {
        let next = self.redo.pop()?;
        self.undo.push(next);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
