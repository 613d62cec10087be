use crate::types::Buttons;

/// Turns raw per-tick button bitmaps into discrete press edges.
///
/// The state machine only ever reacts to a released→pressed transition, so a
/// button held across many ticks produces exactly one edge rather than
/// re-triggering its action every tick.
#[derive(Debug)]
pub struct EdgeDetector {
    previous: Buttons,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        EdgeDetector::new()
    }
}

impl EdgeDetector {
    pub fn new() -> Self {
        EdgeDetector {
            previous: Buttons::empty(),
        }
    }

    /// Buttons that transitioned released→pressed since the last call.
    ///
    /// Release transitions are not reported; the one release the workflow
    /// waits for (trigger after a capture) is observed on raw state instead.
    pub fn press_edges(&mut self, current: Buttons) -> Buttons {
        let edges = current & !self.previous;
        self.previous = current;
        edges
    }
}
