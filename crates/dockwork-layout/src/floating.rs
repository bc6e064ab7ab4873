//! Floating host boundary.
//!
//! Floating panes live in top-level frames the host owns. The manager only
//! asks for frames to be created, moved, shown, hidden, and destroyed, and
//! refers to them by [`FloatingFrameId`].

use dockwork_core::geometry::{Point, Size};

use crate::pane::{FloatingFrameId, PaneInfo};

/// Creates and drives the frames of floating panes.
pub trait FloatingHost {
    /// Create a frame for `pane` at its floating position and size.
    fn create(&mut self, pane: &PaneInfo) -> FloatingFrameId;

    fn destroy(&mut self, frame: FloatingFrameId);

    fn move_to(&mut self, frame: FloatingFrameId, position: Point);

    /// Resize a frame. Hosts whose frames size themselves can ignore this.
    fn resize(&mut self, _frame: FloatingFrameId, _size: Size) {}

    fn set_visible(&mut self, frame: FloatingFrameId, visible: bool);
}

/// Host without real frames: hands out sequential ids and records the
/// last known state of each frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullFloatingHost {
    next_id: u64,
    frames: Vec<NullFrame>,
}

/// State of one frame of a [`NullFloatingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullFrame {
    pub id: FloatingFrameId,
    pub pane: String,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub visible: bool,
}

impl NullFloatingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames that have been created and not destroyed.
    #[must_use]
    pub fn frames(&self) -> &[NullFrame] {
        &self.frames
    }

    #[must_use]
    pub fn frame(&self, id: FloatingFrameId) -> Option<&NullFrame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    fn frame_mut(&mut self, id: FloatingFrameId) -> Option<&mut NullFrame> {
        self.frames.iter_mut().find(|frame| frame.id == id)
    }
}

impl FloatingHost for NullFloatingHost {
    fn create(&mut self, pane: &PaneInfo) -> FloatingFrameId {
        self.next_id += 1;
        let id = FloatingFrameId::new(self.next_id);
        self.frames.push(NullFrame {
            id,
            pane: pane.name.clone(),
            position: pane.floating_pos,
            size: pane.floating_size,
            visible: false,
        });
        id
    }

    fn destroy(&mut self, frame: FloatingFrameId) {
        self.frames.retain(|f| f.id != frame);
    }

    fn move_to(&mut self, frame: FloatingFrameId, position: Point) {
        if let Some(f) = self.frame_mut(frame) {
            f.position = Some(position);
        }
    }

    fn resize(&mut self, frame: FloatingFrameId, size: Size) {
        if let Some(f) = self.frame_mut(frame) {
            f.size = Some(size);
        }
    }

    fn set_visible(&mut self, frame: FloatingFrameId, visible: bool) {
        if let Some(f) = self.frame_mut(frame) {
            f.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_host_tracks_frames() {
        let mut host = NullFloatingHost::new();
        let pane = PaneInfo::new().name("props").floating_position(40, 50);
        let a = host.create(&pane);
        let b = host.create(&PaneInfo::new().name("other"));
        assert_ne!(a, b);
        assert_eq!(host.frame(a).and_then(|f| f.position), Some(Point::new(40, 50)));

        host.move_to(a, Point::new(5, 6));
        host.set_visible(a, true);
        let frame = host.frame(a).unwrap();
        assert_eq!(frame.position, Some(Point::new(5, 6)));
        assert!(frame.visible);

        host.destroy(a);
        assert!(host.frame(a).is_none());
        assert_eq!(host.frames().len(), 1);
    }

    #[test]
    fn operations_on_unknown_frames_are_ignored() {
        let mut host = NullFloatingHost::new();
        host.move_to(FloatingFrameId::new(9), Point::new(1, 1));
        host.destroy(FloatingFrameId::new(9));
        assert!(host.frames().is_empty());
    }
}
