#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    None,
    Start,
    Dragging,
    Finish,
}

impl DragState {
    /// Next state given this frame's button edges. A press and release in
    /// the same frame is a click, not the start of a drag.
    pub fn next(self, pressed: bool, released: bool) -> DragState {
        if released {
            DragState::Finish
        } else if pressed {
            DragState::Start
        } else if self.started() {
            DragState::Dragging
        } else {
            DragState::None
        }
    }

    fn started(self) -> bool {
        matches!(self, DragState::Start | DragState::Dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_drag_cycle() {
        let s = DragState::None.next(true, false);
        assert_eq!(s, DragState::Start);
        let s = s.next(false, false);
        assert_eq!(s, DragState::Dragging);
        let s = s.next(false, false);
        assert_eq!(s, DragState::Dragging);
        let s = s.next(false, true);
        assert_eq!(s, DragState::Finish);
        assert_eq!(s.next(false, false), DragState::None);
    }

    #[test]
    fn click_within_one_frame_never_drags() {
        let s = DragState::None.next(true, true);
        assert_eq!(s, DragState::Finish);
        assert_eq!(s.next(false, false), DragState::None);

        let s = DragState::Dragging.next(true, true);
        assert_eq!(s, DragState::Finish);
    }
}
