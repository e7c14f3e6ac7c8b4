//! Input mapping.
//!
//! Window events arrive as [`InputEvent`]; [`ViewerInput`] turns them into
//! [`ViewerAction`]s the viewer applies.

/// Window-system-neutral input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse wheel moved. Positive `delta_y` scrolls down.
    Wheel {
        /// Vertical wheel delta in lines or pixels.
        delta_y: f32,
    },
    /// The drawable surface changed size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The user asked to close the viewer.
    CloseRequested,
}

/// What the viewer should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerAction {
    /// Feed a wheel delta to the zoom controller.
    Zoom(f32),
    /// Resize the renderer.
    Resize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Stop the viewer.
    Exit,
}

/// Maps input events to viewer actions.
#[derive(Debug, Clone, Copy)]
pub struct ViewerInput {
    /// Flip the wheel direction.
    pub invert_wheel: bool,
    last_size: (u32, u32),
}

impl ViewerInput {
    /// Creates a mapper for a surface of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            invert_wheel: false,
            last_size: (width, height),
        }
    }

    /// Maps one event. Returns `None` for events that change nothing.
    pub fn map(&mut self, event: InputEvent) -> Option<ViewerAction> {
        match event {
            InputEvent::Wheel { delta_y } => {
                if delta_y == 0.0 || delta_y.is_nan() {
                    return None;
                }
                let delta = if self.invert_wheel { -delta_y } else { delta_y };
                Some(ViewerAction::Zoom(delta))
            }
            InputEvent::Resized { width, height } => {
                if (width, height) == self.last_size {
                    return None;
                }
                self.last_size = (width, height);
                Some(ViewerAction::Resize { width, height })
            }
            InputEvent::CloseRequested => Some(ViewerAction::Exit),
        }
    }

    /// Last surface size seen.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.last_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_maps_to_zoom() {
        let mut input = ViewerInput::new(800, 600);

        assert_eq!(
            input.map(InputEvent::Wheel { delta_y: -3.0 }),
            Some(ViewerAction::Zoom(-3.0))
        );
        assert_eq!(input.map(InputEvent::Wheel { delta_y: 0.0 }), None);
    }

    #[test]
    fn test_inverted_wheel() {
        let mut input = ViewerInput::new(800, 600);
        input.invert_wheel = true;

        assert_eq!(
            input.map(InputEvent::Wheel { delta_y: 1.0 }),
            Some(ViewerAction::Zoom(-1.0))
        );
    }

    #[test]
    fn test_duplicate_resize_suppressed() {
        let mut input = ViewerInput::new(800, 600);

        assert_eq!(input.map(InputEvent::Resized { width: 800, height: 600 }), None);
        assert_eq!(
            input.map(InputEvent::Resized { width: 1024, height: 768 }),
            Some(ViewerAction::Resize { width: 1024, height: 768 })
        );
        assert_eq!(input.size(), (1024, 768));
    }

    #[test]
    fn test_close() {
        let mut input = ViewerInput::new(1, 1);
        assert_eq!(input.map(InputEvent::CloseRequested), Some(ViewerAction::Exit));
    }
}
