//! Pointer gesture math for window drag and resize.
//!
//! A gesture captures the pointer and window geometry at press time; every later pointer sample
//! maps to an absolute position or size. Clamping happens in the registry.

use crate::model::{PointerPosition, WindowId, WindowPosition, WindowSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub window_id: WindowId,
    pointer_start: PointerPosition,
    origin: WindowPosition,
}

impl DragGesture {
    pub fn begin(window_id: WindowId, pointer: PointerPosition, origin: WindowPosition) -> Self {
        Self {
            window_id,
            pointer_start: pointer,
            origin,
        }
    }

    /// Window position that keeps the grab point under `pointer`.
    pub fn position_at(&self, pointer: PointerPosition) -> WindowPosition {
        WindowPosition {
            x: self.origin.x + (pointer.x - self.pointer_start.x),
            y: self.origin.y + (pointer.y - self.pointer_start.y),
        }
    }
}

/// Bottom-right corner resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeGesture {
    pub window_id: WindowId,
    pointer_start: PointerPosition,
    origin: WindowSize,
}

impl ResizeGesture {
    pub fn begin(window_id: WindowId, pointer: PointerPosition, origin: WindowSize) -> Self {
        Self {
            window_id,
            pointer_start: pointer,
            origin,
        }
    }

    pub fn size_at(&self, pointer: PointerPosition) -> WindowSize {
        WindowSize {
            width: self.origin.width + (pointer.x - self.pointer_start.x),
            height: self.origin.height + (pointer.y - self.pointer_start.y),
        }
    }
}
