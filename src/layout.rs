// ── Virtual screen layout ─────────────────────────────────────────────────────
//
// DeckLink outputs have no desktop position of their own.  Each one is given a
// synthetic rectangle to the right of the rightmost regular screen so the host
// can treat it like any other display.

use crate::device::Rect;

/// Default virtual size of a DeckLink output (1080p).
pub const DEFAULT_DEVICE_WIDTH: i32 = 1920;
pub const DEFAULT_DEVICE_HEIGHT: i32 = 1080;

/// Horizontal offset between consecutive devices.
pub const DEFAULT_HORIZONTAL_STEP: i32 = 100;

/// Parameters for placing devices after the regular screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualLayout {
    pub device_width: i32,
    pub device_height: i32,
    pub horizontal_step: i32,
}

impl Default for VirtualLayout {
    fn default() -> Self {
        Self {
            device_width: DEFAULT_DEVICE_WIDTH,
            device_height: DEFAULT_DEVICE_HEIGHT,
            horizontal_step: DEFAULT_HORIZONTAL_STEP,
        }
    }
}

impl VirtualLayout {
    /// Rectangle for the device at `ordinal`, placed after `origin_x`.
    pub fn device_rect(&self, origin_x: i32, ordinal: usize) -> Rect {
        let offset = self.horizontal_step.saturating_mul(ordinal as i32);
        Rect::new(
            origin_x.saturating_add(offset),
            0,
            self.device_width,
            self.device_height,
        )
    }
}

/// Rightmost edge of the regular screens, never less than zero.
pub fn origin_x(screens: &[Rect]) -> i32 {
    screens.iter().map(Rect::right).fold(0, i32::max)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
