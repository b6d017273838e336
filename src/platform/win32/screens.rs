// ── Regular screen geometry ───────────────────────────────────────────────────
//
// DeckLink devices are numbered and placed after the desktop monitors, so
// discovery needs the monitor rectangles in virtual-screen coordinates.

use windows::Win32::{
    Foundation::{BOOL, LPARAM, RECT, TRUE},
    Graphics::Gdi::{EnumDisplayMonitors, HDC, HMONITOR},
};

use crate::device::Rect;

/// Rectangles of every attached display monitor.  Empty if enumeration fails.
pub(crate) fn monitor_rects() -> Vec<Rect> {
    let mut rects: Vec<Rect> = Vec::new();

    // SAFETY: A null HDC and no clip rect enumerate every monitor on the
    // virtual screen.  `rects` outlives the call and the callback is invoked
    // synchronously, so the pointer smuggled through LPARAM stays valid and
    // unaliased for every callback invocation.
    let ok = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(collect_monitor),
            LPARAM(&mut rects as *mut Vec<Rect> as isize),
        )
    };
    if !ok.as_bool() {
        log::warn!("EnumDisplayMonitors failed; assuming no regular screens");
    }

    rects
}

// SAFETY: Only ever passed to EnumDisplayMonitors in `monitor_rects`, whose
// LPARAM is a live `*mut Vec<Rect>`.  Windows guarantees `rect` is either null
// or valid for the duration of the callback.
unsafe extern "system" fn collect_monitor(
    _monitor: HMONITOR,
    _hdc: HDC,
    rect: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let rects = &mut *(data.0 as *mut Vec<Rect>);
    if let Some(r) = rect.as_ref() {
        rects.push(Rect::new(r.left, r.top, r.right - r.left, r.bottom - r.top));
    }
    // Keep enumerating.
    TRUE
}
