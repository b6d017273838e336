// ── Platform backends ─────────────────────────────────────────────────────────
//
// `NativeBackend` is the `DeviceBackend` for the compilation target.  No
// `unsafe` lives here; all COM FFI is confined to the `win32` sub-module and
// never leaks outward.

use crate::{config, discovery::DeckLinkDiscovery};

#[cfg(windows)]
pub mod win32;

pub mod unsupported;

/// Backend that talks to the DeckLink driver on Windows.
#[cfg(windows)]
pub type NativeBackend = win32::Win32Backend;

/// DeckLink drivers only exist on Windows; everywhere else discovery is empty.
#[cfg(not(windows))]
pub type NativeBackend = unsupported::UnsupportedBackend;

impl DeckLinkDiscovery<NativeBackend> {
    /// Discovery on the native backend, configured from the default config
    /// file when one exists.
    pub fn native() -> Self {
        let cfg = config::load().unwrap_or_default();
        Self::with_config(NativeBackend::default(), cfg)
    }
}
