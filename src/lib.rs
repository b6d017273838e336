//! Discovery of Blackmagic DeckLink playback hardware.
//!
//! A media-projection host can treat each DeckLink output as one more screen.
//! This crate finds the devices through the vendor's COM iterator, reads their
//! names and playback capability, and gives each a virtual rectangle to the
//! right of the regular monitors.
//!
//! Discovery never fails loudly: without the driver, without hardware, or on
//! a platform other than Windows, the device list is simply empty.
//!
//! ```no_run
//! let devices = decklink_discovery::discover();
//! for d in &devices {
//!     println!("{} at screen {}", d.display_name, d.device_index);
//! }
//! ```

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (COM FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod platform;

pub use config::DiscoveryConfig;
pub use device::{DeckLinkDeviceInfo, DuplexMode, Rect};
pub use discovery::{DeckLinkDiscovery, DeviceBackend, DeviceEvent};
pub use error::{DiscoveryError, Result};
pub use platform::NativeBackend;

/// One-shot enumeration on the native backend.
pub fn discover() -> Vec<DeckLinkDeviceInfo> {
    DeckLinkDiscovery::native().available_devices()
}
