// ── Unsupported-platform backend ──────────────────────────────────────────────
//
// Used on every target without DeckLink drivers.  `open` always fails, so
// `DeckLinkDiscovery` reports an empty device list.

use crate::{
    device::{RawDevice, Rect},
    discovery::DeviceBackend,
    error::{DiscoveryError, Result},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBackend;

impl DeviceBackend for UnsupportedBackend {
    fn open(&mut self) -> Result<()> {
        Err(DiscoveryError::Unsupported)
    }

    fn devices(&mut self) -> Result<Vec<RawDevice>> {
        Ok(Vec::new())
    }

    fn screens(&self) -> Vec<Rect> {
        Vec::new()
    }

    fn close(&mut self) {}
}
