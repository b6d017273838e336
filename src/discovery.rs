// ── DeckLink discovery ────────────────────────────────────────────────────────
//
// Owns the enumeration lifecycle: open the backend (COM + vendor iterator),
// walk it once, keep the resulting records.  Every failure degrades to an
// empty device list; the host never sees an error from here.

use std::collections::HashMap;

use crate::{
    config::DiscoveryConfig,
    device::{build_device_info, DeckLinkDeviceInfo, RawDevice, Rect},
    error::Result,
    layout,
};

// ── Backend seam ──────────────────────────────────────────────────────────────

/// Source of raw device data.  `platform::NativeBackend` talks to the vendor
/// driver; tests substitute a scripted backend.
pub trait DeviceBackend {
    /// Acquire whatever the backend needs to enumerate (COM apartment,
    /// iterator object).  Called again after `close`.
    fn open(&mut self) -> Result<()>;

    /// Walk the attached devices in iterator order.  Only called after a
    /// successful `open`.
    fn devices(&mut self) -> Result<Vec<RawDevice>>;

    /// Geometry of the regular (non-DeckLink) screens.
    fn screens(&self) -> Vec<Rect>;

    /// Release everything acquired in `open`.  Must tolerate repeated calls.
    fn close(&mut self);
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Change reported by `DeckLinkDiscovery::refresh`.  Carries the screen-space
/// `device_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Arrived(usize),
    Removed(usize),
}

// ── DeckLinkDiscovery ─────────────────────────────────────────────────────────

pub struct DeckLinkDiscovery<B: DeviceBackend> {
    backend: B,
    config: DiscoveryConfig,
    /// Host-supplied screen list; overrides `backend.screens()` when set.
    screens: Option<Vec<Rect>>,
    devices: Vec<DeckLinkDeviceInfo>,
    initialized: bool,
}

impl<B: DeviceBackend> DeckLinkDiscovery<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, DiscoveryConfig::default())
    }

    pub fn with_config(backend: B, config: DiscoveryConfig) -> Self {
        Self {
            backend,
            config,
            screens: None,
            devices: Vec::new(),
            initialized: false,
        }
    }

    /// Replace the regular-screen geometry used for `device_index` and
    /// virtual placement.  Takes effect on the next enumeration.
    pub fn set_screens(&mut self, screens: Vec<Rect>) {
        self.screens = Some(screens);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Open the backend and enumerate.  Returns `true` when devices were
    /// enumerated (possibly zero of them), `false` when DeckLink support is
    /// unavailable.  Idempotent.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return true;
        }

        log::debug!("creating DeckLink iterator");
        if let Err(e) = self.backend.open() {
            log::debug!("{e}");
            log::debug!("this is expected when DeckLink hardware or drivers are not installed");
            self.fail();
            return false;
        }
        log::debug!("DeckLink iterator created");

        match self.enumerate() {
            Ok(devices) => {
                self.devices = devices;
                self.initialized = true;
                true
            }
            Err(e) => {
                log::warn!("error enumerating DeckLink devices, continuing without DeckLink: {e}");
                self.fail();
                false
            }
        }
    }

    /// Release the iterator and COM and forget all devices.  Safe to call
    /// any number of times.
    pub fn shutdown(&mut self) {
        self.backend.close();
        self.devices.clear();
        self.initialized = false;
    }

    /// Devices found by the last enumeration, initializing first if needed.
    /// Empty when DeckLink support is unavailable.
    pub fn available_devices(&mut self) -> Vec<DeckLinkDeviceInfo> {
        if !self.initialized {
            self.initialize();
        }
        self.devices.clone()
    }

    /// Enumerate again and report what changed since the previous list.
    ///
    /// Devices are matched by display and model name; identical devices are
    /// matched by count.  Removals are reported with their old index, arrivals
    /// with their new one.
    pub fn refresh(&mut self) -> Vec<DeviceEvent> {
        let previous = std::mem::take(&mut self.devices);
        if self.initialized {
            match self.enumerate() {
                Ok(devices) => self.devices = devices,
                Err(e) => {
                    log::warn!("error re-enumerating DeckLink devices: {e}");
                    self.fail();
                }
            }
        } else {
            self.initialize();
        }
        diff(&previous, &self.devices)
    }

    fn enumerate(&mut self) -> Result<Vec<DeckLinkDeviceInfo>> {
        let screens = match &self.screens {
            Some(s) => s.clone(),
            None => self.backend.screens(),
        };
        let base_index = screens.len();
        let origin_x = layout::origin_x(&screens);
        let placement = self.config.layout();
        let playback_only = self.config.playback_only;

        log::debug!("starting DeckLink device enumeration");
        let raw = self.backend.devices()?;
        let total = raw.len();

        let devices: Vec<_> = raw
            .into_iter()
            .enumerate()
            .map(|(ordinal, raw)| build_device_info(raw, ordinal, base_index, origin_x, &placement))
            .filter(|info| !playback_only || info.supports_playback)
            .inspect(|info| {
                log::debug!(
                    "added DeckLink device {} (display {:?}, index {}, playback {})",
                    info.model_name,
                    info.display_name,
                    info.device_index,
                    info.supports_playback,
                )
            })
            .collect();

        log::info!(
            "DeckLink enumeration complete: {total} found, {} listed",
            devices.len()
        );
        Ok(devices)
    }

    fn fail(&mut self) {
        self.backend.close();
        self.devices.clear();
        self.initialized = false;
    }
}

impl<B: DeviceBackend> Drop for DeckLinkDiscovery<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn diff(old: &[DeckLinkDeviceInfo], new: &[DeckLinkDeviceInfo]) -> Vec<DeviceEvent> {
    let removed = unmatched(old, new)
        .into_iter()
        .map(|o| DeviceEvent::Removed(o.device_index));
    let arrived = unmatched(new, old)
        .into_iter()
        .map(|n| DeviceEvent::Arrived(n.device_index));
    removed.chain(arrived).collect()
}

/// Entries of `from` left over once each identity in `against` has claimed
/// one entry of the same identity, in list order.
fn unmatched<'a>(
    from: &'a [DeckLinkDeviceInfo],
    against: &'a [DeckLinkDeviceInfo],
) -> Vec<&'a DeckLinkDeviceInfo> {
    let mut available: HashMap<(&str, &str), usize> = HashMap::new();
    for d in against {
        *available.entry(d.identity()).or_default() += 1;
    }
    from.iter()
        .filter(|d| match available.get_mut(&d.identity()) {
            Some(n) if *n > 0 => {
                *n -= 1;
                false
            }
            _ => true,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
