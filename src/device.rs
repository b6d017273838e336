// ── Device records ────────────────────────────────────────────────────────────
//
// Plain value types handed to the host.  No platform imports; the Win32
// backend fills a `RawDevice` per hardware device and `build_device_info`
// turns it into the record the host sees.

use serde::{Deserialize, Serialize};

use crate::layout::VirtualLayout;

// ── Vendor attribute values ───────────────────────────────────────────────────

/// `bmdDuplexInactive` (`'inac'`).
pub const DUPLEX_INACTIVE: i64 = 0x696E_6163;

/// `bmdDeviceSupportsPlayback` bit of the video I/O support attribute.
pub const VIDEO_IO_PLAYBACK: i64 = 0x0000_0001;

// ── Rect ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in virtual desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge, clamped to `i32::MAX`.
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }
}

// ── Duplex ────────────────────────────────────────────────────────────────────

/// Duplex mode reported by the device's profile attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplexMode {
    /// The connector is not usable in the current profile.
    Inactive,
    /// Any other duplex mode; carries the raw FourCC.
    Active(i64),
}

impl DuplexMode {
    pub fn from_raw(code: i64) -> Self {
        if code == DUPLEX_INACTIVE {
            Self::Inactive
        } else {
            Self::Active(code)
        }
    }
}

// ── Raw backend output ────────────────────────────────────────────────────────

/// Attribute values read through the profile-attributes interface.
/// `None` means the individual `GetInt` call failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceAttributes {
    pub duplex: Option<i64>,
    pub video_io_support: Option<i64>,
}

/// What a backend managed to read from one device, before any defaults are
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDevice {
    pub model_name: Option<String>,
    pub display_name: Option<String>,
    /// `None` when the device does not expose the attributes interface.
    pub attributes: Option<DeviceAttributes>,
}

// ── DeckLinkDeviceInfo ────────────────────────────────────────────────────────

/// A discovered DeckLink device, presented to the host as an extra screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLinkDeviceInfo {
    pub model_name: String,
    pub display_name: String,
    /// Index in the host's screen list: regular screens come first, so this
    /// is `regular_screen_count + ordinal`.
    pub device_index: usize,
    pub supports_playback: bool,
    /// Virtual geometry used when the host lays the device out as a screen.
    pub geometry: Rect,
    #[serde(default)]
    pub duplex: Option<DuplexMode>,
}

impl DeckLinkDeviceInfo {
    /// Identity used to match a device across enumerations.
    pub(crate) fn identity(&self) -> (&str, &str) {
        (&self.display_name, &self.model_name)
    }
}

/// Apply naming and capability defaults to a raw device.
///
/// `ordinal` is the zero-based position in the vendor iterator and
/// `base_index` the number of regular screens.
///
/// | Missing | Fallback |
/// |---|---|
/// | model name | `"DeckLink Device {ordinal + 1}"` |
/// | display name | model name |
/// | attributes interface | playback assumed |
/// | video I/O attribute | playback assumed |
pub fn build_device_info(
    raw: RawDevice,
    ordinal: usize,
    base_index: usize,
    screens_right_edge: i32,
    layout: &VirtualLayout,
) -> DeckLinkDeviceInfo {
    let model_name = match raw.model_name {
        Some(name) => {
            log::debug!("found DeckLink device: {name}");
            name
        }
        None => {
            let name = format!("DeckLink Device {}", ordinal + 1);
            log::debug!("found DeckLink device with no model name, using {name:?}");
            name
        }
    };
    let display_name = raw.display_name.unwrap_or_else(|| model_name.clone());

    let (supports_playback, duplex) = match raw.attributes {
        Some(attrs) => {
            let duplex = attrs.duplex.map(DuplexMode::from_raw);
            if let Some(code) = attrs.duplex {
                log::debug!("  duplex mode: {code:#x}");
            }
            if duplex == Some(DuplexMode::Inactive) {
                log::warn!("  {display_name}: device is in inactive duplex mode");
            }
            let playback = match attrs.video_io_support {
                Some(bits) => {
                    let playback = bits & VIDEO_IO_PLAYBACK != 0;
                    log::debug!("  video I/O support: {bits:#X}, playback: {playback}");
                    playback
                }
                None => {
                    log::warn!("  {display_name}: could not read video I/O support, assuming playback");
                    true
                }
            };
            (playback, duplex)
        }
        None => {
            log::warn!("  {display_name}: could not get device attributes, assuming playback");
            (true, None)
        }
    };

    DeckLinkDeviceInfo {
        model_name,
        display_name,
        device_index: base_index + ordinal,
        supports_playback,
        geometry: layout.device_rect(screens_right_edge, ordinal),
        duplex,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn named(model: &str, display: &str) -> RawDevice {
        RawDevice {
            model_name: Some(model.to_owned()),
            display_name: Some(display.to_owned()),
            attributes: None,
        }
    }

    #[test]
    fn rect_right_edge() {
        assert_eq!(Rect::new(1920, 0, 1280, 1024).right(), 3200);
        assert_eq!(Rect::new(-1280, 0, 1280, 1024).right(), 0);
    }

    #[test]
    fn right_edge_saturates() {
        assert_eq!(Rect::new(i32::MAX - 10, 0, 1920, 1080).right(), i32::MAX);
        assert_eq!(Rect::new(i32::MIN, 0, -1, 0).right(), i32::MIN);
    }

    #[test]
    fn duplex_decodes_inactive_fourcc() {
        assert_eq!(DuplexMode::from_raw(0x696E6163), DuplexMode::Inactive);
        assert_eq!(DuplexMode::from_raw(0x66647570), DuplexMode::Active(0x66647570));
    }

    #[test]
    fn names_are_kept_when_present() {
        let info = build_device_info(
            named("DeckLink Duo 2", "DeckLink Duo (2)"),
            0,
            2,
            3840,
            &VirtualLayout::default(),
        );
        assert_eq!(info.model_name, "DeckLink Duo 2");
        assert_eq!(info.display_name, "DeckLink Duo (2)");
        assert_eq!(info.device_index, 2);
    }

    #[test]
    fn missing_model_name_uses_one_based_ordinal() {
        let info = build_device_info(RawDevice::default(), 2, 0, 0, &VirtualLayout::default());
        assert_eq!(info.model_name, "DeckLink Device 3");
        assert_eq!(info.display_name, "DeckLink Device 3");
    }

    #[test]
    fn missing_display_name_falls_back_to_model() {
        let raw = RawDevice {
            model_name: Some("UltraStudio 4K".to_owned()),
            ..RawDevice::default()
        };
        let info = build_device_info(raw, 0, 0, 0, &VirtualLayout::default());
        assert_eq!(info.display_name, "UltraStudio 4K");
    }

    #[test]
    fn no_attributes_interface_assumes_playback() {
        let info = build_device_info(named("a", "b"), 0, 0, 0, &VirtualLayout::default());
        assert!(info.supports_playback);
        assert_eq!(info.duplex, None);
    }

    #[test]
    fn unreadable_video_io_assumes_playback() {
        let mut raw = named("a", "b");
        raw.attributes = Some(DeviceAttributes {
            duplex: Some(DUPLEX_INACTIVE),
            video_io_support: None,
        });
        let info = build_device_info(raw, 0, 0, 0, &VirtualLayout::default());
        assert!(info.supports_playback);
        assert_eq!(info.duplex, Some(DuplexMode::Inactive));
    }

    #[test]
    fn playback_bit_decides_support() {
        let mut capture_only = named("a", "b");
        capture_only.attributes = Some(DeviceAttributes {
            duplex: None,
            video_io_support: Some(0x2),
        });
        let info = build_device_info(capture_only, 0, 0, 0, &VirtualLayout::default());
        assert!(!info.supports_playback);

        let mut both = named("a", "b");
        both.attributes = Some(DeviceAttributes {
            duplex: None,
            video_io_support: Some(0x3),
        });
        let info = build_device_info(both, 0, 0, 0, &VirtualLayout::default());
        assert!(info.supports_playback);
    }

    #[test]
    fn geometry_follows_layout() {
        let info = build_device_info(named("a", "b"), 1, 1, 1920, &VirtualLayout::default());
        assert_eq!(info.geometry, Rect::new(2020, 0, 1920, 1080));
    }

    #[test]
    fn info_serializes_for_the_host() {
        let info = build_device_info(named("a", "b"), 0, 1, 1920, &VirtualLayout::default());
        let json = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["device_index"], 1);
        assert_eq!(json["geometry"]["x"], 1920);
        assert_eq!(json["supports_playback"], true);
    }
}
