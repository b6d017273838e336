// ── DeckLink COM interfaces ───────────────────────────────────────────────────
//
// Only the slice of the vendor API that discovery touches.  Method order must
// match the driver's vtables exactly; adding a method anywhere but the end of
// a trait shifts every slot after it.

#![allow(non_snake_case, non_upper_case_globals)]

use windows::Win32::Foundation::BOOL;
use windows_core::{interface, IUnknown, IUnknown_Vtbl, BSTR, GUID, HRESULT};

// ── Class and interface IDs ───────────────────────────────────────────────────

/// `CLSID_CDeckLinkIterator`.
pub(crate) const CLSID_CDeckLinkIterator: GUID =
    GUID::from_u128(0xDDF701E1_6216_40D8_9E70_E55CE97C0E0C);

/// Iterator IID published by the Windows driver.
pub(crate) const IID_IDeckLinkIterator: GUID =
    GUID::from_u128(0x50C36AEF_3A05_4A7A_8101_888B0C0E0C0E);

/// Iterator IID used by the macOS/Linux headers; some driver releases only
/// answer to this one.
pub(crate) const IID_IDeckLinkIterator_Alt: GUID =
    GUID::from_u128(0x50FB36CD_3063_4B73_BDBB_958087F2D8BA);

// ── Attribute IDs (BMDDeckLinkAttributeID) ────────────────────────────────────

/// `BMDDeckLinkVideoIOSupport`: bit set of capture/playback support.
pub(crate) const BMDDeckLinkVideoIOSupport: u32 = 0x6F74_7469;

/// `BMDDeckLinkDuplex`: current duplex mode FourCC.
pub(crate) const BMDDeckLinkDuplex: u32 = 0x6475_7870;

// ── Interfaces ────────────────────────────────────────────────────────────────

#[interface("C418FBDD-0587-48ED-8FE5-640F0A14AF91")]
pub(crate) unsafe trait IDeckLink: IUnknown {
    fn GetModelName(&self, model_name: *mut BSTR) -> HRESULT;
    fn GetDisplayName(&self, display_name: *mut BSTR) -> HRESULT;
}

/// Single-pass enumerator over attached devices.  `Next` returns `S_FALSE`
/// once exhausted; a fresh iterator must be created to enumerate again.
#[interface("50C36AEF-3A05-4A7A-8101-888B0C0E0C0E")]
pub(crate) unsafe trait IDeckLinkIterator: IUnknown {
    fn Next(&self, device: *mut Option<IDeckLink>) -> HRESULT;
}

/// Same vtable as `IDeckLinkIterator`, requested under the alternate IID.
#[interface("50FB36CD-3063-4B73-BDBB-958087F2D8BA")]
pub(crate) unsafe trait IDeckLinkIteratorAlt: IUnknown {
    fn Next(&self, device: *mut Option<IDeckLink>) -> HRESULT;
}

#[interface("2B54EDEF-5B32-429F-BA11-EBAF8B0C0E0C")]
pub(crate) unsafe trait IDeckLinkProfileAttributes: IUnknown {
    fn GetFlag(&self, id: u32, value: *mut BOOL) -> HRESULT;
    fn GetInt(&self, id: u32, value: *mut i64) -> HRESULT;
    // GetFloat and GetString follow; discovery never reads them.
}
