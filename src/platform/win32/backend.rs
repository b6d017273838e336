// ── DeckLink iterator backend ─────────────────────────────────────────────────
//
// Creates the vendor iterator through COM and reads the handful of values the
// host needs from each device.  Every COM reference is held in a windows-crate
// smart pointer, so Release happens on drop.
//
// Field order in `Win32Backend` matters: `iterator` must drop before `com`.

use windows::Win32::{
    Foundation::{CO_E_NOTINITIALIZED, E_NOINTERFACE, REGDB_E_CLASSNOTREG, S_OK},
    System::Com::{CoCreateInstance, CLSCTX_ALL},
};
use windows_core::{Interface, IUnknown, BSTR, HRESULT};

use super::{
    com::ComApartment,
    interfaces::{
        BMDDeckLinkDuplex, BMDDeckLinkVideoIOSupport, CLSID_CDeckLinkIterator, IDeckLink,
        IDeckLinkIterator, IDeckLinkIteratorAlt, IDeckLinkProfileAttributes,
        IID_IDeckLinkIterator, IID_IDeckLinkIterator_Alt,
    },
    screens,
};
use crate::{
    device::{DeviceAttributes, RawDevice, Rect},
    discovery::DeviceBackend,
    error::{DiscoveryError, Result},
};

// ── Win32Backend ──────────────────────────────────────────────────────────────

/// `DeviceBackend` backed by the installed DeckLink driver.
#[derive(Default)]
pub struct Win32Backend {
    /// Iterator created by `open` and not yet walked.  Iterators are
    /// single-pass, so `devices` consumes it and later walks create a new one.
    iterator: Option<IDeckLinkIterator>,
    com: Option<ComApartment>,
}

impl Win32Backend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceBackend for Win32Backend {
    fn open(&mut self) -> Result<()> {
        if self.iterator.is_some() {
            return Ok(());
        }
        self.com.get_or_insert_with(ComApartment::enter);

        match create_iterator() {
            Ok(iterator) => {
                self.iterator = Some(iterator);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }

    fn devices(&mut self) -> Result<Vec<RawDevice>> {
        let iterator = match self.iterator.take() {
            Some(iterator) => iterator,
            None => create_iterator()?,
        };

        let mut found = Vec::new();
        loop {
            let mut device: Option<IDeckLink> = None;
            // SAFETY: `device` is a valid out-slot laid out as a nullable
            // interface pointer.  On S_OK the driver transfers one reference,
            // which `Option<IDeckLink>` releases on drop.
            let hr = unsafe { iterator.Next(&mut device) };
            if hr != S_OK {
                break;
            }
            match device {
                Some(device) => found.push(read_device(&device)),
                None => log::warn!("DeckLink iterator returned a null device"),
            }
        }

        Ok(found)
    }

    fn screens(&self) -> Vec<Rect> {
        screens::monitor_rects()
    }

    fn close(&mut self) {
        // Release the iterator before leaving the apartment.
        self.iterator = None;
        self.com = None;
    }
}

// ── Iterator creation ─────────────────────────────────────────────────────────

/// Instantiate the vendor iterator, trying the primary IID then the
/// alternate one.
fn create_iterator() -> Result<IDeckLinkIterator> {
    log::debug!("CLSID_CDeckLinkIterator: {CLSID_CDeckLinkIterator:?}");

    // SAFETY: CLSID_CDeckLinkIterator is a valid GUID that outlives the call;
    // no outer unknown (no aggregation).  The returned pointer is owned by
    // the IUnknown smart pointer.
    let unknown: IUnknown = unsafe { CoCreateInstance(&CLSID_CDeckLinkIterator, None, CLSCTX_ALL) }
        .map_err(|e| iterator_unavailable(e.code()))?;

    match unknown.cast::<IDeckLinkIterator>() {
        Ok(iterator) => Ok(iterator),
        Err(e) => {
            log::debug!(
                "IID {IID_IDeckLinkIterator:?} rejected ({:#010X}), trying {IID_IDeckLinkIterator_Alt:?}",
                e.code().0 as u32
            );
            let alt = unknown
                .cast::<IDeckLinkIteratorAlt>()
                .map_err(|e| iterator_unavailable(e.code()))?;
            // SAFETY: Both IIDs name the same vtable (IUnknown + Next).  The
            // reference owned by `alt` is transferred without an extra AddRef.
            Ok(unsafe { IDeckLinkIterator::from_raw(alt.into_raw()) })
        }
    }
}

/// Map a creation failure to the most likely cause.
fn iterator_unavailable(code: HRESULT) -> DiscoveryError {
    let reason = if code == REGDB_E_CLASSNOTREG {
        "class not registered; DeckLink drivers may not be installed"
    } else if code == E_NOINTERFACE {
        "interface not supported; driver version mismatch?"
    } else if code == CO_E_NOTINITIALIZED {
        "COM not initialized"
    } else {
        "unexpected error"
    };
    DiscoveryError::IteratorUnavailable {
        reason,
        code: code.0 as u32,
    }
}

// ── Per-device reads ──────────────────────────────────────────────────────────

fn read_device(device: &IDeckLink) -> RawDevice {
    RawDevice {
        // SAFETY: `out` points at a live, null BSTR owned by `read_bstr`.
        model_name: read_bstr(|out| unsafe { device.GetModelName(out) }),
        // SAFETY: as above.
        display_name: read_bstr(|out| unsafe { device.GetDisplayName(out) }),
        attributes: device
            .cast::<IDeckLinkProfileAttributes>()
            .ok()
            .map(|attrs| DeviceAttributes {
                duplex: read_int(&attrs, BMDDeckLinkDuplex),
                video_io_support: read_int(&attrs, BMDDeckLinkVideoIOSupport),
            }),
    }
}

/// Call a BSTR getter.  `None` on failure or an empty string.
fn read_bstr(get: impl FnOnce(*mut BSTR) -> HRESULT) -> Option<String> {
    let mut value = BSTR::new();
    if get(&mut value) != S_OK || value.is_empty() {
        return None;
    }
    // BSTR frees itself (SysFreeString) when `value` drops.
    Some(value.to_string())
}

fn read_int(attrs: &IDeckLinkProfileAttributes, id: u32) -> Option<i64> {
    let mut value = 0i64;
    // SAFETY: `value` is a valid i64 out-slot for the duration of the call.
    let hr = unsafe { attrs.GetInt(id, &mut value) };
    (hr == S_OK).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_not_registered_means_no_drivers() {
        match iterator_unavailable(REGDB_E_CLASSNOTREG) {
            DiscoveryError::IteratorUnavailable { reason, code } => {
                assert!(reason.contains("drivers"));
                assert_eq!(code, 0x8004_0154);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failed_getter_yields_none() {
        assert_eq!(read_bstr(|_| E_NOINTERFACE), None);
    }

    #[test]
    fn closing_twice_is_harmless() {
        let mut backend = Win32Backend::new();
        backend.close();
        backend.close();
        assert!(backend.iterator.is_none());
    }
}
