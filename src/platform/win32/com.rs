// ── COM apartment guard ───────────────────────────────────────────────────────
//
// COM is initialized per thread.  The host may already have initialized the
// calling thread, possibly in a different apartment model; in that case COM is
// still usable and the guard must not undo the host's initialization.

use windows::Win32::{
    Foundation::RPC_E_CHANGED_MODE,
    System::Com::{CoInitializeEx, CoUninitialize, COINIT_MULTITHREADED},
};

/// RAII handle to this thread's COM initialization.
///
/// Not `Send`: `CoUninitialize` must run on the thread that called
/// `CoInitializeEx`.
pub(crate) struct ComApartment {
    /// `true` when our `CoInitializeEx` call must be balanced on drop.
    owned: bool,
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ComApartment {
    /// Join the multithreaded apartment.  Never fails: if COM cannot be
    /// initialized here the caller still tries to use it, and the resulting
    /// `CO_E_NOTINITIALIZED` is reported by `CoCreateInstance`.
    pub(crate) fn enter() -> Self {
        // SAFETY: No reserved pointer is passed.  Each successful call
        // (S_OK or S_FALSE) is balanced by exactly one CoUninitialize in Drop
        // on this same thread, enforced by the type being !Send.
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };

        let owned = if hr.is_ok() {
            true
        } else if hr == RPC_E_CHANGED_MODE {
            log::debug!("COM already initialized on this thread in another apartment");
            false
        } else {
            log::warn!("COM initialization warning (may still work): {:#010x}", hr.0 as u32);
            false
        };

        Self {
            owned,
            _not_send: std::marker::PhantomData,
        }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owned {
            // SAFETY: Balances the successful CoInitializeEx in `enter`; Drop
            // runs on the same thread because ComApartment is !Send.  All COM
            // objects owned by `Win32Backend` are released before this guard.
            unsafe { CoUninitialize() };
        }
    }
}
