// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  Discovery itself never
// surfaces these to the host: `DeckLinkDiscovery` logs them and falls back to
// an empty device list.

/// Every error that discovery can produce.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A COM call returned a failure HRESULT.
    #[error("{function} failed (HRESULT {code:#010x})")]
    Com {
        /// The name of the failing call, for display purposes.
        function: &'static str,
        /// The raw HRESULT, bits reinterpreted as `u32`.
        code: u32,
    },

    /// The vendor iterator could not be created.  Usually means the DeckLink
    /// drivers are not installed.
    #[error("DeckLink iterator unavailable: {reason} (HRESULT {code:#010x})")]
    IteratorUnavailable {
        /// Most likely cause, derived from the HRESULT.
        reason: &'static str,
        /// The raw HRESULT returned by creation, bits reinterpreted as `u32`.
        code: u32,
    },

    /// A standard I/O error (config file read, write, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// DeckLink enumeration is not available on this platform.
    #[error("DeckLink discovery is not supported on this platform")]
    Unsupported,
}

// Convert a windows-crate error (HRESULT) directly into a DiscoveryError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for DiscoveryError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Com {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
