// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

mod backend; // vendor iterator walk, attribute reads
pub(crate) mod com; // per-thread COM apartment guard
pub(crate) mod interfaces; // DeckLink COM interface declarations
pub(crate) mod screens; // regular monitor geometry

pub use backend::Win32Backend;
