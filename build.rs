/// decklink-discovery build script.
///
/// Unlike a Windows-only application this crate builds everywhere: non-Windows
/// targets compile the unsupported backend, which reports no devices.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
}
