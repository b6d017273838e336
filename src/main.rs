// ── decklink-probe ────────────────────────────────────────────────────────────
//
// Prints the DeckLink devices a host would see.  Set RUST_LOG=debug to follow
// the enumeration step by step.

use std::path::PathBuf;

use bpaf::Bpaf;
use decklink_discovery::{config, DeckLinkDiscovery, DiscoveryConfig, NativeBackend};

/// List DeckLink devices as virtual screens.
#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
struct Options {
    /// Print the device list as JSON
    #[bpaf(long)]
    json: bool,
    /// Read configuration from PATH instead of the default location
    #[bpaf(long, argument("PATH"))]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let opts = options().run();

    let cfg = match &opts.config {
        Some(path) => match config::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("decklink-probe: {}: {e}", path.display());
                std::process::exit(2);
            }
        },
        None => config::load().unwrap_or_else(DiscoveryConfig::default),
    };

    let mut discovery = DeckLinkDiscovery::with_config(NativeBackend::default(), cfg);
    let devices = discovery.available_devices();

    if opts.json {
        match serde_json::to_string_pretty(&devices) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("decklink-probe: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if devices.is_empty() {
        println!("No DeckLink devices found.");
        return;
    }
    for d in &devices {
        let g = d.geometry;
        println!(
            "[{}] {} ({}) playback={} geometry={}x{}+{}+{}",
            d.device_index,
            d.display_name,
            d.model_name,
            d.supports_playback,
            g.width,
            g.height,
            g.x,
            g.y,
        );
    }
}
