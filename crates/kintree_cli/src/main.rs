//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kintree_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use kintree_core::{
    default_log_level, init_logging, FamilyTreeService, LayoutConfig, MemberFilter, MemoryStorage,
};

fn main() {
    // File logging is opt-in for the smoke probe; stdout stays clean.
    if let Ok(log_dir) = std::env::var("KINTREE_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("kintree_core version={}", kintree_core::core_version());

    // Why: an in-memory service seeds the built-in sample, which is enough
    // to prove store, layout and storage wiring without touching disk.
    match FamilyTreeService::open(MemoryStorage::new()) {
        Ok(service) => {
            let layout = service.layout(&MemberFilter::default(), 1200.0, &LayoutConfig::default());
            println!("sample members={}", service.members().len());
            println!(
                "sample layout nodes={} connectors={} height={}",
                layout.nodes.len(),
                layout.connectors.len(),
                layout.suggested_height
            );
        }
        Err(err) => {
            eprintln!("failed to open sample tree: {err}");
            std::process::exit(1);
        }
    }
}
