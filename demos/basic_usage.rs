//! Basic relay usage example
//!
//! Demonstrates the default relay, a relay tree with per-hop verbosity and
//! prefixes, header flags, and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use relay_logger::prelude::*;
use relay_logger::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Relay Logger - Basic Usage Example ===\n");

    // The default relay writes to stderr with date, time and file:line
    println!("1. Logging through the default relay:");
    relay_logger::info(&[&"default relay ready"]);
    relay_logger::warnf(format_args!("{} retries left", 2));
    relay_logger::debugln(&[&"values:", &1, &2, &3]);

    println!("\n2. A relay tree with per-hop verbosity:");
    let console = Relay::builder()
        .verbosity(Severity::Debug)
        .writer(std::io::stderr(), Severity::Info, "", Flags::SHORT_FILE | Flags::COLOR)
        .build();

    let captured = SharedBuffer::new();
    let audit = Relay::builder()
        .verbosity(Severity::Warning)
        .prefix("audit")
        .writer(captured.clone(), Severity::Debug, "", Flags::NONE)
        .build();

    let root = Relay::new(Severity::Debug, "", Flags::NONE);
    root.add_receiver(Arc::new(console));
    root.add_receiver(Arc::new(audit));

    root.infof(format_args!("user {} logged in", "alice"));
    root.errorf(format_args!("user {} locked out", "mallory"));
    root.debug(&[&"hidden by every collector"]);
    println!("   audit relay captured: {:?}", captured.contents());

    println!("\n3. Changing flags across the tree:");
    root.set_flags(Flags::STD | Flags::UTC, MaskOp::Or);
    root.notice(&[&"timestamps now in UTC"]);

    println!("\n4. Logging macros:");
    let port = 8080;
    info!(root, "listening on port {}", port);
    warn!(root, "{} connections pending", 3);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
