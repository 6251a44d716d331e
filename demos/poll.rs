// SPDX-License-Identifier: MPL-2.0

//! Test program: Log in to Dwelo, discover devices and poll them.
//!
//! This example demonstrates:
//! - How to use `DeviceManager::setup` to log in, discover and build façades
//! - How to read thermostat and lock state
//! - How to refresh every device on a fixed interval
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll -- <email> <password> [interval_secs] [rounds]
//! ```
//!
//! # Example
//!
//! ```bash
//! # Poll every 30 seconds, 3 times
//! cargo run --example poll -- me@example.com hunter2 30 3
//! ```

use std::env;
use std::time::Duration;

use dwelo_lib::{ClientConfig, DeviceManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <email> <password> [interval_secs] [rounds]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example poll -- me@example.com hunter2 30 3");
        std::process::exit(1);
    }

    let interval: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(30);
    let rounds: u32 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(3);

    let config = ClientConfig::new(&args[1], &args[2]).with_report_cache_ttl(Duration::from_secs(5));
    let manager = DeviceManager::from_config(config)?;

    println!("Logging in and discovering devices...");
    let devices = manager.setup().await?;
    println!(
        "Found {} thermostat(s) and {} lock(s)",
        devices.thermostats.len(),
        devices.locks.len()
    );

    if devices.is_empty() {
        return Ok(());
    }

    for round in 1..=rounds {
        println!("\n=== Round {round}/{rounds} ===");

        for thermostat in &devices.thermostats {
            let data = thermostat.data();
            println!(
                "  {} [{}]: {:.1}° mode={} activity={} target={:?}",
                thermostat.info().name(),
                thermostat.unique_id(),
                data.current_temperature,
                data.mode,
                data.activity,
                data.target_temperature()
            );
        }

        for lock in &devices.locks {
            println!(
                "  {} [{}]: {} battery={}% online={}",
                lock.info().name(),
                lock.unique_id(),
                if lock.is_locked() { "locked" } else { "unlocked" },
                lock.battery_level(),
                lock.is_online()
            );
        }

        if round < rounds {
            tokio::time::sleep(Duration::from_secs(interval)).await;
            let summary = manager.refresh_all(&devices).await?;
            println!("Refreshed {}, kept last state for {}", summary.refreshed, summary.failed);
        }
    }

    Ok(())
}
