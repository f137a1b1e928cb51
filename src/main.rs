//! Flood Risk Classification Service
//!
//! Serves classified flood status for the Kelani basin gauging stations:
//! 1. Loads station thresholds from stations.toml (falling back to the
//!    compiled-in registry)
//! 2. Reads the latest water levels from the ingestion store
//! 3. Classifies each station and aggregates a basin-wide summary
//! 4. Exposes the results over a small HTTP API for the dashboard
//!
//! Readings are written by the external ingestion service; this process
//! only classifies and serves them.
//!
//! Usage:
//!   cargo run --release                    # Serve on the default port 8080
//!   cargo run --release -- --endpoint 9090 # Serve on a custom port
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string

use std::env;
use std::sync::Arc;

use floodrisk_service::config;
use floodrisk_service::db;
use floodrisk_service::endpoint;
use floodrisk_service::registry::{RegistryHandle, ThresholdRegistry};

const DEFAULT_PORT: u16 = 8080;

fn main() {
    println!("🌊 Flood Risk Classification Service");
    println!("=====================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port = DEFAULT_PORT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(port) => endpoint_port = port,
                        Err(_) => {
                            eprintln!("Error: invalid port '{}'", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load station thresholds
    println!("📊 Loading station thresholds...");
    let registry = match config::load_stations_default() {
        Ok(stations) => {
            let registry = config::build_registry(&stations);
            println!(
                "✓ Loaded {} stations from stations.toml ({} with thresholds)\n",
                stations.len(),
                registry.len()
            );
            registry
        }
        Err(e) => {
            eprintln!("   ⚠ Could not load stations.toml: {}", e);
            eprintln!("   Falling back to the compiled-in station registry\n");
            ThresholdRegistry::builtin()
        }
    };
    let registry = Arc::new(RegistryHandle::new(registry));

    // Connect to the readings store
    println!("🗄  Connecting to readings database...");
    let client = match db::connect_with_validation() {
        Ok(client) => {
            println!("✓ Database connection established\n");
            client
        }
        Err(e) => {
            eprintln!("\n❌ Database setup failed:\n\n{}\n", e);
            std::process::exit(1);
        }
    };

    // Serve until interrupted
    if let Err(e) = endpoint::start_endpoint_server(endpoint_port, client, registry) {
        eprintln!("\n❌ Endpoint server error: {}", e);
        std::process::exit(1);
    }
}
