//! # Receipt Printer
//!
//! Fills a cart from the command line and prints its receipt.
//!
//! ## Usage
//! ```bash
//! # Default config (platform config dir, else built-in defaults)
//! cargo run -p cart-store --bin receipt -- orange=2 banana=1
//!
//! # Explicit config file
//! cargo run -p cart-store --bin receipt -- --config ./data/cart.toml orange=2 kiwi=1
//!
//! # Loader detail on stderr
//! RUST_LOG=debug cargo run -p cart-store --bin receipt -- apple=1
//! ```
//!
//! Receipt lines go to stdout; logs go to stderr. Rejected additions are
//! logged as warnings and left off the receipt.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use cart_core::TracingLog;
use cart_store::{init_tracing, open_cart, CartConfig};

const USAGE: &str = "Usage: receipt [--config PATH] CODE=QTY ...";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut items: Vec<(String, i64)> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    return Err(format!("--config needs a path\n{}", USAGE).into());
                }
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  -c, --config PATH  Config file (default: CART_CONFIG or platform config dir)");
                println!("  -h, --help         Show this help message");
                println!();
                println!("Example: receipt orange=2 banana=1 pineapple=3 kiwi=1");
                return Ok(());
            }
            item => items.push(parse_item(item)?),
        }
        i += 1;
    }

    init_tracing();

    let config = CartConfig::load(config_path)?;
    let mut cart = open_cart(&config, Arc::new(TracingLog))?;

    for (code, quantity) in &items {
        cart.add(code, *quantity);
    }

    for line in cart.render() {
        println!("{}", line);
    }

    Ok(())
}

/// Splits `CODE=QTY`. The quantity is parsed but not range-checked; the cart
/// decides whether to accept it.
fn parse_item(arg: &str) -> Result<(String, i64), String> {
    let (code, quantity) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected CODE=QTY, got '{}'\n{}", arg, USAGE))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Quantity in '{}' is not a whole number", arg))?;
    Ok((code.to_string(), quantity))
}
