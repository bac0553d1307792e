use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use cart_core::{AddOutcome, CartEvent, LogLevel, MemoryLog, Money, ValidationError};
use cart_store::{open_cart, CartConfig, StoreError};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

const CATALOG: &str = r#"{
  "apple": 1.00,
  "banana": 1.10,
  "orange": 3.00,
  "pineapple": 1.00,
  "kiwi": 3.00
}"#;

const ECB_RATES: &str = "\
Date, USD, JPY, GBP, CHF, \n\
15 October 2026, 1.10, 162.31, 0.85, 0.9412, \n";

/// Writes catalog, rate file and cart.toml into `dir`, returns the config path.
fn write_fixtures(dir: &Path, display: &str) -> Result<std::path::PathBuf, Box<dyn Error>> {
    std::fs::create_dir_all(dir.join("data"))?;
    std::fs::write(dir.join("data/product_prices.json"), CATALOG)?;
    std::fs::write(dir.join("data/eurofxref.csv"), ECB_RATES)?;

    let config = format!(
        r#"
catalog_path = "data/product_prices.json"
rates_path = "data/eurofxref.csv"

[currencies]
base = {{ code = "EUR", symbol = "€" }}
display = [{}]
"#,
        display
    );
    let path = dir.join("cart.toml");
    std::fs::write(&path, config)?;
    Ok(path)
}

const USD_GBP: &str = r#"{ code = "USD", symbol = "$" }, { code = "GBP", symbol = "£" }"#;

/// Full reference basket: orange 2, banana 1, pineapple 3, kiwi 1 with an
/// unknown code and a negative quantity mixed in.
#[test]
fn test_reference_basket_from_files() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;

    let config = CartConfig::load(Some(config_path))?;
    let log = Arc::new(MemoryLog::new());
    let mut cart = open_cart(&config, log.clone())?;

    assert_eq!(cart.add("orange", 2), AddOutcome::Added);
    assert_eq!(cart.add("orangeX", 2), AddOutcome::RejectedUnknownProduct);
    assert_eq!(cart.add("banana", 1), AddOutcome::Added);
    assert_eq!(cart.add("pineapple", -3), AddOutcome::RejectedInvalidQuantity);
    assert_eq!(cart.add("pineapple", 3), AddOutcome::Added);
    assert_eq!(cart.add("kiwi", 1), AddOutcome::Added);

    assert_eq!(
        cart.render(),
        vec![
            "orange - 2 - €6.00 - $6.60 - £5.10",
            "banana - 1 - €1.10 - $1.21 - £0.94",
            "pineapple - 3 - €3.00 - $3.30 - £2.55",
            "kiwi - 1 - €3.00 - $3.30 - £2.55",
            "Total = €13.10 - $14.41 - £11.14",
        ]
    );

    assert_eq!(log.at_level(LogLevel::Warning).len(), 2);
    assert!(log.at_level(LogLevel::Error).is_empty());
    Ok(())
}

#[test]
fn test_repeated_code_merges_into_one_line() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;

    let config = CartConfig::load(Some(config_path))?;
    let mut cart = open_cart(&config, Arc::new(MemoryLog::new()))?;

    assert_eq!(cart.add("pineapple", 1), AddOutcome::Added);
    assert_eq!(cart.add("pineapple", 1), AddOutcome::Merged);

    let receipt = cart.receipt();
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines[0].quantity, 2);
    assert_eq!(receipt.lines[0].base_price, Money::from_cents(200));
    Ok(())
}

#[test]
fn test_display_currencies_follow_config_order() -> TestResult {
    let temp_dir = TempDir::new()?;
    let display = r#"{ code = "GBP", symbol = "£" }, { code = "CHF", symbol = "CHF " }"#;
    let config_path = write_fixtures(temp_dir.path(), display)?;

    let config = CartConfig::load(Some(config_path))?;
    let mut cart = open_cart(&config, Arc::new(MemoryLog::new()))?;
    cart.add("apple", 1);

    assert_eq!(cart.render()[0], "apple - 1 - €1.00 - £0.85 - CHF 0.94");
    Ok(())
}

#[test]
fn test_display_currency_missing_from_rate_file() -> TestResult {
    let temp_dir = TempDir::new()?;
    let display = r#"{ code = "USD", symbol = "$" }, { code = "SEK", symbol = "kr" }"#;
    let config_path = write_fixtures(temp_dir.path(), display)?;

    let config = CartConfig::load(Some(config_path))?;
    let log = Arc::new(MemoryLog::new());
    let mut cart = open_cart(&config, log.clone())?;
    cart.add("apple", 1);

    assert_eq!(
        cart.render(),
        vec!["apple - 1 - €1.00 - $1.10 - kr0.00", "Total = €1.00 - $1.10 - kr0.00"]
    );

    let errors = log.at_level(LogLevel::Error);
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        &errors[0].event,
        CartEvent::ConversionFailed { currency, .. } if currency == "SEK"
    ));
    Ok(())
}

#[test]
fn test_unsupported_currency_lookup_returns_zero() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;

    let config = CartConfig::load(Some(config_path))?;
    let log = Arc::new(MemoryLog::new());
    let cart = open_cart(&config, log.clone())?;

    assert_eq!(cart.get_price_in_currency(Money::from_cents(200), "US"), Money::zero());
    assert_eq!(log.at_level(LogLevel::Error).len(), 1);
    Ok(())
}

#[test]
fn test_invalid_catalog_is_fatal() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;
    std::fs::write(temp_dir.path().join("data/product_prices.json"), r#"{"apple": "cheap"}"#)?;

    let config = CartConfig::load(Some(config_path))?;
    let result = open_cart(&config, Arc::new(MemoryLog::new()));

    assert!(matches!(result, Err(StoreError::InvalidCatalog(_))));
    Ok(())
}

#[test]
fn test_sub_cent_catalog_price_rounds_per_line() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;
    std::fs::write(
        temp_dir.path().join("data/product_prices.json"),
        r#"{"gum": 0.125, "apple": 1.00}"#,
    )?;

    let config = CartConfig::load(Some(config_path))?;
    let mut cart = open_cart(&config, Arc::new(MemoryLog::new()))?;
    cart.add("gum", 3);
    cart.add("apple", 1);

    assert_eq!(
        cart.render(),
        vec![
            "gum - 3 - €0.38 - $0.42 - £0.32",
            "apple - 1 - €1.00 - $1.10 - £0.85",
            "Total = €1.38 - $1.52 - £1.17",
        ]
    );
    Ok(())
}

#[test]
fn test_duplicate_catalog_code_is_fatal() -> TestResult {
    let temp_dir = TempDir::new()?;
    let config_path = write_fixtures(temp_dir.path(), USD_GBP)?;
    std::fs::write(
        temp_dir.path().join("data/product_prices.json"),
        r#"{"apple": 1.00, "apple": 2.00}"#,
    )?;

    let config = CartConfig::load(Some(config_path))?;
    let result = open_cart(&config, Arc::new(MemoryLog::new()));

    assert!(matches!(
        result,
        Err(StoreError::Validation(ValidationError::Duplicate { value, .. })) if value == "apple"
    ));
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected_at_load() -> TestResult {
    let temp_dir = TempDir::new()?;
    let display = r#"{ code = "USD", symbol = "$" }, { code = "USD", symbol = "US$" }"#;
    let config_path = write_fixtures(temp_dir.path(), display)?;

    assert!(matches!(
        CartConfig::load(Some(config_path)),
        Err(StoreError::Validation(_))
    ));
    Ok(())
}
