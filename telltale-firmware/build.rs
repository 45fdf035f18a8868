//! Build script for telltale-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates dashboard.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate dashboard.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=dashboard.toml");

    let config_path = Path::new("dashboard.toml");

    if !config_path.exists() {
        panic!(
            "dashboard.toml not found - the firmware embeds this file as \
             its default configuration"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("Failed to read dashboard.toml: {}", e),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => panic!("Invalid TOML syntax in dashboard.toml:\n{}", e),
    };

    let mut errors = Vec::new();

    validate_timing(&config, &mut errors);
    validate_indicator(&config, &mut errors);
    validate_chime(&config, &mut errors);
    validate_speed(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "Invalid dashboard.toml:\n{}",
            errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=dashboard.toml validated successfully");
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = match config.get("timing") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[timing] must be a table".into());
            return;
        }
        None => return, // optional section, defaults apply
    };

    for key in ["debounce_window_ms", "save_interval_ms", "poll_interval_ms"] {
        match timing.get(key) {
            Some(toml::Value::Integer(v)) => {
                if *v <= 0 {
                    errors.push(format!("[timing] {} must be > 0", key));
                }
            }
            Some(_) => errors.push(format!("[timing] {} must be an integer", key)),
            None => {}
        }
    }
}

fn validate_indicator(config: &toml::Value, errors: &mut Vec<String>) {
    let indicator = match config.get("indicator") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[indicator] must be a table".into());
            return;
        }
        None => return,
    };

    if let Some(trigger) = indicator.get("trigger") {
        match trigger {
            toml::Value::String(s) if s == "level" || s == "edge" => {}
            _ => errors.push("[indicator] trigger must be \"level\" or \"edge\"".into()),
        }
    }
}

fn validate_chime(config: &toml::Value, errors: &mut Vec<String>) {
    let chime = match config.get("chime") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[chime] must be a table".into());
            return;
        }
        None => return,
    };

    if let Some(toml::Value::Integer(f)) = chime.get("frequency_hz") {
        if *f < 100 || *f > 20_000 {
            errors.push("[chime] frequency_hz must be 100-20000".into());
        }
    }
    if let Some(toml::Value::Integer(d)) = chime.get("duration_ms") {
        if *d <= 0 || *d > 5_000 {
            errors.push("[chime] duration_ms must be 1-5000".into());
        }
    }
}

fn validate_speed(config: &toml::Value, errors: &mut Vec<String>) {
    let speed = match config.get("speed") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[speed] must be a table".into());
            return;
        }
        None => return,
    };

    if let Some(toml::Value::Integer(max)) = speed.get("adc_max") {
        if *max <= 0 || *max > 65_535 {
            errors.push("[speed] adc_max must be 1-65535".into());
        }
    }
    if let Some(toml::Value::Integer(kmh)) = speed.get("max_kmh") {
        if *kmh <= 0 || *kmh > 1_000 {
            errors.push("[speed] max_kmh must be 1-1000".into());
        }
    }
}
