//! End-to-end tests of the binary in headless and listing modes.

pub mod headless_test;

use std::path::Path;
use std::process::Command;

/// Runs the built binary with `args`, isolated from any user config file.
pub fn run_binary(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let config = config_dir.join("config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_retail-insights"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RETAIL_FLAT_DB")
        .env_remove("RETAIL_NORMALIZED_DB")
        .output()
        .expect("Failed to execute binary");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
