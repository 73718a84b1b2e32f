#![allow(dead_code)]

pub mod mock_parser;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the `voxparse` binary against an isolated config directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        let config_path = config_dir.join("voxparse").join("config.json");

        TestContext {
            temp_dir,
            config_path,
        }
    }

    /// Write a config file for the binary to pick up
    pub fn write_config(&self, json: &str) {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create config parent");
        }
        fs::write(&self.config_path, json).expect("Failed to write config");
    }

    /// Run the binary with `args`
    pub fn run(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_voxparse");
        Command::new(bin_path)
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("HOME", self.temp_dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run voxparse")
    }

    /// Run the binary and return stdout, asserting success
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "voxparse {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    }
}
