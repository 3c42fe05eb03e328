#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

/// Every variable the configuration reads.
pub const CONFIG_VARS: [&str; 6] = [
    "KLONDIKE_CONFIG",
    "KLONDIKE_SAVE_DIR",
    "KLONDIKE_DRAW",
    "KLONDIKE_FLIP_LIMIT",
    "KLONDIKE_SCORE",
    "KLONDIKE_SEED",
];

/// Clears the configuration variables, applies `pairs`, and restores the previous
/// environment on drop. Tests using it must be `#[serial]`.
pub struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let restores = CONFIG_VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in CONFIG_VARS {
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }

    /// Point the save directory at `dir` and clear everything else.
    pub fn save_dir(dir: &Path) -> Self {
        let dir = dir.to_string_lossy().into_owned();
        Self::apply(&[("KLONDIKE_SAVE_DIR", dir.as_str())])
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    run_cli_with_input(args, "")
}

pub fn run_cli_with_input(args: &[&str], input: &str) -> CliResult {
    let mut argv = vec!["klondike"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let exit_code = klondike_cli::run_with_input(argv, &mut out, &mut err, &mut input);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// The saved board as `show --json` prints it.
pub fn show_json() -> serde_json::Value {
    let res = run_cli(&["show", "--json"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).unwrap()
}
