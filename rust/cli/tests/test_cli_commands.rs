mod helpers;

use helpers::{EnvGuard, run_cli, show_json};
use serde_json::Value;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn help_lists_expected_commands() {
    let res = run_cli(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for cmd in ["play", "deal", "show", "settings", "cfg"] {
        assert!(res.stdout.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["draw"]["value"], "one");
    assert_eq!(json["flip_limit"]["value"], "none");
    assert_eq!(json["score"]["value"], "show");
    assert_eq!(json["save_dir"]["value"], ".klondike");
    assert!(json["seed"]["value"].is_null());
    for key in ["save_dir", "draw", "flip_limit", "score", "seed"] {
        assert_eq!(json[key]["source"], "default", "{}", key);
    }
}

#[test]
#[serial]
fn cfg_env_overrides_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("klondike.toml");
    std::fs::write(&file, "flip_limit = \"three\"\nscore = \"hide\"\nseed = 11\n").unwrap();
    let file = file.to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[
        ("KLONDIKE_CONFIG", file.as_str()),
        ("KLONDIKE_SCORE", "show"),
        ("KLONDIKE_DRAW", "three"),
    ]);

    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["flip_limit"]["value"], "three");
    assert_eq!(json["flip_limit"]["source"], "file");
    assert_eq!(json["seed"]["value"], 11);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["score"]["value"], "show");
    assert_eq!(json["score"]["source"], "env");
    assert_eq!(json["draw"]["value"], "three");
    assert_eq!(json["draw"]["source"], "env");
    assert_eq!(json["save_dir"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_is_an_error() {
    let _env = EnvGuard::apply(&[("KLONDIKE_FLIP_LIMIT", "sometimes")]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"));
    assert!(res.stdout.is_empty());

    let res = run_cli(&["deal", "--seed", "1"]);
    assert_eq!(res.exit_code, 2);
}

#[test]
#[serial]
fn deal_is_deterministic_and_leaves_save_alone() {
    let dir = tempdir().unwrap();
    let _env = EnvGuard::save_dir(dir.path());

    let first = run_cli(&["deal", "--seed", "1"]);
    let second = run_cli(&["deal", "--seed", "1"]);
    assert_eq!(first.exit_code, 0);
    assert_eq!(first.stdout, second.stdout);
    assert!(first.stdout.starts_with("seed 1\n"));
    assert!(first.stdout.contains("score -$52"));
    assert_ne!(first.stdout, run_cli(&["deal", "--seed", "2"]).stdout);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
#[serial]
fn deal_draw_three_shows_three_talon_cards() {
    let dir = tempdir().unwrap();
    let _env = EnvGuard::save_dir(dir.path());
    let res = run_cli(&["deal", "--seed", "1", "--draw", "three"]);
    assert_eq!(res.exit_code, 0);
    let talon_line = res.stdout.lines().nth(1).unwrap();
    // marker, "talon", stock back, then the window
    let tokens: Vec<&str> = talon_line.split_whitespace().collect();
    assert_eq!(tokens[..3], [">", "talon", "##"]);
    assert_eq!(tokens.len(), 6);
    assert!(res.stdout.contains("draw three"));
}

#[test]
#[serial]
fn deal_uses_configured_seed() {
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().into_owned();
    let _env = EnvGuard::apply(&[("KLONDIKE_SAVE_DIR", dir_str.as_str()), ("KLONDIKE_SEED", "1")]);
    let configured = run_cli(&["deal"]);
    let explicit = run_cli(&["deal", "--seed", "1"]);
    assert_eq!(configured.stdout, explicit.stdout);
}

#[test]
#[serial]
fn show_without_save_deals_but_does_not_write() {
    let dir = tempdir().unwrap();
    let _env = EnvGuard::save_dir(dir.path());
    let json = show_json();
    assert_eq!(json["score"], "-$52");
    assert_eq!(json["selection"], 7);
    assert_eq!(json["mode"], "select_source");
    assert_eq!(json["stock"]["kind"], "face_down");
    assert_eq!(json["tableau"].as_array().unwrap().len(), 7);
    assert_eq!(json["tableau"][6]["hidden"], 6);
    assert!(!dir.path().join("key-0.bin").exists());
}

#[test]
#[serial]
fn settings_flips_cycles_saved_limit() {
    let dir = tempdir().unwrap();
    let _env = EnvGuard::save_dir(dir.path());
    for expected in ["zero", "one", "three", "none", "zero"] {
        let res = run_cli(&["settings", "flips"]);
        assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
        assert_eq!(res.stdout, format!("flips: {}\n", expected));
    }
    assert!(dir.path().join("key-0.bin").exists());
    assert_eq!(show_json()["settings"]["flip_limit"], "zero");
}

#[test]
#[serial]
fn settings_draw_score_and_reset() {
    let dir = tempdir().unwrap();
    let _env = EnvGuard::save_dir(dir.path());

    assert_eq!(run_cli(&["settings", "draw"]).stdout, "draw: three\n");
    let json = show_json();
    assert_eq!(json["settings"]["draw"], "three");
    assert_eq!(json["talon"].as_array().unwrap().len(), 3);

    assert_eq!(run_cli(&["settings", "score"]).stdout, "score: hide\n");
    assert!(show_json()["score"].is_null());
    assert_eq!(run_cli(&["settings", "score"]).stdout, "score: show\n");
    assert_eq!(show_json()["score"], "-$52");

    assert_eq!(run_cli(&["settings", "reset-score"]).stdout, "score: 0\n");
    assert_eq!(show_json()["score"], "$0");
}

#[test]
fn settings_rejects_unknown_entry() {
    let res = run_cli(&["settings", "colors"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: klondike"));
}
