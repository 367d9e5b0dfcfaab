mod helpers;

use helpers::{clear_config_env, run_cli};
use serde_json::Value;
use serial_test::serial;

#[test]
#[serial]
fn cfg_reports_file_and_env_sources() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blackjack.toml");
    std::fs::write(&path, "num_decks_in_shoe = 2\nstarting_credits = 300\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &path);
        std::env::set_var("BLACKJACK_CREDITS", "400");
    }

    let res = run_cli(&["cfg"], "");
    clear_config_env();

    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["num_decks_in_shoe"]["value"], 2);
    assert_eq!(json["num_decks_in_shoe"]["source"], "file");
    assert_eq!(json["starting_credits"]["value"], 400);
    assert_eq!(json["starting_credits"]["source"], "env");
    assert_eq!(json["num_tables"]["source"], "default");
}

#[test]
#[serial]
fn malformed_config_file_fails() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "num_tables = \"many\"\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &path);
    }
    let res = run_cli(&["cfg"], "");
    clear_config_env();
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("cannot parse config file"));
}

#[test]
#[serial]
fn tables_lists_default_registry() {
    clear_config_env();
    let res = run_cli(&["tables"], "");
    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    let tables = json.as_object().unwrap();
    assert_eq!(tables.len(), 6);
    for (_, view) in tables {
        assert_eq!(view["state"], "waiting");
        assert!(view["dealer"].is_null());
    }
}
