//! Integration tests for the `dh` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FERAL_WORLD: &str = r#"{
    "name": "Feral World",
    "type": "origin",
    "system": {
        "woundsFormula": "9+1d5",
        "fateBase": 2,
        "blessingThreshold": 3
    }
}"#;

const PARANOID: &str = r#"{
    "name": "Paranoid",
    "type": "tendency",
    "system": { "bindCharacteristic": "per" }
}"#;

fn dh2e(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dh2e").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

/// A temp directory holding a fresh character and two item files.
fn table() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("feral.json"), FERAL_WORLD).unwrap();
    fs::write(dir.path().join("paranoid.json"), PARANOID).unwrap();
    dh2e(dir.path()).args(["new", "Mara Voss"]).assert().success();
    dir
}

fn record_json(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("character.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn new_creates_character_file() {
    let dir = TempDir::new().unwrap();
    dh2e(dir.path())
        .args(["new", "Mara Voss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Mara Voss"));
    assert!(dir.path().join("character.json").exists());
}

#[test]
fn new_refuses_to_overwrite() {
    let dir = table();
    dh2e(dir.path())
        .args(["new", "Someone Else"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(record_json(dir.path())["name"], "Mara Voss");
}

#[test]
fn show_lists_characteristics() {
    let dir = table();
    dh2e(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mara Voss"))
        .stdout(predicate::str::contains("Weapon Skill"))
        .stdout(predicate::str::contains("Influence"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn show_json_prints_record() {
    let dir = table();
    dh2e(dir.path())
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Mara Voss""#));
}

#[test]
fn show_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    dh2e(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_posts_result() {
    let dir = table();
    dh2e(dir.path())
        .args(["test", "ws", "-m", "+10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weapon Skill (35)"))
        .stdout(predicate::str::contains("Roll:"))
        .stdout(predicate::str::contains("Success").or(predicate::str::contains("Failure")));
}

#[test]
fn test_accepts_negative_modifier() {
    let dir = table();
    dh2e(dir.path())
        .args(["test", "ag", "-m", "-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agility (5)"));
}

#[test]
fn test_rejects_unknown_characteristic() {
    let dir = table();
    dh2e(dir.path())
        .args(["test", "luck"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown characteristic"));
}

#[test]
fn test_rejects_off_step_modifier() {
    let dir = table();
    dh2e(dir.path())
        .args(["test", "ws", "-m", "+15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid test modifier"));
}

#[test]
fn test_is_deterministic_for_a_seed() {
    let a = table();
    let b = table();
    let out_a = dh2e(a.path()).args(["--seed", "7", "test", "wp"]).output().unwrap();
    let out_b = dh2e(b.path()).args(["--seed", "7", "test", "wp"]).output().unwrap();
    assert!(out_a.status.success());
    assert_eq!(out_a.stdout, out_b.stdout);
}

#[test]
fn attach_origin_with_rolled_characteristics() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "feral.json", "--mode", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attached Feral World"))
        .stdout(predicate::str::contains("Roll characteristics"))
        .stdout(predicate::str::contains("stopped at").not());

    let record = record_json(dir.path());
    assert_eq!(record["origin"], "Feral World");
    let wounds = record["wounds"]["maximum"].as_i64().unwrap();
    assert!((10..=14).contains(&wounds));
    assert_eq!(record["wounds"]["current"].as_i64().unwrap(), wounds);
    let fate = record["fate"]["maximum"].as_i64().unwrap();
    assert!(fate == 2 || fate == 3);
    for value in record["characteristics"].as_object().unwrap().values() {
        let value = value.as_i64().unwrap();
        assert!((20..=40).contains(&value));
    }
    assert_eq!(record["characteristics"].as_object().unwrap().len(), 10);
}

#[test]
fn attach_origin_with_point_buy() {
    let dir = table();
    dh2e(dir.path())
        .args([
            "attach",
            "feral.json",
            "--mode",
            "pointbuy",
            "--alloc",
            "ws=15,bs=15,s=15,t=15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Point-buy"));

    let record = record_json(dir.path());
    assert_eq!(record["characteristics"]["ws"], 40);
    assert_eq!(record["characteristics"]["t"], 40);
    assert_eq!(record["characteristics"]["ag"], 25);
}

#[test]
fn attach_origin_without_mode_stops_at_dialog() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "feral.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stopped at"))
        .stdout(predicate::str::contains("dismissed"));

    let record = record_json(dir.path());
    assert_eq!(record["origin"], "Feral World");
    assert!(record["wounds"]["maximum"].as_i64().unwrap() >= 10);
}

#[test]
fn attach_alloc_requires_point_buy() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "feral.json", "--mode", "generate", "--alloc", "ws=5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--alloc needs --mode pointbuy"));
}

#[test]
fn attach_tendency_leaves_counters_alone() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "paranoid.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attached Paranoid"));

    let record = record_json(dir.path());
    assert_eq!(record["origin"], "");
    assert_eq!(record["wounds"]["maximum"], 0);
}

#[test]
fn remove_last_origin_resets_counters() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "feral.json", "--mode", "generate"])
        .assert()
        .success();
    let before = record_json(dir.path())["characteristics"].clone();

    dh2e(dir.path())
        .args(["remove", "Feral World"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Feral World"))
        .stdout(predicate::str::contains("wounds and fate reset"));

    let record = record_json(dir.path());
    assert_eq!(record["origin"], "");
    assert_eq!(record["wounds"]["maximum"], 0);
    assert_eq!(record["fate"]["maximum"], 0);
    assert_eq!(record["characteristics"], before);
}

#[test]
fn remove_unknown_attachment_is_a_no_op() {
    let dir = table();
    dh2e(dir.path())
        .args(["attach", "paranoid.json"])
        .assert()
        .success();
    let before = fs::read_to_string(dir.path().join("character.json")).unwrap();

    dh2e(dir.path())
        .args(["remove", "Nothing Here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"))
        .stderr(predicate::str::contains("error").not());

    let after = fs::read_to_string(dir.path().join("character.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn initiative_adds_agility_bonus() {
    let dir = table();
    dh2e(dir.path())
        .arg("initiative")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initiative"))
        .stdout(predicate::str::contains("Ag bonus: 2"))
        .stdout(predicate::str::contains("Result:"));
}

#[test]
fn edit_track_coerces_input() {
    let dir = table();
    dh2e(dir.path())
        .args(["edit", "wounds.current", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wounds.current = 0"));
    dh2e(dir.path())
        .args(["edit", "fate.maximum", "3abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fate.maximum = 3"));
    assert_eq!(record_json(dir.path())["fate"]["maximum"], 3);
}

#[test]
fn edit_characteristic_clamps() {
    let dir = table();
    dh2e(dir.path())
        .args(["edit", "ws", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weapon Skill = 100"));
    dh2e(dir.path())
        .args(["edit", "characteristics.ag", "33.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Agility = 33"));
    let record = record_json(dir.path());
    assert_eq!(record["characteristics"]["ws"], 100);
    assert_eq!(record["characteristics"]["ag"], 33);
}

#[test]
fn edit_unknown_field_fails() {
    let dir = table();
    dh2e(dir.path())
        .args(["edit", "sanity", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn journal_flag_writes_chat_log() {
    let dir = table();
    dh2e(dir.path())
        .args(["--journal", "chat.md", "initiative"])
        .assert()
        .success();
    let log = fs::read_to_string(dir.path().join("chat.md")).unwrap();
    assert!(log.contains("# Chat Log"));
    assert!(log.contains("Initiative"));
}

#[test]
fn journal_txt_writes_plain_text() {
    let dir = table();
    dh2e(dir.path())
        .args(["--journal", "chat.txt", "test", "ws"])
        .assert()
        .success();
    let log = fs::read_to_string(dir.path().join("chat.txt")).unwrap();
    assert!(log.starts_with("Chat Log\n========"));
    assert!(log.contains("Mara Voss: Weapon Skill (25)"));
    assert!(!log.contains("# Chat Log"));
}
