use assert_cmd::Command;
use predicates::prelude::*;

use ctfscan::testkit::market::{question_id, CONDITION_ID, NO_TOKEN_HEX, ORACLE, YES_TOKEN_HEX};

fn ctfscan() -> Command {
    let mut cmd = Command::cargo_bin("ctfscan").expect("binary built");
    for key in ["RPC_URL", "GAMMA_API_URL", "CTF_COLLATERAL_TOKEN", "CTF_ORACLE_FALLBACK", "RUST_LOG"] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn derive_prints_position_ids() {
    let output = ctfscan()
        .args(["derive", "--oracle", ORACLE, "--question-id", &question_id()])
        .output()
        .expect("run ctfscan");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(json["conditionId"], CONDITION_ID);
    assert_eq!(json["yesTokenId"], YES_TOKEN_HEX);
    assert_eq!(json["noTokenId"], NO_TOKEN_HEX);
    assert_eq!(json["collateralToken"], "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
}

#[test]
fn derive_from_condition_id_alone() {
    ctfscan()
        .args(["derive", "--condition-id", CONDITION_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains(YES_TOKEN_HEX));
}

#[test]
fn derive_without_oracle_fails() {
    ctfscan()
        .args(["derive", "--question-id", &question_id()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing required field: oracle"));
}

#[test]
fn derive_uses_configured_oracle_fallback() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ctfscan.toml");
    std::fs::write(&path, format!("[chain]\noracle_fallback = \"{ORACLE}\"\n")).expect("write config");

    ctfscan()
        .arg("--config")
        .arg(&path)
        .args(["derive", "--question-id", &question_id()])
        .assert()
        .success()
        .stdout(predicate::str::contains(CONDITION_ID));
}

#[test]
fn invalid_config_exits_nonzero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[registry]\nretry_max_attempts = 0\n").expect("write config");

    ctfscan()
        .arg("--config")
        .arg(&path)
        .args(["derive", "--condition-id", CONDITION_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry.retry_max_attempts"));
}

#[test]
fn malformed_tx_hash_is_a_usage_error() {
    ctfscan()
        .args(["trades", "--tx-hash", "0x1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tx_hash"));
}

#[test]
fn market_requires_a_key() {
    ctfscan().arg("market").assert().failure();
}
