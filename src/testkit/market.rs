//! Registry payload fixtures.
//!
//! Vectors come from an independent keccak implementation:
//! oracle [`ORACLE`], question `0xab..ab`, USDC.e collateral.

use serde_json::{json, Value};

pub const ORACLE: &str = "0x157Ce2d672854c848c9b79C49a8Cc6cc89176a49";
pub const CONDITION_ID: &str =
    "0x48fd33ed77f275cc39c2c0898d87dcf9b300e32e03f3e2aefa9950edcb7210c8";
pub const YES_TOKEN_HEX: &str =
    "0x25ba7569709e2653f9bb1224ccfd6ca0cb31f7111fde65d2531ecedd6bc7be83";
pub const NO_TOKEN_HEX: &str =
    "0xdebda43c8e92f6cf10240a1e821384ec35159f9eb7cd7f1acc6042f286fda0e0";
pub const YES_TOKEN_DECIMAL: &str =
    "17065019298606646089556894061031952672183445282569409260276221116549190631043";
pub const NO_TOKEN_DECIMAL: &str =
    "100748519999740729478460795997598453665553088329024919221632445846798771003616";

pub fn question_id() -> String {
    format!("0x{}", "ab".repeat(32))
}

/// A Gamma-shaped market whose registry token ids agree with derivation.
pub fn gamma_market() -> Value {
    json!({
        "id": "512340",
        "slug": "will-it-rain",
        "question": "Will it rain?",
        "conditionId": CONDITION_ID,
        "questionID": question_id(),
        "resolvedBy": ORACLE,
        "outcomes": "[\"Yes\", \"No\"]",
        "clobTokenIds": format!("[\"{YES_TOKEN_DECIMAL}\", \"{NO_TOKEN_DECIMAL}\"]"),
    })
}
