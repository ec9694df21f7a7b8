// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual rrc-per binary and verify its behavior.

use std::process::{Command, Output};

/// Run rrc-per with arguments
fn run(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_rrc-per");
    Command::new(bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run rrc-per and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run rrc-per and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("LTE RRC"));
    assert!(output.contains("list"));
    assert!(output.contains("decode"));
    assert!(output.contains("encode"));
    assert!(output.contains("bits"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_no_subcommand() {
    run_err(&[]);
}

// ============================================================================
// List
// ============================================================================

#[test]
fn test_list() {
    let output = run_ok(&["list"]);
    let names: Vec<&str> = output.lines().collect();
    assert_eq!(
        names,
        vec![
            "csi_rs_cfg_nzp_r11",
            "p_c_and_cbsr_r13",
            "periodicity_start_pos_r16"
        ]
    );
}

#[test]
fn test_list_verbose() {
    let output = run_ok(&["list", "--verbose"]);
    assert!(output.contains("periodicity_start_pos_r16_c"));
}

// ============================================================================
// Decode / Encode
// ============================================================================

#[test]
fn test_decode_periodicity() {
    let output = run_ok(&["decode", "periodicity_start_pos_r16", "30"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["periodicity20ms"], 1);
}

#[test]
fn test_encode_periodicity() {
    let output = run_ok(&["encode", "periodicity_start_pos_r16", r#"{"periodicity20ms": 1}"#]);
    assert_eq!(output.trim(), "30");
}

#[test]
fn test_encode_decode_p_c_and_cbsr() {
    let json = r#"{"p-C-r13": -8, "cbsr-Selection-r13": {"beamformedK1a-r13": {"codebookSubsetRestriction3-r13": "1010"}}}"#;
    let hex = run_ok(&["encode", "p_c_and_cbsr_r13", json]);
    assert_eq!(hex.trim(), "008250");

    let output = run_ok(&["decode", "p_c_and_cbsr_r13", "0x00 82 50"]);
    let decoded: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(decoded["p-C-r13"], -8);
}

#[test]
fn test_encode_from_file() {
    let dir = std::env::temp_dir().join(format!("rrc-per-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("periodicity.json");
    std::fs::write(&path, r#"{"periodicity160ms": 15}"#).unwrap();

    let output = run_ok(&[
        "encode",
        "periodicity_start_pos_r16",
        "--file",
        path.to_str().unwrap(),
    ]);
    // 100 | 1111, padded
    assert_eq!(output.trim(), "9e");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_aligned_variant_flag() {
    let json = r#"{"p-C-r13": 0, "cbsr-Selection-r13": {"beamformedK1a-r13": {"codebookSubsetRestriction3-r13": "1"}}}"#;
    let hex = run_ok(&["encode", "p_c_and_cbsr_r13", json, "--variant", "aper"]);
    let output = run_ok(&["decode", "p_c_and_cbsr_r13", hex.trim(), "--variant", "aper"]);
    let decoded: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(decoded["p-C-r13"], 0);
}

#[test]
fn test_decode_unknown_ie() {
    let stderr = run_err(&["decode", "no_such_ie", "00"]);
    assert!(stderr.contains("unknown IE"));
}

#[test]
fn test_decode_bad_hex() {
    let stderr = run_err(&["decode", "periodicity_start_pos_r16", "zz"]);
    assert!(stderr.contains("Invalid hex"));
}

#[test]
fn test_decode_truncated_input() {
    let stderr = run_err(&["decode", "csi_rs_cfg_nzp_r11", "00"]);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_bad_variant() {
    run_err(&["decode", "periodicity_start_pos_r16", "30", "--variant", "ber"]);
}

// ============================================================================
// Bits
// ============================================================================

#[test]
fn test_bits() {
    let output = run_ok(&["bits", "0082", "--len", "13"]);
    assert_eq!(output.trim(), "00000000 10000");
}

#[test]
fn test_bits_too_long() {
    let stderr = run_err(&["bits", "00", "--len", "9"]);
    assert!(stderr.contains("Requested 9 bits"));
}
