//! CLI integration tests
//!
//! These tests run the built binary and verify:
//! - Command parsing and validation
//! - Output formatting
//! - Error handling
//! - Exit codes

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "PERMSCOPE_COLOR",
    "PERMSCOPE_LOG_LEVEL",
    "PERMSCOPE_LOG_JSON",
    "PERMSCOPE_PALETTE",
    "PERMSCOPE_RISK_THRESHOLD",
    "RUST_LOG",
];

/// Command for the built binary with a clean permscope environment.
fn permscope() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_permscope"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(args: &[&str]) -> Output {
    permscope()
        .args(args)
        .output()
        .expect("Failed to execute permscope")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[cfg(unix)]
fn create_file(dir: &Path, name: &str, perm: u32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, b"contents\n").expect("Failed to write file");
    fs::set_permissions(&path, fs::Permissions::from_mode(perm)).expect("Failed to chmod");
    path
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("permscope"));
    for command in ["ls", "decode", "audit", "grant"] {
        assert!(out.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let output = run(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_decode_human() {
    let output = run(&["--color", "never", "decode", "755", "41777"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "  755    ---- rwx r-x r-x 0755 ▫▪ \n\
         41777    ds-- rwx rwx rwx 0777 ▫▪▪\n"
    );
}

#[test]
fn test_decode_raw_json() {
    let output = run(&["decode", "--raw", "0x80000124", "--format", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["input"], "0x80000124");
    assert_eq!(parsed[0]["kind"], "directory");
    assert_eq!(parsed[0]["octal"], "0444");
    assert_eq!(parsed[0]["mode"], 0x8000_0124u32);
}

#[test]
fn test_decode_invalid_mode() {
    let output = run(&["decode", "999"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("invalid octal mode '999'"));
}

#[test]
fn test_decode_rejects_sign_prefix() {
    let output = run(&["decode", "+755"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid octal mode '+755'"));
}

#[test]
fn test_log_level_flag_overrides_environment() {
    let output = permscope()
        .env("PERMSCOPE_LOG_LEVEL", "loud")
        .args(["--log-level", "debug", "--color", "never", "decode", "755"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("0755"));
    assert!(stderr(&output).contains("permscope v"));
    assert!(!stderr(&output).contains("Invalid log level"));
}

#[test]
fn test_invalid_log_level_without_flag_is_config_error() {
    let output = permscope()
        .env("PERMSCOPE_LOG_LEVEL", "loud")
        .args(["decode", "755"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid log level: loud"));
}

#[test]
fn test_log_json_from_environment() {
    let output = permscope()
        .env("PERMSCOPE_LOG_JSON", "true")
        .args(["-v", "decode", "755"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let first = stderr(&output).lines().next().unwrap_or_default().to_string();
    let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed["level"], "DEBUG");
}

#[test]
fn test_color_always_emits_ansi() {
    let output = run(&["--color", "always", "decode", "644"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("\x1b["));
}

#[test]
fn test_color_env_var() {
    let output = permscope()
        .env("PERMSCOPE_COLOR", "never")
        .args(["decode", "644"])
        .output()
        .unwrap();

    assert!(!stdout(&output).contains("\x1b["));
}

#[test]
fn test_palette_file_overrides_tokens() {
    let dir = TempDir::new().unwrap();
    let palette = dir.path().join("palette.toml");
    fs::write(&palette, "[perm]\nnone = \".\"\n").unwrap();

    let output = permscope()
        .env("PERMSCOPE_PALETTE", &palette)
        .args(["--color", "never", "decode", "640"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "640    ---- rw. r.. ... 0640    \n");
}

#[test]
fn test_missing_palette_is_config_error() {
    let output = permscope()
        .env("PERMSCOPE_PALETTE", "/nonexistent/palette.toml")
        .args(["decode", "640"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read palette"));
}

#[test]
fn test_invalid_threshold_is_config_error() {
    let output = permscope()
        .env("PERMSCOPE_RISK_THRESHOLD", "1.5")
        .args(["decode", "640"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Risk threshold"));
}

#[cfg(unix)]
#[test]
fn test_ls_directory_contents() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "alpha", 0o644);
    create_file(dir.path(), "beta", 0o600);

    let output = run(&["--color", "never", "ls", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  ---- rw- r-- r-- 0644"));
    assert!(lines[0].ends_with(" alpha"));
    assert!(lines[1].starts_with("  ---- rw- --- --- 0600"));
    assert!(lines[1].ends_with(" beta"));
}

#[cfg(unix)]
#[test]
fn test_ls_directory_itself_as_yaml() {
    let dir = TempDir::new().unwrap();

    let output = run(&["ls", "-d", "-f", "yaml", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed.as_sequence().unwrap().len(), 1);
    assert_eq!(parsed[0]["permissions"]["kind"].as_str(), Some("directory"));
}

#[test]
fn test_ls_missing_path_fails() {
    let output = run(&["ls", "/definitely/not/here"]);
    assert_eq!(output.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn test_audit_exit_codes() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "safe", 0o600);
    let path = dir.path().to_str().unwrap().to_string();

    let clean = run(&["--color", "never", "audit", &path]);
    assert_eq!(clean.status.code(), Some(0));
    assert!(stdout(&clean).contains("0 of 1 entries at or above risk 0.50"));

    create_file(dir.path(), "open", 0o777);
    let dirty = run(&["--color", "never", "audit", &path]);
    assert_eq!(dirty.status.code(), Some(3));
    assert!(stdout(&dirty).contains("open  1.00"));

    let strict = run(&["audit", "--min-risk", "0", "-f", "json", &path]);
    assert_eq!(strict.status.code(), Some(3));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&strict)).unwrap();
    assert_eq!(parsed["findings"].as_array().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_grant_changes_mode_on_disk() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = create_file(dir.path(), "run.sh", 0o644);

    let output = run(&[
        "--color",
        "never",
        "grant",
        path.to_str().unwrap(),
        "--exec",
        "u",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("before   ---- rw- r-- r-- 0644"));
    assert!(out.contains("after    ---- rwx r-- r-- 0744"));

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o7777;
    assert_eq!(mode, 0o744);
}

#[test]
fn test_grant_without_changes_is_usage_error() {
    let output = run(&["grant", "/tmp"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("nothing to grant"));
}

#[test]
fn test_grant_invalid_subject() {
    let output = run(&["grant", "/tmp", "--read", "uz"]);
    assert_eq!(output.status.code(), Some(2));
}
