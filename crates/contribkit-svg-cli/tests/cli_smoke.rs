use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(parts: &[&str]) -> PathBuf {
    let mut path = repo_root().join("fixtures");
    for part in parts {
        path.push(part);
    }
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn stdout_of(args: &[&str]) -> String {
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = Command::new(exe)
        .env_remove("RUST_LOG")
        .env_remove("CONTRIBKIT_GITHUB_CONTRIBUTIONS_LOGIN")
        .env_remove("CONTRIBKIT_GITHUB_CONTRIBUTIONS_TOKEN")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn cli_prints_viewbox_dimensions() {
    let svg = fixture(&["sponsors", "digitalocean.svg"]);
    let out = stdout_of(&["dimensions", svg.to_string_lossy().as_ref()]);
    assert_eq!(out.trim(), r#"{"width":180,"height":180}"#);
}

#[test]
fn cli_falls_back_to_default_dimensions() {
    let svg = fixture(&["sponsors", "no-size.svg"]);
    let out = stdout_of(&[svg.to_string_lossy().as_ref()]);
    assert_eq!(out.trim(), r#"{"width":200,"height":100}"#);
}

#[test]
fn cli_reads_svg_from_stdin() {
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = assert_cmd::Command::new(exe)
        .args(["dimensions", "-"])
        .write_stdin(r#"<svg width="08" height="09"></svg>"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(output).unwrap().trim(),
        r#"{"width":8,"height":9}"#
    );
}

#[test]
fn cli_wraps_sponsor_logo() {
    let svg = fixture(&["sponsors", "copilot.svg"]);
    let out = stdout_of(&[
        "wrap",
        "--name",
        "GitHub Copilot",
        "--url",
        "https://github.com/features/copilot",
        "--height",
        "60",
        "--x",
        "203.0769230769231",
        "--y",
        "90",
        svg.to_string_lossy().as_ref(),
    ]);
    assert!(out.contains(r#"id="GitHubCopilot""#), "{out}");
    assert!(out.contains(r#"x="203.0769230769231" y="90""#), "{out}");
    assert!(out.contains(r#"width="73.84615384615384""#), "{out}");
    assert!(out.contains(r#"viewBox="0 0 256 208""#), "{out}");
    assert!(out.contains("<title>GitHub Copilot</title>"), "{out}");
    assert!(!out.contains("NaN"));
}

#[test]
fn cli_wrap_writes_out_file() {
    let svg = fixture(&["sponsors", "digitalocean.svg"]);
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("fragment.svg");

    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    Command::new(exe)
        .args([
            "wrap",
            "--name",
            "DigitalOcean",
            "--url",
            "https://digitalocean.com",
            "--height",
            "60",
            "--out",
            out.to_string_lossy().as_ref(),
            svg.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&out).expect("read fragment");
    assert!(text.contains(r#"width="60" height="60" viewBox="0 0 180 180""#));
}

#[test]
fn cli_wrap_requires_name_and_url() {
    let svg = fixture(&["sponsors", "copilot.svg"]);
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    Command::new(exe)
        .args(["wrap", "--name", "Only Name", svg.to_string_lossy().as_ref()])
        .assert()
        .code(2);
}

#[test]
fn cli_prints_preset_config_with_masked_token() {
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = Command::new(exe)
        .env("CONTRIBKIT_GITHUB_CONTRIBUTIONS_LOGIN", "octocat")
        .env("CONTRIBKIT_GITHUB_CONTRIBUTIONS_TOKEN", "ghp_secret")
        .args(["config", "--preset"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["renderer"], "circles");
    assert_eq!(value["width"], 1000);
    assert_eq!(value["githubContributions"]["login"], "octocat");
    assert_eq!(value["githubContributions"]["token"], "***");
}

#[test]
fn cli_loads_json_and_yaml_configs_alike() {
    let yaml = stdout_of(&[
        "config",
        fixture(&["config", "github-contributions.yaml"])
            .to_string_lossy()
            .as_ref(),
    ]);
    let json = stdout_of(&[
        "config",
        fixture(&["config", "github-contributions.json"])
            .to_string_lossy()
            .as_ref(),
    ]);
    assert_eq!(yaml, json);
}

#[test]
fn cli_rejects_invalid_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("bad.yaml");
    fs::write(&path, "width: 0\n").expect("write config");

    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = Command::new(exe)
        .args(["config", path.to_string_lossy().as_ref()])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("width must be greater than 0"), "{stderr}");
}

#[test]
fn cli_defaults_overflowing_attributes() {
    let svg = format!(
        r#"<svg width="{digits}" height="{digits}"></svg>"#,
        digits = "9".repeat(400)
    );
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = assert_cmd::Command::new(exe)
        .args(["dimensions", "-"])
        .write_stdin(svg)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(output).unwrap().trim(),
        r#"{"width":200,"height":100}"#
    );
}

#[test]
fn cli_wrap_inserts_input_verbatim() {
    let svg = "\n  <svg width=\"10\" height=\"10\"><rect/></svg>\n";
    let exe = assert_cmd::cargo_bin!("contribkit-svg");
    let output = assert_cmd::Command::new(exe)
        .args(["wrap", "--name", "Raw", "--url", "https://example.com", "-"])
        .write_stdin(svg)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();
    assert!(
        out.contains(&format!("fill=\"transparent\" />\n      {svg}\n    </svg>")),
        "{out}"
    );
}
