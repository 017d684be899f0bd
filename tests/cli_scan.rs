// tests/cli_scan.rs - Binary output and exit codes
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn uxscan(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_uxscan"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let d = tempfile::tempdir().unwrap();
    for (rel, body) in files {
        let path = d.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
    d
}

fn json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn test_scan_json_reports_blocking_findings_with_exit_6() {
    let d = project(&[
        ("src/Hero.tsx", r#"export const Hero = () => <img src="hero.png" />;"#),
        ("node_modules/pkg/Bad.tsx", "const broken = <div>;"),
    ]);
    let out = uxscan(d.path(), &["scan", "--json"]);
    assert_eq!(out.status.code(), Some(6));

    let v = json(&out);
    assert_eq!(v["blocking"], serde_json::Value::Bool(true));
    let files = v["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    let findings = files[0]["report"]["findings"].as_array().unwrap();
    assert_eq!(findings[0]["rule_id"], "a11y.image-without-alt");
    assert_eq!(findings[0]["severity"], "high");
}

#[test]
fn test_scan_clean_file_exits_0_and_json_is_stable() {
    let d = project(&[("App.tsx", "export const App = () => <main><h1>Hello</h1></main>;")]);
    let first = uxscan(d.path(), &["scan", "--json"]);
    let second = uxscan(d.path(), &["scan", "--json"]);
    assert_eq!(first.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(json(&first)["total_findings"], 0);
}

#[test]
fn test_scan_parse_error_exits_2() {
    let d = project(&[("Broken.jsx", "const a = <div><span></div>;")]);
    let out = uxscan(d.path(), &["scan", "--json"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(json(&out)["files"][0]["error"].as_str().unwrap().contains("parse error"));
}

#[test]
fn test_config_file_and_flags_shape_the_run() {
    let d = project(&[
        ("uxscan.toml", "[rules]\ndisabled = [\"a11y.image-without-alt\"]\n"),
        ("Hero.tsx", r#"export const Hero = () => <img src="hero.png" />;"#),
    ]);
    let out = uxscan(d.path(), &["scan", "--json"]);
    assert_eq!(out.status.code(), Some(0));

    let out = uxscan(d.path(), &["scan", "--json", "--breakpoints", "1024"]);
    let v = json(&out);
    let findings = v["files"][0]["report"]["findings"].as_array().unwrap();
    assert!(findings.iter().any(|f| f["rule_id"] == "responsive.breakpoint-coverage"));
}

#[test]
fn test_contrast_command() {
    let d = tempfile::tempdir().unwrap();
    assert_eq!(uxscan(d.path(), &["contrast", "#000", "#fff"]).status.code(), Some(0));
    assert_eq!(uxscan(d.path(), &["contrast", "#949494", "#fff"]).status.code(), Some(6));
    assert_eq!(uxscan(d.path(), &["contrast", "#949494", "#fff", "--large"]).status.code(), Some(0));
    assert_eq!(uxscan(d.path(), &["contrast", "#zzz", "#fff"]).status.code(), Some(2));

    let v = json(&uxscan(d.path(), &["contrast", "black", "white", "--json"]));
    assert!((v["ratio"].as_f64().unwrap() - 21.0).abs() < 0.01);
    assert_eq!(v["passes"], serde_json::Value::Bool(true));
}

#[test]
fn test_rules_and_guidelines_listings() {
    let d = tempfile::tempdir().unwrap();
    let rules = json(&uxscan(d.path(), &["rules", "--json"]));
    let rules = rules.as_array().unwrap();
    assert_eq!(rules.len(), 21);
    assert_eq!(rules[0]["id"], "a11y.icon-button-missing-label");

    let guidelines = json(&uxscan(d.path(), &["guidelines", "--json"]));
    assert!(guidelines
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["criterion"] == "1.4.3"));
}

#[test]
fn test_init_writes_a_loadable_config() {
    let d = tempfile::tempdir().unwrap();
    assert_eq!(uxscan(d.path(), &["init"]).status.code(), Some(0));
    assert!(d.path().join("uxscan.toml").exists());
    assert_eq!(uxscan(d.path(), &["init"]).status.code(), Some(1));

    let cfg = uxscan_core::config::Config::load_from(&d.path().join("uxscan.toml")).unwrap();
    assert_eq!(cfg.context, uxscan_core::AnalysisContext::default());
}
