// tests/analysis_properties.rs - End-to-end properties of the public API
use uxscan_core::config::{Focus, WcagLevel};
use uxscan_core::contrast::{compute_contrast, contrast_ratio, Color, TextSize};
use uxscan_core::reporting::to_json;
use uxscan_core::{analyze, AnalysisContext, AnalysisError, Report, Severity};

const DASHBOARD: &str = r#"import React, { useState } from 'react';
import moment from 'moment';

export function Dashboard({ users }) {
  const [open, setOpen] = useState(false);
  const { data } = useQuery(['stats'], fetchStats);
  return (
    <div style={{ background: '#ffffff' }}>
      <img src="/logo.png" />
      <p style={{ color: '#aaaaaa' }}>Updated {moment().fromNow()}</p>
      <div className="card" onClick={() => setOpen(!open)}>Details</div>
      <button onClick={refresh}><RefreshIcon /></button>
      <ul>
        {users.map((u, i) => <li key={i} onClick={() => select(u.id)}>{u.name}</li>)}
      </ul>
      <input type="text" placeholder="Search" />
    </div>
  );
}
"#;

fn run(src: &str, ctx: &AnalysisContext) -> Report {
    analyze(src, ctx).unwrap_or_else(|e| panic!("analysis failed: {e}"))
}

fn ids(report: &Report) -> Vec<&str> {
    report.findings.iter().map(|f| f.rule_id.as_str()).collect()
}

#[test]
fn test_contrast_is_symmetric_and_bounded() {
    let pairs = [("#000", "#fff"), ("#767676", "white"), ("navy", "#ffcc00"), ("#123456", "#123456")];
    for (a, b) in pairs {
        let (a, b) = (Color::parse(a).unwrap(), Color::parse(b).unwrap());
        let ab = contrast_ratio(a, b);
        assert!((ab - contrast_ratio(b, a)).abs() < 1e-12);
        assert!((1.0..=21.0).contains(&ab));
    }
    let black = Color::parse("black").unwrap();
    let white = Color::parse("#FFFFFF").unwrap();
    assert!((contrast_ratio(black, white) - 21.0).abs() < 0.01);
    assert!((contrast_ratio(white, white) - 1.0).abs() < 1e-12);
}

#[test]
fn test_aaa_pass_implies_aa_pass() {
    for fg in ["#000", "#333", "#595959", "#767676", "#949494", "#aaa", "red", "teal"] {
        let r = compute_contrast(Color::parse(fg).unwrap(), Color::parse("#fff").unwrap());
        for size in [TextSize::Normal, TextSize::Large] {
            if r.passes(size, WcagLevel::AAA) {
                assert!(r.passes(size, WcagLevel::AA), "{fg} {size}");
            }
        }
    }
}

#[test]
fn test_reports_are_byte_identical_across_runs() {
    let ctx = AnalysisContext::default();
    let a = to_json(&run(DASHBOARD, &ctx)).unwrap();
    let b = to_json(&run(DASHBOARD, &ctx)).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("\"a11y.image-without-alt\""));
}

#[test]
fn test_dashboard_covers_every_category() {
    let report = run(DASHBOARD, &AnalysisContext::default());
    let found = ids(&report);
    for id in [
        "a11y.image-without-alt",
        "a11y.insufficient-contrast",
        "a11y.click-without-keyboard-pair",
        "a11y.icon-button-missing-label",
        "a11y.input-without-label",
        "perf.list-without-key",
        "perf.inline-handler-in-list",
        "perf.heavy-static-import",
        "ux.missing-state-coverage",
    ] {
        assert!(found.contains(&id), "missing {id} in {found:?}");
    }
    assert!(report.has_blocking());
    assert_eq!(report.summary.total_findings, report.findings.len());
    assert!(report.coverage.elements_scanned > 0);
    assert!(report.coverage.elements_scanned <= 10);

    let severities: Vec<Severity> = report.findings.iter().map(|f| f.severity).collect();
    let mut sorted = severities.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(severities, sorted);
}

#[test]
fn test_alt_text_removes_exactly_one_finding() {
    let ctx = AnalysisContext::default();
    let without = run(r#"const a = <figure><img src="a.png" /><figcaption>Chart</figcaption></figure>;"#, &ctx);
    let with = run(r#"const a = <figure><img src="a.png" alt="Sales chart" /><figcaption>Chart</figcaption></figure>;"#, &ctx);

    let img: Vec<_> = without.findings.iter().filter(|f| f.rule_id == "a11y.image-without-alt").collect();
    assert_eq!(img.len(), 1);
    assert_eq!(img[0].severity, Severity::High);
    assert_eq!(with.findings.len(), without.findings.len() - 1);
    assert!(!ids(&with).contains(&"a11y.image-without-alt"));
}

#[test]
fn test_button_replaces_clickable_div() {
    let ctx = AnalysisContext::default();
    let div = run("const a = <div onClick={open}>Open</div>;", &ctx);
    let button = run("const a = <button type=\"button\" onClick={open}>Open</button>;", &ctx);
    assert!(ids(&div).contains(&"a11y.click-without-keyboard-pair"));
    assert!(!ids(&button).contains(&"a11y.click-without-keyboard-pair"));
}

#[test]
fn test_focus_runs_only_its_category() {
    let a11y_only = r#"const a = <div onClick={open}><img src="x.png" /><button><svg /></button></div>;"#;
    let ctx = AnalysisContext::default().with_focus(Focus::Performance);
    assert!(run(a11y_only, &ctx).findings.is_empty());

    let ctx = AnalysisContext::default().with_focus(Focus::Accessibility);
    let report = run(DASHBOARD, &ctx);
    assert!(report.findings.iter().all(|f| f.rule_id.starts_with("a11y.")));
}

#[test]
fn test_malformed_source_is_rejected() {
    for src in ["const a = <div><p>text</div>;", "function f() { return <b>x</b>;", "const a = <a href=\"x>y</a>;"] {
        let err = analyze(src, &AnalysisContext::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)), "{src}");
    }
}

#[test]
fn test_breakpoint_defaults_pass_and_single_desktop_fails() {
    let src = "const a = <main>Hello</main>;";
    let default = run(src, &AnalysisContext::default());
    assert!(!ids(&default).contains(&"responsive.breakpoint-coverage"));

    let desktop = run(src, &AnalysisContext::default().with_breakpoints(vec![1024]));
    let hit: Vec<_> = desktop
        .findings
        .iter()
        .filter(|f| f.rule_id == "responsive.breakpoint-coverage")
        .collect();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].severity, Severity::Medium);
}

#[test]
fn test_aaa_enables_target_size_and_stricter_contrast() {
    let src = "const a = <p style={{ color: '#767676', background: '#fff' }}>Body</p>;";
    let aa = run(src, &AnalysisContext::default());
    let aaa = run(src, &AnalysisContext::default().with_wcag_level(WcagLevel::AAA));
    assert!(!ids(&aa).contains(&"a11y.insufficient-contrast"));
    assert!(ids(&aaa).contains(&"a11y.insufficient-contrast"));
    assert!(aaa.coverage.rules_applied > aa.coverage.rules_applied);
}
