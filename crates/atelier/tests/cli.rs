//! End-to-end tests of the subcommands, driven through the parsed CLI.
//!
//! Serialized because clap reads `ATELIER_*` variables from the process
//! environment.

use std::fs;
use std::path::Path;

use atelier::Cli;
use clap::Parser;
use serial_test::serial;
use tempfile::TempDir;

/// Runs `atelier <args>` with an isolated preference file and returns stdout.
fn atelier(prefs: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["atelier", "--preferences", prefs.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    atelier::run(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    (dir, prefs)
}

#[test]
#[serial]
fn sitemap_reports_written_routes() {
    let (dir, prefs) = workspace();
    let source = dir.path().join("App.tsx");
    let out = dir.path().join("public/sitemap.xml");
    fs::write(
        &source,
        r#"<Route path="/" /><Route path="/tokens" /><Route path="/x/:id" />"#,
    )
    .unwrap();

    let stdout = atelier(
        &prefs,
        &[
            "sitemap",
            "--site",
            "https://example.com",
            "--source",
            source.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--lastmod",
            "2024-05-01",
        ],
    )
    .unwrap();

    assert_eq!(stdout, format!("Generated {} with 2 routes.\n", out.display()));
    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<loc>https://example.com/tokens</loc>"));
    assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
}

#[test]
#[serial]
fn sitemap_without_routes_fails() {
    let (dir, prefs) = workspace();
    let source = dir.path().join("App.tsx");
    fs::write(&source, "export default function App() {}").unwrap();
    let out = dir.path().join("sitemap.xml");

    let result = atelier(
        &prefs,
        &[
            "sitemap",
            "--source",
            source.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
    );
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
#[serial]
fn dtcg_converts_file_to_output() {
    let (dir, prefs) = workspace();
    let input = dir.path().join("tokens.json");
    let out = dir.path().join("dtcg/tokens.json");
    fs::write(
        &input,
        r##"{"color": {"primary": {"value": "#007bff", "type": "color"}}}"##,
    )
    .unwrap();

    let stdout = atelier(
        &prefs,
        &["dtcg", input.to_str().unwrap(), "--out", out.to_str().unwrap()],
    )
    .unwrap();
    assert!(stdout.is_empty());

    let converted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        converted,
        serde_json::json!({"color": {"primary": {"$value": "#007bff", "$type": "color"}}})
    );
}

#[test]
#[serial]
fn dtcg_rejects_invalid_json() {
    let (dir, prefs) = workspace();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    let err = atelier(&prefs, &["dtcg", input.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
#[serial]
fn export_prints_css_and_writes_js() {
    let (dir, prefs) = workspace();

    let css = atelier(&prefs, &["export"]).unwrap();
    assert!(css.starts_with(":root {\n  --background: 0 0% 100%;\n"));

    let out = dir.path().join("tokens.js");
    let stdout = atelier(
        &prefs,
        &["export", "--format", "js", "--out", out.to_str().unwrap()],
    )
    .unwrap();
    assert_eq!(
        stdout,
        format!("Wrote {} (application/javascript)\n", out.display())
    );
    let js = fs::read_to_string(&out).unwrap();
    assert!(js.starts_with("export const tokens = {\n"));
}

#[test]
#[serial]
fn tokens_reads_requested_mode() {
    let (_dir, prefs) = workspace();

    let dark = atelier(&prefs, &["tokens", "--mode", "dark", "primary", "nope"]).unwrap();
    assert_eq!(dark, "--nope: /* undefined */\n--primary: 217 91% 60%;\n");

    let light = atelier(&prefs, &["tokens", "--mode", "light", "--", "--primary"]).unwrap();
    assert_eq!(light, "--primary: 221 83% 53%;\n");
}

#[test]
#[serial]
fn tokens_json_output() {
    let (_dir, prefs) = workspace();
    let json = atelier(&prefs, &["tokens", "--json", "--mode", "light", "radius"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, serde_json::json!({"radius": "0.75rem"}));
}

#[test]
#[serial]
fn tokens_follow_persisted_theme() {
    let (_dir, prefs) = workspace();

    // No preference yet: dark.
    let value = atelier(&prefs, &["tokens", "primary"]).unwrap();
    assert_eq!(value, "--primary: 217 91% 60%;\n");

    atelier(&prefs, &["theme", "set", "light"]).unwrap();
    let value = atelier(&prefs, &["tokens", "primary"]).unwrap();
    assert_eq!(value, "--primary: 221 83% 53%;\n");
}

#[test]
#[serial]
fn color_resolves_to_hex() {
    let (_dir, prefs) = workspace();

    let stdout = atelier(
        &prefs,
        &["color", "--mode", "light", "hsl(var(--primary))", "not-a-color"],
    )
    .unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("hsl(var(--primary))\t"));
    assert!(lines[0].ends_with("\t#2463eb"));
    assert_eq!(lines[1], "not-a-color\tunresolved");
}

#[test]
#[serial]
fn color_wraps_triplets() {
    let (_dir, prefs) = workspace();
    let stdout = atelier(&prefs, &["color", "--triplet", "--mode", "dark", "221 83% 53%"]).unwrap();
    assert!(stdout.starts_with("hsl(221 83% 53%)\t"));
    assert!(stdout.ends_with("\t#2463eb\n"));
}

#[test]
#[serial]
fn theme_get_set_toggle_persist() {
    let (_dir, prefs) = workspace();

    assert_eq!(atelier(&prefs, &["theme"]).unwrap(), "dark\n");
    assert!(!prefs.exists());

    assert_eq!(atelier(&prefs, &["theme", "set", "light"]).unwrap(), "light\n");
    assert_eq!(atelier(&prefs, &["theme", "get"]).unwrap(), "light\n");
    assert_eq!(atelier(&prefs, &["theme", "toggle"]).unwrap(), "dark\n");
    assert_eq!(atelier(&prefs, &["theme", "get"]).unwrap(), "dark\n");

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&prefs).unwrap()).unwrap();
    assert_eq!(stored["atelier-theme"], "dark");
}

#[test]
#[serial]
fn stylesheet_from_environment() {
    let (dir, prefs) = workspace();
    let sheet = dir.path().join("brand.css");
    fs::write(&sheet, ":root { --primary: 0 100% 50%; }").unwrap();

    std::env::set_var("ATELIER_STYLESHEET", &sheet);
    let result = atelier(&prefs, &["tokens", "--mode", "light", "primary"]);
    std::env::remove_var("ATELIER_STYLESHEET");

    assert_eq!(result.unwrap(), "--primary: 0 100% 50%;\n");
}

#[test]
#[serial]
fn missing_stylesheet_is_an_error() {
    let (dir, prefs) = workspace();
    let missing = dir.path().join("missing.css");
    let err = atelier(
        &prefs,
        &["export", "--stylesheet", missing.to_str().unwrap()],
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("missing.css"));
}
