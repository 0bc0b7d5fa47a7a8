use modgen_core::generate::GenerateError;
use modgen_core::manifest::MergeOutcome;
use modgen_core::{Generator, Manifest, ModuleKind, ProjectLayout};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

// ── Helpers ─────────────────────────────────────────────────────────

fn generator(root: &Path) -> Generator {
    Generator::new(root, ProjectLayout::default(), "0.1.0")
}

/// Every file under `root` with its contents
fn snapshot(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════
// create-server
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_server_writes_module_and_routes() {
    let tmp = TempDir::new().unwrap();
    let outcome = generator(tmp.path())
        .create_server("bands/linkinpark/song")
        .await
        .unwrap();

    assert_eq!(outcome.entry.route, "/api/bands/linkinpark/songs");
    assert_eq!(outcome.written.len(), 7);

    let files = snapshot(tmp.path());
    for path in [
        "lib/modules/bands/linkinpark/song/types.ts",
        "lib/modules/bands/linkinpark/song/data.ts",
        "lib/modules/bands/linkinpark/song/service.ts",
        "lib/modules/bands/linkinpark/song/spec.md",
        "routes/api/bands/linkinpark/songs/index.ts",
        "routes/api/bands/linkinpark/songs/[id]/index.ts",
        "lib/response.ts",
        "module.json",
        "module.log",
    ] {
        assert!(files.contains_key(path), "missing {}", path);
    }

    let types = &files["lib/modules/bands/linkinpark/song/types.ts"];
    assert!(types.contains("export interface Song {"));
    assert!(!types.contains("{{"));
}

#[tokio::test]
async fn create_server_twice_fails_without_changes() {
    let tmp = TempDir::new().unwrap();
    let gen = generator(tmp.path());

    gen.create_server("bands/linkinpark/song").await.unwrap();
    let before = snapshot(tmp.path());

    let err = gen.create_server("bands/linkinpark/song").await.unwrap_err();
    assert!(matches!(err, GenerateError::ModuleExists(_)));
    assert!(err.is_conflict());

    assert_eq!(snapshot(tmp.path()), before);
}

#[tokio::test]
async fn response_helper_is_shared() {
    let tmp = TempDir::new().unwrap();
    let gen = generator(tmp.path());

    let first = gen.create_server("song").await.unwrap();
    assert!(first.written.iter().any(|p| p.ends_with("response.ts")));

    let second = gen.create_server("album").await.unwrap();
    assert_eq!(second.skipped.len(), 1);
    assert!(second.skipped[0].ends_with("response.ts"));
    assert_eq!(second.written.len(), 6);
}

// ════════════════════════════════════════════════════════════════════
// create
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn create_writes_page_module() {
    let tmp = TempDir::new().unwrap();
    let outcome = generator(tmp.path())
        .create_frontend("User Profile", None)
        .await
        .unwrap();

    assert_eq!(outcome.entry.kind, ModuleKind::Frontend);
    assert_eq!(outcome.entry.route, "/user-profile");

    let files = snapshot(tmp.path());
    assert!(files.contains_key("routes/user-profile/index.tsx"));
    assert!(files.contains_key("lib/modules/user-profile/counter.ts"));
    // Page modules never create the API response helper
    assert!(!files.contains_key("lib/response.ts"));
}

#[tokio::test]
async fn create_conflicting_route_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("routes/profile")).unwrap();
    fs::write(tmp.path().join("routes/profile/index.tsx"), "existing").unwrap();
    let before = snapshot(tmp.path());

    let err = generator(tmp.path())
        .create_frontend("profile", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::PathOccupied(_)));
    assert_eq!(snapshot(tmp.path()), before);
}

// ════════════════════════════════════════════════════════════════════
// Manifest & log
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn manifest_records_both_kinds() {
    let tmp = TempDir::new().unwrap();
    let gen = generator(tmp.path());

    gen.create_frontend("profile", Some("me")).await.unwrap();
    let outcome = gen.create_server("bands/song").await.unwrap();
    assert_eq!(outcome.manifest, MergeOutcome::Added);

    let manifest = Manifest::load(&tmp.path().join("module.json"))
        .await
        .unwrap()
        .into_manifest();
    assert_eq!(manifest.generator_version.as_deref(), Some("0.1.0"));
    assert_eq!(manifest.modules.len(), 2);
    assert_eq!(manifest.modules[0].route, "/me");
    assert_eq!(manifest.modules[1].kind, ModuleKind::Backend);
    assert_eq!(manifest.modules[1].name, "bands/song");

    let log = fs::read_to_string(tmp.path().join("module.log")).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.lines().all(|l| l.starts_with('[')));
    assert!(log.contains("backend module 'bands/song'"));
}

#[tokio::test]
async fn regenerated_frontend_replaces_manifest_entry() {
    let tmp = TempDir::new().unwrap();
    let gen = generator(tmp.path());

    gen.create_frontend("profile", None).await.unwrap();
    fs::remove_dir_all(tmp.path().join("lib/modules/profile")).unwrap();
    fs::remove_dir_all(tmp.path().join("routes/profile")).unwrap();

    let outcome = gen.create_frontend("profile", Some("account")).await.unwrap();
    assert_eq!(outcome.manifest, MergeOutcome::Replaced);

    let modules = gen.recorded_modules().await.unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].route, "/account");
}

#[tokio::test]
async fn corrupt_manifest_aborts_before_writing() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("module.json"), "{ broken").unwrap();
    let before = snapshot(tmp.path());

    let err = generator(tmp.path()).create_server("song").await.unwrap_err();
    assert!(matches!(err, GenerateError::Manifest(_)));
    assert_eq!(snapshot(tmp.path()), before);
}

#[tokio::test]
async fn log_failure_reports_files_as_written() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("module.log")).unwrap();

    let err = generator(tmp.path()).create_server("song").await.unwrap_err();
    assert!(matches!(err, GenerateError::Log { .. }));
    assert!(err.wrote_files());
    assert!(!err.is_conflict());
    assert!(tmp.path().join("lib/modules/song/types.ts").exists());
}

#[tokio::test]
async fn load_errors_report_nothing_written() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("module.json"), "[1, 2").unwrap();

    let err = generator(tmp.path()).create_server("song").await.unwrap_err();
    assert!(!err.wrote_files());

    let err = generator(tmp.path()).create_server("//").await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidName { .. }));
    assert!(!err.wrote_files());
}

#[tokio::test]
async fn legacy_manifest_is_upgraded_on_write() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("module.json"),
        r#"{ "modules": ["old/thing", { "name": "home", "route": "/home" }] }"#,
    )
    .unwrap();

    generator(tmp.path()).create_server("song").await.unwrap();

    let written = fs::read_to_string(tmp.path().join("module.json")).unwrap();
    let manifest = Manifest::parse(&written).unwrap();
    assert_eq!(manifest.modules.len(), 3);
    assert_eq!(manifest.modules[0].kind, ModuleKind::Backend);
    assert_eq!(manifest.modules[0].route, "/api/old/things");
    assert_eq!(manifest.modules[1].kind, ModuleKind::Frontend);
    assert!(written.contains("\"kind\": \"frontend\""));
}

#[tokio::test]
async fn newer_manifest_version_warns() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("module.json"),
        r#"{ "generatorVersion": "9.0.0", "modules": [] }"#,
    )
    .unwrap();

    let outcome = generator(tmp.path()).create_server("song").await.unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("9.0.0"));
}

#[tokio::test]
async fn custom_layout_is_respected() {
    let tmp = TempDir::new().unwrap();
    let layout = ProjectLayout {
        modules_dir: "src/features".to_string(),
        api_dir: "routes/v1".to_string(),
        manifest_file: "modules.json".to_string(),
        ..ProjectLayout::default()
    };

    let outcome = Generator::new(tmp.path(), layout, "0.1.0")
        .create_server("song")
        .await
        .unwrap();

    assert_eq!(outcome.entry.route, "/v1/songs");
    assert!(tmp.path().join("src/features/song/service.ts").exists());
    assert!(tmp.path().join("routes/v1/songs/[id]/index.ts").exists());
    assert!(tmp.path().join("modules.json").exists());
}
