use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use swimlane_cli::{
    Args, DIAGRAM_FILE, ENTITIES_FILE, FLOW_FILE, HEATMAP_FILE, RESULT_FILE, run,
};

/// Collects all files with the given extension from a directory
fn collect_files(dir: PathBuf, extension: &str) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension)
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output_dir: &Path, rules: bool) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        rules,
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_token_files() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let token_files = collect_files(demos_path(), "tsv");

    assert!(!token_files.is_empty(), "No token files found in demos/");

    let mut failed = Vec::new();

    for path in &token_files {
        let output_dir = temp_dir
            .path()
            .join(path.file_stem().unwrap().to_string_lossy().to_string());

        match run(&args(path, &output_dir, false)) {
            Ok(model) => {
                assert!(output_dir.join(DIAGRAM_FILE).is_file());
                assert!(output_dir.join(RESULT_FILE).is_file());
                assert_eq!(
                    output_dir.join(HEATMAP_FILE).is_file(),
                    model.heatmap().is_some()
                );
                assert_eq!(output_dir.join(FLOW_FILE).is_file(), model.flow().is_some());
                assert_eq!(
                    output_dir.join(ENTITIES_FILE).is_file(),
                    model.entity_view().is_some()
                );
            }
            Err(e) => failed.push((path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nToken files that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} token file(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} token files passed", token_files.len());
}

#[test]
fn e2e_smoke_test_plain_text_with_rules() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let text_files = collect_files(demos_path(), "txt");

    assert!(!text_files.is_empty(), "No text files found in demos/");

    for path in &text_files {
        let output_dir = temp_dir
            .path()
            .join(path.file_stem().unwrap().to_string_lossy().to_string());

        let model = run(&args(path, &output_dir, true))
            .unwrap_or_else(|e| panic!("{} failed: {e}", path.display()));

        assert!(!model.actors().is_empty(), "{} has no actors", path.display());
        let diagram = fs::read_to_string(output_dir.join(DIAGRAM_FILE)).unwrap();
        assert_eq!(diagram, model.diagram());
    }
}

#[test]
fn e2e_refund_outputs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("refund.tsv");

    let model = run(&args(&input, temp_dir.path(), false)).expect("refund.tsv should run");

    assert_eq!(
        model.actors(),
        ["customer", "finance department", "support agent", "system"]
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join(RESULT_FILE)).unwrap())
            .unwrap();
    assert_eq!(json["render_url"], model.render_url());
    assert_eq!(json["actors"].as_array().unwrap().len(), 4);
    assert_eq!(json["tokens"].as_array().unwrap().len(), model.tokens().len());
    assert_eq!(json["entities"][0]["text"], "The");
    assert!(json["entities"][0]["class"].is_null());
    assert_eq!(json["entities"][1]["text"], "customer");
    assert_eq!(json["entities"][1]["class"], "ACTOR");

    let entities = fs::read_to_string(temp_dir.path().join(ENTITIES_FILE)).unwrap();
    assert!(entities.contains("customer"));

    let heatmap = fs::read_to_string(temp_dir.path().join(HEATMAP_FILE)).unwrap();
    assert!(heatmap.starts_with("<svg"));
}

#[test]
fn e2e_smoke_test_error_token_files() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_files = collect_files(demos_path().join("errors"), "tsv");

    assert!(
        !error_files.is_empty(),
        "No error token files found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for path in &error_files {
        let output_dir = temp_dir.path().join(format!(
            "error_{}",
            path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(path, &output_dir, false)).is_ok() {
            unexpectedly_succeeded.push(path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError token files that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error token file(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error token files failed as expected",
        error_files.len()
    );
}
