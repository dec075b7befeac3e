use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use modgraph_cli::{ModgraphOptions, run_main};
use modgraph_core::ErrorKind;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn write_jar(dir: &Path, file_name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, bytes) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(bytes).expect("write entry");
    }
    let bytes = writer.finish().expect("finish jar").into_inner();
    let path = dir.join(file_name);
    fs::write(&path, bytes).expect("write jar");
    path
}

fn options_for(dir: &Path) -> ModgraphOptions {
    ModgraphOptions {
        dir: dir.to_path_buf(),
        output: dir.join("mods.dot"),
    }
}

#[test]
fn end_to_end_dot_export() {
    let dir = tempdir().expect("tempdir");
    write_jar(
        dir.path(),
        "a_balm.jar",
        &[(
            "fabric.mod.json",
            br#"{"id": "balm", "name": "Balm"}"#.as_slice(),
        )],
    );
    write_jar(
        dir.path(),
        "b_waystones.jar",
        &[(
            "fabric.mod.json",
            br#"{"id": "waystones", "name": "Waystones", "depends": {"balm": "*", "missingcore": "*"}, "suggests": {"jei": "*"}}"#
                .as_slice(),
        )],
    );

    let opts = options_for(dir.path());
    let dot = run_main(&opts).expect("run");

    assert!(dot.starts_with("digraph mods {"), "bad header: {dot}");
    assert!(dot.contains(r#""balm" [label="Balm\n(balm)", fillcolor="white"];"#));
    assert!(dot.contains(r#""waystones" [label="Waystones\n(waystones)", fillcolor="white"];"#));
    assert!(dot.contains(r#""waystones" -> "balm";"#));
    assert!(dot.contains(r#""waystones" -> "missingcore" [color="red"];"#));
    assert!(dot.contains(r#""waystones" -> "jei" [style="dashed", color="yellow"];"#));
    assert!(dot.contains(
        r#""missingcore" [label="missingcore\n(MISSING REQUIRED)", fillcolor="red", fontcolor="white"];"#
    ));
    assert!(dot.contains(
        r#""jei" [label="jei\n(optional missing)", fillcolor="yellow", fontcolor="black"];"#
    ));

    // Installed nodes come out in file-name order.
    let balm_at = dot.find(r#""balm" ["#).expect("balm node");
    let waystones_at = dot.find(r#""waystones" ["#).expect("waystones node");
    assert!(balm_at < waystones_at, "node order wrong: {dot}");
}

#[test]
fn mixed_descriptor_formats_share_one_graph() {
    let dir = tempdir().expect("tempdir");
    write_jar(
        dir.path(),
        "fabric_mod.jar",
        &[(
            "fabric.mod.json",
            br#"{"id": "sodium", "name": "Sodium"}"#.as_slice(),
        )],
    );
    write_jar(
        dir.path(),
        "forge_mod.jar",
        &[(
            "META-INF/mods.toml",
            br#"
[[mods]]
modId = "jei"
displayName = "Just Enough Items"

[[dependencies.jei]]
modId = "sodium"
mandatory = true
"#
            .as_slice(),
        )],
    );

    let dot = run_main(&options_for(dir.path())).expect("run");

    // The Forge mod's dependency resolves against the Fabric mod's record.
    assert!(dot.contains(r#""jei" -> "sodium";"#));
    assert!(!dot.contains("MISSING"));
}

#[test]
fn bundled_dependency_is_not_reported_missing() {
    let dir = tempdir().expect("tempdir");
    let mut inner = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    inner.start_file("fabric.mod.json", options).expect("start entry");
    inner
        .write_all(br#"{"id": "shadowlib"}"#)
        .expect("write entry");
    let inner_bytes = inner.finish().expect("finish jar").into_inner();

    write_jar(
        dir.path(),
        "host.jar",
        &[
            (
                "fabric.mod.json",
                br#"{"id": "host", "name": "Host", "depends": {"shadowlib": "*"}}"#.as_slice(),
            ),
            ("META-INF/jars/shadowlib-1.0.jar", inner_bytes.as_slice()),
        ],
    );

    let dot = run_main(&options_for(dir.path())).expect("run");

    assert!(dot.contains(r#""host" -> "shadowlib";"#));
    assert!(dot.contains(r#""shadowlib" [label="shadowlib"];"#));
    assert!(!dot.contains("MISSING"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempdir().expect("tempdir");
    write_jar(
        dir.path(),
        "one.jar",
        &[(
            "fabric.mod.json",
            br#"{"id": "one", "depends": {"gone": "*", "two": "*"}}"#.as_slice(),
        )],
    );
    write_jar(
        dir.path(),
        "two.jar",
        &[("fabric.mod.json", br#"{"id": "two"}"#.as_slice())],
    );

    let opts = options_for(dir.path());
    let first = run_main(&opts).expect("first run");
    let second = run_main(&opts).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn missing_folder_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let opts = ModgraphOptions {
        dir: dir.path().join("no_such_folder"),
        output: dir.path().join("out.dot"),
    };

    let err = run_main(&opts).expect_err("missing folder should fail");
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn folder_of_unreadable_jars_still_produces_a_document() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("junk.jar"), b"not a zip at all").expect("write junk");

    let dot = run_main(&options_for(dir.path())).expect("run");
    assert!(dot.starts_with("digraph mods {"));
    assert!(dot.ends_with("}\n"));
}
