use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn mods_dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

#[allow(dead_code)]
pub fn jar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, bytes) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(bytes).expect("write entry");
    }
    writer.finish().expect("finish jar").into_inner()
}

#[allow(dead_code)]
pub fn write_jar(dir: &Path, file_name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, jar_bytes(entries)).expect("write jar");
    path
}

#[allow(dead_code)]
pub fn fabric_jar(dir: &Path, file_name: &str, descriptor: &str) -> PathBuf {
    write_jar(dir, file_name, &[("fabric.mod.json", descriptor.as_bytes())])
}

#[allow(dead_code)]
pub fn forge_jar(dir: &Path, file_name: &str, descriptor: &str) -> PathBuf {
    write_jar(
        dir,
        file_name,
        &[("META-INF/mods.toml", descriptor.as_bytes())],
    )
}

#[allow(dead_code)]
pub fn mcmod_jar(dir: &Path, file_name: &str, descriptor: &str) -> PathBuf {
    write_jar(dir, file_name, &[("mcmod.info", descriptor.as_bytes())])
}
