// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn upload_writes_content_addressed_file() {
    let dir = TempDir::new().unwrap();
    let store = FsEvidenceStore::new(dir.path().join("evidence"));

    let url = store.upload("before.JPG", b"jpeg bytes").unwrap();

    assert!(url.starts_with("file://"));
    assert!(url.ends_with(".jpg"));
    let path = url.trim_start_matches("file://");
    assert_eq!(fs::read(path).unwrap(), b"jpeg bytes");
}

#[test]
fn same_content_same_url() {
    let dir = TempDir::new().unwrap();
    let store = FsEvidenceStore::new(dir.path());
    let first = store.upload("a.png", b"pixels").unwrap();
    let second = store.upload("b.png", b"pixels").unwrap();
    let other = store.upload("c.png", b"other pixels").unwrap();
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn empty_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsEvidenceStore::new(dir.path());
    assert!(matches!(
        store.upload("empty.jpg", b""),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn upload_file_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("receipt.pdf");
    fs::write(&source, b"%PDF-1.7").unwrap();
    let store = FsEvidenceStore::new(dir.path().join("store"));

    let url = store.upload_file(&source).unwrap();
    assert!(url.ends_with(".pdf"));
}

#[test]
fn upload_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let store = FsEvidenceStore::new(dir.path());
    assert!(matches!(
        store.upload_file(&dir.path().join("nope.jpg")),
        Err(Error::Io(_))
    ));
}

#[parameterized(
    plain = { "photo.jpg", Some("jpg") },
    upper = { "SCAN.PDF", Some("pdf") },
    none = { "README", None },
    odd = { "weird.j p g", None },
    dotfile_ext = { "archive.tar.gz", Some("gz") },
)]
fn extension_cases(name: &str, expected: Option<&str>) {
    assert_eq!(extension(name).as_deref(), expected);
}
