//! Shared on-disk fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const SAMPLE_TEXT: &[u8] = b"This is a very simple text file.\nJust to show that we can serve it up.\n";
pub const SAMPLE_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
pub const SAMPLE_JPG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00";

/// A temporary web root laid out as:
///
/// ```text
/// <outer>/secret.txt
/// <outer>/root/sample.txt
/// <outer>/root/images/sample_1.png
/// <outer>/root/images/JPEG_example.jpg
/// <outer>/root/images/diagram.unknownext
/// <outer>/root/README
/// ```
pub struct Fixture {
    outer: TempDir,
    root: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("root");

        fs::create_dir_all(root.join("images")).unwrap();
        fs::write(outer.path().join("secret.txt"), b"top secret").unwrap();
        fs::write(root.join("sample.txt"), SAMPLE_TEXT).unwrap();
        fs::write(root.join("images/sample_1.png"), SAMPLE_PNG).unwrap();
        fs::write(root.join("images/JPEG_example.jpg"), SAMPLE_JPG).unwrap();
        fs::write(root.join("images/diagram.unknownext"), b"???").unwrap();
        fs::write(root.join("README"), b"read me").unwrap();

        Self { outer, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn outer(&self) -> &Path {
        self.outer.path()
    }
}
