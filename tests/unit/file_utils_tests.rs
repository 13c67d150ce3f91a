/*!
 * Tests for file utility functions and document loading
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use translate_all::file_utils::{Document, FileManager};
use crate::common;

/// Test that generate_output_path follows the {stem}.{code}.{ext} layout
#[test]
fn test_generate_output_path_with_valid_inputs_should_create_correct_path() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/input/report.txt"),
        Path::new("/tmp/output"),
        "zh-TW",
        "txt",
    );
    assert_eq!(output_path, Path::new("/tmp/output/report.zh-TW.txt"));
}

/// Only the last extension is dropped from the stem
#[test]
fn test_document_output_path_should_keep_inner_dots_of_stem() {
    let document = Document::new("notes.v2.md", "text");
    assert_eq!(document.stem, "notes.v2");
    assert_eq!(document.output_path("out", "fr"), Path::new("out/notes.v2.fr.txt"));
}

#[test]
fn test_ensure_dir_with_nested_missing_dirs_should_create_them_and_be_idempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // Second call on an existing directory is not an error
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

#[test]
fn test_ensure_dir_with_file_in_the_way_should_fail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let blocker = common::create_test_file(temp_dir.path(), "out", "not a directory")?;

    assert!(FileManager::ensure_dir(&blocker).is_err());
    assert!(FileManager::ensure_dir(blocker.join("nested")).is_err());
    assert!(blocker.is_file());
    Ok(())
}

#[test]
fn test_write_to_file_should_overwrite_existing_content() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "input.fr.txt", "old content that is longer")?;

    FileManager::write_to_file(&path, "new")?;
    assert_eq!(fs::read_to_string(&path)?, "new");
    Ok(())
}

#[test]
fn test_document_load_should_read_utf8_text_and_stem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "input.txt", "Grüße\nこんにちは\n")?;

    let document = Document::load(&path)?;
    assert_eq!(document.stem, "input");
    assert_eq!(document.text, "Grüße\nこんにちは\n");
    Ok(())
}

#[test]
fn test_document_load_with_missing_file_should_fail() {
    assert!(Document::load("definitely_missing_input_12345.txt").is_err());
}
