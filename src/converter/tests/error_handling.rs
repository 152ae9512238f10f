//! Failure handling tests

use super::{create_workspace, write_catalog, write_input};
use crate::catalog::ComponentCatalog;
use crate::converter::FileConverter;
use crate::error::PnpError;
use crate::resolver::DecliningResolver;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_input_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    let converter = FileConverter::new(config.clone()).unwrap();

    let missing = config.input_path().join("nope.csv");
    let result = converter.convert_file(&missing, &mut DecliningResolver);

    match result {
        Err(PnpError::InputNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected InputNotFound, got {:?}", other),
    }
    assert!(!config.output_path().join("nope.csv").exists());
}

#[test]
fn test_uncreatable_output_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    let input = write_input(&config, "board.csv", "U1;1;1;0;x\n");

    // Output path names an existing directory
    let output = temp_dir.path().join("occupied");
    fs::create_dir_all(&output).unwrap();

    let converter = FileConverter::new(config.clone()).unwrap();
    let (mut catalog, _) = ComponentCatalog::load(&config).unwrap();
    let result = converter.convert(&input, &output, &mut catalog, &mut DecliningResolver);

    assert!(matches!(result, Err(PnpError::Io { .. })));
}

#[test]
fn test_missing_catalog_dir_converts_with_empty_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    fs::remove_dir_all(config.catalog_path()).unwrap();
    let input = write_input(&config, "board.csv", "U1;1;1;0;Anything\n");

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.designators_declined, 1);
    assert_eq!(stats.lines_out, 1);
}

#[test]
fn test_malformed_catalog_rows_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Parts.csv", &["only-one-field", ";;", "good;GOOD;0"]);
    let input = write_input(&config, "board.csv", "U1;1;1;0;good\n");

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.designators_replaced, 1);
}

#[test]
fn test_invalid_utf8_is_replaced_not_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    let input = config.input_path().join("latin1.csv");
    fs::write(&input, b"U1;\xff;1;0\n").unwrap();

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.lines_out, 1);
    let content = fs::read_to_string(&stats.output_path).unwrap();
    assert!(content.starts_with("U1;"));
}
