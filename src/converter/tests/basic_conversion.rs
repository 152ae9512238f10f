//! Basic conversion tests

use super::{create_workspace, read_lines, write_catalog, write_input};
use crate::catalog::ComponentCatalog;
use crate::converter::FileConverter;
use crate::resolver::DecliningResolver;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_plain_file_keeps_row_count() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Parts.csv", &["u_qfn;;0"]);
    let input = write_input(
        &config,
        "board.csv",
        "Designator;X;Y;Rotation;Footprint\nU1;10;20;90;U_QFN\nU2;11;21;0;u_qfn\n",
    );

    let converter = FileConverter::new(config.clone()).unwrap();
    let mut resolver = DecliningResolver;
    let stats = converter.convert_file(&input, &mut resolver).unwrap();

    assert_eq!(stats.lines_in, 3);
    assert_eq!(stats.lines_out, 3);
    assert_eq!(stats.output_path, config.output_path().join("board.csv"));

    let lines = read_lines(&stats.output_path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "U1;10;20;90;U_QFN");
}

#[test]
fn test_rotation_and_replacement() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Passives.csv", &["smd0603;C0603;0", "smd0805;R0805;0"]);
    let input = write_input(
        &config,
        "board.csv",
        "C1;1,5;2,5;180;SMD0603\nR1;3;4;270;smd0805\nU1;5;6;180;SMD0603\n",
    );

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.designators_replaced, 3);
    assert_eq!(
        read_lines(&stats.output_path),
        vec![
            "C1;1.5;2.5;0;C0603",
            "R1;3;4;90;R0805",
            "U1;5;6;180;C0603",
        ]
    );
}

#[test]
fn test_deleted_rows_are_omitted() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Mechanical.csv", &["fiducial;;1"]);
    let input = write_input(
        &config,
        "board.csv",
        "FID1;1;1;0;Fiducial;anything;else\nC1;2;2;0;0402-X5R-16V-10%\nFID2;3;3;0;FIDUCIAL\n",
    );

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.lines_in, 3);
    assert_eq!(stats.lines_out, 1);
    assert_eq!(stats.rows_dropped, 2);
    assert_eq!(read_lines(&stats.output_path), vec!["C1;2;2;0;0402-16V-10%"]);
}

#[test]
fn test_bom_and_carriage_returns_stripped() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Parts.csv", &["x;;0"]);
    let input = config.input_path().join("bom.csv");
    fs::write(&input, b"\xEF\xBB\xBFC1;0;0;0;x\r\nC2;0;0;0;x\r\n").unwrap();

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    let content = fs::read(&stats.output_path).unwrap();
    assert_eq!(content, b"C1;0;0;0;x\nC2;0;0;0;x\n");
}

#[test]
fn test_bom_only_stripped_at_start_of_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Parts.csv", &["x;;0"]);
    let input = config.input_path().join("bom.csv");
    fs::write(
        &input,
        b"\xEF\xBB\xBFC1;0;0;180;x\n\xEF\xBB\xBFC2;0;0;180;x\n",
    )
    .unwrap();

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    // A mid-file mark stays part of the first field, so C2 is not seen as a
    // capacitor; the final cell pass then drops the leading mark
    assert_eq!(
        read_lines(&stats.output_path),
        vec!["C1;0;0;0;x", "C2;0;0;180;x"]
    );
}

#[test]
fn test_every_field_normalized_on_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    write_catalog(&config, "Parts.csv", &["x;;0"]);
    let input = write_input(
        &config,
        "board.csv",
        "  C1 ;(mm) 1,25;Ток;-45;x;0603 - NP0 - 50V\n",
    );

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    // Cyrillic Т, о, к become Latin
    assert_eq!(
        read_lines(&stats.output_path),
        vec!["C1;1.25;Tok;45;x;0603-N50V"]
    );
}

#[test]
fn test_output_fields_are_quoted_when_needed() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    let catalog_file = write_catalog(&config, "Parts.csv", &[]);
    let input = write_input(&config, "board.csv", "U1;1;2;0;odd\n");

    let converter = FileConverter::new(config.clone()).unwrap();
    let (mut catalog, _) = ComponentCatalog::load(&config).unwrap();
    catalog
        .append(&catalog_file, "odd", "Say \"hi\"", false)
        .unwrap();

    let output = temp_dir.path().join("out").join("board.csv");
    let stats = converter
        .convert(&input, &output, &mut catalog, &mut DecliningResolver)
        .unwrap();

    assert_eq!(stats.lines_out, 1);
    assert_eq!(read_lines(&output), vec!["U1;1;2;0;\"Say \"\"hi\"\"\""]);
}

#[test]
fn test_empty_lines_are_kept() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_workspace(&temp_dir);
    let input = write_input(&config, "board.csv", "a;b\n\nc;d");

    let converter = FileConverter::new(config).unwrap();
    let stats = converter.convert_file(&input, &mut DecliningResolver).unwrap();

    assert_eq!(stats.lines_in, 3);
    assert_eq!(stats.lines_out, 3);
    assert_eq!(fs::read_to_string(&stats.output_path).unwrap(), "a;b\n\nc;d\n");
}
