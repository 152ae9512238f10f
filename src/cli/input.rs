//! User input utilities for interactive CLI prompts
//!
//! Prompts read from any `BufRead` and write to any `Write`, so the same
//! code serves the terminal and scripted tests. A closed input stream is
//! reported as `None` rather than as an error.

use crate::resolver::{CatalogAddition, DesignatorResolver, Resolution, display_name};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Print `question` and read one trimmed answer; `None` at end of input
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Get user confirmation for an action
pub fn prompt_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> io::Result<Option<bool>> {
    let default_text = if default_yes { "Y/n" } else { "y/N" };
    loop {
        let Some(answer) = ask(input, output, &format!("{} [{}]: ", message, default_text))? else {
            return Ok(None);
        };

        match answer.to_lowercase().as_str() {
            "" => return Ok(Some(default_yes)),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(output, "Please enter 'y' for yes or 'n' for no.")?,
        }
    }
}

/// Numbered choice among `items`; `None` when the operator enters nothing
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    heading: &str,
    items: &[String],
) -> io::Result<Option<usize>> {
    writeln!(output, "{}", heading)?;
    for (i, item) in items.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, item)?;
    }

    loop {
        let question = format!("Select 1-{} (empty to cancel): ", items.len());
        let Some(answer) = ask(input, output, &question)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(choice) if (1..=items.len()).contains(&choice) => return Ok(Some(choice - 1)),
            _ => writeln!(
                output,
                "Invalid selection '{}'. Please choose 1-{}.",
                answer,
                items.len()
            )?,
        }
    }
}

/// Choose which input files to convert
///
/// The last menu entry converts everything and is the default. Several
/// numbers may be given separated by commas.
pub fn prompt_input_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    available: &[PathBuf],
) -> io::Result<Vec<PathBuf>> {
    if available.is_empty() {
        return Ok(Vec::new());
    }

    writeln!(output, "\nFiles available for conversion:")?;
    for (i, path) in available.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, display_name(path))?;
    }
    let all_choice = available.len() + 1;
    writeln!(output, "  {}. all (default)", all_choice)?;
    writeln!(output)?;

    loop {
        let question = format!("Select files to convert [{}]: ", all_choice);
        let Some(answer) = ask(input, output, &question)? else {
            return Ok(Vec::new());
        };

        if answer.is_empty() || answer == "all" || answer == all_choice.to_string() {
            return Ok(available.to_vec());
        }

        match parse_selection(&answer, available.len()) {
            Some(indices) => return Ok(indices.into_iter().map(|i| available[i].clone()).collect()),
            None => writeln!(
                output,
                "Invalid input '{}'. Please enter numbers 1-{} separated by commas, or 'all'.",
                answer,
                available.len()
            )?,
        }
    }
}

/// Parse comma-separated 1-based choices into indices
fn parse_selection(answer: &str, len: usize) -> Option<Vec<usize>> {
    let mut selected = Vec::new();
    for part in answer.split(',') {
        let choice = part.trim().parse::<usize>().ok()?;
        if !(1..=len).contains(&choice) {
            return None;
        }
        if !selected.contains(&(choice - 1)) {
            selected.push(choice - 1);
        }
    }
    (!selected.is_empty()).then_some(selected)
}

/// Asks the operator about unknown designators
///
/// Takes ownership of its reader; any earlier prompt must have read from
/// the same reader so no buffered answers are lost.
pub struct TerminalResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask_addition(
        &mut self,
        designator: &str,
        catalog_files: &[PathBuf],
    ) -> io::Result<Option<CatalogAddition>> {
        let (input, output) = (&mut self.input, &mut self.output);

        writeln!(output, "\nUnknown designator: '{}'", designator)?;
        if prompt_confirmation(input, output, "Add it to the catalog?", false)? != Some(true) {
            return Ok(None);
        }

        if catalog_files.is_empty() {
            writeln!(output, "No catalog files available; run 'init' first.")?;
            return Ok(None);
        }

        let names: Vec<String> = catalog_files.iter().map(|p| display_name(p)).collect();
        let Some(index) = prompt_choice(input, output, "Catalog files:", &names)? else {
            return Ok(None);
        };

        let question = format!("Standard name [{}]: ", designator);
        let Some(standard_name) = ask(input, output, &question)? else {
            return Ok(None);
        };
        let standard_name = if standard_name.is_empty() {
            designator.to_string()
        } else {
            standard_name
        };

        let Some(delete) =
            prompt_confirmation(input, output, "Delete rows with this designator?", false)?
        else {
            return Ok(None);
        };

        Ok(Some(CatalogAddition {
            target_file: catalog_files[index].clone(),
            non_standard: designator.to_string(),
            standard_name,
            delete,
        }))
    }
}

impl<R: BufRead, W: Write> DesignatorResolver for TerminalResolver<R, W> {
    fn resolve(&mut self, designator: &str, catalog_files: &[PathBuf]) -> Resolution {
        match self.ask_addition(designator, catalog_files) {
            Ok(Some(addition)) => {
                debug!(
                    "Operator added '{}' to {}",
                    designator,
                    display_name(&addition.target_file)
                );
                Resolution::Add(addition)
            }
            Ok(None) => Resolution::Declined,
            Err(e) => {
                warn!("Prompt for '{}' failed: {}", designator, e);
                Resolution::Declined
            }
        }
    }
}

/// Format a path for menus relative to `base` when possible
pub fn relative_display(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn resolver(script: &str) -> TerminalResolver<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalResolver::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn files() -> Vec<PathBuf> {
        vec![
            PathBuf::from("Components/Chip.csv"),
            PathBuf::from("Components/SOT.csv"),
        ]
    }

    #[test]
    fn test_confirmation_parsing() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"maybe\nYES\n".to_vec());
        assert_eq!(
            prompt_confirmation(&mut input, &mut out, "Go?", false).unwrap(),
            Some(true)
        );
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Go? [y/N]: "));
        assert!(shown.contains("Please enter 'y'"));

        let mut input = Cursor::new(b"\n".to_vec());
        assert_eq!(
            prompt_confirmation(&mut input, &mut io::sink(), "Go?", true).unwrap(),
            Some(true)
        );

        let mut input = Cursor::new(b"".to_vec());
        assert_eq!(
            prompt_confirmation(&mut input, &mut io::sink(), "Go?", false).unwrap(),
            None
        );
    }

    #[test]
    fn test_full_addition() {
        let mut r = resolver("y\n2\nSOT23\ny\n");
        let resolution = r.resolve("sot-23", &files());

        assert_eq!(
            resolution,
            Resolution::Add(CatalogAddition {
                target_file: PathBuf::from("Components/SOT.csv"),
                non_standard: "sot-23".to_string(),
                standard_name: "SOT23".to_string(),
                delete: true,
            })
        );
        let (_, out) = r.into_inner();
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("1. Chip.csv"));
        assert!(shown.contains("2. SOT.csv"));
    }

    #[test]
    fn test_defaults_keep_designator_and_do_not_delete() {
        let mut r = resolver("yes\n1\n\n\n");
        match r.resolve("0603", &files()) {
            Resolution::Add(addition) => {
                assert_eq!(addition.standard_name, "0603");
                assert!(!addition.delete);
                assert_eq!(addition.target_file, PathBuf::from("Components/Chip.csv"));
            }
            Resolution::Declined => panic!("expected an addition"),
        }
    }

    #[test]
    fn test_decline_paths() {
        // Explicit no, default no
        assert_eq!(resolver("n\n").resolve("X", &files()), Resolution::Declined);
        assert_eq!(resolver("\n").resolve("X", &files()), Resolution::Declined);
        // Empty file choice cancels
        assert_eq!(resolver("y\n\n").resolve("X", &files()), Resolution::Declined);
        // No backing files
        assert_eq!(resolver("y\n").resolve("X", &[]), Resolution::Declined);
        // Input closes mid-protocol
        assert_eq!(resolver("y\n1\n").resolve("X", &files()), Resolution::Declined);
        assert_eq!(resolver("").resolve("X", &files()), Resolution::Declined);
    }

    #[test]
    fn test_invalid_file_choice_is_asked_again() {
        let mut r = resolver("y\n7\nabc\n1\nNAME\nn\n");
        match r.resolve("X", &files()) {
            Resolution::Add(addition) => {
                assert_eq!(addition.target_file, PathBuf::from("Components/Chip.csv"));
                assert_eq!(addition.standard_name, "NAME");
            }
            Resolution::Declined => panic!("expected an addition"),
        }
        let (_, out) = r.into_inner();
        assert_eq!(String::from_utf8(out).unwrap().matches("Invalid selection").count(), 2);
    }

    #[test]
    fn test_input_selection() {
        let available = vec![
            PathBuf::from("in/a.csv"),
            PathBuf::from("in/b.csv"),
            PathBuf::from("in/c.csv"),
        ];
        let select = |script: &[u8]| {
            let mut input = Cursor::new(script.to_vec());
            prompt_input_selection(&mut input, &mut io::sink(), &available).unwrap()
        };

        assert_eq!(select(b"\n"), available);
        assert_eq!(select(b"4\n"), available);
        assert_eq!(
            select(b"3, 1\n"),
            vec![PathBuf::from("in/c.csv"), PathBuf::from("in/a.csv")]
        );
        assert_eq!(select(b"9\n2\n"), vec![PathBuf::from("in/b.csv")]);
        assert!(select(b"").is_empty());
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1,1,2", 2), Some(vec![0, 1]));
        assert_eq!(parse_selection("0", 2), None);
        assert_eq!(parse_selection("1,x", 2), None);
    }

    #[test]
    fn test_relative_display() {
        let base = Path::new("/w");
        assert_eq!(
            relative_display(Path::new("/w/Components/a.csv"), base),
            "Components/a.csv"
        );
        assert_eq!(relative_display(Path::new("/x/a.csv"), base), "/x/a.csv");
    }
}
