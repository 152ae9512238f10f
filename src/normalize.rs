//! Cell normalization.
//!
//! [`CellNormalizer::normalize`] turns one raw field value into its canonical
//! text through a fixed chain of textual clean-ups followed by an ordered list
//! of package rules (capacitor, then resistor) and a homoglyph pass that maps
//! Cyrillic look-alikes to Latin letters.
//!
//! The function is total: every input produces an output and nothing fails
//! once the normalizer has been constructed.

use crate::delimited::trim_blanks;
use crate::error::Result;
use regex::{Captures, Regex};
use std::fmt;
use tracing::trace;

/// Marker kept on low-ESR parts even when truncation would drop it
const LESR_TOKEN: &str = "LESR";

/// Cyrillic letters that render like Latin ones, with their Latin counterpart
const HOMOGLYPHS: &[(char, char)] = &[
    ('А', 'A'),
    ('В', 'B'),
    ('Е', 'E'),
    ('К', 'K'),
    ('М', 'M'),
    ('Н', 'H'),
    ('О', 'O'),
    ('Р', 'P'),
    ('С', 'C'),
    ('Т', 'T'),
    ('У', 'Y'),
    ('Х', 'X'),
    ('а', 'a'),
    ('в', 'b'),
    ('е', 'e'),
    ('к', 'k'),
    ('м', 'm'),
    ('н', 'n'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('т', 't'),
    ('у', 'y'),
    ('х', 'x'),
];

/// Chip packages recognised by the capacitor rule
const CHIP_PACKAGES: &str = "0402|0603|0805|1206|1210";

type Rewriter = fn(&Captures<'_>) -> String;

/// One canonicalization rule: the first matching pattern rewrites the match
struct PackageRule {
    name: &'static str,
    patterns: Vec<(Regex, Rewriter)>,
}

impl fmt::Debug for PackageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRule")
            .field("name", &self.name)
            .field(
                "patterns",
                &self.patterns.iter().map(|(re, _)| re.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PackageRule {
    fn apply(&self, value: &str) -> Option<String> {
        self.patterns.iter().find_map(|(regex, rewrite)| {
            let caps = regex.captures(value)?;
            let whole = caps.get(0)?;
            let mut out = String::with_capacity(value.len());
            out.push_str(&value[..whole.start()]);
            out.push_str(&rewrite(&caps));
            out.push_str(&value[whole.end()..]);
            Some(out)
        })
    }
}

/// Capacitor rule: full-string match, dielectric token dropped (NP0 folds into `N`)
fn capacitor_rule() -> Result<PackageRule> {
    let x5r_x7r = Regex::new(&format!(
        r"(?i)^\s*({CHIP_PACKAGES})\s*-\s*(?:X5R|X7R)\s*-\s*([0-9]+V.*)$"
    ))?;
    let np0 = Regex::new(&format!(
        r"(?i)^\s*({CHIP_PACKAGES})\s*-\s*NP0\s*-\s*([0-9]+V.*)$"
    ))?;

    Ok(PackageRule {
        name: "capacitor",
        patterns: vec![
            (x5r_x7r, drop_dielectric as Rewriter),
            (np0, fold_np0 as Rewriter),
        ],
    })
}

fn drop_dielectric(caps: &Captures<'_>) -> String {
    format!("{}-{}", &caps[1], &caps[2])
}

fn fold_np0(caps: &Captures<'_>) -> String {
    format!("{}-N{}", &caps[1], &caps[2])
}

/// Resistor rule: searched anywhere, temperature coefficient dropped
fn resistor_rule() -> Result<PackageRule> {
    let ppm = Regex::new(
        r"(?i)([^-\s]+)\s*-\s*([0-9]+(?:\.[0-9]+)?|[0-9]+/[0-9]+)\s*W\s*-\s*(0R|[0-9]+(?:\.[0-9]+)?[RKM])\s*-\s*[0-9]+\s*ppm(?:\s*-\s*([0-9]+%))?",
    )?;

    Ok(PackageRule {
        name: "resistor",
        patterns: vec![(ppm, drop_ppm as Rewriter)],
    })
}

fn drop_ppm(caps: &Captures<'_>) -> String {
    let mut out = format!("{}-{}W-{}", &caps[1], &caps[2], &caps[3]);
    if let Some(tolerance) = caps.get(4).filter(|m| !m.as_str().is_empty()) {
        out.push('-');
        out.push_str(tolerance.as_str());
    }
    out
}

/// Normalizes single cell values
#[derive(Debug)]
pub struct CellNormalizer {
    parenthesized: Regex,
    space_before_dash: Regex,
    rules: Vec<PackageRule>,
}

impl CellNormalizer {
    /// Compile the rule chain
    pub fn new() -> Result<Self> {
        Ok(Self {
            parenthesized: Regex::new(r"\([^)]*\)")?,
            space_before_dash: Regex::new(r"\s+-")?,
            rules: vec![capacitor_rule()?, resistor_rule()?],
        })
    }

    /// Normalize one raw field value
    pub fn normalize(&self, raw: &str) -> String {
        let mut s = self.parenthesized.replace_all(raw, "").into_owned();
        s = s.replace(',', ".").replace('?', "-");
        s = self.space_before_dash.replace_all(&s, "-").into_owned();

        if let Some(pos) = s.find('%') {
            s.truncate(pos + 1);
        }

        let start = s
            .find(|c: char| c.is_alphanumeric() || c == '%')
            .unwrap_or(s.len());
        s.replace_range(..start, "");

        if contains_lesr(raw) && !contains_lesr(&s) {
            if !s.ends_with('%') {
                s.push(' ');
            }
            s.push_str(LESR_TOKEN);
        }

        let mut s = trim_blanks(&s).to_string();

        for rule in &self.rules {
            if let Some(rewritten) = rule.apply(&s) {
                trace!(rule = rule.name, from = %s, to = %rewritten, "package rule applied");
                s = rewritten;
            }
        }

        replace_homoglyphs(&s)
    }
}

fn contains_lesr(value: &str) -> bool {
    value.to_lowercase().contains("lesr")
}

/// Replace Cyrillic look-alike letters with their Latin counterparts
pub fn replace_homoglyphs(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            HOMOGLYPHS
                .iter()
                .find(|(cyrillic, _)| *cyrillic == c)
                .map_or(c, |(_, latin)| *latin)
        })
        .collect()
}
