//! Line-level validation of raw facility export text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::code::LocationCode;
use crate::diagnostics::{Diagnostics, Stage};

/// `"0300104", "A248755000|A248015001"`
static MATERIALS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([0-9]{7})",\s*"([^"]*)""#).expect("materials pattern is valid")
});

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

/// Splits on `\r\n`, `\r` or `\n`. A single trailing break does not start
/// another line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);
    (!text.is_empty())
        .then(|| LINE_BREAK.split(body))
        .into_iter()
        .flatten()
}

/// Which export layout a text source uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Pick `Materials` if any line has the two-column shape, else `Codes`.
    #[default]
    Auto,
    /// One code per line, optionally quoted and comma-terminated.
    Codes,
    /// `"CODE", "MAT1|MAT2|..."` per line.
    Materials,
}

impl SourceFormat {
    /// Resolves `Auto` against the given text. Other variants are returned as is.
    pub fn resolve(self, text: &str) -> SourceFormat {
        match self {
            SourceFormat::Auto => {
                if split_lines(text).any(|line| MATERIALS_LINE.is_match(line.trim())) {
                    SourceFormat::Materials
                } else {
                    SourceFormat::Codes
                }
            }
            other => other,
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SourceFormat::Auto),
            "codes" => Ok(SourceFormat::Codes),
            "materials" => Ok(SourceFormat::Materials),
            _ => Err(format!("unknown source format: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Auto => write!(f, "auto"),
            SourceFormat::Codes => write!(f, "codes"),
            SourceFormat::Materials => write!(f, "materials"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub format: SourceFormat,
    /// Keep codes whose level field is `00`.
    pub include_height_zero: bool,
}

/// One accepted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCode {
    pub code: LocationCode,
    /// `None` for the code-only format. May be empty for the materials format.
    pub materials: Option<Vec<String>>,
}

impl ExtractedCode {
    pub fn bare(code: LocationCode) -> Self {
        Self {
            code,
            materials: None,
        }
    }
}

/// Returns every well-formed code in `text`, in encounter order.
///
/// Lines that do not match the selected format are skipped silently; export
/// dumps routinely contain rows that are not storage locations.
pub fn extract(text: &str, options: &ParseOptions, diag: &dyn Diagnostics) -> Vec<ExtractedCode> {
    let lines: Vec<&str> = split_lines(text).map(str::trim).collect();
    diag.record(Stage::LinesRead, lines.len());

    let matched: Vec<ExtractedCode> = match options.format.resolve(text) {
        SourceFormat::Materials => lines.iter().filter_map(|l| match_materials_line(l)).collect(),
        _ => lines.iter().filter_map(|l| match_code_line(l)).collect(),
    };
    diag.record(Stage::CodesMatched, matched.len());

    let kept: Vec<ExtractedCode> = if options.include_height_zero {
        matched
    } else {
        matched
            .into_iter()
            .filter(|e| !e.code.is_height_zero())
            .collect()
    };
    diag.record(Stage::CodesKept, kept.len());

    kept
}

/// `"0300104",` -> `0300104`
fn match_code_line(line: &str) -> Option<ExtractedCode> {
    let cleaned: String = line
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ',') && !c.is_whitespace())
        .collect();
    cleaned.parse().ok().map(ExtractedCode::bare)
}

fn match_materials_line(line: &str) -> Option<ExtractedCode> {
    let caps = MATERIALS_LINE.captures(line)?;
    let code = caps[1].parse().ok()?;
    let materials = caps[2]
        .split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();
    Some(ExtractedCode {
        code,
        materials: Some(materials),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NoDiagnostics, StageCounts};

    fn codes(extracted: &[ExtractedCode]) -> Vec<&str> {
        extracted.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_cleans_quotes_and_commas() {
        let text = "\"0300104\",\n  0300105  \n'0300106'\n03 001 07";
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&out), ["0300104", "0300105", "0300106", "0300107"]);
        assert!(out.iter().all(|e| e.materials.is_none()));
    }

    #[test]
    fn test_mixed_line_endings() {
        let text = "0300101\r\n0300102\n0300103\r\n";
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&out), ["0300101", "0300102", "0300103"]);
    }

    #[test]
    fn test_cr_only_line_endings() {
        let cr = extract("0300101\r0300102\r0400101\r", &ParseOptions::default(), &NoDiagnostics);
        let lf = extract("0300101\n0300102\n0400101\n", &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&cr), ["0300101", "0300102", "0400101"]);
        assert_eq!(cr, lf);

        let materials = extract("\"0300101\", \"A\"\r\"0300102\", \"B\"", &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&materials), ["0300101", "0300102"]);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), [""]);
        assert_eq!(split_lines("a\r\nb\rc\nd\r\n").collect::<Vec<_>>(), ["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb").collect::<Vec<_>>(), ["a", "", "b"]);
    }

    #[test]
    fn test_non_ascii_digits_do_not_select_materials() {
        let text = "\"٠٣٠٠١٠٤\", \"A\"\n0300101\n0300102";
        assert_eq!(SourceFormat::Auto.resolve(text), SourceFormat::Codes);
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&out), ["0300101", "0300102"]);
    }

    #[test]
    fn test_height_zero_filter() {
        let text = "0300100\n0300101";
        let dropped = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&dropped), ["0300101"]);

        let options = ParseOptions {
            include_height_zero: true,
            ..Default::default()
        };
        let kept = extract(text, &options, &NoDiagnostics);
        assert_eq!(codes(&kept), ["0300100", "0300101"]);
    }

    #[test]
    fn test_materials_line() {
        let text = "\"0300104\", \"A248755000|A248015001\"\n\"0300105\", \"\"";
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0].materials.as_deref(),
            Some(&["A248755000".to_string(), "A248015001".to_string()][..])
        );
        assert_eq!(out[1].materials.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_materials_drops_blank_entries() {
        let text = "\"0300104\",\"A1| |A2|\"";
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(
            out[0].materials,
            Some(vec!["A1".to_string(), "A2".to_string()])
        );
    }

    #[test]
    fn test_materials_format_skips_bare_codes() {
        let text = "0300101\n\"0300102\", \"M\"\n\"03001X3\", \"M\"";
        let out = extract(text, &ParseOptions::default(), &NoDiagnostics);
        assert_eq!(codes(&out), ["0300102"]);
    }

    #[test]
    fn test_forced_codes_format_ignores_materials_shape() {
        let options = ParseOptions {
            format: SourceFormat::Codes,
            ..Default::default()
        };
        let out = extract("\"0300102\", \"M\"\n0300103", &options, &NoDiagnostics);
        assert_eq!(codes(&out), ["0300103"]);
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(SourceFormat::Auto.resolve("0300101\n"), SourceFormat::Codes);
        assert_eq!(
            SourceFormat::Auto.resolve("x\n\"0300101\", \"A\"\n"),
            SourceFormat::Materials
        );
        assert_eq!(SourceFormat::Codes.resolve("\"0300101\", \"A\""), SourceFormat::Codes);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Materials".parse::<SourceFormat>(), Ok(SourceFormat::Materials));
        assert_eq!("codes".parse::<SourceFormat>(), Ok(SourceFormat::Codes));
        assert!("csv".parse::<SourceFormat>().is_err());
        assert_eq!(SourceFormat::Auto.to_string(), "auto");
    }

    #[test]
    fn test_stage_counts() {
        let counts = StageCounts::new();
        extract("0300100\n0300101\nZ12\n\n", &ParseOptions::default(), &counts);
        assert_eq!(counts.get(Stage::LinesRead), Some(4));
        assert_eq!(counts.get(Stage::CodesMatched), Some(2));
        assert_eq!(counts.get(Stage::CodesKept), Some(1));
    }
}
