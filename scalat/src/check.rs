//! Per-file checking: skip rules, expectation inversion, and the verdict.

use std::path::{Path, PathBuf};

use scalar_syn::ParseError;

/// What happened to one file.
pub enum Outcome {
    /// The file matched its expected outcome.
    Pass,
    /// The file did not match its expected outcome; the error is present
    /// when the parse itself failed.
    Fail(Option<ParseError>),
    /// The file was not checked.
    Skip,
}

/// The result of checking one file, ready for reporting.
pub struct Report {
    pub path: PathBuf,
    /// Input length in UTF-16 code units; 0 for unread (skipped) files.
    pub len: usize,
    pub outcome: Outcome,
}

impl Report {
    pub fn passed(&self) -> bool {
        !matches!(self.outcome, Outcome::Fail(_))
    }

    pub fn status(&self) -> &'static str {
        match self.outcome {
            Outcome::Pass => "ok",
            Outcome::Fail(_) => "failed",
            Outcome::Skip => "skip",
        }
    }
}

fn has_segment(path: &Path, name: &str) -> bool {
    path.iter().any(|seg| seg == name)
}

/// A line consisting only of non-quote characters that spells a four-digit
/// unicode escape. Such files exercise escape handling the recognizer
/// deliberately leaves to the real compiler.
fn line_spells_unicode_escape(line: &str) -> bool {
    if line.contains('"') || line.contains('\'') {
        return false;
    }
    let bytes = line.as_bytes();
    (0..bytes.len().saturating_sub(5)).any(|i| {
        bytes[i] == b'\\'
            && bytes[i + 1] == b'u'
            && bytes[i + 2..i + 6].iter().all(u8::is_ascii_digit)
    })
}

fn should_skip(path: &Path, contents: &str) -> bool {
    if has_segment(path, "failing") {
        return true;
    }
    if contents.starts_with("#!") {
        return true;
    }
    contents.lines().any(line_spells_unicode_escape)
}

/// Checks a single file with its own parser instance.
///
/// A path segment named `neg` inverts the expectation: there a parse
/// failure is the passing outcome. Unreadable files are skips, not
/// failures.
pub fn check_file(path: &Path, mut parse: impl FnMut(&str) -> Result<(), ParseError>) -> Report {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "unreadable, skipping");
            return Report {
                path: path.to_path_buf(),
                len: 0,
                outcome: Outcome::Skip,
            };
        }
    };
    let len = contents.encode_utf16().count();
    if should_skip(path, &contents) {
        return Report {
            path: path.to_path_buf(),
            len,
            outcome: Outcome::Skip,
        };
    }

    let expect_failure = has_segment(path, "neg");
    let outcome = match parse(&contents) {
        Ok(()) if expect_failure => Outcome::Fail(None),
        Ok(()) => Outcome::Pass,
        Err(_) if expect_failure => Outcome::Pass,
        Err(err) => Outcome::Fail(Some(err)),
    };
    Report {
        path: path.to_path_buf(),
        len,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_escape_lines() {
        assert!(line_spells_unicode_escape("val x = \\u0041"));
        assert!(!line_spells_unicode_escape("val x = \"\\u0041\""));
        assert!(!line_spells_unicode_escape("val x = '\\u0041'"));
        assert!(!line_spells_unicode_escape("\\uXYZW"));
        assert!(!line_spells_unicode_escape("\\u12"));
        assert!(line_spells_unicode_escape("  \\u12345 tail"));
    }

    #[test]
    fn test_segments() {
        assert!(has_segment(Path::new("a/neg/b.scala"), "neg"));
        assert!(!has_segment(Path::new("a/negative/b.scala"), "neg"));
    }

    #[test]
    fn test_shebang_skips() {
        assert!(should_skip(Path::new("x.scala"), "#!/usr/bin/env scala\n"));
        assert!(!should_skip(Path::new("x.scala"), "class C"));
    }

    #[test]
    fn test_neg_inverts() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("neg")).unwrap();
        let path = tmp.path().join("neg").join("bad.scala");
        std::fs::write(&path, "class {").unwrap();

        let report = check_file(&path, scalar_syn::parse);
        assert!(matches!(report.outcome, Outcome::Pass));
        assert!(report.passed());
    }

    #[test]
    fn test_missing_file_skips() {
        let report = check_file(Path::new("/no/such/file.scala"), scalar_syn::parse);
        assert!(matches!(report.outcome, Outcome::Skip));
        assert_eq!(report.len, 0);
    }
}
