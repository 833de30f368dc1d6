//! Cleanup passes over a collected archive.

use crate::{persistent, CrawlerError, ProblemArchive};
use lazy_regex::{regex, Lazy, Regex};
use std::path::Path;
use tracing::info;

/// Buckets larger than this get reported by [`oversized_buckets`].
pub const DEFAULT_BUCKET_THRESHOLD: usize = 12;

/// Everything from the first occurrence on is treated as solution text.
/// This is a heuristic: a statement that legitimately contains the word is
/// cut short too.
pub const SOLUTION_MARKER: &str = "Solution";

/// Removes whitespace between an inline-math span (`$...$` or `\(...\)`) and a
/// directly following comma, period or question mark.
///
/// The rules run in a fixed order over the same buffer. Each one only fires
/// when whitespace is present, so running the pass twice changes nothing.
pub fn fix_spacing(text: &str) -> String {
    let rules: [(&Lazy<Regex>, &str); 6] = [
        (regex!(r"(\$[^$]+\$)\s+,"), "${1},"),
        (regex!(r"(\$[^$]+\$)\s+\."), "${1}."),
        (regex!(r"(\$[^$]+\$)\s+\?"), "${1}?"),
        (regex!(r"(\\\([^)]+\\\))\s+,"), "${1},"),
        (regex!(r"(\\\([^)]+\\\))\s+\."), "${1}."),
        (regex!(r"(\\\([^)]+\\\))\s+\?"), "${1}?"),
    ];

    let mut text = text.to_string();
    for (rule, replacement) in rules {
        text = rule.replace_all(&text, replacement).into_owned();
    }
    text
}

/// Runs [`fix_spacing`] over the raw text of the archive file and writes it
/// back. Nothing outside the matched spans changes.
pub fn fix_spacing_file<P: AsRef<Path>>(path: P) -> Result<(), CrawlerError> {
    let text = persistent::read_archive_text(path.as_ref())?;
    persistent::write_archive_text(path.as_ref(), &fix_spacing(&text))
}

/// Cuts every `problem` at the first [`SOLUTION_MARKER`]. Returns the
/// `(year, question)` of each record that was cut.
pub fn truncate_solutions(archive: &mut ProblemArchive) -> Vec<(String, String)> {
    let mut truncated = vec![];
    for (year, bucket) in archive.iter_mut() {
        for record in bucket.iter_mut() {
            if let Some(at) = record.problem.find(SOLUTION_MARKER) {
                record.problem.truncate(at);
                info!("Truncated {} {}", year, record.question);
                truncated.push((year.clone(), record.question.clone()));
            }
        }
    }
    truncated
}

/// Runs [`truncate_solutions`] over the archive file and rewrites it in the
/// canonical form.
pub fn truncate_solutions_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(String, String)>, CrawlerError> {
    let mut archive = persistent::read_archive(path.as_ref())?;
    let truncated = truncate_solutions(&mut archive);
    persistent::write_archive(path.as_ref(), &archive)?;
    Ok(truncated)
}

/// Year keys whose bucket holds more than `threshold` records.
pub fn oversized_buckets(archive: &ProblemArchive, threshold: usize) -> Vec<&str> {
    archive
        .iter()
        .filter(|(_, bucket)| bucket.len() > threshold)
        .map(|(year, _)| year.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProblemRecord;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_comma_after_dollar_math() {
        assert_eq!(fix_spacing("A$x$ , B"), "A$x$, B");
    }

    #[test]
    fn test_each_punctuation_after_dollar_math() {
        assert_eq!(
            fix_spacing("Let $n$ . Is $n^2$ ? Then $k$\t\n,"),
            "Let $n$. Is $n^2$? Then $k$,"
        );
    }

    #[test]
    fn test_period_after_paren_math() {
        assert_eq!(fix_spacing(r"so \(x\) . Next"), r"so \(x\). Next");
        assert_eq!(fix_spacing(r"\(a+b\)  , and \(c\) ?"), r"\(a+b\), and \(c\)?");
    }

    #[test]
    fn test_paren_math_inside_json_text() {
        let raw = r#"{"problem": "Show \\(f(x)\\) ."}"#;
        // `[^)]` stops at the inner `)` of `f(x)`, so nothing matches here
        assert_eq!(fix_spacing(raw), raw);

        let raw = r#"{"problem": "Show \\(x\\) ."}"#;
        assert_eq!(fix_spacing(raw), r#"{"problem": "Show \\(x\\)."}"#);
    }

    #[test]
    fn test_untouched_without_whitespace() {
        let text = "A$x$, B \\(y\\). C $z$ and, more";
        assert_eq!(fix_spacing(text), text);
    }

    #[test]
    fn test_fix_spacing_idempotent() {
        let text = "If $a$ , $b$ . then \\(c\\) ? and $d$ ,";
        let once = fix_spacing(text);
        assert_eq!(fix_spacing(&once), once);
    }

    #[test]
    fn test_truncate_solutions() {
        let mut archive = ProblemArchive::new();
        archive.bucket_mut("1967").extend([
            ProblemRecord::new("Prove X. Solution: Y", "A1"),
            ProblemRecord::new("Prove Z.", "A2"),
        ]);
        archive
            .bucket_mut("1970")
            .push(ProblemRecord::new("Solution only", "B1"));

        let truncated = truncate_solutions(&mut archive);

        assert_eq!(
            truncated,
            vec![
                ("1967".to_string(), "A1".to_string()),
                ("1970".to_string(), "B1".to_string())
            ]
        );
        let b1967 = archive.bucket("1967").unwrap();
        assert_eq!(b1967[0].problem, "Prove X. ");
        assert_eq!(b1967[1].problem, "Prove Z.");
        assert_eq!(archive.bucket("1970").unwrap()[0].problem, "");
    }

    #[test]
    fn test_truncate_is_case_sensitive() {
        let mut archive = ProblemArchive::new();
        archive
            .bucket_mut("1980")
            .push(ProblemRecord::new("Find the solution set.", "A3"));

        assert!(truncate_solutions(&mut archive).is_empty());
        assert_eq!(
            archive.bucket("1980").unwrap()[0].problem,
            "Find the solution set."
        );
    }

    #[test]
    fn test_oversized_buckets() {
        let mut archive = ProblemArchive::new();
        for (year, n) in [("1990", 12), ("1991", 13), ("1958_february", 14)] {
            let bucket = archive.bucket_mut(year);
            for i in 0..n {
                bucket.push(ProblemRecord::new("p", format!("A{}", i)));
            }
        }

        assert_eq!(
            oversized_buckets(&archive, DEFAULT_BUCKET_THRESHOLD),
            vec!["1958_february", "1991"]
        );
        assert!(oversized_buckets(&archive, 20).is_empty());
    }

    #[test]
    fn test_fix_spacing_file_rewrites_only_math_spacing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("putnam_problems.json");
        let raw = r#"{
    "1967": [
        {
            "problem": "Let $n$ , be odd , and \\(k\\) . Why ?",
            "question": "A1"
        }
    ],
    "1958_february": []
}"#;
        fs::write(&path, raw).unwrap();

        fix_spacing_file(&path).unwrap();

        let expected = r#"{
    "1967": [
        {
            "problem": "Let $n$, be odd , and \\(k\\). Why ?",
            "question": "A1"
        }
    ],
    "1958_february": []
}"#;
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_truncate_solutions_file_writes_canonical_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("putnam_problems.json");
        fs::write(
            &path,
            r#"{"1967":[{"problem":"Prove X. Solution: Y","question":"A1"}],"1958_february":[{"problem":"Find all n.","question":"B2"}]}"#,
        )
        .unwrap();

        let truncated = truncate_solutions_file(&path).unwrap();

        assert_eq!(truncated, vec![("1967".to_string(), "A1".to_string())]);
        let expected = r#"{
    "1958_february": [
        {
            "problem": "Find all n.",
            "question": "B2"
        }
    ],
    "1967": [
        {
            "problem": "Prove X. ",
            "question": "A1"
        }
    ]
}"#;
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }
}
