//! Reading and writing word list files.
//!
//! The input format is a declared word count on the first line followed by
//! one word per line. Carriage returns are ignored wherever they appear.
//! Output is one word per line with no newline after the last word.

use crate::error::{SortContext, SortError, SortResult};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Words read from an input file together with the count its header declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    pub declared: usize,
    pub words: Vec<String>,
}

impl WordList {
    /// Check that the header agrees with the number of words actually present
    pub fn check_count(&self) -> SortResult<()> {
        if self.declared != self.words.len() {
            return Err(SortError::length_mismatch(self.declared, self.words.len()));
        }
        Ok(())
    }
}

/// Parse the contents of a word list file
pub fn parse_word_list(contents: &str) -> SortResult<WordList> {
    let (header, body) = match contents.split_once('\n') {
        Some((header, body)) => (header, body),
        None => (contents, ""),
    };

    let header = header.replace('\r', "");
    let header = header.trim();
    if header.is_empty() {
        return Err(SortError::MissingWordCount);
    }
    let declared = header
        .parse::<usize>()
        .map_err(|_| SortError::invalid_word_count(header))?;

    let body = body.replace('\r', "");
    let mut words: Vec<String> = body.split('\n').map(str::to_owned).collect();
    while words.last().is_some_and(|word| word.is_empty()) {
        words.pop();
    }

    Ok(WordList { declared, words })
}

/// Memory-map and parse a word list file
pub fn read_word_list(path: &Path) -> SortResult<WordList> {
    let name = path.display().to_string();
    let file = File::open(path).with_file_context(&name)?;
    let len = file.metadata().with_file_context(&name)?.len();
    if len == 0 {
        return parse_word_list("");
    }

    // SAFETY: the mapping is read-only and dropped before this function returns
    let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
    let contents = std::str::from_utf8(&mmap)?;
    let list = parse_word_list(contents)?;

    tracing::debug!(
        file = %name,
        declared = list.declared,
        words = list.words.len(),
        "loaded word list"
    );
    Ok(list)
}

/// Write `words` one per line, replacing `path` atomically.
///
/// Refuses to write anything when `words` does not hold `expected` entries.
pub fn write_words(path: &Path, words: &[String], expected: usize) -> SortResult<()> {
    if words.len() != expected {
        return Err(SortError::length_mismatch(expected, words.len()));
    }

    let name = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).with_file_context(&name)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        for (index, word) in words.iter().enumerate() {
            if index > 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(word.as_bytes())?;
        }
        writer.flush()?;
    }
    temp.persist(path)
        .map_err(|err| err.error)
        .with_file_context(&name)?;

    tracing::debug!(file = %name, words = words.len(), "wrote sorted words");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic() -> SortResult<()> {
        let list = parse_word_list("3\nbanana\napple\ncherry\n")?;
        assert_eq!(list.declared, 3);
        assert_eq!(list.words, vec!["banana", "apple", "cherry"]);
        list.check_count()
    }

    #[test]
    fn test_parse_strips_carriage_returns() -> SortResult<()> {
        let list = parse_word_list("2\r\nfoo\r\nba\rr\r\n")?;
        assert_eq!(list.words, vec!["foo", "bar"]);
        Ok(())
    }

    #[test]
    fn test_parse_keeps_inner_empty_lines() -> SortResult<()> {
        let list = parse_word_list("3\na\n\nb\n\n\n")?;
        assert_eq!(list.words, vec!["a", "", "b"]);
        list.check_count()
    }

    #[test]
    fn test_parse_empty_body() -> SortResult<()> {
        let list = parse_word_list("0\n")?;
        assert!(list.words.is_empty());
        list.check_count()?;

        let list = parse_word_list("0")?;
        assert!(list.words.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_bad_header() {
        assert!(matches!(parse_word_list(""), Err(SortError::MissingWordCount)));
        assert!(matches!(
            parse_word_list("many\nword\n"),
            Err(SortError::InvalidWordCount { value }) if value == "many"
        ));
        assert!(matches!(
            parse_word_list("-1\n"),
            Err(SortError::InvalidWordCount { .. })
        ));
    }

    #[test]
    fn test_count_mismatch() {
        let list = parse_word_list("4\na\nb\n").expect("header parses");
        assert!(matches!(
            list.check_count(),
            Err(SortError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_read_and_write_files() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("input.txt");
        let output = temp_dir.path().join("output.txt");
        fs::write(&input, "3\nzebra\napple\nbanana\n")?;

        let list = read_word_list(&input)?;
        assert_eq!(list.words, vec!["zebra", "apple", "banana"]);

        let sorted = vec!["apple".to_string(), "banana".to_string(), "zebra".to_string()];
        write_words(&output, &sorted, list.declared)?;
        assert_eq!(fs::read_to_string(&output)?, "apple\nbanana\nzebra");
        Ok(())
    }

    #[test]
    fn test_read_missing_and_empty_files() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(
            read_word_list(&missing),
            Err(SortError::FileNotFound { .. })
        ));

        let empty = temp_dir.path().join("empty.txt");
        fs::write(&empty, "")?;
        assert!(matches!(
            read_word_list(&empty),
            Err(SortError::MissingWordCount)
        ));
        Ok(())
    }

    #[test]
    fn test_write_refuses_wrong_count() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let output = temp_dir.path().join("output.txt");
        let result = write_words(&output, &["a".to_string()], 2);
        assert!(matches!(result, Err(SortError::LengthMismatch { .. })));
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_rejected() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("bad.txt");
        fs::write(&input, b"1\n\xff\xfe\n")?;
        assert!(matches!(
            read_word_list(&input),
            Err(SortError::InvalidUtf8(_))
        ));
        Ok(())
    }
}
