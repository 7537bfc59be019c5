use crate::error::{CliError, CliResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use wordtree::{Comparator, RbTree};

/// Outcome counts of a dictionary load
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Inserts one word per line, skipping blank lines
pub fn load_words<R, C>(reader: R, tree: &mut RbTree<String, C>) -> CliResult<LoadReport>
where
    R: BufRead,
    C: Comparator<String>,
{
    let mut report = LoadReport::default();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        match tree.insert(word.to_string()) {
            Ok(()) => report.inserted += 1,
            Err(_) => {
                debug!(word, "duplicate word in dictionary");
                report.duplicates += 1;
            }
        }
    }
    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        height = tree.height(),
        "dictionary loaded"
    );
    Ok(report)
}

pub fn load_file<C: Comparator<String>>(
    path: &Path,
    tree: &mut RbTree<String, C>,
) -> CliResult<LoadReport> {
    let file = File::open(path).map_err(|source| CliError::Dictionary {
        path: path.to_path_buf(),
        source,
    })?;
    load_words(BufReader::new(file), tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wordtree::WordOrder;

    #[test]
    fn test_load_counts_duplicates() {
        let input = "Banana\r\napple\n\n  Cherry  \nAPPLE\nbanana\n";
        let mut tree = RbTree::new();
        let report = load_words(Cursor::new(input), &mut tree).unwrap();
        assert_eq!(report, LoadReport { inserted: 3, duplicates: 2 });
        assert_eq!(vec!["apple", "Banana", "Cherry"], tree.iter().collect::<Vec<_>>());
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_load_case_sensitive() {
        let mut tree = RbTree::with_order(WordOrder::new().case_sensitive(true));
        let report = load_words(Cursor::new("apple\nAPPLE\n"), &mut tree).unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.duplicates, 0);
    }

    #[test]
    fn test_load_empty_input() {
        let mut tree: RbTree<String> = RbTree::new();
        let report = load_words(Cursor::new(""), &mut tree).unwrap();
        assert_eq!(report, LoadReport::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_load_sorted_list_stays_shallow() {
        let words: String = (0..1023).map(|i| format!("word{i:04}\n")).collect();
        let mut tree: RbTree<String> = RbTree::new();
        let report = load_words(Cursor::new(words), &mut tree).unwrap();
        assert_eq!(report.inserted, 1023);
        assert!(tree.height() <= 20, "height {}", tree.height());
    }

    #[test]
    fn test_missing_file() {
        let mut tree: RbTree<String> = RbTree::new();
        let err = load_file(Path::new("/nonexistent/dictionary.txt"), &mut tree).unwrap_err();
        assert!(matches!(err, CliError::Dictionary { .. }));
        assert!(err.to_string().contains("/nonexistent/dictionary.txt"));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut tree: RbTree<String> = RbTree::new();
        let err = load_words(Cursor::new(vec![b'o', b'k', b'\n', 0xff, b'\n']), &mut tree).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
