use std::io::{self, Write};

use log::trace;
use rayon::slice::ParallelSliceMut;

use crate::config::TableConfig;
use crate::table::HashTable;

pub type WordCounts = HashTable<String, u64>;

/// Counts the lower-cased, whitespace-separated words of one chunk.
pub fn count_chunk(chunk: &[u8], config: TableConfig) -> WordCounts {
    let mut counts = WordCounts::with_config(config);
    let text = String::from_utf8_lossy(chunk);
    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        match counts.get_mut(word.as_str()) {
            Some(count) => *count += 1,
            None => {
                counts.set(word, 1);
            }
        }
    }
    trace!(
        "counted {} unique words in a {} byte chunk",
        counts.len(),
        chunk.len()
    );
    counts
}

pub fn merge(totals: &mut WordCounts, partial: WordCounts) {
    for (word, count) in partial {
        match totals.get_mut(word.as_str()) {
            Some(total) => *total += count,
            None => {
                totals.set(word, count);
            }
        }
    }
}

/// Descending by count, ties in ascending word order.
pub fn ranked(counts: &WordCounts) -> Vec<(String, u64)> {
    let mut results = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect::<Vec<(String, u64)>>();
    results.par_sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    results
}

pub fn write_ranked<W: Write + ?Sized>(w: &mut W, results: &[(String, u64)]) -> io::Result<()> {
    for (word, count) in results {
        writeln!(w, "{} {}", word, count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_single_chunk() {
        let counts = count_chunk(b"The cat\tsat on\nthe MAT the end", TableConfig::default());
        assert_eq!(counts.get("the"), Some(&3));
        assert_eq!(counts.get("mat"), Some(&1));
        assert_eq!(counts.get("The"), None);
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn unicode_words_and_whitespace() {
        let counts = count_chunk(
            "Ÿes ÿes\u{3000}straße  STRASSE".as_bytes(),
            TableConfig::default(),
        );
        assert_eq!(counts.get("ÿes"), Some(&2));
        assert_eq!(counts.get("straße"), Some(&1));
        assert_eq!(counts.get("strasse"), Some(&1));
    }

    #[test]
    fn empty_chunk_counts_nothing() {
        assert!(count_chunk(b" \n\t ", TableConfig::default()).is_empty());
    }

    #[test]
    fn merge_sums_partials() {
        let mut totals = count_chunk(b"a b b", TableConfig::default());
        merge(&mut totals, count_chunk(b"b c", TableConfig::default()));
        assert_eq!(totals.get("a"), Some(&1));
        assert_eq!(totals.get("b"), Some(&3));
        assert_eq!(totals.get("c"), Some(&1));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn ranking_breaks_ties_by_word() {
        let counts = count_chunk(b"pear apple fig apple pear kiwi", TableConfig::default());
        let results = ranked(&counts);
        let expected = [("apple", 2), ("pear", 2), ("fig", 1), ("kiwi", 1)];
        assert_eq!(results.len(), expected.len());
        for ((word, count), (expected_word, expected_count)) in results.iter().zip(expected) {
            assert_eq!(word, expected_word);
            assert_eq!(*count, expected_count);
        }

        let mut out = Vec::new();
        write_ranked(&mut out, &results).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "apple 2\npear 2\nfig 1\nkiwi 1\n"
        );
    }
}
