use crate::data_count::DataCount;
use crate::sort::merge_sort;
use std::fmt::Display;
use std::io::{self, Write};

fn print_word_counts<K: Display, W: Write>(out: &mut W, counts: &[DataCount<K>]) -> io::Result<()> {
    for dc in counts {
        writeln!(out, "{} {}", dc.count, dc.key)?;
    }
    Ok(())
}

/// Prints the counts by descending frequency, then lexicographically.
///
/// The frequency view is two stable passes: key ascending first, then count
/// descending, so equal counts keep their lexicographic order.
pub fn frequency_report<K: Ord + Display, W: Write>(
    out: &mut W,
    mut counts: Vec<DataCount<K>>,
) -> io::Result<()> {
    merge_sort(&mut counts, |a, b| a.key.cmp(&b.key));
    merge_sort(&mut counts, |a, b| b.count.cmp(&a.count));

    writeln!(out, "Ordered by Frequency:")?;
    print_word_counts(out, &counts)?;

    merge_sort(&mut counts, |a, b| a.key.cmp(&b.key));

    writeln!(out)?;
    writeln!(out, "Ordered Lexicographically:")?;
    print_word_counts(out, &counts)
}

pub fn unique_report<W: Write>(out: &mut W, unique_words: usize) -> io::Result<()> {
    writeln!(out, "Unique words: {}", unique_words)
}
