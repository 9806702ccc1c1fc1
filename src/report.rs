//! Print the ranking
use std::io::{self, Write};
use topk::RankedEntry;

/// Write the header and one `word: count` line per entry.
///
/// `requested` is what the user asked for, which may be more than there are entries (or
/// negative, in which case there are none).
pub fn write_report<W: Write>(out: &mut W, requested: i64, ranking: &[RankedEntry]) -> io::Result<()> {
    writeln!(out, "Top {} words by frequency:", requested)?;
    for entry in ranking {
        writeln!(out, "{}: {}", entry.token, entry.count)?;
    }
    out.flush()
}
