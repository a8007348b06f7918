//! Sliding-window combination of per-batch frequency tables.
//!
//! OCR error patterns and vocabulary drift slowly across the decades of a
//! periodical, so "is this spelling frequent in-corpus" is asked against a
//! local temporal context rather than the whole corpus or a single batch.

use crate::frequency::table::FrequencyTable;

/// Combine the tables of a symmetric window of `radius` batches around
/// `index` into one. At the corpus boundaries the window is shifted rather
/// than shrunk, so it always covers `min(2 * radius + 1, tables.len())`
/// batches.
pub fn combine_window(tables: &[FrequencyTable], index: usize, radius: usize) -> FrequencyTable {
    let total = tables.len();
    if total == 0 {
        return FrequencyTable::new();
    }

    let span = 2 * radius as isize + 1;
    let mut start = index as isize - radius as isize;
    let mut end = index as isize + radius as isize + 1;
    if start < 0 {
        start = 0;
        end = span;
    }
    if end > total as isize {
        end = total as isize;
        start = (end - span).max(0);
    }

    let mut combined = FrequencyTable::new();
    for table in &tables[start as usize..end as usize] {
        combined.merge(table);
    }
    combined
}
