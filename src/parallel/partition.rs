//! Balanced contiguous partitioning of work items

use crate::error::{Result, SymtabError};

/// Split `items` into exactly `n` contiguous chunks whose sizes differ by at
/// most one, larger chunks first.
///
/// With `L = items.len()`, the first `L % n` chunks hold `L / n + 1` items and
/// the rest hold `L / n`. When `n > L` the trailing chunks are empty. Chunks
/// borrow from `items`; concatenating them in order gives `items` back.
///
/// # Errors
/// `DegenerateWorkerCount` when `n` is zero.
pub fn chunkify<T>(items: &[T], n: usize) -> Result<Vec<&[T]>> {
    if n == 0 {
        return Err(SymtabError::DegenerateWorkerCount { workers: n });
    }

    let size = items.len() / n;
    let remainder = items.len() % n;
    let chunks = (0..n)
        .map(|i| {
            let start = i * size + i.min(remainder);
            let end = (i + 1) * size + (i + 1).min(remainder);
            &items[start..end]
        })
        .collect();
    Ok(chunks)
}

/// Index of each chunk's first item in the original sequence
pub fn chunk_offsets<T>(chunks: &[&[T]]) -> Vec<usize> {
    chunks
        .iter()
        .scan(0, |offset, chunk| {
            let start = *offset;
            *offset += chunk.len();
            Some(start)
        })
        .collect()
}
