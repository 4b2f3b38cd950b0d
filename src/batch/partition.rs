//! Round partitioning.
//!
//! Pure functions: they only look at the remaining items and the limits, never
//! past the capacity of a single round.

/// Next round's batches, taken from the front of `remaining` in order.
///
/// At most `parallel_streams` batches, each at most `batch_limit` items. Only the
/// last batch can be short. Returns nothing when either limit is zero.
pub fn next_round<T>(remaining: &[T], batch_limit: usize, parallel_streams: usize) -> Vec<&[T]> {
    if batch_limit == 0 || parallel_streams == 0 {
        return Vec::new();
    }
    remaining.chunks(batch_limit).take(parallel_streams).collect()
}

/// Number of items `next_round` would consume.
pub fn round_len(remaining: usize, batch_limit: usize, parallel_streams: usize) -> usize {
    remaining.min(batch_limit.saturating_mul(parallel_streams))
}

/// Batch sizes per round for a collection of `len` items.
///
/// `plan_rounds(200, 30, 4)` is `[[30, 30, 30, 30], [30, 30, 20]]`.
pub fn plan_rounds(len: usize, batch_limit: usize, parallel_streams: usize) -> Vec<Vec<usize>> {
    let mut rounds = Vec::new();
    if batch_limit == 0 || parallel_streams == 0 {
        return rounds;
    }
    let mut left = len;
    while left > 0 {
        let mut round = Vec::with_capacity(parallel_streams);
        while round.len() < parallel_streams && left > 0 {
            let size = left.min(batch_limit);
            round.push(size);
            left -= size;
        }
        rounds.push(round);
    }
    rounds
}
