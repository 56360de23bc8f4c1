//! Worker pool sizing.

use std::num::NonZeroUsize;

/// Upper bound on the number of worker threads.
pub const MAX_POOL_THREADS: usize = 256;

/// Number of cores reported by the operating system, falling back to one.
#[must_use]
pub fn available_cores() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Resolve a requested thread count against the available cores.
///
/// `0` uses every core and a negative value leaves that many cores free.
/// The result always lies in `1..=MAX_POOL_THREADS`.
///
/// # Examples
/// ```
/// use waymerge_data::pool_size;
///
/// assert_eq!(pool_size(0, 8), 8);
/// assert_eq!(pool_size(-2, 8), 6);
/// assert_eq!(pool_size(3, 8), 3);
/// ```
#[must_use]
pub fn pool_size(requested: i32, cores: usize) -> usize {
    let magnitude = usize::try_from(requested.unsigned_abs()).unwrap_or(usize::MAX);
    let size = match requested {
        0 => cores,
        n if n < 0 => cores.saturating_sub(magnitude),
        _ => magnitude,
    };
    size.clamp(1, MAX_POOL_THREADS)
}
