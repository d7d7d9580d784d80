//! Pure reduce function for partial counts

/// Pure: Sum the partial counts collected for one word
///
/// An empty list sums to zero.
///
/// # Examples
///
/// ```
/// use tally::mapreduce::pure::reduce::reduce_counts;
///
/// assert_eq!(reduce_counts(&[1, 1, 1]), 3);
/// assert_eq!(reduce_counts(&[]), 0);
/// ```
pub fn reduce_counts(values: &[u64]) -> u64 {
    values.iter().sum()
}
