use num_traits::Float;

/// Returns the median from a sorted slice
///
/// # Arguments
///
/// * `ss` - The sorted slice
///
/// # Returns
///
/// * `Option<T>` - The median, averaging the two middle values on even length,
///   or `None` if the slice is empty
#[inline]
pub fn median_from_sorted_slice<T: Float>(ss: &[T]) -> Option<T> {
    let len = ss.len();
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    let _2 = T::one() + T::one();
    if len % 2 == 0 {
        Some((ss[mid - 1] + ss[mid]) / _2)
    } else {
        Some(ss[mid])
    }
}
