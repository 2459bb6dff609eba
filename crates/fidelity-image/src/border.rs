/// Clamp a neighbor coordinate into `[0, len)`.
///
/// Coordinates before the first element map to the first element and coordinates
/// past the last element map to the last one (edge replication). Neighborhoods are
/// never wrapped or zero padded.
///
/// `len` must be greater than zero.
///
/// # Examples
///
/// ```
/// use fidelity_image::border::clamp_index;
///
/// assert_eq!(clamp_index(-2, 5), 0);
/// assert_eq!(clamp_index(3, 5), 3);
/// assert_eq!(clamp_index(7, 5), 4);
/// ```
#[inline]
pub fn clamp_index(index: isize, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        (index as usize).min(len.saturating_sub(1))
    }
}

/// Centered offsets of a kernel with `kernel_len` taps, e.g. `[-1, 0, 1]` for 3 taps.
pub fn kernel_offsets(kernel_len: usize) -> Vec<isize> {
    let half = (kernel_len / 2) as isize;
    (0..kernel_len as isize).map(|i| i - half).collect()
}
