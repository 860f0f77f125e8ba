use super::DspError;

/// Slice a recording into fixed-size, non-overlapping analysis groups.
///
/// Every group has exactly `group_size` samples; the trailing remainder
/// (`samples.len() % group_size`) is dropped, never zero-padded, so every
/// group feeds the transform the same geometry. A recording shorter than one
/// group yields zero groups — valid, the caller decides whether that is a
/// problem.
///
/// Groups borrow from the input; nothing is copied.
pub fn segment(samples: &[f32], group_size: usize) -> Result<Vec<&[f32]>, DspError> {
    if group_size == 0 {
        return Err(DspError::InvalidArgument(
            "group size must be positive".into(),
        ));
    }
    if samples.is_empty() {
        return Err(DspError::EmptyInput("no samples to segment".into()));
    }

    let groups: Vec<&[f32]> = samples.chunks_exact(group_size).collect();

    tracing::debug!(
        samples = samples.len(),
        group_size,
        groups = groups.len(),
        dropped = samples.len() % group_size,
        "segmented recording"
    );

    Ok(groups)
}
