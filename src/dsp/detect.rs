/// Bin indices whose amplitude reaches the threshold, in ascending order.
///
/// Inclusive comparison: a bin exactly at the threshold counts. The DC bin
/// (index 0) is not special-cased here — it usually dwarfs the tonal content
/// and would clear any sensible threshold, so callers that don't want it
/// skip it themselves.
///
/// Ordering is by index only. Callers wanting "loudest first" sort by
/// amplitude afterwards.
pub fn above_threshold(spectrum: &[f32], threshold: f32) -> Vec<usize> {
    spectrum
        .iter()
        .enumerate()
        .filter(|(_, &amp)| amp >= threshold)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_indices_in_ascending_order() {
        let spectrum = [0.0, 5.0, 40000.0, 2.0, 31000.0];
        assert_eq!(above_threshold(&spectrum, 30000.0), vec![2, 4]);
    }

    #[test]
    fn comparison_is_inclusive() {
        let spectrum = [1.0, 2.0, 3.0];
        assert_eq!(above_threshold(&spectrum, 2.0), vec![1, 2]);
    }

    #[test]
    fn dc_bin_is_not_special_cased() {
        let spectrum = [100.0, 0.0, 50.0];
        assert_eq!(above_threshold(&spectrum, 10.0), vec![0, 2]);
    }

    #[test]
    fn nothing_over_threshold() {
        let spectrum = [1.0, 2.0, 3.0];
        assert!(above_threshold(&spectrum, 10.0).is_empty());
    }

    #[test]
    fn empty_spectrum() {
        assert!(above_threshold(&[], 0.0).is_empty());
    }
}
