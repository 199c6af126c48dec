use nalgebra::Vector3;

use crate::data::peak::PeakRecord;

/// Component-wise closeness test for two laboratory-frame scattering vectors.
///
/// Two vectors agree when the absolute difference on every axis is at most
/// `tolerance`. The differences are raw, not scaled by the vector magnitudes;
/// the tolerance is an absolute window in inverse Angstrom. A NaN component
/// or a NaN tolerance never agrees.
pub fn q_within_tolerance(a: &Vector3<f64>, b: &Vector3<f64>, tolerance: f64) -> bool {
    let delta = a - b;
    delta.iter().all(|component| component.abs() <= tolerance)
}

/// Decides whether two peaks record the same reflection.
///
/// Only the scattering vectors take part in the decision; wavelength, detector
/// and run metadata may differ between two observations of one reflection.
pub fn peaks_match(a: &PeakRecord, b: &PeakRecord, tolerance: f64) -> bool {
    q_within_tolerance(&a.q_lab, &b.q_lab, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_needs_every_axis() {
        let reference = Vector3::new(1.0, 2.0, 3.0);

        assert!(q_within_tolerance(&reference, &Vector3::new(1.05, 1.95, 3.05), 0.1));
        // one axis out is enough to reject, wherever it is
        assert!(!q_within_tolerance(&reference, &Vector3::new(1.2, 2.0, 3.0), 0.1));
        assert!(!q_within_tolerance(&reference, &Vector3::new(1.0, 2.2, 3.0), 0.1));
        assert!(!q_within_tolerance(&reference, &Vector3::new(1.0, 2.0, 3.2), 0.1));
    }

    #[test]
    fn test_difference_exactly_at_tolerance_agrees() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(1.5, 0.0, 0.0);
        assert!(q_within_tolerance(&a, &b, 0.5));
    }

    #[test]
    fn test_differences_are_not_scaled_by_magnitude() {
        // same relative error, very different absolute error
        let tolerance = 0.05;
        assert!(q_within_tolerance(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(1.01, 0.0, 0.0),
            tolerance
        ));
        assert!(!q_within_tolerance(
            &Vector3::new(100.0, 0.0, 0.0),
            &Vector3::new(101.0, 0.0, 0.0),
            tolerance
        ));
    }

    #[test]
    fn test_nan_never_agrees() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let poisoned = Vector3::new(1.0, f64::NAN, 3.0);
        assert!(!q_within_tolerance(&a, &poisoned, 0.1));
        assert!(!q_within_tolerance(&a, &a, f64::NAN));
    }

    #[test]
    fn test_peak_metadata_is_ignored() {
        let a = PeakRecord::new(Vector3::new(1.0, 2.0, 3.0), 0.5, 10, 4000);
        let b = PeakRecord::new(Vector3::new(1.02, 2.0, 2.98), 2.5, 99, 7777);
        assert!(peaks_match(&a, &b, 0.05));
    }
}
