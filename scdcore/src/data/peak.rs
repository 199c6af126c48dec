use std::fmt;
use std::fmt::{Display, Formatter};
use nalgebra::Vector3;
use serde::{Serialize, Deserialize};

/// Represents a single indexed or un-indexed Bragg peak.
///
/// # Description
///
/// A `PeakRecord` holds the observation of one reflection: the scattering
/// vector in the laboratory frame, the wavelength it was measured at, and the
/// detector and run it came from. Miller indices are optional since peaks are
/// usually collected before indexing has run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PeakRecord {
    pub q_lab: Vector3<f64>,
    pub wavelength: f64,
    pub detector_id: i32,
    pub run_number: i32,
    pub hkl: Option<Vector3<f64>>,
}

impl PeakRecord {
    /// Constructs a new `PeakRecord`.
    ///
    /// # Arguments
    ///
    /// * `q_lab` - The scattering vector in the laboratory frame, in inverse Angstrom.
    /// * `wavelength` - The incident wavelength in Angstrom.
    /// * `detector_id` - The detector the peak was observed on.
    /// * `run_number` - The run the observation belongs to.
    ///
    /// # Panics
    ///
    /// Panics if `wavelength` is not strictly positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    /// use scdcore::data::peak::PeakRecord;
    ///
    /// let peak = PeakRecord::new(Vector3::new(1.0, 0.0, 2.0), 1.5, 12, 4000);
    /// assert_eq!(peak.detector_id, 12);
    /// assert_eq!(peak.hkl, None);
    /// ```
    pub fn new(q_lab: Vector3<f64>, wavelength: f64, detector_id: i32, run_number: i32) -> Self {
        assert!(wavelength > 0.0, "wavelength must be strictly positive, got {}", wavelength);
        PeakRecord {
            q_lab,
            wavelength,
            detector_id,
            run_number,
            hkl: None,
        }
    }

    /// Attaches Miller indices to the peak, consuming and returning it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    /// use scdcore::data::peak::PeakRecord;
    ///
    /// let peak = PeakRecord::new(Vector3::new(1.0, 0.0, 2.0), 1.5, 12, 4000)
    ///     .with_hkl(Vector3::new(1.0, 2.0, -3.0));
    /// assert_eq!(peak.hkl, Some(Vector3::new(1.0, 2.0, -3.0)));
    /// ```
    pub fn with_hkl(mut self, hkl: Vector3<f64>) -> Self {
        self.hkl = Some(hkl);
        self
    }

    /// Returns the modulus of the scattering vector in inverse Angstrom.
    pub fn q_modulus(&self) -> f64 {
        self.q_lab.norm()
    }

    /// Returns the d-spacing of the reflection in Angstrom, `2 * pi / |Q|`.
    ///
    /// Infinite for a zero scattering vector.
    pub fn d_spacing(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.q_modulus()
    }
}

impl Display for PeakRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PeakRecord(run: {}, detector: {}, q: ({:.4}, {:.4}, {:.4}), wavelength: {:.4})",
            self.run_number, self.detector_id, self.q_lab.x, self.q_lab.y, self.q_lab.z, self.wavelength
        )
    }
}
