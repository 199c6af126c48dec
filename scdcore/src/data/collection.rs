use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use itertools::izip;
use nalgebra::Vector3;
use serde::{Serialize, Deserialize};

use crate::data::peak::PeakRecord;

/// Describes the instrument a set of peaks was collected on.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>) -> Self {
        Instrument { name: name.into() }
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument({})", self.name)
    }
}

/// Represents an ordered set of Bragg peaks sharing one instrument.
///
/// Uses Arc<Instrument> so collections derived from the same measurement share
/// the instrument description instead of copying it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeakCollection {
    pub instrument: Arc<Instrument>,
    pub sample_name: Option<String>,
    pub peaks: Vec<PeakRecord>,
}

impl PeakCollection {
    /// Constructs a new `PeakCollection`.
    ///
    /// # Arguments
    ///
    /// * `instrument` - Shared instrument description for all peaks in the set.
    /// * `peaks` - The peaks, in acquisition order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use scdcore::data::collection::{Instrument, PeakCollection};
    ///
    /// let instrument = Arc::new(Instrument::new("TOPAZ"));
    /// let peaks = PeakCollection::new(instrument, vec![]);
    /// assert!(peaks.is_empty());
    /// ```
    pub fn new(instrument: Arc<Instrument>, peaks: Vec<PeakRecord>) -> Self {
        PeakCollection {
            instrument,
            sample_name: None,
            peaks,
        }
    }

    /// Constructs a `PeakCollection` from parallel column vectors.
    ///
    /// # Arguments
    ///
    /// * `instrument` - Shared instrument description.
    /// * `q_lab` - Scattering vectors in the laboratory frame.
    /// * `wavelengths` - Incident wavelengths in Angstrom.
    /// * `detector_ids` - Detector of each observation.
    /// * `run_numbers` - Run of each observation.
    ///
    /// # Panics
    ///
    /// Panics if the column lengths differ, or if any wavelength is not
    /// strictly positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use nalgebra::Vector3;
    /// use scdcore::data::collection::{Instrument, PeakCollection};
    ///
    /// let instrument = Arc::new(Instrument::new("TOPAZ"));
    /// let peaks = PeakCollection::from_columns(
    ///     instrument,
    ///     vec![Vector3::new(1.0, 0.0, 2.0), Vector3::new(0.5, 0.5, 1.0)],
    ///     vec![1.5, 2.5],
    ///     vec![10, 11],
    ///     vec![4000, 4000],
    /// );
    /// assert_eq!(peaks.len(), 2);
    /// assert_eq!(peaks.get(1).unwrap().wavelength, 2.5);
    /// ```
    pub fn from_columns(
        instrument: Arc<Instrument>,
        q_lab: Vec<Vector3<f64>>,
        wavelengths: Vec<f64>,
        detector_ids: Vec<i32>,
        run_numbers: Vec<i32>,
    ) -> Self {
        assert_eq!(q_lab.len(), wavelengths.len(), "q_lab and wavelengths must have the same length");
        assert_eq!(q_lab.len(), detector_ids.len(), "q_lab and detector_ids must have the same length");
        assert_eq!(q_lab.len(), run_numbers.len(), "q_lab and run_numbers must have the same length");

        let peaks = izip!(q_lab, wavelengths, detector_ids, run_numbers)
            .map(|(q, wavelength, detector_id, run_number)| PeakRecord::new(q, wavelength, detector_id, run_number))
            .collect();

        PeakCollection::new(instrument, peaks)
    }

    /// Sets the sample name, consuming and returning the collection.
    pub fn with_sample(mut self, sample_name: impl Into<String>) -> Self {
        self.sample_name = Some(sample_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PeakRecord> {
        self.peaks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakRecord> {
        self.peaks.iter()
    }

    /// Returns true if `other` shares this collection's instrument instance.
    pub fn same_instrument(&self, other: &PeakCollection) -> bool {
        Arc::ptr_eq(&self.instrument, &other.instrument)
    }

    pub fn filter_ranged(&self, wavelength_min: f64, wavelength_max: f64, d_min: f64, d_max: f64) -> Self {
        let mut peaks: Vec<PeakRecord> = Vec::new();

        for peak in &self.peaks {
            let d = peak.d_spacing();
            if wavelength_min <= peak.wavelength && peak.wavelength <= wavelength_max && d >= d_min && d <= d_max {
                peaks.push(peak.clone());
            }
        }

        PeakCollection {
            instrument: Arc::clone(&self.instrument),
            sample_name: self.sample_name.clone(),
            peaks,
        }
    }

    /// Returns a copy of the collection with Miller indices assigned in order.
    ///
    /// # Panics
    ///
    /// Panics if `hkls` does not have one entry per peak.
    pub fn with_hkls(&self, hkls: &[Vector3<f64>]) -> Self {
        assert_eq!(self.peaks.len(), hkls.len(), "need exactly one hkl per peak");

        let peaks = izip!(self.peaks.iter(), hkls.iter())
            .map(|(peak, hkl)| peak.clone().with_hkl(*hkl))
            .collect();

        PeakCollection {
            instrument: Arc::clone(&self.instrument),
            sample_name: self.sample_name.clone(),
            peaks,
        }
    }
}

impl Display for PeakCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PeakCollection(instrument: {}, sample: {}, peaks: {})",
            self.instrument.name,
            self.sample_name.as_deref().unwrap_or("-"),
            self.peaks.len()
        )
    }
}
