use std::sync::Arc;
use rayon::prelude::*;

use crate::algorithm::matching::peaks_match;
use crate::data::collection::PeakCollection;
use crate::data::peak::PeakRecord;
use crate::error::ParameterError;

/// Checks that a matching tolerance is usable.
///
/// The tolerance has to be strictly positive even for a run that keeps all
/// peaks and never consults it; a parameter set accepted here stays valid when
/// the same run is repeated with matching switched on.
pub fn validate_tolerance(tolerance: f64) -> Result<(), ParameterError> {
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(ParameterError::new(
            "Tolerance",
            format!("must be greater than zero, got {}", tolerance),
        ));
    }
    Ok(())
}

/// Combines two peak collections into a new one.
///
/// The output starts as a copy of `lhs`, in order, and adopts its instrument
/// and sample. With `combine_matching` set to false every `rhs` peak is then
/// appended, also in order. With `combine_matching` set to true an `rhs` peak
/// is appended only if its scattering vector agrees with no peak already in
/// the output on every axis within `tolerance`; an `rhs` peak that agrees with
/// one is dropped and the earlier observation is kept as is.
///
/// # Arguments
///
/// * `lhs` - The collection whose peaks and instrument lead the output.
/// * `rhs` - The collection merged into `lhs`.
/// * `combine_matching` - Drop `rhs` peaks that re-observe a kept peak.
/// * `tolerance` - Per-axis agreement window on Q, in inverse Angstrom.
///
/// # Returns
///
/// The combined collection, or a `ParameterError` when `tolerance` is not
/// strictly positive. Neither input is modified.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use nalgebra::Vector3;
/// use scdcore::algorithm::combine::combine;
/// use scdcore::data::collection::{Instrument, PeakCollection};
/// use scdcore::data::peak::PeakRecord;
///
/// let instrument = Arc::new(Instrument::new("TOPAZ"));
/// let lhs = PeakCollection::new(
///     Arc::clone(&instrument),
///     vec![PeakRecord::new(Vector3::new(1.0, 0.0, 2.0), 1.5, 10, 4000)],
/// );
/// let rhs = PeakCollection::new(
///     Arc::clone(&instrument),
///     vec![PeakRecord::new(Vector3::new(3.0, 0.0, 1.0), 2.5, 11, 4001)],
/// );
///
/// let all = combine(&lhs, &rhs, false, 0.1).unwrap();
/// assert_eq!(all.len(), 2);
/// ```
pub fn combine(
    lhs: &PeakCollection,
    rhs: &PeakCollection,
    combine_matching: bool,
    tolerance: f64,
) -> Result<PeakCollection, ParameterError> {
    validate_tolerance(tolerance)?;
    Ok(merge(lhs, rhs, combine_matching, tolerance))
}

/// Combines many pairs of collections in parallel.
///
/// The tolerance is checked once up front; each pair is then merged with the
/// same mode and tolerance as [`combine`] would use.
pub fn combine_many(
    pairs: &[(PeakCollection, PeakCollection)],
    combine_matching: bool,
    tolerance: f64,
) -> Result<Vec<PeakCollection>, ParameterError> {
    validate_tolerance(tolerance)?;
    Ok(pairs
        .par_iter()
        .map(|(lhs, rhs)| merge(lhs, rhs, combine_matching, tolerance))
        .collect())
}

fn merge(lhs: &PeakCollection, rhs: &PeakCollection, combine_matching: bool, tolerance: f64) -> PeakCollection {
    warn_on_metadata_mismatch(lhs, rhs);

    let mut peaks: Vec<PeakRecord> = Vec::with_capacity(lhs.len() + rhs.len());
    peaks.extend_from_slice(&lhs.peaks);

    if combine_matching {
        for candidate in rhs.iter() {
            // first match wins: test against everything kept so far,
            // including rhs peaks accepted earlier in this pass
            let already_kept = peaks.iter().any(|kept| peaks_match(kept, candidate, tolerance));
            if !already_kept {
                peaks.push(candidate.clone());
            }
        }
    } else {
        peaks.extend_from_slice(&rhs.peaks);
    }

    PeakCollection {
        instrument: Arc::clone(&lhs.instrument),
        sample_name: lhs.sample_name.clone(),
        peaks,
    }
}

fn warn_on_metadata_mismatch(lhs: &PeakCollection, rhs: &PeakCollection) {
    if lhs.instrument.name != rhs.instrument.name {
        log::warn!(
            "combining peak collections from different instruments: `{}` and `{}`",
            lhs.instrument.name,
            rhs.instrument.name
        );
    }
    if let (Some(left), Some(right)) = (&lhs.sample_name, &rhs.sample_name) {
        if left != right {
            log::warn!("combining peak collections from different samples: `{}` and `{}`", left, right);
        }
    }
}
