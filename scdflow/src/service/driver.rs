use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use scdcore::algorithm::combine::combine;
use scdcore::error::ParameterError;

use crate::service::params::CombineParams;
use crate::service::registry::WorkspaceStore;

/// Everything that can stop a combine run.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("no peak collection named `{0}` in the workspace store")]
    WorkspaceNotFound(String),
}

/// Summary of one finished combine run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CombineReport {
    pub lhs_workspace: String,
    pub rhs_workspace: String,
    pub output_workspace: String,
    pub combine_matching: bool,
    pub tolerance: f64,
    pub lhs_peaks: usize,
    pub rhs_peaks: usize,
    pub output_peaks: usize,
    pub absorbed_peaks: usize,
}

impl Display for CombineReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "combined `{}` ({} peaks) and `{}` ({} peaks) into `{}` ({} peaks, {} absorbed)",
            self.lhs_workspace,
            self.lhs_peaks,
            self.rhs_workspace,
            self.rhs_peaks,
            self.output_workspace,
            self.output_peaks,
            self.absorbed_peaks
        )
    }
}

/// Runs one combine: resolves both inputs from `store`, merges them and
/// registers the result under the output name, replacing any previous entry.
///
/// Inputs are resolved first; the merge re-checks the tolerance before any
/// peaks are read.
pub fn run_combine<S: WorkspaceStore>(store: &mut S, params: &CombineParams) -> Result<CombineReport, FlowError> {
    let lhs = store
        .get(&params.lhs_workspace)
        .ok_or_else(|| FlowError::WorkspaceNotFound(params.lhs_workspace.clone()))?;
    let rhs = store
        .get(&params.rhs_workspace)
        .ok_or_else(|| FlowError::WorkspaceNotFound(params.rhs_workspace.clone()))?;

    if let Ok(text) = params.to_json() {
        log::debug!("running combine with parameters {}", text);
    }

    let output = combine(&lhs, &rhs, params.combine_matching, params.tolerance())?;

    let report = CombineReport {
        lhs_workspace: params.lhs_workspace.clone(),
        rhs_workspace: params.rhs_workspace.clone(),
        output_workspace: params.output_workspace.clone(),
        combine_matching: params.combine_matching,
        tolerance: params.tolerance(),
        lhs_peaks: lhs.len(),
        rhs_peaks: rhs.len(),
        output_peaks: output.len(),
        absorbed_peaks: rhs.len() - (output.len() - lhs.len()),
    };

    store.insert(&params.output_workspace, output);
    log::info!("{}", report);

    Ok(report)
}
