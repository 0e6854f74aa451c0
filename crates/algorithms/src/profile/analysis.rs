//! Profile a mask and extract its quantile shape features in one call

use phenomask_core::raster::Mask;
use phenomask_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};

use super::quantile::ShapeStats;
use super::scanline::{ProfileSummary, ScanlineProfile};

/// Parameters for scanline analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanlineAnalysisParams {
    /// Number of horizontal chunks the profiled rows are cut into
    pub quantiles: usize,
}

impl Default for ScanlineAnalysisParams {
    fn default() -> Self {
        Self { quantiles: 4 }
    }
}

impl ScanlineAnalysisParams {
    pub fn validate(&self) -> Result<()> {
        if self.quantiles == 0 {
            return Err(Error::InvalidParameter {
                name: "quantiles",
                value: self.quantiles.to_string(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Aggregates and per-quantile shape statistics of a mask
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanlineReport {
    pub summary: ProfileSummary,
    /// One entry per chunk, top to bottom. Empty when the mask has no
    /// foreground.
    pub quantiles: Vec<ShapeStats>,
}

/// Scanline analysis algorithm
#[derive(Debug, Clone, Default)]
pub struct ScanlineAnalysis;

impl Algorithm for ScanlineAnalysis {
    type Input = Mask;
    type Output = ScanlineReport;
    type Params = ScanlineAnalysisParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ScanlineAnalysis"
    }

    fn description(&self) -> &'static str {
        "Row-profile aggregates and quantile shape statistics of a binary mask"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        scanline_analysis(&input, &params)
    }
}

/// Profile `mask` and compute the shape statistics of every quantile
pub fn scanline_analysis(mask: &Mask, params: &ScanlineAnalysisParams) -> Result<ScanlineReport> {
    params.validate()?;

    let profile = ScanlineProfile::new(mask);
    let quantiles = if profile.is_empty() {
        Vec::new()
    } else {
        profile.quantile_features(params.quantiles)?
    };

    Ok(ScanlineReport {
        summary: profile.summary(),
        quantiles,
    })
}
