//! Decode-then-bin workflow behind `dhist plot`.
//!
//! Kept apart from `app` so the printing code only deals with presentation.

use tracing::debug;

use crate::domain::{DistributionalValue, HistogramGeometry, PlotConfig};
use crate::error::AppError;

/// Computed outputs of a single `dhist plot` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub values: Vec<DistributionalValue>,
    pub geometry: HistogramGeometry,
}

/// Read every payload named in `config` and bin them on shared axes.
pub fn run_plot(config: &PlotConfig) -> Result<RunOutput, AppError> {
    let values = crate::io::read_payloads(&config.payloads, config.framed)?;
    run_plot_with_values(config, values)
}

/// Bin already decoded values with the settings in `config`.
pub fn run_plot_with_values(config: &PlotConfig, values: Vec<DistributionalValue>) -> Result<RunOutput, AppError> {
    let geometry = crate::binning::bin(&values, config.bin_count, &config.style)?;
    debug!(
        candidates = geometry.candidate_count(),
        bins = geometry.bin_count(),
        max_density = geometry.global_max_density,
        "binned payloads"
    );
    Ok(RunOutput { values, geometry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiracDelta, StyleConfig};

    fn config(bin_count: usize) -> PlotConfig {
        PlotConfig {
            payloads: Vec::new(),
            framed: false,
            bin_count,
            style: StyleConfig::default(),
            plot_width: 40,
            plot_height: 10,
            svg: None,
            export: None,
        }
    }

    #[test]
    fn bins_decoded_values() {
        let value =
            DistributionalValue::from_deltas(0.5, [DiracDelta::new(0.0, 0.5), DiracDelta::new(1.0, 0.5)]).unwrap();
        let run = run_plot_with_values(&config(2), vec![value]).unwrap();
        assert_eq!(run.values.len(), 1);
        assert_eq!(run.geometry.bin_count(), 2);
        assert_eq!(run.geometry.candidate_count(), 1);
    }

    #[test]
    fn zero_bins_maps_to_configuration_exit_code() {
        let value = DistributionalValue::from_deltas(1.0, [DiracDelta::new(1.0, 1.0)]).unwrap();
        let err = run_plot_with_values(&config(0), vec![value]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
