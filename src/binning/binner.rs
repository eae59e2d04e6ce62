//! Reduce distributions to histogram geometry on a shared grid.
//!
//! All candidates are binned against the same boundaries so bars line up and
//! heights compare directly. Densities are mass per unit width, so a
//! candidate's bars integrate to its finite mass.

use tracing::debug;

use crate::binning::palette::style_for;
use crate::domain::{
    CandidateStyle, DiracMarker, DistributionalValue, HistogramBin, HistogramGeometry, InfinitySign, OverflowAnnotation,
    StyleConfig,
};
use crate::error::{DistError, Result};
use crate::math::{density, lin_space, locate_bin, widen_degenerate};

/// Bin `candidates` into `bin_count` equal-width bins spanning every finite
/// position of every candidate.
pub fn bin(candidates: &[DistributionalValue], bin_count: usize, style: &StyleConfig) -> Result<HistogramGeometry> {
    if bin_count < 1 {
        return Err(DistError::configuration("bin count must be >= 1"));
    }
    if candidates.is_empty() {
        return Err(DistError::configuration("nothing to bin: no candidates given"));
    }

    let styles = candidates
        .iter()
        .enumerate()
        .map(|(i, value)| style_for(style, i, value.particle_value()))
        .collect::<Result<Vec<CandidateStyle>>>()?;

    let (min, max) = finite_range(candidates).ok_or(DistError::DegenerateInput)?;
    let (min, max) = widen_degenerate(min, max, bin_count);
    let boundaries = lin_space(min, max, bin_count)?;

    let mut bins_per_candidate = Vec::with_capacity(candidates.len());
    let mut overflow_annotations = Vec::new();
    let mut dirac_markers = Vec::new();
    let mut global_max_density = 0.0f64;

    for (index, value) in candidates.iter().enumerate() {
        let bins = bin_one(value, &boundaries);
        global_max_density = bins.iter().fold(global_max_density, |acc, b| acc.max(b.density));
        bins_per_candidate.push(bins);

        if let [only] = value.deltas() {
            dirac_markers.push(DiracMarker {
                candidate: index,
                position: only.position,
                mass: only.probability_mass,
            });
        }

        for sign in [InfinitySign::Negative, InfinitySign::Positive] {
            let mass = value.infinite_mass(sign);
            if mass > 0.0 {
                overflow_annotations.push(OverflowAnnotation {
                    candidate: index,
                    mass,
                    sign,
                });
            }
        }
    }

    debug!(
        candidates = candidates.len(),
        bin_count,
        min,
        max,
        global_max_density,
        overflows = overflow_annotations.len(),
        "binned distributions"
    );

    Ok(HistogramGeometry {
        boundaries,
        bins_per_candidate,
        styles,
        global_min: min,
        global_max: max,
        global_max_density,
        overflow_annotations,
        dirac_markers,
    })
}

fn finite_range(candidates: &[DistributionalValue]) -> Option<(f64, f64)> {
    candidates
        .iter()
        .filter_map(DistributionalValue::support)
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
}

fn bin_one(value: &DistributionalValue, boundaries: &[f64]) -> Vec<HistogramBin> {
    let mut bins: Vec<HistogramBin> = boundaries
        .windows(2)
        .map(|edge| HistogramBin {
            lower: edge[0],
            upper: edge[1],
            density: 0.0,
        })
        .collect();

    for delta in value.deltas() {
        // Every finite position lies inside the grid by construction.
        if let Some(i) = locate_bin(boundaries, delta.position) {
            bins[i].density += delta.probability_mass;
        }
    }
    for b in &mut bins {
        b.density = density(b.density, b.lower, b.upper);
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiracDelta;

    fn value(particle: f64, records: &[(f64, f64)]) -> DistributionalValue {
        DistributionalValue::from_deltas(particle, records.iter().map(|&(p, m)| DiracDelta::new(p, m))).unwrap()
    }

    #[test]
    fn two_point_mass_into_two_bins() {
        let v = value(2.0, &[(1.0, 0.5), (3.0, 0.5)]);
        let g = bin(&[v], 2, &StyleConfig::default()).unwrap();

        assert_eq!(g.boundaries, vec![1.0, 2.0, 3.0]);
        assert_eq!(g.global_min, 1.0);
        assert_eq!(g.global_max, 3.0);
        let densities: Vec<f64> = g.bins_per_candidate[0].iter().map(|b| b.density).collect();
        assert_eq!(densities, vec![0.5, 0.5]);
        assert_eq!(g.global_max_density, 0.5);
        assert!(g.overflow_annotations.is_empty());
    }

    #[test]
    fn disjoint_candidates_share_one_grid() {
        let a = value(0.5, &[(0.0, 0.5), (1.0, 0.5)]);
        let b = value(10.5, &[(10.0, 0.5), (11.0, 0.5)]);
        let g = bin(&[a, b], 11, &StyleConfig::default()).unwrap();

        assert_eq!(g.boundaries.len(), 12);
        assert_eq!(g.global_min, 0.0);
        assert_eq!(g.global_max, 11.0);
        assert_eq!(g.candidate_count(), 2);
        for i in 2..10 {
            assert_eq!(g.bins_per_candidate[0][i].density, 0.0);
            assert_eq!(g.bins_per_candidate[1][i].density, 0.0);
        }
        assert!((g.bins_per_candidate[0][0].density - 0.5).abs() < 1e-12);
        assert!((g.bins_per_candidate[0][1].density - 0.5).abs() < 1e-12);
        // 10.0 and 11.0 both land in the last, closed bin.
        assert!((g.bins_per_candidate[1][10].density - 1.0).abs() < 1e-12);
    }

    #[test]
    fn infinite_mass_becomes_one_annotation() {
        let v = value(1.0, &[(0.0, 0.3), (1.0, 0.3), (2.0, 0.3), (f64::INFINITY, 0.1)]);
        let g = bin(&[v], 4, &StyleConfig::default()).unwrap();

        assert_eq!(g.overflow_annotations.len(), 1);
        let note = g.overflow_annotations[0];
        assert_eq!(note.candidate, 0);
        assert_eq!(note.sign, InfinitySign::Positive);
        assert!((note.mass - 0.1).abs() < 1e-12);

        let finite: f64 = g.bins_per_candidate[0].iter().map(HistogramBin::mass).sum();
        assert!((finite - 0.9).abs() < 1e-9, "finite mass {finite}");
    }

    #[test]
    fn both_overflow_directions_are_reported() {
        let v = value(0.0, &[(0.0, 0.8), (f64::NEG_INFINITY, 0.15), (f64::INFINITY, 0.05)]);
        let g = bin(&[v], 1, &StyleConfig::default()).unwrap();
        let signs: Vec<InfinitySign> = g.overflow_annotations.iter().map(|n| n.sign).collect();
        assert_eq!(signs, vec![InfinitySign::Negative, InfinitySign::Positive]);
    }

    #[test]
    fn palette_cycles_over_candidates() {
        let style = StyleConfig {
            colors: vec!["c0".to_string(), "c1".to_string()],
            ..StyleConfig::default()
        };
        let values: Vec<DistributionalValue> = (0..5).map(|i| value(i as f64, &[(i as f64, 1.0)])).collect();
        let g = bin(&values, 3, &style).unwrap();
        let colors: Vec<&str> = g.styles.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["c0", "c1", "c0", "c1", "c0"]);
        assert_eq!(g.styles[3].particle_value, 3.0);
    }

    #[test]
    fn single_point_range_is_widened() {
        let v = value(4.0, &[(4.0, 1.0)]);
        let g = bin(&[v], 3, &StyleConfig::default()).unwrap();
        assert!(g.global_min < 4.0 && g.global_max > 4.0);
        assert_eq!(
            g.dirac_markers,
            vec![DiracMarker {
                candidate: 0,
                position: 4.0,
                mass: 1.0
            }]
        );
        let total: f64 = g.bins_per_candidate[0].iter().map(HistogramBin::mass).sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(g.bins_per_candidate[0].iter().all(|b| b.upper > b.lower));
    }

    #[test]
    fn sub_ulp_range_keeps_bins_finite() {
        let next = f64::from_bits(1.0f64.to_bits() + 1);
        let v = value(1.0, &[(1.0, 0.5), (next, 0.5)]);
        let g = bin(&[v], 16, &StyleConfig::default()).unwrap();

        assert!(g.global_min < 1.0 && g.global_max > next);
        assert!(g.global_max_density.is_finite());
        let bins = &g.bins_per_candidate[0];
        assert!(bins.iter().all(|b| b.upper > b.lower && b.density.is_finite()));
        let total: f64 = bins.iter().map(HistogramBin::mass).sum();
        assert!((total - 1.0).abs() < 1e-6, "total mass {total}");
    }

    #[test]
    fn extreme_opposite_positions_bin_without_overflow() {
        let v = value(0.0, &[(-1e308, 0.5), (1e308, 0.5)]);
        let g = bin(&[v], 4, &StyleConfig::default()).unwrap();

        assert_eq!(g.boundaries, vec![-1e308, -5e307, 0.0, 5e307, 1e308]);
        let bins = &g.bins_per_candidate[0];
        assert!(bins[0].density > 0.0 && bins[3].density > 0.0);
        assert_eq!(bins[1].density, 0.0);
        let total: f64 = bins.iter().map(HistogramBin::mass).sum();
        assert!((total - 1.0).abs() < 1e-6, "total mass {total}");

        let whole = bin(&[value(0.0, &[(-f64::MAX, 0.5), (f64::MAX, 0.5)])], 1, &StyleConfig::default()).unwrap();
        let only = whole.bins_per_candidate[0][0];
        assert!(only.density > 0.0);
        assert!((only.mass() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn only_single_delta_candidates_get_dirac_markers() {
        let point = value(2.0, &[(2.0, 0.9), (f64::INFINITY, 0.1)]);
        let spread = value(1.0, &[(0.0, 0.5), (3.0, 0.5)]);
        let g = bin(&[spread, point], 3, &StyleConfig::default()).unwrap();

        assert_eq!(g.dirac_markers.len(), 1);
        let marker = g.dirac_marker(1).unwrap();
        assert_eq!(marker.position, 2.0);
        assert!((marker.mass - 0.9).abs() < 1e-12);
        assert!(g.dirac_marker(0).is_none());
        // The bar scale ignores the point mass's bin.
        assert!((g.bar_max_density() - 0.5).abs() < 1e-12);
        assert!(g.global_max_density > g.bar_max_density());
    }

    #[test]
    fn bins_integrate_to_finite_mass() {
        let v = value(0.0, &[(-1.0, 0.1), (-0.3, 0.2), (0.2, 0.3), (0.7, 0.1), (2.0, 0.3)]);
        let g = bin(&[v], 7, &StyleConfig::default()).unwrap();
        let total: f64 = g.bins_per_candidate[0].iter().map(HistogramBin::mass).sum();
        assert!((total - 1.0).abs() < 1e-9);
        for pair in g.bins_per_candidate[0].windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn no_finite_mass_is_degenerate() {
        let v = value(0.0, &[(f64::INFINITY, 1.0)]);
        assert_eq!(bin(&[v], 4, &StyleConfig::default()).unwrap_err(), DistError::DegenerateInput);
    }

    #[test]
    fn zero_bins_is_a_configuration_error() {
        let v = value(0.0, &[(0.0, 1.0)]);
        assert!(matches!(
            bin(&[v], 0, &StyleConfig::default()),
            Err(DistError::Configuration(_))
        ));
        assert!(matches!(
            bin(&[], 4, &StyleConfig::default()),
            Err(DistError::Configuration(_))
        ));
    }

    #[test]
    fn repeated_binning_is_bit_identical() {
        let values = vec![
            value(0.3, &[(0.1, 0.2), (0.35, 0.5), (0.9, 0.3)]),
            value(0.6, &[(0.2, 0.4), (0.75, 0.5), (f64::NEG_INFINITY, 0.1)]),
        ];
        let first = bin(&values, 9, &StyleConfig::default()).unwrap();
        let second = bin(&values, 9, &StyleConfig::default()).unwrap();

        assert_eq!(first, second);
        let bits = |g: &HistogramGeometry| -> Vec<u64> {
            g.bins_per_candidate
                .iter()
                .flatten()
                .map(|b| b.density.to_bits())
                .chain(g.boundaries.iter().map(|x| x.to_bits()))
                .collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }
}
