//! Shared domain types.
//!
//! Decoded distributions are immutable once built: every constructor funnels
//! through [`DistributionalValue::from_deltas`], which enforces ordering,
//! uniqueness and the unit-mass invariant.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DistError, Result, ValidationReason};

/// Allowed deviation of the total probability mass from 1.0.
pub const MASS_TOLERANCE: f64 = 1e-6;

/// A point mass: `probability_mass` located at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiracDelta {
    pub position: f64,
    pub probability_mass: f64,
}

impl DiracDelta {
    pub fn new(position: f64, probability_mass: f64) -> Self {
        Self {
            position,
            probability_mass,
        }
    }
}

/// Direction of mass that saturated to an infinite position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfinitySign {
    Negative,
    Positive,
}

impl InfinitySign {
    pub fn symbol(self) -> char {
        match self {
            InfinitySign::Negative => '-',
            InfinitySign::Positive => '+',
        }
    }
}

/// A finite mixture of Dirac deltas plus mass at ±∞.
///
/// `deltas` only holds finite positions, strictly ascending. Mass that the
/// producer saturated to ±∞ is kept per sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionalValue {
    particle_value: f64,
    deltas: Vec<DiracDelta>,
    finite_mass_total: f64,
    positive_infinite_mass: f64,
    negative_infinite_mass: f64,
}

impl DistributionalValue {
    /// Build a value from deltas in any order, including infinite positions.
    ///
    /// Deltas sharing a bit-identical position are merged. Negative zero is
    /// folded into positive zero before merging.
    pub fn from_deltas<I>(particle_value: f64, deltas: I) -> Result<Self>
    where
        I: IntoIterator<Item = DiracDelta>,
    {
        if particle_value.is_nan() {
            return Err(DistError::Validation(ValidationReason::NonFiniteParticle));
        }

        let iter = deltas.into_iter();
        let mut finite = Vec::with_capacity(iter.size_hint().0);
        let mut positive_infinite_mass = 0.0;
        let mut negative_infinite_mass = 0.0;
        let mut seen = 0usize;

        for (index, delta) in iter.enumerate() {
            seen += 1;
            let DiracDelta {
                position,
                probability_mass: mass,
            } = delta;

            if position.is_nan() || !mass.is_finite() {
                return Err(DistError::Validation(ValidationReason::NonFinite { index }));
            }
            if mass < 0.0 {
                return Err(DistError::Validation(ValidationReason::NegativeMass { index, mass }));
            }

            if position == f64::INFINITY {
                positive_infinite_mass += mass;
            } else if position == f64::NEG_INFINITY {
                negative_infinite_mass += mass;
            } else {
                let position = if position == 0.0 { 0.0 } else { position };
                finite.push(DiracDelta::new(position, mass));
            }
        }

        if seen == 0 {
            return Err(DistError::Validation(ValidationReason::EmptyDistribution));
        }

        finite.sort_unstable_by(|a, b| a.position.total_cmp(&b.position));
        // `dedup_by` hands us (later, kept) pairs; fold the later mass into the kept one.
        finite.dedup_by(|later, kept| {
            if later.position.to_bits() == kept.position.to_bits() {
                kept.probability_mass += later.probability_mass;
                true
            } else {
                false
            }
        });

        let finite_mass_total: f64 = finite.iter().map(|d| d.probability_mass).sum();
        let total = finite_mass_total + positive_infinite_mass + negative_infinite_mass;
        if (total - 1.0).abs() > MASS_TOLERANCE {
            return Err(DistError::Validation(ValidationReason::MassInvariant { total }));
        }

        Ok(Self {
            particle_value,
            deltas: finite,
            finite_mass_total,
            positive_infinite_mass,
            negative_infinite_mass,
        })
    }

    pub fn particle_value(&self) -> f64 {
        self.particle_value
    }

    /// Finite deltas, strictly ascending by position.
    pub fn deltas(&self) -> &[DiracDelta] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// True when every unit of mass sits at ±∞.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn finite_mass_total(&self) -> f64 {
        self.finite_mass_total
    }

    pub fn infinite_mass_total(&self) -> f64 {
        self.positive_infinite_mass + self.negative_infinite_mass
    }

    pub fn infinite_mass(&self, sign: InfinitySign) -> f64 {
        match sign {
            InfinitySign::Negative => self.negative_infinite_mass,
            InfinitySign::Positive => self.positive_infinite_mass,
        }
    }

    /// Smallest and largest finite position.
    pub fn support(&self) -> Option<(f64, f64)> {
        let first = self.deltas.first()?;
        let last = self.deltas.last()?;
        Some((first.position, last.position))
    }

    /// Mean of the finite part, normalised by the finite mass.
    pub fn mean(&self) -> Option<f64> {
        if self.finite_mass_total <= 0.0 {
            return None;
        }
        let weighted: f64 = self
            .deltas
            .iter()
            .map(|d| d.position * d.probability_mass)
            .sum();
        Some(weighted / self.finite_mass_total)
    }

    /// Variance of the finite part, normalised by the finite mass.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let weighted: f64 = self
            .deltas
            .iter()
            .map(|d| {
                let dx = d.position - mean;
                dx * dx * d.probability_mass
            })
            .sum();
        Some(weighted / self.finite_mass_total)
    }
}

/// One histogram bar: `density` is accumulated mass divided by `upper - lower`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub density: f64,
}

impl HistogramBin {
    /// `upper - lower`; infinite when the bin spans more than `f64::MAX`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Probability mass represented by the bar.
    pub fn mass(&self) -> f64 {
        let width = self.width();
        if width.is_finite() {
            self.density * width
        } else {
            self.density * (self.upper / 2.0 - self.lower / 2.0) * 2.0
        }
    }
}

/// A distribution together with the styling it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: DistributionalValue,
    pub color: String,
    pub hatch_pattern: String,
    pub label: String,
}

/// Styling attached to a candidate inside [`HistogramGeometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStyle {
    pub label: String,
    pub color: String,
    pub hatch_pattern: String,
    pub particle_value: f64,
}

/// Mass a candidate lost to ±∞, for an out-of-range marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverflowAnnotation {
    pub candidate: usize,
    pub mass: f64,
    pub sign: InfinitySign,
}

/// A candidate whose finite mass sits on one position. Renderers draw it as
/// an arrow of height `mass` instead of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiracMarker {
    pub candidate: usize,
    pub position: f64,
    pub mass: f64,
}

/// Everything a renderer needs to draw one or more histograms on shared axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramGeometry {
    /// `bin_count + 1` ascending edges shared by every candidate.
    pub boundaries: Vec<f64>,
    /// Indexed by candidate position in the input.
    pub bins_per_candidate: Vec<Vec<HistogramBin>>,
    pub styles: Vec<CandidateStyle>,
    pub global_min: f64,
    pub global_max: f64,
    pub global_max_density: f64,
    pub overflow_annotations: Vec<OverflowAnnotation>,
    pub dirac_markers: Vec<DiracMarker>,
}

impl HistogramGeometry {
    pub fn bin_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    pub fn candidate_count(&self) -> usize {
        self.bins_per_candidate.len()
    }

    pub fn dirac_marker(&self, candidate: usize) -> Option<&DiracMarker> {
        self.dirac_markers.iter().find(|m| m.candidate == candidate)
    }

    /// Largest density among candidates drawn as bars. Falls back to
    /// `global_max_density` when every candidate is a Dirac marker.
    pub fn bar_max_density(&self) -> f64 {
        let max = self
            .bins_per_candidate
            .iter()
            .enumerate()
            .filter(|(i, _)| self.dirac_marker(*i).is_none())
            .flat_map(|(_, bins)| bins.iter().map(|b| b.density))
            .fold(0.0f64, f64::max);
        if max > 0.0 { max } else { self.global_max_density }
    }
}

/// Palettes and labels applied to candidates.
///
/// Colours and hatch patterns cycle when there are more candidates than
/// entries. Colours are `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub colors: Vec<String>,
    pub hatch_patterns: Vec<String>,
    pub labels: Vec<String>,
    pub particle_color: String,
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                "#3366CC".to_string(),
                "#DC3912".to_string(),
                "#109618".to_string(),
                "#FF990080".to_string(),
            ],
            hatch_patterns: vec!["#".to_string(), "=".to_string(), "+".to_string(), "%".to_string()],
            labels: Vec::new(),
            particle_color: "#FF00FF".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

/// A full `dhist plot` run's configuration, derived from CLI flags, `.env`
/// and defaults.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub payloads: Vec<PathBuf>,
    pub framed: bool,
    pub bin_count: usize,
    pub style: StyleConfig,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg: Option<PathBuf>,
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_duplicate_positions_and_sorts() {
        let value = DistributionalValue::from_deltas(
            2.0,
            vec![
                DiracDelta::new(3.0, 0.25),
                DiracDelta::new(1.0, 0.25),
                DiracDelta::new(3.0, 0.5),
            ],
        )
        .unwrap();

        assert_eq!(
            value.deltas(),
            &[DiracDelta::new(1.0, 0.25), DiracDelta::new(3.0, 0.75)]
        );
        assert_eq!(value.particle_value(), 2.0);
        assert!((value.finite_mass_total() - 1.0).abs() < 1e-12);
        assert_eq!(value.infinite_mass_total(), 0.0);
    }

    #[test]
    fn negative_zero_merges_with_zero() {
        let value = DistributionalValue::from_deltas(
            0.0,
            vec![DiracDelta::new(-0.0, 0.5), DiracDelta::new(0.0, 0.5)],
        )
        .unwrap();
        assert_eq!(value.len(), 1);
        assert_eq!(value.deltas()[0].position.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn infinite_positions_are_split_by_sign() {
        let value = DistributionalValue::from_deltas(
            1.0,
            vec![
                DiracDelta::new(1.0, 0.7),
                DiracDelta::new(f64::INFINITY, 0.2),
                DiracDelta::new(f64::NEG_INFINITY, 0.1),
            ],
        )
        .unwrap();
        assert_eq!(value.len(), 1);
        assert!((value.infinite_mass(InfinitySign::Positive) - 0.2).abs() < 1e-12);
        assert!((value.infinite_mass(InfinitySign::Negative) - 0.1).abs() < 1e-12);
        assert!((value.infinite_mass_total() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_mass() {
        let err = DistributionalValue::from_deltas(0.0, vec![DiracDelta::new(1.0, -0.5)]).unwrap_err();
        assert!(matches!(
            err,
            DistError::Validation(ValidationReason::NegativeMass { index: 0, .. })
        ));

        let err = DistributionalValue::from_deltas(0.0, vec![DiracDelta::new(1.0, 0.5)]).unwrap_err();
        assert!(matches!(err, DistError::Validation(ValidationReason::MassInvariant { .. })));

        let err = DistributionalValue::from_deltas(0.0, vec![DiracDelta::new(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, DistError::Validation(ValidationReason::NonFinite { index: 0 })));

        let err = DistributionalValue::from_deltas(0.0, Vec::new()).unwrap_err();
        assert_eq!(err, DistError::Validation(ValidationReason::EmptyDistribution));
    }

    #[test]
    fn moments_use_finite_mass_only() {
        let value = DistributionalValue::from_deltas(
            0.0,
            vec![
                DiracDelta::new(1.0, 0.25),
                DiracDelta::new(3.0, 0.25),
                DiracDelta::new(f64::INFINITY, 0.5),
            ],
        )
        .unwrap();
        assert!((value.mean().unwrap() - 2.0).abs() < 1e-12);
        assert!((value.variance().unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(value.support(), Some((1.0, 3.0)));
    }

    #[test]
    fn all_infinite_value_has_no_support() {
        let value =
            DistributionalValue::from_deltas(0.0, vec![DiracDelta::new(f64::INFINITY, 1.0)]).unwrap();
        assert!(value.is_empty());
        assert_eq!(value.support(), None);
        assert_eq!(value.mean(), None);
    }
}
