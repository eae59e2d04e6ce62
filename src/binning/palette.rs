//! Cyclic palette assignment.

use crate::domain::{Candidate, CandidateStyle, DistributionalValue, StyleConfig};
use crate::error::{DistError, Result};

/// Entry `index mod len` of `palette`.
pub fn cycle<T>(palette: &[T], index: usize) -> Option<&T> {
    if palette.is_empty() {
        None
    } else {
        palette.get(index % palette.len())
    }
}

/// Style for candidate `index`. Missing labels fall back to `#<index>`.
pub fn style_for(style: &StyleConfig, index: usize, particle_value: f64) -> Result<CandidateStyle> {
    let color = cycle(&style.colors, index)
        .ok_or_else(|| DistError::configuration("colour palette is empty"))?;
    let hatch_pattern = cycle(&style.hatch_patterns, index)
        .ok_or_else(|| DistError::configuration("hatch palette is empty"))?;
    let label = style
        .labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("#{index}"));

    Ok(CandidateStyle {
        label,
        color: color.clone(),
        hatch_pattern: hatch_pattern.clone(),
        particle_value,
    })
}

/// Pair each value with its styling, in input order.
pub fn assign_candidates(values: Vec<DistributionalValue>, style: &StyleConfig) -> Result<Vec<Candidate>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let CandidateStyle {
                label,
                color,
                hatch_pattern,
                ..
            } = style_for(style, index, value.particle_value())?;
            Ok(Candidate {
                value,
                color,
                hatch_pattern,
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiracDelta;

    #[test]
    fn cycle_wraps_in_order() {
        let palette = ["c0", "c1"];
        let picked: Vec<&str> = (0..5).map(|i| *cycle(&palette, i).unwrap()).collect();
        assert_eq!(picked, vec!["c0", "c1", "c0", "c1", "c0"]);
        assert!(cycle::<&str>(&[], 3).is_none());
    }

    #[test]
    fn labels_fall_back_to_index() {
        let style = StyleConfig {
            labels: vec!["a".to_string()],
            ..StyleConfig::default()
        };
        assert_eq!(style_for(&style, 0, 1.0).unwrap().label, "a");
        assert_eq!(style_for(&style, 1, 1.0).unwrap().label, "#1");
    }

    #[test]
    fn empty_palette_is_a_configuration_error() {
        let style = StyleConfig {
            colors: Vec::new(),
            ..StyleConfig::default()
        };
        assert!(matches!(style_for(&style, 0, 0.0), Err(DistError::Configuration(_))));
    }

    #[test]
    fn candidates_keep_input_order() {
        let values: Vec<DistributionalValue> = (0..3)
            .map(|i| DistributionalValue::from_deltas(i as f64, vec![DiracDelta::new(i as f64, 1.0)]).unwrap())
            .collect();
        let style = StyleConfig {
            colors: vec!["#000000".to_string(), "#FFFFFF".to_string()],
            ..StyleConfig::default()
        };
        let candidates = assign_candidates(values, &style).unwrap();
        let colors: Vec<&str> = candidates.iter().map(|c| c.color.as_str()).collect();
        assert_eq!(colors, vec!["#000000", "#FFFFFF", "#000000"]);
        assert_eq!(candidates[2].value.particle_value(), 2.0);
        assert_eq!(candidates[2].label, "#2");
    }
}
