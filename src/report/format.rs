//! Formatted terminal output for decoded distributions and binned geometry.
//!
//! Formatting lives here so decoding and binning stay free of presentation
//! concerns, and output changes stay local.

use crate::domain::{DistributionalValue, HistogramGeometry, InfinitySign};

/// Summary block for one decoded distribution.
pub fn format_value_summary(label: &str, value: &DistributionalValue) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {label} ===\n"));
    out.push_str(&format!("Particle: {:.6}\n", value.particle_value()));
    match value.support() {
        Some((lo, hi)) => out.push_str(&format!("Deltas: n={} | support=[{lo:.6}, {hi:.6}]\n", value.len())),
        None => out.push_str("Deltas: n=0 | support=(none)\n"),
    }
    out.push_str(&format!(
        "Mass: finite={:.6} | -inf={:.6} | +inf={:.6}\n",
        value.finite_mass_total(),
        value.infinite_mass(InfinitySign::Negative),
        value.infinite_mass(InfinitySign::Positive),
    ));
    if let (Some(mean), Some(var)) = (value.mean(), value.variance()) {
        out.push_str(&format!("Mean: {mean:.6} | Std: {:.6}\n", var.sqrt()));
    }

    out
}

/// Table of the finite deltas, at most `max_rows` rows.
pub fn format_delta_table(value: &DistributionalValue, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>5} {:>16} {:>12}", "#", "position", "mass").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<5} {:-<16} {:-<12}", "", "", "").trim_end());
    out.push('\n');

    for (i, d) in value.deltas().iter().take(max_rows).enumerate() {
        out.push_str(&format!("{i:>5} {:>16.6} {:>12.6}\n", d.position, d.probability_mass));
    }
    if value.len() > max_rows {
        out.push_str(&format!("  ... {} more\n", value.len() - max_rows));
    }

    out
}

/// Per-candidate bin table for a binned run.
pub fn format_geometry_summary(geometry: &HistogramGeometry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Bins: n={} | x=[{:.6}, {:.6}] | max density={:.6}\n",
        geometry.bin_count(),
        geometry.global_min,
        geometry.global_max,
        geometry.global_max_density
    ));

    for (index, bins) in geometry.bins_per_candidate.iter().enumerate() {
        let label = geometry.styles.get(index).map(|s| s.label.as_str()).unwrap_or("?");
        out.push_str(&format!("\n{} ({}):\n", truncate(label, 32), index));
        out.push_str(format!("{:>14} {:>14} {:>12}", "lower", "upper", "density").trim_end());
        out.push('\n');
        for b in bins {
            out.push_str(&format!("{:>14.6} {:>14.6} {:>12.6}\n", b.lower, b.upper, b.density));
        }
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::bin;
    use crate::domain::{DiracDelta, StyleConfig};

    fn sample() -> DistributionalValue {
        DistributionalValue::from_deltas(
            2.0,
            vec![
                DiracDelta::new(1.0, 0.45),
                DiracDelta::new(3.0, 0.45),
                DiracDelta::new(f64::INFINITY, 0.1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn value_summary_golden() {
        let txt = format_value_summary("a.bin", &sample());
        let expected = concat!(
            "=== a.bin ===\n",
            "Particle: 2.000000\n",
            "Deltas: n=2 | support=[1.000000, 3.000000]\n",
            "Mass: finite=0.900000 | -inf=0.000000 | +inf=0.100000\n",
            "Mean: 2.000000 | Std: 1.000000\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn delta_table_truncates() {
        let txt = format_delta_table(&sample(), 1);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    #         position         mass");
        assert_eq!(lines[3], "  ... 1 more");
    }

    #[test]
    fn geometry_summary_lists_every_bin() {
        let geometry = bin(&[sample()], 2, &StyleConfig::default()).unwrap();
        let txt = format_geometry_summary(&geometry);
        assert!(txt.starts_with("Bins: n=2 | x=[1.000000, 3.000000] | max density=0.450000\n"));
        assert!(txt.contains("\n#0 (0):\n"));
        assert_eq!(txt.lines().filter(|l| l.ends_with(" 0.450000")).count(), 2);
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("short", 8), "short");
        assert_eq!(truncate("a-very-long-label", 8), "a-very-.");
    }
}
