//! ASCII plotting of histogram geometry for terminal output.
//!
//! Fixed-size character grid with deterministic output (golden-testable).
//!
//! Plot elements:
//! - bars: first character of the candidate's hatch pattern
//! - overlapping bars of different candidates: `*`
//! - particle value: `|`
//! - mass at -inf / +inf: `<` / `>` in the bottom corners
//! - single-point candidates: an arrow (`^` over the hatch glyph) as tall as
//!   its mass, instead of a bar

use crate::domain::{HistogramGeometry, InfinitySign};
use crate::math::{lerp, locate_bin, span_fraction};

const OVERLAP: char = '*';
const PARTICLE: char = '|';
const DIRAC_HEAD: char = '^';

/// Render every candidate of `geometry` on one set of axes.
pub fn render_histogram(geometry: &HistogramGeometry, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(4);
    let (x_min, x_max) = (geometry.global_min, geometry.global_max);
    let y_max = geometry.bar_max_density();

    let mut grid = vec![vec![' '; width]; height];

    for (index, bins) in geometry.bins_per_candidate.iter().enumerate() {
        if geometry.dirac_marker(index).is_some() {
            continue;
        }
        let glyph = glyph_for(geometry, index);
        for col in 0..width {
            let x = lerp(x_min, x_max, (col as f64 + 0.5) / width as f64);
            let Some(bin) = locate_bin(&geometry.boundaries, x).and_then(|i| bins.get(i)) else {
                continue;
            };
            let rows = bar_rows(bin.density, y_max, height);
            for row in grid.iter_mut().skip(height - rows) {
                row[col] = match row[col] {
                    ' ' => glyph,
                    c if c == glyph => glyph,
                    _ => OVERLAP,
                };
            }
        }
    }

    for style in &geometry.styles {
        let p = style.particle_value;
        if p >= x_min && p <= x_max {
            let col = map_x(p, x_min, x_max, width);
            for row in grid.iter_mut() {
                row[col] = PARTICLE;
            }
        }
    }

    for marker in &geometry.dirac_markers {
        let col = map_x(marker.position, x_min, x_max, width);
        let rows = ((marker.mass * height as f64).round() as usize).clamp(1, height);
        let glyph = glyph_for(geometry, marker.candidate);
        for (i, row) in grid.iter_mut().skip(height - rows).enumerate() {
            row[col] = if i == 0 { DIRAC_HEAD } else { glyph };
        }
    }

    for note in &geometry.overflow_annotations {
        let col = match note.sign {
            InfinitySign::Negative => 0,
            InfinitySign::Positive => width - 1,
        };
        grid[height - 1][col] = arrow(note.sign);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Histogram: x=[{x_min:.3}, {x_max:.3}] | density=[0, {y_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (index, style) in geometry.styles.iter().enumerate() {
        out.push_str(&format!(
            "  {} {}  E(X)={:.3}\n",
            glyph_for(geometry, index),
            style.label,
            style.particle_value
        ));
    }
    for marker in &geometry.dirac_markers {
        let label = geometry
            .styles
            .get(marker.candidate)
            .map(|s| s.label.as_str())
            .unwrap_or("?");
        out.push_str(&format!(
            "  {DIRAC_HEAD} {label}: point mass {:.1}% at {:.3}\n",
            marker.mass * 100.0,
            marker.position
        ));
    }
    for note in &geometry.overflow_annotations {
        let label = geometry
            .styles
            .get(note.candidate)
            .map(|s| s.label.as_str())
            .unwrap_or("?");
        out.push_str(&format!(
            "  {} {label}: {:.1}% of mass at {}inf\n",
            arrow(note.sign),
            note.mass * 100.0,
            note.sign.symbol()
        ));
    }

    out
}

fn glyph_for(geometry: &HistogramGeometry, index: usize) -> char {
    geometry
        .styles
        .get(index)
        .and_then(|s| s.hatch_pattern.chars().next())
        .unwrap_or('#')
}

fn arrow(sign: InfinitySign) -> char {
    match sign {
        InfinitySign::Negative => '<',
        InfinitySign::Positive => '>',
    }
}

fn bar_rows(density: f64, y_max: f64, height: usize) -> usize {
    if !(y_max > 0.0) || !(density > 0.0) {
        return 0;
    }
    ((density / y_max * height as f64).round() as usize).min(height)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = span_fraction(x_min, x_max, x).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}
