//! SVG histogram rendering with Plotters.
//!
//! Only shapes are drawn (bars, particle markers, overflow bars); Plotters is
//! built without font support, so axis text stays with the ASCII renderer.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::domain::{HistogramGeometry, InfinitySign, StyleConfig};
use crate::error::AppError;
use crate::math::span_fraction;
use crate::plot::color::{parse_color, Rgb};

/// Fraction of the x range used for the overflow bars at either edge.
const OVERFLOW_BAR_FRACTION: f64 = 0.02;

/// Shaft width of a point-mass arrow, as a fraction of the x range.
const DIRAC_WIDTH_FRACTION: f64 = 0.012;

/// Write `geometry` to an SVG file.
pub fn write_svg(
    path: &Path,
    geometry: &HistogramGeometry,
    style: &StyleConfig,
    size: (u32, u32),
) -> Result<(), AppError> {
    let background = parse_color(&style.background, Rgb::WHITE)?;
    let particle = parse_color(&style.particle_color, background)?;
    let fills = geometry
        .styles
        .iter()
        .map(|s| parse_color(&s.color, background))
        .collect::<Result<Vec<Rgb>, _>>()?;

    draw(path, geometry, size, background, particle, &fills)
        .map_err(|e| AppError::new(2, format!("Failed to render SVG '{}': {e}", path.display())))
}

fn draw(
    path: &Path,
    geometry: &HistogramGeometry,
    size: (u32, u32),
    background: Rgb,
    particle: Rgb,
    fills: &[Rgb],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&rgb(background))?;

    // The x axis is drawn in fractions of [x0, x1] so ranges wider than
    // `f64::MAX` still map to finite coordinates.
    let half_span = geometry.global_max / 2.0 - geometry.global_min / 2.0;
    let pad = half_span * OVERFLOW_BAR_FRACTION * 4.0;
    let x0 = (geometry.global_min - pad).max(-f64::MAX);
    let x1 = (geometry.global_max + pad).min(f64::MAX);
    let fx = |x: f64| span_fraction(x0, x1, x);

    let y_max = geometry.bar_max_density();
    let y1 = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root).margin(10).build_cartesian_2d(0.0..1.0, 0.0..y1)?;

    for (index, (bins, fill)) in geometry.bins_per_candidate.iter().zip(fills).enumerate() {
        if geometry.dirac_marker(index).is_some() {
            continue;
        }
        let color = rgb(*fill);
        chart.draw_series(bins.iter().filter(|b| b.density > 0.0).map(|b| {
            Rectangle::new([(fx(b.lower), 0.0), (fx(b.upper), b.density)], color.mix(0.6).filled())
        }))?;
        chart.draw_series(bins.iter().filter(|b| b.density > 0.0).map(|b| {
            Rectangle::new([(fx(b.lower), 0.0), (fx(b.upper), b.density)], color.stroke_width(1))
        }))?;
    }

    let marker = rgb(particle);
    for s in &geometry.styles {
        let p = s.particle_value;
        if p.is_finite() {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(fx(p), 0.0), (fx(p), y1)],
                marker.stroke_width(2),
            )))?;
        }
    }

    // Point masses as an arrow: a thin shaft as tall as the mass (1.0 reaching
    // the top bar) under a triangular head.
    let y_unit = if y_max > 0.0 { y_max } else { 1.0 };
    for m in &geometry.dirac_markers {
        let Some(fill) = fills.get(m.candidate) else {
            continue;
        };
        let color = rgb(*fill);
        let (cx, top) = (fx(m.position), m.mass * y_unit);
        let half = DIRAC_WIDTH_FRACTION / 2.0;
        let head = y1 * 0.04;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(cx - half, 0.0), (cx + half, top - head)],
            color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Polygon::new(
            vec![(cx - 3.0 * half, top - head), (cx + 3.0 * half, top - head), (cx, top)],
            color.filled(),
        )))?;
    }

    // Overflow mass as a bar just outside the range, height scaled to the plot.
    for note in &geometry.overflow_annotations {
        let Some(fill) = fills.get(note.candidate) else {
            continue;
        };
        let (lo, hi) = match note.sign {
            InfinitySign::Negative => (0.0, OVERFLOW_BAR_FRACTION),
            InfinitySign::Positive => (1.0 - OVERFLOW_BAR_FRACTION, 1.0),
        };
        chart.draw_series(std::iter::once(Rectangle::new(
            [(lo, 0.0), (hi, note.mass * y1)],
            rgb(*fill).filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}
