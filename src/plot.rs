//! Visualization utilities for generating charts

use crate::curves::Curve;
use crate::dec::{Amount, Dec};
use anyhow::Result;
use plotters::prelude::*;

fn draw_line(caption: &str, pts: Vec<(f64, f64)>, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let x_max = pts.last().map(|(x, _)| *x).unwrap_or(1.0).max(1e-12);
    let y_max = pts.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1e-12);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(pts, &BLACK))?;
    root.present()?;
    Ok(())
}

/// Generates a marginal price vs supply chart
pub fn plot_price_vs_supply(c: &Curve, supplies: &[Amount], out_path: &str) -> Result<()> {
    let mut pts = Vec::with_capacity(supplies.len());
    for s in supplies {
        let x = Dec::from(*s);
        pts.push((x.to_f64(), c.price(&x)?.to_f64()));
    }
    draw_line("Price vs Supply", pts, out_path)
}

/// Generates a chart of the reserve (area under the curve) backing each supply
pub fn plot_reserve_vs_supply(c: &Curve, supplies: &[Amount], out_path: &str) -> Result<()> {
    let mut pts = Vec::with_capacity(supplies.len());
    for s in supplies {
        let x = Dec::from(*s);
        pts.push((x.to_f64(), c.integral(&x)?.to_f64()));
    }
    draw_line("Reserve vs Supply", pts, out_path)
}
