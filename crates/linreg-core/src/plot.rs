use crate::regerror::check_same_len;

use plotters::element::DashedPathElement;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

pub const PLOT_HEIGHT: u32 = 600;
pub const PLOT_WIDTH: u32 = 900;

pub const REGRESSION_FILE: &str = "regression.svg";
pub const RESIDUALS_FILE: &str = "residuals.svg";

/// Integer-spaced ticks from `min` up to and including the last value below `max + 1`.
pub fn integer_ticks(min: f64, max: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    (0..).map(|k| min + k as f64).take_while(|&v| v < max + 1.0).collect()
}

fn min_max<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

// 5% buffer around the data; a flat range gets one unit each way.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let range = hi - lo;
    if range == 0.0 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - range * 0.05, hi + range * 0.05)
}

fn x_span(x: &[f64]) -> (f64, f64) {
    let (lo, hi) = min_max(x.iter());
    if lo < hi {
        (lo, hi)
    } else {
        padded((lo, hi))
    }
}

/// Scatter of the sample with the fitted line on top.
pub fn plot_data_and_regression(
    path: &Path,
    x: &[f64],
    y: &[f64],
    predictions: &[f64],
) -> Result<(), Box<dyn Error>> {
    check_same_len(x, y)?;
    check_same_len(x, predictions)?;

    let (x_min, x_max) = x_span(x);
    let (y_min, y_max) = padded(min_max(y.iter().chain(predictions)));
    let ticks = integer_ticks(x_min, x_max);

    let root_area = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root_area)
        .caption("Simple Linear Regression on Randomly Generated Data.", ("sans-serif", 22))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    ctx.configure_mesh()
        .x_labels(ticks.len().max(2))
        .x_desc("Independent variable")
        .y_desc("Dependent variable")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    ctx.draw_series(x.iter().zip(y).map(|(&xi, &yi)| Circle::new((xi, yi), 2, BLUE.filled())))?
        .label("Data")
        .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));

    ctx.draw_series(LineSeries::new(
        x.iter().zip(predictions).map(|(&xi, &pi)| (xi, pi)),
        RED.stroke_width(2),
    ))?
    .label("Prediction")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    ctx.configure_series_labels().background_style(WHITE.mix(0.8)).border_style(BLACK).draw()?;
    root_area.present()?;
    Ok(())
}

/// Residual scatter with a dashed zero reference line.
pub fn plot_residuals(path: &Path, x: &[f64], residuals: &[f64]) -> Result<(), Box<dyn Error>> {
    check_same_len(x, residuals)?;

    let (x_min, x_max) = x_span(x);
    let (r_lo, r_hi) = min_max(residuals.iter());
    let (y_min, y_max) = padded((r_lo.min(0.0), r_hi.max(0.0)));
    let ticks = integer_ticks(x_min, x_max);

    let root_area = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root_area)
        .caption("Residuals of Linear Regression", ("sans-serif", 22))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    ctx.configure_mesh()
        .x_labels(ticks.len().max(2))
        .x_desc("Independent variable")
        .y_desc("Residuals")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    ctx.draw_series(
        x.iter().zip(residuals).map(|(&xi, &ri)| Circle::new((xi, ri), 2, GREEN.filled())),
    )?
    .label("Residuals")
    .legend(|(x, y)| Circle::new((x, y), 3, GREEN.filled()));

    let zero_line = vec![(x_min, 0.0), (x_max, 0.0)];
    ctx.draw_series(std::iter::once(DashedPathElement::new(zero_line, 8, 4, BLACK)))?
        .label("Zero Residuals Line")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    ctx.configure_series_labels().background_style(WHITE.mix(0.8)).border_style(BLACK).draw()?;
    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_integer_ticks() {
        assert_eq!(integer_ticks(0., 10.), (0..=10).map(|v| v as f64).collect::<Vec<_>>());
        assert_eq!(integer_ticks(0.5, 2.5), vec![0.5, 1.5, 2.5]);
        assert_eq!(integer_ticks(0., 2.5), vec![0., 1., 2., 3.]);
        assert!(integer_ticks(3., 1.).is_empty());
    }

    #[test]
    fn test_padded() {
        assert_eq!(padded((0., 10.)), (-0.5, 10.5));
        assert_eq!(padded((4., 4.)), (3., 5.));
        assert_eq!(padded((f64::INFINITY, f64::NEG_INFINITY)), (-1., 1.));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let path = std::env::temp_dir().join("linreg_mismatch_never_written.svg");
        assert!(plot_residuals(&path, &[1., 2.], &[0.1]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_svg() {
        let dir = std::env::temp_dir().join(format!("linreg_plot_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let x = [0., 1., 2., 3., 4.];
        let y = [1.2, 2.8, 5.1, 7.3, 8.9];
        let pred = [1., 3., 5., 7., 9.];
        let res: Vec<f64> = y.iter().zip(pred).map(|(a, b)| a - b).collect();

        let reg = dir.join(REGRESSION_FILE);
        let resid = dir.join(RESIDUALS_FILE);
        plot_data_and_regression(&reg, &x, &y, &pred).unwrap();
        plot_residuals(&resid, &x, &res).unwrap();

        let svg = fs::read_to_string(&reg).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Prediction"));
        assert!(fs::read_to_string(&resid).unwrap().contains("Zero Residuals Line"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
