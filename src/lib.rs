use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
pub mod motion;
pub mod position;
pub mod velocity;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// capacity hint matching the sample buffer of the drive poller
const SERIES_CAPACITY: usize = 2000;

/// The main struct for the two-column (time, channel) sample series
#[derive(Debug, Clone)]
pub struct TimeValue {
    pub time: Vec<f64>,
    pub value: Vec<f64>,
}

impl TimeValue {
    pub fn new(capacity: usize) -> TimeValue {
        let time: Vec<f64> = Vec::with_capacity(capacity);
        let value: Vec<f64> = Vec::with_capacity(capacity);
        let timevalue: TimeValue = TimeValue { time, value };
        timevalue
    }

    /// Init a TimeValue from csv, one `time,value` row per line, no header.
    /// The file is read as the drive logger wrote it:
    /// a missing file, an unreadable line, a row with a field count other
    /// than 2 or a non-numeric field all panic with a diagnostic.
    /// Time order is not checked here, irregular sampling is only
    /// summarized afterwards by the jitter statistics.
    pub fn from_csv(fin: PathBuf) -> TimeValue {
        let file = File::open(fin).unwrap();
        let buf = BufReader::new(file);
        let mut timevalue = TimeValue::new(SERIES_CAPACITY);
        for (i, l) in buf.lines().enumerate() {
            let fields = parse_row(&l.unwrap(), 2, i + 1);
            timevalue.time.push(fields[0]);
            timevalue.value.push(fields[1]);
        }
        timevalue
    }

    /// keep only the first `samples` rows;
    /// a limit beyond the series length leaves the series whole
    pub fn truncate(&mut self, samples: usize) {
        self.time.truncate(samples);
        self.value.truncate(samples);
    }

    /// plots the series as a velocity stem chart to svg
    pub fn plot_stem(self, fout: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let (xmin, xmax) = min_and_max(&self.time[..]);
        let xmargin = (xmax - xmin) / 20f64;
        let (ymin, ymax) = stem_bounds(&self.value[..]);
        let root = SVGBackend::new(&fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption("Velocity vs. time", ("sans-serif", 32))
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin - xmargin..xmax + xmargin, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .x_desc("Time (s)")
            .y_desc("Velocity (rps)")
            .draw()?;
        // impulse baseline at zero, kept inside the padded range
        let base = 0f64.max(ymin).min(ymax);
        let stems = self
            .time
            .iter()
            .zip(self.value.iter())
            .map(|(&t, &v)| PathElement::new(vec![(t, base), (t, v)], BLUE.stroke_width(2)));
        chart.draw_series(stems)?;
        let markers = self
            .time
            .iter()
            .zip(self.value.iter())
            .map(|(&t, &v)| Circle::new((t, v), 4, BLUE.filled()));
        chart.draw_series(markers)?;
        Ok(())
    }

    /// plots the series as a position line chart to svg,
    /// the title carries the timing-jitter summary of the time column
    pub fn plot_line(self, fout: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let (td_mean, td_std) = jitter(&self.time[..]);
        let (xmin, xmax) = min_and_max(&self.time[..]);
        let xmargin = (xmax - xmin) / 20f64;
        let (ymin, ymax) = min_and_max(&self.value[..]);
        let ymargin = (ymax - ymin) / 10f64;
        let root = SVGBackend::new(&fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(
                format!(
                    "Position vs. time (tdiff: mu={:.6}, sigma={:.6})",
                    td_mean, td_std
                ),
                ("sans-serif", 32),
            )
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin - xmargin..xmax + xmargin, ymin - ymargin..ymax + ymargin)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .x_desc("Time (s)")
            .y_desc("Position (deg)")
            .draw()?;
        let line = LineSeries::new(
            self.time
                .iter()
                .zip(self.value.iter())
                .map(|(&t, &v)| (t, v)),
            BLUE.stroke_width(2),
        );
        chart.draw_series(line)?;
        Ok(())
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (t, v) in self.time.iter().zip(self.value.iter()) {
            write!(f, "{},{}\n", t, v)?
        }
        Ok(())
    }
}

/// The struct for the three-column (time, position, velocity) poller log
#[derive(Debug, Clone)]
pub struct TimeMotion {
    pub time: Vec<f64>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
}

impl TimeMotion {
    pub fn new(capacity: usize) -> TimeMotion {
        let time: Vec<f64> = Vec::with_capacity(capacity);
        let position: Vec<f64> = Vec::with_capacity(capacity);
        let velocity: Vec<f64> = Vec::with_capacity(capacity);
        let timemotion: TimeMotion = TimeMotion {
            time,
            position,
            velocity,
        };
        timemotion
    }

    /// Init a TimeMotion from csv, one `time,position,velocity` row per
    /// line, no header; same fatal handling as TimeValue::from_csv
    pub fn from_csv(fin: PathBuf) -> TimeMotion {
        let file = File::open(fin).unwrap();
        let buf = BufReader::new(file);
        let mut timemotion = TimeMotion::new(SERIES_CAPACITY);
        for (i, l) in buf.lines().enumerate() {
            let fields = parse_row(&l.unwrap(), 3, i + 1);
            timemotion.time.push(fields[0]);
            timemotion.position.push(fields[1]);
            timemotion.velocity.push(fields[2]);
        }
        timemotion
    }

    /// keep only the first `samples` rows, as TimeValue::truncate
    pub fn truncate(&mut self, samples: usize) {
        self.time.truncate(samples);
        self.position.truncate(samples);
        self.velocity.truncate(samples);
    }

    /// plots position and velocity as two stacked panels sharing the time
    /// range, position above with the jitter summary in its title,
    /// velocity below with the time axis label
    pub fn plot_motion(self, fout: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let (td_mean, td_std) = jitter(&self.time[..]);
        let (xmin, xmax) = min_and_max(&self.time[..]);
        let xmargin = (xmax - xmin) / 20f64;
        let xrange = (xmin - xmargin)..(xmax + xmargin);
        let root = SVGBackend::new(&fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let (upper, lower) = root.split_vertically(400);

        let (pmin, pmax) = min_and_max(&self.position[..]);
        let pmargin = (pmax - pmin) / 10f64;
        let mut pos_chart = ChartBuilder::on(&upper)
            .margin(20)
            .caption(
                format!(
                    "Position vs. time (tdiff: mu={:.6}, sigma={:.6})",
                    td_mean, td_std
                ),
                ("sans-serif", 28),
            )
            .x_label_area_size(40)
            .y_label_area_size(100)
            .build_cartesian_2d(xrange.clone(), (pmin - pmargin)..(pmax + pmargin))?;
        pos_chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .y_desc("Position (deg)")
            .draw()?;
        let pos_line = LineSeries::new(
            self.time
                .iter()
                .zip(self.position.iter())
                .map(|(&t, &p)| (t, p)),
            RED.stroke_width(2),
        );
        pos_chart.draw_series(pos_line)?;

        let (vmin, vmax) = min_and_max(&self.velocity[..]);
        let vmargin = (vmax - vmin) / 10f64;
        let mut vel_chart = ChartBuilder::on(&lower)
            .margin(20)
            .caption("Velocity vs. time", ("sans-serif", 28))
            .x_label_area_size(40)
            .y_label_area_size(100)
            .build_cartesian_2d(xrange, (vmin - vmargin)..(vmax + vmargin))?;
        vel_chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .x_desc("Time (s)")
            .y_desc("Velocity (rps)")
            .draw()?;
        let vel_line = LineSeries::new(
            self.time
                .iter()
                .zip(self.velocity.iter())
                .map(|(&t, &v)| (t, v)),
            BLUE.stroke_width(2),
        );
        vel_chart.draw_series(vel_line)?;
        Ok(())
    }
}

impl std::fmt::Display for TimeMotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ((t, p), v) in self
            .time
            .iter()
            .zip(self.position.iter())
            .zip(self.velocity.iter())
        {
            write!(f, "{},{},{}\n", t, p, v)?
        }
        Ok(())
    }
}

/// splits a csv row and parses every field as f64,
/// fields may carry surrounding spaces as the drive logger writes `, `
fn parse_row(line: &str, n_fields: usize, n_line: usize) -> Vec<f64> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != n_fields {
        panic!(
            "line {}: expected {} comma-separated fields, found {}",
            n_line,
            n_fields,
            fields.len()
        );
    }
    fields
        .iter()
        .map(|s| match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(e) => panic!("line {}: could not parse '{}', {}", n_line, s.trim(), e),
        })
        .collect()
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}

/// vertical axis range for the stem chart, the data range padded by 5%
pub fn stem_bounds(v: &[f64]) -> (f64, f64) {
    let (vmin, vmax) = min_and_max(v);
    let offset = 0.05;
    return (vmin * (1. - offset), vmax * (1. + offset));
}

/// consecutive differences of the time column
pub fn time_diffs(time: &[f64]) -> Vec<f64> {
    time.windows(2).map(|w| w[1] - w[0]).collect()
}

pub fn mean(v: &[f64]) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

/// population standard deviation, the denominator is n
pub fn std_dev(v: &[f64]) -> f64 {
    let m = mean(v);
    let var = v.iter().map(|e| (e - m) * (e - m)).sum::<f64>() / v.len() as f64;
    var.sqrt()
}

/// mean and standard deviation of the consecutive time differences,
/// summarizes the regularity of the sampling
pub fn jitter(time: &[f64]) -> (f64, f64) {
    let td = time_diffs(time);
    (mean(&td[..]), std_dev(&td[..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_time_diffs() {
        let td = time_diffs(&[0.0, 1.0, 2.1, 3.0]);
        assert_eq!(td.len(), 3);
        assert!((td[0] - 1.0).abs() < TOL);
        assert!((td[1] - 1.1).abs() < TOL);
        assert!((td[2] - 0.9).abs() < TOL);
    }

    #[test]
    fn test_jitter_irregular_sampling() {
        let (td_mean, td_std) = jitter(&[0.0, 1.0, 2.1, 3.0]);
        assert!((td_mean - 1.0).abs() < TOL);
        assert!((td_std - 0.0816496580927726).abs() < TOL);
    }

    #[test]
    fn test_jitter_regular_sampling() {
        let (td_mean, td_std) = jitter(&[0.0, 0.005, 0.01, 0.015, 0.02]);
        assert!((td_mean - 0.005).abs() < TOL);
        assert!(td_std.abs() < TOL);
    }

    #[test]
    fn test_stem_bounds_positive_data() {
        let (lower, upper) = stem_bounds(&[2.0, 3.0, 4.0]);
        assert!((lower - 1.9).abs() < TOL);
        assert!((upper - 4.2).abs() < TOL);
    }

    #[test]
    fn test_min_and_max() {
        let (vmin, vmax) = min_and_max(&[3.0, -1.0, 7.5, 0.0]);
        assert_eq!(vmin, -1.0);
        assert_eq!(vmax, 7.5);
    }

    #[test]
    fn test_truncate_within_length() {
        let mut tv = TimeValue::new(4);
        tv.time = vec![0.0, 1.0, 2.0, 3.0];
        tv.value = vec![10.0, 11.0, 12.0, 13.0];
        tv.truncate(2);
        assert_eq!(tv.time.len(), 2);
        assert_eq!(tv.value.len(), 2);
        assert_eq!(tv.value, vec![10.0, 11.0]);
    }

    #[test]
    fn test_truncate_beyond_length() {
        let mut tv = TimeValue::new(2);
        tv.time = vec![0.0, 1.0];
        tv.value = vec![10.0, 11.0];
        tv.truncate(5);
        assert_eq!(tv.time.len(), 2);
        assert_eq!(tv.value.len(), 2);
    }

    #[test]
    fn test_parse_row_spaced_fields() {
        let fields = parse_row("0.005000, 90.000000, 20.000000", 3, 1);
        assert_eq!(fields, vec![0.005, 90.0, 20.0]);
    }

    #[test]
    #[should_panic]
    fn test_parse_row_wrong_field_count() {
        parse_row("0.0,1.0,2.0", 2, 1);
    }

    #[test]
    #[should_panic]
    fn test_parse_row_non_numeric() {
        parse_row("0.0,velocity", 2, 1);
    }

    #[test]
    fn test_display_timevalue() {
        let mut tv = TimeValue::new(2);
        tv.time = vec![0.0, 0.5];
        tv.value = vec![1.0, 2.0];
        assert_eq!(tv.to_string(), "0,1\n0.5,2\n");
    }
}
