//! Synthetic intraday price trend for the detail view.

use crate::StockRecord;

/// Number of points in a generated trend.
pub const TREND_TICKS: usize = 30;

const DRIFT_CENTER: f64 = 0.48;
const STEP_SCALE: f64 = 1.6;

/// Random walk of `ticks` points starting from `base`.
///
/// Each point is `previous + (u - 0.48) * 1.6` with `u` uniform in `[0, 1)`,
/// rounded to two decimals. The walk continues from the rounded value.
pub fn synthetic_trend(base: f64, ticks: usize, rng: &mut fastrand::Rng) -> Vec<f64> {
    let mut points = Vec::with_capacity(ticks);
    let mut previous = base;
    for _ in 0..ticks {
        let next = round_cents(previous + (rng.f64() - DRIFT_CENTER) * STEP_SCALE);
        points.push(next);
        previous = next;
    }
    points
}

/// Trend seeded from the record's capital price. `None` for incomplete records.
pub fn trend_for(record: &StockRecord, rng: &mut fastrand::Rng) -> Option<Vec<f64>> {
    if !record.is_complete() {
        return None;
    }
    record
        .capital_price()
        .map(|base| synthetic_trend(base, TREND_TICKS, rng))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_within_bounds() {
        let mut rng = fastrand::Rng::with_seed(3);
        let points = synthetic_trend(250.0, TREND_TICKS, &mut rng);

        assert_eq!(points.len(), TREND_TICKS);
        let mut previous = 250.0;
        for point in points {
            let step = point - previous;
            assert!((-0.775..=0.84).contains(&step), "step {step} out of range");
            assert_eq!(point, round_cents(point));
            previous = point;
        }
    }

    #[test]
    fn seeded_trends_repeat() {
        let first = synthetic_trend(10.0, 5, &mut fastrand::Rng::with_seed(11));
        let second = synthetic_trend(10.0, 5, &mut fastrand::Rng::with_seed(11));
        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_records_have_no_trend() {
        let record = StockRecord::new(5, Some("GRASIM"), Some(2700.0), None, 0.2).expect("valid");
        assert_eq!(trend_for(&record, &mut fastrand::Rng::with_seed(1)), None);
    }
}
