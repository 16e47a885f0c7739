//! Building blocks shared by the Wilder-family indicators (ADX).

use crate::domain::Bar;

/// True Range series.
///
/// TR[0] = high - low (no previous close).
/// TR[t] = max(high - low, |high - prev_close|, |low - prev_close|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(bars.len());
    let Some(first) = bars.first() else {
        return tr;
    };
    tr.push(first.high - first.low);

    for pair in bars.windows(2) {
        let (prev, bar) = (&pair[0], &pair[1]);
        let range = (bar.high - bar.low)
            .max((bar.high - prev.close).abs())
            .max((bar.low - prev.close).abs());
        // f64::max drops NaN operands, so check inputs explicitly
        if bar.high.is_nan() || bar.low.is_nan() || prev.close.is_nan() {
            tr.push(f64::NAN);
        } else {
            tr.push(range);
        }
    }

    tr
}

/// Wilder smoothing (alpha = 1 / period).
///
/// The seed is the mean of the first run of `period` consecutive non-NaN
/// values; it lands on the last index of that run. A NaN after the seed
/// taints the rest of the output.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    let Some(seed_start) = (0..=n - period)
        .find(|&i| values[i..i + period].iter().all(|v| !v.is_nan()))
    else {
        return result;
    };
    let seed_end = seed_start + period;

    let mut prev = values[seed_start..seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = prev;

    let alpha = 1.0 / period as f64;
    for i in seed_end..n {
        if values[i].is_nan() {
            break;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}
