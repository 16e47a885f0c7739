//! ADX, Average Directional Index (Wilder).
//!
//! +DM/-DM from consecutive bars, Wilder-smoothed alongside True Range into
//! +DI/-DI; DX = 100 * |+DI - -DI| / (+DI + -DI); ADX = Wilder-smoothed DX.
//! Lookback: 2 * period - 1.

use super::wilder::{true_range, wilder_smooth};
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            name: format!("adx_{period}"),
        }
    }
}

/// +DM and -DM. Index 0 has no previous bar and is NaN.
fn directional_movement(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = vec![f64::NAN; bars.len()];
    let mut minus_dm = vec![f64::NAN; bars.len()];

    for (i, pair) in bars.windows(2).enumerate() {
        let (prev, bar) = (&pair[0], &pair[1]);
        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        if up.is_nan() || down.is_nan() {
            continue;
        }
        plus_dm[i + 1] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i + 1] = if down > up && down > 0.0 { down } else { 0.0 };
    }

    (plus_dm, minus_dm)
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        2 * self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        if n < 2 {
            return vec![f64::NAN; n];
        }

        let (plus_dm, minus_dm) = directional_movement(bars);
        let mut tr = true_range(bars);
        // align the TR seed window with the DM windows
        tr[0] = f64::NAN;

        let smooth_tr = wilder_smooth(&tr, self.period);
        let smooth_plus = wilder_smooth(&plus_dm, self.period);
        let smooth_minus = wilder_smooth(&minus_dm, self.period);

        let dx: Vec<f64> = (0..n)
            .map(|i| {
                let (tr, plus, minus) = (smooth_tr[i], smooth_plus[i], smooth_minus[i]);
                if tr.is_nan() || plus.is_nan() || minus.is_nan() || tr == 0.0 {
                    return f64::NAN;
                }
                let plus_di = 100.0 * plus / tr;
                let minus_di = 100.0 * minus / tr;
                let di_sum = plus_di + minus_di;
                if di_sum == 0.0 {
                    0.0
                } else {
                    100.0 * (plus_di - minus_di).abs() / di_sum
                }
            })
            .collect();

        wilder_smooth(&dx, self.period)
    }
}
