//! Trailing-window helpers shared by the indicators.
//!
//! A window at index `i` covers `i + 1 - window ..= i`. It produces a value
//! only when it is full and every element in it is defined; no look-ahead.

pub fn rolling<F>(values: &[Option<f64>], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut buf: Vec<f64> = Vec::with_capacity(window);

    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
            continue;
        }
        buf.clear();
        buf.extend(values[i + 1 - window..=i].iter().map_while(|v| *v));
        if buf.len() < window {
            out.push(None);
        } else {
            out.push(reduce(&buf));
        }
    }

    out
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(w.iter().sum::<f64>() / w.len() as f64))
}

pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(w.iter().sum::<f64>()))
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().reduce(f64::max))
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().reduce(f64::min))
}
