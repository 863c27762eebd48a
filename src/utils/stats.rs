use crate::utils::constants::Z_95;

/// Running sum/count pair used by the grouped aggregations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    pub sum: u64,
    pub count: usize,
}

impl Accumulator {
    pub fn push(&mut self, value: u32) {
        self.sum += u64::from(value);
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Undefined below two samples.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    let std = (sum_sq / (values.len() - 1) as f64).sqrt();
    std.is_finite().then_some(std)
}

/// Standard error of the mean: `std / sqrt(max(n, 1))`.
pub fn standard_error(std: Option<f64>, n: usize) -> Option<f64> {
    let sem = std? / (n.max(1) as f64).sqrt();
    sem.is_finite().then_some(sem)
}

/// 95% confidence half-width. An undefined SEM yields a zero-width band.
pub fn ci95_half_width(sem: Option<f64>) -> f64 {
    sem.map(|s| Z_95 * s).filter(|ci| ci.is_finite()).unwrap_or(0.0)
}
