//! Small numeric helpers shared by the views.

/// Streaming count, mean and variance (Welford for the variance).
#[derive(Clone, Copy, Debug, Default)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Zero when nothing was pushed.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Sample standard deviation (n - 1), zero below two values.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}

/// Quantile `q` in [0, 1] with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Centred rolling mean. The window over index `i` spans
/// `[i - window / 2, i - window / 2 + window)`; positions where it does not
/// fit entirely inside `values` are `None`.
pub fn centered_rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window <= 1 {
        return values.iter().copied().map(Some).collect();
    }
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let start = i.checked_sub(half)?;
            let slice = values.get(start..start + window)?;
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn running_stats_match_two_pass_values() {
        let mut stats = RunningStats::default();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(v);
        }
        assert_eq!(stats.count(), 8);
        assert_close(stats.mean(), 5.0);
        // population variance is 4, sample variance is 32 / 7
        assert_close(stats.std_dev(), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn single_value_has_zero_std_dev() {
        let mut stats = RunningStats::default();
        stats.push(3.5);
        assert_close(stats.mean(), 3.5);
        assert_eq!(stats.std_dev(), 0.0);
        assert_eq!(RunningStats::default().std_dev(), 0.0);
    }

    #[test]
    fn quantile_interpolates() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_close(quantile(&[3.0, 1.0, 2.0], 0.5).unwrap(), 2.0);
        assert_close(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5).unwrap(), 2.5);
        assert_close(quantile(&[10.0, 20.0], 0.95).unwrap(), 19.5);
        assert_close(quantile(&[7.0], 0.95).unwrap(), 7.0);
    }

    #[test]
    fn rolling_mean_leaves_edges_empty() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(
            centered_rolling_mean(&values, 3),
            vec![None, Some(2.0), Some(3.0), Some(4.0), None]
        );
        assert_eq!(
            centered_rolling_mean(&values, 2),
            vec![None, Some(1.5), Some(2.5), Some(3.5), Some(4.5)]
        );
        assert_eq!(centered_rolling_mean(&values, 1).len(), 5);
        assert!(centered_rolling_mean(&values, 9).iter().all(Option::is_none));
    }
}
