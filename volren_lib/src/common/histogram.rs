use super::ValueRange;

/// Bin counts of samples over a fixed range
///
/// Drawing is left to the chart widget, this only holds the data.
/// Samples outside the range are not counted, a sample equal to the
/// upper bound lands in the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    range: ValueRange,
    bins: Vec<u32>,
}

impl Histogram {
    pub fn from_samples(samples: &[f32], n_bins: usize, range: ValueRange) -> Histogram {
        let mut bins = vec![0; n_bins];
        let width = range.width();

        if n_bins == 0 || width <= 0.0 {
            return Histogram { range, bins };
        }

        let scale = n_bins as f32 / width;
        for &sample in samples {
            if !range.contains(sample) {
                continue;
            }
            let bin = ((sample - range.low) * scale) as usize;
            bins[bin.min(n_bins - 1)] += 1;
        }

        Histogram { range, bins }
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Lower and upper edge of bin `index`
    pub fn bin_bounds(&self, index: usize) -> Option<(f32, f32)> {
        if index >= self.bins.len() {
            return None;
        }
        let step = self.range.width() / self.bins.len() as f32;
        let low = self.range.low + step * index as f32;
        Some((low, low + step))
    }

    /// Height of the tallest bar, used to scale the chart
    pub fn max_count(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Number of counted samples
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn counts_land_in_bins() {
        let samples = [0.0, 0.1, 0.26, 0.5, 0.74, 1.0];
        let hist = Histogram::from_samples(&samples, 4, (0.0..1.0).into());

        assert_eq!(hist.bins(), &[2, 1, 2, 1]);
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn out_of_range_samples_are_skipped() {
        let samples = [-0.5, 0.5, 1.5];
        let hist = Histogram::from_samples(&samples, 2, (0.0..1.0).into());

        assert_eq!(hist.bins(), &[0, 1]);
    }

    #[test]
    fn bin_bounds() {
        let hist = Histogram::from_samples(&[], 4, (0.0..1.0).into());

        assert_eq!(hist.bin_bounds(1), Some((0.25, 0.5)));
        assert_eq!(hist.bin_bounds(4), None);
    }

    #[test]
    fn degenerate_range() {
        let hist = Histogram::from_samples(&[0.3, 0.3], 10, ValueRange::empty());

        assert_eq!(hist.total(), 0);
        assert_eq!(hist.bins().len(), 10);
    }
}
