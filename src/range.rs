use crate::Partition;
use crate::Sample;
use rayon::prelude::*;

/// The observed value domain `[min, max]` of a sample array.
///
/// Every sample lies inside, and each bound is attained by at least one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: Sample,
    max: Sample,
}

impl Range {
    /// Parallel min/max reduction over static partitions.
    /// Must be called inside the pool that owns `workers` threads
    /// for the partition to map onto them; the result does not depend on it.
    pub fn reduce(samples: &[Sample], workers: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(!samples.is_empty(), "empty sample array");
        let partition = Partition::new(samples.len(), workers);
        (0..partition.workers())
            .into_par_iter()
            .map(|w| &samples[partition.span(w)])
            .filter_map(Self::scan)
            .reduce_with(Self::union)
            .ok_or_else(|| anyhow::anyhow!("empty sample array"))
    }

    /// sequential min/max of one chunk, None when the chunk is empty
    fn scan(chunk: &[Sample]) -> Option<Self> {
        let (&first, rest) = chunk.split_first()?;
        Some(rest.iter().fold(Self::from(first), |r, &x| Self {
            min: r.min.min(x),
            max: r.max.max(x),
        }))
    }

    /// combine two local ranges. commutative and associative.
    fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn min(&self) -> Sample {
        self.min
    }
    pub fn max(&self) -> Sample {
        self.max
    }
    /// number of distinct values in the domain, bounds inclusive
    pub fn span(&self) -> usize {
        (self.max - self.min) as usize + 1
    }
    pub fn contains(&self, value: Sample) -> bool {
        self.min <= value && value <= self.max
    }
    /// bin index of a value relative to the observed minimum
    pub fn bin(&self, value: Sample) -> usize {
        debug_assert!(self.contains(value));
        (value - self.min) as usize
    }
}

impl From<Sample> for Range {
    fn from(x: Sample) -> Self {
        Self { min: x, max: x }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "min: {}; max {}", self.min, self.max)
    }
}
