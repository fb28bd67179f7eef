//! Iteration driver.
//!
//! Owns everything that lives for the whole run: the worker pool, the
//! arena of partial histograms and the global histogram. All validation
//! happens in [`Kernel::new`]; once it returns, nothing in the parallel
//! region can fail.

use crate::Arena;
use crate::Builder;
use crate::Histogram;
use crate::Image;
use crate::Merger;
use crate::Range;
use crate::Sample;
use anyhow::Context;
use std::num::NonZeroUsize;

pub struct Kernel<'a> {
    samples: &'a [Sample],
    range: Range,
    pool: rayon::ThreadPool,
    arena: Arena,
    histogram: Histogram,
}

impl<'a> Kernel<'a> {
    /// Build the pool, reduce the value range and allocate all storage.
    ///
    /// Fails if the image has no samples, or if its largest sample does not
    /// index into the declared `histo_width x histo_height` output grid.
    pub fn new(image: &'a Image, workers: usize) -> anyhow::Result<Self> {
        let workers = workers.max(1);
        let samples = image.samples();
        anyhow::ensure!(!samples.is_empty(), "empty sample array");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("saturn-{}", i))
            .build()
            .context("build worker pool")?;
        let range = pool.install(|| Range::reduce(samples, workers))?;
        let histogram = Histogram::new(image.histo_width(), image.histo_height());
        anyhow::ensure!(
            (range.max() as usize) < histogram.len(),
            "sample value {} does not fit the declared {} x {} histogram",
            range.max(),
            histogram.width(),
            histogram.height()
        );
        let arena = Arena::new(workers, &range);
        log::info!("{:<32}{}", "value range", range);
        log::info!("{:<32}{}", "workers", workers);
        Ok(Self {
            samples,
            range,
            pool,
            arena,
            histogram,
        })
    }

    pub fn range(&self) -> Range {
        self.range
    }
    pub fn workers(&self) -> usize {
        self.arena.workers()
    }
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }

    /// one full pass: reset and build every partial, then merge.
    pub fn step(&mut self) {
        let Self {
            samples,
            range,
            pool,
            arena,
            histogram,
        } = self;
        pool.install(|| {
            Builder::build(arena, samples, range);
            Merger::merge(histogram, arena, range);
        });
    }

    /// repeat the pass `iterations` times. every pass recomputes the
    /// histogram from scratch, so the result equals that of a single pass.
    pub fn run(&mut self, iterations: NonZeroUsize) -> &Histogram {
        for i in 0..iterations.get() {
            self.step();
            log::debug!("iteration {:>6}", i);
        }
        &self.histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::Count;

    fn once() -> NonZeroUsize {
        NonZeroUsize::new(1).unwrap()
    }

    fn run(image: &Image, workers: usize, iterations: usize) -> Histogram {
        let mut kernel = Kernel::new(image, workers).unwrap();
        kernel.run(NonZeroUsize::new(iterations).unwrap());
        kernel.into_histogram()
    }

    #[test]
    fn counts_match_when_unsaturated() {
        let samples = (0..2000u32).map(|i| (i * 7) % 20).collect::<Vec<_>>();
        let image = Image::new(40, 50, 32, 1, samples.clone()).unwrap();
        let histogram = run(&image, 4, 1);
        for v in 0..32 {
            let expected = samples.iter().filter(|&&s| s == v).count();
            assert_eq!(u8::from(histogram.get(v)) as usize, expected);
        }
    }

    #[test]
    fn frequent_values_saturate() {
        let samples = (0..4000u32).map(|i| if i % 4 == 0 { 1 } else { 2 }).collect();
        let image = Image::new(4000, 1, 4, 1, samples).unwrap();
        for workers in [1, 3, 8] {
            let histogram = run(&image, workers, 1);
            assert_eq!(histogram.get(1), Count::MAX);
            assert_eq!(histogram.get(2), Count::MAX);
            assert_eq!(histogram.get(0), Count::ZERO);
            assert_eq!(histogram.get(3), Count::ZERO);
        }
    }

    #[test]
    fn iterations_are_idempotent() {
        let image = Image::random();
        assert_eq!(run(&image, 4, 1), run(&image, 4, 5));
    }

    #[test]
    fn independent_of_worker_count() {
        let image = Image::random();
        let reference = run(&image, 1, 1);
        for workers in [2, 8, 13] {
            assert_eq!(run(&image, workers, 2), reference);
        }
    }

    #[test]
    fn single_value_image() {
        let image = Image::new(30, 30, 16, 16, vec![77; 900]).unwrap();
        let kernel = &mut Kernel::new(&image, 4).unwrap();
        assert_eq!(kernel.range(), Range::from(77));
        let histogram = kernel.run(once());
        assert_eq!(histogram.occupied().collect::<Vec<_>>(), vec![(77, Count::MAX)]);

        let image = Image::new(10, 1, 16, 16, vec![3; 10]).unwrap();
        let histogram = run(&image, 4, 1);
        assert_eq!(histogram.occupied().collect::<Vec<_>>(), vec![(3, Count::from(10))]);
    }

    #[test]
    fn two_distinct_values() {
        let image = Image::new(5, 1, 16, 1, vec![5, 5, 5, 9, 9]).unwrap();
        let histogram = run(&image, 2, 3);
        assert_eq!(histogram.get(5), Count::from(3));
        assert_eq!(histogram.get(9), Count::from(2));
        for v in 6..9 {
            assert_eq!(histogram.get(v), Count::ZERO);
        }
    }

    #[test]
    fn bins_outside_range_stay_zero() {
        let image = Image::random();
        let mut kernel = Kernel::new(&image, 4).unwrap();
        let range = kernel.range();
        for _ in 0..3 {
            kernel.step();
            assert!(kernel.histogram().occupied().all(|(v, _)| range.contains(v)));
        }
    }

    #[test]
    fn empty_image_is_rejected() {
        let image = Image::new(0, 10, 16, 16, vec![]).unwrap();
        assert!(Kernel::new(&image, 2).is_err());
    }

    #[test]
    fn undersized_output_is_rejected() {
        let image = Image::new(2, 1, 4, 1, vec![1, 4]).unwrap();
        assert!(Kernel::new(&image, 2).is_err());
    }

    #[test]
    fn more_workers_than_samples() {
        let image = Image::new(3, 1, 8, 1, vec![0, 7, 7]).unwrap();
        let histogram = run(&image, 16, 1);
        assert_eq!(histogram.get(0), Count::from(1));
        assert_eq!(histogram.get(7), Count::from(2));
    }
}
