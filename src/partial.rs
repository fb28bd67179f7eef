use crate::Count;
use crate::Range;
use crate::Sample;
use crate::WorkerId;

/// A worker-local histogram over the observed domain.
///
/// Indexed by `value - min`, sized `max - min + 1` so that
/// samples equal to `max` own a bin of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial(Vec<Count>);

impl Partial {
    pub fn new(range: &Range) -> Self {
        Self(vec![Count::ZERO; range.span()])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn get(&self, bin: usize) -> Count {
        self.0[bin]
    }
    pub fn counts(&self) -> &[Count] {
        &self.0
    }
    /// zero every bin
    pub fn reset(&mut self) {
        self.0.fill(Count::ZERO);
    }
    /// bump the bin of every sample, saturating.
    pub fn tally(&mut self, samples: &[Sample], range: &Range) {
        for &value in samples {
            let ref mut bin = self.0[range.bin(value)];
            *bin = bin.increment();
        }
    }
}

/// One partial histogram per worker, allocated once per run.
///
/// The position of a partial in the arena is the id of the
/// worker that owns it; no two workers share a partial.
#[derive(Debug, Clone)]
pub struct Arena(Vec<Partial>);

impl Arena {
    pub fn new(workers: usize, range: &Range) -> Self {
        Self((0..workers.max(1)).map(|_| Partial::new(range)).collect())
    }
    pub fn workers(&self) -> usize {
        self.0.len()
    }
    pub fn partial(&self, w: WorkerId) -> &Partial {
        &self.0[w]
    }
    pub fn partials(&self) -> &[Partial] {
        &self.0
    }
    pub fn partials_mut(&mut self) -> &mut [Partial] {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_inclusive_of_max() {
        let ref range = Range::from(3);
        assert_eq!(Partial::new(range).len(), 1);
    }

    #[test]
    fn tally_counts_each_value() {
        let samples = [5, 5, 5, 9, 9];
        let range = Range::reduce(&samples, 1).unwrap();
        let mut partial = Partial::new(&range);
        partial.tally(&samples, &range);
        let counts = partial.counts().iter().map(|&c| u8::from(c)).collect::<Vec<_>>();
        assert_eq!(counts, vec![3, 0, 0, 0, 2]);
    }

    #[test]
    fn tally_saturates() {
        let samples = vec![7; 1000];
        let ref range = Range::from(7);
        let mut partial = Partial::new(range);
        partial.tally(&samples, range);
        assert_eq!(partial.get(0), Count::MAX);
    }

    #[test]
    fn reset_zeroes_everything() {
        let samples = [1, 2, 3];
        let range = Range::reduce(&samples, 1).unwrap();
        let mut partial = Partial::new(&range);
        partial.tally(&samples, &range);
        partial.reset();
        assert!(partial.counts().iter().all(|&c| c == Count::ZERO));
    }

    #[test]
    fn arena_has_one_partial_per_worker() {
        let ref range = Range::reduce(&[0, 9], 1).unwrap();
        let arena = Arena::new(4, range);
        assert_eq!(arena.workers(), 4);
        assert!(arena.partials().iter().all(|p| p.len() == 10));
        assert_eq!(Arena::new(0, range).workers(), 1);
    }
}
