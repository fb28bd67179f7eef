use crate::WorkerId;

/// Static split of `len` samples into `workers` contiguous chunks.
///
/// Chunk `w` covers `[w * len / n, (w + 1) * len / n)`, so chunk sizes
/// differ by at most one and every sample lands in exactly one chunk.
/// Chunks are empty when there are more workers than samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    workers: usize,
}

impl Partition {
    pub fn new(len: usize, workers: usize) -> Self {
        Self {
            len,
            workers: workers.max(1),
        }
    }
    pub fn workers(&self) -> usize {
        self.workers
    }
    /// the half-open index range owned by worker `w`
    pub fn span(&self, w: WorkerId) -> std::ops::Range<usize> {
        debug_assert!(w < self.workers);
        let lo = w * self.len / self.workers;
        let hi = (w + 1) * self.len / self.workers;
        lo..hi
    }
    pub fn spans(&self) -> impl Iterator<Item = std::ops::Range<usize>> + '_ {
        (0..self.workers).map(|w| self.span(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_every_index_once() {
        for len in [0, 1, 5, 7, 64, 1001] {
            for workers in [1, 2, 3, 8] {
                let partition = Partition::new(len, workers);
                let mut next = 0;
                for span in partition.spans() {
                    assert_eq!(span.start, next);
                    next = span.end;
                }
                assert_eq!(next, len);
            }
        }
    }

    #[test]
    fn spans_are_balanced() {
        let partition = Partition::new(10, 4);
        let sizes = partition.spans().map(|s| s.len()).collect::<Vec<_>>();
        assert_eq!(sizes.iter().sum::<usize>(), 10);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }

    #[test]
    fn more_workers_than_samples() {
        let partition = Partition::new(2, 8);
        assert_eq!(partition.spans().filter(|s| s.is_empty()).count(), 6);
    }

    #[test]
    fn zero_workers_means_one() {
        assert_eq!(Partition::new(5, 0).workers(), 1);
        assert_eq!(Partition::new(5, 0).span(0), 0..5);
    }
}
