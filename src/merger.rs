use crate::Arena;
use crate::Count;
use crate::Histogram;
use crate::Range;
use rayon::prelude::*;

/// Reduces all partials into the global histogram.
///
/// `global[v] = sum_w partial[w][v - min]`, saturating, for every `v` in
/// `[min, max]`. The histogram is zeroed first, so a merge never depends
/// on what a previous iteration left behind. Bins are independent, so the
/// domain is split across the pool by value.
///
/// Values past the end of the histogram are dropped; `Kernel::new`
/// rejects such inputs before they get here.
pub struct Merger;

impl Merger {
    pub fn merge(histogram: &mut Histogram, arena: &Arena, range: &Range) {
        histogram.reset();
        let lo = range.min() as usize;
        let hi = (range.max() as usize).saturating_add(1).min(histogram.len());
        if lo >= hi {
            return;
        }
        let partials = arena.partials();
        histogram.bins_mut()[lo..hi]
            .par_iter_mut()
            .enumerate()
            .for_each(|(bin, global)| {
                *global = partials
                    .iter()
                    .map(|partial| partial.get(bin))
                    .fold(Count::ZERO, |sum, count| sum + count);
            });
    }
}
