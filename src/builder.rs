use crate::Arena;
use crate::Partition;
use crate::Range;
use crate::Sample;
use rayon::prelude::*;

/// The parallel counting pass.
///
/// Worker `w` owns `arena[w]` and the `w`-th static chunk of the samples.
/// It zeroes its partial and then tallies its chunk into it. The samples are
/// shared read-only; partials are handed out as disjoint `&mut`, so the pass
/// needs no locking. Returning from `build` is the barrier after which every
/// partial is complete and visible to the merge.
pub struct Builder;

impl Builder {
    pub fn build(arena: &mut Arena, samples: &[Sample], range: &Range) {
        let partition = Partition::new(samples.len(), arena.workers());
        arena
            .partials_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(w, partial)| {
                partial.reset();
                partial.tally(&samples[partition.span(w)], range);
            });
    }
}
