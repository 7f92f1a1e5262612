//! ----------------------------------------------------------------------------
//! **Screen-space occlusion list**
//!
//! A sorted list of solid column ranges is the whole depth story of this
//! renderer: walls arrive in front-to-back order, every range a wall claims
//! is final, and later walls may only paint the gaps.  Each screen column
//! is therefore painted exactly once per frame with no depth buffer.
//!
//! Ranges one column apart count as touching (the `- 1` adjacency rule all
//! over [`SolidSegs::clip_wall`]): merging them early is what prevents both
//! single-column gaps and double coverage at shared wall boundaries.
//! ----------------------------------------------------------------------------

/// Inclusive range of already-claimed screen columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRange {
    pub first: i32,
    pub last: i32,
}

/// Frame-scoped clip state: the claimed ranges, sorted by `first` and
/// bracketed by two sentinels so every lookup lands on a node.
#[derive(Debug)]
pub struct SolidSegs {
    ranges: Vec<ClipRange>,
    width: i32,
}

impl SolidSegs {
    pub fn new(width: usize) -> Self {
        let mut segs = Self {
            ranges: Vec::new(),
            width: width as i32,
        };
        segs.reset();
        segs
    }

    /// Restore the two sentinels; called at the start of every frame.
    pub fn reset(&mut self) {
        self.ranges.clear();
        self.ranges.push(ClipRange {
            first: -100_000,
            last: -1,
        });
        self.ranges.push(ClipRange {
            first: self.width,
            last: 100_000,
        });
    }

    /// Current ranges, sentinels included.
    pub fn ranges(&self) -> &[ClipRange] {
        &self.ranges
    }

    /// Clip the wall `[first, last]` against the claimed ranges.
    ///
    /// Every still-visible sub-range is handed to `emit` in left-to-right
    /// order *before* the list mutates past it, and then becomes claimed
    /// itself.  A wall whose columns are all claimed already emits nothing.
    pub fn clip_wall(&mut self, first: i32, last: i32, emit: &mut impl FnMut(i32, i32)) {
        // first range that could touch or overlap the wall; the right
        // sentinel guarantees this terminates
        let mut i = 0;
        while self.ranges[i].last < first - 1 {
            i += 1;
        }

        if first < self.ranges[i].first {
            if last < self.ranges[i].first - 1 {
                // the whole wall is visible and disjoint from everything
                emit(first, last);
                self.ranges.insert(i, ClipRange { first, last });
                return;
            }

            // only the lead-in before the found range is visible
            emit(first, self.ranges[i].first - 1);
            self.ranges[i].first = first;
        }

        if last <= self.ranges[i].last {
            // remainder already hidden behind this range
            return;
        }

        // chop the wall against each following range, emitting the gaps,
        // and merge everything the wall bridges into ranges[i]
        let mut next = i;
        while next + 1 < self.ranges.len() && last >= self.ranges[next + 1].first - 1 {
            emit(self.ranges[next].last + 1, self.ranges[next + 1].first - 1);
            next += 1;

            if last <= self.ranges[next].last {
                self.ranges[i].last = self.ranges[next].last;
                if next != i {
                    self.ranges.drain(i + 1..=next);
                }
                return;
            }
        }

        // wall reaches past every range it touched
        emit(self.ranges[next].last + 1, last);
        self.ranges[i].last = last;
        if next != i {
            self.ranges.drain(i + 1..=next);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
