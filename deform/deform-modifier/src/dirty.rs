//! Change detection over node chains.
//!
//! A modifier needs to know whether its cached result is stale: whether the
//! linked target object, the modifier itself, or any ancestor of either has
//! changed since the last evaluation. The host exposes a per-node version
//! counter that it bumps on every change; this module folds those counters
//! into a single signal and compares it across checks.
//!
//! The signal is a coarse, collision-prone wrapping sum (distinct change
//! sets can fold to the same value). The comparison expects the signal to
//! advance by exactly one unit between checks under normal host
//! bookkeeping: a clean verdict leaves the stored signal alone, and a dirty
//! verdict is expected to make the host bump the modifier's own version
//! once, which the `+ 1` absorbs on the next pass. Any other relationship,
//! decreases included, reads as dirty.

/// The folded version signal of a pair of node chains.
pub type DirtySignal = u32;

/// Fold a chain of per-node version counters into one signal.
///
/// The walk is a wrapping sum, matching the host's unsigned counter
/// arithmetic.
#[must_use]
pub fn chain_signal(chain: &[u32]) -> DirtySignal {
    chain.iter().fold(0u32, |acc, &v| acc.wrapping_add(v))
}

/// Compute the combined signal of both chains and compare it against the
/// previous one.
///
/// `linked_chain` holds version counters walked from the linked (collision)
/// object up through its ancestors, `modifier_chain` the same walk from the
/// modifier node. Returns `(new_signal, is_dirty)`; the caller persists
/// `new_signal` for the next check. The previous signal starts at 0 when a
/// modifier is created.
///
/// # Example
///
/// ```
/// use deform_modifier::check_dirty;
///
/// // First check after creation is dirty
/// let (signal, dirty) = check_dirty(&[4, 2], &[7], 0);
/// assert_eq!(signal, 13);
/// assert!(dirty);
///
/// // The modifier reacted, bumping its own version once: clean
/// let (signal, dirty) = check_dirty(&[4, 2], &[8], signal);
/// assert_eq!(signal, 14);
/// assert!(!dirty);
/// ```
#[must_use]
pub fn check_dirty(
    linked_chain: &[u32],
    modifier_chain: &[u32],
    previous: DirtySignal,
) -> (DirtySignal, bool) {
    let new_signal = chain_signal(linked_chain).wrapping_add(chain_signal(modifier_chain));
    let is_dirty = new_signal != previous.wrapping_add(1);
    (new_signal, is_dirty)
}

/// Stateful change detector owning the persisted signal.
///
/// Wraps [`check_dirty`] with the storage policy the original bookkeeping
/// uses: the signal is stored only on a dirty verdict. A dirty verdict is
/// expected to make the host mark the modifier changed (bumping its version
/// once), after which an otherwise unchanged scene reads clean on every
/// subsequent check.
///
/// # Example
///
/// ```
/// use deform_modifier::DirtyTracker;
///
/// let mut tracker = DirtyTracker::new();
///
/// // A fresh tracker reports dirty, and the host bumps the modifier
/// assert!(tracker.check(&[4, 2], &[7]));
///
/// // Steady state: nothing changes, every check is clean
/// assert!(!tracker.check(&[4, 2], &[8]));
/// assert!(!tracker.check(&[4, 2], &[8]));
///
/// // The linked object changes: dirty again
/// assert!(tracker.check(&[5, 2], &[8]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    last: DirtySignal,
}

impl DirtyTracker {
    /// Create a tracker with the initial signal of 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// The currently persisted signal.
    #[must_use]
    pub const fn last_signal(&self) -> DirtySignal {
        self.last
    }

    /// Check both chains against the persisted signal.
    ///
    /// Returns whether re-evaluation is needed. The persisted signal is
    /// updated only on a dirty verdict.
    pub fn check(&mut self, linked_chain: &[u32], modifier_chain: &[u32]) -> bool {
        let (new_signal, is_dirty) = check_dirty(linked_chain, modifier_chain, self.last);
        if is_dirty {
            self.last = new_signal;
        }
        is_dirty
    }
}
