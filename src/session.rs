//! Fragment accumulation state for one logical payload capture.
//!
//! A session owns an ordered slot array sized by the first multi-part
//! fragment it sees, absorbs one fragment per scan-loop iteration, and
//! reports completion once every slot is filled. Cameras routinely
//! re-read the same physical code across consecutive frames, so duplicate
//! fragments are expected and must not corrupt state.

use crate::models::FrameFragment;

/// What absorbing one fragment did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Every slot is filled; carries the payload assembled in index order.
    Completed(String),
    /// The fragment filled a previously-empty slot.
    Progressed,
    /// That slot was already filled; state unchanged.
    AlreadyFilled,
    /// The fragment disagrees with the capture in progress — its part
    /// count differs from the first-seen count, or its index falls outside
    /// the slot array. Dropped with no state change.
    Rejected,
}

/// Accumulator for one in-progress scan of a single logical payload.
#[derive(Debug, Default)]
pub struct ScanSession {
    slots: Vec<Option<String>>,
    declared_total: Option<usize>,
}

impl ScanSession {
    /// Create an empty session. Slots stay unallocated until the first
    /// multi-part fragment arrives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct slots filled so far.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Part count declared by the first multi-part fragment, if any.
    pub fn total(&self) -> Option<usize> {
        self.declared_total
    }

    /// True once every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.declared_total.is_some() && self.slots.iter().all(Option::is_some)
    }

    /// Absorb one parsed fragment.
    ///
    /// Infallible: malformed input never reaches the session, and
    /// disagreeing fragments are reported as [`SessionEvent::Rejected`]
    /// rather than errors.
    pub fn absorb(&mut self, fragment: FrameFragment) -> SessionEvent {
        if fragment.is_single() {
            // A non-multi-part code is the whole payload; short-circuit
            // without ever allocating slots.
            return SessionEvent::Completed(fragment.into_text());
        }

        let total = match self.declared_total {
            Some(total) => total,
            None => {
                // First multi-part fragment fixes the slot count for the
                // rest of the session.
                self.slots = vec![None; fragment.total()];
                self.declared_total = Some(fragment.total());
                fragment.total()
            }
        };

        if fragment.total() != total || !(1..=total).contains(&fragment.index()) {
            return SessionEvent::Rejected;
        }

        let slot = &mut self.slots[fragment.index() - 1];
        if slot.is_some() {
            return SessionEvent::AlreadyFilled;
        }
        *slot = Some(fragment.into_text());

        if self.slots.iter().all(Option::is_some) {
            SessionEvent::Completed(self.assemble())
        } else {
            SessionEvent::Progressed
        }
    }

    /// Join all slots in index order, no separator.
    fn assemble(&self) -> String {
        self.slots.iter().flatten().map(String::as_str).collect()
    }
}
