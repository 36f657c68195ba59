//! Candidate action generation
//!
//! Each wheel may slow down, hold, or speed up by one acceleration-limited
//! step. Combinations that leave the open velocity interval are dropped.

use std::ops::Index;

use super::state::Action;

/// Upper bound on candidates per robot (3 left deltas x 3 right deltas)
pub const MAX_CANDIDATES: usize = 9;

/// Ordered candidate actions for one robot on one tick.
///
/// Stack-allocated; enumeration order is left delta (outer) then right
/// delta (inner), each in the order decrease, hold, increase.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSet {
    actions: [Action; MAX_CANDIDATES],
    len: usize,
}

impl CandidateSet {
    fn new() -> Self {
        Self {
            actions: [Action::STOP; MAX_CANDIDATES],
            len: 0,
        }
    }

    fn push(&mut self, action: Action) {
        debug_assert!(self.len < MAX_CANDIDATES);
        self.actions[self.len] = action;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.as_slice().iter()
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.as_slice().contains(action)
    }
}

impl Index<usize> for CandidateSet {
    type Output = Action;

    fn index(&self, index: usize) -> &Action {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Enumerate the actions reachable from `current` within one control step
pub fn candidate_actions(
    current: Action,
    dt: f64,
    max_acceleration: f64,
    max_velocity: f64,
) -> CandidateSet {
    let step = dt * max_acceleration;
    let deltas = [-step, 0.0, step];

    let mut set = CandidateSet::new();
    for dl in deltas {
        for dr in deltas {
            let candidate = Action::new(current.left + dl, current.right + dr);
            if candidate.within(max_velocity) {
                set.push(candidate);
            }
        }
    }
    set
}
