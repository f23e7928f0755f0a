use std::collections::{HashSet, VecDeque};

/**
 * FIFO of floors the car still has to visit.
 *
 * Floors are served strictly in request order. A floor can be queued at most once;
 * the membership set mirrors the ordered sequence so duplicate checks stay O(1).
 */
#[derive(Debug, Default, Clone)]
pub struct RequestQueue {
    order: VecDeque<u8>,
    members: HashSet<u8>,
}

impl RequestQueue {
    pub fn new() -> RequestQueue {
        RequestQueue::default()
    }

    /// Appends `floor` unless it is already queued. Returns whether it was added.
    pub fn push_back(&mut self, floor: u8) -> bool {
        if !self.members.insert(floor) {
            return false;
        }
        self.order.push_back(floor);
        true
    }

    pub fn peek_next(&self) -> Option<u8> {
        self.order.front().copied()
    }

    /// Removes the front entry only if it equals `floor`.
    pub fn pop_if_matches(&mut self, floor: u8) -> bool {
        if self.order.front() != Some(&floor) {
            return false;
        }
        self.order.pop_front();
        self.members.remove(&floor);
        true
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.members.contains(&floor)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.order.iter().copied().collect()
    }
}
