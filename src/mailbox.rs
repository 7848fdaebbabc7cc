/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! the per-actor mailbox: an ordered queue of envelopes with stable, predicate-based
//! first-match extraction. Mailboxes are normally short because messages that *would*
//! match an outstanding selective receive are handed off directly rather than enqueued
//! (see `Actor::send`) - pathological growth here is a workload property, not a bug in
//! this data structure.

use std::collections::VecDeque;

use crate::message::Envelope;

#[derive(Default)]
pub struct MessageQueue {
    entries: VecDeque<Envelope>,
}

impl MessageQueue {
    pub fn new() -> Self {
        MessageQueue { entries: VecDeque::new() }
    }

    #[inline]
    pub fn append(&mut self, entry: Envelope) {
        self.entries.push_back(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// removes and returns the first entry satisfying `pred`, preserving the relative order
    /// of everything that stays behind.
    pub fn extract_first(&mut self, mut pred: impl FnMut(&Envelope) -> bool) -> Option<Envelope> {
        let idx = self.entries.iter().position(|e| pred(e))?;
        self.entries.remove(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Timeout;

    fn env(n: i32) -> Envelope {
        Envelope::new(Box::new(n), None, None)
    }

    #[test]
    fn fifo_extraction_among_matches() {
        let mut q = MessageQueue::new();
        q.append(env(1));
        q.append(Envelope::new(Box::new("two".to_string()), None, None));
        q.append(env(3));

        let found = q.extract_first(|e| e.msg.as_any().is::<String>()).unwrap();
        assert_eq!(found.msg.as_any().downcast_ref::<String>().unwrap(), "two");

        // order of the rest is preserved
        let first = q.extract_first(|_| true).unwrap();
        assert_eq!(*first.msg.as_any().downcast_ref::<i32>().unwrap(), 1);
        let second = q.extract_first(|_| true).unwrap();
        assert_eq!(*second.msg.as_any().downcast_ref::<i32>().unwrap(), 3);
        assert!(q.is_empty());
    }

    #[test]
    fn no_match_leaves_queue_untouched() {
        let mut q = MessageQueue::new();
        q.append(env(1));
        assert!(q.extract_first(|e| e.msg.as_any().is::<Timeout>()).is_none());
        assert_eq!(q.len(), 1);
    }
}
