//! Recency list over the slot pool
//!
//! Doubly-linked through the `prev`/`next` indices stored in each [`Slot`],
//! ordered from most recently used (head) to least recently used (tail).
//! Every operation is O(1); no traversal happens outside of iteration.

use crate::slot::Slot;

#[derive(Debug, Default)]
pub(crate) struct RecencyList {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Detach `idx` from the list. The slot must currently be linked.
    ///
    /// Repairs `head`/`tail` when `idx` sat at either end and leaves the
    /// slot with both links cleared.
    pub(crate) fn unlink(&mut self, slots: &mut [Slot], idx: usize) {
        let (prev, next) = {
            let slot = &mut slots[idx];
            (slot.prev.take(), slot.next.take())
        };

        match prev {
            Some(prev_idx) => slots[prev_idx].next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => slots[next_idx].prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
    }

    /// Splice an unlinked slot onto the head
    pub(crate) fn push_front(&mut self, slots: &mut [Slot], idx: usize) {
        debug_assert!(slots[idx].prev.is_none() && slots[idx].next.is_none());

        slots[idx].next = self.head;
        match self.head {
            Some(head_idx) => slots[head_idx].prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
        self.len += 1;
    }

    /// Mark a linked slot as most recently used
    pub(crate) fn move_to_front(&mut self, slots: &mut [Slot], idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(slots, idx);
        self.push_front(slots, idx);
    }

    /// Slot indices from most to least recently used
    pub(crate) fn iter<'a>(&self, slots: &'a [Slot]) -> Iter<'a> {
        Iter {
            slots,
            cursor: self.head,
        }
    }
}

pub(crate) struct Iter<'a> {
    slots: &'a [Slot],
    cursor: Option<usize>,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        self.cursor = self.slots[idx].next;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(n: usize) -> Vec<Slot> {
        (0..n).map(|_| Slot::default()).collect()
    }

    fn order(list: &RecencyList, slots: &[Slot]) -> Vec<usize> {
        list.iter(slots).collect()
    }

    /// Walk the list tail-to-head and check it mirrors the forward order
    fn assert_linked(list: &RecencyList, slots: &[Slot]) {
        let forward = order(list, slots);
        let mut backward = Vec::new();
        let mut cursor = list.tail();
        while let Some(idx) = cursor {
            backward.push(idx);
            cursor = slots[idx].prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
        assert_eq!(list.head().is_none(), list.len() == 0);
    }

    #[test]
    fn test_push_front() {
        let mut slots = slots(3);
        let mut list = RecencyList::new();

        list.push_front(&mut slots, 0);
        assert_eq!(list.head(), Some(0));
        assert_eq!(list.tail(), Some(0));

        list.push_front(&mut slots, 1);
        list.push_front(&mut slots, 2);
        assert_eq!(order(&list, &slots), vec![2, 1, 0]);
        assert_eq!(list.tail(), Some(0));
        assert_linked(&list, &slots);
    }

    #[test]
    fn test_unlink_middle() {
        let mut slots = slots(3);
        let mut list = RecencyList::new();
        for i in 0..3 {
            list.push_front(&mut slots, i);
        }

        list.unlink(&mut slots, 1);
        assert_eq!(order(&list, &slots), vec![2, 0]);
        assert!(slots[1].prev.is_none() && slots[1].next.is_none());
        assert_linked(&list, &slots);
    }

    #[test]
    fn test_unlink_tail_updates_tail() {
        let mut slots = slots(3);
        let mut list = RecencyList::new();
        for i in 0..3 {
            list.push_front(&mut slots, i);
        }

        list.unlink(&mut slots, 0);
        assert_eq!(list.tail(), Some(1));
        assert_linked(&list, &slots);
    }

    #[test]
    fn test_unlink_only_element() {
        let mut slots = slots(1);
        let mut list = RecencyList::new();
        list.push_front(&mut slots, 0);

        list.unlink(&mut slots, 0);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_move_to_front() {
        let mut slots = slots(4);
        let mut list = RecencyList::new();
        for i in 0..4 {
            list.push_front(&mut slots, i);
        }

        list.move_to_front(&mut slots, 0); // tail
        assert_eq!(order(&list, &slots), vec![0, 3, 2, 1]);
        assert_eq!(list.tail(), Some(1));

        list.move_to_front(&mut slots, 2); // middle
        assert_eq!(order(&list, &slots), vec![2, 0, 3, 1]);

        list.move_to_front(&mut slots, 2); // head
        assert_eq!(order(&list, &slots), vec![2, 0, 3, 1]);
        assert_linked(&list, &slots);
    }
}
