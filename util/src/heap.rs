/// Binary min-heap packed into a contiguous array.
///
/// Node `i` has parent `(i - 1) / 2` and children `2i + 1` and `2i + 2`.
/// The lowest priority value is always at the root. Order between elements
/// with equal priority depends on insertion order and heap shape and is not
/// otherwise specified.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P = i32> {
    nodes: Vec<(T, P)>,
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        PriorityQueue { nodes: Vec::new() }
    }
}

impl<T, P: Ord> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look at the lowest-priority item without removing it.
    pub fn peek(&self) -> Option<(&T, &P)> {
        self.nodes.first().map(|(t, p)| (t, p))
    }

    pub fn push(&mut self, item: T, priority: P) {
        // Add as the rightmost leaf, then bubble up.
        self.nodes.push((item, priority));
        let mut i = self.nodes.len() - 1;

        while i != 0 {
            let parent = (i - 1) / 2;
            if self.nodes[i].1 < self.nodes[parent].1 {
                self.nodes.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.nodes.is_empty() {
            return None;
        }

        // Rightmost leaf replaces the root and sinks down.
        let (ret, _) = self.nodes.swap_remove(0);
        let len = self.nodes.len();
        let mut i = 0;

        loop {
            let (left, right) = (2 * i + 1, 2 * i + 2);
            if left >= len {
                break;
            }

            let child = if right < len
                && self.nodes[right].1 < self.nodes[left].1
            {
                right
            } else {
                left
            };

            if self.nodes[child].1 < self.nodes[i].1 {
                self.nodes.swap(i, child);
                i = child;
            } else {
                break;
            }
        }

        Some(ret)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Check the heap property over the whole array.
    pub fn is_valid(&self) -> bool {
        (1..self.nodes.len())
            .all(|i| self.nodes[(i - 1) / 2].1 <= self.nodes[i].1)
    }
}

impl<T, P: Ord> Extend<(T, P)> for PriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.push(item, priority);
        }
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for PriorityQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut ret = PriorityQueue::new();
        ret.extend(iter);
        ret
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn basic() {
        let mut q = PriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None::<char>);

        q.push('c', 3);
        q.push('a', 1);
        q.push('d', 4);
        q.push('b', 2);
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek(), Some((&'a', &1)));

        assert_eq!(q.pop(), Some('a'));
        assert_eq!(q.pop(), Some('b'));
        assert_eq!(q.pop(), Some('c'));
        assert_eq!(q.pop(), Some('d'));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn single_element() {
        let mut q: PriorityQueue<_> = [((), 10)].into_iter().collect();
        assert_eq!(q.pop(), Some(()));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_priorities() {
        let mut q: PriorityQueue<u32> =
            (0..20).map(|i| (i, i as i32 % 3)).collect();
        let mut out = Vec::new();
        while let Some(i) = q.pop() {
            out.push(i as i32 % 3);
        }
        assert_eq!(out.len(), 20);
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Positive values push, other values pop.
    #[quickcheck]
    fn heap_property_holds(ops: Vec<i16>) -> bool {
        let mut q = PriorityQueue::new();
        for op in ops {
            if op > 0 {
                q.push(op, op);
            } else {
                q.pop();
            }
            if !q.is_valid() {
                return false;
            }
        }
        true
    }

    #[quickcheck]
    fn pops_in_order(xs: Vec<i32>) -> bool {
        let mut q: PriorityQueue<i32> = xs.iter().map(|&x| (x, x)).collect();
        let mut sorted = xs.clone();
        sorted.sort();

        let mut out = Vec::new();
        while let Some(x) = q.pop() {
            out.push(x);
        }
        out == sorted
    }
}
