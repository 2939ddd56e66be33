//! LRU List Module
//!
//! Arena-backed doubly-linked list that encodes recency order.
//!
//! Nodes live in a `Vec` and link to each other by index, so moving an entry
//! to the front or unlinking it from the middle is O(1) given its `NodeId`.
//! Freed slots are recycled through a free list.

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
///
/// A handle stays valid until the node it names is removed; after that the
/// slot may be reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    item: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Recency-ordered list of items.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Vec<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts an item at the front (most recent) and returns its handle.
    pub fn push_front(&mut self, item: T) -> NodeId {
        let node = Node {
            item: Some(item),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id.0) {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove ==
    /// Unlinks a node and returns its item. The slot is recycled.
    ///
    /// # Panics
    /// Panics if `id` does not name a live node.
    pub fn remove(&mut self, id: NodeId) -> T {
        self.unlink(id.0);
        let item = self.nodes[id.0]
            .item
            .take()
            .expect("LruList::remove called with a stale handle");
        self.free.push(id.0);
        self.len -= 1;
        item
    }

    // == Accessors ==
    /// Returns the item behind a handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.item.as_ref())
    }

    /// Returns the item behind a handle, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.item.as_mut())
    }

    /// Handle of the most recently used node.
    pub fn front(&self) -> Option<NodeId> {
        self.head.map(NodeId)
    }

    /// Handle of the least recently used node.
    pub fn back(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    /// Next node toward the front (more recently used).
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.prev).map(NodeId)
    }

    /// Next node toward the back (less recently used).
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.next).map(NodeId)
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates items from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    // == Internal Linking ==
    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.list.nodes[idx];
        self.current = node.next;
        node.item.as_ref()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_list_new() {
        let list: LruList<u32> = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = LruList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.get(list.back().unwrap()), Some(&"key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        list.move_to_front(a);

        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.get(list.back().unwrap()), Some(&"b"));
    }

    #[test]
    fn test_move_head_to_front_is_noop() {
        let mut list = LruList::new();

        list.push_front("a");
        let b = list.push_front("b");
        list.move_to_front(b);

        assert_eq!(order(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut list = LruList::new();

        list.push_front("key1");
        let key2 = list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.remove(key2), "key2");

        assert_eq!(list.len(), 2);
        assert_eq!(order(&list), vec!["key3", "key1"]);
    }

    #[test]
    fn test_remove_back_repeatedly() {
        let mut list = LruList::new();

        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        let mut evicted = Vec::new();
        while let Some(back) = list.back() {
            evicted.push(list.remove(back));
        }

        assert_eq!(evicted, vec!["a", "b", "c"]);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
    }

    #[test]
    fn test_free_slots_are_reused() {
        let mut list = LruList::new();

        for round in 0..10 {
            let id = list.push_front(round);
            list.remove(id);
        }
        list.push_front(99);

        assert_eq!(list.nodes.len(), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_walk_back_to_front() {
        let mut list = LruList::new();

        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        let mut walked = Vec::new();
        let mut cursor = list.back();
        while let Some(id) = cursor {
            walked.push(*list.get(id).unwrap());
            cursor = list.prev(id);
        }

        assert_eq!(walked, vec!["a", "b", "c"]);
        assert_eq!(list.next(list.front().unwrap()), list.prev(list.back().unwrap()));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = LruList::new();

        let id = list.push_front(String::from("old"));
        *list.get_mut(id).unwrap() = String::from("new");

        assert_eq!(list.get(id).map(String::as_str), Some("new"));
    }

    #[test]
    fn test_clear() {
        let mut list = LruList::new();

        list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }
}
