use std::borrow::Borrow;
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded set of recently seen item ids with FIFO eviction.
///
/// `ids` and `order` always hold the same elements; `order` is oldest-first.
/// Not synchronized: only one store check runs at a time.
#[derive(Debug)]
pub struct RecencyCache<K = String> {
    ids: HashSet<K>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K> RecencyCache<K>
where
    K: Hash + Eq + Clone + Debug,
{
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `id` and returns `true` the first time it is seen. Returns `false`
    /// while the id is still resident.
    pub fn observe<Q>(&mut self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if self.ids.contains(id) {
            return false;
        }

        self.ids.insert(id.to_owned());
        self.order.push_back(id.to_owned());

        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove::<K>(&oldest);
                tracing::debug!("Evicted {:?} from recency cache", oldest);
            }
        }

        true
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K> Default for RecencyCache<K>
where
    K: Hash + Eq + Clone + Debug,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
