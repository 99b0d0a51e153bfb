use crate::spt::{EntryId, SptEntry};
use crate::traversal::TraversalKey;
use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

/// Maps traversal keys to the best entry found so far
pub trait BestWeightMap: Default {
  fn get(&self, key: TraversalKey) -> Option<EntryId>;
  fn insert(&mut self, key: TraversalKey, id: EntryId);
  fn len(&self) -> usize;
}

pub type HashBestMap = HashMap<TraversalKey, EntryId>;

impl BestWeightMap for HashBestMap {
  fn get(&self, key: TraversalKey) -> Option<EntryId> {
    HashMap::get(self, &key).cloned()
  }

  fn insert(&mut self, key: TraversalKey, id: EntryId) {
    HashMap::insert(self, key, id);
  }

  fn len(&self) -> usize {
    HashMap::len(self)
  }
}

/// Best weight map indexed directly by the key. Grows on demand, trades memory for speed on
/// searches which visit a large share of the graph.
#[derive(Clone, Debug, Default)]
pub struct DenseMap {
  slots: Vec<Option<EntryId>>,
  len: usize,
}

impl BestWeightMap for DenseMap {
  fn get(&self, key: TraversalKey) -> Option<EntryId> {
    self.slots.get(key.0 as usize).cloned().flatten()
  }

  fn insert(&mut self, key: TraversalKey, id: EntryId) {
    let index = key.0 as usize;
    if index >= self.slots.len() {
      self.slots.resize(index + 1, None);
    }
    if self.slots[index].replace(id).is_none() {
      self.len += 1;
    }
  }

  fn len(&self) -> usize {
    self.len
  }
}

type MinQueue = PriorityQueue<EntryId, Reverse<OrderedFloat<f64>>, DefaultHashBuilder>;

/// One direction of a search: the shortest path tree built so far, the entries which are
/// still to be settled and the best entry of every traversal key.
pub struct SearchSpace<M = HashBestMap> {
  entries: Vec<SptEntry>,
  queue: MinQueue,
  best: M,
}

impl<M: BestWeightMap> Default for SearchSpace<M> {
  fn default() -> Self {
    SearchSpace {
      entries: Vec::new(),
      queue: PriorityQueue::with_default_hasher(),
      best: M::default(),
    }
  }
}

impl<M: BestWeightMap> SearchSpace<M> {
  pub fn new() -> Self {
    Default::default()
  }

  /// Adds a root to the queue. Only registered in the best map when it has a key.
  pub fn add_root(&mut self, entry: SptEntry, key: Option<TraversalKey>) -> EntryId {
    let id = self.push_entry(entry);
    if let Some(key) = key {
      self.best.insert(key, id);
    }
    id
  }

  /// Adds a new entry for a key which has none yet
  pub fn insert(&mut self, key: TraversalKey, entry: SptEntry) -> EntryId {
    let id = self.push_entry(entry);
    self.best.insert(key, id);
    id
  }

  fn push_entry(&mut self, entry: SptEntry) -> EntryId {
    debug_assert!(entry.weight.is_finite(), "infinite weight in the queue");
    let id = EntryId(self.entries.len() as u32);
    let weight = entry.weight;
    self.entries.push(entry);
    self.queue.push(id, Reverse(OrderedFloat(weight)));
    id
  }

  /// Mutates an entry in place and reinserts it with its new weight
  pub fn update<F: FnOnce(&mut SptEntry)>(&mut self, id: EntryId, f: F) {
    self.queue.remove(&id);
    let entry = &mut self.entries[id.index()];
    f(entry);
    debug_assert!(entry.weight.is_finite(), "infinite weight in the queue");
    self.queue.push(id, Reverse(OrderedFloat(entry.weight)));
  }

  /// Stores `entry` if its visited path is strictly better than the current best of `key`.
  /// An existing entry is updated in place. Returns the changed entry.
  pub fn relax(&mut self, key: TraversalKey, entry: SptEntry) -> Option<EntryId> {
    match self.best(key) {
      Some(id) => {
        if entry.weight_of_visited_path >= self.entry(id).weight_of_visited_path {
          return None;
        }
        self.update(id, |existing| *existing = entry);
        Some(id)
      }
      None => Some(self.insert(key, entry)),
    }
  }

  pub fn best(&self, key: TraversalKey) -> Option<EntryId> {
    self.best.get(key)
  }

  pub fn best_entry(&self, key: TraversalKey) -> Option<&SptEntry> {
    self.best(key).map(|id| self.entry(id))
  }

  pub fn pop(&mut self) -> Option<EntryId> {
    self.queue.pop().map(|(id, _)| id)
  }

  pub fn peek_weight(&self) -> Option<f64> {
    self.queue.peek().map(|(_, weight)| (weight.0).0)
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  pub fn entry(&self, id: EntryId) -> &SptEntry {
    &self.entries[id.index()]
  }

  /// Number of entries created by this search
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Walks the parent chain from `id` to the root. The first element is `id`.
  pub fn unwind(&self, id: EntryId) -> Vec<EntryId> {
    let mut result = vec![id];
    let mut current = id;
    while let Some(parent) = self.entry(current).parent {
      result.push(parent);
      current = parent;
    }
    result
  }
}
