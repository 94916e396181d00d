use std::hash::Hash;

use fxhash::FxHashSet;
use indexmap::IndexMap;

/// Additions and removals needed to bring a rendered list in line
/// with a new collection value.
#[derive(Debug)]
pub struct Diff<'a, K, T> {
	/// Items without a rendered element, in collection order.
	pub created: Vec<(K, &'a T)>,
	/// Keys of rendered elements whose item is gone.
	pub removed: Vec<K>,
}

impl<'a, K, T> Diff<'a, K, T> {
	pub fn is_empty(&self) -> bool {
		self.created.is_empty() && self.removed.is_empty()
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Changes {
	pub created: usize,
	pub removed: usize,
}

/// Rendered elements of a list, keyed by item identity and kept in
/// insertion order.
///
/// Reconciling against a new collection only creates elements for new
/// keys and removes elements for vanished keys. Elements of keys that
/// are still present are never touched.
pub struct Keyed<K, E> {
	elements: IndexMap<K, E>,
}

impl<K, E> Default for Keyed<K, E> {
	fn default() -> Self {
		Keyed {
			elements: IndexMap::new(),
		}
	}
}

impl<K, E> Keyed<K, E>
where
	K: Hash + Eq + Clone,
{
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &K) -> Option<&E> {
		self.elements.get(key)
	}

	pub fn contains(&self, key: &K) -> bool {
		self.elements.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &K> {
		self.elements.keys()
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn diff<'a, T: 'a>(
		&self,
		items: impl IntoIterator<Item = &'a T>,
		key: impl Fn(&T) -> K,
	) -> Diff<'a, K, T> {
		let mut seen = FxHashSet::default();
		let mut created = Vec::new();

		for item in items {
			let k = key(item);
			if !seen.insert(k.clone()) {
				continue;
			}
			if !self.elements.contains_key(&k) {
				created.push((k, item));
			}
		}

		let removed = self
			.elements
			.keys()
			.filter(|k| !seen.contains(*k))
			.cloned()
			.collect();

		Diff { created, removed }
	}

	/// Applies `diff`, building and tearing down elements through `cx`.
	pub fn apply<C: ?Sized, T>(
		&mut self,
		cx: &mut C,
		diff: Diff<'_, K, T>,
		mut create: impl FnMut(&mut C, &T) -> E,
		mut remove: impl FnMut(&mut C, E),
	) -> Changes {
		let mut changes = Changes::default();

		for (key, item) in diff.created {
			let element = create(cx, item);
			self.elements.insert(key, element);
			changes.created += 1;
		}

		for key in diff.removed {
			if let Some(element) = self.elements.shift_remove(&key) {
				remove(cx, element);
				changes.removed += 1;
			}
		}

		changes
	}

	pub fn reconcile<'a, C: ?Sized, T: 'a>(
		&mut self,
		cx: &mut C,
		items: impl IntoIterator<Item = &'a T>,
		key: impl Fn(&T) -> K,
		create: impl FnMut(&mut C, &T) -> E,
		remove: impl FnMut(&mut C, E),
	) -> Changes {
		let diff = self.diff(items, key);
		let changes = self.apply(cx, diff, create, remove);
		tracing::trace!(
			created = changes.created,
			removed = changes.removed,
			"reconciled"
		);
		changes
	}
}
