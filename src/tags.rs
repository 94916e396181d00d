use std::cell::{Ref, RefCell};
use std::rc::Rc;

use enclose::enclose;
use indexmap::IndexSet;

use crate::reconcile::Keyed;
use crate::{Config, Var};

/// The selected tags, unique and kept in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSet {
	tags: IndexSet<String>,
}

impl TagSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads a hidden field value: tags separated by `,` and optional
	/// whitespace. An empty field is an empty set.
	pub fn parse(text: &str) -> Self {
		if text.is_empty() {
			return Self::new();
		}
		text.split(',')
			.enumerate()
			.map(|(i, tag)| if i == 0 { tag } else { tag.trim_start() })
			.collect()
	}

	pub fn to_field(&self) -> String {
		self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(",")
	}

	/// Returns `false` if the tag was already selected.
	pub fn insert(&mut self, tag: impl Into<String>) -> bool {
		self.tags.insert(tag.into())
	}

	pub fn remove(&mut self, tag: &str) -> bool {
		self.tags.shift_remove(tag)
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.tags.contains(tag)
	}

	pub fn iter(&self) -> impl Iterator<Item = &String> {
		self.tags.iter()
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}
}

impl<S: Into<String>> FromIterator<S> for TagSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		TagSet {
			tags: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// The page elements a [`TagInput`] drives.
pub trait TagsView {
	/// A rendered chip of a selected tag.
	type Chip;

	fn set_input(&mut self, text: &str);
	fn set_submit_visible(&mut self, visible: bool);
	/// Shows or hides the candidate tag at `index` of the candidate list.
	fn set_candidate_visible(&mut self, index: usize, visible: bool);
	fn create_chip(&mut self, tag: &str) -> Self::Chip;
	fn remove_chip(&mut self, chip: Self::Chip);
	fn set_hidden_field(&mut self, value: &str);
	fn focus_input(&mut self);
}

/// Whether a candidate stays listed while `typed` is in the input.
pub fn candidate_matches(candidate: &str, typed: &str, min_len: usize) -> bool {
	typed.chars().count() < min_len || candidate.to_lowercase().contains(&typed.to_lowercase())
}

/// Picks existing tags or types new ones, rendering a chip for every
/// selected tag and keeping the hidden form field in sync.
pub struct TagInput<V: TagsView> {
	input: Var<String>,
	selected: Var<TagSet>,
	candidates: Rc<[String]>,
	min_len: usize,
	view: Rc<RefCell<V>>,
	chips: Rc<RefCell<Keyed<String, V::Chip>>>,
}

impl<V> TagInput<V>
where
	V: TagsView + 'static,
{
	/// Wires the widget and renders the tags of `hidden_field`.
	pub fn new(view: V, hidden_field: &str, candidates: Vec<String>, config: &Config) -> Self {
		let widget = TagInput {
			input: Var::new(String::new()),
			selected: Var::new(TagSet::new()),
			candidates: candidates.into(),
			min_len: config.min_tag_len,
			view: Rc::new(RefCell::new(view)),
			chips: Rc::new(RefCell::new(Keyed::new())),
		};

		let TagInput {
			view,
			chips,
			candidates,
			min_len,
			..
		} = &widget;
		let min_len = *min_len;

		widget.input.listen(enclose!((view) move |text: &String| {
			view.borrow_mut().set_input(text);
		}));

		widget.input.listen(enclose!((view) move |text: &String| {
			view.borrow_mut().set_submit_visible(text.chars().count() >= min_len);
		}));

		widget.input.listen(enclose!((view, candidates) move |text: &String| {
			let mut view = view.borrow_mut();
			for (index, candidate) in candidates.iter().enumerate() {
				view.set_candidate_visible(index, candidate_matches(candidate, text, min_len));
			}
		}));

		widget.selected.listen(enclose!((view, chips) move |tags: &TagSet| {
			let mut view = view.borrow_mut();
			chips.borrow_mut().reconcile(
				&mut *view,
				tags.iter(),
				String::clone,
				|view: &mut V, tag: &String| view.create_chip(tag),
				|view: &mut V, chip| view.remove_chip(chip),
			);
			view.set_hidden_field(&tags.to_field());
			view.focus_input();
		}));

		widget.selected.set(TagSet::parse(hidden_field));
		widget
	}

	/// The user typed into the input field.
	pub fn type_text(&self, text: &str) {
		self.input.set(text.to_string());
	}

	/// Adds the typed tag. Returns `false` when it is too short.
	pub fn submit(&self) -> bool {
		let tag = self.input.get();
		if tag.chars().count() < self.min_len {
			return false;
		}
		self.add(tag);
		self.input.set(String::new());
		true
	}

	/// Adds an existing tag. Candidates are not subject to the length check.
	pub fn pick(&self, tag: &str) {
		self.add(tag.to_string());
	}

	/// Adds the candidate at `index` of the candidate list.
	pub fn pick_candidate(&self, index: usize) {
		if let Some(tag) = self.candidates.get(index) {
			self.add(tag.clone());
		}
	}

	pub fn remove(&self, tag: &str) {
		if !self.selected.with(|tags| tags.contains(tag)) {
			return;
		}
		self.selected.update(|tags| {
			tags.remove(tag);
		});
	}

	pub fn input(&self) -> String {
		self.input.get()
	}

	pub fn selected(&self) -> TagSet {
		self.selected.get()
	}

	pub fn candidates(&self) -> &[String] {
		&self.candidates
	}

	pub fn view(&self) -> Ref<'_, V> {
		self.view.borrow()
	}

	fn add(&self, tag: String) {
		if self.selected.with(|tags| tags.contains(&tag)) {
			tracing::trace!(%tag, "tag already selected");
			return;
		}
		self.selected.update(|tags| {
			tags.insert(tag);
		});
	}
}
