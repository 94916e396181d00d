use budget_widgets::tags::candidate_matches;
use budget_widgets::{Config, TagInput, TagSet};

use crate::fake::FakeTags;

fn candidates() -> Vec<String> {
	vec!["Food".to_string(), "Fuel".to_string(), "Rent".to_string()]
}

fn mount(hidden: &str) -> TagInput<FakeTags> {
	TagInput::new(FakeTags::default(), hidden, candidates(), &Config::default())
}

#[test]
fn short_tags_are_rejected() {
	crate::init_tracing();
	let tags = mount("");

	tags.type_text("ab");
	assert!(!tags.submit());
	assert!(tags.selected().is_empty());
	assert_eq!(tags.input(), "ab");

	tags.type_text("abc");
	assert!(tags.submit());
	assert_eq!(tags.view().chip_texts(), vec!["abc"]);
	assert_eq!(tags.view().hidden, "abc");
	assert_eq!(tags.view().input, "");
	assert_eq!(tags.input(), "");
}

#[test]
fn length_is_counted_in_characters() {
	let tags = mount("");

	tags.type_text("éé");
	assert!(!tags.view().submit_visible);
	assert!(!tags.submit());

	tags.type_text("ééé");
	assert!(tags.view().submit_visible);
	assert!(tags.submit());
	assert_eq!(tags.view().hidden, "ééé");
}

#[test]
fn custom_min_len() {
	let tags = TagInput::new(
		FakeTags::default(),
		"",
		Vec::new(),
		&Config::default().with_min_tag_len(1),
	);
	tags.type_text("x");
	assert!(tags.submit());
	assert_eq!(tags.view().chip_texts(), vec!["x"]);
}

#[test]
fn submit_button_follows_input_length() {
	let tags = mount("");

	tags.type_text("re");
	assert!(!tags.view().submit_visible);
	tags.type_text("ren");
	assert!(tags.view().submit_visible);
	tags.type_text("");
	assert!(!tags.view().submit_visible);
}

#[test]
fn adding_twice_keeps_one_chip() {
	let tags = mount("");

	tags.pick("Food");
	let created = tags.view().created;
	tags.pick("Food");
	tags.type_text("Food");
	tags.submit();

	assert_eq!(tags.view().chip_texts(), vec!["Food"]);
	assert_eq!(tags.view().created, created);
	assert_eq!(tags.selected().len(), 1);
}

#[test]
fn candidates_are_filtered_once_long_enough() {
	let tags = mount("");

	tags.type_text("fu");
	assert_eq!(tags.view().candidates_visible, vec![true, true, true]);

	tags.type_text("FOO");
	assert_eq!(tags.view().candidates_visible, vec![true, false, false]);

	tags.type_text("en");
	assert_eq!(tags.view().candidates_visible, vec![true, true, true]);

	tags.type_text("ent");
	assert_eq!(tags.view().candidates_visible, vec![false, false, true]);

	tags.type_text("xyz");
	assert_eq!(tags.view().candidates_visible, vec![false, false, false]);
}

#[test]
fn matching_ignores_case() {
	assert!(candidate_matches("Groceries", "CER", 3));
	assert!(candidate_matches("Groceries", "xy", 3));
	assert!(!candidate_matches("Groceries", "xyz", 3));
}

#[test]
fn picking_skips_the_length_check() {
	let tags = mount("");

	tags.pick("ab");
	assert_eq!(tags.view().chip_texts(), vec!["ab"]);

	tags.pick_candidate(2);
	tags.pick_candidate(7);
	assert_eq!(tags.view().chip_texts(), vec!["ab", "Rent"]);
	assert_eq!(tags.view().hidden, "ab,Rent");
}

#[test]
fn existing_chips_survive_additions_and_removals() {
	let tags = mount("Food, Rent");
	let food = tags.view().chip_id("Food");
	let rent = tags.view().chip_id("Rent");

	tags.pick("Fuel");
	assert_eq!(tags.view().chip_id("Food"), food);
	assert_eq!(tags.view().chip_id("Rent"), rent);

	tags.remove("Food");
	assert_eq!(tags.view().chip_texts(), vec!["Rent", "Fuel"]);
	assert_eq!(tags.view().chip_id("Rent"), rent);
	assert_eq!(tags.view().removed, vec![food.unwrap()]);
	assert_eq!(tags.view().hidden, "Rent,Fuel");
}

#[test]
fn removing_an_unknown_tag_changes_nothing() {
	let tags = mount("Food");
	let focused = tags.view().focused;

	tags.remove("Rent");
	assert_eq!(tags.view().chip_texts(), vec!["Food"]);
	assert_eq!(tags.view().focused, focused);
}

#[test]
fn renders_the_initial_field() {
	let tags = mount("Food,  Rent,Fuel");
	assert_eq!(tags.view().chip_texts(), vec!["Food", "Rent", "Fuel"]);
	assert_eq!(tags.view().hidden, "Food,Rent,Fuel");
	assert_eq!(tags.view().focused, 1);

	let empty = mount("");
	assert!(empty.view().chips.is_empty());
	assert_eq!(empty.view().hidden, "");
}

#[test]
fn parses_the_hidden_field() {
	assert!(TagSet::parse("").is_empty());

	let set = TagSet::parse("a, b,  c,a");
	assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
	assert_eq!(set.to_field(), "a,b,c");
	assert_eq!(TagSet::parse(&set.to_field()), set);

	// only the separator's trailing whitespace is dropped
	assert_eq!(TagSet::parse(" a ,b").to_field(), " a ,b");
}
