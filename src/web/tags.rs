use std::rc::Rc;

use enclose::enclose;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, Node};

use super::{elements, event_element, find, instantiate, on, template};
use crate::{Config, MountError, TagInput, TagsView};

pub struct DomTagsView {
	input: HtmlInputElement,
	submit: HtmlElement,
	candidates: Vec<HtmlElement>,
	hidden: HtmlInputElement,
	chips: Element,
	chip: Element,
}

impl TagsView for DomTagsView {
	type Chip = Option<Element>;

	fn set_input(&mut self, text: &str) {
		self.input.set_value(text);
	}

	fn set_submit_visible(&mut self, visible: bool) {
		let visibility = if visible { "visible" } else { "hidden" };
		if let Err(err) = self.submit.style().set_property("visibility", visibility) {
			tracing::debug!(?err, "could not toggle tag submit button");
		}
	}

	fn set_candidate_visible(&mut self, index: usize, visible: bool) {
		if let Some(candidate) = self.candidates.get(index) {
			let display = if visible { "block" } else { "none" };
			if let Err(err) = candidate.style().set_property("display", display) {
				tracing::debug!(?err, index, "could not filter candidate tag");
			}
		}
	}

	fn create_chip(&mut self, tag: &str) -> Self::Chip {
		let chip = instantiate(&self.chip)?;
		chip.set_text_content(Some(tag));
		self.chips.append_child(&chip).ok()?;
		Some(chip)
	}

	fn remove_chip(&mut self, chip: Self::Chip) {
		if let Some(chip) = chip {
			chip.remove();
		}
	}

	fn set_hidden_field(&mut self, value: &str) {
		self.hidden.set_value(value);
	}

	fn focus_input(&mut self) {
		if let Err(err) = self.input.focus() {
			tracing::debug!(?err, "could not focus tag input");
		}
	}
}

struct Templates {
	field: Element,
	chip: Element,
}

fn templates(document: &Document, config: &Config) -> Result<Templates, MountError> {
	let markup = &config.markup;
	// Candidate tags are server rendered, their template only has to exist.
	template(document, markup.tag_template)?;
	Ok(Templates {
		field: template(document, markup.tag_field_template)?,
		chip: template(document, markup.selected_tag_template)?,
	})
}

pub(crate) fn mount_all(document: &Document, config: &Config) {
	let markup = &config.markup;
	let templates = match templates(document, config) {
		Ok(templates) => templates,
		Err(err) => {
			tracing::debug!(%err, "tag inputs not mounted");
			return;
		}
	};

	for container in elements(document.query_selector_all(markup.tag_input)) {
		if let Err(err) = mount(&container, &templates, config) {
			tracing::debug!(%err, "skipping tag input");
		}
	}
}

fn mount(container: &Element, templates: &Templates, config: &Config) -> Result<(), MountError> {
	let markup = &config.markup;

	let hidden: HtmlInputElement = find(
		container.query_selector(markup.hidden_tag_field),
		markup.hidden_tag_field,
	)?;
	let candidates: Vec<HtmlElement> = elements(container.query_selector_all(markup.all_tags))
		.into_iter()
		.filter_map(|element| element.dyn_into::<HtmlElement>().ok())
		.collect();

	let field = instantiate(&templates.field).ok_or(MountError::MissingElement(markup.tag_field_template))?;
	let submit: HtmlElement = find(field.query_selector(markup.tag_input_submit), markup.tag_input_submit)?;
	let input: HtmlInputElement = find(field.query_selector(markup.tag_input_field), markup.tag_input_field)?;
	let chips: Element = find(field.query_selector(markup.selected_tags), markup.selected_tags)?;

	let before: &Node = &hidden;
	container
		.insert_before(&field, Some(before))
		.map_err(|_| MountError::MissingElement(markup.hidden_tag_field))?;
	hidden.set_type("hidden");

	let texts = candidates
		.iter()
		.map(|candidate| candidate.text_content().unwrap_or_default())
		.collect();
	let view = DomTagsView {
		input: input.clone(),
		submit: submit.clone(),
		candidates: candidates.clone(),
		hidden: hidden.clone(),
		chips: chips.clone(),
		chip: templates.chip.clone(),
	};
	let widget = Rc::new(TagInput::new(view, &hidden.value(), texts, config));

	on(&input, "input", enclose!((widget, input) move |_: Event| {
		widget.type_text(&input.value());
	}));

	on(&input, "keydown", enclose!((widget) move |event: Event| {
		let is_enter = event
			.dyn_ref::<KeyboardEvent>()
			.map_or(false, |key| key.key() == "Enter");
		if is_enter {
			event.prevent_default();
			widget.submit();
		}
	}));

	on(&submit, "click", enclose!((widget) move |_: Event| {
		widget.submit();
	}));

	for (index, candidate) in candidates.iter().enumerate() {
		on(candidate, "click", enclose!((widget) move |_: Event| {
			widget.pick_candidate(index);
		}));
	}

	on(&chips, "click", enclose!((widget, chips) move |event: Event| {
		let Some(chip) = event_element(&event) else {
			return;
		};
		if chips.is_same_node(chip.parent_node().as_ref()) {
			widget.remove(&chip.text_content().unwrap_or_default());
		}
	}));

	Ok(())
}
