use std::rc::Rc;

use enclose::enclose;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, FormData, HtmlDialogElement, HtmlFormElement, HtmlInputElement, Window};

use super::{elements, event_element, find, instantiate, on, template};
use crate::category::{js_number, UnusedCard, UsedCard};
use crate::{AllocationForm, CategoryReset, Config, MountError, ResetForm, ResetView};

const CATEGORY_ID: &str = "data-category-id";
const CARD: &str = "[data-category-id]";

pub struct DomResetView {
	window: Window,
	unused_container: Element,
	used_container: Element,
	unused_card: Element,
	used_card: Element,
	hidden_unused: HtmlInputElement,
	hidden_used: HtmlInputElement,
	free_funds: Element,
	dialog: &'static str,
}

fn set_text(card: &Element, selector: &str, text: &str) {
	for element in elements(card.query_selector_all(selector)) {
		element.set_text_content(Some(text));
	}
}

fn dialog(card: &Element, selector: &str) -> Option<HtmlDialogElement> {
	card.query_selector(selector)
		.ok()
		.flatten()
		.and_then(|element| element.dyn_into::<HtmlDialogElement>().ok())
}

impl DomResetView {
	fn card(&self, prototype: &Element, container: &Element, id: i64) -> Option<Element> {
		let card = instantiate(prototype)?;
		card.set_attribute(CATEGORY_ID, &id.to_string()).ok()?;
		container.append_child(&card).ok()?;
		Some(card)
	}
}

impl ResetView for DomResetView {
	type Card = Option<Element>;

	fn create_unused_card(&mut self, id: i64, content: &UnusedCard) -> Self::Card {
		let card = self.card(&self.unused_card, &self.unused_container, id)?;
		set_text(&card, ".name", &content.name);
		set_text(&card, ".amount", &content.amount);
		set_text(&card, ".input", &content.input);
		set_text(&card, ".spending-limit", &content.spending_limit);
		set_text(&card, ".period", &content.period);
		Some(card)
	}

	fn create_used_card(&mut self, id: i64, content: &UsedCard) -> Self::Card {
		let card = self.card(&self.used_card, &self.used_container, id)?;
		set_text(&card, ".name", &content.name);
		set_text(&card, ".amount-current", &content.amount_current);
		set_text(&card, ".amount-add", &content.amount_add);
		set_text(&card, ".input", &content.input);
		set_text(&card, ".spending-limit", &content.spending_limit);
		set_text(&card, ".period", &content.period);
		Some(card)
	}

	fn remove_card(&mut self, card: Self::Card) {
		if let Some(card) = card {
			card.remove();
		}
	}

	fn set_unused_field(&mut self, value: &str) {
		self.hidden_unused.set_value(value);
	}

	fn set_used_field(&mut self, value: &str) {
		self.hidden_used.set_value(value);
	}

	fn set_free_funds(&mut self, text: &str) {
		self.free_funds.set_text_content(Some(text));
	}

	fn open_dialog(&mut self, card: &Self::Card, form: &AllocationForm) {
		let Some(dialog) = card.as_ref().and_then(|card| dialog(card, self.dialog)) else {
			return;
		};
		let values = [
			(AllocationForm::ADD_AMOUNT, js_number(form.add_amount)),
			(AllocationForm::BUDGET_INPUT, js_number(form.budget_input)),
			(AllocationForm::SPENDING_LIMIT, js_number(form.spending_limit)),
			(AllocationForm::INPUT_INTERVAL, form.input_interval.to_string()),
			(AllocationForm::INPUT_PERIOD, form.input_period.to_string()),
		];
		for (name, value) in values {
			let field = dialog
				.query_selector(&format!("[name='{name}']"))
				.ok()
				.flatten()
				.and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
			if let Some(field) = field {
				field.set_value(&value);
			}
		}
		if let Err(err) = dialog.show_modal() {
			tracing::error!(?err, "could not open allocation dialog");
		}
	}

	fn close_dialog(&mut self, card: &Self::Card) {
		if let Some(dialog) = card.as_ref().and_then(|card| dialog(card, self.dialog)) {
			dialog.close();
		}
	}

	fn warn(&mut self, message: &str) {
		if let Err(err) = self.window.alert_with_message(message) {
			tracing::debug!(?err, message, "could not show warning");
		}
	}
}

fn card_id(element: &Element) -> Option<i64> {
	element
		.closest(CARD)
		.ok()
		.flatten()
		.and_then(|card| card.get_attribute(CATEGORY_ID))
		.and_then(|id| id.parse().ok())
}

pub(crate) fn mount_all(document: &Document, config: &Config) {
	let markup = &config.markup;
	let templates = template(document, markup.unused_card_template)
		.and_then(|unused| Ok((unused, template(document, markup.used_card_template)?)));
	let (unused_card, used_card) = match templates {
		Ok(templates) => templates,
		Err(err) => {
			tracing::debug!(%err, "category reset forms not mounted");
			return;
		}
	};

	for container in elements(document.query_selector_all(markup.reset_form)) {
		if let Err(err) = mount(&container, &unused_card, &used_card, config) {
			tracing::debug!(%err, "skipping category reset form");
		}
	}
}

fn mount(
	container: &Element,
	unused_card: &Element,
	used_card: &Element,
	config: &Config,
) -> Result<(), MountError> {
	let markup = &config.markup;
	let window = web_sys::window().ok_or(MountError::MissingElement("window"))?;

	let hidden_unused: HtmlInputElement = find(container.query_selector(markup.hidden_unused), markup.hidden_unused)?;
	let hidden_used: HtmlInputElement = find(container.query_selector(markup.hidden_used), markup.hidden_used)?;
	hidden_unused.set_type("hidden");
	hidden_used.set_type("hidden");

	let periods = container
		.get_attribute("data-periods")
		.ok_or(MountError::MissingElement("data-periods"))?;
	let unused_container: Element =
		find(container.query_selector(markup.unused_container), markup.unused_container)?;
	let used_container: Element = find(container.query_selector(markup.used_container), markup.used_container)?;
	let free_funds: Element = find(container.query_selector(markup.free_funds), markup.free_funds)?;

	let free_text = free_funds.text_content().unwrap_or_default();
	let unused_text = hidden_unused.value();
	let used_text = hidden_used.value();
	let form = ResetForm {
		unused: &unused_text,
		used: &used_text,
		free_funds: &free_text,
		periods: &periods,
	};
	let view = DomResetView {
		window,
		unused_container: unused_container.clone(),
		used_container: used_container.clone(),
		unused_card: unused_card.clone(),
		used_card: used_card.clone(),
		hidden_unused,
		hidden_used,
		free_funds,
		dialog: markup.card_dialog,
	};
	let widget = Rc::new(CategoryReset::new(view, form, config)?);

	let (card_dialog, dialog_close) = (markup.card_dialog, markup.dialog_close);
	on(&unused_container, "click", enclose!((widget) move |event: Event| {
		let Some(target) = event_element(&event) else {
			return;
		};
		let Some(id) = card_id(&target) else {
			return;
		};
		// Clicks inside a dialog, its backdrop included, never reach the card.
		if target.closest(card_dialog).ok().flatten().is_some() {
			event.stop_propagation();
			if target.closest(dialog_close).ok().flatten().is_some() {
				widget.close_dialog(id);
			}
			return;
		}
		if let Err(err) = widget.select_unused(id) {
			tracing::warn!(%err, "could not open allocation dialog");
		}
	}));

	on(&unused_container, "submit", enclose!((widget) move |event: Event| {
		event.prevent_default();
		let Some(target) = event_element(&event) else {
			return;
		};
		let Some(id) = card_id(&target) else {
			return;
		};
		let Some(data) = target
			.dyn_into::<HtmlFormElement>()
			.ok()
			.and_then(|form| FormData::new_with_form(&form).ok())
		else {
			return;
		};
		let result = AllocationForm::parse(|name| data.get(name).as_string())
			.and_then(|form| widget.submit_allocation(id, &form));
		if let Err(err) = result {
			tracing::warn!(%err, id, "allocation not committed");
		}
	}));

	on(&used_container, "click", enclose!((widget) move |event: Event| {
		let Some(id) = event_element(&event).as_ref().and_then(card_id) else {
			return;
		};
		if let Err(err) = widget.select_used(id) {
			tracing::warn!(%err, "could not return category");
		}
	}));

	Ok(())
}
