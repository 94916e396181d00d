use std::time::Duration;

/// Tunables shared by every widget on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Minimum length of a tag typed into the input field.
	pub min_tag_len: usize,
	/// How long a flashed alert stays open.
	pub alert_timeout: Duration,
	/// Text of the blocking warning shown when an allocation exceeds the free funds.
	pub insufficient_funds_message: String,
	pub markup: Markup,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			min_tag_len: 3,
			alert_timeout: Duration::from_millis(3000),
			insufficient_funds_message: "Not enough free funds".to_string(),
			markup: Markup::default(),
		}
	}
}

impl Config {
	pub fn with_min_tag_len(mut self, len: usize) -> Self {
		self.min_tag_len = len;
		self
	}

	pub fn with_alert_timeout(mut self, timeout: Duration) -> Self {
		self.alert_timeout = timeout;
		self
	}

	pub fn with_insufficient_funds_message(mut self, message: impl Into<String>) -> Self {
		self.insufficient_funds_message = message.into();
		self
	}

	pub fn with_markup(mut self, markup: Markup) -> Self {
		self.markup = markup;
		self
	}
}

/// Selectors and ids the DOM layer looks up.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
	pub tag_input: &'static str,
	pub tag_field_template: &'static str,
	pub tag_template: &'static str,
	pub selected_tag_template: &'static str,
	pub hidden_tag_field: &'static str,
	pub all_tags: &'static str,
	pub tag_input_submit: &'static str,
	pub tag_input_field: &'static str,
	pub selected_tags: &'static str,

	pub reset_form: &'static str,
	pub unused_card_template: &'static str,
	pub used_card_template: &'static str,
	pub hidden_unused: &'static str,
	pub hidden_used: &'static str,
	pub unused_container: &'static str,
	pub used_container: &'static str,
	pub free_funds: &'static str,
	/// The allocation dialog inside an unused category card.
	pub card_dialog: &'static str,

	pub dialog_toggle: &'static str,
	pub dialog_close: &'static str,

	pub alert: &'static str,
	pub alert_text: &'static str,
	pub alert_close: &'static str,

	pub hamburger_sidebar: &'static str,
	pub hamburger_toggle: &'static str,
	pub hamburger_input: &'static str,
}

impl Default for Markup {
	fn default() -> Self {
		Markup {
			tag_input: ".tag-input",
			tag_field_template: ".js-field-template",
			tag_template: ".tag-template",
			selected_tag_template: ".selected-tag-template",
			hidden_tag_field: ".hidden-tag-field",
			all_tags: ".all-tags > div",
			tag_input_submit: ".tag-input-submit",
			tag_input_field: ".tag-input-field",
			selected_tags: ".selected-tags",

			reset_form: ".categories-reset-form",
			unused_card_template: ".unused-category-card-template",
			used_card_template: ".used-category-card-template",
			hidden_unused: ".hidden-unused-categories",
			hidden_used: ".hidden-used-categories",
			unused_container: ".unused-categories-container",
			used_container: ".used-categories-container",
			free_funds: ".free-funds",
			card_dialog: ".dialog",

			dialog_toggle: ".toggle-dialog",
			dialog_close: ".dialog-close",

			alert: ".alert-msg",
			alert_text: ".alert-msg > p",
			alert_close: ".alert-msg > button",

			hamburger_sidebar: "hamburger-sidebar",
			hamburger_toggle: "hamburger-menu-toggle",
			hamburger_input: "hamburger-menu-input",
		}
	}
}
