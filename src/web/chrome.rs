use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use enclose::enclose;
use fxhash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlDialogElement, HtmlElement, HtmlInputElement, Node, Window};

use super::{elements, find, on};
use crate::{Alert, AlertKind, AlertView, Config, DialogToggle, DialogView, Hamburger, MenuView, MountError, Scheduler, TimerToken};

struct DomDialogView(HtmlDialogElement);

impl DialogView for DomDialogView {
	fn show_modal(&mut self) {
		if let Err(err) = self.0.show_modal() {
			tracing::error!(?err, "could not open dialog");
		}
	}

	fn close(&mut self) {
		self.0.close();
	}
}

pub(crate) fn mount_dialogs(document: &Document, config: &Config) {
	let markup = &config.markup;
	for trigger in elements(document.query_selector_all(markup.dialog_toggle)) {
		let Some(dialog) = trigger
			.next_element_sibling()
			.and_then(|sibling| sibling.dyn_into::<HtmlDialogElement>().ok())
		else {
			tracing::debug!("dialog toggle without a dialog");
			continue;
		};

		let open = dialog.get_attribute("data-open");
		let close_buttons = elements(dialog.query_selector_all(markup.dialog_close));
		let toggle = Rc::new(RefCell::new(DialogToggle::mount(DomDialogView(dialog), open.as_deref())));

		on(&trigger, "click", enclose!((toggle) move |_: Event| {
			toggle.borrow_mut().trigger();
		}));
		for button in close_buttons {
			on(&button, "click", enclose!((toggle) move |_: Event| {
				toggle.borrow_mut().close();
			}));
		}
	}
}

struct DomMenuView {
	toggle: Option<Element>,
	sidebar: Option<Element>,
	input: HtmlInputElement,
}

impl MenuView for DomMenuView {
	type Target = Node;

	fn toggle_contains(&self, target: &Node) -> bool {
		self.toggle.as_ref().map_or(false, |toggle| toggle.contains(Some(target)))
	}

	fn sidebar_contains(&self, target: &Node) -> bool {
		self.sidebar.as_ref().map_or(false, |sidebar| sidebar.contains(Some(target)))
	}

	fn uncheck(&mut self) {
		self.input.set_checked(false);
	}
}

pub(crate) fn mount_hamburger(document: &Document, config: &Config) {
	let markup = &config.markup;
	let Some(input) = document
		.get_element_by_id(markup.hamburger_input)
		.and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
	else {
		tracing::debug!("page has no hamburger menu");
		return;
	};
	let Some(window) = web_sys::window() else {
		return;
	};

	let mut menu = Hamburger::new(DomMenuView {
		toggle: document.get_element_by_id(markup.hamburger_toggle),
		sidebar: document.get_element_by_id(markup.hamburger_sidebar),
		input,
	});
	on(&window, "click", move |event: Event| {
		if let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) {
			menu.on_window_click(&target);
		}
	});
}

struct DomAlertView {
	banner: Element,
	text: HtmlElement,
}

impl AlertView for DomAlertView {
	fn set_kind(&mut self, kind: AlertKind) {
		let classes = self.banner.class_list();
		for class in [AlertKind::Warn, AlertKind::Error].into_iter().filter_map(AlertKind::class) {
			if let Err(err) = classes.remove_1(class) {
				tracing::debug!(?err, class, "could not clear alert kind");
			}
		}
		if let Some(class) = kind.class() {
			if let Err(err) = classes.add_1(class) {
				tracing::debug!(?err, class, "could not set alert kind");
			}
		}
	}

	fn set_text(&mut self, text: &str) {
		self.text.set_inner_text(text);
	}

	fn open(&mut self) {
		if let Err(err) = self.banner.class_list().remove_1("closed") {
			tracing::debug!(?err, "could not open alert");
		}
	}

	fn close(&mut self) {
		if let Err(err) = self.banner.class_list().add_1("closed") {
			tracing::debug!(?err, "could not close alert");
		}
	}
}

/// Runs alert timers through `setTimeout`.
struct TimeoutScheduler {
	window: Window,
	handles: FxHashMap<TimerToken, i32>,
}

impl Scheduler for TimeoutScheduler {
	fn schedule(&mut self, delay: Duration, token: TimerToken) {
		let callback = Closure::once_into_js(move || {
			ALERT.with(|alert| {
				if let Some(alert) = alert.borrow_mut().as_mut() {
					alert.on_timer(token);
				}
			});
		});
		let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
		match self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
		{
			Ok(handle) => {
				self.handles.insert(token, handle);
			}
			Err(err) => tracing::error!(?err, "could not schedule alert timer"),
		}
	}

	fn cancel(&mut self, token: TimerToken) {
		if let Some(handle) = self.handles.remove(&token) {
			self.window.clear_timeout_with_handle(handle);
		}
	}

	fn fired(&mut self, token: TimerToken) {
		self.handles.remove(&token);
	}
}

type PageAlert = Alert<DomAlertView, TimeoutScheduler>;

thread_local! {
	static ALERT: RefCell<Option<PageAlert>> = RefCell::new(None);
}

fn page_alert(document: &Document, config: &Config) -> Result<PageAlert, MountError> {
	let markup = &config.markup;
	let window = web_sys::window().ok_or(MountError::MissingElement("window"))?;
	let banner: Element = find(document.query_selector(markup.alert), markup.alert)?;
	let text: HtmlElement = find(document.query_selector(markup.alert_text), markup.alert_text)?;
	let close: Element = find(document.query_selector(markup.alert_close), markup.alert_close)?;

	on(&close, "click", |_: Event| {
		ALERT.with(|alert| {
			if let Some(alert) = alert.borrow_mut().as_mut() {
				alert.close();
			}
		});
	});

	let scheduler = TimeoutScheduler {
		window,
		handles: FxHashMap::default(),
	};
	Ok(Alert::new(DomAlertView { banner, text }, scheduler, config))
}

pub(crate) fn install_alert(document: &Document, config: &Config) {
	ALERT.with(|alert| {
		let mut alert = alert.borrow_mut();
		if alert.is_some() {
			return;
		}
		match page_alert(document, config) {
			Ok(page) => *alert = Some(page),
			Err(err) => tracing::debug!(%err, "page has no alert banner"),
		}
	});
}

/// Flashes `text` in the page's alert banner. `kind` is `"flash"`,
/// `"warn"` or `"error"`; anything else is shown as `"flash"`.
#[wasm_bindgen(js_name = flashAlert)]
pub fn flash_alert(text: &str, kind: &str) {
	if let Some(document) = web_sys::window().and_then(|window| window.document()) {
		install_alert(&document, &Config::default());
	}
	ALERT.with(|alert| {
		if let Some(alert) = alert.borrow_mut().as_mut() {
			alert.flash(text, AlertKind::from(kind));
		}
	});
}
