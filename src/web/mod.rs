//! DOM bindings. Every widget container found on page load is mounted;
//! a container with incomplete markup is skipped without affecting the
//! others.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentFragment, Element, Event, EventTarget, HtmlTemplateElement, NodeList};

use crate::{Config, MountError};

mod chrome;
mod reset;
mod tags;

pub use chrome::flash_alert;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let on_load = Closure::<dyn FnMut()>::new(|| mount_page(&Config::default()));
	window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
	on_load.forget();
	Ok(())
}

pub fn mount_page(config: &Config) {
	let Some(document) = web_sys::window().and_then(|window| window.document()) else {
		return;
	};

	tags::mount_all(&document, config);
	reset::mount_all(&document, config);
	chrome::mount_dialogs(&document, config);
	chrome::mount_hamburger(&document, config);
	chrome::install_alert(&document, config);
}

pub(crate) fn find<T: JsCast>(
	found: Result<Option<Element>, JsValue>,
	selector: &'static str,
) -> Result<T, MountError> {
	found
		.ok()
		.flatten()
		.and_then(|element| element.dyn_into::<T>().ok())
		.ok_or(MountError::MissingElement(selector))
}

pub(crate) fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
	let Ok(list) = list else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// The first element of a `<template>`'s content.
pub(crate) fn template(document: &Document, selector: &'static str) -> Result<Element, MountError> {
	let element: Element = find(document.query_selector(selector), selector)?;
	let content: DocumentFragment = element
		.dyn_into::<HtmlTemplateElement>()
		.map_err(|_| MountError::TemplatesUnsupported)?
		.content();
	content
		.first_element_child()
		.ok_or(MountError::MissingElement(selector))
}

pub(crate) fn instantiate(prototype: &Element) -> Option<Element> {
	prototype
		.clone_node_with_deep(true)
		.ok()
		.and_then(|node| node.dyn_into::<Element>().ok())
}

pub(crate) fn event_element(event: &Event) -> Option<Element> {
	event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// Attaches `handler` for the lifetime of the page.
pub(crate) fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
	let closure = Closure::<dyn FnMut(Event)>::new(handler);
	if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
		tracing::error!(?err, event, "could not attach listener");
	}
	closure.forget();
}
