pub trait DialogView {
	fn show_modal(&mut self);
	fn close(&mut self);
}

/// A dialog opened by the element right before it and closed by any of
/// its close buttons.
pub struct DialogToggle<V> {
	view: V,
}

impl<V: DialogView> DialogToggle<V> {
	/// `open` is the dialog's `data-open` attribute; `"true"` shows the
	/// dialog right away.
	pub fn mount(mut view: V, open: Option<&str>) -> Self {
		if open == Some("true") {
			view.show_modal();
		}
		DialogToggle { view }
	}

	pub fn trigger(&mut self) {
		self.view.show_modal();
	}

	pub fn close(&mut self) {
		self.view.close();
	}

	pub fn view(&self) -> &V {
		&self.view
	}
}
