pub trait MenuView {
	type Target;

	/// Whether `target` is the menu toggle or inside it. `false` when the
	/// page has no toggle.
	fn toggle_contains(&self, target: &Self::Target) -> bool;
	/// Whether `target` is inside the sidebar. `false` when the page has no sidebar.
	fn sidebar_contains(&self, target: &Self::Target) -> bool;
	fn uncheck(&mut self);
}

/// Closes the hamburger menu on any click outside of it.
pub struct Hamburger<V> {
	view: V,
}

impl<V: MenuView> Hamburger<V> {
	pub fn new(view: V) -> Self {
		Hamburger { view }
	}

	/// Returns `true` if the click closed the menu.
	pub fn on_window_click(&mut self, target: &V::Target) -> bool {
		if self.view.toggle_contains(target) || self.view.sidebar_contains(target) {
			return false;
		}
		self.view.uncheck();
		true
	}

	pub fn view(&self) -> &V {
		&self.view
	}
}
