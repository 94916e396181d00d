use std::time::Duration;

use crate::Config;

/// Presentation of a flashed message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
	#[default]
	Flash,
	Warn,
	Error,
}

impl From<&str> for AlertKind {
	/// Unknown kinds get the neutral presentation.
	fn from(kind: &str) -> Self {
		match kind {
			"warn" => AlertKind::Warn,
			"error" => AlertKind::Error,
			_ => AlertKind::Flash,
		}
	}
}

impl AlertKind {
	/// The CSS class carried by the banner, if any.
	pub fn class(self) -> Option<&'static str> {
		match self {
			AlertKind::Flash => None,
			AlertKind::Warn => Some("warn"),
			AlertKind::Error => Some("error"),
		}
	}
}

pub trait AlertView {
	fn set_kind(&mut self, kind: AlertKind);
	fn set_text(&mut self, text: &str);
	fn open(&mut self);
	fn close(&mut self);
}

/// Identifies one scheduled auto-dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Runs [`Alert::on_timer`] once `delay` has elapsed, unless cancelled.
pub trait Scheduler {
	fn schedule(&mut self, delay: Duration, token: TimerToken);
	fn cancel(&mut self, token: TimerToken);
	/// The timer for `token` ran and can be forgotten.
	fn fired(&mut self, token: TimerToken);
}

/// The page's alert banner. Every flash restarts the auto-dismiss timer.
pub struct Alert<V, S> {
	view: V,
	scheduler: S,
	timeout: Duration,
	timer: Option<TimerToken>,
	next_token: u64,
	open: bool,
}

impl<V, S> Alert<V, S>
where
	V: AlertView,
	S: Scheduler,
{
	pub fn new(view: V, scheduler: S, config: &Config) -> Self {
		Alert {
			view,
			scheduler,
			timeout: config.alert_timeout,
			timer: None,
			next_token: 0,
			open: false,
		}
	}

	/// Shows `text`. Empty messages are ignored.
	pub fn flash(&mut self, text: &str, kind: AlertKind) {
		if text.is_empty() {
			return;
		}

		self.view.set_kind(kind);
		self.view.set_text(text);
		self.view.open();
		self.open = true;

		self.cancel_timer();
		let token = TimerToken(self.next_token);
		self.next_token += 1;
		self.scheduler.schedule(self.timeout, token);
		self.timer = Some(token);
	}

	pub fn close(&mut self) {
		self.cancel_timer();
		self.view.close();
		self.open = false;
	}

	/// A scheduled timer fired. Timers pre-empted by a newer flash or a
	/// manual close are ignored.
	pub fn on_timer(&mut self, token: TimerToken) {
		self.scheduler.fired(token);
		if self.timer != Some(token) {
			tracing::trace!(token = token.0, "stale alert timer");
			return;
		}
		self.timer = None;
		self.view.close();
		self.open = false;
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn view(&self) -> &V {
		&self.view
	}

	fn cancel_timer(&mut self) {
		if let Some(token) = self.timer.take() {
			self.scheduler.cancel(token);
		}
	}
}
