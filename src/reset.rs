use std::cell::{Ref, RefCell};
use std::rc::Rc;

use enclose::enclose;
use fxhash::FxHashSet;
use indexmap::IndexMap;

use crate::category::{
	format_categories, js_number, parse_amount, parse_categories, parse_int, parse_periods,
	CategoryOverview, Period, UnusedCard, UsedCard,
};
use crate::error::ResetError;
use crate::reconcile::Keyed;
use crate::{Config, Var};

/// The page elements a [`CategoryReset`] drives.
pub trait ResetView {
	/// A rendered category card. Unused cards own the allocation dialog.
	type Card;

	fn create_unused_card(&mut self, id: i64, card: &UnusedCard) -> Self::Card;
	fn create_used_card(&mut self, id: i64, card: &UsedCard) -> Self::Card;
	fn remove_card(&mut self, card: Self::Card);

	fn set_unused_field(&mut self, value: &str);
	fn set_used_field(&mut self, value: &str);
	fn set_free_funds(&mut self, text: &str);

	fn open_dialog(&mut self, card: &Self::Card, form: &AllocationForm);
	fn close_dialog(&mut self, card: &Self::Card);

	/// Blocking notification, e.g. `window.alert`.
	fn warn(&mut self, message: &str);
}

/// Raw values the widget is mounted from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetForm<'a> {
	/// Value of the hidden unused categories field.
	pub unused: &'a str,
	/// Value of the hidden used categories field.
	pub used: &'a str,
	/// Text of the free funds display.
	pub free_funds: &'a str,
	/// The container's `data-periods` attribute.
	pub periods: &'a str,
}

/// Values of the allocation dialog of an unused category.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationForm {
	pub add_amount: f64,
	pub budget_input: f64,
	pub spending_limit: f64,
	pub input_interval: i64,
	pub input_period: i64,
}

impl AllocationForm {
	pub const ADD_AMOUNT: &'static str = "add_amount";
	pub const BUDGET_INPUT: &'static str = "budget_input";
	pub const SPENDING_LIMIT: &'static str = "spending_limit";
	pub const INPUT_INTERVAL: &'static str = "input_interval";
	pub const INPUT_PERIOD: &'static str = "input_period";

	/// The dialog as it opens: the amount to add defaults to the budget input.
	pub fn new(category: &CategoryOverview) -> Self {
		AllocationForm {
			add_amount: category.budget_input,
			budget_input: category.budget_input,
			spending_limit: category.spending_limit,
			input_interval: category.input_interval,
			input_period: category.input_period_id,
		}
	}

	/// Reads the submitted dialog fields by name. A missing field reads
	/// as empty and is rejected like any other non-number.
	pub fn parse(field: impl Fn(&'static str) -> Option<String>) -> Result<Self, ResetError> {
		let text = |name| field(name).unwrap_or_default();
		Ok(AllocationForm {
			add_amount: parse_amount(Self::ADD_AMOUNT, &text(Self::ADD_AMOUNT))?,
			budget_input: parse_amount(Self::BUDGET_INPUT, &text(Self::BUDGET_INPUT))?,
			spending_limit: parse_amount(Self::SPENDING_LIMIT, &text(Self::SPENDING_LIMIT))?,
			input_interval: parse_int(Self::INPUT_INTERVAL, &text(Self::INPUT_INTERVAL))?,
			input_period: parse_int(Self::INPUT_PERIOD, &text(Self::INPUT_PERIOD))?,
		})
	}

	/// The category as it enters the used list.
	pub fn allocate(&self, category: &CategoryOverview) -> CategoryOverview {
		CategoryOverview {
			initial_amount: self.add_amount,
			budget_input: self.budget_input,
			spending_limit: self.spending_limit,
			input_interval: self.input_interval,
			input_period_id: self.input_period,
			..category.clone()
		}
	}
}

type Cards<V> = Rc<RefCell<Keyed<i64, <V as ResetView>::Card>>>;

/// Splits categories between an unused and a used list, moving them
/// back and forth while accounting for the free funds they consume.
///
/// Free funds never go negative and a category is never in both lists.
pub struct CategoryReset<V: ResetView> {
	unused: Var<Vec<CategoryOverview>>,
	used: Var<Vec<CategoryOverview>>,
	free_funds: Var<f64>,
	/// Every category as first read, by ID.
	pristine: IndexMap<i64, CategoryOverview>,
	view: Rc<RefCell<V>>,
	unused_cards: Cards<V>,
	insufficient_funds_message: String,
}

impl<V> CategoryReset<V>
where
	V: ResetView + 'static,
{
	pub fn new(view: V, form: ResetForm<'_>, config: &Config) -> Result<Self, ResetError> {
		let free_funds = parse_free_funds(form.free_funds)?;
		let periods: Rc<[Period]> = parse_periods(form.periods).into();
		let (unused, used) = disjoint(parse_categories(form.unused), parse_categories(form.used));
		let pristine = unused
			.iter()
			.chain(used.iter())
			.map(|category| (category.id, category.clone()))
			.collect();

		let widget = CategoryReset {
			unused: Var::new(Vec::new()),
			used: Var::new(Vec::new()),
			free_funds: Var::new(free_funds),
			pristine,
			view: Rc::new(RefCell::new(view)),
			unused_cards: Rc::new(RefCell::new(Keyed::new())),
			insufficient_funds_message: config.insufficient_funds_message.clone(),
		};

		let view = &widget.view;
		let unused_cards = &widget.unused_cards;
		let used_cards: Cards<V> = Rc::new(RefCell::new(Keyed::new()));

		widget.unused.listen(enclose!((view, unused_cards) move |list: &Vec<CategoryOverview>| {
			let mut view = view.borrow_mut();
			unused_cards.borrow_mut().reconcile(
				&mut *view,
				list,
				|category: &CategoryOverview| category.id,
				|view: &mut V, category: &CategoryOverview| {
					view.create_unused_card(category.id, &UnusedCard::new(category))
				},
				|view: &mut V, card| view.remove_card(card),
			);
			view.set_unused_field(&format_categories(list));
		}));

		widget.used.listen(enclose!((view, used_cards, periods) move |list: &Vec<CategoryOverview>| {
			let mut view = view.borrow_mut();
			used_cards.borrow_mut().reconcile(
				&mut *view,
				list,
				|category: &CategoryOverview| category.id,
				|view: &mut V, category: &CategoryOverview| {
					view.create_used_card(category.id, &UsedCard::new(category, &periods))
				},
				|view: &mut V, card| view.remove_card(card),
			);
			view.set_used_field(&format_categories(list));
		}));

		widget.free_funds.listen(enclose!((view) move |funds: &f64| {
			view.borrow_mut().set_free_funds(&js_number(*funds));
		}));

		widget.unused.set(unused);
		widget.used.set(used);
		Ok(widget)
	}

	/// Opens the allocation dialog of an unused category.
	pub fn select_unused(&self, id: i64) -> Result<AllocationForm, ResetError> {
		let category = self.find_unused(id)?;
		let form = AllocationForm::new(&category);

		let cards = self.unused_cards.borrow();
		let card = cards.get(&id).ok_or(ResetError::UnknownCategory(id))?;
		self.view.borrow_mut().open_dialog(card, &form);
		Ok(form)
	}

	/// Closes the allocation dialog without committing anything.
	pub fn close_dialog(&self, id: i64) {
		if let Some(card) = self.unused_cards.borrow().get(&id) {
			self.view.borrow_mut().close_dialog(card);
		}
	}

	/// Moves an unused category to the used list, debiting the free funds.
	///
	/// When the allocation exceeds the free funds the user is warned, the
	/// dialog stays open and nothing changes. Negative amounts are refused.
	pub fn submit_allocation(&self, id: i64, form: &AllocationForm) -> Result<(), ResetError> {
		let category = self.find_unused(id)?;

		if form.add_amount < 0.0 {
			tracing::warn!(id, requested = form.add_amount, "negative allocation rejected");
			return Err(ResetError::NegativeAmount(form.add_amount));
		}

		let available = self.free_funds.get();
		let free = available - form.add_amount;
		if free < 0.0 {
			tracing::warn!(id, available, requested = form.add_amount, "allocation rejected");
			self.view.borrow_mut().warn(&self.insufficient_funds_message);
			return Err(ResetError::InsufficientFunds {
				available,
				requested: form.add_amount,
			});
		}

		let allocated = form.allocate(&category);

		self.free_funds.set(free);
		// The dialog lives in the unused card, close it before the card goes.
		self.close_dialog(id);
		self.unused.update(|list| list.retain(|c| c.id != id));
		self.used.update(|list| list.push(allocated));
		Ok(())
	}

	/// Returns a used category to the unused list with its original values,
	/// crediting its allocation back to the free funds.
	///
	/// A seeded record with a negative allocation is only returned while the
	/// free funds cover it.
	pub fn select_used(&self, id: i64) -> Result<(), ResetError> {
		let category = self
			.used
			.with(|list| list.iter().find(|c| c.id == id).cloned())
			.ok_or(ResetError::UnknownCategory(id))?;
		let original = self
			.pristine
			.get(&id)
			.cloned()
			.ok_or(ResetError::UnknownCategory(id))?;

		let available = self.free_funds.get();
		let free = available + category.initial_amount;
		if free < 0.0 {
			tracing::warn!(id, available, initial = category.initial_amount, "return rejected");
			self.view.borrow_mut().warn(&self.insufficient_funds_message);
			return Err(ResetError::InsufficientFunds {
				available,
				requested: -category.initial_amount,
			});
		}

		self.free_funds.set(free);
		self.used.update(|list| list.retain(|c| c.id != id));
		self.unused.update(|list| list.push(original));
		Ok(())
	}

	pub fn unused(&self) -> Vec<CategoryOverview> {
		self.unused.get()
	}

	pub fn used(&self) -> Vec<CategoryOverview> {
		self.used.get()
	}

	pub fn free_funds(&self) -> f64 {
		self.free_funds.get()
	}

	pub fn view(&self) -> Ref<'_, V> {
		self.view.borrow()
	}

	fn find_unused(&self, id: i64) -> Result<CategoryOverview, ResetError> {
		self.unused
			.with(|list| list.iter().find(|c| c.id == id).cloned())
			.ok_or(ResetError::UnknownCategory(id))
	}
}

fn parse_free_funds(text: &str) -> Result<f64, ResetError> {
	let text = text.trim();
	if text.is_empty() {
		return Ok(0.0);
	}
	Ok(parse_amount("FreeFunds", text)?)
}

/// Drops every category whose ID was already seen, in either list.
fn disjoint(
	unused: Vec<CategoryOverview>,
	used: Vec<CategoryOverview>,
) -> (Vec<CategoryOverview>, Vec<CategoryOverview>) {
	let mut seen = FxHashSet::default();
	let mut keep = |list: Vec<CategoryOverview>, name: &'static str| {
		list.into_iter()
			.filter(|category| {
				let fresh = seen.insert(category.id);
				if !fresh {
					tracing::warn!(id = category.id, list = name, "dropping duplicate category");
				}
				fresh
			})
			.collect::<Vec<_>>()
	};

	let unused = keep(unused, "unused");
	let used = keep(used, "used");
	(unused, used)
}
