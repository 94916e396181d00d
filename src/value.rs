use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::addr::RcAddr;

/// A callback invoked with every new value of a [`Var`].
///
/// Listeners are compared by identity: registering the same
/// `Rc` twice keeps a single registration.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// A reactive cell holding a single value.
///
/// Setting a value stores it first and then synchronously notifies
/// every listener registered at the time of the call, in registration
/// order. A `set` issued from inside a listener runs its own complete
/// notification sweep before the outer sweep resumes, so chains of
/// derived updates execute depth-first.
pub struct Var<T> {
	body: Rc<VarBody<T>>,
}

struct VarBody<T> {
	value: RefCell<T>,
	listeners: RefCell<SmallVec<[RcAddr<dyn Fn(&T)>; 4]>>,
}

impl<T> Clone for Var<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> Default for Var<T>
where
	T: Default + 'static,
{
	fn default() -> Self {
		Var::new(Default::default())
	}
}

impl<T> Var<T>
where
	T: 'static,
{
	pub fn new(value: T) -> Self {
		Var {
			body: Rc::new(VarBody {
				value: RefCell::new(value),
				listeners: RefCell::new(SmallVec::new()),
			}),
		}
	}

	/// Returns a copy of the current value.
	#[inline]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.body.value.borrow().clone()
	}

	/// Reads the current value in place.
	///
	/// The closure must not call [`Var::set`] on the same cell.
	#[inline]
	pub fn with<R>(&self, func: impl FnOnce(&T) -> R) -> R {
		func(&self.body.value.borrow())
	}

	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.body.value.borrow_mut() = value.clone();
		self.notify(&value);
	}

	pub fn replace(&self, value: T) -> T
	where
		T: Clone,
	{
		let old = std::mem::replace(&mut *self.body.value.borrow_mut(), value.clone());
		self.notify(&value);
		old
	}

	pub fn update(&self, func: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		let mut next = self.get();
		func(&mut next);
		self.set(next)
	}

	pub fn add_listener(&self, listener: &Listener<T>) {
		let addr = RcAddr::new(listener.clone());
		let mut listeners = self.body.listeners.borrow_mut();
		if !listeners.contains(&addr) {
			listeners.push(addr);
		}
	}

	pub fn remove_listener(&self, listener: &Listener<T>) {
		let addr = RcAddr::new(listener.clone());
		self.body.listeners.borrow_mut().retain(|it| *it != addr);
	}

	/// Registers `func` and returns its handle for later removal.
	pub fn listen(&self, func: impl Fn(&T) + 'static) -> Listener<T> {
		let listener: Listener<T> = Rc::new(func);
		self.add_listener(&listener);
		listener
	}

	pub fn listener_count(&self) -> usize {
		self.body.listeners.borrow().len()
	}

	fn notify(&self, value: &T) {
		// Snapshot so listeners may (un)register or set re-entrantly.
		let listeners = self.body.listeners.borrow().clone();
		tracing::trace!(listeners = listeners.len(), "var changed");
		for listener in &listeners {
			(***listener)(value);
		}
	}
}

impl<T> Debug for Var<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.body.value.borrow().fmt(f)
	}
}
