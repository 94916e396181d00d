use std::cell::RefCell;
use std::rc::Rc;

use budget_widgets::{Listener, Var};
use mockall::predicate::eq;

use crate::mock::{SharedMock, Spy};

#[test]
fn set_notifies_every_listener_once() {
	let a = Var::new(10_i64);
	assert_eq!(a.get(), 10);

	let first = SharedMock::new();
	let second = SharedMock::new();

	a.listen({
		let first = first.clone();
		move |v| first.get().changed(*v)
	});
	a.listen({
		let second = second.clone();
		move |v| second.get().changed(*v)
	});

	first.get().expect_changed().with(eq(20)).times(1).return_const(());
	second.get().expect_changed().with(eq(20)).times(1).return_const(());

	a.set(20);
	assert_eq!(a.get(), 20);

	first.get().checkpoint();
	second.get().checkpoint();
}

#[test]
fn set_without_change_still_notifies() {
	let a = Var::new(1_i64);
	let mock = SharedMock::new();
	a.listen({
		let mock = mock.clone();
		move |v| mock.get().changed(*v)
	});

	mock.get().expect_changed().with(eq(1)).times(2).return_const(());
	a.set(1);
	a.set(1);
	mock.get().checkpoint();
}

#[test]
fn listener_reads_the_new_value() {
	let a = Var::new(String::from("old"));
	let seen = Rc::new(RefCell::new(Vec::new()));

	a.listen({
		let a = a.clone();
		let seen = seen.clone();
		move |v: &String| seen.borrow_mut().push((v.clone(), a.get()))
	});

	a.set("new".to_string());
	assert_eq!(*seen.borrow(), vec![("new".to_string(), "new".to_string())]);
}

#[test]
fn same_listener_is_registered_once() {
	let a = Var::new(0_i64);
	let mock = SharedMock::new();
	let listener: Listener<i64> = Rc::new({
		let mock = mock.clone();
		move |v: &i64| mock.get().changed(*v)
	});

	a.add_listener(&listener);
	a.add_listener(&listener);
	assert_eq!(a.listener_count(), 1);

	mock.get().expect_changed().times(1).return_const(());
	a.set(3);
	mock.get().checkpoint();
}

#[test]
fn removed_listener_is_not_called() {
	let a = Var::new(0_i64);
	let mock = SharedMock::new();
	let listener = a.listen({
		let mock = mock.clone();
		move |v| mock.get().changed(*v)
	});

	a.remove_listener(&listener);
	// removing twice is a no-op
	a.remove_listener(&listener);
	assert_eq!(a.listener_count(), 0);

	mock.get().expect_changed().times(0).return_const(());
	a.set(5);
	mock.get().checkpoint();
}

#[test]
fn nested_set_runs_depth_first() {
	let a = Var::new(0_i64);
	let b = Var::new(0_i64);
	let log = Rc::new(RefCell::new(Vec::new()));

	a.listen({
		let b = b.clone();
		let log = log.clone();
		move |v: &i64| {
			log.borrow_mut().push(format!("a1:{v}"));
			b.set(v * 10);
		}
	});
	a.listen({
		let log = log.clone();
		move |v: &i64| log.borrow_mut().push(format!("a2:{v}"))
	});
	b.listen({
		let log = log.clone();
		move |v: &i64| log.borrow_mut().push(format!("b:{v}"))
	});

	a.set(2);
	assert_eq!(*log.borrow(), vec!["a1:2", "b:20", "a2:2"]);
	assert_eq!(b.get(), 20);
}

#[test]
fn nested_set_on_same_var_sweeps_again() {
	let a = Var::new(0_i64);
	let log = Rc::new(RefCell::new(Vec::new()));

	a.listen({
		let a = a.clone();
		let log = log.clone();
		move |v: &i64| {
			log.borrow_mut().push(*v);
			if *v < 3 {
				a.set(v + 1);
			}
		}
	});

	a.set(1);
	assert_eq!(*log.borrow(), vec![1, 2, 3]);
	assert_eq!(a.get(), 3);
}

#[test]
fn listener_added_during_sweep_waits_for_next_set() {
	let a = Var::new(0_i64);
	let mock = SharedMock::new();

	let late: Listener<i64> = Rc::new({
		let mock = mock.clone();
		move |v: &i64| mock.get().changed(*v)
	});
	a.listen({
		let a = a.clone();
		let late = late.clone();
		move |_: &i64| a.add_listener(&late)
	});

	mock.get().expect_changed().times(0).return_const(());
	a.set(1);
	mock.get().checkpoint();

	mock.get().expect_changed().with(eq(2)).times(1).return_const(());
	a.set(2);
	mock.get().checkpoint();
}

#[test]
fn update_and_replace() {
	let a = Var::new(vec![1, 2]);
	a.update(|v| v.push(3));
	assert_eq!(a.get(), vec![1, 2, 3]);

	let old = a.replace(vec![]);
	assert_eq!(old, vec![1, 2, 3]);
	assert!(a.with(Vec::is_empty));
}
