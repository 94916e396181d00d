use budget_widgets::{Changes, Keyed};

#[derive(Default)]
struct Dom {
	next: usize,
	live: Vec<(usize, char)>,
	removed: Vec<usize>,
}

impl Dom {
	fn create(&mut self, item: &char) -> usize {
		let id = self.next;
		self.next += 1;
		self.live.push((id, *item));
		id
	}

	fn remove(&mut self, id: usize) {
		self.live.retain(|(live, _)| *live != id);
		self.removed.push(id);
	}
}

fn render(keyed: &mut Keyed<char, usize>, dom: &mut Dom, items: &[char]) -> Changes {
	keyed.reconcile(dom, items, |c: &char| *c, Dom::create, Dom::remove)
}

#[test]
fn replaces_only_what_changed() {
	let mut keyed = Keyed::new();
	let mut dom = Dom::default();

	render(&mut keyed, &mut dom, &['A', 'B', 'C']);
	let a = keyed.get(&'A').copied();
	let c = keyed.get(&'C').copied();
	let b = keyed.get(&'B').copied();

	let changes = render(&mut keyed, &mut dom, &['A', 'C', 'D']);
	assert_eq!(changes, Changes { created: 1, removed: 1 });

	assert_eq!(keyed.get(&'A').copied(), a);
	assert_eq!(keyed.get(&'C').copied(), c);
	assert_eq!(dom.removed, vec![b.unwrap()]);
	assert_eq!(dom.live.iter().map(|(_, c)| *c).collect::<String>(), "ACD");
	assert_eq!(dom.next, 4);
}

#[test]
fn unchanged_list_is_a_no_op() {
	let mut keyed = Keyed::new();
	let mut dom = Dom::default();

	render(&mut keyed, &mut dom, &['A', 'B']);
	let diff = keyed.diff(&['B', 'A'], |c: &char| *c);
	assert!(diff.is_empty());

	let changes = render(&mut keyed, &mut dom, &['A', 'B']);
	assert_eq!(changes, Changes::default());
}

#[test]
fn duplicate_keys_render_once() {
	let mut keyed = Keyed::new();
	let mut dom = Dom::default();

	render(&mut keyed, &mut dom, &['A', 'A', 'B']);
	assert_eq!(keyed.len(), 2);
	assert_eq!(dom.live.len(), 2);
}

#[test]
fn emptying_removes_everything() {
	let mut keyed = Keyed::new();
	let mut dom = Dom::default();

	render(&mut keyed, &mut dom, &['A', 'B']);
	render(&mut keyed, &mut dom, &[]);
	assert!(keyed.is_empty());
	assert!(dom.live.is_empty());
	assert_eq!(dom.removed, vec![0, 1]);
}
