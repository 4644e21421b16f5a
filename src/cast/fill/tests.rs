use crate::cast::{AsRecord, Map, Poly, Value};

trait Labelled: AsRecord {
	fn label(&self) -> String;
}

#[derive(Debug, Default, PartialEq)]
struct Leaf {
	foo: String,
}

crate::record!(Leaf { field foo: String as "Foo" });

impl Labelled for Leaf {
	fn label(&self) -> String {
		format!("leaf:{}", self.foo)
	}
}

#[derive(Debug, Default, PartialEq)]
struct Counter {
	count: i64,
}

crate::record!(Counter { field count: i64 as "Count" });

impl Labelled for Counter {
	fn label(&self) -> String {
		format!("counter:{}", self.count)
	}
}

#[derive(Debug, Default, PartialEq)]
struct Middle {
	d: i64,
	e: Option<Box<Leaf>>,
}

crate::record!(Middle {
	field d: i64 as "D",
	field e: Option<Box<Leaf>> as "E",
});

#[derive(Debug, Default, PartialEq)]
struct Outer {
	a: i64,
	b: String,
	c: Middle,
	secret: u32,
}

crate::record!(Outer {
	field a: i64 as "A",
	field b: String as "B",
	field c: Middle as "C",
	hidden secret: u32,
});

#[derive(Debug, Default)]
struct Holder {
	item: Poly<dyn Labelled>,
}

crate::record!(Holder { field item: Poly<dyn Labelled> as "I" });

#[derive(Debug, Default)]
struct Many {
	items: Vec<Poly<dyn Labelled>>,
}

crate::record!(Many { field items: Vec<Poly<dyn Labelled>> as "I" });

#[derive(Debug, Default, PartialEq)]
struct Flat {
	base: Leaf,
	j: String,
}

crate::record!(Flat {
	embed base: Leaf,
	field j: String as "J",
});

#[derive(Debug, Default, PartialEq)]
struct Loose {
	user_name: String,
	level: u8,
	ratio: f32,
	enabled: bool,
	numbers: Vec<i64>,
	grid: Vec<Vec<u16>>,
	leaves: Vec<Leaf>,
	extra: Map,
	raw: Value,
}

crate::record!(Loose {
	field user_name: String as "UserName",
	field level: u8 as "Level",
	field ratio: f32 as "Ratio",
	field enabled: bool as "Enabled",
	field numbers: Vec<i64> as "Numbers",
	field grid: Vec<Vec<u16>> as "Grid",
	field leaves: Vec<Leaf> as "Leaves",
	field extra: Map as "Extra",
	field raw: Value as "Raw",
});

fn map(entries: Vec<(&str, Value)>) -> Map {
	entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
}

fn labelled_resolver(source: &Value) -> Box<dyn Labelled> {
	let kind = source.as_map().and_then(|fields| fields.get("kind")).map(Value::to_text);
	match kind.as_deref() {
		Some("counter") => Box::new(Counter::default()),
		_ => Box::new(Leaf::default()),
	}
}

mod lookup {
	use super::{Loose, map};
	use crate::cast::{Filler, Value};

	#[test]
	fn exact_then_lowercase_then_snake_case() {
		let mut loose = Loose::default();
		let source = map(vec![
			("UserName", Value::from("exact")),
			("level", Value::from(7)),
			("enabled", Value::from("TRUE")),
		]);
		Filler::new().fill(&mut loose, &source).expect("fill succeeds");
		assert_eq!(loose.user_name, "exact");
		assert_eq!(loose.level, 7);
		assert!(loose.enabled);

		let snake = map(vec![("user_name", Value::from("snake"))]);
		Filler::new().fill(&mut loose, &snake).expect("fill succeeds");
		assert_eq!(loose.user_name, "snake");
	}

	#[test]
	fn absent_keys_leave_fields_untouched() {
		let mut loose = Loose {
			user_name: "kept".to_owned(),
			level: 3,
			..Loose::default()
		};
		Filler::new().fill(&mut loose, &map(vec![("Ratio", Value::from("0.5"))])).expect("fill succeeds");
		assert_eq!(loose.user_name, "kept");
		assert_eq!(loose.level, 3);
		assert_eq!(loose.ratio, 0.5);
	}
}

mod scalars_and_raw {
	use super::{Loose, map};
	use crate::cast::{Filler, Value};

	#[test]
	fn scalars_coerce_and_raw_fields_assign_directly() {
		let mut loose = Loose::default();
		let extra = map(vec![("nested", Value::from(vec![1, 2]))]);
		let source = map(vec![
			("UserName", Value::from(12)),
			("Ratio", Value::from(true)),
			("Enabled", Value::from(0.25)),
			("Extra", Value::Map(extra.clone())),
			("Raw", Value::any("kept as is")),
		]);
		Filler::new().fill(&mut loose, &source).expect("fill succeeds");

		assert_eq!(loose.user_name, "12");
		assert_eq!(loose.ratio, 1.0);
		assert!(loose.enabled);
		assert_eq!(loose.extra, extra);
		assert_eq!(loose.raw, Value::any("kept as is"));
	}

	#[test]
	fn map_field_rejects_non_map_source() {
		let mut loose = Loose::default();
		let err = Filler::new()
			.fill(&mut loose, &map(vec![("Extra", Value::from("nope"))]))
			.expect_err("text cannot fill a map field");
		assert_eq!(err.to_string(), "Extra: cannot fill map from text");
	}
}

mod nested {
	use super::{Leaf, Middle, Outer, map};
	use crate::cast::{CastError, FieldKind, Filler, Kind, Value};

	#[test]
	fn nested_and_optional_records_are_rebuilt() {
		let leaf = map(vec![("Foo", Value::from("bar"))]);
		let middle = map(vec![("D", Value::from("4")), ("E", Value::Map(leaf))]);
		let source = map(vec![("A", Value::from(1)), ("B", Value::from("two")), ("C", Value::Map(middle))]);

		let mut outer = Outer::default();
		Filler::new().fill(&mut outer, &source).expect("fill succeeds");

		assert_eq!(
			outer,
			Outer {
				a: 1,
				b: "two".to_owned(),
				c: Middle {
					d: 4,
					e: Some(Box::new(Leaf { foo: "bar".to_owned() })),
				},
				secret: 0,
			}
		);
	}

	#[test]
	fn handle_wrapped_sub_map_is_accepted() {
		let source = map(vec![("C", Value::handle(Value::Map(map(vec![("D", Value::from(9))]))))]);
		let mut outer = Outer::default();
		Filler::new().fill(&mut outer, &source).expect("fill succeeds");
		assert_eq!(outer.c.d, 9);
	}

	#[test]
	fn non_map_source_reports_path_kind_and_shape() {
		let middle = map(vec![("E", Value::from("not a map"))]);
		let mut outer = Outer::default();
		let err = Filler::new()
			.fill(&mut outer, &map(vec![("C", Value::Map(middle))]))
			.expect_err("text cannot fill an optional record");

		match &err {
			CastError::Mismatch { path, kind, got } => {
				assert_eq!(path.to_string(), "C.E");
				assert_eq!(*kind, FieldKind::Optional);
				assert_eq!(*got, Kind::Text);
			}
			other => panic!("unexpected error: {other}"),
		}
		assert_eq!(err.to_string(), "C.E: cannot fill optional record from text");
	}

	#[test]
	fn earlier_assignments_survive_a_failure() {
		let mut outer = Outer {
			c: Middle { d: 5, e: None },
			..Outer::default()
		};
		let source = map(vec![("A", Value::from(3)), ("C", Value::from(1))]);
		assert!(Filler::new().fill(&mut outer, &source).is_err());
		assert_eq!(outer.a, 3, "field before the failure was assigned");
		assert_eq!(outer.c.d, 5, "failed field keeps its previous value");
	}

	#[test]
	fn internal_fields_are_never_written() {
		let mut outer = Outer::default();
		Filler::new()
			.fill(&mut outer, &map(vec![("secret", Value::from(9)), ("A", Value::from(2))]))
			.expect("fill succeeds");
		assert_eq!(outer.secret, 0);
		assert_eq!(outer.a, 2);
	}

	#[test]
	fn fill_value_requires_a_map() {
		let mut outer = Outer::default();
		let err = Filler::new().fill_value(&mut outer, &Value::from(vec![1])).expect_err("sequence is not a record source");
		assert_eq!(err.to_string(), "(root): cannot fill record from sequence");

		let source = Value::Map(map(vec![("A", Value::from(8))]));
		Filler::new().fill_value(&mut outer, &Value::handle(source)).expect("fill succeeds");
		assert_eq!(outer.a, 8);
	}
}

mod polymorphic {
	use super::{Holder, Labelled, Leaf, labelled_resolver, map};
	use crate::cast::{CastError, Filler, Value};

	#[test]
	fn unregistered_capability_fails_then_succeeds_after_registration() {
		let source = map(vec![("I", Value::Map(map(vec![("Foo", Value::from("bar"))])))]);
		let mut holder = Holder::default();

		let err = Filler::new().fill(&mut holder, &source).expect_err("no resolver registered");
		assert!(matches!(&err, CastError::Unregistered { path, .. } if path.to_string() == "I"), "unexpected error: {err}");
		assert!(holder.item.is_nil());

		let mut filler = Filler::new();
		filler.register::<dyn Labelled>(|_| -> Box<dyn Labelled> { Box::new(Leaf::default()) });
		filler.fill(&mut holder, &source).expect("fill succeeds");

		let item = holder.item.get().expect("item was resolved");
		assert_eq!(item.label(), "leaf:bar");
	}

	#[test]
	fn resolver_sees_the_source_value() {
		let source = map(vec![(
			"I",
			Value::Map(map(vec![("kind", Value::from("counter")), ("Count", Value::from("12"))])),
		)]);
		let mut filler = Filler::new();
		filler.register(labelled_resolver);

		let mut holder = Holder::default();
		filler.fill(&mut holder, &source).expect("fill succeeds");
		assert_eq!(holder.item.get().map(|item| item.label()), Some("counter:12".to_owned()));
	}

	#[test]
	fn registered_capability_still_needs_a_map() {
		let mut filler = Filler::new();
		filler.register(labelled_resolver);
		let mut holder = Holder::default();
		let err = filler
			.fill(&mut holder, &map(vec![("I", Value::from(3))]))
			.expect_err("integer cannot fill a polymorphic field");
		assert_eq!(err.to_string(), "I: cannot fill polymorphic record from signed integer");
	}
}

mod sequences {
	use super::{Labelled, Leaf, Loose, Many, labelled_resolver, map};
	use crate::cast::{CastError, Filler, Value};

	#[test]
	fn scalar_and_record_elements_follow_the_source() {
		let source = map(vec![
			("Numbers", Value::Array(vec![Value::from("1"), Value::from(2.5), Value::from(true)])),
			("Grid", Value::Array(vec![Value::from(vec![1, 2]), Value::Bytes(vec![3])])),
			(
				"Leaves",
				Value::Array(vec![
					Value::Map(map(vec![("Foo", Value::from("a"))])),
					Value::Map(map(vec![("foo", Value::from("b"))])),
				]),
			),
		]);
		let mut loose = Loose {
			numbers: vec![9, 9, 9, 9, 9],
			..Loose::default()
		};
		Filler::new().fill(&mut loose, &source).expect("fill succeeds");

		assert_eq!(loose.numbers, vec![1, 2, 1], "length follows the source");
		assert_eq!(loose.grid, vec![vec![1, 2], vec![3]]);
		assert_eq!(loose.leaves, vec![Leaf { foo: "a".to_owned() }, Leaf { foo: "b".to_owned() }]);
	}

	#[test]
	fn polymorphic_elements_resolve_per_element() {
		let source = map(vec![(
			"I",
			Value::Array(vec![
				Value::Map(map(vec![("Foo", Value::from("x"))])),
				Value::Map(map(vec![("kind", Value::from("counter")), ("Count", Value::from(3))])),
			]),
		)]);
		let mut filler = Filler::new();
		filler.register(labelled_resolver);

		let mut many = Many::default();
		filler.fill(&mut many, &source).expect("fill succeeds");
		let labels: Vec<String> = many.items.iter().filter_map(|item| item.get().map(|value| value.label())).collect();
		assert_eq!(labels, vec!["leaf:x".to_owned(), "counter:3".to_owned()]);
	}

	#[test]
	fn unregistered_element_capability_fails_even_when_empty() {
		let mut many = Many::default();
		let err = Filler::new()
			.fill(&mut many, &map(vec![("I", Value::Array(Vec::new()))]))
			.expect_err("element capability must be registered");
		assert!(matches!(err, CastError::Unregistered { .. }), "unexpected error: {err}");
	}

	#[test]
	fn non_sequence_source_is_a_mismatch() {
		let mut loose = Loose::default();
		let err = Filler::new()
			.fill(&mut loose, &map(vec![("Numbers", Value::from(1))]))
			.expect_err("integer cannot fill a sequence");
		assert_eq!(err.to_string(), "Numbers: cannot fill sequence from signed integer");
	}

	#[test]
	fn failing_element_names_its_index_and_keeps_old_contents() {
		let source = map(vec![(
			"Leaves",
			Value::Array(vec![Value::Map(map(vec![("Foo", Value::from("ok"))])), Value::from("bad")]),
		)]);
		let mut loose = Loose {
			leaves: vec![Leaf { foo: "old".to_owned() }],
			..Loose::default()
		};
		let err = Filler::new().fill(&mut loose, &source).expect_err("second element is not a map");
		assert_eq!(err.to_string(), "Leaves[1]: cannot fill record from text");
		assert_eq!(loose.leaves, vec![Leaf { foo: "old".to_owned() }]);
	}
}

mod embedded {
	use super::{Flat, Leaf, map};
	use crate::cast::{Filler, Value};

	#[test]
	fn embedded_fields_fill_from_the_same_map() {
		let mut flat = Flat::default();
		let source = map(vec![("Foo", Value::from("inner")), ("J", Value::from("outer"))]);
		Filler::new().fill(&mut flat, &source).expect("fill succeeds");
		assert_eq!(
			flat,
			Flat {
				base: Leaf { foo: "inner".to_owned() },
				j: "outer".to_owned(),
			}
		);
	}
}
