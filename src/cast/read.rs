use crate::cast::{Map, Peek, Record, Reflect, Value, snake_case};

/// Spelling applied to field names when they become map keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStyle {
	/// Field names as declared.
	#[default]
	Verbatim,
	/// All-lowercase field names.
	Lowercase,
	/// Lowercase words joined with underscores.
	SnakeCase,
}

impl KeyStyle {
	/// Spell `name` in this style.
	pub fn apply(self, name: &str) -> String {
		match self {
			Self::Verbatim => name.to_owned(),
			Self::Lowercase => name.to_lowercase(),
			Self::SnakeCase => snake_case(name),
		}
	}
}

/// Options controlling record-to-map conversion.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
	/// Spelling of output keys.
	pub key_style: KeyStyle,
}

impl ReadOptions {
	/// Lowercase output keys.
	pub fn lowercase() -> Self {
		Self {
			key_style: KeyStyle::Lowercase,
		}
	}

	/// Snake-case output keys.
	pub fn snake_case() -> Self {
		Self {
			key_style: KeyStyle::SnakeCase,
		}
	}
}

/// Convert a record, or a reference to one, into a keyed map.
///
/// Anything that does not lead to a record, including nil references,
/// yields an empty map.
pub fn read<T: Reflect + ?Sized>(value: &T, options: &ReadOptions) -> Map {
	match value.peek() {
		Peek::Record(record) | Peek::Optional(Some(record)) | Peek::Poly(Some(record)) => read_record(record, options),
		_ => Map::new(),
	}
}

/// Convert a record into a keyed map.
///
/// Embedded records flatten into the same map; a later field overwrites an
/// earlier one with the same key.
pub fn read_record(record: &dyn Record, options: &ReadOptions) -> Map {
	let mut out = Map::new();
	flatten_into(record, options, &mut out);
	out
}

/// Convert any reflectable value into a [`Value`].
///
/// Records become maps, sequences map elementwise, nil references become
/// [`Value::Null`], and leaves are returned unchanged.
pub fn read_value<T: Reflect + ?Sized>(value: &T, options: &ReadOptions) -> Value {
	peek_value(value.peek(), options)
}

fn flatten_into(record: &dyn Record, options: &ReadOptions, out: &mut Map) {
	for (field, peek) in record.shape().fields.iter().zip(record.peek_fields()) {
		if !field.is_exported() {
			continue;
		}
		match peek {
			Peek::Record(inner) if field.embedded => flatten_into(inner, options, out),
			peek => {
				out.insert(options.key_style.apply(field.name), peek_value(peek, options));
			}
		}
	}
}

fn peek_value(peek: Peek<'_>, options: &ReadOptions) -> Value {
	match peek {
		Peek::Value(value) => value,
		Peek::Record(record) | Peek::Optional(Some(record)) | Peek::Poly(Some(record)) => Value::Map(read_record(record, options)),
		Peek::Optional(None) | Peek::Poly(None) | Peek::Hidden => Value::Null,
		Peek::Seq(items) => Value::Array(items.into_iter().map(|item| peek_value(item, options)).collect()),
	}
}
