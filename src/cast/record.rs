//! Record shapes and the field access seam used by the reader and writer.
//!
//! A record is a struct whose fields are described by a static
//! [`RecordShape`] and exposed through [`Record::peek_fields`] and
//! [`Record::poke_fields`] in declaration order. Field values implement
//! [`Reflect`], which hands out read views ([`Peek`]) and write slots
//! ([`Poke`]). The [`record!`](crate::record) macro generates all of it for a
//! plain struct.

use std::any::TypeId;
use std::fmt;

use crate::cast::{Kind, Map, ResolverRegistry, Result, Value, coerce};

/// Declared kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Signed integer.
	Int,
	/// Unsigned integer.
	Uint,
	/// Float.
	Float,
	/// Boolean.
	Bool,
	/// Text.
	Text,
	/// Raw [`Value`], assigned as-is.
	Any,
	/// Raw [`Map`], assigned as-is from a map source.
	Map,
	/// Nested record.
	Record,
	/// Optional boxed record.
	Optional,
	/// Record behind a capability trait object.
	Polymorphic,
	/// Sequence of reflectable elements.
	Sequence,
	/// Internal field with no reflected kind.
	Opaque,
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Int => "signed integer",
			Self::Uint => "unsigned integer",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Text => "text",
			Self::Any => "any",
			Self::Map => "map",
			Self::Record => "record",
			Self::Optional => "optional record",
			Self::Polymorphic => "polymorphic record",
			Self::Sequence => "sequence",
			Self::Opaque => "opaque",
		})
	}
}

/// Whether the engine may read or write a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Read and written by the engine.
	Exported,
	/// Never touched by the engine.
	Internal,
}

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
	/// Field name as used for map keys.
	pub name: &'static str,
	/// Declared field kind.
	pub kind: FieldKind,
	/// Engine visibility.
	pub visibility: Visibility,
	/// Whether the field's own fields are flattened into the parent.
	pub embedded: bool,
}

impl FieldShape {
	/// Exported, non-embedded field.
	pub const fn new(name: &'static str, kind: FieldKind) -> Self {
		Self {
			name,
			kind,
			visibility: Visibility::Exported,
			embedded: false,
		}
	}

	/// Mark the field as embedded.
	pub const fn embedded(self) -> Self {
		Self { embedded: true, ..self }
	}

	/// Mark the field as internal.
	pub const fn internal(self) -> Self {
		Self {
			visibility: Visibility::Internal,
			..self
		}
	}

	/// Whether the engine may touch the field.
	pub fn is_exported(&self) -> bool {
		self.visibility == Visibility::Exported
	}
}

/// Static description of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
	/// Record type name.
	pub name: &'static str,
	/// Fields in declaration order.
	pub fields: &'static [FieldShape],
}

impl RecordShape {
	/// Look up a field descriptor by name.
	pub fn field(&self, name: &str) -> Option<&FieldShape> {
		self.fields.iter().find(|field| field.name == name)
	}
}

/// Structured value with a fixed set of named fields.
///
/// `peek_fields` and `poke_fields` return one entry per field of
/// [`Record::shape`], in the same order.
pub trait Record: fmt::Debug {
	/// Static field layout.
	fn shape(&self) -> &'static RecordShape;
	/// Read views of every field.
	fn peek_fields(&self) -> Vec<Peek<'_>>;
	/// Write slots for every field.
	fn poke_fields(&mut self) -> Vec<Poke<'_>>;
}

/// Type that can appear as a record field or sequence element.
pub trait Reflect {
	/// Declared kind of fields of this type.
	const KIND: FieldKind;

	/// Read view of the value.
	fn peek(&self) -> Peek<'_>;

	/// Write slot for the value.
	fn poke(&mut self) -> Poke<'_>;

	/// Capability identity for polymorphic types.
	fn capability() -> Option<Capability>
	where
		Self: Sized,
	{
		None
	}
}

/// Read view of one field value.
pub enum Peek<'a> {
	/// Leaf value copied out of the field.
	Value(Value),
	/// Nested record.
	Record(&'a dyn Record),
	/// Optional record reference; `None` is nil.
	Optional(Option<&'a dyn Record>),
	/// Polymorphic record reference; `None` is nil.
	Poly(Option<&'a dyn Record>),
	/// Sequence elements.
	Seq(Vec<Peek<'a>>),
	/// Internal field.
	Hidden,
}

impl Peek<'_> {
	/// Shape classification of the viewed value.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Value(value) => value.kind(),
			Self::Record(_) => Kind::Record,
			Self::Optional(_) => Kind::Optional,
			Self::Poly(_) => Kind::Polymorphic,
			Self::Seq(_) => Kind::Sequence,
			Self::Hidden => Kind::Unrecognized,
		}
	}
}

/// Write slot for one field value.
pub enum Poke<'a> {
	/// Scalar assigned through the coercion kernel.
	Scalar(&'a mut dyn ScalarSlot),
	/// Raw value assigned directly.
	Any(&'a mut Value),
	/// Raw map assigned from a map source.
	Map(&'a mut Map),
	/// Nested record.
	Record(&'a mut dyn RecordSlot),
	/// Optional record reference.
	Optional(&'a mut dyn OptionalSlot),
	/// Polymorphic record reference.
	Poly(&'a mut dyn PolySlot),
	/// Sequence.
	Seq(&'a mut dyn SeqSlot),
	/// Internal field.
	Hidden,
}

impl Poke<'_> {
	/// Declared kind of the slot.
	pub fn kind(&self) -> FieldKind {
		match self {
			Self::Scalar(slot) => slot.kind(),
			Self::Any(_) => FieldKind::Any,
			Self::Map(_) => FieldKind::Map,
			Self::Record(_) => FieldKind::Record,
			Self::Optional(_) => FieldKind::Optional,
			Self::Poly(_) => FieldKind::Polymorphic,
			Self::Seq(_) => FieldKind::Sequence,
			Self::Hidden => FieldKind::Opaque,
		}
	}
}

/// Callback that populates a freshly allocated record.
pub type FillFn<'f> = &'f mut dyn FnMut(&mut dyn Record) -> Result<()>;

/// Scalar field slot.
pub trait ScalarSlot {
	/// Declared scalar kind.
	fn kind(&self) -> FieldKind;
	/// Coerce `source` and store it.
	///
	/// Integers outside a narrow target's range saturate at its bounds.
	fn assign(&mut self, source: &Value);
}

/// Nested record slot.
pub trait RecordSlot {
	/// The record in place, for embedded filling.
	fn record_mut(&mut self) -> &mut dyn Record;
	/// Populate a default instance through `fill` and store it on success.
	fn fill_fresh(&mut self, fill: FillFn<'_>) -> Result<()>;
}

/// Optional record slot.
pub trait OptionalSlot {
	/// Populate a default instance through `fill` and store it on success.
	fn fill_fresh(&mut self, fill: FillFn<'_>) -> Result<()>;
	/// Drop the referenced record.
	fn clear(&mut self);
}

/// Polymorphic record slot.
pub trait PolySlot {
	/// Identity of the slot's capability trait object.
	fn capability(&self) -> Capability;
	/// Resolve a concrete record for `source`, populate it through `fill`, and store it on success.
	///
	/// Returns `Ok(false)` when `registry` has no resolver for the capability.
	fn fill_resolved(&mut self, registry: &ResolverRegistry, source: &Value, fill: FillFn<'_>) -> Result<bool>;
	/// Drop the referenced record.
	fn clear(&mut self);
}

/// Sequence slot.
pub trait SeqSlot {
	/// Declared kind of the elements.
	fn element_kind(&self) -> FieldKind;
	/// Capability identity of polymorphic elements.
	fn element_capability(&self) -> Option<Capability>;
	/// Replace the contents with `len` default elements, each populated through `fill`.
	///
	/// The slot keeps its previous contents when any element fails.
	fn rebuild(&mut self, len: usize, fill: &mut dyn FnMut(usize, Poke<'_>) -> Result<()>) -> Result<()>;
}

/// Identity of a capability trait object such as `dyn Shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
	id: TypeId,
	name: &'static str,
}

impl Capability {
	/// Identity of `C`.
	pub fn of<C: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<C>(),
			name: std::any::type_name::<C>(),
		}
	}

	/// Runtime type identity.
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Type name for diagnostics.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

/// Access to the record behind a capability trait object.
///
/// Capability traits used with [`Poly`] declare this as a supertrait; every
/// [`Record`] implements it.
pub trait AsRecord: fmt::Debug {
	/// Shared record view.
	fn as_record(&self) -> &dyn Record;
	/// Mutable record view.
	fn as_record_mut(&mut self) -> &mut dyn Record;
}

impl<R: Record> AsRecord for R {
	fn as_record(&self) -> &dyn Record {
		self
	}

	fn as_record_mut(&mut self) -> &mut dyn Record {
		self
	}
}

/// Nil-able reference to a record behind a capability trait object.
pub struct Poly<C: ?Sized>(Option<Box<C>>);

impl<C: ?Sized> Poly<C> {
	/// Reference to `value`.
	pub fn new(value: Box<C>) -> Self {
		Self(Some(value))
	}

	/// Nil reference.
	pub fn nil() -> Self {
		Self(None)
	}

	/// Whether the reference is nil.
	pub fn is_nil(&self) -> bool {
		self.0.is_none()
	}

	/// Borrow the referenced value.
	pub fn get(&self) -> Option<&C> {
		self.0.as_deref()
	}

	/// Mutably borrow the referenced value.
	pub fn get_mut(&mut self) -> Option<&mut C> {
		self.0.as_deref_mut()
	}
}

impl<C: ?Sized> Default for Poly<C> {
	fn default() -> Self {
		Self::nil()
	}
}

impl<C: ?Sized> From<Box<C>> for Poly<C> {
	fn from(value: Box<C>) -> Self {
		Self::new(value)
	}
}

impl<C: ?Sized + fmt::Debug> fmt::Debug for Poly<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Poly").field(&self.0).finish()
	}
}

/// Widen an integer source so unsigned values above `i64::MAX` keep their value.
fn wide_int(source: &Value) -> i128 {
	match source {
		Value::U64(value) => i128::from(*value),
		Value::Handle(inner) => match &**inner {
			Value::U64(value) => i128::from(*value),
			_ => i128::from(coerce::to_int(source)),
		},
		_ => i128::from(coerce::to_int(source)),
	}
}

macro_rules! reflect_number {
	(@reflect $kind:ident => $ty:ty) => {
		impl Reflect for $ty {
			const KIND: FieldKind = FieldKind::$kind;

			fn peek(&self) -> Peek<'_> {
				Peek::Value(Value::from(*self))
			}

			fn poke(&mut self) -> Poke<'_> {
				Poke::Scalar(self)
			}
		}
	};
	(int $kind:ident => $($ty:ty),+) => {
		$(
			reflect_number!(@reflect $kind => $ty);

			impl ScalarSlot for $ty {
				fn kind(&self) -> FieldKind {
					FieldKind::$kind
				}

				fn assign(&mut self, source: &Value) {
					let wide = wide_int(source);
					*self = <$ty>::try_from(wide).unwrap_or(if wide < 0 { <$ty>::MIN } else { <$ty>::MAX });
				}
			}
		)+
	};
	(float => $($ty:ty),+) => {
		$(
			reflect_number!(@reflect Float => $ty);

			impl ScalarSlot for $ty {
				fn kind(&self) -> FieldKind {
					FieldKind::Float
				}

				fn assign(&mut self, source: &Value) {
					*self = coerce::to_float(source) as $ty;
				}
			}
		)+
	};
}

reflect_number!(int Int => i8, i16, i32, i64, isize);
reflect_number!(int Uint => u8, u16, u32, u64, usize);
reflect_number!(float => f32, f64);

impl Reflect for bool {
	const KIND: FieldKind = FieldKind::Bool;

	fn peek(&self) -> Peek<'_> {
		Peek::Value(Value::Bool(*self))
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Scalar(self)
	}
}

impl ScalarSlot for bool {
	fn kind(&self) -> FieldKind {
		FieldKind::Bool
	}

	fn assign(&mut self, source: &Value) {
		*self = coerce::to_bool(source);
	}
}

impl Reflect for String {
	const KIND: FieldKind = FieldKind::Text;

	fn peek(&self) -> Peek<'_> {
		Peek::Value(Value::String(self.clone()))
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Scalar(self)
	}
}

impl ScalarSlot for String {
	fn kind(&self) -> FieldKind {
		FieldKind::Text
	}

	fn assign(&mut self, source: &Value) {
		*self = coerce::to_text(source);
	}
}

impl Reflect for Value {
	const KIND: FieldKind = FieldKind::Any;

	fn peek(&self) -> Peek<'_> {
		Peek::Value(self.clone())
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Any(self)
	}
}

impl Reflect for Map {
	const KIND: FieldKind = FieldKind::Map;

	fn peek(&self) -> Peek<'_> {
		Peek::Value(Value::Map(self.clone()))
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Map(self)
	}
}

impl<R: Record + Default> RecordSlot for R {
	fn record_mut(&mut self) -> &mut dyn Record {
		self
	}

	fn fill_fresh(&mut self, fill: FillFn<'_>) -> Result<()> {
		let mut fresh = R::default();
		fill(&mut fresh)?;
		*self = fresh;
		Ok(())
	}
}

impl<R: Record + Default> Reflect for Option<Box<R>> {
	const KIND: FieldKind = FieldKind::Optional;

	fn peek(&self) -> Peek<'_> {
		Peek::Optional(self.as_deref().map(|record| record as &dyn Record))
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Optional(self)
	}
}

impl<R: Record + Default> OptionalSlot for Option<Box<R>> {
	fn fill_fresh(&mut self, fill: FillFn<'_>) -> Result<()> {
		let mut fresh = Box::<R>::default();
		fill(&mut *fresh)?;
		*self = Some(fresh);
		Ok(())
	}

	fn clear(&mut self) {
		*self = None;
	}
}

impl<C: ?Sized + AsRecord + 'static> Reflect for Poly<C> {
	const KIND: FieldKind = FieldKind::Polymorphic;

	fn peek(&self) -> Peek<'_> {
		Peek::Poly(self.get().map(|value| value.as_record()))
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Poly(self)
	}

	fn capability() -> Option<Capability> {
		Some(Capability::of::<C>())
	}
}

impl<C: ?Sized + AsRecord + 'static> PolySlot for Poly<C> {
	fn capability(&self) -> Capability {
		Capability::of::<C>()
	}

	fn fill_resolved(&mut self, registry: &ResolverRegistry, source: &Value, fill: FillFn<'_>) -> Result<bool> {
		let Some(mut fresh) = registry.resolve::<C>(source) else {
			return Ok(false);
		};
		fill(fresh.as_record_mut())?;
		self.0 = Some(fresh);
		Ok(true)
	}

	fn clear(&mut self) {
		self.0 = None;
	}
}

impl<T: Reflect + Default> Reflect for Vec<T> {
	const KIND: FieldKind = FieldKind::Sequence;

	fn peek(&self) -> Peek<'_> {
		Peek::Seq(self.iter().map(Reflect::peek).collect())
	}

	fn poke(&mut self) -> Poke<'_> {
		Poke::Seq(self)
	}
}

impl<T: Reflect + Default> SeqSlot for Vec<T> {
	fn element_kind(&self) -> FieldKind {
		T::KIND
	}

	fn element_capability(&self) -> Option<Capability> {
		T::capability()
	}

	fn rebuild(&mut self, len: usize, fill: &mut dyn FnMut(usize, Poke<'_>) -> Result<()>) -> Result<()> {
		let mut fresh: Vec<T> = std::iter::repeat_with(T::default).take(len).collect();
		for (index, item) in fresh.iter_mut().enumerate() {
			fill(index, item.poke())?;
		}
		*self = fresh;
		Ok(())
	}
}

/// Implement [`Record`] and [`Reflect`] for a struct.
///
/// Each field is listed with a mode, its name, its type, and an optional map
/// key (defaulting to the field name):
///
/// - `field` for an exported field,
/// - `embed` for a record whose fields flatten into the parent,
/// - `hidden` for an internal field the engine never touches.
///
/// The struct must implement `Debug` and `Default`.
///
/// ```
/// use shapecast::record;
///
/// #[derive(Debug, Default)]
/// struct Point {
/// 	x: i64,
/// 	y: i64,
/// 	cache: Option<String>,
/// }
///
/// record!(Point {
/// 	field x: i64 as "X",
/// 	field y: i64 as "Y",
/// 	hidden cache: Option<String>,
/// });
/// ```
#[macro_export]
macro_rules! record {
	(@name $field:ident) => {
		stringify!($field)
	};
	(@name $field:ident $name:literal) => {
		$name
	};
	(@shape field $name:expr, $fty:ty) => {
		$crate::cast::FieldShape::new($name, <$fty as $crate::cast::Reflect>::KIND)
	};
	(@shape embed $name:expr, $fty:ty) => {
		$crate::cast::FieldShape::new($name, <$fty as $crate::cast::Reflect>::KIND).embedded()
	};
	(@shape hidden $name:expr, $fty:ty) => {
		$crate::cast::FieldShape::new($name, $crate::cast::FieldKind::Opaque).internal()
	};
	(@peek hidden $value:expr) => {
		$crate::cast::Peek::Hidden
	};
	(@peek $mode:ident $value:expr) => {
		$crate::cast::Reflect::peek($value)
	};
	(@poke hidden $value:expr) => {
		$crate::cast::Poke::Hidden
	};
	(@poke $mode:ident $value:expr) => {
		$crate::cast::Reflect::poke($value)
	};
	($ty:ident { $($mode:ident $field:ident : $fty:ty $(as $name:literal)?),* $(,)? }) => {
		impl $crate::cast::Record for $ty {
			fn shape(&self) -> &'static $crate::cast::RecordShape {
				static SHAPE: $crate::cast::RecordShape = $crate::cast::RecordShape {
					name: stringify!($ty),
					fields: &[$($crate::record!(@shape $mode $crate::record!(@name $field $($name)?), $fty)),*],
				};
				&SHAPE
			}

			fn peek_fields(&self) -> Vec<$crate::cast::Peek<'_>> {
				vec![$($crate::record!(@peek $mode &self.$field)),*]
			}

			fn poke_fields(&mut self) -> Vec<$crate::cast::Poke<'_>> {
				vec![$($crate::record!(@poke $mode &mut self.$field)),*]
			}
		}

		impl $crate::cast::Reflect for $ty {
			const KIND: $crate::cast::FieldKind = $crate::cast::FieldKind::Record;

			fn peek(&self) -> $crate::cast::Peek<'_> {
				$crate::cast::Peek::Record(self)
			}

			fn poke(&mut self) -> $crate::cast::Poke<'_> {
				$crate::cast::Poke::Record(self)
			}
		}
	};
}
