mod case;
mod codec;
mod error;
mod fill;
mod merge;
mod path;
mod read;
mod record;
mod registry;
mod value;

/// Total coercions from dynamic values into scalars and collections.
pub mod coerce;

/// Identifier case conversion.
pub use case::snake_case;
/// JSON and MessagePack adapters.
pub use codec::{from_json, from_msgpack, to_json, to_json_pretty, to_msgpack};
/// Error and result aliases.
pub use error::{CastError, Result};
/// Map-to-record writer.
pub use fill::Filler;
/// Map merging.
pub use merge::merge_maps;
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Record-to-map reader and options.
pub use read::{KeyStyle, ReadOptions, read, read_record, read_value};
/// Record shapes and field access seam.
pub use record::{
	AsRecord, Capability, FieldKind, FieldShape, FillFn, OptionalSlot, Peek, Poke, Poly, PolySlot, Record, RecordShape, RecordSlot, Reflect, ScalarSlot,
	SeqSlot, Visibility,
};
/// Polymorphic resolver table.
pub use registry::ResolverRegistry;
/// Dynamic value model.
pub use value::{Kind, Map, Value};
