use thiserror::Error;

use crate::cast::{FieldKind, FieldPath, Kind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CastError>;

/// Errors produced while filling records, merging maps, and moving values through codecs.
#[derive(Debug, Error)]
pub enum CastError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Declared field kind cannot be filled from the source value's shape.
	#[error("{path}: cannot fill {kind} from {got}")]
	Mismatch {
		/// Access path of the field being filled.
		path: FieldPath,
		/// Declared kind of the destination field.
		kind: FieldKind,
		/// Shape of the source value.
		got: Kind,
	},
	/// Polymorphic field or element type has no registered resolver.
	#[error("{path}: no resolver registered for {capability}")]
	Unregistered {
		/// Access path of the field being filled.
		path: FieldPath,
		/// Type name of the capability trait object.
		capability: &'static str,
	},
	/// Merge input was not a map.
	#[error("merge input #{index} is {got}, expected map")]
	NotAMap {
		/// Zero-based position of the offending input.
		index: usize,
		/// Shape of the offending input.
		got: Kind,
	},
	/// Field path string is malformed.
	#[error("invalid field path `{path}` at byte {offset}: {reason}")]
	InvalidFieldPath {
		/// Raw path text.
		path: String,
		/// Byte offset where parsing stopped.
		offset: usize,
		/// What the parser expected there.
		reason: &'static str,
	},
	/// Hex text could not be decoded into bytes.
	#[error("invalid hex input: {0}")]
	InvalidHex(#[from] hex::FromHexError),
	/// JSON encode or decode failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// MessagePack encode failure.
	#[error("msgpack encode: {0}")]
	MsgpackEncode(#[from] rmp_serde::encode::Error),
	/// MessagePack decode failure.
	#[error("msgpack decode: {0}")]
	MsgpackDecode(#[from] rmp_serde::decode::Error),
}
