/// Identifier case conversion command.
pub mod case;
/// Kernel coercion command.
pub mod coerce;
/// JSON/MessagePack conversion command.
pub mod convert;
/// Path lookup command.
pub mod get;
/// Map merge command.
pub mod merge;
/// Shared input and output helpers.
pub(crate) mod util;
