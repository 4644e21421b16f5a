use std::borrow::Cow;

use tracing::{debug, trace};

use crate::cast::{CastError, FieldKind, FieldPath, Map, Poke, Record, ResolverRegistry, Result, Value, snake_case};

#[cfg(test)]
mod tests;

/// Writes keyed maps back into records.
///
/// Each field is looked up by its exact name, then its lowercase spelling,
/// then its snake-case spelling; absent keys leave the field untouched.
/// Scalars are coerced, nested records are rebuilt from sub-maps, and
/// polymorphic fields are resolved through the owned [`ResolverRegistry`].
///
/// A failed fill aborts at the first error. Fields assigned before the
/// failure keep their new values.
#[derive(Debug, Default)]
pub struct Filler {
	registry: ResolverRegistry,
}

impl Filler {
	/// Filler with an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Filler using an existing registry.
	pub fn with_registry(registry: ResolverRegistry) -> Self {
		Self { registry }
	}

	/// Registry consulted for polymorphic fields.
	pub fn registry(&self) -> &ResolverRegistry {
		&self.registry
	}

	/// Mutable registry, for adding resolvers.
	pub fn registry_mut(&mut self) -> &mut ResolverRegistry {
		&mut self.registry
	}

	/// Register the resolver for capability `C`.
	pub fn register<C: ?Sized + 'static>(&mut self, resolver: impl Fn(&Value) -> Box<C> + Send + Sync + 'static) -> &mut Self {
		self.registry.register::<C>(resolver);
		self
	}

	/// Populate `record` from `source`.
	pub fn fill(&self, record: &mut dyn Record, source: &Map) -> Result<()> {
		self.fill_record(record, source, &FieldPath::root())
	}

	/// Populate `record` from a map-shaped value.
	pub fn fill_value(&self, record: &mut dyn Record, source: &Value) -> Result<()> {
		match source.innermost() {
			Value::Map(map) => self.fill(record, map),
			other => Err(CastError::Mismatch {
				path: FieldPath::root(),
				kind: FieldKind::Record,
				got: other.kind(),
			}),
		}
	}

	fn fill_record(&self, record: &mut dyn Record, source: &Map, path: &FieldPath) -> Result<()> {
		let shape = record.shape();
		trace!(record = shape.name, %path, "filling record");

		for (field, poke) in shape.fields.iter().zip(record.poke_fields()) {
			if !field.is_exported() {
				trace!(record = shape.name, field = field.name, "skipping internal field");
				continue;
			}

			let poke = match poke {
				Poke::Record(slot) if field.embedded => {
					self.fill_record(slot.record_mut(), source, path)?;
					continue;
				}
				poke => poke,
			};

			let Some(value) = lookup(source, field.name) else {
				trace!(record = shape.name, field = field.name, "field absent from source");
				continue;
			};
			self.fill_slot(poke, value, &path.field(field.name))?;
		}

		Ok(())
	}

	fn fill_slot(&self, poke: Poke<'_>, source: &Value, path: &FieldPath) -> Result<()> {
		let kind = poke.kind();
		match poke {
			Poke::Hidden => Ok(()),
			Poke::Scalar(slot) => {
				slot.assign(source);
				Ok(())
			}
			Poke::Any(slot) => {
				*slot = source.clone();
				Ok(())
			}
			Poke::Map(slot) => {
				*slot = sub_map(source, kind, path)?.clone();
				Ok(())
			}
			Poke::Record(slot) => {
				let sub = sub_map(source, kind, path)?;
				slot.fill_fresh(&mut |record| self.fill_record(record, sub, path))
			}
			Poke::Optional(slot) if source.innermost().is_null() => {
				slot.clear();
				Ok(())
			}
			Poke::Poly(slot) if source.innermost().is_null() => {
				slot.clear();
				Ok(())
			}
			Poke::Optional(slot) => {
				let sub = sub_map(source, kind, path)?;
				slot.fill_fresh(&mut |record| self.fill_record(record, sub, path))
			}
			Poke::Poly(slot) => {
				let capability = slot.capability();
				if !self.registry.contains(capability) {
					return Err(unregistered(path, capability.name()));
				}
				let sub = sub_map(source, kind, path)?;
				debug!(%path, capability = capability.name(), "resolving polymorphic field");
				if slot.fill_resolved(&self.registry, source, &mut |record| self.fill_record(record, sub, path))? {
					Ok(())
				} else {
					Err(unregistered(path, capability.name()))
				}
			}
			Poke::Seq(slot) => {
				let items = sequence(source, kind, path)?;
				if let Some(capability) = slot.element_capability() {
					if !self.registry.contains(capability) {
						return Err(unregistered(path, capability.name()));
					}
				}
				trace!(%path, len = items.len(), element = %slot.element_kind(), "filling sequence");
				slot.rebuild(items.len(), &mut |index, item| self.fill_slot(item, &items[index], &path.index(index)))
			}
		}
	}
}

fn lookup<'a>(source: &'a Map, name: &str) -> Option<&'a Value> {
	source
		.get(name)
		.or_else(|| source.get(&name.to_lowercase()))
		.or_else(|| source.get(&snake_case(name)))
}

fn sub_map<'a>(source: &'a Value, kind: FieldKind, path: &FieldPath) -> Result<&'a Map> {
	match source.innermost() {
		Value::Map(map) => Ok(map),
		other => Err(mismatch(path, kind, other)),
	}
}

fn sequence<'a>(source: &'a Value, kind: FieldKind, path: &FieldPath) -> Result<Cow<'a, [Value]>> {
	match source.innermost() {
		Value::Array(items) => Ok(Cow::Borrowed(items.as_slice())),
		Value::Bytes(bytes) => Ok(Cow::Owned(bytes.iter().map(|byte| Value::U64(u64::from(*byte))).collect())),
		other => Err(mismatch(path, kind, other)),
	}
}

fn mismatch(path: &FieldPath, kind: FieldKind, got: &Value) -> CastError {
	CastError::Mismatch {
		path: path.clone(),
		kind,
		got: got.kind(),
	}
}

fn unregistered(path: &FieldPath, capability: &'static str) -> CastError {
	CastError::Unregistered {
		path: path.clone(),
		capability,
	}
}
