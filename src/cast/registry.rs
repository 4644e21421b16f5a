use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::cast::{Capability, Value};

type Resolver<C> = Box<dyn Fn(&Value) -> Box<C> + Send + Sync>;

struct Entry {
	capability: Capability,
	resolver: Box<dyn Any + Send + Sync>,
}

/// Resolvers that pick a concrete record for a polymorphic field.
///
/// Keyed by capability trait object (`dyn Trait`). A resolver receives the
/// source value being filled and returns a fresh, default-populated instance
/// that the writer then fills from the same source.
#[derive(Default)]
pub struct ResolverRegistry {
	entries: HashMap<TypeId, Entry>,
}

impl ResolverRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the resolver for capability `C`, replacing any previous one.
	pub fn register<C: ?Sized + 'static>(&mut self, resolver: impl Fn(&Value) -> Box<C> + Send + Sync + 'static) -> &mut Self {
		let capability = Capability::of::<C>();
		let resolver: Resolver<C> = Box::new(resolver);
		self.entries.insert(
			capability.id(),
			Entry {
				capability,
				resolver: Box::new(resolver),
			},
		);
		self
	}

	/// Whether a resolver exists for `capability`.
	pub fn contains(&self, capability: Capability) -> bool {
		self.entries.contains_key(&capability.id())
	}

	/// Run the resolver for `C` against `source`.
	pub fn resolve<C: ?Sized + 'static>(&self, source: &Value) -> Option<Box<C>> {
		let entry = self.entries.get(&TypeId::of::<C>())?;
		let resolver = entry.resolver.downcast_ref::<Resolver<C>>()?;
		Some(resolver(source))
	}

	/// Number of registered capabilities.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no capability is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for ResolverRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.entries.values().map(|entry| entry.capability.name())).finish()
	}
}
