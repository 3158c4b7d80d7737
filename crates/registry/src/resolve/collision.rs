//! Collision vocabulary for facet discovery.
//!
//! # Role
//!
//! Records every time two distinct declarations of the same facet name met
//! during a hierarchy walk, which one was kept, and why.

use std::sync::Arc;

use crate::core::FacetKind;

/// Why one of two same-named declarations was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
	/// A config key was redeclared on a more specific type; the subclass wins.
	Override,
	/// The declaring types are unrelated by inheritance, or the facet kind does not
	/// use specificity. The first declaration met in the walk was kept.
	Ambiguous,
}

/// A resolved clash between two distinct declarations of one facet name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	pub kind: FacetKind,
	pub name: Arc<str>,
	/// Declaring type of the declaration that was kept.
	pub kept: Arc<str>,
	/// Declaring type of the declaration that was dropped.
	pub dropped: Arc<str>,
	pub cause: CollisionCause,
}

impl Collision {
	/// True for genuine misdeclarations (the ones logged at warn level).
	pub fn is_conflict(&self) -> bool {
		self.cause == CollisionCause::Ambiguous
	}
}

impl core::fmt::Display for Collision {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self.cause {
			CollisionCause::Override => write!(
				f,
				"{} '{}' declared on {} overrides {}",
				self.kind, self.name, self.kept, self.dropped
			),
			CollisionCause::Ambiguous => write!(
				f,
				"multiple definitions for {} '{}'; preferring {} to {}",
				self.kind, self.name, self.kept, self.dropped
			),
		}
	}
}
