use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::decl::TypeDecl;
use super::registration::TypeReg;
use crate::core::TypeError;
use crate::resolve::ResolvedFacets;

/// Ancestor/descendant relationship between two declaring types.
///
/// Exactly one variant holds for any pair of types in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
	/// Both names denote the same type.
	Same,
	/// The first type is an ancestor of (less specific than) the second.
	Ancestor,
	/// The first type is a descendant of (more specific than) the second.
	Descendant,
	/// Neither type inherits from the other.
	Unrelated,
}

pub(crate) struct TypeNode {
	pub(crate) decl: TypeDecl,
	pub(crate) name: Arc<str>,
	/// The type itself, then parents depth-first in declaration order; each type once.
	pub(crate) walk: Vec<usize>,
	pub(crate) ancestors: FxHashSet<usize>,
	pub(crate) resolved: OnceLock<Arc<ResolvedFacets>>,
}

/// Validated type hierarchy shared by every entity of the process.
///
/// Built once from explicit [`TypeDecl`]s; immutable afterwards apart from the
/// per-type resolution cache.
pub struct TypeCatalog {
	pub(crate) nodes: Vec<TypeNode>,
	pub(crate) by_name: IndexMap<Arc<str>, usize>,
}

impl core::fmt::Debug for TypeCatalog {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("TypeCatalog")
			.field("types", &self.by_name.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl TypeCatalog {
	pub fn builder() -> CatalogBuilder {
		CatalogBuilder::default()
	}

	/// Returns the catalog assembled from every [`entity_type!`](crate::entity_type) in the process.
	///
	/// Built on first call. If the submitted declarations are invalid, every call
	/// returns the same error.
	pub fn global() -> Result<&'static TypeCatalog, TypeError> {
		static GLOBAL: OnceLock<Result<TypeCatalog, TypeError>> = OnceLock::new();
		GLOBAL
			.get_or_init(|| {
				let mut builder = TypeCatalog::builder();
				for reg in inventory::iter::<TypeReg> {
					builder = builder.register(reg.declare()?);
				}
				builder.build()
			})
			.as_ref()
			.map_err(Clone::clone)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Type names in registration order.
	pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
		self.by_name.keys().map(AsRef::as_ref)
	}

	pub fn decl(&self, name: &str) -> Option<&TypeDecl> {
		self.index_of(name).map(|i| &self.nodes[i].decl)
	}

	/// The hierarchy walk for `name`: the type itself first, then every ancestor once.
	pub fn walk(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
		let idx = self.index_of(name)?;
		Some(self.nodes[idx].walk.iter().map(|&i| &*self.nodes[i].name))
	}

	/// Returns true if `ancestor` is a strict ancestor of `descendant`.
	pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
		self.specificity(ancestor, descendant) == Some(Specificity::Ancestor)
	}

	/// Compares two declaring types. `None` if either is unknown.
	pub fn specificity(&self, a: &str, b: &str) -> Option<Specificity> {
		Some(self.specificity_idx(self.index_of(a)?, self.index_of(b)?))
	}

	pub(crate) fn specificity_idx(&self, a: usize, b: usize) -> Specificity {
		if a == b {
			Specificity::Same
		} else if self.nodes[b].ancestors.contains(&a) {
			Specificity::Ancestor
		} else if self.nodes[a].ancestors.contains(&b) {
			Specificity::Descendant
		} else {
			Specificity::Unrelated
		}
	}

	pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
		self.by_name.get(name).copied()
	}

	pub(crate) fn node_of(&self, name: &str) -> Result<(usize, &TypeNode), TypeError> {
		let idx = self
			.index_of(name)
			.ok_or_else(|| TypeError::UnknownType(name.to_string()))?;
		Ok((idx, &self.nodes[idx]))
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Collects declarations and validates the hierarchy they form.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	decls: Vec<TypeDecl>,
}

impl CatalogBuilder {
	pub fn register(mut self, decl: TypeDecl) -> Self {
		self.decls.push(decl);
		self
	}

	/// Fails on duplicate type names, unknown parents and cycles.
	pub fn build(self) -> Result<TypeCatalog, TypeError> {
		let mut by_name: IndexMap<Arc<str>, usize> = IndexMap::with_capacity(self.decls.len());
		for (idx, decl) in self.decls.iter().enumerate() {
			if by_name.insert(Arc::from(&*decl.name), idx).is_some() {
				return Err(TypeError::DuplicateType(decl.name.to_string()));
			}
		}

		let mut parents: Vec<Vec<usize>> = Vec::with_capacity(self.decls.len());
		for decl in &self.decls {
			let mut resolved = Vec::with_capacity(decl.parents.len());
			for parent in &decl.parents {
				let idx = by_name
					.get(&**parent)
					.copied()
					.ok_or_else(|| TypeError::UnknownParent {
						type_name: decl.name.to_string(),
						parent: parent.to_string(),
					})?;
				resolved.push(idx);
			}
			parents.push(resolved);
		}

		check_acyclic(&self.decls, &parents)?;

		let nodes = self
			.decls
			.into_iter()
			.enumerate()
			.map(|(idx, decl)| {
				let walk = walk_from(idx, &parents);
				let ancestors = walk[1..].iter().copied().collect();
				TypeNode {
					name: Arc::from(&*decl.name),
					decl,
					walk,
					ancestors,
					resolved: OnceLock::new(),
				}
			})
			.collect();

		Ok(TypeCatalog { nodes, by_name })
	}
}

fn walk_from(root: usize, parents: &[Vec<usize>]) -> Vec<usize> {
	fn visit(idx: usize, parents: &[Vec<usize>], seen: &mut FxHashSet<usize>, out: &mut Vec<usize>) {
		if !seen.insert(idx) {
			return;
		}
		out.push(idx);
		for &parent in &parents[idx] {
			visit(parent, parents, seen, out);
		}
	}

	let mut seen = FxHashSet::default();
	let mut out = Vec::new();
	visit(root, parents, &mut seen, &mut out);
	out
}

fn check_acyclic(decls: &[TypeDecl], parents: &[Vec<usize>]) -> Result<(), TypeError> {
	#[derive(Clone, Copy, PartialEq, Eq)]
	enum Mark {
		Unvisited,
		Active,
		Done,
	}

	fn visit(
		idx: usize,
		decls: &[TypeDecl],
		parents: &[Vec<usize>],
		marks: &mut [Mark],
		path: &mut Vec<usize>,
	) -> Result<(), TypeError> {
		match marks[idx] {
			Mark::Done => return Ok(()),
			Mark::Active => {
				let start = path.iter().position(|&p| p == idx).unwrap_or(0);
				let mut cycle: Vec<String> =
					path[start..].iter().map(|&p| decls[p].name.to_string()).collect();
				cycle.push(decls[idx].name.to_string());
				return Err(TypeError::CyclicHierarchy { path: cycle });
			}
			Mark::Unvisited => {}
		}
		marks[idx] = Mark::Active;
		path.push(idx);
		for &parent in &parents[idx] {
			visit(parent, decls, parents, marks, path)?;
		}
		path.pop();
		marks[idx] = Mark::Done;
		Ok(())
	}

	let mut marks = vec![Mark::Unvisited; decls.len()];
	let mut path = Vec::new();
	for idx in 0..decls.len() {
		visit(idx, decls, parents, &mut marks, &mut path)?;
	}
	Ok(())
}
