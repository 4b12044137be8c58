//! Generate TypeScript type declarations from a host object-type graph.
//!
//! Pipeline: load a [`catalog::TypeCatalog`] (the host type descriptors) →
//! run the [`resolve::Resolver`] over the root types with one fresh
//! [`registry::Registry`] → persist the registry, one definition per name.
pub mod catalog;
pub mod cli;
pub mod error;
pub mod host;
pub mod ir;
pub mod logging;
pub mod path_de;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod scalar;

pub use catalog::TypeCatalog;
pub use error::{GenerateError, Result};
pub use host::{HostType, Occurrence, TypeSource};
pub use ir::TsType;
pub use registry::Registry;
pub use resolve::{resolve, Resolver};

/// One generation pass over `roots` with a fresh registry.
///
/// Roots are declaration names. Any unrepresentable type aborts the pass; a
/// partially filled registry is never returned.
pub fn generate<S, I>(source: &S, roots: I) -> Result<Registry>
where
    S: TypeSource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let resolver = Resolver::new(source);
    let mut registry = Registry::new();
    for root in roots {
        let root = HostType::named(root.as_ref());
        resolver.resolve_type(&root, &mut registry)?;
    }
    Ok(registry)
}

// ------------------------------- Tests ------------------------------------ //
