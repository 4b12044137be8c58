//! Type resolution engine.
//!
//! Walks a (possibly cyclic, possibly generic) host type graph and turns each
//! occurrence into a [`TsType`], registering one definition per distinct named
//! type along the way. Each occurrence is peeled in a fixed order:
//!
//! 1. value-type nullable wrapper
//! 2. keyed association (`Record<K, V>`), checked before sequences
//! 3. sequence wrapper (sets the array flag)
//! 4. scalar table
//! 5. open generic parameter
//! 6. memo check against the registry
//! 7. enum definition
//! 8. class definition
//! 9. anything else is unrepresentable
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::error::{GenerateError, Result};
use crate::host::{
    simple_name, ClassDecl, Declaration, EnumDecl, HostType, MemberDecl, Occurrence,
    ParameterDecl, TypeSource,
};
use crate::ir::TsType;
use crate::registry::Registry;
use crate::render;

pub struct Resolver<'s, S: TypeSource + ?Sized> {
    source: &'s S,
}

impl<'s, S: TypeSource + ?Sized> Resolver<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    pub fn resolve_type(&self, ty: &HostType, registry: &mut Registry) -> Result<TsType> {
        self.resolve(Occurrence::of(ty), registry)
    }

    pub fn resolve_member(&self, member: &MemberDecl, registry: &mut Registry) -> Result<TsType> {
        self.resolve(Occurrence::member(member), registry)
    }

    pub fn resolve_parameter(
        &self,
        parameter: &ParameterDecl,
        registry: &mut Registry,
    ) -> Result<TsType> {
        self.resolve(Occurrence::parameter(parameter), registry)
    }

    pub fn resolve(&self, occurrence: Occurrence<'_>, registry: &mut Registry) -> Result<TsType> {
        // 1) structural and contextual nullability merge into one flag
        let (ty, is_nullable) = match occurrence.ty {
            HostType::Nullable { inner } => (inner.as_ref(), true),
            ty => (ty, occurrence.nullable),
        };

        // 2) maps; key and value never inherit the container's nullability
        if let HostType::Map { args } = ty {
            if let [key, value] = args.as_slice() {
                let key = self.resolve(Occurrence::of(key), registry)?;
                let value = self.resolve(Occurrence::of(value), registry)?;
                return Ok(TsType::record(key, value, is_nullable));
            }
        }

        // 3) sequences
        let (ty, is_array) = match sequence_element(ty) {
            Some(element) => (element, true),
            None => (ty, false),
        };

        match ty {
            // 4)
            HostType::Scalar { scalar } => {
                Ok(TsType::primitive(scalar.ts_name(), is_nullable, is_array))
            }
            // 5) generic parameters are never independently nullable here
            HostType::Param { name } => Ok(TsType::primitive(name.as_str(), false, is_array)),
            HostType::Named { name, args } => {
                self.resolve_named(name, args, is_nullable, is_array, registry)
            }
            HostType::Sequence { .. } | HostType::Map { .. } => Err(
                GenerateError::unrepresentable(
                    ty.label(),
                    "nested collections cannot be expressed with a single array suffix",
                ),
            ),
            HostType::Nullable { .. } => Err(GenerateError::unrepresentable(
                ty.label(),
                "nested nullable wrapper",
            )),
            HostType::Opaque { name } => Err(GenerateError::unrepresentable(
                name.as_str(),
                "not a scalar, enum, map, sequence, generic parameter or class",
            )),
        }
    }

    fn resolve_named(
        &self,
        name: &str,
        args: &[HostType],
        is_nullable: bool,
        is_array: bool,
        registry: &mut Registry,
    ) -> Result<TsType> {
        let simple = simple_name(name);

        // Arguments belong to this reference, not to the shared definition,
        // so they are resolved even when the definition already exists.
        let generic_arguments = args
            .iter()
            .map(|arg| self.resolve(Occurrence::of(arg), registry))
            .collect::<Result<Vec<_>>>()?;

        // 6) must run before any member walk, or cycles never terminate
        if registry.is_known(simple) {
            trace!(name = simple, "already resolved");
            return Ok(TsType::complex(simple, is_nullable, is_array, generic_arguments));
        }

        match self.source.declaration(name) {
            // 7)
            Some(Declaration::Enum(decl)) => self.define_enum(simple, decl, registry)?,
            // 8)
            Some(Declaration::Class(decl)) => self.define_class(simple, decl, registry)?,
            // 9)
            None => {
                return Err(GenerateError::unrepresentable(
                    name,
                    "no class or enum declaration in the type catalog",
                ));
            }
        }
        Ok(TsType::complex(simple, is_nullable, is_array, generic_arguments))
    }

    fn define_enum(&self, name: &str, decl: &EnumDecl, registry: &mut Registry) -> Result<()> {
        let text = render::enum_type(name, &decl.members);
        registry.insert(name, text)?;
        debug!(name, members = decl.members.len(), "registered enum");
        Ok(())
    }

    fn define_class(&self, name: &str, decl: &ClassDecl, registry: &mut Registry) -> Result<()> {
        registry.begin(name);

        let mut fields = Vec::with_capacity(decl.members.len());
        for member in &decl.members {
            let ty = self.resolve_member(member, registry)?;
            fields.push((render::field_name(&member.name), ty));
        }

        let imports = collect_imports(name, fields.iter().map(|(_, ty)| ty));
        let display_name = render::definition_name(name, &decl.generic_params);
        let text = render::object_type(&display_name, &fields, &imports);
        registry.insert(name, text)?;
        debug!(name, fields = fields.len(), imports = imports.len(), "registered class");
        Ok(())
    }
}

/// Resolve one occurrence against `source` with a caller-owned registry.
pub fn resolve<S: TypeSource + ?Sized>(
    source: &S,
    occurrence: Occurrence<'_>,
    registry: &mut Registry,
) -> Result<TsType> {
    Resolver::new(source).resolve(occurrence, registry)
}

/// Element type if `ty` is a sequence. Element nullability is dropped.
///
/// A "map" with the wrong number of arguments is still iterable, so it is
/// treated as a sequence of its first argument.
fn sequence_element(ty: &HostType) -> Option<&HostType> {
    let element = match ty {
        HostType::Sequence { element } => element.as_ref(),
        HostType::Map { args } => args.first()?,
        _ => return None,
    };
    Some(match element {
        HostType::Nullable { inner } => inner.as_ref(),
        element => element,
    })
}

/// Named types referenced by fields or (recursively) their generic arguments,
/// deduplicated in first-seen order. A type never imports itself.
fn collect_imports<'t>(own_name: &str, types: impl IntoIterator<Item = &'t TsType>) -> Vec<String> {
    fn visit<'t>(ty: &'t TsType, seen: &mut IndexSet<&'t str>) {
        if ty.is_complex() {
            seen.insert(ty.name());
        }
        for arg in ty.generic_arguments() {
            visit(arg, seen);
        }
    }

    let mut seen = IndexSet::new();
    for ty in types {
        visit(ty, &mut seen);
    }
    seen.into_iter()
        .filter(|name| *name != own_name)
        .map(str::to_owned)
        .collect()
}

// ------------------------------- Tests ------------------------------------ //
