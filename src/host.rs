//! Host type model.
//!
//! This is the read-only "type descriptor" side of the generator: a closed set
//! of shapes (scalar, nullable wrapper, sequence, map, generic parameter, named
//! declaration, opaque) plus the declarations that named references point at.
//! Everything here is plain data, deserializable from a catalog file.
use serde::{Deserialize, Serialize};

use crate::scalar::ScalarKind;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One host type, as it appears at a use site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostType {
    Scalar { scalar: ScalarKind },
    /// Structural (value-type) nullability, e.g. `int?`.
    Nullable { inner: Box<HostType> },
    /// Lists, arrays, enumerables.
    Sequence { element: Box<HostType> },
    /// Keyed association. Only counts as a map with exactly two args.
    Map {
        #[serde(default)]
        args: Vec<HostType>,
    },
    /// Unbound type variable, e.g. `TFoo` inside `Model<TFoo>`.
    Param { name: String },
    /// Reference to a catalog declaration, possibly closed over `args`.
    Named {
        name: String,
        #[serde(default)]
        args: Vec<HostType>,
    },
    /// Anything the host knows about but the generator cannot classify.
    Opaque { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Host name, may carry an arity suffix (`Pair`2`).
    pub name: String,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: HostType,
    /// Contextual (reference) nullability of this member.
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: HostType,
    #[serde(default)]
    pub nullable: bool,
}

/// Looks up declarations by their host name.
pub trait TypeSource {
    fn declaration(&self, name: &str) -> Option<&Declaration>;
}

/// A host type plus the nullability that applies where it is used.
///
/// Reference nullability belongs to the use site (member, parameter), not to
/// the declaration, so the same class can be nullable in one place and not in
/// another.
#[derive(Debug, Clone, Copy)]
pub struct Occurrence<'a> {
    pub ty: &'a HostType,
    pub nullable: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<'a> Occurrence<'a> {
    /// A bare type with no contextual nullability.
    pub fn of(ty: &'a HostType) -> Self {
        Self { ty, nullable: false }
    }
    pub fn new(ty: &'a HostType, nullable: bool) -> Self {
        Self { ty, nullable }
    }
    pub fn member(member: &'a MemberDecl) -> Self {
        Self::new(&member.ty, member.nullable)
    }
    pub fn parameter(parameter: &'a ParameterDecl) -> Self {
        Self::new(&parameter.ty, parameter.nullable)
    }
}

impl HostType {
    pub fn scalar(scalar: ScalarKind) -> Self {
        Self::Scalar { scalar }
    }
    pub fn nullable(inner: HostType) -> Self {
        Self::Nullable { inner: Box::new(inner) }
    }
    pub fn sequence(element: HostType) -> Self {
        Self::Sequence { element: Box::new(element) }
    }
    pub fn map(key: HostType, value: HostType) -> Self {
        Self::Map { args: vec![key, value] }
    }
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param { name: name.into() }
    }
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into(), args: Vec::new() }
    }
    pub fn generic(name: impl Into<String>, args: Vec<HostType>) -> Self {
        Self::Named { name: name.into(), args }
    }
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque { name: name.into() }
    }

    /// Short human-readable label, used in error messages.
    pub fn label(&self) -> String {
        match self {
            Self::Scalar { scalar } => format!("{scalar:?}"),
            Self::Nullable { inner } => format!("{}?", inner.label()),
            Self::Sequence { element } => format!("sequence of {}", element.label()),
            Self::Map { args } => {
                let args = args.iter().map(HostType::label).collect::<Vec<_>>();
                format!("map<{}>", args.join(", "))
            }
            Self::Param { name } | Self::Named { name, .. } | Self::Opaque { name } => {
                name.clone()
            }
        }
    }
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => &class.name,
            Self::Enum(enum_) => &enum_.name,
        }
    }
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, ty: HostType) -> Self {
        Self { name: name.into(), ty, nullable: false }
    }
    pub fn nullable(name: impl Into<String>, ty: HostType) -> Self {
        Self { name: name.into(), ty, nullable: true }
    }
}

/// Strip the host generic arity suffix: `Pair`2` -> `Pair`.
pub fn simple_name(name: &str) -> &str {
    match name.find('`') {
        Some(ix) => &name[..ix],
        None => name,
    }
}

// ------------------------------- Tests ------------------------------------ //
