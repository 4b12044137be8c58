//! Host scalar kinds and the fixed table that maps them onto TypeScript scalars.
use serde::{Deserialize, Serialize};

pub const BOOLEAN: &str = "boolean";
pub const NUMBER: &str = "number";
pub const STRING: &str = "string";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    /// Text. Iterable on most hosts, but never treated as a sequence.
    String,
    Char,
    DateTime,
    DateTimeOffset,
    Guid,
}

impl ScalarKind {
    /// Every integer and floating width collapses to `number`; dates and
    /// identifiers travel as text.
    pub fn ts_name(self) -> &'static str {
        match self {
            Self::Bool => BOOLEAN,
            Self::I8
            | Self::U8
            | Self::I16
            | Self::U16
            | Self::I32
            | Self::U32
            | Self::I64
            | Self::U64
            | Self::F32
            | Self::F64
            | Self::Decimal => NUMBER,
            Self::String
            | Self::Char
            | Self::DateTime
            | Self::DateTimeOffset
            | Self::Guid => STRING,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
