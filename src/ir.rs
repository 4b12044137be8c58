// Resolved TypeScript references. No host types in here.

use std::fmt;

use serde::Serialize;

/// What one host type occurrence resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TsType {
    /// Built-in scalar, generic parameter, or `Record<K, V>` notation.
    Primitive(TypeRef),
    /// A named definition that lives in the registry.
    Complex(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub name: String,
    pub is_nullable: bool,
    pub is_array: bool,
    pub generic_arguments: Vec<TsType>,
}

impl TsType {
    pub fn primitive(name: impl Into<String>, is_nullable: bool, is_array: bool) -> Self {
        Self::Primitive(TypeRef {
            name: name.into(),
            is_nullable,
            is_array,
            generic_arguments: Vec::new(),
        })
    }

    /// `Record<K, V>`; never an array.
    pub fn record(key: TsType, value: TsType, is_nullable: bool) -> Self {
        Self::Primitive(TypeRef {
            name: format!("Record<{key}, {value}>"),
            is_nullable,
            is_array: false,
            generic_arguments: vec![key, value],
        })
    }

    pub fn complex(
        name: impl Into<String>,
        is_nullable: bool,
        is_array: bool,
        generic_arguments: Vec<TsType>,
    ) -> Self {
        Self::Complex(TypeRef {
            name: name.into(),
            is_nullable,
            is_array,
            generic_arguments,
        })
    }

    pub fn type_ref(&self) -> &TypeRef {
        match self {
            Self::Primitive(r) | Self::Complex(r) => r,
        }
    }
    pub fn name(&self) -> &str { &self.type_ref().name }
    pub fn is_nullable(&self) -> bool { self.type_ref().is_nullable }
    pub fn is_array(&self) -> bool { self.type_ref().is_array }
    pub fn generic_arguments(&self) -> &[TsType] { &self.type_ref().generic_arguments }
    pub fn is_complex(&self) -> bool { matches!(self, Self::Complex(_)) }
}

/// Reference syntax: `Name<Args>` then `[]` then ` | null`.
///
/// Primitive names are already complete (`Record<K, V>` carries its own
/// arguments), so only complex references render their generic arguments.
impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.type_ref();
        f.write_str(&r.name)?;
        if let Self::Complex(_) = self {
            if !r.generic_arguments.is_empty() {
                f.write_str("<")?;
                for (ix, arg) in r.generic_arguments.iter().enumerate() {
                    if ix > 0 { f.write_str(", ")?; }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")?;
            }
        }
        if r.is_array { f.write_str("[]")?; }
        if r.is_nullable { f.write_str(" | null")?; }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_order_is_array_then_null() {
        let ty = TsType::complex("TypesModel", true, true, Vec::new());
        assert_eq!(ty.to_string(), "TypesModel[] | null");
    }

    #[test]
    fn complex_references_render_their_arguments() {
        let ty = TsType::complex(
            "SomeGenericModel",
            false,
            false,
            vec![
                TsType::primitive("number", false, false),
                TsType::primitive("string", false, true),
                TsType::complex("TypesModel", false, false, Vec::new()),
            ],
        );
        assert_eq!(ty.to_string(), "SomeGenericModel<number, string[], TypesModel>");
    }

    #[test]
    fn record_name_carries_its_arguments_once() {
        let key = TsType::complex("SomeEnum", false, false, Vec::new());
        let value = TsType::primitive("string", false, false);
        let ty = TsType::record(key, value, true);
        assert_eq!(ty.to_string(), "Record<SomeEnum, string> | null");
        assert_eq!(ty.generic_arguments().len(), 2);
        assert!(!ty.is_array());
    }

    #[test]
    fn serializes_with_camel_case_flags() {
        let ty = TsType::primitive("boolean", true, false);
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json["kind"], "primitive");
        assert_eq!(json["isNullable"], true);
        assert_eq!(json["genericArguments"], serde_json::json!([]));
    }
}
