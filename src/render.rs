//! Definition text templates.
//!
//! Pure formatting: every decision has already been made by the resolver.
use crate::ir::TsType;

pub fn import(name: &str) -> String {
    format!("import type {{ {name} }} from \"./{name}\";")
}

/// `export type Name = "A" | "B";`
pub fn enum_type(name: &str, members: &[String]) -> String {
    let values = if members.is_empty() {
        // an empty union is not valid TypeScript
        "never".to_owned()
    } else {
        members.iter().map(|m| format!("\"{m}\"")).collect::<Vec<_>>().join(" | ")
    };
    format!("export type {name} = {values};")
}

/// Object type, preceded by one import line per referenced name and a blank
/// line when there are any imports.
pub fn object_type(display_name: &str, fields: &[(String, TsType)], imports: &[String]) -> String {
    let properties = fields
        .iter()
        .map(|(name, ty)| format!("  {name}: {ty};"))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!("export type {display_name} = {{\n{properties}\n}};");
    if imports.is_empty() {
        return body;
    }
    let imports = imports.iter().map(|name| import(name)).collect::<Vec<_>>().join("\n");
    format!("{imports}\n\n{body}")
}

/// `Name` or `Name<T1, T2>` using the declaration's own parameter names.
pub fn definition_name(name: &str, generic_params: &[String]) -> String {
    if generic_params.is_empty() {
        name.to_owned()
    } else {
        format!("{name}<{}>", generic_params.join(", "))
    }
}

/// Host member names are PascalCase; only the first letter changes.
pub fn field_name(member: &str) -> String {
    let mut chars = member.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn field_names_lower_only_the_first_letter() {
        assert_eq!(field_name("SomeNullableBoolean"), "someNullableBoolean");
        assert_eq!(field_name("URL"), "uRL");
        assert_eq!(field_name("already"), "already");
        assert_eq!(field_name(""), "");
    }

    #[test]
    fn object_without_imports() {
        let fields = vec![
            ("someBoolean".to_owned(), TsType::primitive("boolean", false, false)),
            ("someString".to_owned(), TsType::primitive("string", true, false)),
        ];
        let expected = indoc! {"
            export type TypesModel = {
              someBoolean: boolean;
              someString: string | null;
            };"};
        assert_eq!(object_type("TypesModel", &fields, &[]), expected);
    }

    #[test]
    fn object_with_imports_has_blank_separator() {
        let fields = vec![(
            "typesList".to_owned(),
            TsType::complex("TypesModel", false, true, Vec::new()),
        )];
        let expected = indoc! {r#"
            import type { TypesModel } from "./TypesModel";

            export type TypeWithList = {
              typesList: TypesModel[];
            };"#};
        assert_eq!(object_type("TypeWithList", &fields, &["TypesModel".to_owned()]), expected);
    }

    #[test]
    fn enum_members_become_literal_union() {
        let members = vec!["Hurr".to_owned(), "Durr".to_owned()];
        assert_eq!(enum_type("SomeEnum", &members), r#"export type SomeEnum = "Hurr" | "Durr";"#);
        assert_eq!(enum_type("Empty", &[]), "export type Empty = never;");
    }

    #[test]
    fn generic_definition_names() {
        let params = vec!["TFoo".to_owned(), "TBar".to_owned()];
        assert_eq!(definition_name("Model", &params), "Model<TFoo, TBar>");
        assert_eq!(definition_name("Model", &[]), "Model");
    }
}
