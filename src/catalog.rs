//! Type catalog: the concrete [`TypeSource`] loaded from JSON files.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::host::{Declaration, TypeSource};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// On-disk shape of one catalog file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    /// Types to generate when none are named on the command line.
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    roots: Vec<String>,
    declarations: IndexMap<String, Declaration>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeSource for TypeCatalog {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_declarations(declarations: impl IntoIterator<Item = Declaration>) -> Result<Self> {
        let mut catalog = Self::new();
        for decl in declarations {
            catalog.insert(decl)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, decl: Declaration) -> Result<()> {
        let name = decl.name().to_owned();
        if self.declarations.contains_key(&name) {
            return Err(GenerateError::DuplicateDeclaration { name });
        }
        self.declarations.insert(name, decl);
        Ok(())
    }

    pub fn extend(&mut self, file: CatalogFile) -> Result<()> {
        for root in file.roots {
            if !self.roots.contains(&root) {
                self.roots.push(root);
            }
        }
        for decl in file.declarations {
            self.insert(decl)?;
        }
        Ok(())
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn parse(src: &str, path: &Path) -> Result<CatalogFile> {
        crate::path_de::from_str_with_path(src).map_err(|message| GenerateError::Catalog {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load and merge every file matched by `patterns`, in order.
    pub fn load<I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut catalog = Self::new();
        for path in resolve_file_path_patterns(patterns)? {
            let source = std::fs::read_to_string(&path).map_err(|source| GenerateError::Io {
                path: path.clone(),
                source,
            })?;
            let file = Self::parse(&source, &path)?;
            debug!(path = %path.display(), declarations = file.declarations.len(), "loaded catalog");
            catalog.extend(file)?;
        }
        Ok(catalog)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicit glob that matched nothing is a user error
                return Err(GenerateError::NoMatches(pattern.to_owned()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ClassDecl, EnumDecl};

    const CATALOG: &str = r#"{
        "roots": ["TypeWithEnum"],
        "declarations": [
            { "kind": "enum", "name": "SomeEnum", "members": ["Hurr", "Durr"] },
            {
                "kind": "class",
                "name": "TypeWithEnum",
                "members": [
                    { "name": "SomeEnumValue", "type": { "kind": "named", "name": "SomeEnum" } },
                    { "name": "SomeNullableEnumValue", "type": { "kind": "nullable", "inner": { "kind": "named", "name": "SomeEnum" } } }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_roots_and_declarations() {
        let file = TypeCatalog::parse(CATALOG, Path::new("inline.json")).unwrap();
        let mut catalog = TypeCatalog::new();
        catalog.extend(file).unwrap();
        assert_eq!(catalog.roots(), ["TypeWithEnum".to_owned()]);
        assert_eq!(catalog.len(), 2);
        assert!(matches!(catalog.declaration("SomeEnum"), Some(Declaration::Enum(_))));
    }

    #[test]
    fn bad_catalog_reports_path() {
        let src = r#"{ "declarations": [ { "kind": "struct", "name": "Nope" } ] }"#;
        let err = TypeCatalog::parse(src, Path::new("bad.json")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.json"), "{message}");
        assert!(message.contains("declarations[0]"), "{message}");
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let err = TypeCatalog::from_declarations([
            Declaration::Class(ClassDecl { name: "Thing".into(), ..ClassDecl::default() }),
            Declaration::Enum(EnumDecl { name: "Thing".into(), members: Vec::new() }),
        ])
        .unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateDeclaration { name } if name == "Thing"));
    }

    #[test]
    fn loads_files_through_glob_patterns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), CATALOG).unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"{ "declarations": [ { "kind": "enum", "name": "Other", "members": ["X"] } ] }"#,
        )
        .unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let catalog = TypeCatalog::load([pattern]).unwrap();
        assert_eq!(catalog.len(), 3);

        let missing = format!("{}/*.nothing", dir.path().display());
        let err = TypeCatalog::load([missing]).unwrap_err();
        assert!(matches!(err, GenerateError::NoMatches(_)));
    }
}
