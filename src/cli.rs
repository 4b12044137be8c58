//! Minimal CLI: catalog → (generate | resolve)
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::catalog::TypeCatalog;
use crate::host::{Declaration, HostType, Occurrence, TypeSource};
use crate::registry::Registry;
use crate::resolve::Resolver;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript type declarations from a host type catalog
#[derive(Parser, Debug)]
#[command(name = "ts-model-gen", version)]
pub struct CommandLineInterface {
    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve root types and write one `.ts` file per definition
    Generate(GenerateOut),
    /// resolve a single type and print the resolved reference (debug view)
    Resolve(ResolveOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more catalog files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    catalog: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// root type (repeatable); defaults to the catalog's roots, then to every declaration
    #[arg(long = "root", short)]
    roots: Vec<String>,

    /// also resolve the parameters of every method declared on a root class
    #[arg(long, default_value_t = false)]
    methods: bool,

    /// output directory, one `{Name}.ts` per definition (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ResolveOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// declaration name to resolve
    name: String,

    /// resolve as a nullable occurrence
    #[arg(long, default_value_t = false)]
    nullable: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<TypeCatalog> {
        TypeCatalog::load(&self.catalog).context("failed to load type catalog")
    }
}

impl GenerateOut {
    fn roots(&self, catalog: &TypeCatalog) -> Vec<String> {
        if !self.roots.is_empty() {
            return self.roots.clone();
        }
        if !catalog.roots().is_empty() {
            return catalog.roots().to_vec();
        }
        catalog.declarations().map(|decl| decl.name().to_owned()).collect()
    }

    fn generate(&self, catalog: &TypeCatalog) -> Result<(Registry, usize)> {
        let roots = self.roots(catalog);
        let resolver = Resolver::new(catalog);
        let mut registry = Registry::new();
        for root in &roots {
            let ty = HostType::named(root.as_str());
            resolver
                .resolve_type(&ty, &mut registry)
                .with_context(|| format!("failed to resolve root `{root}`"))?;
            if !self.methods {
                continue;
            }
            let Some(Declaration::Class(class)) = catalog.declaration(root) else {
                continue;
            };
            for method in &class.methods {
                for parameter in &method.parameters {
                    resolver.resolve_parameter(parameter, &mut registry).with_context(|| {
                        format!(
                            "failed to resolve parameter `{}` of `{root}.{}`",
                            parameter.name, method.name
                        )
                    })?;
                }
            }
        }
        Ok((registry, roots.len()))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let catalog = target.input_settings.load()?;
                let (registry, root_count) = target.generate(&catalog)?;
                match target.out.as_ref() {
                    Some(out) => write_definitions(&registry, out)?,
                    None => print_definitions(&registry)?,
                }
                eprintln!(
                    "{} {} definitions from {} root types",
                    "generated".green().bold(),
                    registry.len(),
                    root_count,
                );
                Ok(())
            }
            Command::Resolve(target) => {
                let catalog = target.input_settings.load()?;
                let root = HostType::named(target.name.as_str());
                let mut registry = Registry::new();
                let ty = Resolver::new(&catalog)
                    .resolve(Occurrence::new(&root, target.nullable), &mut registry)
                    .with_context(|| format!("failed to resolve `{}`", target.name))?;
                let view = serde_json::json!({
                    "reference": ty,
                    "rendered": ty.to_string(),
                    "definitions": registry.names().collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_definitions(registry: &Registry, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;
    for (name, text) in registry.iter() {
        let path = out.join(format!("{name}.ts"));
        std::fs::write(&path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote definition");
    }
    Ok(())
}

fn print_definitions(registry: &Registry) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for (ix, (_, text)) in registry.iter().enumerate() {
        if ix > 0 {
            writeln!(stdout)?;
        }
        writeln!(stdout, "{text}")?;
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "declarations": [
            { "kind": "enum", "name": "SomeEnum", "members": ["Hurr", "Durr"] },
            { "kind": "class", "name": "TypeWithEnum", "members": [
                { "name": "SomeEnumValue", "type": { "kind": "named", "name": "SomeEnum" } }
            ] },
            { "kind": "class", "name": "SomeClass", "methods": [
                { "name": "DoSomething", "parameters": [
                    { "name": "someEnum", "type": { "kind": "named", "name": "TypeWithEnum" }, "nullable": true }
                ] }
            ] }
        ]
    }"#;

    fn write_catalog(dir: &Path) -> String {
        let path = dir.join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();
        path.display().to_string()
    }

    #[test]
    fn generate_writes_one_file_per_definition() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path());
        let out = dir.path().join("out");
        let cli = CommandLineInterface::try_parse_from([
            "ts-model-gen", "generate", "-c", catalog.as_str(),
            "--root", "TypeWithEnum", "-o", out.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();

        let enum_ts = std::fs::read_to_string(out.join("SomeEnum.ts")).unwrap();
        assert_eq!(enum_ts, "export type SomeEnum = \"Hurr\" | \"Durr\";\n");
        let class_ts = std::fs::read_to_string(out.join("TypeWithEnum.ts")).unwrap();
        assert!(class_ts.starts_with("import type { SomeEnum } from \"./SomeEnum\";\n\n"));
        assert!(!out.join("SomeClass.ts").exists());
    }

    #[test]
    fn roots_default_to_every_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = write_catalog(dir.path());
        let cli = CommandLineInterface::try_parse_from([
            "ts-model-gen", "generate", "-c", catalog_path.as_str(),
        ])
        .unwrap();
        let Command::Generate(target) = &cli.cmd else { panic!("expected generate") };
        let catalog = target.input_settings.load().unwrap();
        assert_eq!(target.roots(&catalog), vec!["SomeEnum", "TypeWithEnum", "SomeClass"]);
    }

    #[test]
    fn methods_flag_resolves_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = write_catalog(dir.path());
        let cli = CommandLineInterface::try_parse_from([
            "ts-model-gen", "generate", "-c", catalog_path.as_str(),
            "--root", "SomeClass", "--methods",
        ])
        .unwrap();
        let Command::Generate(target) = &cli.cmd else { panic!("expected generate") };
        let catalog = target.input_settings.load().unwrap();
        let (registry, roots) = target.generate(&catalog).unwrap();
        assert_eq!(roots, 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["SomeClass", "SomeEnum", "TypeWithEnum"]);
    }

    #[test]
    fn unknown_root_is_an_error_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = write_catalog(dir.path());
        let cli = CommandLineInterface::try_parse_from([
            "ts-model-gen", "generate", "-c", catalog_path.as_str(), "--root", "Nope",
        ])
        .unwrap();
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("failed to resolve root `Nope`"));
    }
}
