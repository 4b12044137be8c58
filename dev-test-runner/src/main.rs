//! Fixture runner: every directory under `fixtures/` holds a `catalog.json`
//! and an `expected/` folder with one `.ts` file per definition the pass must
//! emit. An optional `fixture.json` overrides roots or expects a failure.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Deserialize;
use ts_model_gen::{generate, path_de, TypeCatalog};

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    roots: Vec<String>,
    /// substring the pass error must contain
    #[serde(default)]
    expect_error: Option<String>,
}

fn main() -> ExitCode {
    let root = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| "fixtures".into());
    let fixtures = match list_fixtures(&root) {
        Ok(xs) => xs,
        Err(error) => {
            eprintln!("❌ {error:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0usize;
    for fixture in &fixtures {
        let name = fixture.file_name().unwrap_or_default().to_string_lossy().to_string();
        match run_fixture(fixture) {
            Ok(()) => eprintln!("✅ {name}"),
            Err(error) => {
                failed += 1;
                eprintln!("❌ {name}: {error:#}");
            }
        }
    }

    let summary = format!("{} passed, {} failed", fixtures.len() - failed, failed);
    if failed == 0 {
        eprintln!("{}", summary.green().bold());
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", summary.red().bold());
        ExitCode::FAILURE
    }
}

fn list_fixtures(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(root).with_context(|| format!("reading {}", root.display()))? {
        let path = entry?.path();
        if path.join("catalog.json").is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn run_fixture(dir: &Path) -> Result<()> {
    let manifest_path = dir.join("fixture.json");
    let manifest = if manifest_path.is_file() {
        let src = std::fs::read_to_string(&manifest_path)?;
        path_de::from_str_with_path::<Manifest>(&src).map_err(anyhow::Error::msg)?
    } else {
        Manifest::default()
    };

    let catalog_path = dir.join("catalog.json").display().to_string();
    let catalog = TypeCatalog::load([catalog_path])?;
    let roots = if manifest.roots.is_empty() {
        catalog.roots().to_vec()
    } else {
        manifest.roots.clone()
    };

    let result = generate(&catalog, &roots);
    let registry = match (result, manifest.expect_error) {
        (Err(error), Some(expected)) if error.to_string().contains(&expected) => return Ok(()),
        (Err(error), _) => return Err(error.into()),
        (Ok(_), Some(expected)) => bail!("expected an error containing `{expected}`"),
        (Ok(registry), None) => registry,
    };

    let mut expected_names = Vec::new();
    for entry in std::fs::read_dir(dir.join("expected"))? {
        let path = entry?.path();
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        let expected = std::fs::read_to_string(&path)?;
        let Some(actual) = registry.get(&name) else {
            bail!("missing definition `{name}`");
        };
        if actual.trim_end() != expected.trim_end() {
            bail!("definition `{name}` differs\n--- expected\n{expected}\n--- actual\n{actual}");
        }
        expected_names.push(name);
    }

    let extra = registry
        .names()
        .filter(|name| !expected_names.iter().any(|e| e == name))
        .collect::<Vec<_>>();
    if !extra.is_empty() {
        bail!("unexpected definitions: {}", extra.join(", "));
    }
    Ok(())
}
