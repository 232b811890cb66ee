//! Build script for wallet-i18n crate
//!
//! This script validates every bundled TS catalogue at compile time to ensure:
//! - The XML is well-formed
//! - The root element is `TS`
//! - Every context has a name and every message has a source

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use xmltree::{Element, XMLNode};

fn child_elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Validate a single catalogue file and return its message count
fn validate_catalogue(path: &Path) -> Result<usize, String> {
    let content = fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let root = Element::parse(content.as_slice())
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    if root.name != "TS" {
        return Err(format!("{}: root element is <{}>, expected <TS>", path.display(), root.name));
    }

    let mut messages = 0;
    for context in child_elements(&root).filter(|el| el.name == "context") {
        let name = child_elements(context)
            .find(|el| el.name == "name")
            .ok_or_else(|| format!("{}: <context> without <name>", path.display()))?;
        let name = name.get_text().unwrap_or_default();

        for message in child_elements(context).filter(|el| el.name == "message") {
            if !child_elements(message).any(|el| el.name == "source") {
                return Err(format!(
                    "{}: <message> without <source> in context {}",
                    path.display(),
                    name
                ));
            }
            messages += 1;
        }
    }

    Ok(messages)
}

/// Find all catalogue files
fn find_catalogues() -> Result<Vec<PathBuf>, String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("locales");

    if !locales_dir.exists() {
        return Err(format!("Locales directory not found: {}", locales_dir.display()));
    }

    let mut catalogues = Vec::new();
    for entry in fs::read_dir(&locales_dir).map_err(|e| format!("Failed to read locales directory: {}", e))? {
        let path = entry
            .map_err(|e| format!("Failed to read directory entry: {}", e))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            catalogues.push(path);
        }
    }

    if catalogues.is_empty() {
        return Err("No catalogue files found".to_string());
    }

    catalogues.sort();
    Ok(catalogues)
}

/// Main validation function
fn validate_locales() -> Result<(), String> {
    println!("cargo:rerun-if-changed=locales");

    let mut errors = Vec::new();
    for path in find_catalogues()? {
        println!("cargo:rerun-if-changed={}", path.display());
        match validate_catalogue(&path) {
            Ok(count) => println!("{}: {} messages", path.display(), count),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(format!("Validation errors:\n{}", errors.join("\n")));
    }
    Ok(())
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Catalogue validation failed:\n{}", e);
        process::exit(1);
    }
}
