// ABOUTME: Introspection of an installed Slidev toolchain
// ABOUTME: Lists built-in layouts, transitions, config keys, components and directives

use crate::errors::{DeckError, Result};
use crate::utils::{get_absolute_path, validate_project};
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the pieces we read live under a project's node_modules.
#[derive(Debug, Clone, Serialize)]
pub struct Sources {
    pub types: PathBuf,
    pub builtin_components: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct Builtins {
    pub layouts: Vec<String>,
    pub transitions: Vec<String>,
    pub headmatter_keys: Vec<String>,
    pub frontmatter_keys: Vec<String>,
    pub components: Vec<String>,
    pub directives: Vec<String>,
    pub sources: Sources,
}

/// Everything introspection found about a project's Slidev install.
#[derive(Debug, Clone, Serialize)]
pub struct Introspection {
    pub project: PathBuf,
    pub versions: BTreeMap<String, String>,
    pub builtin: Builtins,
}

/// String literals of `type <name> = 'a' | 'b';`
pub fn extract_union_literals(text: &str, type_name: &str) -> Vec<String> {
    let pattern = format!(r"type\s+{}\s*=\s*([^;]+);", regex::escape(type_name));
    let Ok(declaration) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Some(caps) = declaration.captures(text) else {
        return Vec::new();
    };
    let literal = Regex::new(r"'([^']+)'").expect("valid literal pattern");
    literal
        .captures_iter(&caps[1])
        .map(|c| c[1].to_string())
        .collect()
}

/// Body of `interface <name> { ... }`, matched by braces
pub fn extract_interface_block<'a>(text: &'a str, interface_name: &str) -> Option<&'a str> {
    let start = text.find(&format!("interface {}", interface_name))?;
    let brace_start = start + text[start..].find('{')?;

    let mut depth = 0usize;
    for (offset, ch) in text[brace_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[brace_start + 1..brace_start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Property names declared in an interface body, first occurrence order
pub fn extract_interface_keys(block: &str) -> Vec<String> {
    let key = Regex::new(r"^([A-Za-z0-9_]+)\??\s*:").expect("valid key pattern");
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for line in block.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('/') || line.starts_with('*') {
            continue;
        }
        if let Some(caps) = key.captures(line) {
            let name = caps[1].to_string();
            if seen.insert(name.clone()) {
                keys.push(name);
            }
        }
    }
    keys
}

fn read_cli_version(package_json: &Path) -> Option<String> {
    let text = fs::read_to_string(package_json).ok()?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string),
        Err(e) => {
            warn!("Could not parse {:?}: {}", package_json, e);
            None
        }
    }
}

/// Split the builtin directory into components and directives
fn list_builtins(dir: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut components = Vec::new();
    let mut directives = Vec::new();
    for path in entries {
        let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
            continue;
        };
        let stem = stem.to_string_lossy().to_string();
        match ext.to_string_lossy().as_ref() {
            "ts" if stem.starts_with('V') => directives.push(stem),
            "ts" | "vue" => components.push(stem),
            _ => debug!("Skipping {:?}", path),
        }
    }
    Ok((components, directives))
}

/// Inspect the Slidev packages installed in a project's node_modules
pub fn introspect_project(project: &Path) -> Result<Introspection> {
    validate_project(project)?;
    let project = get_absolute_path(project);
    let slidev = project.join("node_modules").join("@slidev");
    let types_file = slidev
        .join("types")
        .join("dist")
        .join("index.d.mts");
    let builtin_dir = slidev.join("client").join("builtin");
    let cli_package = slidev.join("cli").join("package.json");

    let missing: Vec<String> = [&types_file, &builtin_dir]
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DeckError::MissingDependencies(missing.join(", ")));
    }

    let types_text = fs::read_to_string(&types_file)?;
    let headmatter_keys = extract_interface_block(&types_text, "HeadmatterConfig")
        .map(extract_interface_keys)
        .unwrap_or_default();
    let frontmatter_keys = extract_interface_block(&types_text, "Frontmatter")
        .map(extract_interface_keys)
        .unwrap_or_default();
    let (components, directives) = list_builtins(&builtin_dir)?;

    let mut versions = BTreeMap::new();
    if let Some(version) = read_cli_version(&cli_package) {
        versions.insert("@slidev/cli".to_string(), version);
    }

    Ok(Introspection {
        builtin: Builtins {
            layouts: extract_union_literals(&types_text, "BuiltinLayouts"),
            transitions: extract_union_literals(&types_text, "BuiltinSlideTransition"),
            headmatter_keys,
            frontmatter_keys,
            components,
            directives,
            sources: Sources {
                types: types_file,
                builtin_components: builtin_dir,
            },
        },
        project,
        versions,
    })
}

fn push_section(out: &mut String, heading: &str, items: impl Iterator<Item = String>) {
    let _ = writeln!(out, "## {}", heading);
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');
}

impl Introspection {
    /// Human-readable listing
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Slidev Introspection\n\n");

        if !self.versions.is_empty() {
            out.push_str("## Versions\n");
            for (name, version) in &self.versions {
                let _ = writeln!(out, "- {}: {}", name, version);
            }
            out.push('\n');
        }

        let code = |s: &String| format!("`{}`", s);
        push_section(&mut out, "Built-in Layouts", self.builtin.layouts.iter().map(code));
        push_section(&mut out, "Built-in Transitions", self.builtin.transitions.iter().map(code));
        push_section(
            &mut out,
            "Headmatter Keys (Presentation-level)",
            self.builtin.headmatter_keys.iter().map(code),
        );
        push_section(
            &mut out,
            "Frontmatter Keys (Slide-level)",
            self.builtin.frontmatter_keys.iter().map(code),
        );
        push_section(
            &mut out,
            "Built-in Components",
            self.builtin.components.iter().map(|s| format!("`<{} />`", s)),
        );
        push_section(&mut out, "Built-in Directives", self.builtin.directives.iter().map(code));

        out.push_str("## Sources\n");
        let _ = writeln!(out, "- Types: `{}`", self.builtin.sources.types.display());
        let _ = writeln!(
            out,
            "- Builtins: `{}`",
            self.builtin.sources.builtin_components.display()
        );
        out
    }

    /// Pretty-printed JSON listing
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
