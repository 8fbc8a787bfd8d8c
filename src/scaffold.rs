// ABOUTME: Project scaffolding for the slidev-deck tools
// ABOUTME: Creates a starter Slidev project or the minimal deck skeleton inside one

use crate::errors::{DeckError, Result};
use crate::utils::{ensure_directory_exists, ensure_parent_directory_exists, MANIFEST_FILE};
use log::info;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const GITIGNORE: &str = "node_modules/
dist/
.slidev/
*.log
slides-export.*
";

const WELCOME_SLIDE: &str = "---
layout: cover
---
# Welcome
## Your presentation starts here
";

const DECK_INIT_SLIDE: &str = "---
layout: cover
---
# Welcome
## Started with deck-init
";

const FEATURE_CARD_VUE: &str = r#"<template>
  <div class="p-6 border border-gray-200 rounded-xl hover:shadow-xl transition-all duration-300 bg-white dark:bg-gray-800 dark:border-gray-700 h-full">
    <div class="text-xl font-bold mb-3 flex items-center gap-2" :class="colorClass">
      <slot name="icon"></slot>
      <slot name="title"></slot>
    </div>
    <div class="text-gray-600 dark:text-gray-300 leading-relaxed">
      <slot></slot>
    </div>
  </div>
</template>

<script setup lang="ts">
defineProps<{
  colorClass?: string
}>()
</script>
"#;

const STAT_BOX_VUE: &str = r#"<template>
  <div class="text-center p-6 rounded-lg bg-gray-50 dark:bg-white/5 border border-gray-100 dark:border-gray-800">
    <div class="text-5xl font-black mb-2 bg-clip-text text-transparent bg-gradient-to-r from-teal-500 to-blue-600">
      {{ value }}
    </div>
    <div class="text-sm font-bold uppercase tracking-widest opacity-60">{{ label }}</div>
  </div>
</template>

<script setup lang="ts">
defineProps<{
  value: string | number
  label: string
}>()
</script>
"#;

const STEP_LIST_VUE: &str = r#"<template>
  <div class="space-y-4">
    <div v-for="(step, idx) in steps" :key="idx" class="flex gap-4 items-start group">
      <div class="flex-none w-8 h-8 rounded-full bg-blue-100 dark:bg-blue-900/50 text-blue-600 dark:text-blue-400 flex items-center justify-center font-bold text-sm border-2 border-white dark:border-gray-900 shadow-sm ring-1 ring-blue-500/20 group-hover:scale-110 transition-transform">
        {{ idx + 1 }}
      </div>
      <div class="pt-1">
        <h3 class="font-bold text-lg mb-1">{{ step.title }}</h3>
        <p class="text-sm opacity-80 leading-relaxed">{{ step.desc }}</p>
      </div>
    </div>
  </div>
</template>

<script setup lang="ts">
defineProps<{
  steps: { title: string, desc: string }[]
}>()
</script>
"#;

/// Options for a new project
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub name: String,
    pub theme: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            name: "slidev-deck".to_string(),
            theme: "default".to_string(),
        }
    }
}

/// A file or directory touched by a scaffolder.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldEntry {
    pub path: PathBuf,
    pub created: bool,
}

fn manifest_template(title: &str, theme: &str, notice: &str) -> String {
    format!(
        "---
theme: {theme}
title: \"{title}\"
info: false
presenter: true
download: false
selectable: true
---

# {title}

> {notice}

---
src: ./slides/001.md
---
"
    )
}

fn readme_template(name: &str) -> String {
    format!(
        "# {name}

Slidev presentation deck.

## Setup
```bash
npm install
```

## Development
```bash
npm run dev
```

## Build
```bash
npm run build
```

## Custom Components
This project includes custom Vue components in `./components`:
- `<FeatureCard>`: Box with hover effect
- `<StatBox>`: Large number display
- `<StepList>`: Vertical step/timeline

Use them directly in your markdown!
"
    )
}

fn write_file(path: &Path, content: &str) -> Result<ScaffoldEntry> {
    ensure_parent_directory_exists(path)?;
    fs::write(path, content)?;
    info!("Created {:?}", path);
    Ok(ScaffoldEntry {
        path: path.to_path_buf(),
        created: true,
    })
}

fn write_file_if_missing(path: &Path, content: &str, force: bool) -> Result<ScaffoldEntry> {
    if path.exists() && !force {
        info!("Exists {:?}", path);
        return Ok(ScaffoldEntry {
            path: path.to_path_buf(),
            created: false,
        });
    }
    write_file(path, content)
}

/// Create a starter Slidev project in `root`, overwriting the starter files
pub fn init_project(root: &Path, options: &InitOptions) -> Result<Vec<ScaffoldEntry>> {
    ensure_directory_exists(root)?;
    info!("Initializing Slidev project {:?}", root);

    let package_json = json!({
        "name": options.name,
        "private": true,
        "type": "module",
        "scripts": {
            "dev": "slidev",
            "build": "slidev build",
            "export": "slidev export"
        },
        "devDependencies": {
            "@slidev/cli": "^0.49.0",
            "playwright-chromium": "^1.45.0",
            "@slidev/theme-default": "*"
        },
        "dependencies": {
            "@slidev/theme-seriph": "^0.25.0"
        }
    });

    let mut entries = vec![
        write_file(&root.join(".gitignore"), GITIGNORE)?,
        write_file(
            &root.join("package.json"),
            &format!("{}\n", serde_json::to_string_pretty(&package_json)?),
        )?,
        write_file(&root.join("README.md"), &readme_template(&options.name))?,
        write_file(
            &root.join(MANIFEST_FILE),
            &manifest_template(
                &options.name,
                &options.theme,
                "Created with slidev-deck",
            ),
        )?,
        write_file(&root.join("slides").join("001.md"), WELCOME_SLIDE)?,
        write_file(
            &root.join("components").join("FeatureCard.vue"),
            FEATURE_CARD_VUE,
        )?,
        write_file(&root.join("components").join("StatBox.vue"), STAT_BOX_VUE)?,
        write_file(&root.join("components").join("StepList.vue"), STEP_LIST_VUE)?,
    ];

    for dir in [root.join("assets"), root.join("llm").join("out")] {
        let created = !dir.exists();
        ensure_directory_exists(&dir)?;
        entries.push(ScaffoldEntry { path: dir, created });
    }

    Ok(entries)
}

/// Ensure the deck skeleton exists inside a project.
///
/// Existing `slides.md` and `slides/001.md` are kept unless `force` is set.
pub fn init_deck(project: &Path, force: bool) -> Result<Vec<ScaffoldEntry>> {
    let mut entries = Vec::new();
    for name in ["slides", "assets", "checkpoints", "exports"] {
        let dir = project.join(name);
        let created = !dir.exists();
        ensure_directory_exists(&dir)?;
        entries.push(ScaffoldEntry { path: dir, created });
    }

    entries.push(write_file_if_missing(
        &project.join(MANIFEST_FILE),
        &manifest_template("Slidev Deck", "default", "Auto-generated entry point."),
        force,
    )?);
    entries.push(write_file_if_missing(
        &project.join("slides").join("001.md"),
        DECK_INIT_SLIDE,
        force,
    )?);

    Ok(entries)
}

/// Run `npm install` inside a project
pub fn install_dependencies(root: &Path, npm: &str) -> Result<()> {
    info!("Running {} install in {:?}", npm, root);
    let status = Command::new(npm)
        .arg("install")
        .current_dir(root)
        .status()
        .map_err(|e| DeckError::UnknownError(format!("Failed to launch {}: {}", npm, e)))?;
    if !status.success() {
        return Err(DeckError::UnknownError(format!(
            "{} install exited with {}",
            npm, status
        )));
    }
    Ok(())
}
