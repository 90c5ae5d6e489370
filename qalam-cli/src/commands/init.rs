//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../qalam.yml.example");

/// Initialize a new qalam project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ qalam initialized in {:?}", root);
    println!("  - Edit qalam.yml to customize site metadata");
    println!("  - Write posts in content/blog/ (subfolders become series)");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("qalam.yml");
    if config_path.exists() {
        println!("qalam.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let content = root.join("content").join("blog");
    fs::create_dir_all(&content).with_context(|| format!("Failed to create {:?}", content))?;

    let sample = content.join("welcome.md");
    if !sample.exists() {
        fs::write(&sample, sample_post())?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

fn sample_post() -> String {
    r#"---
title: Welcome to qalam
date: "2025-01-01"
tags:
  - meta
description: Your first post.
---

# Welcome

Posts live under `content/blog/`. Put related posts in a subfolder to
group them into a series, e.g. `01-rust-basics/hello.md`.

Drafts (`draft: true`) are hidden from production builds.
"#
    .to_string()
}
