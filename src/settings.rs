use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::geometry::CenterPolicy;

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub label: LabelSettings,
    pub composite: CompositeSettings,
    pub tools: ToolSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSettings {
    pub font: String,
    pub density: u32,
    pub background: String,
    pub fill: String,
    pub stroke_width: u32,
    pub gravity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSettings {
    pub compose: String,
    pub center: CenterPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub convert: String,
    pub identify: String,
    pub composite: String,
    pub exiv2: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            label: LabelSettings {
                font: "Liberation-Serif".to_string(),
                density: 100,
                background: "#00000099".to_string(),
                fill: "white".to_string(),
                stroke_width: 8,
                gravity: "center".to_string(),
            },
            composite: CompositeSettings {
                compose: "atop".to_string(),
                center: CenterPolicy::Origin,
            },
            tools: ToolSettings {
                convert: "convert".to_string(),
                identify: "identify".to_string(),
                composite: "composite".to_string(),
                exiv2: "exiv2".to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    label: Option<LabelFile>,
    composite: Option<CompositeFile>,
    tools: Option<ToolsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelFile {
    font: Option<String>,
    density: Option<u32>,
    background: Option<String>,
    fill: Option<String>,
    stroke_width: Option<u32>,
    gravity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompositeFile {
    compose: Option<String>,
    center: Option<CenterPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolsFile {
    convert: Option<String>,
    identify: Option<String>,
    composite: Option<String>,
    exiv2: Option<String>,
}

/// The shipped `settings.toml` overlaid by, in order: `annotate.toml` and
/// `annotate.local.toml` in the working directory, the per-user settings
/// file, then `extra_path` (which must exist).
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    settings.merge(
        parse_settings(DEFAULT_SETTINGS_TOML).context("failed to parse built-in settings")?,
    );

    let mut ordered_paths = vec![
        PathBuf::from("annotate.toml"),
        PathBuf::from("annotate.local.toml"),
    ];
    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
    }
    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed = parse_settings(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

fn parse_settings(content: &str) -> Result<SettingsFile> {
    Ok(toml::from_str(content)?)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(label) = incoming.label {
            merge_text(&mut self.label.font, label.font);
            merge_text(&mut self.label.background, label.background);
            merge_text(&mut self.label.fill, label.fill);
            merge_text(&mut self.label.gravity, label.gravity);
            if let Some(density) = label.density {
                if density > 0 {
                    self.label.density = density;
                }
            }
            if let Some(width) = label.stroke_width {
                self.label.stroke_width = width;
            }
        }
        if let Some(composite) = incoming.composite {
            merge_text(&mut self.composite.compose, composite.compose);
            if let Some(center) = composite.center {
                self.composite.center = center;
            }
        }
        if let Some(tools) = incoming.tools {
            merge_text(&mut self.tools.convert, tools.convert);
            merge_text(&mut self.tools.identify, tools.identify);
            merge_text(&mut self.tools.composite, tools.composite);
            merge_text(&mut self.tools.exiv2, tools.exiv2);
        }
    }
}

fn merge_text(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.trim().is_empty() {
            *slot = value;
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".image-annotate"))
        }
    })
}
