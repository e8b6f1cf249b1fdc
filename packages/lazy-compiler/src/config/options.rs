use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CORE_IMPORT_PATH: &str = "@stencil/core";

/// Output module convention for the statements the pass emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleConvention {
    /// `import x from '...'` statements, class emitted as a `const` class expression.
    #[default]
    Esm,
    /// `const x = require('...')` bindings, class declaration kept.
    Cjs,
}

/// How the rewritten component class is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentExport {
    #[default]
    Lazy,
    /// The class stays module private; the `export` modifier is dropped.
    CustomElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Hoist style references and attach `<Class>.style`.
    #[default]
    Static,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub core_import_path: String,
    pub module: ModuleConvention,
    pub component_export: ComponentExport,
    pub style: StyleMode,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            core_import_path: DEFAULT_CORE_IMPORT_PATH.to_string(),
            module: ModuleConvention::default(),
            component_export: ComponentExport::default(),
            style: StyleMode::default(),
        }
    }
}

impl TransformOptions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let options: TransformOptions = serde_json::from_str(content)?;
        if options.core_import_path.trim().is_empty() {
            anyhow::bail!("coreImportPath must not be empty");
        }
        Ok(options)
    }

    pub fn with_module(mut self, module: ModuleConvention) -> Self {
        self.module = module;
        self
    }

    pub fn with_component_export(mut self, component_export: ComponentExport) -> Self {
        self.component_export = component_export;
        self
    }

    pub fn with_core_import_path(mut self, path: impl Into<String>) -> Self {
        self.core_import_path = path.into();
        self
    }
}

impl std::str::FromStr for ModuleConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "esm" | "es" | "esnext" => Ok(ModuleConvention::Esm),
            "cjs" | "commonjs" => Ok(ModuleConvention::Cjs),
            other => Err(format!("unknown module convention '{}'", other)),
        }
    }
}

impl std::str::FromStr for ComponentExport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lazy" => Ok(ComponentExport::Lazy),
            "customelement" => Ok(ComponentExport::CustomElement),
            other => Err(format!("unknown component export '{}'", other)),
        }
    }
}

impl std::str::FromStr for StyleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(StyleMode::Static),
            "none" => Ok(StyleMode::None),
            other => Err(format!("unknown style mode '{}'", other)),
        }
    }
}
