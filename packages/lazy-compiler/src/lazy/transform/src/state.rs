use bitflags::bitflags;
use std::collections::HashSet;

use super::styles::style_identifier;

bitflags! {
    /// Runtime functions referenced by the rewritten classes of one file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CoreRuntimeApis: u8 {
        const REGISTER_INSTANCE = 0b0001;
        const GET_ELEMENT = 0b0010;
    }
}

pub const REGISTER_INSTANCE: &str = "registerInstance";
pub const GET_ELEMENT: &str = "getElement";
pub const REGISTER_INSTANCE_LOCAL: &str = "__stencil_registerInstance";
pub const GET_ELEMENT_LOCAL: &str = "__stencil_getElement";

impl CoreRuntimeApis {
    /// `(imported, local)` pairs in a fixed order.
    pub fn specifiers(self) -> Vec<(&'static str, &'static str)> {
        let mut specifiers = Vec::new();
        if self.contains(CoreRuntimeApis::REGISTER_INSTANCE) {
            specifiers.push((REGISTER_INSTANCE, REGISTER_INSTANCE_LOCAL));
        }
        if self.contains(CoreRuntimeApis::GET_ELEMENT) {
            specifiers.push((GET_ELEMENT, GET_ELEMENT_LOCAL));
        }
        specifiers
    }
}

/// One hoisted style-sheet reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleImportRecord {
    pub owner_class_name: String,
    /// Platform key for mapping-form `styleUrls`, `None` for the sequence form.
    pub key: Option<String>,
    pub path: String,
    pub generated_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistedStyle {
    pub identifier: String,
    /// `false` when the class already hoisted this path and the identifier is reused.
    pub newly_hoisted: bool,
}

/// State threaded through every class of one file. Build a fresh one per file:
/// identifiers are only unique inside a single compilation unit.
#[derive(Debug, Default)]
pub struct PassState {
    style_records: Vec<StyleImportRecord>,
    identifiers: HashSet<String>,
    runtime_apis: CoreRuntimeApis,
    /// `(from, to)` comment anchors of nodes removed by the rewrite.
    comment_moves: Vec<(u32, u32)>,
}

impl Default for CoreRuntimeApis {
    fn default() -> Self {
        CoreRuntimeApis::empty()
    }
}

impl PassState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier bound to `path` for `owner_class_name`, creating
    /// a record on first sight. A path already hoisted for the same class keeps
    /// its first identifier whatever key references it again.
    pub fn hoist_style(&mut self, owner_class_name: &str, key: Option<&str>, path: &str) -> HoistedStyle {
        if let Some(existing) = self
            .style_records
            .iter()
            .find(|r| r.owner_class_name == owner_class_name && r.path == path)
        {
            return HoistedStyle {
                identifier: existing.generated_identifier.clone(),
                newly_hoisted: false,
            };
        }

        let candidate = style_identifier(owner_class_name, key, path);
        let mut identifier = candidate.clone();
        let mut suffix = 1;
        while self.identifiers.contains(&identifier) {
            identifier = format!("{}_{}", candidate, suffix);
            suffix += 1;
        }

        self.identifiers.insert(identifier.clone());
        self.style_records.push(StyleImportRecord {
            owner_class_name: owner_class_name.to_string(),
            key: key.map(str::to_string),
            path: path.to_string(),
            generated_identifier: identifier.clone(),
        });

        HoistedStyle {
            identifier,
            newly_hoisted: true,
        }
    }

    /// Marks a name bound by the module itself so hoisted styles never shadow it.
    pub fn reserve_identifier(&mut self, name: &str) {
        self.identifiers.insert(name.to_string());
    }

    pub fn style_records(&self) -> &[StyleImportRecord] {
        &self.style_records
    }

    pub fn use_runtime_api(&mut self, api: CoreRuntimeApis) {
        self.runtime_apis |= api;
    }

    pub fn runtime_apis(&self) -> CoreRuntimeApis {
        self.runtime_apis
    }

    /// Comments attached at `from` print at `to` instead.
    pub fn move_comments(&mut self, from: u32, to: u32) {
        if from != to {
            self.comment_moves.push((from, to));
        }
    }

    pub fn comment_moves(&self) -> &[(u32, u32)] {
        &self.comment_moves
    }
}
