//! Style hoisting
//!
//! Turns `styleUrls` into module-scope imports (or requires) and a
//! `<Class>.style = ...;` assignment.

use once_cell::sync::Lazy;
use regex::Regex;

use super::snippet::{js_property_key, js_string};
use super::state::PassState;
use crate::config::options::ModuleConvention;
use crate::lazy::metadata::StyleRefs;

static NON_IDENTIFIER_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]").unwrap());

/// `CmpA` -> `CMP_A`, `MyHTMLCard` -> `MY_HTML_CARD`.
pub fn screaming_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }
    NON_IDENTIFIER_CHARS.replace_all(&out, "_").into_owned()
}

/// `./foo/bar.css` -> `foo_bar_css`. The extension stays, so `a.css` and
/// `a.scss` never collide.
pub fn sanitize_style_path(path: &str) -> String {
    let trimmed = path.strip_prefix("./").unwrap_or(path);
    NON_IDENTIFIER_CHARS.replace_all(trimmed, "_").into_owned()
}

/// Candidate binding for a hoisted style: `<CLASS>__<path>`, or
/// `<CLASS>_<key>__<path>` for mapping entries.
pub fn style_identifier(class_name: &str, key: Option<&str>, path: &str) -> String {
    let class = screaming_snake(class_name);
    let path = sanitize_style_path(path);
    match key {
        Some(key) => format!(
            "{}_{}__{}",
            class,
            NON_IDENTIFIER_CHARS.replace_all(key, "_"),
            path
        ),
        None => format!("{}__{}", class, path),
    }
}

pub fn style_module_statement(convention: ModuleConvention, identifier: &str, path: &str) -> String {
    match convention {
        ModuleConvention::Esm => format!("import {} from {};", identifier, js_string(path)),
        ModuleConvention::Cjs => format!("const {} = require({});", identifier, js_string(path)),
    }
}

/// Source text produced for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStyleEmission {
    /// One statement per path newly hoisted by this class, in emission order.
    pub module_statements: Vec<String>,
    pub assignment: String,
}

/// Hoists every style reference of `class_name` into `state` and returns the
/// statements to emit. `None` when there is nothing to attach.
pub fn plan_class_styles(
    class_name: &str,
    refs: &StyleRefs,
    convention: ModuleConvention,
    state: &mut PassState,
) -> Option<ClassStyleEmission> {
    if refs.is_empty() {
        return None;
    }

    let mut module_statements = Vec::new();
    let mut bindings: Vec<(Option<&str>, String)> = Vec::new();

    for (key, path) in refs.entries() {
        let hoisted = state.hoist_style(class_name, key, path);
        if hoisted.newly_hoisted {
            module_statements.push(style_module_statement(convention, &hoisted.identifier, path));
        }
        bindings.push((key, hoisted.identifier));
    }

    let value = match refs {
        StyleRefs::Sequence(_) => {
            let mut identifiers: Vec<&str> = Vec::with_capacity(bindings.len());
            for (_, identifier) in &bindings {
                if !identifiers.contains(&identifier.as_str()) {
                    identifiers.push(identifier);
                }
            }
            identifiers.join(" + ")
        }
        StyleRefs::Mapping(_) => {
            let properties: Vec<String> = bindings
                .iter()
                .map(|(key, identifier)| {
                    format!("{}: {}", js_property_key(key.unwrap_or_default()), identifier)
                })
                .collect();
            format!("{{ {} }}", properties.join(", "))
        }
    };

    Some(ClassStyleEmission {
        module_statements,
        assignment: format!("{}.style = {};", class_name, value),
    })
}
