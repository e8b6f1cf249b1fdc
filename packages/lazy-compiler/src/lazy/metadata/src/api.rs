use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::lazy::diagnostics::TransformDiagnostic;

pub const COMPONENT_DECORATOR: &str = "Component";
pub const ELEMENT_DECORATOR: &str = "Element";
pub const ATTACH_INTERNALS_DECORATOR: &str = "AttachInternals";

/// Decorators this pass erases. Anything else is left in place.
pub const ERASED_DECORATORS: [&str; 3] = [
    COMPONENT_DECORATOR,
    ELEMENT_DECORATOR,
    ATTACH_INTERNALS_DECORATOR,
];

/// Style-sheet references of one component. The variant decides the shape of
/// the emitted `style` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRefs {
    /// `styleUrls: ['a.css', 'b.css']`, kept in declaration order.
    Sequence(Vec<String>),
    /// `styleUrls: { ios: 'a.css', md: 'b.css' }`, platform key to path.
    Mapping(IndexMap<String, String>),
}

impl StyleRefs {
    /// `(key, path)` pairs in emission order: declaration order for sequences,
    /// lexicographic key order for mappings.
    pub fn entries(&self) -> Vec<(Option<&str>, &str)> {
        match self {
            StyleRefs::Sequence(paths) => paths.iter().map(|p| (None, p.as_str())).collect(),
            StyleRefs::Mapping(map) => {
                let mut entries: Vec<(Option<&str>, &str)> = map
                    .iter()
                    .map(|(k, p)| (Some(k.as_str()), p.as_str()))
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                entries
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StyleRefs::Sequence(paths) => paths.is_empty(),
            StyleRefs::Mapping(map) => map.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub class_name: String,
    pub tag: String,
    pub style_refs: Option<StyleRefs>,
    pub form_associated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberAnnotationKind {
    /// `@Element()`: becomes a getter backed by the runtime element accessor.
    ElementReference,
    /// `@AttachInternals()`: becomes a cached `attachInternals()` call in the constructor.
    AttachInternals,
    /// Any other decorator, by name. Left untouched.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAnnotation {
    pub name: String,
    pub kind: MemberAnnotationKind,
}

impl MemberAnnotation {
    pub fn is_rewritten(&self) -> bool {
        !matches!(self.kind, MemberAnnotationKind::Opaque(_))
    }
}

/// Everything the rewrite needs from one class. Owned, so the class can be
/// mutated once extraction is done.
#[derive(Debug, Clone)]
pub struct ExtractedComponent {
    pub metadata: ComponentMetadata,
    pub members: SmallVec<[MemberAnnotation; 4]>,
    pub diagnostics: Vec<TransformDiagnostic>,
}

impl ExtractedComponent {
    pub fn element_refs(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberAnnotationKind::ElementReference)
            .map(|m| m.name.as_str())
    }

    pub fn has_element_ref(&self) -> bool {
        self.element_refs().next().is_some()
    }
}

/// Outcome of reading one class.
#[derive(Debug, Clone)]
pub enum ComponentRead {
    /// No `@Component` decorator.
    NotAComponent,
    /// `@Component` is present but unusable; the class is left unmodified.
    Skipped(TransformDiagnostic),
    Component(ExtractedComponent),
}
