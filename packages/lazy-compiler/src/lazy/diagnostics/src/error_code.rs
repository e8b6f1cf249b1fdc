#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The `@Component` decorator is not called with an object literal.
    DecoratorArgNotLiteral = 1001,
    DecoratorNotCalled = 1003,

    /// A field the pass interprets holds something other than the expected literal.
    ValueNotLiteral = 1011,
    ValueHasWrongType = 1010,

    /// Raised when a member decorator sits on a computed or private key.
    MemberNameNotStatic = 1020,

    ComponentMissingTag = 2001,
    /// Anonymous classes cannot carry the `<Class>.style` assignment.
    ComponentMissingName = 2002,

    /// Two platform keys in a `styleUrls` mapping are textually identical.
    DuplicateStyleKey = 2101,

    /// `@AttachInternals()` on a component that is not `formAssociated: true`.
    AttachInternalsWithoutFormAssociated = 2102,

    /// An existing constructor declared parameters; its body may still read them.
    ConstructorParametersDropped = 2103,
}

impl ErrorCode {
    /// Display form used in reports, e.g. `LZ2001`.
    pub fn label(self) -> String {
        format!("LZ{}", self as i32)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
