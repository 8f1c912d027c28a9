use smol_str::SmolStr;

use super::Scope;
use crate::base::{FileId, Span};

/// A named entity discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: SmolStr,
    /// Inferred type tag (`integer`, `vector<float>`, `Individual`, `unknown`, ...)
    pub ty: SmolStr,
    pub file: FileId,
    /// Snapshot of the scope the symbol was declared in
    pub scope: Scope,
    /// Declaration range
    pub span: Span,
    /// Source text of the assigned value
    pub value: Option<String>,
    /// Declared through `defineConstant`
    pub is_constant: bool,
    /// Declared through `defineGlobal`
    pub is_global: bool,
    /// Parameter of a user-defined function
    pub is_parameter: bool,
}

impl Symbol {
    pub fn new(
        name: impl Into<SmolStr>,
        ty: impl Into<SmolStr>,
        file: FileId,
        scope: Scope,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            file,
            scope,
            span,
            value: None,
            is_constant: false,
            is_global: false,
            is_parameter: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }

    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    pub fn parameter(mut self) -> Self {
        self.is_parameter = true;
        self
    }

    /// Visible from its declaration onward regardless of scope ranges.
    pub fn is_unscoped(&self) -> bool {
        self.is_constant || self.is_global
    }
}
