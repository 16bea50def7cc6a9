//! Parameter-file sections and plugin parameter declarations.
//!
//! The configuration file itself is parsed by an external collaborator;
//! this layer consumes one already-split key/value section per plugin.
//! Plugins declare the keys they recognize up front via
//! [`ParameterDeclarations`], which lets the loading side reject unknown
//! keys before any plugin parses anything.

use crate::error::ParameterError;
use indexmap::IndexMap;

/// One plugin's slice of the parameter file: ordered key/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSection {
    entries: IndexMap<String, String>,
}

impl ParameterSection {
    /// An empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key. Returns `self` for builder-style chaining
    /// in tests and setup code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for a required key, or [`ParameterError::MissingKey`].
    pub fn require(&self, key: &str) -> Result<&str, ParameterError> {
        self.get(key).ok_or_else(|| ParameterError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Declaration of a single recognized parameter key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDecl {
    /// Value used when the key is absent from the section.
    pub default: String,
    /// One-line description for generated parameter documentation.
    pub doc: String,
}

/// The set of keys a plugin recognizes, with defaults and documentation.
///
/// Declaring is side-effect-free: a declarations value describes the
/// plugin's parameter surface and is consulted by the loading side to
/// validate user input ahead of parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterDeclarations {
    entries: IndexMap<String, ParameterDecl>,
}

impl ParameterDeclarations {
    /// An empty declaration set (a plugin with no runtime parameters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a recognized key with its default value and doc line.
    pub fn declare(
        &mut self,
        key: impl Into<String>,
        default: impl Into<String>,
        doc: impl Into<String>,
    ) {
        self.entries.insert(
            key.into(),
            ParameterDecl {
                default: default.into(),
                doc: doc.into(),
            },
        );
    }

    /// Whether a key was declared.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The declaration for a key, if any.
    pub fn get(&self, key: &str) -> Option<&ParameterDecl> {
        self.entries.get(key)
    }

    /// The section's value for a declared key, falling back to the
    /// declared default when the section omits it.
    ///
    /// Returns [`ParameterError::UnknownKey`] if the key was never
    /// declared; asking for undeclared keys is a plugin programming error
    /// surfaced eagerly rather than answered with an empty string.
    pub fn value_or_default<'a>(
        &'a self,
        section: &'a ParameterSection,
        key: &str,
    ) -> Result<&'a str, ParameterError> {
        let decl = self.entries.get(key).ok_or_else(|| ParameterError::UnknownKey {
            key: key.to_string(),
        })?;
        Ok(section.get(key).unwrap_or(&decl.default))
    }

    /// Reject any section key that was not declared.
    ///
    /// This plays the configuration-loading collaborator's role of
    /// validating user input before `parse_parameters` runs.
    pub fn validate_section(&self, section: &ParameterSection) -> Result<(), ParameterError> {
        for key in section.keys() {
            if !self.contains(key) {
                return Err(ParameterError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Declared keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_decls() -> ParameterDeclarations {
        let mut decls = ParameterDeclarations::new();
        decls.declare("Function expression", "0", "Analytic expression per field");
        decls.declare("Function constants", "", "Named constants, name=value pairs");
        decls
    }

    #[test]
    fn require_reports_missing_key() {
        let section = ParameterSection::new();
        match section.require("Function expression") {
            Err(ParameterError::MissingKey { key }) => assert_eq!(key, "Function expression"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn value_or_default_prefers_section_value() {
        let decls = function_decls();
        let section = ParameterSection::new().with("Function expression", "x+y");
        assert_eq!(
            decls.value_or_default(&section, "Function expression").unwrap(),
            "x+y"
        );
        assert_eq!(
            decls.value_or_default(&section, "Function constants").unwrap(),
            ""
        );
    }

    #[test]
    fn value_or_default_rejects_undeclared_key() {
        let decls = function_decls();
        let section = ParameterSection::new();
        assert!(matches!(
            decls.value_or_default(&section, "Viscosity"),
            Err(ParameterError::UnknownKey { .. })
        ));
    }

    #[test]
    fn validate_section_rejects_unknown_keys() {
        let decls = function_decls();
        let section = ParameterSection::new()
            .with("Function expression", "0")
            .with("Fnuction constants", "pi=3.14");
        match decls.validate_section(&section) {
            Err(ParameterError::UnknownKey { key }) => assert_eq!(key, "Fnuction constants"),
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn validate_section_accepts_declared_subset() {
        let decls = function_decls();
        let section = ParameterSection::new().with("Function expression", "1; 2");
        assert!(decls.validate_section(&section).is_ok());
    }

    #[test]
    fn section_preserves_insertion_order() {
        let section = ParameterSection::new().with("b", "2").with("a", "1");
        let keys: Vec<&str> = section.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
