//! Symbol tables and scope labels.
//!
//! Every binding container (module, globals block, function/main/report
//! block, record definition) owns a set of case-insensitive name maps. The
//! *container* stamps the scope label at binding time: a `VariableDef` node
//! doesn't know whether it is a module variable or a local one; the block
//! that binds it does.
//!
//! ## Notes
//! - Within one map, the **first** definition wins. [`SymbolMap::insert`]
//!   returns the existing symbol on collision so the caller can decide
//!   whether that's a warning (top-level scopes) or a fatal error (record
//!   fields).

use crate::ast::NodeId;
use crate::lexer::Span;
use genero_core::strings;
use std::collections::HashMap;

/// What a bound name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Type,
    Constant,
    Function,
    Report,
    Cursor,
    RecordField,
}

/// Scope label stamped by the binding container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Module,
    Global,
    Local,
    Parameter,
    RecordField,
}

impl Scope {
    /// Human-readable label used in completion details.
    pub fn describe(self, kind: SymbolKind) -> &'static str {
        match (self, kind) {
            (Scope::Module, SymbolKind::Variable) => "module variable",
            (Scope::Global, SymbolKind::Variable) => "global variable",
            (Scope::Local, SymbolKind::Variable) => "local variable",
            (Scope::Parameter, _) => "parameter",
            (Scope::RecordField, _) => "record field",
            (Scope::Module, SymbolKind::Type) => "module type",
            (Scope::Global, SymbolKind::Type) => "global type",
            (Scope::Local, SymbolKind::Type) => "local type",
            (Scope::Module, SymbolKind::Constant) => "module constant",
            (Scope::Global, SymbolKind::Constant) => "global constant",
            (Scope::Local, SymbolKind::Constant) => "local constant",
            (_, SymbolKind::Function) => "function",
            (_, SymbolKind::Report) => "report",
            (_, SymbolKind::Cursor) => "cursor",
            (_, SymbolKind::RecordField) => "record field",
        }
    }
}

/// A bound name: original spelling, defining node, kind, and scope label.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Name with the author's original casing.
    pub name: String,
    pub node: NodeId,
    pub kind: SymbolKind,
    pub scope: Scope,
    /// Span of the defining occurrence (for duplicate-definition messages).
    pub span: Span,
}

/// Case-insensitive name → symbol map with first-definition-wins semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolMap {
    entries: HashMap<String, Symbol>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `symbol`, unless its name is already bound.
    ///
    /// Returns the previously-bound symbol on collision (the new one is
    /// discarded: first definition wins).
    pub fn insert(&mut self, symbol: Symbol) -> Option<&Symbol> {
        let key = strings::fold(&symbol.name);
        // Entry would hand back a mutable slot; we need the *existing* value
        // untouched on collision, so probe first.
        if self.entries.contains_key(&key) {
            return self.entries.get(&key);
        }
        self.entries.insert(key, symbol);
        None
    }

    /// Look up a name case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(&strings::fold(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&strings::fold(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bound symbols in name order (deterministic for tests and
    /// completion lists).
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Symbol> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        keys.into_iter().filter_map(|k| self.entries.get(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            node: NodeId::from_raw(0),
            kind: SymbolKind::Variable,
            scope: Scope::Module,
            span: Span::default(),
        }
    }

    #[test]
    fn first_definition_wins_case_insensitively() {
        let mut map = SymbolMap::new();
        assert!(map.insert(sym("Total")).is_none());
        let existing = map.insert(sym("TOTAL")).cloned();
        assert_eq!(existing.map(|s| s.name), Some("Total".to_string()));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("total").map(|s| s.name.as_str()), Some("Total"));
    }

    #[test]
    fn iter_sorted_is_deterministic() {
        let mut map = SymbolMap::new();
        map.insert(sym("zeta"));
        map.insert(sym("Alpha"));
        let names: Vec<_> = map.iter_sorted().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta"]);
    }
}
