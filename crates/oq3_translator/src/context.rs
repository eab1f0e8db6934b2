// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The scoped symbol table.
//
// A name is *declared* when it has a binding with no value, and *bound* once
// a value is present. Looking up an absent name and looking up a
// declared-but-unbound name are distinct failures, and the latter reports
// where the declaration happened.
//
// Scopes are independent copies: entering a loop body or gate body clones
// the whole table, so declarations made inside never leak outward. The
// builtin constant table is built once per translation and shared by
// reference between all scope copies.

use hashbrown::HashMap;
use oq3_ast::Span;
use std::rc::Rc;

use crate::error::{err, ErrorKind, Result};
use crate::value::Value;

#[derive(Clone, Debug)]
pub struct SymbolBinding {
    value: Option<Value>,
    definition: Option<Span>,
}

impl SymbolBinding {
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn definition(&self) -> Option<&Span> {
        self.definition.as_ref()
    }
}

#[derive(Clone, Debug)]
pub struct Context {
    symbols: HashMap<String, SymbolBinding>,
    constants: Rc<HashMap<&'static str, f64>>,
}

fn builtin_constants() -> HashMap<&'static str, f64> {
    use std::f64::consts::{E, PI, TAU};
    let mut table = HashMap::new();
    table.insert("pi", PI);
    table.insert("π", PI);
    table.insert("tau", TAU);
    table.insert("𝜏", TAU);
    table.insert("euler", E);
    table.insert("ℇ", E);
    table
}

impl Context {
    pub fn new() -> Context {
        Context {
            symbols: HashMap::new(),
            constants: Rc::new(builtin_constants()),
        }
    }

    /// Create an entry for `name` with no value.
    pub fn declare(&mut self, name: &str, definition: Option<Span>) {
        self.symbols.insert(
            name.to_string(),
            SymbolBinding {
                value: None,
                definition,
            },
        );
    }

    /// Create or overwrite a bound entry for `name`.
    pub fn bind(&mut self, name: &str, value: Value, definition: Option<Span>) {
        self.symbols.insert(
            name.to_string(),
            SymbolBinding {
                value: Some(value),
                definition,
            },
        );
    }

    /// Update the value of an existing entry without touching its
    /// definition site. Fails `UndefinedSymbol` for a name never declared.
    pub fn rebind(&mut self, name: &str, value: Value, use_site: Option<&Span>) -> Result<()> {
        match self.symbols.get_mut(name) {
            Some(binding) => {
                binding.value = Some(value);
                Ok(())
            }
            None => err(ErrorKind::UndefinedSymbol(name.to_string()), use_site),
        }
    }

    /// Look up the value bound to `name`. A missing name fails
    /// `UndefinedSymbol`; a declared-but-unbound name fails
    /// `UninitializedSymbol`, carrying the original definition site.
    pub fn lookup(&self, name: &str, use_site: Option<&Span>) -> Result<&Value> {
        match self.symbols.get(name) {
            None => err(ErrorKind::UndefinedSymbol(name.to_string()), use_site),
            Some(binding) => match &binding.value {
                Some(value) => Ok(value),
                None => err(
                    ErrorKind::UninitializedSymbol {
                        name: name.to_string(),
                        declared_at: binding.definition,
                    },
                    use_site,
                ),
            },
        }
    }

    pub fn binding(&self, name: &str) -> Option<&SymbolBinding> {
        self.symbols.get(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// The definition site recorded for `name`, if any.
    pub fn lookup_span(&self, name: &str) -> Option<&Span> {
        self.symbols.get(name).and_then(|b| b.definition())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub(crate) fn symbol_names(&self) -> Vec<String> {
        self.symbols.keys().cloned().collect()
    }

    /// The fixed value of a builtin named constant.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Names of the builtin constants, sorted for stable error messages.
    pub fn constant_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constants.keys().map(|n| n.to_string()).collect();
        names.sort();
        names
    }

    /// An independent copy used as the scope of a loop or gate body.
    /// Lookups inside see everything visible here at the moment of the
    /// copy; declarations inside do not leak back.
    pub fn derived_scope(&self) -> Context {
        self.clone()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oq3_classical::Raw;

    #[test]
    fn test_six_builtin_constants() {
        let context = Context::new();
        assert_eq!(context.constant_names().len(), 6);
        assert_eq!(context.constant("pi"), Some(std::f64::consts::PI));
        assert_eq!(context.constant("π"), Some(std::f64::consts::PI));
        assert_eq!(context.constant("twopi"), None);
    }

    #[test]
    fn test_derived_scope_is_independent() {
        let mut outer = Context::new();
        outer.bind("n", Value::Raw(Raw::Int(3)), None);
        let mut inner = outer.derived_scope();
        inner.bind("m", Value::Raw(Raw::Int(4)), None);
        assert!(inner.lookup("n", None).is_ok());
        assert!(!outer.is_declared("m"));
    }
}
