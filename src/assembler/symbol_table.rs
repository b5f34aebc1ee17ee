/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::errors::AssemblyError;
use std::collections::HashMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Code,
    Data,
    Extern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub address: u32,
    pub kind: SymbolKind,
    pub is_entry: bool,
}

/// The symbol table (§4.3). Insertion order is preserved for deterministic
/// iteration; lookups are by name.
#[derive(Default)]
pub struct SymbolTable {
    order: Vec<String>,
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Implements the insert semantics from §4.3:
    /// - fresh insert: append
    /// - re-assert as EXTERN on an existing EXTERN: no-op success
    /// - mark as entry on an existing non-EXTERN symbol: set is_entry, success
    /// - EXTERN cannot be marked entry
    /// - any other re-definition: `DuplicateLabel`
    pub fn insert(
        &mut self,
        name: &str,
        address: u32,
        kind: SymbolKind,
        is_entry: bool,
        line: usize,
    ) -> Result<(), AssemblyError> {
        if is_entry && kind == SymbolKind::Extern {
            return Err(AssemblyError::EntryOnExtern {
                line,
                name: name.to_string(),
            });
        }

        match self.symbols.get_mut(name) {
            None => {
                self.order.push(name.to_string());
                self.symbols.insert(
                    name.to_string(),
                    Symbol {
                        address,
                        kind,
                        is_entry,
                    },
                );
                Ok(())
            }
            Some(existing) if existing.kind == SymbolKind::Extern && kind == SymbolKind::Extern => {
                Ok(())
            }
            Some(existing) if is_entry && existing.kind != SymbolKind::Extern => {
                existing.is_entry = true;
                Ok(())
            }
            Some(_) => Err(AssemblyError::DuplicateLabel {
                line,
                name: name.to_string(),
            }),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    /// Symbols in insertion order, for deterministic output.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.order.iter().map(|name| (name.as_str(), &self.symbols[name]))
    }

    /// Mutable access to every symbol, in no particular order. Used by the
    /// first pass to fold DC into every DATA symbol's final address.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.symbols.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_insert_succeeds() {
        let mut table = SymbolTable::new();
        table.insert("MAIN", 100, SymbolKind::Code, false, 1).unwrap();
        assert_eq!(table.lookup("MAIN").unwrap().address, 100);
    }

    #[test]
    fn duplicate_insert_fails() {
        let mut table = SymbolTable::new();
        table.insert("MAIN", 100, SymbolKind::Code, false, 1).unwrap();
        let err = table.insert("MAIN", 101, SymbolKind::Code, false, 2).unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicateLabel { .. }));
    }

    #[test]
    fn re_asserting_extern_is_a_no_op() {
        let mut table = SymbolTable::new();
        table.insert("HELLO", 0, SymbolKind::Extern, false, 1).unwrap();
        table.insert("HELLO", 0, SymbolKind::Extern, false, 2).unwrap();
        assert_eq!(table.lookup("HELLO").unwrap().kind, SymbolKind::Extern);
    }

    #[test]
    fn marking_entry_on_non_extern_succeeds() {
        let mut table = SymbolTable::new();
        table.insert("MAIN", 100, SymbolKind::Code, false, 1).unwrap();
        table.insert("MAIN", 0, SymbolKind::Code, true, 2).unwrap();
        assert!(table.lookup("MAIN").unwrap().is_entry);
    }

    #[test]
    fn extern_cannot_be_marked_entry() {
        let mut table = SymbolTable::new();
        table.insert("HELLO", 0, SymbolKind::Extern, false, 1).unwrap();
        let err = table.insert("HELLO", 0, SymbolKind::Extern, true, 2).unwrap_err();
        assert!(matches!(err, AssemblyError::EntryOnExtern { .. }));
    }
}
