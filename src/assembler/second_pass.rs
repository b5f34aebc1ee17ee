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

//! Second pass (§4.6): patches every placeholder word left by the memory
//! builder now that the symbol table is final, tags each patched word with
//! its ARE bits, and resolves `.entry` directives against the completed
//! table.

use super::encoder::MachineWord;
use super::encoder::constants::{ARE_EXTERNAL, ARE_RELOCATABLE, BASE_ADDRESS};
use super::memory_builder::MemoryImage;
use super::symbol_table::{SymbolKind, SymbolTable};
use crate::errors::{AssemblyError, Diagnostics};

pub struct SecondPassOutput {
    pub instruction_image: Vec<MachineWord>,
    pub data_image: Vec<MachineWord>,
    /// `(symbol name, absolute address of the referencing word)`, one per
    /// use site, in source order.
    pub externals: Vec<(String, u32)>,
    /// `(symbol name, resolved absolute address)` for every `.entry`.
    pub entries: Vec<(String, u32)>,
}

pub fn run(
    mut memory: MemoryImage,
    symbols: &SymbolTable,
    entry_requests: &[(String, usize)],
) -> Result<SecondPassOutput, Diagnostics> {
    let mut errors: Diagnostics = Vec::new();
    let mut externals = Vec::new();

    for fixup in &memory.fixups {
        let Some(symbol) = symbols.lookup(&fixup.symbol_name) else {
            errors.push(AssemblyError::UndefinedSymbol {
                line: fixup.line_number,
                name: fixup.symbol_name.clone(),
            });
            continue;
        };

        let word = match symbol.kind {
            SymbolKind::Extern => {
                let absolute = BASE_ADDRESS + fixup.word_index as u32;
                externals.push((fixup.symbol_name.clone(), absolute));
                MachineWord::new(ARE_EXTERNAL)
            }
            SymbolKind::Code | SymbolKind::Data => {
                let bits = ((symbol.address & 0xFF) as u16) << 2;
                MachineWord::new(bits | ARE_RELOCATABLE)
            }
        };

        memory.instruction_image[fixup.word_index] = word;
    }

    let mut entries = Vec::new();
    for (name, line) in entry_requests {
        match symbols.lookup(name) {
            None => errors.push(AssemblyError::UndefinedSymbol {
                line: *line,
                name: name.clone(),
            }),
            Some(symbol) if symbol.kind == SymbolKind::Extern => {
                errors.push(AssemblyError::EntryOnExtern {
                    line: *line,
                    name: name.clone(),
                })
            }
            Some(symbol) => entries.push((name.clone(), symbol.address)),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SecondPassOutput {
        instruction_image: memory.instruction_image,
        data_image: memory.data_image,
        externals,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::memory_builder::PendingFixup;
    use crate::assembler::symbol_table::SymbolKind;

    fn table_with(name: &str, address: u32, kind: SymbolKind) -> SymbolTable {
        let mut table = SymbolTable::new();
        table.insert(name, address, kind, false, 1).unwrap();
        table
    }

    #[test]
    fn external_reference_is_collected_and_tagged() {
        let symbols = table_with("HELLO", 0, SymbolKind::Extern);
        let memory = MemoryImage {
            instruction_image: vec![MachineWord::new(0), MachineWord::new(0)],
            data_image: vec![],
            fixups: vec![PendingFixup {
                word_index: 1,
                symbol_name: "HELLO".to_string(),
                line_number: 1,
            }],
        };
        let out = run(memory, &symbols, &[]).unwrap();
        assert_eq!(out.externals, vec![("HELLO".to_string(), 101)]);
        assert_eq!(out.instruction_image[1].bits(), ARE_EXTERNAL);
    }

    #[test]
    fn relocatable_symbol_is_patched_with_its_address() {
        let symbols = table_with("LOOP", 105, SymbolKind::Code);
        let memory = MemoryImage {
            instruction_image: vec![MachineWord::new(0), MachineWord::new(0)],
            data_image: vec![],
            fixups: vec![PendingFixup {
                word_index: 1,
                symbol_name: "LOOP".to_string(),
                line_number: 1,
            }],
        };
        let out = run(memory, &symbols, &[]).unwrap();
        assert_eq!(out.instruction_image[1].bits(), (105u16 << 2) | ARE_RELOCATABLE);
    }

    #[test]
    fn undefined_symbol_is_reported() {
        let symbols = SymbolTable::new();
        let memory = MemoryImage {
            instruction_image: vec![MachineWord::new(0)],
            data_image: vec![],
            fixups: vec![PendingFixup {
                word_index: 0,
                symbol_name: "GHOST".to_string(),
                line_number: 3,
            }],
        };
        let errors = run(memory, &symbols, &[]).unwrap_err();
        assert!(matches!(errors[0], AssemblyError::UndefinedSymbol { line: 3, .. }));
    }

    #[test]
    fn entry_on_extern_is_rejected() {
        let symbols = table_with("HELLO", 0, SymbolKind::Extern);
        let memory = MemoryImage {
            instruction_image: vec![],
            data_image: vec![],
            fixups: vec![],
        };
        let errors = run(memory, &symbols, &[("HELLO".to_string(), 2)]).unwrap_err();
        assert!(matches!(errors[0], AssemblyError::EntryOnExtern { .. }));
    }

    #[test]
    fn entry_resolves_to_final_address() {
        let symbols = table_with("MAIN", 100, SymbolKind::Code);
        let memory = MemoryImage {
            instruction_image: vec![],
            data_image: vec![],
            fixups: vec![],
        };
        let out = run(memory, &symbols, &[("MAIN".to_string(), 1)]).unwrap();
        assert_eq!(out.entries, vec![("MAIN".to_string(), 100)]);
    }
}
