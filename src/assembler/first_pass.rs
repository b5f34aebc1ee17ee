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

//! First pass (§4.3): walks the expanded source once, building the symbol
//! table and counting instruction/data words. Nothing here resolves a
//! symbol to an address; that's the second pass's job once DC has been
//! folded into every DATA symbol's final address.

use super::encoder::constants::MEMORY_SIZE;
use super::encoder::operand_validators::validate_operands;
use super::symbol_table::{SymbolKind, SymbolTable};
use crate::ast::{AssemblyLine, Directive};
use crate::errors::{AssemblyError, Diagnostics};
use crate::line_analyzer::{count_command_words, directive_word_count, is_comment_or_empty};
use crate::parser::parse_line;

pub struct FirstPassOutput {
    pub lines: Vec<AssemblyLine>,
    pub symbols: SymbolTable,
    /// `.entry NAME` directives seen, in source order, resolved in the
    /// second pass once the symbol table is final.
    pub entries: Vec<(String, usize)>,
}

pub fn run(expanded_source: &str) -> Result<FirstPassOutput, Diagnostics> {
    let mut symbols = SymbolTable::new();
    let mut lines = Vec::new();
    let mut entries = Vec::new();
    let mut errors: Diagnostics = Vec::new();

    let mut ic: u32 = super::encoder::constants::BASE_ADDRESS;
    let mut dc: u32 = 0;

    for (idx, raw_line) in expanded_source.lines().enumerate() {
        let line_number = idx + 1;
        if is_comment_or_empty(raw_line) {
            continue;
        }

        let parsed = match parse_line(raw_line, line_number) {
            Ok(line) => line,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        if let Some(Directive::Entry(name)) = &parsed.directive {
            entries.push((name.clone(), line_number));
            lines.push(parsed);
            continue;
        }

        if let Some(Directive::Extern(name)) = &parsed.directive {
            if let Err(e) = symbols.insert(name, 0, SymbolKind::Extern, false, line_number) {
                errors.push(e);
            }
            lines.push(parsed);
            continue;
        }

        if let Some((mnemonic, operands)) = &parsed.instruction {
            if let Some(label) = &parsed.label {
                if let Err(e) = symbols.insert(label, ic, SymbolKind::Code, false, line_number) {
                    errors.push(e);
                }
            }
            if let Err(e) = validate_operands(mnemonic, operands, line_number) {
                errors.push(e);
            } else {
                ic += count_command_words(operands);
            }
            check_overflow(ic, dc, line_number, &mut errors);
            lines.push(parsed);
            continue;
        }

        if let Some(directive) = &parsed.directive {
            if let Some(label) = &parsed.label {
                if let Err(e) = symbols.insert(label, dc, SymbolKind::Data, false, line_number) {
                    errors.push(e);
                }
            }
            dc += directive_word_count(directive);
            check_overflow(ic, dc, line_number, &mut errors);
            lines.push(parsed);
            continue;
        }

        // A label with no instruction or directive attached is otherwise
        // inert; nothing further to count for this line.
        lines.push(parsed);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    for symbol in symbols.values_mut() {
        if symbol.kind == SymbolKind::Data {
            symbol.address += ic;
        }
    }

    Ok(FirstPassOutput {
        lines,
        symbols,
        entries,
    })
}

/// Checks the §4.4 step-4 bound (`BASE_ADDRESS + |instruction_image| +
/// |data_image| <= MEMORY_SIZE`) right after the step that just grew `ic` or
/// `dc`, so a reported overflow names the line that actually caused it.
fn check_overflow(ic: u32, dc: u32, line_number: usize, errors: &mut Diagnostics) {
    if ic + dc > MEMORY_SIZE {
        errors.push(AssemblyError::MemoryOverflow {
            line: line_number,
            address: (ic + dc) as i32,
        });
    }
}
