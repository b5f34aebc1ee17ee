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

//! Builds the instruction and data images from the parsed lines, with
//! placeholder (zero) words standing in for any DIRECT or MATRIX operand
//! that names a symbol. The second pass patches those placeholders once
//! every label is known.

use super::encoder::{MachineWord, encode_opcode_word, encode_operand_words};
use crate::ast::{AssemblyLine, Directive};

/// One instruction word slot that still needs a symbol resolved into it.
#[derive(Debug, Clone)]
pub struct PendingFixup {
    /// Index into `instruction_image` of the word to patch.
    pub word_index: usize,
    pub symbol_name: String,
    pub line_number: usize,
}

pub struct MemoryImage {
    pub instruction_image: Vec<MachineWord>,
    pub data_image: Vec<MachineWord>,
    pub fixups: Vec<PendingFixup>,
}

/// Lays out instruction and data words in one forward walk of the parsed
/// lines, mirroring the first pass's counting rules exactly (§4.5).
pub fn build(lines: &[AssemblyLine]) -> MemoryImage {
    let mut instruction_image = Vec::new();
    let mut data_image = Vec::new();
    let mut fixups = Vec::new();

    for line in lines {
        if let Some((mnemonic, operands)) = &line.instruction {
            instruction_image.push(encode_opcode_word(mnemonic, operands));
            let extra = encode_operand_words(operands);
            let word_offset_base = instruction_image.len();

            // Re-derive which extra word (if any) corresponds to a
            // DIRECT/MATRIX operand that needs patching, in source/dest
            // order, matching `encode_operand_words`'s own layout.
            let mut cursor = word_offset_base;
            for operand in operands.iter() {
                if let Some(name) = operand.symbol_name() {
                    fixups.push(PendingFixup {
                        word_index: cursor,
                        symbol_name: name.to_string(),
                        line_number: line.line_number,
                    });
                }
                cursor += operand.word_count() as usize;
            }

            instruction_image.extend(extra);
            continue;
        }

        match &line.directive {
            Some(Directive::Data(values)) => {
                for v in values {
                    data_image.push(super::encoder::encode_signed(*v));
                }
            }
            Some(Directive::Str(s)) => {
                for byte in s.bytes() {
                    data_image.push(MachineWord::new(byte as u16));
                }
                data_image.push(MachineWord::new(0));
            }
            Some(Directive::Mat { rows, cols, values }) => {
                let total = (*rows * *cols) as usize;
                for i in 0..total {
                    let v = values.get(i).copied().unwrap_or(0);
                    data_image.push(super::encoder::encode_signed(v));
                }
            }
            _ => {}
        }
    }

    MemoryImage {
        instruction_image,
        data_image,
        fixups,
    }
}
