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

pub mod constants;
pub mod operand_validators;

use crate::ast::{Mnemonic, Operand, Register};
use constants::*;

/// A 10-bit machine word. Every write is masked to `WORD_MASK` so nothing
/// can silently wrap past the hardware's word width (§9).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MachineWord(u16);

impl MachineWord {
    pub fn new(bits: u16) -> Self {
        MachineWord(bits & WORD_MASK)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl Default for MachineWord {
    fn default() -> Self {
        MachineWord(0)
    }
}

/// Encodes the sign-extended two's-complement form of `value` into the low
/// 10 bits of a machine word. `value` must already be range-checked to
/// `[-512, 511]` by the parser.
pub fn encode_signed(value: i32) -> MachineWord {
    let bits = (value as i16 as u16) & WORD_MASK;
    MachineWord::new(bits)
}

pub fn register_number(reg: &Register) -> u16 {
    reg.number() as u16
}

/// Builds the opcode word of an instruction (§4.5 first-word layout):
/// bits 6-9 opcode, bits 4-5 source addressing mode, bits 2-3 destination
/// addressing mode, bits 0-1 ARE (always absolute for this word).
pub fn encode_opcode_word(mnemonic: &Mnemonic, operands: &[Operand]) -> MachineWord {
    let opcode = mnemonic.opcode() as u16;
    let (src_mode, dst_mode) = match operands {
        [] => (0, 0),
        [only] => (0, only.addressing_mode() as u16),
        [src, dst] => (src.addressing_mode() as u16, dst.addressing_mode() as u16),
        _ => unreachable!(),
    };

    let bits = (opcode << 6) | (src_mode << 4) | (dst_mode << 2) | ARE_ABSOLUTE;
    MachineWord::new(bits)
}

/// Builds the extra operand words that follow the opcode word, in
/// source/destination order, for operands that need no symbol resolution
/// (REGISTER, IMMEDIATE). DIRECT/MATRIX base words are left as placeholders
/// (all zero) here; the second pass patches them once the symbol table is
/// final. A MATRIX operand contributes its index-register word here and a
/// placeholder base-address word ahead of it.
pub fn encode_operand_words(operands: &[Operand]) -> Vec<MachineWord> {
    match operands {
        [] => Vec::new(),
        [only] => encode_single_operand(only, OperandRole::Destination),
        [src, dst] => {
            if let (Operand::Register(s), Operand::Register(d)) = (src, dst) {
                vec![encode_shared_register_word(s, d)]
            } else {
                let mut words = encode_single_operand(src, OperandRole::Source);
                words.extend(encode_single_operand(dst, OperandRole::Destination));
                words
            }
        }
        _ => unreachable!(),
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum OperandRole {
    Source,
    Destination,
}

/// Single-register word layout (§4.5/§9 resolved): the register occupies
/// bits 6-9 when it is a source operand and bits 2-5 when it is a
/// destination operand, matching the role-dependent slot named in §4.5.
fn encode_single_operand(operand: &Operand, role: OperandRole) -> Vec<MachineWord> {
    match operand {
        Operand::Register(r) => {
            let n = register_number(r);
            let bits = match role {
                OperandRole::Source => n << 6,
                OperandRole::Destination => n << 2,
            };
            vec![MachineWord::new(bits | ARE_ABSOLUTE)]
        }
        Operand::Immediate(value) => vec![encode_signed(*value)],
        Operand::Direct(_) => vec![MachineWord::new(0)],
        Operand::Matrix { reg_i, reg_j, .. } => {
            let index_word = MachineWord::new((register_number(reg_i) << 6) | (register_number(reg_j) << 2) | ARE_ABSOLUTE);
            vec![MachineWord::new(0), index_word]
        }
    }
}

fn encode_shared_register_word(src: &Register, dst: &Register) -> MachineWord {
    let bits = (register_number(src) << 6) | (register_number(dst) << 2);
    MachineWord::new(bits | ARE_ABSOLUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Register;

    #[test]
    fn two_registers_share_a_word() {
        let operands = vec![Operand::Register(Register::R3), Operand::Register(Register::R5)];
        let opcode_word = encode_opcode_word(&Mnemonic::Mov, &operands);
        assert_eq!(opcode_word.bits(), 0b0000_11_11_00);

        let extra = encode_operand_words(&operands);
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].bits(), 0b0011_0101_00);
    }

    #[test]
    fn immediate_is_sign_extended_to_ten_bits() {
        assert_eq!(encode_signed(-512).bits(), 0b10_0000_0000);
        assert_eq!(encode_signed(511).bits(), 0b01_1111_1111);
        assert_eq!(encode_signed(-1).bits(), 0b11_1111_1111);
    }

    #[test]
    fn matrix_operand_emits_placeholder_then_index_word() {
        let operand = Operand::Matrix {
            name: "V".to_string(),
            reg_i: Register::R3,
            reg_j: Register::R5,
        };
        let words = encode_single_operand(&operand, OperandRole::Destination);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].bits(), 0);
        assert_eq!(words[1].bits(), (3u16 << 6) | (5u16 << 2));
    }
}
