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

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    pub fn number(&self) -> u8 {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
            Register::R2 => 2,
            Register::R3 => 3,
            Register::R4 => 4,
            Register::R5 => 5,
            Register::R6 => 6,
            Register::R7 => 7,
        }
    }
}

/// The sixteen machine opcodes this assembler understands, in `parser::Rule`
/// order. Values line up with the opcode field the encoder writes (0..15).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mnemonic {
    Mov,
    Cmp,
    Add,
    Sub,
    Not,
    Clr,
    Lea,
    Inc,
    Dec,
    Jmp,
    Bne,
    Red,
    Prn,
    Jsr,
    Rts,
    Stop,
}

impl Mnemonic {
    pub fn opcode(&self) -> u8 {
        match self {
            Mnemonic::Mov => 0,
            Mnemonic::Cmp => 1,
            Mnemonic::Add => 2,
            Mnemonic::Sub => 3,
            Mnemonic::Not => 4,
            Mnemonic::Clr => 5,
            Mnemonic::Lea => 6,
            Mnemonic::Inc => 7,
            Mnemonic::Dec => 8,
            Mnemonic::Jmp => 9,
            Mnemonic::Bne => 10,
            Mnemonic::Red => 11,
            Mnemonic::Prn => 12,
            Mnemonic::Jsr => 13,
            Mnemonic::Rts => 14,
            Mnemonic::Stop => 15,
        }
    }

    pub fn from_name(name: &str) -> Option<Mnemonic> {
        Some(match name {
            "mov" => Mnemonic::Mov,
            "cmp" => Mnemonic::Cmp,
            "add" => Mnemonic::Add,
            "sub" => Mnemonic::Sub,
            "not" => Mnemonic::Not,
            "clr" => Mnemonic::Clr,
            "lea" => Mnemonic::Lea,
            "inc" => Mnemonic::Inc,
            "dec" => Mnemonic::Dec,
            "jmp" => Mnemonic::Jmp,
            "bne" => Mnemonic::Bne,
            "red" => Mnemonic::Red,
            "prn" => Mnemonic::Prn,
            "jsr" => Mnemonic::Jsr,
            "rts" => Mnemonic::Rts,
            "stop" => Mnemonic::Stop,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::Cmp => "cmp",
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Not => "not",
            Mnemonic::Clr => "clr",
            Mnemonic::Lea => "lea",
            Mnemonic::Inc => "inc",
            Mnemonic::Dec => "dec",
            Mnemonic::Jmp => "jmp",
            Mnemonic::Bne => "bne",
            Mnemonic::Red => "red",
            Mnemonic::Prn => "prn",
            Mnemonic::Jsr => "jsr",
            Mnemonic::Rts => "rts",
            Mnemonic::Stop => "stop",
        }
    }

    /// Number of operands this mnemonic takes, per the glossary's fixed
    /// instruction table (0, 1, or 2).
    pub fn operand_count(&self) -> usize {
        match self {
            Mnemonic::Mov | Mnemonic::Cmp | Mnemonic::Add | Mnemonic::Sub | Mnemonic::Lea => 2,
            Mnemonic::Clr
            | Mnemonic::Not
            | Mnemonic::Inc
            | Mnemonic::Dec
            | Mnemonic::Red
            | Mnemonic::Prn
            | Mnemonic::Jmp
            | Mnemonic::Bne
            | Mnemonic::Jsr => 1,
            Mnemonic::Rts | Mnemonic::Stop => 0,
        }
    }

    /// Whether this mnemonic takes a source operand at all (the two-operand
    /// mnemonics only; everything else only has a destination).
    pub fn has_source_operand(&self) -> bool {
        self.operand_count() == 2
    }
}

/// Every legal shape an operand can take once classified (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Immediate(i32),
    Register(Register),
    Matrix {
        name: String,
        reg_i: Register,
        reg_j: Register,
    },
    Direct(String),
}

/// The four addressing modes an operand word can encode (§4.5 bits 4-5 / 2-3).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    Immediate = 0,
    Direct = 1,
    Matrix = 2,
    Register = 3,
}

impl Operand {
    pub fn addressing_mode(&self) -> AddressingMode {
        match self {
            Operand::Immediate(_) => AddressingMode::Immediate,
            Operand::Direct(_) => AddressingMode::Direct,
            Operand::Matrix { .. } => AddressingMode::Matrix,
            Operand::Register(_) => AddressingMode::Register,
        }
    }

    /// Number of extra words (beyond the opcode word) this operand
    /// contributes when it does *not* participate in the two-register
    /// word-sharing rule.
    pub fn word_count(&self) -> u32 {
        match self {
            Operand::Matrix { .. } => 2,
            _ => 1,
        }
    }

    /// The symbol name referenced by this operand, for DIRECT and MATRIX
    /// base addresses; `None` for IMMEDIATE/REGISTER.
    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Operand::Direct(name) => Some(name),
            Operand::Matrix { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `.data n1, n2, …`
    Data(Vec<i32>),
    /// `.string "…"`
    Str(String),
    /// `.mat [rows][cols] v1, v2, …`
    Mat {
        rows: u32,
        cols: u32,
        values: Vec<i32>,
    },
    /// `.entry NAME`
    Entry(String),
    /// `.extern NAME`
    Extern(String),
}

/// One classified line from the expanded (`.am`) source, produced once by
/// the parser and walked, read-only, by the first pass, memory builder, and
/// second pass alike.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyLine {
    pub line_number: usize,
    pub label: Option<String>,
    pub instruction: Option<(Mnemonic, Vec<Operand>)>,
    pub directive: Option<Directive>,
}

