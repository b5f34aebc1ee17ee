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

//! Operand permissibility table (§4.6): which addressing modes each
//! mnemonic accepts for its source and destination operand, and the
//! matching operand count. Both passes share this so a malformed
//! instruction is rejected identically regardless of which pass sees it
//! first.

use crate::ast::{AddressingMode, Mnemonic, Operand};
use crate::errors::AssemblyError;

fn allowed_source_modes(mnemonic: &Mnemonic) -> &'static [AddressingMode] {
    use AddressingMode::*;
    match mnemonic {
        Mnemonic::Mov | Mnemonic::Cmp | Mnemonic::Add | Mnemonic::Sub => {
            &[Immediate, Direct, Matrix, Register]
        }
        Mnemonic::Lea => &[Direct, Matrix],
        _ => &[],
    }
}

fn allowed_destination_modes(mnemonic: &Mnemonic) -> &'static [AddressingMode] {
    use AddressingMode::*;
    match mnemonic {
        Mnemonic::Mov | Mnemonic::Add | Mnemonic::Sub => {
            &[Direct, Matrix, Register]
        }
        Mnemonic::Lea => &[Direct, Register],
        Mnemonic::Cmp => &[Immediate, Direct, Matrix, Register],
        Mnemonic::Clr | Mnemonic::Not | Mnemonic::Inc | Mnemonic::Dec | Mnemonic::Red => {
            &[Direct, Matrix, Register]
        }
        Mnemonic::Prn => &[Immediate, Direct, Matrix, Register],
        Mnemonic::Jmp | Mnemonic::Bne | Mnemonic::Jsr => &[Direct, Matrix],
        Mnemonic::Rts | Mnemonic::Stop => &[],
    }
}

/// Validates operand count and addressing-mode permissibility for one
/// instruction line. Returns the specific mismatch as an `AssemblyError`
/// so callers only need to propagate it.
pub fn validate_operands(
    mnemonic: &Mnemonic,
    operands: &[Operand],
    line: usize,
) -> Result<(), AssemblyError> {
    let expected = mnemonic.operand_count();
    if operands.len() != expected {
        return Err(AssemblyError::OperandCountMismatch {
            line,
            mnemonic: mnemonic.name().to_string(),
            expected,
            found: operands.len(),
        });
    }

    match operands {
        [] => Ok(()),
        [only] => check_mode(mnemonic, only, allowed_destination_modes(mnemonic), "destination", line),
        [src, dst] => {
            check_mode(mnemonic, src, allowed_source_modes(mnemonic), "source", line)?;
            check_mode(mnemonic, dst, allowed_destination_modes(mnemonic), "destination", line)
        }
        _ => unreachable!(),
    }
}

fn check_mode(
    mnemonic: &Mnemonic,
    operand: &Operand,
    allowed: &[AddressingMode],
    role: &'static str,
    line: usize,
) -> Result<(), AssemblyError> {
    if allowed.contains(&operand.addressing_mode()) {
        Ok(())
    } else {
        Err(AssemblyError::InvalidOperandType {
            line,
            mnemonic: mnemonic.name().to_string(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Register;

    #[test]
    fn lea_rejects_immediate_source() {
        let operands = vec![Operand::Immediate(1), Operand::Register(Register::R2)];
        let err = validate_operands(&Mnemonic::Lea, &operands, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidOperandType { role: "source", .. }));
    }

    #[test]
    fn lea_rejects_matrix_destination() {
        let operands = vec![
            Operand::Matrix {
                name: "V".to_string(),
                reg_i: Register::R1,
                reg_j: Register::R2,
            },
            Operand::Matrix {
                name: "W".to_string(),
                reg_i: Register::R3,
                reg_j: Register::R4,
            },
        ];
        let err = validate_operands(&Mnemonic::Lea, &operands, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidOperandType { role: "destination", .. }));
    }

    #[test]
    fn jmp_rejects_register_operand() {
        let operands = vec![Operand::Register(Register::R2)];
        let err = validate_operands(&Mnemonic::Jmp, &operands, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidOperandType { role: "destination", .. }));
    }

    #[test]
    fn stop_rejects_any_operand() {
        let operands = vec![Operand::Register(Register::R0)];
        let err = validate_operands(&Mnemonic::Stop, &operands, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::OperandCountMismatch { expected: 0, found: 1, .. }));
    }

    #[test]
    fn mov_accepts_direct_to_register() {
        let operands = vec![Operand::Direct("X".to_string()), Operand::Register(Register::R1)];
        assert!(validate_operands(&Mnemonic::Mov, &operands, 1).is_ok());
    }

    #[test]
    fn cmp_accepts_immediate_destination() {
        let operands = vec![Operand::Register(Register::R1), Operand::Immediate(5)];
        assert!(validate_operands(&Mnemonic::Cmp, &operands, 1).is_ok());
    }
}
