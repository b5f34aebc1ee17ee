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

//! A stateless helper shared by the pre-processor, first pass, and second
//! pass. Everything here is a pure function over a single logical line;
//! nothing here owns a table or a counter.
//!
//! Operand classification and the per-instruction word-count rule are
//! realized directly on the typed AST ([`crate::ast::Operand`],
//! [`crate::ast::Directive`]) produced by `parser::parse_line`, rather than
//! by re-scanning operand substrings: the grammar in `grammar.pest` already
//! performs classification (IMMEDIATE / REGISTER / MATRIX / DIRECT, or a
//! grammar failure standing in for INVALID) and extraction in one step, so a
//! second text-based classifier would just restate the grammar.

use crate::ast::{Directive, Operand};

pub const MAX_LABEL_LEN: usize = 30;
pub const MAX_LINE_LEN: usize = 80;

const MNEMONICS: &[&str] = &[
    "mov", "cmp", "add", "sub", "not", "clr", "lea", "inc", "dec", "jmp", "bne", "red", "prn",
    "jsr", "rts", "stop",
];
const DIRECTIVES: &[&str] = &[".data", ".string", ".mat", ".entry", ".extern"];
const MACRO_KEYWORDS: &[&str] = &["mcro", "mcroend"];

/// True for blank (whitespace-only) lines.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True for comment lines: first non-whitespace character is `;`.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(';')
}

pub fn is_comment_or_empty(line: &str) -> bool {
    is_blank(line) || is_comment(line)
}

/// Splits a `LABEL:` prefix off the front of a line, if present.
/// Returns `(label_name, rest_of_line)`.
pub fn extract_label(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let first_token = trimmed.split_whitespace().next()?;
    let name = first_token.strip_suffix(':')?;
    let rest = trimmed[first_token.len()..].trim_start();
    Some((name, rest))
}

/// True when `name` collides with any reserved word: instruction mnemonics,
/// register names, directive names, or macro keywords.
pub fn is_reserved_word(name: &str) -> bool {
    let lower = name.to_lowercase();
    MNEMONICS.contains(&lower.as_str())
        || MACRO_KEYWORDS.contains(&lower.as_str())
        || is_register_name(&lower)
        || DIRECTIVES.contains(&format!(".{lower}").as_str())
}

fn is_register_name(lower: &str) -> bool {
    matches!(lower, "r0" | "r1" | "r2" | "r3" | "r4" | "r5" | "r6" | "r7")
}

/// True when the (post-label) content of a line begins a `.data`/`.string`/
/// `.mat` directive.
pub fn is_data_or_string_directive(content: &str) -> bool {
    let first = content.trim_start().split_whitespace().next().unwrap_or("");
    matches!(first, ".data" | ".string" | ".mat")
}

/// True when the (post-label) content of a line names one of the sixteen
/// instruction mnemonics.
pub fn is_command(content: &str) -> bool {
    let first = content
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    MNEMONICS.contains(&first.as_str())
}

/// Number of memory words a `.data` directive contributes: one per
/// comma-separated integer.
pub fn count_data_items(directive: &Directive) -> u32 {
    match directive {
        Directive::Data(values) => values.len() as u32,
        _ => 0,
    }
}

/// Number of memory words a `.string` directive contributes: one per
/// character plus one for the terminator.
pub fn count_string_length(directive: &Directive) -> u32 {
    match directive {
        Directive::Str(s) => s.len() as u32 + 1,
        _ => 0,
    }
}

/// Number of memory words a `.mat` directive contributes: rows * cols.
pub fn count_matrix_items(directive: &Directive) -> u32 {
    match directive {
        Directive::Mat { rows, cols, .. } => rows * cols,
        _ => 0,
    }
}

/// Word count contributed by a data/string/mat directive, dispatching to
/// the three helpers above.
pub fn directive_word_count(directive: &Directive) -> u32 {
    match directive {
        Directive::Data(_) => count_data_items(directive),
        Directive::Str(_) => count_string_length(directive),
        Directive::Mat { .. } => count_matrix_items(directive),
        Directive::Entry(_) | Directive::Extern(_) => 0,
    }
}

/// The word-count rule from §4.2: opcode word (always 1) plus the operand
/// words, with the two-register sharing rule applied when both operands of
/// a two-operand instruction are registers.
pub fn count_command_words(operands: &[Operand]) -> u32 {
    1 + match operands {
        [] => 0,
        [only] => only.word_count(),
        [a, b] => {
            if matches!(a, Operand::Register(_)) && matches!(b, Operand::Register(_)) {
                1
            } else {
                a.word_count() + b.word_count()
            }
        }
        _ => unreachable!("no instruction in this ISA takes more than two operands"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Register;

    #[test]
    fn blank_and_comment_lines_are_detected() {
        assert!(is_comment_or_empty("   "));
        assert!(is_comment_or_empty("   ; a comment"));
        assert!(!is_comment_or_empty("mov r1, r2"));
    }

    #[test]
    fn extracts_label_prefix() {
        let (name, rest) = extract_label("MAIN: mov r1, r2").unwrap();
        assert_eq!(name, "MAIN");
        assert_eq!(rest, "mov r1, r2");
        assert!(extract_label("mov r1, r2").is_none());
    }

    #[test]
    fn reserved_words_cover_all_four_sets() {
        assert!(is_reserved_word("mov"));
        assert!(is_reserved_word("r3"));
        assert!(is_reserved_word("data"));
        assert!(is_reserved_word("mcro"));
        assert!(!is_reserved_word("counter"));
    }

    #[test]
    fn two_registers_share_one_word() {
        let ops = vec![Operand::Register(Register::R3), Operand::Register(Register::R5)];
        assert_eq!(count_command_words(&ops), 2);
    }

    #[test]
    fn matrix_operand_costs_two_extra_words() {
        let ops = vec![Operand::Matrix {
            name: "V".to_string(),
            reg_i: Register::R3,
            reg_j: Register::R5,
        }];
        assert_eq!(count_command_words(&ops), 3);
    }
}
