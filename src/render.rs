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

//! Renders an [`AssembledProgram`](crate::assembler::AssembledProgram) into
//! the text of the three output artifacts. Flagged out of scope for the
//! core translator proper (§1), kept deliberately thin: base-4-letter
//! encoding and line formatting only, no further validation.

use crate::assembler::AssembledProgram;
use crate::assembler::encoder::MachineWord;
use crate::assembler::encoder::constants::BASE_ADDRESS;

const DIGITS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Encodes `value` as a fixed-width base-4 string using the `{a,b,c,d}`
/// alphabet, most significant digit first.
fn to_base4(value: u32, width: usize) -> String {
    let mut digits = vec!['a'; width];
    let mut v = value;
    for slot in digits.iter_mut().rev() {
        *slot = DIGITS[(v % 4) as usize];
        v /= 4;
    }
    digits.into_iter().collect()
}

/// Same encoding, but with leading `a`s trimmed (at least one character
/// remains), for the `.ob` header counts.
fn to_base4_trimmed(value: u32) -> String {
    let full = to_base4(value, 16);
    let trimmed = full.trim_start_matches('a');
    if trimmed.is_empty() {
        "a".to_string()
    } else {
        trimmed.to_string()
    }
}

fn render_word_line(address: u32, word: &MachineWord) -> String {
    format!("{} {}", to_base4(address, 4), to_base4(word.bits() as u32, 5))
}

/// Builds the `.ob` text: header line with instruction/data word counts,
/// then one `<address> <word>` line per memory word, instructions first.
pub fn render_object(program: &AssembledProgram) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        to_base4_trimmed(program.instruction_image.len() as u32),
        to_base4_trimmed(program.data_image.len() as u32)
    ));

    let mut address = BASE_ADDRESS;
    for word in &program.instruction_image {
        out.push_str(&render_word_line(address, word));
        out.push('\n');
        address += 1;
    }
    for word in &program.data_image {
        out.push_str(&render_word_line(address, word));
        out.push('\n');
        address += 1;
    }
    out
}

/// Builds the `.ent` text, or `None` if there are no entries to report.
pub fn render_entries(program: &AssembledProgram) -> Option<String> {
    if program.entries.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (name, address) in &program.entries {
        out.push_str(&format!("{name} {}\n", to_base4(*address, 4)));
    }
    Some(out)
}

/// Builds the `.ext` text, or `None` if there are no external references.
pub fn render_externals(program: &AssembledProgram) -> Option<String> {
    if program.externals.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (name, address) in &program.externals {
        out.push_str(&format!("{name} {}\n", to_base4(*address, 4)));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_counts_are_trimmed_but_keep_one_digit() {
        assert_eq!(to_base4_trimmed(0), "a");
        assert_eq!(to_base4_trimmed(2), "c");
        assert_eq!(to_base4_trimmed(16), "baa");
    }

    #[test]
    fn object_file_lists_instructions_then_data() {
        let program = AssembledProgram {
            instruction_image: vec![MachineWord::new(0b0000000000)],
            data_image: vec![MachineWord::new(7)],
            entries: vec![],
            externals: vec![],
        };
        let text = render_object(&program);
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "b b");
        assert_eq!(lines.next().unwrap(), format!("{} {}", to_base4(100, 4), to_base4(0, 5)));
        assert_eq!(lines.next().unwrap(), format!("{} {}", to_base4(101, 4), to_base4(7, 5)));
    }

    #[test]
    fn entries_file_is_none_when_empty() {
        let program = AssembledProgram {
            instruction_image: vec![],
            data_image: vec![],
            entries: vec![],
            externals: vec![],
        };
        assert!(render_entries(&program).is_none());
    }

    #[test]
    fn entries_file_formats_symbol_and_address() {
        let program = AssembledProgram {
            instruction_image: vec![],
            data_image: vec![],
            entries: vec![("MAIN".to_string(), 100)],
            externals: vec![],
        };
        let text = render_entries(&program).unwrap();
        assert_eq!(text, format!("MAIN {}\n", to_base4(100, 4)));
    }
}
