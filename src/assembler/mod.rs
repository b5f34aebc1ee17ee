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

//! Orchestrates the first pass, memory builder, and second pass over one
//! already macro-expanded source file and produces a single
//! [`AssembledProgram`] or the full set of diagnostics collected along the
//! way.

pub mod encoder;
pub mod first_pass;
pub mod memory_builder;
pub mod second_pass;
pub mod symbol_table;

use crate::errors::Diagnostics;
use encoder::MachineWord;

/// Everything the renderer needs to write `.ob`/`.ent`/`.ext`, gathered in
/// one value so no stage has to reach back into another's private state.
pub struct AssembledProgram {
    pub instruction_image: Vec<MachineWord>,
    pub data_image: Vec<MachineWord>,
    pub entries: Vec<(String, u32)>,
    pub externals: Vec<(String, u32)>,
}

/// Runs the three core passes over `expanded_source` (already macro
/// expanded by [`crate::preprocessor::preprocess`]). Returns either the
/// fully resolved program or every diagnostic collected across whichever
/// passes ran before failing.
pub fn assemble(expanded_source: &str) -> Result<AssembledProgram, Diagnostics> {
    let first = first_pass::run(expanded_source)?;
    let memory = memory_builder::build(&first.lines);
    let second = second_pass::run(memory, &first.symbols, &first.entries)?;

    Ok(AssembledProgram {
        instruction_image: second.instruction_image,
        data_image: second.data_image,
        entries: second.entries,
        externals: second.externals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_a_small_program_end_to_end() {
        let source = ".extern HELLO\nMAIN: mov #5, r1\njsr HELLO\nstop\nX: .data 1, 2\n.entry MAIN\n";
        let program = assemble(source).unwrap();
        assert_eq!(program.externals, vec![("HELLO".to_string(), 104)]);
        assert_eq!(program.entries, vec![("MAIN".to_string(), 100)]);
        assert_eq!(program.data_image.len(), 2);
    }

    #[test]
    fn undefined_symbol_fails_the_whole_run() {
        let source = "jmp GHOST\n";
        let errors = assemble(source).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
