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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod line_analyzer;
pub mod parser;
pub mod preprocessor;
pub mod render;
pub mod source;

extern crate pest;
extern crate pest_derive;

use std::fs;
use std::path::Path;

use errors::{AssemblyError, Diagnostics};
use log::info;
use source::SourceReader;

/// The three artifacts produced by a successful run of one input file.
/// `entries`/`externals` are `None` when there is nothing to report, per
/// the "written only if non-empty" rule (§6).
pub struct AssembledFiles {
    pub object: String,
    pub entries: Option<String>,
    pub externals: Option<String>,
}

/// Runs the full pipeline for one base filename: reads `{base}.as` through
/// `reader`, pre-processes, assembles, and renders. On any error, returns
/// every diagnostic collected and the caller must not write any artifact.
pub fn assemble_file(base: &str, reader: &dyn SourceReader) -> Result<AssembledFiles, Diagnostics> {
    let source_path_str = format!("{base}.as");
    let source_path = Path::new(&source_path_str);
    let raw = reader.read_to_string(source_path).map_err(|e| {
        vec![AssemblyError::FileIO {
            path: source_path.display().to_string(),
            reason: e.to_string(),
        }]
    })?;

    info!("preprocessing {base}.as");
    let expanded = preprocessor::preprocess(&raw)?;

    info!("assembling {base}.am");
    let program = assembler::assemble(&expanded)?;

    Ok(AssembledFiles {
        object: render::render_object(&program),
        entries: render::render_entries(&program),
        externals: render::render_externals(&program),
    })
}

/// Writes `{base}.ob`, and `{base}.ent`/`{base}.ext` when non-empty, next to
/// the source file. The only caller outside tests is `main`.
pub fn write_outputs(base: &str, files: &AssembledFiles) -> std::io::Result<()> {
    fs::write(format!("{base}.ob"), &files.object)?;
    if let Some(entries) = &files.entries {
        fs::write(format!("{base}.ent"), entries)?;
    }
    if let Some(externals) = &files.externals {
        fs::write(format!("{base}.ext"), externals)?;
    }
    Ok(())
}
