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

//! Exercises the real-filesystem path (`FsSourceReader` + `write_outputs`)
//! that `MockSourceReader`-based tests never touch, against a scratch
//! `tempfile::TempDir` so nothing lands in the working directory.

use std::fs;

use cicasm::source::FsSourceReader;
use cicasm::{assemble_file, write_outputs};

#[test]
fn assembles_and_writes_ob_ent_ext_to_disk() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let base = dir.path().join("prog");
    let base_str = base.to_str().unwrap();

    fs::write(
        base.with_extension("as"),
        ".extern HELLO\n.entry MAIN\nMAIN: jsr HELLO\nstop\n",
    )
    .unwrap();

    let files = assemble_file(base_str, &FsSourceReader).expect("expected a successful assembly");
    write_outputs(base_str, &files).expect("expected output files to be written");

    let object = fs::read_to_string(base.with_extension("ob")).unwrap();
    // jsr HELLO (opcode + placeholder) + stop = 3 instruction words, no data.
    assert!(object.starts_with("d a"));

    let entries = fs::read_to_string(base.with_extension("ent")).unwrap();
    assert!(entries.contains("MAIN"));

    let externals = fs::read_to_string(base.with_extension("ext")).unwrap();
    assert!(externals.contains("HELLO"));
}

#[test]
fn missing_source_file_reports_file_io_error_for_the_real_reader() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let base = dir.path().join("nope");

    let errors = assemble_file(base.to_str().unwrap(), &FsSourceReader).unwrap_err();
    assert!(matches!(
        errors[0],
        cicasm::errors::AssemblyError::FileIO { .. }
    ));
}
