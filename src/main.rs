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

use clap::Parser as clap_parser;
use std::process::ExitCode;

use cicasm::source::FsSourceReader;
use cicasm::{assemble_file, write_outputs};

#[derive(clap_parser)]
#[clap(version = "0.3.4", author = "Connor Nolan")]
struct Opts {
    /// Base filenames to assemble (no extension); each reads `NAME.as`.
    #[clap(required = true)]
    inputs: Vec<String>,

    /// Emit informational progress messages in addition to diagnostics.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    let level = if opts.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let reader = FsSourceReader;
    let mut any_failed = false;

    for base in &opts.inputs {
        match assemble_file(base, &reader) {
            Ok(files) => {
                if let Err(e) = write_outputs(base, &files) {
                    eprintln!("{base}: {e}");
                    any_failed = true;
                    continue;
                }
                println!("{base}: assembled successfully");
            }
            Err(diagnostics) => {
                any_failed = true;
                for error in &diagnostics {
                    eprintln!("{base}: {error}");
                }
            }
        }
    }

    if any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
