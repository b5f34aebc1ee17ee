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

//! The macro pre-processor: stage 1 of the pipeline (§4.1).
//!
//! Runs a small state machine over the raw `.as` text and produces the
//! expanded `.am` text, with every macro-definition block elided and every
//! macro-call site replaced by the stored body. Comments and blank lines
//! outside macro bodies are copied through verbatim.

use crate::errors::{AssemblyError, Diagnostics};
use crate::line_analyzer::{MAX_LABEL_LEN, MAX_LINE_LEN, extract_label, is_comment_or_empty, is_reserved_word};
use std::collections::HashMap;

const MACRO_START: &str = "mcro";
const MACRO_END: &str = "mcroend";

#[derive(Default)]
struct MacroTable {
    macros: HashMap<String, Vec<String>>,
}

impl MacroTable {
    fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Vec<String>> {
        self.macros.get(name)
    }

    fn insert(&mut self, name: String, body: Vec<String>) -> bool {
        if self.macros.contains_key(&name) {
            return false;
        }
        self.macros.insert(name, body);
        true
    }
}

enum State {
    Outside,
    Inside {
        name: String,
        opened_at: usize,
        body: Vec<String>,
    },
    Skipping,
}

fn is_valid_macro_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_LABEL_LEN {
        return false;
    }
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Runs the pre-processor over `source`. On success returns the expanded
/// `.am` text. On failure returns every recoverable error collected while
/// scanning; per §4.1's output policy, the caller must not retain an `.am`
/// artifact and must not enter the first pass.
pub fn preprocess(source: &str) -> Result<String, Diagnostics> {
    let mut table = MacroTable::default();
    let mut output: Vec<String> = Vec::new();
    let mut errors: Diagnostics = Vec::new();
    let mut state = State::Outside;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_number = idx + 1;

        if raw_line.chars().count() > MAX_LINE_LEN {
            errors.push(AssemblyError::LineTooLong {
                line: line_number,
                max: MAX_LINE_LEN,
            });
            continue;
        }

        match &mut state {
            State::Skipping => {
                if raw_line.trim() == MACRO_END {
                    state = State::Outside;
                }
            }
            State::Inside { name, body, .. } => {
                if raw_line.trim() == MACRO_END {
                    let name = name.clone();
                    let body = std::mem::take(body);
                    if !table.insert(name.clone(), body) {
                        errors.push(AssemblyError::DuplicateMacroName {
                            line: line_number,
                            name,
                        });
                    }
                    state = State::Outside;
                } else {
                    body.push(raw_line.to_string());
                }
            }
            State::Outside => {
                if is_comment_or_empty(raw_line) {
                    output.push(raw_line.to_string());
                    continue;
                }

                let labeled = extract_label(raw_line);
                let content = labeled.map(|(_, rest)| rest).unwrap_or(raw_line.trim_start());
                let first_token = content.split_whitespace().next().unwrap_or("");

                let starts_macro_def = first_token == MACRO_START;
                let is_macro_call = table.contains(first_token);

                if labeled.is_some() && (starts_macro_def || is_macro_call) {
                    errors.push(AssemblyError::LabelOnMacroLine { line: line_number });
                    continue;
                }

                if starts_macro_def {
                    let rest = content[MACRO_START.len()..].trim();
                    let name = rest.split_whitespace().next().unwrap_or("");
                    let after_name = rest[name.len()..].trim();

                    if !is_valid_macro_name(name) || is_reserved_word(name) {
                        errors.push(AssemblyError::InvalidMacroName {
                            line: line_number,
                            name: name.to_string(),
                        });
                        state = State::Skipping;
                        continue;
                    }

                    if !after_name.is_empty() {
                        errors.push(AssemblyError::ExtraneousText {
                            line: line_number,
                            token: name.to_string(),
                        });
                        state = State::Skipping;
                        continue;
                    }

                    state = State::Inside {
                        name: name.to_string(),
                        opened_at: line_number,
                        body: Vec::new(),
                    };
                } else if is_macro_call {
                    let after_call = content[first_token.len()..].trim();
                    if !after_call.is_empty() {
                        errors.push(AssemblyError::ExtraneousText {
                            line: line_number,
                            token: first_token.to_string(),
                        });
                    }
                    output.extend(table.get(first_token).unwrap().iter().cloned());
                } else {
                    output.push(raw_line.to_string());
                }
            }
        }
    }

    if let State::Inside { name, opened_at, .. } = state {
        errors.push(AssemblyError::MacroNotClosed {
            line: opened_at,
            name,
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(output.join("\n") + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_macro_call_preserving_order() {
        let source = "clr r2\nmcro LOAD\nmov r1, r2\ninc r1\nmcroend\nLOAD\nstop\n";
        let expanded = preprocess(source).unwrap();
        let lines: Vec<&str> = expanded.lines().collect();
        assert_eq!(lines, vec!["clr r2", "mov r1, r2", "inc r1", "stop"]);
    }

    #[test]
    fn rejects_label_on_macro_definition() {
        let source = "L1: mcro FOO\nmov r1, r2\nmcroend\nFOO\n";
        let errors = preprocess(source).unwrap_err();
        assert!(matches!(errors[0], AssemblyError::LabelOnMacroLine { line: 1 }));
    }

    #[test]
    fn unclosed_macro_is_reported() {
        let source = "mcro FOO\nmov r1, r2\n";
        let errors = preprocess(source).unwrap_err();
        assert!(matches!(errors[0], AssemblyError::MacroNotClosed { .. }));
    }

    #[test]
    fn duplicate_macro_name_is_reported() {
        let source = "mcro FOO\nrts\nmcroend\nmcro FOO\nstop\nmcroend\n";
        let errors = preprocess(source).unwrap_err();
        assert!(matches!(errors[0], AssemblyError::DuplicateMacroName { .. }));
    }

    #[test]
    fn no_macros_passes_source_through() {
        let source = "mov r1, r2\nstop\n";
        let expanded = preprocess(source).unwrap();
        assert_eq!(expanded, "mov r1, r2\nstop\n");
    }

    #[test]
    fn preprocessing_expanded_output_is_idempotent() {
        let source = "mcro FOO\nmov r1, r2\nmcroend\nFOO\nstop\n";
        let expanded_once = preprocess(source).unwrap();
        let expanded_twice = preprocess(&expanded_once).unwrap();
        assert_eq!(expanded_once, expanded_twice);
        assert!(!expanded_twice.contains("mcro"));
    }

    #[test]
    fn line_too_long_is_rejected() {
        let long_line = "a".repeat(81);
        let source = format!("{long_line}\nstop\n");
        let errors = preprocess(&source).unwrap_err();
        assert!(matches!(
            errors[0],
            AssemblyError::LineTooLong { line: 1, max: 80 }
        ));
    }
}
