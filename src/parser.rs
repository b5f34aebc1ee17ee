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

//! Builds one [`AssemblyLine`] from one already-expanded, non-blank,
//! non-comment line of `.am` text, via the `grammar.pest` line grammar.

use crate::ast::{AssemblyLine, Directive, Mnemonic, Operand, Register};
use crate::errors::AssemblyError;
use crate::line_analyzer::{MAX_LABEL_LEN, is_reserved_word};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct LineParser;

pub fn parse_line(text: &str, line_number: usize) -> Result<AssemblyLine, AssemblyError> {
    let mut pairs =
        LineParser::parse(Rule::line, text).map_err(|e| AssemblyError::SyntaxError {
            line: line_number,
            reason: e.to_string(),
        })?;

    let line_pair = pairs.next().expect("line rule always produces one pair");
    let mut result = AssemblyLine {
        line_number,
        ..Default::default()
    };

    for pair in line_pair.into_inner() {
        match pair.as_rule() {
            Rule::label => {
                let raw = pair.as_str();
                let name = raw[..raw.len() - 1].to_string();
                validate_label_name(&name, line_number)?;
                result.label = Some(name);
            }
            Rule::instruction => {
                result.instruction = Some(build_instruction(pair, line_number)?);
            }
            Rule::directive => {
                result.directive = Some(build_directive(pair, line_number)?);
            }
            Rule::EOI => {}
            _ => {}
        }
    }

    Ok(result)
}

pub fn validate_label_name(name: &str, line_number: usize) -> Result<(), AssemblyError> {
    if name.len() > MAX_LABEL_LEN {
        return Err(AssemblyError::InvalidLabelName {
            line: line_number,
            name: name.to_string(),
        });
    }
    if is_reserved_word(name) {
        return Err(AssemblyError::ReservedWord {
            line: line_number,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn build_instruction(
    pair: Pair<Rule>,
    line_number: usize,
) -> Result<(Mnemonic, Vec<Operand>), AssemblyError> {
    let mut inner = pair.into_inner();
    let mnemonic_pair = inner.next().expect("instruction always has a mnemonic");
    let name = mnemonic_pair.as_str().to_lowercase();

    let mnemonic = Mnemonic::from_name(&name).ok_or_else(|| AssemblyError::UnknownInstruction {
        line: line_number,
        name: name.clone(),
    })?;

    let mut operands = Vec::new();
    if let Some(operand_list) = inner.next() {
        for operand_pair in operand_list.into_inner() {
            operands.push(build_operand(operand_pair, line_number)?);
        }
    }

    Ok((mnemonic, operands))
}

fn build_operand(pair: Pair<Rule>, line_number: usize) -> Result<Operand, AssemblyError> {
    let inner = pair.into_inner().next().expect("operand always wraps one alternative");
    match inner.as_rule() {
        Rule::immediate => {
            let digits = &inner.as_str()[1..];
            let value: i32 = digits.parse().map_err(|_| AssemblyError::SyntaxError {
                line: line_number,
                reason: format!("'{}' is not a valid immediate value", inner.as_str()),
            })?;
            if !(-512..=511).contains(&value) {
                return Err(AssemblyError::SyntaxError {
                    line: line_number,
                    reason: format!("immediate value {value} is out of range [-512, 511]"),
                });
            }
            Ok(Operand::Immediate(value))
        }
        Rule::register => Ok(Operand::Register(parse_register(inner.as_str()))),
        Rule::matrix_operand => {
            let mut parts = inner.into_inner();
            let name = parts.next().unwrap().as_str().to_string();
            validate_label_name(&name, line_number)?;
            let reg_i = parse_register(parts.next().unwrap().as_str());
            let reg_j = parse_register(parts.next().unwrap().as_str());
            Ok(Operand::Matrix {
                name,
                reg_i,
                reg_j,
            })
        }
        Rule::direct => {
            let name = inner.as_str().to_string();
            validate_label_name(&name, line_number)?;
            Ok(Operand::Direct(name))
        }
        _ => unreachable!("operand grammar only admits the four alternatives above"),
    }
}

fn parse_register(text: &str) -> Register {
    match text.to_lowercase().as_str() {
        "r0" => Register::R0,
        "r1" => Register::R1,
        "r2" => Register::R2,
        "r3" => Register::R3,
        "r4" => Register::R4,
        "r5" => Register::R5,
        "r6" => Register::R6,
        "r7" => Register::R7,
        _ => unreachable!("register grammar rule only admits r0..r7"),
    }
}

fn build_directive(pair: Pair<Rule>, line_number: usize) -> Result<Directive, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("directive always wraps one alternative");
    match inner.as_rule() {
        Rule::data_directive => {
            let mut values = Vec::new();
            let list = inner.into_inner().next().expect("data directive has an int list");
            for int_pair in list.into_inner() {
                values.push(parse_word_value(int_pair.as_str(), line_number)?);
            }
            Ok(Directive::Data(values))
        }
        Rule::string_directive => {
            let quoted = inner
                .into_inner()
                .next()
                .expect("string directive has a quoted string")
                .as_str();
            let content = &quoted[1..quoted.len() - 1];
            Ok(Directive::Str(content.to_string()))
        }
        Rule::mat_directive => {
            let mut parts = inner.into_inner();
            let rows = parse_bracket_dim(parts.next().unwrap().as_str());
            let cols = parse_bracket_dim(parts.next().unwrap().as_str());
            let mut values = Vec::new();
            if let Some(list) = parts.next() {
                for int_pair in list.into_inner() {
                    values.push(parse_word_value(int_pair.as_str(), line_number)?);
                }
            }
            Ok(Directive::Mat { rows, cols, values })
        }
        Rule::entry_directive => {
            let name = inner.into_inner().next().unwrap().as_str().to_string();
            validate_label_name(&name, line_number)?;
            Ok(Directive::Entry(name))
        }
        Rule::extern_directive => {
            let name = inner.into_inner().next().unwrap().as_str().to_string();
            validate_label_name(&name, line_number)?;
            Ok(Directive::Extern(name))
        }
        _ => unreachable!("directive grammar only admits the five alternatives above"),
    }
}

/// Parses one `.data`/`.mat` integer literal, rejecting anything that
/// cannot be represented as a 10-bit two's-complement machine word (§4.5/§8:
/// `.data -513` is out of range).
fn parse_word_value(text: &str, line_number: usize) -> Result<i32, AssemblyError> {
    let value: i32 = text.parse().map_err(|_| AssemblyError::SyntaxError {
        line: line_number,
        reason: format!("'{text}' is not a valid integer"),
    })?;
    if !(-512..=511).contains(&value) {
        return Err(AssemblyError::SyntaxError {
            line: line_number,
            reason: format!("value {value} is out of range [-512, 511]"),
        });
    }
    Ok(value)
}

fn parse_bracket_dim(text: &str) -> u32 {
    text[1..text.len() - 1].parse().unwrap()
}
