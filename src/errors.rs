use thiserror::Error;

/// The full error taxonomy for one source file's assembly run.
///
/// Every variant carries the one-based source line it was raised on, where
/// one exists; `MemoryAllocation` and `FileIO` are the only variants that can
/// occur outside of a specific line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("line {line}: line exceeds the maximum of {max} content characters")]
    LineTooLong { line: usize, max: usize },

    #[error("line {line}: invalid macro name '{name}'")]
    InvalidMacroName { line: usize, name: String },

    #[error("line {line}: a label cannot appear on a macro definition or macro call line")]
    LabelOnMacroLine { line: usize },

    #[error("line {line}: extraneous text after '{token}'")]
    ExtraneousText { line: usize, token: String },

    #[error("memory allocation failed: {reason}")]
    MemoryAllocation { reason: String },

    #[error("I/O error on {path}: {reason}")]
    FileIO { path: String, reason: String },

    #[error("line {line}: macro '{name}' was never closed with mcroend")]
    MacroNotClosed { line: usize, name: String },

    #[error("line {line}: duplicate macro name '{name}'")]
    DuplicateMacroName { line: usize, name: String },

    #[error("line {line}: {reason}")]
    MacroError { line: usize, reason: String },

    #[error("line {line}: invalid label name '{name}'")]
    InvalidLabelName { line: usize, name: String },

    #[error("line {line}: '{name}' is a reserved word and cannot be used as a label or macro name")]
    ReservedWord { line: usize, name: String },

    #[error("line {line}: duplicate definition of label '{name}'")]
    DuplicateLabel { line: usize, name: String },

    #[error("line {line}: syntax error: {reason}")]
    SyntaxError { line: usize, reason: String },

    #[error("line {line}: unknown instruction '{name}'")]
    UnknownInstruction { line: usize, name: String },

    #[error("line {line}: {mnemonic} expects {expected} operand(s), found {found}")]
    OperandCountMismatch {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {role} operand for '{mnemonic}'")]
    InvalidOperandType {
        line: usize,
        mnemonic: String,
        role: &'static str,
    },

    #[error("line {line}: undefined symbol '{name}'")]
    UndefinedSymbol { line: usize, name: String },

    #[error("line {line}: external symbol '{name}' cannot be marked as an entry")]
    EntryOnExtern { line: usize, name: String },

    #[error("line {line}: memory overflow: address {address} exceeds the 256-word machine limit")]
    MemoryOverflow { line: usize, address: i32 },
}

impl AssemblyError {
    /// The one-based source line this error was raised on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblyError::LineTooLong { line, .. }
            | AssemblyError::InvalidMacroName { line, .. }
            | AssemblyError::LabelOnMacroLine { line }
            | AssemblyError::ExtraneousText { line, .. }
            | AssemblyError::MacroNotClosed { line, .. }
            | AssemblyError::DuplicateMacroName { line, .. }
            | AssemblyError::MacroError { line, .. }
            | AssemblyError::InvalidLabelName { line, .. }
            | AssemblyError::ReservedWord { line, .. }
            | AssemblyError::DuplicateLabel { line, .. }
            | AssemblyError::SyntaxError { line, .. }
            | AssemblyError::UnknownInstruction { line, .. }
            | AssemblyError::OperandCountMismatch { line, .. }
            | AssemblyError::InvalidOperandType { line, .. }
            | AssemblyError::UndefinedSymbol { line, .. }
            | AssemblyError::EntryOnExtern { line, .. }
            | AssemblyError::MemoryOverflow { line, .. } => Some(*line),
            AssemblyError::MemoryAllocation { .. } | AssemblyError::FileIO { .. } => None,
        }
    }
}

/// A batch of recoverable errors collected while scanning one file.
///
/// Parsing errors never abort a run early: the offending line is recorded
/// here and the pipeline keeps scanning so later errors surface in the same
/// pass. A non-empty `Diagnostics` means the caller must not emit `.ob`,
/// `.ent`, or `.ext` artifacts for this file.
pub type Diagnostics = Vec<AssemblyError>;
