//! Mark characters of the cscope symbol section.
//!
//! A mark is a single reserved byte at the start of a symbol-section line that
//! says what the line is: a file header (`@`) or the syntactic role of the
//! symbol that follows.

use std::fmt;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// The closed set of mark characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Mark {
    File,
    FunctionDefinition,
    FunctionCall,
    FunctionEnd,
    Define,
    DefineEnd,
    Include,
    Assignment,
    AggregateEnd,
    ClassDefinition,
    EnumDefinition,
    GlobalDefinition,
    LocalDefinition,
    MemberDefinition,
    ParameterDefinition,
    StructDefinition,
    TypedefDefinition,
    UnionDefinition,
}

impl Mark {
    pub fn from_byte(b: u8) -> Option<Mark> {
        Some(match b {
            b'@' => Mark::File,
            b'$' => Mark::FunctionDefinition,
            b'`' => Mark::FunctionCall,
            b'}' => Mark::FunctionEnd,
            b'#' => Mark::Define,
            b')' => Mark::DefineEnd,
            b'~' => Mark::Include,
            b'=' => Mark::Assignment,
            b';' => Mark::AggregateEnd,
            b'c' => Mark::ClassDefinition,
            b'e' => Mark::EnumDefinition,
            b'g' => Mark::GlobalDefinition,
            b'l' => Mark::LocalDefinition,
            b'm' => Mark::MemberDefinition,
            b'p' => Mark::ParameterDefinition,
            b's' => Mark::StructDefinition,
            b't' => Mark::TypedefDefinition,
            b'u' => Mark::UnionDefinition,
            _ => return None,
        })
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Mark::File => b'@',
            Mark::FunctionDefinition => b'$',
            Mark::FunctionCall => b'`',
            Mark::FunctionEnd => b'}',
            Mark::Define => b'#',
            Mark::DefineEnd => b')',
            Mark::Include => b'~',
            Mark::Assignment => b'=',
            Mark::AggregateEnd => b';',
            Mark::ClassDefinition => b'c',
            Mark::EnumDefinition => b'e',
            Mark::GlobalDefinition => b'g',
            Mark::LocalDefinition => b'l',
            Mark::MemberDefinition => b'm',
            Mark::ParameterDefinition => b'p',
            Mark::StructDefinition => b's',
            Mark::TypedefDefinition => b't',
            Mark::UnionDefinition => b'u',
        }
    }

    /// Human-readable description, as cscope's own documentation words it.
    pub fn describe(&self) -> &'static str {
        match self {
            Mark::File => "file",
            Mark::FunctionDefinition => "function definition",
            Mark::FunctionCall => "function call",
            Mark::FunctionEnd => "function end",
            Mark::Define => "#define",
            Mark::DefineEnd => "#define end",
            Mark::Include => "#include",
            Mark::Assignment => "direct assignment, increment, or decrement",
            Mark::AggregateEnd => "enum/struct/union definition end",
            Mark::ClassDefinition => "class definition",
            Mark::EnumDefinition => "enum definition",
            Mark::GlobalDefinition => "other global definition",
            Mark::LocalDefinition => "function/block local definition",
            Mark::MemberDefinition => "global enum/struct/union member definition",
            Mark::ParameterDefinition => "function parameter definition",
            Mark::StructDefinition => "struct definition",
            Mark::TypedefDefinition => "typedef definition",
            Mark::UnionDefinition => "union definition",
        }
    }

    /// Letter marks collide with the first letter of ordinary names.
    pub fn is_letter(&self) -> bool {
        self.as_byte().is_ascii_alphabetic()
    }

    /// Every mark byte, in format order.
    pub fn all_bytes() -> Vec<u8> {
        Mark::iter().map(|m| m.as_byte()).collect()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Membership test for the mark set.
pub fn is_mark(b: u8) -> bool {
    Mark::from_byte(b).is_some()
}
