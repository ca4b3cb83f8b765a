//! just-bash-fmt - A pretty-printer for bash syntax trees
//!
//! This library takes a parsed script, with its comments and the byte
//! offsets of every node, and writes it back out as canonically formatted
//! source text.

pub mod ast;
pub mod printer;

pub use ast::position::{LineIndex, PositionResolver};
pub use ast::types::*;
pub use printer::{
    fprint, print, print_to_string, statement_width, unquoted_word_str, word_str, ConfigError,
    Indentation, PrintConfig, PrintError,
};
