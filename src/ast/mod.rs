//! Abstract Syntax Tree (AST) Types for Bash
//!
//! The tree handed to the printer, plus the position service that maps its
//! byte offsets to lines.
//!
//! Architecture:
//!   Parser (external) → AST + LineIndex → Printer → canonical source text

pub mod position;
pub mod types;
