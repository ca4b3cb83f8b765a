//! Operator spellings
//!
//! Maps grammar token kinds to the literal text the printer emits.

use crate::ast::types::{
    ArithBinaryOperator, ArithUnaryOperator, BinaryCommandOperator, CaseTerminator,
    ExpansionOperator, ProcessDirection, QuoteKind, RedirectionOperator,
};

pub fn redirection_op(op: RedirectionOperator) -> &'static str {
    match op {
        RedirectionOperator::Less => "<",
        RedirectionOperator::Great => ">",
        RedirectionOperator::DGreat => ">>",
        RedirectionOperator::GreatAnd => ">&",
        RedirectionOperator::LessAnd => "<&",
        RedirectionOperator::LessGreat => "<>",
        RedirectionOperator::Clobber => ">|",
        RedirectionOperator::AndGreat => "&>",
        RedirectionOperator::AndDGreat => "&>>",
        RedirectionOperator::TLess => "<<<",
        RedirectionOperator::DLess => "<<",
        RedirectionOperator::DLessDash => "<<-",
    }
}

pub fn binary_command_op(op: BinaryCommandOperator) -> &'static str {
    match op {
        BinaryCommandOperator::Pipe => "|",
        BinaryCommandOperator::PipeAll => "|&",
        BinaryCommandOperator::And => "&&",
        BinaryCommandOperator::Or => "||",
    }
}

pub fn case_terminator_op(op: CaseTerminator) -> &'static str {
    match op {
        CaseTerminator::DoubleSemi => ";;",
        CaseTerminator::SemiAnd => ";&",
        CaseTerminator::SemiSemiAnd => ";;&",
    }
}

/// Opening and closing delimiters of a quoting form
pub fn quote_delims(quote: QuoteKind) -> (&'static str, &'static str) {
    match quote {
        QuoteKind::Double => ("\"", "\""),
        QuoteKind::DollarSingle => ("$'", "'"),
        QuoteKind::DollarDouble => ("$\"", "\""),
    }
}

pub fn expansion_op(op: ExpansionOperator) -> &'static str {
    match op {
        ExpansionOperator::Substring => ":",
        ExpansionOperator::Alternative => "+",
        ExpansionOperator::AlternativeUnset => ":+",
        ExpansionOperator::Default => "-",
        ExpansionOperator::DefaultUnset => ":-",
        ExpansionOperator::Error => "?",
        ExpansionOperator::ErrorUnset => ":?",
        ExpansionOperator::Assign => "=",
        ExpansionOperator::AssignUnset => ":=",
        ExpansionOperator::RemoveSuffix => "%",
        ExpansionOperator::RemoveLargeSuffix => "%%",
        ExpansionOperator::RemovePrefix => "#",
        ExpansionOperator::RemoveLargePrefix => "##",
    }
}

pub fn process_substitution_op(direction: ProcessDirection) -> &'static str {
    match direction {
        ProcessDirection::Input => "<(",
        ProcessDirection::Output => ">(",
    }
}

pub fn arith_binary_op(op: ArithBinaryOperator) -> &'static str {
    use ArithBinaryOperator as Op;
    match op {
        Op::Add => "+",
        Op::Sub => "-",
        Op::Mul => "*",
        Op::Div => "/",
        Op::Mod => "%",
        Op::Pow => "**",
        Op::LShift => "<<",
        Op::RShift => ">>",
        Op::Lt => "<",
        Op::Le => "<=",
        Op::Gt => ">",
        Op::Ge => ">=",
        Op::Eq => "==",
        Op::Ne => "!=",
        Op::BitAnd => "&",
        Op::BitOr => "|",
        Op::BitXor => "^",
        Op::LogAnd => "&&",
        Op::LogOr => "||",
        Op::Assign => "=",
        Op::AddAssign => "+=",
        Op::SubAssign => "-=",
        Op::MulAssign => "*=",
        Op::DivAssign => "/=",
        Op::ModAssign => "%=",
        Op::LShiftAssign => "<<=",
        Op::RShiftAssign => ">>=",
        Op::AndAssign => "&=",
        Op::OrAssign => "|=",
        Op::XorAssign => "^=",
        Op::Quest => "?",
        Op::Colon => ":",
        Op::Comma => ",",
    }
}

pub fn arith_unary_op(op: ArithUnaryOperator) -> &'static str {
    match op {
        ArithUnaryOperator::Pos => "+",
        ArithUnaryOperator::Neg => "-",
        ArithUnaryOperator::Not => "!",
        ArithUnaryOperator::Inc => "++",
        ArithUnaryOperator::Dec => "--",
    }
}
