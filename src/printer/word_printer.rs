//! Word and Expression Printer
//!
//! Prints words part by part, with no separators between the parts of one
//! word, and arithmetic expressions in spaced or compact form:
//! - `$((a + b))`, `((x > 1))`: spaced
//! - `let a=b+1`, `for ((i=0; i<n; i++))`: compact

use crate::ast::types::{
    ArithBinaryOperator, ArithExpr, CommandNode, ParameterExpansionPart, StatementNode, WordNode,
    WordPart,
};
use crate::printer::operators::{
    arith_binary_op, arith_unary_op, expansion_op, process_substitution_op, quote_delims,
};
use crate::printer::printer::Printer;

impl<'a, 'w> Printer<'a, 'w> {
    pub(super) fn word(&mut self, word: &'a WordNode) {
        for part in &word.parts {
            self.word_part(part);
        }
    }

    pub(super) fn spaced_word(&mut self, word: &'a WordNode) {
        if self.want_space {
            self.space();
        }
        self.word(word);
    }

    /// Word with its quoting removed, as used for heredoc terminators:
    /// `'EOF'`, `"EOF"` and `\EOF` all print as `EOF`.
    pub(super) fn unquoted_word(&mut self, word: &'a WordNode) {
        for part in &word.parts {
            match part {
                WordPart::SingleQuoted(sq) => self.str(&sq.value),
                WordPart::Quoted(q) => {
                    for inner in &q.parts {
                        self.word_part(inner);
                    }
                }
                WordPart::Literal(lit) => {
                    let value = lit.value.strip_prefix('\\').unwrap_or(&lit.value);
                    self.str(value);
                }
                other => self.word_part(other),
            }
        }
    }

    /// Words separated by spaces; a word on a later original line goes on a
    /// new line one level deeper, after ` \` when `need_backslash`.
    pub(super) fn word_join(&mut self, words: &'a [WordNode], need_backslash: bool) {
        let mut any_newline = false;
        for word in words {
            let line = self.position(word.position).line;
            if self.cur_line > 0 && line > self.cur_line {
                if need_backslash {
                    self.bslash_newline();
                } else {
                    self.byte(b'\n');
                    self.cur_line += 1;
                }
                if !any_newline {
                    self.inc_level();
                    any_newline = true;
                }
                self.indent();
            } else if self.want_space {
                self.space();
            }
            self.word(word);
        }
        if any_newline {
            self.dec_level();
        }
    }

    pub(super) fn word_part(&mut self, part: &'a WordPart) {
        match part {
            WordPart::Literal(lit) => self.str(&lit.value),
            WordPart::SingleQuoted(sq) => {
                self.byte(b'\'');
                self.str(&sq.value);
                self.cur_line += sq.value.matches('\n').count();
                self.byte(b'\'');
            }
            WordPart::Quoted(q) => {
                let (open, close) = quote_delims(q.quote);
                self.str(open);
                for inner in &q.parts {
                    self.word_part(inner);
                    if let WordPart::Literal(lit) = inner {
                        self.cur_line += lit.value.matches('\n').count();
                    }
                }
                self.str(close);
            }
            WordPart::CommandSubstitution(cs) => {
                self.want_space = false;
                self.str(if cs.backquotes { "`" } else { "$(" });
                if starts_with_subshell(&cs.statements) {
                    self.space();
                }
                self.nested_stmts(&cs.statements);
                let right = self.position(cs.right);
                if cs.backquotes {
                    self.want_space = false;
                    self.sep_tok("`", right);
                } else {
                    self.sep_tok(")", right);
                }
            }
            WordPart::ParameterExpansion(pe) => self.param_expansion(pe),
            WordPart::ArithmeticExpansion(ae) => {
                self.str("$((");
                self.arithm(&ae.expression, false);
                self.str("))");
            }
            WordPart::Array(arr) => {
                self.want_space = false;
                self.byte(b'(');
                self.word_join(&arr.items, false);
                let rparen = self.position(arr.rparen);
                self.sep_tok(")", rparen);
            }
            WordPart::ProcessSubstitution(ps) => {
                // keep `< <(...)` from merging into `<<(`
                if self.want_space {
                    self.space();
                }
                self.str(process_substitution_op(ps.direction));
                self.nested_stmts(&ps.statements);
                self.byte(b')');
            }
        }
        self.want_space = true;
    }

    fn param_expansion(&mut self, pe: &'a ParameterExpansionPart) {
        if pe.short {
            self.byte(b'$');
            self.str(&pe.parameter);
            return;
        }
        self.str("${");
        if pe.length {
            self.byte(b'#');
        }
        self.str(&pe.parameter);
        if let Some(index) = &pe.index {
            self.byte(b'[');
            self.word(index);
            self.byte(b']');
        }
        if let Some(repl) = &pe.replacement {
            if repl.all {
                self.byte(b'/');
            }
            self.byte(b'/');
            self.word(&repl.original);
            self.byte(b'/');
            self.word(&repl.with);
        } else if let Some(op) = &pe.operation {
            self.str(expansion_op(op.operator));
            self.word(&op.word);
        }
        self.byte(b'}');
    }

    pub(super) fn arithm(&mut self, expr: &'a ArithExpr, compact: bool) {
        self.want_space = false;
        match expr {
            ArithExpr::Word(word) => self.spaced_word(word),
            ArithExpr::Binary(bin) => {
                if compact {
                    self.arithm(&bin.left, true);
                    self.str(arith_binary_op(bin.operator));
                    self.arithm(&bin.right, true);
                } else {
                    self.arithm(&bin.left, false);
                    if bin.operator != ArithBinaryOperator::Comma {
                        self.space();
                    }
                    self.str(arith_binary_op(bin.operator));
                    self.space();
                    self.arithm(&bin.right, false);
                }
            }
            ArithExpr::Unary(un) => {
                if un.post {
                    self.arithm(&un.operand, compact);
                    self.str(arith_unary_op(un.operator));
                } else {
                    self.str(arith_unary_op(un.operator));
                    self.arithm(&un.operand, compact);
                }
            }
            ArithExpr::Paren(paren) => {
                self.byte(b'(');
                self.arithm(&paren.expression, false);
                self.byte(b')');
            }
        }
    }
}

/// A leading `(` right after `$(` or `(` would read as `((`.
pub(super) fn starts_with_subshell(stmts: &[StatementNode]) -> bool {
    matches!(
        stmts.first().and_then(|s| s.command.as_ref()),
        Some(CommandNode::Subshell(_))
    )
}
