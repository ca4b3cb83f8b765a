//! Statement and Command Printer
//!
//! The recursive dispatcher: statement lists, statements, every command
//! variant, assignments and redirections.

use crate::ast::types::{
    AssignmentNode, CaseNode, CommandNode, CondNode, LoopNode, RedirectionNode, StatementNode,
};
use crate::printer::operators::{binary_command_op, case_terminator_op, redirection_op};
use crate::printer::printer::Printer;
use crate::printer::statement_width;
use crate::printer::word_printer::starts_with_subshell;

impl<'a, 'w> Printer<'a, 'w> {
    /// Print a statement list. Returns whether it was laid out over
    /// separate lines; a lone statement on the current line stays inline.
    pub(crate) fn stmts(&mut self, stmts: &'a [StatementNode]) -> bool {
        let Some(first) = stmts.first() else {
            return false;
        };
        let pos = self.position(first.position);
        if stmts.len() == 1 && pos.line == self.cur_line {
            self.did_separate(pos);
            self.stmt(first);
            return false;
        }
        self.stmt_lines(stmts);
        true
    }

    /// Every statement on its own line, with aligned inline comments.
    fn stmt_lines(&mut self, stmts: &'a [StatementNode]) {
        let mut inline_indent = 0;
        let mut last_line = match stmts.first() {
            Some(first) => self.position(first.position).line,
            None => return,
        };
        for (i, stmt) in stmts.iter().enumerate() {
            let pos = self.position(stmt.position);
            self.always_separate(pos);
            self.stmt(stmt);
            if pos.line > last_line + 1 {
                inline_indent = 0;
            }
            last_line = pos.line;
            if !self.has_inline(pos) {
                inline_indent = 0;
                self.want_spaces = 0;
                continue;
            }
            if inline_indent == 0 {
                inline_indent = self.inline_run_width(&stmts[i..]);
            }
            let width = statement_width(self.lines, self.config, stmt);
            self.want_spaces = inline_indent.saturating_sub(width);
        }
        self.want_newline = true;
    }

    /// Widest statement among the run of adjacent lines that all carry an
    /// inline comment, starting at `run[0]`.
    fn inline_run_width(&self, run: &'a [StatementNode]) -> usize {
        let mut widest = 0;
        let mut last_line = match run.first() {
            Some(first) => self.position(first.position).line,
            None => return 0,
        };
        for stmt in run {
            let pos = self.position(stmt.position);
            if !self.has_inline(pos) || pos.line > last_line + 1 {
                break;
            }
            widest = widest.max(statement_width(self.lines, self.config, stmt));
            last_line = pos.line;
        }
        widest
    }

    pub(super) fn nested_stmts(&mut self, stmts: &'a [StatementNode]) -> bool {
        self.inc_level();
        let separated = self.stmts(stmts);
        self.dec_level();
        separated
    }

    pub(crate) fn stmt(&mut self, stmt: &'a StatementNode) {
        if stmt.negated {
            self.spaced_rsrv("!");
        }
        self.assigns(&stmt.assignments);
        let start_redirs = match &stmt.command {
            Some(command) => self.command(command, &stmt.redirections),
            None => 0,
        };
        let mut any_newline = false;
        for redirection in &stmt.redirections[start_redirs..] {
            let pos = self.position(redirection.op_pos);
            if self.cur_line > 0 && pos.line > self.cur_line {
                self.bslash_newline();
                if !any_newline {
                    self.inc_level();
                    any_newline = true;
                }
                self.indent();
            }
            self.did_separate(pos);
            self.redirection(redirection);
            if redirection.is_heredoc() {
                self.heredocs.push(redirection);
            }
        }
        if any_newline {
            self.dec_level();
        }
        if stmt.background {
            self.str(" &");
        }
    }

    fn redirection(&mut self, redirection: &'a RedirectionNode) {
        if self.want_space {
            self.space();
        }
        if let Some(fd) = &redirection.fd {
            self.str(fd);
        }
        self.str(redirection_op(redirection.operator));
        self.want_space = true;
        self.word(&redirection.target);
    }

    fn assigns(&mut self, assigns: &'a [AssignmentNode]) {
        let mut any_newline = false;
        for assign in assigns {
            let line = self.position(assign.position).line;
            if self.cur_line > 0 && line > self.cur_line {
                self.bslash_newline();
                if !any_newline {
                    self.inc_level();
                    any_newline = true;
                }
                self.indent();
            } else if self.want_space {
                self.space();
            }
            if let Some(name) = &assign.name {
                self.str(name);
                self.token(if assign.append { "+=" } else { "=" }, true);
            }
            self.word(&assign.value);
        }
        if any_newline {
            self.dec_level();
        }
    }

    /// Print one command. Returns how many of the statement's redirections
    /// were already printed inline after the command name.
    fn command(&mut self, command: &'a CommandNode, redirs: &'a [RedirectionNode]) -> usize {
        let mut start_redirs = 0;
        match command {
            CommandNode::Call(call) => {
                if call.args.len() <= 1 {
                    self.word_join(&call.args, true);
                    return 0;
                }
                self.word_join(&call.args[..1], true);
                let second = call.args[1].position;
                for redirection in redirs {
                    if redirection.op_pos > second || redirection.is_heredoc() {
                        break;
                    }
                    self.redirection(redirection);
                    start_redirs += 1;
                }
                self.word_join(&call.args[1..], true);
            }
            CommandNode::Block(block) => {
                self.spaced_rsrv("{");
                self.nested_stmts(&block.statements);
                self.semi_rsrv("}", block.rbrace, true);
            }
            CommandNode::If(node) => {
                self.spaced_rsrv("if");
                self.cond(&node.condition);
                self.semi_or_newline("then", node.then_pos);
                self.nested_stmts(&node.then_body);
                for elif in &node.elifs {
                    self.semi_rsrv("elif", elif.elif_pos, true);
                    self.cond(&elif.condition);
                    self.semi_or_newline("then", elif.then_pos);
                    self.nested_stmts(&elif.then_body);
                }
                match &node.else_clause {
                    Some(else_clause) if !else_clause.body.is_empty() => {
                        self.semi_rsrv("else", else_clause.position, true);
                        self.nested_stmts(&else_clause.body);
                    }
                    Some(else_clause) => {
                        self.cur_line = self.position(else_clause.position).line;
                    }
                    None => {}
                }
                self.semi_rsrv("fi", node.fi, true);
            }
            CommandNode::Subshell(sub) => {
                self.spaced_tok("(", false);
                if starts_with_subshell(&sub.statements) {
                    self.space();
                }
                self.nested_stmts(&sub.statements);
                let rparen = self.position(sub.rparen);
                self.sep_tok(")", rparen);
            }
            CommandNode::While(node) => {
                self.spaced_rsrv(if node.until { "until" } else { "while" });
                self.cond(&node.condition);
                self.semi_or_newline("do", node.do_pos);
                self.nested_stmts(&node.body);
                self.semi_rsrv("done", node.done, true);
            }
            CommandNode::For(node) => {
                self.spaced_rsrv("for ");
                self.loop_header(&node.header);
                self.semi_or_newline("do", node.do_pos);
                self.nested_stmts(&node.body);
                self.semi_rsrv("done", node.done, true);
            }
            CommandNode::Binary(bin) => {
                self.stmt(&bin.left);
                let indent = !self.nested_binary;
                if indent {
                    self.inc_level();
                }
                self.nested_binary = matches!(bin.right.command, Some(CommandNode::Binary(_)));
                let right_line = self.position(bin.right.position).line;
                // a pending heredoc must follow this line, so no continuation
                if self.heredocs.is_empty() && right_line > self.cur_line {
                    self.bslash_newline();
                    self.indent();
                }
                self.cur_line = right_line;
                self.spaced_tok(binary_command_op(bin.operator), true);
                self.stmt(&bin.right);
                if indent {
                    self.dec_level();
                }
                self.nested_binary = false;
            }
            CommandNode::FunctionDecl(func) => {
                if func.bash_style {
                    self.spaced_rsrv("function");
                }
                if self.want_space {
                    self.space();
                }
                self.str(&func.name);
                self.rsrv("()");
                self.stmt(&func.body);
            }
            CommandNode::Case(case) => self.case_clause(case),
            CommandNode::Decl(decl) => {
                self.spaced_rsrv(if decl.local { "local" } else { "declare" });
                for option in &decl.options {
                    self.spaced_word(option);
                }
                self.assigns(&decl.assignments);
            }
            CommandNode::Eval(eval) => {
                self.spaced_rsrv("eval");
                if let Some(stmt) = &eval.statement {
                    self.stmt(stmt);
                }
            }
            CommandNode::Let(node) => {
                self.spaced_rsrv("let");
                for expr in &node.expressions {
                    self.space();
                    self.arithm(expr, true);
                }
            }
        }
        start_redirs
    }

    /// Patterns sit at the `case` level with the body and terminator one
    /// level deeper, each on its own line:
    ///
    /// ```text
    /// case $x in
    /// a | b)
    ///     foo
    ///     ;;
    /// esac
    /// ```
    fn case_clause(&mut self, case: &'a CaseNode) {
        self.spaced_rsrv("case ");
        self.word(&case.word);
        self.rsrv(" in");
        if case.items.is_empty() {
            let esac = self.position(case.esac);
            if !self.did_separate(esac) && self.want_space {
                self.space();
            }
            self.rsrv("esac");
            return;
        }
        for item in &case.items {
            let first = item
                .patterns
                .first()
                .map(|w| w.position)
                .unwrap_or(item.terminator_pos);
            let pattern_pos = self.position(first);
            self.always_separate(pattern_pos);
            for (i, pattern) in item.patterns.iter().enumerate() {
                if i > 0 {
                    self.spaced_tok("|", true);
                }
                self.spaced_word(pattern);
            }
            self.byte(b')');

            self.inc_level();
            self.stmt_lines(&item.body);
            let terminator = self.position(item.terminator_pos);
            self.always_separate(terminator);
            self.rsrv(case_terminator_op(item.terminator));
            self.dec_level();
        }
        let esac = self.position(case.esac);
        self.always_separate(esac);
        self.rsrv("esac");
    }

    fn cond(&mut self, cond: &'a CondNode) {
        match cond {
            CondNode::Statements(stmts) => {
                self.nested_stmts(stmts);
            }
            CondNode::Arithmetic(expr) => {
                self.spaced_tok("((", false);
                self.arithm(expr, false);
                self.str("))");
            }
        }
    }

    fn loop_header(&mut self, header: &'a LoopNode) {
        match header {
            LoopNode::WordIter(iter) => {
                self.str(&iter.name);
                if !iter.items.is_empty() {
                    self.rsrv(" in");
                    self.word_join(&iter.items, true);
                }
            }
            LoopNode::CStyle(c) => {
                self.str("((");
                if let Some(init) = &c.init {
                    self.arithm(init, true);
                }
                self.str("; ");
                if let Some(condition) = &c.condition {
                    self.arithm(condition, true);
                }
                self.str("; ");
                if let Some(post) = &c.post {
                    self.arithm(post, true);
                }
                self.str("))");
            }
        }
    }
}
