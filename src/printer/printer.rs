//! Printer state
//!
//! One `Printer` value is the whole layout cursor for a single print: the
//! indentation stack, the original line currently being printed, the
//! pending-space/newline flags, the comment backlog and the heredoc queue.
//! It is created per print and dropped afterwards.
//!
//! Line tracking is in *original* lines: `cur_line` is the source line of
//! the last node printed, and every separator decision compares it against
//! the line of the next node.

use crate::ast::position::PositionResolver;
use crate::ast::types::{CommentNode, Pos, Position};
use crate::printer::heredoc::HeredocQueue;
use crate::printer::sink::Sink;
use crate::printer::types::{IndentUnit, PrintConfig, PrintError};

pub(crate) struct Printer<'a, 'w> {
    pub(super) out: Sink<'w>,
    pub(super) lines: &'a dyn PositionResolver,
    pub(super) config: PrintConfig,

    /// Set while printing the right side of a binary whose right side is
    /// itself a binary, so chains share one indentation level
    pub(super) nested_binary: bool,

    pub(super) want_space: bool,
    pub(super) want_newline: bool,
    /// Padding before the next inline comment
    pub(super) want_spaces: usize,

    /// Original line currently being printed; 0 before anything is printed
    pub(super) cur_line: usize,
    /// Level used by the last indent that was written
    pub(super) last_level: usize,
    pub(super) level: usize,
    /// Whether each open indentation scope actually bumped `level`
    pub(super) level_incs: Vec<bool>,
    pub(super) scopes_opened: usize,
    pub(super) scopes_closed: usize,

    /// Comments not printed yet, ascending by position
    pub(super) comments: &'a [CommentNode],
    pub(super) heredocs: HeredocQueue<'a>,
}

impl<'a, 'w> Printer<'a, 'w> {
    pub fn new(out: Sink<'w>, lines: &'a dyn PositionResolver, config: PrintConfig) -> Self {
        Self {
            out,
            lines,
            config,
            nested_binary: false,
            want_space: false,
            want_newline: false,
            want_spaces: 0,
            cur_line: 0,
            last_level: 0,
            level: 0,
            level_incs: Vec::new(),
            scopes_opened: 0,
            scopes_closed: 0,
            comments: &[],
            heredocs: HeredocQueue::default(),
        }
    }

    pub fn with_comments(mut self, comments: &'a [CommentNode]) -> Self {
        self.comments = comments;
        self
    }

    /// Flush the sink and report the first write error, if any.
    pub fn finish(self) -> Result<(), PrintError> {
        debug_assert!(self.level_incs.is_empty(), "unbalanced indentation scopes");
        debug_assert!(self.heredocs.is_empty(), "heredocs left in queue");
        log::debug!(
            "printer finished: {} indentation scopes opened, {} closed",
            self.scopes_opened,
            self.scopes_closed
        );
        self.out.finish()?;
        Ok(())
    }

    pub(super) fn position(&self, pos: Pos) -> Position {
        self.lines.position(pos)
    }

    // -------------------------------------------------------------------------
    // Raw output
    // -------------------------------------------------------------------------

    pub(super) fn str(&mut self, s: &str) {
        self.out.write_str(s);
    }

    pub(super) fn byte(&mut self, b: u8) {
        self.out.write_byte(b);
    }

    pub(super) fn space(&mut self) {
        self.out.write_byte(b' ');
        self.want_space = false;
    }

    pub(super) fn spaces(&mut self, n: usize) {
        for _ in 0..n {
            self.out.write_byte(b' ');
        }
        self.want_space = false;
    }

    fn tabs(&mut self, n: usize) {
        for _ in 0..n {
            self.out.write_byte(b'\t');
        }
        self.want_space = false;
    }

    /// ` \` line continuation
    pub(super) fn bslash_newline(&mut self) {
        self.out.write_str(" \\\n");
        self.want_space = false;
        self.cur_line += 1;
    }

    pub(super) fn token(&mut self, s: &str, space_after: bool) {
        self.want_space = space_after;
        self.out.write_str(s);
    }

    /// Reserved word that wants a space after it
    pub(super) fn rsrv(&mut self, s: &str) {
        self.out.write_str(s);
        self.want_space = true;
    }

    pub(super) fn spaced_rsrv(&mut self, s: &str) {
        if self.want_space {
            self.space();
        }
        self.out.write_str(s);
        self.want_space = true;
    }

    pub(super) fn spaced_tok(&mut self, s: &str, space_after: bool) {
        if self.want_space {
            self.space();
        }
        self.want_space = space_after;
        self.out.write_str(s);
    }

    // -------------------------------------------------------------------------
    // Indentation
    // -------------------------------------------------------------------------

    /// Open an indentation scope. The level only grows if no outer scope
    /// has already bumped it without an indent being written since, so
    /// several constructs opening on one line indent once.
    pub(super) fn inc_level(&mut self) {
        let mut inc = false;
        if self.level <= self.last_level {
            self.level += 1;
            inc = true;
        } else if let Some(last) = self.level_incs.last_mut() {
            if *last {
                *last = false;
                inc = true;
            }
        }
        self.level_incs.push(inc);
        self.scopes_opened += 1;
    }

    pub(super) fn dec_level(&mut self) {
        if let Some(inc) = self.level_incs.pop() {
            if inc {
                self.level -= 1;
            }
            self.scopes_closed += 1;
        }
    }

    pub(super) fn indent(&mut self) {
        self.last_level = self.level;
        if self.level == 0 {
            return;
        }
        match self.config.indent_unit() {
            IndentUnit::Tab => self.tabs(self.level),
            IndentUnit::Spaces(n) => self.spaces(n * self.level),
        }
    }

    // -------------------------------------------------------------------------
    // Newlines and separators
    // -------------------------------------------------------------------------

    /// Write one newline, then every pending heredoc body.
    pub(super) fn newline(&mut self) {
        self.want_newline = false;
        self.out.write_byte(b'\n');
        self.want_space = false;
        if self.heredocs.is_empty() {
            return;
        }
        log::trace!("flushing {} heredoc(s) after line {}", self.heredocs.len(), self.cur_line);
        for redirection in self.heredocs.take() {
            if let Some(doc) = &redirection.heredoc {
                self.str(&doc.content);
                self.cur_line += doc.content.matches('\n').count();
            }
            self.unquoted_word(&redirection.target);
            self.out.write_byte(b'\n');
            self.cur_line += 1;
            self.want_space = false;
        }
    }

    /// Newline plus indentation, keeping at most one blank line when the
    /// next node sits further down in the source.
    pub(super) fn newlines(&mut self, pos: Position) {
        self.newline();
        if pos.line > self.cur_line + 1 {
            self.out.write_byte(b'\n');
        }
        self.indent();
        self.cur_line = pos.line;
    }

    pub(super) fn always_separate(&mut self, pos: Position) {
        self.comments_up_to(pos.line);
        if self.cur_line > 0 {
            self.newlines(pos);
        } else {
            self.cur_line = pos.line;
        }
    }

    /// Start a new line if the node at `pos` is on a later original line
    /// (or a statement list asked for one). Returns whether it separated.
    pub(super) fn did_separate(&mut self, pos: Position) -> bool {
        self.comments_up_to(pos.line);
        if self.want_newline || (self.cur_line > 0 && pos.line > self.cur_line) {
            self.newlines(pos);
            return true;
        }
        if self.cur_line == 0 {
            self.cur_line = pos.line;
            return true;
        }
        self.cur_line = pos.line;
        false
    }

    /// `then` / `do`: after a semicolon on the same line, or on its own line
    /// when the condition list ended with a newline.
    pub(super) fn semi_or_newline(&mut self, s: &str, pos: Pos) {
        if self.want_newline {
            self.newline();
            self.indent();
        } else {
            self.str("; ");
        }
        self.str(s);
        self.want_space = true;
        self.cur_line = self.position(pos).line;
    }

    /// Closing token such as `)` or a backquote. Comments before it are
    /// printed one level deeper, as part of the enclosed body.
    pub(super) fn sep_tok(&mut self, s: &str, pos: Position) {
        self.level += 1;
        self.comments_up_to(pos.line);
        self.level -= 1;
        self.did_separate(pos);
        if s != ")" && self.want_space {
            self.space();
        }
        self.str(s);
        self.want_space = true;
    }

    /// Closing reserved word such as `fi` or `done`; `fallback` prints a
    /// `; ` when it stays on the current line.
    pub(super) fn semi_rsrv(&mut self, s: &str, rpos: Pos, fallback: bool) {
        let pos = self.position(rpos);
        self.level += 1;
        self.comments_up_to(pos.line);
        self.level -= 1;
        if !self.did_separate(pos) && fallback {
            self.str("; ");
        } else if self.want_space {
            self.space();
        }
        self.str(s);
        self.want_space = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::position::LineIndex;

    fn lines() -> LineIndex {
        LineIndex::new(&"x\n".repeat(20))
    }

    fn at(idx: &LineIndex, line: usize) -> Position {
        idx.position(idx.offset(line, 1))
    }

    fn output(p: Printer<'_, '_>) -> String {
        String::from_utf8(p.out.into_contents()).unwrap()
    }

    #[test]
    fn test_scopes_opened_on_one_line_indent_once() {
        let idx = lines();
        let mut p = Printer::new(Sink::scratch(), &idx, PrintConfig::default());
        p.inc_level();
        p.inc_level();
        assert_eq!(p.level, 1);
        p.indent();
        p.inc_level();
        assert_eq!(p.level, 2);
        p.dec_level();
        p.dec_level();
        p.dec_level();
        assert_eq!(p.level, 0);
        assert!(p.level_incs.is_empty());
        assert_eq!(p.scopes_opened, p.scopes_closed);
    }

    #[test]
    fn test_spaces_indentation() {
        let idx = lines();
        let mut p = Printer::new(Sink::scratch(), &idx, PrintConfig::spaces(4));
        p.inc_level();
        p.indent();
        p.str("x");
        p.dec_level();
        assert_eq!(output(p), "    x");
    }

    #[test]
    fn test_blank_line_is_capped_at_one() {
        let idx = lines();
        let mut p = Printer::new(Sink::scratch(), &idx, PrintConfig::default());
        p.always_separate(at(&idx, 1));
        p.str("a");
        p.always_separate(at(&idx, 9));
        p.str("b");
        p.always_separate(at(&idx, 10));
        p.str("c");
        assert_eq!(output(p), "a\n\nb\nc");
    }

    #[test]
    fn test_did_separate_same_line() {
        let idx = lines();
        let mut p = Printer::new(Sink::scratch(), &idx, PrintConfig::default());
        assert!(p.did_separate(at(&idx, 3)));
        assert!(!p.did_separate(at(&idx, 3)));
        assert!(p.did_separate(at(&idx, 4)));
        assert_eq!(p.cur_line, 4);
    }

    #[test]
    fn test_semi_rsrv_fallback() {
        let idx = lines();
        let mut p = Printer::new(Sink::scratch(), &idx, PrintConfig::default());
        p.always_separate(at(&idx, 1));
        p.rsrv("foo");
        p.semi_rsrv("fi", idx.offset(1, 1), true);
        p.semi_rsrv("done", idx.offset(2, 1), true);
        assert_eq!(output(p), "foo; fi\ndone");
    }
}
