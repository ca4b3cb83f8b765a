//! Comment interleaving
//!
//! Comments are not children of any node; they are merged into the output
//! by position. Whenever the printer is about to separate towards a node on
//! some line, every comment positioned before that line is written first.

use crate::ast::types::Position;
use crate::printer::printer::Printer;

impl<'a, 'w> Printer<'a, 'w> {
    /// Print every buffered comment that sits before `line`; 0 flushes all.
    pub(super) fn comments_up_to(&mut self, line: usize) {
        loop {
            let comments = self.comments;
            let Some((comment, rest)) = comments.split_first() else {
                return;
            };
            let cpos = self.position(comment.hash);
            if line > 0 && cpos.line >= line {
                return;
            }
            self.want_newline = false;
            if !self.did_separate(cpos) {
                // inline: padded to line up with neighbouring comments
                self.spaces(self.want_spaces + 1);
                self.want_spaces = 0;
            }
            self.byte(b'#');
            self.str(&comment.text);
            self.comments = rest;
        }
    }

    /// Whether a pending comment shares the source line of `pos`.
    pub(super) fn has_inline(&self, pos: Position) -> bool {
        for comment in self.comments {
            let cline = self.position(comment.hash).line;
            if cline == pos.line {
                return true;
            }
            if cline > pos.line {
                return false;
            }
        }
        false
    }
}
