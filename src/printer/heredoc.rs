//! Heredoc deferral
//!
//! A heredoc body belongs after the newline that ends the command line
//! holding its redirection, not after the redirection token. Bodies are
//! queued as their redirections are printed and drained, in order, by the
//! next newline.

use std::collections::VecDeque;

use crate::ast::types::RedirectionNode;

#[derive(Debug, Default)]
pub(crate) struct HeredocQueue<'a> {
    pending: VecDeque<&'a RedirectionNode>,
}

impl<'a> HeredocQueue<'a> {
    pub fn push(&mut self, redirection: &'a RedirectionNode) {
        self.pending.push_back(redirection);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every queued redirection, oldest first.
    pub fn take(&mut self) -> VecDeque<&'a RedirectionNode> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::{Pos, AST};

    #[test]
    fn test_fifo_order_and_drain() {
        let first = AST::heredoc(Pos(0), AST::lit_word(Pos(2), "A"), "one\n");
        let second = AST::heredoc(Pos(5), AST::lit_word(Pos(7), "B"), "two\n");
        let mut queue = HeredocQueue::default();
        queue.push(&first);
        queue.push(&second);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.take().into_iter().collect();
        assert_eq!(drained.len(), 2);
        assert!(std::ptr::eq(drained[0], &first));
        assert!(std::ptr::eq(drained[1], &second));
        assert!(queue.is_empty());
    }
}
