//! Printer for bash syntax trees
//!
//! Renders a [`FileNode`] back into source text with a canonical layout,
//! keeping what the grammar alone does not encode: single blank lines
//! between groups of statements, comment placement, heredoc bodies after
//! the line that introduces them, and line continuations.

mod command_printer;
mod comments;
mod heredoc;
pub mod operators;
mod printer;
mod sink;
pub mod types;
mod word_printer;

use std::io::Write;

use crate::ast::position::PositionResolver;
use crate::ast::types::{FileNode, StatementNode, WordNode};

use printer::Printer;
use sink::Sink;

pub use types::{ConfigError, Indentation, PrintConfig, PrintError};

/// Pretty-print `file` to `w`.
///
/// The whole tree is always traversed; if the writer fails, the first error
/// is returned once the traversal is done and later output is dropped.
pub fn print<W: Write>(file: &FileNode, w: &mut W, config: &PrintConfig) -> Result<(), PrintError> {
    log::debug!(
        "printing {} statement(s), {} comment(s)",
        file.statements.len(),
        file.comments.len()
    );
    let w: &mut dyn Write = w;
    let mut p = Printer::new(Sink::pooled(w), &file.lines, *config).with_comments(&file.comments);
    p.stmts(&file.statements);
    p.comments_up_to(0);
    p.newline();
    p.finish()
}

/// Pretty-print with the default configuration (tab indentation).
pub fn fprint<W: Write>(file: &FileNode, w: &mut W) -> Result<(), PrintError> {
    print(file, w, &PrintConfig::default())
}

/// Pretty-print into a new string.
pub fn print_to_string(file: &FileNode, config: &PrintConfig) -> Result<String, PrintError> {
    let mut out = Vec::new();
    print(file, &mut out, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render a single word as it would appear in printed output.
pub fn word_str(file: &FileNode, word: &WordNode) -> String {
    let mut p = Printer::new(Sink::scratch(), &file.lines, PrintConfig::default());
    p.word(word);
    scratch_string(p)
}

/// Render a single word with its quoting removed: `'EOF'` gives `EOF`.
pub fn unquoted_word_str(file: &FileNode, word: &WordNode) -> String {
    let mut p = Printer::new(Sink::scratch(), &file.lines, PrintConfig::default());
    p.unquoted_word(word);
    scratch_string(p)
}

/// Width in characters of `stmt` printed on its own, from a fresh cursor.
///
/// Used to pad inline comments into a column; the rendering is discarded.
pub fn statement_width(
    lines: &dyn PositionResolver,
    config: PrintConfig,
    stmt: &StatementNode,
) -> usize {
    let mut p = Printer::new(Sink::scratch(), lines, config);
    p.stmt(stmt);
    let Printer { out, .. } = p;
    String::from_utf8_lossy(out.contents()).chars().count()
}

fn scratch_string(p: Printer<'_, '_>) -> String {
    let Printer { out, .. } = p;
    String::from_utf8_lossy(&out.into_contents()).into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use similar::{ChangeTag, TextDiff};

    use super::*;
    use crate::ast::position::LineIndex;
    use crate::ast::types::*;

    /// Trees are built against a blank 100x80 source so any (line, column)
    /// pair maps to a valid offset.
    pub(super) struct Src {
        pub(super) lines: LineIndex,
    }

    impl Src {
        pub(super) fn new() -> Self {
            Self::from_source(&format!("{}\n", " ".repeat(79)).repeat(100))
        }

        pub(super) fn from_source(source: &str) -> Self {
            Self {
                lines: LineIndex::new(source),
            }
        }

        pub(super) fn at(&self, line: usize, col: usize) -> Pos {
            self.lines.offset(line, col)
        }

        pub(super) fn word(&self, line: usize, col: usize, value: &str) -> WordNode {
            AST::lit_word(self.at(line, col), value)
        }

        /// Simple command whose words follow each other on one line.
        pub(super) fn call(&self, line: usize, col: usize, words: &[&str]) -> StatementNode {
            let mut next = col;
            let mut args = Vec::new();
            for w in words {
                args.push(self.word(line, next, w));
                next += w.len() + 1;
            }
            AST::call(self.at(line, col), args)
        }

        pub(super) fn file(
            &self,
            statements: Vec<StatementNode>,
            comments: Vec<CommentNode>,
        ) -> FileNode {
            AST::file(statements, comments, self.lines.clone())
        }
    }

    pub(super) fn assert_prints(file: &FileNode, config: &PrintConfig, expected: &str) {
        let got = print_to_string(file, config).unwrap();
        if got != expected {
            let diff = TextDiff::from_lines(expected, got.as_str());
            let mut msg = String::new();
            for change in diff.iter_all_changes() {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                msg.push_str(&format!("{}{:?}\n", sign, change.value()));
            }
            panic!("printed output differs (-expected +got):\n{}", msg);
        }
    }

    pub(super) fn assert_default(file: &FileNode, expected: &str) {
        assert_prints(file, &PrintConfig::default(), expected);
    }

    pub(super) fn stmt(position: Pos, command: CommandNode) -> StatementNode {
        AST::statement(position, command)
    }


    #[test]
    fn test_fprint_matches_print_to_string() {
        let src = Src::new();
        let file = src.file(vec![src.call(1, 1, &["echo", "hi"])], vec![]);
        let mut out = Vec::new();
        fprint(&file, &mut out).unwrap();
        let expected = print_to_string(&file, &PrintConfig::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_word_helpers() {
        let src = Src::new();
        let file = src.file(vec![], vec![]);
        let word = AST::word(src.at(1, 1), vec![AST::double_quoted(vec![AST::literal("EOF")])]);
        assert_eq!(word_str(&file, &word), "\"EOF\"");
        assert_eq!(unquoted_word_str(&file, &word), "EOF");
    }

    #[test]
    fn test_statement_width_counts_chars() {
        let src = Src::new();
        let s = src.call(1, 1, &["echo", "héllo"]);
        assert_eq!(statement_width(&src.lines, PrintConfig::default(), &s), 10);
    }

    #[test]
    fn test_tree_from_json() {
        let json = r#"{
            "statements": [{
                "position": 0,
                "command": {"Call": {"args": [
                    {"position": 0, "parts": [{"Literal": {"value": "echo"}}]},
                    {"position": 5, "parts": [{"Literal": {"value": "hi"}}]}
                ]}}
            }],
            "lines": {"line_starts": [0]}
        }"#;
        let file = FileNode::from_json_str(json).unwrap();
        assert_default(&file, "echo hi\n");
    }

    struct FailingWriter {
        attempts: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let src = Src::new();
        let file = src.file(vec![src.call(1, 1, &["echo", "hi"]), src.call(2, 1, &["ls"])], vec![]);
        let mut w = FailingWriter { attempts: 0 };
        match print(&file, &mut w, &PrintConfig::default()) {
            Err(PrintError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected an io error, got {:?}", other),
        }
        assert_eq!(w.attempts, 1);
    }

    #[test]
    fn test_indentation_scopes_balance() {
        let src = Src::new();
        let inner_if = AST::if_node(
            vec![src.call(2, 5, &["b"])],
            src.at(2, 8),
            vec![src.call(3, 3, &["c"])],
            src.at(4, 2),
        );
        let block = AST::block(
            src.at(1, 1),
            vec![
                stmt(src.at(2, 2), CommandNode::If(inner_if)),
                AST::binary(
                    BinaryCommandOperator::Or,
                    src.call(5, 2, &["d"]),
                    src.call(6, 3, &["e"]),
                ),
            ],
            src.at(7, 1),
        );
        let file = src.file(vec![block], vec![]);

        let mut p = Printer::new(Sink::scratch(), &file.lines, PrintConfig::default());
        p.stmts(&file.statements);
        p.newline();
        assert!(p.scopes_opened > 0);
        assert_eq!(p.scopes_opened, p.scopes_closed);
        assert!(p.level_incs.is_empty());
        assert_eq!(p.level, 0);
    }

    #[test]
    fn test_concurrent_prints_with_different_configs() {
        let src = Src::new();
        let mut cat = src.call(1, 1, &["cat"]);
        cat.redirections
            .push(AST::heredoc(src.at(1, 5), src.word(1, 7, "EOF"), "body\n"));
        let block = AST::block(src.at(4, 1), vec![src.call(5, 2, &["foo"])], src.at(6, 1));
        let file = src.file(vec![cat, block], vec![AST::comment(src.at(7, 1), " done")]);
        let tabs = "cat <<EOF\nbody\nEOF\n{\n\tfoo\n}\n# done\n";
        let spaces = "cat <<EOF\nbody\nEOF\n{\n    foo\n}\n# done\n";

        let outputs: Vec<(usize, String)> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let file = &file;
                    s.spawn(move || {
                        let config = if i % 2 == 0 {
                            PrintConfig::tabs()
                        } else {
                            PrintConfig::spaces(4)
                        };
                        (i, print_to_string(file, &config).unwrap())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(outputs.len(), 8);
        for (i, out) in outputs {
            let expected = if i % 2 == 0 { tabs } else { spaces };
            assert_eq!(out, expected, "thread {}", i);
        }
    }

    // -------------------------------------------------------------------------
    // Already canonical input prints unchanged
    // -------------------------------------------------------------------------

    #[test]
    fn test_canonical_if_with_pipeline() {
        let source = "if foo; then\n\tbar | baz\nfi\n";
        let src = Src::from_source(source);
        let body = AST::binary(
            BinaryCommandOperator::Pipe,
            src.call(2, 2, &["bar"]),
            src.call(2, 8, &["baz"]),
        );
        let node = AST::if_node(
            vec![src.call(1, 4, &["foo"])],
            src.at(1, 9),
            vec![body],
            src.at(3, 1),
        );
        let file = src.file(vec![stmt(src.at(1, 1), CommandNode::If(node))], vec![]);
        assert_default(&file, source);
    }

    #[test]
    fn test_canonical_case() {
        let source = "case $x in\na | b)\n\tfoo\n\t;;\nesac\n";
        let src = Src::from_source(source);
        let case = CaseNode {
            word: AST::word(src.at(1, 6), vec![AST::param("x")]),
            items: vec![AST::case_item(
                vec![src.word(2, 1, "a"), src.word(2, 5, "b")],
                vec![src.call(3, 2, &["foo"])],
                CaseTerminator::DoubleSemi,
                src.at(4, 2),
            )],
            esac: src.at(5, 1),
        };
        let file = src.file(vec![stmt(src.at(1, 1), CommandNode::Case(case))], vec![]);
        assert_default(&file, source);
    }

    #[test]
    fn test_canonical_heredoc_in_pipeline() {
        let source = "cat <<EOF | grep x\nbody\nEOF\nnext\n";
        let src = Src::from_source(source);
        let mut cat = src.call(1, 1, &["cat"]);
        cat.redirections
            .push(AST::heredoc(src.at(1, 5), src.word(1, 7, "EOF"), "body\n"));
        let pipe = AST::binary(BinaryCommandOperator::Pipe, cat, src.call(1, 13, &["grep", "x"]));
        let file = src.file(vec![pipe, src.call(4, 1, &["next"])], vec![]);
        assert_default(&file, source);
    }

    #[test]
    fn test_canonical_aligned_inline_comments() {
        let source = "a       # one\nfoo bar # two\n";
        let src = Src::from_source(source);
        let file = src.file(
            vec![src.call(1, 1, &["a"]), src.call(2, 1, &["foo", "bar"])],
            vec![AST::comment(src.at(1, 9), " one"), AST::comment(src.at(2, 9), " two")],
        );
        assert_default(&file, source);
    }

    #[test]
    fn test_canonical_continuations() {
        let source = "FOO=1 \\\n\tBAR=2 cmd \\\n\t>out\n";
        let src = Src::from_source(source);
        let mut s = src.call(2, 8, &["cmd"]);
        s.position = src.at(1, 1);
        s.assignments = vec![
            AST::assignment(src.at(1, 1), "FOO", src.word(1, 5, "1")),
            AST::assignment(src.at(2, 2), "BAR", src.word(2, 6, "2")),
        ];
        s.redirections.push(AST::redirection(
            src.at(3, 2),
            RedirectionOperator::Great,
            src.word(3, 3, "out"),
        ));
        assert_default(&src.file(vec![s], vec![]), source);
    }
}
