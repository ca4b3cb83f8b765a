//! Abstract Syntax Tree (AST) Types for Bash
//!
//! This module defines the tree the printer consumes. It is produced by an
//! external parser; the printer only reads it. Nodes carry the source
//! positions the layout decisions depend on (statement starts, closing
//! keywords, comment hashes), never (line, column) pairs: those come from
//! the position service in [`crate::ast::position`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::position::{LineIndex, PositionResolver};

// =============================================================================
// BASE TYPES
// =============================================================================

/// Byte offset into the original source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Pos(pub usize);

/// Resolved position information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in bytes
    pub column: usize,
    pub offset: usize,
}

// =============================================================================
// FILE & STATEMENTS
// =============================================================================

/// Root node: a complete script with its comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub statements: Vec<StatementNode>,
    /// Ascending by position
    #[serde(default)]
    pub comments: Vec<CommentNode>,
    pub lines: LineIndex,
}

impl FileNode {
    pub fn new(
        statements: Vec<StatementNode>,
        comments: Vec<CommentNode>,
        lines: LineIndex,
    ) -> Self {
        Self {
            statements,
            comments,
            lines,
        }
    }

    /// Load a tree handed over by an external parser as JSON.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

impl PositionResolver for FileNode {
    fn position(&self, pos: Pos) -> Position {
        self.lines.position(pos)
    }
}

/// A comment; attached to the tree by position only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    /// Position of the `#`
    pub hash: Pos,
    /// Text after the `#`
    pub text: String,
}

/// A statement: `[!] [assignments] [command] [redirections] [&]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementNode {
    /// Position of the first token
    pub position: Pos,
    #[serde(default)]
    pub negated: bool,
    #[serde(default)]
    pub assignments: Vec<AssignmentNode>,
    /// None for assignment-only or redirection-only statements
    #[serde(default)]
    pub command: Option<CommandNode>,
    #[serde(default)]
    pub redirections: Vec<RedirectionNode>,
    #[serde(default)]
    pub background: bool,
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Union of all command types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandNode {
    Call(CallNode),
    Block(BlockNode),
    If(IfNode),
    Subshell(SubshellNode),
    While(WhileNode),
    For(ForNode),
    Binary(BinaryCommandNode),
    FunctionDecl(FunctionDeclNode),
    Case(CaseNode),
    Decl(DeclNode),
    Eval(EvalNode),
    Let(LetNode),
}

/// Simple command: name args...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallNode {
    /// Command name followed by its arguments
    pub args: Vec<WordNode>,
}

/// Command group: { ...; }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub statements: Vec<StatementNode>,
    pub rbrace: Pos,
}

/// Subshell: ( ... )
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubshellNode {
    pub statements: Vec<StatementNode>,
    pub rparen: Pos,
}

// =============================================================================
// CONTROL FLOW
// =============================================================================

/// if statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfNode {
    pub condition: CondNode,
    pub then_pos: Pos,
    pub then_body: Vec<StatementNode>,
    #[serde(default)]
    pub elifs: Vec<ElifNode>,
    #[serde(default)]
    pub else_clause: Option<ElseNode>,
    pub fi: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElifNode {
    pub elif_pos: Pos,
    pub condition: CondNode,
    pub then_pos: Pos,
    pub then_body: Vec<StatementNode>,
}

/// `else` keyword; the body may be empty when the source had a bare `else`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseNode {
    pub position: Pos,
    pub body: Vec<StatementNode>,
}

/// Condition of an if/while/until
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CondNode {
    Statements(Vec<StatementNode>),
    /// `(( expr ))`
    Arithmetic(ArithExpr),
}

/// while or until loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileNode {
    #[serde(default)]
    pub until: bool,
    pub condition: CondNode,
    pub do_pos: Pos,
    pub body: Vec<StatementNode>,
    pub done: Pos,
}

/// for loop, word iteration or C-style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForNode {
    pub header: LoopNode,
    pub do_pos: Pos,
    pub body: Vec<StatementNode>,
    pub done: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoopNode {
    /// for NAME in WORDS
    WordIter(WordIterNode),
    /// for ((init; cond; post))
    CStyle(CStyleLoopNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordIterNode {
    pub name: String,
    /// Empty means no `in` clause
    #[serde(default)]
    pub items: Vec<WordNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CStyleLoopNode {
    pub init: Option<ArithExpr>,
    pub condition: Option<ArithExpr>,
    pub post: Option<ArithExpr>,
}

/// Pipeline or logical pair: left op right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryCommandNode {
    pub operator: BinaryCommandOperator,
    pub left: Box<StatementNode>,
    pub right: Box<StatementNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryCommandOperator {
    Pipe,    // |
    PipeAll, // |&
    And,     // &&
    Or,      // ||
}

/// case statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseNode {
    pub word: WordNode,
    pub items: Vec<CaseItemNode>,
    pub esac: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseItemNode {
    pub patterns: Vec<WordNode>,
    pub body: Vec<StatementNode>,
    pub terminator: CaseTerminator,
    /// Position of the terminator; equals the `esac` position when the
    /// source omitted the last `;;`
    pub terminator_pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseTerminator {
    DoubleSemi,  // ;;
    SemiAnd,     // ;&
    SemiSemiAnd, // ;;&
}

// =============================================================================
// FUNCTIONS & BUILTIN CLAUSES
// =============================================================================

/// Function declaration: `[function ]name() body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclNode {
    /// Written with the `function` keyword
    #[serde(default)]
    pub bash_style: bool,
    pub name: String,
    pub body: Box<StatementNode>,
}

/// `declare` / `local` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclNode {
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub options: Vec<WordNode>,
    #[serde(default)]
    pub assignments: Vec<AssignmentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalNode {
    pub statement: Option<Box<StatementNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetNode {
    pub expressions: Vec<ArithExpr>,
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

/// Variable assignment: VAR=value or VAR+=value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentNode {
    pub position: Pos,
    /// None for bare words inside `declare` (e.g. `declare -x foo`)
    pub name: Option<String>,
    /// Append mode: VAR+=value
    #[serde(default)]
    pub append: bool,
    pub value: WordNode,
}

// =============================================================================
// REDIRECTIONS
// =============================================================================

/// I/O redirection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectionNode {
    /// Position of the operator
    pub op_pos: Pos,
    /// File descriptor literal, e.g. `2` in `2>&1`
    pub fd: Option<String>,
    pub operator: RedirectionOperator,
    /// Target word; the delimiter for heredocs
    pub target: WordNode,
    /// Body of `<<` / `<<-` redirections
    #[serde(default)]
    pub heredoc: Option<HereDocNode>,
}

impl RedirectionNode {
    pub fn is_heredoc(&self) -> bool {
        self.operator.is_heredoc()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectionOperator {
    Less,      // <
    Great,     // >
    DGreat,    // >>
    GreatAnd,  // >&
    LessAnd,   // <&
    LessGreat, // <>
    Clobber,   // >|
    AndGreat,  // &>
    AndDGreat, // &>>
    TLess,     // <<<
    DLess,     // <<
    DLessDash, // <<-
}

impl RedirectionOperator {
    pub fn is_heredoc(self) -> bool {
        matches!(self, Self::DLess | Self::DLessDash)
    }
}

impl fmt::Display for RedirectionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::printer::operators::redirection_op(*self))
    }
}

/// Here document body, emitted after the line holding its redirection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HereDocNode {
    /// Literal body including its final newline
    pub content: String,
}

// =============================================================================
// WORDS
// =============================================================================

/// A Word is a sequence of parts that form a single shell word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordNode {
    pub position: Pos,
    pub parts: Vec<WordPart>,
}

/// Parts that can make up a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WordPart {
    Literal(LiteralPart),
    SingleQuoted(SingleQuotedPart),
    Quoted(QuotedPart),
    ParameterExpansion(ParameterExpansionPart),
    CommandSubstitution(CommandSubstitutionPart),
    ArithmeticExpansion(ArithmeticExpansionPart),
    Array(ArrayPart),
    ProcessSubstitution(ProcessSubstitutionPart),
}

/// Literal text, printed verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralPart {
    pub value: String,
}

/// Single-quoted string: 'literal'
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleQuotedPart {
    pub value: String,
}

/// "...", $'...' or $"..." wrapping nested parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedPart {
    pub quote: QuoteKind,
    pub parts: Vec<WordPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteKind {
    Double,       // "..."
    DollarSingle, // $'...'
    DollarDouble, // $"..."
}

// =============================================================================
// PARAMETER EXPANSION
// =============================================================================

/// Parameter/variable expansion: $VAR or ${VAR...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterExpansionPart {
    /// `$name` form without braces
    #[serde(default)]
    pub short: bool,
    /// ${#VAR}
    #[serde(default)]
    pub length: bool,
    pub parameter: String,
    /// ${VAR[index]}
    #[serde(default)]
    pub index: Option<WordNode>,
    #[serde(default)]
    pub replacement: Option<ReplacementOp>,
    #[serde(default)]
    pub operation: Option<ExpansionOp>,
}

/// ${VAR/orig/with} or ${VAR//orig/with}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementOp {
    pub all: bool,
    pub original: WordNode,
    pub with: WordNode,
}

/// ${VAR<op>word}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionOp {
    pub operator: ExpansionOperator,
    pub word: WordNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpansionOperator {
    Substring,          // :
    Alternative,        // +
    AlternativeUnset,   // :+
    Default,            // -
    DefaultUnset,       // :-
    Error,              // ?
    ErrorUnset,         // :?
    Assign,             // =
    AssignUnset,        // :=
    RemoveSuffix,       // %
    RemoveLargeSuffix,  // %%
    RemovePrefix,       // #
    RemoveLargePrefix,  // ##
}

// =============================================================================
// SUBSTITUTIONS
// =============================================================================

/// Command substitution: $(cmd) or `cmd`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSubstitutionPart {
    /// Legacy backquote syntax
    #[serde(default)]
    pub backquotes: bool,
    pub statements: Vec<StatementNode>,
    /// Position of the closing `)` or backquote
    pub right: Pos,
}

/// Arithmetic expansion: $((expr))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticExpansionPart {
    pub expression: ArithExpr,
}

/// Array literal: (a b c)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPart {
    pub items: Vec<WordNode>,
    pub rparen: Pos,
}

/// Process substitution: <(cmd) or >(cmd)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSubstitutionPart {
    pub direction: ProcessDirection,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessDirection {
    Input,  // <(...)
    Output, // >(...)
}

// =============================================================================
// ARITHMETIC
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArithExpr {
    Word(WordNode),
    Binary(Box<ArithBinaryNode>),
    Unary(Box<ArithUnaryNode>),
    Paren(Box<ArithParenNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithBinaryNode {
    pub operator: ArithBinaryOperator,
    pub left: ArithExpr,
    pub right: ArithExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithBinaryOperator {
    Add,          // +
    Sub,          // -
    Mul,          // *
    Div,          // /
    Mod,          // %
    Pow,          // **
    LShift,       // <<
    RShift,       // >>
    Lt,           // <
    Le,           // <=
    Gt,           // >
    Ge,           // >=
    Eq,           // ==
    Ne,           // !=
    BitAnd,       // &
    BitOr,        // |
    BitXor,       // ^
    LogAnd,       // &&
    LogOr,        // ||
    Assign,       // =
    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    LShiftAssign, // <<=
    RShiftAssign, // >>=
    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
    /// `?` of a ternary; its right side is the `:` node
    Quest,        // ?
    Colon,        // :
    Comma,        // ,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithUnaryNode {
    pub operator: ArithUnaryOperator,
    /// Postfix form: x++ / x--
    #[serde(default)]
    pub post: bool,
    pub operand: ArithExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithUnaryOperator {
    Pos,  // +
    Neg,  // -
    Not,  // !
    Inc,  // ++
    Dec,  // --
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithParenNode {
    pub expression: ArithExpr,
}

// =============================================================================
// FACTORY FUNCTIONS (AST builders)
// =============================================================================

/// AST factory for building nodes
pub struct AST;

impl AST {
    pub fn file(
        statements: Vec<StatementNode>,
        comments: Vec<CommentNode>,
        lines: LineIndex,
    ) -> FileNode {
        FileNode::new(statements, comments, lines)
    }

    pub fn comment(hash: Pos, text: impl Into<String>) -> CommentNode {
        CommentNode { hash, text: text.into() }
    }

    pub fn statement(position: Pos, command: CommandNode) -> StatementNode {
        StatementNode {
            position,
            negated: false,
            assignments: Vec::new(),
            command: Some(command),
            redirections: Vec::new(),
            background: false,
        }
    }

    /// Statement made of a single call
    pub fn call(position: Pos, args: Vec<WordNode>) -> StatementNode {
        Self::statement(position, CommandNode::Call(CallNode { args }))
    }

    pub fn word(position: Pos, parts: Vec<WordPart>) -> WordNode {
        WordNode { position, parts }
    }

    /// Word made of a single literal
    pub fn lit_word(position: Pos, value: impl Into<String>) -> WordNode {
        Self::word(position, vec![Self::literal(value)])
    }

    pub fn literal(value: impl Into<String>) -> WordPart {
        WordPart::Literal(LiteralPart { value: value.into() })
    }

    pub fn single_quoted(value: impl Into<String>) -> WordPart {
        WordPart::SingleQuoted(SingleQuotedPart { value: value.into() })
    }

    pub fn quoted(quote: QuoteKind, parts: Vec<WordPart>) -> WordPart {
        WordPart::Quoted(QuotedPart { quote, parts })
    }

    pub fn double_quoted(parts: Vec<WordPart>) -> WordPart {
        Self::quoted(QuoteKind::Double, parts)
    }

    /// `$name`
    pub fn param(name: impl Into<String>) -> WordPart {
        WordPart::ParameterExpansion(ParameterExpansionPart {
            short: true,
            length: false,
            parameter: name.into(),
            index: None,
            replacement: None,
            operation: None,
        })
    }

    /// `${name}` with no operation; callers fill in the optional fields
    pub fn braced_param(name: impl Into<String>) -> ParameterExpansionPart {
        ParameterExpansionPart {
            short: false,
            length: false,
            parameter: name.into(),
            index: None,
            replacement: None,
            operation: None,
        }
    }

    pub fn command_substitution(
        statements: Vec<StatementNode>,
        right: Pos,
        backquotes: bool,
    ) -> WordPart {
        WordPart::CommandSubstitution(CommandSubstitutionPart {
            backquotes,
            statements,
            right,
        })
    }

    pub fn arithmetic_expansion(expression: ArithExpr) -> WordPart {
        WordPart::ArithmeticExpansion(ArithmeticExpansionPart { expression })
    }

    pub fn array(items: Vec<WordNode>, rparen: Pos) -> WordPart {
        WordPart::Array(ArrayPart { items, rparen })
    }

    pub fn process_substitution(
        direction: ProcessDirection,
        statements: Vec<StatementNode>,
    ) -> WordPart {
        WordPart::ProcessSubstitution(ProcessSubstitutionPart {
            direction,
            statements,
        })
    }

    pub fn assignment(position: Pos, name: impl Into<String>, value: WordNode) -> AssignmentNode {
        AssignmentNode {
            position,
            name: Some(name.into()),
            append: false,
            value,
        }
    }

    pub fn redirection(
        op_pos: Pos,
        operator: RedirectionOperator,
        target: WordNode,
    ) -> RedirectionNode {
        RedirectionNode {
            op_pos,
            fd: None,
            operator,
            target,
            heredoc: None,
        }
    }

    pub fn heredoc(
        op_pos: Pos,
        delimiter: WordNode,
        content: impl Into<String>,
    ) -> RedirectionNode {
        RedirectionNode {
            op_pos,
            fd: None,
            operator: RedirectionOperator::DLess,
            target: delimiter,
            heredoc: Some(HereDocNode { content: content.into() }),
        }
    }

    pub fn binary(
        operator: BinaryCommandOperator,
        left: StatementNode,
        right: StatementNode,
    ) -> StatementNode {
        let position = left.position;
        Self::statement(
            position,
            CommandNode::Binary(BinaryCommandNode {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }),
        )
    }

    pub fn block(position: Pos, statements: Vec<StatementNode>, rbrace: Pos) -> StatementNode {
        Self::statement(position, CommandNode::Block(BlockNode { statements, rbrace }))
    }

    pub fn subshell(position: Pos, statements: Vec<StatementNode>, rparen: Pos) -> StatementNode {
        Self::statement(position, CommandNode::Subshell(SubshellNode { statements, rparen }))
    }

    pub fn if_node(
        condition: Vec<StatementNode>,
        then_pos: Pos,
        then_body: Vec<StatementNode>,
        fi: Pos,
    ) -> IfNode {
        IfNode {
            condition: CondNode::Statements(condition),
            then_pos,
            then_body,
            elifs: Vec::new(),
            else_clause: None,
            fi,
        }
    }

    pub fn while_node(
        condition: Vec<StatementNode>,
        do_pos: Pos,
        body: Vec<StatementNode>,
        done: Pos,
    ) -> WhileNode {
        WhileNode {
            until: false,
            condition: CondNode::Statements(condition),
            do_pos,
            body,
            done,
        }
    }

    pub fn for_node(header: LoopNode, do_pos: Pos, body: Vec<StatementNode>, done: Pos) -> ForNode {
        ForNode {
            header,
            do_pos,
            body,
            done,
        }
    }

    pub fn case_item(
        patterns: Vec<WordNode>,
        body: Vec<StatementNode>,
        terminator: CaseTerminator,
        terminator_pos: Pos,
    ) -> CaseItemNode {
        CaseItemNode {
            patterns,
            body,
            terminator,
            terminator_pos,
        }
    }

    pub fn function_decl(
        name: impl Into<String>,
        bash_style: bool,
        body: StatementNode,
    ) -> FunctionDeclNode {
        FunctionDeclNode {
            bash_style,
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn arith_word(word: WordNode) -> ArithExpr {
        ArithExpr::Word(word)
    }

    pub fn arith_binary(
        operator: ArithBinaryOperator,
        left: ArithExpr,
        right: ArithExpr,
    ) -> ArithExpr {
        ArithExpr::Binary(Box::new(ArithBinaryNode { operator, left, right }))
    }

    pub fn arith_unary(operator: ArithUnaryOperator, post: bool, operand: ArithExpr) -> ArithExpr {
        ArithExpr::Unary(Box::new(ArithUnaryNode {
            operator,
            post,
            operand,
        }))
    }

    pub fn arith_paren(expression: ArithExpr) -> ArithExpr {
        ArithExpr::Paren(Box::new(ArithParenNode { expression }))
    }
}
