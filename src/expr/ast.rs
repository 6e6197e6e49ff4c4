//! Binary AST node kinds.
//!
//! Every node carries an optional `startpos`: the byte offset of the token
//! it was built from, or `None` for nodes synthesized during a transform
//! (e.g. a substituted "1" numerator).

/// The four arithmetic binary operators, plus implicit multiplication kept
/// distinct from explicit `×` so the emitter can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    ImpMul,
    Div,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOpKind {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathConst {
    E,
    Pi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctKind {
    Abs,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

/// The sign carried by an [`ExprHolder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprSign {
    Plus,
    Minus,
}

/// The numerator/denominator role carried by a [`TermHolder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermRole {
    Numerator,
    Denominator,
}

/// A binary-tree or multinode-tree node.
///
/// Both tree shapes share one node enum: a binary AST never contains
/// `ExprMulti`/`TermMulti`/holders, and a multinode AST replaces commutative
/// chains with those variants in place of the corresponding `BinOp`/
/// `UnaryMinus` chains. [`super::multinode::MultinodeBuilder`] converts
/// between the two.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number {
        value: String,
        startpos: Option<usize>,
    },
    Variable {
        name: String,
        startpos: Option<usize>,
    },
    MathConst {
        which: MathConst,
        startpos: Option<usize>,
    },
    UnaryMinus {
        child: Box<Node>,
        startpos: Option<usize>,
    },
    BinOp {
        op: BinOpKind,
        left: Box<Node>,
        right: Box<Node>,
        startpos: Option<usize>,
    },
    CompareOp {
        op: CompareOpKind,
        left: Box<Node>,
        right: Box<Node>,
        startpos: Option<usize>,
    },
    BoolOp {
        op: BoolOpKind,
        left: Box<Node>,
        right: Box<Node>,
        startpos: Option<usize>,
    },
    Funct {
        which: FunctKind,
        child: Box<Node>,
        startpos: Option<usize>,
    },
    ExprMulti {
        children: Vec<Node>,
        startpos: Option<usize>,
    },
    ExprHolder {
        sign: ExprSign,
        child: Box<Node>,
    },
    TermMulti {
        children: Vec<Node>,
        startpos: Option<usize>,
    },
    TermHolder {
        role: TermRole,
        child: Box<Node>,
    },
}

impl Node {
    /// The byte offset this node was built from, if any. Holders do not
    /// carry their own position; they delegate to their child.
    #[must_use]
    pub fn startpos(&self) -> Option<usize> {
        match self {
            Self::Number { startpos, .. }
            | Self::Variable { startpos, .. }
            | Self::MathConst { startpos, .. }
            | Self::UnaryMinus { startpos, .. }
            | Self::BinOp { startpos, .. }
            | Self::CompareOp { startpos, .. }
            | Self::BoolOp { startpos, .. }
            | Self::Funct { startpos, .. }
            | Self::ExprMulti { startpos, .. }
            | Self::TermMulti { startpos, .. } => *startpos,
            Self::ExprHolder { child, .. } | Self::TermHolder { child, .. } => child.startpos(),
        }
    }

    /// `true` for `ExprMulti`/`TermMulti`/holder kinds: anything that may
    /// only legally appear on a multinode tree.
    #[must_use]
    pub fn is_multinode_shape(&self) -> bool {
        matches!(
            self,
            Self::ExprMulti { .. }
                | Self::TermMulti { .. }
                | Self::ExprHolder { .. }
                | Self::TermHolder { .. }
        )
    }
}
