//! Operator and qualifier tables.
//!
//! Tokens are the GLSL spellings. Precedence numbers follow the GLSL
//! operator table; a higher number binds less tightly:
//!
//! - 1: postfix (`[]`, `.`, calls, constructors, `x++`, `x--`)
//! - 2: prefix unary (`-`, `!`, `~`, `++x`, `--x`)
//! - 3: `*` `/` `%`
//! - 4: `+` `-`
//! - 5: `<<` `>>`
//! - 6: `<` `>` `<=` `>=`
//! - 7: `==` `!=`
//! - 8: `&`
//! - 9: `^`
//! - 10: `|`
//! - 11: `&&`
//! - 12: `^^`
//! - 13: `||`

/// Precedence of postfix expressions and atoms.
pub const POSTFIX_PRECEDENCE: u8 = 1;

/// Precedence of prefix unary expressions.
pub const PREFIX_PRECEDENCE: u8 = 2;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,

    // Logical
    And,
    Or,
    Xor,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// All binary operators, in declaration order.
    pub const ALL: [BinaryOp; 19] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Shl,
        Self::Shr,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
    ];

    /// Returns the GLSL token for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::And => "&&",
            Self::Or => "||",
            Self::Xor => "^^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly).
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 3,
            Self::Add | Self::Sub => 4,
            Self::Shl | Self::Shr => 5,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 6,
            Self::Eq | Self::NotEq => 7,
            Self::BitAnd => 8,
            Self::BitXor => 9,
            Self::BitOr => 10,
            Self::And => 11,
            Self::Xor => 12,
            Self::Or => 13,
        }
    }

    #[inline]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    #[inline]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::Shl | Self::Shr)
    }

    #[inline]
    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::BitAnd | Self::BitOr | Self::BitXor)
    }

    #[inline]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Xor)
    }

    #[inline]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::NotEq)
    }

    #[inline]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Lt | Self::LtEq | Self::Gt | Self::GtEq)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::PreInc | Self::PostInc => "++",
            Self::PreDec | Self::PostDec => "--",
        }
    }

    /// Postfix operators print after their operand.
    #[inline]
    pub const fn is_prefix(self) -> bool {
        !matches!(self, Self::PostInc | Self::PostDec)
    }

    /// Increment and decrement write their operand.
    #[inline]
    pub const fn is_increment(self) -> bool {
        matches!(
            self,
            Self::PreInc | Self::PreDec | Self::PostInc | Self::PostDec
        )
    }

    pub const fn precedence(self) -> u8 {
        if self.is_prefix() {
            PREFIX_PRECEDENCE
        } else {
            POSTFIX_PRECEDENCE
        }
    }

    /// The arithmetic an increment performs (`+ 1` or `- 1`).
    pub const fn step(self) -> Option<BinaryOp> {
        match self {
            Self::PreInc | Self::PostInc => Some(BinaryOp::Add),
            Self::PreDec | Self::PostDec => Some(BinaryOp::Sub),
            Self::Neg | Self::Not | Self::BitNot => None,
        }
    }
}

/// Plain and compound assignment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
        }
    }

    /// The binary operation a compound assignment applies; `None` for `=`.
    pub const fn binary(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::AddAssign => Some(BinaryOp::Add),
            Self::SubAssign => Some(BinaryOp::Sub),
            Self::MulAssign => Some(BinaryOp::Mul),
            Self::DivAssign => Some(BinaryOp::Div),
            Self::ModAssign => Some(BinaryOp::Mod),
            Self::ShlAssign => Some(BinaryOp::Shl),
            Self::ShrAssign => Some(BinaryOp::Shr),
            Self::AndAssign => Some(BinaryOp::BitAnd),
            Self::OrAssign => Some(BinaryOp::BitOr),
            Self::XorAssign => Some(BinaryOp::BitXor),
        }
    }
}

/// Storage qualifier of a declared variable.
///
/// Variant order is the order declaration groups are printed in.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum StorageQualifier {
    Uniform,
    In,
    Out,
    Attribute,
    Varying,
    Buffer,
    Shared,
}

impl StorageQualifier {
    /// Declaration keyword, without trailing space.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::In => "in",
            Self::Out => "out",
            Self::Attribute => "attribute",
            Self::Varying => "varying",
            Self::Buffer => "buffer",
            Self::Shared => "shared",
        }
    }

    /// Externally observable storage: always scheduled, even if unread.
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Out | Self::Varying | Self::Buffer | Self::Shared)
    }

    /// Whether shader code may write this storage.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::Uniform | Self::In | Self::Attribute)
    }
}
