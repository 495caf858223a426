//! Nodes of the expression DAG.
//!
//! A node is one operation with ordered operand edges. Operands are
//! [`NodeId`]s into the same [`NodeArena`]; a node may be the operand of any
//! number of parents, which is what makes the structure a DAG.
//!
//! # Operand Layout
//!
//! | Op              | Operands                 | Extra payload                 |
//! |-----------------|--------------------------|-------------------------------|
//! | `Uninitialized` | none                     |                               |
//! | `Literal`       | none                     | `literal`                     |
//! | `Storage(q)`    | none                     | `name`, `array_dims`          |
//! | `Builtin`       | none                     | `name`                        |
//! | `ArrayDecl`     | none                     | `array_dims`                  |
//! | `Variable`      | `[init]`                 |                               |
//! | `Binary(op)`    | `[lhs, rhs]`             |                               |
//! | `Unary(op)`     | `[operand]`              |                               |
//! | `Construct`     | `[args..]`               |                               |
//! | `Call`          | `[args..]`               | `function` (callee)           |
//! | `ArrayLookup`   | `[base, index]`          | `array_dims` (remaining)      |
//! | `Member`        | `[base]`                 | `function` (component letters)|
//! | `Assign(op)`    | `[prior, value]`         |                               |
//! | `Dependency`    | `[first, second]`        |                               |
//!
//! `Unary` increments and `Assign` read their operand 0 as a place (an
//! lvalue path), not as a value.

use std::fmt;
use std::ops::Index;

use smallvec::{smallvec, SmallVec};

use crate::literal::Literal;
use crate::operators::{AssignOp, BinaryOp, StorageQualifier, UnaryOp};
use crate::types::ValueType;

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Operation tag of a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpKind {
    /// A local declared without a value.
    Uninitialized,
    Literal,
    Storage(StorageQualifier),
    /// Predefined pipeline variable or constant (`gl_Position`, ...).
    Builtin,
    /// Local array declaration.
    ArrayDecl,
    /// Local variable with an initializer; always a named statement.
    Variable,
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// Constructor or cast (`vec4(v, 1.0)`).
    Construct,
    Call,
    ArrayLookup,
    /// Swizzle / component access.
    Member,
    Assign(AssignOp),
    /// Ordering junction: `first` is evaluated before `second` is used.
    Dependency,
}

impl OpKind {
    /// Storage and builtin nodes live in the declaration section.
    #[inline]
    pub const fn is_declaration(self) -> bool {
        matches!(self, Self::Storage(_) | Self::Builtin)
    }

    /// Nodes that denote a named location rather than a computed value.
    #[inline]
    pub const fn is_location(self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Builtin | Self::ArrayDecl | Self::Variable | Self::Uninitialized
        )
    }

    /// Nodes that write their operand 0.
    #[inline]
    pub const fn is_write(self) -> bool {
        match self {
            Self::Assign(_) => true,
            Self::Unary(op) => op.is_increment(),
            _ => false,
        }
    }

    /// Lookup and member access: printed as a path over their base.
    #[inline]
    pub const fn is_path(self) -> bool {
        matches!(self, Self::ArrayLookup | Self::Member)
    }
}

/// A vertex of the expression DAG.
///
/// Op, operands and type never change once pushed; only the `name` of a
/// declaration may be assigned later.
#[derive(Clone, PartialEq, Debug)]
pub struct Node {
    pub op: OpKind,
    pub operands: SmallVec<[NodeId; 3]>,
    pub ty: ValueType,
    /// Declared sizes, outer to inner. Non-empty for array-valued nodes.
    pub array_dims: SmallVec<[u32; 2]>,
    pub literal: Option<Literal>,
    /// Explicit identifier; `None` gets a synthetic one at emission.
    pub name: Option<String>,
    /// Callee for `Call`, component letters for `Member`.
    pub function: Option<String>,
}

impl Node {
    fn bare(op: OpKind, ty: ValueType) -> Self {
        Node {
            op,
            operands: SmallVec::new(),
            ty,
            array_dims: SmallVec::new(),
            literal: None,
            name: None,
            function: None,
        }
    }

    pub fn uninitialized(ty: ValueType) -> Self {
        Self::bare(OpKind::Uninitialized, ty)
    }

    pub fn literal(ty: ValueType, literal: Literal) -> Self {
        Node {
            literal: Some(literal),
            ..Self::bare(OpKind::Literal, ty)
        }
    }

    pub fn storage(
        qualifier: StorageQualifier,
        ty: ValueType,
        dims: &[u32],
        name: impl Into<String>,
    ) -> Self {
        Node {
            array_dims: SmallVec::from_slice(dims),
            name: Some(name.into()),
            ..Self::bare(OpKind::Storage(qualifier), ty)
        }
    }

    pub fn builtin(ty: ValueType, dims: &[u32], name: impl Into<String>) -> Self {
        Node {
            array_dims: SmallVec::from_slice(dims),
            name: Some(name.into()),
            ..Self::bare(OpKind::Builtin, ty)
        }
    }

    pub fn array_decl(ty: ValueType, dims: &[u32]) -> Self {
        Node {
            array_dims: SmallVec::from_slice(dims),
            ..Self::bare(OpKind::ArrayDecl, ty)
        }
    }

    pub fn variable(ty: ValueType, dims: &[u32], init: NodeId) -> Self {
        Node {
            operands: smallvec![init],
            array_dims: SmallVec::from_slice(dims),
            ..Self::bare(OpKind::Variable, ty)
        }
    }

    pub fn binary(op: BinaryOp, ty: ValueType, lhs: NodeId, rhs: NodeId) -> Self {
        Node {
            operands: smallvec![lhs, rhs],
            ..Self::bare(OpKind::Binary(op), ty)
        }
    }

    pub fn unary(op: UnaryOp, ty: ValueType, operand: NodeId) -> Self {
        Node {
            operands: smallvec![operand],
            ..Self::bare(OpKind::Unary(op), ty)
        }
    }

    pub fn construct(ty: ValueType, args: &[NodeId]) -> Self {
        Node {
            operands: SmallVec::from_slice(args),
            ..Self::bare(OpKind::Construct, ty)
        }
    }

    pub fn call(function: impl Into<String>, ty: ValueType, args: &[NodeId]) -> Self {
        Node {
            operands: SmallVec::from_slice(args),
            function: Some(function.into()),
            ..Self::bare(OpKind::Call, ty)
        }
    }

    /// `base[index]`; `dims` are the dimensions left after indexing.
    pub fn array_lookup(ty: ValueType, dims: &[u32], base: NodeId, index: NodeId) -> Self {
        Node {
            operands: smallvec![base, index],
            array_dims: SmallVec::from_slice(dims),
            ..Self::bare(OpKind::ArrayLookup, ty)
        }
    }

    pub fn member(ty: ValueType, base: NodeId, letters: impl Into<String>) -> Self {
        Node {
            operands: smallvec![base],
            function: Some(letters.into()),
            ..Self::bare(OpKind::Member, ty)
        }
    }

    pub fn assign(op: AssignOp, ty: ValueType, dims: &[u32], prior: NodeId, value: NodeId) -> Self {
        Node {
            operands: smallvec![prior, value],
            array_dims: SmallVec::from_slice(dims),
            ..Self::bare(OpKind::Assign(op), ty)
        }
    }

    /// Junction: `first` is ordered before any use of `second`, whose type
    /// and dimensions it carries.
    pub fn dependency(ty: ValueType, dims: &[u32], first: NodeId, second: NodeId) -> Self {
        Node {
            operands: smallvec![first, second],
            array_dims: SmallVec::from_slice(dims),
            ..Self::bare(OpKind::Dependency, ty)
        }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        !self.array_dims.is_empty()
    }

    /// Operand `i`.
    ///
    /// # Panics
    ///
    /// Panics if the node has fewer operands; operand counts are fixed by
    /// the op (see the module table).
    #[inline]
    pub fn operand(&self, i: usize) -> NodeId {
        self.operands
            .get(i)
            .copied()
            .unwrap_or_else(|| panic!("{:?} has no operand {i}", self.op))
    }
}

/// Push-only storage for nodes.
#[derive(Default, Clone, Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its ID.
    ///
    /// # Panics
    ///
    /// Panics if the arena exceeds `u32::MAX - 1` nodes.
    pub fn push(&mut self, node: Node) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&i| i != u32::MAX)
            .unwrap_or_else(|| panic!("node arena overflow"));
        debug_assert!(
            node.operands.iter().all(|o| o.index() < self.nodes.len()),
            "operands must precede their user"
        );
        self.nodes.push(node);
        NodeId::new(index)
    }

    /// Gives a declaration node an explicit identifier.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.nodes[id.index()].name = Some(name.into());
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their IDs, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        // Bounded by the push check.
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
