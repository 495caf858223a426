//! The graph-owning builder context.
//!
//! Every builder operation appends nodes to the context's arena and returns
//! a [`Handle`]. Pure operations (operators, constructors, calls) always
//! create a fresh value handle; declarations create persistent handles
//! whose writes are tracked (see `tracker`).

use rustc_hash::{FxHashMap, FxHashSet};
use shade_builtins::{BuiltinCatalog, ShaderStage, VariableAccess};
use shade_ir::{
    is_reserved, AssignOp, BinaryOp, Literal, Node, NodeArena, NodeId, Scalar,
    StorageQualifier, Swizzle, UnaryOp, ValueType,
};
use smallvec::SmallVec;

use crate::error::BuildError;
use crate::handle::{Handle, HandleData, HandleKind};
use crate::typing;

/// Builder state for one shader.
///
/// Owns the node arena, the handle table and the root registry. Borrows the
/// builtin catalog it resolves calls and `gl_*` variables against.
pub struct ShaderContext<'c> {
    catalog: &'c BuiltinCatalog,
    stage: ShaderStage,
    pub(crate) arena: NodeArena,
    pub(crate) handles: Vec<HandleData>,
    /// Externally observable variables, in registration order.
    shells: Vec<Handle>,
    /// Explicit identifiers in use.
    names: FxHashSet<String>,
    builtins: FxHashMap<&'static str, Handle>,
}

impl<'c> ShaderContext<'c> {
    pub fn new(catalog: &'c BuiltinCatalog, stage: ShaderStage) -> Self {
        ShaderContext {
            catalog,
            stage,
            arena: NodeArena::new(),
            handles: Vec::new(),
            shells: Vec::new(),
            names: FxHashSet::default(),
            builtins: FxHashMap::default(),
        }
    }

    pub fn catalog(&self) -> &'c BuiltinCatalog {
        self.catalog
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Handles registered as roots (outputs, varyings, buffers, shared
    /// variables and written builtin outputs).
    pub fn shells(&self) -> &[Handle] {
        &self.shells
    }

    /// Current node of every root, in registration order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.shells.iter().map(|h| self.handles[h.index()].node)
    }

    pub fn ty(&self, h: Handle) -> Result<ValueType, BuildError> {
        Ok(self.data(h)?.ty)
    }

    pub fn dims(&self, h: Handle) -> Result<&[u32], BuildError> {
        Ok(&self.data(h)?.dims)
    }

    /// The node `h` designates right now: its value for plain locals, its
    /// latest write for variables.
    pub fn current_node(&self, h: Handle) -> Result<NodeId, BuildError> {
        Ok(self.data(h)?.node)
    }

    // ── Declarations ──────────────────────────────────────────────────

    /// Declares a storage variable. Root qualifiers register a shell.
    pub fn declare(
        &mut self,
        qualifier: StorageQualifier,
        ty: ValueType,
        name: &str,
    ) -> Result<Handle, BuildError> {
        self.declare_array(qualifier, ty, &[], name)
    }

    /// Declares a storage variable with array dimensions (outer first).
    pub fn declare_array(
        &mut self,
        qualifier: StorageQualifier,
        ty: ValueType,
        dims: &[u32],
        name: &str,
    ) -> Result<Handle, BuildError> {
        check_dims(dims)?;
        self.claim_name(name)?;
        let node = self.arena.push(Node::storage(qualifier, ty, dims, name));
        let mut data = HandleData::new(HandleKind::Storage, ty, dims, node);
        data.writable = qualifier.is_writable();
        let h = self.alloc(data);
        if qualifier.is_root() {
            self.shells.push(h);
        }
        tracing::trace!(name, qualifier = qualifier.keyword(), "declared storage");
        Ok(h)
    }

    /// A `gl_*` pipeline variable or constant of the context's stage.
    ///
    /// Outputs register a shell. Repeated lookups return the same handle.
    pub fn builtin(&mut self, name: &str) -> Result<Handle, BuildError> {
        if let Some(&h) = self.builtins.get(name) {
            return Ok(h);
        }
        let var = *self
            .catalog
            .variable(self.stage, name)
            .ok_or_else(|| BuildError::UnknownVariable {
                name: name.to_owned(),
                stage: self.stage,
            })?;
        let node = self.arena.push(Node::builtin(var.ty, &[], var.name));
        let mut data = HandleData::new(HandleKind::Storage, var.ty, &[], node);
        data.writable = var.access == VariableAccess::Out;
        let h = self.alloc(data);
        if var.access == VariableAccess::Out {
            self.shells.push(h);
        }
        self.builtins.insert(var.name, h);
        Ok(h)
    }

    /// A local declared without a value.
    pub fn local(&mut self, ty: ValueType) -> Handle {
        let node = self.arena.push(Node::uninitialized(ty));
        self.alloc(HandleData::new(HandleKind::Value, ty, &[], node))
    }

    /// A local array.
    pub fn local_array(&mut self, ty: ValueType, dims: &[u32]) -> Result<Handle, BuildError> {
        if dims.is_empty() {
            return Err(BuildError::ZeroSizedArray);
        }
        check_dims(dims)?;
        let node = self.arena.push(Node::array_decl(ty, dims));
        Ok(self.alloc(HandleData::new(HandleKind::Variable, ty, dims, node)))
    }

    /// Gives a local an explicit identifier.
    ///
    /// A plain local becomes a named variable: later writes print as
    /// assignments to that name instead of rebinding.
    pub fn set_name(&mut self, h: Handle, name: &str) -> Result<(), BuildError> {
        match self.data(h)?.kind {
            HandleKind::Value => {
                self.claim_name(name)?;
                self.promote(h, Some(name.to_owned()))
            }
            HandleKind::Variable => {
                self.claim_name(name)?;
                let origin = self.data(h)?.origin;
                self.arena.set_name(origin, name);
                Ok(())
            }
            HandleKind::Storage | HandleKind::Element { .. } | HandleKind::Swizzle { .. } => {
                Err(BuildError::NotNameable)
            }
        }
    }

    // ── Literals ──────────────────────────────────────────────────────

    /// A constant of type `ty`.
    ///
    /// One value broadcasts to every component (the diagonal for
    /// matrices); otherwise one value per component, column-major.
    pub fn literal(&mut self, ty: ValueType, values: &[Scalar]) -> Result<Handle, BuildError> {
        if values.iter().any(|v| v.kind() != ty.scalar) {
            return Err(BuildError::LiteralKind(ty));
        }
        let n = ty.components();
        let slots: SmallVec<[Scalar; 16]> = match *values {
            [single] if ty.is_matrix() => diagonal(ty, single),
            [single] => std::iter::repeat(single).take(n).collect(),
            _ if values.len() == n => SmallVec::from_slice(values),
            _ => {
                return Err(BuildError::LiteralArity {
                    ty,
                    expected: n,
                    found: values.len(),
                })
            }
        };
        let literal = Literal::new(slots).ok_or(BuildError::LiteralKind(ty))?;
        Ok(self.value(Node::literal(ty, literal)))
    }

    fn scalar(&mut self, value: Scalar) -> Handle {
        let ty = ValueType::scalar(value.kind());
        self.value(Node::literal(ty, Literal::scalar(value)))
    }

    pub fn float(&mut self, value: f32) -> Handle {
        self.scalar(Scalar::Float(value))
    }

    pub fn double(&mut self, value: f64) -> Handle {
        self.scalar(Scalar::Double(value))
    }

    pub fn int(&mut self, value: i32) -> Handle {
        self.scalar(Scalar::Int(value))
    }

    pub fn uint(&mut self, value: u32) -> Handle {
        self.scalar(Scalar::Uint(value))
    }

    pub fn bool(&mut self, value: bool) -> Handle {
        self.scalar(Scalar::Bool(value))
    }

    // ── Expressions ───────────────────────────────────────────────────

    pub fn binary_op(
        &mut self,
        op: BinaryOp,
        lhs: Handle,
        rhs: Handle,
    ) -> Result<Handle, BuildError> {
        let ty = typing::binary(op, self.operand_type(lhs)?, self.operand_type(rhs)?)?;
        let l = self.read(lhs)?;
        let r = self.read(rhs)?;
        let node = self.arena.push(Node::binary(op, ty, l, r));
        self.note_read(lhs, node);
        self.note_read(rhs, node);
        Ok(self.wrap(node))
    }

    /// Unary operators. Increments and decrements write their operand and
    /// return the value the expression evaluates to.
    pub fn unary_op(&mut self, op: UnaryOp, operand: Handle) -> Result<Handle, BuildError> {
        if op.is_increment() {
            return self.increment(op, operand);
        }
        let ty = typing::unary(op, self.operand_type(operand)?)?;
        let v = self.read(operand)?;
        let node = self.arena.push(Node::unary(op, ty, v));
        self.note_read(operand, node);
        Ok(self.wrap(node))
    }

    /// Constructor or cast: `ty(args..)`.
    pub fn construct(&mut self, ty: ValueType, args: &[Handle]) -> Result<Handle, BuildError> {
        let types = args
            .iter()
            .map(|&a| self.operand_type(a))
            .collect::<Result<SmallVec<[ValueType; 4]>, _>>()?;
        typing::construct(ty, &types)?;
        self.build_call(args, |operands| Node::construct(ty, operands))
    }

    /// Builtin function call, typed through the catalog.
    pub fn call(&mut self, name: &str, args: &[Handle]) -> Result<Handle, BuildError> {
        if !self.catalog.has_function(name) {
            return Err(BuildError::UnknownFunction(name.to_owned()));
        }
        let types = args
            .iter()
            .map(|&a| self.operand_type(a))
            .collect::<Result<SmallVec<[ValueType; 4]>, _>>()?;
        let ty = self
            .catalog
            .resolve(name, &types)
            .ok_or_else(|| BuildError::NoMatchingOverload {
                name: name.to_owned(),
                args: typing::type_list(&types),
            })?;
        self.build_call(args, |operands| Node::call(name, ty, operands))
    }

    fn build_call(
        &mut self,
        args: &[Handle],
        build: impl FnOnce(&[NodeId]) -> Node,
    ) -> Result<Handle, BuildError> {
        let operands = args
            .iter()
            .map(|&a| self.read(a))
            .collect::<Result<SmallVec<[NodeId; 4]>, _>>()?;
        let node = self.arena.push(build(&operands));
        for &a in args {
            self.note_read(a, node);
        }
        Ok(self.wrap(node))
    }

    /// A plain local holding the current value of `h`.
    ///
    /// Later writes to `h` do not affect the copy.
    pub fn copy(&mut self, h: Handle) -> Result<Handle, BuildError> {
        let value = self.snapshot(h)?;
        Ok(self.wrap(value))
    }

    /// `array[index]`: an element of an array, a column of a matrix or a
    /// component of a vector.
    ///
    /// The element is an lvalue whenever `array` is.
    pub fn index(&mut self, array: Handle, index: Handle) -> Result<Handle, BuildError> {
        let index_ty = self.operand_type(index)?;
        if index_ty != ValueType::INT && index_ty != ValueType::UINT {
            return Err(BuildError::BadIndex(index_ty));
        }
        let base = self.data(array)?;
        let (ty, dims): (ValueType, SmallVec<[u32; 2]>) = match base.dims.split_first() {
            Some((_, rest)) => (base.ty, SmallVec::from_slice(rest)),
            None => (
                base.ty
                    .index_type()
                    .ok_or(BuildError::NotIndexable(base.ty))?,
                SmallVec::new(),
            ),
        };
        let index = self.snapshot(index)?;
        self.derive(array, HandleKind::Element { base: array, index }, ty, &dims)
    }

    /// `vector.letters` with `xyzw`, `rgba` or `stpq` letters.
    ///
    /// Writable when `vector` is and no component repeats.
    pub fn member(&mut self, vector: Handle, letters: &str) -> Result<Handle, BuildError> {
        let base = self.data(vector)?;
        if !base.dims.is_empty() {
            return Err(BuildError::NotSwizzlable(format!("{}[]", base.ty)));
        }
        let not_swizzlable = || BuildError::NotSwizzlable(base.ty.to_string());
        let arity = base.ty.vector_arity().ok_or_else(not_swizzlable)?;
        let swizzle = Swizzle::parse(letters, arity)?;
        let ty = base.ty.with_components(swizzle.len()).ok_or_else(not_swizzlable)?;
        let lvalue = swizzle.is_lvalue();
        let h = self.derive(vector, HandleKind::Swizzle { base: vector, swizzle }, ty, &[])?;
        if !lvalue {
            self.handles[h.index()].writable = false;
        }
        Ok(h)
    }

    // ── Writes ────────────────────────────────────────────────────────

    /// `target op value`. Returns `target`, which now designates the write.
    ///
    /// Plain locals are rebound without growing the graph; every other
    /// target records an `assign` node.
    pub fn assign(
        &mut self,
        op: AssignOp,
        target: Handle,
        value: Handle,
    ) -> Result<Handle, BuildError> {
        let t = self.data(target)?;
        if !t.writable {
            return Err(BuildError::NotAssignable);
        }
        let (target_ty, target_dims) = (t.ty, t.dims.clone());
        let v = self.data(value)?;
        let mismatch = || BuildError::AssignMismatch {
            target: describe(target_ty, &target_dims),
            value: describe(v.ty, &v.dims),
        };
        match op.binary() {
            None if v.ty != target_ty || v.dims != target_dims => return Err(mismatch()),
            None => {}
            Some(bin) => {
                if !target_dims.is_empty() || !v.dims.is_empty() {
                    return Err(mismatch());
                }
                if typing::binary(bin, target_ty, v.ty).ok() != Some(target_ty) {
                    return Err(mismatch());
                }
            }
        }

        if !self.data(target)?.kind.is_persistent() {
            let rhs = self.snapshot(value)?;
            let new = match op.binary() {
                None => rhs,
                Some(bin) => {
                    let current = self.data(target)?.node;
                    self.arena.push(Node::binary(bin, target_ty, current, rhs))
                }
            };
            self.rebind(target, new);
            return Ok(target);
        }

        self.promote_root(target)?;
        let rhs = self.read(value)?;
        let event = self.write(target, Some(rhs), |ty, dims, prior| {
            Node::assign(op, ty, dims, prior, rhs)
        })?;
        if self.root(value)? != self.root(target)? {
            self.note_read(value, event);
        }
        Ok(target)
    }

    fn increment(&mut self, op: UnaryOp, target: Handle) -> Result<Handle, BuildError> {
        let t = self.data(target)?;
        if !t.writable {
            return Err(BuildError::NotAssignable);
        }
        let ty = typing::unary(op, self.operand_type(target)?)?;
        if self.data(target)?.kind.is_persistent() {
            self.promote_root(target)?;
            let event = self.write(target, None, |ty, _, prior| Node::unary(op, ty, prior))?;
            return Ok(self.wrap(event));
        }

        // Plain local: `x++` is `x = x + 1` evaluating to the old value.
        let Some(step) = op.step() else {
            return Err(BuildError::UnaryOperand {
                op: op.as_symbol(),
                operand: ty,
            });
        };
        let old = self.data(target)?.node;
        let one = Node::literal(
            ValueType::scalar(ty.scalar),
            Literal::scalar(Scalar::one(ty.scalar)),
        );
        let one = self.arena.push(one);
        let new = self.arena.push(Node::binary(step, ty, old, one));
        self.rebind(target, new);
        Ok(self.wrap(if op.is_prefix() { new } else { old }))
    }

    // ── Internals ─────────────────────────────────────────────────────

    pub(crate) fn data(&self, h: Handle) -> Result<&HandleData, BuildError> {
        self.handles.get(h.index()).ok_or(BuildError::ForeignHandle)
    }

    pub(crate) fn alloc(&mut self, data: HandleData) -> Handle {
        let index = u32::try_from(self.handles.len())
            .unwrap_or_else(|_| panic!("handle table overflow"));
        self.handles.push(data);
        Handle::new(index)
    }

    /// New value handle for a fresh node.
    fn value(&mut self, node: Node) -> Handle {
        let id = self.arena.push(node);
        self.wrap(id)
    }

    /// New value handle designating an existing node.
    pub(crate) fn wrap(&mut self, id: NodeId) -> Handle {
        let node = &self.arena[id];
        let data = HandleData::new(HandleKind::Value, node.ty, &node.array_dims, id);
        self.alloc(data)
    }

    /// Type of a handle used as an operator operand; arrays are rejected.
    fn operand_type(&self, h: Handle) -> Result<ValueType, BuildError> {
        let data = self.data(h)?;
        if data.dims.is_empty() {
            Ok(data.ty)
        } else {
            Err(BuildError::ArrayOperand(describe(data.ty, &data.dims)))
        }
    }

    fn claim_name(&mut self, name: &str) -> Result<(), BuildError> {
        if !is_identifier(name) || self.catalog.has_function(name) {
            return Err(BuildError::InvalidName(name.to_owned()));
        }
        if !self.names.insert(name.to_owned()) {
            return Err(BuildError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }
}

fn check_dims(dims: &[u32]) -> Result<(), BuildError> {
    if dims.contains(&0) {
        Err(BuildError::ZeroSizedArray)
    } else {
        Ok(())
    }
}

/// Identity matrix scaled by `value`, column-major.
fn diagonal(ty: ValueType, value: Scalar) -> SmallVec<[Scalar; 16]> {
    let rows = match ty.shape {
        shade_ir::Shape::Matrix { rows, .. } => usize::from(rows),
        shade_ir::Shape::Scalar | shade_ir::Shape::Vector(_) => 1,
    };
    let zero = Scalar::zero(ty.scalar);
    (0..ty.components())
        .map(|i| if i / rows == i % rows { value } else { zero })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with("gl_")
        && !name.contains("__")
        && !is_reserved(name)
}

pub(crate) fn describe(ty: ValueType, dims: &[u32]) -> String {
    let mut out = ty.to_string();
    for d in dims {
        out.push_str(&format!("[{d}]"));
    }
    out
}
