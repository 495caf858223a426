//! Statement and expression printing.
//!
//! The printer walks a [`Schedule`] in order. Each body node either becomes
//! one statement line or is inlined into the expression of its user.
//!
//! # Statement Forms
//!
//! | Node                  | Printed as                         |
//! |-----------------------|------------------------------------|
//! | storage               | `qualifier type name[d]..;`        |
//! | uninitialized local   | `type id;`                         |
//! | local array           | `type id[d]..;`                    |
//! | variable              | `type id = init;`                  |
//! | assign                | `lvalue op= rhs;`                  |
//! | increment / decrement | `type id = ++lvalue;` or `lvalue++;` |
//! | other, materialized   | `type id = expr;`                  |
//!
//! Junctions print nothing; builtins are predeclared.
//!
//! # Parentheses
//!
//! Expressions carry a binding strength on the operator scale (`0` atoms,
//! `1` postfix, `2` prefix, `3..=13` binary). A child is wrapped when the
//! slot it fills binds tighter than the child:
//! - binary operand: child looser than the operator, or an equally tight
//!   right operand (`a - (b - c)`)
//! - prefix operand: any prefix or looser child (`-(-x)`)
//! - postfix base: anything looser than postfix, and scalar literals
//! - argument lists, indices and right-hand sides: never

use rustc_hash::FxHashMap;
use shade_ir::{
    Node, NodeArena, NodeId, OpKind, POSTFIX_PRECEDENCE as POSTFIX, PREFIX_PRECEDENCE,
};

use crate::config::CodegenConfig;
use crate::error::{CodegenError, Diagnostic};
use crate::literal;
use crate::names::NameAllocator;
use crate::schedule::Schedule;
use crate::stack::ensure_sufficient_stack;
use crate::writer::GlslWriter;

/// Where an inlined expression is placed.
#[derive(Copy, Clone, Debug)]
enum Slot {
    /// Argument, index, initializer or right-hand side.
    Free,
    /// Operand of a binary operator of the given precedence.
    Operand { precedence: u8, right: bool },
    /// Operand of a prefix operator.
    Prefix,
    /// Base of an index or member access.
    Postfix,
}

pub(crate) struct Printer<'a> {
    arena: &'a NodeArena,
    schedule: &'a Schedule,
    config: &'a CodegenConfig,
    names: NameAllocator,
    /// Identifiers of declared and printed nodes.
    ids: FxHashMap<NodeId, String>,
    out: GlslWriter,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(
        arena: &'a NodeArena,
        schedule: &'a Schedule,
        config: &'a CodegenConfig,
        names: NameAllocator,
    ) -> Self {
        Printer {
            arena,
            schedule,
            config,
            names,
            ids: FxHashMap::default(),
            out: GlslWriter::new(config.indent),
            diagnostics: Vec::new(),
        }
    }

    /// Prints the whole shader.
    pub(crate) fn print(mut self) -> Result<(String, Vec<Diagnostic>), CodegenError> {
        if let Some(version) = self.config.version {
            self.out.writeln(&format!("#version {version}"));
            self.out.newline();
        }

        self.declarations()?;

        let entry = format!("void {}(void)", self.config.entry_point);
        self.out.writeln(&entry);
        self.out.writeln("{");
        self.out.indent();
        let schedule = self.schedule;
        for &id in &schedule.body {
            self.statement(id)?;
        }
        self.out.dedent();
        self.out.writeln("}");

        Ok((self.out.take_output(), self.diagnostics))
    }

    fn declarations(&mut self) -> Result<(), CodegenError> {
        let (arena, schedule) = (self.arena, self.schedule);
        let mut group = None;
        for &id in &schedule.decls {
            let node = &arena[id];
            let name = explicit_name(node, id)?;
            self.ids.insert(id, name.to_owned());
            let OpKind::Storage(qualifier) = node.op else {
                // Builtins are predeclared by the compiler.
                continue;
            };
            if group.is_some_and(|g| g != qualifier) {
                self.out.newline();
            }
            group = Some(qualifier);
            self.out.writeln(&format!(
                "{} {} {name}{};",
                qualifier.keyword(),
                node.ty,
                dims(node)
            ));
        }
        if group.is_some() {
            self.out.newline();
        }
        Ok(())
    }

    // ── Statements ────────────────────────────────────────────────────

    /// Whether `id` is printed as its own statement.
    fn is_statement(&self, id: NodeId) -> bool {
        let node = &self.arena[id];
        match node.op {
            OpKind::ArrayDecl | OpKind::Variable | OpKind::Uninitialized | OpKind::Assign(_) => {
                true
            }
            OpKind::Unary(op) if op.is_increment() => true,
            OpKind::Storage(_) | OpKind::Builtin | OpKind::Dependency => false,
            OpKind::ArrayLookup if node.is_array() => false,
            OpKind::Literal => {
                let shared = self.schedule.fan_in(id) > 1;
                shared && node.literal.as_ref().is_some_and(|l| l.len() > 1)
            }
            OpKind::Binary(_)
            | OpKind::Unary(_)
            | OpKind::Construct
            | OpKind::Call
            | OpKind::ArrayLookup
            | OpKind::Member => {
                let is_operation = !node.op.is_path();
                !self.config.inline_expressions
                    || self.schedule.pinned.contains(&id)
                    || node.name.is_some()
                    || self.schedule.fan_in(id) > 1
                    || (is_operation && self.schedule.write_rhs.contains(&id))
            }
        }
    }

    fn statement(&mut self, id: NodeId) -> Result<(), CodegenError> {
        if !self.is_statement(id) {
            return Ok(());
        }
        let arena = self.arena;
        let node = &arena[id];
        let line = match node.op {
            OpKind::Uninitialized => {
                let name = self.declare(id);
                if self.schedule.uninitialized_reads.contains(&id) {
                    tracing::warn!(%name, "local read before assignment");
                    self.diagnostics
                        .push(Diagnostic::UninitializedRead { name: name.clone() });
                    format!("{} {name}; // uninitialized", node.ty)
                } else {
                    format!("{} {name};", node.ty)
                }
            }
            OpKind::ArrayDecl => {
                let name = self.declare(id);
                format!("{} {name}{};", node.ty, dims(node))
            }
            OpKind::Variable => {
                let init = self.expr(node.operand(0), Slot::Free)?;
                let name = self.declare(id);
                format!("{} {name}{} = {init};", node.ty, dims(node))
            }
            OpKind::Assign(op) => {
                let target = self.lvalue(node.operand(0))?;
                let value = self.expr(node.operand(1), Slot::Free)?;
                let line = format!("{target} {} {value};", op.as_symbol());
                self.ids.insert(id, target);
                line
            }
            OpKind::Unary(op) if op.is_increment() => {
                let target = self.lvalue(node.operand(0))?;
                let step = if op.is_prefix() {
                    format!("{}{target}", op.as_symbol())
                } else {
                    format!("{target}{}", op.as_symbol())
                };
                if self.schedule.fan_in(id) == 0 {
                    self.ids.insert(id, target);
                    format!("{step};")
                } else {
                    let name = self.declare(id);
                    format!("{} {name} = {step};", node.ty)
                }
            }
            _ => {
                let (value, _) = self.inline(id)?;
                let name = self.declare(id);
                format!("{} {name} = {value};", node.ty)
            }
        };
        tracing::trace!(?id, %line, "statement");
        self.out.writeln(&line);
        Ok(())
    }

    /// Assigns the identifier of a statement node.
    fn declare(&mut self, id: NodeId) -> String {
        let name = match &self.arena[id].name {
            Some(name) => name.clone(),
            None => self.names.fresh(),
        };
        self.ids.insert(id, name.clone());
        name
    }

    // ── Expressions ───────────────────────────────────────────────────

    /// Text of `id` used as a value in `slot`.
    fn expr(&self, id: NodeId, slot: Slot) -> Result<String, CodegenError> {
        let id = resolve(self.arena, id);
        let node = &self.arena[id];
        if node.op.is_location() || node.op.is_declaration() || self.is_statement(id) {
            return self.ident(id);
        }
        let (text, precedence) = self.inline(id)?;
        let wrap = match slot {
            Slot::Free => false,
            Slot::Operand {
                precedence: parent,
                right,
            } => precedence > parent || (right && precedence == parent),
            Slot::Prefix => precedence >= PREFIX_PRECEDENCE,
            Slot::Postfix => {
                let bare_literal = node.op == OpKind::Literal && precedence == 0;
                precedence > POSTFIX || bare_literal
            }
        };
        Ok(if wrap { format!("({text})") } else { text })
    }

    /// Text and binding strength of the operation `id` itself.
    fn inline(&self, id: NodeId) -> Result<(String, u8), CodegenError> {
        ensure_sufficient_stack(|| {
            let node = &self.arena[id];
            Ok(match node.op {
                OpKind::Literal => {
                    let lit = node
                        .literal
                        .as_ref()
                        .ok_or_else(|| internal(id, "literal without payload"))?;
                    (literal::literal(node.ty, lit), literal::precedence(lit))
                }
                OpKind::Binary(op) => {
                    let p = op.precedence();
                    let lhs = self.expr(
                        node.operand(0),
                        Slot::Operand {
                            precedence: p,
                            right: false,
                        },
                    )?;
                    let rhs = self.expr(
                        node.operand(1),
                        Slot::Operand {
                            precedence: p,
                            right: true,
                        },
                    )?;
                    (format!("{lhs} {} {rhs}", op.as_symbol()), p)
                }
                OpKind::Unary(op) => {
                    let operand = self.expr(node.operand(0), Slot::Prefix)?;
                    (format!("{}{operand}", op.as_symbol()), op.precedence())
                }
                OpKind::Construct => (format!("{}({})", node.ty, self.args(node)?), POSTFIX),
                OpKind::Call => {
                    let callee = node
                        .function
                        .as_deref()
                        .ok_or_else(|| internal(id, "call without callee"))?;
                    (format!("{callee}({})", self.args(node)?), POSTFIX)
                }
                OpKind::ArrayLookup => {
                    let base = self.expr(node.operand(0), Slot::Postfix)?;
                    let index = self.expr(node.operand(1), Slot::Free)?;
                    (format!("{base}[{index}]"), POSTFIX)
                }
                OpKind::Member => {
                    let base = self.expr(node.operand(0), Slot::Postfix)?;
                    let letters = node
                        .function
                        .as_deref()
                        .ok_or_else(|| internal(id, "member without components"))?;
                    (format!("{base}.{letters}"), POSTFIX)
                }
                OpKind::Uninitialized
                | OpKind::Storage(_)
                | OpKind::Builtin
                | OpKind::ArrayDecl
                | OpKind::Variable
                | OpKind::Assign(_)
                | OpKind::Dependency => {
                    return Err(internal(id, "statement node used as an expression"));
                }
            })
        })
    }

    fn args(&self, node: &Node) -> Result<String, CodegenError> {
        let args = node
            .operands
            .iter()
            .map(|&a| self.expr(a, Slot::Free))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(args.join(", "))
    }

    /// Text of the write target `id`.
    fn lvalue(&self, id: NodeId) -> Result<String, CodegenError> {
        ensure_sufficient_stack(|| {
            let node = &self.arena[id];
            match node.op {
                OpKind::Dependency => self.lvalue(node.operand(1)),
                OpKind::ArrayLookup => {
                    let base = self.lvalue(node.operand(0))?;
                    let index = self.expr(node.operand(1), Slot::Free)?;
                    Ok(format!("{base}[{index}]"))
                }
                OpKind::Member => {
                    let base = self.lvalue(node.operand(0))?;
                    let letters = node
                        .function
                        .as_deref()
                        .ok_or_else(|| internal(id, "member without components"))?;
                    Ok(format!("{base}.{letters}"))
                }
                op if op.is_location() => self.ident(id),
                _ => Err(internal(id, "write to a computed value")),
            }
        })
    }

    /// Identifier of a node printed earlier.
    fn ident(&self, id: NodeId) -> Result<String, CodegenError> {
        self.ids
            .get(&id)
            .cloned()
            .ok_or_else(|| internal(id, "used before its statement"))
    }
}

/// Follows junctions to the node that carries the value.
fn resolve(arena: &NodeArena, mut id: NodeId) -> NodeId {
    while arena[id].op == OpKind::Dependency {
        id = arena[id].operand(1);
    }
    id
}

fn explicit_name(node: &Node, id: NodeId) -> Result<&str, CodegenError> {
    node.name
        .as_deref()
        .ok_or_else(|| internal(id, "declaration without a name"))
}

fn dims(node: &Node) -> String {
    node.array_dims.iter().map(|d| format!("[{d}]")).collect()
}

fn internal(id: NodeId, what: &str) -> CodegenError {
    CodegenError::Internal(format!("{what} ({id:?})"))
}
