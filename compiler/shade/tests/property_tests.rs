//! Property-based tests for GLSL generation.
//!
//! These tests use proptest to build random well-typed expression trees and
//! verify:
//! 1. Precedence: the printed expression parses back to the same tree under
//!    GLSL's operator precedence, for every operator pairing.
//! 2. Literal round-trip: printed float and double constants parse back to
//!    the exact bits.
//! 3. Determinism: building the same tree twice prints the same text.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use shade::{
    generate, AssignOp, BinaryOp, BuiltinCatalog, CodegenConfig, Handle, ShaderContext,
    ShaderStage, StorageQualifier, UnaryOp, ValueType,
};

// -- Expression Trees --

const INT_INPUTS: [&str; 3] = ["a", "b", "c"];
const BOOL_INPUTS: [&str; 2] = ["p", "q"];

#[derive(Clone, Debug)]
enum Expr {
    Input(&'static str),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// The shape a parser recovers from printed text.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Tree {
    Leaf(String),
    Unary(&'static str, Box<Tree>),
    Binary(&'static str, Box<Tree>, Box<Tree>),
}

impl Expr {
    fn tree(&self) -> Tree {
        match self {
            Expr::Input(name) => Tree::Leaf((*name).to_owned()),
            Expr::Unary(op, e) => Tree::Unary(op.as_symbol(), Box::new(e.tree())),
            Expr::Binary(op, l, r) => {
                Tree::Binary(op.as_symbol(), Box::new(l.tree()), Box::new(r.tree()))
            }
        }
    }
}

fn unary(op: UnaryOp, e: Expr) -> Expr {
    Expr::Unary(op, Box::new(e))
}

fn binary((op, l, r): (BinaryOp, Expr, Expr)) -> Expr {
    Expr::Binary(op, Box::new(l), Box::new(r))
}

fn int_expr(depth: u32) -> BoxedStrategy<Expr> {
    let leaf = prop::sample::select(INT_INPUTS.to_vec()).prop_map(Expr::Input);
    if depth == 0 {
        return leaf.boxed();
    }
    let ops = prop::sample::select(
        BinaryOp::ALL
            .into_iter()
            .filter(|op| op.is_arithmetic() || op.is_shift() || op.is_bitwise())
            .collect::<Vec<_>>(),
    );
    let prefix = prop::sample::select(vec![UnaryOp::Neg, UnaryOp::BitNot]);
    prop_oneof![
        2 => leaf,
        1 => (prefix, int_expr(depth - 1)).prop_map(|(op, e)| unary(op, e)),
        3 => (ops, int_expr(depth - 1), int_expr(depth - 1)).prop_map(binary),
    ]
    .boxed()
}

fn bool_expr(depth: u32) -> BoxedStrategy<Expr> {
    let leaf = prop::sample::select(BOOL_INPUTS.to_vec()).prop_map(Expr::Input);
    if depth == 0 {
        return leaf.boxed();
    }
    let logical = prop::sample::select(
        BinaryOp::ALL
            .into_iter()
            .filter(|op| op.is_logical() || op.is_equality())
            .collect::<Vec<_>>(),
    );
    let compare = prop::sample::select(
        BinaryOp::ALL
            .into_iter()
            .filter(|op| op.is_relational() || op.is_equality())
            .collect::<Vec<_>>(),
    );
    prop_oneof![
        2 => leaf,
        1 => bool_expr(depth - 1).prop_map(|e| unary(UnaryOp::Not, e)),
        3 => (logical, bool_expr(depth - 1), bool_expr(depth - 1)).prop_map(binary),
        2 => (compare, int_expr(depth - 1), int_expr(depth - 1)).prop_map(binary),
    ]
    .boxed()
}

fn any_expr() -> impl Strategy<Value = (ValueType, Expr)> {
    prop_oneof![
        int_expr(4).prop_map(|e| (ValueType::INT, e)),
        bool_expr(3).prop_map(|e| (ValueType::BOOL, e)),
    ]
}

// -- Building --

fn build(ctx: &mut ShaderContext<'_>, inputs: &[(&str, Handle)], e: &Expr) -> Handle {
    match e {
        Expr::Input(name) => {
            inputs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, h)| *h)
                .unwrap()
        }
        Expr::Unary(op, e) => {
            let operand = build(ctx, inputs, e);
            ctx.unary_op(*op, operand).unwrap()
        }
        Expr::Binary(op, l, r) => {
            let lhs = build(ctx, inputs, l);
            let rhs = build(ctx, inputs, r);
            ctx.binary_op(*op, lhs, rhs).unwrap()
        }
    }
}

fn print(ty: ValueType, e: &Expr) -> String {
    let catalog = BuiltinCatalog::default();
    let mut ctx = ShaderContext::new(&catalog, ShaderStage::Fragment);
    let mut inputs = Vec::new();
    for name in INT_INPUTS {
        let h = ctx
            .declare(StorageQualifier::Uniform, ValueType::INT, name)
            .unwrap();
        inputs.push((name, h));
    }
    for name in BOOL_INPUTS {
        let h = ctx
            .declare(StorageQualifier::Uniform, ValueType::BOOL, name)
            .unwrap();
        inputs.push((name, h));
    }
    let out = ctx.declare(StorageQualifier::Out, ty, "o").unwrap();
    let value = build(&mut ctx, &inputs, e);
    ctx.assign(AssignOp::Assign, out, value).unwrap();
    generate(&ctx, &CodegenConfig::default()).unwrap().code
}

/// The expression finally stored into `o`, following one temporary.
fn stored_expression(code: &str) -> String {
    let lines: Vec<&str> = code.lines().map(str::trim).collect();
    let stored = lines
        .iter()
        .find_map(|l| l.strip_prefix("o = "))
        .and_then(|l| l.strip_suffix(';'))
        .expect("output is written");
    let definition = format!(" {stored} = ");
    lines
        .iter()
        .find_map(|l| l.split_once(definition.as_str()).map(|(_, rhs)| rhs))
        .and_then(|rhs| rhs.strip_suffix(';'))
        .unwrap_or(stored)
        .to_owned()
}

// -- Parsing --

/// Two-character tokens first so `<<` never lexes as two `<`.
const SYMBOLS: [&str; 23] = [
    "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "^^", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">", "!", "~", "(", ")",
];

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let ident_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        let len = if ident_len > 0 {
            ident_len
        } else {
            SYMBOLS
                .iter()
                .find(|s| rest.starts_with(**s))
                .map(|s| s.len())
                .expect("known token")
        };
        tokens.push(rest[..len].to_owned());
        rest = rest[len..].trim_start();
    }
    tokens
}

/// Precedence climbing over GLSL's binary levels (3 tightest, 13 loosest).
struct Parser {
    tokens: Vec<String>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn next(&mut self) -> String {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn binary_at(&self, level: u8) -> Option<BinaryOp> {
        let token = self.peek()?;
        BinaryOp::ALL
            .into_iter()
            .find(|op| op.as_symbol() == token && op.precedence() == level)
    }

    fn expr(&mut self, level: u8) -> Tree {
        if level < 3 {
            return self.prefix();
        }
        let mut lhs = self.expr(level - 1);
        while let Some(op) = self.binary_at(level) {
            self.pos += 1;
            let rhs = self.expr(level - 1);
            lhs = Tree::Binary(op.as_symbol(), Box::new(lhs), Box::new(rhs));
        }
        lhs
    }

    fn prefix(&mut self) -> Tree {
        for op in [UnaryOp::Neg, UnaryOp::Not, UnaryOp::BitNot] {
            if self.peek() == Some(op.as_symbol()) {
                self.pos += 1;
                return Tree::Unary(op.as_symbol(), Box::new(self.prefix()));
            }
        }
        let token = self.next();
        if token == "(" {
            let inner = self.expr(13);
            assert_eq!(self.next(), ")");
            inner
        } else {
            Tree::Leaf(token)
        }
    }
}

fn parse(text: &str) -> Tree {
    let mut parser = Parser {
        tokens: tokenize(text),
        pos: 0,
    };
    let tree = parser.expr(13);
    assert_eq!(parser.pos, parser.tokens.len(), "trailing tokens in {text}");
    tree
}

/// Number of parenthesis pairs in the printed text.
fn parens(text: &str) -> usize {
    text.matches('(').count()
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_expression_parses_to_the_built_tree((ty, e) in any_expr()) {
        let code = print(ty, &e);
        let text = stored_expression(&code);
        prop_assert_eq!(parse(&text), e.tree(), "printed as {}", text);
    }

    #[test]
    fn generation_is_deterministic((ty, e) in any_expr()) {
        prop_assert_eq!(print(ty, &e), print(ty, &e));
    }

    #[test]
    fn float_literals_round_trip(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        prop_assume!(value.is_finite());
        let text = literal_text(|ctx| ctx.float(value), ValueType::FLOAT);
        let parsed: f32 = text.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), value.to_bits(), "printed as {}", text);
    }

    #[test]
    fn double_literals_round_trip(bits in any::<u64>()) {
        let value = f64::from_bits(bits);
        prop_assume!(value.is_finite());
        let text = literal_text(|ctx| ctx.double(value), ValueType::DOUBLE);
        let digits = text.strip_suffix("lf").expect("double suffix");
        let parsed: f64 = digits.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), value.to_bits(), "printed as {}", text);
    }
}

// -- Fixed Cases --

fn literal_text(make: impl FnOnce(&mut ShaderContext<'_>) -> Handle, ty: ValueType) -> String {
    let catalog = BuiltinCatalog::default();
    let mut ctx = ShaderContext::new(&catalog, ShaderStage::Fragment);
    let out = ctx.declare(StorageQualifier::Out, ty, "o").unwrap();
    let value = make(&mut ctx);
    ctx.assign(AssignOp::Assign, out, value).unwrap();
    let code = generate(&ctx, &CodegenConfig::default()).unwrap().code;
    stored_expression(&code)
}

#[test]
fn awkward_float_literals_round_trip() {
    for value in [0.1_f32, 1e30, -0.0, f32::MIN_POSITIVE, f32::MAX] {
        let text = literal_text(|ctx| ctx.float(value), ValueType::FLOAT);
        let parsed: f32 = text.parse().unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "printed as {text}");
    }
}

#[test]
fn every_operator_pair_wraps_by_precedence() {
    let int_ops: Vec<BinaryOp> = BinaryOp::ALL
        .into_iter()
        .filter(|op| op.is_arithmetic() || op.is_shift() || op.is_bitwise())
        .collect();
    let var = |name: &'static str| Box::new(Expr::Input(name));

    for &outer in &int_ops {
        for &inner in &int_ops {
            let left = Expr::Binary(
                outer,
                Box::new(Expr::Binary(inner, var("a"), var("b"))),
                var("c"),
            );
            let text = stored_expression(&print(ValueType::INT, &left));
            let wrapped = usize::from(inner.precedence() > outer.precedence());
            assert_eq!(parens(&text), wrapped, "{text}");

            let right = Expr::Binary(
                outer,
                var("a"),
                Box::new(Expr::Binary(inner, var("b"), var("c"))),
            );
            let text = stored_expression(&print(ValueType::INT, &right));
            let wrapped = usize::from(inner.precedence() >= outer.precedence());
            assert_eq!(parens(&text), wrapped, "{text}");
        }
    }
}
