//! 宣言的な式ツリー
//!
//! 制御フロー（ブロック・ループ・break・条件分岐）と関数呼び出しだけを持つ
//! 小さな式言語。ツリー自体は実行できず、[`ExpressionCompiler`] によって
//! 呼び出し可能なアクションへ変換される。
//!
//! [`ExpressionCompiler`]: super::ExpressionCompiler

use crate::operation::Operation;
use std::fmt;
use std::sync::Arc;

/// 式の静的な型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprType {
    Void,
    Int,
    Bool,
}

impl ExprType {
    /// 変数宣言時の既定値
    pub const fn default_value(&self) -> Value {
        match self {
            Self::Void => Value::Void,
            Self::Int => Value::Int(0),
            Self::Bool => Value::Bool(false),
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Int => f.write_str("int"),
            Self::Bool => f.write_str("bool"),
        }
    }
}

/// 実行時の値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Void,
    Int(i64),
    Bool(bool),
}

impl Value {
    pub const fn ty(&self) -> ExprType {
        match self {
            Self::Void => ExprType::Void,
            Self::Int(_) => ExprType::Int,
            Self::Bool(_) => ExprType::Bool,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u32);

/// 型付きの変数。`Block` で宣言されたスコープ内でのみ参照できる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    id: VarId,
    name: Arc<str>,
    ty: ExprType,
}

impl Variable {
    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ExprType {
        self.ty
    }
}

/// ループ脱出用のラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    id: LabelId,
    name: Arc<str>,
}

impl Label {
    pub fn id(&self) -> LabelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Value),
    Variable(Variable),
    Assign {
        target: Variable,
        value: Box<Expr>,
    },
    /// 変数を1減らし、減らす前の値を返す
    PostDecrementAssign(Variable),
    Equal(Box<Expr>, Box<Expr>),
    IfThen {
        test: Box<Expr>,
        then: Box<Expr>,
    },
    /// 変数を宣言し、本体を順に評価する。値は最後の式の値
    Block {
        variables: Vec<Variable>,
        body: Vec<Expr>,
    },
    /// `break_label` への Break が来るまで本体を繰り返す
    Loop {
        body: Box<Expr>,
        break_label: Label,
    },
    Break(Label),
    Call {
        operation: Operation,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn constant(value: i64) -> Self {
        Self::Constant(Value::Int(value))
    }

    pub fn bool_constant(value: bool) -> Self {
        Self::Constant(Value::Bool(value))
    }

    pub fn variable(variable: &Variable) -> Self {
        Self::Variable(variable.clone())
    }

    pub fn assign(target: &Variable, value: Expr) -> Self {
        Self::Assign {
            target: target.clone(),
            value: Box::new(value),
        }
    }

    pub fn post_decrement_assign(target: &Variable) -> Self {
        Self::PostDecrementAssign(target.clone())
    }

    pub fn equal(left: Expr, right: Expr) -> Self {
        Self::Equal(Box::new(left), Box::new(right))
    }

    pub fn if_then(test: Expr, then: Expr) -> Self {
        Self::IfThen {
            test: Box::new(test),
            then: Box::new(then),
        }
    }

    pub fn block(variables: Vec<Variable>, body: Vec<Expr>) -> Self {
        Self::Block { variables, body }
    }

    pub fn loop_with_break(body: Expr, break_label: &Label) -> Self {
        Self::Loop {
            body: Box::new(body),
            break_label: break_label.clone(),
        }
    }

    pub fn break_to(label: &Label) -> Self {
        Self::Break(label.clone())
    }

    pub fn call(operation: Operation, args: Vec<Expr>) -> Self {
        Self::Call { operation, args }
    }
}

/// 引数なし・戻り値なしのアクションを表すラムダ
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    body: Expr,
}

impl Lambda {
    pub fn new(body: Expr) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }
}

/// 変数・ラベルの一意なIDを払い出すビルダー
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    next_variable: u32,
    next_label: u32,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&mut self, ty: ExprType, name: &str) -> Variable {
        let id = VarId(self.next_variable);
        self.next_variable += 1;
        Variable {
            id,
            name: Arc::from(name),
            ty,
        }
    }

    pub fn label(&mut self, name: &str) -> Label {
        let id = LabelId(self.next_label);
        self.next_label += 1;
        Label {
            id,
            name: Arc::from(name),
        }
    }
}

/// 「N 回オペレーションを呼ぶ」宣言的ループを構築
///
/// ```text
/// {
///     int i;
///     i = n;
///     loop {
///         if (i == 0) break looplabel;
///         i--;
///         operation(1);
///     } looplabel:
/// }
/// ```
pub fn counted_call_loop(operation: Operation, n: i64) -> Lambda {
    let mut builder = ExpressionBuilder::new();
    let i = builder.variable(ExprType::Int, "i");
    let looplabel = builder.label("looplabel");

    let body = Expr::block(
        vec![],
        vec![
            Expr::if_then(
                Expr::equal(Expr::variable(&i), Expr::constant(0)),
                Expr::break_to(&looplabel),
            ),
            Expr::post_decrement_assign(&i),
            Expr::call(operation, vec![Expr::constant(1)]),
        ],
    );

    Lambda::new(Expr::block(
        vec![i.clone()],
        vec![
            Expr::assign(&i, Expr::constant(n)),
            Expr::loop_with_break(body, &looplabel),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_issues_unique_ids() {
        let mut builder = ExpressionBuilder::new();
        let a = builder.variable(ExprType::Int, "a");
        let b = builder.variable(ExprType::Int, "a");
        let l1 = builder.label("l");
        let l2 = builder.label("l");

        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
        assert_ne!(l1.id(), l2.id());
    }

    #[test]
    fn test_value_types() {
        assert_eq!(Value::Int(3).ty(), ExprType::Int);
        assert_eq!(Value::Bool(true).ty(), ExprType::Bool);
        assert_eq!(Value::Void.ty(), ExprType::Void);
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert!(Value::Bool(true).is_true());
        assert!(!Value::Int(1).is_true());
        assert_eq!(ExprType::Int.default_value(), Value::Int(0));
    }

    #[test]
    fn test_counted_call_loop_shape() {
        let lambda = counted_call_loop(Operation::do_nothing_useful(), 10);

        match lambda.body() {
            Expr::Block { variables, body } => {
                assert_eq!(variables.len(), 1);
                assert_eq!(variables[0].name(), "i");
                assert_eq!(body.len(), 2);
                assert!(matches!(body[0], Expr::Assign { .. }));
                assert!(matches!(body[1], Expr::Loop { .. }));
            }
            other => panic!("unexpected root: {other:?}"),
        }
    }
}
