//! 汎用コンパイラ（ツリー解釈型）
//!
//! 検査済みのツリーをそのまま保持し、呼び出しのたびにマップベースの環境で
//! ツリーを辿って評価する。特殊化は一切行わない基準実装。

use super::check::check;
use super::compiled::{CompiledAction, ExpressionCompiler};
use super::error::CompileResult;
use super::tree::{Expr, LabelId, Lambda, Value, VarId, Variable};
use crate::core::CallCounter;
use std::collections::HashMap;
use std::rc::Rc;

pub const INTERPRETER_BACKEND: &str = "interpreter";

#[derive(Debug, Default, Clone, Copy)]
pub struct InterpretingCompiler;

impl InterpretingCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionCompiler for InterpretingCompiler {
    fn backend(&self) -> &'static str {
        INTERPRETER_BACKEND
    }

    fn compile(&self, lambda: &Lambda) -> CompileResult<CompiledAction> {
        check(lambda)?;
        let tree = Rc::new(lambda.clone());
        Ok(CompiledAction::new(INTERPRETER_BACKEND, move |counter| {
            Interpreter::new(counter).eval(tree.body());
        }))
    }
}

/// 評価結果。Break はラベルまで巻き戻される
enum Flow {
    Normal(Value),
    Break(LabelId),
}

macro_rules! value {
    ($flow:expr) => {
        match $flow {
            Flow::Normal(value) => value,
            escape @ Flow::Break(_) => return escape,
        }
    };
}

struct Interpreter<'a> {
    counter: &'a mut CallCounter,
    env: HashMap<VarId, Value>,
}

impl<'a> Interpreter<'a> {
    fn new(counter: &'a mut CallCounter) -> Self {
        Self {
            counter,
            env: HashMap::new(),
        }
    }

    fn read(&self, variable: &Variable) -> Value {
        self.env.get(&variable.id()).copied().unwrap_or(Value::Void)
    }

    fn eval(&mut self, expr: &Expr) -> Flow {
        match expr {
            Expr::Constant(value) => Flow::Normal(*value),
            Expr::Variable(variable) => Flow::Normal(self.read(variable)),
            Expr::Assign { target, value } => {
                let value = value!(self.eval(value));
                self.env.insert(target.id(), value);
                Flow::Normal(value)
            }
            Expr::PostDecrementAssign(target) => match self.read(target) {
                Value::Int(current) => {
                    self.env
                        .insert(target.id(), Value::Int(current.wrapping_sub(1)));
                    Flow::Normal(Value::Int(current))
                }
                _ => Flow::Normal(Value::Void),
            },
            Expr::Equal(left, right) => {
                let left = value!(self.eval(left));
                let right = value!(self.eval(right));
                Flow::Normal(Value::Bool(left == right))
            }
            Expr::IfThen { test, then } => {
                if value!(self.eval(test)).is_true() {
                    value!(self.eval(then));
                }
                Flow::Normal(Value::Void)
            }
            Expr::Block { variables, body } => self.eval_block(variables, body),
            Expr::Loop { body, break_label } => loop {
                match self.eval(body) {
                    Flow::Normal(_) => {}
                    Flow::Break(label) if label == break_label.id() => {
                        return Flow::Normal(Value::Void)
                    }
                    escape @ Flow::Break(_) => return escape,
                }
            },
            Expr::Break(label) => Flow::Break(label.id()),
            Expr::Call { operation, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(value!(self.eval(arg)));
                }
                let input = values.first().and_then(Value::as_int).unwrap_or_default();
                Flow::Normal(Value::Int(operation.call(self.counter, input)))
            }
        }
    }

    fn eval_block(&mut self, variables: &[Variable], body: &[Expr]) -> Flow {
        // 外側の同一変数を退避してから既定値で宣言
        let saved: Vec<(VarId, Option<Value>)> = variables
            .iter()
            .map(|variable| {
                let previous = self
                    .env
                    .insert(variable.id(), variable.ty().default_value());
                (variable.id(), previous)
            })
            .collect();

        let mut result = Flow::Normal(Value::Void);
        for expr in body {
            result = self.eval(expr);
            if matches!(result, Flow::Break(_)) {
                break;
            }
        }

        for (id, previous) in saved.into_iter().rev() {
            match previous {
                Some(value) => {
                    self.env.insert(id, value);
                }
                None => {
                    self.env.remove(&id);
                }
            }
        }
        result
    }
}
