//! 高速コンパイラ（クロージャ生成型）
//!
//! ツリーを一度だけ走査し、ネストしたクロージャへ変換する。
//! - 変数はコンパイル時にフレームのスロット番号へ解決
//! - 値は検査済みの型に基づき `i64` へ符号化（void = 0, bool = 0/1）
//! - `変数 == 定数` の比較と定数引数の呼び出しは専用クロージャへ特殊化

use super::check::check;
use super::compiled::{CompiledAction, ExpressionCompiler};
use super::error::{CompileError, CompileResult};
use super::tree::{Expr, LabelId, Lambda, Value, VarId, Variable};
use crate::core::CallCounter;
use std::collections::HashMap;

pub const CLOSURE_BACKEND: &str = "closure";

type Thunk = Box<dyn Fn(&mut [i64], &mut CallCounter) -> Flow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Normal(i64),
    Break(LabelId),
}

fn thunk(f: impl Fn(&mut [i64], &mut CallCounter) -> Flow + 'static) -> Thunk {
    Box::new(f)
}

const fn encode(value: Value) -> i64 {
    match value {
        Value::Void => 0,
        Value::Int(value) => value,
        Value::Bool(value) => value as i64,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClosureCompiler;

impl ClosureCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionCompiler for ClosureCompiler {
    fn backend(&self) -> &'static str {
        CLOSURE_BACKEND
    }

    fn compile(&self, lambda: &Lambda) -> CompileResult<CompiledAction> {
        check(lambda)?;

        let mut emitter = Emitter::default();
        let root = emitter.emit(lambda.body())?;
        let slot_count = emitter.slot_count;

        Ok(CompiledAction::new(CLOSURE_BACKEND, move |counter| {
            let mut slots = vec![0_i64; slot_count];
            root(slots.as_mut_slice(), counter);
        }))
    }
}

#[derive(Default)]
struct Emitter {
    scopes: Vec<HashMap<VarId, usize>>,
    slot_count: usize,
}

impl Emitter {
    fn resolve(&self, variable: &Variable) -> CompileResult<usize> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&variable.id()).copied())
            .ok_or_else(|| CompileError::UndefinedVariable {
                name: variable.name().to_string(),
            })
    }

    /// `変数 == 定数` の形ならスロットと定数を返す
    fn slot_equals_constant(&self, left: &Expr, right: &Expr) -> CompileResult<Option<(usize, i64)>> {
        match (left, right) {
            (Expr::Variable(variable), Expr::Constant(value))
            | (Expr::Constant(value), Expr::Variable(variable)) => {
                Ok(Some((self.resolve(variable)?, encode(*value))))
            }
            _ => Ok(None),
        }
    }

    fn emit(&mut self, expr: &Expr) -> CompileResult<Thunk> {
        let emitted = match expr {
            Expr::Constant(value) => {
                let value = encode(*value);
                thunk(move |_, _| Flow::Normal(value))
            }
            Expr::Variable(variable) => {
                let slot = self.resolve(variable)?;
                thunk(move |slots, _| Flow::Normal(slots[slot]))
            }
            Expr::Assign { target, value } => {
                let slot = self.resolve(target)?;
                match value.as_ref() {
                    Expr::Constant(constant) => {
                        let constant = encode(*constant);
                        thunk(move |slots, _| {
                            slots[slot] = constant;
                            Flow::Normal(constant)
                        })
                    }
                    other => {
                        let value = self.emit(other)?;
                        thunk(move |slots, counter| match value(slots, counter) {
                            Flow::Normal(value) => {
                                slots[slot] = value;
                                Flow::Normal(value)
                            }
                            escape => escape,
                        })
                    }
                }
            }
            Expr::PostDecrementAssign(target) => {
                let slot = self.resolve(target)?;
                thunk(move |slots, _| {
                    let current = slots[slot];
                    slots[slot] = current.wrapping_sub(1);
                    Flow::Normal(current)
                })
            }
            Expr::Equal(left, right) => {
                if let Some((slot, constant)) = self.slot_equals_constant(left, right)? {
                    thunk(move |slots, _| Flow::Normal((slots[slot] == constant) as i64))
                } else {
                    let left = self.emit(left)?;
                    let right = self.emit(right)?;
                    thunk(move |slots, counter| {
                        let lhs = match left(slots, counter) {
                            Flow::Normal(value) => value,
                            escape => return escape,
                        };
                        match right(slots, counter) {
                            Flow::Normal(rhs) => Flow::Normal((lhs == rhs) as i64),
                            escape => escape,
                        }
                    })
                }
            }
            Expr::IfThen { test, then } => self.emit_if_then(test, then)?,
            Expr::Block { variables, body } => self.emit_block(variables, body)?,
            Expr::Loop { body, break_label } => {
                let body = self.emit(body)?;
                let label = break_label.id();
                thunk(move |slots, counter| loop {
                    match body(slots, counter) {
                        Flow::Normal(_) => {}
                        Flow::Break(target) if target == label => return Flow::Normal(0),
                        escape => return escape,
                    }
                })
            }
            Expr::Break(label) => {
                let label = label.id();
                thunk(move |_, _| Flow::Break(label))
            }
            Expr::Call { operation, args } => {
                let operation = *operation;
                match args.as_slice() {
                    [Expr::Constant(constant)] => {
                        let input = encode(*constant);
                        thunk(move |_, counter| Flow::Normal(operation.call(counter, input)))
                    }
                    _ => {
                        let args = args
                            .iter()
                            .map(|arg| self.emit(arg))
                            .collect::<CompileResult<Vec<_>>>()?;
                        thunk(move |slots, counter| {
                            let mut input = 0;
                            for (index, arg) in args.iter().enumerate() {
                                match arg(slots, counter) {
                                    Flow::Normal(value) if index == 0 => input = value,
                                    Flow::Normal(_) => {}
                                    escape => return escape,
                                }
                            }
                            Flow::Normal(operation.call(counter, input))
                        })
                    }
                }
            }
        };
        Ok(emitted)
    }

    fn emit_if_then(&mut self, test: &Expr, then: &Expr) -> CompileResult<Thunk> {
        // if (変数 == 定数) break label; はループ脱出の定型なので1つのクロージャにまとめる
        if let (Expr::Equal(left, right), Expr::Break(label)) = (test, then) {
            if let Some((slot, constant)) = self.slot_equals_constant(left, right)? {
                let label = label.id();
                return Ok(thunk(move |slots, _| {
                    if slots[slot] == constant {
                        Flow::Break(label)
                    } else {
                        Flow::Normal(0)
                    }
                }));
            }
        }

        let test = self.emit(test)?;
        let then = self.emit(then)?;
        Ok(thunk(move |slots, counter| match test(slots, counter) {
            Flow::Normal(0) => Flow::Normal(0),
            Flow::Normal(_) => match then(slots, counter) {
                Flow::Normal(_) => Flow::Normal(0),
                escape => escape,
            },
            escape => escape,
        }))
    }

    fn emit_block(&mut self, variables: &[Variable], body: &[Expr]) -> CompileResult<Thunk> {
        let mut scope = HashMap::with_capacity(variables.len());
        for variable in variables {
            scope.insert(variable.id(), self.slot_count);
            self.slot_count += 1;
        }
        let declared: Vec<usize> = scope.values().copied().collect();

        self.scopes.push(scope);
        let body = body
            .iter()
            .map(|expr| self.emit(expr))
            .collect::<CompileResult<Vec<_>>>();
        self.scopes.pop();
        let body = body?;

        Ok(thunk(move |slots, counter| {
            for &slot in &declared {
                slots[slot] = 0;
            }
            let mut last = Flow::Normal(0);
            for expr in &body {
                last = expr(slots, counter);
                if let Flow::Break(_) = last {
                    break;
                }
            }
            last
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::tree::{counted_call_loop, ExprType, ExpressionBuilder};
    use crate::operation::Operation;

    fn compile(lambda: &Lambda) -> CompiledAction {
        ClosureCompiler::new().compile(lambda).unwrap()
    }

    #[test]
    fn test_closure_loop_calls_operation_n_times() {
        let action = compile(&counted_call_loop(Operation::do_nothing_useful(), 1_000));
        let mut counter = CallCounter::new();

        action.invoke(&mut counter);

        assert_eq!(counter.get(), 1_000);
        assert_eq!(action.backend(), CLOSURE_BACKEND);
    }

    #[test]
    fn test_zero_iterations_never_calls() {
        let action = compile(&counted_call_loop(Operation::do_nothing_useful(), 0));
        let mut counter = CallCounter::new();

        action.invoke(&mut counter);

        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_generic_paths_match_specialized_paths() {
        // 特殊化されない形（変数同士の比較・変数引数の呼び出し）でも同じ回数になる
        let mut builder = ExpressionBuilder::new();
        let i = builder.variable(ExprType::Int, "i");
        let zero = builder.variable(ExprType::Int, "zero");
        let done = builder.label("done");

        let lambda = Lambda::new(Expr::block(
            vec![i.clone(), zero.clone()],
            vec![
                Expr::assign(&i, Expr::constant(7)),
                Expr::assign(&zero, Expr::variable(&zero)),
                Expr::loop_with_break(
                    Expr::block(
                        vec![],
                        vec![
                            Expr::if_then(
                                Expr::equal(Expr::variable(&i), Expr::variable(&zero)),
                                Expr::block(vec![], vec![Expr::break_to(&done)]),
                            ),
                            Expr::call(
                                Operation::do_nothing_useful(),
                                vec![Expr::post_decrement_assign(&i)],
                            ),
                        ],
                    ),
                    &done,
                ),
            ],
        ));

        let action = compile(&lambda);
        let mut counter = CallCounter::new();
        action.invoke(&mut counter);

        assert_eq!(counter.get(), 7);
    }

    #[test]
    fn test_block_variables_reset_on_each_entry() {
        // ループ内ブロックの変数は毎回既定値0から始まる
        let mut builder = ExpressionBuilder::new();
        let n = builder.variable(ExprType::Int, "n");
        let flag = builder.variable(ExprType::Bool, "flag");
        let done = builder.label("done");

        let lambda = Lambda::new(Expr::block(
            vec![n.clone()],
            vec![
                Expr::assign(&n, Expr::constant(3)),
                Expr::loop_with_break(
                    Expr::block(
                        vec![flag.clone()],
                        vec![
                            Expr::if_then(
                                Expr::equal(Expr::variable(&flag), Expr::bool_constant(true)),
                                Expr::call(Operation::do_nothing_useful(), vec![Expr::constant(1)]),
                            ),
                            Expr::assign(&flag, Expr::bool_constant(true)),
                            Expr::if_then(
                                Expr::equal(Expr::variable(&n), Expr::constant(0)),
                                Expr::break_to(&done),
                            ),
                            Expr::post_decrement_assign(&n),
                        ],
                    ),
                    &done,
                ),
            ],
        ));

        let action = compile(&lambda);
        let mut counter = CallCounter::new();
        action.invoke(&mut counter);

        assert_eq!(counter.get(), 0);
    }
}
