// 式ツリーの静的検査
// 両コンパイラが共通で使用し、検査を通過したツリーだけをコード生成に回す

use super::error::{CompileError, CompileResult};
use super::tree::{Expr, ExprType, Lambda, LabelId, VarId, Variable};
use std::collections::HashSet;

/// ラムダ全体を検査し、本体の型を返す
pub fn check(lambda: &Lambda) -> CompileResult<ExprType> {
    Checker::default().type_of(lambda.body())
}

#[derive(Default)]
struct Checker {
    scopes: Vec<Vec<VarId>>,
    loops: Vec<LabelId>,
}

impl Checker {
    fn require_declared(&self, variable: &Variable) -> CompileResult<()> {
        let declared = self
            .scopes
            .iter()
            .any(|scope| scope.contains(&variable.id()));
        if declared {
            Ok(())
        } else {
            Err(CompileError::UndefinedVariable {
                name: variable.name().to_string(),
            })
        }
    }

    fn type_of(&mut self, expr: &Expr) -> CompileResult<ExprType> {
        match expr {
            Expr::Constant(value) => Ok(value.ty()),
            Expr::Variable(variable) => {
                self.require_declared(variable)?;
                Ok(variable.ty())
            }
            Expr::Assign { target, value } => {
                self.require_declared(target)?;
                let found = self.type_of(value)?;
                if found != target.ty() {
                    return Err(CompileError::type_mismatch("assign", target.ty(), found));
                }
                Ok(target.ty())
            }
            Expr::PostDecrementAssign(target) => {
                self.require_declared(target)?;
                if target.ty() != ExprType::Int {
                    return Err(CompileError::type_mismatch(
                        "post-decrement",
                        ExprType::Int,
                        target.ty(),
                    ));
                }
                Ok(ExprType::Int)
            }
            Expr::Equal(left, right) => {
                let left = self.type_of(left)?;
                let right = self.type_of(right)?;
                if left == ExprType::Void {
                    return Err(CompileError::type_mismatch("equal", ExprType::Int, left));
                }
                if left != right {
                    return Err(CompileError::type_mismatch("equal", left, right));
                }
                Ok(ExprType::Bool)
            }
            Expr::IfThen { test, then } => {
                let found = self.type_of(test)?;
                if found != ExprType::Bool {
                    return Err(CompileError::type_mismatch("if test", ExprType::Bool, found));
                }
                self.type_of(then)?;
                Ok(ExprType::Void)
            }
            Expr::Block { variables, body } => {
                let mut seen = HashSet::new();
                for variable in variables {
                    if !seen.insert(variable.id()) {
                        return Err(CompileError::DuplicateVariable {
                            name: variable.name().to_string(),
                        });
                    }
                }

                self.scopes
                    .push(variables.iter().map(Variable::id).collect());
                let mut last = ExprType::Void;
                for expr in body {
                    last = self.type_of(expr)?;
                }
                self.scopes.pop();
                Ok(last)
            }
            Expr::Loop { body, break_label } => {
                self.loops.push(break_label.id());
                self.type_of(body)?;
                self.loops.pop();
                Ok(ExprType::Void)
            }
            Expr::Break(label) => {
                if self.loops.contains(&label.id()) {
                    Ok(ExprType::Void)
                } else {
                    Err(CompileError::UnknownLabel {
                        name: label.name().to_string(),
                    })
                }
            }
            Expr::Call { operation, args } => {
                if args.len() != operation.arity() {
                    return Err(CompileError::ArityMismatch {
                        operation: operation.name().to_string(),
                        expected: operation.arity(),
                        found: args.len(),
                    });
                }
                for arg in args {
                    let found = self.type_of(arg)?;
                    if found != ExprType::Int {
                        return Err(CompileError::type_mismatch(
                            "call argument",
                            ExprType::Int,
                            found,
                        ));
                    }
                }
                Ok(ExprType::Int)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::tree::{counted_call_loop, ExpressionBuilder};
    use crate::operation::Operation;

    #[test]
    fn test_counted_loop_passes_check() {
        let lambda = counted_call_loop(Operation::do_nothing_useful(), 100);
        assert_eq!(check(&lambda), Ok(ExprType::Void));
    }

    #[test]
    fn test_undeclared_variable_is_rejected() {
        let mut builder = ExpressionBuilder::new();
        let i = builder.variable(ExprType::Int, "i");
        let lambda = Lambda::new(Expr::assign(&i, Expr::constant(1)));

        assert_eq!(
            check(&lambda),
            Err(CompileError::UndefinedVariable {
                name: "i".to_string()
            })
        );
    }

    #[test]
    fn test_variable_out_of_scope_is_rejected() {
        let mut builder = ExpressionBuilder::new();
        let i = builder.variable(ExprType::Int, "i");
        let lambda = Lambda::new(Expr::block(
            vec![],
            vec![
                Expr::block(vec![i.clone()], vec![Expr::assign(&i, Expr::constant(1))]),
                Expr::variable(&i),
            ],
        ));

        assert!(matches!(
            check(&lambda),
            Err(CompileError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_break_outside_loop_is_rejected() {
        let mut builder = ExpressionBuilder::new();
        let label = builder.label("outer");
        let lambda = Lambda::new(Expr::break_to(&label));

        assert_eq!(
            check(&lambda),
            Err(CompileError::UnknownLabel {
                name: "outer".to_string()
            })
        );
    }

    #[test]
    fn test_type_mismatches_are_rejected() {
        let mut builder = ExpressionBuilder::new();
        let flag = builder.variable(ExprType::Bool, "flag");

        let bad_assign = Lambda::new(Expr::block(
            vec![flag.clone()],
            vec![Expr::assign(&flag, Expr::constant(1))],
        ));
        assert!(matches!(
            check(&bad_assign),
            Err(CompileError::TypeMismatch {
                context: "assign",
                ..
            })
        ));

        let bad_decrement = Lambda::new(Expr::block(
            vec![flag.clone()],
            vec![Expr::post_decrement_assign(&flag)],
        ));
        assert!(matches!(
            check(&bad_decrement),
            Err(CompileError::TypeMismatch {
                context: "post-decrement",
                ..
            })
        ));

        let bad_test = Lambda::new(Expr::if_then(
            Expr::constant(1),
            Expr::Constant(crate::expression::Value::Void),
        ));
        assert!(matches!(
            check(&bad_test),
            Err(CompileError::TypeMismatch {
                context: "if test",
                ..
            })
        ));

        let bad_equal = Lambda::new(Expr::equal(Expr::constant(1), Expr::bool_constant(true)));
        assert!(matches!(
            check(&bad_equal),
            Err(CompileError::TypeMismatch {
                context: "equal",
                ..
            })
        ));
    }

    #[test]
    fn test_call_arity_is_checked() {
        let lambda = Lambda::new(Expr::call(
            Operation::do_nothing_useful(),
            vec![Expr::constant(1), Expr::constant(2)],
        ));

        assert_eq!(
            check(&lambda),
            Err(CompileError::ArityMismatch {
                operation: "do_nothing_useful".to_string(),
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn test_duplicate_block_variable_is_rejected() {
        let mut builder = ExpressionBuilder::new();
        let i = builder.variable(ExprType::Int, "i");
        let lambda = Lambda::new(Expr::block(vec![i.clone(), i], vec![]));

        assert!(matches!(
            check(&lambda),
            Err(CompileError::DuplicateVariable { .. })
        ));
    }
}
