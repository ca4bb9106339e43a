//! 呼び出し戦略
//!
//! 4つの呼び出し方式と、それらを単一の N から組み立てるファクトリ。

pub mod compiled_tree;
pub mod direct;
pub mod reflective;

pub use compiled_tree::CompiledTreeStrategy;
pub use direct::DirectStrategy;
pub use reflective::ReflectiveStrategy;

use crate::core::{ArgumentMode, BenchError, BenchResult, CallStrategy, StrategyKind};
use crate::expression::{counted_call_loop, ExpressionCompiler};
use crate::operation::Operation;
use crate::reflection::MethodRegistry;

/// 戦略を組み立てるファクトリ
///
/// 全戦略が同じ `operation_count` で構築されるため、戦略ごとに N が
/// ずれることはない。式ツリーのコンパイルはここで行われ、計測区間には含まれない。
pub struct StrategyFactory<'a> {
    operation: Operation,
    operation_count: usize,
    argument_mode: ArgumentMode,
    registry: MethodRegistry,
    baseline: &'a dyn ExpressionCompiler,
    fast: &'a dyn ExpressionCompiler,
}

impl<'a> StrategyFactory<'a> {
    pub fn new(
        operation_count: usize,
        argument_mode: ArgumentMode,
        baseline: &'a dyn ExpressionCompiler,
        fast: &'a dyn ExpressionCompiler,
    ) -> Self {
        Self {
            operation: Operation::do_nothing_useful(),
            operation_count,
            argument_mode,
            registry: MethodRegistry::with_default_operations(),
            baseline,
            fast,
        }
    }

    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn build(&self, kind: StrategyKind) -> BenchResult<Box<dyn CallStrategy>> {
        match kind {
            StrategyKind::Direct => Ok(Box::new(DirectStrategy::new(self.operation_count))),
            StrategyKind::Reflective => {
                let method = self.registry.lookup(self.operation.name())?;
                Ok(Box::new(ReflectiveStrategy::new(
                    self.operation_count,
                    method,
                    self.argument_mode,
                )))
            }
            StrategyKind::TreeInterpreted => self.build_compiled(kind, self.baseline),
            StrategyKind::TreeFastCompiled => self.build_compiled(kind, self.fast),
        }
    }

    pub fn build_all(&self, kinds: &[StrategyKind]) -> BenchResult<Vec<Box<dyn CallStrategy>>> {
        kinds.iter().map(|kind| self.build(*kind)).collect()
    }

    fn build_compiled(
        &self,
        kind: StrategyKind,
        compiler: &dyn ExpressionCompiler,
    ) -> BenchResult<Box<dyn CallStrategy>> {
        let n = i64::try_from(self.operation_count).map_err(|_| {
            BenchError::configuration(format!(
                "呼び出し回数が式ツリーの整数範囲を超えています: {}",
                self.operation_count
            ))
        })?;
        let lambda = counted_call_loop(self.operation, n);
        let action = compiler
            .compile(&lambda)
            .map_err(|source| BenchError::compilation(compiler.backend(), source))?;
        Ok(Box::new(CompiledTreeStrategy::new(kind, action)))
    }
}
