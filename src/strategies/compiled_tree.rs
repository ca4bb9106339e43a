// 事前コンパイル済み式ツリーの呼び出し

use crate::core::{BenchResult, CallCounter, CallStrategy, StrategyKind};
use crate::expression::CompiledAction;

/// コンパイル済みアクションを1回だけ呼ぶ（内部で N 回ループする）
#[derive(Debug)]
pub struct CompiledTreeStrategy {
    kind: StrategyKind,
    action: CompiledAction,
}

impl CompiledTreeStrategy {
    pub fn new(kind: StrategyKind, action: CompiledAction) -> Self {
        Self { kind, action }
    }

    pub fn backend(&self) -> &'static str {
        self.action.backend()
    }
}

impl CallStrategy for CompiledTreeStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn execute(&mut self, counter: &mut CallCounter) -> BenchResult<()> {
        self.action.invoke(counter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{counted_call_loop, ClosureCompiler, ExpressionCompiler};
    use crate::operation::Operation;

    #[test]
    fn test_compiled_tree_strategy_runs_action() {
        let action = ClosureCompiler::new()
            .compile(&counted_call_loop(Operation::do_nothing_useful(), 42))
            .unwrap();
        let mut strategy = CompiledTreeStrategy::new(StrategyKind::TreeFastCompiled, action);
        let mut counter = CallCounter::new();

        strategy.execute(&mut counter).unwrap();

        assert_eq!(counter.get(), 42);
        assert_eq!(strategy.kind(), StrategyKind::TreeFastCompiled);
        assert_eq!(strategy.backend(), "closure");
    }
}
