// 静的に解決された直接呼び出し

use crate::core::{BenchResult, CallCounter, CallStrategy, StrategyKind};
use crate::operation::do_nothing_useful;
use std::hint::black_box;

/// 通常のカウントループでオペレーションを直接呼ぶ
#[derive(Debug, Clone)]
pub struct DirectStrategy {
    operation_count: usize,
}

impl DirectStrategy {
    pub fn new(operation_count: usize) -> Self {
        Self { operation_count }
    }
}

impl CallStrategy for DirectStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    fn execute(&mut self, counter: &mut CallCounter) -> BenchResult<()> {
        for _ in 0..self.operation_count {
            black_box(do_nothing_useful(counter, black_box(1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_strategy_calls_n_times() {
        let mut strategy = DirectStrategy::new(10_000);
        let mut counter = CallCounter::new();

        strategy.execute(&mut counter).unwrap();

        assert_eq!(counter.get(), 10_000);
        assert_eq!(strategy.kind(), StrategyKind::Direct);
    }
}
