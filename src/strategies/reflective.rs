// キャッシュ済みハンドル経由の遅延束縛呼び出し

use crate::core::{ArgumentMode, BenchResult, CallCounter, CallStrategy, StrategyKind};
use crate::reflection::{DynValue, MethodHandle};
use std::hint::black_box;
use std::rc::Rc;

/// 一度だけ解決したハンドルを N 回呼び出す
///
/// `ArgumentMode::Reuse` では単一の引数バッファを保持し、毎回スロット0へ
/// 新しくボックス化した値を代入する。`Fresh` では毎回引数リストを確保する。
pub struct ReflectiveStrategy {
    operation_count: usize,
    method: Rc<MethodHandle>,
    argument_mode: ArgumentMode,
    cached_args: Vec<DynValue>,
}

impl ReflectiveStrategy {
    pub fn new(operation_count: usize, method: Rc<MethodHandle>, argument_mode: ArgumentMode) -> Self {
        let cached_args: Vec<DynValue> = vec![Box::new(1_i64)];
        Self {
            operation_count,
            method,
            argument_mode,
            cached_args,
        }
    }

    pub fn argument_mode(&self) -> ArgumentMode {
        self.argument_mode
    }
}

impl CallStrategy for ReflectiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Reflective
    }

    fn execute(&mut self, counter: &mut CallCounter) -> BenchResult<()> {
        match self.argument_mode {
            ArgumentMode::Reuse => {
                for _ in 0..self.operation_count {
                    self.cached_args[0] = Box::new(1_i64);
                    black_box(self.method.invoke(counter, &self.cached_args)?);
                }
            }
            ArgumentMode::Fresh => {
                for _ in 0..self.operation_count {
                    let args: Vec<DynValue> = vec![Box::new(1_i64)];
                    black_box(self.method.invoke(counter, &args)?);
                }
            }
        }
        Ok(())
    }
}
