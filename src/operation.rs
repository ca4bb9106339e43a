//! 計測対象のオペレーション
//!
//! 呼び出しごとにカウンタを1つ進めるだけの関数。全ての戦略が同じ関数を
//! 呼ぶことで、呼び出し方式のオーバーヘッドだけを比較できる。

use crate::core::CallCounter;

/// オペレーション関数のシグネチャ
pub type OperationFn = fn(&mut CallCounter, i64) -> i64;

/// レジストリ上のオペレーション名
pub const DO_NOTHING_USEFUL: &str = "do_nothing_useful";

/// カウンタを進め、更新後の呼び出し回数を返す
#[inline(never)]
pub fn do_nothing_useful(counter: &mut CallCounter, _input: i64) -> i64 {
    counter.increment();
    i64::try_from(counter.get()).unwrap_or(i64::MAX)
}

/// 名前付きのオペレーションハンドル
///
/// 式ツリーの Call ノードと遅延束縛レジストリが保持する。同一性は名前で判定する。
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    name: &'static str,
    func: OperationFn,
}

impl Operation {
    pub const ARITY: usize = 1;

    pub const fn new(name: &'static str, func: OperationFn) -> Self {
        Self { name, func }
    }

    /// 標準のオペレーション
    pub const fn do_nothing_useful() -> Self {
        Self::new(DO_NOTHING_USEFUL, do_nothing_useful)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        Self::ARITY
    }

    #[inline]
    pub fn call(&self, counter: &mut CallCounter, input: i64) -> i64 {
        (self.func)(counter, input)
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Operation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_nothing_useful_returns_call_count() {
        let mut counter = CallCounter::new();

        assert_eq!(do_nothing_useful(&mut counter, 1), 1);
        assert_eq!(do_nothing_useful(&mut counter, 1), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_operation_handle_calls_function() {
        let operation = Operation::do_nothing_useful();
        let mut counter = CallCounter::new();

        assert_eq!(operation.name(), DO_NOTHING_USEFUL);
        assert_eq!(operation.arity(), 1);
        assert_eq!(operation.call(&mut counter, 42), 1);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_operation_identity_by_name() {
        fn other(counter: &mut CallCounter, input: i64) -> i64 {
            counter.increment();
            input
        }

        assert_eq!(Operation::do_nothing_useful(), Operation::do_nothing_useful());
        assert_ne!(Operation::do_nothing_useful(), Operation::new("other", other));
    }
}
