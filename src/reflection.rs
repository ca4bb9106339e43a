//! 遅延束縛呼び出し
//!
//! 名前でハンドルを一度だけ解決し、以後はボックス化した引数リストを受け取る
//! 汎用インターフェース経由で呼び出す。引数のダウンキャストと戻り値の
//! ボックス化は計測対象そのものなので省略しない。

use crate::core::{BenchError, BenchResult, CallCounter};
use crate::operation::Operation;
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

/// ボックス化された動的な値
pub type DynValue = Box<dyn Any>;

type Invoker = Box<dyn Fn(&mut CallCounter, &[DynValue]) -> BenchResult<DynValue>>;

/// 解決済みのメソッドハンドル
pub struct MethodHandle {
    name: String,
    arity: usize,
    invoker: Invoker,
}

impl MethodHandle {
    /// オペレーションを遅延束縛ハンドルとして包む
    pub fn from_operation(operation: Operation) -> Self {
        let name = operation.name().to_string();
        let method = name.clone();
        let invoker: Invoker = Box::new(move |counter: &mut CallCounter, args: &[DynValue]| {
            let input = args
                .first()
                .and_then(|arg| arg.downcast_ref::<i64>())
                .copied()
                .ok_or_else(|| BenchError::invocation(&method, "引数0は i64 である必要があります"))?;
            Ok(Box::new(operation.call(counter, input)) as DynValue)
        });

        Self {
            name,
            arity: operation.arity(),
            invoker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// ボックス化された引数リストで呼び出す
    pub fn invoke(&self, counter: &mut CallCounter, args: &[DynValue]) -> BenchResult<DynValue> {
        if args.len() != self.arity {
            return Err(BenchError::invocation(
                &self.name,
                format!("引数の数が一致しません: 期待 {}, 実際 {}", self.arity, args.len()),
            ));
        }
        (self.invoker)(counter, args)
    }
}

impl std::fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodHandle")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// 名前からメソッドハンドルを引くレジストリ
#[derive(Debug, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Rc<MethodHandle>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 標準オペレーションを登録済みのレジストリ
    pub fn with_default_operations() -> Self {
        let mut registry = Self::new();
        registry.register(Operation::do_nothing_useful());
        registry
    }

    pub fn register(&mut self, operation: Operation) {
        self.methods.insert(
            operation.name().to_string(),
            Rc::new(MethodHandle::from_operation(operation)),
        );
    }

    pub fn lookup(&self, name: &str) -> BenchResult<Rc<MethodHandle>> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| BenchError::method_not_found(name))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
