// コンパイル済みアクションとコンパイラの抽象化

use super::error::CompileResult;
use super::tree::Lambda;
use crate::core::CallCounter;
use mockall::automock;
use std::fmt;

/// 式ツリーから生成された、引数なしで呼び出せるアクション
///
/// セットアップ時に一度だけ生成され、全試行で使い回される。
/// 外部ハンドルは保持しないため明示的な解放は不要。
pub struct CompiledAction {
    backend: &'static str,
    action: Box<dyn Fn(&mut CallCounter)>,
}

impl CompiledAction {
    pub fn new(backend: &'static str, action: impl Fn(&mut CallCounter) + 'static) -> Self {
        Self {
            backend,
            action: Box::new(action),
        }
    }

    /// 生成したコンパイラのバックエンド名
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    #[inline]
    pub fn invoke(&self, counter: &mut CallCounter) {
        (self.action)(counter)
    }
}

impl fmt::Debug for CompiledAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAction")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

/// 式ツリーを呼び出し可能なアクションへ変換するコンパイラ
#[automock]
pub trait ExpressionCompiler {
    /// バックエンド名（レポート・エラー表示用）
    fn backend(&self) -> &'static str;

    /// ラムダをコンパイル。検査エラーはそのまま返す
    fn compile(&self, lambda: &Lambda) -> CompileResult<CompiledAction>;
}
