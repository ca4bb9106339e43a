// 式ツリーのコンパイルエラー定義

use super::tree::ExprType;
use thiserror::Error;

/// 式ツリーの静的検査・コンパイル時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("未定義の変数: {name}")]
    UndefinedVariable { name: String },

    #[error("外側のループに存在しないラベル: {name}")]
    UnknownLabel { name: String },

    #[error("型の不一致: {context} - 期待 {expected}, 実際 {found}")]
    TypeMismatch {
        context: &'static str,
        expected: ExprType,
        found: ExprType,
    },

    #[error("引数の数が一致しません: {operation} - 期待 {expected}, 実際 {found}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        found: usize,
    },

    #[error("同一ブロック内で変数が重複しています: {name}")]
    DuplicateVariable { name: String },
}

impl CompileError {
    pub fn type_mismatch(context: &'static str, expected: ExprType, found: ExprType) -> Self {
        Self::TypeMismatch {
            context,
            expected,
            found,
        }
    }
}

/// コンパイルの結果型
pub type CompileResult<T> = std::result::Result<T, CompileError>;
