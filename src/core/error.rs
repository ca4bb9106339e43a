// ベンチマーク専用のカスタムエラー型定義

use crate::expression::CompileError;
use thiserror::Error;

/// ベンチマーク実行固有のエラー型
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("コンパイルエラー: {backend} - {source}")]
    Compilation {
        backend: String,
        #[source]
        source: CompileError,
    },

    #[error("正当性違反: {strategy} - 期待呼び出し数 {expected}, 実際 {actual}")]
    CorrectnessViolation {
        strategy: String,
        expected: u64,
        actual: u64,
    },

    #[error("メソッドが見つかりません: {name}")]
    MethodNotFound { name: String },

    #[error("呼び出しエラー: {method} - {reason}")]
    Invocation { method: String, reason: String },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("レポートエラー: {source}")]
    Report {
        #[source]
        source: anyhow::Error,
    },
}

impl BenchError {
    /// コンパイルエラーの作成
    pub fn compilation(backend: impl Into<String>, source: CompileError) -> Self {
        Self::Compilation {
            backend: backend.into(),
            source,
        }
    }

    /// 正当性違反の作成
    pub fn correctness_violation(strategy: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::CorrectnessViolation {
            strategy: strategy.into(),
            expected,
            actual,
        }
    }

    /// メソッド未登録エラーの作成
    pub fn method_not_found(name: impl Into<String>) -> Self {
        Self::MethodNotFound { name: name.into() }
    }

    /// 呼び出しエラーの作成
    pub fn invocation(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invocation {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 他の戦略の計測を続行できるかどうか
    ///
    /// 正当性違反と呼び出しエラーはその戦略だけを失敗扱いにする。
    /// それ以外はベンチマーク全体を中断する。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::CorrectnessViolation { .. } | Self::Invocation { .. } => true,
            Self::Compilation { .. }
            | Self::MethodNotFound { .. }
            | Self::Configuration { .. }
            | Self::Validation { .. }
            | Self::Report { .. } => false,
        }
    }
}

/// ベンチマークの結果型
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// 検証結果 - バリデーション専用の結果型
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// バリデーション専用エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("バリデーションエラー: {field} - {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for BenchError {
    fn from(error: ValidationError) -> Self {
        BenchError::Validation {
            field: error.field,
            reason: error.reason,
        }
    }
}

impl From<anyhow::Error> for BenchError {
    fn from(error: anyhow::Error) -> Self {
        BenchError::Report { source: error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_bench_error_creation() {
        let violation = BenchError::correctness_violation("DirectCall", 10_000, 9_999);
        let message = violation.to_string();
        assert!(message.contains("正当性違反"));
        assert!(message.contains("DirectCall"));
        assert!(message.contains("10000"));
        assert!(message.contains("9999"));

        let missing = BenchError::method_not_found("missing_method");
        assert!(missing.to_string().contains("missing_method"));

        let config_error = BenchError::configuration("試行回数が不正です");
        assert!(config_error.to_string().contains("設定エラー"));
    }

    #[test]
    fn test_compilation_error_source_chain() {
        let error = BenchError::compilation(
            "closure",
            CompileError::UndefinedVariable {
                name: "i".to_string(),
            },
        );

        assert!(error.source().is_some());
        assert!(error.to_string().contains("closure"));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(BenchError::correctness_violation("x", 1, 0).is_recoverable());
        assert!(BenchError::invocation("op", "bad argument").is_recoverable());
        assert!(!BenchError::configuration("bad").is_recoverable());
        assert!(!BenchError::method_not_found("op").is_recoverable());
        assert!(!BenchError::compilation(
            "interpreter",
            CompileError::UnknownLabel {
                name: "looplabel".to_string()
            }
        )
        .is_recoverable());
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation_error = ValidationError::new("trials", "1以上である必要があります");
        let error: BenchError = validation_error.into();

        match error {
            BenchError::Validation { field, .. } => assert_eq!(field, "trials"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
