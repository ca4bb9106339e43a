//! 式ツリーと2種類のコンパイラ
//!
//! 同じ宣言的ループを汎用コンパイラ（ツリー解釈型）と高速コンパイラ
//! （クロージャ生成型）でそれぞれアクションへ変換する。どちらも
//! 生成結果は手書きのループと同じ回数だけオペレーションを呼ぶ。

pub mod check;
pub mod closure;
pub mod compiled;
pub mod error;
pub mod interpreter;
pub mod tree;

pub use check::check;
pub use closure::{ClosureCompiler, CLOSURE_BACKEND};
pub use compiled::{CompiledAction, ExpressionCompiler, MockExpressionCompiler};
pub use error::{CompileError, CompileResult};
pub use interpreter::{InterpretingCompiler, INTERPRETER_BACKEND};
pub use tree::{
    counted_call_loop, Expr, ExprType, ExpressionBuilder, Label, LabelId, Lambda, Value, VarId,
    Variable,
};
