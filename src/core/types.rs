// 計測系の基本型定義
// カウンタ・戦略種別・引数モードなど、全レイヤーから参照される型

use serde::{Deserialize, Serialize};

/// オペレーション呼び出し回数カウンタ
///
/// プロセス全体の静的変数ではなく、呼び出し側が所有して参照で渡す。
/// 全ての戦略はこのカウンタを経由して「実際に呼ばれた回数」を検証される。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallCounter {
    count: u64,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の呼び出し回数
    pub fn get(&self) -> u64 {
        self.count
    }

    /// 1回分の呼び出しを記録
    #[inline]
    pub fn increment(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    /// スナップショットからの増分
    pub fn delta_since(&self, before: u64) -> u64 {
        self.count.wrapping_sub(before)
    }
}

/// 計測対象の呼び出し方式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 静的に解決された直接呼び出し
    Direct,
    /// キャッシュ済みハンドル経由の遅延束縛呼び出し
    Reflective,
    /// 汎用コンパイラで生成した式ツリー
    TreeInterpreted,
    /// 高速コンパイラで生成した式ツリー
    TreeFastCompiled,
}

impl StrategyKind {
    /// 全戦略（レポートの表示順）
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Direct,
        StrategyKind::Reflective,
        StrategyKind::TreeInterpreted,
        StrategyKind::TreeFastCompiled,
    ];

    /// レポート用ラベル
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct => "DirectCall",
            Self::Reflective => "ReflectionCall",
            Self::TreeInterpreted => "CompiledLoopingExpression",
            Self::TreeFastCompiled => "FastCompiledLoopingExpression",
        }
    }

    /// 呼び出し方式の説明
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Direct => "通常のカウントループ内での静的呼び出し",
            Self::Reflective => "名前解決済みハンドルへのボックス化引数による呼び出し",
            Self::TreeInterpreted => "宣言的ループを汎用コンパイラで生成し1回実行",
            Self::TreeFastCompiled => "宣言的ループを高速コンパイラで生成し1回実行",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 遅延束縛呼び出しでの引数バッファの扱い
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentMode {
    /// 単一の引数バッファを使い回し、毎回スロット0へ再代入する
    #[default]
    Reuse,
    /// 呼び出しごとに新しい引数リストを確保する
    Fresh,
}
