use crate::core::StrategyKind;
use clap::ValueEnum;

/// 利用可能な戦略の一覧を出力
pub fn execute_list() {
    println!("📋 利用可能な呼び出し方式:");
    for kind in StrategyKind::ALL {
        let name = kind
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        println!("   {name:<20} {:<32} {}", kind.label(), kind.description());
    }
}
