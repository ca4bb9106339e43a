// レポート永続化の具象実装

use crate::core::BenchmarkReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// JSON形式でのレポート出力
pub fn export_json_report(report: &BenchmarkReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("レポートのシリアライズに失敗しました")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("出力ディレクトリを作成できません: {}", parent.display()))?;
    }

    fs::write(path, json)
        .with_context(|| format!("レポートを書き込めません: {}", path.display()))?;
    Ok(())
}

/// JSON形式のレポートを読み込む
pub fn load_json_report(path: &Path) -> Result<BenchmarkReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("レポートを読み込めません: {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("レポートの形式が不正です: {}", path.display()))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArgumentMode, StrategyKind, StrategyOutcome, StrategyStats};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_export_and_load_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("report.json");

        let mut report = BenchmarkReport::new(10, 1, 0, ArgumentMode::Fresh);
        report.push(StrategyOutcome::Measured(StrategyStats::from_samples(
            StrategyKind::TreeFastCompiled,
            10,
            &[Duration::from_nanos(120)],
        )));

        export_json_report(&report, &path).unwrap();
        let loaded = load_json_report(&path).unwrap();

        assert_eq!(loaded.operation_count, 10);
        assert_eq!(loaded.argument_mode, ArgumentMode::Fresh);
        assert_eq!(loaded.outcomes.len(), 1);
        assert_eq!(loaded.outcomes[0].strategy(), StrategyKind::TreeFastCompiled);
    }

    #[test]
    fn test_load_invalid_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let error = load_json_report(&path).unwrap_err();
        assert!(error.to_string().contains("形式が不正"));
    }

    #[test]
    fn test_load_missing_report() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_json_report(&temp_dir.path().join("missing.json"));

        assert!(result.is_err());
    }
}
