// ==========================================
// 车间排产引擎 - 命令行入口
// ==========================================
// 用法:
//   shop-floor-planner <snapshot.json> [config.json]
//
// 读取快照与可选配置,输出 JSON 格式的排产报告到 stdout
// ==========================================

use anyhow::Context;
use shop_floor_planner::{logging, ConfigManager, PlanApi};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = args
        .next()
        .context("用法: shop-floor-planner <snapshot.json> [config.json]")?;

    let config = match args.next() {
        Some(path) => ConfigManager::from_json_file(&path)
            .with_context(|| format!("加载配置失败: {}", path))?,
        None => ConfigManager::default(),
    };

    tracing::info!(
        version = shop_floor_planner::VERSION,
        snapshot = %snapshot_path,
        "{} 启动",
        shop_floor_planner::APP_NAME
    );

    let snapshot = PlanApi::<ConfigManager>::load_snapshot(&snapshot_path)
        .with_context(|| format!("加载快照失败: {}", snapshot_path))?;

    let api = PlanApi::new(Arc::new(config));
    let report = api.plan(&snapshot)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
