// ==========================================
// 仿真/MES 工艺阶段导出桥 - 命令行入口
// ==========================================
// 用法: mes-phase-export --export wip --export daily-tasks
//       不带 --export 时运行配置文件里列出的导出类型
// ==========================================

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use mes_phase_export::pipeline::{self, kinds_from_names, ExportKind};
use mes_phase_export::{logging, ExportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mes-phase-export", version, about = "仿真/MES 工艺阶段导出工具")]
struct Cli {
    /// 配置文件路径(缺省: ./config.json → 用户配置目录)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 要运行的导出类型,可重复;缺省用配置文件的 exports
    #[arg(short, long, value_enum)]
    export: Vec<ExportKind>,

    /// 覆盖配置中的仿真会话号
    #[arg(long)]
    session: Option<i64>,

    /// 覆盖班次任务取数时窗(小时)
    #[arg(long)]
    period: Option<i64>,

    /// 调试日志
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    tracing::info!("{} v{}", mes_phase_export::APP_NAME, mes_phase_export::VERSION);

    let mut config = ExportConfig::load(cli.config.as_deref()).context("加载配置失败")?;
    if cli.session.is_some() {
        config.session = cli.session;
    }
    if let Some(period) = cli.period {
        config.daily_task_period = period;
    }

    let kinds = if cli.export.is_empty() {
        kinds_from_names(&config.exports)?
    } else {
        cli.export.clone()
    };

    let summary = pipeline::run(&config, &kinds, Local::now().naive_local())?;
    for (export, count) in &summary.written {
        tracing::info!(export, count, "已落盘");
    }
    tracing::info!(run_id = %summary.run_id, "本次运行结束");
    Ok(())
}
