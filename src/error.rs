// ==========================================
// 仿真/MES 工艺阶段导出桥 - 统一错误类型
// ==========================================
// 工具: thiserror 派生宏
// 口径: 阶段解析失败是可恢复事件(计数+跳过),
//       参照数据缺失/解码失败是致命错误(中止本次运行)
// ==========================================

use thiserror::Error;

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    // ===== 参照数据错误 =====
    #[error("参照数据缺失: 表 {table} 中找不到键 {key}")]
    MissingReference { table: &'static str, key: String },

    #[error("记录缺少必要字段: {table}.{field}")]
    MissingField { table: &'static str, field: &'static str },

    // ===== 数据源错误 =====
    #[error("数据解码失败: 表 {table}: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("数据源读取失败: {path}: {source}")]
    SourceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("数据源内容不合法: {path}: {detail}")]
    MalformedBody { path: String, detail: String },

    #[error("时间戳解析失败: {raw:?}")]
    Timestamp { raw: String },

    // ===== 快照/输出错误 =====
    #[error("快照文件读写失败: {0}")]
    Snapshot(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    // ===== 配置错误 =====
    #[error("配置错误: {0}")]
    Config(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
