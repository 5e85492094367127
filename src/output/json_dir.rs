use crate::domain::record::IdentifiedRecord;
use crate::error::{ExportError, ExportResult};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

// ==========================================
// JSON 目录输出
// ==========================================
// 下游按文件名(= identity)增量拾取,同名覆盖即幂等

/// 每条记录写成 `<base>/<folder>/<identity>.json`
pub fn write_records<T: Serialize + IdentifiedRecord>(
    records: &[T],
    base: &Path,
    folder: &str,
) -> ExportResult<usize> {
    let target = base.join(folder);
    fs::create_dir_all(&target).map_err(|e| ExportError::SourceIo {
        path: target.display().to_string(),
        source: e,
    })?;

    for record in records {
        let path = target.join(format!("{}.json", record.identity()));
        let file = File::create(&path).map_err(|e| ExportError::SourceIo {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::to_writer(BufWriter::new(file), record).map_err(|e| {
            ExportError::MalformedBody {
                path: path.display().to_string(),
                detail: e.to_string(),
            }
        })?;
    }
    info!(count = records.len(), folder, "记录已写入输出目录");
    Ok(records.len())
}
