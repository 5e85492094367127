// ==========================================
// 仿真/MES 工艺阶段导出桥 - 数据源层
// ==========================================
// 职责: 数据源抽象、文件实现与单次运行的取数快照
// ==========================================

pub mod collection;
pub mod json_dir;
pub mod snapshot;

pub use collection::{CollectionSource, RawRow, Table};
pub use json_dir::JsonDirSource;
pub use snapshot::SourceSnapshot;
