// ==========================================
// 炉体耐磨层 TCO 分析 - 导入导出错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 解析失败对本次操作是致命的，调用方已有数据保持不变
// ==========================================

use thiserror::Error;

/// 导入导出错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.xlsx 或 CSV 目录）")]
    UnsupportedFormat(String),

    #[error("文件读写失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    Json(String),

    // ===== 工作簿结构错误 =====
    #[error("单元格解析失败 (工作表 {sheet}, 行 {row}, 列 {column}): {value}")]
    CellParse {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("工作簿中没有完整的策略工作表对 (<名称>_Overview + <名称>_Interventions)")]
    NoStrategies,

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Json(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
