//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 错误响应结构：`{"error": "..."}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// 操作结果响应：`{"result": "success"}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultBody {
    pub result: String,
}

impl ResultBody {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}
