//! # 工具模块
//!
//! # 模块组织
//!
//! - `url` - URL 判定、前缀与文件名处理

pub mod url;

pub use url::{base_name, is_url_and_has_protocol, normalize_prefix, with_prefix, Url};
