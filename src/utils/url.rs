use std::path::Path;

pub use url::Url;

/// 判断字符串是否为带协议的 URL
///
/// 只有单个字母的协议被视为 Windows 盘符（`C:\...`），不算 URL。
pub fn is_url_and_has_protocol(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => parsed_url.scheme().len() > 1,
        Err(_) => false,
    }
}

/// 路径的文件名部分
pub fn base_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|name| name.to_str())
}

/// 拼接前缀与文件名
pub fn with_prefix(prefix: &str, file_name: &str) -> String {
    format!("{prefix}{file_name}")
}

/// 把前缀规范为以 `/` 结尾
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}
