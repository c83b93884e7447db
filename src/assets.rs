//! 本地资源解析
//!
//! 静态配置的 `link.href` / `script.src` 若指向磁盘上存在的文件，
//! 则把文件作为资源输出，并把引用改写为 `prefix + 文件名`。
//! 不存在的路径视为普通 URL，保持不变。

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::core::{CreateHtmlError, CreateHtmlResult};
use crate::emit::EmittedFile;
use crate::parsers::html::attributes::Attributes;
use crate::utils::url::{base_name, is_url_and_has_protocol, with_prefix};

/// 解析所有静态条目中的本地资源，返回需要输出的文件
pub fn resolve_local_assets(
    links: &mut [Attributes],
    scripts: &mut [Attributes],
    prefix: &str,
) -> CreateHtmlResult<Vec<EmittedFile>> {
    let mut emitted = Vec::new();

    for link in links.iter_mut() {
        if let Some(file) = resolve_reference(link, "href", prefix)? {
            emitted.push(file);
        }
    }
    for script in scripts.iter_mut() {
        if let Some(file) = resolve_reference(script, "src", prefix)? {
            emitted.push(file);
        }
    }

    Ok(emitted)
}

/// 解析单个条目的 `field` 属性
pub fn resolve_reference(
    attrs: &mut Attributes,
    field: &str,
    prefix: &str,
) -> CreateHtmlResult<Option<EmittedFile>> {
    let Some(value) = attrs.text(field).map(str::to_string) else {
        return Ok(None);
    };
    if value.is_empty() || is_url_and_has_protocol(&value) {
        return Ok(None);
    }

    let path = Path::new(&value);
    let Ok(metadata) = fs::metadata(path) else {
        debug!("{} {:?} is not a local file, keeping it as is", field, value);
        return Ok(None);
    };

    let invalid = || CreateHtmlError::InvalidReference {
        field: field.to_string(),
        value: value.clone(),
    };
    if !metadata.is_file() {
        return Err(invalid());
    }
    let file_name = base_name(&value).ok_or_else(invalid)?.to_string();

    let source = fs::read(path).map_err(|source| CreateHtmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reference = with_prefix(prefix, &file_name);
    info!("copying {} as {}", value, reference);
    attrs.insert(field, reference);

    Ok(Some(EmittedFile::new(file_name, source)))
}
