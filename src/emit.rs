//! 输出文件
//!
//! 生成的 HTML 与本地资源都以 [`EmittedFile`] 的形式交给 [`EmitSink`]，
//! 由调用方决定写入内存还是磁盘。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{CreateHtmlError, CreateHtmlResult};

/// 一个待输出的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub file_name: String,
    pub source: Vec<u8>,
}

impl EmittedFile {
    pub fn new(file_name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// 以 UTF-8 读取内容
    pub fn source_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.source).ok()
    }
}

/// 输出目标
pub trait EmitSink {
    fn emit_file(&mut self, file: EmittedFile) -> CreateHtmlResult<()>;
}

impl EmitSink for Vec<EmittedFile> {
    fn emit_file(&mut self, file: EmittedFile) -> CreateHtmlResult<()> {
        self.push(file);
        Ok(())
    }
}

/// 写入目录的输出目标
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl EmitSink for DirectorySink {
    fn emit_file(&mut self, file: EmittedFile) -> CreateHtmlResult<()> {
        let path = self.dir.join(&file.file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CreateHtmlError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, &file.source).map_err(|source| CreateHtmlError::Io {
            path: path.clone(),
            source,
        })?;
        info!("emitted {} ({} bytes)", path.display(), file.source.len());

        Ok(())
    }
}
