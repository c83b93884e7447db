//! 打包产物描述
//!
//! 打包工具交给本库的只读输入：每个输出文件的描述，以及输出模块格式。
//! 命令行通过 [`load_manifest`] 从 JSON 清单读取这些信息。

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::{CreateHtmlError, CreateHtmlResult};

/// 输出文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// 代码块
    Chunk,
    /// 静态资源
    Asset,
}

/// 输出文件描述
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    pub file_name: String,
    #[serde(rename = "type")]
    pub kind: OutputType,
    #[serde(default)]
    pub is_entry: bool,
}

impl OutputDescriptor {
    pub fn chunk(file_name: impl Into<String>, is_entry: bool) -> Self {
        Self {
            file_name: file_name.into(),
            kind: OutputType::Chunk,
            is_entry,
        }
    }

    pub fn asset(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: OutputType::Asset,
            is_entry: false,
        }
    }

    pub fn is_chunk(&self) -> bool {
        self.kind == OutputType::Chunk
    }
}

/// 输出模块格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ES 模块，注入的入口脚本带 `type="module"`
    #[default]
    #[serde(alias = "esm", alias = "module")]
    #[cfg_attr(feature = "cli", value(alias = "esm", alias = "module"))]
    Es,
    #[serde(alias = "commonjs")]
    #[cfg_attr(feature = "cli", value(alias = "commonjs"))]
    Cjs,
    Amd,
    Iife,
    Umd,
    #[serde(alias = "systemjs")]
    #[cfg_attr(feature = "cli", value(alias = "systemjs"))]
    System,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Es => "es",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Amd => "amd",
            OutputFormat::Iife => "iife",
            OutputFormat::Umd => "umd",
            OutputFormat::System => "system",
        }
    }

    pub fn is_es(&self) -> bool {
        *self == OutputFormat::Es
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 打包清单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleManifest {
    /// 清单中声明的格式；未声明时由调用方决定
    pub format: Option<OutputFormat>,
    /// 按输出顺序排列的文件描述
    pub outputs: Vec<OutputDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestShape {
    Outputs(Vec<OutputDescriptor>),
    Full {
        #[serde(default)]
        format: Option<OutputFormat>,
        outputs: Vec<OutputDescriptor>,
    },
}

/// 解析 JSON 清单：描述数组，或 `{ "format": ..., "outputs": [...] }`
pub fn parse_manifest(content: &str) -> CreateHtmlResult<BundleManifest> {
    let shape: ManifestShape =
        serde_json::from_str(content).map_err(|e| CreateHtmlError::Manifest(e.to_string()))?;

    Ok(match shape {
        ManifestShape::Outputs(outputs) => BundleManifest {
            format: None,
            outputs,
        },
        ManifestShape::Full { format, outputs } => BundleManifest { format, outputs },
    })
}

/// 从文件读取打包清单
pub fn load_manifest(path: &Path) -> CreateHtmlResult<BundleManifest> {
    let content = fs::read_to_string(path).map_err(|source| CreateHtmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = parse_manifest(&content)?;
    tracing::debug!(
        "loaded {} output(s) from {}",
        manifest.outputs.len(),
        path.display()
    );
    Ok(manifest)
}
