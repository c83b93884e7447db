//! 配置
//!
//! 用户配置 [`HtmlTemplateOptions`] 与 JavaScript 插件的选项一一对应（camelCase 键名），
//! 可以从 TOML 或 JSON 文件读取。生成 HTML 之前会被规范化为 [`NormalizedOptions`]：
//!
//! - `inject` 变为 [`InjectConfig`]，每个文件的规则变为 [`InjectRule`]
//! - `meta`/`link`/`script` 统一为列表
//! - `prefix` 总是以 `/` 结尾
//!
//! 配置形状的问题只会输出警告，不会中断生成。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::core::{CreateHtmlError, CreateHtmlResult};
use crate::inject::{InjectConfig, InjectRule};
use crate::parsers::html::attributes::Attributes;
use crate::utils::url::{base_name, normalize_prefix};

/// 配置文件的查找顺序
pub const CONFIG_PATHS: &[&str] = &[
    "create-html.toml",
    "create-html.json",
    ".create-html.toml",
    "~/.config/create-html/config.toml",
];

/// 合法的脚本插入位置
pub const SCRIPT_LOCATIONS: &[&str] = &["head", "bodyStart", "bodyEnd"];

/// 单个值或值的列表
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

/// 单个文件的注入选项：`false` 不注入，`true` 默认注入，对象为属性覆盖
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InjectEntry {
    Flag(bool),
    Attributes(Attributes),
}

/// `inject` 选项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InjectOption {
    Flag(bool),
    PerFile(BTreeMap<String, InjectEntry>),
}

/// 类型不符的字段保留原始值，由 [`HtmlTemplateOptions`] 丢弃并给出警告
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Checked<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

/// 配置文件中的原始形状
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawOptions {
    template: Option<Checked<String>>,
    inject: Option<Checked<InjectOption>>,
    title: Option<Checked<String>>,
    meta: Option<Checked<OneOrMany<Attributes>>>,
    link: Option<Checked<OneOrMany<Attributes>>>,
    script: Option<Checked<OneOrMany<Attributes>>>,
    file_name: Option<String>,
    prefix: Option<Checked<String>>,
}

const INVALID_INJECT: &str = "Invalid `inject` must be `true`, `false`, Recored<string, boolean | LinkAttributes | ScriptAttributes> or `undefined`";
const INVALID_TITLE: &str = "Invalid `title` must be `string` or `undefined`";
const INVALID_META: &str = "Invalid `meta` must be `object`, `object[]` or `undefined`";
const INVALID_LINK: &str = "Invalid `link` must be `object`, `object[]` or `undefined`";
const INVALID_SCRIPT: &str = "Invalid `script` must be `object`, `object[]` or `undefined`";
const INVALID_PREFIX: &str = "Invalid `prefix` must be `string` or `undefined`";

/// 用户配置
///
/// 反序列化不会因字段类型不符而失败：`inject`、`title`、`meta`、`link`、
/// `script`、`prefix` 类型不符时该字段被丢弃，对应的警告记录在 `rejected` 中。
/// 类型不符的 `template` 同样被丢弃，随后按缺少模板处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOptions")]
pub struct HtmlTemplateOptions {
    /// 模板文件路径或 HTML 字符串
    pub template: Option<String>,
    /// 自动注入，默认开启
    pub inject: Option<InjectOption>,
    pub title: Option<String>,
    pub meta: Option<OneOrMany<Attributes>>,
    pub link: Option<OneOrMany<Attributes>>,
    /// 额外的 `location` 属性决定插入位置
    pub script: Option<OneOrMany<Attributes>>,
    /// 输出的 HTML 文件名；模板为 HTML 字符串时必须提供
    pub file_name: Option<String>,
    /// 注入与复制的资源引用的路径前缀
    pub prefix: Option<String>,
    /// 因类型不符被丢弃的字段的警告
    pub rejected: Vec<String>,
}

impl From<RawOptions> for HtmlTemplateOptions {
    fn from(raw: RawOptions) -> Self {
        let mut rejected = Vec::new();

        HtmlTemplateOptions {
            template: checked(&mut rejected, "template", raw.template, None),
            inject: checked(&mut rejected, "inject", raw.inject, Some(INVALID_INJECT)),
            title: checked(&mut rejected, "title", raw.title, Some(INVALID_TITLE)),
            meta: checked(&mut rejected, "meta", raw.meta, Some(INVALID_META)),
            link: checked(&mut rejected, "link", raw.link, Some(INVALID_LINK)),
            script: checked(&mut rejected, "script", raw.script, Some(INVALID_SCRIPT)),
            file_name: raw.file_name,
            prefix: checked(&mut rejected, "prefix", raw.prefix, Some(INVALID_PREFIX)),
            rejected,
        }
    }
}

fn checked<T>(
    rejected: &mut Vec<String>,
    field: &str,
    value: Option<Checked<T>>,
    message: Option<&str>,
) -> Option<T> {
    match value? {
        Checked::Valid(value) => Some(value),
        Checked::Invalid(value) => {
            debug!("dropping `{}`: {}", field, value);
            rejected.extend(message.map(str::to_string));
            None
        }
    }
}

/// 模板来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    Inline(String),
}

impl TemplateSource {
    /// 存在的普通文件视为模板文件，其余视为 HTML 字符串
    pub fn resolve(template: &str) -> Self {
        let path = Path::new(template);
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => TemplateSource::File(path.to_path_buf()),
            _ => TemplateSource::Inline(template.to_string()),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, TemplateSource::File(_))
    }
}

/// 规范化后的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOptions {
    pub template: TemplateSource,
    pub inject: InjectConfig,
    pub title: Option<String>,
    pub meta: Vec<Attributes>,
    pub link: Vec<Attributes>,
    pub script: Vec<Attributes>,
    pub file_name: Option<String>,
    pub prefix: String,
}

impl From<InjectEntry> for InjectRule {
    fn from(entry: InjectEntry) -> Self {
        match entry {
            InjectEntry::Flag(true) => InjectRule::Enabled,
            InjectEntry::Flag(false) => InjectRule::Disabled,
            InjectEntry::Attributes(attrs) => InjectRule::EnabledWithAttributes(attrs),
        }
    }
}

impl From<Option<InjectOption>> for InjectConfig {
    fn from(option: Option<InjectOption>) -> Self {
        match option {
            None | Some(InjectOption::Flag(true)) => InjectConfig::Enabled,
            Some(InjectOption::Flag(false)) => InjectConfig::Disabled,
            Some(InjectOption::PerFile(entries)) => InjectConfig::PerFile(
                entries
                    .into_iter()
                    .map(|(file_name, entry)| (file_name, entry.into()))
                    .collect(),
            ),
        }
    }
}

impl HtmlTemplateOptions {
    /// 从文件读取配置，`.toml` 按 TOML 解析，其余按 JSON 解析
    pub fn load(path: &Path) -> CreateHtmlResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CreateHtmlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));

        let options = if is_toml {
            toml::from_str(&content).map_err(|e| {
                CreateHtmlError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                CreateHtmlError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        };

        info!("loaded config file {}", path.display());
        Ok(options)
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{core, EnvVar};

        if let Ok(prefix) = core::Prefix::get() {
            info!("prefix overridden by {}: {}", core::Prefix::NAME, prefix);
            self.prefix = Some(prefix);
        }
    }

    /// 用 `other` 中已设置的字段覆盖当前配置
    pub fn merge(&mut self, other: HtmlTemplateOptions) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(template, inject, title, meta, link, script, file_name, prefix);
        self.rejected.extend(other.rejected);
    }

    /// 配置形状的警告
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = self.rejected.clone();

        if self.title.as_deref() == Some("") {
            warnings.push("`title` is empty and will be ignored".to_string());
        }

        if let Some(script) = &self.script {
            for (index, entry) in script.as_slice().iter().enumerate() {
                let Some(location) = entry.get("location") else {
                    continue;
                };
                let valid = location
                    .as_text()
                    .is_some_and(|location| SCRIPT_LOCATIONS.contains(&location));
                if !valid {
                    warnings.push(format!(
                        "`script[{index}].location` must be one of `head`, `bodyStart` or `bodyEnd`, it will be inserted at the end of `body`"
                    ));
                }
            }
        }

        if let Some(InjectOption::PerFile(entries)) = &self.inject {
            for (file_name, entry) in entries {
                if let InjectEntry::Attributes(attrs) = entry {
                    for field in ["href", "src"] {
                        if attrs.contains(field) {
                            warnings.push(format!(
                                "`inject[{file_name:?}]` sets `{field}`, which replaces the generated reference"
                            ));
                        }
                    }
                }
            }
        }

        warnings
    }

    /// 校验并规范化配置
    pub fn normalize(self) -> CreateHtmlResult<NormalizedOptions> {
        for warning in self.warnings() {
            warn!("{}", warning);
        }

        let template = match self.template.as_deref() {
            Some(template) if !template.is_empty() => TemplateSource::resolve(template),
            _ => return Err(CreateHtmlError::MissingTemplate),
        };
        let file_name = self.file_name.filter(|file_name| !file_name.is_empty());
        if !template.is_file() && file_name.is_none() {
            return Err(CreateHtmlError::MissingFileName);
        }

        Ok(NormalizedOptions {
            template,
            inject: self.inject.into(),
            title: self.title,
            meta: self.meta.map(OneOrMany::into_vec).unwrap_or_default(),
            link: self.link.map(OneOrMany::into_vec).unwrap_or_default(),
            script: self.script.map(OneOrMany::into_vec).unwrap_or_default(),
            file_name,
            prefix: normalize_prefix(self.prefix.as_deref().unwrap_or_default()),
        })
    }
}

/// 按顺序查找存在的配置文件
pub fn find_config_file() -> Option<PathBuf> {
    CONFIG_PATHS.iter().find_map(|path| {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());
        path.is_file().then(|| path.to_path_buf())
    })
}

/// 词法上规范化路径（不访问文件系统）
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// 确定输出的 HTML 文件名
///
/// 优先使用 `fileName` 的文件名部分；否则沿用模板文件名，
/// 但输出目录（`output_dir`，其次是 `output_file` 所在目录，默认当前目录）
/// 不能让输出覆盖模板自身。
pub fn resolve_output_file_name(
    options: &NormalizedOptions,
    output_dir: Option<&Path>,
    output_file: Option<&Path>,
    cwd: &Path,
) -> CreateHtmlResult<String> {
    if let Some(file_name) = &options.file_name {
        return Ok(base_name(file_name).unwrap_or(file_name).to_string());
    }

    let TemplateSource::File(template) = &options.template else {
        return Err(CreateHtmlError::MissingFileName);
    };
    let template_str = template.to_string_lossy();
    let template_file_name = base_name(&template_str)
        .ok_or_else(|| CreateHtmlError::Config(format!("invalid template path {template_str}")))?
        .to_string();

    let dist_dir = match (output_dir, output_file) {
        (Some(dir), _) => cwd.join(dir),
        (None, Some(file)) => cwd.join(file.parent().unwrap_or(Path::new(""))),
        (None, None) => cwd.to_path_buf(),
    };

    let target = normalize_path(&dist_dir.join(&template_file_name));
    let source = normalize_path(&cwd.join(template));
    if target == source {
        return Err(CreateHtmlError::SameAsTemplate { path: source });
    }

    Ok(template_file_name)
}
