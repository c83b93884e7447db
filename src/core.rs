use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::assembler::{assemble, Assembly};
use crate::assets::resolve_local_assets;
use crate::bundle::{OutputDescriptor, OutputFormat};
use crate::config::{resolve_output_file_name, HtmlTemplateOptions, NormalizedOptions, TemplateSource};
use crate::emit::{EmitSink, EmittedFile};
use crate::inject;

/// HTML 生成过程中可能出现的错误
///
/// 出现任何错误时都不会输出文件。
#[derive(Error, Debug)]
pub enum CreateHtmlError {
    /// 模板中没有 `html` 标签
    #[error("`template` doesn't contain the `html` tag")]
    MissingHtmlTag,

    /// 本地引用存在但不是文件
    #[error("Invalid `{field}` {value:?}: must be a local file path or a url")]
    InvalidReference { field: String, value: String },

    /// 标签名无法被解析器识别
    #[error("Invalid tag name {0:?}")]
    InvalidTagName(String),

    #[error("`template` must be defined as a file path or an HTML string")]
    MissingTemplate,

    #[error("When `template` is an HTML string, the `fileName` option must be defined")]
    MissingFileName,

    /// 输出路径与模板自身相同
    #[error("Couldn't write the generated HTML to the source template {}, define one of the options: `fileName`, `file` or `dir`", path.display())]
    SameAsTemplate { path: PathBuf },

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 打包清单错误
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type CreateHtmlResult<T> = Result<T, CreateHtmlError>;

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// HTML 模板生成器
///
/// 生命周期与打包工具的钩子一一对应：
///
/// 1. [`HtmlTemplate::new`]：规范化并校验配置（build start）
/// 2. [`HtmlTemplate::output_options`]：确定输出文件名（output options）
/// 3. [`HtmlTemplate::generate_bundle`]：组装 HTML 并输出文件（generate bundle）
///
/// 同一个实例可以被多次调用 `generate_bundle`，每次调用互不影响。
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    options: NormalizedOptions,
    output_file_name: Option<String>,
}

impl HtmlTemplate {
    pub fn new(options: HtmlTemplateOptions) -> CreateHtmlResult<Self> {
        Ok(Self {
            options: options.normalize()?,
            output_file_name: None,
        })
    }

    pub fn options(&self) -> &NormalizedOptions {
        &self.options
    }

    pub fn output_file_name(&self) -> Option<&str> {
        self.output_file_name.as_deref()
    }

    /// 根据打包输出位置确定 HTML 文件名（相对于当前工作目录）
    pub fn output_options(
        &mut self,
        output_dir: Option<&Path>,
        output_file: Option<&Path>,
    ) -> CreateHtmlResult<&str> {
        let cwd = current_dir()?;
        self.output_options_in(output_dir, output_file, &cwd)
    }

    /// 同 [`HtmlTemplate::output_options`]，相对路径基于 `cwd`
    pub fn output_options_in(
        &mut self,
        output_dir: Option<&Path>,
        output_file: Option<&Path>,
        cwd: &Path,
    ) -> CreateHtmlResult<&str> {
        let file_name = resolve_output_file_name(&self.options, output_dir, output_file, cwd)?;
        debug!("output file name: {}", file_name);
        Ok(self.output_file_name.insert(file_name).as_str())
    }

    /// 生成全部输出文件：先是本地资源，最后是 HTML
    pub fn render(
        &self,
        outputs: &[OutputDescriptor],
        format: OutputFormat,
    ) -> CreateHtmlResult<Vec<EmittedFile>> {
        let options = &self.options;
        let file_name = match &self.output_file_name {
            Some(file_name) => file_name.clone(),
            None => resolve_output_file_name(options, None, None, &current_dir()?)?,
        };

        let markup = match &options.template {
            TemplateSource::File(path) => {
                fs::read_to_string(path).map_err(|source| CreateHtmlError::Io {
                    path: path.clone(),
                    source,
                })?
            }
            TemplateSource::Inline(markup) => markup.clone(),
        };

        let mut links = options.link.clone();
        let mut scripts = options.script.clone();
        let mut files = resolve_local_assets(&mut links, &mut scripts, &options.prefix)?;

        let plan = inject::plan(
            outputs,
            &options.inject,
            links,
            scripts,
            &options.prefix,
            format,
        );
        let html = assemble(
            &markup,
            &Assembly {
                title: options.title.as_deref(),
                meta: &options.meta,
                links: &plan.links,
                scripts: &plan.scripts,
            },
        )?;

        files.push(EmittedFile::new(file_name, html));
        Ok(files)
    }

    /// 组装 HTML 并交给 `sink`
    ///
    /// 所有内容生成成功后才开始输出，失败时不会输出任何文件。
    pub fn generate_bundle(
        &self,
        outputs: &[OutputDescriptor],
        format: OutputFormat,
        sink: &mut dyn EmitSink,
    ) -> CreateHtmlResult<()> {
        let files = self.render(outputs, format)?;
        for file in files {
            info!("emitting {}", file.file_name);
            sink.emit_file(file)?;
        }
        Ok(())
    }
}

fn current_dir() -> CreateHtmlResult<PathBuf> {
    std::env::current_dir().map_err(|source| CreateHtmlError::Io {
        path: PathBuf::from("."),
        source,
    })
}

/// 输出错误信息（红色）到 stderr
pub fn print_error_message(msg: &str, color: bool) {
    if color {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    } else {
        eprintln!("{msg}");
    }
}
