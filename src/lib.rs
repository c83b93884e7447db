//! # create-html
//!
//! 为打包产物生成最终的 HTML：读取模板，按配置插入标题、`meta`、样式表与脚本，
//! 并让新插入的标签沿用模板原有的缩进。
//!
//! ## 模块组织
//!
//! - `core` - 错误类型与 [`HtmlTemplate`] 生成流程
//! - `config` - 用户配置的读取、校验与规范化
//! - `bundle` - 打包产物描述与输出格式
//! - `inject` - 自动注入规划
//! - `assets` - 本地资源的复制与引用改写
//! - `assembler` - 文档组装
//! - `emit` - 输出文件与输出目标
//! - `parsers` - HTML 解析、DOM 操作与序列化
//! - `env` - 环境变量
//! - `utils` - 工具函数
//!
//! ```
//! use create_html::{HtmlTemplate, HtmlTemplateOptions, OutputDescriptor, OutputFormat};
//!
//! let template = HtmlTemplate::new(HtmlTemplateOptions {
//!     template: Some("<html></html>".to_string()),
//!     file_name: Some("index.html".to_string()),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let files = template
//!     .render(&[OutputDescriptor::chunk("main.js", true)], OutputFormat::Es)
//!     .unwrap();
//! assert!(files[0].source_str().unwrap().contains(r#"<script src="/main.js" type="module"></script>"#));
//! ```

pub mod assembler;
pub mod assets;
pub mod bundle;
pub mod config;
pub mod core;
pub mod emit;
pub mod env;
pub mod inject;
pub mod parsers;
pub mod utils;

pub use assembler::{assemble, Assembly, ScriptLocation};
pub use bundle::{load_manifest, BundleManifest, OutputDescriptor, OutputFormat, OutputType};
pub use config::{HtmlTemplateOptions, NormalizedOptions, OneOrMany, TemplateSource};
pub use crate::core::{print_error_message, CreateHtmlError, CreateHtmlResult, HtmlTemplate};
pub use emit::{DirectorySink, EmitSink, EmittedFile};
pub use inject::{InjectConfig, InjectRule, InjectionPlan};
pub use parsers::html::{AttrValue, Attributes};
