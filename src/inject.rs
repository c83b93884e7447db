//! 注入规划
//!
//! 根据打包产物与注入配置，决定为哪些输出文件生成 `link`/`script` 条目。
//! 静态配置的条目总是排在自动注入的条目之前；
//! 自动注入的条目按打包工具的输出顺序排列。

use std::collections::BTreeMap;

use tracing::debug;

use crate::bundle::{OutputDescriptor, OutputFormat};
use crate::parsers::html::attributes::{AttrValue, Attributes};
use crate::parsers::html::utils::{is_script, is_style};
use crate::utils::url::with_prefix;

/// 单个文件的注入规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectRule {
    /// 不注入
    Disabled,
    /// 按默认方式注入
    Enabled,
    /// 注入，并用给定属性覆盖生成的属性
    EnabledWithAttributes(Attributes),
}

impl InjectRule {
    fn overrides(&self) -> Option<&Attributes> {
        match self {
            InjectRule::EnabledWithAttributes(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// 注入配置
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InjectConfig {
    /// 关闭自动注入
    Disabled,
    /// 所有文件按默认方式注入
    #[default]
    Enabled,
    /// 按文件名配置；未列出的文件按默认方式注入
    PerFile(BTreeMap<String, InjectRule>),
}

static DISABLED: InjectRule = InjectRule::Disabled;
static ENABLED: InjectRule = InjectRule::Enabled;

impl InjectConfig {
    /// 查找某个文件的注入规则
    pub fn rule_for(&self, file_name: &str) -> &InjectRule {
        match self {
            InjectConfig::Disabled => &DISABLED,
            InjectConfig::Enabled => &ENABLED,
            InjectConfig::PerFile(rules) => rules.get(file_name).unwrap_or(&ENABLED),
        }
    }
}

/// 规划结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionPlan {
    pub links: Vec<Attributes>,
    pub scripts: Vec<Attributes>,
}

/// 在静态条目之后追加自动注入的条目
pub fn plan(
    outputs: &[OutputDescriptor],
    inject: &InjectConfig,
    links: Vec<Attributes>,
    scripts: Vec<Attributes>,
    prefix: &str,
    format: OutputFormat,
) -> InjectionPlan {
    let mut plan = InjectionPlan { links, scripts };

    if *inject == InjectConfig::Disabled {
        return plan;
    }

    for output in outputs {
        let file_name = output.file_name.as_str();
        let rule = inject.rule_for(file_name);
        if *rule == InjectRule::Disabled {
            debug!("injection disabled for {}", file_name);
            continue;
        }

        let path = with_prefix(prefix, file_name);
        let entry = if !output.is_chunk() && is_style(file_name) {
            Some((
                true,
                Attributes::new().with("href", path).with("rel", "stylesheet"),
            ))
        } else if !output.is_chunk() && is_script(file_name) {
            Some((false, Attributes::new().with("src", path)))
        } else if output.is_chunk() && output.is_entry && is_script(file_name) {
            let kind = if format.is_es() {
                AttrValue::from("module")
            } else {
                AttrValue::Absent
            };
            Some((false, Attributes::new().with("src", path).with("type", kind)))
        } else {
            None
        };

        let Some((is_link, mut attrs)) = entry else {
            continue;
        };
        if let Some(overrides) = rule.overrides() {
            attrs.extend_from(overrides);
        }

        debug!(
            "injecting {} as <{}>",
            file_name,
            if is_link { "link" } else { "script" }
        );
        if is_link {
            plan.links.push(attrs);
        } else {
            plan.scripts.push(attrs);
        }
    }

    plan
}
