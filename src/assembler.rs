//! 文档组装
//!
//! 一次组装的流程：解析模板 → 定位 `head` → 合并 `meta` → 设置标题 →
//! 插入 `link` → 插入 `script` → 序列化。
//! 每次调用都使用独立的文档，调用之间不共享状态。

use tracing::debug;

use crate::core::{CreateHtmlError, CreateHtmlResult};
use crate::parsers::html::attributes::{AttrValue, Attributes};
use crate::parsers::html::dom::{Document, NodeId};
use crate::parsers::html::elements::{create_element, get_element};
use crate::parsers::html::indent::{insert_element, Placement};
use crate::parsers::html::parser::html_to_dom;
use crate::parsers::html::serializer::serialize_document;
use crate::parsers::html::utils::escape_text;

/// 脚本插入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptLocation {
    /// `head` 末尾
    Head,
    /// `body` 开头
    BodyStart,
    /// `body` 末尾
    #[default]
    BodyEnd,
}

impl ScriptLocation {
    /// 识别 `location` 属性；无法识别的值按 `BodyEnd` 处理
    pub fn from_attr(value: Option<&AttrValue>) -> Self {
        match value.and_then(AttrValue::as_text) {
            Some("head") => ScriptLocation::Head,
            Some("bodyStart") => ScriptLocation::BodyStart,
            _ => ScriptLocation::BodyEnd,
        }
    }
}

/// 组装所需的内容
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembly<'a> {
    pub title: Option<&'a str>,
    pub meta: &'a [Attributes],
    pub links: &'a [Attributes],
    pub scripts: &'a [Attributes],
}

/// 把标签插入模板并返回新的 HTML
pub fn assemble(template: &str, assembly: &Assembly) -> CreateHtmlResult<String> {
    let mut document = html_to_dom(template);
    let html = document
        .find_node(document.root(), "html")
        .ok_or(CreateHtmlError::MissingHtmlTag)?;

    let head = get_element(&mut document, html, "head", Placement::Prepend)?;

    for meta in assembly.meta {
        merge_meta(&mut document, head, meta)?;
    }

    if let Some(title) = assembly.title.filter(|title| !title.is_empty()) {
        let title_node = get_element(&mut document, head, "title", Placement::Append)?;
        document.set_text_content(title_node, escape_text(title));
    }

    for attrs in assembly.links {
        let link = create_element(&mut document, "link", Some(attrs))?;
        insert_element(&mut document, head, link, Placement::Append);
    }

    if !assembly.scripts.is_empty() {
        let body = get_element(&mut document, html, "body", Placement::Append)?;

        for attrs in assembly.scripts {
            let mut attrs = attrs.clone();
            let location = ScriptLocation::from_attr(attrs.remove("location").as_ref());
            let script = create_element(&mut document, "script", Some(&attrs))?;

            match location {
                ScriptLocation::Head => {
                    insert_element(&mut document, head, script, Placement::Append)
                }
                ScriptLocation::BodyStart => {
                    insert_element(&mut document, body, script, Placement::Prepend)
                }
                ScriptLocation::BodyEnd => {
                    insert_element(&mut document, body, script, Placement::Append)
                }
            }
        }
    }

    Ok(serialize_document(&document))
}

/// 插入 `meta`；同名的已有 `meta` 被原地替换
fn merge_meta(document: &mut Document, head: NodeId, attrs: &Attributes) -> CreateHtmlResult<()> {
    let meta = create_element(document, "meta", Some(attrs))?;

    // 属性名在创建元素时已统一为小写，按新元素上的 `name` 查找
    if let Some(name) = document.get_node_attr(meta, "name").map(str::to_string) {
        let existing = document
            .find_nodes(head, "meta")
            .into_iter()
            .find(|node| *node != meta && document.get_node_attr(*node, "name") == Some(name.as_str()));

        if let Some(existing) = existing {
            debug!("replacing <meta name=\"{}\">", name);
            document.replace_child(existing, meta);
            return Ok(());
        }
    }

    insert_element(document, head, meta, Placement::Append);
    Ok(())
}
