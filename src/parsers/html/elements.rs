use tracing::debug;

use crate::core::{CreateHtmlError, CreateHtmlResult};

use super::attributes::Attributes;
use super::dom::{Document, Element, NodeData, NodeId};
use super::indent::{insert_element, Placement};

/// 检查标签名是否可以被解析器识别
pub fn is_valid_tag_name(tag_name: &str) -> bool {
    let mut chars = tag_name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

/// 创建元素
///
/// 返回一个没有子节点的游离元素，挂载由调用方负责。
/// 属性名统一为小写，未定义和值为 `false` 的属性被丢弃。
pub fn create_element(
    document: &mut Document,
    tag_name: &str,
    attrs: Option<&Attributes>,
) -> CreateHtmlResult<NodeId> {
    if !is_valid_tag_name(tag_name) {
        return Err(CreateHtmlError::InvalidTagName(tag_name.to_string()));
    }

    let attrs: Attributes = attrs
        .map(|attrs| {
            attrs
                .iter()
                .filter(|(_, value)| value.is_rendered())
                .map(|(name, value)| (name.to_lowercase(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    Ok(document.create_node(NodeData::Element(Element::new(
        tag_name.to_lowercase(),
        attrs,
    ))))
}

/// 获取元素，不存在时创建
///
/// 在 `parent` 的后代中查找第一个 `tag_name` 元素；找不到时创建一个，
/// 并按 `placement` 插入 `parent`。
pub fn get_element(
    document: &mut Document,
    parent: NodeId,
    tag_name: &str,
    placement: Placement,
) -> CreateHtmlResult<NodeId> {
    if let Some(existing) = document.find_node(parent, tag_name) {
        return Ok(existing);
    }

    let child = create_element(document, tag_name, None)?;
    insert_element(document, parent, child, placement);
    debug!("created missing <{}> ({:?})", tag_name, placement);

    Ok(child)
}
