use super::attributes::serialize_attributes;
use super::dom::{Document, NodeData, NodeId};
use super::utils::is_void_element;

/// 序列化文档
///
/// 解析得到的节点按源文档原文输出，新建的元素按属性重新拼接，
/// 新插入的空白节点同样原样输出。
pub fn serialize_document(document: &Document) -> String {
    let mut buf = String::new();
    for child in document.children(document.root()) {
        serialize_node(document, *child, &mut buf);
    }
    buf
}

/// 序列化单个节点及其子树
pub fn serialize_node(document: &Document, id: NodeId, buf: &mut String) {
    match document.data(id) {
        NodeData::Document => {
            for child in document.children(id) {
                serialize_node(document, *child, buf);
            }
        }
        NodeData::Doctype(markup) | NodeData::Comment(markup) | NodeData::Text(markup) => {
            buf.push_str(markup)
        }
        NodeData::Element(element) => {
            let children = document.children(id);

            match &element.source {
                Some(source) => buf.push_str(&source.start),
                None => {
                    buf.push('<');
                    buf.push_str(&element.name);
                    let attrs = serialize_attributes(&element.attrs);
                    if !attrs.is_empty() {
                        buf.push(' ');
                        buf.push_str(&attrs);
                    }
                    buf.push('>');
                }
            }

            if is_void_element(&element.name) || (element.self_closing && children.is_empty()) {
                return;
            }

            for child in children {
                serialize_node(document, *child, buf);
            }
            match &element.source {
                Some(source) => {
                    if let Some(end) = &source.end {
                        buf.push_str(end);
                    }
                }
                None => {
                    buf.push_str("</");
                    buf.push_str(&element.name);
                    buf.push('>');
                }
            }
        }
    }
}
