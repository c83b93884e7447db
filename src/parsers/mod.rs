//! # 解析器模块
//!
//! 目前只包含 HTML 模板的解析、编辑与序列化。
//!
//! # 模块组织
//!
//! - `html` - 保留格式的 HTML 解析、DOM 操作、元素插入与序列化

pub mod html;

pub use html::{
    create_element, get_element, html_to_dom, serialize_attributes, serialize_document,
    AttrValue, Attributes, Document, NodeId, Placement,
};
