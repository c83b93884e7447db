//! HTML 模板处理模块
//!
//! 子模块划分：
//!
//! - `utils`: 基础常量与判定函数
//! - `attributes`: 有序属性映射与属性序列化
//! - `dom`: arena DOM 与基础节点操作
//! - `parser`: 保留格式的宽松解析器
//! - `serializer`: 序列化功能
//! - `indent`: 插入节点时的缩进维护
//! - `elements`: 元素创建与按名称查找

pub mod attributes;
pub mod dom;
pub mod elements;
pub mod indent;
pub mod parser;
pub mod serializer;
pub mod utils;

pub use attributes::{render_attribute, serialize_attributes, AttrValue, Attributes};
pub use dom::{Document, Element, NodeData, NodeId, TagSource};
pub use elements::{create_element, get_element, is_valid_tag_name};
pub use indent::{insert_element, insert_line_node, parent_indent, Placement};
pub use parser::html_to_dom;
pub use serializer::{serialize_document, serialize_node};
pub use utils::{is_script, is_style};
