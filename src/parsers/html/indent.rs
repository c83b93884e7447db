//! 缩进引擎
//!
//! 向父元素插入子元素时，调整插入点两侧的空白文本节点，
//! 使输出与手写 HTML 的缩进保持一致：子元素比父元素深一级（两个空格）。
//!
//! 父元素的缩进取自它前一个兄弟文本节点中最后一个换行符之后的空格数；
//! 取不到时按 0 处理。已经正确的空白节点保持不变，
//! 因此对已格式化的文档重复插入不会产生多余的空行。
//!
//! 只有纯空白的文本节点会被视为格式化节点并被改写，含有内容的文本节点不会被修改。
//! 使用制表符缩进的文档无法被完整保留。

use tracing::trace;

use super::dom::{Document, NodeId};
use super::utils::{is_whitespace, line_text, INDENT_STEP};

/// 插入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// 追加到末尾
    Append,
    /// 插入到开头
    Prepend,
}

/// 推断元素自身的缩进
pub fn parent_indent(document: &Document, parent: NodeId) -> Option<usize> {
    let previous = document.previous_sibling(parent)?;
    let text = document.text(previous)?;
    let (_, tail) = text.rsplit_once('\n')?;
    Some(tail.chars().take_while(|c| *c == ' ').count())
}

/// 确保 `edge` 是值为换行加 `indent` 个空格的格式化节点
///
/// `edge` 为纯空白文本节点时原地改写（值不同才改写），否则新建一个节点，
/// 按 `placement` 插入到父元素的末尾或开头。
pub fn insert_line_node(
    document: &mut Document,
    parent: NodeId,
    edge: Option<NodeId>,
    placement: Placement,
    indent: usize,
) {
    let line = line_text(indent);

    if let Some(edge) = edge {
        if let Some(text) = document.text(edge) {
            if is_whitespace(text) {
                if text != line {
                    document.set_text(edge, line);
                }
                return;
            }
        }
    }

    let line_node = document.create_text(line);
    match placement {
        Placement::Append => document.append_child(parent, line_node),
        Placement::Prepend => document.prepend_child(parent, line_node),
    }
}

/// 插入元素并维护两侧的缩进
///
/// 向非空父元素开头插入时，新元素之后的分隔节点有意使用子元素缩进，
/// 而不是照搬追加时的父元素缩进，原有的第一个子元素因此保持原来的缩进。
pub fn insert_element(
    document: &mut Document,
    parent: NodeId,
    child: NodeId,
    placement: Placement,
) {
    let parent_indent = parent_indent(document, parent).unwrap_or(0);
    let child_indent = parent_indent + INDENT_STEP;
    trace!(
        "inserting node with indent {} ({:?})",
        child_indent,
        placement
    );

    match placement {
        Placement::Append => {
            let last = document.last_child(parent);
            insert_line_node(document, parent, last, Placement::Append, child_indent);
            document.append_child(parent, child);
            // 让父元素的结束标签与开始标签对齐
            insert_line_node(document, parent, None, Placement::Append, parent_indent);
        }
        Placement::Prepend => {
            let first = document.first_child(parent);
            // 父元素为空时，这个节点负责结束标签的对齐；否则它分隔新元素与原有内容
            let separator_indent = if first.is_some() {
                child_indent
            } else {
                parent_indent
            };
            insert_line_node(document, parent, first, Placement::Prepend, separator_indent);
            document.prepend_child(parent, child);
            insert_line_node(document, parent, None, Placement::Prepend, child_indent);
        }
    }
}
