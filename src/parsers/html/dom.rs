//! 基于 arena 的 DOM 树
//!
//! 所有节点保存在 [`Document`] 内部的向量中，通过 [`NodeId`] 引用。
//! 子节点列表是唯一的所有权关系；父节点引用只用于导航，
//! 因此树中不存在引用循环。
//!
//! 通过 `create_*` 创建的节点处于游离状态，直到被挂载到某个父节点下。
//! 被替换或移除的节点仍留在 arena 中，但已无法从根节点访问。

use super::attributes::{AttrValue, Attributes};

/// 节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 元素数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// 小写标签名
    pub name: String,
    /// 属性，值为源文档中的写法（实体不解码）
    pub attrs: Attributes,
    /// 源文档中以 `/>` 结尾
    pub self_closing: bool,
    /// 解析得到的元素在源文档中的标签原文；新建元素为 `None`
    pub source: Option<TagSource>,
}

impl Element {
    pub fn new(name: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            name: name.into(),
            attrs,
            self_closing: false,
            source: None,
        }
    }
}

/// 标签原文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSource {
    pub start: String,
    /// 源文档中没有结束标签时为 `None`
    pub end: Option<String>,
}

/// 节点数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    /// DOCTYPE 原文
    Doctype(String),
    /// 注释原文，包括 `<!--` 与 `-->`
    Comment(String),
    /// 源文档中的文本原文，或调用方已转义的文本
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// HTML 文档
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只有根节点的空文档
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// 获取父节点
    pub fn get_parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// 获取前一个兄弟节点
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get_parent_node(id)?;
        let siblings = self.children(parent);
        let index = self.index_in_parent(parent, id)?;
        index.checked_sub(1).map(|prev| siblings[prev])
    }

    /// 创建游离节点
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeData::Text(text.into()))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, 0, child);
    }

    /// 在指定位置挂载节点；已挂载的节点会先被移除
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// 将节点从父节点中移除
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// 用 `new` 原地替换 `old`，返回是否替换成功
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.get_parent_node(old) else {
            return false;
        };
        let Some(index) = self.index_in_parent(parent, old) else {
            return false;
        };

        self.detach(new);
        self.nodes[parent.0].children[index] = new;
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
        true
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// 获取节点名称
    pub fn get_node_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    /// 获取节点属性值；仅有属性名的属性返回空字符串
    pub fn get_node_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        match self.element(id)?.attrs.get(attr_name)? {
            AttrValue::Text(value) => Some(value),
            AttrValue::Flag(true) => Some(""),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// 修改文本节点的内容；非文本节点不受影响
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let NodeData::Text(contents) = &mut self.nodes[id.0].data {
            *contents = text.into();
        }
    }

    /// 用单个文本节点替换全部子节点
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        let text_node = self.create_text(text);
        self.append_child(id, text_node);
    }

    /// 按先序查找第一个匹配的后代元素
    pub fn find_node(&self, scope: NodeId, node_name: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.get_node_name(*id) == Some(node_name))
    }

    /// 按先序查找所有匹配的后代元素
    pub fn find_nodes(&self, scope: NodeId, node_name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.get_node_name(*id) == Some(node_name))
            .collect()
    }

    /// 先序遍历的全部后代（不含 `scope` 本身）
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        found
    }

    fn index_in_parent(&self, parent: NodeId, id: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|child| *child == id)
    }
}
