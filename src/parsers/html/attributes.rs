//! HTML 属性模块
//!
//! 提供有序的属性映射 [`Attributes`] 以及属性序列化功能。
//!
//! ## 序列化规则
//!
//! - `AttrValue::Absent`（未定义）整体省略
//! - `AttrValue::Flag(true)` 只输出小写属性名，例如 `defer`
//! - `AttrValue::Flag(false)` 省略
//! - `AttrValue::Text(value)` 输出为 `name="value"`，属性名小写
//!
//! 输出顺序与映射的插入顺序一致，属性值不做转义。
//! 值为空字符串时输出 `name=""`。

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// 属性值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// 未定义
    Absent,
    /// 布尔标记
    Flag(bool),
    /// 字符串值
    Text(String),
}

impl AttrValue {
    /// 获取字符串值
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// 序列化时是否会输出
    pub fn is_rendered(&self) -> bool {
        matches!(self, AttrValue::Flag(true) | AttrValue::Text(_))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Absent, Into::into)
    }
}

/// 有序属性映射
///
/// 属性名唯一；对已存在的属性名再次插入时原地覆盖值，保持原有位置
/// （与对象展开 `{ ...base, ...overrides }` 的行为一致）。
/// 反序列化时按配置文件中的键顺序插入。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: IndexMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    /// 获取字符串属性值
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// 插入或原地覆盖属性
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// 构建器形式的 [`Attributes::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.entries.shift_remove(name)
    }

    /// 将另一组属性合并进来，后者覆盖前者
    pub fn extend_from(&mut self, other: &Attributes) {
        for (name, value) in other.iter() {
            self.insert(name, value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// 渲染单个属性，不输出时返回 `None`
pub fn render_attribute(name: &str, value: &AttrValue) -> Option<String> {
    match value {
        AttrValue::Absent | AttrValue::Flag(false) => None,
        AttrValue::Flag(true) => Some(name.to_lowercase()),
        AttrValue::Text(value) => Some(format!("{}=\"{}\"", name.to_lowercase(), value)),
    }
}

/// 将属性映射序列化为 HTML 属性语法
///
/// ```
/// use create_html::parsers::html::attributes::{serialize_attributes, AttrValue, Attributes};
///
/// let attrs = Attributes::new()
///     .with("src", "/index.js")
///     .with("type", AttrValue::Absent)
///     .with("Defer", true)
///     .with("async", false);
///
/// assert_eq!(serialize_attributes(&attrs), r#"src="/index.js" defer"#);
/// ```
pub fn serialize_attributes(attrs: &Attributes) -> String {
    attrs
        .iter()
        .filter_map(|(name, value)| render_attribute(name, value))
        .collect::<Vec<String>>()
        .join(" ")
}

struct AttrValueVisitor;

impl<'de> Visitor<'de> for AttrValueVisitor {
    type Value = AttrValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a boolean, a number or null")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<AttrValue, E> {
        Ok(AttrValue::Flag(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<AttrValue, E> {
        Ok(AttrValue::Absent)
    }

    fn visit_unit<E: de::Error>(self) -> Result<AttrValue, E> {
        Ok(AttrValue::Absent)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttrValueVisitor)
    }
}
