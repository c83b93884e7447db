use std::sync::LazyLock;

use html5ever::tokenizer::states::RawKind;
use regex::Regex;

/// 空元素（没有结束标签，也不能拥有子节点）
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// 打开新标签时会被隐式关闭的元素：`(当前元素, 触发关闭的新标签)`
pub const CLOSED_BY_OPENING: &[(&str, &[&str])] = &[
    ("li", &["li"]),
    ("p", &["p", "div"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dt", "dd"]),
    ("td", &["td", "th", "tr"]),
    ("th", &["td", "th", "tr"]),
    ("tr", &["tr"]),
    ("option", &["option", "optgroup"]),
];

/// 缩进步长（空格数）
pub const INDENT_STEP: usize = 2;

static STYLE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+\.css$").expect("stylesheet pattern is valid"));

static SCRIPT_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+\.m?js$").expect("script pattern is valid"));

/// 检查是否为空元素
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// 分词器在该元素开始标签之后应切换到的原始文本状态
pub fn raw_kind(tag_name: &str) -> Option<RawKind> {
    match tag_name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

/// 打开 `opening` 时是否应隐式关闭 `current`
pub fn is_closed_by_opening(current: &str, opening: &str) -> bool {
    CLOSED_BY_OPENING
        .iter()
        .any(|(tag, closers)| *tag == current && closers.contains(&opening))
}

/// 检查文件名是否为样式表
pub fn is_style(file_name: &str) -> bool {
    STYLE_FILE_RE.is_match(file_name)
}

/// 检查文件名是否为脚本（`.js` 或 `.mjs`）
pub fn is_script(file_name: &str) -> bool {
    SCRIPT_FILE_RE.is_match(file_name)
}

/// 检查文本是否只由空白组成（格式化节点）
pub fn is_whitespace(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_whitespace())
}

/// 生成换行加缩进的文本
pub fn line_text(indent: usize) -> String {
    format!("\n{}", " ".repeat(indent))
}

/// 转义文本节点内容
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{00A0}' => escaped.push_str("&nbsp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
