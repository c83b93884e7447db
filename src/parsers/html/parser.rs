//! HTML 模板解析器
//!
//! 基于 html5ever 分词器的宽松单遍解析器。与完整的 HTML5 树构建算法不同，
//! 它不会重排文档结构，也不会丢弃标签之间的空白，
//! 因此序列化后的文档与手写模板保持一致：
//!
//! - 标签名和属性名统一为小写，但标签原文按源文档保存
//! - 文本与属性值中的字符引用不解码，原样保存
//! - 保留注释与 DOCTYPE
//! - 容忍未闭合的标签，孤立的结束标签被忽略
//! - 空元素和 `/>` 自闭合标签不会拥有子节点
//! - `script`、`style` 等原始文本元素的内容原样保存
//!
//! 输入中的 `\r\n` 与 `\r` 统一为 `\n`。

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Doctype, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use tracing::trace;

use super::attributes::{AttrValue, Attributes};
use super::dom::{Document, Element, NodeData, NodeId, TagSource};
use super::utils::{is_closed_by_opening, is_void_element, raw_kind};

/// 将 HTML 字符串解析为文档
pub fn html_to_dom(markup: &str) -> Document {
    let markup = markup.replace("\r\n", "\n").replace('\r', "\n");
    let placeholder = ampersand_placeholder(&markup);
    let source = match placeholder {
        Some(placeholder) => markup.replace('&', &placeholder.to_string()),
        None => markup,
    };

    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(&source));

    let sink = DomSink {
        builder: RefCell::new(TreeBuilder::new(source, placeholder)),
    };
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.finish()
}

/// 分词前用来替换 `&` 的私有区字符，使分词器不解码字符引用
fn ampersand_placeholder(markup: &str) -> Option<char> {
    ('\u{E000}'..='\u{F8FF}').find(|c| !markup.contains(*c))
}

/// 标签名是否位于 `markup` 开头（不区分大小写）
fn starts_with_tag(markup: &str, name: &str) -> bool {
    markup
        .get(..name.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        && !markup[name.len()..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '-')
}

/// 从 `begin` 处的 `<` 开始，找到标签结束的 `>` 之后的位置
///
/// 引号包围的属性值中的 `>` 不结束标签。
fn tag_end(source: &str, begin: usize) -> usize {
    let bytes = source.as_bytes();
    let mut quote: Option<u8> = None;
    let mut after_equals = false;
    let mut index = begin + 1;

    while index < bytes.len() {
        let byte = bytes[index];
        index += 1;
        match quote {
            Some(open) => {
                if byte == open {
                    quote = None;
                }
            }
            None => match byte {
                b'>' => return index,
                b'"' | b'\'' if after_equals => quote = Some(byte),
                b'=' => {
                    after_equals = true;
                    continue;
                }
                byte if byte.is_ascii_whitespace() => continue,
                _ => {}
            },
        }
        after_equals = false;
    }

    bytes.len()
}

/// 注释（含 `<?...>` 之类的伪注释）结束之后的位置
fn comment_end(source: &str, begin: usize) -> usize {
    let rest = &source[begin..];
    let Some(body) = rest.strip_prefix("<!--") else {
        return markup_end(source, begin);
    };

    let body_start = begin + 4;
    if body.starts_with('>') {
        return body_start + 1;
    }
    if body.starts_with("->") {
        return body_start + 2;
    }
    [body.find("-->").map(|at| at + 3), body.find("--!>").map(|at| at + 4)]
        .into_iter()
        .flatten()
        .min()
        .map_or(source.len(), |end| body_start + end)
}

/// 下一个 `>` 之后的位置
fn markup_end(source: &str, begin: usize) -> usize {
    source[begin..]
        .find('>')
        .map_or(source.len(), |at| begin + at + 1)
}

#[derive(Default)]
struct TreeBuilder {
    document: Document,
    open_elements: Vec<NodeId>,
    /// 送入分词器的输入
    source: String,
    /// 已消费的输入长度
    offset: usize,
    placeholder: Option<char>,
}

impl TreeBuilder {
    fn new(source: String, placeholder: Option<char>) -> Self {
        Self {
            source,
            placeholder,
            ..Self::default()
        }
    }

    /// 还原被替换的 `&`
    fn restore(&self, text: &str) -> String {
        match self.placeholder {
            Some(placeholder) => text.replace(placeholder, "&"),
            None => text.to_string(),
        }
    }

    /// 从当前位置起找到第一个满足 `starts` 的 `<`，取出到 `end` 为止的原文
    ///
    /// 找不到时返回 `None`，位置不变。
    fn take_markup(
        &mut self,
        starts: impl Fn(&str) -> bool,
        end: fn(&str, usize) -> usize,
    ) -> Option<String> {
        let rest = self.source.get(self.offset..)?;
        let (at, _) = rest
            .match_indices('<')
            .find(|(at, _)| starts(&rest[at + 1..]))?;

        let begin = self.offset + at;
        let finish = end(&self.source, begin);
        self.offset = finish;
        Some(self.restore(&self.source[begin..finish]))
    }

    fn current_node(&self) -> NodeId {
        self.open_elements
            .last()
            .copied()
            .unwrap_or_else(|| self.document.root())
    }

    fn current_name(&self) -> Option<&str> {
        self.open_elements
            .last()
            .and_then(|id| self.document.get_node_name(*id))
    }

    fn append(&mut self, data: NodeData) -> NodeId {
        let parent = self.current_node();
        let node = self.document.create_node(data);
        self.document.append_child(parent, node);
        node
    }

    fn push_text(&mut self, text: &str) {
        self.offset += text.len();
        let text = self.restore(text);

        // 分词器可能把连续文本拆成多个 token，合并到同一个文本节点
        let parent = self.current_node();
        if let Some(last) = self.document.last_child(parent) {
            if let Some(existing) = self.document.text(last) {
                let merged = format!("{existing}{text}");
                self.document.set_text(last, merged);
                return;
            }
        }

        self.append(NodeData::Text(text));
    }

    fn push_comment(&mut self, text: &str) {
        let markup = self
            .take_markup(|after| after.starts_with(|c: char| matches!(c, '!' | '?' | '/')), comment_end)
            .unwrap_or_else(|| format!("<!--{}-->", self.restore(text)));
        self.append(NodeData::Comment(markup));
    }

    fn push_doctype(&mut self, doctype: Doctype) {
        let markup = self
            .take_markup(
                |after| {
                    after
                        .get(..8)
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("!doctype"))
                },
                markup_end,
            )
            .unwrap_or_else(|| render_doctype(&doctype));
        self.append(NodeData::Doctype(markup));
    }

    fn start_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name.to_string();
        let start = self.take_markup(|after| starts_with_tag(after, &name), tag_end);

        if self
            .current_name()
            .is_some_and(|current| is_closed_by_opening(current, &name))
        {
            self.open_elements.pop();
        }

        let mut attrs = Attributes::new();
        for attr in tag.attrs.iter() {
            attrs.insert(
                attr.name.local.to_string(),
                AttrValue::Text(self.restore(&attr.value)),
            );
        }

        let element = self.append(NodeData::Element(Element {
            name: name.clone(),
            attrs,
            self_closing: tag.self_closing,
            source: start.map(|start| TagSource { start, end: None }),
        }));

        if tag.self_closing || is_void_element(&name) {
            return TokenSinkResult::Continue;
        }
        self.open_elements.push(element);

        if name == "plaintext" {
            return TokenSinkResult::Plaintext;
        }
        match raw_kind(&name) {
            Some(kind) => TokenSinkResult::RawData(kind),
            None => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&mut self, tag: Tag) {
        let name: &str = &tag.name;
        let markup = self.take_markup(
            |after| {
                after
                    .strip_prefix('/')
                    .is_some_and(|rest| starts_with_tag(rest, name))
            },
            tag_end,
        );
        if is_void_element(name) {
            return;
        }

        let position = self
            .open_elements
            .iter()
            .rposition(|id| self.document.get_node_name(*id) == Some(name));

        let Some(index) = position else {
            trace!("ignoring stray end tag </{}>", name);
            return;
        };
        let element = self.open_elements[index];
        self.open_elements.truncate(index);

        match (self.document.element_mut(element), markup) {
            (Some(element), Some(markup)) => {
                if let Some(source) = &mut element.source {
                    source.end = Some(markup);
                }
            }
            // 开始标签没有原文时整体按属性重新拼接
            (Some(element), None) => element.source = None,
            (None, _) => {}
        }
    }
}

fn render_doctype(doctype: &Doctype) -> String {
    let mut markup = String::from("<!DOCTYPE");
    if let Some(name) = &doctype.name {
        markup.push(' ');
        markup.push_str(name);
    }
    match (&doctype.public_id, &doctype.system_id) {
        (Some(public_id), Some(system_id)) => {
            markup.push_str(&format!(" PUBLIC \"{public_id}\" \"{system_id}\""));
        }
        (Some(public_id), None) => markup.push_str(&format!(" PUBLIC \"{public_id}\"")),
        (None, Some(system_id)) => markup.push_str(&format!(" SYSTEM \"{system_id}\"")),
        (None, None) => {}
    }
    markup.push('>');
    markup
}

struct DomSink {
    builder: RefCell<TreeBuilder>,
}

impl DomSink {
    fn finish(&self) -> Document {
        self.builder.take().document
    }
}

impl TokenSink for DomSink {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let mut builder = self.builder.borrow_mut();

        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return builder.start_tag(tag),
                TagKind::EndTag => builder.end_tag(tag),
            },
            Token::CharacterTokens(text) => builder.push_text(&text),
            Token::CommentToken(text) => builder.push_comment(&text),
            Token::DoctypeToken(doctype) => builder.push_doctype(doctype),
            Token::ParseError(error) => trace!("line {}: {}", line_number, error),
            Token::NullCharacterToken => builder.push_text("\0"),
            Token::EOFToken => {}
        }

        TokenSinkResult::Continue
    }
}
