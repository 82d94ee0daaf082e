//! HTML 页面正文提取
//!
//! 依次尝试正文区域选择器，在文档顺序中返回第一个文本足够长的元素。
//! 选择器只支持 `.class` 和标签名两种形式。

use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::{page_text, TextSource};
use crate::translation::config::constants::CONTENT_SELECTORS;
use crate::translation::error::{TranslationError, TranslationResult};

// 文本内容中排除的元素
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// 将 HTML 字节按给定编码解码后解析为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> TranslationResult<RcDom> {
    let text = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => encoding.decode(data).0.into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut text.as_bytes())
        .map_err(|e| TranslationError::ParseError(format!("HTML解析失败: {}", e)))
}

/// 获取节点属性值
fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 查找文档声明的字符集
fn get_charset(node: &Handle) -> Option<String> {
    let mut metas = Vec::new();
    collect_elements(node, &mut |n: &Handle| get_node_name(n) == Some("meta"), &mut metas);

    for meta in &metas {
        if let Some(charset) = get_node_attr(meta, "charset") {
            return Some(charset);
        }

        let is_content_type = get_node_attr(meta, "http-equiv")
            .map_or(false, |v| v.eq_ignore_ascii_case("content-type"));
        if is_content_type {
            if let Some(content) = get_node_attr(meta, "content") {
                let charset = content.split(';').find_map(|part| {
                    let (key, value) = part.trim().split_once('=')?;
                    key.trim()
                        .eq_ignore_ascii_case("charset")
                        .then(|| value.trim().trim_matches('"').to_string())
                });
                if charset.is_some() {
                    return charset;
                }
            }
        }
    }

    None
}

fn collect_elements(node: &Handle, matches: &mut dyn FnMut(&Handle) -> bool, out: &mut Vec<Handle>) {
    if matches(node) {
        out.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        collect_elements(child, matches, out);
    }
}

fn matches_selector(node: &Handle, selector: &str) -> bool {
    let Some(name) = get_node_name(node) else {
        return false;
    };

    match selector.strip_prefix('.') {
        Some(class) => get_node_attr(node, "class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class)),
        None => name.eq_ignore_ascii_case(selector),
    }
}

/// 元素的文本内容，不含脚本和样式
fn text_content(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if SKIPPED_ELEMENTS.contains(&name.local.as_ref()) => {}
        _ => {
            for child in node.children.borrow().iter() {
                text_content(child, out);
            }
        }
    }
}

/// HTML 文本来源
pub struct HtmlTextSource {
    dom: RcDom,
    selectors: Vec<String>,
}

impl HtmlTextSource {
    /// 解析 HTML，优先使用文档内声明的字符集
    pub fn from_bytes(data: &[u8]) -> TranslationResult<Self> {
        let mut dom = html_to_dom(data, "utf-8")?;

        if let Some(charset) = get_charset(&dom.document) {
            let declared = Encoding::for_label(charset.as_bytes());
            if declared.map_or(false, |enc| enc != encoding_rs::UTF_8) {
                tracing::debug!("按文档声明的字符集重新解析: {}", charset);
                dom = html_to_dom(data, &charset)?;
            }
        }

        Ok(Self {
            dom,
            selectors: CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn from_html(html: &str) -> TranslationResult<Self> {
        Self::from_bytes(html.as_bytes())
    }

    /// 替换正文选择器列表
    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }
}

impl TextSource for HtmlTextSource {
    fn extract(&self) -> Option<String> {
        for selector in &self.selectors {
            let mut candidates = Vec::new();
            collect_elements(
                &self.dom.document,
                &mut |node: &Handle| matches_selector(node, selector),
                &mut candidates,
            );

            for element in &candidates {
                let mut text = String::new();
                text_content(element, &mut text);
                if let Some(found) = page_text(&text) {
                    tracing::debug!("选择器 {} 命中正文", selector);
                    return Some(found);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_content_class() {
        let html = r#"<html><body>
            <nav>Navigation links here</nav>
            <div class="sidebar content">Find the door in the city.</div>
            <p>Another paragraph of text.</p>
        </body></html>"#;
        let source = HtmlTextSource::from_html(html).unwrap();
        assert_eq!(source.extract().as_deref(), Some("Find the door in the city."));
    }

    #[test]
    fn test_skips_short_elements() {
        let html = "<html><body><p>Short.</p><p>This paragraph is long enough.</p></body></html>";
        let source = HtmlTextSource::from_html(html).unwrap();
        assert_eq!(
            source.extract().as_deref(),
            Some("This paragraph is long enough.")
        );
    }

    #[test]
    fn test_excludes_script_and_style() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><script>var x = 'not text at all';</script>Hi</body></html>";
        let source = HtmlTextSource::from_html(html).unwrap();
        assert_eq!(source.extract(), None);
    }

    #[test]
    fn test_falls_back_to_body() {
        let html = "<html><body><span>Only a span with words.</span></body></html>";
        let source = HtmlTextSource::from_html(html).unwrap();
        assert_eq!(source.extract().as_deref(), Some("Only a span with words."));
    }

    #[test]
    fn test_custom_selectors() {
        let html = "<html><body><h1>A heading long enough</h1><p>A paragraph long enough</p></body></html>";
        let source = HtmlTextSource::from_html(html)
            .unwrap()
            .with_selectors(["h1"]);
        assert_eq!(source.extract().as_deref(), Some("A heading long enough"));
    }

    #[test]
    fn test_declared_charset_is_honored() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(
            "<html><head><meta charset=\"windows-1252\"></head><body><p>Caf\u{e9} near the station</p></body></html>",
        );
        let source = HtmlTextSource::from_bytes(&bytes).unwrap();
        assert_eq!(source.extract().as_deref(), Some("Caf\u{e9} near the station"));
    }

    #[test]
    fn test_content_type_charset() {
        let html = r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"></head></html>"#;
        let dom = html_to_dom(html.as_bytes(), "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document).as_deref(), Some("ISO-8859-1"));
    }
}
