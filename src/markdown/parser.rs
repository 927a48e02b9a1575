//! Markdown parser implementation using comrak
//!
//! Wraps comrak's parser and converts its arena AST into an owned tree the
//! preview renderer can walk without holding the arena.

use comrak::{
    nodes::{AstNode, ListDelimType, ListType as ComrakListType, NodeValue},
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

impl MarkdownOptions {
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options
    }
}

/// Heading level (H1-H6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
    H5 = 5,
    H6 = 6,
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        match level {
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }
}

/// List type (ordered or unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Bullet,
    Ordered { start: u32, delimiter: char },
}

/// The kinds of node the preview knows how to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownNodeType {
    Document,
    BlockQuote,
    List { list_type: ListType },
    /// List item; `checked` is set for task list items
    Item { checked: Option<bool> },
    CodeBlock { info: String, literal: String },
    Paragraph,
    Heading { level: HeadingLevel },
    ThematicBreak,
    Text(String),
    SoftBreak,
    LineBreak,
    Code(String),
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String },
    /// Anything else (raw HTML, footnotes...), shown as its text
    Other,
}

/// A node in the markdown AST.
#[derive(Debug, Clone)]
pub struct MarkdownNode {
    pub node_type: MarkdownNodeType,
    pub children: Vec<MarkdownNode>,
}

impl MarkdownNode {
    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.node_type {
            MarkdownNodeType::Text(t) | MarkdownNodeType::Code(t) => output.push_str(t),
            MarkdownNodeType::SoftBreak => output.push(' '),
            MarkdownNodeType::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    pub root: MarkdownNode,
}

impl MarkdownDocument {
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text with the default options.
pub fn parse_markdown(markdown: &str) -> MarkdownDocument {
    parse_markdown_with_options(markdown, &MarkdownOptions::default())
}

/// Parse markdown text with custom options.
pub fn parse_markdown_with_options(markdown: &str, options: &MarkdownOptions) -> MarkdownDocument {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options.to_comrak_options());
    MarkdownDocument {
        root: convert_node(root),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

fn convert_node<'a>(node: &'a AstNode<'a>) -> MarkdownNode {
    let node_type = convert_node_value(&node.data.borrow().value);
    MarkdownNode {
        node_type,
        children: node.children().map(convert_node).collect(),
    }
}

fn convert_node_value(value: &NodeValue) -> MarkdownNodeType {
    match value {
        NodeValue::Document => MarkdownNodeType::Document,
        NodeValue::BlockQuote => MarkdownNodeType::BlockQuote,
        NodeValue::List(list) => {
            let list_type = match list.list_type {
                ComrakListType::Bullet => ListType::Bullet,
                ComrakListType::Ordered => ListType::Ordered {
                    start: list.start as u32,
                    delimiter: if list.delimiter == ListDelimType::Period {
                        '.'
                    } else {
                        ')'
                    },
                },
            };
            MarkdownNodeType::List { list_type }
        }
        NodeValue::Item(_) => MarkdownNodeType::Item { checked: None },
        NodeValue::TaskItem(mark) => MarkdownNodeType::Item {
            checked: Some(matches!(mark, Some('x') | Some('X'))),
        },
        NodeValue::CodeBlock(code) => MarkdownNodeType::CodeBlock {
            info: code.info.clone(),
            literal: code.literal.clone(),
        },
        NodeValue::Paragraph => MarkdownNodeType::Paragraph,
        NodeValue::Heading(heading) => MarkdownNodeType::Heading {
            level: HeadingLevel::from(heading.level),
        },
        NodeValue::ThematicBreak => MarkdownNodeType::ThematicBreak,
        NodeValue::Text(text) => MarkdownNodeType::Text(text.clone()),
        NodeValue::SoftBreak => MarkdownNodeType::SoftBreak,
        NodeValue::LineBreak => MarkdownNodeType::LineBreak,
        NodeValue::Code(code) => MarkdownNodeType::Code(code.literal.clone()),
        NodeValue::Emph => MarkdownNodeType::Emphasis,
        NodeValue::Strong => MarkdownNodeType::Strong,
        NodeValue::Strikethrough => MarkdownNodeType::Strikethrough,
        NodeValue::Link(link) => MarkdownNodeType::Link {
            url: link.url.clone(),
        },
        NodeValue::HtmlInline(html) => MarkdownNodeType::Text(html.clone()),
        _ => MarkdownNodeType::Other,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn first(markdown: &str) -> MarkdownNode {
        parse_markdown(markdown).root.children[0].clone()
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_markdown("").is_empty());
    }

    #[test]
    fn test_parse_paragraph_with_spans() {
        let para = first("Texto **forte** e *leve* com ~~risco~~ e `código`");
        assert_eq!(para.node_type, MarkdownNodeType::Paragraph);
        let kinds: Vec<&MarkdownNodeType> = para.children.iter().map(|c| &c.node_type).collect();
        assert!(kinds.contains(&&MarkdownNodeType::Strong));
        assert!(kinds.contains(&&MarkdownNodeType::Emphasis));
        assert!(kinds.contains(&&MarkdownNodeType::Strikethrough));
        assert!(kinds.contains(&&MarkdownNodeType::Code("código".to_string())));
        assert_eq!(
            para.text_content(),
            "Texto forte e leve com risco e código"
        );
    }

    #[test]
    fn test_parse_headings() {
        assert_eq!(
            first("# Metas").node_type,
            MarkdownNodeType::Heading {
                level: HeadingLevel::H1
            }
        );
        assert_eq!(
            first("## Revisão").node_type,
            MarkdownNodeType::Heading {
                level: HeadingLevel::H2
            }
        );
    }

    #[test]
    fn test_parse_ordered_list() {
        let list = first("3. um\n4. dois");
        match list.node_type {
            MarkdownNodeType::List {
                list_type: ListType::Ordered { start, delimiter },
            } => {
                assert_eq!(start, 3);
                assert_eq!(delimiter, '.');
            }
            other => panic!("Expected ordered list, got {:?}", other),
        }
        assert_eq!(list.children.len(), 2);
    }

    #[test]
    fn test_parse_task_list() {
        let list = first("- [ ] pendente\n- [x] feito\n- comum");
        let checks: Vec<MarkdownNodeType> =
            list.children.iter().map(|c| c.node_type.clone()).collect();
        assert_eq!(
            checks,
            vec![
                MarkdownNodeType::Item {
                    checked: Some(false)
                },
                MarkdownNodeType::Item {
                    checked: Some(true)
                },
                MarkdownNodeType::Item { checked: None },
            ]
        );
    }

    #[test]
    fn test_parse_quote_code_and_rule() {
        let doc = parse_markdown("> citação\n\n```rust\nfn main() {}\n```\n\n---");
        let kinds: Vec<&MarkdownNodeType> =
            doc.root.children.iter().map(|c| &c.node_type).collect();
        assert_eq!(kinds[0], &MarkdownNodeType::BlockQuote);
        assert_eq!(
            kinds[1],
            &MarkdownNodeType::CodeBlock {
                info: "rust".to_string(),
                literal: "fn main() {}\n".to_string()
            }
        );
        assert_eq!(kinds[2], &MarkdownNodeType::ThematicBreak);
    }

    #[test]
    fn test_parse_link_and_autolink() {
        let para = first("[site](https://exemplo.com) e https://outro.com");
        let urls: Vec<String> = para
            .children
            .iter()
            .filter_map(|c| match &c.node_type {
                MarkdownNodeType::Link { url } => Some(url.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(urls, vec!["https://exemplo.com", "https://outro.com"]);
    }
}
