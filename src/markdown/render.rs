//! Read-only rendering of parsed markdown into egui widgets.

use super::parser::{parse_markdown, HeadingLevel, ListType, MarkdownNode, MarkdownNodeType};
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, FontId, RichText, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Theme-aware colors for the preview.
#[derive(Debug, Clone)]
pub struct PreviewColors {
    pub text: Color32,
    pub heading: Color32,
    pub code_bg: Color32,
    pub code_text: Color32,
    pub quote_border: Color32,
    pub quote_text: Color32,
    pub link: Color32,
    pub hr: Color32,
    pub list_marker: Color32,
}

impl PreviewColors {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        Self::from_theme_colors(&ThemeColors::from_visuals(visuals))
    }

    fn from_theme_colors(colors: &ThemeColors) -> Self {
        Self {
            text: colors.text.primary,
            heading: if colors.is_dark() {
                colors.text.primary
            } else {
                colors.brand.primary
            },
            code_bg: colors.base.background_tertiary,
            code_text: colors.text.secondary,
            quote_border: colors.base.border,
            quote_text: colors.text.secondary,
            link: colors.text.link,
            hr: colors.base.border,
            list_marker: colors.text.muted,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Renders markdown source as formatted text.
///
/// ```ignore
/// MarkdownPreview::new(&content).font_size(14.0).show(ui);
/// ```
pub struct MarkdownPreview<'a> {
    source: &'a str,
    font_size: f32,
    empty_text: &'a str,
}

impl<'a> MarkdownPreview<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            font_size: 14.0,
            empty_text: "",
        }
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Placeholder shown when the source has no content.
    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    pub fn show(self, ui: &mut Ui) {
        let colors = PreviewColors::from_visuals(ui.visuals());
        let doc = parse_markdown(self.source);

        if doc.is_empty() {
            ui.label(RichText::new(self.empty_text).italics().weak());
            return;
        }

        ui.vertical(|ui| {
            for child in &doc.root.children {
                render_node(ui, child, &colors, self.font_size, 0);
            }
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_node(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    match &node.node_type {
        MarkdownNodeType::Heading { level } => render_heading(ui, node, colors, font_size, *level),
        MarkdownNodeType::Paragraph => {
            render_inline_content(ui, node, colors, font_size, indent_level);
            ui.add_space(4.0);
        }
        MarkdownNodeType::List { list_type } => {
            render_list(ui, node, colors, font_size, indent_level, list_type)
        }
        MarkdownNodeType::BlockQuote => render_blockquote(ui, node, colors, font_size, indent_level),
        MarkdownNodeType::CodeBlock { literal, .. } => {
            render_code_block(ui, literal, colors, font_size)
        }
        MarkdownNodeType::ThematicBreak => render_thematic_break(ui, colors),
        _ => {
            let text = node.text_content();
            if !text.is_empty() {
                ui.label(RichText::new(text).color(colors.text).size(font_size));
            }
        }
    }
}

fn heading_size(level: HeadingLevel, base: f32) -> f32 {
    match level {
        HeadingLevel::H1 => base * 1.8,
        HeadingLevel::H2 => base * 1.5,
        HeadingLevel::H3 => base * 1.3,
        HeadingLevel::H4 => base * 1.15,
        HeadingLevel::H5 => base * 1.05,
        HeadingLevel::H6 => base,
    }
}

fn render_heading(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    level: HeadingLevel,
) {
    let top_margin = match level {
        HeadingLevel::H1 => 8.0,
        HeadingLevel::H2 => 6.0,
        _ => 4.0,
    };
    ui.add_space(top_margin);
    ui.label(
        RichText::new(node.text_content())
            .size(heading_size(level, font_size))
            .color(colors.heading)
            .strong(),
    );
    ui.add_space(2.0);
}

fn render_blockquote(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    ui.horizontal(|ui| {
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(4.0, ui.available_height()), egui::Sense::hover());
        ui.painter().rect_filled(rect, 0.0, colors.quote_border);
        ui.add_space(8.0);

        let quote_colors = PreviewColors {
            text: colors.quote_text,
            ..colors.clone()
        };
        ui.vertical(|ui| {
            for child in &node.children {
                render_node(ui, child, &quote_colors, font_size, indent_level);
            }
        });
    });
}

fn render_list(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
    list_type: &ListType,
) {
    let mut item_number = match list_type {
        ListType::Ordered { start, .. } => *start,
        ListType::Bullet => 0,
    };

    for child in &node.children {
        if let MarkdownNodeType::Item { checked } = &child.node_type {
            let marker = match (checked, list_type) {
                (Some(true), _) => "\u{2611}".to_string(),  // ☑
                (Some(false), _) => "\u{2610}".to_string(), // ☐
                (None, ListType::Bullet) => "\u{2022}".to_string(),
                (None, ListType::Ordered { delimiter, .. }) => {
                    format!("{}{}", item_number, delimiter)
                }
            };
            render_list_item(ui, child, colors, font_size, indent_level, &marker, *checked);
            item_number += 1;
        }
    }

    if indent_level == 0 {
        ui.add_space(4.0);
    }
}

fn render_list_item(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
    marker: &str,
    checked: Option<bool>,
) {
    let style = if checked == Some(true) {
        TextStyle::new().with_strikethrough()
    } else {
        TextStyle::new()
    };

    ui.horizontal_wrapped(|ui| {
        ui.add_space(4.0 + indent_level as f32 * 20.0);
        ui.label(
            RichText::new(marker)
                .color(colors.list_marker)
                .size(font_size),
        );
        ui.add_space(4.0);
        for child in &node.children {
            if matches!(child.node_type, MarkdownNodeType::Paragraph) {
                for inline in &child.children {
                    render_inline_node(ui, inline, colors, font_size, style);
                }
            }
        }
    });

    // Nested lists and other blocks inside the item
    for child in &node.children {
        if !matches!(child.node_type, MarkdownNodeType::Paragraph) {
            render_node(ui, child, colors, font_size, indent_level + 1);
        }
    }
}

fn render_code_block(ui: &mut Ui, literal: &str, colors: &PreviewColors, font_size: f32) {
    egui::Frame::none()
        .fill(colors.code_bg)
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(literal.trim_end_matches('\n'))
                    .font(FontId::monospace(font_size * 0.9))
                    .color(colors.code_text),
            );
        });
    ui.add_space(4.0);
}

fn render_thematic_break(ui: &mut Ui, colors: &PreviewColors) {
    ui.add_space(4.0);
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors.hr);
    ui.add_space(4.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting accumulated from enclosing inline nodes.
#[derive(Debug, Clone, Copy, Default)]
struct TextStyle {
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

impl TextStyle {
    fn new() -> Self {
        Self::default()
    }

    fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    fn apply(&self, mut text: RichText) -> RichText {
        if self.bold {
            text = text.strong();
        }
        if self.italic {
            text = text.italics();
        }
        if self.strikethrough {
            text = text.strikethrough();
        }
        text
    }
}

fn render_inline_content(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.add_space(indent_level as f32 * 20.0);
        for child in &node.children {
            render_inline_node(ui, child, colors, font_size, TextStyle::new());
        }
    });
}

fn render_inline_node(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    style: TextStyle,
) {
    match &node.node_type {
        MarkdownNodeType::Text(text) => {
            let rich = RichText::new(text).color(colors.text).size(font_size);
            ui.label(style.apply(rich));
        }
        MarkdownNodeType::Strong => {
            render_inline_children(ui, node, colors, font_size, style.with_bold())
        }
        MarkdownNodeType::Emphasis => {
            render_inline_children(ui, node, colors, font_size, style.with_italic())
        }
        MarkdownNodeType::Strikethrough => {
            render_inline_children(ui, node, colors, font_size, style.with_strikethrough())
        }
        MarkdownNodeType::Code(code) => {
            ui.label(
                RichText::new(code)
                    .font(FontId::monospace(font_size * 0.9))
                    .color(colors.code_text)
                    .background_color(colors.code_bg),
            );
        }
        MarkdownNodeType::Link { url } => {
            let label = RichText::new(node.text_content())
                .color(colors.link)
                .size(font_size)
                .underline();
            ui.hyperlink_to(style.apply(label), url)
                .on_hover_text(url.as_str());
        }
        MarkdownNodeType::SoftBreak => {
            ui.label(RichText::new(" ").size(font_size));
        }
        MarkdownNodeType::LineBreak => {
            ui.end_row();
        }
        _ => render_inline_children(ui, node, colors, font_size, style),
    }
}

fn render_inline_children(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    style: TextStyle,
) {
    for child in &node.children {
        render_inline_node(ui, child, colors, font_size, style);
    }
}
