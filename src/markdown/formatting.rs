//! Markdown Formatting Operations
//!
//! Toolbar commands for the rich-text editor. Every command toggles:
//! applying it to text that already carries the formatting removes it.
//!
//! # Supported Formatting Commands
//! - **Inline**: Bold, Italic, Strikethrough, Inline Code, Link
//! - **Blocks**: Headings (1-2), Bullet/Numbered/Task lists, Blockquote
//!
//! Selections are byte ranges into the text; callers holding egui character
//! indices convert them with [`crate::string_utils::char_range_to_byte_range`].
//!
//! # Usage
//! ```ignore
//! use crate::markdown::{apply_raw_format, MarkdownFormatCommand};
//!
//! let result = apply_raw_format("Olá mundo", Some((0, 4)), MarkdownFormatCommand::Bold);
//! assert_eq!(result.text, "**Olá** mundo");
//! ```

use crate::markdown::parser::HeadingLevel;
use crate::string_utils::{ceil_char_boundary, floor_char_boundary};

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown formatting commands that can be applied to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownFormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Inline code (`code`)
    InlineCode,
    /// Heading level 1 or 2
    Heading(HeadingLevel),
    /// Bullet list
    BulletList,
    /// Numbered list
    NumberedList,
    /// Task list (- [ ] item)
    TaskList,
    /// Blockquote
    Blockquote,
    /// Link ([text](url))
    Link,
}

impl MarkdownFormatCommand {
    /// Toolbar order.
    pub const TOOLBAR: [MarkdownFormatCommand; 11] = [
        Self::Bold,
        Self::Italic,
        Self::Strikethrough,
        Self::InlineCode,
        Self::Heading(HeadingLevel::H1),
        Self::Heading(HeadingLevel::H2),
        Self::BulletList,
        Self::NumberedList,
        Self::TaskList,
        Self::Blockquote,
        Self::Link,
    ];

    /// Get the keyboard shortcut label for this command.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Bold => "Ctrl+B",
            Self::Italic => "Ctrl+I",
            Self::Strikethrough => "Ctrl+Shift+S",
            Self::InlineCode => "Ctrl+`",
            Self::Heading(HeadingLevel::H1) => "Ctrl+1",
            Self::Heading(_) => "Ctrl+2",
            Self::BulletList => "Ctrl+Shift+B",
            Self::NumberedList => "Ctrl+Shift+N",
            Self::TaskList => "Ctrl+Shift+T",
            Self::Blockquote => "Ctrl+Q",
            Self::Link => "Ctrl+K",
        }
    }

    /// Get the icon for this command (for toolbar).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Strikethrough => "S̶",
            Self::InlineCode => "</>",
            Self::Heading(HeadingLevel::H1) => "H1",
            Self::Heading(_) => "H2",
            Self::BulletList => "\u{2022}", // •
            Self::NumberedList => "1.",
            Self::TaskList => "\u{2611}", // ☑
            Self::Blockquote => "\u{275D}", // ❝
            Self::Link => "🔗",
        }
    }

    /// Get the tooltip text for this command.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Negrito",
            Self::Italic => "Itálico",
            Self::Strikethrough => "Tachado",
            Self::InlineCode => "Código",
            Self::Heading(HeadingLevel::H1) => "Título 1",
            Self::Heading(_) => "Título 2",
            Self::BulletList => "Lista",
            Self::NumberedList => "Lista numerada",
            Self::TaskList => "Lista de tarefas",
            Self::Blockquote => "Citação",
            Self::Link => "Inserir link",
        };
        format!("{} ({})", name, self.shortcut_label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new text after formatting
    pub text: String,
    /// New cursor position (byte index)
    pub cursor: usize,
    /// New selection range (start, end) if applicable
    pub selection: Option<(usize, usize)>,
    /// Whether the formatting was applied (vs removed/toggled off)
    pub applied: bool,
}

impl FormatResult {
    fn with_cursor(text: String, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            selection: None,
            applied: true,
        }
    }

    fn with_selection(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            cursor: end,
            selection: Some((start, end)),
            applied: true,
        }
    }

    /// Formatting was removed, or nothing could be applied.
    fn toggled_off(mut self) -> Self {
        self.applied = false;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting State
// ─────────────────────────────────────────────────────────────────────────────

/// Line-level formatting at a cursor position, for toolbar highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattingState {
    pub heading_level: Option<HeadingLevel>,
    pub is_bullet_list: bool,
    pub is_numbered_list: bool,
    pub is_task_list: bool,
    pub is_blockquote: bool,
}

impl FormattingState {
    /// Whether `command` is active on the current line.
    pub fn is_active(&self, command: MarkdownFormatCommand) -> bool {
        match command {
            MarkdownFormatCommand::Heading(level) => self.heading_level == Some(level),
            MarkdownFormatCommand::BulletList => self.is_bullet_list && !self.is_task_list,
            MarkdownFormatCommand::NumberedList => self.is_numbered_list,
            MarkdownFormatCommand::TaskList => self.is_task_list,
            MarkdownFormatCommand::Blockquote => self.is_blockquote,
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw Mode Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command.
///
/// `selection` is a byte range; `None` means the cursor sits at the end of
/// the text.
pub fn apply_raw_format(
    text: &str,
    selection: Option<(usize, usize)>,
    command: MarkdownFormatCommand,
) -> FormatResult {
    let (start, end) = normalize_selection(text, selection);
    match command {
        MarkdownFormatCommand::Bold => apply_inline_format(text, start, end, "**"),
        MarkdownFormatCommand::Italic => apply_inline_format(text, start, end, "*"),
        MarkdownFormatCommand::Strikethrough => apply_inline_format(text, start, end, "~~"),
        MarkdownFormatCommand::InlineCode => apply_inline_format(text, start, end, "`"),
        MarkdownFormatCommand::Heading(level) => apply_heading_format(text, start, level),
        MarkdownFormatCommand::BulletList => apply_line_prefix(text, start, end, LinePrefix::Bullet),
        MarkdownFormatCommand::NumberedList => {
            apply_line_prefix(text, start, end, LinePrefix::Numbered)
        }
        MarkdownFormatCommand::TaskList => apply_line_prefix(text, start, end, LinePrefix::Task),
        MarkdownFormatCommand::Blockquote => apply_line_prefix(text, start, end, LinePrefix::Quote),
        MarkdownFormatCommand::Link => apply_link_format(text, start, end),
    }
}

/// Clamp to char boundaries and order the range.
fn normalize_selection(text: &str, selection: Option<(usize, usize)>) -> (usize, usize) {
    let (start, end) = selection.unwrap_or((text.len(), text.len()));
    let start = floor_char_boundary(text, start.min(text.len()));
    let end = ceil_char_boundary(text, end.min(text.len()));
    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

/// Byte range of the full lines touched by `start..end`.
fn line_bounds(text: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[end..]
        .find('\n')
        .map(|i| end + i)
        .unwrap_or(text.len());
    (line_start, line_end)
}

/// Wrap or unwrap the selection with a symmetric delimiter.
fn apply_inline_format(text: &str, start: usize, end: usize, marker: &str) -> FormatResult {
    let selected = &text[start..end];

    // Selection includes the markers
    if selected.len() >= marker.len() * 2
        && selected.starts_with(marker)
        && selected.ends_with(marker)
    {
        let inner = &selected[marker.len()..selected.len() - marker.len()];
        let new_text = format!("{}{}{}", &text[..start], inner, &text[end..]);
        return FormatResult::with_selection(new_text, start, start + inner.len()).toggled_off();
    }

    // Markers sit just outside the selection
    if start >= marker.len()
        && text[..start].ends_with(marker)
        && text[end..].starts_with(marker)
    {
        let outer_start = start - marker.len();
        let new_text = format!(
            "{}{}{}",
            &text[..outer_start],
            selected,
            &text[end + marker.len()..]
        );
        return FormatResult::with_selection(new_text, outer_start, outer_start + selected.len())
            .toggled_off();
    }

    if start == end {
        // Nothing selected, nothing to wrap
        return FormatResult::with_cursor(text.to_string(), start).toggled_off();
    }

    let new_text = format!(
        "{}{}{}{}{}",
        &text[..start],
        marker,
        selected,
        marker,
        &text[end..]
    );
    let inner_start = start + marker.len();
    FormatResult::with_selection(new_text, inner_start, inner_start + selected.len())
}

/// Turn the selection into `[text](url)`, or unwrap a selected link.
fn apply_link_format(text: &str, start: usize, end: usize) -> FormatResult {
    let selected = &text[start..end];

    if let Some(label) = link_label(selected) {
        let new_text = format!("{}{}{}", &text[..start], label, &text[end..]);
        return FormatResult::with_selection(new_text, start, start + label.len()).toggled_off();
    }

    if selected.is_empty() {
        return FormatResult::with_cursor(text.to_string(), start).toggled_off();
    }

    let new_text = format!("{}[{}](url){}", &text[..start], selected, &text[end..]);
    // Select "url" for easy replacement
    let url_start = start + selected.len() + 3;
    FormatResult::with_selection(new_text, url_start, url_start + 3)
}

/// The label of a complete `[label](target)` link.
fn link_label(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('[')?;
    let close = rest.find("](")?;
    rest[close + 2..].strip_suffix(')')?;
    Some(&rest[..close])
}

/// Set the heading level of the cursor's line, or clear it if already set.
fn apply_heading_format(text: &str, start: usize, level: HeadingLevel) -> FormatResult {
    let (line_start, line_end) = line_bounds(text, start, start);
    let line = &text[line_start..line_end];

    let trimmed = line.trim_start();
    let existing = heading_level_of(trimmed);
    let content = match existing {
        Some(l) => trimmed[l as usize..].trim_start(),
        None => trimmed,
    };

    if existing == Some(level) {
        let new_text = format!("{}{}{}", &text[..line_start], content, &text[line_end..]);
        return FormatResult::with_cursor(new_text, line_start + content.len()).toggled_off();
    }

    let new_line = format!("{} {}", "#".repeat(level as usize), content);
    let new_text = format!("{}{}{}", &text[..line_start], new_line, &text[line_end..]);
    FormatResult::with_cursor(new_text, line_start + new_line.len())
}

fn heading_level_of(trimmed: &str) -> Option<HeadingLevel> {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    let followed_by_space = trimmed[hashes..].starts_with(' ') || trimmed.len() == hashes;
    if (1..=6).contains(&hashes) && followed_by_space {
        Some(HeadingLevel::from(hashes as u8))
    } else {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Prefixes (lists, quotes)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePrefix {
    Bullet,
    Numbered,
    Task,
    Quote,
}

impl LinePrefix {
    fn matches(self, trimmed: &str) -> bool {
        match self {
            Self::Bullet => is_bullet_list_item(trimmed) && !is_task_list_item(trimmed),
            Self::Numbered => is_numbered_list_item(trimmed),
            Self::Task => is_task_list_item(trimmed),
            Self::Quote => trimmed.starts_with("> "),
        }
    }

    fn render(self, index: usize, content: &str) -> String {
        match self {
            Self::Bullet => format!("- {}", content),
            Self::Numbered => format!("{}. {}", index + 1, content),
            Self::Task => format!("- [ ] {}", content),
            Self::Quote => format!("> {}", content),
        }
    }
}

/// Prefix every touched line, or strip the prefix when all lines carry it.
fn apply_line_prefix(text: &str, start: usize, end: usize, prefix: LinePrefix) -> FormatResult {
    let (line_start, line_end) = line_bounds(text, start, end);
    let lines: Vec<&str> = text[line_start..line_end].split('\n').collect();

    let all_prefixed = lines.iter().all(|line| prefix.matches(line.trim_start()));

    let new_lines: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let trimmed = line.trim_start();
            let content = match prefix {
                LinePrefix::Quote => trimmed.strip_prefix("> ").unwrap_or(trimmed),
                _ => remove_list_marker(trimmed),
            };
            if all_prefixed {
                content.to_string()
            } else {
                prefix.render(i, content)
            }
        })
        .collect();

    let joined = new_lines.join("\n");
    let new_text = format!("{}{}{}", &text[..line_start], joined, &text[line_end..]);
    let result = FormatResult::with_cursor(new_text, line_start + joined.len());
    if all_prefixed {
        result.toggled_off()
    } else {
        result
    }
}

fn is_bullet_list_item(trimmed: &str) -> bool {
    trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ")
}

fn is_task_list_item(trimmed: &str) -> bool {
    ["- [ ] ", "- [x] ", "- [X] "]
        .iter()
        .any(|marker| trimmed.starts_with(marker))
}

/// Length of a `12. ` / `3) ` marker, if the line starts with one.
fn numbered_marker_len(trimmed: &str) -> Option<usize> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &trimmed[digits..];
    if digits > 0 && (rest.starts_with(". ") || rest.starts_with(") ")) {
        Some(digits + 2)
    } else {
        None
    }
}

fn is_numbered_list_item(trimmed: &str) -> bool {
    numbered_marker_len(trimmed).is_some()
}

fn remove_list_marker(trimmed: &str) -> &str {
    for marker in ["- [ ] ", "- [x] ", "- [X] ", "- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return rest;
        }
    }
    match numbered_marker_len(trimmed) {
        Some(len) => &trimmed[len..],
        None => trimmed,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting State Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Detect the line-level formatting at a cursor (byte index).
pub fn detect_raw_formatting_state(text: &str, cursor: usize) -> FormattingState {
    let cursor = floor_char_boundary(text, cursor.min(text.len()));
    let (line_start, line_end) = line_bounds(text, cursor, cursor);
    let trimmed = text[line_start..line_end].trim_start();

    FormattingState {
        heading_level: heading_level_of(trimmed),
        is_bullet_list: is_bullet_list_item(trimmed),
        is_numbered_list: is_numbered_list_item(trimmed),
        is_task_list: is_task_list_item(trimmed),
        is_blockquote: trimmed.starts_with("> "),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(text: &str, sel: (usize, usize), cmd: MarkdownFormatCommand) -> FormatResult {
        apply_raw_format(text, Some(sel), cmd)
    }

    #[test]
    fn test_bold_wraps_selection() {
        let result = apply("Olá mundo", (0, 4), MarkdownFormatCommand::Bold);
        assert_eq!(result.text, "**Olá** mundo");
        assert_eq!(result.selection, Some((2, 6)));
        assert!(result.applied);
    }

    #[test]
    fn test_bold_applied_twice_is_removed() {
        let first = apply("Olá mundo", (0, 4), MarkdownFormatCommand::Bold);
        let (s, e) = first.selection.unwrap();
        let second = apply(&first.text, (s, e), MarkdownFormatCommand::Bold);
        assert_eq!(second.text, "Olá mundo");
        assert!(!second.applied);
    }

    #[test]
    fn test_selection_including_markers_is_unwrapped() {
        let result = apply("a ~~b~~ c", (2, 7), MarkdownFormatCommand::Strikethrough);
        assert_eq!(result.text, "a b c");
        assert!(!result.applied);
    }

    #[test]
    fn test_inline_without_selection_does_nothing() {
        let result = apply("texto", (2, 2), MarkdownFormatCommand::Italic);
        assert_eq!(result.text, "texto");
        assert!(!result.applied);
    }

    #[test]
    fn test_selection_is_clamped_to_char_boundaries() {
        let result = apply("Ação", (0, 3), MarkdownFormatCommand::InlineCode);
        assert_eq!(result.text, "`Aç`ão");
        // 4 sits inside 'ã'
        let result = apply("Ação", (0, 4), MarkdownFormatCommand::InlineCode);
        assert_eq!(result.text, "`Açã`o");
    }

    #[test]
    fn test_heading_set_switch_and_toggle() {
        let h1 = apply("Metas", (0, 0), MarkdownFormatCommand::Heading(HeadingLevel::H1));
        assert_eq!(h1.text, "# Metas");

        let h2 = apply(&h1.text, (3, 3), MarkdownFormatCommand::Heading(HeadingLevel::H2));
        assert_eq!(h2.text, "## Metas");

        let off = apply(&h2.text, (4, 4), MarkdownFormatCommand::Heading(HeadingLevel::H2));
        assert_eq!(off.text, "Metas");
        assert!(!off.applied);
    }

    #[test]
    fn test_heading_only_touches_cursor_line() {
        let result = apply(
            "um\ndois\ntrês",
            (4, 4),
            MarkdownFormatCommand::Heading(HeadingLevel::H1),
        );
        assert_eq!(result.text, "um\n# dois\ntrês");
    }

    #[test]
    fn test_bullet_list_over_multiple_lines() {
        let text = "um\ndois\ntrês";
        let result = apply(text, (0, text.len()), MarkdownFormatCommand::BulletList);
        assert_eq!(result.text, "- um\n- dois\n- três");

        let off = apply(&result.text, (0, result.text.len()), MarkdownFormatCommand::BulletList);
        assert_eq!(off.text, text);
    }

    #[test]
    fn test_numbered_list_replaces_bullets() {
        let result = apply("- a\n- b", (0, 7), MarkdownFormatCommand::NumberedList);
        assert_eq!(result.text, "1. a\n2. b");
    }

    #[test]
    fn test_task_list_toggle() {
        let result = apply("estudar\nler", (0, 11), MarkdownFormatCommand::TaskList);
        assert_eq!(result.text, "- [ ] estudar\n- [ ] ler");

        let off = apply(&result.text, (0, 5), MarkdownFormatCommand::TaskList);
        assert_eq!(off.text, "estudar\n- [ ] ler");
    }

    #[test]
    fn test_bullet_on_task_line_converts_it() {
        let result = apply("- [x] feito", (0, 0), MarkdownFormatCommand::BulletList);
        assert_eq!(result.text, "- feito");
    }

    #[test]
    fn test_blockquote_toggle() {
        let result = apply("frase", (0, 0), MarkdownFormatCommand::Blockquote);
        assert_eq!(result.text, "> frase");
        let off = apply(&result.text, (3, 3), MarkdownFormatCommand::Blockquote);
        assert_eq!(off.text, "frase");
    }

    #[test]
    fn test_link_wraps_and_selects_url() {
        let result = apply("veja docs", (5, 9), MarkdownFormatCommand::Link);
        assert_eq!(result.text, "veja [docs](url)");
        let (s, e) = result.selection.unwrap();
        assert_eq!(&result.text[s..e], "url");
    }

    #[test]
    fn test_link_unwraps_selected_link() {
        let text = "veja [docs](https://exemplo.com)";
        let result = apply(text, (5, text.len()), MarkdownFormatCommand::Link);
        assert_eq!(result.text, "veja docs");
        assert!(!result.applied);
    }

    #[test]
    fn test_detect_line_state() {
        let text = "# Título\n- [ ] tarefa\n> citação\n3. item";
        let at = |needle: &str| text.find(needle).unwrap();

        let state = detect_raw_formatting_state(text, at("Título"));
        assert_eq!(state.heading_level, Some(HeadingLevel::H1));
        assert!(state.is_active(MarkdownFormatCommand::Heading(HeadingLevel::H1)));

        let state = detect_raw_formatting_state(text, at("tarefa"));
        assert!(state.is_active(MarkdownFormatCommand::TaskList));
        assert!(!state.is_active(MarkdownFormatCommand::BulletList));

        assert!(detect_raw_formatting_state(text, at("citação")).is_blockquote);
        assert!(detect_raw_formatting_state(text, at("item")).is_numbered_list);
    }

    #[test]
    fn test_tooltips_carry_shortcuts() {
        assert_eq!(MarkdownFormatCommand::Bold.tooltip(), "Negrito (Ctrl+B)");
        assert_eq!(
            MarkdownFormatCommand::Heading(HeadingLevel::H2).tooltip(),
            "Título 2 (Ctrl+2)"
        );
    }
}
