//! Pagination and layout of screenplay elements.
//!
//! [`ScreenplayWriter`] turns an element sequence into a [`Compositor`]
//! holding one content stream per page, then serializes it. All per-run
//! state (cursor, page number, current font) lives in a private `Layout`
//! created for each call, so one writer can be reused.
//!
//! The vertical cursor is tracked in points from the bottom of the page and
//! decreases as lines are written. Every cursor movement is mirrored by a
//! relative text move in the content stream.

use super::text_wrap::{break_lines, chars_per_line, wrap_content, WrappedLine};
use crate::config::{PageSettings, ScreenplayConfig};
use crate::elements::{ContentNode, Element, FontStyle, TitlePart};
use crate::error::Result;
use crate::writer::{Compositor, FontId, Page, PageCollection, PageTreeNode, PdfWriter};
use std::io::Write;

const CONTINUED: &str = "(CONTINUED)";
const CONTINUED_DIALOG: &str = "(CONT'D)";

/// Converts screenplay elements into a paginated PDF.
#[derive(Debug, Clone, Default)]
pub struct ScreenplayWriter {
    config: ScreenplayConfig,
    writer: PdfWriter,
}

impl ScreenplayWriter {
    /// Create a writer with the given configuration.
    pub fn new(config: ScreenplayConfig) -> Self {
        Self {
            config,
            writer: PdfWriter::new(),
        }
    }

    /// The layout configuration.
    pub fn config(&self) -> &ScreenplayConfig {
        &self.config
    }

    /// Lay out `elements` without serializing.
    pub fn compose(&self, elements: &[Element]) -> Result<Compositor> {
        let mut layout = Layout::new(&self.config)?;
        for (index, element) in elements.iter().enumerate() {
            layout.write_element(index, element)?;
        }
        Ok(layout.finish())
    }

    /// Lay out `elements` and write the PDF to `sink`. Returns the number of
    /// bytes written.
    pub fn transform<W: Write>(&self, elements: &[Element], sink: W) -> Result<usize> {
        let mut compositor = self.compose(elements)?;
        self.writer.write(&mut compositor, sink)
    }

    /// Lay out `elements` and return the PDF bytes.
    pub fn render(&self, elements: &[Element]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.transform(elements, &mut output)?;
        Ok(output)
    }
}

/// The four faces of the page font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl From<FontStyle> for Face {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Plain | FontStyle::Underline => Face::Regular,
            FontStyle::Bold => Face::Bold,
            FontStyle::Italic => Face::Italic,
            FontStyle::BoldItalic => Face::BoldItalic,
        }
    }
}

#[derive(Debug)]
struct Fonts {
    regular: FontId,
    bold: FontId,
    italic: FontId,
    bold_italic: FontId,
}

impl Fonts {
    fn get(&self, face: Face) -> &FontId {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Italic => &self.italic,
            Face::BoldItalic => &self.bold_italic,
        }
    }
}

/// What to do when a wrapped block runs out of room mid-way.
enum Overflow<'a> {
    /// Start a new page and carry on
    NewPage,
    /// Mark `(CONTINUED)` and carry on on a new page
    Action,
    /// Mark `(CONTINUED)`, then repeat the character cue with `(CONT'D)`
    Dialog { character_lines: &'a [String] },
}

/// Per-run layout state.
struct Layout<'a> {
    config: &'a ScreenplayConfig,
    compositor: Compositor,
    root: PageCollection,
    page: Page,
    fonts: Fonts,
    face: Face,
    font_size: f32,
    /// Baseline of the next line, in points from the bottom of the page
    cursor_y: f32,
    page_number: u32,
}

impl<'a> Layout<'a> {
    fn new(config: &'a ScreenplayConfig) -> Result<Self> {
        let settings = &config.page;
        let mut compositor = Compositor::new();
        let root = compositor.root_pages();
        compositor.set_media_box(
            &root,
            0,
            0,
            PageSettings::points(settings.page_width) as i64,
            PageSettings::points(settings.page_height) as i64,
        )?;

        let mut resources = compositor.resources(&root)?;
        let fonts = Fonts {
            regular: resources.add_simple_type1_font("Courier")?,
            bold: resources.add_simple_type1_font("Courier-Bold")?,
            italic: resources.add_simple_type1_font("Courier-Oblique")?,
            bold_italic: resources.add_simple_type1_font("Courier-BoldOblique")?,
        };

        let page = compositor.add_page(root)?;
        let mut layout = Self {
            config,
            compositor,
            root,
            page,
            fonts,
            face: Face::Regular,
            font_size: settings.font_size,
            cursor_y: 0.0,
            page_number: 0,
        };
        layout.begin_page()?;
        Ok(layout)
    }

    fn finish(self) -> Compositor {
        self.compositor
    }

    fn settings(&self) -> &'a PageSettings {
        &self.config.page
    }

    fn write_element(&mut self, index: usize, element: &Element) -> Result<()> {
        match element {
            Element::Title { parts } if index == 0 => self.write_title(parts),
            Element::Heading { value } => self.write_heading(value),
            Element::Action { content } => self.write_action(content),
            Element::DialogGroup {
                character,
                parenthetical,
                dialog,
            } => self.write_dialog(character, parenthetical.as_deref(), dialog),
            Element::Transition { value } => self.write_transition(value),
            Element::CenteredText { content } => self.write_centered(content),
            Element::LineBreak => self.new_page(),
            Element::Boneyard { value } if self.config.show_boneyard => self.write_boneyard(value),
            Element::NoteBlock { value } if self.config.show_notes => self.write_notes(value),
            Element::Section { depth, value } if self.config.show_sections => {
                self.write_section(*depth, value)
            },
            Element::Title { .. }
            | Element::Boneyard { .. }
            | Element::NoteBlock { .. }
            | Element::Section { .. }
            | Element::Synopsis { .. }
            | Element::None => {
                log::debug!("Skipping {} element at {}", element.kind(), index);
                Ok(())
            },
        }
    }

    // Page handling

    fn new_page(&mut self) -> Result<()> {
        self.page = self.compositor.add_page(self.root)?;
        self.begin_page()
    }

    /// Reset the cursor and emit the opening commands of `self.page`.
    fn begin_page(&mut self) -> Result<()> {
        let settings = self.settings();
        let carried = (self.face, self.font_size);
        let top = PageSettings::points(settings.page_height) - PageSettings::points(settings.top_margin);

        self.cursor_y = top;
        self.face = Face::Regular;
        self.font_size = settings.font_size;
        self.compositor
            .page(self.page)?
            .set_font(&self.fonts.regular, settings.font_size)
            .set_matrix(1.0, 0.0, 0.0, 1.0, PageSettings::points(settings.left_margin), top);
        self.page_number += 1;
        log::debug!("Started page {} ({})", self.page_number, self.page.node());

        if self.page_number > 1 {
            self.move_down_inches(-settings.page_number_distance_from_top)?;
            self.empty_line()?;
            self.write_right_aligned_line(&format!("{}.", self.page_number))?;
            self.move_down(-2)?;
            self.move_down_inches(settings.page_number_distance_from_top)?;
        }

        if carried != (self.face, self.font_size) {
            self.set_font(carried.0, carried.1)?;
        }
        Ok(())
    }

    fn have_room_for(&self, lines: usize) -> bool {
        let settings = self.settings();
        self.cursor_y - lines as f32 * settings.effective_char_height
            > PageSettings::points(settings.bottom_margin)
    }

    // Primitive moves

    fn set_font(&mut self, face: Face, size: f32) -> Result<()> {
        let font = self.fonts.get(face);
        self.compositor.page(self.page)?.set_font(font, size);
        self.face = face;
        self.font_size = size;
        Ok(())
    }

    fn next_line(&mut self, dx: f32, dy: f32) -> Result<()> {
        self.compositor.page(self.page)?.next_line(dx, dy);
        Ok(())
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        self.compositor.page(self.page)?.write_text(text);
        Ok(())
    }

    /// Move the cursor by `dy` points (negative is down the page).
    fn advance(&mut self, dy: f32) -> Result<()> {
        self.next_line(0.0, dy)?;
        self.cursor_y += dy;
        Ok(())
    }

    fn move_down(&mut self, lines: i32) -> Result<()> {
        self.advance(-(lines as f32) * self.settings().effective_char_height)
    }

    fn move_down_inches(&mut self, inches: f32) -> Result<()> {
        self.advance(-PageSettings::points(inches))
    }

    fn indent_inches(&mut self, inches: f32) -> Result<()> {
        self.next_line(PageSettings::points(inches), 0.0)
    }

    fn empty_line(&mut self) -> Result<()> {
        self.move_down(1)
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.show_text(text)?;
        self.empty_line()
    }

    fn write_line_at(&mut self, indent: f32, text: &str) -> Result<()> {
        self.next_line(indent, 0.0)?;
        self.write_line(text)?;
        self.next_line(-indent, 0.0)
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.settings().effective_char_width
    }

    fn writable_points(&self) -> f32 {
        PageSettings::points(self.settings().writable_width())
    }

    fn write_right_aligned_line(&mut self, text: &str) -> Result<()> {
        let indent = self.writable_points() - self.text_width(text);
        self.write_line_at(indent, text)
    }

    fn write_centered_line(&mut self, text: &str) -> Result<()> {
        let indent = (self.writable_points() - self.text_width(text)) / 2.0;
        self.write_line_at(indent, text)
    }

    fn write_centered_lines(&mut self, text: &str) -> Result<()> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for line in normalized.split('\n') {
            self.write_centered_line(line)?;
        }
        Ok(())
    }

    fn break_to_width(&self, text: &str, inches: f32) -> Vec<String> {
        break_lines(text, chars_per_line(inches, self.settings().effective_char_width))
    }

    // Wrapped rich text

    fn write_wrapped(&mut self, lines: &[WrappedLine], overflow: &Overflow<'_>) -> Result<()> {
        let mut written = 0usize;
        for line in lines {
            if !self.have_room_for(2) {
                if lines.len() > 2 {
                    self.handle_overflow(overflow, written)?;
                    written = 0;
                } else if written == 0 {
                    // Short blocks are kept together
                    self.new_page()?;
                }
            }
            self.write_wrapped_line(line)?;
            self.move_down(1)?;
            written += 1;
        }
        self.move_down(1)
    }

    fn write_wrapped_line(&mut self, line: &WrappedLine) -> Result<()> {
        let size = self.settings().font_size;
        let mut face = Face::Regular;

        self.next_line(line.indent, 0.0)?;
        for word in &line.words {
            let wanted = Face::from(word.style);
            if wanted != face {
                self.set_font(wanted, size)?;
                face = wanted;
            }
            self.show_text(&format!("{} ", word.word))?;
        }
        self.next_line(-line.indent, 0.0)?;

        if face != Face::Regular {
            self.set_font(Face::Regular, size)?;
        }
        Ok(())
    }

    fn handle_overflow(&mut self, overflow: &Overflow<'_>, written: usize) -> Result<()> {
        if written == 0 {
            log::warn!(
                "Block overflows page {} before any line was written",
                self.page_number
            );
        }
        match overflow {
            Overflow::NewPage => self.new_page(),
            Overflow::Action => {
                if written > 0 {
                    self.move_down(1)?;
                    self.write_right_aligned_line(CONTINUED)?;
                }
                self.new_page()
            },
            Overflow::Dialog { character_lines } => {
                let indent = self.settings().parenthetical_indent;
                self.move_down(1)?;
                self.write_right_aligned_line(CONTINUED)?;
                self.new_page()?;
                self.write_character_cue(character_lines)?;
                self.indent_inches(indent)?;
                self.write_line(CONTINUED_DIALOG)?;
                self.indent_inches(-indent)
            },
        }
    }

    fn write_character_cue(&mut self, character_lines: &[String]) -> Result<()> {
        let indent = self.settings().character_indent;
        self.indent_inches(indent)?;
        for line in character_lines {
            self.write_line(line)?;
        }
        self.indent_inches(-indent)
    }

    // Elements

    fn write_title(&mut self, parts: &[TitlePart]) -> Result<()> {
        let find = |key: &str| {
            parts
                .iter()
                .find(|part| part.key.eq_ignore_ascii_case(key))
                .map(|part| part.value.as_str())
        };
        let Some(title) = find("title") else {
            log::debug!("Title element has no title key, no title page");
            return Ok(());
        };
        let settings = self.settings();

        self.move_down_inches(settings.title_distance_from_top)?;
        self.set_font(Face::Bold, settings.font_size)?;
        self.write_centered_lines(title)?;
        self.set_font(Face::Regular, settings.font_size)?;
        self.empty_line()?;

        match find("author") {
            Some(author) => {
                self.empty_line()?;
                self.write_centered_line("Written by")?;
                self.empty_line()?;
                self.write_centered_lines(author)?;
            },
            None => self.move_down(4)?,
        }

        if let Some(address) = find("address") {
            let lines: Vec<&str> = address
                .split(|c: char| c == '\n' || c == '\r')
                .filter(|line| !line.is_empty())
                .collect();
            let block_top = PageSettings::points(settings.bottom_margin)
                + lines.len() as f32 * settings.effective_char_height
                + PageSettings::points(settings.address_distance_from_bottom);
            self.advance(block_top - self.cursor_y)?;
            for line in lines {
                self.write_right_aligned_line(line)?;
            }
        }

        // The title page is not numbered
        self.page_number -= 1;
        self.new_page()
    }

    fn write_heading(&mut self, value: &str) -> Result<()> {
        if !self.have_room_for(2) {
            self.new_page()?;
        }
        self.write_line(&value.to_uppercase())?;
        self.empty_line()
    }

    fn write_transition(&mut self, value: &str) -> Result<()> {
        if !self.have_room_for(2) {
            self.new_page()?;
        }
        for line in self.break_to_width(value, self.settings().writable_width()) {
            self.write_right_aligned_line(&line.to_uppercase())?;
        }
        self.empty_line()
    }

    fn write_centered(&mut self, content: &ContentNode) -> Result<()> {
        let width = self.writable_points();
        let lines = wrap_content(
            content,
            width,
            self.settings().effective_char_width,
            |consumed| (width - consumed) / 2.0,
        );
        if !self.have_room_for(lines.len()) {
            self.new_page()?;
        }
        self.write_wrapped(&lines, &Overflow::NewPage)?;
        self.empty_line()
    }

    fn write_action(&mut self, content: &ContentNode) -> Result<()> {
        let lines = wrap_content(
            content,
            self.writable_points(),
            self.settings().effective_char_width,
            |_| 0.0,
        );
        self.write_wrapped(&lines, &Overflow::Action)
    }

    fn write_dialog(
        &mut self,
        character: &str,
        parenthetical: Option<&str>,
        dialog: &ContentNode,
    ) -> Result<()> {
        let settings = self.settings();
        let character_lines = self.break_to_width(character, settings.character_width);
        let parenthetical_lines = parenthetical
            .filter(|p| !p.is_empty())
            .map(|p| self.break_to_width(p, settings.parenthetical_width))
            .unwrap_or_default();
        let dialog_indent = PageSettings::points(settings.dialog_indent);
        let dialog_lines = wrap_content(
            dialog,
            PageSettings::points(settings.dialog_width),
            settings.effective_char_width,
            |_| dialog_indent,
        );

        // Keep the cue block with at least two lines of a long dialog, and
        // with all of a short one
        let cue_lines = character_lines.len() + parenthetical_lines.len();
        let needed = if dialog_lines.len() <= 2 {
            cue_lines + 3
        } else {
            cue_lines + 2
        };
        if !self.have_room_for(needed) {
            self.new_page()?;
        }

        self.write_character_cue(&character_lines)?;
        if !parenthetical_lines.is_empty() {
            self.indent_inches(settings.parenthetical_indent)?;
            let last = parenthetical_lines.len() - 1;
            for (i, line) in parenthetical_lines.iter().enumerate() {
                let open = if i == 0 { "(" } else { "" };
                let close = if i == last { ")" } else { "" };
                self.write_line(&format!("{}{}{}", open, line, close))?;
            }
            self.indent_inches(-settings.parenthetical_indent)?;
        }

        self.write_wrapped(
            &dialog_lines,
            &Overflow::Dialog {
                character_lines: &character_lines,
            },
        )?;
        self.empty_line()
    }

    fn write_boneyard(&mut self, value: &str) -> Result<()> {
        let settings = self.settings();
        self.set_font(Face::Italic, settings.font_size)?;
        for paragraph in paragraphs(value) {
            if paragraph.is_empty() {
                self.empty_line()?;
                continue;
            }
            for line in self.break_to_width(&paragraph, settings.writable_width()) {
                if !self.have_room_for(1) {
                    self.new_page()?;
                }
                self.write_line(&line)?;
            }
            self.empty_line()?;
        }
        self.set_font(Face::Regular, settings.font_size)
    }

    fn write_notes(&mut self, value: &str) -> Result<()> {
        let settings = self.settings();
        self.set_font(Face::Italic, settings.font_size)?;
        for paragraph in paragraphs(value) {
            if !self.have_room_for(1) {
                self.new_page()?;
            }
            if paragraph.is_empty() {
                self.empty_line()?;
                continue;
            }
            for line in self.break_to_width(&paragraph, settings.writable_width()) {
                self.write_line(&line)?;
                self.empty_line()?;
            }
        }
        self.set_font(Face::Regular, settings.font_size)
    }

    fn write_section(&mut self, depth: u32, value: &str) -> Result<()> {
        let settings = self.settings();
        let scale = section_scale(depth);
        let lines = break_lines(
            value,
            chars_per_line(settings.writable_width(), settings.effective_char_width * scale),
        );
        if !self.have_room_for(lines.len()) {
            self.new_page()?;
        }

        self.set_font(Face::Bold, settings.font_size * scale)?;
        for line in &lines {
            self.show_text(line)?;
            self.advance(-settings.effective_char_height * scale)?;
        }
        self.set_font(Face::Regular, settings.font_size)?;
        self.empty_line()
    }
}

/// Size factor for a section heading: 1.5 at depth 0, 1.25 at depth 1,
/// shrinking by a quarter per level and never below one half.
fn section_scale(depth: u32) -> f32 {
    (((2.0 - depth as f32) / 2.0) * 0.5 + 1.0).max(0.5)
}

/// Split free text into paragraphs on blank lines. Line breaks inside a
/// paragraph become spaces; a run of extra blank lines yields empty
/// paragraphs.
fn paragraphs(text: &str) -> Vec<String> {
    let normalized = text.trim().replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split("\n\n")
        .map(|block| {
            block
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
