//! PDF content stream builder.
//!
//! Accumulates the text-positioning operators of one page. Adjacent relative
//! moves and adjacent text runs are merged as they are pushed, so the payload
//! never carries two `Td` or two `Tj` operators in a row.

use crate::error::Result;
use crate::writer::ObjectSerializer;
use std::io::Write;

/// Operations that can be added to a text content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCommand {
    /// Select font resource and size (Tf)
    SetFont {
        /// Resource name, e.g. `F1`
        name: String,
        /// Size in points
        size: f32,
    },
    /// Set text matrix (Tm)
    SetMatrix([f32; 6]),
    /// Move to the start of the next line, offset from the current one (Td)
    MoveBy {
        /// Horizontal offset in points
        dx: f32,
        /// Vertical offset in points
        dy: f32,
    },
    /// Move to the start of the next line (T*)
    NewLine,
    /// Show a literal string (Tj)
    ShowText(String),
}

/// Builder for a page's text content stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStreamBuilder {
    commands: Vec<TextCommand>,
}

impl ContentStreamBuilder {
    /// Create an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command, merging it into the previous one where possible.
    pub fn push(&mut self, command: TextCommand) -> &mut Self {
        let merged = match (self.commands.last_mut(), &command) {
            (
                Some(TextCommand::MoveBy { dx, dy }),
                TextCommand::MoveBy {
                    dx: more_x,
                    dy: more_y,
                },
            ) => {
                *dx += *more_x;
                *dy += *more_y;
                true
            },
            (Some(TextCommand::ShowText(text)), TextCommand::ShowText(more)) => {
                text.push_str(more);
                true
            },
            _ => false,
        };
        if !merged {
            self.commands.push(command);
        }
        self
    }

    /// Select a font resource by name.
    pub fn set_font(&mut self, name: &str, size: f32) -> &mut Self {
        self.push(TextCommand::SetFont {
            name: name.to_string(),
            size,
        })
    }

    /// Set the text matrix `a b c d e f`.
    pub fn set_matrix(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.push(TextCommand::SetMatrix([a, b, c, d, e, f]))
    }

    /// Move the line start by `(dx, dy)`.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.push(TextCommand::MoveBy { dx, dy })
    }

    /// Move to the next line.
    pub fn new_line(&mut self) -> &mut Self {
        self.push(TextCommand::NewLine)
    }

    /// Show text at the current position.
    pub fn write_text(&mut self, text: &str) -> &mut Self {
        self.push(TextCommand::ShowText(text.to_string()))
    }

    /// Commands accumulated so far.
    pub fn commands(&self) -> &[TextCommand] {
        &self.commands
    }

    /// Whether any command has been pushed.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Encode the stream payload.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Encode the stream payload into `w`: `BT`, one command per line, `ET`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let serializer = ObjectSerializer::new();
        w.write_all(b"BT\n")?;
        for command in &self.commands {
            serializer.write_indent(w, 1)?;
            match command {
                TextCommand::SetFont { name, size } => {
                    serializer.write_name(w, name)?;
                    w.write_all(b" ")?;
                    serializer.write_real(w, f64::from(*size))?;
                    w.write_all(b" Tf")?;
                },
                TextCommand::SetMatrix(matrix) => {
                    for value in matrix {
                        serializer.write_real(w, f64::from(*value))?;
                        w.write_all(b" ")?;
                    }
                    w.write_all(b"Tm")?;
                },
                TextCommand::MoveBy { dx, dy } => {
                    serializer.write_real(w, f64::from(*dx))?;
                    w.write_all(b" ")?;
                    serializer.write_real(w, f64::from(*dy))?;
                    w.write_all(b" Td")?;
                },
                TextCommand::NewLine => w.write_all(b"T*")?,
                TextCommand::ShowText(text) => {
                    serializer.write_string(w, text)?;
                    w.write_all(b" Tj")?;
                },
            }
            w.write_all(b"\n")?;
        }
        w.write_all(b"ET\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_stream() {
        let builder = ContentStreamBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(payload(&builder), "BT\nET\n");
    }

    #[test]
    fn test_consecutive_text_is_concatenated() {
        let mut builder = ContentStreamBuilder::new();
        builder.write_text("AB").write_text("CD");
        assert_eq!(builder.commands(), &[TextCommand::ShowText("ABCD".to_string())]);
        assert_eq!(payload(&builder).matches("Tj").count(), 1);
    }

    #[test]
    fn test_consecutive_moves_are_summed() {
        let mut builder = ContentStreamBuilder::new();
        builder.move_by(1.0, 2.0).move_by(3.0, 4.0);
        assert_eq!(builder.commands(), &[TextCommand::MoveBy { dx: 4.0, dy: 6.0 }]);
        assert_eq!(payload(&builder), "BT\n  4 6 Td\nET\n");
    }

    #[test]
    fn test_interleaved_commands_do_not_merge() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .write_text("A")
            .move_by(0.0, -12.0)
            .write_text("B")
            .move_by(0.0, -12.0);
        assert_eq!(builder.commands().len(), 4);
    }

    #[test]
    fn test_font_change_breaks_text_run() {
        let mut builder = ContentStreamBuilder::new();
        builder.write_text("plain ").set_font("F2", 12.0).write_text("bold ");
        assert_eq!(builder.commands().len(), 3);
    }

    #[test]
    fn test_operator_encoding() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font("F1", 12.0)
            .set_matrix(1.0, 0.0, 0.0, 1.0, 108.0, 720.0)
            .write_text("FADE IN:")
            .new_line();
        assert_eq!(
            payload(&builder),
            "BT\n  /F1 12 Tf\n  1 0 0 1 108 720 Tm\n  (FADE IN:) Tj\n  T*\nET\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut builder = ContentStreamBuilder::new();
        builder.write_text("(CONT'D)");
        assert!(payload(&builder).contains(r"(\(CONT'D\)) Tj"));
    }
}
