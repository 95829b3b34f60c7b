//! PDF object serialization.
//!
//! Serializes value nodes to their byte representation. Dictionaries are
//! written one entry per line, indented one level deeper than the line that
//! opens them, in insertion order.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, StreamObject};
use std::io::Write;

/// Characters emitted since the last soft break before a string literal may
/// be continued on the next line.
const STRING_CONTINUATION_THRESHOLD: usize = 100;

/// Serializer for PDF objects.
///
/// Converts [`Object`] values to PDF syntax. Stream payloads are written by
/// [`ObjectSerializer::write_stream`], which reports the measured payload
/// length so the caller can fill in the stream's `/Length` node.
#[derive(Debug, Clone)]
pub struct ObjectSerializer {
    /// Spaces per indentation level
    indent_width: usize,
}

impl Default for ObjectSerializer {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

impl ObjectSerializer {
    /// Create a new object serializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize an object to bytes at indentation level zero.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj, 0)?;
        Ok(buf)
    }

    /// Serialize an object to a string (for debugging and tests).
    pub fn serialize_to_string(&self, obj: &Object) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(obj)?).into_owned())
    }

    /// Write indentation for `level`.
    pub fn write_indent<W: Write>(&self, w: &mut W, level: usize) -> Result<()> {
        write!(w, "{:width$}", "", width = level * self.indent_width)?;
        Ok(())
    }

    /// Write a direct object.
    ///
    /// `level` is the indentation level of the line the value starts on; it
    /// only affects multi-line values (dictionaries).
    ///
    /// Streams are never direct objects, so passing one here is an error;
    /// streams go through [`ObjectSerializer::write_stream`].
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object, level: usize) -> Result<()> {
        match obj {
            Object::Integer(i) => write!(w, "{}", i)?,
            Object::Real(r) => self.write_real(w, *r)?,
            Object::String(s) => self.write_string(w, s)?,
            Object::Name(n) => self.write_name(w, n)?,
            Object::Array(arr) => self.write_array(w, arr, level)?,
            Object::Dictionary(dict) => self.write_dictionary(w, dict, level)?,
            Object::Reference(r) => write!(w, "{}", r)?,
            Object::Stream(_) => {
                return Err(Error::InvalidObjectType {
                    expected: "direct object".to_string(),
                    found: "Stream".to_string(),
                })
            },
        }
        Ok(())
    }

    /// Write a real number with at most two fractional digits.
    ///
    /// Trailing zeros and a bare decimal point are dropped, so `72.0` is
    /// written as `72` and `-0.004` as `0`.
    pub fn write_real<W: Write>(&self, w: &mut W, value: f64) -> Result<()> {
        let formatted = format!("{:.2}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        let out = if trimmed == "-0" { "0" } else { trimmed };
        w.write_all(out.as_bytes())?;
        Ok(())
    }

    /// Write a literal string `(...)`.
    ///
    /// Backslash, the parentheses and the control characters `\n \r \t \b`
    /// are escaped. Once more than 100 characters have been written since the
    /// last break, a `\` line continuation follows the next space or tab; a
    /// reader drops the continuation, so the value is unchanged.
    pub fn write_string<W: Write>(&self, w: &mut W, value: &str) -> Result<()> {
        w.write_all(b"(")?;
        let mut since_break = 0usize;
        let mut utf8 = [0u8; 4];
        for c in value.chars() {
            match c {
                '\\' => w.write_all(b"\\\\")?,
                '(' => w.write_all(b"\\(")?,
                ')' => w.write_all(b"\\)")?,
                '\n' => w.write_all(b"\\n")?,
                '\r' => w.write_all(b"\\r")?,
                '\t' => w.write_all(b"\\t")?,
                '\u{8}' => w.write_all(b"\\b")?,
                _ => w.write_all(c.encode_utf8(&mut utf8).as_bytes())?,
            }
            since_break += 1;
            if (c == ' ' || c == '\t') && since_break > STRING_CONTINUATION_THRESHOLD {
                w.write_all(b"\\\n")?;
                since_break = 0;
            }
        }
        w.write_all(b")")?;
        Ok(())
    }

    /// Write a PDF name.
    ///
    /// Names start with `/`. Bytes outside `!`..`~`, the escape character
    /// `#` and the PDF delimiters are written as `#xx`.
    pub fn write_name<W: Write>(&self, w: &mut W, name: &str) -> Result<()> {
        w.write_all(b"/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'/' | b'%' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' => {
                    write!(w, "#{:02X}", byte)?
                },
                b'!'..=b'~' => w.write_all(&[byte])?,
                _ => write!(w, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    /// Write a PDF array as `[a b c]`.
    pub fn write_array<W: Write>(&self, w: &mut W, arr: &[Object], level: usize) -> Result<()> {
        w.write_all(b"[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                w.write_all(b" ")?;
            }
            self.write_object(w, obj, level)?;
        }
        w.write_all(b"]")?;
        Ok(())
    }

    /// Write a PDF dictionary.
    ///
    /// ```text
    /// <<
    ///   /Type /Page
    ///   /Parent 2 0 R
    /// >>
    /// ```
    pub fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &Dictionary,
        level: usize,
    ) -> Result<()> {
        w.write_all(b"<<\n")?;
        for (key, value) in dict.iter() {
            self.write_indent(w, level + 1)?;
            self.write_name(w, key)?;
            w.write_all(b" ")?;
            self.write_object(w, value, level + 1)?;
            w.write_all(b"\n")?;
        }
        self.write_indent(w, level)?;
        w.write_all(b">>")?;
        Ok(())
    }

    /// Write a stream: its dictionary, then the payload framed by `stream`
    /// and `endstream`.
    ///
    /// Returns the byte length of the payload region, which the caller stores
    /// into the Integer node behind the stream's `/Length` entry.
    pub fn write_stream<W: Write>(
        &self,
        w: &mut W,
        stream: &StreamObject,
        level: usize,
    ) -> Result<usize> {
        self.write_dictionary(w, &stream.dict, level)?;
        w.write_all(b"\nstream\n")?;
        let payload = stream.content.build()?;
        w.write_all(&payload)?;
        w.write_all(b"endstream")?;
        Ok(payload.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;
    use crate::writer::ContentStreamBuilder;

    fn to_string(obj: &Object) -> String {
        ObjectSerializer::new().serialize_to_string(obj).unwrap()
    }

    #[test]
    fn test_serialize_integer() {
        assert_eq!(to_string(&Object::Integer(42)), "42");
        assert_eq!(to_string(&Object::Integer(-17)), "-17");
        assert_eq!(to_string(&Object::Integer(0)), "0");
    }

    #[test]
    fn test_serialize_real() {
        assert_eq!(to_string(&Object::Real(72.0)), "72");
        assert_eq!(to_string(&Object::Real(7.21)), "7.21");
        assert_eq!(to_string(&Object::Real(0.5)), "0.5");
        assert_eq!(to_string(&Object::Real(-12.0)), "-12");
        assert_eq!(to_string(&Object::Real(684.006)), "684.01");
        assert_eq!(to_string(&Object::Real(-0.001)), "0");
    }

    #[test]
    fn test_serialize_string_escaping() {
        assert_eq!(to_string(&Object::string("Hello")), "(Hello)");
        assert_eq!(to_string(&Object::string(r"a\b")), r"(a\\b)");
        assert_eq!(to_string(&Object::string("(CONT'D)")), r"(\(CONT'D\))");
        assert_eq!(to_string(&Object::string("a\nb\tc")), r"(a\nb\tc)");
        assert_eq!(to_string(&Object::string("\u{8}")), r"(\b)");
    }

    #[test]
    fn test_backslash_and_paren_escaped_together() {
        assert_eq!(to_string(&Object::string(r"x\)y")), r"(x\\\)y)");
    }

    #[test]
    fn test_long_string_gets_line_continuation() {
        let long = "word ".repeat(40);
        let out = to_string(&Object::String(long.clone()));
        assert!(out.contains("\\\n"));
        // Removing continuations restores the value
        let restored = out.replace("\\\n", "");
        assert_eq!(restored, format!("({})", long));
    }

    #[test]
    fn test_short_string_has_no_continuation() {
        let out = to_string(&Object::string("word ".repeat(10)));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_serialize_name() {
        assert_eq!(to_string(&Object::name("Type")), "/Type");
        assert_eq!(to_string(&Object::name("Courier-Bold")), "/Courier-Bold");
        assert_eq!(to_string(&Object::name("A B")), "/A#20B");
        assert_eq!(to_string(&Object::name("Hash#Tag")), "/Hash#23Tag");
        assert_eq!(to_string(&Object::name("a/b")), "/a#2Fb");
    }

    #[test]
    fn test_serialize_array() {
        let arr = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]);
        assert_eq!(to_string(&arr), "[0 0 612 792]");
        assert_eq!(to_string(&Object::Array(vec![])), "[]");
    }

    #[test]
    fn test_serialize_reference() {
        assert_eq!(to_string(&Object::Reference(ObjectRef::new(5, 0))), "5 0 R");
    }

    #[test]
    fn test_serialize_dictionary_layout() {
        let mut dict = Dictionary::typed("Page");
        dict.set("Parent", ObjectRef::new(2, 0)).unwrap();
        assert_eq!(to_string(&dict.into()), "<<\n  /Type /Page\n  /Parent 2 0 R\n>>");
    }

    #[test]
    fn test_nested_dictionary_indents_one_level_deeper() {
        let mut fonts = Dictionary::new();
        fonts.set("F1", ObjectRef::new(3, 0)).unwrap();
        let mut resources = Dictionary::new();
        resources.set("Font", fonts).unwrap();

        let out = to_string(&resources.into());
        assert_eq!(out, "<<\n  /Font <<\n    /F1 3 0 R\n  >>\n>>");
    }

    #[test]
    fn test_empty_dictionary() {
        assert_eq!(to_string(&Dictionary::new().into()), "<<\n>>");
    }

    #[test]
    fn test_direct_stream_is_rejected() {
        let stream = StreamObject::new(ObjectRef::new(4, 0), ContentStreamBuilder::new());
        let err = ObjectSerializer::new()
            .serialize(&Object::Stream(stream))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidObjectType { .. }));
    }

    #[test]
    fn test_write_stream_reports_payload_length() {
        let mut content = ContentStreamBuilder::new();
        content.write_text("Hi");
        let stream = StreamObject::new(ObjectRef::new(4, 0), content);

        let mut buf = Vec::new();
        let len = ObjectSerializer::new()
            .write_stream(&mut buf, &stream, 0)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        let start = text.find("stream\n").unwrap() + "stream\n".len();
        let end = text.find("endstream").unwrap();
        assert_eq!(end - start, len);
        assert!(text.starts_with("<<\n  /Length 4 0 R\n>>\nstream\nBT\n"));
    }
}
