//! Writer for the Cocoa flavored RTF that presentation slides embed.
//!
//! Two fixed layouts are produced, matching what the presentation software
//! itself saves:
//!
//! - **simple**: flat text in a chosen foreground color, left aligned
//! - **outlined**: white centered text with a thin black stroke
//!
//! Text is transliterated so the output stays 7-bit: line breaks become
//! `\` + newline, CJK characters become `\'hh` escapes of their GB2312
//! bytes and anything else outside ASCII becomes `\uN?`.

use std::io::{self, Write};

use super::style::{RtfFormat, TextStyle};

/// Cocoa RTF version stamped into every document.
const COCOA_RTF_VERSION: i32 = 2822;
/// `\fcharset` value for GB2312.
const GB2312_CHARSET: i32 = 134;

/// RTF writer for slide text.
pub struct RtfWriter<W: Write> {
    /// Output writer
    writer: W,
}

impl<W: Write> RtfWriter<W> {
    /// Create a new RTF writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete document holding `text` in the given style.
    pub fn write_document(&mut self, text: &str, style: &TextStyle) -> io::Result<()> {
        match style.format {
            RtfFormat::Simple => self.write_simple(text, style),
            RtfFormat::Outlined => self.write_outlined(text, style),
        }
    }

    fn write_simple(&mut self, text: &str, style: &TextStyle) -> io::Result<()> {
        self.write_document_header()?;

        // Font table: slide font plus Helvetica for the trailing group
        self.write_str("{")?;
        self.write_control_word("fonttbl", None)?;
        self.write_font_entry(0, &style.font_name)?;
        self.write_control_word("f", Some(1))?;
        self.write_control_word("fswiss", None)?;
        self.write_control_word("fcharset", Some(0))?;
        self.write_str(" Helvetica;}\n")?;

        // Color table
        self.write_str("{")?;
        self.write_control_word("colortbl", None)?;
        self.write_str(";")?;
        self.write_control_word("red", Some(i32::from(style.color.r)))?;
        self.write_control_word("green", Some(i32::from(style.color.g)))?;
        self.write_control_word("blue", Some(i32::from(style.color.b)))?;
        self.write_str(";}\n")?;
        self.write_str("{\\*")?;
        self.write_control_word("expandedcolortbl", None)?;
        self.write_str(";;}\n")?;

        self.write_control_word("deftab", Some(720))?;
        self.write_str("\n")?;
        self.write_control_word("pard", None)?;
        self.write_control_word("pardeftab", Some(720))?;
        self.write_control_word("partightenfactor", Some(0))?;
        self.write_str("\n\n")?;

        self.write_font_run(style)?;
        self.write_control_word("cf", Some(1))?;
        self.write_str(" ")?;
        self.write_text(text)?;
        self.write_str("\n")?;
        self.write_control_word("f", Some(1))?;
        self.write_str("  }")
    }

    fn write_outlined(&mut self, text: &str, style: &TextStyle) -> io::Result<()> {
        self.write_document_header()?;

        self.write_str("{")?;
        self.write_control_word("fonttbl", None)?;
        self.write_font_entry(0, &style.font_name)?;
        self.write_str("}\n")?;

        // White fill, white text, black stroke
        self.write_str("{")?;
        self.write_control_word("colortbl", None)?;
        self.write_str(";")?;
        for (r, g, b) in [(255, 255, 255), (255, 255, 255), (0, 0, 0)] {
            self.write_control_word("red", Some(r))?;
            self.write_control_word("green", Some(g))?;
            self.write_control_word("blue", Some(b))?;
            self.write_str(";")?;
        }
        self.write_str("}\n")?;
        self.write_str("{\\*")?;
        self.write_control_word("expandedcolortbl", None)?;
        self.write_str(";;")?;
        self.write_control_word("csgray", None)?;
        self.write_control_word("c", Some(100000))?;
        self.write_str(";")?;
        self.write_control_word("cssrgb", None)?;
        for _ in 0..3 {
            self.write_control_word("c", Some(0))?;
        }
        self.write_str(";}\n")?;

        self.write_control_word("pard", None)?;
        self.write_control_word("pardirnatural", None)?;
        self.write_control_word("qc", None)?;
        self.write_control_word("partightenfactor", Some(0))?;
        self.write_str("\n\n")?;

        self.write_font_run(style)?;
        self.write_control_word("cf", Some(2))?;
        self.write_str(" ")?;
        self.write_control_word("kerning", Some(1))?;
        self.write_control_word("expnd", Some(8))?;
        self.write_control_word("expndtw", Some(40))?;
        self.write_str("\n")?;
        self.write_control_word("outl", Some(0))?;
        self.write_control_word("strokewidth", Some(-40))?;
        self.write_str(" ")?;
        self.write_control_word("strokec", Some(3))?;
        self.write_str(" ")?;
        self.write_text(text)?;
        self.write_str("\n}")
    }

    /// Write document header up to the font table
    fn write_document_header(&mut self) -> io::Result<()> {
        self.write_str("{")?;
        self.write_control_word("rtf", Some(1))?;
        self.write_control_word("ansi", None)?;
        self.write_control_word("ansicpg", Some(1252))?;
        self.write_control_word("cocoartf", Some(COCOA_RTF_VERSION))?;
        self.write_str("\n")?;
        self.write_control_word("cocoatextscaling", Some(0))?;
        self.write_control_word("cocoaplatform", Some(0))
    }

    /// Write `\fN\fnil\fcharset134 Name;`
    fn write_font_entry(&mut self, index: i32, name: &str) -> io::Result<()> {
        self.write_control_word("f", Some(index))?;
        self.write_control_word("fnil", None)?;
        self.write_control_word("fcharset", Some(GB2312_CHARSET))?;
        self.write_str(" ")?;
        self.write_str(name)?;
        self.write_str(";")
    }

    /// Write `\f0[\b]\fsN ` selecting the slide font
    fn write_font_run(&mut self, style: &TextStyle) -> io::Result<()> {
        self.write_control_word("f", Some(0))?;
        if style.bold {
            self.write_control_word("b", None)?;
        }
        self.write_control_word("fs", Some(i32::try_from(style.font_size).unwrap_or(i32::MAX)))?;
        self.write_str(" ")
    }

    /// Write a control word
    fn write_control_word(&mut self, word: &str, param: Option<i32>) -> io::Result<()> {
        self.write_str("\\")?;
        self.write_str(word)?;
        if let Some(p) = param {
            write!(self.writer, "{}", p)?;
        }
        Ok(())
    }

    /// Write slide text, transliterated to 7-bit RTF
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            match ch {
                '\n' => self.write_str("\\\n")?,
                c if c.is_ascii() => self.write_str(c.encode_utf8(&mut buf))?,
                c => match gb2312_bytes(c) {
                    Some([hi, lo]) => write!(self.writer, "\\'{:02x}\\'{:02x}", hi, lo)?,
                    // Not in GB2312, fall back to a Unicode escape
                    None => write!(self.writer, "\\u{}?", c as u32)?,
                },
            }
        }
        Ok(())
    }

    /// Write a string
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }

    /// Flush the writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// The two GB2312 (EUC-CN) bytes of `ch`, if it has them.
///
/// GBK is a superset of GB2312; only its double-byte codes with both bytes in
/// `0xA1..=0xFE` (lead up to `0xF7`) belong to GB2312 proper.
pub fn gb2312_bytes(ch: char) -> Option<[u8; 2]> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(ch.encode_utf8(&mut buf));
    if had_errors {
        return None;
    }
    match &*bytes {
        &[hi @ 0xA1..=0xF7, lo @ 0xA1..=0xFE] => Some([hi, lo]),
        _ => None,
    }
}

/// Transliterate `text` the way [`RtfWriter`] embeds it.
pub fn transliterate(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    RtfWriter::new(&mut out)
        .write_text(text)
        .expect("writing to a Vec cannot fail");
    // Transliterated text is pure ASCII
    String::from_utf8(out).expect("transliteration produced non-ASCII output")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, style: &TextStyle) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output);
        writer.write_document(text, style).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_control_words() {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output);

        writer.write_control_word("test", Some(42)).unwrap();
        writer.write_control_word("flag", None).unwrap();
        writer.write_control_word("strokewidth", Some(-40)).unwrap();

        let result = String::from_utf8(output).unwrap();
        assert_eq!(result, "\\test42\\flag\\strokewidth-40");
    }

    #[test]
    fn test_font_size_saturates() {
        let style = TextStyle::default().with_font_size(u32::MAX);
        let rtf = render("x", &style);
        assert!(rtf.contains("\\fs2147483647 "));
        assert!(!rtf.contains("\\fs-"));
    }

    #[test]
    fn test_transliterate_mixed() {
        assert_eq!(transliterate("Hi\n你好"), "Hi\\\n\\'c4\\'e3\\'ba\\'c3");
    }

    #[test]
    fn test_transliterate_fallback() {
        assert_eq!(transliterate("€"), "\\u8364?");
        assert_eq!(transliterate("😀"), "\\u128512?");
        // passes through untouched
        assert_eq!(transliterate("{a}\\"), "{a}\\");
    }

    #[test]
    fn test_gb2312_bytes() {
        assert_eq!(gb2312_bytes('中'), Some([0xd6, 0xd0]));
        assert_eq!(gb2312_bytes('A'), None);
        assert_eq!(gb2312_bytes('€'), None);
    }

    #[test]
    fn test_simple_template() {
        let style = TextStyle::default()
            .with_format(RtfFormat::Simple)
            .with_font_name("Arial")
            .with_font_size(59)
            .with_bold(false)
            .with_color(crate::common::RGBColor::new(255, 0, 16));
        let expected = concat!(
            "{\\rtf1\\ansi\\ansicpg1252\\cocoartf2822\n",
            "\\cocoatextscaling0\\cocoaplatform0{\\fonttbl\\f0\\fnil\\fcharset134 Arial;\\f1\\fswiss\\fcharset0 Helvetica;}\n",
            "{\\colortbl;\\red255\\green0\\blue16;}\n",
            "{\\*\\expandedcolortbl;;}\n",
            "\\deftab720\n",
            "\\pard\\pardeftab720\\partightenfactor0\n",
            "\n",
            "\\f0\\fs59 \\cf1 Hello\n",
            "\\f1  }",
        );
        assert_eq!(render("Hello", &style), expected);
    }

    #[test]
    fn test_outlined_template() {
        let style = TextStyle::default();
        let expected = concat!(
            "{\\rtf1\\ansi\\ansicpg1252\\cocoartf2822\n",
            "\\cocoatextscaling0\\cocoaplatform0{\\fonttbl\\f0\\fnil\\fcharset134 PingFangSC-Semibold;}\n",
            "{\\colortbl;\\red255\\green255\\blue255;\\red255\\green255\\blue255;\\red0\\green0\\blue0;}\n",
            "{\\*\\expandedcolortbl;;\\csgray\\c100000;\\cssrgb\\c0\\c0\\c0;}\n",
            "\\pard\\pardirnatural\\qc\\partightenfactor0\n",
            "\n",
            "\\f0\\b\\fs114 \\cf2 \\kerning1\\expnd8\\expndtw40\n",
            "\\outl0\\strokewidth-40 \\strokec3 Line A\\\nLine B\n",
            "}",
        );
        assert_eq!(render("Line A\nLine B", &style), expected);
    }
}
