//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub(crate) struct SvgWriter {
    writer: BufWriter<File>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }

    /// Flush buffered output, reporting the path on failure.
    pub(crate) fn finish(mut self, path: &Path) -> Result<()> {
        self.writer.flush()
            .with_context(|| format!("[io::svg] Failed to write {}", path.display()))
    }
}

/// Write the XML declaration, the opening <svg> tag and a white background.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write shared chart styles.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    text {{ font-family: sans-serif; fill: #111827; }}
    .title {{ font-size: 18px; font-weight: bold; }}
    .label {{ font-size: 11px; }}
    .axis {{ stroke: #111827; stroke-width: 1; }}
    .grid {{ stroke: #e5e7eb; stroke-width: 1; }}
    .bar {{ stroke: #111827; stroke-width: 0.5; }}
    .series {{ fill: none; stroke: #2563eb; stroke-width: 2; }}
    .forecast {{ fill: none; stroke: #dc2626; stroke-width: 2; stroke-dasharray: 6 4; }}
    .city {{ stroke: #111827; stroke-width: 0.5; fill-opacity: 0.8; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write a centered title at the top of the canvas.
pub(crate) fn write_svg_title<W: Write>(writer: &mut W, width: f64, title: &str) -> Result<()> {
    writeln!(writer, r#"<text class="title" x="{x:.1}" y="28" text-anchor="middle">{t}</text>"#,
        x = width / 2.0,
        t = escape_text(title),
    )?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Escape text for use in SVG character data and attribute values.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
