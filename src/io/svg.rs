//! SVG overlays for rendered maps.

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

    /// Write the SVG header, including the XML declaration and opening <svg> tag.
    pub(crate) fn write_header(&mut self, width: u32, height: u32) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}">"##)?;
        Ok(())
    }

    /// Write legend styles.
    pub(crate) fn write_styles(&mut self, font_size: f64) -> Result<()> {
        writeln!(self, r##"<defs>
<style>
    .raster {{ image-rendering: pixelated; }}
    .legend {{ font-family: Gentium, Georgia, serif; font-size: {font_size:.1}px; fill: rgb(30,30,30); }}
</style>
</defs>"##)?;
        Ok(())
    }

    /// Reference a raster image drawn at full size underneath the legend.
    pub(crate) fn write_image(&mut self, href: &str, width: u32, height: u32) -> Result<()> {
        writeln!(self, r#"<image class="raster" x="0" y="0" width="{width}" height="{height}" href="{href}" xlink:href="{href}"/>"#,
            href = escape(href))?;
        Ok(())
    }

    /// Write lines of legend text starting at (x, y), `line_height` apart.
    pub(crate) fn write_lines(&mut self, lines: &[String], x: f64, y: f64, line_height: f64) -> Result<()> {
        for (i, line) in lines.iter().enumerate() {
            writeln!(self, r#"<text class="legend" x="{x:.1}" y="{:.1}">{}</text>"#,
                y + i as f64 * line_height, escape(line))?;
        }
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        self.flush()?;
        Ok(())
    }
}

/// Escape text for use in XML content and attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
