use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.55;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    font_size: f32,
    header_font_size: f32,
    subtitle_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// What goes above the table on the first page.
pub struct ReportHeading<'a> {
    pub title: &'a str,
    pub total_line: &'a str,
    pub subtitle: &'a str,
}

impl PdfManager {
    /// US-letter portrait document with Helvetica / Helvetica-Bold.
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 612.0,
            page_h: 792.0,
            margin: 50.0,
            row_h: 20.0,

            next_id,
            font_id,
            bold_id,

            font_size: 7.0,
            header_font_size: 8.0,
            subtitle_font_size: 12.0,
            title_font_size: 16.0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources()
            .fonts()
            .pair(Name(b"F1"), self.font_id)
            .pair(Name(b"F2"), self.bold_id);
        drop(page);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { Name(b"F2") } else { Name(b"F1") };
        let bytes = encode_win_ansi(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn text_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_RATIO
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, grey: f32) {
        content.save_state();
        content.set_fill_rgb(grey, grey, grey);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], header: bool) {
        let size = if header {
            self.header_font_size
        } else {
            self.font_size
        };
        let mut x = self.margin;

        for (i, w) in col_widths.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let w = *w;
            let shown = fit_text(text, w - 6.0, size);
            self.draw_text(content, x + 3.0, y + 7.0, size, header, &shown);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header + content, scaled down to the printable width.
    fn compute_col_widths(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| Self::text_width(h, self.header_font_size) + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(Self::text_width(cell, self.font_size) + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_number(&self, content: &mut Content, page: usize) {
        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin - 30.0,
            self.font_size,
            false,
            &pg,
        );
    }

    /// First-page heading; returns the y where the table starts.
    fn draw_heading(&self, content: &mut Content, heading: &ReportHeading<'_>) -> f32 {
        let mut y = self.page_h - self.margin;

        self.draw_text(content, self.margin, y, self.title_font_size, true, heading.title);
        let total_w = Self::text_width(heading.total_line, self.title_font_size);
        self.draw_text(
            content,
            (self.page_w - self.margin - total_w).max(self.margin),
            y,
            self.title_font_size,
            true,
            heading.total_line,
        );

        y -= 25.0;
        self.draw_text(content, self.margin, y, self.subtitle_font_size, false, heading.subtitle);

        y - 45.0
    }

    /// Heading, header row and one row per record, over as many pages as needed.
    /// An empty row set still produces one page with the heading and header row.
    pub fn write_report(&mut self, heading: &ReportHeading<'_>, headers: &[String], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_number(&mut content, page_idx);

            let mut y = if page_idx == 1 {
                self.draw_heading(&mut content, heading)
            } else {
                self.page_h - self.margin - self.row_h
            };

            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &col_widths, headers, true);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &col_widths, row, false);
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Shorten `text` with ".." so it fits in `width` points.
fn fit_text(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * GLYPH_RATIO)).floor().max(0.0) as usize;
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars <= 2 {
        return text.chars().take(max_chars).collect();
    }
    let mut s: String = text.chars().take(max_chars - 2).collect();
    s.push_str("..");
    s
}

/// Latin-1 subset of WinAnsi; anything else becomes '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![i.to_string(), "ALPHA".to_string(), "8".to_string()])
            .collect()
    }

    fn heading() -> ReportHeading<'static> {
        ReportHeading {
            title: "Timecard Report",
            total_line: "Total Hours Spent: 8",
            subtitle: "Generated by Timecard Vault",
        }
    }

    fn headers() -> Vec<String> {
        vec!["Entry_ID".into(), "Contract_Name".into(), "Hours".into()]
    }

    #[test]
    fn empty_report_has_one_page() {
        let mut pdf = PdfManager::new();
        pdf.write_report(&heading(), &headers(), &[]);
        assert_eq!(pdf.page_count(), 1);
    }

    #[test]
    fn long_reports_paginate() {
        let mut pdf = PdfManager::new();
        pdf.write_report(&heading(), &headers(), &rows(200));
        assert!(pdf.page_count() >= 6);

        let mut short = PdfManager::new();
        short.write_report(&heading(), &headers(), &rows(10));
        assert_eq!(short.page_count(), 1);
    }

    #[test]
    fn text_is_fitted_and_encoded() {
        assert_eq!(fit_text("ABCDEFGHIJ", 7.0 * GLYPH_RATIO * 5.5, 7.0), "ABC..");
        assert_eq!(fit_text("AB", 100.0, 7.0), "AB");
        assert_eq!(encode_win_ansi("Café €"), vec![b'C', b'a', b'f', 0xE9, b' ', b'?']);
    }
}
