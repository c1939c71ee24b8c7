//! Page layout for the document export.
//!
//! Pure geometry, independent of the PDF backend: sections are laid out
//! top-down in points, each section starting on a fresh page. A line
//! that would land below the bottom margin starts a new page.

/// Role of a line, which decides its font and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Report title.
    Title,
    /// Section heading.
    Heading,
    /// Body text.
    Body,
}

impl TextStyle {
    /// Font size in points.
    pub const fn font_size(self) -> f32 {
        match self {
            Self::Title => 18.0,
            Self::Heading => 14.0,
            Self::Body => 12.0,
        }
    }

    /// Whether the bold face is used.
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Title | Self::Heading)
    }
}

/// A titled block of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading drawn at the top of the section's first page.
    pub heading: String,
    /// Style of the heading.
    pub heading_style: TextStyle,
    /// Body lines.
    pub lines: Vec<String>,
}

/// A line with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Text to draw.
    pub text: String,
    /// Baseline height from the bottom edge, in points.
    pub y: f32,
    /// Font role.
    pub style: TextStyle,
}

/// One output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Lines in drawing order.
    pub lines: Vec<PlacedLine>,
}

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Left edge of every line.
    pub left: f32,
    /// Baseline of a section heading, and of the first line on a
    /// continuation page.
    pub top: f32,
    /// Gap between the heading and the first body line.
    pub heading_gap: f32,
    /// Baseline distance between body lines.
    pub line_height: f32,
    /// No line is drawn below this height.
    pub bottom_margin: f32,
}

impl PageLayout {
    /// US Letter with 100 pt margins and 20 pt line spacing.
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
        left: 100.0,
        top: 692.0,
        heading_gap: 30.0,
        line_height: 20.0,
        bottom_margin: 100.0,
    };

    /// Lay the sections out into pages.
    pub fn paginate(&self, sections: &[Section]) -> Vec<Page> {
        let mut pages = Vec::new();
        for section in sections {
            let mut page = Page::default();
            page.lines.push(PlacedLine {
                text: section.heading.clone(),
                y: self.top,
                style: section.heading_style,
            });
            let mut y = self.top - self.heading_gap;
            for line in &section.lines {
                if y < self.bottom_margin {
                    pages.push(std::mem::take(&mut page));
                    y = self.top;
                }
                page.lines.push(PlacedLine {
                    text: line.clone(),
                    y,
                    style: TextStyle::Body,
                });
                y -= self.line_height;
            }
            pages.push(page);
        }
        pages
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::LETTER
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    fn section(lines: usize) -> Section {
        Section {
            heading: "Land Information".to_owned(),
            heading_style: TextStyle::Heading,
            lines: (1..=lines).map(|i| format!("line {i}")).collect(),
        }
    }

    #[test]
    fn each_section_starts_a_page() {
        let pages = PageLayout::LETTER.paginate(&[section(1), section(0), section(2)]);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.get(1).map(|p| p.lines.len()), Some(1));
    }

    #[test]
    fn lines_step_down_from_the_heading() {
        let pages = PageLayout::LETTER.paginate(&[section(2)]);
        let ys: Vec<f32> = pages
            .first()
            .map(|p| p.lines.iter().map(|l| l.y).collect())
            .unwrap_or_default();
        assert_eq!(ys, [692.0, 662.0, 642.0]);
    }

    #[test]
    fn overflow_continues_on_a_new_page() {
        // Body lines fit at 662, 642, ..., 102: 29 lines on the first page.
        let pages = PageLayout::LETTER.paginate(&[section(30)]);
        assert_eq!(pages.len(), 2);
        let first = pages.first().map(|p| p.lines.len());
        assert_eq!(first, Some(30));
        let last = pages.get(1).and_then(|p| p.lines.first());
        assert_eq!(last.map(|l| (l.text.as_str(), l.y)), Some(("line 30", 692.0)));
        assert!(
            pages
                .iter()
                .flat_map(|p| &p.lines)
                .all(|l| l.y >= PageLayout::LETTER.bottom_margin)
        );
    }
}
