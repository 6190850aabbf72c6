use gpui::{Hsla, ShapedLine, TextRun, Window, font, px};

use crate::axis::TextMeasurer;

const UI_FONT: &str = ".SystemUIFont";

/// Shape a single line of text in the UI font.
pub(crate) fn shape_line(window: &Window, text: &str, size: f32, color: Hsla) -> ShapedLine {
    let run = TextRun {
        len: text.len(),
        font: font(UI_FONT),
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    window
        .text_system()
        .shape_line(text.to_string().into(), px(size), &[run], None)
}

pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let shaped = shape_line(self.window, text, size, gpui::black());
        let height = f32::from(shaped.ascent + shaped.descent);
        (f32::from(shaped.width), height.max(size * 1.2))
    }
}
