//! Rich text model: style spans over a plain text buffer
//!
//! Styles are stored as `(start, end, attr)` intervals in char offsets,
//! one list shared by all attributes. Spans of the same attribute are kept
//! disjoint and non-adjacent. The editor widget works on the plain
//! `String`; after every change the spans are shifted with [`StyleSpans::apply_edit`].

use egui::text::{LayoutJob, TextFormat};
use egui::{Align, Color32, FontFamily, FontId, Stroke};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleAttr {
    Bold,
    Italic,
    Underline,
    Subscript,
    Superscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub attr: StyleAttr,
}

/// Attributes active over one section of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub subscript: bool,
    pub superscript: bool,
}

impl StyleSet {
    fn insert(&mut self, attr: StyleAttr) {
        match attr {
            StyleAttr::Bold => self.bold = true,
            StyleAttr::Italic => self.italic = true,
            StyleAttr::Underline => self.underline = true,
            StyleAttr::Subscript => self.subscript = true,
            StyleAttr::Superscript => self.superscript = true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSpans {
    spans: Vec<StyleSpan>,
}

impl StyleSpans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn has_attr_at(&self, pos: usize, attr: StyleAttr) -> bool {
        self.spans.iter().any(|s| s.attr == attr && s.start <= pos && pos < s.end)
    }

    /// Toggle `attr` over a selection: if the first selected char already
    /// carries it, remove it from the whole range, otherwise apply it to
    /// the whole range. Empty selections do nothing.
    pub fn toggle(&mut self, start: usize, end: usize, attr: StyleAttr) {
        if start >= end {
            return;
        }
        if self.has_attr_at(start, attr) {
            self.remove(start, end, attr);
        } else {
            self.add(start, end, attr);
        }
    }

    pub fn add(&mut self, start: usize, end: usize, attr: StyleAttr) {
        if start >= end {
            return;
        }
        let mut merged = StyleSpan { start, end, attr };
        self.spans.retain(|s| {
            if s.attr == attr && s.start <= merged.end && merged.start <= s.end {
                merged.start = merged.start.min(s.start);
                merged.end = merged.end.max(s.end);
                false
            } else {
                true
            }
        });
        self.spans.push(merged);
        self.sort();
    }

    pub fn remove(&mut self, start: usize, end: usize, attr: StyleAttr) {
        if start >= end {
            return;
        }
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for s in self.spans.drain(..) {
            if s.attr != attr || s.end <= start || end <= s.start {
                kept.push(s);
                continue;
            }
            if s.start < start {
                kept.push(StyleSpan { start: s.start, end: start, attr });
            }
            if end < s.end {
                kept.push(StyleSpan { start: end, end: s.end, attr });
            }
        }
        self.spans = kept;
        self.sort();
    }

    /// Shift spans after `removed` chars at `at` were replaced by
    /// `inserted` chars.
    ///
    /// Text typed strictly inside a span extends it; text typed at either
    /// edge stays unstyled. Offsets inside the removed range collapse onto
    /// the edit.
    pub fn apply_edit(&mut self, at: usize, removed: usize, inserted: usize) {
        let removed_end = at + removed;
        let map_start = |pos: usize| {
            if pos < at {
                pos
            } else if pos >= removed_end {
                pos - removed + inserted
            } else {
                at + inserted
            }
        };
        let map_end = |pos: usize| {
            if pos <= at {
                pos
            } else if pos >= removed_end {
                pos - removed + inserted
            } else {
                at
            }
        };
        for s in &mut self.spans {
            s.start = map_start(s.start);
            s.end = map_end(s.end);
        }
        self.spans.retain(|s| s.start < s.end);
        self.normalize();
    }

    /// Drop spans past `len` chars and merge any that now touch.
    pub fn clamp_to(&mut self, len: usize) {
        for s in &mut self.spans {
            s.end = s.end.min(len);
        }
        self.spans.retain(|s| s.start < s.end);
        self.normalize();
    }

    fn normalize(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        for s in spans {
            self.add(s.start, s.end, s.attr);
        }
    }

    fn sort(&mut self) {
        self.spans.sort_by_key(|s| (s.start, s.end));
    }

    /// Split `[0, len)` into maximal runs with the same attributes.
    pub fn sections(&self, len: usize) -> Vec<(usize, usize, StyleSet)> {
        let mut cuts = vec![0, len];
        for s in &self.spans {
            cuts.push(s.start.min(len));
            cuts.push(s.end.min(len));
        }
        cuts.sort_unstable();
        cuts.dedup();

        let mut sections: Vec<(usize, usize, StyleSet)> = Vec::new();
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let mut set = StyleSet::default();
            for s in self.spans.iter().filter(|s| s.start <= start && end <= s.end) {
                set.insert(s.attr);
            }
            match sections.last_mut() {
                Some(last) if last.2 == set => last.1 = end,
                _ => sections.push((start, end, set)),
            }
        }
        sections
    }
}

/// Locate the single changed region between two buffers.
///
/// `caret` is the cursor position in `new` after the edit, if known. The
/// inserted text ends there, which settles where a repeated character went:
/// typing `w` before `world` is an insert at the caret, not after the `w`.
///
/// Returns `(at, removed, inserted)` in chars, or `None` when identical.
pub fn edit_between(old: &str, new: &str, caret: Option<usize>) -> Option<(usize, usize, usize)> {
    if old == new {
        return None;
    }
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let shorter = old_chars.len().min(new_chars.len());

    let common_prefix = old_chars
        .iter()
        .zip(&new_chars)
        .take_while(|(a, b)| a == b)
        .count();
    let common_suffix = old_chars
        .iter()
        .rev()
        .zip(new_chars.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let (prefix, suffix) = match caret.filter(|&c| c <= new_chars.len()) {
        Some(caret) => {
            let suffix = common_suffix.min(new_chars.len() - caret).min(shorter);
            let prefix = common_prefix.min(shorter - suffix).min(caret);
            (prefix, suffix)
        }
        None => (common_prefix, common_suffix.min(shorter - common_prefix)),
    };

    Some((prefix, old_chars.len() - prefix - suffix, new_chars.len() - prefix - suffix))
}

/// Base font for the whole text area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontChoice {
    Proportional,
    Monospace,
}

impl FontChoice {
    pub fn label(self) -> &'static str {
        match self {
            FontChoice::Proportional => "proportional",
            FontChoice::Monospace => "monospace",
        }
    }

    pub fn family(self) -> FontFamily {
        match self {
            FontChoice::Proportional => FontFamily::Proportional,
            FontChoice::Monospace => FontFamily::Monospace,
        }
    }
}

/// Colours the layout needs from the theme
pub struct Inks {
    pub body: Color32,
    pub strong: Color32,
}

/// Sub/superscript glyphs are drawn at this fraction of the base size.
const SCRIPT_SCALE: f32 = 0.7;

/// Build the galley description egui's `TextEdit` lays out.
pub fn layout_job(text: &str, spans: &StyleSpans, font: FontId, inks: &Inks) -> LayoutJob {
    let mut job = LayoutJob::default();
    let byte_at: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = byte_at.len() - 1;

    for (start, end, set) in spans.sections(len) {
        let mut format = TextFormat {
            font_id: font.clone(),
            color: if set.bold { inks.strong } else { inks.body },
            italics: set.italic,
            ..Default::default()
        };
        if set.underline {
            format.underline = Stroke::new(1.0, format.color);
        }
        if set.subscript || set.superscript {
            format.font_id.size *= SCRIPT_SCALE;
            format.valign = if set.superscript { Align::TOP } else { Align::BOTTOM };
        }
        job.append(&text[byte_at[start]..byte_at[end]], 0.0, format);
    }
    job
}

#[cfg(test)]
mod tests {
    use super::*;
    use StyleAttr::*;

    fn span(start: usize, end: usize, attr: StyleAttr) -> StyleSpan {
        StyleSpan { start, end, attr }
    }

    #[test]
    fn test_toggle_on_then_off() {
        let mut spans = StyleSpans::new();
        spans.toggle(2, 6, Bold);
        assert_eq!(spans.spans(), &[span(2, 6, Bold)]);
        spans.toggle(2, 6, Bold);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_toggle_empty_selection_is_noop() {
        let mut spans = StyleSpans::new();
        spans.toggle(4, 4, Italic);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_toggle_decides_on_first_selected_char() {
        let mut spans = StyleSpans::new();
        spans.add(5, 10, Underline);
        // selection starts outside the span: apply to the whole range
        spans.toggle(2, 7, Underline);
        assert_eq!(spans.spans(), &[span(2, 10, Underline)]);
        // selection starts inside: remove from the range only
        spans.toggle(4, 6, Underline);
        assert_eq!(spans.spans(), &[span(2, 4, Underline), span(6, 10, Underline)]);
    }

    #[test]
    fn test_add_merges_adjacent_same_attr_only() {
        let mut spans = StyleSpans::new();
        spans.add(0, 3, Bold);
        spans.add(3, 5, Bold);
        spans.add(3, 5, Italic);
        assert_eq!(spans.spans(), &[span(0, 5, Bold), span(3, 5, Italic)]);
    }

    #[test]
    fn test_typing_inside_span_extends_it() {
        let mut spans = StyleSpans::new();
        spans.add(2, 6, Bold);
        spans.apply_edit(4, 0, 3);
        assert_eq!(spans.spans(), &[span(2, 9, Bold)]);
    }

    #[test]
    fn test_typing_at_edges_stays_unstyled() {
        let mut spans = StyleSpans::new();
        spans.add(2, 6, Bold);
        spans.apply_edit(6, 0, 1);
        assert_eq!(spans.spans(), &[span(2, 6, Bold)]);
        spans.apply_edit(2, 0, 1);
        assert_eq!(spans.spans(), &[span(3, 7, Bold)]);
    }

    #[test]
    fn test_deletion_collapses_and_drops() {
        let mut spans = StyleSpans::new();
        spans.add(2, 5, Bold);
        spans.add(8, 10, Italic);
        // delete [3, 9) and type one char
        spans.apply_edit(3, 6, 1);
        assert_eq!(spans.spans(), &[span(2, 3, Bold), span(4, 5, Italic)]);
        // delete everything
        spans.apply_edit(0, 5, 0);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_edit_between() {
        assert_eq!(edit_between("hello", "hello", None), None);
        assert_eq!(edit_between("hello", "help lo", None), Some((3, 0, 2)));
        assert_eq!(edit_between("hello world", "hello", None), Some((5, 6, 0)));
        assert_eq!(edit_between("aaa", "aaaa", None), Some((3, 0, 1)));
        assert_eq!(edit_between("café au lait", "café noir", None), Some((5, 7, 4)));
    }

    #[test]
    fn test_edit_between_uses_caret_for_repeated_chars() {
        // 'w' typed in front of "world"
        assert_eq!(edit_between("hello world", "hello wworld", Some(7)), Some((6, 0, 1)));
        assert_eq!(edit_between("aaa", "aaaa", Some(1)), Some((0, 0, 1)));
        assert_eq!(edit_between("aaa", "aaaa", Some(4)), Some((3, 0, 1)));
        // backspace over the first of two spaces
        assert_eq!(edit_between("a  b", "a b", Some(1)), Some((1, 1, 0)));
        // a caret past the end is ignored
        assert_eq!(edit_between("aaa", "aaaa", Some(9)), Some((3, 0, 1)));
    }

    #[test]
    fn test_repeated_char_at_span_start_stays_unstyled() {
        let mut spans = StyleSpans::new();
        spans.add(6, 11, Bold);
        let (at, removed, inserted) = edit_between("hello world", "hello wworld", Some(7)).unwrap();
        spans.apply_edit(at, removed, inserted);
        assert_eq!(spans.spans(), &[span(7, 12, Bold)]);
    }

    #[test]
    fn test_sections_partition_text() {
        let mut spans = StyleSpans::new();
        spans.add(1, 4, Bold);
        spans.add(3, 6, Superscript);
        let sections = spans.sections(8);
        let bounds: Vec<(usize, usize)> = sections.iter().map(|s| (s.0, s.1)).collect();
        assert_eq!(bounds, vec![(0, 1), (1, 3), (3, 4), (4, 6), (6, 8)]);
        assert!(sections[2].2.bold && sections[2].2.superscript);
        assert_eq!(sections[4].2, StyleSet::default());
    }

    #[test]
    fn test_clamp_to_length() {
        let mut spans = StyleSpans::new();
        spans.add(2, 10, Bold);
        spans.add(12, 14, Italic);
        spans.clamp_to(6);
        assert_eq!(spans.spans(), &[span(2, 6, Bold)]);
    }

    #[test]
    fn test_layout_job_respects_multibyte_offsets() {
        let text = "naïve café";
        let mut spans = StyleSpans::new();
        spans.add(6, 10, Underline);
        let inks = Inks { body: Color32::GRAY, strong: Color32::BLACK };
        let job = layout_job(text, &spans, FontId::proportional(12.0), &inks);
        assert_eq!(job.text, text);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(&job.text[job.sections[1].byte_range.clone()], "café");
        assert!(job.sections[1].format.underline.width > 0.0);
    }

    #[test]
    fn test_spans_serialize_as_plain_list() {
        let mut spans = StyleSpans::new();
        spans.add(0, 2, Superscript);
        let json = serde_json::to_string(&spans).unwrap();
        assert_eq!(json, r#"[{"start":0,"end":2,"attr":"superscript"}]"#);
    }
}
