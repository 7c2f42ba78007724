//! Document model and file formats
//!
//! A manuscript is the text buffer plus its style spans. Three on-disk
//! formats, picked by extension:
//!
//! - `.txt`: UTF-8 text, spans dropped
//! - `.docx`: one paragraph per line, spans dropped
//! - `.msd`: JSON manuscript, the only format that keeps formatting
//!
//! Anything else reads and writes as plain text.

use crate::rich_text::StyleSpans;
use docx_rs::{DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

const MANUSCRIPT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word document error on {}: {message}", path.display())]
    Docx { path: PathBuf, message: String },
    #[error("manuscript error on {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Manuscript,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "docx" => DocumentFormat::Docx,
            "msd" => DocumentFormat::Manuscript,
            _ => DocumentFormat::PlainText,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Manuscript => "msd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "text (.txt)",
            DocumentFormat::Docx => "word document (.docx)",
            DocumentFormat::Manuscript => "manuscript (.msd)",
        }
    }

    pub fn keeps_formatting(self) -> bool {
        self == DocumentFormat::Manuscript
    }
}

/// Extensions listed in the open dialog.
pub const OPENABLE_EXTENSIONS: &[&str] = &["txt", "docx", "msd"];

/// Text plus formatting, as edited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
    pub text: String,
    pub spans: StyleSpans,
}

#[derive(Serialize, Deserialize)]
struct ManuscriptFile {
    version: u32,
    #[serde(flatten)]
    manuscript: Manuscript,
}

impl Manuscript {
    pub fn from_plain_text(text: String) -> Self {
        Self { text, spans: StyleSpans::new() }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.unicode_words().count()
    }
}

pub fn load(path: &Path) -> Result<Manuscript> {
    let manuscript = match DocumentFormat::from_path(path) {
        DocumentFormat::PlainText => Manuscript::from_plain_text(read_string(path)?),
        DocumentFormat::Docx => Manuscript::from_plain_text(load_docx(path)?),
        DocumentFormat::Manuscript => {
            let raw = read_string(path)?;
            let file: ManuscriptFile = serde_json::from_str(&raw)
                .map_err(|source| DocumentError::Json { path: path.to_path_buf(), source })?;
            let mut manuscript = file.manuscript;
            let len = manuscript.char_count();
            manuscript.spans.clamp_to(len);
            manuscript
        }
    };
    log::info!("opened {} ({} chars)", path.display(), manuscript.char_count());
    Ok(manuscript)
}

pub fn save(path: &Path, manuscript: &Manuscript) -> Result<()> {
    match DocumentFormat::from_path(path) {
        DocumentFormat::PlainText => write_bytes(path, manuscript.text.as_bytes())?,
        DocumentFormat::Docx => save_docx(path, &manuscript.text)?,
        DocumentFormat::Manuscript => {
            log::debug!("writing {} style spans", manuscript.spans.spans().len());
            let file = ManuscriptFile { version: MANUSCRIPT_VERSION, manuscript: manuscript.clone() };
            let json = serde_json::to_string_pretty(&file)
                .map_err(|source| DocumentError::Json { path: path.to_path_buf(), source })?;
            write_bytes(path, json.as_bytes())?
        }
    }
    log::info!("saved {}", path.display());
    Ok(())
}

fn read_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })
}

fn save_docx(path: &Path, text: &str) -> Result<()> {
    let docx = text.lines().fold(Docx::new(), |docx, line| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
    });
    let file = std::fs::File::create(path).map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;
    docx.build()
        .pack(file)
        .map_err(|e| DocumentError::Docx { path: path.to_path_buf(), message: e.to_string() })
}

fn load_docx(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| DocumentError::Docx { path: path.to_path_buf(), message: e.to_string() })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_text::StyleAttr;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.txt")), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_path(Path::new("a.DOCX")), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_path(Path::new("a.msd")), DocumentFormat::Manuscript);
        assert_eq!(DocumentFormat::from_path(Path::new("notes")), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_path(Path::new("a.md")), DocumentFormat::PlainText);
        assert!(DocumentFormat::Manuscript.keeps_formatting());
        assert!(!DocumentFormat::Docx.keeps_formatting());
    }

    #[test]
    fn test_counts() {
        let m = Manuscript::from_plain_text("The mantis waits — l'été, 2 days.\n".to_string());
        assert_eq!(m.word_count(), 6);
        assert_eq!(m.char_count(), 34);
        assert_eq!(Manuscript::default().word_count(), 0);
    }

    #[test]
    fn test_plain_text_drops_spans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        let mut m = Manuscript::from_plain_text("Première ligne\nsecond".to_string());
        m.spans.add(0, 3, StyleAttr::Bold);
        save(&path, &m).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.text, m.text);
        assert!(loaded.spans.is_empty());
    }

    #[test]
    fn test_docx_paragraph_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.docx");
        let m = Manuscript::from_plain_text("Chapter one\n\nIt was a dark night.\n".to_string());
        save(&path, &m).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.text, "Chapter one\n\nIt was a dark night.");
    }

    #[test]
    fn test_manuscript_keeps_spans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.msd");
        let mut m = Manuscript::from_plain_text("H2O and x2".to_string());
        m.spans.add(1, 2, StyleAttr::Subscript);
        m.spans.add(9, 10, StyleAttr::Superscript);
        save(&path, &m).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"version\": 1"));
        assert_eq!(load(&path).unwrap(), m);
    }

    #[test]
    fn test_manuscript_spans_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.msd");
        std::fs::write(
            &path,
            r#"{"version":1,"text":"abc","spans":[{"start":1,"end":9,"attr":"italic"}]}"#,
        )
        .unwrap();
        let m = load(&path).unwrap();
        assert_eq!(m.spans.spans()[0].end, 3);
    }

    #[test]
    fn test_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = load(&missing).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));

        let bad = dir.path().join("bad.msd");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(load(&bad).unwrap_err(), DocumentError::Json { .. }));

        let fake = dir.path().join("fake.docx");
        std::fs::write(&fake, "plain bytes").unwrap();
        assert!(matches!(load(&fake).unwrap_err(), DocumentError::Docx { .. }));
    }
}
