//! File browsing and recent files
//!
//! The writing surface never leaves fullscreen for an OS dialog; opening,
//! saving and picking an inspiration image all go through [`FileBrowser`].
//! Recent files live for the session only.

use std::path::{Path, PathBuf};

/// Recently opened or saved files, most recent first.
#[derive(Debug, Clone, Default)]
pub struct RecentFiles {
    files: Vec<PathBuf>,
    max_entries: usize,
}

impl RecentFiles {
    pub fn new(max_entries: usize) -> Self {
        Self {
            files: Vec::new(),
            max_entries,
        }
    }

    pub fn add(&mut self, path: PathBuf) {
        self.files.retain(|p| p != &path);
        self.files.insert(0, path);
        self.files.truncate(self.max_entries);
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Directory listing state for the in-app open/save dialogs
#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected_index: Option<usize>,
    pub filter_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

impl FileBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
            filter_extensions: Vec::new(),
        };
        browser.refresh();
        browser
    }

    /// Only list files with one of these extensions (case-insensitive).
    /// Directories are always listed.
    pub fn with_filter<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.filter_extensions = extensions.iter().map(|e| e.as_ref().to_lowercase()).collect();
        self.refresh();
        self
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected_index = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            });
        }

        let read_dir = match std::fs::read_dir(&self.current_dir) {
            Ok(rd) => rd,
            Err(e) => {
                log::warn!("cannot list {}: {}", self.current_dir.display(), e);
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let is_directory = path.is_dir();
            if !is_directory && !self.accepts(&path) {
                continue;
            }
            let entry = FileEntry { name, path, is_directory };
            if is_directory {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());
        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.filter_extensions.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.filter_extensions.iter().any(|f| *f == ext)
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// Directory a typed filename should be saved into: the selected folder
    /// if one is highlighted (other than `..`), else the current directory.
    pub fn save_directory(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if entry.is_directory && entry.name != ".." => entry.path.clone(),
            _ => self.current_dir.clone(),
        }
    }
}

/// The user's documents folder, or the working directory.
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's pictures folder, falling back to [`documents_dir`].
pub fn pictures_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(documents_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("A.DOCX"), "a").unwrap();
        fs::write(dir.path().join("photo.png"), "p").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "h").unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        dir
    }

    fn names(browser: &FileBrowser) -> Vec<&str> {
        browser.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_dirs_first_then_files_alphabetical() {
        let dir = scratch();
        let browser = FileBrowser::new(dir.path().to_path_buf());
        assert_eq!(names(&browser), vec!["..", "Alpha", "zeta", "A.DOCX", "b.txt", "photo.png"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_keeps_dirs() {
        let dir = scratch();
        let browser = FileBrowser::new(dir.path().to_path_buf()).with_filter(&["txt", "docx"]);
        assert_eq!(names(&browser), vec!["..", "Alpha", "zeta", "A.DOCX", "b.txt"]);
    }

    #[test]
    fn test_navigate_and_save_directory() {
        let dir = scratch();
        let mut browser = FileBrowser::new(dir.path().to_path_buf());
        assert_eq!(browser.save_directory(), dir.path());

        browser.selected_index = Some(1);
        assert_eq!(browser.save_directory(), dir.path().join("Alpha"));

        browser.selected_index = Some(0);
        assert_eq!(browser.save_directory(), dir.path());

        browser.navigate_to(dir.path().join("zeta"));
        assert_eq!(browser.current_dir, dir.path().join("zeta"));
        assert_eq!(names(&browser), vec![".."]);

        // files are not navigable
        browser.navigate_to(dir.path().join("b.txt"));
        assert_eq!(browser.current_dir, dir.path().join("zeta"));
    }

    #[test]
    fn test_recent_files_dedup_and_bound() {
        let mut recent = RecentFiles::new(2);
        assert!(recent.is_empty());
        recent.add(PathBuf::from("one.txt"));
        recent.add(PathBuf::from("two.txt"));
        recent.add(PathBuf::from("one.txt"));
        assert_eq!(recent.files(), &[PathBuf::from("one.txt"), PathBuf::from("two.txt")]);
        recent.add(PathBuf::from("three.txt"));
        assert_eq!(recent.files(), &[PathBuf::from("three.txt"), PathBuf::from("one.txt")]);
    }
}
