//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// A single file or directory entry within a listed directory.
///
/// `FileEntry` is an immutable snapshot — create new instances via
/// [`FileEntry::new`] rather than mutating existing ones. Staleness is
/// expected and resolved only by re-listing the parent directory. The path
/// doubles as the entry's identity within a listing.
///
/// Sizes are `None` for directories; content types are guessed from the
/// file extension and `None` when the extension is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: Option<u64>,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_hidden: bool,
    content_type: Option<String>,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden files are detected by a leading `.` in the file name.
    /// Names are normalised to NFC form.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let is_dir = metadata.is_dir();
        let size = if is_dir { None } else { Some(metadata.len()) };
        let modified = metadata.modified().ok();
        Self::from_parts(path, is_dir, size, modified)
    }

    /// Creates a `FileEntry` without `std::fs::Metadata`.
    ///
    /// Used by capability implementations that obtain attributes some other
    /// way, and by tests that need synthetic entries. Name, hidden flag,
    /// and content type are derived from the path.
    pub fn from_parts(
        path: PathBuf,
        is_dir: bool,
        size: Option<u64>,
        modified: Option<SystemTime>,
    ) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_hidden = name.starts_with('.');
        let content_type = if is_dir {
            None
        } else {
            mime_guess::from_path(&path).first_raw().map(str::to_string)
        };

        Self {
            path,
            name,
            size: if is_dir { None } else { size },
            modified,
            is_dir,
            is_hidden,
            content_type,
        }
    }

    /// Returns the full path of this entry, which is also its identity
    /// within a listing.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. `None` for directories and when
    /// the size could not be read.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns the guessed MIME type, e.g. `"text/plain"` for `.txt`.
    /// `None` for directories and unrecognised extensions.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_entry_from_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("test.txt");
        fs::write(&file_path, "hello").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = FileEntry::new(file_path.clone(), &metadata);

        assert_eq!(entry.name(), "test.txt");
        assert_eq!(entry.size(), Some(5));
        assert!(!entry.is_dir());
        assert!(!entry.is_hidden());
        assert_eq!(entry.path(), file_path);
        assert!(entry.modified().is_some());
        assert_eq!(entry.content_type(), Some("text/plain"));
    }

    #[test]
    fn file_entry_from_directory() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join("subdir");
        fs::create_dir(&dir_path).unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = FileEntry::new(dir_path.clone(), &metadata);

        assert_eq!(entry.name(), "subdir");
        assert_eq!(entry.size(), None);
        assert!(entry.is_dir());
        assert!(!entry.is_hidden());
        assert_eq!(entry.content_type(), None);
    }

    #[test]
    fn file_entry_hidden_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join(".hidden");
        fs::write(&file_path, "secret").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = FileEntry::new(file_path, &metadata);

        assert!(entry.is_hidden());
        assert_eq!(entry.name(), ".hidden");
        assert_eq!(entry.size(), Some(6));
    }

    #[test]
    fn file_entry_hidden_directory() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join(".config");
        fs::create_dir(&dir_path).unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = FileEntry::new(dir_path, &metadata);

        assert!(entry.is_hidden());
        assert!(entry.is_dir());
    }

    #[test]
    fn file_entry_unicode_name() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("한글파일.txt");
        fs::write(&file_path, "내용").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = FileEntry::new(file_path, &metadata);

        assert_eq!(entry.name(), "한글파일.txt");
    }

    #[test]
    fn content_type_unknown_extension() {
        let entry = FileEntry::from_parts(PathBuf::from("/a/data.zzqq"), false, Some(1), None);
        assert_eq!(entry.content_type(), None);
    }

    #[test]
    fn content_type_common_extensions() {
        let png = FileEntry::from_parts(PathBuf::from("/a/pic.png"), false, Some(1), None);
        assert_eq!(png.content_type(), Some("image/png"));

        let json = FileEntry::from_parts(PathBuf::from("/a/data.json"), false, Some(1), None);
        assert_eq!(json.content_type(), Some("application/json"));
    }

    #[test]
    fn from_parts_directory_ignores_size() {
        let entry = FileEntry::from_parts(PathBuf::from("/a/docs"), true, Some(9999), None);
        assert!(entry.is_dir());
        assert_eq!(entry.size(), None, "directory size should always be None");
        assert_eq!(entry.content_type(), None);
    }

    #[test]
    fn from_parts_hidden() {
        let entry = FileEntry::from_parts(PathBuf::from("/a/.env"), false, Some(256), None);
        assert!(entry.is_hidden());
        assert_eq!(entry.name(), ".env");
    }

    #[test]
    fn file_entry_clone_and_eq() {
        let entry1 = FileEntry::from_parts(PathBuf::from("/a/b.txt"), false, Some(3), None);
        let entry2 = entry1.clone();
        assert_eq!(entry1, entry2);
    }
}
