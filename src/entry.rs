use std::{ffi::OsStr, fmt::Debug, fs::FileType, path::Path, sync::Arc};
use strum::Display;

/// A single entry of a listed directory.
///
/// The name is kept exactly as the OS returned it, so it can be joined back
/// onto the directory even when it is not valid UTF-8.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: Arc<OsStr>,
    pub kind: EntryKind,
}

impl Debug for DirectoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self.name, self.kind)
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum EntryKind {
    /// A character or block device node
    Device,
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn is_device(self) -> bool {
        self == Self::Device
    }
}

impl From<FileType> for EntryKind {
    fn from(value: FileType) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if value.is_char_device() || value.is_block_device() {
                return Self::Device;
            }
        }

        if value.is_symlink() {
            Self::Symlink
        } else if value.is_dir() {
            Self::Directory
        } else if value.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

impl DirectoryEntry {
    pub fn new(name: impl AsRef<OsStr>, kind: EntryKind) -> Self {
        Self {
            name: name.as_ref().into(),
            kind,
        }
    }

    pub fn device(name: impl AsRef<OsStr>) -> Self {
        Self::new(name, EntryKind::Device)
    }

    pub fn file(name: impl AsRef<OsStr>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl AsRef<OsStr>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// The raw bytes of the name, for matching against a byte pattern.
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_encoded_bytes()
    }

    fn from_std(value: std::fs::DirEntry) -> std::io::Result<Self> {
        // `DirEntry::file_type` does not follow symlinks
        let kind = value.file_type()?.into();
        Ok(Self {
            name: value.file_name().into(),
            kind,
        })
    }
}

/// Lists `dir` in the order the OS enumerates it.
pub fn read_dir(dir: impl AsRef<Path>) -> std::io::Result<Vec<DirectoryEntry>> {
    std::fs::read_dir(dir)?
        .map(|entry| entry.and_then(DirectoryEntry::from_std))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sorted(mut entries: Vec<DirectoryEntry>) -> Vec<DirectoryEntry> {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    #[test]
    fn classifies_files_and_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cu.usbserial-1410"), b"").unwrap();
        std::fs::create_dir(dir.path().join("serial")).unwrap();

        let entries = sorted(read_dir(dir.path()).unwrap());

        assert_eq!(
            entries,
            vec![
                DirectoryEntry::file("cu.usbserial-1410"),
                DirectoryEntry::directory("serial"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("/dev/null", dir.path().join("cu.usbmodem-1")).unwrap();

        let entries = read_dir(dir.path()).unwrap();

        assert_eq!(
            entries,
            vec![DirectoryEntry::new("cu.usbmodem-1", EntryKind::Symlink)]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn dev_null_is_a_device() {
        let entries = read_dir("/dev").unwrap();

        let null = entries.iter().find(|e| &*e.name == "null").unwrap();
        assert!(null.kind.is_device());
    }

    #[cfg(unix)]
    #[test]
    fn names_that_are_not_utf8_are_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"cu.usbserial-\xFF");
        std::fs::write(dir.path().join(name), b"").unwrap();

        let entries = read_dir(dir.path()).unwrap();

        assert_eq!(entries, vec![DirectoryEntry::file(name)]);
        assert_eq!(entries[0].name_bytes(), b"cu.usbserial-\xFF");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();

        let err = read_dir(dir.path().join("absent")).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn kind_displays_in_kebab_case() {
        assert_eq!(EntryKind::Device.to_string(), "device");
        assert_eq!(EntryKind::Directory.to_string(), "directory");
    }
}
