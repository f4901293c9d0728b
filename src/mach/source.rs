use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Source access
///
/// Everything the compiler reads goes through a loader so programs can be
/// compiled from memory as well as from disk.

pub trait SourceLoader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
    fn exists(&self, path: &Path) -> bool;
    fn current_dir(&self) -> PathBuf;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl SourceLoader for FileSystem {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_default()
    }
}

/// Files held in memory, keyed by their normalized path.
#[derive(Debug, Clone)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, Vec<u8>>,
    cwd: PathBuf,
}

impl Default for MemoryLoader {
    fn default() -> MemoryLoader {
        MemoryLoader {
            files: HashMap::new(),
            cwd: PathBuf::from("/"),
        }
    }
}

impl MemoryLoader {
    pub fn new() -> MemoryLoader {
        MemoryLoader::default()
    }

    pub fn insert<P: AsRef<Path>, B: Into<Vec<u8>>>(&mut self, path: P, bytes: B) {
        let path = self.cwd.join(path);
        self.files.insert(normalize(&path), bytes.into());
    }

    pub fn with<P: AsRef<Path>, B: Into<Vec<u8>>>(mut self, path: P, bytes: B) -> MemoryLoader {
        self.insert(path, bytes);
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files
            .get(&normalize(&self.cwd.join(path)))
            .cloned()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(&self.cwd.join(path)))
    }

    fn current_dir(&self) -> PathBuf {
        self.cwd.clone()
    }
}

/// Remove `.` and resolve `..` without touching the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            c => out.push(c.as_os_str()),
        }
    }
    out
}

/// Find an included file. Absolute names are used as they are, relative
/// names are tried against the working directory, the directory of the
/// including file and then each include directory in order.
pub fn resolve_include<L: SourceLoader>(
    loader: &L,
    name: &str,
    dir: &Path,
    include_path: &[PathBuf],
) -> Option<PathBuf> {
    let path = Path::new(name);
    if path.is_absolute() {
        return if loader.exists(path) {
            Some(normalize(path))
        } else {
            None
        };
    }
    std::iter::once(loader.current_dir())
        .chain(std::iter::once(dir.to_path_buf()))
        .chain(include_path.iter().cloned())
        .map(|base| normalize(&base.join(path)))
        .find(|candidate| loader.exists(candidate))
}

/// One input file read into lines.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    name: Rc<str>,
    path: PathBuf,
    lines: Vec<String>,
}

impl SourceUnit {
    pub fn load<L: SourceLoader>(loader: &L, path: &Path) -> Result<SourceUnit> {
        let path = normalize(&loader.current_dir().join(path));
        let name: Rc<str> = Rc::from(path.display().to_string());
        let bytes = match loader.read(&path) {
            Ok(bytes) => bytes,
            Err(e) => return Err(error!(UnreadableInput, name.to_string(); e.to_string())),
        };
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => return Err(error!(UnreadableInput, name.to_string(); "NOT UTF-8 TEXT")),
        };
        Ok(SourceUnit {
            name,
            path,
            lines: text.lines().map(String::from).collect(),
        })
    }

    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Trimmed, non-empty lines with their zero-based index in the file.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }
}
