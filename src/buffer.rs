//! The document: an ordered sequence of lines with load/save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::line::Line;

/// A text buffer holding the lines of one document.
///
/// Never empty: an empty document is a single empty line, so every cursor
/// row short of "past the end" has a line behind it.
#[derive(Debug)]
pub struct Buffer {
    lines: Vec<Line>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Buffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            path: None,
            dirty: false,
        }
    }

    /// Build a buffer by splitting a byte stream on `\n`.
    ///
    /// Widths are computed eagerly, one pass per line. A trailing newline
    /// closes the last line rather than opening an empty one, so output of
    /// [`Buffer::to_bytes`] loads back to the same lines.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut lines: Vec<Line> = bytes
            .split(|&b| b == b'\n')
            .map(|segment| Line::from_bytes(segment.to_vec()))
            .collect();
        if bytes.last() == Some(&b'\n') {
            lines.pop();
        }
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self {
            lines,
            path: None,
            dirty: false,
        }
    }

    /// Open `path`, or start a new (dirty) buffer bound to it when the
    /// file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(contents) => {
                let mut buffer = Self::from_bytes(&contents);
                buffer.path = Some(path.to_path_buf());
                Ok(buffer)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let mut buffer = Self::new();
                buffer.path = Some(path.to_path_buf());
                buffer.dirty = true;
                Ok(buffer)
            }
            Err(err) => Err(err),
        }
    }

    /// Serialize: lines joined with `\n`, a trailing newline after every
    /// line including the last.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.bytes());
            out.push(b'\n');
        }
        out
    }

    /// Save to the buffer's associated path.
    pub fn save(&mut self) -> io::Result<()> {
        match self.path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no file path set for buffer",
            )),
        }
    }

    /// Save to a specific file, creating parent directories as needed
    /// ("already exists" is success). On error the dirty flag stays set.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_bytes())?;
        self.dirty = false;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Number of lines. Always at least 1.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        self.lines.get_mut(row)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn insert_line(&mut self, row: usize, line: Line) {
        self.lines.insert(row, line);
    }

    /// Remove and return the line at `row`. `row` must be in range and the
    /// buffer keeps its never-empty invariant by re-seeding a blank line.
    pub fn remove_line(&mut self, row: usize) -> Line {
        let line = self.lines.remove(row);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        line
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
