//! UTF-8 path helpers built on `cap-std` and `camino`.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open the directory containing `path` and return it with the file name.
fn open_parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
///
/// Returns the I/O error raised while opening the parent directory or
/// reading metadata, including [`io::ErrorKind::NotFound`].
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_and_name(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Read the whole file at `path` as UTF-8 text.
///
/// # Errors
///
/// Returns the I/O error raised while opening or reading the file, or
/// [`io::ErrorKind::InvalidData`] when it is not valid UTF-8.
pub fn read_utf8(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent_and_name(path)?;
    let mut file = dir.open(name)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
