use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::DownloadedFile;

const FALLBACK_STEM: &str = "video";

/// Writes the downloaded body into `dir`, never overwriting an existing file.
pub fn save_file(dir: &Path, file: &DownloadedFile) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let name = sanitize_filename(&file.filename);
    let mut candidates = candidate_paths(dir, &name);

    loop {
        let path = candidates
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no free file name left"))?;

        // create_new fails if the name was taken, even by another process.
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut out) => {
                out.write_all(&file.body)?;
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Keeps only the last path component of a server-supplied name and replaces
/// characters that are not allowed in file names on common platforms.
pub fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned
    }
}

/// `name`, then `stem (1).ext`, `stem (2).ext`, ...
fn candidate_paths<'a>(dir: &'a Path, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    std::iter::once(dir.join(name)).chain((1u32..).map(move |n| match ext {
        Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
        None => dir.join(format!("{stem} ({n})")),
    }))
}
