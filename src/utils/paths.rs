// Path helpers
//
// File paths inside the IR are forward-slash strings. Nothing here touches the
// filesystem, so a path that does not exist still yields the same names.

/// Last path segment of a forward-slash path
pub fn file_name(file_path: &str) -> &str {
    file_path.rsplit('/').next().unwrap_or(file_path)
}

/// File name with its final extension removed (`body-parser.js` -> `body-parser`)
pub fn file_stem(file_path: &str) -> &str {
    let name = file_name(file_path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Name of the directory holding the file, if the path has one
pub fn parent_dir_name(file_path: &str) -> Option<&str> {
    let mut segments = file_path.rsplit('/').filter(|s| !s.is_empty());
    segments.next()?;
    segments.next().filter(|dir| *dir != "." && *dir != "..")
}
