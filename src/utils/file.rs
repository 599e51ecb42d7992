use std::fs;
use std::io;
use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Reads a whole file as UTF-8 text.
pub fn file_get(path: &str) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Writes `content` to `path`, replacing whatever was there.
pub fn file_write(path: &str, content: &str) -> io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_overwrites_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("sub.yaml");
        let path = path.to_str().unwrap();

        file_write(path, "first").unwrap();
        file_write(path, "second").unwrap();
        assert!(file_exists(path));
        assert_eq!(file_get(path).unwrap(), "second");
    }
}
