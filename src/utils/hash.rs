// Content digests and symbol identifiers

/// Hex BLAKE3 digest of raw bytes; independent of path or language
pub fn hash_content(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// Deterministic symbol ID: hex MD5 of `file_path:start_line:name`
///
/// Two same-named declarations on one line collide; callers rely on that.
pub fn symbol_id(file_path: &str, start_line: u32, name: &str) -> String {
    let input = format!("{}:{}:{}", file_path, start_line, name);
    let digest = md5::compute(input.as_bytes());
    format!("{:x}", digest)
}
