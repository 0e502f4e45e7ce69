/// Incremental BLAKE3 digest fed one chunk at a time.
#[derive(Debug, Clone, Default)]
pub struct Blake3Stream {
    hasher: blake3::Hasher,
    bytes: u64,
}

impl Blake3Stream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Number of bytes fed so far.
    #[must_use]
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    /// Hex-encoded digest of everything fed so far.
    #[must_use]
    pub fn finalize_hex(&self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}

/// Compute the BLAKE3 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn blake3_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_WORLD: &str = "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24";

    #[test]
    fn test_blake3_stream_matches_one_shot() {
        let mut stream = Blake3Stream::new();
        stream.update(b"hello");
        stream.update(b" ");
        stream.update(b"world");

        assert_eq!(stream.bytes_hashed(), 11);
        assert_eq!(stream.finalize_hex(), HELLO_WORLD);
    }

    #[test]
    fn test_blake3_bytes() {
        assert_eq!(blake3_bytes(b"hello world"), HELLO_WORLD);
    }
}
