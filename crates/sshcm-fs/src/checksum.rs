//! SHA-256 content tokens
//!
//! Every version token in the workspace is the lowercase hex SHA-256 digest of
//! some byte sequence. Host records hash their normalized fields, documents
//! hash the raw file bytes.

use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Hex-encoded SHA-256 digest of `bytes`.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Hex-encoded SHA-256 digest over the concatenation of `parts`.
///
/// Equivalent to joining the parts with no separator and calling
/// [`hash_bytes`], without allocating the joined buffer.
pub fn hash_parts<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref());
    }
    format!("{:x}", hasher.finalize())
}

/// A reader adapter that feeds every byte it yields into a SHA-256 hasher.
///
/// Lets a caller consume a stream once and still obtain the digest of
/// everything that passed through.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
    bytes_read: u64,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes_read: 0,
        }
    }

    /// Number of bytes hashed so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Consume the reader and return the hex digest of all bytes read.
    pub fn finalize(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes_read += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_bytes(b"test"), hash_bytes(b"test"));
    }

    #[test]
    fn different_content_different_hash() {
        assert_ne!(hash_bytes(b"aaa"), hash_bytes(b"bbb"));
    }

    #[test]
    fn hash_known_value() {
        assert_eq!(
            hash_bytes(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn hash_parts_matches_concatenation() {
        assert_eq!(
            hash_parts(["hello", " ", "world"]),
            hash_bytes(b"hello world")
        );
    }

    #[test]
    fn hash_of_empty_input() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(hash_parts(Vec::<&[u8]>::new()), hash_bytes(b""));
    }

    #[test]
    fn hashing_reader_matches_direct_hash() {
        let data = b"Host foo\n  HostName 1.2.3.4\n".repeat(500);
        let mut reader = HashingReader::new(&data[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();

        assert_eq!(out, data);
        assert_eq!(reader.bytes_read(), data.len() as u64);
        assert_eq!(reader.finalize(), hash_bytes(&data));
    }
}
