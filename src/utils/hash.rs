/// Lowercase hex MD5 digest, the form Gravatar expects.
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("octocat@github.com").len(), 32);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(md5_hex("reader@example.com"), md5_hex("reader@example.com"));
        assert_ne!(md5_hex("reader@example.com"), md5_hex("Reader@example.com"));
    }
}
