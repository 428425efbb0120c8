//! Default key derivation from field names.

/// Separator inserted between words of a resolved key.
pub const DEFAULT_SEPARATOR: char = '-';

/// Turns declared field names into lookup keys.
///
/// `EnablePrivateSignature` and `enable_private_signature` both resolve to
/// `enable-private-signature`. Every uppercase letter after the first
/// character starts a new word, so acronyms split per letter (`URL` becomes
/// `u-r-l`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameResolver {
    separator: char,
}

impl NameResolver {
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn resolve(&self, name: &str) -> String {
        let mut resolved = String::with_capacity(name.len() * 2);
        let mut prev: Option<char> = None;

        for ch in name.chars() {
            let ch = if ch == '_' { self.separator } else { ch };
            if ch.is_ascii_uppercase() && prev.is_some_and(|p| p != self.separator) {
                resolved.push(self.separator);
            }
            resolved.push(ch);
            prev = Some(ch);
        }

        resolved.to_lowercase()
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

/// Resolves `name` with the default separator.
pub fn resolve(name: &str) -> String {
    NameResolver::default().resolve(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(resolve("EnablePrivateSignature"), "enable-private-signature");
        assert_eq!(resolve("PrivateKeyPrime256"), "private-key-prime256");
    }

    #[test]
    fn test_acronym_splits_per_letter() {
        assert_eq!(resolve("URL"), "u-r-l");
        assert_eq!(resolve("MarketURL"), "market-u-r-l");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(resolve("enable_private_signature"), "enable-private-signature");
        assert_eq!(resolve("host"), "host");
    }

    #[test]
    fn test_existing_separator_not_doubled() {
        assert_eq!(resolve("Trade-Url"), "trade-url");
        assert_eq!(resolve("access_Key"), "access-key");
    }

    #[test]
    fn test_leading_uppercase_gets_no_separator() {
        assert_eq!(resolve("A"), "a");
        assert_eq!(resolve("-Name"), "-name");
    }

    #[test]
    fn test_idempotent() {
        for name in ["EnablePrivateSignature", "URL", "trade_url", "Host-Name", "x"] {
            let once = resolve(name);
            assert_eq!(resolve(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_custom_separator() {
        let names = NameResolver::new('.');
        assert_eq!(names.resolve("HostName"), "host.name");
        assert_eq!(names.resolve("host_name"), "host.name");
        assert_eq!(names.separator(), '.');
    }
}
