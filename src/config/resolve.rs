//! Reference expansion inside a [`Store`].
//!
//! `${key}` refers to a key of the default section and `${section.key}` to a
//! key of `section`; the section name is everything before the last dot, so
//! `${exchange.limits.burst}` reads `burst` from `exchange.limits`.
//! `$$` produces a literal `$`.

use super::source::DEFAULT_SECTION;
use super::{ConfigError, Store};

const MAX_PASSES: usize = 100;

/// Expands every reference in the store until no more substitutions are made.
pub fn resolve_references(store: &mut Store) -> Result<(), ConfigError> {
    for _ in 0..MAX_PASSES {
        let snapshot = store.clone();
        let mut substitutions = 0;
        for (_section, _key, value) in store.iter_mut() {
            substitutions += resolve_string(value, &snapshot)?;
        }
        if substitutions == 0 {
            return Ok(());
        }
    }

    Err(ConfigError::CircularReference)
}

/// Expands the references in one value, returning how many were replaced.
///
/// `$$` escapes are copied through untouched so a later pass never reads
/// them as the start of a reference.
fn resolve_string(s: &mut String, root: &Store) -> Result<usize, ConfigError> {
    if !s.contains('$') {
        return Ok(0);
    }

    let mut result = String::with_capacity(s.len());
    let mut substitutions = 0;
    let mut rest = s.as_str();

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            result.push_str("$$");
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let end = body.find('}').ok_or(ConfigError::UnclosedReference)?;
            result.push_str(lookup(root, &body[..end])?);
            substitutions += 1;
            rest = &body[end + 1..];
        } else {
            result.push('$');
            rest = after;
        }
    }
    result.push_str(rest);

    *s = result;
    Ok(substitutions)
}

fn lookup<'a>(root: &'a Store, path: &str) -> Result<&'a str, ConfigError> {
    let (section, key) = match path.rsplit_once('.') {
        Some((section, key)) => (section, key),
        None => (DEFAULT_SECTION, path),
    };
    if section.is_empty() || key.is_empty() {
        return Err(ConfigError::InvalidReferencePath(path.to_string()));
    }

    root.get(section, key)
        .ok_or_else(|| ConfigError::ReferenceNotFound(path.to_string()))
}

/// Turns the `$$` escapes kept by [`resolve_references`] into `$`.
pub fn unescape(store: &mut Store) {
    for (_section, _key, value) in store.iter_mut() {
        if value.contains("$$") {
            *value = value.replace("$$", "$");
        }
    }
}

/// Doubles every `$` so [`resolve_references`] and [`unescape`] give the
/// values back unchanged.
pub fn escape(store: &mut Store) {
    for (_section, _key, value) in store.iter_mut() {
        if value.contains('$') {
            *value = value.replace('$', "$$");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(store: &mut Store) -> Result<(), ConfigError> {
        resolve_references(store)?;
        unescape(store);
        Ok(())
    }

    #[test]
    fn test_default_section_reference() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "host", "localhost");
        store.insert("api", "url", "http://${host}/api");

        expand(&mut store).unwrap();

        assert_eq!(store.get("api", "url"), Some("http://localhost/api"));
    }

    #[test]
    fn test_section_reference() {
        let mut store = Store::new();
        store.insert("server", "host", "example.com");
        store.insert("server", "port", "8080");
        store.insert("client", "endpoint", "https://${server.host}:${server.port}");

        expand(&mut store).unwrap();

        assert_eq!(
            store.get("client", "endpoint"),
            Some("https://example.com:8080")
        );
    }

    #[test]
    fn test_dotted_section_reference() {
        let mut store = Store::new();
        store.insert("exchange.limits", "burst", "10");
        store.insert(DEFAULT_SECTION, "summary", "burst=${exchange.limits.burst}");

        expand(&mut store).unwrap();

        assert_eq!(store.get(DEFAULT_SECTION, "summary"), Some("burst=10"));
    }

    #[test]
    fn test_chained_references() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "a", "hello");
        store.insert(DEFAULT_SECTION, "b", "${a} world");
        store.insert(DEFAULT_SECTION, "c", "${b}!");

        expand(&mut store).unwrap();

        assert_eq!(store.get(DEFAULT_SECTION, "c"), Some("hello world!"));
    }

    #[test]
    fn test_escape_sequence() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "var", "x");
        store.insert(DEFAULT_SECTION, "value", "use $${var} for literals, ${var} for refs");

        expand(&mut store).unwrap();

        assert_eq!(
            store.get(DEFAULT_SECTION, "value"),
            Some("use ${var} for literals, x for refs")
        );
    }

    #[test]
    fn test_escaped_values_survive_expansion() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "template", "${HOME}/x");
        store.insert(DEFAULT_SECTION, "price", "cost $$5 or $");
        let original = store.clone();

        escape(&mut store);
        expand(&mut store).unwrap();

        assert_eq!(store, original);
    }

    #[test]
    fn test_circular_reference() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "a", "${b}");
        store.insert(DEFAULT_SECTION, "b", "${a}");

        let result = expand(&mut store);

        assert!(matches!(result, Err(ConfigError::CircularReference)));
    }

    #[test]
    fn test_missing_reference() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "url", "${nonexistent.path}");

        let result = expand(&mut store);

        assert!(matches!(result, Err(ConfigError::ReferenceNotFound(_))));
    }

    #[test]
    fn test_invalid_and_unclosed_references() {
        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "bad", "${.key}");
        assert!(matches!(
            expand(&mut store),
            Err(ConfigError::InvalidReferencePath(_))
        ));

        let mut store = Store::new();
        store.insert(DEFAULT_SECTION, "open", "${key");
        assert!(matches!(
            expand(&mut store),
            Err(ConfigError::UnclosedReference)
        ));
    }
}
