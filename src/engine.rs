use std::{collections::BTreeSet, sync::LazyLock};

use regex::{Captures, Regex};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_.\-]+)\}\}").expect("token pattern is valid")
});

pub fn token(identifier: &str) -> String {
    format!("{{{{{}}}}}", identifier)
}

/// Values are inserted literally and never rescanned, so a value that itself
/// looks like a token stays as written. Tokens without an entry in `values` are
/// left untouched.
pub fn render<V>(body: &str, values: &V) -> String
where
    V: Lookup + ?Sized,
{
    if body.is_empty() || values.is_empty() {
        return body.to_string();
    }

    TOKEN
        .replace_all(body, |caps: &Captures<'_>| match values.lookup(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// `cursor` counts characters, not bytes, and is clamped to the body length.
pub fn insert(body: &str, cursor: usize, token: &str) -> (String, usize) {
    let char_len = body.chars().count();
    let cursor = cursor.min(char_len);

    let split_at = body
        .char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(body.len());

    let mut out = String::with_capacity(body.len() + token.len());
    out.push_str(&body[..split_at]);
    out.push_str(token);
    out.push_str(&body[split_at..]);

    (out, cursor + token.chars().count())
}

pub fn placeholders(body: &str) -> BTreeSet<String> {
    TOKEN
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub trait Lookup {
    fn lookup(&self, identifier: &str) -> Option<&str>;

    fn is_empty(&self) -> bool;
}

impl<S: std::hash::BuildHasher> Lookup for std::collections::HashMap<String, String, S> {
    fn lookup(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        std::collections::HashMap::is_empty(self)
    }
}

impl Lookup for std::collections::BTreeMap<String, String> {
    fn lookup(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        std::collections::BTreeMap::is_empty(self)
    }
}

impl Lookup for [(&str, &str)] {
    fn lookup(&self, identifier: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == identifier)
            .map(|(_, value)| *value)
    }

    fn is_empty(&self) -> bool {
        <[(&str, &str)]>::is_empty(self)
    }
}

impl<const N: usize> Lookup for [(&str, &str); N] {
    fn lookup(&self, identifier: &str) -> Option<&str> {
        self.as_slice().lookup(identifier)
    }

    fn is_empty(&self) -> bool {
        N == 0
    }
}
