//! URL helpers: scheme upgrade, unsafe-character escaping, and decodable
//! URL newtypes for the wire format.

use std::fmt;

use reqwest::Url;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::http::error::FetchError;

/// Returns `url` with an `https` scheme.
///
/// URLs that already use `https`, and URLs whose scheme cannot be replaced
/// (e.g. `data:`), are returned unchanged.
pub fn upgrade_to_https(url: &Url) -> Url {
    let mut upgraded = url.clone();
    if upgraded.scheme() == "http" && upgraded.set_scheme("https").is_err() {
        return url.clone();
    }
    upgraded
}

/// Characters allowed to pass through unescaped: the union of the characters
/// permitted in a URL path and a URL host.
fn is_allowed(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!$&'()*+,-./:;=@[]_~".contains(&byte)
}

/// Percent-encodes characters that are not safe in a URL path or host.
///
/// Existing `%XX` escapes are kept as-is so an already-encoded string is not
/// encoded a second time.
pub fn escape_unsafe(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        let is_escape = byte == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if is_allowed(byte) || is_escape {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
        i += 1;
    }
    out
}

/// A URL decoded from a string that may contain unsafe characters (spaces in
/// asset paths are common). The string is escaped before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EscapedUrl(Url);

impl EscapedUrl {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let safe = escape_unsafe(raw);
        Url::parse(&safe)
            .map(Self)
            .map_err(|_| FetchError::InvalidUrl(raw.to_string()))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl From<Url> for EscapedUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for EscapedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for EscapedUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// A URL decoded verbatim. Used for pagination links, whose query strings
/// must survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkUrl(Url);

impl LinkUrl {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        Url::parse(raw)
            .map(Self)
            .map_err(|_| FetchError::InvalidUrl(raw.to_string()))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl From<Url> for LinkUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl<'de> Deserialize<'de> for LinkUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
