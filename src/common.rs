// Copyright (c) 2019-2026 Dropbox, Inc.

//! Types shared between namespaces.

use serde::{Deserialize, Serialize};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;

/// A union value of which only the variant name matters to this crate, e.g. an access level or
/// a sharing policy. The tag is kept as the raw string so new variants don't break decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = ".tag")]
    pub tag: String,
}

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.tag == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.tag == *other
    }
}

/// The value of the `Dropbox-API-Path-Root` header: selects which namespace paths in a request
/// are evaluated relative to.
///
/// See <https://www.dropbox.com/developers/reference/namespace-guide> for how namespaces work.
///
/// When no path root is set on a client, the header is omitted and the server resolves paths
/// against its implicit default, which behaves like [`PathRoot::Home`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathRoot {
    /// Paths are relative to the authenticating user's home namespace.
    Home,

    /// Paths are relative to the namespace with the given ID.
    NamespaceId(String),

    /// Paths are relative to the user's root namespace. The ID must match the user's current
    /// root namespace, otherwise the server rejects the request.
    Root(String),
}

impl PathRoot {
    /// The header value for this path root, as it is sent on the wire.
    pub fn to_header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

const PATH_ROOT_TAGS: &[&str] = &["home", "namespace_id", "root"];

impl serde::ser::Serialize for PathRoot {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathRoot::Home => {
                let mut s = serializer.serialize_struct("PathRoot", 1)?;
                s.serialize_field(".tag", "home")?;
                s.end()
            }
            PathRoot::NamespaceId(x) => {
                let mut s = serializer.serialize_struct("PathRoot", 2)?;
                s.serialize_field(".tag", "namespace_id")?;
                s.serialize_field("namespace_id", x)?;
                s.end()
            }
            PathRoot::Root(x) => {
                let mut s = serializer.serialize_struct("PathRoot", 2)?;
                s.serialize_field(".tag", "root")?;
                s.serialize_field("root", x)?;
                s.end()
            }
        }
    }
}

impl<'de> serde::de::Deserialize<'de> for PathRoot {
    fn deserialize<D: serde::de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnumVisitor;
        impl<'de> Visitor<'de> for EnumVisitor {
            type Value = PathRoot;
            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a PathRoot structure")
            }
            fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<Self::Value, V::Error> {
                let mut tag = None::<String>;
                let mut payload = None::<String>;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        ".tag" => {
                            if tag.is_some() {
                                return Err(de::Error::duplicate_field(".tag"));
                            }
                            tag = Some(map.next_value()?);
                        }
                        "namespace_id" | "root" => {
                            if payload.is_some() {
                                return Err(de::Error::duplicate_field("namespace_id"));
                            }
                            payload = Some(map.next_value()?);
                        }
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                let tag = tag.ok_or_else(|| de::Error::missing_field(".tag"))?;
                match tag.as_str() {
                    "home" => Ok(PathRoot::Home),
                    "namespace_id" => payload
                        .map(PathRoot::NamespaceId)
                        .ok_or_else(|| de::Error::missing_field("namespace_id")),
                    "root" => payload
                        .map(PathRoot::Root)
                        .ok_or_else(|| de::Error::missing_field("root")),
                    other => Err(de::Error::unknown_variant(other, PATH_ROOT_TAGS)),
                }
            }
        }
        deserializer.deserialize_struct("PathRoot", PATH_ROOT_TAGS, EnumVisitor)
    }
}
