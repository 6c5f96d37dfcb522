//! JSON:API style response envelope

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};

/// Identifier of a serialized entity, numeric for plain primary keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Reference to a related entity, as listed under `relationships`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: Vec<ResourceRef>,
}

/// Named relationships of an entity, written as a JSON object in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships(Vec<(String, Relationship)>);

impl Relationships {
    /// Add `name`, replacing an earlier relationship of the same name in place
    pub fn insert(&mut self, name: String, relationship: Relationship) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = relationship,
            None => self.0.push((name, relationship)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Relationship> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, relationship)| relationship)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Relationships {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, relationship) in &self.0 {
            map.serialize_entry(name, relationship)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Relationships {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RelationshipsVisitor;

        impl<'de> Visitor<'de> for RelationshipsVisitor {
            type Value = Relationships;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of relationships")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut relationships = Relationships::default();
                while let Some((name, relationship)) = access.next_entry()? {
                    relationships.insert(name, relationship);
                }
                Ok(relationships)
            }
        }

        deserializer.deserialize_map(RelationshipsVisitor)
    }
}

/// A serialized entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: ResourceId,
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl ResourceObject {
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<ResourceId>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes,
            relationships: None,
        }
    }

    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef {
            kind: self.kind.clone(),
            id: self.id.clone(),
        }
    }
}

/// Primary data of an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Box<ResourceObject>),
    Many(Vec<ResourceObject>),
}

/// The response wrapper shared by every resource
///
/// `included` is only present when relationships were expanded; related
/// entities are appended relationship by relationship and never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub meta: Map<String, Value>,
    pub errors: Vec<Value>,
    pub data: PrimaryData,
    pub links: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl Envelope {
    /// Envelope around `data`, with `meta` listing `authors` and then `meta` merged on top
    pub fn new(data: PrimaryData, authors: &[String], meta: Map<String, Value>) -> Self {
        let mut merged = Map::new();
        merged.insert(
            "authors".to_string(),
            Value::Array(authors.iter().cloned().map(Value::String).collect()),
        );
        merged.extend(meta);

        Self {
            meta: merged,
            errors: Vec::new(),
            data,
            links: Map::new(),
            included: None,
        }
    }

    /// Attach expanded relationships to a single-entity envelope
    ///
    /// Relationships are written in the given order. Without any relationship
    /// the envelope is left untouched.
    pub fn with_relationships(mut self, relationships: Vec<(String, Vec<ResourceObject>)>) -> Self {
        if relationships.is_empty() {
            return self;
        }

        let PrimaryData::One(object) = &mut self.data else {
            return self;
        };

        let refs = object.relationships.get_or_insert_with(Relationships::default);
        let included = self.included.get_or_insert_with(Vec::new);

        for (name, related) in relationships {
            refs.insert(
                name,
                Relationship {
                    data: related.iter().map(ResourceObject::to_ref).collect(),
                },
            );
            included.extend(related);
        }

        self
    }
}
