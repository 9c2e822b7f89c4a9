//! Registry of embedded package objects.
//!
//! Everything in a package that is not one of the main parts is an embedded
//! object: pictures, OLE replacement graphics, and sub-documents such as
//! embedded charts (a directory holding its own `content.xml`). Entries can be
//! taken out or disposed once the image converter has consumed them.

use std::collections::{BTreeMap, HashMap};

/// Strip leading `./` and `/` from a package path
pub fn normalize_path(path: &str) -> String {
    let mut path = path;
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            break;
        }
    }
    path.to_string()
}

/// What an embedded object holds
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedKind {
    /// Sub-document directory; the map holds its files by relative path
    Xml(BTreeMap<String, Vec<u8>>),
    /// Plain binary resource
    Binary(Vec<u8>),
}

/// One embedded object
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedObject {
    /// Normalized package path
    pub name: String,
    /// Media type declared in the manifest, if non-empty
    pub media_type: Option<String>,
    /// Content
    pub kind: EmbeddedKind,
}

impl EmbeddedObject {
    /// Whether this is an XML sub-document
    pub fn is_xml(&self) -> bool {
        matches!(self.kind, EmbeddedKind::Xml(_))
    }

    /// Bytes of a binary object
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            EmbeddedKind::Binary(bytes) => Some(bytes),
            EmbeddedKind::Xml(_) => None,
        }
    }

    /// A file of an XML sub-document
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        match &self.kind {
            EmbeddedKind::Xml(files) => files.get(name).map(Vec::as_slice),
            EmbeddedKind::Binary(_) => None,
        }
    }
}

/// Embedded objects keyed by normalized package path
#[derive(Debug, Clone, Default)]
pub struct EmbeddedObjects {
    objects: HashMap<String, EmbeddedObject>,
}

impl EmbeddedObjects {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the non-main entries of a package.
    ///
    /// Entries below a directory that contains a `content.xml` are grouped into
    /// one XML object named after the directory.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<u8>)>,
        media_type: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let entries: Vec<(String, Vec<u8>)> = entries
            .into_iter()
            .map(|(path, bytes)| (normalize_path(&path), bytes))
            .collect();
        let sub_documents: Vec<String> = entries
            .iter()
            .filter_map(|(path, _)| path.strip_suffix("/content.xml").map(str::to_string))
            .collect();

        let mut registry = Self::new();
        for (path, bytes) in entries {
            let owner = sub_documents
                .iter()
                .filter(|dir| path.starts_with(&format!("{}/", dir)))
                .max_by_key(|dir| dir.len());
            match owner {
                Some(dir) => {
                    let relative = path[dir.len() + 1..].to_string();
                    let object = registry
                        .objects
                        .entry(dir.clone())
                        .or_insert_with(|| EmbeddedObject {
                            name: dir.clone(),
                            media_type: media_type(dir),
                            kind: EmbeddedKind::Xml(BTreeMap::new()),
                        });
                    if let EmbeddedKind::Xml(files) = &mut object.kind {
                        files.insert(relative, bytes);
                    }
                },
                None => {
                    let media_type = media_type(&path);
                    registry.insert(EmbeddedObject {
                        name: path,
                        media_type,
                        kind: EmbeddedKind::Binary(bytes),
                    });
                },
            }
        }
        registry
    }

    /// Add or replace an object
    pub fn insert(&mut self, object: EmbeddedObject) {
        self.objects.insert(object.name.clone(), object);
    }

    /// Object at a package path
    pub fn get(&self, path: &str) -> Option<&EmbeddedObject> {
        self.objects.get(&normalize_path(path))
    }

    /// Whether an object exists at a package path
    pub fn contains(&self, path: &str) -> bool {
        self.objects.contains_key(&normalize_path(path))
    }

    /// Remove an object and hand it to the caller
    pub fn take(&mut self, path: &str) -> Option<EmbeddedObject> {
        self.objects.remove(&normalize_path(path))
    }

    /// Remove an object, freeing its memory
    pub fn dispose(&mut self, path: &str) {
        if self.take(path).is_some() {
            log::debug!("Disposed embedded object '{}'", path);
        }
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}
