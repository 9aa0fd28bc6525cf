use super::artist::build_artist;
use super::element::{Element, SubtreeCapture};
use super::label::build_label;
use super::master::build_master;
use super::release::build_release;
use crate::errors::{AppError, AppResult};
use crate::models::{Entity, EntityKind};
use flate2::read::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Where an entity element carries its id.
///
/// Artists and labels keep it in an `<id>` child leaf; masters and releases
/// carry it as an attribute on the element itself. This is the only variation
/// point between entity kinds at the event-source layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    ChildLeaf,
    Attribute,
}

impl IdSource {
    /// Extracts the entity id from a completed element.
    ///
    /// Returns `Ok(None)` when the id is absent entirely (the element is then
    /// skipped, not an error). A present but non-numeric id aborts the stream.
    pub fn extract(&self, element: &Element) -> AppResult<Option<i64>> {
        let raw = match self {
            Self::ChildLeaf => element
                .child("id")
                .map(|c| c.text.as_deref().unwrap_or("")),
            Self::Attribute => element.attr("id"),
        };
        match raw {
            Some(text) => super::common::int_field("id", text).map(Some),
            None => Ok(None),
        }
    }
}

impl EntityKind {
    /// Returns the id-extraction policy for this entity kind.
    pub fn id_source(&self) -> IdSource {
        match self {
            Self::Artist | Self::Label => IdSource::ChildLeaf,
            Self::Master | Self::Release => IdSource::Attribute,
        }
    }
}

/// Lazy, single-pass stream of entity records over a Discogs dump.
///
/// Pull-based: each `next()` advances the underlying byte stream exactly far
/// enough to assemble one entity and then suspends. Between entities nothing
/// is retained beyond the reader itself — the event buffer is cleared after
/// every event and the captured subtree is dropped right after its record is
/// built, so resident memory stays bounded by one entity's subtree no matter
/// how many entities the dump contains.
///
/// The stream is not restartable; dropping it releases the underlying handle.
pub struct EntityStream<R: BufRead> {
    reader: Reader<R>,
    kind: EntityKind,
    buf: Vec<u8>,
    capture: SubtreeCapture,
    finished: bool,
}

impl<R: BufRead> EntityStream<R> {
    pub fn new(reader: R, kind: EntityKind) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);
        Self {
            reader: xml_reader,
            kind,
            buf: Vec::with_capacity(8192),
            capture: SubtreeCapture::new(),
            finished: false,
        }
    }

    /// Nodes currently held for the in-flight entity. Zero between entities.
    pub fn resident_nodes(&self) -> usize {
        self.capture.resident_nodes()
    }

    fn is_entity_tag(kind: EntityKind, e: &BytesStart) -> bool {
        e.name().as_ref() == kind.tag().as_bytes()
    }

    /// Builds the typed record for a completed entity element.
    ///
    /// The subtree is consumed and dropped on return — build first, reclaim
    /// right after, never the reverse. `Ok(None)` means the element had no
    /// resolvable id and is excluded from the output.
    fn materialize(&self, element: Element) -> AppResult<Option<Entity>> {
        let id = match self.kind.id_source().extract(&element)? {
            Some(id) => id,
            None => return Ok(None),
        };
        let entity = match self.kind {
            EntityKind::Artist => Entity::Artist(build_artist(id, &element)?),
            EntityKind::Label => Entity::Label(build_label(id, &element)?),
            EntityKind::Master => Entity::Master(build_master(id, &element)?),
            EntityKind::Release => Entity::Release(build_release(id, &element)?),
        };
        Ok(Some(entity))
    }

    fn fail(&mut self, err: AppError) -> Option<AppResult<Entity>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for EntityStream<R> {
    type Item = AppResult<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => return self.fail(e.into()),
            };

            match event {
                Event::Start(e) => {
                    if self.capture.is_active() || Self::is_entity_tag(self.kind, &e) {
                        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        let attributes = match owned_attributes(&e) {
                            Ok(attrs) => attrs,
                            Err(err) => return self.fail(err),
                        };
                        self.capture.start(tag, attributes);
                    }
                    // Anything else is document skeleton (the root container);
                    // nothing of it is retained.
                }
                Event::Empty(e) => {
                    if self.capture.is_active() || Self::is_entity_tag(self.kind, &e) {
                        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        let attributes = match owned_attributes(&e) {
                            Ok(attrs) => attrs,
                            Err(err) => return self.fail(err),
                        };
                        if let Some(element) = self.capture.empty(tag, attributes) {
                            match self.materialize(element) {
                                Ok(Some(entity)) => return Some(Ok(entity)),
                                Ok(None) => {}
                                Err(err) => return self.fail(err),
                            }
                        }
                    }
                }
                Event::Text(e) => {
                    if self.capture.is_active() {
                        let text = match e.unescape() {
                            Ok(text) => text,
                            Err(err) => {
                                return self.fail(AppError::ParseError(format!(
                                    "Failed to decode XML text: {err}"
                                )))
                            }
                        };
                        self.capture.text(&text);
                    }
                }
                Event::CData(e) => {
                    if self.capture.is_active() {
                        let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                        self.capture.text(&text);
                    }
                }
                Event::End(_) => {
                    if let Some(element) = self.capture.end() {
                        match self.materialize(element) {
                            Ok(Some(entity)) => return Some(Ok(entity)),
                            Ok(None) => {}
                            Err(err) => return self.fail(err),
                        }
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

fn owned_attributes(e: &BytesStart) -> AppResult<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| AppError::ParseError(format!("Malformed attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| AppError::ParseError(format!("Failed to decode attribute: {err}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Produces the lazy entity stream for one dump.
pub fn parse<R: BufRead>(reader: R, kind: EntityKind) -> EntityStream<R> {
    EntityStream::new(reader, kind)
}

/// Opens a dump file as a decompressed byte stream.
///
/// `.gz` files are wrapped in a gzip decoder, anything else is read as plain
/// XML. The handle is released when the returned reader (or the stream built
/// on it) is dropped, on every exit path.
pub fn open_dump(path: &Path) -> AppResult<Box<dyn BufRead>> {
    let file = File::open(path)
        .map_err(|e| AppError::IoError(format!("Failed to open dump {path:?}: {e}")))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(BufReader::new(
            file,
        )))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Opens a dump file and returns the entity stream over it.
pub fn parse_file(path: &Path, kind: EntityKind) -> AppResult<EntityStream<Box<dyn BufRead>>> {
    Ok(EntityStream::new(open_dump(path)?, kind))
}
