use crate::constants::*;
use crate::errors::{AppError, AppResult};

/// Kind of top-level entity found in a Discogs dump file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Artist,
    Label,
    Master,
    Release,
}

impl EntityKind {
    /// Returns the XML tag that wraps one entity of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Label => "label",
            Self::Master => "master",
            Self::Release => "release",
        }
    }

    /// Returns a human-readable name for the entity kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Artist => "Artists",
            Self::Label => "Labels",
            Self::Master => "Masters",
            Self::Release => "Releases",
        }
    }

    /// Returns the plural form used in dump file names (`discogs_<date>_artists.xml.gz`).
    pub fn dump_name(&self) -> &'static str {
        match self {
            Self::Artist => "artists",
            Self::Label => "labels",
            Self::Master => "masters",
            Self::Release => "releases",
        }
    }

    /// Resolves a CLI or TOML alias into an entity kind.
    ///
    /// Accepted aliases are the singular name, the plural name, and the first
    /// letter (e.g. `artist`, `artists`, `a`). Comparison is case-insensitive.
    pub fn from_alias(value: &str) -> AppResult<Self> {
        let lower = value.trim().to_lowercase();

        if ARTIST_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Artist)
        } else if LABEL_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Label)
        } else if MASTER_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Master)
        } else if RELEASE_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Release)
        } else {
            Err(AppError::InvalidInput(format!(
                "Unknown entity kind '{value}' (expected artist, label, master or release)"
            )))
        }
    }
}

/// One fully materialized record built from a single entity element.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Artist(Artist),
    Label(Label),
    Master(Master),
    Release(Release),
}

impl Entity {
    /// Returns the dump-wide id of the wrapped record.
    pub fn id(&self) -> i64 {
        match self {
            Self::Artist(a) => a.id,
            Self::Label(l) => l.id,
            Self::Master(m) => m.id,
            Self::Release(r) => r.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Artist(_) => EntityKind::Artist,
            Self::Label(_) => EntityKind::Label,
            Self::Master(_) => EntityKind::Master,
            Self::Release(_) => EntityKind::Release,
        }
    }
}

/// Artist entity. Id comes from the `<id>` child leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: i64,
    pub name: Option<String>,
    pub realname: Option<String>,
    pub profile: Option<String>,
    pub data_quality: Option<String>,
    pub aliases: Vec<String>,
    pub namevariations: Vec<String>,
    pub groups: Vec<String>,
    pub urls: Vec<String>,
    pub members: Vec<Member>,
}

impl Artist {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            realname: None,
            profile: None,
            data_quality: None,
            aliases: Vec::new(),
            namevariations: Vec::new(),
            groups: Vec::new(),
            urls: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// One member of a group artist, built from the flat alternating
/// `<id>`/`<name>` leaf sequence inside `<members>`. A trailing id without a
/// matching name keeps `name: None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: Option<String>,
}

/// Label entity. Id comes from the `<id>` child leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: i64,
    pub name: Option<String>,
    pub contactinfo: Option<String>,
    pub profile: Option<String>,
    pub parent_label: Option<String>,
    pub data_quality: Option<String>,
    pub sublabels: Vec<String>,
    pub urls: Vec<String>,
    pub images: Vec<ImageInfo>,
}

impl Label {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            contactinfo: None,
            profile: None,
            parent_label: None,
            data_quality: None,
            sublabels: Vec::new(),
            urls: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// Master entity. Id comes from the `id` attribute on the element itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Master {
    pub id: i64,
    pub main_release: Option<i64>,
    pub year: Option<i64>,
    pub title: Option<String>,
    pub data_quality: Option<String>,
    pub notes: Option<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub images: Vec<ImageInfo>,
    pub artists: Vec<MasterArtist>,
    pub videos: Vec<Video>,
}

impl Master {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            main_release: None,
            year: None,
            title: None,
            data_quality: None,
            notes: None,
            genres: Vec::new(),
            styles: Vec::new(),
            images: Vec::new(),
            artists: Vec::new(),
            videos: Vec::new(),
        }
    }
}

/// Release entity. Id comes from the `id` attribute on the element itself.
/// `master_id` is passed through unresolved; no cross-entity lookup happens.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub id: i64,
    pub master_id: Option<i64>,
    pub title: Option<String>,
    pub country: Option<String>,
    pub released: Option<String>,
    pub notes: Option<String>,
    pub data_quality: Option<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub images: Vec<ImageInfo>,
    pub artists: Vec<ReleaseArtist>,
    pub labels: Vec<ReleaseLabel>,
    pub videos: Vec<Video>,
    pub formats: Vec<ReleaseFormat>,
    pub tracklist: Vec<ReleaseTrack>,
    pub identifiers: Vec<ReleaseIdentifier>,
    pub companies: Vec<ReleaseCompany>,
}

impl Release {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            master_id: None,
            title: None,
            country: None,
            released: None,
            notes: None,
            data_quality: None,
            genres: Vec::new(),
            styles: Vec::new(),
            images: Vec::new(),
            artists: Vec::new(),
            labels: Vec::new(),
            videos: Vec::new(),
            formats: Vec::new(),
            tracklist: Vec::new(),
            identifiers: Vec::new(),
            companies: Vec::new(),
        }
    }
}

/// Image metadata carried as an opaque attribute bag (type, uri, width, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageInfo {
    pub attributes: Vec<(String, String)>,
}

impl ImageInfo {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Artist credit on a master.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterArtist {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub anv: Option<String>,
    pub join: Option<String>,
    pub role: Option<String>,
}

/// Artist credit on a release or a single track. `extra` is true when the
/// credit came from an `<extraartists>` container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseArtist {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub anv: Option<String>,
    pub join: Option<String>,
    pub role: Option<String>,
    pub extra: bool,
}

/// Embedded video link on a master or release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Video {
    pub duration: Option<i64>,
    pub src: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseLabel {
    pub name: Option<String>,
    pub catno: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseFormat {
    pub name: Option<String>,
    pub qty: Option<i64>,
    pub text: Option<String>,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseTrack {
    pub position: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
    pub artists: Vec<ReleaseArtist>,
    pub extraartists: Vec<ReleaseArtist>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseIdentifier {
    pub description: Option<String>,
    pub identifier_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseCompany {
    pub id: Option<i64>,
    pub entity_type: Option<i64>,
    pub name: Option<String>,
    pub entity_type_name: Option<String>,
    pub catno: Option<String>,
    pub resource_url: Option<String>,
}
