// Entity aliases accepted on the command line and in TOML configs
pub const ARTIST_ALIASES: &[&str] = &["artist", "artists", "a"];
pub const LABEL_ALIASES: &[&str] = &["label", "labels", "l"];
pub const MASTER_ALIASES: &[&str] = &["master", "masters", "m"];
pub const RELEASE_ALIASES: &[&str] = &["release", "releases", "r"];

// Dump file naming, e.g. discogs_20230801_artists.xml.gz
pub const DUMP_FILE_PATTERN: &str = r"^discogs_\d+_(artists|labels|masters|releases)\.xml(\.gz)?$";

// Entity help text
pub const ENTITY_HELP_TEXT: &str =
    "Entity kind: 'artist' (a), 'label' (l), 'master' (m) or 'release' (r)";
