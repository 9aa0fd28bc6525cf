mod table;

use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Artist, Entity, EntityKind, Label, Master, Release, ReleaseArtist};
use crate::parser::{find_dump, parse_file};
use crate::ui;
use crate::utils::{entities_per_second, format_duration};
use std::path::Path;
use std::time::Instant;
use table::TableWriter;
use tracing::{info, warn};

/// Exports each requested entity kind from its dump file into CSV tables.
///
/// Kinds are processed sequentially, each owning its own stream; the runs
/// share no state (two kinds could equally be exported by two independent
/// processes).
pub fn export_entities(config: &ResolvedConfig, kinds: &[EntityKind]) -> AppResult<()> {
    std::fs::create_dir_all(&config.csv_dir)
        .map_err(|e| AppError::IoError(format!("Failed to create CSV directory: {e}")))?;

    for kind in kinds {
        export_one(config, *kind)?;
    }
    Ok(())
}

/// Streams one dump into its table set. Returns the number of exported records.
pub fn export_one(config: &ResolvedConfig, kind: EntityKind) -> AppResult<u64> {
    let dump_path = find_dump(&config.input_dir, kind)?;
    info!(
        entity = kind.display_name(),
        dump = %dump_path.display(),
        compress = config.compress,
        "Starting export"
    );

    let stream = parse_file(&dump_path, kind)?;
    let mut tables = EntityTables::create(kind, &config.csv_dir, config)?;
    let pb = ui::create_spinner(&format!("Exporting {}", kind.display_name()))?;
    let started = Instant::now();

    let mut exported = 0u64;
    let mut skipped = 0u64;
    for entity in stream {
        let entity = entity?;
        if tables.write(&entity)? {
            exported += 1;
            pb.inc(1);
        } else {
            skipped += 1;
        }
        if config.limit != 0 && exported >= config.limit {
            info!(limit = config.limit, "Export limit reached");
            break;
        }
    }

    tables.finish()?;
    pb.finish_with_message(format!("Exported {exported} {}", kind.display_name()));

    if skipped > 0 {
        warn!(
            entity = kind.display_name(),
            skipped, "Records dropped by export validation"
        );
    }
    let elapsed = started.elapsed();
    info!(
        entity = kind.display_name(),
        exported,
        elapsed = %format_duration(elapsed),
        rate = entities_per_second(exported, elapsed),
        "Export completed"
    );
    Ok(exported)
}

/// The open table set for one entity kind.
enum EntityTables {
    Artist(ArtistTables),
    Label(LabelTables),
    Master(MasterTables),
    Release(ReleaseTables),
}

impl EntityTables {
    fn create(kind: EntityKind, dir: &Path, config: &ResolvedConfig) -> AppResult<Self> {
        let open = |name: &str, columns: &'static [&'static str]| {
            TableWriter::create(dir, name, columns, config.batch_size, config.compress)
        };
        Ok(match kind {
            EntityKind::Artist => Self::Artist(ArtistTables::create(&open)?),
            EntityKind::Label => Self::Label(LabelTables::create(&open)?),
            EntityKind::Master => Self::Master(MasterTables::create(&open)?),
            EntityKind::Release => Self::Release(ReleaseTables::create(&open)?),
        })
    }

    /// Writes one record into its tables. Returns false when export
    /// validation drops the record.
    fn write(&mut self, entity: &Entity) -> AppResult<bool> {
        match (self, entity) {
            (Self::Artist(tables), Entity::Artist(artist)) => tables.write(artist),
            (Self::Label(tables), Entity::Label(label)) => tables.write(label),
            (Self::Master(tables), Entity::Master(master)) => tables.write(master),
            (Self::Release(tables), Entity::Release(release)) => tables.write(release),
            _ => Err(AppError::InvalidInput(
                "Entity kind does not match the open table set".into(),
            )),
        }
    }

    fn finish(self) -> AppResult<()> {
        match self {
            Self::Artist(tables) => tables.finish(),
            Self::Label(tables) => tables.finish(),
            Self::Master(tables) => tables.finish(),
            Self::Release(tables) => tables.finish(),
        }
    }
}

fn int_cell(value: Option<i64>) -> Option<String> {
    value.map(|v| v.to_string())
}

fn bool_cell(value: bool) -> Option<String> {
    Some(value.to_string())
}

type OpenFn<'a> = dyn Fn(&str, &'static [&'static str]) -> AppResult<TableWriter> + 'a;

struct ArtistTables {
    artist: TableWriter,
    alias: TableWriter,
    namevariation: TableWriter,
    url: TableWriter,
    member: TableWriter,
}

impl ArtistTables {
    fn create(open: &OpenFn) -> AppResult<Self> {
        Ok(Self {
            artist: open(
                "artist.csv",
                &["id", "name", "realname", "profile", "data_quality"],
            )?,
            alias: open("artist_alias.csv", &["artist_id", "alias"])?,
            namevariation: open("artist_namevariation.csv", &["artist_id", "namevariation"])?,
            url: open("artist_url.csv", &["artist_id", "url"])?,
            member: open(
                "group_member.csv",
                &["group_artist_id", "member_id", "member_name"],
            )?,
        })
    }

    fn write(&mut self, artist: &Artist) -> AppResult<bool> {
        let id = artist.id.to_string();
        // An artist without a name gets a placeholder instead of being dropped.
        let name = match artist.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("[artist #{}]", artist.id),
        };
        self.artist.push(vec![
            Some(id.clone()),
            Some(name),
            artist.realname.clone(),
            artist.profile.clone(),
            artist.data_quality.clone(),
        ])?;

        for alias in artist.aliases.iter().filter(|v| !v.is_empty()) {
            self.alias
                .push(vec![Some(id.clone()), Some(alias.clone())])?;
        }
        for variation in artist.namevariations.iter().filter(|v| !v.is_empty()) {
            self.namevariation
                .push(vec![Some(id.clone()), Some(variation.clone())])?;
        }
        for url in artist.urls.iter().filter(|v| !v.is_empty()) {
            self.url.push(vec![Some(id.clone()), Some(url.clone())])?;
        }
        for member in &artist.members {
            self.member.push(vec![
                Some(id.clone()),
                Some(member.id.to_string()),
                member.name.clone(),
            ])?;
        }
        Ok(true)
    }

    fn finish(self) -> AppResult<()> {
        self.artist.finish()?;
        self.alias.finish()?;
        self.namevariation.finish()?;
        self.url.finish()?;
        self.member.finish()
    }
}

struct LabelTables {
    label: TableWriter,
    url: TableWriter,
}

impl LabelTables {
    fn create(open: &OpenFn) -> AppResult<Self> {
        Ok(Self {
            label: open(
                "label.csv",
                &[
                    "id",
                    "name",
                    "contactinfo",
                    "profile",
                    "parent_label",
                    "data_quality",
                ],
            )?,
            url: open("label_url.csv", &["label_id", "url"])?,
        })
    }

    fn write(&mut self, label: &Label) -> AppResult<bool> {
        // A label without a name is unusable as a table row; drop it.
        if label.name.as_deref().map_or(true, str::is_empty) {
            return Ok(false);
        }
        let id = label.id.to_string();
        self.label.push(vec![
            Some(id.clone()),
            label.name.clone(),
            label.contactinfo.clone(),
            label.profile.clone(),
            label.parent_label.clone(),
            label.data_quality.clone(),
        ])?;
        for url in label.urls.iter().filter(|v| !v.is_empty()) {
            self.url.push(vec![Some(id.clone()), Some(url.clone())])?;
        }
        Ok(true)
    }

    fn finish(self) -> AppResult<()> {
        self.label.finish()?;
        self.url.finish()
    }
}

struct MasterTables {
    master: TableWriter,
    artist: TableWriter,
    video: TableWriter,
    genre: TableWriter,
    style: TableWriter,
}

impl MasterTables {
    fn create(open: &OpenFn) -> AppResult<Self> {
        Ok(Self {
            master: open(
                "master.csv",
                &["id", "title", "year", "main_release", "data_quality"],
            )?,
            artist: open(
                "master_artist.csv",
                &["master_id", "artist_id", "anv", "join", "role"],
            )?,
            video: open(
                "master_video.csv",
                &["master_id", "duration", "title", "description", "src"],
            )?,
            genre: open("master_genre.csv", &["master_id", "genre"])?,
            style: open("master_style.csv", &["master_id", "style"])?,
        })
    }

    fn write(&mut self, master: &Master) -> AppResult<bool> {
        let id = master.id.to_string();
        self.master.push(vec![
            Some(id.clone()),
            master.title.clone(),
            int_cell(master.year),
            int_cell(master.main_release),
            master.data_quality.clone(),
        ])?;

        for credit in &master.artists {
            self.artist.push(vec![
                Some(id.clone()),
                int_cell(credit.id),
                credit.anv.clone(),
                credit.join.clone(),
                credit.role.clone(),
            ])?;
        }
        for video in &master.videos {
            self.video.push(vec![
                Some(id.clone()),
                int_cell(video.duration),
                video.title.clone(),
                video.description.clone(),
                video.src.clone(),
            ])?;
        }
        for genre in master.genres.iter().filter(|v| !v.is_empty()) {
            self.genre.push(vec![Some(id.clone()), Some(genre.clone())])?;
        }
        for style in master.styles.iter().filter(|v| !v.is_empty()) {
            self.style.push(vec![Some(id.clone()), Some(style.clone())])?;
        }
        Ok(true)
    }

    fn finish(self) -> AppResult<()> {
        self.master.finish()?;
        self.artist.finish()?;
        self.video.finish()?;
        self.genre.finish()?;
        self.style.finish()
    }
}

struct ReleaseTables {
    release: TableWriter,
    artist: TableWriter,
    label: TableWriter,
    genre: TableWriter,
    style: TableWriter,
    video: TableWriter,
    format: TableWriter,
    track: TableWriter,
    track_artist: TableWriter,
    identifier: TableWriter,
    company: TableWriter,
}

impl ReleaseTables {
    fn create(open: &OpenFn) -> AppResult<Self> {
        Ok(Self {
            release: open(
                "release.csv",
                &[
                    "id",
                    "title",
                    "released",
                    "country",
                    "notes",
                    "data_quality",
                    "master_id",
                ],
            )?,
            artist: open(
                "release_artist.csv",
                &["release_id", "artist_id", "extra", "anv", "join", "role"],
            )?,
            label: open("release_label.csv", &["release_id", "name", "catno"])?,
            genre: open("release_genre.csv", &["release_id", "genre"])?,
            style: open("release_style.csv", &["release_id", "style"])?,
            video: open(
                "release_video.csv",
                &["release_id", "duration", "title", "description", "src"],
            )?,
            format: open(
                "release_format.csv",
                &["release_id", "name", "qty", "text", "descriptions"],
            )?,
            track: open(
                "release_track.csv",
                &["release_id", "sequence", "position", "title", "duration"],
            )?,
            track_artist: open(
                "release_track_artist.csv",
                &[
                    "release_id",
                    "track_sequence",
                    "artist_id",
                    "extra",
                    "anv",
                    "join",
                    "role",
                ],
            )?,
            identifier: open(
                "release_identifier.csv",
                &["release_id", "description", "type", "value"],
            )?,
            company: open(
                "release_company.csv",
                &[
                    "release_id",
                    "company_id",
                    "name",
                    "entity_type",
                    "entity_type_name",
                    "catno",
                    "resource_url",
                ],
            )?,
        })
    }

    fn push_artist_row(
        writer: &mut TableWriter,
        head: Vec<Option<String>>,
        credit: &ReleaseArtist,
    ) -> AppResult<()> {
        let mut row = head;
        row.extend([
            int_cell(credit.id),
            bool_cell(credit.extra),
            credit.anv.clone(),
            credit.join.clone(),
            credit.role.clone(),
        ]);
        writer.push(row)
    }

    fn write(&mut self, release: &Release) -> AppResult<bool> {
        let id = release.id.to_string();
        self.release.push(vec![
            Some(id.clone()),
            release.title.clone(),
            release.released.clone(),
            release.country.clone(),
            release.notes.clone(),
            release.data_quality.clone(),
            int_cell(release.master_id),
        ])?;

        for credit in &release.artists {
            Self::push_artist_row(&mut self.artist, vec![Some(id.clone())], credit)?;
        }
        for label in &release.labels {
            self.label.push(vec![
                Some(id.clone()),
                label.name.clone(),
                label.catno.clone(),
            ])?;
        }
        for genre in release.genres.iter().filter(|v| !v.is_empty()) {
            self.genre.push(vec![Some(id.clone()), Some(genre.clone())])?;
        }
        for style in release.styles.iter().filter(|v| !v.is_empty()) {
            self.style.push(vec![Some(id.clone()), Some(style.clone())])?;
        }
        for video in &release.videos {
            self.video.push(vec![
                Some(id.clone()),
                int_cell(video.duration),
                video.title.clone(),
                video.description.clone(),
                video.src.clone(),
            ])?;
        }
        for format in &release.formats {
            self.format.push(vec![
                Some(id.clone()),
                format.name.clone(),
                int_cell(format.qty),
                format.text.clone(),
                Some(format.descriptions.join(";")),
            ])?;
        }
        for (index, track) in release.tracklist.iter().enumerate() {
            let sequence = (index + 1).to_string();
            self.track.push(vec![
                Some(id.clone()),
                Some(sequence.clone()),
                track.position.clone(),
                track.title.clone(),
                track.duration.clone(),
            ])?;
            for credit in track.artists.iter().chain(track.extraartists.iter()) {
                Self::push_artist_row(
                    &mut self.track_artist,
                    vec![Some(id.clone()), Some(sequence.clone())],
                    credit,
                )?;
            }
        }
        for identifier in &release.identifiers {
            self.identifier.push(vec![
                Some(id.clone()),
                identifier.description.clone(),
                identifier.identifier_type.clone(),
                identifier.value.clone(),
            ])?;
        }
        for company in &release.companies {
            self.company.push(vec![
                Some(id.clone()),
                int_cell(company.id),
                company.name.clone(),
                int_cell(company.entity_type),
                company.entity_type_name.clone(),
                company.catno.clone(),
                company.resource_url.clone(),
            ])?;
        }
        Ok(true)
    }

    fn finish(self) -> AppResult<()> {
        self.release.finish()?;
        self.artist.finish()?;
        self.label.finish()?;
        self.genre.finish()?;
        self.style.finish()?;
        self.video.finish()?;
        self.format.finish()?;
        self.track.finish()?;
        self.track_artist.finish()?;
        self.identifier.finish()?;
        self.company.finish()
    }
}
