use super::common::{build_images, build_videos, child_artist_fields, int_text};
use super::element::Element;
use crate::errors::AppResult;
use crate::models::{Master, MasterArtist};

/// Builds a master record from its entity element.
///
/// Int scalars {main_release, year}, text scalars {title, data_quality,
/// notes}, text lists {genres, styles}, structured lists {images, artists,
/// videos}.
pub(crate) fn build_master(id: i64, element: &Element) -> AppResult<Master> {
    let mut master = Master::new(id);
    for child in &element.children {
        match child.tag.as_str() {
            "main_release" => master.main_release = Some(int_text("main_release", child)?),
            "year" => master.year = Some(int_text("year", child)?),
            "title" => master.title = child.text.clone(),
            "data_quality" => master.data_quality = child.text.clone(),
            "notes" => master.notes = child.text.clone(),
            "genres" => master.genres = child.children_text(),
            "styles" => master.styles = child.children_text(),
            "images" => master.images = build_images(child),
            "artists" => master.artists = build_master_artists(child)?,
            "videos" => master.videos = build_videos(child)?,
            _ => {}
        }
    }
    Ok(master)
}

fn build_master_artists(element: &Element) -> AppResult<Vec<MasterArtist>> {
    let mut artists = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let mut artist = MasterArtist::default();
        let fields = child_artist_fields(child)?;
        artist.id = fields.id;
        artist.name = fields.name;
        artist.anv = fields.anv;
        artist.join = fields.join;
        artist.role = fields.role;
        artists.push(artist);
    }
    Ok(artists)
}
