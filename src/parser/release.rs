use super::common::{attr_int, build_images, build_videos, child_artist_fields, int_text};
use super::element::Element;
use crate::errors::AppResult;
use crate::models::{
    Release, ReleaseArtist, ReleaseCompany, ReleaseFormat, ReleaseIdentifier, ReleaseLabel,
    ReleaseTrack,
};

/// Builds a release record from its entity element.
///
/// Int scalar {master_id}, text scalars {title, country, released, notes,
/// data_quality}, text lists {genres, styles}, structured lists {images,
/// artists, extraartists, labels, videos, formats, tracklist, identifiers,
/// companies}. Credits from `<extraartists>` get `extra: true`, both at
/// release level and inside each track.
pub(crate) fn build_release(id: i64, element: &Element) -> AppResult<Release> {
    let mut release = Release::new(id);
    for child in &element.children {
        match child.tag.as_str() {
            "master_id" => release.master_id = Some(int_text("master_id", child)?),
            "title" => release.title = child.text.clone(),
            "country" => release.country = child.text.clone(),
            "released" => release.released = child.text.clone(),
            "notes" => release.notes = child.text.clone(),
            "data_quality" => release.data_quality = child.text.clone(),
            "genres" => release.genres = child.children_text(),
            "styles" => release.styles = child.children_text(),
            "images" => release.images = build_images(child),
            "artists" => release
                .artists
                .extend(build_release_artists(child, false)?),
            "extraartists" => release.artists.extend(build_release_artists(child, true)?),
            "labels" => release.labels = build_labels(child),
            "videos" => release.videos = build_videos(child)?,
            "formats" => release.formats = build_formats(child)?,
            "tracklist" => release.tracklist = build_tracklist(child)?,
            "identifiers" => release.identifiers = build_identifiers(child),
            "companies" => release.companies = build_companies(child)?,
            _ => {}
        }
    }
    Ok(release)
}

/// Builds one artist credit per child, flagging extraartists credits.
fn build_release_artists(element: &Element, extra: bool) -> AppResult<Vec<ReleaseArtist>> {
    let mut artists = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let fields = child_artist_fields(child)?;
        artists.push(ReleaseArtist {
            id: fields.id,
            name: fields.name,
            anv: fields.anv,
            join: fields.join,
            role: fields.role,
            extra,
        });
    }
    Ok(artists)
}

/// Labels are attribute-only: `<label catno="ABC-1" name="Acme"/>`.
fn build_labels(element: &Element) -> Vec<ReleaseLabel> {
    element
        .children
        .iter()
        .map(|child| ReleaseLabel {
            name: child.attr("name").map(str::to_string),
            catno: child.attr("catno").map(str::to_string),
        })
        .collect()
}

/// qty/name/text come from attributes, descriptions from a nested text list.
fn build_formats(element: &Element) -> AppResult<Vec<ReleaseFormat>> {
    let mut formats = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let mut format = ReleaseFormat {
            name: child.attr("name").map(str::to_string),
            qty: attr_int(child, "qty")?,
            text: child.attr("text").map(str::to_string),
            descriptions: Vec::new(),
        };
        if let Some(descriptions) = child.child("descriptions") {
            format.descriptions = descriptions.children_text();
        }
        formats.push(format);
    }
    Ok(formats)
}

/// Tracks carry their own artist/extraartist credits with the same extra
/// flag semantics as the release-level containers.
fn build_tracklist(element: &Element) -> AppResult<Vec<ReleaseTrack>> {
    let mut tracks = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let mut track = ReleaseTrack::default();
        for leaf in &child.children {
            match leaf.tag.as_str() {
                "position" => track.position = leaf.text.clone(),
                "title" => track.title = leaf.text.clone(),
                "duration" => track.duration = leaf.text.clone(),
                "artists" => track.artists = build_release_artists(leaf, false)?,
                "extraartists" => track.extraartists = build_release_artists(leaf, true)?,
                _ => {}
            }
        }
        tracks.push(track);
    }
    Ok(tracks)
}

/// Identifiers are attribute-only: `<identifier type="Barcode" value="..."/>`.
fn build_identifiers(element: &Element) -> Vec<ReleaseIdentifier> {
    element
        .children
        .iter()
        .map(|child| ReleaseIdentifier {
            description: child.attr("description").map(str::to_string),
            identifier_type: child.attr("type").map(str::to_string),
            value: child.attr("value").map(str::to_string),
        })
        .collect()
}

/// Companies mix int children (id, entity_type) with text children.
fn build_companies(element: &Element) -> AppResult<Vec<ReleaseCompany>> {
    let mut companies = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let mut company = ReleaseCompany::default();
        for leaf in &child.children {
            match leaf.tag.as_str() {
                "id" => company.id = Some(int_text("id", leaf)?),
                "entity_type" => company.entity_type = Some(int_text("entity_type", leaf)?),
                "name" => company.name = leaf.text.clone(),
                "entity_type_name" => company.entity_type_name = leaf.text.clone(),
                "catno" => company.catno = leaf.text.clone(),
                "resource_url" => company.resource_url = leaf.text.clone(),
                _ => {}
            }
        }
        companies.push(company);
    }
    Ok(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> Element {
        let mut element = Element::new(tag.to_string(), Vec::new());
        element.text = Some(text.to_string());
        element
    }

    fn credit(id: &str, name: &str) -> Element {
        let mut element = Element::new("artist".to_string(), Vec::new());
        element.children.push(leaf("id", id));
        element.children.push(leaf("name", name));
        element
    }

    #[test]
    fn release_scalars_and_master_id() {
        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(leaf("title", "Stockholm"));
        element.children.push(leaf("country", "Sweden"));
        element.children.push(leaf("released", "1999-03-00"));
        element.children.push(leaf("master_id", "5427"));

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.title.as_deref(), Some("Stockholm"));
        assert_eq!(release.country.as_deref(), Some("Sweden"));
        assert_eq!(release.master_id, Some(5427));
        assert!(release.notes.is_none());
    }

    #[test]
    fn extra_flag_set_only_for_extraartists() {
        let mut artists = Element::new("artists".to_string(), Vec::new());
        artists.children.push(credit("1", "Main"));
        let mut extraartists = Element::new("extraartists".to_string(), Vec::new());
        extraartists.children.push(credit("2", "Remixer"));

        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(artists);
        element.children.push(extraartists);

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.artists.len(), 2);
        assert!(!release.artists[0].extra);
        assert!(release.artists[1].extra);
        assert_eq!(release.artists[1].name.as_deref(), Some("Remixer"));
    }

    #[test]
    fn labels_are_built_from_attributes_only() {
        let mut labels = Element::new("labels".to_string(), Vec::new());
        labels.children.push(Element::new(
            "label".to_string(),
            vec![
                ("catno".to_string(), "ABC-1".to_string()),
                ("name".to_string(), "Acme".to_string()),
            ],
        ));
        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(labels);

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.labels.len(), 1);
        assert_eq!(release.labels[0].name.as_deref(), Some("Acme"));
        assert_eq!(release.labels[0].catno.as_deref(), Some("ABC-1"));
    }

    #[test]
    fn formats_mix_attributes_and_nested_descriptions() {
        let mut formats = Element::new("formats".to_string(), Vec::new());
        let mut format = Element::new(
            "format".to_string(),
            vec![
                ("name".to_string(), "Vinyl".to_string()),
                ("qty".to_string(), "2".to_string()),
            ],
        );
        let mut descriptions = Element::new("descriptions".to_string(), Vec::new());
        descriptions.children.push(leaf("description", "12\""));
        descriptions.children.push(leaf("description", "33 RPM"));
        format.children.push(descriptions);
        formats.children.push(format);

        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(formats);

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.formats.len(), 1);
        assert_eq!(release.formats[0].name.as_deref(), Some("Vinyl"));
        assert_eq!(release.formats[0].qty, Some(2));
        assert_eq!(
            release.formats[0].descriptions,
            vec!["12\"".to_string(), "33 RPM".to_string()]
        );
    }

    #[test]
    fn track_level_credits_keep_extra_flag_semantics() {
        let mut track = Element::new("track".to_string(), Vec::new());
        track.children.push(leaf("position", "A1"));
        track.children.push(leaf("title", "Opening"));
        track.children.push(leaf("duration", "6:33"));
        let mut track_artists = Element::new("artists".to_string(), Vec::new());
        track_artists.children.push(credit("10", "Performer"));
        track.children.push(track_artists);
        let mut track_extra = Element::new("extraartists".to_string(), Vec::new());
        track_extra.children.push(credit("11", "Producer"));
        track.children.push(track_extra);

        let mut tracklist = Element::new("tracklist".to_string(), Vec::new());
        tracklist.children.push(track);
        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(tracklist);

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.tracklist.len(), 1);
        let track = &release.tracklist[0];
        assert_eq!(track.position.as_deref(), Some("A1"));
        assert_eq!(track.duration.as_deref(), Some("6:33"));
        assert_eq!(track.artists.len(), 1);
        assert!(!track.artists[0].extra);
        assert_eq!(track.extraartists.len(), 1);
        assert!(track.extraartists[0].extra);
    }

    #[test]
    fn identifiers_and_companies() {
        let mut identifiers = Element::new("identifiers".to_string(), Vec::new());
        identifiers.children.push(Element::new(
            "identifier".to_string(),
            vec![
                ("type".to_string(), "Barcode".to_string()),
                ("value".to_string(), "7 2438-63563-2 8".to_string()),
            ],
        ));

        let mut companies = Element::new("companies".to_string(), Vec::new());
        let mut company = Element::new("company".to_string(), Vec::new());
        company.children.push(leaf("id", "271046"));
        company.children.push(leaf("entity_type", "13"));
        company.children.push(leaf("name", "Pressing Plant"));
        companies.children.push(company);

        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(identifiers);
        element.children.push(companies);

        let release = build_release(1, &element).unwrap();
        assert_eq!(release.identifiers.len(), 1);
        assert_eq!(
            release.identifiers[0].identifier_type.as_deref(),
            Some("Barcode")
        );
        assert_eq!(release.companies.len(), 1);
        assert_eq!(release.companies[0].id, Some(271046));
        assert_eq!(release.companies[0].entity_type, Some(13));
        assert_eq!(release.companies[0].name.as_deref(), Some("Pressing Plant"));
    }

    #[test]
    fn malformed_qty_aborts_build() {
        let mut formats = Element::new("formats".to_string(), Vec::new());
        formats.children.push(Element::new(
            "format".to_string(),
            vec![("qty".to_string(), "two".to_string())],
        ));
        let mut element = Element::new("release".to_string(), Vec::new());
        element.children.push(formats);
        assert!(build_release(1, &element).is_err());
    }
}
