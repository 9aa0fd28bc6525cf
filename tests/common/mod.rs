//! Common test utilities for integration tests

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Helper function to create a plain XML dump file
#[allow(dead_code)]
pub fn create_test_xml_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Helper function to create a gzip-compressed XML dump file
#[allow(dead_code)]
pub fn create_test_gz_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// Sample artists dump covering scalars, lists and the members grouping
#[allow(dead_code)]
pub const SAMPLE_ARTISTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<artists>
  <artist>
    <id>1</id>
    <name>Test</name>
    <realname>Test Realname</realname>
    <data_quality>Correct</data_quality>
    <aliases>
      <name>Alias1</name>
    </aliases>
    <urls>
      <url>http://example.com/test</url>
    </urls>
  </artist>
  <artist>
    <id>2</id>
    <name>The Group</name>
    <members>
      <id>26</id>
      <name>Alexi Delano</name>
      <id>27</id>
      <name>Cari Lekebusch</name>
    </members>
  </artist>
  <artist>
    <name>No Id Artist</name>
  </artist>
</artists>"#;

/// Sample labels dump; the second label has no name
#[allow(dead_code)]
pub const SAMPLE_LABELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<labels>
  <label>
    <id>10</id>
    <name>Acme Records</name>
    <parentLabel>Acme Group</parentLabel>
    <urls>
      <url>http://acme.example.com</url>
    </urls>
    <sublabels>
      <label>Acme Dub</label>
    </sublabels>
  </label>
  <label>
    <id>11</id>
    <profile>Nameless label</profile>
  </label>
</labels>"#;

/// Sample masters dump with attribute ids, artist credits and videos
#[allow(dead_code)]
pub const SAMPLE_MASTERS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<masters>
  <master id="99">
    <main_release>5</main_release>
  </master>
  <master id="100">
    <main_release>155102</main_release>
    <year>1998</year>
    <title>New Soil</title>
    <genres>
      <genre>Electronic</genre>
    </genres>
    <styles>
      <style>Techno</style>
    </styles>
    <artists>
      <artist>
        <id>21</id>
        <name>Some Artist</name>
        <role>Producer</role>
      </artist>
    </artists>
    <videos>
      <video duration="380" src="https://example.com/v">
        <title>Some Video</title>
        <description>Live set</description>
      </video>
    </videos>
  </master>
</masters>"#;

/// Sample releases dump exercising every structured list
#[allow(dead_code)]
pub const SAMPLE_RELEASES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<releases>
  <release id="1">
    <title>Stockholm</title>
    <country>Sweden</country>
    <released>1999-03-00</released>
    <data_quality>Complete and Correct</data_quality>
    <master_id>5427</master_id>
    <artists>
      <artist>
        <id>1</id>
        <name>Main Artist</name>
      </artist>
    </artists>
    <extraartists>
      <artist>
        <id>2</id>
        <name>Remixer</name>
        <role>Remix</role>
      </artist>
    </extraartists>
    <labels>
      <label catno="ABC-1" name="Acme"/>
    </labels>
    <genres>
      <genre>Electronic</genre>
    </genres>
    <styles>
      <style>Deep House</style>
    </styles>
    <formats>
      <format name="Vinyl" qty="2" text="">
        <descriptions>
          <description>12"</description>
          <description>33 RPM</description>
        </descriptions>
      </format>
    </formats>
    <tracklist>
      <track>
        <position>A1</position>
        <title>Opening</title>
        <duration>6:33</duration>
        <artists>
          <artist>
            <id>10</id>
            <name>Performer</name>
          </artist>
        </artists>
        <extraartists>
          <artist>
            <id>11</id>
            <name>Producer</name>
            <role>Producer</role>
          </artist>
        </extraartists>
      </track>
      <track>
        <position>A2</position>
        <title>Closing</title>
        <duration>4:05</duration>
      </track>
    </tracklist>
    <identifiers>
      <identifier type="Barcode" value="7 2438-63563-2 8"/>
    </identifiers>
    <companies>
      <company>
        <id>271046</id>
        <entity_type>13</entity_type>
        <name>Pressing Plant</name>
        <entity_type_name>Pressed By</entity_type_name>
      </company>
    </companies>
    <videos>
      <video duration="300" src="https://example.com/r">
        <title>Release Video</title>
      </video>
    </videos>
  </release>
  <release>
    <title>No Id Release</title>
  </release>
</releases>"#;
