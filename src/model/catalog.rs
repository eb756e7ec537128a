//! Album catalog: the fixed, ordered item list the carousel cycles over

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Locator of an audio resource (a local file path)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackRef(PathBuf);

impl TrackRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A single album in the carousel
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub year: String,
    pub cover: String,
    pub track: Option<TrackRef>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog has no items")]
    Empty,
    #[error("duplicate item id {0}")]
    DuplicateId(u32),
}

#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<ItemRecord>,
    #[serde(default)]
    tracks: Vec<String>,
}

#[derive(Deserialize)]
struct ItemRecord {
    id: u32,
    title: String,
    #[serde(default)]
    artist: String,
    year: String,
    #[serde(default)]
    cover: String,
}

/// Non-empty, immutable, ordered list of items.
///
/// Order defines adjacency; index `len - 1` is adjacent to index `0`.
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate ids.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a JSON file.
    ///
    /// `tracks` is a list parallel to `items`; relative paths resolve against
    /// the catalog file's directory.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_json(&content, base).map_err(|e| match e {
            CatalogError::Parse { source, .. } => CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    fn from_json(content: &str, base: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        if !file.tracks.is_empty() && file.tracks.len() != file.items.len() {
            tracing::warn!(
                items = file.items.len(),
                tracks = file.tracks.len(),
                "Track list is not aligned with item list"
            );
        }

        let mut tracks = file.tracks.into_iter();
        let items = file
            .items
            .into_iter()
            .map(|record| {
                let track = tracks.next().map(|t| {
                    let p = PathBuf::from(t);
                    if p.is_relative() { TrackRef::new(base.join(p)) } else { TrackRef::new(p) }
                });
                Item {
                    id: record.id,
                    title: record.title,
                    artist: record.artist,
                    year: record.year,
                    cover: record.cover,
                    track,
                }
            })
            .collect();

        Self::new(items)
    }

    /// Full discography shown by the cover-flow preset. No audio.
    pub fn discography() -> Self {
        const ALBUMS: &[(&str, &str, &str)] = &[
            ("Born To Die", "2012", "photo-1493225457124-a3eb161ffa5f"),
            ("Ultraviolence", "2014", "photo-1518609878373-06d740f60d8b"),
            ("Honeymoon", "2015", "photo-1470225620780-dba8ba36b745"),
            ("Lust For Life", "2017", "photo-1459749411175-04bf5292ceea"),
            ("Norman Fucking Rockwell!", "2019", "photo-1571974599782-87624638275b"),
            ("Chemtrails Over The Country Club", "2021", "photo-1614149162883-504ce4d13909"),
            ("Blue Banisters", "2021", "photo-1506905925346-21bda4d32df4"),
            (
                "Did you know that there's a tunnel under Ocean Blvd",
                "2023",
                "photo-1508700115892-45ecd05ae2ad",
            ),
        ];
        Self::builtin(ALBUMS, |_| None)
    }

    /// Short collection with one track per album, used by the now-playing preset.
    pub fn now_playing() -> Self {
        const ALBUMS: &[(&str, &str, &str)] = &[
            ("Born To Die", "2012", "photo-1493225457124-a3eb161ffa5f"),
            ("Ultraviolence", "2014", "photo-1518609878373-06d740f60d8b"),
            ("Honeymoon", "2015", "photo-1470225620780-dba8ba36b745"),
            ("Norman F. Rockwell!", "2019", "photo-1571974599782-87624638275b"),
            ("Ocean Blvd", "2023", "photo-1508700115892-45ecd05ae2ad"),
        ];
        Self::builtin(ALBUMS, |i| Some(TrackRef::new(format!("songs/album_{}.mp3", i + 1))))
    }

    fn builtin(albums: &[(&str, &str, &str)], track: impl Fn(usize) -> Option<TrackRef>) -> Self {
        let items = albums
            .iter()
            .enumerate()
            .map(|(i, (title, year, photo))| Item {
                id: i as u32 + 1,
                title: title.to_string(),
                artist: "Lana Del Rey".to_string(),
                year: year.to_string(),
                cover: format!(
                    "https://images.unsplash.com/{photo}?w=400&h=400&fit=crop&crop=center"
                ),
                track: track(i),
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn track_at(&self, index: usize) -> Option<&TrackRef> {
        self.items.get(index).and_then(|item| item.track.as_ref())
    }

    pub fn has_tracks(&self) -> bool {
        self.items.iter().any(|item| item.track.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32) -> Item {
        Item {
            id,
            title: format!("Album {id}"),
            artist: String::new(),
            year: "2020".to_string(),
            cover: String::new(),
            track: None,
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_ids() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::new(vec![item(1), item(2), item(1)]),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn builtin_catalogs_are_valid() {
        let discography = Catalog::discography();
        assert_eq!(discography.len(), 8);
        assert!(!discography.has_tracks());
        assert!(Catalog::new(discography.items().to_vec()).is_ok());

        let now_playing = Catalog::now_playing();
        assert_eq!(now_playing.len(), 5);
        assert_eq!(
            now_playing.track_at(4),
            Some(&TrackRef::new("songs/album_5.mp3"))
        );
    }

    #[test]
    fn parses_tracks_relative_to_catalog_dir() {
        let json = r#"{
            "items": [
                {"id": 1, "title": "A", "year": "2012"},
                {"id": 2, "title": "B", "year": "2014", "artist": "X"}
            ],
            "tracks": ["a.mp3", "/abs/b.mp3"]
        }"#;
        let catalog = Catalog::from_json(json, Path::new("/music")).expect("valid catalog");
        assert_eq!(catalog.track_at(0), Some(&TrackRef::new("/music/a.mp3")));
        assert_eq!(catalog.track_at(1), Some(&TrackRef::new("/abs/b.mp3")));
        assert_eq!(catalog.items()[1].artist, "X");
    }

    #[test]
    fn short_track_list_leaves_trailing_items_silent() {
        let json = r#"{
            "items": [
                {"id": 1, "title": "A", "year": "2012"},
                {"id": 2, "title": "B", "year": "2014"}
            ],
            "tracks": ["a.mp3"]
        }"#;
        let catalog = Catalog::from_json(json, Path::new("/music")).expect("valid catalog");
        assert!(catalog.track_at(0).is_some());
        assert!(catalog.track_at(1).is_none());
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").expect("write catalog");

        match Catalog::load(&path) {
            Err(CatalogError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"items": [{"id": 7, "title": "Only", "year": "2023"}], "tracks": ["x.mp3"]}"#,
        )
        .expect("write catalog");

        let catalog = Catalog::load(&path).expect("catalog loads");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.track_at(0), Some(&TrackRef::new(dir.path().join("x.mp3"))));
    }
}
