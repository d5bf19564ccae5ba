//! Metadata search
//!
//! Two entry points:
//! - [`search_metadata`]: one entity type, paginated, exact total count
//! - [`search_all`]: every entity type at once, first N rows of each
//!
//! Matching is a case-insensitive substring test on two text columns per
//! type, through the `REGEXP` function registered in `init_database`.
//! There is no relevance ranking and no explicit sort.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

use super::cards::{
    AlbumCardRow, ArtistCardRow, Card, PlaylistCardRow, SongCardRow, ALBUM_CARD_SELECT,
    ARTIST_CARD_SELECT, PLAYLIST_CARD_SELECT, SONG_CARD_SELECT,
};
use super::contains_pattern;
use crate::pagination::page_offset;

/// Entity type searched by [`search_metadata`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Songs,
    Albums,
    Artists,
    Playlists,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Songs => "songs",
            SearchType::Albums => "albums",
            SearchType::Artists => "artists",
            SearchType::Playlists => "playlists",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "songs" => Ok(SearchType::Songs),
            "albums" => Ok(SearchType::Albums),
            "artists" => Ok(SearchType::Artists),
            "playlists" => Ok(SearchType::Playlists),
            other => Err(format!("Unknown search type: {:?}", other)),
        }
    }
}

/// Paginated search request
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub search_type: SearchType,
    /// Extra `genre` filter, albums only
    pub genre: Option<String>,
    /// Extra `country` filter, artists only
    pub country: Option<String>,
    /// 1-indexed
    pub page: i64,
    pub page_size: i64,
}

/// One page of results plus the exact match count
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub items: Vec<Card>,
    pub count: i64,
}

/// Search a single entity type
///
/// An empty query is not special-cased here: it matches every row.
pub async fn search_metadata(db: &SqlitePool, params: &SearchParams) -> sqlx::Result<SearchPage> {
    let filter = Filter::for_params(params);
    let offset = page_offset(params.page, params.page_size);
    let limit = params.page_size;

    let (count, items): (i64, Vec<Card>) = match params.search_type {
        SearchType::Songs => {
            let (count, rows) = tokio::try_join!(
                filter.count(db, "songs s"),
                filter.page::<SongCardRow>(db, SONG_CARD_SELECT, limit, offset),
            )?;
            (count, rows.into_iter().map(Card::from).collect())
        }
        SearchType::Albums => {
            let (count, rows) = tokio::try_join!(
                filter.count(db, "albums al"),
                filter.page::<AlbumCardRow>(db, ALBUM_CARD_SELECT, limit, offset),
            )?;
            (count, rows.into_iter().map(AlbumCardRow::into_search_item).collect())
        }
        SearchType::Artists => {
            let (count, rows) = tokio::try_join!(
                filter.count(db, "artists ar"),
                filter.page::<ArtistCardRow>(db, ARTIST_CARD_SELECT, limit, offset),
            )?;
            (count, rows.into_iter().map(Card::from).collect())
        }
        SearchType::Playlists => {
            let (count, rows) = tokio::try_join!(
                filter.count(db, "playlists p"),
                filter.page::<PlaylistCardRow>(db, PLAYLIST_CARD_SELECT, limit, offset),
            )?;
            (count, rows.into_iter().map(Card::from).collect())
        }
    };

    Ok(SearchPage { items, count })
}

/// WHERE clause shared by the count and page queries
struct Filter {
    clause: String,
    args: Vec<String>,
}

impl Filter {
    fn for_params(params: &SearchParams) -> Self {
        let pattern = contains_pattern(&params.query);
        let (a, b) = match params.search_type {
            SearchType::Songs => ("s.title", "s.language"),
            SearchType::Albums => ("al.title", "al.genre"),
            SearchType::Artists => ("ar.name", "ar.country"),
            SearchType::Playlists => ("p.title", "p.description"),
        };
        let mut filter = Filter {
            clause: format!("(IFNULL({a}, '') REGEXP ? OR IFNULL({b}, '') REGEXP ?)"),
            args: vec![pattern.clone(), pattern],
        };

        let extra = match params.search_type {
            SearchType::Albums => non_empty(&params.genre).map(|g| ("al.genre", g)),
            SearchType::Artists => non_empty(&params.country).map(|c| ("ar.country", c)),
            _ => None,
        };
        if let Some((column, value)) = extra {
            filter
                .clause
                .push_str(&format!(" AND IFNULL({column}, '') REGEXP ?"));
            filter.args.push(contains_pattern(value));
        }
        filter
    }

    async fn count(&self, db: &SqlitePool, from: &str) -> sqlx::Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", from, self.clause);
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for arg in &self.args {
            query = query.bind(arg.as_str());
        }
        query.fetch_one(db).await
    }

    async fn page<R>(
        &self,
        db: &SqlitePool,
        select: &str,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("{} WHERE {} LIMIT ? OFFSET ?", select, self.clause);
        let mut query = sqlx::query_as::<_, R>(&sql);
        for arg in &self.args {
            query = query.bind(arg.as_str());
        }
        query.bind(limit).bind(offset).fetch_all(db).await
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Artist reference attached to song/album hits, `null` when missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongHit {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub language: Option<String>,
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumHit {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub genre: Option<String>,
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistHit {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaylistHit {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

/// Aggregate search result, one list per entity type
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchAllResults {
    pub songs: Vec<SongHit>,
    pub albums: Vec<AlbumHit>,
    pub artists: Vec<ArtistHit>,
    pub playlists: Vec<PlaylistHit>,
}

/// Search every entity type concurrently
///
/// The query is trimmed first; a blank query returns empty lists without
/// touching the database.
pub async fn search_all(db: &SqlitePool, query: &str, limit: i64) -> sqlx::Result<SearchAllResults> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchAllResults::default());
    }
    let pattern = contains_pattern(query);

    let songs_sql = format!(
        "{} WHERE s.title REGEXP ?1 OR IFNULL(s.language, '') REGEXP ?1 LIMIT ?2",
        SONG_CARD_SELECT
    );
    let albums_sql = format!(
        "{} WHERE al.title REGEXP ?1 OR IFNULL(al.genre, '') REGEXP ?1 LIMIT ?2",
        ALBUM_CARD_SELECT
    );
    let artists_sql = format!(
        "{} WHERE ar.name REGEXP ?1 OR IFNULL(ar.country, '') REGEXP ?1 LIMIT ?2",
        ARTIST_CARD_SELECT
    );
    let playlists_sql = format!(
        "{} WHERE p.title REGEXP ?1 OR IFNULL(p.description, '') REGEXP ?1 LIMIT ?2",
        PLAYLIST_CARD_SELECT
    );

    let (songs, albums, artists, playlists) = tokio::try_join!(
        sqlx::query_as::<_, SongCardRow>(&songs_sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(db),
        sqlx::query_as::<_, AlbumCardRow>(&albums_sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(db),
        sqlx::query_as::<_, ArtistHit>(&artists_sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(db),
        sqlx::query_as::<_, PlaylistHit>(&playlists_sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(db),
    )?;

    Ok(SearchAllResults {
        songs: songs
            .into_iter()
            .map(|row| SongHit {
                id: row.id,
                title: row.title,
                cover_url: row.cover_url,
                language: row.language,
                artist: row.artist_name.map(|name| ArtistRef { name }),
            })
            .collect(),
        albums: albums
            .into_iter()
            .map(|row| AlbumHit {
                id: row.id,
                title: row.title,
                cover_url: row.cover_url,
                genre: row.genre,
                artist: row.artist_name.map(|name| ArtistRef { name }),
            })
            .collect(),
        artists,
        playlists,
    })
}
