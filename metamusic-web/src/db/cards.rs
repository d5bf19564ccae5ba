//! Display cards
//!
//! A card is the normalized summary every listing uses: id, title,
//! subtitle, image and page link. Rows are fetched with the columns a card
//! needs and converted here so the fallback rules live in one place.

use metamusic_common::db::EntityKind;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Subtitle when a song or album has no artist row
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Subtitle for artists whose country is NULL
pub const ARTIST_FALLBACK: &str = "Artist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub href: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SongCardRow {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub language: Option<String>,
    pub artist_name: Option<String>,
}

impl From<SongCardRow> for Card {
    fn from(row: SongCardRow) -> Self {
        Card {
            href: EntityKind::Song.href(&row.id),
            id: row.id,
            title: row.title,
            subtitle: row.artist_name.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            image_url: row.cover_url,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AlbumCardRow {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub genre: Option<String>,
    pub artist_name: Option<String>,
}

impl AlbumCardRow {
    /// Listing card: artist name, else the placeholder
    pub fn into_card(mut self) -> Card {
        let subtitle = self
            .artist_name
            .take()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        self.build(subtitle)
    }

    /// Search result: artist name, else genre, else the placeholder
    pub fn into_search_item(self) -> Card {
        let subtitle = self
            .artist_name
            .clone()
            .or_else(|| self.genre.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        self.build(subtitle)
    }

    fn build(self, subtitle: String) -> Card {
        Card {
            href: EntityKind::Album.href(&self.id),
            id: self.id,
            title: self.title,
            subtitle,
            image_url: self.cover_url,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArtistCardRow {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub country: Option<String>,
}

impl From<ArtistCardRow> for Card {
    fn from(row: ArtistCardRow) -> Self {
        // Only a missing country falls back; a blank one is shown as is
        let subtitle = row
            .country
            .unwrap_or_else(|| ARTIST_FALLBACK.to_string());
        Card {
            href: EntityKind::Artist.href(&row.id),
            id: row.id,
            title: row.name,
            subtitle,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaylistCardRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

impl From<PlaylistCardRow> for Card {
    fn from(row: PlaylistCardRow) -> Self {
        Card {
            href: EntityKind::Playlist.href(&row.id),
            id: row.id,
            title: row.title,
            subtitle: row.description.unwrap_or_default(),
            image_url: row.cover_url,
        }
    }
}

pub(crate) const SONG_CARD_SELECT: &str = r#"
    SELECT s.id, s.title, s.cover_url, s.language, ar.name AS artist_name
    FROM songs s
    LEFT JOIN artists ar ON ar.id = s.artist_id
"#;

pub(crate) const ALBUM_CARD_SELECT: &str = r#"
    SELECT al.id, al.title, al.cover_url, al.genre, ar.name AS artist_name
    FROM albums al
    LEFT JOIN artists ar ON ar.id = al.artist_id
"#;

pub(crate) const ARTIST_CARD_SELECT: &str =
    "SELECT ar.id, ar.name, ar.image_url, ar.country FROM artists ar";

pub(crate) const PLAYLIST_CARD_SELECT: &str =
    "SELECT p.id, p.title, p.description, p.cover_url FROM playlists p";

pub async fn trending_songs(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, SongCardRow>(&format!(
        "{} WHERE s.is_trending = 1 LIMIT ?",
        SONG_CARD_SELECT
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

pub async fn trending_albums(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, AlbumCardRow>(&format!(
        "{} WHERE al.is_trending = 1 LIMIT ?",
        ALBUM_CARD_SELECT
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(AlbumCardRow::into_card).collect())
}

pub async fn trending_artists(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, ArtistCardRow>(&format!(
        "{} WHERE ar.is_trending = 1 LIMIT ?",
        ARTIST_CARD_SELECT
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

pub async fn featured_playlists(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, PlaylistCardRow>(&format!(
        "{} WHERE p.is_featured = 1 LIMIT ?",
        PLAYLIST_CARD_SELECT
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// An artist's most recently added songs
pub async fn songs_by_artist(db: &SqlitePool, artist_id: &str, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, SongCardRow>(&format!(
        "{} WHERE s.artist_id = ? ORDER BY s.created_at DESC, s.rowid DESC LIMIT ?",
        SONG_CARD_SELECT
    ))
    .bind(artist_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// An artist's albums, latest release first
pub async fn albums_by_artist(db: &SqlitePool, artist_id: &str, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, AlbumCardRow>(&format!(
        "{} WHERE al.artist_id = ? ORDER BY al.release_date DESC LIMIT ?",
        ALBUM_CARD_SELECT
    ))
    .bind(artist_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(AlbumCardRow::into_card).collect())
}

/// Artists other than `exclude_id`
pub async fn other_artists(db: &SqlitePool, exclude_id: &str, limit: i64) -> sqlx::Result<Vec<Card>> {
    let rows = sqlx::query_as::<_, ArtistCardRow>(&format!(
        "{} WHERE ar.id != ? LIMIT ?",
        ARTIST_CARD_SELECT
    ))
    .bind(exclude_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// Card for a single entity, `None` when the row is gone
pub async fn card_for(db: &SqlitePool, kind: EntityKind, id: &str) -> sqlx::Result<Option<Card>> {
    let card = match kind {
        EntityKind::Song => sqlx::query_as::<_, SongCardRow>(&format!(
            "{} WHERE s.id = ?",
            SONG_CARD_SELECT
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(Card::from),
        EntityKind::Album => sqlx::query_as::<_, AlbumCardRow>(&format!(
            "{} WHERE al.id = ?",
            ALBUM_CARD_SELECT
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(AlbumCardRow::into_card),
        EntityKind::Artist => sqlx::query_as::<_, ArtistCardRow>(&format!(
            "{} WHERE ar.id = ?",
            ARTIST_CARD_SELECT
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(Card::from),
        EntityKind::Playlist => sqlx::query_as::<_, PlaylistCardRow>(&format!(
            "{} WHERE p.id = ?",
            PLAYLIST_CARD_SELECT
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(Card::from),
    };
    Ok(card)
}
