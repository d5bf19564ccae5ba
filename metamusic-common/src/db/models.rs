//! Database models
//!
//! One struct per table row. Enumerated text columns are typed enums so a
//! bad value is rejected at the form boundary instead of reaching SQL.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of entity a loose `reference_id` points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EntityKind {
    Song,
    Album,
    Artist,
    Playlist,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Song => "song",
            EntityKind::Album => "album",
            EntityKind::Artist => "artist",
            EntityKind::Playlist => "playlist",
        }
    }

    /// Charts rank songs, albums and artists only
    pub fn is_chartable(&self) -> bool {
        !matches!(self, EntityKind::Playlist)
    }

    /// Public page path for an entity of this kind
    pub fn href(&self, id: &str) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "song" => Ok(EntityKind::Song),
            "album" => Ok(EntityKind::Album),
            "artist" => Ok(EntityKind::Artist),
            "playlist" => Ok(EntityKind::Playlist),
            other => Err(Error::InvalidInput(format!("Unknown entity type: {:?}", other))),
        }
    }
}

/// Streaming services a platform link may point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PlatformName {
    Spotify,
    #[serde(rename = "Apple Music")]
    #[sqlx(rename = "Apple Music")]
    AppleMusic,
    #[serde(rename = "YouTube Music")]
    #[sqlx(rename = "YouTube Music")]
    YouTubeMusic,
}

impl PlatformName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformName::Spotify => "Spotify",
            PlatformName::AppleMusic => "Apple Music",
            PlatformName::YouTubeMusic => "YouTube Music",
        }
    }
}

impl FromStr for PlatformName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Spotify" => Ok(PlatformName::Spotify),
            "Apple Music" => Ok(PlatformName::AppleMusic),
            "YouTube Music" => Ok(PlatformName::YouTubeMusic),
            other => Err(Error::InvalidInput(format!("Unknown platform: {:?}", other))),
        }
    }
}

/// Social handles keyed by network name
pub type Socials = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub country: Option<String>,
    pub debut_year: Option<i64>,
    pub is_trending: bool,
    pub socials: Option<Json<Socials>>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    pub cover_url: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub is_trending: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub album_id: Option<String>,
    pub artist_id: String,
    /// Display duration such as "3:42"
    pub duration: Option<String>,
    pub language: Option<String>,
    pub lyrics: Option<String>,
    pub cover_url: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub is_trending: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub created_by_admin: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlatformLink {
    pub id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntityKind,
    pub reference_id: String,
    pub platform_name: PlatformName,
    pub url: String,
    pub icon_url: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChartItem {
    pub id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntityKind,
    pub reference_id: String,
    pub rank: i64,
    pub week: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSaved {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntityKind,
    pub reference_id: String,
    pub created_at: NaiveDateTime,
}

/// Account as exposed to handlers (credentials stay in the auth module)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
