//! Per-entity admin bindings

use axum::async_trait;
use metamusic_common::db::{
    Album, Artist, ChartItem, EntityKind, Genre, PlatformLink, Playlist, Song,
};
use sqlx::SqlitePool;

use super::AdminResource;
use crate::db::albums::{self, AlbumInput, AlbumWithArtist};
use crate::db::artists::{self, ArtistInput};
use crate::db::charts::{self, ChartInput};
use crate::db::genres::{self, GenreInput};
use crate::db::platform_links::{self, PlatformLinkInput};
use crate::db::playlists::{self, PlaylistInput};
use crate::db::songs::{self, SongDetail, SongInput};
use crate::error::{ApiError, ApiResult};
use crate::forms::FormFields;

pub struct Artists;

#[async_trait]
impl AdminResource for Artists {
    const PATH: &'static str = "artists";
    const LABEL: &'static str = "artist";
    type Listed = Artist;
    type Row = Artist;
    type Input = ArtistInput;

    fn parse(form: &FormFields) -> ApiResult<ArtistInput> {
        Ok(ArtistInput {
            name: form.text("name"),
            bio: form.optional_text("bio"),
            image_url: form.optional_text("image_url"),
            // Stored as given, blank included
            country: Some(form.text("country")),
            debut_year: form.optional_number("debut_year"),
            is_trending: form.checkbox("is_trending"),
            socials: form.optional_socials("socials")?,
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Artist>> {
        artists::list_artists(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &ArtistInput) -> sqlx::Result<Artist> {
        artists::insert_artist(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &ArtistInput) -> sqlx::Result<Option<Artist>> {
        artists::update_artist(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        artists::delete_artist(db, id).await
    }
}

pub struct Albums;

#[async_trait]
impl AdminResource for Albums {
    const PATH: &'static str = "albums";
    const LABEL: &'static str = "album";
    type Listed = AlbumWithArtist;
    type Row = Album;
    type Input = AlbumInput;

    fn parse(form: &FormFields) -> ApiResult<AlbumInput> {
        Ok(AlbumInput {
            title: form.text("title"),
            artist_id: form.text("artist_id"),
            cover_url: form.optional_text("cover_url"),
            genre: form.optional_text("genre"),
            release_date: form.optional_date("release_date")?,
            description: form.optional_text("description"),
            is_trending: form.checkbox("is_trending"),
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<AlbumWithArtist>> {
        albums::list_albums(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &AlbumInput) -> sqlx::Result<Album> {
        albums::insert_album(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &AlbumInput) -> sqlx::Result<Option<Album>> {
        albums::update_album(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        albums::delete_album(db, id).await
    }
}

pub struct Songs;

#[async_trait]
impl AdminResource for Songs {
    const PATH: &'static str = "songs";
    const LABEL: &'static str = "song";
    type Listed = SongDetail;
    type Row = Song;
    type Input = SongInput;

    fn parse(form: &FormFields) -> ApiResult<SongInput> {
        Ok(SongInput {
            title: form.text("title"),
            album_id: form.optional_text("album_id"),
            artist_id: form.text("artist_id"),
            duration: form.optional_text("duration"),
            language: form.optional_text("language"),
            lyrics: form.optional_text("lyrics"),
            cover_url: form.optional_text("cover_url"),
            release_date: form.optional_date("release_date")?,
            is_trending: form.checkbox("is_trending"),
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<SongDetail>> {
        songs::list_songs(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &SongInput) -> sqlx::Result<Song> {
        songs::insert_song(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &SongInput) -> sqlx::Result<Option<Song>> {
        songs::update_song(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        songs::delete_song(db, id).await
    }
}

pub struct Playlists;

#[async_trait]
impl AdminResource for Playlists {
    const PATH: &'static str = "playlists";
    const LABEL: &'static str = "playlist";
    type Listed = Playlist;
    type Row = Playlist;
    type Input = PlaylistInput;

    fn parse(form: &FormFields) -> ApiResult<PlaylistInput> {
        Ok(PlaylistInput {
            title: form.text("title"),
            description: form.optional_text("description"),
            cover_url: form.optional_text("cover_url"),
            is_featured: form.checkbox("is_featured"),
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Playlist>> {
        playlists::list_playlists(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &PlaylistInput) -> sqlx::Result<Playlist> {
        playlists::insert_playlist(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &PlaylistInput) -> sqlx::Result<Option<Playlist>> {
        playlists::update_playlist(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        playlists::delete_playlist(db, id).await
    }
}

pub struct Genres;

#[async_trait]
impl AdminResource for Genres {
    const PATH: &'static str = "genres";
    const LABEL: &'static str = "genre";
    type Listed = Genre;
    type Row = Genre;
    type Input = GenreInput;

    fn parse(form: &FormFields) -> ApiResult<GenreInput> {
        Ok(GenreInput {
            name: form.text("name"),
            description: form.optional_text("description"),
            image_url: form.optional_text("image_url"),
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<Genre>> {
        genres::list_genres(db, Some(limit)).await
    }

    async fn create(db: &SqlitePool, input: &GenreInput) -> sqlx::Result<Genre> {
        genres::insert_genre(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &GenreInput) -> sqlx::Result<Option<Genre>> {
        genres::update_genre(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        genres::delete_genre(db, id).await
    }
}

pub struct PlatformLinks;

#[async_trait]
impl AdminResource for PlatformLinks {
    const PATH: &'static str = "platform-links";
    const LABEL: &'static str = "platform link";
    type Listed = PlatformLink;
    type Row = PlatformLink;
    type Input = PlatformLinkInput;

    fn parse(form: &FormFields) -> ApiResult<PlatformLinkInput> {
        Ok(PlatformLinkInput {
            kind: form.parsed("type")?,
            reference_id: form.text("reference_id"),
            platform_name: form.parsed("platform_name")?,
            url: form.text("url"),
            icon_url: form.optional_text("icon_url"),
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<PlatformLink>> {
        platform_links::list_links(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &PlatformLinkInput) -> sqlx::Result<PlatformLink> {
        platform_links::insert_link(db, input).await
    }

    async fn update(
        db: &SqlitePool,
        id: &str,
        input: &PlatformLinkInput,
    ) -> sqlx::Result<Option<PlatformLink>> {
        platform_links::update_link(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        platform_links::delete_link(db, id).await
    }
}

pub struct Charts;

#[async_trait]
impl AdminResource for Charts {
    const PATH: &'static str = "charts";
    const LABEL: &'static str = "chart entry";
    type Listed = ChartItem;
    type Row = ChartItem;
    type Input = ChartInput;

    fn parse(form: &FormFields) -> ApiResult<ChartInput> {
        let kind: EntityKind = form.parsed("type")?;
        if !kind.is_chartable() {
            return Err(ApiError::BadRequest(format!("{} entries cannot be charted", kind)));
        }
        Ok(ChartInput {
            kind,
            reference_id: form.text("reference_id"),
            rank: form.number_or_zero("rank"),
            week: form.date("week")?,
        })
    }

    async fn list(db: &SqlitePool, limit: i64) -> sqlx::Result<Vec<ChartItem>> {
        charts::list_charts(db, limit).await
    }

    async fn create(db: &SqlitePool, input: &ChartInput) -> sqlx::Result<ChartItem> {
        charts::insert_chart(db, input).await
    }

    async fn update(db: &SqlitePool, id: &str, input: &ChartInput) -> sqlx::Result<Option<ChartItem>> {
        charts::update_chart(db, id, input).await
    }

    async fn delete(db: &SqlitePool, id: &str) -> sqlx::Result<bool> {
        charts::delete_chart(db, id).await
    }
}
