//! Public display endpoints: health, home, charts, genres, detail pages,
//! sitemap and static pages

mod common;

use axum::http::{header, StatusCode};
use common::{json_body, text_body, TestApp, BASE_URL};

/// Artist with one album, two songs and a platform link
struct Catalog {
    artist_id: String,
    album_id: String,
    song_ids: Vec<String>,
}

async fn seed_catalog(app: &TestApp, admin: &str) -> Catalog {
    let artist = app
        .admin_create(admin, "artists", "name=Nova&country=KR&is_trending=on")
        .await;
    let artist_id = artist["id"].as_str().unwrap().to_string();

    let album = app
        .admin_create(
            admin,
            "albums",
            &format!("title=Night+Drive&artist_id={}&genre=Synthpop&release_date=2023-03-01&is_trending=on", artist_id),
        )
        .await;
    let album_id = album["id"].as_str().unwrap().to_string();

    let mut song_ids = Vec::new();
    for title in ["Glow", "Afterlight"] {
        let song = app
            .admin_create(
                admin,
                "songs",
                &format!(
                    "title={}&artist_id={}&album_id={}&duration=3%3A42&is_trending=on",
                    title, artist_id, album_id
                ),
            )
            .await;
        song_ids.push(song["id"].as_str().unwrap().to_string());
    }

    app.admin_create(
        admin,
        "platform-links",
        &format!(
            "type=album&reference_id={}&platform_name=Spotify&url=https%3A%2F%2Fopen.spotify.com%2Falbum%2Fx",
            album_id
        ),
    )
    .await;

    Catalog {
        artist_id,
        album_id,
        song_ids,
    }
}

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "metamusic-web");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo() {
    let app = TestApp::new().await;

    let body = json_body(app.get("/api/buildinfo", None).await).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

#[tokio::test]
async fn test_home_on_empty_catalog() {
    let app = TestApp::new().await;

    let response = app.get("/api/home", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["trending_songs"].as_array().unwrap().len(), 0);
    assert_eq!(body["featured_playlists"].as_array().unwrap().len(), 0);
    assert!(body["top_song"].is_null());
    assert!(body["top_artist"].is_null());
}

#[tokio::test]
async fn test_home_rails_and_number_ones() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;

    app.admin_create(&admin, "playlists", "title=Late+Night&is_featured=on")
        .await;
    app.admin_create(&admin, "playlists", "title=Not+Featured").await;

    // Older number one is superseded by the latest week
    app.admin_create(
        &admin,
        "charts",
        &format!("type=song&reference_id={}&rank=1&week=2024-04-29", catalog.song_ids[1]),
    )
    .await;
    app.admin_create(
        &admin,
        "charts",
        &format!("type=song&reference_id={}&rank=1&week=2024-05-06", catalog.song_ids[0]),
    )
    .await;
    app.admin_create(
        &admin,
        "charts",
        &format!("type=artist&reference_id={}&rank=1&week=2024-05-06", catalog.artist_id),
    )
    .await;

    let body = json_body(app.get("/api/home", None).await).await;

    assert_eq!(body["trending_songs"].as_array().unwrap().len(), 2);
    assert_eq!(body["trending_albums"][0]["subtitle"], "Nova");
    assert_eq!(body["trending_artists"][0]["subtitle"], "KR");

    let playlists = body["featured_playlists"].as_array().unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0]["title"], "Late Night");
    assert_eq!(playlists[0]["subtitle"], "");

    assert_eq!(body["top_song"]["title"], "Glow");
    assert_eq!(body["top_song"]["href"], format!("/song/{}", catalog.song_ids[0]));
    assert_eq!(body["top_artist"]["title"], "Nova");
    assert!(body["top_album"].is_null());
}

#[tokio::test]
async fn test_charts_resolve_titles_in_rank_order() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;

    app.admin_create(
        &admin,
        "charts",
        &format!("type=album&reference_id={}&rank=2&week=2024-05-06", catalog.album_id),
    )
    .await;
    app.admin_create(
        &admin,
        "charts",
        &format!("type=song&reference_id={}&rank=1&week=2024-05-06", catalog.song_ids[0]),
    )
    .await;
    app.admin_create(&admin, "charts", "type=artist&reference_id=gone&rank=3&week=2024-05-06")
        .await;

    let body = json_body(app.get("/api/charts", None).await).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["title"], "Glow");
    assert_eq!(entries[1]["title"], "Night Drive");
    assert_eq!(entries[1]["type"], "album");
    assert!(entries[2]["title"].is_null());
}

#[tokio::test]
async fn test_genres_sorted_and_detail() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;

    let rock = app.admin_create(&admin, "genres", "name=Rock").await;
    app.admin_create(&admin, "genres", "name=Ambient").await;
    app.admin_create(&admin, "genres", "name=Jazz&description=Swing").await;

    let body = json_body(app.get("/api/genres", None).await).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ambient", "Jazz", "Rock"]);

    let rock_id = rock["id"].as_str().unwrap();
    let response = app.get(&format!("/api/genres/{}", rock_id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["genre"]["name"], "Rock");
    let others = body["other_genres"].as_array().unwrap();
    assert_eq!(others.len(), 2);
    assert!(others.iter().all(|g| g["id"] != rock["id"]));
}

#[tokio::test]
async fn test_missing_detail_pages_are_404() {
    let app = TestApp::new().await;

    for uri in [
        "/api/genres/nope",
        "/api/artists/nope",
        "/api/albums/nope",
        "/api/songs/nope",
        "/api/playlists/nope",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_artist_detail() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;
    app.admin_create(&admin, "artists", "name=Echo").await;

    let body = json_body(
        app.get(&format!("/api/artists/{}", catalog.artist_id), None)
            .await,
    )
    .await;

    assert_eq!(body["artist"]["name"], "Nova");
    assert_eq!(body["songs"].as_array().unwrap().len(), 2);
    assert_eq!(body["albums"][0]["title"], "Night Drive");
    let others = body["other_artists"].as_array().unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0]["title"], "Echo");
    // Stored blank, so the subtitle stays blank
    assert_eq!(others[0]["subtitle"], "");
    assert_eq!(body["links"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_album_detail_lists_tracks_and_links() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;

    let body = json_body(
        app.get(&format!("/api/albums/{}", catalog.album_id), None)
            .await,
    )
    .await;

    assert_eq!(body["album"]["title"], "Night Drive");
    assert_eq!(body["album"]["artist_name"], "Nova");
    let titles: Vec<&str> = body["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Glow", "Afterlight"]);
    assert_eq!(body["links"][0]["platform_name"], "Spotify");
}

#[tokio::test]
async fn test_song_detail_joins_artist_and_album() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;

    let body = json_body(
        app.get(&format!("/api/songs/{}", catalog.song_ids[0]), None)
            .await,
    )
    .await;

    assert_eq!(body["song"]["title"], "Glow");
    assert_eq!(body["song"]["duration"], "3:42");
    assert_eq!(body["song"]["artist_name"], "Nova");
    assert_eq!(body["song"]["album_title"], "Night Drive");
}

#[tokio::test]
async fn test_playlist_detail_in_position_order() {
    let app = TestApp::new().await;
    let admin = app.admin_session().await;
    let catalog = seed_catalog(&app, &admin).await;

    let playlist = app.admin_create(&admin, "playlists", "title=Mix").await;
    let playlist_id = playlist["id"].as_str().unwrap();

    for song_id in [&catalog.song_ids[1], &catalog.song_ids[0]] {
        let response = app
            .post_form(
                &format!("/api/admin/playlists/{}/songs", playlist_id),
                Some(&admin),
                &format!("song_id={}", song_id),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = json_body(
        app.get(&format!("/api/playlists/{}", playlist_id), None)
            .await,
    )
    .await;
    assert_eq!(body["playlist"]["created_by_admin"], true);
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs[0]["title"], "Afterlight");
    assert_eq!(songs[0]["position"], 1);
    assert_eq!(songs[1]["title"], "Glow");
    assert_eq!(songs[1]["artist_name"], "Nova");
}

#[tokio::test]
async fn test_sitemap_uses_base_url() {
    let app = TestApp::new().await;

    let response = app.get("/sitemap.xml", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

    let xml = text_body(response).await;
    assert!(xml.contains(&format!("<loc>{}/search</loc>", BASE_URL)));
    assert!(xml.contains(&format!("<loc>{}/admin</loc>", BASE_URL)));
    assert_eq!(xml.matches("<url>").count(), 8);
}

#[tokio::test]
async fn test_login_and_signup_pages() {
    let app = TestApp::new().await;

    for uri in ["/login", "/signup"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_body(response).await;
        assert!(html.contains("<form"), "{}", uri);
    }

    let response = app.get("/static/auth.js", None).await;
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
}
