use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use futures::{StreamExt, stream};
use serde::Deserialize;
use tracing::warn;

use crate::{
    AppState,
    error::AppResult,
    genres,
    images::ImageSize,
    ledger::{DEFAULT_TRENDING_LIMIT, MAX_TRENDING_LIMIT},
    models::{
        CastCard, GenreSection, HomePayload, MovieBundle, MoviePage, SimilarCard, TrendingRecord,
        Video,
    },
};

/// Movies shown per genre rail on the home page.
const SECTION_SIZE: usize = 10;
/// Cast entries shown on the detail page.
const CAST_SIZE: usize = 10;
/// Similar-movie cards shown on the detail page.
const SIMILAR_SIZE: usize = 6;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/search", get(search))
        .route("/api/movies/popular", get(popular))
        .route("/api/movies/{id}", get(movie_detail))
        .route("/api/trending", get(trending))
        .with_state(state)
}

pub async fn home(State(state): State<Arc<AppState>>) -> Json<HomePayload> {
    let (trending, sections) =
        tokio::join!(state.ledger.top_trending(DEFAULT_TRENDING_LIMIT), genre_sections(&state));

    Json(HomePayload { trending, sections })
}

/// Fetches every genre rail with bounded concurrency, in catalog order. A
/// rail that fails comes back empty rather than sinking the whole page.
async fn genre_sections(state: &AppState) -> Vec<GenreSection> {
    stream::iter(genres::all())
        .map(|genre| async move {
            let movies = match state.tmdb.discover_by_genre(genre.id, 1).await {
                Ok(page) => page.results.into_iter().take(SECTION_SIZE).collect(),
                Err(err) => {
                    warn!(genre = %genre.name, error = %err, "failed to load genre rail");
                    Vec::new()
                },
            };
            GenreSection { genre, movies }
        })
        .buffered(state.config.max_concurrent.max(1))
        .collect()
        .await
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_page")]
    page: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<MoviePage>> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Ok(Json(MoviePage::default()));
    }

    let page = state.tmdb.search_movies(&query, params.page.max(1)).await?;

    // Only first-page searches count as observations; recording runs off
    // the request path.
    if params.page <= 1 {
        if let Some(top) = page.results.first() {
            let ledger = state.ledger.clone();
            let top = top.clone();
            tokio::spawn(async move { ledger.record_observation(&query, &top).await });
        }
    }

    Ok(Json(page))
}

pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<MoviePage>> {
    let page = state.tmdb.discover_popular(params.page.max(1)).await?;
    Ok(Json(page))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieBundle>> {
    let (movie, credits, videos, similar) = tokio::join!(
        state.tmdb.movie_details(id),
        state.tmdb.movie_credits(id),
        state.tmdb.movie_videos(id),
        state.tmdb.similar_movies(id),
    );

    // The movie itself is the page; the side channels just decorate it.
    let movie = movie?;

    let mut cast = credits.unwrap_or_else(|err| {
        warn!(movie_id = id, error = %err, "failed to load credits");
        Vec::new()
    });
    cast.sort_by_key(|m| m.order);

    let videos = videos.unwrap_or_else(|err| {
        warn!(movie_id = id, error = %err, "failed to load videos");
        Vec::new()
    });

    let similar = similar.unwrap_or_else(|err| {
        warn!(movie_id = id, error = %err, "failed to load similar movies");
        Vec::new()
    });

    let images = &state.images;
    let cast: Vec<CastCard> = cast
        .into_iter()
        .take(CAST_SIZE)
        .map(|m| CastCard {
            id: m.id,
            name: m.name,
            character: m.character,
            profile_url: images.url(ImageSize::W185, m.profile_path.as_deref()),
        })
        .collect();

    let trailers: Vec<Video> = videos.into_iter().filter(Video::is_youtube_trailer).collect();

    let similar: Vec<SimilarCard> = similar
        .into_iter()
        .take(SIMILAR_SIZE)
        .map(|m| SimilarCard {
            id: m.id,
            title: m.title,
            poster_url: images.url(ImageSize::W300, m.poster_path.as_deref()),
            release_date: m.release_date,
            vote_average: m.vote_average,
        })
        .collect();

    Ok(Json(MovieBundle {
        poster_url: images.url(ImageSize::W500, movie.poster_path.as_deref()),
        backdrop_url: images.backdrop(movie.backdrop_path.as_deref()),
        movie,
        cast,
        trailers,
        similar,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    limit: Option<usize>,
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingParams>,
) -> Json<Vec<TrendingRecord>> {
    let limit = params.limit.unwrap_or(DEFAULT_TRENDING_LIMIT).min(MAX_TRENDING_LIMIT);
    Json(state.ledger.top_trending(limit).await)
}
