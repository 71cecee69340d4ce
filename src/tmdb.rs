use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CastMember, MovieDetail, MoviePage, MovieSummary, Video};

#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("catalog resource not found")]
    NotFound,

    #[error("catalog rejected credentials")]
    Unauthorized,

    #[error("catalog rate limit hit")]
    RateLimited,

    #[error("catalog returned HTTP {0}")]
    Status(u16),

    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog response did not parse: {0}")]
    Decode(String),
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided; catalog calls will be rejected upstream");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter }
    }

    /// One rate-limited GET; no retries, no caching (callers see every
    /// upstream failure exactly once).
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        self.limiter.until_ready().await;

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| TmdbError::Decode(e.to_string()))
            },
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized),
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(TmdbError::RateLimited),
            status => Err(TmdbError::Status(status.as_u16())),
        }
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn discover_popular(&self, page: u32) -> Result<MoviePage, TmdbError> {
        self.get(
            "/discover/movie",
            &[("sort_by", "popularity.desc".to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<MoviePage, TmdbError> {
        self.get(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    pub async fn movie_details(&self, id: u64) -> Result<MovieDetail, TmdbError> {
        self.get(&format!("/movie/{id}"), &[]).await
    }

    pub async fn movie_credits(&self, id: u64) -> Result<Vec<CastMember>, TmdbError> {
        let response: CreditsResponse = self.get(&format!("/movie/{id}/credits"), &[]).await?;
        Ok(response.cast)
    }

    pub async fn movie_videos(&self, id: u64) -> Result<Vec<Video>, TmdbError> {
        let response: VideosResponse = self.get(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(response.results)
    }

    pub async fn similar_movies(&self, id: u64) -> Result<Vec<MovieSummary>, TmdbError> {
        let response: MoviePage = self.get(&format!("/movie/{id}/similar"), &[]).await?;
        Ok(response.results)
    }
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}
