use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_rps: u32,
    pub http_timeout_secs: u64,
    pub max_concurrent: usize,
    pub appwrite_endpoint: String,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub appwrite_database_id: String,
    pub appwrite_collection_id: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = std::env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p".to_string());

        let tmdb_rps: u32 =
            std::env::var("TMDB_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        let max_concurrent: usize =
            std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        let appwrite_endpoint = std::env::var("APPWRITE_ENDPOINT")
            .unwrap_or_else(|_| "https://cloud.appwrite.io/v1".to_string());
        let appwrite_project_id =
            std::env::var("APPWRITE_PROJECT_ID").unwrap_or_else(|_| "".to_string());
        let appwrite_api_key = std::env::var("APPWRITE_API_KEY").unwrap_or_else(|_| "".to_string());
        let appwrite_database_id =
            std::env::var("APPWRITE_DATABASE_ID").unwrap_or_else(|_| "".to_string());
        let appwrite_collection_id =
            std::env::var("APPWRITE_COLLECTION_ID").unwrap_or_else(|_| "".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_rps,
            http_timeout_secs,
            max_concurrent,
            appwrite_endpoint,
            appwrite_project_id,
            appwrite_api_key,
            appwrite_database_id,
            appwrite_collection_id,
        })
    }
}
