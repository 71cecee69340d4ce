use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// One movie as returned by catalog search/discover listings.
///
/// The catalog omits or nulls fields freely; a listing with a missing
/// poster or date still decodes and renders as a card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// One page of a catalog listing (`results` plus pagination envelope).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub homepage: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    /// The detail page only links trailers it can embed.
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }
}

/// One ledger entry: how often a movie surfaced as the top search result.
///
/// Field names match the backing collection's attributes (and therefore the
/// shape the trending UI already consumes); `$id`/`$createdAt`/`$updatedAt`
/// are the store's system fields. `title` is absent on records written
/// before it was added to the schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendingRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub movie_id: u64,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Payload for the home view: the trending shelf plus one rail per genre.
#[derive(Clone, Debug, Serialize)]
pub struct HomePayload {
    pub trending: Vec<TrendingRecord>,
    pub sections: Vec<GenreSection>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenreSection {
    pub genre: Genre,
    pub movies: Vec<MovieSummary>,
}

/// Payload for the movie detail view: the primary record plus the
/// tolerantly-fetched side channels.
#[derive(Clone, Debug, Serialize)]
pub struct MovieBundle {
    pub movie: MovieDetail,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub cast: Vec<CastCard>,
    pub trailers: Vec<Video>,
    pub similar: Vec<SimilarCard>,
}

/// A cast entry with its profile image resolved to a full URL.
#[derive(Clone, Debug, Serialize)]
pub struct CastCard {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimilarCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub release_date: Option<String>,
    pub vote_average: f32,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
