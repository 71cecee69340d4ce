use crate::models::Genre;

/// Genres shown as browse rails on the home view, with their catalog ids.
const GENRES: &[(u64, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (18, "Drama"),
    (14, "Fantasy"),
    (27, "Horror"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (53, "Thriller"),
];

pub fn all() -> Vec<Genre> {
    GENRES.iter().map(|&(id, name)| Genre { id, name: name.to_string() }).collect()
}
