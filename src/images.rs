/// Asset served in place of a missing poster or profile image.
pub const NOT_FOUND_ASSET: &str = "/assets/notfound.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSize {
    /// Cast profile thumbnails.
    W185,
    /// Similar-movie cards.
    W300,
    /// Posters.
    W500,
    /// Backdrops.
    Original,
}

impl ImageSize {
    fn token(self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Builds absolute CDN image URLs from the catalog's relative paths.
#[derive(Clone, Debug)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    /// `{base}/{size}{path}`; an absent path resolves to the not-found asset.
    pub fn url(&self, size: ImageSize, path: Option<&str>) -> String {
        match path {
            Some(path) if !path.is_empty() => format!("{}/{}{}", self.base, size.token(), path),
            _ => NOT_FOUND_ASSET.to_string(),
        }
    }

    /// Backdrop URL, or `None` when the catalog has none. The view drops
    /// its hero section rather than showing a placeholder backdrop.
    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|path| format!("{}/{}{}", self.base, ImageSize::Original.token(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sized_urls() {
        let images = ImageUrls::new("https://image.tmdb.org/t/p");
        assert_eq!(
            images.url(ImageSize::W500, Some("/x.jpg")),
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
        assert_eq!(
            images.url(ImageSize::W185, Some("/face.jpg")),
            "https://image.tmdb.org/t/p/w185/face.jpg"
        );
    }

    #[test]
    fn missing_path_falls_back_to_placeholder() {
        let images = ImageUrls::new("https://image.tmdb.org/t/p");
        assert_eq!(images.url(ImageSize::W500, None), NOT_FOUND_ASSET);
        assert_eq!(images.url(ImageSize::W300, Some("")), NOT_FOUND_ASSET);
    }

    #[test]
    fn backdrop_is_original_size_or_absent() {
        let images = ImageUrls::new("https://image.tmdb.org/t/p/");
        assert_eq!(
            images.backdrop(Some("/wide.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/original/wide.jpg")
        );
        assert_eq!(images.backdrop(None), None);
        assert_eq!(images.backdrop(Some("")), None);
    }
}
