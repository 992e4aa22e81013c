//! Offline sources that answer with search links instead of calling catalog APIs.

use crate::explain;
use crate::sources::{
    book_query, movie_query, music_query, BookRecommendation, BookSource, MovieRecommendation,
    MovieSource, MusicRecommendation, MusicSource, SearchRequest,
};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

const SPOTIFY_SEARCH: &str = "https://open.spotify.com/search/";
const TMDB_SEARCH: &str = "https://www.themoviedb.org/search/movie?query=";

/// Spotify search link built from the music query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLinkMusic;

#[async_trait]
impl MusicSource for SearchLinkMusic {
    async fn recommend(&self, request: &SearchRequest) -> Result<MusicRecommendation> {
        let query = music_query(request, false);
        let analysis = &request.analysis;
        let mood = request.mood_term();
        Ok(MusicRecommendation {
            title: format!("Search: {}", query),
            platform: "spotify".to_string(),
            url: format!("{}{}", SPOTIFY_SEARCH, urlencoding::encode(&query)),
            mood_match: explain::music_mood_match(
                analysis.immediate_need,
                &mood,
                analysis.intensity,
            ),
            use_case: explain::music_use_case(
                analysis.immediate_need,
                request.profile.recommendation.music_energy,
            ),
            duration: None,
            artists: Vec::new(),
        })
    }
}

/// TMDB search link plus two streaming-platform suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLinkMovies;

impl SearchLinkMovies {
    fn platforms(genres: &[String]) -> Vec<String> {
        let has = |name: &str| genres.iter().any(|g| g.eq_ignore_ascii_case(name));
        let ranked: [&str; 3] = if has("animation") {
            ["Disney+", "Netflix", "Prime Video"]
        } else if has("documentary") {
            ["Netflix", "Prime Video", "HBO Max"]
        } else {
            ["Netflix", "Prime Video", "Disney+"]
        };
        ranked.iter().take(2).map(|p| p.to_string()).collect()
    }
}

#[async_trait]
impl MovieSource for SearchLinkMovies {
    async fn recommend(&self, request: &SearchRequest) -> Result<MovieRecommendation> {
        let query = movie_query(request);
        let analysis = &request.analysis;
        let r = &request.profile.recommendation;
        let mood = request.mood_term();
        let genres: Vec<String> = r.movie_genres.iter().take(3).cloned().collect();
        Ok(MovieRecommendation {
            title: format!("Search: {}", query),
            year: None,
            rating: None,
            mood_match: explain::movie_mood_match(
                analysis.immediate_need,
                &mood,
                analysis.intensity,
                &genres,
            ),
            why: explain::movie_why(
                analysis.immediate_need,
                &genres,
                &r.movie_themes,
                r.movie_tone,
            ),
            platforms: Self::platforms(&r.movie_genres),
            url: format!("{}{}", TMDB_SEARCH, urlencoding::encode(&query)),
            genres,
        })
    }
}

/// Google Books, Amazon and Goodreads search links.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLinkBooks;

impl SearchLinkBooks {
    fn urls(query: &str) -> BTreeMap<String, String> {
        let q = urlencoding::encode(query);
        BTreeMap::from([
            (
                "google_books".to_string(),
                format!("https://books.google.com/books?q={}", q),
            ),
            (
                "amazon".to_string(),
                format!("https://www.amazon.com/s?k={}&i=stripbooks", q),
            ),
            (
                "goodreads".to_string(),
                format!("https://www.goodreads.com/search?q={}", q),
            ),
        ])
    }
}

#[async_trait]
impl BookSource for SearchLinkBooks {
    async fn recommend(&self, request: &SearchRequest) -> Result<BookRecommendation> {
        let query = book_query(request);
        let analysis = &request.analysis;
        let r = &request.profile.recommendation;
        let mood = request.mood_term();
        Ok(BookRecommendation {
            title: format!("Search: {}", query),
            author: None,
            mood_match: explain::book_mood_match(
                analysis.immediate_need,
                &mood,
                r.book_pacing,
                &r.book_themes,
            ),
            why: explain::book_why(
                analysis.immediate_need,
                &r.book_genres,
                &r.book_themes,
                r.book_depth,
                r.book_pacing,
            ),
            themes: r.book_themes.iter().take(4).cloned().collect(),
            reading_time: "Varies".to_string(),
            urls: Self::urls(&query),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ImmediateNeed;
    use crate::sources::tests::request_for;

    #[tokio::test]
    async fn test_music_link_is_percent_encoded() {
        let req = request_for(&["sad"], ImmediateNeed::Process);
        let rec = SearchLinkMusic.recommend(&req).await.unwrap();
        assert_eq!(rec.title, "Search: sad acoustic melancholic emotional");
        assert_eq!(
            rec.url,
            "https://open.spotify.com/search/sad%20acoustic%20melancholic%20emotional"
        );
        assert_eq!(rec.platform, "spotify");
        assert!(rec.use_case.ends_with("perfect for background listening"));
    }

    #[tokio::test]
    async fn test_movie_platforms_follow_genres() {
        // sad lists Animation among its movie genres
        let req = request_for(&["sad"], ImmediateNeed::Process);
        let rec = SearchLinkMovies.recommend(&req).await.unwrap();
        assert_eq!(rec.platforms, vec!["Disney+", "Netflix"]);
        assert!(rec.url.starts_with(TMDB_SEARCH));
        assert!(rec.url.contains("emotional%20moving%20loss"));
        assert_eq!(rec.genres, vec!["Drama", "Romance", "Animation"]);

        assert_eq!(
            SearchLinkMovies::platforms(&["Drama".to_string()]),
            vec!["Netflix", "Prime Video"]
        );
    }

    #[tokio::test]
    async fn test_book_links() {
        let req = request_for(&["lonely"], ImmediateNeed::Process);
        let rec = SearchLinkBooks.recommend(&req).await.unwrap();
        assert_eq!(rec.urls.len(), 3);
        assert_eq!(
            rec.urls["google_books"],
            "https://books.google.com/books?q=Fiction%20Romance%20loneliness%20connection"
        );
        assert!(rec.urls["amazon"].ends_with("&i=stripbooks"));
        assert!(rec.mood_match.contains("processing your lonely mood"));
    }
}
