//! Human-facing sentences explaining why a recommendation fits the mood.

use crate::analysis::{ImmediateNeed, MoodAnalysis};
use crate::sources::{BookRecommendation, MovieRecommendation, MusicRecommendation};
use moodmatch_core::{BookDepth, BookPacing, Energy, MovieTone};

fn spaced(name: &str) -> String {
    name.replace('_', " ")
}

// ============================================================================
// Music
// ============================================================================

pub fn music_mood_match(need: ImmediateNeed, mood: &str, intensity: u8) -> String {
    match need {
        ImmediateNeed::Escape => format!(
            "Helps you escape from feeling {} with uplifting and distracting music",
            mood
        ),
        ImmediateNeed::Process => format!(
            "Music that resonates with your {} mood, helping you process these feelings",
            mood
        ),
        ImmediateNeed::Uplift => format!(
            "Upbeat and energizing tracks to lift you out of feeling {}",
            mood
        ),
        ImmediateNeed::Calm => format!(
            "Soothing music to calm your {} state (intensity: {}/10)",
            mood, intensity
        ),
        ImmediateNeed::Match => format!(
            "Perfect match for your {} mood, amplifying what you're feeling",
            mood
        ),
        ImmediateNeed::Channel => format!(
            "Channel your {} energy productively with this energetic music",
            mood
        ),
    }
}

pub fn music_use_case(need: ImmediateNeed, energy: Energy) -> String {
    let base = match need {
        ImmediateNeed::Escape => "When you need a mental break or distraction",
        ImmediateNeed::Process => "During quiet reflection or journaling time",
        ImmediateNeed::Uplift => "Morning routine or workout to boost energy",
        ImmediateNeed::Calm => "Evening wind-down or meditation sessions",
        ImmediateNeed::Match => "Anytime you want to amplify your current mood",
        ImmediateNeed::Channel => "During high-energy activities or workouts",
    };
    match energy {
        Energy::High | Energy::VeryHigh => format!("{}, great for active listening", base),
        Energy::Low | Energy::VeryLow => format!("{}, perfect for background listening", base),
        Energy::Medium => base.to_string(),
    }
}

// ============================================================================
// Movies
// ============================================================================

pub fn movie_mood_match(
    need: ImmediateNeed,
    mood: &str,
    intensity: u8,
    genres: &[String],
) -> String {
    let genre = if genres.is_empty() {
        "movie".to_string()
    } else {
        genres.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    };
    match need {
        ImmediateNeed::Escape => format!(
            "An engaging {} to help you escape feeling {}",
            genre, mood
        ),
        ImmediateNeed::Process => format!(
            "A thoughtful {} that resonates with your {} mood",
            genre, mood
        ),
        ImmediateNeed::Uplift => format!(
            "An uplifting {} to lift your spirits from feeling {}",
            genre, mood
        ),
        ImmediateNeed::Calm => format!(
            "A calming {} to soothe your {} state (intensity: {}/10)",
            genre, mood, intensity
        ),
        ImmediateNeed::Match => format!("Perfect {} match for your {} mood", genre, mood),
        ImmediateNeed::Channel => format!("An intense {} to channel your {} energy", genre, mood),
    }
}

pub fn movie_why(
    need: ImmediateNeed,
    genres: &[String],
    themes: &[String],
    tone: MovieTone,
) -> String {
    let mut parts = Vec::new();
    if genres.is_empty() {
        parts.push("This movie".to_string());
    } else {
        let genre: Vec<String> = genres.iter().take(2).map(|g| g.to_lowercase()).collect();
        parts.push(format!("This {} film", genre.join(", ")));
    }
    if !themes.is_empty() {
        let theme: Vec<&str> = themes.iter().take(2).map(String::as_str).collect();
        parts.push(format!("explores {}", theme.join(" and ")));
    }
    parts.push(format!("with a {} tone", tone));
    match need {
        ImmediateNeed::Process => parts.push("helping you process your emotions".into()),
        ImmediateNeed::Escape => parts.push("providing an immersive escape".into()),
        ImmediateNeed::Uplift => parts.push("designed to uplift and inspire".into()),
        _ => {}
    }
    format!("{}.", parts.join(", "))
}

// ============================================================================
// Books
// ============================================================================

pub fn book_mood_match(
    need: ImmediateNeed,
    mood: &str,
    pacing: BookPacing,
    themes: &[String],
) -> String {
    let theme = if themes.is_empty() {
        "compelling story".to_string()
    } else {
        themes.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
    };
    let pacing = spaced(pacing.as_str());
    match need {
        ImmediateNeed::Escape => format!(
            "An immersive {}-paced read to escape your {} state",
            pacing, mood
        ),
        ImmediateNeed::Process => format!(
            "A thoughtful exploration of {}, perfect for processing your {} mood",
            theme, mood
        ),
        ImmediateNeed::Uplift => format!("An uplifting story to lift you from feeling {}", mood),
        ImmediateNeed::Calm => format!("A {}-paced book to calm your {} mind", pacing, mood),
        ImmediateNeed::Match => format!(
            "Resonates perfectly with your {} mood through themes of {}",
            mood, theme
        ),
        ImmediateNeed::Channel => format!(
            "An engaging read to productively channel your {} energy",
            mood
        ),
    }
}

pub fn book_why(
    need: ImmediateNeed,
    genres: &[String],
    themes: &[String],
    depth: BookDepth,
    pacing: BookPacing,
) -> String {
    let mut parts = Vec::new();
    match genres.first() {
        Some(genre) => parts.push(format!("This {} book", genre)),
        None => parts.push("This book".to_string()),
    }
    if !themes.is_empty() {
        let theme: Vec<&str> = themes.iter().take(2).map(String::as_str).collect();
        parts.push(format!("explores {}", theme.join(", ")));
    }
    parts.push(format!("with {} depth and {} pacing", depth, spaced(pacing.as_str())));
    match need {
        ImmediateNeed::Process => {
            parts.push("offering space for reflection and emotional processing".into())
        }
        ImmediateNeed::Escape => {
            parts.push("providing an engaging escape from current feelings".into())
        }
        ImmediateNeed::Uplift => parts.push("designed to inspire and elevate your mood".into()),
        ImmediateNeed::Calm => parts.push("creating a calming reading experience".into()),
        _ => {}
    }
    format!("{}.", parts.join(", "))
}

// ============================================================================
// Reply assembly
// ============================================================================

fn need_phrase(need: ImmediateNeed) -> &'static str {
    match need {
        ImmediateNeed::Escape => {
            "Let me help you find some great ways to escape and shift your perspective."
        }
        ImmediateNeed::Process => {
            "Here are some thoughtful recommendations to help you process these feelings."
        }
        ImmediateNeed::Uplift => "I've found some uplifting options to help improve your mood.",
        ImmediateNeed::Calm => "These recommendations should help you find some calm and peace.",
        ImmediateNeed::Match => "Here are some perfect matches for your current mood.",
        ImmediateNeed::Channel => {
            "These recommendations will help you channel that energy productively."
        }
    }
}

fn need_context(need: ImmediateNeed) -> &'static str {
    match need {
        ImmediateNeed::Escape => "to help you escape",
        ImmediateNeed::Process => "to help you process your feelings",
        ImmediateNeed::Uplift => "to uplift your spirits",
        ImmediateNeed::Calm => "to calm your mind",
        ImmediateNeed::Match => "that match your current state",
        ImmediateNeed::Channel => "to channel your energy",
    }
}

/// One-sentence overview of what was found.
pub fn summary(
    analysis: &MoodAnalysis,
    mood: &str,
    music: Option<&MusicRecommendation>,
    movie: Option<&MovieRecommendation>,
    book: Option<&BookRecommendation>,
) -> String {
    let mut found = Vec::new();
    if let Some(music) = music {
        found.push(format!("music from {}", music.platform));
    }
    if let Some(movie) = movie {
        found.push(match movie.year {
            Some(year) => format!("a {} film", year),
            None => "a movie".to_string(),
        });
    }
    if let Some(book) = book {
        found.push(match &book.author {
            Some(author) => format!("a book by {}", author),
            None => "a book".to_string(),
        });
    }

    let Some((last, rest)) = found.split_last() else {
        return format!(
            "Unable to generate recommendations for your {} mood at this time.",
            mood
        );
    };
    let listed = if rest.is_empty() {
        last.clone()
    } else {
        format!("{} and {}", rest.join(", "), last)
    };
    format!(
        "For your {} mood (intensity: {}/10) {}, we recommend {}.",
        mood,
        analysis.intensity,
        need_context(analysis.immediate_need),
        listed
    )
}

/// Full conversational reply listing each recommendation.
pub fn reply(
    analysis: &MoodAnalysis,
    mood: &str,
    music: Option<&MusicRecommendation>,
    movie: Option<&MovieRecommendation>,
    book: Option<&BookRecommendation>,
) -> String {
    let opening = if analysis.intensity >= 7 {
        format!("I can sense you're feeling quite {} right now.", mood)
    } else {
        format!("I understand you're feeling {}.", mood)
    };
    let mut text = format!("{} {}\n\n", opening, need_phrase(analysis.immediate_need));

    if let Some(music) = music {
        text.push_str(&format!("Music: {}\n", music.title));
        text.push_str(&format!("   {}\n", music.mood_match));
        text.push_str(&format!("   Perfect for: {}\n", music.use_case));
        if let Some(duration) = &music.duration {
            text.push_str(&format!("   Duration: {}\n", duration));
        }
        text.push_str(&format!("   Listen: {}\n\n", music.url));
    }

    if let Some(movie) = movie {
        text.push_str(&format!("Movie: {}", movie.title));
        if let Some(year) = movie.year {
            text.push_str(&format!(" ({})", year));
        }
        text.push('\n');
        text.push_str(&format!("   {}\n", movie.mood_match));
        text.push_str(&format!("   {}\n", movie.why));
        if !movie.genres.is_empty() {
            text.push_str(&format!("   Genres: {}\n", movie.genres.join(", ")));
        }
        if !movie.platforms.is_empty() {
            text.push_str(&format!("   Try: {}\n", movie.platforms.join(", ")));
        }
        if let Some(rating) = movie.rating {
            text.push_str(&format!("   Rating: {}/10\n", rating));
        }
        text.push_str(&format!("   Watch: {}\n\n", movie.url));
    }

    if let Some(book) = book {
        text.push_str(&format!("Book: {}\n", book.title));
        if let Some(author) = &book.author {
            text.push_str(&format!("   by {}\n", author));
        }
        text.push_str(&format!("   {}\n", book.mood_match));
        text.push_str(&format!("   {}\n", book.why));
        text.push_str(&format!("   Reading time: {}\n", book.reading_time));
        if let Some(url) = book.urls.get("google_books") {
            text.push_str(&format!("   Find it: {}\n\n", url));
        }
    }

    text.push_str(
        "I hope these recommendations help! Let me know if you'd like different suggestions.",
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_music_use_case_energy_suffix() {
        assert_eq!(
            music_use_case(ImmediateNeed::Process, Energy::Low),
            "During quiet reflection or journaling time, perfect for background listening"
        );
        assert_eq!(
            music_use_case(ImmediateNeed::Channel, Energy::VeryHigh),
            "During high-energy activities or workouts, great for active listening"
        );
        assert_eq!(
            music_use_case(ImmediateNeed::Match, Energy::Medium),
            "Anytime you want to amplify your current mood"
        );
    }

    #[test]
    fn test_music_mood_match_calm_mentions_intensity() {
        let text = music_mood_match(ImmediateNeed::Calm, "anxious", 8);
        assert_eq!(text, "Soothing music to calm your anxious state (intensity: 8/10)");
    }

    #[test]
    fn test_movie_why() {
        let why = movie_why(
            ImmediateNeed::Process,
            &strings(&["Drama", "Romance", "Animation"]),
            &strings(&["loss", "grief", "healing"]),
            MovieTone::Serious,
        );
        assert_eq!(
            why,
            "This drama, romance film, explores loss and grief, with a serious tone, \
             helping you process your emotions."
        );
        let bare = movie_why(ImmediateNeed::Match, &[], &[], MovieTone::Light);
        assert_eq!(bare, "This movie, with a light tone.");
    }

    #[test]
    fn test_movie_mood_match_without_genres() {
        assert_eq!(
            movie_mood_match(ImmediateNeed::Match, "happy", 5, &[]),
            "Perfect movie match for your happy mood"
        );
    }

    #[test]
    fn test_book_texts_use_spaced_pacing() {
        let themes = strings(&["rest", "comfort"]);
        assert_eq!(
            book_mood_match(ImmediateNeed::Calm, "tired", BookPacing::VerySlow, &themes),
            "A very slow-paced book to calm your tired mind"
        );
        assert_eq!(
            book_why(
                ImmediateNeed::Calm,
                &strings(&["Poetry"]),
                &themes,
                BookDepth::Light,
                BookPacing::Slow
            ),
            "This Poetry book, explores rest, comfort, with light depth and slow pacing, \
             creating a calming reading experience."
        );
    }

    #[test]
    fn test_summary_lists_available_items() {
        let analysis = MoodAnalysis::new("sad", 7, ImmediateNeed::Process);
        let music = MusicRecommendation {
            title: "Search: sad".into(),
            platform: "spotify".into(),
            url: "https://open.spotify.com/search/sad".into(),
            mood_match: String::new(),
            use_case: String::new(),
            duration: None,
            artists: vec![],
        };
        let book = BookRecommendation {
            title: "Search: Fiction".into(),
            author: None,
            mood_match: String::new(),
            why: String::new(),
            themes: vec![],
            reading_time: "Varies".into(),
            urls: Default::default(),
        };
        assert_eq!(
            summary(&analysis, "sad", Some(&music), None, Some(&book)),
            "For your sad mood (intensity: 7/10) to help you process your feelings, \
             we recommend music from spotify and a book."
        );
        assert_eq!(
            summary(&analysis, "sad", None, None, None),
            "Unable to generate recommendations for your sad mood at this time."
        );
    }

    #[test]
    fn test_reply_opening_depends_on_intensity() {
        let strong = MoodAnalysis::new("sad", 8, ImmediateNeed::Process);
        let mild = MoodAnalysis::new("sad", 3, ImmediateNeed::Process);
        assert!(reply(&strong, "sad", None, None, None)
            .starts_with("I can sense you're feeling quite sad"));
        assert!(reply(&mild, "sad", None, None, None)
            .starts_with("I understand you're feeling sad."));
    }
}
