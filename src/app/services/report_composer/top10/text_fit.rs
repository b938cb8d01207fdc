//! Fitting text into fixed-width image columns

use crate::constants::image_layout::ELLIPSIS;

/// Width of rendered text in pixels
///
/// Implemented by the font face used for drawing; tests use a fixed-advance
/// measurer.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Shorten text until it fits `max_width`
///
/// Text that already fits is returned unchanged. Text of more than two words
/// is cut to its first two words, then to its first word. Anything still too
/// wide loses characters from the end and gets an ellipsis.
pub fn fit_text_to_width(
    measure: &dyn TextMeasure,
    text: &str,
    max_width: f32,
    font_size: f32,
) -> String {
    let fits = |candidate: &str| measure.measure(candidate, font_size) <= max_width;

    if fits(text) {
        return text.to_string();
    }

    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > 2 {
        let first_two = format!("{} {}", words[0], words[1]);
        if fits(&first_two) {
            return first_two;
        }
        if fits(words[0]) {
            return words[0].to_string();
        }
        return truncate_with_ellipsis(measure, words[0], max_width, font_size);
    }

    truncate_with_ellipsis(measure, text, max_width, font_size)
}

fn truncate_with_ellipsis(
    measure: &dyn TextMeasure,
    text: &str,
    max_width: f32,
    font_size: f32,
) -> String {
    let mut kept: Vec<char> = text.chars().collect();

    while !kept.is_empty() {
        let candidate: String = kept.iter().collect::<String>() + ELLIPSIS;
        if measure.measure(&candidate, font_size) <= max_width {
            return candidate;
        }
        kept.pop();
    }

    ELLIPSIS.to_string()
}
