//! Heuristic section generation from video metadata.
//!
//! When no upstream analysis supplies a breakdown, sections are derived
//! from the metadata alone: the video splits into equal slices, with titles
//! picked from keyword buckets over the title and description. Crude, but
//! it gives the chat pipeline time ranges to cite from day one.

use crate::video::Section;

/// Target slice length in seconds when deriving section count.
const SLICE_SECONDS: u32 = 120;
/// Minimum and maximum generated sections.
const MIN_SECTIONS: u32 = 3;
const MAX_SECTIONS: u32 = 7;

/// Generate a section breakdown from metadata.
///
/// Produces `clamp(duration / 120, 3, 7)` contiguous slices. The first is
/// always an introduction and the last a conclusion; middle titles come
/// from [`extract_topics`].
pub fn generate_sections(title: &str, description: &str, duration: u32) -> Vec<Section> {
    let duration = if duration == 0 { 600 } else { duration };
    let count = (duration / SLICE_SECONDS).clamp(MIN_SECTIONS, MAX_SECTIONS);
    let slice = duration as f64 / count as f64;

    let topics = extract_topics(title, description);

    (0..count)
        .map(|i| {
            let start_time = (i as f64 * slice).floor() as u32;
            let end_time = ((i + 1) as f64 * slice).floor() as u32;

            let (section_title, section_description) = if i == 0 {
                (
                    "Introduction & Overview".to_string(),
                    "Opening segment introducing the main topic".to_string(),
                )
            } else if i == count - 1 {
                (
                    "Conclusion & Summary".to_string(),
                    "Closing segment with key takeaways".to_string(),
                )
            } else {
                match topics.get(i as usize - 1) {
                    Some(topic) => (
                        topic.to_string(),
                        format!("Discussion of {}", topic.to_lowercase()),
                    ),
                    None => (
                        format!("Key Topic {}", i),
                        format!("Main content discussion part {}", i),
                    ),
                }
            };

            Section {
                index: i + 1,
                title: section_title,
                start_time,
                end_time,
                description: section_description,
                excerpt: None,
            }
        })
        .collect()
}

/// Pick topic titles from keyword buckets over the title and description.
fn extract_topics(title: &str, description: &str) -> Vec<&'static str> {
    let text = format!("{} {}", title, description).to_lowercase();

    if text.contains("tutorial") || text.contains("how to") {
        vec!["Tutorial Steps", "Implementation", "Best Practices"]
    } else if text.contains("review") || text.contains("comparison") {
        vec!["Overview", "Detailed Analysis", "Comparison"]
    } else if text.contains("guide") || text.contains("learn") {
        vec!["Fundamentals", "Core Concepts", "Advanced Topics"]
    } else if text.contains("interview") || text.contains("discussion") {
        vec!["Background", "Main Discussion", "Key Insights"]
    } else {
        vec!["Main Content", "Key Points", "Examples", "Applications"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_count_clamped() {
        // 600s / 120 = 5 sections.
        assert_eq!(generate_sections("t", "d", 600).len(), 5);
        // Short videos still get 3.
        assert_eq!(generate_sections("t", "d", 60).len(), 3);
        // Long videos cap at 7.
        assert_eq!(generate_sections("t", "d", 100_000).len(), 7);
    }

    #[test]
    fn test_sections_are_contiguous_slices() {
        let sections = generate_sections("t", "d", 600);
        assert_eq!(sections[0].start_time, 0);
        assert_eq!(sections.last().unwrap().end_time, 600);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }

    #[test]
    fn test_first_and_last_titles_fixed() {
        let sections = generate_sections("t", "d", 600);
        assert_eq!(sections[0].title, "Introduction & Overview");
        assert_eq!(sections.last().unwrap().title, "Conclusion & Summary");
    }

    #[test]
    fn test_tutorial_bucket_titles() {
        let sections = generate_sections("Rust tutorial for beginners", "", 600);
        assert_eq!(sections[1].title, "Tutorial Steps");
        assert_eq!(sections[2].title, "Implementation");
    }

    #[test]
    fn test_indexes_one_based_in_order() {
        let sections = generate_sections("t", "d", 900);
        let indexes: Vec<u32> = sections.iter().map(|s| s.index).collect();
        assert_eq!(indexes, (1..=indexes.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_duration_uses_default() {
        let sections = generate_sections("t", "d", 0);
        assert_eq!(sections.len(), 5);
        assert_eq!(sections.last().unwrap().end_time, 600);
    }
}
