//! Keyword-based content category classification.

use std::collections::BTreeMap;

use influtrust_core::category::keyword_tokens;
use influtrust_core::{Category, CategoryCount, CategoryDictionary, Platform, PlatformProfile};

/// Categories kept per profile.
pub const TOP_CATEGORIES: usize = 3;

/// Category reported when nothing in the profile matched the dictionary.
pub const DEFAULT_CATEGORY: Category = Category::General;

/// Running per-category hit counts.
#[derive(Debug, Default)]
struct Tally(BTreeMap<Category, u32>);

impl Tally {
    fn add(&mut self, category: Category) {
        *self.0.entry(category).or_insert(0) += 1;
    }

    /// Add one hit per dictionary keyword found in `text`.
    ///
    /// Repeated keywords count every time, and one text can feed several
    /// categories.
    fn add_text(&mut self, dictionary: &CategoryDictionary, text: &str) {
        let lower = text.to_lowercase();
        for token in keyword_tokens(&lower) {
            if let Some(category) = dictionary.keyword(token) {
                self.add(category);
            }
        }
    }

    /// Top [`TOP_CATEGORIES`] by count; ties keep canonical category order.
    fn into_top(self) -> Vec<CategoryCount> {
        if self.0.is_empty() {
            return vec![CategoryCount {
                category: DEFAULT_CATEGORY,
                count: 1,
            }];
        }
        let mut counts: Vec<CategoryCount> = self
            .0
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        // BTreeMap iteration is already in canonical order; a stable sort on
        // count alone preserves it among equals.
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(TOP_CATEGORIES);
        counts
    }
}

/// Classify a profile into at most three categories.
///
/// - Instagram: keywords and hashtags in captions.
/// - `YouTube`: video category IDs, tags, titles and descriptions.
/// - `LinkedIn`: organization industry and post text.
#[must_use]
pub fn classify_categories(
    profile: &PlatformProfile,
    dictionary: &CategoryDictionary,
) -> Vec<CategoryCount> {
    let mut tally = Tally::default();

    match profile.platform {
        Platform::Instagram => {}
        Platform::YouTube => {
            for id in &profile.category_ids {
                if let Some(category) = dictionary.youtube_category(id) {
                    tally.add(category);
                }
            }
            for tag in &profile.tags {
                tally.add_text(dictionary, tag);
            }
        }
        Platform::LinkedIn => {
            if let Some(industry) = profile.industry.as_deref() {
                for category in dictionary.industry_matches(industry) {
                    tally.add(category);
                }
            }
        }
    }

    for caption in profile
        .samples
        .samples()
        .iter()
        .filter_map(|s| s.caption.as_deref())
    {
        tally.add_text(dictionary, caption);
    }

    let top = tally.into_top();
    tracing::debug!(
        platform = %profile.platform,
        platform_id = %profile.platform_id,
        categories = ?top,
        "classified profile"
    );
    top
}

/// Classify free text alone, e.g. a single caption.
#[must_use]
pub fn classify_text(text: &str, dictionary: &CategoryDictionary) -> Vec<CategoryCount> {
    let mut tally = Tally::default();
    tally.add_text(dictionary, text);
    tally.into_top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use influtrust_core::{EngagementSample, SampleSet};

    fn with_captions(platform: Platform, captions: &[&str]) -> PlatformProfile {
        let mut profile = PlatformProfile::new(platform, "p1", "Test");
        profile.samples = SampleSet::Fetched(
            captions
                .iter()
                .map(|c| EngagementSample {
                    caption: Some((*c).to_string()),
                    ..EngagementSample::default()
                })
                .collect(),
        );
        profile
    }

    fn categories(counts: &[CategoryCount]) -> Vec<Category> {
        counts.iter().map(|c| c.category).collect()
    }

    #[test]
    fn instagram_caption_yields_fitness_and_nutrition() {
        let dict = CategoryDictionary::default();
        let profile = with_captions(
            Platform::Instagram,
            &["Amo minha rotina de fitness e nutrição! #fitness #nutricao"],
        );
        let result = classify_categories(&profile, &dict);
        let fitness = result.iter().find(|c| c.category == Category::Fitness);
        let nutrition = result.iter().find(|c| c.category == Category::Nutrition);
        assert!(fitness.is_some_and(|c| c.count >= 1), "got {result:?}");
        assert!(nutrition.is_some_and(|c| c.count >= 1), "got {result:?}");
    }

    #[test]
    fn repeated_keywords_are_counted_each_time() {
        let dict = CategoryDictionary::default();
        let result = classify_text("#fitness fitness treino", &dict);
        assert_eq!(
            result,
            vec![CategoryCount {
                category: Category::Fitness,
                count: 3
            }]
        );
    }

    #[test]
    fn one_caption_can_feed_several_categories() {
        let dict = CategoryDictionary::default();
        let result = classify_text("yoga e dieta", &dict);
        assert_eq!(categories(&result), vec![Category::Nutrition, Category::Wellness]);
    }

    #[test]
    fn keeps_only_top_three_sorted_by_count() {
        let dict = CategoryDictionary::default();
        let result = classify_text(
            "#yoga #yoga #yoga #dieta #dieta #treino #treino #treino #treino #skincare",
            &dict,
        );
        assert_eq!(
            categories(&result),
            vec![Category::Fitness, Category::Wellness, Category::Nutrition]
        );
        assert_eq!(result[0].count, 4);
    }

    #[test]
    fn ties_follow_canonical_order() {
        let dict = CategoryDictionary::default();
        let result = classify_text("#fitness #saude", &dict);
        assert_eq!(categories(&result), vec![Category::Health, Category::Fitness]);
    }

    #[test]
    fn no_match_falls_back_to_general() {
        let dict = CategoryDictionary::default();
        let profile = with_captions(Platform::Instagram, &["bom dia!", ""]);
        assert_eq!(
            classify_categories(&profile, &dict),
            vec![CategoryCount {
                category: DEFAULT_CATEGORY,
                count: 1
            }]
        );
    }

    #[test]
    fn youtube_uses_category_ids_and_tags() {
        let dict = CategoryDictionary::default();
        let mut profile = with_captions(Platform::YouTube, &["Treino em casa"]);
        profile.category_ids = vec!["17".to_string(), "17".to_string(), "28".to_string()];
        profile.tags = vec!["saude mental".to_string(), "Fitness".to_string()];
        let result = classify_categories(&profile, &dict);
        assert_eq!(
            result,
            vec![
                CategoryCount {
                    category: Category::Fitness,
                    count: 2
                },
                CategoryCount {
                    category: Category::Sports,
                    count: 2
                },
                CategoryCount {
                    category: Category::Health,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn linkedin_uses_industry_and_post_text() {
        let dict = CategoryDictionary::default();
        let mut profile = with_captions(Platform::LinkedIn, &["Nova pesquisa sobre vacinas"]);
        profile.industry = Some("Hospital & Health Care".to_string());
        let result = classify_categories(&profile, &dict);
        assert_eq!(
            categories(&result),
            vec![Category::Medicine, Category::Health, Category::Education]
        );
        assert_eq!(result[0].count, 2);
    }

    #[test]
    fn instagram_ignores_youtube_hints() {
        let dict = CategoryDictionary::default();
        let mut profile = with_captions(Platform::Instagram, &["#beleza"]);
        profile.category_ids = vec!["17".to_string()];
        assert_eq!(
            categories(&classify_categories(&profile, &dict)),
            vec![Category::Beauty]
        );
    }

    #[test]
    fn injected_dictionary_is_used() {
        let dict = CategoryDictionary::from_yaml_str("keywords:\n  pilates: fitness\n").unwrap();
        let result = classify_text("Aula de pilates e #fitness", &dict);
        assert_eq!(
            result,
            vec![CategoryCount {
                category: Category::Fitness,
                count: 1
            }]
        );
    }
}
