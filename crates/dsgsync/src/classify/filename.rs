//! Filename templates per category.

use std::sync::LazyLock;

use regex::Regex;

use super::category::Category;
use super::date::ResolvedDate;
use super::flags::{Flags, Language};

static RE_PATH_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\\/]+").unwrap());

const DSG_TITLE: &str = "Divine Service Prep";

/// Builds the filename stem for a classified link.
pub fn compose(category: Category, date: &ResolvedDate, flags: &Flags, link_text: &str) -> String {
    compose_with_source(category, date, flags, link_text, "")
}

/// Like [`compose`], but categories without a template (bible references,
/// audio, transcripts) prefer `source_stem`, the original file name.
pub fn compose_with_source(
    category: Category,
    date: &ResolvedDate,
    flags: &Flags,
    link_text: &str,
    source_stem: &str,
) -> String {
    let text = link_text.trim();
    let lang = flags.label_language().map(Language::name).unwrap_or_default();
    let prefix = date_prefix(date);

    let label = match category {
        Category::Dsg => plain_dsg(date, flags, text),
        Category::Forward => edition(prefix, "Forward", lang, text),
        Category::FullDsg => edition(prefix, "Full DSG", lang, text),
        Category::SpecialDsg => edition(prefix, "Special Edition DSG", lang, text),
        Category::ChildrensService => edition(prefix, "Childrens Service", lang, text),
        Category::Youth if flags.serving_schedule || !flags.dsg_context => {
            roster(prefix, text, "Youth Schedule")
        }
        Category::Youth => edition(prefix, "Youth", lang, text),
        Category::Schedules => roster(prefix, text, "Serving Schedule"),
        Category::Seniors => roster(prefix, text, "Seniors Schedule"),
        Category::NaccCalendars => match prefix {
            Some(prefix) => format!("{prefix} NACC Calendar {text}"),
            None => format!("NACC Calendar {text}"),
        },
        Category::BibleReferences | Category::Audio | Category::Transcripts => {
            [source_stem.trim(), text]
                .into_iter()
                .find(|s| !s.is_empty())
                .unwrap_or("download")
                .to_string()
        }
    };

    let name = sanitize(&label);
    if is_usable(&name) {
        name
    } else {
        fallback_label(category)
    }
}

/// Stem plus the source extension (which carries its own dot).
pub fn with_extension(stem: &str, extension: &str) -> String {
    sanitize(&format!("{stem}{extension}"))
}

/// Replaces path separators with hyphens and collapses whitespace.
pub fn sanitize(name: &str) -> String {
    let replaced = RE_PATH_SEPARATORS.replace_all(name, "-");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Empty and dot-only names ("." and "..") would resolve outside the
// category folder.
fn is_usable(name: &str) -> bool {
    !name.trim_matches('.').is_empty()
}

fn fallback_label(category: Category) -> String {
    match category {
        Category::Dsg => DSG_TITLE.to_string(),
        Category::BibleReferences | Category::Audio | Category::Transcripts => "download".to_string(),
        other => other.folder_name().to_string(),
    }
}

// "December 2025", or just "2025" when only the year is known.
fn date_prefix(date: &ResolvedDate) -> Option<String> {
    match (date.month_name(), date.year()) {
        (Some(month), Some(year)) => Some(format!("{month} {year}")),
        (None, Some(year)) => Some(year.to_string()),
        _ => None,
    }
}

fn edition(prefix: Option<String>, tag: &str, lang: &str, text: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix} {tag} {lang}"),
        None => format!("{tag} {text}"),
    }
}

fn roster(prefix: Option<String>, text: &str, tag: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix} {text} {tag}"),
        None => format!("{text} {tag}"),
    }
}

// The weekly document is named after its exact service date. Without a
// spelled-out language, a bounded "en" code still labels it English.
fn plain_dsg(date: &ResolvedDate, flags: &Flags, text: &str) -> String {
    let (Some(exact), Some(month)) = (date.exact_date(), date.month_name()) else {
        return if text.is_empty() {
            DSG_TITLE.to_string()
        } else {
            text.to_string()
        };
    };

    let lang = flags
        .label_language()
        .or_else(|| flags.has_language(Language::English).then_some(Language::English))
        .map(Language::name)
        .unwrap_or_default();

    format!(
        "{} {} {} {} {} {}",
        exact.format("%A"),
        month,
        exact.format("%-d"),
        exact.format("%Y"),
        DSG_TITLE,
        lang
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, NaiveDate};

    use crate::classify::date::DateSource;

    fn december_2025() -> ResolvedDate {
        ResolvedDate::month_year(Month::December, 2025, DateSource::PageHint)
    }

    fn named(lang: Language) -> Flags {
        let mut flags = Flags::default();
        flags.language_names.insert(lang);
        flags.language_codes.insert(lang);
        flags
    }

    #[test]
    fn test_full_dsg_with_language() {
        let stem = compose(Category::FullDsg, &december_2025(), &named(Language::English), "December 7");
        assert_eq!(stem, "December 2025 Full DSG English");
    }

    #[test]
    fn test_language_omitted_without_trailing_space() {
        let stem = compose(Category::SpecialDsg, &december_2025(), &Flags::default(), "x");
        assert_eq!(stem, "December 2025 Special Edition DSG");
    }

    #[test]
    fn test_year_only_prefix() {
        let date = ResolvedDate::year_only(2026, DateSource::HrefYear);
        let stem = compose(Category::Forward, &date, &named(Language::French), "");
        assert_eq!(stem, "2026 Forward French");
    }

    #[test]
    fn test_edition_fallback_uses_link_text() {
        let stem = compose(Category::ChildrensService, &ResolvedDate::default(), &Flags::default(), "Easter");
        assert_eq!(stem, "Childrens Service Easter");
    }

    #[test]
    fn test_plain_dsg_with_exact_date() {
        let date = ResolvedDate::exact(
            NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(),
            DateSource::IsoDate,
        );
        let stem = compose(Category::Dsg, &date, &named(Language::French), "December 7");
        assert_eq!(stem, "Sunday December 7 2025 Divine Service Prep French");
    }

    #[test]
    fn test_plain_dsg_english_code_fallback() {
        let date = ResolvedDate::exact(
            NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            DateSource::IsoDate,
        );
        let mut flags = Flags::default();
        flags.language_codes.insert(Language::English);
        let stem = compose(Category::Dsg, &date, &flags, "");
        assert_eq!(stem, "Wednesday December 24 2025 Divine Service Prep English");
    }

    #[test]
    fn test_plain_dsg_without_exact_date() {
        assert_eq!(compose(Category::Dsg, &december_2025(), &Flags::default(), " Week 2 "), "Week 2");
        assert_eq!(compose(Category::Dsg, &december_2025(), &Flags::default(), ""), DSG_TITLE);
    }

    #[test]
    fn test_schedule_templates() {
        let date = ResolvedDate::month_year(Month::January, 2026, DateSource::PageHint);
        let flags = Flags::default();
        assert_eq!(
            compose(Category::Schedules, &date, &flags, "Kitchener"),
            "January 2026 Kitchener Serving Schedule"
        );
        assert_eq!(
            compose(Category::Seniors, &ResolvedDate::default(), &flags, "London"),
            "London Seniors Schedule"
        );
        assert_eq!(
            compose(Category::NaccCalendars, &date, &flags, "National"),
            "January 2026 NACC Calendar National"
        );
        assert_eq!(
            compose(Category::Youth, &date, &flags, "Ontario"),
            "January 2026 Ontario Youth Schedule"
        );
    }

    #[test]
    fn test_youth_edition_under_dsg_listing() {
        let mut flags = named(Language::French);
        flags.dsg_context = true;
        assert_eq!(
            compose(Category::Youth, &december_2025(), &flags, ""),
            "December 2025 Youth French"
        );
    }

    #[test]
    fn test_untemplated_categories_prefer_source_stem() {
        let flags = Flags::default();
        let date = december_2025();
        assert_eq!(
            compose_with_source(Category::Audio, &date, &flags, "Listen", "2025-12-07-audio-en"),
            "2025-12-07-audio-en"
        );
        assert_eq!(compose(Category::Transcripts, &date, &flags, "Transcript"), "Transcript");
        assert_eq!(compose(Category::BibleReferences, &date, &flags, ""), "download");
    }

    #[test]
    fn test_dot_only_text_falls_back_to_category_label() {
        let date = ResolvedDate::default();
        let flags = Flags::default();
        assert_eq!(compose(Category::Dsg, &date, &flags, ".."), DSG_TITLE);
        assert_eq!(compose(Category::Dsg, &date, &flags, " . "), DSG_TITLE);
        assert_eq!(compose(Category::Audio, &date, &flags, "..."), "download");
        assert_eq!(compose_with_source(Category::Transcripts, &date, &flags, "x", ".."), "download");
    }

    #[test]
    fn test_separators_are_sanitized() {
        let stem = compose(Category::Schedules, &ResolvedDate::default(), &Flags::default(), "Kitchener/Waterloo\\North");
        assert_eq!(stem, "Kitchener-Waterloo-North Serving Schedule");
        assert_eq!(with_extension("a//b", ".pdf"), "a-b.pdf");
    }
}
