//! Decides which discovered links a user's selection asks for.

use std::collections::BTreeSet;

use super::schema::{ContentType, ScheduleGroup, UserSelection};
use crate::classify::{href::decode, Category, Flags, Language};

/// Returns whether a DSG-area link matches the selection.
///
/// A plain (non-special) document is included when its language matches a
/// globally selected language. Any document is included when it matches an
/// active type filter, honouring that type's own language restriction and
/// falling back to the global languages. With nothing selected at all,
/// nothing is included.
pub fn included(flags: &Flags, selection: &UserSelection) -> bool {
    let globals = selection.global_languages();
    let types: Vec<ContentType> = selection.type_filters().collect();

    if globals.is_empty() && types.is_empty() {
        return false;
    }

    let standard = !flags.is_special_type() && globals.iter().any(|l| flags.has_language(*l));

    standard
        || types
            .into_iter()
            .any(|t| type_matches(t, flags, selection, &globals))
}

fn type_matches(
    content_type: ContentType,
    flags: &Flags,
    selection: &UserSelection,
    globals: &BTreeSet<Language>,
) -> bool {
    let signal = match content_type {
        ContentType::English | ContentType::French => false,
        ContentType::Audio => flags.audio,
        ContentType::Transcript => flags.transcript,
        ContentType::BibleReading => flags.bible_reading,
        ContentType::SpecialEditionDsg => flags.special_edition_dsg,
        ContentType::Foreword => flags.foreword,
        ContentType::Youth => flags.youth,
        ContentType::ChildrensService => flags.children,
        // A reference sheet bundled with a Full DSG comes along with
        // whichever of the two was asked for, never under both.
        ContentType::BibleReferences => {
            flags.bible_references && !(flags.full_dsg && selection.has(ContentType::FullDsg))
        }
        ContentType::FullDsg => {
            flags.full_dsg
                && !(flags.bible_references && selection.has(ContentType::BibleReferences))
        }
    };

    signal && language_ok(flags, selection.languages_for(content_type), globals)
}

fn language_ok(flags: &Flags, per_type: &BTreeSet<Language>, globals: &BTreeSet<Language>) -> bool {
    if !per_type.is_empty() {
        return per_type.iter().any(|l| flags.has_language(*l));
    }
    if !globals.is_empty() {
        return globals.iter().any(|l| flags.has_language(*l));
    }
    true
}

/// Returns whether a link in a schedule section should be downloaded.
///
/// The section header must name a selected schedule group. When that group
/// has sub-selections (districts), one of them must appear in the link text
/// or href.
pub fn schedule_link_included(
    section_header: &str,
    link_text: &str,
    href: &str,
    selection: &UserSelection,
) -> bool {
    let Some(group) = ScheduleGroup::parse(section_header) else {
        return false;
    };
    if !selection.schedule_groups.contains(&group) {
        return false;
    }

    match selection.subgroups_for(group) {
        None => true,
        Some(subs) => {
            let text = link_text.to_lowercase();
            let href = decode(href).to_lowercase();
            subs.iter().any(|s| {
                let s = s.trim().to_lowercase();
                !s.is_empty() && (text.contains(&s) || href.contains(&s))
            })
        }
    }
}

/// Category subfolders to pre-create for a selection, in category order.
pub fn required_subfolders(selection: &UserSelection) -> Vec<Category> {
    let categories: BTreeSet<Category> = selection
        .content_types
        .iter()
        .map(|t| t.category())
        .chain(selection.schedule_groups.iter().map(|g| g.category()))
        .collect();
    categories.into_iter().collect()
}
