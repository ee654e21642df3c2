//! Subject-tag based category inference.

use super::Category;

/// Keywords checked in order; the first hit decides the category.
const RULES: &[(&[&str], Category)] = &[
    (&["fantasy"], Category::Fantasy),
    (&["fiction", "novela"], Category::Fiction),
    (&["history", "historia"], Category::History),
    (&["science", "ciencia"], Category::Science),
];

/// Infer a category from free-text subject tags.
///
/// Tags are joined and lowercased before matching, so a tag list mixing
/// "Fantasy" and "Fiction" resolves to [`Category::Fantasy`]. Empty input or
/// no match yields [`Category::Others`].
pub fn infer_category<S: AsRef<str>>(subjects: &[S]) -> Category {
    if subjects.is_empty() {
        return Category::Others;
    }

    let text = subjects
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Others)
}
