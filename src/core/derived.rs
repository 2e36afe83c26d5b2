//! Values computed from the current course rows. Nothing here is cached; the
//! lists are small enough to recompute every frame.

use std::{
    cmp::Ordering,
    collections::HashSet,
    sync::Arc,
};

use icu_collator::{
    Collator,
    CollatorOptions,
};

use super::CourseRecord;

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Compares two strings with locale collation, falling back to byte order only
/// to break ties between strings the collator considers equal.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    })
}

/// Trimmed, non-empty, de-duplicated course names in collation order.
pub fn unique_course_names(records: &[Arc<CourseRecord>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = records
        .iter()
        .map(|record| record.name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect();

    names.sort_by(|a, b| locale_compare(a, b));
    names
}

pub fn selected_courses(records: &[Arc<CourseRecord>]) -> Vec<&CourseRecord> {
    records.iter().map(Arc::as_ref).filter(|record| record.selected).collect()
}

pub fn total_selected_credits(records: &[Arc<CourseRecord>]) -> f64 {
    selected_courses(records).iter().map(|record| record.credits_or_zero()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, category: &str, credits: Option<f64>, selected: bool) -> Arc<CourseRecord> {
        Arc::new(CourseRecord {
            name: name.to_string(),
            category: category.to_string(),
            credits,
            selected,
            ..Default::default()
        })
    }

    #[test]
    fn test_selected_courses_and_credit_total() {
        let records = vec![row("Algo", "CS", Some(5.0), true), row("Bio", "Sci", Some(3.0), false)];

        let selected = selected_courses(&records);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Algo");
        assert_eq!(total_selected_credits(&records), 5.0);
    }

    #[test]
    fn test_missing_credits_count_as_zero() {
        let records = vec![
            row("Algo", "CS", Some(5.0), true),
            row("Thesis", "Research", None, true),
            row("Bio", "Sci", Some(30.0), false),
            row("Stats", "CS", Some(4.5), true),
        ];

        let expected: f64 = records
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.credits.unwrap_or(0.0))
            .sum();

        assert_eq!(total_selected_credits(&records), expected);
        assert_eq!(total_selected_credits(&records), 9.5);
        assert_eq!(total_selected_credits(&[]), 0.0);
    }

    #[test]
    fn test_unique_names_are_trimmed_and_deduplicated() {
        let records = vec![
            row("  Algo ", "", None, false),
            row("Algo", "", None, false),
            row("   ", "", None, false),
            row("", "", None, false),
            row("Bio", "", None, true),
        ];

        assert_eq!(unique_course_names(&records), vec!["Algo", "Bio"]);
    }

    #[test]
    fn test_unique_names_use_collation_not_byte_order() {
        let records = vec![
            row("cherry", "", None, false),
            row("Banana", "", None, false),
            row("apple", "", None, false),
            row("Äpfel", "", None, false),
        ];

        let names = unique_course_names(&records);

        // Byte order would put "Banana" first and "Äpfel" last.
        assert_eq!(names, vec!["Äpfel", "apple", "Banana", "cherry"]);

        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(deduped, names);
        assert!(names.windows(2).all(|w| locale_compare(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_case_variants_are_distinct_names() {
        let records = vec![row("algo", "", None, false), row("Algo", "", None, false)];
        let names = unique_course_names(&records);

        assert_eq!(names.len(), 2);
        assert_eq!(names, vec!["algo", "Algo"]);
    }
}
