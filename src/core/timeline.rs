//! Selected courses laid out by study year and quarter.

use std::sync::Arc;

use super::CourseRecord;

pub const QUARTERS: usize = 4;

/// Quarter numbers listed in free text such as "1, 3". Anything that is not a
/// number from 1 to 4 is skipped.
pub fn parse_quarters(text: &str) -> Vec<usize> {
    text.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|quarter| (1..=QUARTERS).contains(quarter))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub name: String,
    pub category: String,
    pub credits: f64,
    /// Which of Q1..Q4 the course runs in.
    pub quarters: [bool; QUARTERS],
    first_quarter: Option<usize>,
}

impl TimelineRow {
    fn from_record(record: &CourseRecord) -> Self {
        let listed = parse_quarters(&record.quarter);
        let mut quarters = [false; QUARTERS];
        for quarter in &listed {
            quarters[quarter - 1] = true;
        }

        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            credits: record.credits_or_zero(),
            quarters,
            first_quarter: listed.iter().copied().min(),
        }
    }

    pub fn is_elective(&self) -> bool {
        self.category.contains("Electives")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineBlock {
    pub rows: Vec<TimelineRow>,
    /// Credits per quarter; a course's credits are split evenly over the
    /// quarters it lists.
    pub quarter_credits: [f64; QUARTERS],
}

impl TimelineBlock {
    fn from_records<'a>(records: impl Iterator<Item = &'a CourseRecord>) -> Self {
        let mut block = Self::default();

        for record in records {
            let listed = parse_quarters(&record.quarter);
            if !listed.is_empty() {
                let share = record.credits_or_zero() / listed.len() as f64;
                for quarter in &listed {
                    block.quarter_credits[quarter - 1] += share;
                }
            }
            block.rows.push(TimelineRow::from_record(record));
        }

        // Stable, so courses starting in the same quarter keep table order.
        block.rows.sort_by_key(|row| row.first_quarter.unwrap_or(usize::MAX));
        block
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Q1 + Q2.
    pub fn semester1_credits(&self) -> f64 {
        self.quarter_credits[0] + self.quarter_credits[1]
    }

    /// Q3 + Q4.
    pub fn semester2_credits(&self) -> f64 {
        self.quarter_credits[2] + self.quarter_credits[3]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub year1: TimelineBlock,
    pub year2: TimelineBlock,
    /// Selected courses whose year is empty or outside 1..=2.
    pub unassigned: TimelineBlock,
}

impl Timeline {
    pub fn from_records(records: &[Arc<CourseRecord>]) -> Self {
        let selected = || records.iter().map(Arc::as_ref).filter(|record| record.selected);

        Self {
            year1: TimelineBlock::from_records(selected().filter(|record| record.year == Some(1))),
            year2: TimelineBlock::from_records(selected().filter(|record| record.year == Some(2))),
            unassigned: TimelineBlock::from_records(
                selected().filter(|record| !matches!(record.year, Some(1) | Some(2))),
            ),
        }
    }

    pub fn blocks(&self) -> [(&'static str, &TimelineBlock); 3] {
        [("Year 1", &self.year1), ("Year 2", &self.year2), ("Unassigned", &self.unassigned)]
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().iter().all(|(_, block)| block.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str, credits: Option<f64>, quarter: &str, year: Option<i64>) -> Arc<CourseRecord> {
        Arc::new(CourseRecord {
            name: name.to_string(),
            credits,
            quarter: quarter.to_string(),
            year,
            selected: true,
            ..Default::default()
        })
    }

    fn names(block: &TimelineBlock) -> Vec<&str> {
        block.rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn test_parse_quarters() {
        assert_eq!(parse_quarters("1, 3"), vec![1, 3]);
        assert_eq!(parse_quarters("4"), vec![4]);
        assert_eq!(parse_quarters(" 2 ,x, 5, 0"), vec![2]);
        assert!(parse_quarters("").is_empty());
        assert!(parse_quarters("Q1").is_empty());
    }

    #[test]
    fn test_credits_split_evenly_over_quarters() {
        let records = vec![
            course("Algo", Some(6.0), "1, 3", Some(1)),
            course("Stats", Some(5.0), "2", Some(1)),
            course("Seminar", Some(3.0), "1,2,3", Some(1)),
        ];

        let timeline = Timeline::from_records(&records);

        assert_eq!(timeline.year1.quarter_credits, [4.0, 6.0, 4.0, 0.0]);
        assert_eq!(timeline.year1.semester1_credits(), 10.0);
        assert_eq!(timeline.year1.semester2_credits(), 4.0);
        assert_eq!(timeline.year1.rows[0].quarters, [true, false, true, false]);
    }

    #[test]
    fn test_rows_sorted_by_earliest_quarter() {
        let records = vec![
            course("Late", Some(5.0), "4", Some(2)),
            course("NoQuarter", Some(5.0), "", Some(2)),
            course("Early", Some(5.0), "3, 1", Some(2)),
            course("Middle", Some(5.0), "2", Some(2)),
            course("AlsoEarly", Some(5.0), "1", Some(2)),
        ];

        let timeline = Timeline::from_records(&records);

        assert_eq!(names(&timeline.year2), vec!["Early", "AlsoEarly", "Middle", "Late", "NoQuarter"]);
    }

    #[test]
    fn test_courses_grouped_by_year() {
        let mut unselected = course("Skipped", Some(5.0), "1", Some(1)).as_ref().clone();
        unselected.selected = false;

        let records = vec![
            course("First", Some(5.0), "1", Some(1)),
            course("Second", Some(5.0), "1", Some(2)),
            course("Later", Some(5.0), "2", Some(3)),
            course("Undecided", None, "1", None),
            Arc::new(unselected),
        ];

        let timeline = Timeline::from_records(&records);

        assert_eq!(names(&timeline.year1), vec!["First"]);
        assert_eq!(names(&timeline.year2), vec!["Second"]);
        assert_eq!(names(&timeline.unassigned), vec!["Undecided", "Later"]);
        // Missing credits count as zero.
        assert_eq!(timeline.unassigned.quarter_credits, [0.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = Timeline::from_records(&[]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.unassigned.semester1_credits(), 0.0);
    }
}
