//! Even-week and odd-week tables of a finished schedule.

use crate::data::Dataset;
use crate::schedule::Schedule;
use serde::Serialize;
use std::fmt::Display;

const HEADERS: [&str; 8] = [
    "Time slot",
    "Group",
    "Subject",
    "Type",
    "Lecturer",
    "Auditorium",
    "Students",
    "Capacity",
];

const UNASSIGNED: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub time_slot: String,
    pub group: String,
    pub subject: String,
    pub lesson_type: String,
    pub lecturer: String,
    pub auditorium: String,
    pub students: u32,
    pub capacity: Option<u32>,
}

impl Row {
    fn cells(&self) -> [String; 8] {
        [
            self.time_slot.clone(),
            self.group.clone(),
            self.subject.clone(),
            self.lesson_type.clone(),
            self.lecturer.clone(),
            self.auditorium.clone(),
            self.students.to_string(),
            self.capacity
                .map(|c| c.to_string())
                .unwrap_or_else(|| UNASSIGNED.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekTable {
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timetable {
    pub even: WeekTable,
    pub odd: WeekTable,
}

impl Timetable {
    /// Splits the schedule by week parity; lessons held every week appear in both tables
    pub fn new(schedule: &Schedule, dataset: &Dataset) -> Self {
        let mut even = vec![];
        let mut odd = vec![];
        for (slot, lesson) in schedule.iter() {
            let subject = &dataset.subjects[lesson.subject];
            let group = &dataset.groups[lesson.group];
            let auditorium = lesson.auditorium.map(|a| &dataset.auditoriums[a]);
            let row = Row {
                time_slot: slot.to_string(),
                group: match &lesson.subgroup {
                    Some(label) => format!("{} (subgroup {})", group.number, label),
                    None => group.number.clone(),
                },
                subject: subject.name.clone(),
                lesson_type: lesson.kind.to_string(),
                lecturer: lesson
                    .lecturer
                    .map(|l| dataset.lecturers[l].name.clone())
                    .unwrap_or_else(|| UNASSIGNED.to_string()),
                auditorium: auditorium
                    .map(|a| a.id.clone())
                    .unwrap_or_else(|| UNASSIGNED.to_string()),
                students: group.audience_size(lesson.subgroup.as_deref()),
                capacity: auditorium.map(|a| a.capacity),
            };
            if subject.parity.on_even_weeks() {
                even.push(row.clone());
            }
            if subject.parity.on_odd_weeks() {
                odd.push(row);
            }
        }
        Self {
            even: WeekTable {
                title: "EVEN week".to_string(),
                rows: even,
            },
            odd: WeekTable {
                title: "ODD week".to_string(),
                rows: odd,
            },
        }
    }
}

fn write_line(f: &mut std::fmt::Formatter<'_>, values: &[String], widths: &[usize]) -> std::fmt::Result {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, w)| format!(" {:<w$} ", v, w = *w))
        .collect();
    writeln!(f, "{}", padded.join("|"))
}

impl Display for WeekTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Best schedule, {}:", self.title)?;
        if self.rows.is_empty() {
            return writeln!(f, "No lessons this week.");
        }
        let cells: Vec<[String; 8]> = self.rows.iter().map(Row::cells).collect();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let separator: String = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        write_line(f, &headers, &widths)?;
        writeln!(f, "{separator}")?;
        for row in &cells {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Auditorium, Group, Lecturer, LessonType, Subject, WeekParity};
    use crate::schedule::{Lesson, TimeSlot};

    fn dataset() -> Dataset {
        let subject = |id: &str, parity| Subject {
            id: id.into(),
            name: format!("Subject {id}"),
            group: "G1".into(),
            lectures: 1,
            practicals: 1,
            requires_subgroups: true,
            parity,
        };
        Dataset::new(
            vec![Auditorium {
                id: "A1".into(),
                capacity: 40,
            }],
            vec![Group {
                number: "G1".into(),
                size: 30,
                subgroups: vec!["1".into(), "2".into()],
            }],
            vec![Lecturer {
                id: "L1".into(),
                name: "Ada".into(),
                subjects: ["S1".to_string(), "S2".to_string()].into_iter().collect(),
                types: vec![LessonType::Lecture, LessonType::Practical],
                max_hours_per_week: 10,
            }],
            vec![
                subject("S1", WeekParity::Both),
                subject("S2", WeekParity::Odd),
            ],
        )
        .unwrap()
    }

    fn placed(subject: usize, kind: LessonType, subgroup: Option<&str>) -> Lesson {
        let mut lesson = Lesson::new(subject, kind, 0, subgroup.map(String::from));
        lesson.lecturer = Some(0);
        lesson.auditorium = Some(0);
        lesson
    }

    #[test]
    fn lessons_are_split_by_parity() {
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(0), placed(0, LessonType::Lecture, None));
        schedule.insert(TimeSlot::from_index(5), placed(1, LessonType::Practical, Some("2")));
        let timetable = Timetable::new(&schedule, &dataset());
        assert_eq!(timetable.even.rows.len(), 1);
        assert_eq!(timetable.odd.rows.len(), 2);
        let practical = &timetable.odd.rows[1];
        assert_eq!(practical.time_slot, "Tuesday, period 2");
        assert_eq!(practical.group, "G1 (subgroup 2)");
        assert_eq!(practical.students, 15);
        assert_eq!(practical.capacity, Some(40));
        assert_eq!(practical.lecturer, "Ada");
    }

    #[test]
    fn rendered_table_has_header_and_rows() {
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(0), placed(0, LessonType::Lecture, None));
        let rendered = Timetable::new(&schedule, &dataset()).even.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with(" Time slot"));
        assert!(lines[3].contains("Subject S1"));
        let odd = Timetable::new(&Schedule::new(), &dataset()).odd.to_string();
        assert!(odd.contains("No lessons this week."));
    }
}
