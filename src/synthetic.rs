//! Randomised stand-in data, used when an input file is missing or has no valid rows.

use crate::data::{
    Auditorium, AuditoriumRecord, Dataset, Group, GroupRecord, Lecturer, LecturerRecord, Subject,
    SubjectRecord,
};
use crate::Error;
use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::Rng;

const AUDITORIUMS: usize = 5;
const GROUPS: usize = 4;
const LECTURERS: usize = 6;
const SUBJECTS: usize = 4;

pub fn auditoriums<R: Rng>(rng: &mut R) -> Vec<AuditoriumRecord> {
    (1..=AUDITORIUMS)
        .map(|i| AuditoriumRecord {
            id: format!("A{i}"),
            capacity: rng.random_range(30..=100),
        })
        .collect()
}

pub fn groups<R: Rng>(rng: &mut R) -> Vec<GroupRecord> {
    (1..=GROUPS)
        .map(|i| GroupRecord {
            number: format!("G{i}"),
            size: rng.random_range(20..=60),
            subgroups: if rng.random_bool(0.5) {
                "1;2".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

pub fn lecturers<R: Rng>(rng: &mut R) -> Vec<LecturerRecord> {
    (1..=LECTURERS)
        .map(|i| {
            let subjects = (0..2)
                .map(|_| format!("S{}", rng.random_range(1..=SUBJECTS)))
                .join(";");
            LecturerRecord {
                id: format!("L{i}"),
                name: format!("Lecturer {i}"),
                subjects,
                types: "Lecture;Practical".to_string(),
                max_hours_per_week: rng.random_range(10..=20),
            }
        })
        .collect()
}

/// Subjects owned by randomly chosen groups among `group_numbers`
pub fn subjects<R: Rng>(group_numbers: &[String], rng: &mut R) -> Vec<SubjectRecord> {
    (1..=SUBJECTS)
        .map(|i| SubjectRecord {
            id: format!("S{i}"),
            name: format!("Subject {i}"),
            group: group_numbers.choose(rng).cloned().unwrap_or_default(),
            lectures: rng.random_range(5..=10),
            practicals: rng.random_range(5..=10),
            requires_subgroups: ["yes", "no"].choose(rng).copied().unwrap_or("no").to_string(),
            week_type: ["even", "odd", "both"]
                .choose(rng)
                .copied()
                .unwrap_or("both")
                .to_string(),
        })
        .collect()
}

/// A complete synthetic dataset
pub fn dataset<R: Rng>(rng: &mut R) -> Result<Dataset, Error> {
    let auditoriums = auditoriums(rng)
        .into_iter()
        .map(Auditorium::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let groups = groups(rng)
        .into_iter()
        .map(Group::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let lecturers = lecturers(rng)
        .into_iter()
        .map(Lecturer::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let numbers: Vec<String> = groups.iter().map(|g| g.number.clone()).collect();
    let subjects = subjects(&numbers, rng)
        .into_iter()
        .map(Subject::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Dataset::new(auditoriums, groups, lecturers, subjects)
}
