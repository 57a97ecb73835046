//! Hard constraints of the timetable.
//!
//! A lesson may share a slot with another lesson only if they have no lecturer, group or
//! auditorium in common. Subgroups of one group may meet in parallel, and an auditorium may
//! host two lectures of the same lecturer.

use crate::data::LessonType;
use crate::schedule::{Lesson, Schedule, TimeSlot};

fn lecturer_overlap(a: &Lesson, b: &Lesson) -> bool {
    a.lecturer.is_some() && a.lecturer == b.lecturer
}

fn group_overlap(a: &Lesson, b: &Lesson) -> bool {
    if a.group != b.group {
        return false;
    }
    match (&a.subgroup, &b.subgroup) {
        (Some(x), Some(y)) => x == y,
        (None, None) => true,
        // one whole-group session and one subgroup session
        _ => false,
    }
}

fn auditorium_overlap(a: &Lesson, b: &Lesson) -> bool {
    if a.auditorium.is_none() || a.auditorium != b.auditorium {
        return false;
    }
    let shared_lecture =
        a.kind == LessonType::Lecture && b.kind == LessonType::Lecture && a.lecturer == b.lecturer;
    !shared_lecture
}

/// Whether `candidate` may not share a slot with `existing`
pub fn conflicts(candidate: &Lesson, existing: &Lesson) -> bool {
    lecturer_overlap(candidate, existing)
        || group_overlap(candidate, existing)
        || auditorium_overlap(candidate, existing)
}

/// Whether `lesson` can be put into `slot` without violating a hard constraint
pub fn can_place(lesson: &Lesson, slot: TimeSlot, schedule: &Schedule) -> bool {
    schedule
        .lessons_at(slot)
        .iter()
        .all(|existing| !conflicts(lesson, existing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(
        kind: LessonType,
        group: usize,
        subgroup: Option<&str>,
        lecturer: usize,
        auditorium: usize,
    ) -> Lesson {
        let mut lesson = Lesson::new(0, kind, group, subgroup.map(String::from));
        lesson.lecturer = Some(lecturer);
        lesson.auditorium = Some(auditorium);
        lesson
    }

    fn slot() -> TimeSlot {
        TimeSlot::from_index(0)
    }

    fn schedule_with(existing: Lesson) -> Schedule {
        let mut schedule = Schedule::new();
        schedule.insert(slot(), existing);
        schedule
    }

    #[test]
    fn rejects_lecturer_overlap() {
        let schedule = schedule_with(lesson(LessonType::Practical, 0, None, 7, 0));
        let candidate = lesson(LessonType::Practical, 1, None, 7, 1);
        assert!(!can_place(&candidate, slot(), &schedule));
    }

    #[test]
    fn rejects_whole_group_overlap() {
        let schedule = schedule_with(lesson(LessonType::Lecture, 0, None, 0, 0));
        let candidate = lesson(LessonType::Practical, 0, None, 1, 1);
        assert!(!can_place(&candidate, slot(), &schedule));
    }

    #[test]
    fn rejects_same_subgroup_overlap() {
        let schedule = schedule_with(lesson(LessonType::Practical, 0, Some("1"), 0, 0));
        let candidate = lesson(LessonType::Practical, 0, Some("1"), 1, 1);
        assert!(!can_place(&candidate, slot(), &schedule));
    }

    #[test]
    fn accepts_parallel_subgroups() {
        let schedule = schedule_with(lesson(LessonType::Practical, 0, Some("1"), 0, 0));
        let candidate = lesson(LessonType::Practical, 0, Some("2"), 1, 1);
        assert!(can_place(&candidate, slot(), &schedule));
    }

    #[test]
    fn accepts_subgroup_next_to_whole_group_session() {
        let schedule = schedule_with(lesson(LessonType::Lecture, 0, None, 0, 0));
        let candidate = lesson(LessonType::Practical, 0, Some("2"), 1, 1);
        assert!(can_place(&candidate, slot(), &schedule));
    }

    #[test]
    fn rejects_auditorium_overlap() {
        let schedule = schedule_with(lesson(LessonType::Practical, 0, None, 0, 3));
        let candidate = lesson(LessonType::Practical, 1, None, 1, 3);
        assert!(!can_place(&candidate, slot(), &schedule));
        let lectures = schedule_with(lesson(LessonType::Lecture, 0, None, 0, 3));
        let other_lecturer = lesson(LessonType::Lecture, 1, None, 1, 3);
        assert!(!can_place(&other_lecturer, slot(), &lectures));
    }

    #[test]
    fn combined_lecture_shares_the_auditorium() {
        let first = lesson(LessonType::Lecture, 0, None, 4, 3);
        let second = lesson(LessonType::Lecture, 1, None, 4, 3);
        assert!(!auditorium_overlap(&first, &second));
        let practical = lesson(LessonType::Practical, 1, None, 4, 3);
        assert!(auditorium_overlap(&first, &practical));
    }

    #[test]
    fn same_lecturer_is_never_in_two_places() {
        let schedule = schedule_with(lesson(LessonType::Lecture, 0, None, 4, 3));
        let combined = lesson(LessonType::Lecture, 1, None, 4, 3);
        assert!(lecturer_overlap(&combined, &schedule.lessons_at(slot())[0]));
        assert!(!can_place(&combined, slot(), &schedule));
    }

    #[test]
    fn unassigned_resources_never_overlap() {
        let schedule = schedule_with(Lesson::new(0, LessonType::Practical, 0, Some("1".into())));
        let candidate = Lesson::new(1, LessonType::Practical, 1, None);
        assert!(can_place(&candidate, slot(), &schedule));
    }
}
