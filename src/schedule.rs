//! The weekly slot grid, lessons and the schedule that owns them.

use crate::data::{AuditoriumIndex, GroupIndex, LecturerIndex, LessonType, SubjectIndex};
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Period {
    First,
    Second,
    Third,
    Fourth,
}

pub const DAYS: [Day; 5] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
];

pub const PERIODS: [Period; 4] = [Period::First, Period::Second, Period::Third, Period::Fourth];

pub const SLOT_COUNT: usize = DAYS.len() * PERIODS.len();

impl Period {
    /// 1-based position within the day
    pub fn ordinal(&self) -> u32 {
        *self as u32 + 1
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One cell of the repeating weekly grid.
///
/// The derived ordering is (day, period), which is the canonical order used for gap
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    pub day: Day,
    pub period: Period,
}

impl TimeSlot {
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..SLOT_COUNT).map(TimeSlot::from_index)
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            day: DAYS[index / PERIODS.len()],
            period: PERIODS[index % PERIODS.len()],
        }
    }

    pub fn index(&self) -> usize {
        self.day as usize * PERIODS.len() + self.period as usize
    }

    /// Number of free periods strictly between two slots of the same day
    pub fn gap_to(&self, later: &TimeSlot) -> Option<u32> {
        if self.day != later.day {
            return None;
        }
        let distance = later.period.ordinal() as i64 - self.period.ordinal() as i64 - 1;
        Some(distance.max(0) as u32)
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, period {}", self.day, self.period.ordinal())
    }
}

/// One required teaching occurrence and where it was placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub subject: SubjectIndex,
    pub kind: LessonType,
    pub group: GroupIndex,
    pub subgroup: Option<String>,
    pub slot: Option<TimeSlot>,
    pub auditorium: Option<AuditoriumIndex>,
    pub lecturer: Option<LecturerIndex>,
}

impl Lesson {
    pub fn new(
        subject: SubjectIndex,
        kind: LessonType,
        group: GroupIndex,
        subgroup: Option<String>,
    ) -> Self {
        Self {
            subject,
            kind,
            group,
            subgroup,
            slot: None,
            auditorium: None,
            lecturer: None,
        }
    }
}

/// One individual: every slot of the week with the lessons placed there.
///
/// The schedule owns its lessons, cloning a schedule copies all of them. `fitness` is
/// not kept in sync with structural changes, it is whatever the objective last assigned
/// (zero for a schedule that was never scored).
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    timetable: Vec<Vec<Lesson>>,
    fitness: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            timetable: vec![vec![]; SLOT_COUNT],
            fitness: 0.0,
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn lessons_at(&self, slot: TimeSlot) -> &[Lesson] {
        &self.timetable[slot.index()]
    }

    pub fn lesson_mut(&mut self, slot: TimeSlot, index: usize) -> &mut Lesson {
        &mut self.timetable[slot.index()][index]
    }

    /// Binds the lesson to `slot` and stores it there, no conflict check is made
    pub fn insert(&mut self, slot: TimeSlot, mut lesson: Lesson) {
        lesson.slot = Some(slot);
        self.timetable[slot.index()].push(lesson);
    }

    /// Moves the `index`-th lesson of `from` into `to`
    pub fn relocate(&mut self, from: TimeSlot, index: usize, to: TimeSlot) {
        let lesson = self.timetable[from.index()].remove(index);
        self.insert(to, lesson);
    }

    /// Lessons in canonical slot order
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlot, &Lesson)> {
        self.timetable
            .iter()
            .enumerate()
            .flat_map(|(index, lessons)| lessons.iter().map(move |l| (TimeSlot::from_index(index), l)))
    }

    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.timetable.iter().flatten()
    }

    pub fn occupied_slots(&self) -> Vec<TimeSlot> {
        TimeSlot::all()
            .filter(|slot| !self.timetable[slot.index()].is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timetable.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.timetable.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_round_trips_in_canonical_order() {
        let slots: Vec<_> = TimeSlot::all().collect();
        assert_eq!(slots.len(), 20);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(slots[5].day, Day::Tuesday);
        assert_eq!(slots[5].period, Period::Second);
        assert_eq!(slots[19].index(), 19);
    }

    #[test]
    fn gaps_only_count_within_a_day() {
        let first = TimeSlot::from_index(0);
        assert_eq!(first.gap_to(&TimeSlot::from_index(1)), Some(0));
        assert_eq!(first.gap_to(&TimeSlot::from_index(3)), Some(2));
        assert_eq!(first.gap_to(&first), Some(0));
        assert_eq!(first.gap_to(&TimeSlot::from_index(4)), None);
    }

    #[test]
    fn relocate_rebinds_the_slot() {
        let mut schedule = Schedule::new();
        let from = TimeSlot::from_index(2);
        let to = TimeSlot::from_index(9);
        schedule.insert(from, Lesson::new(0, LessonType::Lecture, 0, None));
        schedule.relocate(from, 0, to);
        assert!(schedule.lessons_at(from).is_empty());
        assert_eq!(schedule.lessons_at(to)[0].slot, Some(to));
        assert_eq!(schedule.occupied_slots(), vec![to]);
        assert_eq!(schedule.len(), 1);
    }
}
