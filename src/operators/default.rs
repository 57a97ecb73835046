use super::{Crossover, Initialize, LoadTable, Mutate};
use crate::config::GeneticConfig;
use crate::constraints::{can_place, conflicts};
use crate::data::{Dataset, LecturerIndex, LessonType, SubjectIndex, WeekParity};
use crate::schedule::{Lesson, Schedule, TimeSlot, SLOT_COUNT};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::Serialize;

/// Academic weeks a week number is drawn from when checking parity
pub const WEEKS: std::ops::RangeInclusive<u32> = 1..=14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Relocate,
    ReassignLecturer,
    ReassignAuditorium,
}

const MUTATION_KINDS: [MutationKind; 3] = [
    MutationKind::Relocate,
    MutationKind::ReassignLecturer,
    MutationKind::ReassignAuditorium,
];

/// Draws a week number and tells whether a lesson of this parity may use the slot.
///
/// The draw happens once per candidate slot, not once per lesson.
fn week_allows<R: Rng>(parity: WeekParity, rng: &mut R) -> bool {
    if parity == WeekParity::Both {
        return true;
    }
    parity.matches_week(rng.random_range(WEEKS))
}

/// Whether `candidate` could replace the `index`-th lesson of `slot`
fn fits_among_others(schedule: &Schedule, slot: TimeSlot, index: usize, candidate: &Lesson) -> bool {
    schedule
        .lessons_at(slot)
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .all(|(_, other)| !conflicts(candidate, other))
}

/// Operators driven by the run's reference data
#[derive(Debug, Clone)]
pub struct DefaultOperators {
    dataset: Dataset,
    crossover_bias: f64,
    micro_mutations: usize,
}

impl DefaultOperators {
    pub fn new(dataset: &Dataset, config: &GeneticConfig) -> Self {
        Self {
            dataset: dataset.clone(),
            crossover_bias: config.crossover_bias,
            micro_mutations: config.micro_mutations,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Every teaching occurrence a subject asks for, lectures first.
    ///
    /// Practicals of a split subject are shared out evenly among the subgroups and the
    /// remainder is dropped. A split subject whose group has no subgroups gets no practicals.
    pub fn occurrences(&self, subject: SubjectIndex) -> Vec<Lesson> {
        let requirement = &self.dataset.subjects[subject];
        let group_index = self.dataset.subject_group(subject);
        let group = &self.dataset.groups[group_index];
        let mut lessons: Vec<Lesson> = (0..requirement.lectures)
            .map(|_| Lesson::new(subject, LessonType::Lecture, group_index, None))
            .collect();
        if requirement.requires_subgroups {
            let share = match group.subgroups.len() {
                0 => 0,
                n => requirement.practicals / n as u32,
            };
            for label in &group.subgroups {
                for _ in 0..share {
                    let subgroup = Some(label.clone());
                    lessons.push(Lesson::new(subject, LessonType::Practical, group_index, subgroup));
                }
            }
        } else {
            for _ in 0..requirement.practicals {
                lessons.push(Lesson::new(subject, LessonType::Practical, group_index, None));
            }
        }
        lessons
    }

    fn audience(&self, lesson: &Lesson) -> u32 {
        self.dataset.groups[lesson.group].audience_size(lesson.subgroup.as_deref())
    }

    /// Staffs, seats and places one occurrence; an occurrence that cannot be handled is
    /// dropped and the lecturer's load is given back.
    fn assign<R: Rng>(
        &self,
        mut lesson: Lesson,
        schedule: &mut Schedule,
        loads: &mut LoadTable,
        rng: &mut R,
    ) -> bool {
        let eligible: Vec<LecturerIndex> = self
            .dataset
            .capable_lecturers(lesson.subject, lesson.kind)
            .filter(|l| loads.load(*l) < self.dataset.lecturers[*l].max_hours_per_week)
            .collect();
        let Some(&lecturer) = eligible.choose(rng) else {
            return false;
        };
        loads.increment(lecturer);
        lesson.lecturer = Some(lecturer);
        let auditoriums = self.dataset.suitable_auditoriums(self.audience(&lesson));
        let Some(&auditorium) = auditoriums.choose(rng) else {
            loads.decrement(lecturer);
            return false;
        };
        lesson.auditorium = Some(auditorium);
        if !self.place_randomly(lesson, schedule, rng) {
            loads.decrement(lecturer);
            return false;
        }
        true
    }

    /// Tries the slots in random order and puts the lesson into the first admissible one
    pub fn place_randomly<R: Rng>(&self, lesson: Lesson, schedule: &mut Schedule, rng: &mut R) -> bool {
        let mut slots: Vec<TimeSlot> = TimeSlot::all().collect();
        slots.shuffle(rng);
        let parity = self.dataset.subjects[lesson.subject].parity;
        for slot in slots {
            if !week_allows(parity, rng) {
                continue;
            }
            if can_place(&lesson, slot, schedule) {
                schedule.insert(slot, lesson);
                return true;
            }
        }
        false
    }

    fn relocate<R: Rng>(&self, schedule: &mut Schedule, from: TimeSlot, index: usize, rng: &mut R) {
        let offset = rng.random_range(1..SLOT_COUNT);
        let to = TimeSlot::from_index((from.index() + offset) % SLOT_COUNT);
        let lesson = &schedule.lessons_at(from)[index];
        if !week_allows(self.dataset.subjects[lesson.subject].parity, rng) {
            return;
        }
        if can_place(lesson, to, schedule) {
            schedule.relocate(from, index, to);
        }
    }

    fn reassign_lecturer<R: Rng>(&self, schedule: &mut Schedule, slot: TimeSlot, index: usize, rng: &mut R) {
        let lesson = &schedule.lessons_at(slot)[index];
        let eligible: Vec<LecturerIndex> = self
            .dataset
            .capable_lecturers(lesson.subject, lesson.kind)
            .filter(|l| {
                let mut candidate = lesson.clone();
                candidate.lecturer = Some(*l);
                fits_among_others(schedule, slot, index, &candidate)
            })
            .collect();
        if let Some(&lecturer) = eligible.choose(rng) {
            schedule.lesson_mut(slot, index).lecturer = Some(lecturer);
        }
    }

    fn reassign_auditorium<R: Rng>(&self, schedule: &mut Schedule, slot: TimeSlot, index: usize, rng: &mut R) {
        let lesson = &schedule.lessons_at(slot)[index];
        let eligible: Vec<_> = self
            .dataset
            .suitable_auditoriums(self.audience(lesson))
            .into_iter()
            .filter(|a| {
                let mut candidate = lesson.clone();
                candidate.auditorium = Some(*a);
                fits_among_others(schedule, slot, index, &candidate)
            })
            .collect();
        if let Some(&auditorium) = eligible.choose(rng) {
            schedule.lesson_mut(slot, index).auditorium = Some(auditorium);
        }
    }
}

impl Initialize for DefaultOperators {
    fn initialize<R: Rng>(&self, rng: &mut R) -> Schedule {
        let mut schedule = Schedule::new();
        let mut loads = LoadTable::new();
        for subject in 0..self.dataset.subjects.len() {
            for lesson in self.occurrences(subject) {
                self.assign(lesson, &mut schedule, &mut loads, rng);
            }
        }
        schedule
    }
}

impl Crossover for DefaultOperators {
    /// Takes each slot wholesale from one parent, dropping lessons that clash with what the
    /// child already holds
    fn crossover<R: Rng>(&self, first: &Schedule, second: &Schedule, rng: &mut R) -> Schedule {
        let mut child = Schedule::new();
        for slot in TimeSlot::all() {
            let source = if rng.random_bool(self.crossover_bias) {
                first
            } else {
                second
            };
            for lesson in source.lessons_at(slot) {
                if can_place(lesson, slot, &child) {
                    child.insert(slot, lesson.clone());
                }
            }
        }
        child
    }
}

impl Mutate for DefaultOperators {
    type Kind = MutationKind;

    fn mutate<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) -> MutationKind {
        let kind = MUTATION_KINDS[rng.random_range(0..MUTATION_KINDS.len())];
        for _ in 0..self.micro_mutations {
            let occupied = schedule.occupied_slots();
            let Some(&slot) = occupied.choose(rng) else {
                break;
            };
            let index = rng.random_range(0..schedule.lessons_at(slot).len());
            match kind {
                MutationKind::Relocate => self.relocate(schedule, slot, index, rng),
                MutationKind::ReassignLecturer => self.reassign_lecturer(schedule, slot, index, rng),
                MutationKind::ReassignAuditorium => {
                    self.reassign_auditorium(schedule, slot, index, rng)
                }
            }
        }
        kind
    }
}
