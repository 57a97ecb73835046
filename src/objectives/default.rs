use super::metric::Metric;
use super::Objective;
use crate::config::PenaltyWeights;
use crate::data::{Dataset, GroupIndex, LecturerIndex, LessonType};
use crate::schedule::{Schedule, TimeSlot};
use itertools::Itertools;

/// Anything whose day should be compact: a group or a lecturer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Group(GroupIndex),
    Lecturer(LecturerIndex),
}

impl Entity {
    /// Slots the entity attends, in canonical order, one entry per lesson
    pub fn occupied_slots(&self, schedule: &Schedule) -> Vec<TimeSlot> {
        schedule
            .iter()
            .filter(|(_, lesson)| match self {
                Entity::Group(group) => lesson.group == *group,
                Entity::Lecturer(lecturer) => lesson.lecturer == Some(*lecturer),
            })
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn gaps(&self, schedule: &Schedule) -> u32 {
        self.occupied_slots(schedule)
            .iter()
            .tuple_windows()
            .filter_map(|(a, b)| a.gap_to(b))
            .sum()
    }
}

/// Lesson targets of one subject
#[derive(Debug, Clone, Copy)]
struct Target {
    lectures: u32,
    practicals: u32,
}

/// Fitness = 1 / (1 + penalty), with penalties for gaps, overload and subject deviation
#[derive(Debug, Clone)]
pub struct DefaultObjective {
    weights: PenaltyWeights,
    entities: Vec<Entity>,
    max_hours: Vec<u32>,
    targets: Vec<Target>,
}

impl DefaultObjective {
    pub fn new(dataset: &Dataset, weights: PenaltyWeights) -> Self {
        let groups = (0..dataset.groups.len()).map(Entity::Group);
        let lecturers = (0..dataset.lecturers.len()).map(Entity::Lecturer);
        let entities = groups.chain(lecturers).collect();
        let max_hours = dataset
            .lecturers
            .iter()
            .map(|l| l.max_hours_per_week)
            .collect();
        let targets = dataset
            .subjects
            .iter()
            .map(|s| Target {
                lectures: s.required(LessonType::Lecture),
                practicals: s.required(LessonType::Practical),
            })
            .collect();
        Self {
            weights,
            entities,
            max_hours,
            targets,
        }
    }

    fn gaps(&self, schedule: &Schedule) -> u32 {
        self.entities.iter().map(|e| e.gaps(schedule)).sum()
    }

    fn overload(&self, schedule: &Schedule) -> u32 {
        let mut hours = vec![0_u32; self.max_hours.len()];
        for lecturer in schedule.lessons().filter_map(|l| l.lecturer) {
            hours[lecturer] += 1;
        }
        hours
            .iter()
            .zip(&self.max_hours)
            .map(|(assigned, max)| assigned.saturating_sub(*max))
            .sum()
    }

    fn subject_deviation(&self, schedule: &Schedule) -> u32 {
        let mut scheduled = vec![(0_u32, 0_u32); self.targets.len()];
        for lesson in schedule.lessons() {
            let counts = &mut scheduled[lesson.subject];
            match lesson.kind {
                LessonType::Lecture => counts.0 += 1,
                LessonType::Practical => counts.1 += 1,
            }
        }
        scheduled
            .iter()
            .zip(&self.targets)
            .map(|((lectures, practicals), target)| {
                lectures.abs_diff(target.lectures) + practicals.abs_diff(target.practicals)
            })
            .sum()
    }
}

impl Objective for DefaultObjective {
    type Metric = Metric;

    fn evaluate(&self, schedule: &Schedule) -> (Metric, f64) {
        let gaps = self.gaps(schedule);
        let overload = self.overload(schedule);
        let subject_deviation = self.subject_deviation(schedule);
        let PenaltyWeights {
            gap,
            overload: overload_weight,
            subject_deviation: deviation_weight,
        } = self.weights;
        let penalty = gap * gaps as f64
            + overload_weight * overload as f64
            + deviation_weight * subject_deviation as f64;
        let metric = Metric {
            gaps,
            overload,
            subject_deviation,
            penalty,
        };
        (metric, metric.fitness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Auditorium, Group, Lecturer, Subject, WeekParity};
    use crate::schedule::Lesson;

    fn dataset(max_hours: u32, lectures: u32, practicals: u32) -> Dataset {
        Dataset::new(
            vec![Auditorium {
                id: "A1".into(),
                capacity: 40,
            }],
            vec![Group {
                number: "G1".into(),
                size: 30,
                subgroups: vec![],
            }],
            vec![Lecturer {
                id: "L1".into(),
                name: "Ada".into(),
                subjects: ["S1".to_string()].into_iter().collect(),
                types: vec![LessonType::Lecture, LessonType::Practical],
                max_hours_per_week: max_hours,
            }],
            vec![Subject {
                id: "S1".into(),
                name: "Algebra".into(),
                group: "G1".into(),
                lectures,
                practicals,
                requires_subgroups: false,
                parity: WeekParity::Both,
            }],
        )
        .unwrap()
    }

    fn lecture() -> Lesson {
        let mut lesson = Lesson::new(0, LessonType::Lecture, 0, None);
        lesson.lecturer = Some(0);
        lesson.auditorium = Some(0);
        lesson
    }

    #[test]
    fn perfect_schedule_has_fitness_one() {
        let objective = DefaultObjective::new(&dataset(10, 2, 0), PenaltyWeights::default());
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(0), lecture());
        schedule.insert(TimeSlot::from_index(1), lecture());
        let (metric, fitness) = objective.evaluate(&schedule);
        assert_eq!(metric.penalty, 0.0);
        assert_eq!(fitness, 1.0);
    }

    #[test]
    fn gaps_are_counted_for_group_and_lecturer() {
        let objective = DefaultObjective::new(&dataset(10, 2, 0), PenaltyWeights::default());
        let mut schedule = Schedule::new();
        // Monday periods 1 and 4: two free periods each for the group and the lecturer
        schedule.insert(TimeSlot::from_index(0), lecture());
        schedule.insert(TimeSlot::from_index(3), lecture());
        let (metric, fitness) = objective.evaluate(&schedule);
        assert_eq!(metric.gaps, 4);
        assert_eq!(metric.penalty, 4.0);
        assert!((fitness - 0.2).abs() < 1e-12);
    }

    #[test]
    fn gaps_ignore_day_boundaries() {
        let objective = DefaultObjective::new(&dataset(10, 2, 0), PenaltyWeights::default());
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(3), lecture());
        schedule.insert(TimeSlot::from_index(4), lecture());
        let (metric, _) = objective.evaluate(&schedule);
        assert_eq!(metric.gaps, 0);
    }

    #[test]
    fn overload_and_deviation_are_weighted() {
        let weights = PenaltyWeights {
            gap: 1.0,
            overload: 2.0,
            subject_deviation: 3.0,
        };
        let objective = DefaultObjective::new(&dataset(1, 2, 1), weights);
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(0), lecture());
        schedule.insert(TimeSlot::from_index(4), lecture());
        let (metric, fitness) = objective.evaluate(&schedule);
        assert_eq!(metric.overload, 1);
        assert_eq!(metric.subject_deviation, 1);
        assert_eq!(metric.penalty, 5.0);
        assert!(fitness > 0.0 && fitness < 1.0);
    }

    #[test]
    fn empty_schedule_is_penalised_for_missing_lessons() {
        let objective = DefaultObjective::new(&dataset(10, 3, 2), PenaltyWeights::default());
        let mut schedule = Schedule::new();
        let fitness = objective.score(&mut schedule);
        assert_eq!(schedule.fitness(), fitness);
        assert!((fitness - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn entity_slots_follow_canonical_order() {
        let mut schedule = Schedule::new();
        schedule.insert(TimeSlot::from_index(7), lecture());
        schedule.insert(TimeSlot::from_index(2), lecture());
        let slots = Entity::Lecturer(0).occupied_slots(&schedule);
        assert_eq!(slots, vec![TimeSlot::from_index(2), TimeSlot::from_index(7)]);
        assert!(Entity::Lecturer(1).occupied_slots(&schedule).is_empty());
    }
}
