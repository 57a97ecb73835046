//! Reference data for one timetabling run: auditoriums, groups, lecturers and subjects.
//!
//! Rows are read as loosely typed records (one per CSV line) and converted into the
//! validated entity types. [`Dataset`] then resolves cross references between them.

use crate::Error;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

pub type AuditoriumIndex = usize;
pub type GroupIndex = usize;
pub type LecturerIndex = usize;
pub type SubjectIndex = usize;

/// Separator of multi-valued fields inside one CSV cell
pub const LIST_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    Lecture,
    Practical,
}

impl FromStr for LessonType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lecture" => Ok(Self::Lecture),
            "practical" => Ok(Self::Practical),
            other => Err(format!("unknown lesson type `{other}`").into()),
        }
    }
}

impl Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lecture => f.write_str("Lecture"),
            Self::Practical => f.write_str("Practical"),
        }
    }
}

/// Which alternating academic weeks a subject recurs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekParity {
    Even,
    Odd,
    Both,
}

impl WeekParity {
    pub fn matches_week(&self, week: u32) -> bool {
        match self {
            Self::Even => week % 2 == 0,
            Self::Odd => week % 2 == 1,
            Self::Both => true,
        }
    }

    pub fn on_even_weeks(&self) -> bool {
        matches!(self, Self::Even | Self::Both)
    }

    pub fn on_odd_weeks(&self) -> bool {
        matches!(self, Self::Odd | Self::Both)
    }
}

impl FromStr for WeekParity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "even" => Ok(Self::Even),
            "odd" => Ok(Self::Odd),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown week type `{other}`").into()),
        }
    }
}

impl Display for WeekParity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Even => f.write_str("even"),
            Self::Odd => f.write_str("odd"),
            Self::Both => f.write_str("both"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auditorium {
    pub id: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub number: String,
    pub size: u32,
    /// Empty when the group is never split
    pub subgroups: Vec<String>,
}

impl Group {
    /// Number of students attending a session, given the subgroup it is held for
    pub fn audience_size(&self, subgroup: Option<&str>) -> u32 {
        match subgroup {
            Some(_) if !self.subgroups.is_empty() => self.size / self.subgroups.len() as u32,
            _ => self.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    pub id: String,
    pub name: String,
    pub subjects: FxHashSet<String>,
    pub types: Vec<LessonType>,
    pub max_hours_per_week: u32,
}

impl Lecturer {
    pub fn can_teach(&self, subject: &str, kind: LessonType) -> bool {
        self.subjects.contains(subject) && self.types.contains(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub group: String,
    pub lectures: u32,
    pub practicals: u32,
    pub requires_subgroups: bool,
    pub parity: WeekParity,
}

impl Subject {
    pub fn required(&self, kind: LessonType) -> u32 {
        match kind {
            LessonType::Lecture => self.lectures,
            LessonType::Practical => self.practicals,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditoriumRecord {
    #[serde(rename = "auditoriumID")]
    pub id: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(rename = "groupNumber")]
    pub number: String,
    #[serde(rename = "studentAmount")]
    pub size: u32,
    #[serde(default)]
    pub subgroups: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LecturerRecord {
    #[serde(rename = "lecturerID")]
    pub id: String,
    #[serde(rename = "lecturerName")]
    pub name: String,
    #[serde(rename = "subjectsCanTeach", default)]
    pub subjects: String,
    #[serde(rename = "typesCanTeach", default)]
    pub types: String,
    #[serde(rename = "maxHoursPerWeek")]
    pub max_hours_per_week: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "groupID")]
    pub group: String,
    #[serde(rename = "numLectures")]
    pub lectures: u32,
    #[serde(rename = "numPracticals")]
    pub practicals: u32,
    #[serde(rename = "requiresSubgroups")]
    pub requires_subgroups: String,
    #[serde(rename = "weekType")]
    pub week_type: String,
}

pub fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(field: &str) -> Result<bool, Error> {
    match field.trim().to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" | "" => Ok(false),
        other => Err(format!("unknown flag `{other}`").into()),
    }
}

fn non_empty(field: String, name: &str) -> Result<String, Error> {
    if field.trim().is_empty() {
        return Err(format!("{name} is empty").into());
    }
    Ok(field.trim().to_string())
}

fn positive(value: u32, name: &str) -> Result<u32, Error> {
    if value == 0 {
        return Err(format!("{name} must be positive").into());
    }
    Ok(value)
}

impl TryFrom<AuditoriumRecord> for Auditorium {
    type Error = Error;

    fn try_from(record: AuditoriumRecord) -> Result<Self, Error> {
        Ok(Self {
            id: non_empty(record.id, "auditoriumID")?,
            capacity: positive(record.capacity, "capacity")?,
        })
    }
}

impl TryFrom<GroupRecord> for Group {
    type Error = Error;

    fn try_from(record: GroupRecord) -> Result<Self, Error> {
        Ok(Self {
            number: non_empty(record.number, "groupNumber")?,
            size: positive(record.size, "studentAmount")?,
            subgroups: split_list(&record.subgroups),
        })
    }
}

impl TryFrom<LecturerRecord> for Lecturer {
    type Error = Error;

    fn try_from(record: LecturerRecord) -> Result<Self, Error> {
        let types = split_list(&record.types)
            .iter()
            .map(|x| x.parse())
            .collect::<Result<Vec<LessonType>, Error>>()?;
        Ok(Self {
            id: non_empty(record.id, "lecturerID")?,
            name: record.name,
            subjects: split_list(&record.subjects).into_iter().collect(),
            types,
            max_hours_per_week: positive(record.max_hours_per_week, "maxHoursPerWeek")?,
        })
    }
}

impl TryFrom<SubjectRecord> for Subject {
    type Error = Error;

    fn try_from(record: SubjectRecord) -> Result<Self, Error> {
        Ok(Self {
            id: non_empty(record.id, "id")?,
            name: record.name,
            group: non_empty(record.group, "groupID")?,
            lectures: record.lectures,
            practicals: record.practicals,
            requires_subgroups: parse_flag(&record.requires_subgroups)?,
            parity: record.week_type.parse()?,
        })
    }
}

/// Validated reference data shared by every individual of a run
#[derive(Debug, Clone)]
pub struct Dataset {
    pub auditoriums: Vec<Auditorium>,
    pub groups: Vec<Group>,
    pub lecturers: Vec<Lecturer>,
    pub subjects: Vec<Subject>,
    /// Owning group of each subject, parallel to `subjects`
    subject_groups: Vec<GroupIndex>,
}

impl Dataset {
    /// Resolves subject owners and drops subjects whose group does not exist.
    ///
    /// Subjects that no lecturer can teach are kept; they stay under-scheduled and are
    /// reported once here.
    pub fn new(
        auditoriums: Vec<Auditorium>,
        groups: Vec<Group>,
        lecturers: Vec<Lecturer>,
        subjects: Vec<Subject>,
    ) -> Result<Self, Error> {
        if groups.is_empty() {
            return Err("no groups to schedule".into());
        }
        let mut kept = vec![];
        let mut subject_groups = vec![];
        for subject in subjects {
            match groups.iter().position(|g| g.number == subject.group) {
                Some(index) => {
                    kept.push(subject);
                    subject_groups.push(index);
                }
                None => debug!(
                    "subject {} refers to unknown group {}, dropped",
                    subject.id, subject.group
                ),
            }
        }
        let missing: Vec<&str> = kept
            .iter()
            .filter(|s| !lecturers.iter().any(|l| l.subjects.contains(&s.id)))
            .map(|s| s.id.as_str())
            .collect();
        if !missing.is_empty() {
            warn!("no lecturers for subjects: {}", missing.join(", "));
        }
        Ok(Self {
            auditoriums,
            groups,
            lecturers,
            subjects: kept,
            subject_groups,
        })
    }

    pub fn subject_group(&self, subject: SubjectIndex) -> GroupIndex {
        self.subject_groups[subject]
    }

    /// Lecturers able to teach the given subject and lesson type, in input order
    pub fn capable_lecturers(
        &self,
        subject: SubjectIndex,
        kind: LessonType,
    ) -> impl Iterator<Item = LecturerIndex> + '_ {
        let id = self.subjects[subject].id.as_str();
        self.lecturers
            .iter()
            .enumerate()
            .filter(move |(_, l)| l.can_teach(id, kind))
            .map(|(index, _)| index)
    }

    pub fn suitable_auditoriums(&self, audience: u32) -> Vec<AuditoriumIndex> {
        self.auditoriums
            .iter()
            .enumerate()
            .filter(|(_, a)| a.capacity >= audience)
            .map(|(index, _)| index)
            .collect()
    }
}
