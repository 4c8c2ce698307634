//! Record store: the sparse year -> semester -> subjects mapping

use super::{AcademicPeriod, SubjectEntry, SubjectField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most blank entries [`RecordStore::update_field`] inserts before the target
pub const MAX_PADDING: usize = 64;

/// Subjects of one semester, keyed by semester index
pub type SemesterMap = BTreeMap<usize, Vec<SubjectEntry>>;

/// All entered subjects, keyed by year index then semester index.
///
/// A period has no list until it is first touched through [`ensure`](Self::ensure)
/// (or a mutation that ensures it); once created the list stays for the session,
/// even when emptied. Entries are addressed by position, so removing an entry
/// shifts the indices of everything after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    years: BTreeMap<usize, SemesterMap>,
}

impl RecordStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Create the period's list if absent and return a mutable handle to it
    pub fn ensure(&mut self, period: AcademicPeriod) -> &mut Vec<SubjectEntry> {
        self.years
            .entry(period.year)
            .or_default()
            .entry(period.semester)
            .or_default()
    }

    /// Append a blank entry to the period and return its index
    pub fn add_subject(&mut self, period: AcademicPeriod) -> usize {
        let subjects = self.ensure(period);
        subjects.push(SubjectEntry::blank());
        subjects.len() - 1
    }

    /// Remove the entry at `index`. Returns the removed entry, or `None` when the
    /// period or index does not exist.
    pub fn remove_subject(&mut self, period: AcademicPeriod, index: usize) -> Option<SubjectEntry> {
        let subjects = self
            .years
            .get_mut(&period.year)?
            .get_mut(&period.semester)?;
        (index < subjects.len()).then(|| subjects.remove(index))
    }

    /// Set one field of the entry at `index`.
    ///
    /// When no entry exists at `index`, blank entries are inserted up to and
    /// including it first, so the write always lands at the requested position.
    /// At most [`MAX_PADDING`] blanks are inserted; an index further past the
    /// end leaves the store untouched and returns `false`.
    pub fn update_field(
        &mut self,
        period: AcademicPeriod,
        index: usize,
        field: SubjectField,
        value: String,
    ) -> bool {
        let len = self.subjects(period).len();
        if index > len.saturating_add(MAX_PADDING) {
            return false;
        }

        let subjects = self.ensure(period);
        if len <= index {
            subjects.resize_with(index + 1, SubjectEntry::blank);
        }
        subjects[index].set(field, value);
        true
    }

    /// Subjects of a period (empty when the period was never touched)
    #[must_use]
    pub fn subjects(&self, period: AcademicPeriod) -> &[SubjectEntry] {
        self.years
            .get(&period.year)
            .and_then(|semesters| semesters.get(&period.semester))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A single entry, if present
    #[must_use]
    pub fn subject(&self, period: AcademicPeriod, index: usize) -> Option<&SubjectEntry> {
        self.subjects(period).get(index)
    }

    /// Whether the period has been touched
    #[must_use]
    pub fn is_touched(&self, period: AcademicPeriod) -> bool {
        self.years
            .get(&period.year)
            .is_some_and(|semesters| semesters.contains_key(&period.semester))
    }

    /// Every touched period with its subjects, in (year, semester) order
    pub fn periods(&self) -> impl Iterator<Item = (AcademicPeriod, &[SubjectEntry])> + '_ {
        self.years.iter().flat_map(|(&year, semesters)| {
            semesters.iter().map(move |(&semester, subjects)| {
                (AcademicPeriod::new(year, semester), subjects.as_slice())
            })
        })
    }

    /// Whether nothing has been touched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of entries across all periods
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.periods().map(|(_, subjects)| subjects.len()).sum()
    }

    /// Drop every period
    pub fn clear(&mut self) {
        self.years.clear();
    }

    /// Serialize to the persisted JSON form (`{"0":{"1":[{name,grade,units}]}}`)
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the persisted JSON form
    ///
    /// # Errors
    /// Returns an error if the text is not a valid year -> semester -> subjects object
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
