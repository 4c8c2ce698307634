//! Owned calculator state
//!
//! A [`GwaSession`] holds everything the calculator knows: the academic
//! structure and grading bounds it was configured with, the record store, the
//! range filter and the two profile names. It is hydrated from a
//! [`KeyValueStore`] and writes itself back after every mutation.

use crate::core::metrics::{self, SummaryMetrics};
use crate::core::models::{
    AcademicPeriod, AcademicStructure, RecordStore, SubjectEntry, SubjectField,
};
use crate::core::range_filter::RangeFilter;
use crate::core::storage::{
    KeyValueStore, StorageError, ALL_KEYS, DATA_BLOB_KEY, RANGE_FILTER_KEY, SCHOOL_NAME_KEY,
    STUDENT_NAME_KEY,
};
use crate::core::validation::{is_empty_subject, GradingBounds};

/// Reasons the editor refuses a change
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// The period is not part of the configured structure
    #[error("no such period: year {}, semester {}", .0.year.saturating_add(1), .0.semester.saturating_add(1))]
    UnknownPeriod(AcademicPeriod),

    /// No subject exists at the index
    #[error("no subject #{} in this semester", .0.saturating_add(1))]
    UnknownSubject(usize),

    /// Grade text is neither empty nor within the grade bounds
    #[error("invalid grade '{value}': expected a number from {min} to {max}")]
    InvalidGrade {
        /// Rejected text
        value: String,
        /// Lowest accepted grade
        min: f64,
        /// Highest accepted grade
        max: f64,
    },

    /// Units text is neither empty nor within the units bounds
    #[error("invalid units '{value}': expected a number from {min} to {max}")]
    InvalidUnits {
        /// Rejected text
        value: String,
        /// Lowest accepted units
        min: f64,
        /// Highest accepted units
        max: f64,
    },
}

/// Calculator state bound to a persistence backend
#[derive(Debug)]
pub struct GwaSession<S: KeyValueStore> {
    structure: AcademicStructure,
    bounds: GradingBounds,
    records: RecordStore,
    range: RangeFilter,
    student_name: String,
    school_name: String,
    store: S,
}

impl<S: KeyValueStore> GwaSession<S> {
    /// Hydrate state from `store`.
    ///
    /// Each key is read on its own. A missing, unreadable or corrupt value falls
    /// back to its default without affecting the other keys.
    pub fn load(store: S, structure: AcademicStructure, bounds: GradingBounds) -> Self {
        let records = match read_key(&store, DATA_BLOB_KEY) {
            Some(json) => RecordStore::from_json(&json).unwrap_or_else(|e| {
                logger::warn!("Discarding unreadable subject data: {e}");
                RecordStore::new()
            }),
            None => RecordStore::new(),
        };

        let range = read_key(&store, RANGE_FILTER_KEY)
            .map_or(RangeFilter::All, |descriptor| {
                RangeFilter::parse_lenient(&descriptor)
            });

        let student_name = read_key(&store, STUDENT_NAME_KEY).unwrap_or_default();
        let school_name = read_key(&store, SCHOOL_NAME_KEY).unwrap_or_default();

        logger::debug!(
            "Loaded {} subject(s) across {} semester(s), range '{range}'",
            records.subject_count(),
            records.periods().count()
        );

        Self {
            structure,
            bounds,
            records,
            range,
            student_name,
            school_name,
            store,
        }
    }

    /// Configured academic structure
    #[must_use]
    pub const fn structure(&self) -> &AcademicStructure {
        &self.structure
    }

    /// Configured grading bounds
    #[must_use]
    pub const fn bounds(&self) -> &GradingBounds {
        &self.bounds
    }

    /// Current records
    #[must_use]
    pub const fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Current range filter
    #[must_use]
    pub const fn range(&self) -> &RangeFilter {
        &self.range
    }

    /// Student name (already trimmed)
    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// School name as entered
    #[must_use]
    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    /// Persistence backend
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the persistence backend
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the persistence backend
    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a blank subject to `period` and return its index
    ///
    /// # Errors
    /// Returns an error if the period is outside the configured structure
    pub fn add_subject(&mut self, period: AcademicPeriod) -> Result<usize, EditError> {
        self.check_period(period)?;
        let index = self.records.add_subject(period);
        logger::debug!("Added subject #{index} to period {period}");
        self.persist();
        Ok(index)
    }

    /// Remove the subject at `index`; a missing period or index is a no-op
    pub fn remove_subject(&mut self, period: AcademicPeriod, index: usize) -> Option<SubjectEntry> {
        let removed = self.records.remove_subject(period, index);
        if removed.is_some() {
            logger::debug!("Removed subject #{index} from period {period}");
        }
        self.persist();
        removed
    }

    /// Set a field without editor validation, creating the entry if needed.
    ///
    /// Returns `false` when `index` is too far past the end to pad; nothing is
    /// written in that case.
    pub fn update_field(
        &mut self,
        period: AcademicPeriod,
        index: usize,
        field: SubjectField,
        value: String,
    ) -> bool {
        if !self.records.update_field(period, index, field, value) {
            logger::warn!("Refusing to write {field} at subject #{index} of period {period}");
            return false;
        }
        self.persist();
        true
    }

    /// Set a field the way the editor does.
    ///
    /// Grade and units must be empty or within bounds; names are free text. A
    /// rejected value leaves the entry untouched.
    ///
    /// # Errors
    /// Returns an error if the period or subject does not exist, or the value
    /// is rejected
    pub fn edit_field(
        &mut self,
        period: AcademicPeriod,
        index: usize,
        field: SubjectField,
        value: &str,
    ) -> Result<(), EditError> {
        self.check_period(period)?;
        if self.records.subject(period, index).is_none() {
            return Err(EditError::UnknownSubject(index));
        }
        self.check_value(field, value)?;

        self.update_field(period, index, field, value.to_string());
        Ok(())
    }

    /// Select the periods used by the cumulative metrics
    pub fn set_range_filter(&mut self, range: RangeFilter) {
        self.range = range;
        logger::debug!("Range filter set to '{range}'");
        self.persist();
    }

    /// Set the student name; surrounding whitespace is dropped
    pub fn set_student_name(&mut self, name: &str) {
        name.trim().clone_into(&mut self.student_name);
        self.persist();
    }

    /// Set the school name as given
    pub fn set_school_name(&mut self, name: &str) {
        name.clone_into(&mut self.school_name);
        self.persist();
    }

    /// Whether any subject field or profile name holds non-blank text
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.student_name.trim().is_empty()
            || !self.school_name.trim().is_empty()
            || self
                .records
                .periods()
                .any(|(_, subjects)| subjects.iter().any(|s| !is_empty_subject(s)))
    }

    /// Wipe every persisted key and reset to defaults.
    ///
    /// Returns `false` without touching anything when there is no data; callers
    /// are expected to have confirmed with the user otherwise.
    pub fn clear_all(&mut self) -> bool {
        if !self.has_data() {
            return false;
        }

        for key in ALL_KEYS {
            if let Err(e) = self.store.remove(key) {
                logger::warn!("Failed to remove '{key}': {e}");
            }
        }

        self.records.clear();
        self.range = RangeFilter::All;
        self.student_name.clear();
        self.school_name.clear();
        logger::info!("Cleared all calculator data");
        true
    }

    /// Whether a report can be exported (student name present)
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.student_name.trim().is_empty()
    }

    /// Cumulative figures under the current range filter
    #[must_use]
    pub fn summary(&self) -> SummaryMetrics {
        metrics::compute_summary(&self.records, &self.structure, &self.bounds, &self.range)
    }

    /// GWA of one period
    #[must_use]
    pub fn semester_gwa(&self, period: AcademicPeriod) -> Option<f64> {
        metrics::semester_gwa(&self.records, &self.bounds, period)
    }

    /// Units of the countable subjects of one period
    #[must_use]
    pub fn semester_units(&self, period: AcademicPeriod) -> f64 {
        metrics::semester_units(&self.records, &self.bounds, period)
    }

    fn check_period(&self, period: AcademicPeriod) -> Result<(), EditError> {
        if self.structure.contains(period) {
            Ok(())
        } else {
            Err(EditError::UnknownPeriod(period))
        }
    }

    fn check_value(&self, field: SubjectField, value: &str) -> Result<(), EditError> {
        let bounds = &self.bounds;
        match field {
            SubjectField::Name => Ok(()),
            SubjectField::Grade if value.is_empty() || bounds.is_valid_grade(value) => Ok(()),
            SubjectField::Grade => Err(EditError::InvalidGrade {
                value: value.to_string(),
                min: bounds.min_grade,
                max: bounds.max_grade,
            }),
            SubjectField::Units if value.is_empty() || bounds.is_valid_units(value) => Ok(()),
            SubjectField::Units => Err(EditError::InvalidUnits {
                value: value.to_string(),
                min: bounds.min_units,
                max: bounds.max_units,
            }),
        }
    }

    /// Write all four keys. Failures are logged and the in-memory state is kept.
    fn persist(&mut self) {
        let blob = match self.records.to_json() {
            Ok(json) => json,
            Err(e) => {
                logger::warn!("Failed to serialize subject data: {e}");
                return;
            }
        };

        let values = [
            (DATA_BLOB_KEY, blob),
            (RANGE_FILTER_KEY, self.range.to_string()),
            (SCHOOL_NAME_KEY, self.school_name.clone()),
            (STUDENT_NAME_KEY, self.student_name.clone()),
        ];

        for (key, value) in &values {
            if let Err(e) = self.store.set(key, value) {
                logger::warn!("Failed to save '{key}': {e}");
            }
        }
    }
}

/// Read one key, treating read failures like a missing value
fn read_key<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|e: StorageError| {
        logger::warn!("Failed to read '{key}': {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn period(year: usize, semester: usize) -> AcademicPeriod {
        AcademicPeriod::new(year, semester)
    }

    fn session(store: MemoryStore) -> GwaSession<MemoryStore> {
        GwaSession::load(store, AcademicStructure::default(), GradingBounds::default())
    }

    #[test]
    fn test_load_empty_store() {
        let session = session(MemoryStore::new());
        assert!(session.records().is_empty());
        assert_eq!(*session.range(), RangeFilter::All);
        assert!(session.student_name().is_empty());
        assert!(!session.has_data());
    }

    #[test]
    fn test_corrupt_blob_does_not_block_other_keys() {
        let store = MemoryStore::with_entries(&[
            (DATA_BLOB_KEY, "{broken"),
            (RANGE_FILTER_KEY, "0-0-1-1"),
            (STUDENT_NAME_KEY, "Ada"),
            (SCHOOL_NAME_KEY, "Tech"),
        ]);
        let session = session(store);

        assert!(session.records().is_empty());
        assert_eq!(
            *session.range(),
            RangeFilter::between(period(0, 0), period(1, 1))
        );
        assert_eq!(session.student_name(), "Ada");
        assert_eq!(session.school_name(), "Tech");
    }

    #[test]
    fn test_malformed_range_fails_open() {
        let session = session(MemoryStore::with_entries(&[(RANGE_FILTER_KEY, "0-0")]));
        assert_eq!(*session.range(), RangeFilter::All);
    }

    #[test]
    fn test_huge_period_indices_load_and_summarize() {
        let huge = usize::MAX;
        let blob = format!(
            r#"{{"0":{{"0":[{{"name":"Math","grade":"1","units":"3"}}]}},"{huge}":{{"{huge}":[{{"name":"Lost","grade":"2","units":"3"}}]}}}}"#
        );
        let range = format!("{huge}-0-0-0");
        let store = MemoryStore::with_entries(&[
            (DATA_BLOB_KEY, blob.as_str()),
            (RANGE_FILTER_KEY, range.as_str()),
            (STUDENT_NAME_KEY, "Ada"),
            (SCHOOL_NAME_KEY, "Tech"),
        ]);
        let mut session = session(store);

        assert_eq!(session.student_name(), "Ada");
        assert_eq!(session.school_name(), "Tech");
        assert_eq!(session.records().subjects(period(huge, huge))[0].name, "Lost");

        let summary = session.summary();
        assert_eq!(summary.cumulative_gwa, None);
        assert_eq!(summary.total_units, 0.0);
        assert_eq!(summary.active_semesters, 0);

        // Under "all" every stored period counts, in range or not
        session.set_range_filter(RangeFilter::All);
        let summary = session.summary();
        assert_eq!(summary.cumulative_gwa, Some(1.5));
        assert_eq!(summary.total_units, 6.0);
        assert_eq!(summary.active_semesters, 2);
    }

    #[test]
    fn test_edit_error_messages_with_huge_indices() {
        let mut session = session(MemoryStore::new());
        let err = session
            .edit_field(period(usize::MAX, 0), 0, SubjectField::Name, "X")
            .expect_err("outside structure");
        assert_eq!(
            err.to_string(),
            format!("no such period: year {}, semester 1", usize::MAX)
        );

        let err = session
            .edit_field(period(0, 0), usize::MAX, SubjectField::Name, "X")
            .expect_err("no subject");
        assert_eq!(err.to_string(), format!("no subject #{} in this semester", usize::MAX));
    }

    #[test]
    fn test_update_field_far_past_end_writes_nothing() {
        let mut session = session(MemoryStore::new());
        assert!(!session.update_field(period(0, 0), usize::MAX, SubjectField::Name, "X".to_string()));
        assert!(session.records().is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_mutation_writes_all_keys() {
        let mut session = session(MemoryStore::new());
        session.add_subject(period(0, 0)).expect("valid period");

        let store = session.store();
        assert_eq!(store.len(), 4);
        assert_eq!(
            store.get(DATA_BLOB_KEY).expect("get").as_deref(),
            Some(r#"{"0":{"0":[{"name":"","grade":"","units":""}]}}"#)
        );
        assert_eq!(store.get(RANGE_FILTER_KEY).expect("get").as_deref(), Some("all"));
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut session = session(store);

        session.add_subject(period(0, 0)).expect("valid period");
        session.update_field(period(0, 0), 0, SubjectField::Grade, "2".to_string());

        assert_eq!(session.records().subjects(period(0, 0))[0].grade, "2");
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_add_subject_outside_structure() {
        let mut session = session(MemoryStore::new());
        assert_eq!(
            session.add_subject(period(4, 0)),
            Err(EditError::UnknownPeriod(period(4, 0)))
        );
        assert!(session.records().is_empty());
    }

    #[test]
    fn test_edit_field_validation() {
        let mut session = session(MemoryStore::new());
        session.add_subject(period(0, 0)).expect("valid period");

        session
            .edit_field(period(0, 0), 0, SubjectField::Grade, "1.75")
            .expect("grade in bounds");
        assert!(matches!(
            session.edit_field(period(0, 0), 0, SubjectField::Grade, "7"),
            Err(EditError::InvalidGrade { .. })
        ));
        assert!(matches!(
            session.edit_field(period(0, 0), 0, SubjectField::Units, "0"),
            Err(EditError::InvalidUnits { .. })
        ));
        assert_eq!(session.records().subjects(period(0, 0))[0].grade, "1.75");

        session
            .edit_field(period(0, 0), 0, SubjectField::Grade, "")
            .expect("empty grade clears");
        session
            .edit_field(period(0, 0), 0, SubjectField::Name, "anything <at> all")
            .expect("names are free text");
        assert_eq!(
            session.edit_field(period(0, 0), 3, SubjectField::Name, "x"),
            Err(EditError::UnknownSubject(3))
        );
    }

    #[test]
    fn test_student_name_trimmed() {
        let mut session = session(MemoryStore::new());
        session.set_student_name("  Grace Hopper ");
        session.set_school_name(" Yale ");
        assert_eq!(session.student_name(), "Grace Hopper");
        assert_eq!(session.school_name(), " Yale ");
        assert!(session.can_export());

        session.set_student_name("   ");
        assert!(!session.can_export());
    }

    #[test]
    fn test_clear_all() {
        let mut session = session(MemoryStore::new());
        assert!(!session.clear_all());

        // Blank rows alone are not data
        session.add_subject(period(0, 0)).expect("valid period");
        assert!(!session.has_data());

        session.update_field(period(0, 0), 0, SubjectField::Name, "Math".to_string());
        session.set_range_filter(RangeFilter::between(period(0, 0), period(0, 1)));
        assert!(session.has_data());

        assert!(session.clear_all());
        assert!(session.records().is_empty());
        assert_eq!(*session.range(), RangeFilter::All);
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_summary_uses_range() {
        let mut session = session(MemoryStore::new());
        session.update_field(period(0, 0), 0, SubjectField::Grade, "1".to_string());
        session.update_field(period(0, 0), 0, SubjectField::Units, "3".to_string());
        session.update_field(period(1, 0), 0, SubjectField::Grade, "3".to_string());
        session.update_field(period(1, 0), 0, SubjectField::Units, "3".to_string());

        let all = session.summary();
        assert_eq!(all.cumulative_gwa, Some(2.0));
        assert_eq!(all.active_semesters, 2);

        session.set_range_filter(RangeFilter::between(period(0, 0), period(0, 1)));
        let first_year = session.summary();
        assert_eq!(first_year.cumulative_gwa, Some(1.0));
        assert_eq!(first_year.active_semesters, 1);
        assert_eq!(session.semester_gwa(period(1, 0)), Some(3.0));
    }
}
