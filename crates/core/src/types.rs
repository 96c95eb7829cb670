/// All record ids are opaque strings assigned by the document store.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Contribution dates are calendar days without a time component.
pub type ContributionDate = chrono::NaiveDate;
