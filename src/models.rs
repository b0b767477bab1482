use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::AnalysisError;

/// Number of columns every data row must carry.
pub const FIELD_COUNT: usize = 11;

/// One job-salary observation, in the column order of the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub work_year: String,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: String,
    pub salary_currency: String,
    pub salary_in_usd: f64,
    pub employee_residence: String,
    pub remote_ratio: String,
    pub company_location: String,
    pub company_size: String,
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        work_year: impl Into<String>,
        experience_level: impl Into<String>,
        employment_type: impl Into<String>,
        job_title: impl Into<String>,
        salary: impl Into<String>,
        salary_currency: impl Into<String>,
        salary_in_usd: f64,
        employee_residence: impl Into<String>,
        remote_ratio: impl Into<String>,
        company_location: impl Into<String>,
        company_size: impl Into<String>,
    ) -> Self {
        Self {
            work_year: work_year.into(),
            experience_level: experience_level.into(),
            employment_type: employment_type.into(),
            job_title: job_title.into(),
            salary: salary.into(),
            salary_currency: salary_currency.into(),
            salary_in_usd,
            employee_residence: employee_residence.into(),
            remote_ratio: remote_ratio.into(),
            company_location: company_location.into(),
            company_size: company_size.into(),
        }
    }

    /// Decodes the raw experience code into the closed level set.
    pub fn level(&self) -> Result<ExperienceLevel, AnalysisError> {
        self.experience_level.parse()
    }
}

/// Seniority codes used by the salary dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
    Director,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
        ExperienceLevel::Director,
    ];

    /// The code as it appears in the input file.
    pub fn code(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "EN",
            ExperienceLevel::Mid => "MI",
            ExperienceLevel::Senior => "SE",
            ExperienceLevel::Executive => "EX",
            ExperienceLevel::Director => "Director",
        }
    }

    fn slot(self) -> usize {
        match self {
            ExperienceLevel::Entry => 0,
            ExperienceLevel::Mid => 1,
            ExperienceLevel::Senior => 2,
            ExperienceLevel::Executive => 3,
            ExperienceLevel::Director => 4,
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EN" => Ok(ExperienceLevel::Entry),
            "MI" => Ok(ExperienceLevel::Mid),
            "SE" => Ok(ExperienceLevel::Senior),
            "EX" => Ok(ExperienceLevel::Executive),
            "Director" => Ok(ExperienceLevel::Director),
            other => Err(AnalysisError::UnrecognizedCategory(other.to_string())),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value for each experience level, always holding all five slots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LevelTable<T> {
    slots: [T; 5],
}

impl<T> LevelTable<T> {
    pub fn from_fn(mut f: impl FnMut(ExperienceLevel) -> T) -> Self {
        Self {
            slots: ExperienceLevel::ALL.map(&mut f),
        }
    }

    /// Iterates in the fixed EN, MI, SE, EX, Director order.
    pub fn iter(&self) -> impl Iterator<Item = (ExperienceLevel, &T)> {
        ExperienceLevel::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(ExperienceLevel, &T) -> U) -> LevelTable<U> {
        LevelTable::from_fn(|level| f(level, &self[level]))
    }
}

impl<T> Index<ExperienceLevel> for LevelTable<T> {
    type Output = T;

    fn index(&self, level: ExperienceLevel) -> &T {
        &self.slots[level.slot()]
    }
}

impl<T> IndexMut<ExperienceLevel> for LevelTable<T> {
    fn index_mut(&mut self, level: ExperienceLevel) -> &mut T {
        &mut self.slots[level.slot()]
    }
}

impl<T: Serialize> Serialize for LevelTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (level, value) in self.iter() {
            map.serialize_entry(level.code(), value)?;
        }
        map.end()
    }
}

/// Ordering applied by the ranker and the series sorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_code() {
        for level in ExperienceLevel::ALL {
            assert_eq!(level.code().parse::<ExperienceLevel>().unwrap(), level);
        }
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "Intern".parse::<ExperienceLevel>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnrecognizedCategory(code) if code == "Intern"));
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("en".parse::<ExperienceLevel>().is_err());
        assert!("director".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn level_table_indexes_by_level() {
        let mut table: LevelTable<u32> = LevelTable::default();
        table[ExperienceLevel::Senior] += 3;
        table[ExperienceLevel::Director] += 1;

        let collected: Vec<(&str, u32)> =
            table.iter().map(|(level, count)| (level.code(), *count)).collect();
        assert_eq!(
            collected,
            vec![("EN", 0), ("MI", 0), ("SE", 3), ("EX", 0), ("Director", 1)]
        );
    }

    #[test]
    fn level_table_serializes_as_code_map() {
        let table = LevelTable::from_fn(|level| level == ExperienceLevel::Mid);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"EN":false,"MI":true,"SE":false,"EX":false,"Director":false}"#
        );
    }
}
