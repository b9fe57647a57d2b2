//! Built-in sample records for rendering a report without network access.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::timerange::TimeRange;
use crate::types::{Language, Repository, UserInfo};

/// Login of the sample user.
pub const SAMPLE_LOGIN: &str = "test";

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 39, 1)
        .single()
        .unwrap_or_default()
}

/// Profile of the sample user.
pub fn sample_user() -> UserInfo {
    UserInfo {
        login: SAMPLE_LOGIN.to_string(),
        url: "https://test.github.com/test".to_string(),
        name: Some("Test".to_string()),
        followers: 32,
        following: 10,
        created: at(2020, 2, 5),
        repos: 8,
    }
}

/// One repository updated inside [`sample_range`].
pub fn sample_repositories() -> Vec<Repository> {
    vec![Repository {
        name: "test-project".to_string(),
        url: "https://test.github.com/test/test-project".to_string(),
        description: Some("Hello this is a test project!".to_string()),
        forked: false,
        languages: vec![
            Language::new("Typescript", 54678),
            Language::new("HTML", 3465),
            Language::new("CSS", 2376),
        ],
        size: 51118,
        license: Some("MIT".to_string()),
        forks: 2,
        stars: 3,
        watchers: 1,
        created: at(2020, 4, 20),
        updated: at(2020, 4, 30),
    }]
}

/// Reporting window of the sample report.
pub fn sample_range() -> TimeRange {
    TimeRange::Dates {
        start: NaiveDate::from_ymd_opt(2020, 1, 9).unwrap_or_default(),
        end: NaiveDate::from_ymd_opt(2021, 6, 8).unwrap_or_default(),
    }
}
