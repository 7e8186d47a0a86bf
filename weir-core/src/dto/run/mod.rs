//! Activity run query DTOs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::run::ActivityRun;

/// Time window for `queryActivityruns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFilter {
    pub last_updated_after: DateTime<Utc>,
    pub last_updated_before: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl RunFilter {
    /// Window spanning one day either side of `now`
    pub fn around(now: DateTime<Utc>) -> Self {
        Self {
            last_updated_after: now - Duration::days(1),
            last_updated_before: now + Duration::days(1),
            continuation_token: None,
        }
    }
}

/// One page of activity runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRunsPage {
    #[serde(default)]
    pub value: Vec<ActivityRun>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_spans_two_days() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let filter = RunFilter::around(now);

        assert_eq!(
            filter.last_updated_after,
            Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap()
        );
        assert_eq!(
            filter.last_updated_before,
            Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
        );

        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.get("lastUpdatedAfter").is_some());
        assert!(json.get("continuationToken").is_none());
    }

    #[test]
    fn test_empty_page() {
        let page: ActivityRunsPage = serde_json::from_str(r#"{"value":[]}"#).unwrap();
        assert!(page.value.is_empty());
        assert!(page.continuation_token.is_none());
    }
}
