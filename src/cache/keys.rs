use crate::models::job::JobSearch;

pub const JOB_SEARCH_PREFIX: &str = "jobs:search:";
pub const ACTIVE_JOBS_COUNT: &str = "jobs:count:active";

pub fn job_detail(job_id: i64) -> String {
    format!("job:detail:{}", job_id)
}

/// One key per full filter and pagination tuple. Absent filters render as
/// empty segments.
pub fn job_search(search: &JobSearch) -> String {
    let location = search
        .location_filter()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let job_type = search.job_type.map(|t| t.to_string()).unwrap_or_default();
    let min_salary = search
        .min_salary_filter()
        .map(|s| s.to_string())
        .unwrap_or_default();
    format!(
        "{}{}:{}:{}:{}:{}",
        JOB_SEARCH_PREFIX, location, job_type, min_salary, search.offset, search.limit
    )
}

pub fn recruiter_jobs_prefix(recruiter_id: i64) -> String {
    format!("jobs:recruiter:{}:", recruiter_id)
}

pub fn recruiter_jobs(recruiter_id: i64, offset: i64, limit: i64) -> String {
    format!("{}{}:{}", recruiter_jobs_prefix(recruiter_id), offset, limit)
}

pub fn rate_limit(scope: &str, client: &str, path: &str) -> String {
    format!("rate_limit:{}:{}:{}", scope, client, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;

    #[test]
    fn search_key_covers_every_filter() {
        let search = JobSearch {
            location: Some(" Hyder ".into()),
            job_type: Some(JobType::FullTime),
            min_salary: Some(1_000_000),
            offset: 10,
            limit: 20,
        };
        assert_eq!(
            job_search(&search),
            "jobs:search:hyder:FULL_TIME:1000000:10:20"
        );
    }

    #[test]
    fn search_key_without_filters() {
        let search = JobSearch {
            limit: 100,
            ..Default::default()
        };
        assert_eq!(job_search(&search), "jobs:search::::0:100");
        assert!(job_search(&search).starts_with(JOB_SEARCH_PREFIX));

        let zero_salary = JobSearch {
            min_salary: Some(0),
            ..search.clone()
        };
        assert_eq!(job_search(&zero_salary), job_search(&search));
    }

    #[test]
    fn recruiter_pages_share_a_prefix() {
        assert!(recruiter_jobs(7, 0, 20).starts_with(&recruiter_jobs_prefix(7)));
        assert!(!recruiter_jobs(70, 0, 20).starts_with(&recruiter_jobs_prefix(7)));
    }
}
