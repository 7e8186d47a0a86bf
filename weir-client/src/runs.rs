//! Pipeline run and activity run endpoints

use crate::error::Result;
use crate::{DATA_FACTORY_API_VERSION, DataFactoryClient};
use std::future::Future;
use uuid::Uuid;
use weir_core::domain::run::{ActivityRun, PipelineRun};
use weir_core::dto::run::{ActivityRunsPage, RunFilter};

impl DataFactoryClient {
    /// Get a pipeline run by id
    pub async fn get_pipeline_run(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
    ) -> Result<PipelineRun> {
        let path = format!(
            "{}/pipelineruns/{}",
            Self::factory_path(group, factory),
            run_id
        );
        self.inner.get(&path, DATA_FACTORY_API_VERSION).await
    }

    /// Query one page of activity runs for a pipeline run
    pub async fn query_activity_runs_page(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
        filter: &RunFilter,
    ) -> Result<ActivityRunsPage> {
        let path = format!(
            "{}/pipelineruns/{}/queryActivityruns",
            Self::factory_path(group, factory),
            run_id
        );
        self.inner
            .post(&path, DATA_FACTORY_API_VERSION, filter)
            .await
    }

    /// Query all activity runs of a pipeline run inside the filter's window
    ///
    /// Follows continuation tokens until the service stops returning one.
    pub async fn query_activity_runs(
        &self,
        group: &str,
        factory: &str,
        run_id: Uuid,
        filter: &RunFilter,
    ) -> Result<Vec<ActivityRun>> {
        collect_pages(filter, move |page_filter| async move {
            self.query_activity_runs_page(group, factory, run_id, &page_filter).await
        })
        .await
    }
}

/// Fetch pages until the service stops returning a continuation token
async fn collect_pages<F, Fut>(filter: &RunFilter, mut fetch: F) -> Result<Vec<ActivityRun>>
where
    F: FnMut(RunFilter) -> Fut,
    Fut: Future<Output = Result<ActivityRunsPage>>,
{
    let mut filter = filter.clone();
    let mut runs = Vec::new();

    loop {
        let page = fetch(filter.clone()).await?;
        runs.extend(page.value);

        match page.continuation_token {
            Some(token) if !token.is_empty() => filter.continuation_token = Some(token),
            _ => break,
        }
    }

    Ok(runs)
}
