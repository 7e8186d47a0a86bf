//! In-memory management API and fixtures for orchestration tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;
use weir_client::{ClientError, ManagementApi, Result};
use weir_core::domain::dataset::DatasetResource;
use weir_core::domain::factory::{Factory, FactoryProperties};
use weir_core::domain::linked_service::LinkedServiceResource;
use weir_core::domain::pipeline::PipelineResource;
use weir_core::domain::resource::{
    PROVISIONING_SUCCEEDED, ResourceGroup, ResourceGroupProperties, SubResource, TrackedResource,
};
use weir_core::domain::run::{ActivityError, ActivityRun, PipelineRun, RunStatus};
use weir_core::dto::pipeline::{CreateRunResponse, RunParameters};
use weir_core::dto::resource::{CreateFactory, CreateResourceGroup};
use weir_core::dto::run::RunFilter;

use crate::config::Config;
use crate::monitor::MonitorSettings;
use crate::provision::Topology;
use crate::retry::RetryPolicy;

/// Run id handed out by every `create_run`
pub const RUN_ID: Uuid = Uuid::from_u128(0x2f7fdb90_5df1_4b8e_ac2f_064cfa58202b);

const SUBSCRIPTION: &str = "/subscriptions/00000000-0000-0000-0000-000000000000";

/// Everything the mock currently holds, keyed by resource name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    pub groups: BTreeMap<String, ResourceGroup>,
    pub factories: BTreeMap<String, Factory>,
    pub linked_services: BTreeMap<String, LinkedServiceResource>,
    pub datasets: BTreeMap<String, DatasetResource>,
    pub pipelines: BTreeMap<String, PipelineResource>,
}

#[derive(Default)]
struct State {
    calls: Vec<&'static str>,
    resources: Resources,
    failures: Vec<(&'static str, u16, String)>,
    factory_create_state: Option<String>,
    factory_states: VecDeque<String>,
    run_statuses: VecDeque<RunStatus>,
    activity_runs: Option<Vec<ActivityRun>>,
}

/// Scriptable stand-in for the management plane
///
/// Queued factory states and run statuses are consumed one per fetch; the
/// last one repeats. Everything defaults to success.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<State>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// State reported by the factory create call itself
    pub fn with_factory_create_state(self, state: &str) -> Self {
        self.lock().factory_create_state = Some(state.to_string());
        self
    }

    /// States reported by successive `get_factory` calls
    pub fn with_factory_states(self, states: &[&str]) -> Self {
        self.lock().factory_states = states.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Statuses reported by successive `get_pipeline_run` calls
    pub fn with_run_statuses(self, statuses: &[RunStatus]) -> Self {
        self.lock().run_statuses = statuses.iter().cloned().collect();
        self
    }

    pub fn with_activity_runs(self, runs: Vec<ActivityRun>) -> Self {
        self.lock().activity_runs = Some(runs);
        self
    }

    /// Make the next call to `op` fail with `status` and `body`
    pub fn fail_next(self, op: &'static str, status: u16, body: &str) -> Self {
        self.lock().failures.push((op, status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn snapshot(&self) -> Resources {
        self.lock().resources.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Record a call and hand back its scripted failure, if any
    fn record(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(op);
        if let Some(pos) = state.failures.iter().position(|(o, _, _)| *o == op) {
            let (_, status, body) = state.failures.remove(pos);
            return Err(ClientError::from_body(status, &body));
        }
        Ok(state)
    }
}

fn next_or_last<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

fn factory_path(group: &str, factory: &str) -> String {
    format!(
        "{}/resourceGroups/{}/providers/Microsoft.DataFactory/factories/{}",
        SUBSCRIPTION, group, factory
    )
}

fn stored<P: Clone>(
    resource: &SubResource<P>,
    group: &str,
    factory: &str,
    collection: &str,
    name: &str,
) -> SubResource<P> {
    SubResource {
        id: Some(format!(
            "{}/{}/{}",
            factory_path(group, factory),
            collection,
            name
        )),
        name: Some(name.to_string()),
        resource_type: Some(format!("Microsoft.DataFactory/factories/{}", collection)),
        etag: None,
        properties: resource.properties.clone(),
    }
}

#[async_trait]
impl ManagementApi for MockApi {
    async fn authenticate(&self) -> Result<()> {
        self.record("authenticate").map(|_| ())
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        req: &CreateResourceGroup,
    ) -> Result<ResourceGroup> {
        let mut state = self.record("create_or_update_resource_group")?;
        let group = TrackedResource {
            id: Some(format!("{}/resourceGroups/{}", SUBSCRIPTION, name)),
            name: Some(name.to_string()),
            resource_type: Some("Microsoft.Resources/resourceGroups".to_string()),
            location: Some(req.location.clone()),
            tags: Some(req.tags.clone()),
            properties: Some(ResourceGroupProperties {
                provisioning_state: Some(PROVISIONING_SUCCEEDED.to_string()),
            }),
        };
        state
            .resources
            .groups
            .insert(name.to_string(), group.clone());
        Ok(group)
    }

    async fn create_or_update_factory(
        &self,
        group: &str,
        name: &str,
        req: &CreateFactory,
    ) -> Result<Factory> {
        let mut state = self.record("create_or_update_factory")?;
        let provisioning = state
            .factory_create_state
            .clone()
            .unwrap_or_else(|| PROVISIONING_SUCCEEDED.to_string());
        let mut factory = factory_named(group, name, &req.location, &provisioning);
        factory.tags = Some(req.tags.clone());
        state
            .resources
            .factories
            .insert(name.to_string(), factory.clone());
        Ok(factory)
    }

    async fn get_factory(&self, group: &str, name: &str) -> Result<Factory> {
        let mut state = self.record("get_factory")?;
        let provisioning = next_or_last(&mut state.factory_states)
            .unwrap_or_else(|| PROVISIONING_SUCCEEDED.to_string());
        let location = state
            .resources
            .factories
            .get(name)
            .and_then(|f| f.location.clone())
            .unwrap_or_else(|| "eastus".to_string());
        let factory = factory_named(group, name, &location, &provisioning);
        state
            .resources
            .factories
            .insert(name.to_string(), factory.clone());
        Ok(factory)
    }

    async fn create_or_update_linked_service(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &LinkedServiceResource,
    ) -> Result<LinkedServiceResource> {
        let mut state = self.record("create_or_update_linked_service")?;
        let ls = stored(resource, group, factory, "linkedservices", name);
        state
            .resources
            .linked_services
            .insert(name.to_string(), ls.clone());
        Ok(ls)
    }

    async fn create_or_update_dataset(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &DatasetResource,
    ) -> Result<DatasetResource> {
        let mut state = self.record("create_or_update_dataset")?;
        let ds = stored(resource, group, factory, "datasets", name);
        state
            .resources
            .datasets
            .insert(name.to_string(), ds.clone());
        Ok(ds)
    }

    async fn create_or_update_pipeline(
        &self,
        group: &str,
        factory: &str,
        name: &str,
        resource: &PipelineResource,
    ) -> Result<PipelineResource> {
        let mut state = self.record("create_or_update_pipeline")?;
        let pipeline = stored(resource, group, factory, "pipelines", name);
        state
            .resources
            .pipelines
            .insert(name.to_string(), pipeline.clone());
        Ok(pipeline)
    }

    async fn create_run(
        &self,
        _group: &str,
        _factory: &str,
        pipeline: &str,
        _parameters: &RunParameters,
    ) -> Result<CreateRunResponse> {
        let state = self.record("create_run")?;
        let pipelines = &state.resources.pipelines;
        if !pipelines.is_empty() && !pipelines.contains_key(pipeline) {
            return Err(ClientError::from_body(
                404,
                r#"{"error":{"code":"PipelineNotFound","message":"pipeline not found"}}"#,
            ));
        }
        Ok(CreateRunResponse { run_id: RUN_ID })
    }

    async fn get_pipeline_run(
        &self,
        _group: &str,
        _factory: &str,
        run_id: Uuid,
    ) -> Result<PipelineRun> {
        let mut state = self.record("get_pipeline_run")?;
        let status = next_or_last(&mut state.run_statuses).unwrap_or(RunStatus::Succeeded);
        Ok(pipeline_run(run_id, status))
    }

    async fn query_activity_runs(
        &self,
        _group: &str,
        _factory: &str,
        _run_id: Uuid,
        _filter: &RunFilter,
    ) -> Result<Vec<ActivityRun>> {
        let state = self.record("query_activity_runs")?;
        Ok(state
            .activity_runs
            .clone()
            .unwrap_or_else(|| vec![succeeded_activity(100, 100, 5)]))
    }
}

fn factory_named(group: &str, name: &str, location: &str, provisioning: &str) -> Factory {
    TrackedResource {
        id: Some(factory_path(group, name)),
        name: Some(name.to_string()),
        resource_type: Some("Microsoft.DataFactory/factories".to_string()),
        location: Some(location.to_string()),
        tags: Some(BTreeMap::new()),
        properties: Some(FactoryProperties {
            provisioning_state: Some(provisioning.to_string()),
            create_time: None,
            version: Some("2018-06-01".to_string()),
        }),
    }
}

/// Factory `F` in group `G` reporting `provisioning`
pub fn factory_in_state(provisioning: &str) -> Factory {
    factory_named("G", "F", "eastus", provisioning)
}

pub fn pipeline_run(run_id: Uuid, status: RunStatus) -> PipelineRun {
    PipelineRun {
        run_id,
        pipeline_name: Some("P".to_string()),
        status,
        message: None,
        run_start: None,
        run_end: None,
        duration_in_ms: None,
        last_updated: None,
        parameters: BTreeMap::new(),
    }
}

fn activity(status: RunStatus) -> ActivityRun {
    ActivityRun {
        activity_name: "copyBlobtoBlob".to_string(),
        activity_type: Some("Copy".to_string()),
        activity_run_id: None,
        pipeline_run_id: Some(RUN_ID),
        status,
        activity_run_start: None,
        activity_run_end: None,
        duration_in_ms: None,
        output: None,
        error: None,
    }
}

pub fn succeeded_activity(read: u64, written: u64, duration: u64) -> ActivityRun {
    ActivityRun {
        output: Some(serde_json::json!({
            "dataRead": read,
            "dataWritten": written,
            "copyDuration": duration,
        })),
        ..activity(RunStatus::Succeeded)
    }
}

pub fn failed_activity(message: &str) -> ActivityRun {
    ActivityRun {
        error: Some(ActivityError {
            error_code: Some("2200".to_string()),
            message: Some(message.to_string()),
            failure_type: Some("UserError".to_string()),
            target: Some("copyBlobtoBlob".to_string()),
        }),
        ..activity(RunStatus::Failed)
    }
}

/// Environment with every required variable set
pub fn env() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("AZURE_SUBSCRIPTION_ID", "00000000-0000-0000-0000-000000000000"),
        ("AZURE_CLIENT_ID", "client"),
        ("AZURE_CLIENT_SECRET", "client-secret"),
        ("AZURE_TENANT_ID", "tenant"),
        (
            "WEIR_STORAGE_CONNECTION_STRING",
            "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=key",
        ),
        ("WEIR_RESOURCE_GROUP", "G"),
        ("WEIR_FACTORY_NAME", "F"),
        ("WEIR_LINKED_SERVICE_NAME", "L"),
        ("WEIR_INPUT_DATASET", "in"),
        ("WEIR_OUTPUT_DATASET", "out"),
        ("WEIR_PIPELINE_NAME", "P"),
    ])
}

/// Configuration for the test topology with millisecond timings
pub fn config() -> Config {
    let env = env();
    let mut config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
    config.readiness = RetryPolicy::fixed(Duration::from_millis(1), 5);
    config.create_retry = RetryPolicy::fixed(Duration::from_millis(1), 3);
    config.monitor = MonitorSettings {
        initial_delay: Duration::ZERO,
        poll_interval: Duration::from_millis(1),
        timeout: Duration::from_secs(5),
    };
    config
}

pub fn topology() -> Topology {
    config().topology
}
