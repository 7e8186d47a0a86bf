//! Topology provisioning
//!
//! Creates or updates, in dependency order, the resource group, the factory
//! (waiting for it to become ready), the linked service, both datasets and
//! the pipeline. Each call is idempotent at the service, so re-running
//! updates resources in place. The first failure aborts the sequence; nothing
//! already created is rolled back.

mod readiness;
mod topology;

pub use readiness::wait_for_factory;
pub use topology::Topology;

use tracing::info;
use weir_client::ManagementApi;
use weir_core::domain::dataset::DatasetResource;
use weir_core::domain::resource::ResourceSummary;
use weir_core::domain::secret::SecureString;

use crate::config::Config;
use crate::error::{Result, Step};
use crate::retry::{RetryPolicy, retry_transient};

/// Drives the create-or-update sequence for one topology
pub struct Provisioner<'a> {
    api: &'a dyn ManagementApi,
    topology: &'a Topology,
    connection_string: &'a SecureString,
    readiness: &'a RetryPolicy,
    retry: &'a RetryPolicy,
}

impl<'a> Provisioner<'a> {
    /// Fails with a configuration error when no storage connection string is configured
    pub fn new(api: &'a dyn ManagementApi, config: &'a Config) -> Result<Self> {
        Ok(Self {
            api,
            topology: &config.topology,
            connection_string: config.storage_connection_string()?,
            readiness: &config.readiness,
            retry: &config.create_retry,
        })
    }

    /// Provision every resource, reporting each one to `on_created` as soon as it exists
    pub async fn provision<F>(&self, mut on_created: F) -> Result<Vec<ResourceSummary>>
    where
        F: FnMut(&ResourceSummary),
    {
        let mut created = Vec::with_capacity(6);
        let mut ready = |summary: ResourceSummary| {
            info!(kind = summary.kind, name = %summary.name, "Resource ready");
            on_created(&summary);
            created.push(summary);
        };

        ready(self.resource_group().await?);
        ready(self.factory().await?);
        ready(self.linked_service().await?);
        let t = self.topology;
        ready(
            self.dataset(Step::InputDataset, &t.input_dataset, t.input_dataset_resource())
                .await?,
        );
        ready(
            self.dataset(Step::OutputDataset, &t.output_dataset, t.output_dataset_resource())
                .await?,
        );
        ready(self.pipeline().await?);

        Ok(created)
    }

    async fn resource_group(&self) -> Result<ResourceSummary> {
        let t = self.topology;
        let req = t.resource_group_request();
        let group = retry_transient(self.retry, Step::ResourceGroup, || {
            self.api.create_or_update_resource_group(&t.resource_group, &req)
        })
        .await?;
        Ok(ResourceSummary::from_tracked(
            "Resource group",
            &t.resource_group,
            &group,
        ))
    }

    /// Create the factory and wait until it is ready
    async fn factory(&self) -> Result<ResourceSummary> {
        let t = self.topology;
        let req = t.factory_request();
        let created = retry_transient(self.retry, Step::Factory, || {
            self.api.create_or_update_factory(&t.resource_group, &t.factory, &req)
        })
        .await?;
        // Summarize the creation response, as later fetches only differ in state
        let summary = ResourceSummary::from_tracked("Factory", &t.factory, &created);
        wait_for_factory(
            self.api,
            &t.resource_group,
            &t.factory,
            created,
            self.readiness,
        )
        .await?;
        Ok(summary)
    }

    async fn linked_service(&self) -> Result<ResourceSummary> {
        let t = self.topology;
        let resource = t.linked_service(self.connection_string);
        let ls = retry_transient(self.retry, Step::LinkedService, || {
            self.api.create_or_update_linked_service(
                &t.resource_group,
                &t.factory,
                &t.linked_service,
                &resource,
            )
        })
        .await?;
        Ok(ResourceSummary::from_sub(
            "Linked service",
            &t.linked_service,
            &ls,
        ))
    }

    async fn dataset(
        &self,
        step: Step,
        name: &str,
        resource: DatasetResource,
    ) -> Result<ResourceSummary> {
        let t = self.topology;
        let ds = retry_transient(self.retry, step, || {
            self.api
                .create_or_update_dataset(&t.resource_group, &t.factory, name, &resource)
        })
        .await?;
        Ok(ResourceSummary::from_sub("Dataset", name, &ds))
    }

    async fn pipeline(&self) -> Result<ResourceSummary> {
        let t = self.topology;
        let resource = t.pipeline_resource();
        let pipeline = retry_transient(self.retry, Step::Pipeline, || {
            self.api.create_or_update_pipeline(
                &t.resource_group,
                &t.factory,
                &t.pipeline,
                &resource,
            )
        })
        .await?;
        Ok(ResourceSummary::from_sub("Pipeline", &t.pipeline, &pipeline))
    }
}
