//! Topology definition
//!
//! Names and locations of every resource the tool provisions, and the
//! descriptors sent for each of them.

use weir_core::domain::dataset::{Dataset, DatasetResource};
use weir_core::domain::linked_service::{LinkedService, LinkedServiceResource};
use weir_core::domain::pipeline::{Activity, Pipeline, PipelineResource};
use weir_core::domain::resource::SubResource;
use weir_core::domain::secret::SecureString;
use weir_core::dto::resource::{CreateFactory, CreateResourceGroup};

/// The resources of one copy pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub resource_group: String,
    pub factory: String,
    pub location: String,
    pub linked_service: String,
    pub input_dataset: String,
    pub output_dataset: String,
    pub input_folder: String,
    pub input_file: Option<String>,
    pub output_folder: String,
    pub activity: String,
    pub pipeline: String,
}

impl Topology {
    pub fn resource_group_request(&self) -> CreateResourceGroup {
        CreateResourceGroup::new(&self.location)
    }

    pub fn factory_request(&self) -> CreateFactory {
        CreateFactory::new(&self.location)
    }

    pub fn linked_service(&self, connection_string: &SecureString) -> LinkedServiceResource {
        SubResource::new(LinkedService::azure_storage(connection_string.clone()))
    }

    pub fn input_dataset_resource(&self) -> DatasetResource {
        SubResource::new(Dataset::azure_blob(
            &self.linked_service,
            &self.input_folder,
            self.input_file.clone(),
        ))
    }

    pub fn output_dataset_resource(&self) -> DatasetResource {
        SubResource::new(Dataset::azure_blob(
            &self.linked_service,
            &self.output_folder,
            None,
        ))
    }

    /// Pipeline with one blob copy from the input dataset to the output dataset
    pub fn pipeline_resource(&self) -> PipelineResource {
        SubResource::new(Pipeline::new(vec![Activity::blob_copy(
            &self.activity,
            &self.input_dataset,
            &self.output_dataset,
        )]))
    }
}
