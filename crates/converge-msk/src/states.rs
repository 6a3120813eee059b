//! Lifecycle states reported by the MSK control plane.
//!
//! Cluster and configuration states are SDK enums; cluster operation states
//! come back as plain strings.

pub use aws_sdk_kafka::types::{ClusterState, ConfigurationState};

pub const CLUSTER_OPERATION_STATE_PENDING: &str = "PENDING";
pub const CLUSTER_OPERATION_STATE_UPDATE_IN_PROGRESS: &str = "UPDATE_IN_PROGRESS";
pub const CLUSTER_OPERATION_STATE_UPDATE_COMPLETE: &str = "UPDATE_COMPLETE";
pub const CLUSTER_OPERATION_STATE_UPDATE_FAILED: &str = "UPDATE_FAILED";
