use std::time::Duration;

use aws_sdk_kafka::operation::describe_configuration::DescribeConfigurationOutput;
use aws_sdk_kafka::types::{Cluster, ClusterOperationInfo};
use converge_core::{Backoff, Diagnostic, StatusProbe, WaitSpec};

use crate::states::{
    ClusterState, ConfigurationState, CLUSTER_OPERATION_STATE_PENDING,
    CLUSTER_OPERATION_STATE_UPDATE_COMPLETE, CLUSTER_OPERATION_STATE_UPDATE_FAILED,
    CLUSTER_OPERATION_STATE_UPDATE_IN_PROGRESS,
};

/// Configuration deletion is quick; it gets its own fixed timeout.
pub const CONFIGURATION_DELETED_TIMEOUT: Duration = Duration::from_secs(5 * 60);

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub const BACKOFF: Backoff = Backoff {
    factor: 2,
    max: Duration::from_secs(10),
};

fn base<Pr: StatusProbe>(label: &str, probe: Pr, timeout: Duration) -> WaitSpec<Pr> {
    WaitSpec::new(label, probe)
        .poll_interval(POLL_INTERVAL)
        .backoff(BACKOFF)
        .timeout(timeout)
}

/// `CREATING` until `ACTIVE`.
pub fn cluster_created<Pr>(probe: Pr, timeout: Duration) -> WaitSpec<Pr>
where
    Pr: StatusProbe<Payload = Cluster>,
{
    base("msk_cluster", probe, timeout)
        .pending([ClusterState::Creating.as_str()])
        .target([ClusterState::Active.as_str()])
}

/// `DELETING` until the cluster can no longer be found.
pub fn cluster_deleted<Pr>(probe: Pr, timeout: Duration) -> WaitSpec<Pr>
where
    Pr: StatusProbe<Payload = Cluster>,
{
    base("msk_cluster", probe, timeout).pending([ClusterState::Deleting.as_str()])
}

/// `PENDING` or `UPDATE_IN_PROGRESS` until `UPDATE_COMPLETE`.
pub fn cluster_operation_completed<Pr>(probe: Pr, timeout: Duration) -> WaitSpec<Pr>
where
    Pr: StatusProbe<Payload = ClusterOperationInfo>,
{
    base("msk_cluster_operation", probe, timeout)
        .pending([
            CLUSTER_OPERATION_STATE_PENDING,
            CLUSTER_OPERATION_STATE_UPDATE_IN_PROGRESS,
        ])
        .target([CLUSTER_OPERATION_STATE_UPDATE_COMPLETE])
}

/// `DELETING` until the configuration can no longer be found.
pub fn configuration_deleted<Pr>(probe: Pr) -> WaitSpec<Pr>
where
    Pr: StatusProbe<Payload = DescribeConfigurationOutput>,
{
    base("msk_configuration", probe, CONFIGURATION_DELETED_TIMEOUT)
        .pending([ConfigurationState::Deleting.as_str()])
}

/// A `FAILED` cluster's `state_info`.
pub fn cluster_diagnostic(cluster: &Cluster) -> Option<Diagnostic> {
    if cluster.state() != Some(&ClusterState::Failed) {
        return None;
    }
    let info = cluster.state_info()?;
    Some(Diagnostic::new(
        info.code().unwrap_or_default(),
        info.message().unwrap_or_default(),
    ))
}

/// An `UPDATE_FAILED` operation's `error_info`.
pub fn operation_diagnostic(operation: &ClusterOperationInfo) -> Option<Diagnostic> {
    if operation.operation_state() != Some(CLUSTER_OPERATION_STATE_UPDATE_FAILED) {
        return None;
    }
    let info = operation.error_info()?;
    Some(Diagnostic::new(
        info.error_code().unwrap_or_default(),
        info.error_string().unwrap_or_default(),
    ))
}
