//! converge-msk
//!
//! Waits for Amazon MSK clusters, cluster operations and configurations to
//! reach their desired lifecycle state.

pub mod probes;
pub mod states;
pub mod waiters;

use std::time::Duration;

use aws_sdk_kafka::operation::describe_configuration::DescribeConfigurationOutput;
use aws_sdk_kafka::types::{Cluster, ClusterOperationInfo};
use converge_core::{wait, Outcome, StatusProbe, WaitContext, WaitSpec};
use tracing::info;

use crate::probes::{ClusterOperationProbe, ClusterProbe, ConfigurationProbe};

pub use aws_sdk_kafka::Client;

/// MSK waiters sharing one Kafka client.
///
/// Every method returns the enriched [`Outcome`]: its payload is the last
/// description read from MSK, and a failed cluster or operation reports
/// its own `code: message` diagnostic as the error.
#[derive(Clone)]
pub struct MskWaiter {
    client: Client,
    poll_interval: Option<Duration>,
}

impl MskWaiter {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self::from_client(Client::new(config))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            poll_interval: None,
        }
    }

    /// Poll at a fixed interval instead of the default backoff.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    fn tune<Pr: StatusProbe>(&self, mut spec: WaitSpec<Pr>) -> WaitSpec<Pr> {
        if let Some(interval) = self.poll_interval {
            spec.poll_interval = interval;
            spec.backoff = None;
        }
        spec
    }

    pub async fn cluster_created(
        &self,
        ctx: &WaitContext,
        arn: &str,
        timeout: Duration,
    ) -> Outcome<Cluster> {
        info!(arn, ?timeout, "waiting for MSK cluster creation");
        let probe = ClusterProbe::new(self.client.clone(), arn);
        wait(ctx, self.tune(waiters::cluster_created(probe, timeout)))
            .await
            .enriched(waiters::cluster_diagnostic)
    }

    pub async fn cluster_deleted(
        &self,
        ctx: &WaitContext,
        arn: &str,
        timeout: Duration,
    ) -> Outcome<Cluster> {
        info!(arn, ?timeout, "waiting for MSK cluster deletion");
        let probe = ClusterProbe::new(self.client.clone(), arn);
        wait(ctx, self.tune(waiters::cluster_deleted(probe, timeout)))
            .await
            .enriched(waiters::cluster_diagnostic)
    }

    pub async fn cluster_operation_completed(
        &self,
        ctx: &WaitContext,
        arn: &str,
        timeout: Duration,
    ) -> Outcome<ClusterOperationInfo> {
        info!(arn, ?timeout, "waiting for MSK cluster operation");
        let probe = ClusterOperationProbe::new(self.client.clone(), arn);
        wait(ctx, self.tune(waiters::cluster_operation_completed(probe, timeout)))
            .await
            .enriched(waiters::operation_diagnostic)
    }

    /// `timeout` defaults to [`waiters::CONFIGURATION_DELETED_TIMEOUT`].
    pub async fn configuration_deleted(
        &self,
        ctx: &WaitContext,
        arn: &str,
        timeout: Option<Duration>,
    ) -> Outcome<DescribeConfigurationOutput> {
        info!(arn, ?timeout, "waiting for MSK configuration deletion");
        let probe = ConfigurationProbe::new(self.client.clone(), arn);
        let mut spec = waiters::configuration_deleted(probe);
        if let Some(timeout) = timeout {
            spec.timeout = timeout;
        }
        wait(ctx, self.tune(spec)).await
    }
}
