use aws_sdk_kafka::error::ProvideErrorMetadata;
use aws_sdk_kafka::operation::describe_configuration::DescribeConfigurationOutput;
use aws_sdk_kafka::types::{Cluster, ClusterOperationInfo};
use aws_sdk_kafka::Client;
use converge_core::{format_err_chain, BoxFuture, Observation, ProbeError, ProbeResult, StatusProbe};

/// Reads a cluster through `kafka:DescribeClusterV2`.
pub struct ClusterProbe {
    client: Client,
    arn: String,
}

impl ClusterProbe {
    pub fn new(client: Client, arn: impl Into<String>) -> Self {
        Self {
            client,
            arn: arn.into(),
        }
    }
}

impl StatusProbe for ClusterProbe {
    type Payload = Cluster;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<Cluster>> {
        Box::pin(async {
            let resp = match self
                .client
                .describe_cluster_v2()
                .cluster_arn(&self.arn)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    let is_not_found = e
                        .as_service_error()
                        .map(|se| se.is_not_found_exception())
                        .unwrap_or(false);
                    if is_not_found {
                        return Err(ProbeError::NotFound(self.arn.clone()));
                    }
                    return Err(request_failed("kafka:DescribeClusterV2", &e));
                }
            };

            let cluster = resp
                .cluster_info()
                .cloned()
                .ok_or_else(|| ProbeError::NotFound(self.arn.clone()))?;
            let state = cluster
                .state()
                .map(|s| s.as_str().to_string())
                .ok_or_else(|| ProbeError::Malformed(format!("cluster {} has no state", self.arn)))?;

            Ok(Observation::new(state, cluster))
        })
    }
}

/// Reads a cluster operation through `kafka:DescribeClusterOperation`.
pub struct ClusterOperationProbe {
    client: Client,
    arn: String,
}

impl ClusterOperationProbe {
    pub fn new(client: Client, arn: impl Into<String>) -> Self {
        Self {
            client,
            arn: arn.into(),
        }
    }
}

impl StatusProbe for ClusterOperationProbe {
    type Payload = ClusterOperationInfo;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<ClusterOperationInfo>> {
        Box::pin(async {
            let resp = match self
                .client
                .describe_cluster_operation()
                .cluster_operation_arn(&self.arn)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    let is_not_found = e
                        .as_service_error()
                        .map(|se| se.is_not_found_exception())
                        .unwrap_or(false);
                    if is_not_found {
                        return Err(ProbeError::NotFound(self.arn.clone()));
                    }
                    return Err(request_failed("kafka:DescribeClusterOperation", &e));
                }
            };

            let info = resp
                .cluster_operation_info()
                .cloned()
                .ok_or_else(|| ProbeError::NotFound(self.arn.clone()))?;
            let state = info.operation_state().map(String::from).ok_or_else(|| {
                ProbeError::Malformed(format!("cluster operation {} has no state", self.arn))
            })?;

            Ok(Observation::new(state, info))
        })
    }
}

/// Reads a cluster configuration through `kafka:DescribeConfiguration`.
pub struct ConfigurationProbe {
    client: Client,
    arn: String,
}

impl ConfigurationProbe {
    pub fn new(client: Client, arn: impl Into<String>) -> Self {
        Self {
            client,
            arn: arn.into(),
        }
    }
}

impl StatusProbe for ConfigurationProbe {
    type Payload = DescribeConfigurationOutput;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<DescribeConfigurationOutput>> {
        Box::pin(async {
            let resp = match self.client.describe_configuration().arn(&self.arn).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    let is_not_found = e
                        .as_service_error()
                        .map(|se| se.is_not_found_exception())
                        .unwrap_or(false);
                    if is_not_found {
                        return Err(ProbeError::NotFound(self.arn.clone()));
                    }
                    return Err(request_failed("kafka:DescribeConfiguration", &e));
                }
            };

            let state = resp.state().map(|s| s.as_str().to_string()).ok_or_else(|| {
                ProbeError::Malformed(format!("configuration {} has no state", self.arn))
            })?;

            Ok(Observation::new(state, resp))
        })
    }
}

/// Flatten an SDK error into a probe failure, keeping the service's error
/// code when there is one.
fn request_failed<E>(operation: &str, err: &E) -> ProbeError
where
    E: std::error::Error + ProvideErrorMetadata,
{
    match err.code() {
        Some(code) => ProbeError::Request(format!(
            "{operation} failed ({code}): {}",
            format_err_chain(err)
        )),
        None => ProbeError::Request(format!("{operation} failed: {}", format_err_chain(err))),
    }
}
