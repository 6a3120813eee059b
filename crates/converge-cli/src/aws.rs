/// Build an `SdkConfig` from an optional region and profile.
///
/// Anything left unset falls through to the SDK's default provider chain.
pub async fn build_aws_config(region: Option<&str>, profile: Option<&str>) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = region {
        builder = builder.region(aws_config::Region::new(region.to_string()));
    }
    if let Some(profile) = profile {
        builder = builder.profile_name(profile);
    }

    builder.load().await
}
