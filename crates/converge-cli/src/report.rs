use converge_core::Outcome;

/// One-line human summary of a finished wait.
pub fn summarize<P>(outcome: &Outcome<P>) -> String {
    let state = outcome
        .last_state
        .as_ref()
        .map(|s| s.as_str())
        .unwrap_or("none");
    let probes = match outcome.probes {
        1 => "1 probe".to_string(),
        n => format!("{n} probes"),
    };
    format!(
        "{} (last state: {state}, {probes}, {}s)",
        outcome.kind(),
        outcome.elapsed.as_secs()
    )
}

/// Print the summary and turn the outcome's error, verbatim, into the
/// process result.
pub fn finish<P>(outcome: Outcome<P>) -> eyre::Result<()> {
    println!("{}", summarize(&outcome));
    match outcome.error {
        None => Ok(()),
        Some(err) => Err(eyre::eyre!(err)),
    }
}
