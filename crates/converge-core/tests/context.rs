use std::time::Duration;

use converge_core::WaitContext;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn deadline_makes_context_done() {
    let ctx = WaitContext::new().with_timeout(Duration::from_secs(30));
    assert!(!ctx.is_done());

    ctx.done().await;

    assert!(ctx.is_done());
    assert!(!ctx.token().is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn earlier_deadline_wins() {
    let now = Instant::now();
    let ctx = WaitContext::new()
        .with_deadline(now + Duration::from_secs(10))
        .with_deadline(now + Duration::from_secs(60));

    assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(10)));
}

#[tokio::test(start_paused = true)]
async fn unrepresentable_timeout_sets_no_deadline() {
    let ctx = WaitContext::new().with_timeout(Duration::MAX);
    assert_eq!(ctx.deadline(), None);
    assert!(!ctx.is_done());

    let now = Instant::now();
    let bounded = WaitContext::new()
        .with_deadline(now + Duration::from_secs(10))
        .with_timeout(Duration::MAX);
    assert_eq!(bounded.deadline(), Some(now + Duration::from_secs(10)));
}

#[test]
fn cancelling_parent_cancels_child_only_downwards() {
    let parent = WaitContext::new();
    let child = parent.child();

    child.cancel();
    assert!(child.is_done());
    assert!(!parent.is_done());

    let other = parent.child();
    parent.cancel();
    assert!(other.is_done());
}
