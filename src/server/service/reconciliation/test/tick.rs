use super::*;
use std::time::Duration;

/// Seeds one tenant with a holder in every convergence state.
fn seed_mixed_tenant(harness: &Harness, tenant_id: u64, role_id: u64) {
    harness.add_tenant(tenant_id, role_id, "200000");

    // eligible, lacks role
    harness.add_holder(tenant_id, 1, &["rich"], false);
    harness.add_member(tenant_id, 1, &[]);
    // ineligible, has role
    harness.add_holder(tenant_id, 2, &["poor", "poorer"], true);
    harness.add_member(tenant_id, 2, &[role_id]);
    // left the guild while active
    harness.add_holder(tenant_id, 3, &["gone"], true);
    // eligible with role but record says inactive
    harness.add_holder(tenant_id, 4, &["rich"], false);
    harness.add_member(tenant_id, 4, &[role_id]);

    harness.set_balance("rich", 250_000);
    harness.set_balance("poor", 0);
    harness.set_balance("poorer", 50_000);
}

/// Tests that a second tick with no real-world change does nothing.
///
/// Expected: First tick converges, second tick has zero role calls and zero writes
#[tokio::test]
async fn second_tick_is_a_no_op() {
    let harness = Harness::new();
    seed_mixed_tenant(&harness, 10, 100);
    let reconciler = harness.reconciler();

    let first = reconciler.run_tick().await.unwrap();
    assert_eq!(first.roles_granted, 1);
    assert_eq!(first.roles_revoked, 1);
    assert_eq!(first.store_writes, 4);

    harness.clear_recordings();
    let second = reconciler.run_tick().await.unwrap();

    assert_eq!(second.role_mutations(), 0);
    assert_eq!(second.store_writes, 0);
    assert!(harness.guilds.role_calls().is_empty());
    assert!(harness.holders.writes().is_empty());
}

/// Tests a tick with no configured tenants.
///
/// Expected: Ok with an empty summary and no collaborator calls
#[tokio::test]
async fn empty_tenant_list_ends_tick() {
    let harness = Harness::new();

    let summary = harness.reconciler().run_tick().await.unwrap();

    assert_eq!(summary, Default::default());
    assert!(harness.oracle.queries().is_empty());
}

/// Tests a tick whose tenant listing fails.
///
/// Expected: Err and nothing processed
#[tokio::test]
async fn tenant_listing_failure_aborts_tick() {
    let harness = Harness::new();
    seed_mixed_tenant(&harness, 10, 100);
    harness.tenants.fail.store(true, Ordering::SeqCst);

    let result = harness.reconciler().run_tick().await;

    assert!(result.is_err());
    assert!(harness.guilds.role_calls().is_empty());
}

/// Tests that a panic in one tenant's holder affects neither its other holders nor
/// other tenants.
///
/// Expected: Remaining holders in both tenants granted
#[tokio::test]
async fn isolates_failures_across_tenants() {
    let harness = Harness::new();
    harness.add_tenant(1, 100, "10");
    harness.add_tenant(2, 200, "10");

    harness.add_holder(1, 11, &["boom"], false);
    harness.add_member(1, 11, &[]);
    harness.add_holder(1, 12, &["ok"], false);
    harness.add_member(1, 12, &[]);
    harness.add_holder(2, 21, &["ok"], false);
    harness.add_member(2, 21, &[]);

    harness.set_balance("ok", 10);
    harness
        .oracle
        .panic_on
        .lock()
        .unwrap()
        .insert("boom".to_string());

    let summary = harness.reconciler().run_tick().await.unwrap();

    assert_eq!(summary.tenants_checked, 2);
    assert_eq!(summary.holder_errors, 1);
    assert_eq!(summary.roles_granted, 2);
    assert!(harness.guilds.member(1, 12).unwrap().has_role(100));
    assert!(harness.guilds.member(2, 21).unwrap().has_role(200));
}

/// Tests that a skipped tenant does not stop the others.
///
/// Expected: One skip counted, the healthy tenant converged
#[tokio::test]
async fn skipped_tenant_does_not_block_others() {
    let harness = Harness::new();
    harness.add_tenant(1, 100, "not-a-number");
    harness.add_holder(1, 11, &["ok"], false);
    harness.add_member(1, 11, &[]);
    harness.add_tenant(2, 200, "10");
    harness.add_holder(2, 21, &["ok"], false);
    harness.add_member(2, 21, &[]);
    harness.set_balance("ok", 10);

    let summary = harness.reconciler().run_tick().await.unwrap();

    assert_eq!(summary.tenants_skipped, 1);
    assert_eq!(summary.roles_granted, 1);
    assert!(!harness.guilds.member(1, 11).unwrap().has_role(100));
}

fn seed_slow_tenants(harness: &Harness, count: u64) {
    for tenant_id in 1..=count {
        harness.add_tenant(tenant_id, 100 + tenant_id, "1");
        harness.add_holder(tenant_id, 1, &["w"], false);
        harness.add_member(tenant_id, 1, &[]);
    }
    harness.set_balance("w", 1);
    *harness.oracle.delay.lock().unwrap() = Some(Duration::from_millis(20));
}

/// Tests that the worker pool never exceeds its bound.
///
/// Expected: At most two tenants in flight, all four converged
#[tokio::test]
async fn bounds_concurrent_tenants() {
    let harness = Harness::new();
    seed_slow_tenants(&harness, 4);

    let summary = harness
        .reconciler_with(ReconcileSettings {
            max_concurrent_tenants: 2,
            ..Default::default()
        })
        .run_tick()
        .await
        .unwrap();

    assert_eq!(summary.roles_granted, 4);
    assert_eq!(harness.oracle.max_in_flight.load(Ordering::SeqCst), 2);
}

/// Tests sequential processing with the default settings.
///
/// Expected: Never more than one tenant in flight
#[tokio::test]
async fn processes_tenants_sequentially_by_default() {
    let harness = Harness::new();
    seed_slow_tenants(&harness, 3);

    let summary = harness.reconciler().run_tick().await.unwrap();

    assert_eq!(summary.roles_granted, 3);
    assert_eq!(harness.oracle.max_in_flight.load(Ordering::SeqCst), 1);
}
