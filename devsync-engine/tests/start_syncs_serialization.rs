//! The start-sync lock is process-wide, not per-resource: concurrent
//! orchestrations for different workloads must still serialize.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use devsync_core::types::{DevModeSpec, Override, ResolvedSyncConfig, SyncMode, SyncPathSpec};
use devsync_engine::{
    DestinationResolver, EngineError, NamedLocks, SessionKey, SyncEngine, SyncOrchestrator,
};
use devsync_workload::manifest::{
    Container, ObjectMeta, PodSpec, PodTemplate, Workload, WorkloadKind, WorkloadSpec,
};
use devsync_workload::{ResourceIdentity, DEV_MODE_ANNOTATION};

struct OverlapProbe {
    in_flight: AtomicUsize,
    max_seen: AtomicUsize,
}

#[async_trait]
impl SyncEngine for OverlapProbe {
    async fn ensure_sync(
        &self,
        _key: &SessionKey,
        _config: &ResolvedSyncConfig,
        _source_description: &str,
        _target_description: &str,
    ) -> Result<(), EngineError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
        // Give the scheduler every chance to interleave the other task.
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

struct StaticResolver;

#[async_trait]
impl DestinationResolver for StaticResolver {
    async fn resolve_destination(
        &self,
        _namespace: &str,
        _container_name: &str,
        _resource: &ResourceIdentity,
        target_path: &str,
    ) -> Result<String, EngineError> {
        Ok(format!("remote:{target_path}"))
    }
}

fn workload(name: &str) -> Workload {
    let mut annotations = BTreeMap::new();
    annotations.insert(DEV_MODE_ANNOTATION.to_string(), "true".to_string());
    Workload {
        api_version: "apps/v1".to_string(),
        kind: WorkloadKind::Deployment,
        metadata: ObjectMeta {
            name: name.to_string(),
            annotations,
            ..Default::default()
        },
        spec: WorkloadSpec {
            template: PodTemplate {
                spec: PodSpec {
                    containers: vec![Container {
                        name: "main".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

fn spec() -> DevModeSpec {
    DevModeSpec {
        sync: vec![SyncPathSpec {
            source: "src".to_string(),
            target: "/code".to_string(),
            mode: SyncMode::OneWaySafe,
            exclude: vec![],
            default_file_mode: Override::Inherit,
            default_directory_mode: Override::Inherit,
            default_owner: Override::Inherit,
            default_group: Override::Inherit,
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn concurrent_start_syncs_for_different_resources_serialize() {
    let probe = Arc::new(OverlapProbe {
        in_flight: AtomicUsize::new(0),
        max_seen: AtomicUsize::new(0),
    });
    // Two orchestrators sharing one lock registry, as two call sites in the
    // same process would.
    let locks = Arc::new(NamedLocks::new());
    let a = Arc::new(SyncOrchestrator::new(
        probe.clone(),
        Arc::new(StaticResolver),
        locks.clone(),
    ));
    let b = Arc::new(SyncOrchestrator::new(
        probe.clone(),
        Arc::new(StaticResolver),
        locks,
    ));

    let task_a = tokio::spawn({
        let a = a.clone();
        async move {
            a.start_syncs(
                &workload("api"),
                &spec(),
                None,
                "default",
                Path::new("/app"),
                None,
                "api",
            )
            .await
        }
    });
    let task_b = tokio::spawn({
        let b = b.clone();
        async move {
            b.start_syncs(
                &workload("worker"),
                &spec(),
                None,
                "default",
                Path::new("/worker"),
                None,
                "worker",
            )
            .await
        }
    });

    let keys_a = task_a.await.expect("join a").expect("start a");
    let keys_b = task_b.await.expect("join b").expect("start b");

    assert_eq!(keys_a[0].as_str(), "deployment--default--api-0");
    assert_eq!(keys_b[0].as_str(), "deployment--default--worker-0");
    assert_eq!(
        probe.max_seen.load(Ordering::SeqCst),
        1,
        "establishment for different resources must never overlap"
    );
}
