//! Sync-agent injection into a workload's pod template.
//!
//! [`inject_sync_agent`] mutates the target in place and returns a
//! [`PatchSummary`] naming exactly what was touched. The operation is NOT
//! self-guarding: calling it twice on the same resource appends a second
//! shared volume, init container, and volume mount. Callers must invoke it
//! exactly once per resource lifecycle.

use devsync_core::types::DevModeSpec;

use crate::error::WorkloadError;
use crate::manifest::{Container, EmptyDirVolumeSource, PodSpec, Volume, VolumeMount};
use crate::target::{ResourceIdentity, SyncTarget};

// ---------------------------------------------------------------------------
// Reserved constants — fixed, not configurable
// ---------------------------------------------------------------------------

/// Annotation marking a workload as dev-mode-enabled.
pub const DEV_MODE_ANNOTATION: &str = "devsync.io/dev-mode";

/// Name of the shared emptyDir volume holding the sync-agent binary.
pub const SYNC_VOLUME_NAME: &str = "devsync-agent";

/// Mount path of the shared volume inside both init and main containers.
pub const AGENT_MOUNT_PATH: &str = "/.devsync";

/// Utility image the init container copies the agent binary from.
pub const UTIL_IMAGE: &str = "ghcr.io/devsync/k8s-util:1.0.4";

/// Name of the injected init container.
pub const INIT_CONTAINER_NAME: &str = "devsync-init";

// ---------------------------------------------------------------------------
// PatchSummary
// ---------------------------------------------------------------------------

/// Mutation descriptor returned by [`inject_sync_agent`]: which of the
/// contract's fields were actually written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatchSummary {
    /// The dev-mode annotation was set.
    pub annotation_set: bool,
    /// The main container's command was replaced wholesale.
    pub command_replaced: bool,
    /// The main container's args were replaced wholesale.
    pub args_replaced: bool,
    /// Volume + init container + volume mount were appended.
    pub agent_installed: bool,
}

// ---------------------------------------------------------------------------
// Container resolution
// ---------------------------------------------------------------------------

/// Index of the main container: by name if given, else the first container.
pub fn main_container_index(
    pod: &PodSpec,
    container_name: Option<&str>,
    resource: &ResourceIdentity,
) -> Result<usize, WorkloadError> {
    if pod.containers.is_empty() {
        return Err(WorkloadError::NoContainers {
            resource: resource.clone(),
        });
    }
    match container_name {
        None => Ok(0),
        Some(name) => pod
            .containers
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| WorkloadError::ContainerNotFound {
                container: name.to_string(),
                resource: resource.clone(),
            }),
    }
}

// ---------------------------------------------------------------------------
// inject_sync_agent
// ---------------------------------------------------------------------------

/// Patch a workload for dev mode.
///
/// 1. Sets the dev-mode annotation.
/// 2. Resolves the main container (by name, else first).
/// 3. Replaces command/args wholesale when the spec provides them.
/// 4. With no sync rules, stops here — no volume or init container.
/// 5. Otherwise appends the shared agent volume, the init container that
///    populates it, and a mount of it on the main container.
pub fn inject_sync_agent(
    target: &mut dyn SyncTarget,
    spec: &DevModeSpec,
    container_name: Option<&str>,
) -> Result<PatchSummary, WorkloadError> {
    let identity = target.identity();
    let mut summary = PatchSummary::default();

    target
        .annotations_mut()
        .insert(DEV_MODE_ANNOTATION.to_string(), "true".to_string());
    summary.annotation_set = true;

    let pod = target.pod_spec_mut();
    let main_idx = main_container_index(pod, container_name, &identity)?;

    if let Some(command) = &spec.command {
        pod.containers[main_idx].command = Some(command.clone());
        summary.command_replaced = true;
    }
    if let Some(args) = &spec.args {
        pod.containers[main_idx].args = Some(args.clone());
        summary.args_replaced = true;
    }

    if spec.sync.is_empty() {
        return Ok(summary);
    }

    pod.volumes.get_or_insert_with(Vec::new).push(Volume {
        name: SYNC_VOLUME_NAME.to_string(),
        empty_dir: Some(EmptyDirVolumeSource::default()),
        ..Default::default()
    });

    pod.init_containers
        .get_or_insert_with(Vec::new)
        .push(agent_init_container());

    pod.containers[main_idx]
        .volume_mounts
        .get_or_insert_with(Vec::new)
        .push(VolumeMount {
            name: SYNC_VOLUME_NAME.to_string(),
            mount_path: AGENT_MOUNT_PATH.to_string(),
            ..Default::default()
        });
    summary.agent_installed = true;

    Ok(summary)
}

fn agent_init_container() -> Container {
    Container {
        name: INIT_CONTAINER_NAME.to_string(),
        image: Some(UTIL_IMAGE.to_string()),
        command: Some(vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            format!("cp /usr/local/bin/devsync-agent {AGENT_MOUNT_PATH}/devsync-agent"),
        ]),
        image_pull_policy: Some("IfNotPresent".to_string()),
        volume_mounts: Some(vec![VolumeMount {
            name: SYNC_VOLUME_NAME.to_string(),
            mount_path: AGENT_MOUNT_PATH.to_string(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use devsync_core::types::{SyncMode, SyncPathSpec};

    use super::*;
    use crate::manifest::{ObjectMeta, PodTemplate, Workload, WorkloadKind, WorkloadSpec};
    use crate::target::is_dev_mode_enabled;

    fn container(name: &str) -> Container {
        Container {
            name: name.to_string(),
            image: Some("registry.local/app:latest".to_string()),
            ..Default::default()
        }
    }

    fn workload(containers: Vec<Container>) -> Workload {
        Workload {
            api_version: "apps/v1".to_string(),
            kind: WorkloadKind::Deployment,
            metadata: ObjectMeta {
                name: "api".to_string(),
                ..Default::default()
            },
            spec: WorkloadSpec {
                template: PodTemplate {
                    spec: PodSpec {
                        containers,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    fn one_sync() -> SyncPathSpec {
        SyncPathSpec {
            source: "src".to_string(),
            target: "/app/src".to_string(),
            mode: SyncMode::OneWaySafe,
            exclude: vec![],
            default_file_mode: Default::default(),
            default_directory_mode: Default::default(),
            default_owner: Default::default(),
            default_group: Default::default(),
        }
    }

    #[test]
    fn injects_volume_init_container_and_mount() {
        let mut w = workload(vec![container("api")]);
        let spec = DevModeSpec {
            sync: vec![one_sync()],
            ..Default::default()
        };

        let summary = inject_sync_agent(&mut w, &spec, None).expect("inject");
        assert!(summary.annotation_set);
        assert!(summary.agent_installed);
        assert!(is_dev_mode_enabled(&w));

        let pod = w.pod_spec();
        let volumes = pod.volumes.as_ref().expect("volumes");
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name, SYNC_VOLUME_NAME);
        assert!(volumes[0].empty_dir.is_some());

        let inits = pod.init_containers.as_ref().expect("init containers");
        assert_eq!(inits.len(), 1);
        assert_eq!(inits[0].name, INIT_CONTAINER_NAME);
        assert_eq!(inits[0].image.as_deref(), Some(UTIL_IMAGE));
        assert_eq!(inits[0].image_pull_policy.as_deref(), Some("IfNotPresent"));

        let mounts = pod.containers[0].volume_mounts.as_ref().expect("mounts");
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].mount_path, AGENT_MOUNT_PATH);
    }

    #[test]
    fn empty_sync_list_only_tags_and_overrides() {
        let mut w = workload(vec![container("api")]);
        let spec = DevModeSpec {
            command: Some(vec!["npm".to_string(), "run".to_string(), "dev".to_string()]),
            args: Some(vec!["--watch".to_string()]),
            sync: vec![],
        };

        let summary = inject_sync_agent(&mut w, &spec, None).expect("inject");
        assert!(summary.annotation_set);
        assert!(summary.command_replaced);
        assert!(summary.args_replaced);
        assert!(!summary.agent_installed);

        let pod = w.pod_spec();
        assert!(pod.volumes.is_none());
        assert!(pod.init_containers.is_none());
        assert!(pod.containers[0].volume_mounts.is_none());
        assert_eq!(
            pod.containers[0].command,
            Some(vec!["npm".to_string(), "run".to_string(), "dev".to_string()])
        );
        assert_eq!(pod.containers[0].args, Some(vec!["--watch".to_string()]));
        assert!(is_dev_mode_enabled(&w));
    }

    #[test]
    fn command_and_args_replace_existing_values_wholesale() {
        let mut w = workload(vec![Container {
            command: Some(vec!["old".to_string(), "cmd".to_string()]),
            args: Some(vec!["old-arg".to_string()]),
            ..container("api")
        }]);
        let spec = DevModeSpec {
            command: Some(vec!["new".to_string()]),
            sync: vec![],
            ..Default::default()
        };

        inject_sync_agent(&mut w, &spec, None).expect("inject");
        let pod = w.pod_spec();
        assert_eq!(pod.containers[0].command, Some(vec!["new".to_string()]));
        // args untouched when the spec does not provide them
        assert_eq!(pod.containers[0].args, Some(vec!["old-arg".to_string()]));
    }

    #[test]
    fn double_injection_double_appends() {
        let mut w = workload(vec![container("api")]);
        let spec = DevModeSpec {
            sync: vec![one_sync()],
            ..Default::default()
        };

        inject_sync_agent(&mut w, &spec, None).expect("first");
        inject_sync_agent(&mut w, &spec, None).expect("second");

        // Not self-guarding by contract: exactly two of each, no dedup.
        let pod = w.pod_spec();
        assert_eq!(pod.volumes.as_ref().unwrap().len(), 2);
        assert_eq!(pod.init_containers.as_ref().unwrap().len(), 2);
        assert_eq!(pod.containers[0].volume_mounts.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn resolves_main_container_by_name() {
        let mut w = workload(vec![container("sidecar"), container("api")]);
        let spec = DevModeSpec {
            command: Some(vec!["dev".to_string()]),
            sync: vec![one_sync()],
            ..Default::default()
        };

        inject_sync_agent(&mut w, &spec, Some("api")).expect("inject");
        let pod = w.pod_spec();
        assert_eq!(pod.containers[1].command, Some(vec!["dev".to_string()]));
        assert!(pod.containers[1].volume_mounts.is_some());
        assert!(pod.containers[0].command.is_none());
        assert!(pod.containers[0].volume_mounts.is_none());
    }

    #[test]
    fn no_containers_errors_with_resource_identity() {
        let mut w = workload(vec![]);
        let err = inject_sync_agent(&mut w, &DevModeSpec::default(), None).unwrap_err();
        assert!(err.to_string().contains("Deployment/api"), "got: {err}");
    }

    #[test]
    fn unknown_container_name_errors() {
        let mut w = workload(vec![container("api")]);
        let err =
            inject_sync_agent(&mut w, &DevModeSpec::default(), Some("nope")).unwrap_err();
        assert!(matches!(err, WorkloadError::ContainerNotFound { .. }));
        assert!(err.to_string().contains("nope"));
    }
}
