//! End-to-end orchestrator runs against a mocked build server.

use std::time::Duration;

use lastbuild::core::UpdateError;
use lastbuild::platform::{Platform, PlatformProfile};
use lastbuild::upgrade::{Orchestrator, RunConfig};

fn config(
    server: &mockito::Server,
    version_line: &str,
    build_type: &str,
    profile: PlatformProfile,
    store_path: std::path::PathBuf,
) -> RunConfig {
    RunConfig {
        version_line: version_line.to_string(),
        platform: profile.platform,
        profile,
        build_type: build_type.to_string(),
        root_url: server.url(),
        store_path,
        download: false,
        install: false,
        backup: false,
        stop_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn download_only_run_saves_the_artifact() {
    let mut server = mockito::Server::new_async().await;
    let temp = tempfile::tempdir().unwrap();

    let _listing = server
        .mock("GET", "/master")
        .with_status(200)
        .with_body(r#"<a href="1.2.3.4568/">1.2.3.4568/</a>"#)
        .create_async()
        .await;
    let _artifact = server
        .mock("GET", "/master/1.2.3.4568/Win/QA/NimbusSetup.exe")
        .with_status(200)
        .with_body("INSTALLERBYTES")
        .create_async()
        .await;

    let profile = PlatformProfile::with_home(Platform::Windows, temp.path());
    let mut config = config(&server, "master", "QA", profile, temp.path().to_path_buf());
    config.download = true;

    let outcome = Orchestrator::new(config).run().await.unwrap();

    assert_eq!(outcome.build.label, "1.2.3.4568/");
    assert!(!outcome.installed);
    let artifact = outcome.artifact.unwrap();
    assert_eq!(artifact, temp.path().join("NimbusSetup.exe"));
    assert_eq!(std::fs::read_to_string(artifact).unwrap(), "INSTALLERBYTES");
}

#[tokio::test]
async fn failed_backup_aborts_before_any_install() {
    let mut server = mockito::Server::new_async().await;
    let temp = tempfile::tempdir().unwrap();

    let _listing = server
        .mock("GET", "/hotfix-7")
        .with_status(200)
        .with_body(r#"<a href="hotfix-7.100/">hotfix-7.100/</a>"#)
        .create_async()
        .await;
    let _artifact = server
        .mock("GET", "/hotfix-7/hotfix-7.100/Lin/nimbus_100_Debug_amd64.deb")
        .with_status(200)
        .with_body("DEB")
        .create_async()
        .await;

    // Installed binary absent (stop is a no-op) and data directory absent
    // (backup must fail before the install command is ever built).
    let mut profile = PlatformProfile::with_home(Platform::Linux { fedora: false }, temp.path());
    profile.installed_path = temp.path().join("absent/Nimbus");
    profile.data_path = temp.path().join("absent-data");

    let mut config = config(&server, "hotfix-7", "Debug", profile, temp.path().to_path_buf());
    config.download = true;
    config.install = true;
    config.backup = true;

    let err = Orchestrator::new(config).run().await.unwrap_err();
    assert!(matches!(err, UpdateError::Backup { .. }));
}

#[tokio::test]
async fn no_verified_build_fails_the_run() {
    let mut server = mockito::Server::new_async().await;
    let temp = tempfile::tempdir().unwrap();

    let _listing = server
        .mock("GET", "/master")
        .with_status(200)
        .with_body(r#"<a href="1.2.3.4568/">1.2.3.4568/</a>"#)
        .create_async()
        .await;

    let profile = PlatformProfile::with_home(Platform::Windows, temp.path());
    let config = config(&server, "master", "QA", profile, temp.path().to_path_buf());

    let err = Orchestrator::new(config).run().await.unwrap_err();
    assert!(matches!(err, UpdateError::BuildNotFound { .. }));
}
