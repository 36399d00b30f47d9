//! Discovery against a mocked build server.

use std::path::Path;

use lastbuild::core::UpdateError;
use lastbuild::locate::BuildLocator;
use lastbuild::platform::{Platform, PlatformProfile};

fn linux_profile() -> PlatformProfile {
    PlatformProfile::with_home(Platform::Linux { fedora: false }, Path::new("/home/u"))
}

fn listing(entries: &[&str]) -> String {
    let anchors: String = entries
        .iter()
        .map(|e| format!("<a href=\"{e}\">{e}</a>\n"))
        .collect();
    format!("<html><body><pre>\n<a href=\"../\">Parent</a>\n{anchors}</pre></body></html>")
}

#[tokio::test]
async fn picks_the_highest_verified_dotted_build() {
    let mut server = mockito::Server::new_async().await;
    let client = reqwest::Client::new();
    let profile = linux_profile();

    let _listing = server
        .mock("GET", "/master")
        .with_status(200)
        .with_body(listing(&["0.9.0.1/", "1.2.3.4567/", "1.2.3.4568/", "9.9.9.9999/"]))
        .create_async()
        .await;

    // Only 1.2.3.4568 actually has a published Linux artifact; the nominally
    // newer 9.9.9.9999 entry must not win.
    let _artifact = server
        .mock("GET", "/master/1.2.3.4568/Lin/nimbus_1.2.3.4568_Release_amd64.deb")
        .with_status(200)
        .create_async()
        .await;

    let locator = BuildLocator::new(&client, &profile, "Release");
    let version_directory = format!("{}/master", server.url());
    let build = locator.latest(&version_directory, true).await.unwrap().unwrap();

    assert_eq!(build.label, "1.2.3.4568/");
    assert_eq!(build.revision, None);
}

#[tokio::test]
async fn bounded_lines_select_by_verified_revision() {
    let mut server = mockito::Server::new_async().await;
    let client = reqwest::Client::new();
    let profile = linux_profile();

    let _listing = server
        .mock("GET", "/hotfix-7")
        .with_status(200)
        .with_body(listing(&["hotfix-7.200/", "hotfix-7.100/"]))
        .create_async()
        .await;

    // Revision 200 was never published; 100 was.
    let _artifact = server
        .mock("GET", "/hotfix-7/hotfix-7.100/Lin/nimbus_100_Debug_amd64.deb")
        .with_status(200)
        .create_async()
        .await;

    let locator = BuildLocator::new(&client, &profile, "Debug");
    let version_directory = format!("{}/hotfix-7", server.url());
    let build = locator.latest(&version_directory, false).await.unwrap().unwrap();

    assert_eq!(build.label, "hotfix-7.100/");
    assert_eq!(build.revision, Some(100));
}

#[tokio::test]
async fn no_verified_candidate_yields_none() {
    let mut server = mockito::Server::new_async().await;
    let client = reqwest::Client::new();
    let profile = linux_profile();

    let _listing = server
        .mock("GET", "/master")
        .with_status(200)
        .with_body(listing(&["1.0.0.1/", "garbage/"]))
        .create_async()
        .await;

    let locator = BuildLocator::new(&client, &profile, "Release");
    let version_directory = format!("{}/master", server.url());
    let build = locator.latest(&version_directory, true).await.unwrap();

    assert!(build.is_none());
}

#[tokio::test]
async fn failed_listing_fetch_is_a_transport_error() {
    let mut server = mockito::Server::new_async().await;
    let client = reqwest::Client::new();
    let profile = linux_profile();

    let _listing = server
        .mock("GET", "/master")
        .with_status(500)
        .create_async()
        .await;

    let locator = BuildLocator::new(&client, &profile, "Release");
    let version_directory = format!("{}/master", server.url());
    let err = locator.latest(&version_directory, true).await.unwrap_err();

    assert!(matches!(err, UpdateError::Transport { .. }));
}
