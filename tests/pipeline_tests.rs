//! End-to-end pipeline tests
//!
//! These tests run the full harvest pipeline against wiremock servers:
//! pre-flight gates, discovery crawl, report generation, and resumable
//! downloads against a real on-disk ledger.

use hansard_harvester::config::{
    Config, CrawlerConfig, OutputConfig, PreflightConfig, SiteConfig, UserAgentConfig,
};
use hansard_harvester::ledger::Ledger;
use hansard_harvester::pipeline::Pipeline;
use hansard_harvester::HarvestError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a run configuration pointing at a mock server and a scratch dir
fn test_config(server_uri: &str, dir: &TempDir) -> Config {
    Config {
        site: SiteConfig {
            root_url: server_uri.to_string(),
            entry_path: "/index.php".to_string(),
            archive_path: "/hansard".to_string(),
        },
        crawler: CrawlerConfig {
            max_pages: 50,
            page_delay_ms: 0,
            file_delay_ms: 0,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestHarvester".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        preflight: PreflightConfig {
            probe_url: server_uri.to_string(),
            max_latency_ms: 5000,
        },
        output: OutputConfig {
            archive_dir: dir.path().join("archives").display().to_string(),
            ledger_path: dir.path().join("ledger.json").display().to_string(),
            report_path: dir.path().join("report.csv").display().to_string(),
        },
    }
}

/// Mounts the probe endpoint and a permissive robots.txt
async fn mount_preflight(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .mount(server)
        .await;
}

/// Mounts an entry page linking to the given archive years
async fn mount_entry_page(server: &MockServer, years: &[i32]) {
    let links: String = years
        .iter()
        .map(|y| format!(r#"<a href="/hansard/{y}.html">Hansard {y}</a>"#))
        .collect();
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("<html><body>{links}</body></html>")),
        )
        .mount(server)
        .await;
}

/// Mounts an archive-year page whose table rows point at the given files
async fn mount_year_page(server: &MockServer, year: i32, files: &[(&str, &str, &str, &str)]) {
    let rows: String = files
        .iter()
        .map(|(date, meeting, day, file)| {
            format!(
                r#"<tr><td>{date}</td><td>{meeting}</td><td>{day}</td>
                   <td><a href="/files/{file}">Download</a></td><td>-</td></tr>"#
            )
        })
        .collect();
    let body = format!(
        r#"<html><body><table>
           <tr><th>Date</th><th>Meeting</th><th>Day</th><th>File</th><th>Notes</th></tr>
           {rows}
           </table></body></html>"#
    );
    Mock::given(method("GET"))
        .and(path(format!("/hansard/{year}.html")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, file: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_bytes().to_vec()))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_end_to_end() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    mount_entry_page(&server, &[2021]).await;
    mount_year_page(
        &server,
        2021,
        &[
            ("05/03/2021", "12", "3", "s1.pdf"),
            ("07/03/2021", "12", "5", "s2.pdf"),
        ],
    )
    .await;
    mount_file(&server, "s1.pdf", "first transcript", 1).await;
    mount_file(&server, "s2.pdf", "second transcript", 1).await;

    let config = test_config(&server.uri(), &dir);
    Pipeline::new(config).unwrap().run().await.unwrap();

    // Files land in one subdirectory per year, named from the table row
    let year_dir = dir.path().join("archives").join("2021");
    assert_eq!(
        std::fs::read_to_string(year_dir.join("20210305_Meeting12_Day3.pdf")).unwrap(),
        "first transcript"
    );
    assert_eq!(
        std::fs::read_to_string(year_dir.join("20210307_Meeting12_Day5.pdf")).unwrap(),
        "second transcript"
    );

    // Ledger recorded both completions
    let ledger = Ledger::load(&dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger.len(), 2);

    // Report was written with a header plus one row per discovered link
    let report = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
    assert!(report.starts_with("Source_Page,Link_URL,Link_Text,Link_Type,Year"));
    assert!(report.contains("Hansard_Archive,2021"));
}

#[tokio::test]
async fn test_second_run_downloads_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    mount_entry_page(&server, &[2021]).await;
    mount_year_page(&server, 2021, &[("05/03/2021", "12", "3", "s1.pdf")]).await;
    // The file must be fetched exactly once across both runs
    mount_file(&server, "s1.pdf", "transcript", 1).await;

    let config = test_config(&server.uri(), &dir);
    Pipeline::new(config.clone()).unwrap().run().await.unwrap();
    Pipeline::new(config).unwrap().run().await.unwrap();

    let ledger = Ledger::load(&dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger.len(), 1);

    // The report is regenerated on every run
    assert!(dir.path().join("report.csv").exists());
}

#[tokio::test]
async fn test_deleted_file_is_redownloaded() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    mount_entry_page(&server, &[2021]).await;
    mount_year_page(&server, 2021, &[("05/03/2021", "12", "3", "s1.pdf")]).await;
    // Once for the first run, once after the file vanishes
    mount_file(&server, "s1.pdf", "transcript", 2).await;

    let config = test_config(&server.uri(), &dir);
    Pipeline::new(config.clone()).unwrap().run().await.unwrap();

    let file_path = dir
        .path()
        .join("archives")
        .join("2021")
        .join("20210305_Meeting12_Day3.pdf");
    std::fs::remove_file(&file_path).unwrap();

    // Ledger still says completed, but the missing file is not trusted
    Pipeline::new(config).unwrap().run().await.unwrap();
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "transcript");
}

#[tokio::test]
async fn test_download_failure_aborts_year_but_not_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    mount_entry_page(&server, &[2021, 2022]).await;
    mount_year_page(
        &server,
        2021,
        &[
            ("05/03/2021", "12", "3", "ok.pdf"),
            ("06/03/2021", "12", "4", "broken.pdf"),
            ("07/03/2021", "12", "5", "never.pdf"),
        ],
    )
    .await;
    mount_year_page(&server, 2022, &[("01/02/2022", "1", "1", "next-year.pdf")]).await;

    mount_file(&server, "ok.pdf", "fine", 1).await;
    Mock::given(method("GET"))
        .and(path("/files/broken.pdf"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // Fail-fast: the descriptor after the failure is never attempted
    Mock::given(method("GET"))
        .and(path("/files/never.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_file(&server, "next-year.pdf", "resumed", 1).await;

    let config = test_config(&server.uri(), &dir);
    // The run itself completes: the failure is scoped to the 2021 batch
    Pipeline::new(config).unwrap().run().await.unwrap();

    let ledger = Ledger::load(&dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger.len(), 2); // ok.pdf and next-year.pdf
    assert!(dir
        .path()
        .join("archives")
        .join("2022")
        .join("20220201_Meeting1_Day1.pdf")
        .exists());
}

#[tokio::test]
async fn test_year_without_table_is_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    mount_entry_page(&server, &[2020, 2021]).await;
    Mock::given(method("GET"))
        .and(path("/hansard/2020.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>Coming soon</p></body></html>"),
        )
        .mount(&server)
        .await;
    mount_year_page(&server, 2021, &[("05/03/2021", "12", "3", "s1.pdf")]).await;
    mount_file(&server, "s1.pdf", "transcript", 1).await;

    let config = test_config(&server.uri(), &dir);
    Pipeline::new(config).unwrap().run().await.unwrap();

    let ledger = Ledger::load(&dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger.len(), 1);
}

#[tokio::test]
async fn test_no_archive_links_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_preflight(&server).await;
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="/about.html">About</a></body></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir);
    let result = Pipeline::new(config).unwrap().run().await;
    assert!(matches!(result, Err(HarvestError::NoArchiveLinks)));
}

#[tokio::test]
async fn test_robots_disallow_aborts_before_crawling() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /hansard"),
        )
        .mount(&server)
        .await;
    // The crawl must never start
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir);
    let result = Pipeline::new(config).unwrap().run().await;
    assert!(matches!(result, Err(HarvestError::RobotsDenied { .. })));
}

#[tokio::test]
async fn test_corrupt_ledger_is_fatal_at_startup() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    std::fs::write(dir.path().join("ledger.json"), "{ broken").unwrap();

    let config = test_config(&server.uri(), &dir);
    let result = Pipeline::new(config);
    assert!(matches!(result, Err(HarvestError::Ledger(_))));
}
