use std::fs;
use std::path::Path;

use readme_sampler::testing::{candidate, root_readme_url, summary, ApiCall, ScriptedApi};
use readme_sampler::{
    ApiResponse, Ledger, LedgerEntry, RunState, Runner, SamplerConfig, SkipReason,
};
use tempfile::TempDir;

fn config(dir: &Path, quota: u32) -> SamplerConfig {
    SamplerConfig {
        quota,
        output_dir: dir.join("readme_files"),
        backoff_base_ms: 0,
        backoff_max_ms: 0,
        ..SamplerConfig::default()
    }
}

fn readme(bytes: usize) -> ApiResponse<Vec<u8>> {
    ApiResponse::ok(vec![b'x'; bytes])
}

fn with_rust_repo(api: ScriptedApi, full_name: &str, remaining: i64) -> ScriptedApi {
    api.with_repository(
        full_name,
        ApiResponse::ok_with_remaining(candidate(full_name, Some("Rust")), remaining),
    )
    .with_raw(&root_readme_url(full_name), readme(3000))
}

fn touched(api: &ScriptedApi, full_name: &str) -> bool {
    let raw_prefix = format!("https://raw.githubusercontent.com/{full_name}/");
    api.calls().iter().any(|call| match call {
        ApiCall::ListContents { full_name: name, .. } => name == full_name,
        ApiCall::FetchRaw { url } => url.starts_with(&raw_prefix),
        _ => false,
    })
}

#[tokio::test]
async fn saves_quota_of_readmes_and_finishes() {
    let temp = TempDir::new().unwrap();
    let api = ScriptedApi::new().with_page(ApiResponse::ok_with_remaining(
        vec![summary("owner2/repo2"), summary("owner1/repo1")],
        100,
    ));
    let api = with_rust_repo(api, "owner1/repo1", 99);
    let api = with_rust_repo(api, "owner2/repo2", 98);

    let mut runner = Runner::new(config(temp.path(), 2), api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Done);
    assert_eq!(runner.context().quota, 0);
    assert_eq!(summary.saved.len(), 2);

    let out = temp.path().join("readme_files");
    assert!(out.join("owner1.repo1.md").exists());
    assert!(out.join("owner2.repo2.md").exists());

    let ledger = Ledger::load(&out.join("index.csv")).unwrap();
    assert_eq!(
        ledger.entries(),
        &[
            LedgerEntry::new("https://github.com/owner1/repo1", "README.md", "owner1.repo1.md"),
            LedgerEntry::new("https://github.com/owner2/repo2", "README.md", "owner2.repo2.md"),
        ]
    );
}

#[tokio::test]
async fn repository_without_language_never_reaches_locator() {
    let temp = TempDir::new().unwrap();
    let api = ScriptedApi::new()
        .with_page(ApiResponse::ok_with_remaining(
            vec![summary("owner1/repo1"), summary("plain/notes")],
            100,
        ))
        .with_repository(
            "plain/notes",
            ApiResponse::ok_with_remaining(candidate("plain/notes", None), 99),
        )
        .with_raw(&root_readme_url("plain/notes"), readme(3000));
    let api = with_rust_repo(api, "owner1/repo1", 98);

    let mut runner = Runner::new(config(temp.path(), 1), api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Done);
    assert_eq!(summary.skipped_for(SkipReason::NotSoftware), 1);
    assert!(!touched(runner.api(), "plain/notes"));
    assert!(!temp.path().join("readme_files/plain.notes.md").exists());
}

#[tokio::test]
async fn ledgered_repository_is_never_fetched_again() {
    let temp = TempDir::new().unwrap();
    let ledger_path = temp.path().join("readme_files/index.csv");
    let mut ledger = Ledger::load(&ledger_path).unwrap();
    ledger
        .append(LedgerEntry::new(
            "https://github.com/owner1/repo1",
            "README.md",
            "owner1.repo1.md",
        ))
        .unwrap();
    drop(ledger);

    let api = ScriptedApi::new().with_page(ApiResponse::ok_with_remaining(
        vec![summary("owner1/repo1")],
        100,
    ));
    let api = with_rust_repo(api, "owner1/repo1", 99);

    let mut runner = Runner::new(config(temp.path(), 1), api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Aborted);
    assert_eq!(summary.skipped_for(SkipReason::AlreadyAcquired), 1);
    assert!(runner.api().raw_fetches().is_empty());
    assert!(!runner.api().calls().contains(&ApiCall::GetRepository {
        full_name: "owner1/repo1".to_string(),
    }));
}

#[tokio::test]
async fn second_run_skips_what_the_first_saved() {
    let temp = TempDir::new().unwrap();

    let first_api = with_rust_repo(
        ScriptedApi::new().with_page(ApiResponse::ok_with_remaining(
            vec![summary("owner1/repo1")],
            100,
        )),
        "owner1/repo1",
        99,
    );
    let mut first = Runner::new(config(temp.path(), 1), first_api).unwrap();
    assert_eq!(first.run().await.unwrap().final_state, RunState::Done);

    let second_api = with_rust_repo(
        ScriptedApi::new().with_page(ApiResponse::ok_with_remaining(
            vec![summary("owner1/repo1")],
            100,
        )),
        "owner1/repo1",
        99,
    );
    let mut second = Runner::new(config(temp.path(), 1), second_api).unwrap();
    let summary = second.run().await.unwrap();

    assert!(summary.saved.is_empty());
    assert!(second.api().raw_fetches().is_empty());
    assert_eq!(second.ledger().len(), 1);
}

#[tokio::test]
async fn budget_follows_reported_values_exactly() {
    let temp = TempDir::new().unwrap();
    let api = ScriptedApi::new()
        .with_page(ApiResponse::ok_with_remaining(vec![summary("a/one")], 10))
        .with_repository(
            "a/one",
            ApiResponse::ok_with_remaining(candidate("a/one", None), 4),
        )
        .with_page(ApiResponse::ok_with_remaining(vec![summary("b/two")], 4999))
        .with_repository(
            "b/two",
            ApiResponse::ok_with_remaining(candidate("b/two", None), 4998),
        );

    let mut runner = Runner::new(config(temp.path(), 1), api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Aborted);
    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.skipped_for(SkipReason::NotSoftware), 2);
    assert_eq!(summary.remaining_budget, 0);
    assert_eq!(runner.api().listing_requests(), 3);
}

#[tokio::test]
async fn detail_reporting_zero_budget_stops_scanning() {
    let temp = TempDir::new().unwrap();
    let api = ScriptedApi::new()
        .with_page(ApiResponse::ok_with_remaining(
            vec![summary("b/two"), summary("a/one")],
            5,
        ))
        .with_repository(
            "a/one",
            ApiResponse::ok_with_remaining(candidate("a/one", None), 0),
        );

    let mut runner = Runner::new(config(temp.path(), 1), api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Aborted);
    assert_eq!(summary.repositories_scanned, 1);
    assert_eq!(runner.api().listing_requests(), 1);
}

#[tokio::test]
async fn readme_in_configured_folder_is_saved_with_its_location() {
    let temp = TempDir::new().unwrap();
    let config = SamplerConfig {
        folders: vec![String::new(), "docs".to_string()],
        ..config(temp.path(), 1)
    };
    let api = ScriptedApi::new()
        .with_page(ApiResponse::ok_with_remaining(vec![summary("o/r")], 20))
        .with_repository(
            "o/r",
            ApiResponse::ok_with_remaining(candidate("o/r", Some("C")), 19),
        )
        .with_contents(
            "o/r",
            None,
            ApiResponse::ok_with_remaining(
                serde_json::from_str(r#"[{"name": "docs", "type": "dir"}]"#).unwrap(),
                18,
            ),
        )
        .with_raw(
            "https://raw.githubusercontent.com/o/r/main/docs/README.MD",
            readme(2500),
        );

    let mut runner = Runner::new(config, api).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.final_state, RunState::Done);
    assert_eq!(summary.remaining_budget, 18);
    assert_eq!(
        summary.saved,
        vec![LedgerEntry::new("https://github.com/o/r", "docs/README.MD", "o.r.MD")]
    );
    assert_eq!(
        fs::read(temp.path().join("readme_files/o.r.MD")).unwrap().len(),
        2500
    );
}
