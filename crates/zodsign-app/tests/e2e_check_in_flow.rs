// End-to-end check-in flow against a mock forum
//
// Each test stands up a mockito server playing the forum: the check-in page
// at /sign (session check and formhash) and the AJAX endpoint at /checkin.

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::function;
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use zodsign_app::application::services::{
    AccountReport, CheckInExecutor, CheckInProgress, NotificationService,
};
use zodsign_domain::account::Account;
use zodsign_domain::check_in::{CheckInOutcome, MoodCatalog, SessionStatus, ALREADY_CHECKED_IN};
use zodsign_domain::notification::{NotificationMessage, NotificationSender};
use zodsign_domain::DomainError;
use zodsign_infrastructure::config::SiteConfig;

mock! {
    pub Sender {}

    #[async_trait]
    impl NotificationSender for Sender {
        async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError>;
        async fn test(&self) -> Result<(), DomainError>;
    }
}

const SIGNED_IN_PAGE: &str = r#"<html><head><title>每日签到 -  ZodGame论坛 - Powered by Discuz!</title></head>
<body><form id="qiandao"><input type="hidden" name="formhash" value="f00dbabe" /></form></body></html>"#;

const LOGIN_PAGE: &str =
    "<html><head><title>登录 -  ZodGame论坛 - Powered by Discuz!</title></head></html>";

const SUCCESS_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root><![CDATA[<div class="f_c"><h3 class="flb"><em id="return_win">签到提示</em></h3>
<div class="c">
恭喜你签到成功!获得随机奖励 酱油 4 瓶. </div>
</div>
]]></root>"#;

const DUPLICATE_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root><![CDATA[<div class="f_c"><div class="c">
您今日已经签到，请明天再来！ </div></div>]]></root>"#;

fn site(server: &ServerGuard) -> SiteConfig {
    SiteConfig {
        sign_page_url: format!("{}/sign", server.url()),
        check_in_url: format!("{}/checkin", server.url()),
        moods: MoodCatalog::new(vec!["kx".to_string()]),
        ..SiteConfig::default()
    }
}

fn account(name: &str, cookie: &str) -> Account {
    Account::new(name, cookie).unwrap()
}

async fn mock_sign_page(server: &mut ServerGuard, cookie: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/sign")
        .match_header("cookie", cookie)
        .with_status(200)
        .with_body(body)
        .expect_at_least(1)
        .create_async()
        .await
}

// ============================================================
// Batch behaviour
// ============================================================

#[tokio::test]
async fn test_disabled_account_is_skipped_and_not_notified() {
    let mut server = Server::new_async().await;
    let sign = mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    let check_in = server
        .mock("POST", "/checkin")
        .match_header("cookie", "sid=main")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("formhash".into(), "f00dbabe".into()),
            Matcher::UrlEncoded("qdxq".into(), "kx".into()),
        ]))
        .with_status(200)
        .with_body(SUCCESS_REPLY)
        .expect(1)
        .create_async()
        .await;
    let disabled = server
        .mock("GET", "/sign")
        .match_header("cookie", "sid=alt")
        .expect(0)
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let accounts = vec![
        account("main", "sid=main"),
        account("alt", "sid=alt").with_enabled(false),
    ];

    let batch = executor.execute_batch_check_in(&accounts).await;

    sign.assert_async().await;
    check_in.assert_async().await;
    disabled.assert_async().await;

    assert_eq!(batch.total, 2);
    assert_eq!(batch.success_count, 1);
    assert_eq!(batch.failed_count, 0);
    assert_eq!(batch.skipped_count, 1);
    assert_eq!(batch.skipped_accounts, vec!["alt".to_string()]);

    let lines = batch.lines();
    assert_eq!(
        lines,
        vec!["main: ✅ check-in succeeded, random reward 酱油 4 瓶".to_string()]
    );

    let mut sender = MockSender::new();
    sender
        .expect_send()
        .with(function(|m: &NotificationMessage| {
            m.title == "ZodGame check-in results"
                && m.content == "main: ✅ check-in succeeded, random reward 酱油 4 瓶\n"
        }))
        .times(1)
        .returning(|_| Ok(()));

    NotificationService::new(Arc::new(sender))
        .notify_results("ZodGame check-in results", &lines)
        .await;
    println!("✓ Only the enabled account was checked in and reported");
}

#[tokio::test]
async fn test_failure_of_one_account_does_not_stop_the_next() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=expired", LOGIN_PAGE).await;
    mock_sign_page(&mut server, "sid=good", SIGNED_IN_PAGE).await;
    server
        .mock("POST", "/checkin")
        .match_header("cookie", "sid=good")
        .with_status(200)
        .with_body(DUPLICATE_REPLY)
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let accounts = vec![account("old", "sid=expired"), account("new", "sid=good")];

    let batch = executor.execute_batch_check_in(&accounts).await;

    assert_eq!(batch.success_count, 1);
    assert_eq!(batch.failed_count, 1);
    assert_eq!(
        batch.lines(),
        vec![
            "old: ❌ cookie invalid (login page served)".to_string(),
            format!("new: ✅ {}", ALREADY_CHECKED_IN),
        ]
    );
}

#[tokio::test]
async fn test_progress_follows_configured_order() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", LOGIN_PAGE).await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let accounts = vec![
        account("first", "sid=first").with_enabled(false),
        account("main", "sid=main"),
        account("last", "sid=last").with_enabled(false),
    ];

    let mut events = Vec::new();
    let batch = executor
        .execute_batch_check_in_with_progress(&accounts, |progress| {
            events.push(match progress {
                CheckInProgress::Skipped { account_name } => format!("skip {}", account_name),
                CheckInProgress::Started { account_name } => format!("start {}", account_name),
                CheckInProgress::Finished { result } => format!("done {}", result.account_name),
            })
        })
        .await;

    assert_eq!(
        events,
        vec!["skip first", "start main", "done main", "skip last"]
    );
    assert_eq!(batch.skipped_count, 2);
    assert_eq!(batch.results.len(), 1);
}

#[tokio::test]
async fn test_hung_server_times_out_and_batch_continues() {
    // Accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let site = SiteConfig {
        sign_page_url: format!("http://{}/sign", address),
        check_in_url: format!("http://{}/checkin", address),
        request_timeout_secs: 1,
        ..SiteConfig::default()
    };
    let executor = CheckInExecutor::new(&site).unwrap();
    let accounts = vec![account("a", "sid=a"), account("b", "sid=b")];

    let started = Instant::now();
    let batch = executor.execute_batch_check_in(&accounts).await;
    let elapsed = started.elapsed();

    assert_eq!(batch.failed_count, 2);
    assert_eq!(batch.results.len(), 2);
    for result in &batch.results {
        match &result.report {
            AccountReport::InvalidSession(SessionStatus::Unreachable(message)) => {
                assert!(message.contains("timed out"), "unexpected: {}", message)
            }
            other => panic!("expected unreachable session, got {:?}", other),
        }
    }
    assert!(elapsed < Duration::from_secs(10), "took {:?}", elapsed);
    println!("✓ Both accounts timed out after {:?}", elapsed);
}

// ============================================================
// Single-account outcomes
// ============================================================

#[tokio::test]
async fn test_duplicate_check_in() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    server
        .mock("POST", "/checkin")
        .with_status(200)
        .with_body(DUPLICATE_REPLY)
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    assert!(result.success());
    assert_eq!(
        result.report,
        AccountReport::Outcome(CheckInOutcome::Duplicate {
            message: ALREADY_CHECKED_IN.to_string()
        })
    );
}

#[tokio::test]
async fn test_invalid_cookie_skips_submission() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=expired", LOGIN_PAGE).await;
    let check_in = server
        .mock("POST", "/checkin")
        .expect(0)
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor
        .execute_check_in(&account("main", "sid=expired"))
        .await;

    check_in.assert_async().await;
    assert_eq!(
        result.report,
        AccountReport::InvalidSession(SessionStatus::Unauthenticated)
    );
}

#[tokio::test]
async fn test_page_without_markers_is_treated_as_invalid() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", "<html>站点维护中</html>").await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    assert_eq!(
        result.report,
        AccountReport::InvalidSession(SessionStatus::Indeterminate)
    );
    assert!(!result.success());
}

#[tokio::test]
async fn test_missing_formhash_is_reported() {
    let mut server = Server::new_async().await;
    mock_sign_page(
        &mut server,
        "sid=main",
        "<title>每日签到 -  ZodGame论坛</title><body>表单已移除</body>",
    )
    .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    assert_eq!(result.report, AccountReport::Error(DomainError::TokenNotFound));
    assert_eq!(
        result.render(),
        "main: ❌ check-in error: formhash not found on check-in page"
    );
}

#[tokio::test]
async fn test_empty_mood_catalog_is_configuration_error() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    let check_in = server
        .mock("POST", "/checkin")
        .expect(0)
        .create_async()
        .await;

    let site = SiteConfig {
        moods: MoodCatalog::new(Vec::new()),
        ..site(&server)
    };
    let executor = CheckInExecutor::new(&site).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    check_in.assert_async().await;
    assert!(matches!(
        result.report,
        AccountReport::Error(DomainError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_server_error_on_submission_is_transport_error() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    server
        .mock("POST", "/checkin")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    assert!(matches!(
        result.report,
        AccountReport::Error(DomainError::Transport(_))
    ));
    assert!(result.render().starts_with("main: ❌ check-in error: Transport error"));
}

#[tokio::test]
async fn test_malformed_reply_is_unknown_outcome() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    server
        .mock("POST", "/checkin")
        .with_status(200)
        .with_body("<root><unclosed></root>")
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    match result.report {
        AccountReport::Outcome(CheckInOutcome::Unknown { message }) => {
            assert!(message.starts_with("XML parse failed"))
        }
        other => panic!("expected unknown outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_reply_uses_tips_text() {
    let mut server = Server::new_async().await;
    mock_sign_page(&mut server, "sid=main", SIGNED_IN_PAGE).await;
    server
        .mock("POST", "/checkin")
        .with_status(200)
        .with_body(
            r#"<?xml version="1.0" encoding="utf-8"?><root><![CDATA[<div class="c">参数错误，请刷新页面后重试</div>]]></root>"#,
        )
        .create_async()
        .await;

    let executor = CheckInExecutor::new(&site(&server)).unwrap();
    let result = executor.execute_check_in(&account("main", "sid=main")).await;

    assert_eq!(
        result.render(),
        "main: ❌ check-in failed: 参数错误，请刷新页面后重试"
    );
}
