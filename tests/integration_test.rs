//! End-to-end tests for the browsing flow: app, dispatcher, list pages and
//! detail panels driven by a scripted fetcher.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::{json, Value};

use genie_console::api::Fetcher;
use genie_console::app::App;
use genie_console::controller::{ListPhase, SlotState};
use genie_console::error::FetchError;
use genie_console::model::{ResourceKind, Route, REL_LAST, REL_NEXT};
use genie_console::view::{detail_lines, pagination_bar, truncate_str};

const BASE: &str = "http://genie";

/// Answers GETs from a fixed table keyed by `url?k=v&...`.
#[derive(Default)]
struct ScriptedFetcher {
    responses: HashMap<String, (Duration, Result<Value, FetchError>)>,
}

impl ScriptedFetcher {
    fn respond(mut self, key: &str, body: Value) -> Self {
        self.responses.insert(key.to_string(), (Duration::ZERO, Ok(body)));
        self
    }

    fn respond_after(mut self, key: &str, delay: Duration, body: Value) -> Self {
        self.responses.insert(key.to_string(), (delay, Ok(body)));
        self
    }

    fn fail(mut self, key: &str, err: FetchError) -> Self {
        self.responses.insert(key.to_string(), (Duration::ZERO, Err(err)));
        self
    }
}

fn request_key(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let qs = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", url, qs)
}

impl Fetcher for ScriptedFetcher {
    fn get(&self, url: &str, params: Vec<(String, String)>) -> BoxFuture<'static, Result<Value, FetchError>> {
        let key = request_key(url, &params);
        let scripted = self.responses.get(&key).cloned();
        Box::pin(async move {
            match scripted {
                Some((delay, result)) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    result
                }
                None => Err(FetchError::Status { status: 404, url: key }),
            }
        })
    }
}

fn command(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("cmd-{}", id),
        "user": "genie",
        "version": "1.0",
        "status": "ACTIVE",
        "updated": "2024-01-01T00:00:00Z",
        "_links": {
            "self": { "href": format!("{}/api/v3/commands/{}", BASE, id) },
            "clusters": { "href": format!("{}/api/v3/commands/{}/clusters", BASE, id) },
            "applications": { "href": format!("{}/api/v3/commands/{}/applications", BASE, id) }
        }
    })
}

fn commands_page(ids: &[String], number: u64, size: u64, total: u64, links: Value) -> Value {
    json!({
        "_embedded": { "commandList": ids.iter().map(|id| command(id)).collect::<Vec<_>>() },
        "_links": links,
        "page": { "number": number, "size": size, "totalElements": total, "totalPages": total.div_ceil(size) }
    })
}

fn ids(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("c{}", i)).collect()
}

fn new_app(fetcher: ScriptedFetcher, route: &str) -> App {
    let route: Route = route.parse().unwrap();
    App::new(
        Arc::new(fetcher),
        tokio::runtime::Handle::current(),
        BASE,
        25,
        route,
    )
}

/// Polls until every dispatched fetch has reported back.
async fn settle(app: &mut App) {
    for _ in 0..200 {
        app.poll_fetches();
        if !app.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("fetches did not settle");
}

fn sixty_commands() -> ScriptedFetcher {
    ScriptedFetcher::default()
        .respond(
            "/api/v3/commands?size=25",
            commands_page(
                &ids(0..25),
                0,
                25,
                60,
                json!({
                    "self": { "href": format!("{}/api/v3/commands?page=0&size=25", BASE) },
                    "next": { "href": format!("{}/api/v3/commands?page=1&size=25", BASE) },
                    "last": { "href": format!("{}/api/v3/commands?page=2&size=25", BASE) }
                }),
            ),
        )
        .respond(
            "/api/v3/commands?page=2&size=25",
            commands_page(
                &ids(50..60),
                2,
                25,
                60,
                json!({
                    "first": { "href": format!("{}/api/v3/commands?page=0&size=25", BASE) },
                    "prev": { "href": format!("{}/api/v3/commands?page=1&size=25", BASE) },
                    "self": { "href": format!("{}/api/v3/commands?page=2&size=25", BASE) }
                }),
            ),
        )
}

#[tokio::test(flavor = "multi_thread")]
async fn first_page_summary_and_controls() {
    let mut app = new_app(sixty_commands(), "commands");
    settle(&mut app).await;

    let page = app.browser.current();
    assert_eq!(page.phase(), &ListPhase::Loaded);
    assert_eq!(page.items().len(), 25);

    let bar = pagination_bar(page.page().unwrap(), page.links(), ResourceKind::Commands);
    assert_eq!(bar.summary(), "Showing 1 to 25 of 60 entries");
    let rels: Vec<_> = bar.controls.iter().map(|c| c.rel).collect();
    assert_eq!(rels, vec![REL_NEXT, REL_LAST]);
    assert_eq!(bar.controls[1].route.to_string(), "commands?page=2&size=25");
}

#[tokio::test(flavor = "multi_thread")]
async fn following_last_link_loads_short_final_page() {
    let mut app = new_app(sixty_commands(), "commands");
    settle(&mut app).await;

    let reqs = app.browser.follow(REL_LAST);
    assert_eq!(reqs.len(), 1);
    app.dispatch(reqs);
    settle(&mut app).await;

    assert_eq!(app.browser.route().to_string(), "commands?page=2&size=25");
    let page = app.browser.current();
    assert_eq!(page.items().len(), 10);
    let bar = pagination_bar(page.page().unwrap(), page.links(), ResourceKind::Commands);
    assert_eq!(bar.summary(), "Showing 51 to 60 of 60 entries");
    assert!(bar.controls.iter().all(|c| c.rel != REL_NEXT));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_response_for_old_query_is_discarded() {
    let fetcher = ScriptedFetcher::default()
        .respond_after(
            "/api/v3/commands?name=old&size=25",
            Duration::from_millis(150),
            commands_page(&ids(0..3), 0, 25, 3, json!({})),
        )
        .respond(
            "/api/v3/commands?name=new&size=25",
            commands_page(&ids(10..11), 0, 25, 1, json!({})),
        );
    let mut app = new_app(fetcher, "commands?name=old");
    app.navigate("commands?name=new".parse().unwrap());
    settle(&mut app).await;

    let page = app.browser.current();
    assert_eq!(page.phase(), &ListPhase::Loaded);
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].id(), Some("c10"));
    assert_eq!(page.query().and_then(|q| q.get("name")), Some("new"));
}

#[tokio::test(flavor = "multi_thread")]
async fn no_matches_is_distinct_from_not_yet_loaded() {
    let fetcher = ScriptedFetcher::default().respond(
        "/api/v3/clusters?name=nothing&size=25",
        json!({
            "_links": { "self": { "href": format!("{}/api/v3/clusters?name=nothing", BASE) } },
            "page": { "number": 0, "size": 25, "totalElements": 0, "totalPages": 0 }
        }),
    );
    let mut app = new_app(fetcher, "clusters?name=nothing");
    assert_eq!(app.browser.page(ResourceKind::Jobs).phase(), &ListPhase::Idle);
    assert_eq!(app.browser.current().phase(), &ListPhase::Loading);

    settle(&mut app).await;
    let page = app.browser.current();
    assert_eq!(page.phase(), &ListPhase::Empty);
    assert!(page.items().is_empty());
    assert_eq!(app.browser.page(ResourceKind::Jobs).phase(), &ListPhase::Idle);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_fetch_keeps_previous_rows() {
    let fetcher = sixty_commands().fail(
        "/api/v3/commands?page=1&size=25",
        FetchError::Status { status: 503, url: "/api/v3/commands".into() },
    );
    let mut app = new_app(fetcher, "commands");
    settle(&mut app).await;

    let reqs = app.browser.follow(REL_NEXT);
    app.dispatch(reqs);
    settle(&mut app).await;

    let page = app.browser.current();
    assert!(matches!(page.phase(), ListPhase::Failed(FetchError::Status { status: 503, .. })));
    assert_eq!(page.items().len(), 25);
}

#[tokio::test(flavor = "multi_thread")]
async fn detail_panel_renders_what_resolved() {
    let fetcher = ScriptedFetcher::default()
        .respond(
            "/api/v3/commands?size=25",
            commands_page(&ids(0..2), 0, 25, 2, json!({})),
        )
        .respond(
            &format!("{}/api/v3/commands/c0", BASE),
            json!({
                "id": "c0",
                "name": "cmd-c0",
                "description": "runs spark",
                "executable": "/usr/bin/spark-submit",
                "configs": ["s3://conf/a.xml", "s3://conf/b.xml"]
            }),
        )
        .fail(
            &format!("{}/api/v3/commands/c0/clusters", BASE),
            FetchError::Status { status: 500, url: "clusters".into() },
        )
        .respond(
            &format!("{}/api/v3/commands/c0/applications", BASE),
            json!([{ "id": "app1", "name": "spark", "version": "2.4", "type": "spark" }]),
        );
    let mut app = new_app(fetcher, "commands");
    settle(&mut app).await;

    let reqs = app.browser.toggle_selected_row();
    assert_eq!(reqs.len(), 3);
    app.dispatch(reqs);
    settle(&mut app).await;

    let page = app.browser.current();
    assert_eq!(page.table.expanded(), Some(0));
    let panel = page.table.detail().unwrap();
    assert!(!panel.is_loading());
    assert_eq!(panel.resource().and_then(|r| r.id()), Some("c0"));
    assert!(matches!(panel.slot_state("clusters"), Some(SlotState::Failed(_))));
    assert_eq!(panel.related("applications").len(), 1);

    let lines = detail_lines(panel);
    assert_eq!(lines[0], "[x] close (Esc)");
    assert!(lines.iter().any(|l| l.contains("runs spark")));
    assert!(lines.iter().any(|l| l.contains("s3://conf/b.xml")));
    assert!(lines.iter().any(|l| l.starts_with("Clusters:") && l.contains("failed to load")));
    assert!(lines.iter().any(|l| l.contains("app1")));

    assert!(app.browser.close_detail());
    assert_eq!(app.browser.current().table.expanded(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn late_detail_response_after_collapse_is_ignored() {
    let fetcher = ScriptedFetcher::default()
        .respond(
            "/api/v3/commands?size=25",
            commands_page(&ids(0..1), 0, 25, 1, json!({})),
        )
        .respond_after(
            &format!("{}/api/v3/commands/c0", BASE),
            Duration::from_millis(100),
            json!({ "id": "c0", "name": "cmd-c0" }),
        );
    let mut app = new_app(fetcher, "commands");
    settle(&mut app).await;

    let reqs = app.browser.toggle_selected_row();
    app.dispatch(reqs);
    app.browser.close_detail();
    settle(&mut app).await;

    assert!(app.browser.current().table.detail().is_none());
}

#[test]
fn truncation_helper_is_exported() {
    assert_eq!(truncate_str("hello world", 8), "hello...");
}
