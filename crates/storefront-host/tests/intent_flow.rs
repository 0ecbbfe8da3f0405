use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use storefront_core::catalog::Catalog;
use storefront_core::test_helpers::tiny_catalog;
use storefront_host::config::HostConfig;
use storefront_host::download_loop::DownloadTicker;
use storefront_host::session::{SessionStats, run_session};
use storefront_host::spawn_report_logger;
use storefront_host::state::{SharedStorefront, build_storefront};

fn sample() -> SharedStorefront {
    build_storefront(&HostConfig::default(), Catalog::sample())
}

/// Feed `input` through a session and return the stats plus every output line
/// decoded as JSON.
async fn run_lines(store: SharedStorefront, input: &str) -> (SessionStats, Vec<Value>) {
    let mut output: Vec<u8> = Vec::new();
    let stats = run_session(store, input.as_bytes(), &mut output)
        .await
        .expect("session should finish cleanly");
    let text = String::from_utf8(output).expect("output is utf-8");
    let values = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("every output line is JSON"))
        .collect();
    (stats, values)
}

#[tokio::test]
async fn one_response_per_line() {
    let input = concat!(
        r#"{"type":"add_to_cart","game_id":1}"#,
        "\n",
        r#"{"type":"add_to_cart","game_id":1}"#,
        "\n",
        r#"{"type":"add_to_cart","game_id":4}"#,
        "\n",
    );
    let (stats, views) = run_lines(sample(), input).await;
    assert_eq!(
        stats,
        SessionStats {
            applied: 3,
            rejected: 0
        }
    );
    assert_eq!(views.len(), 3);

    let last = &views[2];
    assert_eq!(last["cart_total_cents"], 5999);
    assert_eq!(last["cart_count"], 2);
    assert_eq!(last["cart_items"][0]["quantity"], 2);
}

#[tokio::test]
async fn errors_do_not_stop_the_session() {
    let input = concat!(
        "garbage\n",
        r#"{"type":"start_download","game_id":100}"#,
        "\n",
        r#"{"type":"login","email":"","password":"x"}"#,
        "\n",
        r#"{"type":"add_to_wishlist","game_id":7}"#,
        "\n",
    );
    let (stats, out) = run_lines(sample(), input).await;
    assert_eq!(
        stats,
        SessionStats {
            applied: 1,
            rejected: 3
        }
    );
    assert!(out[0]["error"].is_string());
    assert_eq!(out[1]["error"], "unknown game id: 100");
    assert_eq!(out[2]["error"], "email and password must not be empty");
    assert_eq!(out[3]["wishlist_items"][0]["name"], "The Witcher 3");
}

#[tokio::test]
async fn browse_search_and_sort() {
    let input = concat!(
        r#"{"type":"set_query","text":"witcher"}"#,
        "\n",
        r#"{"type":"set_query","text":""}"#,
        "\n",
        r#"{"type":"toggle_genre","genre":"RPG"}"#,
        "\n",
        r#"{"type":"set_sort_order","order":"price_ascending"}"#,
        "\n",
        r#"{"type":"toggle_genre","genre":"RPG"}"#,
        "\n",
    );
    let (_, views) = run_lines(sample(), input).await;

    let names = |v: &Value| -> Vec<String> {
        v["visible_games"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["name"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(names(&views[0]), vec!["The Witcher 3"]);
    assert_eq!(names(&views[1]).len(), 9);
    assert_eq!(
        names(&views[3]),
        vec!["The Witcher 3", "Cyberpunk 2077", "Hogwarts Legacy"]
    );
    assert_eq!(views[4]["filters"]["genres"].as_array().map(Vec::len), Some(0));
    assert_eq!(names(&views[4])[..3], ["Fortnite", "Rocket League", "Fall Guys"]);

    let free = |v: &Value| -> Vec<String> {
        v["free_games"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["name"].as_str().unwrap().to_string())
            .collect()
    };
    for view in &views {
        assert_eq!(free(view), vec!["Fortnite", "Rocket League", "Fall Guys"]);
    }
}

#[tokio::test]
async fn gifts_are_validated_and_announced() {
    let input = concat!(
        r#"{"type":"send_gift","game_id":7,"recipient":" "}"#,
        "\n",
        r#"{"type":"send_gift","game_id":7,"recipient":"pal@example.com"}"#,
        "\n",
    );
    let (stats, out) = run_lines(sample(), input).await;
    assert_eq!(
        stats,
        SessionStats {
            applied: 1,
            rejected: 1
        }
    );
    assert_eq!(out[0]["error"], "gift recipient must not be empty");
    assert_eq!(out[1]["notification_count"], 1);
    assert_eq!(out[1]["cart_count"], 0);
}

#[tokio::test]
async fn session_and_notifications() {
    let input = concat!(
        r#"{"type":"login","email":"me@example.com","password":"pw"}"#,
        "\n",
        r#"{"type":"push_notification","title":"Sale","body":"50% off"}"#,
        "\n",
        r#"{"type":"clear_notifications"}"#,
        "\n",
        r#"{"type":"logout"}"#,
        "\n",
    );
    let (_, views) = run_lines(sample(), input).await;
    assert_eq!(views[0]["session"]["status"], "authenticated");
    assert_eq!(views[0]["session"]["name"], "John Doe");
    assert_eq!(views[1]["notification_count"], 1);
    assert_eq!(views[2]["notification_count"], 0);
    assert_eq!(views[3]["session"]["status"], "anonymous");
}

#[tokio::test]
async fn quantity_to_zero_removes_line() {
    let store = build_storefront(&HostConfig::default(), tiny_catalog());
    let input = concat!(
        r#"{"type":"add_to_cart","game_id":3}"#,
        "\n",
        r#"{"type":"set_quantity","game_id":3,"quantity":4}"#,
        "\n",
        r#"{"type":"set_quantity","game_id":3,"quantity":0}"#,
        "\n",
    );
    let (_, views) = run_lines(store, input).await;
    assert_eq!(views[1]["cart_total"], "$279.96");
    assert_eq!(views[2]["cart_count"], 0);
    assert_eq!(views[2]["cart_total"], "$0.00");
}

#[tokio::test(start_paused = true)]
async fn downloads_progress_between_intents() {
    let store = sample();
    let (ticker, reports) =
        DownloadTicker::start(Arc::clone(&store), Duration::from_millis(10));
    let logger = spawn_report_logger(reports);

    let (_, views) = run_lines(
        Arc::clone(&store),
        concat!(r#"{"type":"start_download","game_id":9}"#, "\n"),
    )
    .await;
    assert_eq!(views[0]["download_progress"]["9"], 0);

    tokio::time::sleep(Duration::from_millis(505)).await;
    let (_, views) = run_lines(Arc::clone(&store), "\n").await;
    assert_eq!(views[0]["download_progress"]["9"], 50);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let (_, views) = run_lines(Arc::clone(&store), "\n").await;
    assert_eq!(views[0]["download_progress"]["9"], 100);
    assert_eq!(views[0]["notification_count"], 1);

    ticker.stop().await;
    assert_eq!(logger.await.unwrap(), 1);
}
