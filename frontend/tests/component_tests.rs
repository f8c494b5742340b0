use frontend::api::api_url;
use frontend::components::chart_renderer::{bar_chart, donut_chart, escape_html, network_chart, ChartSize};
use frontend::config::Config;
use shared::endpoints;
use shared::insights::engagement::game_network;
use shared::CrossGameGamer;

#[test]
fn test_api_url_targets_configured_base() {
    let url = api_url(endpoints::CACHE_STATUS);
    assert!(url.starts_with(&Config::api_base_url()));
    assert!(url.ends_with("/api/cache/status"));
    assert!(!url.contains("//api"));
}

#[test]
fn test_default_poll_interval_and_retries() {
    assert_eq!(Config::refresh_interval_ms(), 30_000);
    assert_eq!(Config::retry_policy().max_attempts, 3);
}

#[test]
fn test_bar_chart_escapes_game_names() {
    let svg = bar_chart(&[("<Star> & Atlas".to_string(), 10.0)], ChartSize::default());
    assert!(svg.contains(&escape_html("<Star> & Atlas")));
    assert!(!svg.contains("<Star>"));
}

#[test]
fn test_donut_without_data_shows_placeholder() {
    let svg = donut_chart(&[], ChartSize::default());
    assert!(svg.contains("chart-empty"));
}

#[test]
fn test_network_chart_draws_one_node_per_game() {
    let gamers = vec![
        CrossGameGamer {
            gamer: "w1".into(),
            games: vec!["Aurory".into(), "Star Atlas".into()],
            games_played: 2.0,
            portfolio_link: None,
        },
        CrossGameGamer {
            gamer: "w2".into(),
            games: vec!["Aurory".into(), "Genopets".into()],
            games_played: 2.0,
            portfolio_link: None,
        },
    ];
    let svg = network_chart(&game_network(&gamers));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert_eq!(svg.matches("<line").count(), 2);
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_bar_chart_markup_parses_as_svg() {
        let document = gloo_utils::document();
        let host = document.create_element("div").unwrap();
        let points = vec![("Aurory".to_string(), 5.0), ("Genopets".to_string(), 3.0)];
        host.set_inner_html(&bar_chart(&points, ChartSize::default()));

        let bars = host.query_selector_all("rect.bar").unwrap();
        assert_eq!(bars.length(), 2);
        assert!(host.query_selector("svg").unwrap().is_some());
    }
}
