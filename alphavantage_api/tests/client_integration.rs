use alphavantage_api::types::SortOrder;
use alphavantage_api::{Client, Error};
use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn mount_body(server: &MockServer, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "DUMMY_SYMBOL"))
        .and(query_param("apikey", "DUMMY_API_KEY"))
        .and(query_param("outputsize", "full"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn daily_series_success_newest_first() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, 200, load_fixture("daily.json")).await;

    let client = Client::with_base_url(&mock_server.uri(), "DUMMY_API_KEY").unwrap();
    let stock = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Ascending)
        .await
        .unwrap();

    assert_eq!(stock.daily_data.len(), 3);
    assert_eq!(stock.daily_data[0].date, date(2019, 9, 20));
    assert_eq!(stock.daily_data[0].close, 90.35);
    assert_eq!(stock.daily_data[1].date, date(2019, 9, 16));
    assert_eq!(stock.daily_data[2].date, date(2019, 9, 13));
    assert_eq!(stock.daily_data[2].close, 94.4);
}

#[tokio::test]
async fn daily_series_descending_is_oldest_first() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, 200, load_fixture("daily.json")).await;

    let client = Client::with_base_url(&mock_server.uri(), "DUMMY_API_KEY").unwrap();
    let stock = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Descending)
        .await
        .unwrap();

    let dates: Vec<_> = stock.daily_data.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2019, 9, 13), date(2019, 9, 16), date(2019, 9, 20)]);
}

#[tokio::test]
async fn daily_series_error_envelope() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, 200, load_fixture("error.json")).await;

    let client = Client::with_base_url(&mock_server.uri(), "DUMMY_API_KEY").unwrap();
    let result = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Ascending)
        .await;
    assert!(matches!(result, Err(Error::Upstream(ref msg)) if msg.starts_with("Invalid API call.")));
}

#[tokio::test]
async fn daily_series_invalid_json() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, 200, "INVALID_JSON".to_string()).await;

    let client = Client::with_base_url(&mock_server.uri(), "DUMMY_API_KEY").unwrap();
    let result = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Ascending)
        .await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn daily_series_server_error() {
    let mock_server = MockServer::start().await;
    mount_body(&mock_server, 500, "Internal Server Error".to_string()).await;

    let client = Client::with_base_url(&mock_server.uri(), "DUMMY_API_KEY").unwrap();
    let result = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Ascending)
        .await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn daily_series_connection_refused() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client =
        Client::with_base_url(&format!("http://127.0.0.1:{}", port), "DUMMY_API_KEY").unwrap();
    let result = client
        .daily_series("DUMMY_SYMBOL", SortOrder::Ascending)
        .await;
    assert!(matches!(result, Err(Error::RequestFailed(_))));
}
