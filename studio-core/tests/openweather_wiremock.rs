//! OpenWeatherMap provider against a mock HTTP server.

use weather_studio_core::{
    Coordinates, EndpointConfig, FetchError, IpGeolocator, Location, OpenWeatherProvider, Units,
    WeatherProvider, WeatherRequest, GeolocationError, Geolocator,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_response(category: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [
            { "id": 500, "main": category, "description": "light rain", "icon": "10d" }
        ],
        "base": "stations",
        "main": {
            "temp": 11.6,
            "feels_like": 10.9,
            "temp_min": 10.2,
            "temp_max": 12.8,
            "pressure": 1012,
            "humidity": 81
        },
        "visibility": 10000,
        "wind": { "speed": 4.63, "deg": 240 },
        "clouds": { "all": 75 },
        "dt": 1_700_000_000,
        "sys": { "country": "GB" },
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        weather_base_url: server.uri(),
        geolocation_url: format!("{}/json", server.uri()),
        timeout_secs: 5,
    }
}

fn city_request(city: &str) -> WeatherRequest {
    WeatherRequest {
        location: Location::City(city.to_string()),
        api_key: "TEST_KEY".to_string(),
        units: Units::Metric,
    }
}

#[tokio::test]
async fn current_weather_by_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response("Rain")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let reading = provider.get_weather(&city_request("London")).await.unwrap();

    assert_eq!(reading.location_name, "London");
    assert!((reading.temperature - 11.6).abs() < f64::EPSILON);
    assert_eq!(reading.humidity_pct, 81);
    assert!((reading.pressure_hpa - 1012.0).abs() < f64::EPSILON);
    assert_eq!(reading.visibility_m, Some(10_000));
    assert_eq!(reading.primary_condition().category, "Rain");
    assert_eq!(reading.primary_condition().icon, "10d");
    assert_eq!(reading.observation_time.timestamp(), 1_700_000_000);
    assert_eq!(reading.units, Units::Metric);
}

#[tokio::test]
async fn current_weather_by_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response("Clouds")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let request = WeatherRequest {
        location: Location::Coordinates(Coordinates { latitude: 51.5, longitude: -0.12 }),
        api_key: "TEST_KEY".to_string(),
        units: Units::Imperial,
    };

    let reading = provider.get_weather(&request).await.unwrap();
    assert_eq!(reading.weather_type(), "clouds");
    assert_eq!(reading.units, Units::Imperial);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let err = provider.get_weather(&city_request("Atlantis")).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_condition_list_is_rejected() {
    let server = MockServer::start().await;

    let mut body = sample_response("Rain");
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let err = provider.get_weather(&city_request("London")).await.unwrap_err();
    assert!(matches!(err, FetchError::NoConditions));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let err = provider.get_weather(&city_request("London")).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn missing_visibility_is_tolerated() {
    let server = MockServer::start().await;

    let mut body = sample_response("Mist");
    body.as_object_mut().unwrap().remove("visibility");

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new(&endpoint(&server)).unwrap();
    let reading = provider.get_weather(&city_request("London")).await.unwrap();
    assert_eq!(reading.visibility_m, None);
}

#[tokio::test]
async fn ip_geolocation_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 59.9133,
            "lon": 10.7389
        })))
        .mount(&server)
        .await;

    let locator = IpGeolocator::new(&endpoint(&server)).unwrap();
    let coords = locator.locate().await.unwrap();
    assert!((coords.latitude - 59.9133).abs() < f64::EPSILON);
    assert!((coords.longitude - 10.7389).abs() < f64::EPSILON);
}

#[tokio::test]
async fn ip_geolocation_failure_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let locator = IpGeolocator::new(&endpoint(&server)).unwrap();
    let err = locator.locate().await.unwrap_err();
    match err {
        GeolocationError::Unavailable(msg) => assert_eq!(msg, "reserved range"),
        other => panic!("expected unavailable, got {other:?}"),
    }
}
