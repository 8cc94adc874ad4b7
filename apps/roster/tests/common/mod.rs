//! Shared fixtures: a mock user directory served by wiremock.

#![allow(dead_code, clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The twelve users of the public demo directory.
pub const DIRECTORY: [(u64, &str, &str); 12] = [
    (1, "George", "Bluth"),
    (2, "Janet", "Weaver"),
    (3, "Emma", "Wong"),
    (4, "Eve", "Holt"),
    (5, "Charles", "Morris"),
    (6, "Tracey", "Ramos"),
    (7, "Michael", "Lawson"),
    (8, "Lindsay", "Ferguson"),
    (9, "Tobias", "Funke"),
    (10, "Byron", "Fields"),
    (11, "George", "Edwards"),
    (12, "Rachel", "Howell"),
];

pub fn user_json(id: u64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        "first_name": first,
        "last_name": last,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

pub fn page_json(page: u32) -> Value {
    let start = (page as usize - 1) * 6;
    let data: Vec<Value> = DIRECTORY
        .iter()
        .skip(start)
        .take(6)
        .map(|(id, first, last)| user_json(*id, first, last))
        .collect();
    json!({
        "page": page,
        "per_page": 6,
        "total": DIRECTORY.len(),
        "total_pages": 2,
        "data": data
    })
}

/// Serve both listing pages, each expected `times` times.
pub async fn mount_directory(server: &MockServer, times: u64) {
    for page in 1..=2u32 {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(page)))
            .expect(times)
            .mount(server)
            .await;
    }
}

/// A mock directory holding the demo users.
pub async fn directory_server() -> MockServer {
    let server = MockServer::start().await;
    mount_directory(&server, 1).await;
    server
}
