//! API Endpoints
//!
//! One typed call per row of the Sortbox HTTP API.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio_util::sync::CancellationToken;

use super::{FetchGateway, HttpMethod, Transport};
use crate::domain::{Advert, AdvertFields, Container, Item, NewContainer, NewItem};
use crate::error::FetchResult;

const CONTAINERS: &str = "/api/containers";
const ITEMS: &str = "/api/items";
const ADVERTS: &str = "/api/advert";

/// Path segment for an id, percent-encoded
fn segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

/// `/api/items/search?name=<q>` with the query encoded
pub fn search_path(query: &str) -> String {
    format!("{}/search?name={}", ITEMS, utf8_percent_encode(query, NON_ALPHANUMERIC))
}

impl<T: Transport> FetchGateway<T> {
    // ========================
    // Containers
    // ========================

    pub async fn list_containers(&self, token: &CancellationToken) -> FetchResult<Vec<Container>> {
        self.request_json::<(), _>(HttpMethod::Get, CONTAINERS, None, token).await
    }

    pub async fn create_container(&self, fields: &NewContainer, token: &CancellationToken) -> FetchResult<Container> {
        self.request_json(HttpMethod::Post, CONTAINERS, Some(fields), token).await
    }

    pub async fn delete_container(&self, id: &str, token: &CancellationToken) -> FetchResult<()> {
        let path = format!("{}/{}", CONTAINERS, segment(id));
        self.request_empty(HttpMethod::Delete, &path, token).await
    }

    // ========================
    // Items
    // ========================

    pub async fn list_items(&self, token: &CancellationToken) -> FetchResult<Vec<Item>> {
        self.request_json::<(), _>(HttpMethod::Get, ITEMS, None, token).await
    }

    pub async fn get_item(&self, id: &str, token: &CancellationToken) -> FetchResult<Item> {
        let path = format!("{}/{}", ITEMS, segment(id));
        self.request_json::<(), _>(HttpMethod::Get, &path, None, token).await
    }

    pub async fn search_items(&self, query: &str, token: &CancellationToken) -> FetchResult<Vec<Item>> {
        self.request_json::<(), _>(HttpMethod::Get, &search_path(query), None, token).await
    }

    pub async fn create_item(&self, fields: &NewItem, token: &CancellationToken) -> FetchResult<Item> {
        self.request_json(HttpMethod::Post, ITEMS, Some(fields), token).await
    }

    pub async fn delete_item(&self, id: &str, token: &CancellationToken) -> FetchResult<()> {
        let path = format!("{}/{}", ITEMS, segment(id));
        self.request_empty(HttpMethod::Delete, &path, token).await
    }

    // ========================
    // Adverts
    // ========================

    pub async fn list_adverts(&self, token: &CancellationToken) -> FetchResult<Vec<Advert>> {
        self.request_json::<(), _>(HttpMethod::Get, ADVERTS, None, token).await
    }

    pub async fn get_advert(&self, id: u64, token: &CancellationToken) -> FetchResult<Advert> {
        let path = format!("{}/{}", ADVERTS, id);
        self.request_json::<(), _>(HttpMethod::Get, &path, None, token).await
    }

    pub async fn create_advert(&self, fields: &AdvertFields, token: &CancellationToken) -> FetchResult<Advert> {
        self.request_json(HttpMethod::Post, ADVERTS, Some(fields), token).await
    }

    pub async fn update_advert(&self, id: u64, fields: &AdvertFields, token: &CancellationToken) -> FetchResult<Advert> {
        let path = format!("{}/{}", ADVERTS, id);
        self.request_json(HttpMethod::Put, &path, Some(fields), token).await
    }

    pub async fn delete_advert(&self, id: u64, token: &CancellationToken) -> FetchResult<()> {
        let path = format!("{}/{}", ADVERTS, id);
        self.request_empty(HttpMethod::Delete, &path, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;

    #[test]
    fn test_search_path_encodes_query() {
        assert_eq!(search_path("news paper"), "/api/items/search?name=news%20paper");
        assert_eq!(search_path("a&b=c"), "/api/items/search?name=a%26b%3Dc");
    }

    #[tokio::test]
    async fn test_create_item_sends_camel_case_body() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Post, "/api/items", 201, r#"{"id":"i9","name":"Bottle","containerId":"c1"}"#);
        let gateway = FetchGateway::new(transport);

        let fields = NewItem { name: "Bottle".into(), container_id: "c1".into() };
        let item = gateway.create_item(&fields, &CancellationToken::new()).await.unwrap();
        assert_eq!(item.id, "i9");

        let sent = gateway.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, Some(serde_json::json!({"name": "Bottle", "containerId": "c1"})));
    }

    #[tokio::test]
    async fn test_update_advert_uses_put() {
        let transport = FakeTransport::new();
        transport.respond(
            HttpMethod::Put,
            "/api/advert/7",
            200,
            r#"{"id":7,"title":"Bike","description":"Barely used","photo":"https://img/bike.jpg"}"#,
        );
        let gateway = FetchGateway::new(transport);

        let fields = AdvertFields {
            title: "Bike".into(),
            description: "Barely used".into(),
            photo: "https://img/bike.jpg".into(),
        };
        let advert = gateway.update_advert(7, &fields, &CancellationToken::new()).await.unwrap();
        assert_eq!(advert.id, 7);
        assert_eq!(gateway.transport().requests()[0].method, HttpMethod::Put);
    }
}
