//! CRUD shared by every master data kind.

use tracing::info;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::model::master_data::MasterData;
use crate::models::MessageResponse;
use crate::routes;

pub async fn list<K: MasterData>(client: &ApiClient) -> ClientResult<Vec<K>> {
    client.get(K::COLLECTION).await
}

pub async fn create<K: MasterData>(client: &ApiClient, payload: &K::Payload) -> ClientResult<K> {
    let item: K = client.post(K::COLLECTION, payload).await?;
    info!(kind = K::LABEL, id = %item.id(), name = item.name(), "Created");
    Ok(item)
}

pub async fn update<K: MasterData>(
    client: &ApiClient,
    id: Uuid,
    payload: &K::Payload,
) -> ClientResult<K> {
    client.put(&routes::master_item(K::COLLECTION, id), payload).await
}

pub async fn delete<K: MasterData>(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    let response = client.delete(&routes::master_item(K::COLLECTION, id)).await?;
    info!(kind = K::LABEL, %id, "Deleted");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::client_as;
    use crate::http::{ApiResponse, Method, MockTransport};
    use crate::model::master_data::{Grade, Position};
    use serde_json::json;

    #[tokio::test]
    async fn each_kind_uses_its_collection() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.method == Method::Get && req.path == "/grades")
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::json(
                    200,
                    json!({"data": [
                        {"id": "0b6f5c59-3f7c-4b8e-9a0e-2f1d8c2a7e11", "name": "G1", "level": 1}
                    ]}),
                ))
            });

        let client = client_as(mock, "admin", None);
        let grades = list::<Grade>(&client).await.unwrap();
        assert_eq!(grades[0].name, "G1");
    }

    #[tokio::test]
    async fn delete_targets_the_item() {
        let id = Uuid::new_v4();
        let path = format!("/positions/{id}");
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(move |req| req.method == Method::Delete && req.path == path)
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, json!({"message": "Deleted"}))));

        let client = client_as(mock, "admin", None);
        delete::<Position>(&client, id).await.unwrap();
    }
}
