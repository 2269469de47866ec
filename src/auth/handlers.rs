use tracing::{info, instrument};

use crate::auth::session::Session;
use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::model::employee::Employee;
use crate::models::{LoginReqDto, LoginResponse, MessageResponse};
use crate::routes;

/// Exchange credentials for a session.
#[instrument(skip(client, password))]
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ClientResult<Session> {
    let payload = LoginReqDto {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let response: LoginResponse = client.post(routes::AUTH_LOGIN, &payload).await?;
    let session = Session::from_token(response.access_token)?;
    info!(user = %session.username, role = %session.role, "Logged in");
    Ok(session)
}

pub async fn logout(client: &ApiClient) -> ClientResult<MessageResponse> {
    client.require_session()?;
    client.post_empty(routes::AUTH_LOGOUT).await
}

/// Employee profile of the logged in user.
pub async fn me(client: &ApiClient) -> ClientResult<Employee> {
    client.require_session()?;
    client.get(routes::AUTH_ME).await
}
