/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::auth_service::AuthService;
use crate::services::content_service::ContentService;
use crate::services::id_codec::IdCodec;
use crate::services::risk::evaluator::RiskEvaluator;
use crate::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub content: Arc<ContentService>,
    pub risk: Arc<dyn RiskEvaluator>,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        users: Arc<UserService>,
        content: Arc<ContentService>,
        risk: Arc<dyn RiskEvaluator>,
        id_codec: IdCodec,
    ) -> Self {
        Self {
            auth,
            users,
            content,
            risk,
            id_codec,
        }
    }
}
