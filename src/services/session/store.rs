/*
 * Responsibility
 * - ログイン中ユーザーの 5 項目をメモリ + durable storage に同期する
 * - hydrate() は明示呼び出しのみ (画面遷移ごとの自動読込はしない)
 * - 壊れた blob は「未ログイン」と同じ扱いにする (エラーを外に出さない)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::services::session::storage::SessionStorage;

/// Fixed key for the persisted session blob.
pub const STORAGE_KEY: &str = "logged_in_user";

/// Client-held projection of the signed-in user.
///
/// Not the persisted User: all five fields are strings and the birth date
/// is a Jalali calendar string (e.g. "1372/05/14"), exactly as entered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
    pub mobile: String,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

/// State container for the current session, explicitly constructed and
/// passed by reference to whatever view needs it.
///
/// The store is the sole writer of the persisted blob; durable storage is
/// a cache of the in-memory value, rebuilt on every mutation and reloaded
/// only by an explicit `hydrate()`. `&mut self` receivers make the
/// "no hydrate concurrent with set_user" rule a compile-time property.
pub struct SessionStore {
    user: Option<LoggedInUser>,
    storage: Option<Box<dyn SessionStorage>>,
}

impl SessionStore {
    /// `storage: None` means "no durable environment": the store still
    /// works in-memory, writes skip persistence, and `hydrate()` is a
    /// no-op.
    pub fn new(storage: Option<Box<dyn SessionStorage>>) -> Self {
        Self {
            user: None,
            storage,
        }
    }

    pub fn user(&self) -> Option<&LoggedInUser> {
        self.user.as_ref()
    }

    /// Replace the in-memory record and mirror it to durable storage.
    ///
    /// Persistence is best-effort: a failed storage write is logged and
    /// swallowed, and the in-memory update is not rolled back.
    pub fn set_user(&mut self, user: Option<LoggedInUser>) {
        self.user = user;

        let Some(storage) = self.storage.as_mut() else {
            return;
        };

        let result = match &self.user {
            Some(user) => match serde_json::to_string(user) {
                Ok(blob) => storage.write(STORAGE_KEY, &blob),
                Err(e) => {
                    warn!(error = %e, "session record could not be serialized");
                    return;
                }
            },
            None => storage.remove(STORAGE_KEY),
        };

        if let Err(e) = result {
            warn!(backend = storage.backend_name(), error = %e, "session record was not persisted");
        }
    }

    pub fn clear_user(&mut self) {
        self.set_user(None);
    }

    /// Reload the record from durable storage.
    ///
    /// Anything short of a parseable blob carrying all five expected keys
    /// resets the store to "no user": a corrupt cache is equivalent to an
    /// empty one. Values are coerced to strings rather than type-checked.
    pub fn hydrate(&mut self) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };

        let blob = match storage.read(STORAGE_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(backend = storage.backend_name(), error = %e, "session record could not be read");
                None
            }
        };

        self.user = blob.as_deref().and_then(parse_record);
    }
}

fn parse_record(blob: &str) -> Option<LoggedInUser> {
    let value: Value = serde_json::from_str(blob).ok()?;
    let record = value.as_object()?;

    Some(LoggedInUser {
        mobile: coerce(record.get("mobile")?)?,
        national_id: coerce(record.get("nationalId")?)?,
        first_name: coerce(record.get("firstName")?)?,
        last_name: coerce(record.get("lastName")?)?,
        birth_date: coerce(record.get("birthDate")?)?,
    })
}

fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
