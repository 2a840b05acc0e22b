//! The `{data: ...}` response envelope every success response uses.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}
