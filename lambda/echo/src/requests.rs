use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(super) struct EchoResponse {
    pub method: String,
    pub path: String,
}
