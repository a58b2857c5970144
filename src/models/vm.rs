use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartVmRequest {
    pub cluster: String,
    pub node: String,
    pub vm_id: u32,
}
