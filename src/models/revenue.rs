use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Aggregated revenue for one month, in whole dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revenue {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub month: String,
    pub revenue: i64,
}

impl Revenue {
    pub fn build(month: String, revenue: i64) -> Self {
        Self {
            id: ObjectId::new(),
            month,
            revenue,
        }
    }
}
