use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A billable customer. Invoices reference customers by id; totals are
/// computed at read time, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl Customer {
    pub fn build(name: String, email: String, image_url: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            image_url,
        }
    }
}
