use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A dashboard user as persisted. The password field holds an argon2
/// hash; only [`UserView`] ever crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The serializable projection of a user, without the credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn build(name: String, email: String, password: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            password,
        }
    }

    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.to_hex(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
