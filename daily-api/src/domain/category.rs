use serde::{Deserialize, Serialize};

use super::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NewCategory<'a> {
    pub name: &'a str,
}
